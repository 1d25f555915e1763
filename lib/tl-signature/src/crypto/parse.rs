//!
//! Parse P-521 keys from PEM documents and JWK coordinates
//!

use base64_simd::URL_SAFE_NO_PAD;
use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, SECP_521_R_1};
use miette::Diagnostic;
use p521::ecdsa::{SigningKey, VerifyingKey};
use pkcs8::{
    der::Decode, spki::AlgorithmIdentifierRef, Document, PrivateKeyInfo, SecretDocument,
    SubjectPublicKeyInfoRef,
};
use sec1::EcPrivateKey;
use thiserror::Error;

/// Byte length of a P-521 field element
const COORDINATE_SIZE: usize = 66;

const SEC1_LABEL: &str = "EC PRIVATE KEY";
const PKCS8_LABEL: &str = "PRIVATE KEY";

/// Key parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Malformed base64url in a JWK coordinate
    #[error(transparent)]
    Base64(#[from] base64_simd::Error),

    /// Malformed DER structure
    #[error(transparent)]
    Der(#[from] pkcs8::der::Error),

    /// Malformed JWKS document
    #[error(transparent)]
    Jwks(#[from] serde_json::Error),

    /// Key rejected
    #[error("Key rejected")]
    KeyRejected(#[from] signature::Error),

    /// Malformed key
    #[error("Malformed key")]
    MalformedKey,

    /// Malformed PKCS#8 document
    #[error(transparent)]
    Pkcs8(#[from] pkcs8::Error),

    /// Unknown key type
    #[error("Unknown key type")]
    UnknownKeyType,

    /// Key is on a curve other than P-521
    #[error("Unsupported curve")]
    UnsupportedCurve,
}

fn ensure_p521(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<(), Error> {
    if algorithm.oid != ID_EC_PUBLIC_KEY {
        return Err(Error::UnknownKeyType);
    }

    let curve = algorithm
        .parameters_oid()
        .map_err(|_| Error::MalformedKey)?;
    if curve != SECP_521_R_1 {
        return Err(Error::UnsupportedCurve);
    }

    Ok(())
}

fn sec1_private_key(ec_key: &EcPrivateKey<'_>) -> Result<SigningKey, Error> {
    if let Some(curve) = ec_key.parameters.as_ref().and_then(|params| params.named_curve()) {
        if curve != SECP_521_R_1 {
            return Err(Error::UnsupportedCurve);
        }
    }

    Ok(SigningKey::from_slice(ec_key.private_key)?)
}

/// Parse a public key from its SPKI (`PUBLIC KEY`) PEM form
#[inline]
pub fn public_key(pem: &str) -> Result<VerifyingKey, Error> {
    let (_pem_tag, document) = Document::from_pem(pem)?;
    let spki: SubjectPublicKeyInfoRef<'_> = document.decode_msg()?;
    ensure_p521(&spki.algorithm)?;

    let raw_bytes = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::MalformedKey)?;

    Ok(VerifyingKey::from_sec1_bytes(raw_bytes)?)
}

/// Parse a private key from its PEM form.
/// This function uses constant-time PEM decoding and zeroizes any temporary allocations.
///
/// Supported encodings:
///
/// - SEC1 (`EC PRIVATE KEY`)
/// - PKCS#8 (`PRIVATE KEY`)
#[inline]
pub fn private_key(pem: &str) -> Result<SigningKey, Error> {
    let (tag_line, document) = SecretDocument::from_pem(pem)?;

    match tag_line {
        SEC1_LABEL => {
            let ec_key: EcPrivateKey<'_> = document.decode_msg()?;
            sec1_private_key(&ec_key)
        }
        PKCS8_LABEL => {
            let private_key_raw: PrivateKeyInfo<'_> = document.decode_msg()?;
            ensure_p521(&private_key_raw.algorithm)?;

            let ec_key = EcPrivateKey::from_der(private_key_raw.private_key)?;
            sec1_private_key(&ec_key)
        }
        _ => Err(Error::UnknownKeyType),
    }
}

/// Build a public key from the base64url `x` and `y` coordinates of an EC JWK
///
/// Coordinates shorter than the field size are left-padded with zeroes.
#[inline]
pub fn jwk_public_key(x: &str, y: &str) -> Result<VerifyingKey, Error> {
    let mut sec1 = Vec::with_capacity(1 + COORDINATE_SIZE * 2);
    sec1.push(0x04);

    for coordinate in [x, y] {
        let bytes = URL_SAFE_NO_PAD.decode_to_vec(coordinate)?;
        let Some(padding) = COORDINATE_SIZE.checked_sub(bytes.len()) else {
            return Err(Error::MalformedKey);
        };

        sec1.resize(sec1.len() + padding, 0);
        sec1.extend_from_slice(&bytes);
    }

    Ok(VerifyingKey::from_sec1_bytes(&sec1)?)
}
