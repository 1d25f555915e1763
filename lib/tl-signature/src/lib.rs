//!
//! Produce and verify `Tl-Signature` v2 request signatures
//!
//! A signature covers the request method, path, an ordered selection of headers and the body.
//! The signer emits a detached ES512 JWS, the verifier rebuilds the signed bytes from the request it actually received.
//!
//! ```no_run
//! # fn main() -> Result<(), tl_signature::Error> {
//! # let (kid, private_key, public_key): (&str, &str, &str) = unimplemented!();
//! let tl_signature = tl_signature::sign_with_pem(kid, private_key)?
//!     .method("POST")
//!     .path("/payouts")
//!     .header("Idempotency-Key", "idemp-123")
//!     .body(r#"{"currency":"GBP"}"#)
//!     .sign()?;
//!
//! tl_signature::verify_with_pem(public_key)?
//!     .method("POST")
//!     .path("/payouts")
//!     .require_header("Idempotency-Key")
//!     .header("idempotency-key", "idemp-123")
//!     .body(r#"{"currency":"GBP"}"#)
//!     .verify(&tl_signature)?;
//! # Ok(()) }
//! ```
//!

#![deny(missing_docs)]

use std::sync::Arc;

pub use self::{
    envelope::{SignatureEnvelope, SignatureEnvelopeBuilder},
    error::Error,
    header::{HeaderMap, HeaderName},
    jwks::JwkSet,
    sign::Signer,
    verify::{KeySource, Verifier},
};

pub mod crypto;
#[cfg(feature = "easy")]
pub mod easy;
pub mod envelope;
pub mod payload;
pub mod token;

mod error;
mod header;
mod jwks;
mod sign;
mod verify;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type Result<T, E = Error> = std::result::Result<T, E>;

/// Start building a `Tl-Signature` for the key identified by `kid`, using PEM encoded private key material
///
/// Accepts SEC1 (`EC PRIVATE KEY`) and PKCS#8 (`PRIVATE KEY`) documents of P-521 keys.
#[inline]
pub fn sign_with_pem<'a>(kid: &'a str, private_key_pem: &str) -> Result<Signer<'a>> {
    let key = crypto::parse::private_key(private_key_pem)?;
    Ok(Signer::new(kid, key))
}

/// Start building a verifier for a PEM encoded P-521 public key
#[inline]
pub fn verify_with_pem<'a>(public_key_pem: &str) -> Result<Verifier<'a>> {
    let key = crypto::parse::public_key(public_key_pem)?;
    Ok(Verifier::new(KeySource::PublicKey(key)))
}

/// Start building a verifier that picks its key from a JWKS document by the token's `kid`
///
/// The document is parsed once. To share one parsed set between many verifications, use [`Verifier::new`] with [`KeySource::Jwks`].
#[inline]
pub fn verify_with_jwks<'a>(jwks: &[u8]) -> Result<Verifier<'a>> {
    let jwks = JwkSet::parse(jwks)?;
    Ok(Verifier::new(KeySource::Jwks(Arc::new(jwks))))
}

/// Read the `jku` (JWKS URL) out of a token without checking its signature
///
/// The returned URL is attacker-controlled until the signature is verified.
/// Check it against an allow-list before fetching anything from it.
#[inline]
pub fn extract_jku(tl_signature: &str) -> Result<String> {
    extract_envelope(tl_signature)?
        .jku
        .ok_or(Error::EnvelopeParse(envelope::ParseError::MissingJku))
}

/// Decode the protected header of a token without checking its signature
#[inline]
pub fn extract_envelope(tl_signature: &str) -> Result<SignatureEnvelope> {
    let token = token::split(tl_signature)
        .map_err(|err| Error::EnvelopeParse(envelope::ParseError::Token(err)))?;

    SignatureEnvelope::decode(&token.envelope).map_err(Error::EnvelopeParse)
}
