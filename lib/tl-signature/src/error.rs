use crate::{BoxError, crypto, envelope, token};
use miette::Diagnostic;
use thiserror::Error;

/// Signing and verification error
///
/// Every variant is terminal. Nothing is retried or recovered internally.
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed builder input, such as a path without a leading `/`
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Key material could not be parsed or has the wrong type/curve
    #[error("Invalid key")]
    InvalidKey(#[from] crypto::parse::Error),

    /// Token is not a three-segment base64url JWS
    #[error("Malformed token")]
    TokenParse(#[source] token::ParseError),

    /// Protected header could not be decoded
    #[error("Malformed signature envelope")]
    EnvelopeParse(#[source] envelope::ParseError),

    /// Envelope declares an algorithm other than ES512
    #[error("Unsupported signature algorithm `{0}`")]
    UnsupportedAlgorithm(String),

    /// Envelope declares a protocol version other than 2
    #[error("Unsupported signature version `{0}`")]
    UnsupportedVersion(String),

    /// JWKS verification requires a `kid` but the envelope has none
    #[error("Signature envelope has no key ID")]
    MissingKeyId,

    /// No key with the envelope's `kid` exists in the JWKS
    #[error("Unknown key ID `{0}`")]
    UnknownKeyId(String),

    /// JWK has a key type other than `EC`
    #[error("Unsupported key type `{0}`")]
    UnsupportedKeyType(String),

    /// JWK is on a curve other than P-521
    #[error("Unsupported curve `{0}`")]
    UnsupportedCurve(String),

    /// A required header wasn't covered by the signature
    #[error("Signature is missing required header `{0}`")]
    MissingRequiredHeader(String),

    /// Cryptographic verification failed
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature generation failed
    #[error("Signing failed")]
    Signing(#[source] BoxError),

    /// Request has no `Tl-Signature` header
    #[cfg(feature = "easy")]
    #[error("Missing `Tl-Signature` header")]
    MissingSignature,

    /// `Tl-Signature` header contains non-visible-ASCII bytes
    #[cfg(feature = "easy")]
    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::ToStrError),
}
