use miette::Diagnostic;
use p521::ecdsa::{Signature, VerifyingKey};
use thiserror::Error;

/// Verification error
#[derive(Debug, Diagnostic, Error)]
pub enum VerifyError {
    /// Signature isn't a 132 byte `r || s` pair within the curve order
    #[error("Malformed signature")]
    MalformedSignature,

    /// Verification failed
    #[error("Verification failed")]
    Verification,
}

/// Verify that the message corresponds with the raw ES512 signature using the provided verifying key
#[inline]
pub fn verify(msg: &[u8], signature: &[u8], key: &VerifyingKey) -> Result<(), VerifyError> {
    let signature = Signature::from_slice(signature).map_err(|_| VerifyError::MalformedSignature)?;
    signature::Verifier::verify(key, msg, &signature).map_err(|_| VerifyError::Verification)
}
