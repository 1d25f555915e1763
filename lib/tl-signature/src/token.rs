//!
//! JWS compact serialization as used by `Tl-Signature`
//!
//! Tokens are emitted with a detached payload (`header..signature`).
//! The middle segment of incoming tokens is decoded but never trusted, the verifier rebuilds the payload itself.
//!

use base64_simd::URL_SAFE_NO_PAD;
use miette::Diagnostic;
use thiserror::Error;

/// Token parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum ParseError {
    /// Token doesn't consist of exactly three `.`-separated segments
    #[error("Expected three segments, found {0}")]
    SegmentCount(usize),

    /// A segment isn't valid unpadded base64url
    #[error(transparent)]
    Base64(#[from] base64_simd::Error),
}

/// Decoded segments of a token
#[derive(Debug)]
pub struct Token<'a> {
    /// Protected header exactly as it appeared in the token
    pub envelope_b64: &'a str,

    /// Decoded protected header (JSON)
    pub envelope: Vec<u8>,

    /// Decoded raw signature
    pub signature: Vec<u8>,
}

/// Split a token into its segments and decode them
///
/// The payload segment may be empty or populated. Its content is ignored either way.
pub fn split(token: &str) -> Result<Token<'_>, ParseError> {
    let segments = token.split('.').collect::<Vec<_>>();
    let [envelope_b64, payload_b64, signature_b64] = segments[..] else {
        return Err(ParseError::SegmentCount(segments.len()));
    };

    let envelope = URL_SAFE_NO_PAD.decode_to_vec(envelope_b64)?;
    URL_SAFE_NO_PAD.decode_to_vec(payload_b64)?;
    let signature = URL_SAFE_NO_PAD.decode_to_vec(signature_b64)?;

    Ok(Token {
        envelope_b64,
        envelope,
        signature,
    })
}

/// JWS signing input: `envelope_b64 "." base64url(payload)`
#[must_use]
pub fn signing_input(envelope_b64: &str, payload: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(envelope_b64.len() + 1 + payload.len() * 4 / 3 + 4);
    input.extend_from_slice(envelope_b64.as_bytes());
    input.push(b'.');
    input.extend_from_slice(URL_SAFE_NO_PAD.encode_to_string(payload).as_bytes());
    input
}

/// Assemble a detached token out of the encoded header and signature
#[must_use]
pub fn assemble(envelope_b64: &str, signature_b64: &str) -> String {
    format!("{envelope_b64}..{signature_b64}")
}
