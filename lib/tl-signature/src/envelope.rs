//!
//! Protected header of a `Tl-Signature` token
//!

use crate::{header::HeaderName, token, Error};
use base64_simd::URL_SAFE_NO_PAD;
use derive_builder::Builder;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// The only supported JWS algorithm (ECDSA P-521 with SHA-512)
pub const ALGORITHM: &str = "ES512";

/// The only supported `tl_version`
pub const VERSION: &str = "2";

/// Envelope parsing error
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum ParseError {
    /// Token structure is broken
    #[error(transparent)]
    Token(#[from] token::ParseError),

    /// Protected header isn't a valid JSON claim set
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Envelope carries no `jku` claim
    #[error("Missing `jku` claim")]
    MissingJku,
}

/// Claim set of the protected header
///
/// Fields serialize in declaration order. `kid` and `jku` are omitted when unset.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[builder(pattern = "owned")]
pub struct SignatureEnvelope {
    /// JWS algorithm
    #[builder(default = ALGORITHM.into(), setter(into))]
    pub alg: String,

    /// ID of the signing key
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    /// Protocol version
    #[builder(default = VERSION.into(), setter(into))]
    #[serde(default)]
    pub tl_version: String,

    /// Comma-separated names of the signed headers, in signing order
    #[builder(default, setter(into))]
    #[serde(default)]
    pub tl_headers: String,

    /// URL of the JWKS document holding the signing key
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jku: Option<String>,
}

impl SignatureEnvelope {
    /// Start building an envelope from scratch
    #[must_use]
    pub fn builder() -> SignatureEnvelopeBuilder {
        SignatureEnvelopeBuilder::default()
    }

    /// Envelope a signer emits for the given key and header names
    pub fn for_signing<'a, I>(kid: &str, header_names: I, jku: Option<&str>) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            alg: ALGORITHM.into(),
            kid: Some(kid.into()),
            tl_version: VERSION.into(),
            tl_headers: itertools::intersperse(header_names, ",").collect(),
            jku: jku.map(Into::into),
        }
    }

    /// Header names listed in `tl_headers`, trimmed and in order
    ///
    /// Empty entries are dropped. Duplicates are kept.
    pub fn declared_headers(&self) -> impl Iterator<Item = &str> + '_ {
        self.tl_headers
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Check the algorithm and version and ensure every required header is declared
    ///
    /// Returns the declared header list.
    pub fn validate<'r, I>(&self, required: I) -> Result<Vec<&str>, Error>
    where
        I: IntoIterator<Item = HeaderName<'r>>,
    {
        if self.alg != ALGORITHM {
            return Err(Error::UnsupportedAlgorithm(self.alg.clone()));
        }

        if self.tl_version != VERSION {
            return Err(Error::UnsupportedVersion(self.tl_version.clone()));
        }

        let declared = self.declared_headers().collect::<Vec<_>>();
        for name in required {
            if !declared.iter().any(|declared| HeaderName::new(declared) == name) {
                return Err(Error::MissingRequiredHeader(name.as_str().into()));
            }
        }

        Ok(declared)
    }

    /// Serialize into the base64url-encoded JSON of the first token segment
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode_to_string(json))
    }

    /// Deserialize from the decoded JSON bytes of the first token segment
    pub fn decode(json: &[u8]) -> Result<Self, ParseError> {
        serde_json::from_slice(json).map_err(ParseError::from)
    }
}
