//!
//! Easy `Tl-Signature` handling for [`http::Request`]s
//!
//! Signs and verifies requests with opinionated defaults: every header the request carries is covered by the signature
//!

use crate::{crypto::SigningKey, Error, KeySource, Result, Signer, Verifier};
use http::{HeaderName, HeaderValue};
use tracing::{debug, instrument};

/// Name of the `Tl-Signature` header
pub static TL_SIGNATURE: HeaderName = HeaderName::from_static("tl-signature");

/// Sign an HTTP request with all of its headers
///
/// Any existing `Tl-Signature` header is replaced. The query string isn't part of the signature.
/// If a header occurs multiple times, only its last value is signed.
#[inline]
#[instrument(skip_all, fields(kid = %kid))]
pub fn sign<B, SK>(mut req: http::Request<B>, kid: &str, key: &SK) -> Result<http::Request<B>>
where
    B: AsRef<[u8]>,
    SK: SigningKey + ?Sized,
{
    req.headers_mut().remove(&TL_SIGNATURE);

    let headers = req
        .headers()
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_bytes()));

    let tl_signature = Signer::new(kid, key)
        .method(req.method().as_str())
        .path(req.uri().path())
        .headers(headers)
        .body(req.body())
        .sign()?;

    let header_value =
        HeaderValue::try_from(tl_signature).map_err(|err| Error::Signing(err.into()))?;
    req.headers_mut().insert(&TL_SIGNATURE, header_value);

    Ok(req)
}

/// Verify the `Tl-Signature` of an HTTP request
///
/// Every other header of the request is made available to the verifier.
#[inline]
#[instrument(skip_all)]
pub fn verify<'a, B>(
    req: &'a http::Request<B>,
    key_source: KeySource,
    required_headers: &[&'a str],
) -> Result<()>
where
    B: AsRef<[u8]>,
{
    let Some(header) = req.headers().get(&TL_SIGNATURE) else {
        debug!("Missing 'Tl-Signature' header");
        return Err(Error::MissingSignature);
    };
    let tl_signature = header.to_str()?;

    let headers = req
        .headers()
        .iter()
        .filter(|(name, _)| **name != TL_SIGNATURE)
        .map(|(name, value)| (name.as_str(), value.as_bytes()));

    Verifier::new(key_source)
        .method(req.method().as_str())
        .path(req.uri().path())
        .headers(headers)
        .require_headers(required_headers.iter().copied())
        .body(req.body())
        .verify(tl_signature)
}
