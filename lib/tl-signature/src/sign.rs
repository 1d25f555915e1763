use crate::{
    crypto::{self, SigningKey},
    envelope::SignatureEnvelope,
    header::HeaderMap,
    payload, token, Error, Result,
};
use std::fmt;
use tracing::{debug, instrument};

/// Builder for a `Tl-Signature`
///
/// Consumed by [`Signer::sign`]. Build one signer per request.
pub struct Signer<'a, K = p521::ecdsa::SigningKey> {
    kid: &'a str,
    key: K,
    method: &'a str,
    path: &'a str,
    body: &'a [u8],
    headers: HeaderMap<'a>,
    jku: Option<&'a str>,
}

impl<'a, K> Signer<'a, K> {
    /// Create a signer for the key identified by `kid`
    ///
    /// Defaults to a `POST` request with an empty path, no headers and an empty body.
    #[must_use]
    pub fn new(kid: &'a str, key: K) -> Self {
        Self {
            kid,
            key,
            method: "POST",
            path: "",
            body: b"",
            headers: HeaderMap::new(),
            jku: None,
        }
    }

    /// HTTP method, case-insensitive
    #[must_use]
    pub fn method(mut self, method: &'a str) -> Self {
        self.method = method;
        self
    }

    /// Request path, starting with `/`
    #[must_use]
    pub fn path(mut self, path: &'a str) -> Self {
        self.path = path;
        self
    }

    /// Raw request body
    #[must_use]
    pub fn body<V>(mut self, body: &'a V) -> Self
    where
        V: AsRef<[u8]> + ?Sized,
    {
        self.body = body.as_ref();
        self
    }

    /// Add a header to the signature
    ///
    /// Headers are signed in the order they are added.
    /// Adding a name a second time (in any casing) replaces its value but keeps its position.
    #[must_use]
    pub fn header<V>(mut self, name: &'a str, value: &'a V) -> Self
    where
        V: AsRef<[u8]> + ?Sized,
    {
        self.headers.insert(name, value.as_ref());
        self
    }

    /// Add multiple headers to the signature, see [`Signer::header`]
    #[must_use]
    pub fn headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        self.headers.extend(headers);
        self
    }

    /// URL of the JWKS document the verifier should fetch the public key from
    #[must_use]
    pub fn jku(mut self, jku: &'a str) -> Self {
        self.jku = Some(jku);
        self
    }
}

impl<K> Signer<'_, K>
where
    K: SigningKey,
{
    /// Produce the `Tl-Signature` token (detached JWS)
    #[instrument(skip_all, fields(kid = self.kid))]
    pub fn sign(self) -> Result<String> {
        if !self.path.is_empty() && !self.path.starts_with('/') {
            return Err(Error::InvalidArgument(format!(
                "path must start with `/`, got `{}`",
                self.path
            )));
        }

        let envelope = SignatureEnvelope::for_signing(self.kid, self.headers.names(), self.jku);
        let envelope_b64 = envelope
            .encode()
            .map_err(|err| Error::Signing(err.into()))?;

        let payload = payload::construct(self.method, self.path, self.headers.iter(), self.body);
        let signing_input = token::signing_input(&envelope_b64, &payload);
        let signature = crypto::sign(&signing_input, &self.key).map_err(Error::Signing)?;

        debug!(tl_headers = %envelope.tl_headers, "signed request");

        Ok(token::assemble(&envelope_b64, &signature))
    }
}

impl<K> fmt::Debug for Signer<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("kid", &self.kid)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &self.headers)
            .field("jku", &self.jku)
            .finish_non_exhaustive()
    }
}
