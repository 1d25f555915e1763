use crate::{
    crypto,
    envelope::SignatureEnvelope,
    header::{HeaderMap, HeaderName},
    jwks::JwkSet,
    payload, token, Error, Result,
};
use indexmap::IndexSet;
use p521::ecdsa::VerifyingKey;
use std::{borrow::Cow, fmt, sync::Arc};
use tracing::{debug, instrument};

/// Where the verifier gets its public key from
#[derive(Clone)]
pub enum KeySource {
    /// A single, known public key
    PublicKey(VerifyingKey),

    /// A key set. The key is picked by the token's `kid`.
    Jwks(Arc<JwkSet>),
}

impl KeySource {
    /// Resolve the public key for a token with this envelope
    pub fn resolve(&self, envelope: &SignatureEnvelope) -> Result<Cow<'_, VerifyingKey>> {
        match self {
            Self::PublicKey(key) => Ok(Cow::Borrowed(key)),
            Self::Jwks(jwks) => jwks.resolve(envelope.kid.as_deref()).map(Cow::Owned),
        }
    }
}

impl From<VerifyingKey> for KeySource {
    fn from(value: VerifyingKey) -> Self {
        Self::PublicKey(value)
    }
}

impl From<JwkSet> for KeySource {
    fn from(value: JwkSet) -> Self {
        Self::Jwks(Arc::new(value))
    }
}

impl From<Arc<JwkSet>> for KeySource {
    fn from(value: Arc<JwkSet>) -> Self {
        Self::Jwks(value)
    }
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublicKey(..) => f.write_str("PublicKey(..)"),
            Self::Jwks(jwks) => f.debug_tuple("Jwks").field(&jwks.len()).finish(),
        }
    }
}

/// Append a trailing `/` if there is none, strip one otherwise
fn toggle_trailing_slash(path: &str) -> Cow<'_, str> {
    match path.strip_suffix('/') {
        Some(stripped) => Cow::Borrowed(stripped),
        None => Cow::Owned(format!("{path}/")),
    }
}

/// Verifier for a `Tl-Signature`
///
/// Fed with the request as it was received. Consumed by [`Verifier::verify`].
#[derive(Debug)]
pub struct Verifier<'a> {
    key_source: KeySource,
    method: &'a str,
    path: &'a str,
    body: &'a [u8],
    headers: HeaderMap<'a>,
    required_headers: IndexSet<HeaderName<'a>>,
}

impl<'a> Verifier<'a> {
    /// Create a verifier using the given key source
    ///
    /// Defaults to a `POST` request with no headers and an empty body. The path has to be set.
    #[must_use]
    pub fn new(key_source: KeySource) -> Self {
        Self {
            key_source,
            method: "POST",
            path: "",
            body: b"",
            headers: HeaderMap::new(),
            required_headers: IndexSet::new(),
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

    /// Add a received header
    ///
    /// Headers may be added in any order and casing. Only the ones listed in the token are used.
    #[must_use]
    pub fn header<V>(mut self, name: &'a str, value: &'a V) -> Self
    where
        V: AsRef<[u8]> + ?Sized,
    {
        self.headers.insert(name, value.as_ref());
        self
    }

    /// Add multiple received headers, see [`Verifier::header`]
    #[must_use]
    pub fn headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        self.headers.extend(headers);
        self
    }

    /// Require the signature to cover this header
    ///
    /// The header must be listed in the token and it must be added to this verifier.
    #[must_use]
    pub fn require_header(mut self, name: &'a str) -> Self {
        self.required_headers.insert(HeaderName::new(name));
        self
    }

    /// Require the signature to cover all of these headers, see [`Verifier::require_header`]
    #[must_use]
    pub fn require_headers<I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.required_headers
            .extend(names.into_iter().map(HeaderName::new));
        self
    }

    /// Verify the token against the request
    ///
    /// If the signature doesn't match, the path with a toggled trailing slash is tried once more.
    #[instrument(skip_all)]
    pub fn verify(self, tl_signature: &str) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(Error::InvalidArgument(format!(
                "path must start with `/`, got `{}`",
                self.path
            )));
        }

        let token = token::split(tl_signature).map_err(|err| {
            debug!(error = %err, "malformed token");
            Error::TokenParse(err)
        })?;
        let envelope = SignatureEnvelope::decode(&token.envelope).map_err(|err| {
            debug!(error = %err, "malformed envelope");
            Error::EnvelopeParse(err)
        })?;

        let declared = envelope.validate(self.required_headers.iter().copied())?;
        if let Some(name) = self
            .required_headers
            .iter()
            .find(|name| !self.headers.contains(name.as_str()))
        {
            debug!(header = %name, "required header not supplied");
            return Err(Error::MissingRequiredHeader(name.as_str().into()));
        }

        let headers = self.headers.select(&declared);
        let key = self.key_source.resolve(&envelope)?;

        let verify_path = |path: &str| {
            let payload = payload::construct(self.method, path, headers.iter().copied(), self.body);
            let signing_input = token::signing_input(token.envelope_b64, &payload);
            crypto::verify(&signing_input, &token.signature, &key)
        };

        if verify_path(self.path).is_ok() {
            return Ok(());
        }

        if verify_path(&*toggle_trailing_slash(self.path)).is_ok() {
            debug!("signature matched after toggling trailing slash");
            return Ok(());
        }

        debug!(kid = ?envelope.kid, "signature verification failed");
        Err(Error::InvalidSignature)
    }
}
