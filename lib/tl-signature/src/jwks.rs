use crate::{crypto::parse, Error};
use indexmap::IndexMap;
use p521::ecdsa::VerifyingKey;
use serde::Deserialize;

const KEY_TYPE: &str = "EC";
const CURVE: &str = "P-521";

#[derive(Deserialize)]
struct Document {
    keys: Vec<Jwk>,
}

#[derive(Clone, Debug, Deserialize)]
struct Jwk {
    kid: Option<String>,
    kty: String,
    crv: Option<String>,
    x: Option<String>,
    y: Option<String>,
}

/// JSON Web Key Set, indexed by key ID
///
/// Keys without a `kid` can never be selected and are dropped while parsing.
/// If a `kid` appears more than once, the first key wins.
#[derive(Clone, Debug, Default)]
pub struct JwkSet {
    keys: IndexMap<String, Jwk>,
}

impl JwkSet {
    /// Parse a JWKS JSON document
    ///
    /// Only the structure is checked here. Key types, curves and coordinates are checked once a key is resolved.
    pub fn parse(jwks: &[u8]) -> Result<Self, parse::Error> {
        let document: Document = serde_json::from_slice(jwks)?;

        let mut keys = IndexMap::with_capacity(document.keys.len());
        for jwk in document.keys {
            let Some(kid) = jwk.kid.clone() else {
                continue;
            };
            keys.entry(kid).or_insert(jwk);
        }

        Ok(Self { keys })
    }

    /// Number of selectable keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set contains no selectable keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether a key with this ID exists, regardless of its type
    #[must_use]
    pub fn contains(&self, kid: &str) -> bool {
        self.keys.contains_key(kid)
    }

    /// Key IDs in document order
    pub fn kids(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.keys().map(String::as_str)
    }

    /// Select the P-521 key identified by `kid`
    pub fn resolve(&self, kid: Option<&str>) -> Result<VerifyingKey, Error> {
        let kid = kid.ok_or(Error::MissingKeyId)?;
        let jwk = self
            .keys
            .get(kid)
            .ok_or_else(|| Error::UnknownKeyId(kid.into()))?;

        if jwk.kty != KEY_TYPE {
            return Err(Error::UnsupportedKeyType(jwk.kty.clone()));
        }

        let curve = jwk.crv.as_deref().unwrap_or_default();
        if curve != CURVE {
            return Err(Error::UnsupportedCurve(curve.into()));
        }

        let (Some(x), Some(y)) = (&jwk.x, &jwk.y) else {
            return Err(Error::InvalidKey(parse::Error::MalformedKey));
        };

        Ok(parse::jwk_public_key(x, y)?)
    }
}
