use crate::BoxError;
use base64_simd::URL_SAFE_NO_PAD;
use p521::ecdsa::Signature;

/// Signing key definition
///
/// Implement this for keys that live outside the process (HSM, KMS) to sign through [`Signer`](crate::Signer).
/// Implementations must produce ES512 signatures in their fixed-size `r || s` form.
pub trait SigningKey {
    /// Type the signature algorithm outputs
    type Output: AsRef<[u8]>;

    /// Sign a message
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, BoxError>;
}

impl SigningKey for p521::ecdsa::SigningKey {
    type Output = Vec<u8>;

    #[inline]
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, BoxError> {
        let signature: Signature = signature::Signer::try_sign(self, msg)?;
        Ok(signature.to_bytes().to_vec())
    }
}

impl<T> SigningKey for &T
where
    T: SigningKey + ?Sized,
{
    type Output = T::Output;

    #[inline]
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, BoxError> {
        (**self).sign(msg)
    }
}

/// Sign a message with the provided signing key and encode the returned signature in unpadded base64url
#[inline]
pub fn sign<SK>(msg: &[u8], key: &SK) -> Result<String, BoxError>
where
    SK: SigningKey + ?Sized,
{
    let signature = key.sign(msg)?;
    Ok(URL_SAFE_NO_PAD.encode_to_string(signature))
}
