//!
//! Canonical payload construction
//!
//! The canonical payload is the exact byte string a `Tl-Signature` authenticates:
//!
//! ```txt
//! POST /test-signature
//! Idempotency-Key: 619410b3-b00c-406e-bb1b-2982f97edb8b
//! {"bar":123}
//! ```
//!

/// Construct the canonical payload of a request
///
/// `UPPER(method) SP path LF`, then one `name: value LF` line per header in the given order, then the raw body.
/// Without headers, the body directly follows the request line.
#[inline]
pub fn construct<I, N, V>(method: &str, path: &str, headers: I, body: &[u8]) -> Vec<u8>
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<[u8]>,
{
    let mut payload = Vec::with_capacity(method.len() + path.len() + body.len() + 2);
    payload.extend(method.bytes().map(|byte| byte.to_ascii_uppercase()));
    payload.push(b' ');
    payload.extend_from_slice(path.as_bytes());
    payload.push(b'\n');

    for (name, value) in headers {
        payload.extend_from_slice(name.as_ref().as_bytes());
        payload.extend_from_slice(b": ");
        payload.extend_from_slice(value.as_ref());
        payload.push(b'\n');
    }

    payload.extend_from_slice(body);
    payload
}
