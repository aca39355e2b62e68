//! Request checksums.
//!
//! Signed channels carry a `checksum` field: the lowercase hex HMAC-SHA256 of
//! an ordered list of field values concatenated without a separator, keyed by
//! the merchant secret key. The order of the values is part of the provider's
//! contract and differs between channel groups; see
//! [`PaymentRequest::checksum_fields`](crate::request::PaymentRequest::checksum_fields).

use ring::hmac;

/// Computes `hex(HMAC_SHA256(secret_key, concat(args)))`.
///
/// Arguments are fed to the MAC in the order given. No reordering, trimming
/// or validation takes place.
///
/// # Example
///
/// ```rust
/// use gbprimepay::checksum;
///
/// let joined = checksum("key", ["The quick brown fox jumps over the lazy dog"]);
/// let split = checksum("key", ["The quick brown fox ", "jumps over the lazy dog"]);
/// assert_eq!(joined, split);
/// ```
#[must_use]
pub fn checksum<I, S>(secret_key: &str, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret_key.as_bytes());
    let mut context = hmac::Context::with_key(&key);
    for arg in args {
        context.update(arg.as_ref().as_bytes());
    }
    hex::encode(context.sign().as_ref())
}
