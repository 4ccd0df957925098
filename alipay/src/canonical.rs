//! Canonical form of a parameter set.
//!
//! The gateway signs and verifies a `key=value&key=value` string built from
//! the parameter set after cleaning:
//!
//! 1. Keys and values are trimmed of surrounding whitespace.
//! 2. Entries with an empty key, an empty value, or the key `sign` are dropped.
//! 3. Entries are sorted by key in ascending byte order.
//! 4. Pairs are joined with `&`, without any escaping.
//!
//! The same function is used on both the outbound and inbound paths, so a
//! parameter set always canonicalizes to the same bytes regardless of the
//! order its entries were inserted in.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// The field carrying the signature.
pub const SIGN_FIELD: &str = "sign";

/// The field carrying the signature algorithm tag.
pub const SIGN_TYPE_FIELD: &str = "sign_type";

/// A parameter set, ordered by key.
///
/// `String`'s ordering is byte-wise, which is the order the gateway expects.
pub type Params = BTreeMap<String, String>;

/// Applies the cleaning rules to a parameter set.
///
/// When two keys are equal after trimming, the later one wins.
#[must_use]
pub fn clean_params<I, K, V>(params: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    params
        .into_iter()
        .filter_map(|(key, value)| {
            let key = key.as_ref().trim();
            let value = value.as_ref().trim();
            if key.is_empty() || value.is_empty() || key == SIGN_FIELD {
                None
            } else {
                Some((key.to_owned(), value.to_owned()))
            }
        })
        .collect()
}

/// Builds the canonical string to sign or verify.
///
/// # Example
///
/// ```rust
/// use alipay::canonical::canonicalize;
///
/// let canonical = canonicalize([("b", "2"), ("a", "1"), ("sign", "x"), ("c", " ")]);
/// assert_eq!(canonical, "a=1&b=2");
/// ```
#[must_use]
pub fn canonicalize<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let cleaned = clean_params(params);
    let mut buf = String::new();
    for (i, (key, value)) in cleaned.iter().enumerate() {
        if i > 0 {
            buf.push('&');
        }
        buf.push_str(key);
        buf.push('=');
        buf.push_str(value);
    }
    buf
}

/// Encodes a parameter set as `application/x-www-form-urlencoded`, in key order.
#[must_use]
pub fn encode_params(params: &Params) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Decodes an `application/x-www-form-urlencoded` body.
///
/// When a key is repeated, its first value is kept.
#[must_use]
pub fn parse_form(body: &[u8]) -> Params {
    let mut params = Params::new();
    for (key, value) in form_urlencoded::parse(body) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}
