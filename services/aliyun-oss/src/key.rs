use percent_encoding::utf8_percent_encode;

use crate::constants::OSS_URI_ENCODE_SET;

/// Build the object key from an optional prefix and the key given by caller.
///
/// The leading run of `/` is removed from the key and from the joined
/// result, every other character is kept as-is. The result is used raw in
/// the string to sign, see [`encode_key`] for the form placed on the wire.
pub fn normalize(prefix: Option<&str>, key: &str) -> String {
    let key = key.trim_start_matches('/');
    let mut s = String::with_capacity(prefix.map_or(0, str::len) + key.len());
    if let Some(prefix) = prefix {
        s.push_str(prefix.trim_start_matches('/'));
    }
    s.push_str(key);
    s
}

/// Percent encode an object key for a request path or url.
///
/// `/` is kept so that the key still reads as a path.
pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, &OSS_URI_ENCODE_SET).to_string()
}
