use bytes::Bytes;
use http::header::{AsHeaderName, ETAG, LAST_MODIFIED};
use http::{HeaderMap, StatusCode};

use crate::constants::{CONTENT_MD5, X_OSS_HASH_CRC64ECMA};

/// Reply is the normalized result of every object operation.
///
/// Any status is a reply: a `404` after a delete or a `403` for a bad
/// signature are data for the caller, not errors.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Status code returned by the service.
    pub code: StatusCode,
    /// Every header returned by the service, names are case-insensitive.
    pub headers: HeaderMap,
    /// The raw response body.
    pub buffer: Bytes,
    /// `buffer` decoded as UTF-8, or empty if raw semantics were requested.
    pub body: String,
}

impl Reply {
    /// Build a reply from a buffered response.
    pub fn new(resp: http::Response<Bytes>, raw: bool) -> Self {
        let (parts, buffer) = resp.into_parts();
        let body = if raw {
            String::new()
        } else {
            String::from_utf8_lossy(&buffer).into_owned()
        };

        Self {
            code: parts.status,
            headers: parts.headers,
            buffer,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Get the first value of a header as string.
    ///
    /// Returns `None` if the header is missing or not valid visible ASCII.
    pub fn header(&self, name: impl AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get every value of a header as string.
    pub fn header_all(&self, name: impl AsHeaderName) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Entity tag of the object.
    pub fn etag(&self) -> Option<&str> {
        self.header(ETAG)
    }

    /// Last modified time of the object, as the http date sent by the service.
    pub fn last_modified(&self) -> Option<&str> {
        self.header(LAST_MODIFIED)
    }

    /// Base64 encoded MD5 of the object content.
    pub fn content_md5(&self) -> Option<&str> {
        self.header(CONTENT_MD5)
    }

    /// CRC64 (ECMA-182) of the object content.
    pub fn crc64ecma(&self) -> Option<&str> {
        self.header(X_OSS_HASH_CRC64ECMA)
    }
}
