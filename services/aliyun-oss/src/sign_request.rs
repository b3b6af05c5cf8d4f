use crate::constants::OSS_QUERY_ENCODE_SET;
use crate::credential::Credential;
use http::Method;
use ossclient_core::hash::base64_hmac_sha1;
use percent_encoding::utf8_percent_encode;

/// RequestSigner for Aliyun OSS signature.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    bucket: String,
    credential: Credential,
}

impl RequestSigner {
    /// Create a new signer for the bucket.
    pub fn new(bucket: &str, credential: Credential) -> Self {
        Self {
            bucket: bucket.to_string(),
            credential,
        }
    }

    /// Build the value of the `Authorization` header: `OSS {access_key_id}:{signature}`.
    ///
    /// `key` is the raw object key, with the sub-resource appended if any
    /// (`photo.png?objectMeta`).
    pub fn sign(
        &self,
        method: &Method,
        content_md5: &str,
        content_type: &str,
        date: &str,
        key: &str,
    ) -> String {
        let req = SignableRequest {
            method: method.as_str(),
            content_md5,
            content_type,
            date,
            resource: &self.resource(key),
        };
        let signature = self.signature(&req.string_to_sign());

        format!("OSS {}:{}", self.credential.access_key_id, signature)
    }

    /// Build the percent encoded query signature of a `GET` on `key` that
    /// expires at `expires` (unix epoch seconds).
    pub fn sign_url(&self, key: &str, expires: i64) -> String {
        let expires = expires.to_string();
        let req = SignableRequest {
            method: Method::GET.as_str(),
            content_md5: "",
            content_type: "",
            date: &expires,
            resource: &self.resource(key),
        };
        let signature = self.signature(&req.string_to_sign());

        utf8_percent_encode(&signature, OSS_QUERY_ENCODE_SET).to_string()
    }

    /// Access key id used in signatures.
    pub fn access_key_id(&self) -> &str {
        &self.credential.access_key_id
    }

    fn resource(&self, key: &str) -> String {
        format!("/{}/{}", self.bucket, key)
    }

    fn signature(&self, string_to_sign: &str) -> String {
        base64_hmac_sha1(
            self.credential.access_key_secret.as_bytes(),
            string_to_sign.as_bytes(),
        )
    }
}

/// The fields of one request that take part in the signature.
#[derive(Debug)]
struct SignableRequest<'a> {
    method: &'a str,
    content_md5: &'a str,
    content_type: &'a str,
    /// HTTP date for header signing, expiry seconds for query signing.
    date: &'a str,
    /// `/{bucket}/{key}`
    resource: &'a str,
}

impl SignableRequest<'_> {
    /// Construct string to sign
    ///
    /// ## Format
    ///
    /// ```text
    /// VERB + "\n" +
    /// Content-MD5 + "\n" +
    /// Content-Type + "\n" +
    /// Date + "\n" +
    /// CanonicalizedResource
    /// ```
    ///
    /// Empty fields keep their line.
    fn string_to_sign(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}",
            self.method, self.content_md5, self.content_type, self.date, self.resource
        )
    }
}
