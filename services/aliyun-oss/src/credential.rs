use ossclient_core::utils::Redact;
use std::fmt::{Debug, Formatter};

/// Credential that holds the access_key_id and access_key_secret.
///
/// The secret is only ever used as the HMAC key, it is never sent.
#[derive(Default, Clone)]
pub struct Credential {
    /// Access key id for oss services.
    pub access_key_id: String,
    /// Access key secret for oss services.
    pub access_key_secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(access_key_id: &str, access_key_secret: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            access_key_secret: access_key_secret.to_string(),
        }
    }

    /// Check if both the id and the secret are set.
    pub fn is_valid(&self) -> bool {
        !self.access_key_id.is_empty() && !self.access_key_secret.is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("access_key_secret", &Redact::from(&self.access_key_secret))
            .finish()
    }
}
