use super::constants::*;
use once_cell::sync::Lazy;
use ossclient_core::utils::Redact;
use ossclient_core::{Context, Error, Result};
use regex::Regex;
use std::fmt::{Debug, Formatter};

static ENDPOINT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,6}$")
        .expect("endpoint pattern must be valid")
});

static CDN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?:(//)?([a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,6}$")
        .expect("cdn pattern must be valid")
});

/// Config carries all the configuration for an oss client.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OSS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `access_key_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OSS_ACCESS_KEY_SECRET`]
    pub access_key_secret: Option<String>,
    /// `bucket` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OSS_BUCKET`]
    pub bucket: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OSS_ENDPOINT`]
    /// - default to [`DEFAULT_ENDPOINT`]
    ///
    /// Must be a bare domain name like `oss-cn-beijing.aliyuncs.com`.
    pub endpoint: Option<String>,
    /// `prefix` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OSS_PREFIX`]
    ///
    /// Prepended to every object key.
    pub prefix: Option<String>,
    /// `cdn` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OSS_CDN`]
    /// - default to `{scheme}://{bucket}.{endpoint}`
    ///
    /// Base url of signed urls, like `https://cdn.example.com` without the
    /// trailing `/`.
    pub cdn: Option<String>,
    /// Talk to the service over https instead of http.
    pub enable_https: bool,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("access_key_secret", &Redact::from(&self.access_key_secret))
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("prefix", &self.prefix)
            .field("cdn", &self.cdn)
            .field("enable_https", &self.enable_https)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(OSS_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OSS_ACCESS_KEY_SECRET) {
            self.access_key_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OSS_BUCKET) {
            self.bucket.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OSS_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OSS_PREFIX) {
            self.prefix.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OSS_CDN) {
            self.cdn.get_or_insert(v);
        }

        self
    }

    /// Check the config and fill in the defaults.
    ///
    /// Empty `endpoint`, `prefix` and `cdn` are treated as unset.
    pub(crate) fn build(self) -> Result<ValidConfig> {
        let access_key_id = required(self.access_key_id, "access_key_id")?;
        let access_key_secret = required(self.access_key_secret, "access_key_secret")?;
        let bucket = required(self.bucket, "bucket")?;

        let endpoint = match self.endpoint.filter(|v| !v.is_empty()) {
            Some(v) if !ENDPOINT_PATTERN.is_match(&v) => {
                return Err(Error::config_invalid(format!(
                    "endpoint must be a domain name, got: {v}"
                )));
            }
            Some(v) => v,
            None => DEFAULT_ENDPOINT.to_string(),
        };

        let scheme = if self.enable_https { "https" } else { "http" };
        let cdn = match self.cdn.filter(|v| !v.is_empty()) {
            Some(v) if !CDN_PATTERN.is_match(&v) => {
                return Err(Error::config_invalid(format!(
                    "cdn must be an url without trailing `/`, got: {v}"
                )));
            }
            Some(v) => v,
            None => format!("{scheme}://{bucket}.{endpoint}"),
        };

        Ok(ValidConfig {
            access_key_id,
            access_key_secret,
            bucket,
            endpoint,
            prefix: self.prefix.filter(|v| !v.is_empty()),
            cdn,
            scheme,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::config_invalid(format!("{name} is required"))),
    }
}

/// Config that passed validation, with every default resolved.
#[derive(Clone)]
pub(crate) struct ValidConfig {
    pub access_key_id: String,
    pub access_key_secret: String,
    pub bucket: String,
    pub endpoint: String,
    pub prefix: Option<String>,
    pub cdn: String,
    pub scheme: &'static str,
}
