//! Reqwest based [`HttpSend`] implementation for ossclient.
//!
//! `ReqwestHttpSend` owns a [`reqwest::Client`], which is the connection
//! pool shared by every request sent through it. Configure pooling,
//! timeouts and TLS on the client before handing it over.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use ossclient_core::Context;
//! use ossclient_http_send_reqwest::ReqwestHttpSend;
//!
//! # fn main() -> Result<(), reqwest::Error> {
//! let client = reqwest::Client::builder()
//!     .pool_max_idle_per_host(16)
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//!
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::new(client.clone()))
//!     .with_http_fetch(ReqwestHttpSend::new(client));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use ossclient_core::{Body, Error, HttpSend, Result};
use reqwest::{Client, Request};

/// HttpSend over a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Body>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let body = match body {
            Body::Empty => reqwest::Body::from(Bytes::new()),
            Body::Bytes(bs) => reqwest::Body::from(bs),
            Body::Stream(s) => reqwest::Body::wrap_stream(s),
        };

        let req = Request::try_from(http::Request::from_parts(parts, body)).map_err(|e| {
            Error::request_invalid("failed to convert request").with_source(e)
        })?;
        debug!("sending request: {} {}", req.method(), loggable_url(req.url()));

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

/// The url without its query, which may carry a signature.
fn loggable_url(url: &reqwest::Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
