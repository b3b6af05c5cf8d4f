//! Core components for signed object storage requests.
//!
//! This crate provides the foundational types and traits shared by the
//! ossclient crates. It carries no service knowledge: signing rules and
//! object operations live in the service crates, transports live in the
//! context crates.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for HTTP sending, outbound fetching, file reading, and environment access
//! - **Body**: The request payload handed to a transport, either empty, a fixed buffer, or a byte stream
//! - **Error**: A single error type whose [`ErrorKind`] separates configuration, request and transport failures
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use ossclient_core::{Body, Context, HttpSend, Result};
//!
//! #[derive(Debug)]
//! struct EchoHttpSend;
//!
//! #[async_trait::async_trait]
//! impl HttpSend for EchoHttpSend {
//!     async fn http_send(&self, req: http::Request<Body>) -> Result<http::Response<Bytes>> {
//!         let body = req.into_body().collect().await?;
//!         Ok(http::Response::new(body))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_http_send(EchoHttpSend);
//!
//! let req = http::Request::put("http://bucket.oss-cn-hangzhou.aliyuncs.com/hello.txt")
//!     .body(Body::from("Hello, World!"))?;
//! let resp = ctx.http_send(req).await?;
//! assert_eq!(resp.body().as_ref(), b"Hello, World!");
//! # Ok(())
//! # }
//! ```
//!
//! ## Traits
//!
//! - [`HttpSend`]: For sending HTTP requests
//! - [`FileRead`]: For asynchronous file reading
//! - [`Env`]: For environment variable access
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC-SHA1, Base64 and Content-MD5 helpers
//! - [`time`]: HTTP-date formatting and expiry computation
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod body;
pub use body::Body;
mod context;
pub use context::{Context, Env, FileRead, HttpSend, NoopEnv, NoopFileRead, NoopHttpSend};
pub use context::{OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};
