//! Aliyun OSS object client.
//!
//! This crate stores, fetches, inspects and deletes objects of one Alibaba
//! Cloud Object Storage Service (OSS) bucket, and builds signed urls that
//! grant temporary access to them.
//!
//! ## Overview
//!
//! Every request is signed with the OSS header signature, based on
//! HMAC-SHA1 over the verb, Content-MD5, Content-Type, date and the
//! `/{bucket}/{key}` resource. Signed urls use the query form of the same
//! signature with an absolute expiry instead of the date.
//!
//! Requests are sent through the [`HttpSend`](ossclient_core::HttpSend) of
//! a [`Context`](ossclient_core::Context), so the transport is pluggable.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ossclient_aliyun_oss::{Client, Config};
//! use ossclient_core::{Context, OsEnv, Result};
//! use ossclient_file_read_tokio::TokioFileRead;
//! use ossclient_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_http_fetch(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     let mut config = Config::default().from_env(&ctx);
//!     config.bucket = Some("my-bucket".to_string());
//!     config.enable_https = true;
//!
//!     let client = Client::new(ctx, config)?;
//!
//!     let reply = client.put_object("hello.txt", "Hello, OSS!").await?;
//!     assert!(reply.is_success());
//!
//!     let reply = client.get_object("hello.txt").await?;
//!     assert_eq!(reply.buffer.as_ref(), b"Hello, OSS!");
//!
//!     let url = client.sign_url_default("hello.txt")?;
//!     println!("share: {url}");
//!
//!     client.delete_object("hello.txt").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! export OSS_ACCESS_KEY_ID=your-access-key-id
//! export OSS_ACCESS_KEY_SECRET=your-access-key-secret
//! export OSS_BUCKET=your-bucket
//! export OSS_ENDPOINT=oss-cn-beijing.aliyuncs.com  # Optional
//! export OSS_PREFIX=photos/                        # Optional
//! export OSS_CDN=https://cdn.example.com           # Optional
//! ```
//!
//! ## Replies
//!
//! Operations return a [`Reply`] for every status the service answers
//! with. A `404` on a missing object is a reply, only configuration,
//! request and transport failures are errors.

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod key;
pub use key::{encode_key, normalize};

mod content_type;
pub use content_type::resolve as resolve_content_type;

mod sign_request;
pub use sign_request::RequestSigner;

mod reply;
pub use reply::Reply;

mod execute;
pub use execute::execute;

mod client;
pub use client::{Client, PutOptions};
