use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use http::{HeaderValue, Method};
use log::debug;
use ossclient_core::time::{expires_at, format_http_date, now};
use ossclient_core::{Body, Context, Error, Result};

use crate::config::Config;
use crate::constants::{CONTENT_MD5, DEFAULT_SIGN_URL_TTL, OBJECT_META};
use crate::content_type;
use crate::credential::Credential;
use crate::execute::execute;
use crate::key::{encode_key, normalize};
use crate::reply::Reply;
use crate::sign_request::RequestSigner;

/// Options of a single put.
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// Content type used when neither `file_name` nor the key has a known
    /// extension.
    pub content_type: Option<String>,
    /// File name whose extension decides the content type first.
    pub file_name: Option<String>,
    /// Base64 encoded MD5 of the body, see [`ossclient_core::hash::base64_md5`].
    pub content_md5: Option<String>,
}

/// Client for the objects of one bucket.
///
/// Every operation signs a fresh request and sends it through the http
/// transport of the [`Context`]. Cloned clients share the transport and
/// the key prefix.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    signer: RequestSigner,
    bucket: String,
    endpoint: String,
    scheme: &'static str,
    cdn: String,
    prefix: Arc<RwLock<Option<String>>>,
}

impl Client {
    /// Create a client from config.
    ///
    /// Returns a [`ossclient_core::ErrorKind::ConfigInvalid`] error if a
    /// required field is missing or malformed.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let cfg = config.build()?;
        let signer = RequestSigner::new(
            &cfg.bucket,
            Credential::new(&cfg.access_key_id, &cfg.access_key_secret),
        );

        Ok(Self {
            ctx,
            signer,
            bucket: cfg.bucket,
            endpoint: cfg.endpoint,
            scheme: cfg.scheme,
            cdn: cfg.cdn,
            prefix: Arc::new(RwLock::new(cfg.prefix)),
        })
    }

    /// Replace the prefix prepended to every key.
    ///
    /// Takes effect for every clone of this client.
    pub fn set_prefix(&self, prefix: Option<String>) {
        let mut guard = match self.prefix.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = prefix.filter(|v| !v.is_empty());
    }

    /// The prefix prepended to every key.
    pub fn prefix(&self) -> Option<String> {
        match self.prefix.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The object key used on the service for `key`.
    pub fn object_key(&self, key: &str) -> String {
        normalize(self.prefix().as_deref(), key)
    }

    /// Store `body` as `key`.
    pub async fn put_object(&self, key: &str, body: impl Into<Body>) -> Result<Reply> {
        self.put_object_with(key, body, PutOptions::default()).await
    }

    /// Store `body` as `key` with extra options.
    pub async fn put_object_with(
        &self,
        key: &str,
        body: impl Into<Body>,
        opts: PutOptions,
    ) -> Result<Reply> {
        self.request_object(Method::PUT, key, None, body.into(), &opts, false)
            .await
    }

    /// Store the local file at `path` as `key`.
    ///
    /// The content type is resolved from the file name of `path` first.
    pub async fn put_file(&self, key: &str, path: &str) -> Result<Reply> {
        let content = self.ctx.file_read(path).await?;
        let file_name = Path::new(path)
            .file_name()
            .and_then(|v| v.to_str())
            .map(str::to_string);

        self.put_object_with(
            key,
            content,
            PutOptions {
                file_name,
                ..Default::default()
            },
        )
        .await
    }

    /// Fetch the object content.
    ///
    /// The content is only kept in `Reply::buffer`.
    pub async fn get_object(&self, key: &str) -> Result<Reply> {
        self.request_object(Method::GET, key, None, Body::Empty, &PutOptions::default(), true)
            .await
    }

    /// Fetch the headers of an object.
    pub async fn head_object(&self, key: &str) -> Result<Reply> {
        self.request_object(Method::HEAD, key, None, Body::Empty, &PutOptions::default(), false)
            .await
    }

    /// Delete an object.
    ///
    /// Deleting a missing object still succeeds with `204`.
    pub async fn delete_object(&self, key: &str) -> Result<Reply> {
        self.request_object(Method::DELETE, key, None, Body::Empty, &PutOptions::default(), false)
            .await
    }

    /// Fetch the basic metadata of an object: etag, size and last modified.
    pub async fn object_meta(&self, key: &str) -> Result<Reply> {
        self.request_object(
            Method::GET,
            key,
            Some(OBJECT_META),
            Body::Empty,
            &PutOptions::default(),
            false,
        )
        .await
    }

    /// Build a url that allows a plain `GET` of `key` until `ttl` passed.
    pub fn sign_url(&self, key: &str, ttl: Duration) -> Result<String> {
        let key = self.object_key(key);
        let expires = expires_at(now(), ttl)?;
        let signature = self.signer.sign_url(&key, expires);

        Ok(format!(
            "{}/{}?OSSAccessKeyId={}&Signature={}&Expires={}",
            self.cdn,
            encode_key(&key),
            self.signer.access_key_id(),
            signature,
            expires
        ))
    }

    /// Build a signed url of `key` valid for 60 seconds.
    pub fn sign_url_default(&self, key: &str) -> Result<String> {
        self.sign_url(key, DEFAULT_SIGN_URL_TTL)
    }

    /// Download `source_url` and store it as `key`.
    ///
    /// The download goes through the fetch transport of the [`Context`].
    /// Returns a signed url of the stored object. A non-2xx status of
    /// either the download or the upload is returned as error.
    pub async fn put_object_with_url(&self, key: &str, source_url: &str) -> Result<String> {
        let uri: http::Uri = source_url.parse()?;
        let file_name = Path::new(uri.path())
            .file_name()
            .and_then(|v| v.to_str())
            .map(str::to_string);

        let req = http::Request::get(uri).body(Body::Empty)?;
        let resp = self.ctx.http_fetch(req).await?;
        if !resp.status().is_success() {
            return Err(Error::unexpected(format!(
                "failed to fetch {source_url}: {}",
                resp.status()
            )));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let reply = self
            .put_object_with(
                key,
                resp.into_body(),
                PutOptions {
                    content_type,
                    file_name,
                    ..Default::default()
                },
            )
            .await?;
        if !reply.is_success() {
            return Err(Error::unexpected(format!(
                "failed to store {key}: {} {}",
                reply.code, reply.body
            )));
        }

        self.sign_url_default(key)
    }

    async fn request_object(
        &self,
        method: Method,
        key: &str,
        sub_resource: Option<&str>,
        body: Body,
        opts: &PutOptions,
        raw: bool,
    ) -> Result<Reply> {
        let key = self.object_key(key);
        let content_type = content_type::resolve(
            &method,
            opts.content_type.as_deref(),
            opts.file_name.as_deref(),
            &key,
        );
        let content_md5 = opts.content_md5.as_deref().unwrap_or_default();
        let date = format_http_date(now());

        let (resource, uri) = match sub_resource {
            Some(sub) => (
                format!("{key}?{sub}"),
                format!("{}?{sub}", self.object_url(&key)),
            ),
            None => (key.clone(), self.object_url(&key)),
        };
        let authorization = self
            .signer
            .sign(&method, content_md5, &content_type, &date, &resource);

        let mut req = http::Request::new(body);
        *req.method_mut() = method;
        *req.uri_mut() = uri.parse()?;

        let headers = req.headers_mut();
        headers.insert(DATE, HeaderValue::from_str(&date)?);
        let mut authorization = HeaderValue::from_str(&authorization)?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        if !content_type.is_empty() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_str(&content_type)?);
        }
        if !content_md5.is_empty() {
            headers.insert(CONTENT_MD5, HeaderValue::from_str(content_md5)?);
        }

        debug!("signed oss request for object {key} in bucket {}", self.bucket);
        execute(&self.ctx, req, raw).await
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}://{}.{}/{}",
            self.scheme,
            self.bucket,
            self.endpoint,
            encode_key(key)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use ossclient_core::hash::base64_md5;
    use ossclient_core::time::parse_http_date;
    use ossclient_core::{ErrorKind, FileRead, HttpSend};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Recorded {
        method: Method,
        uri: String,
        headers: http::HeaderMap,
        body: Bytes,
    }

    #[derive(Debug, Clone)]
    struct RecordingHttpSend {
        status: http::StatusCode,
        requests: Arc<Mutex<Vec<Recorded>>>,
    }

    impl RecordingHttpSend {
        fn new(status: http::StatusCode) -> Self {
            Self {
                status,
                requests: Arc::default(),
            }
        }

        fn take(&self) -> Vec<Recorded> {
            std::mem::take(&mut *self.requests.lock().unwrap())
        }
    }

    #[async_trait]
    impl HttpSend for RecordingHttpSend {
        async fn http_send(&self, req: http::Request<Body>) -> Result<http::Response<Bytes>> {
            let (parts, body) = req.into_parts();
            let body = body.collect().await?;
            self.requests.lock().unwrap().push(Recorded {
                method: parts.method,
                uri: parts.uri.to_string(),
                headers: parts.headers,
                body,
            });

            Ok(http::Response::builder()
                .status(self.status)
                .header("ETag", "\"etag\"")
                .body(Bytes::from_static(b"ok"))?)
        }
    }

    #[derive(Debug)]
    struct StaticFileRead;

    #[async_trait]
    impl FileRead for StaticFileRead {
        async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
            Ok(format!("content of {path}").into_bytes())
        }
    }

    #[derive(Debug)]
    struct SourceHttpSend(http::StatusCode);

    #[async_trait]
    impl HttpSend for SourceHttpSend {
        async fn http_send(&self, req: http::Request<Body>) -> Result<http::Response<Bytes>> {
            assert_eq!(req.method(), Method::GET);
            Ok(http::Response::builder()
                .status(self.0)
                .header("Content-Type", "application/octet-stream")
                .body(Bytes::from_static(b"remote"))?)
        }
    }

    fn config() -> Config {
        Config {
            access_key_id: Some("AK".to_string()),
            access_key_secret: Some("SK".to_string()),
            bucket: Some("b".to_string()),
            ..Default::default()
        }
    }

    fn client(http: RecordingHttpSend) -> Client {
        let ctx = Context::new()
            .with_http_send(http)
            .with_file_read(StaticFileRead);
        Client::new(ctx, config()).unwrap()
    }

    fn signer() -> RequestSigner {
        RequestSigner::new("b", Credential::new("AK", "SK"))
    }

    fn header<'a>(r: &'a Recorded, name: &str) -> Option<&'a str> {
        r.headers.get(name).map(|v| v.to_str().unwrap())
    }

    fn assert_signed(r: &Recorded, content_md5: &str, content_type: &str, resource: &str) {
        let date = header(r, "date").expect("date must be set");
        assert!(parse_http_date(date).is_ok(), "{date}");
        assert_eq!(
            header(r, "authorization"),
            Some(
                signer()
                    .sign(&r.method, content_md5, content_type, date, resource)
                    .as_str()
            )
        );
        assert!(r.headers.get("authorization").unwrap().is_sensitive());
    }

    #[test]
    fn test_new_with_invalid_config() {
        let err = Client::new(Context::new(), Config::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[tokio::test]
    async fn test_put_object() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let client = client(http.clone());

        let reply = client.put_object("/a/hello.txt", "hello world").await?;
        assert_eq!(reply.code, 200);
        assert_eq!(reply.body, "ok");
        assert_eq!(reply.etag(), Some("\"etag\""));

        let reqs = http.take();
        assert_eq!(reqs.len(), 1);
        let r = &reqs[0];
        assert_eq!(r.method, Method::PUT);
        assert_eq!(r.uri, "http://b.oss-cn-hangzhou.aliyuncs.com/a/hello.txt");
        assert_eq!(header(r, "content-type"), Some("text/plain"));
        assert_eq!(header(r, "content-md5"), None);
        assert_eq!(r.body, Bytes::from_static(b"hello world"));
        assert_signed(r, "", "text/plain", "a/hello.txt");
        Ok(())
    }

    #[tokio::test]
    async fn test_put_object_with_options() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let client = client(http.clone());
        let md5 = base64_md5(b"hello world");

        client
            .put_object_with(
                "object",
                Bytes::from_static(b"hello world"),
                PutOptions {
                    content_type: Some("application/x-custom".to_string()),
                    content_md5: Some(md5.clone()),
                    ..Default::default()
                },
            )
            .await?;

        let reqs = http.take();
        let r = &reqs[0];
        assert_eq!(header(r, "content-type"), Some("application/x-custom"));
        assert_eq!(header(r, "content-md5"), Some(md5.as_str()));
        assert_signed(r, &md5, "application/x-custom", "object");
        Ok(())
    }

    #[tokio::test]
    async fn test_put_object_without_content_type() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let client = client(http.clone());

        client.put_object("OSSClient", Body::Empty).await?;

        let reqs = http.take();
        let r = &reqs[0];
        assert_eq!(header(r, "content-type"), None);
        assert_signed(r, "", "", "OSSClient");
        Ok(())
    }

    #[tokio::test]
    async fn test_put_object_with_stream() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let client = client(http.clone());

        let chunks = futures::stream::iter(vec![
            Ok(Bytes::from_static(b"hello ")),
            Ok(Bytes::from_static(b"world")),
        ]);
        client
            .put_object("stream.bin", Body::from_stream(chunks))
            .await?;

        let reqs = http.take();
        assert_eq!(reqs[0].body, Bytes::from_static(b"hello world"));
        assert_eq!(header(&reqs[0], "content-type"), Some("application/octet-stream"));
        Ok(())
    }

    #[tokio::test]
    async fn test_put_file() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let client = client(http.clone());

        client.put_file("upload", "/tmp/photo.png").await?;

        let reqs = http.take();
        let r = &reqs[0];
        assert_eq!(r.body, Bytes::from_static(b"content of /tmp/photo.png"));
        assert_eq!(header(r, "content-type"), Some("image/png"));
        assert_signed(r, "", "image/png", "upload");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_object_is_raw() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let client = client(http.clone());

        let reply = client.get_object("a.png").await?;
        assert_eq!(reply.body, "");
        assert_eq!(reply.buffer, Bytes::from_static(b"ok"));

        let reqs = http.take();
        let r = &reqs[0];
        assert_eq!(r.method, Method::GET);
        assert_eq!(header(r, "content-type"), None);
        assert_signed(r, "", "", "a.png");
        Ok(())
    }

    #[tokio::test]
    async fn test_head_and_delete() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::NO_CONTENT);
        let client = client(http.clone());

        let reply = client.delete_object("a.txt").await?;
        assert_eq!(reply.code, 204);
        client.head_object("a.txt").await?;

        let reqs = http.take();
        assert_eq!(reqs[0].method, Method::DELETE);
        assert_eq!(reqs[0].uri, "http://b.oss-cn-hangzhou.aliyuncs.com/a.txt");
        assert_signed(&reqs[0], "", "", "a.txt");
        assert_eq!(reqs[1].method, Method::HEAD);
        assert_eq!(reqs[1].uri, "http://b.oss-cn-hangzhou.aliyuncs.com/a.txt");
        assert_signed(&reqs[1], "", "", "a.txt");
        Ok(())
    }

    #[tokio::test]
    async fn test_object_meta() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let client = client(http.clone());

        client.object_meta("file.txt").await?;

        let reqs = http.take();
        let r = &reqs[0];
        assert_eq!(r.method, Method::GET);
        assert_eq!(
            r.uri,
            "http://b.oss-cn-hangzhou.aliyuncs.com/file.txt?objectMeta"
        );
        assert_signed(r, "", "", "file.txt?objectMeta");
        Ok(())
    }

    #[tokio::test]
    async fn test_non_ascii_key() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let client = client(http.clone());

        client.put_object("你好 world.txt", "hi").await?;

        let reqs = http.take();
        let r = &reqs[0];
        assert_eq!(
            r.uri,
            "http://b.oss-cn-hangzhou.aliyuncs.com/%E4%BD%A0%E5%A5%BD%20world.txt"
        );
        assert_signed(r, "", "text/plain", "你好 world.txt");
        Ok(())
    }

    #[tokio::test]
    async fn test_error_status_is_reply() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::NOT_FOUND);
        let client = client(http);

        let reply = client.head_object("missing").await?;
        assert_eq!(reply.code, 404);
        assert!(!reply.is_success());
        Ok(())
    }

    #[tokio::test]
    async fn test_prefix() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let client = Client::new(
            Context::new().with_http_send(http.clone()),
            Config {
                prefix: Some("/photos/".to_string()),
                ..config()
            },
        )?;
        assert_eq!(client.prefix().as_deref(), Some("/photos/"));
        assert_eq!(client.object_key("/a.png"), "photos/a.png");

        let cloned = client.clone();
        cloned.set_prefix(Some("img/".to_string()));
        assert_eq!(client.object_key("a.png"), "img/a.png");

        client.head_object("a.png").await?;
        let reqs = http.take();
        assert_eq!(reqs[0].uri, "http://b.oss-cn-hangzhou.aliyuncs.com/img/a.png");
        assert_signed(&reqs[0], "", "", "img/a.png");

        client.set_prefix(None);
        assert_eq!(client.prefix(), None);
        assert_eq!(client.object_key("//a.png"), "a.png");
        Ok(())
    }

    #[test]
    fn test_sign_url() -> Result<()> {
        let client = client(RecordingHttpSend::new(http::StatusCode::OK));

        let before = now().timestamp();
        let url = client.sign_url("/file.txt", Duration::from_secs(60))?;
        let after = now().timestamp();

        let (base, query) = url.split_once('?').unwrap();
        assert_eq!(base, "http://b.oss-cn-hangzhou.aliyuncs.com/file.txt");

        let params: Vec<(&str, &str)> = query
            .split('&')
            .map(|v| v.split_once('=').unwrap())
            .collect();
        assert_eq!(params[0], ("OSSAccessKeyId", "AK"));
        assert_eq!(params[1].0, "Signature");
        assert_eq!(params[2].0, "Expires");

        let expires: i64 = params[2].1.parse().unwrap();
        assert!(expires >= before + 60 && expires <= after + 60);
        assert_eq!(params[1].1, signer().sign_url("file.txt", expires));
        Ok(())
    }

    #[test]
    fn test_sign_url_with_cdn() -> Result<()> {
        let client = Client::new(
            Context::new(),
            Config {
                cdn: Some("https://cdn.example.com".to_string()),
                prefix: Some("p/".to_string()),
                ..config()
            },
        )?;

        let url = client.sign_url_default("a b.png")?;
        assert!(
            url.starts_with("https://cdn.example.com/p/a%20b.png?OSSAccessKeyId=AK&Signature="),
            "{url}"
        );
        Ok(())
    }

    #[test]
    fn test_sign_url_out_of_range() {
        let client = client(RecordingHttpSend::new(http::StatusCode::OK));
        let err = client
            .sign_url("file.txt", Duration::from_secs(u64::MAX))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_put_object_with_url() -> Result<()> {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let ctx = Context::new()
            .with_http_send(http.clone())
            .with_http_fetch(SourceHttpSend(http::StatusCode::OK));
        let client = Client::new(ctx, config())?;

        let url = client
            .put_object_with_url("copy.jpg", "https://source.example.com/img/photo.jpg")
            .await?;
        assert!(url.starts_with("http://b.oss-cn-hangzhou.aliyuncs.com/copy.jpg?OSSAccessKeyId=AK"));

        let reqs = http.take();
        assert_eq!(reqs.len(), 1);
        let r = &reqs[0];
        assert_eq!(r.method, Method::PUT);
        assert_eq!(r.body, Bytes::from_static(b"remote"));
        assert_eq!(header(r, "content-type"), Some("image/jpeg"));
        Ok(())
    }

    #[tokio::test]
    async fn test_put_object_with_url_failed_fetch() {
        let http = RecordingHttpSend::new(http::StatusCode::OK);
        let ctx = Context::new()
            .with_http_send(http.clone())
            .with_http_fetch(SourceHttpSend(http::StatusCode::NOT_FOUND));
        let client = Client::new(ctx, config()).unwrap();

        let err = client
            .put_object_with_url("copy", "https://source.example.com/missing")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(http.take().is_empty());
    }

    #[tokio::test]
    async fn test_put_object_with_invalid_url() {
        let client = client(RecordingHttpSend::new(http::StatusCode::OK));
        let err = client
            .put_object_with_url("copy", "not a url")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
