use log::debug;
use ossclient_core::{Body, Context, Result};

use crate::reply::Reply;

/// Send a signed request through the http transport of `ctx` and wrap the
/// response into a [`Reply`].
///
/// Every status is returned as a reply. Only a failure of the transport
/// itself is an error, with the transport error kept as source.
///
/// If `raw` is set the body is left undecoded and `Reply::body` is empty.
pub async fn execute(ctx: &Context, req: http::Request<Body>, raw: bool) -> Result<Reply> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    debug!("sending oss request: {method} {uri}");

    let resp = ctx.http_send(req).await?;
    debug!(
        "got oss response: {method} {uri} {}, {} bytes",
        resp.status(),
        resp.body().len()
    );

    Ok(Reply::new(resp, raw))
}
