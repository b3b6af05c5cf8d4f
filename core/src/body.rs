use std::fmt::{Debug, Formatter};

use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt, TryStreamExt};

use crate::Result;

/// Body is the payload of a request handed to [`crate::HttpSend`].
///
/// - `Empty` sends a request without payload.
/// - `Bytes` writes a fixed buffer and finishes the request.
/// - `Stream` pipes every chunk of a byte source through the transport
///   until the source is exhausted.
#[derive(Default)]
pub enum Body {
    /// No payload.
    #[default]
    Empty,
    /// A fixed byte buffer.
    Bytes(Bytes),
    /// A continuous byte source.
    Stream(BoxStream<'static, Result<Bytes>>),
}

impl Body {
    /// Create a body from a stream of byte chunks.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Body::Stream(stream.boxed())
    }

    /// Collect the whole body into memory.
    ///
    /// Stream errors are returned as-is.
    pub async fn collect(self) -> Result<Bytes> {
        match self {
            Body::Empty => Ok(Bytes::new()),
            Body::Bytes(bs) => Ok(bs),
            Body::Stream(s) => {
                let buf = s
                    .try_fold(BytesMut::new(), |mut buf, chunk| async move {
                        buf.extend_from_slice(&chunk);
                        Ok::<_, crate::Error>(buf)
                    })
                    .await?;
                Ok(buf.freeze())
            }
        }
    }
}

impl Debug for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Bytes(bs) => f.debug_tuple("Bytes").field(&bs.len()).finish(),
            Body::Stream(_) => f.write_str("Stream"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(value: Bytes) -> Self {
        Body::Bytes(value)
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        Body::Bytes(value.into())
    }
}

impl From<&'static [u8]> for Body {
    fn from(value: &'static [u8]) -> Self {
        Body::Bytes(Bytes::from_static(value))
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Body::Bytes(value.into())
    }
}

impl From<&'static str> for Body {
    fn from(value: &'static str) -> Self {
        Body::Bytes(Bytes::from_static(value.as_bytes()))
    }
}
