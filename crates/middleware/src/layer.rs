use crate::document::document_text;
use crate::headers::ResourceHeaders;
use crate::Result;
use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, StreamExt};
use graphql_resource_config::ResourceHeadersConfig;
use graphql_resource_extract::extract;
use http::{HeaderMap, Request};
use http_body::{Body, Frame};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, BodyStream, Either, Full, StreamBody};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Body handed to the inner service: the original body for requests that
/// were not inspected, a replay of everything read followed by whatever was
/// left unread for those that were.
pub type RestoredBody<B> = Either<B, UnsyncBoxBody<Bytes, BoxError>>;

/// Outcome of reading a request body up to the size limit.
enum Buffered<B> {
    /// The whole body fit under the limit.
    Complete {
        data: Bytes,
        trailers: Option<HeaderMap>,
    },
    /// The limit was crossed. `rest` has not been polled past `prefix`.
    Overflow { prefix: Bytes, rest: Pin<Box<B>> },
    /// The body failed mid-stream.
    Failed { prefix: Bytes, error: BoxError },
}

async fn buffer<B>(body: B, limit: usize) -> Buffered<B>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let mut body = Box::pin(body);
    let mut data = BytesMut::new();
    let mut trailers: Option<HeaderMap> = None;

    while let Some(frame) = body.frame().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(error) => {
                return Buffered::Failed {
                    prefix: data.freeze(),
                    error: error.into(),
                };
            }
        };
        match frame.into_data() {
            Ok(chunk) => {
                data.extend_from_slice(&chunk);
                if data.len() > limit {
                    return Buffered::Overflow {
                        prefix: data.freeze(),
                        rest: body,
                    };
                }
            }
            Err(frame) => {
                if let Ok(map) = frame.into_trailers() {
                    trailers.get_or_insert_with(HeaderMap::new).extend(map);
                }
            }
        }
    }

    Buffered::Complete {
        data: data.freeze(),
        trailers,
    }
}

fn boxed<T>(body: T) -> UnsyncBoxBody<Bytes, BoxError>
where
    T: Body<Data = Bytes> + Send + 'static,
    T::Error: Into<BoxError>,
{
    body.map_err(Into::into).boxed_unsync()
}

fn data_frame(data: Bytes) -> Option<std::result::Result<Frame<Bytes>, BoxError>> {
    (!data.is_empty()).then(|| Ok(Frame::data(data)))
}

/// Calls `inner`, erasing its future to a boxed `Send` future so the
/// `Send` bound is checked here rather than inside the caller's async block.
fn call_boxed<'a, S, R>(
    inner: &mut S,
    request: R,
) -> Pin<Box<dyn Future<Output = std::result::Result<S::Response, S::Error>> + Send + 'a>>
where
    S: Service<R>,
    S::Future: Send + 'a,
{
    Box::pin(inner.call(request))
}

/// Layer that tags GraphQL requests with the resources they address.
///
/// ```
/// use graphql_resource_middleware::ResourceHeadersLayer;
/// use graphql_resource_config::ResourceHeadersConfig;
///
/// let config = ResourceHeadersConfig::default().with_query_header("X-Reads");
/// let layer = ResourceHeadersLayer::from_config(&config).unwrap();
/// # let _ = layer;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceHeadersLayer {
    headers: Arc<ResourceHeaders>,
}

impl ResourceHeadersLayer {
    #[must_use]
    pub fn new(headers: ResourceHeaders) -> Self {
        Self {
            headers: Arc::new(headers),
        }
    }

    pub fn from_config(config: &ResourceHeadersConfig) -> Result<Self> {
        ResourceHeaders::from_config(config).map(Self::new)
    }
}

impl<S> Layer<S> for ResourceHeadersLayer {
    type Service = ResourceHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ResourceHeadersService {
            inner,
            headers: Arc::clone(&self.headers),
        }
    }
}

/// See [`ResourceHeadersLayer`].
///
/// Inspected requests have their body buffered (up to the configured limit),
/// scanned, and restored before being forwarded. A body that turns out to be
/// larger than the limit is forwarded whole without being scanned. The
/// request is always forwarded, whatever the scan finds.
#[derive(Debug, Clone)]
pub struct ResourceHeadersService<S> {
    inner: S,
    headers: Arc<ResourceHeaders>,
}

impl<S, B> Service<Request<B>> for ResourceHeadersService<S>
where
    S: Service<Request<RestoredBody<B>>> + Clone + Send + 'static,
    S::Future: Send,
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = std::result::Result<S::Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        // Use the instance that was driven to readiness.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let headers = Arc::clone(&self.headers);

        Box::pin(async move {
            if !headers.should_inspect(&request) {
                return call_boxed(&mut inner, request.map(Either::Left)).await;
            }

            let (mut parts, body) = request.into_parts();
            let replay = match buffer(body, headers.max_body_bytes()).await {
                Buffered::Complete { data, trailers } => {
                    let extraction = extract(&document_text(&data));
                    tracing::debug!(
                        uri = %parts.uri,
                        queries = ?extraction.queries,
                        mutations = ?extraction.mutations,
                        "Extracted GraphQL resources"
                    );
                    headers.apply(&mut parts.headers, &extraction);

                    match trailers {
                        None => boxed(Full::new(data)),
                        Some(trailers) => {
                            let frames = data_frame(data)
                                .into_iter()
                                .chain([Ok(Frame::trailers(trailers))]);
                            boxed(StreamBody::new(stream::iter(frames)))
                        }
                    }
                }
                Buffered::Overflow { prefix, rest } => {
                    tracing::debug!(
                        uri = %parts.uri,
                        limit = headers.max_body_bytes(),
                        "Skipping request: body exceeds limit"
                    );
                    let rest = BodyStream::new(rest)
                        .map(|frame| frame.map_err(Into::<BoxError>::into));
                    boxed(StreamBody::new(stream::iter(data_frame(prefix)).chain(rest)))
                }
                Buffered::Failed { prefix, error } => {
                    tracing::warn!(%error, uri = %parts.uri, "Failed to read request body");
                    let frames = data_frame(prefix).into_iter().chain([Err(error)]);
                    boxed(StreamBody::new(stream::iter(frames)))
                }
            };

            let request = Request::from_parts(parts, Either::Right(replay));
            call_boxed(&mut inner, request).await
        })
    }
}
