//! Global request middleware: trace identifier plus request logging.
//!
//! Every request receives a UUID trace identifier held in task-local storage
//! for the lifetime of the request, is logged with its method and path, and
//! gets a `trace-id` response header.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Tracing middleware applied to the whole application.
///
/// Handlers can read the trace identifier via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use di_demo::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
///
/// Applications should not use this type directly.
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        info!(
            method = %req.method(),
            path = %req.path(),
            trace_id = %trace_id,
            "request received"
        );
        let header_value = trace_id.to_string();
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(
                        %error,
                        trace_id = %trace_id,
                        "failed to encode trace identifier header"
                    );
                }
            }
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use crate::inbound::http::ApiResult;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;
    use std::collections::BTreeMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};

    #[derive(Debug, Clone)]
    struct CapturedEvent {
        level: Level,
        fields: BTreeMap<String, String>,
    }

    impl CapturedEvent {
        fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    /// Layer recording every event with its fields rendered as strings.
    #[derive(Clone, Default)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

    impl Visit for FieldVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
            let mut fields = BTreeMap::new();
            event.record(&mut FieldVisitor(&mut fields));
            self.events
                .lock()
                .expect("events lock")
                .push(CapturedEvent {
                    level: *event.metadata().level(),
                    fields,
                });
        }
    }

    async fn trace_header_and_body<F, Fut, Res>(handler: F) -> (String, actix_web::web::Bytes)
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: std::future::Future<Output = Res> + 'static,
        Res: actix_web::Responder + 'static,
    {
        let app =
            test::init_service(App::new().wrap(Trace).route("/", web::get().to(handler))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        (trace_id, test::read_body(res).await)
    }

    #[actix_web::test]
    async fn adds_trace_id_header_without_changing_body() {
        let (trace_id, body) =
            trace_header_and_body(|| async { HttpResponse::Ok().body("hello") }).await;
        assert!(trace_id.parse::<TraceId>().is_ok());
        assert_eq!(body, "hello");
    }

    #[actix_web::test]
    async fn exposes_trace_id_in_handler() {
        let (trace_id, body) = trace_header_and_body(|| async move {
            let id = TraceId::current().expect("trace id in scope");
            HttpResponse::Ok().body(id.to_string())
        })
        .await;
        assert_eq!(trace_id.as_bytes(), body.as_ref());
    }

    #[actix_web::test]
    async fn propagates_trace_id_in_error() {
        let (trace_id, body) = trace_header_and_body(|| async move {
            ApiResult::<HttpResponse>::Err(DomainError::forbidden("nope"))
        })
        .await;
        let payload: DomainError = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(payload.trace_id.as_deref(), Some(trace_id.as_str()));
    }

    #[rstest]
    #[case(test::TestRequest::post(), "/users/profile?verbose=1", "POST", "/users/profile", 200)]
    #[case(test::TestRequest::get(), "/no-such-route", "GET", "/no-such-route", 404)]
    #[actix_web::test]
    async fn logs_method_and_path_for_every_request(
        #[case] request: test::TestRequest,
        #[case] uri: &str,
        #[case] method: &str,
        #[case] path: &str,
        #[case] status: u16,
    ) {
        let layer = CaptureLayer::default();
        let events = Arc::clone(&layer.events);
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(layer));

        let app = test::init_service(App::new().wrap(Trace).route(
            "/users/profile",
            web::post().to(|| async { HttpResponse::Ok().finish() }),
        ))
        .await;
        let res = test::call_service(&app, request.uri(uri).to_request()).await;
        assert_eq!(res.status().as_u16(), status);
        let header_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace id header");

        let captured = events.lock().expect("events lock").clone();
        let received = captured
            .iter()
            .find(|event| event.field("message") == Some("request received"))
            .expect("request log event");
        assert_eq!(received.level, Level::INFO);
        assert_eq!(received.field("method"), Some(method));
        assert_eq!(received.field("path"), Some(path));
        assert_eq!(received.field("trace_id"), Some(header_id.as_str()));
    }
}
