pub mod auth;
pub mod response;

pub use auth::{protect, require_auth};
pub use response::{panic_response, ApiResponse, ApiResult, IntoApiResponse, JSON_CONTENT_TYPE};

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, Request},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::config::{AppConfig, SecurityConfig};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Apply the middleware every route shares, outermost first:
/// request id → access log → request id echo → content-type → panic recovery.
pub fn with_global_layers(router: Router, config: &AppConfig) -> Router {
    let level = if config.api.enable_request_logging {
        Level::INFO
    } else {
        Level::DEBUG
    };

    let mut router = router.layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));
    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(request_span)
                    .on_request(DefaultOnRequest::new().level(level))
                    .on_response(DefaultOnResponse::new().level(level)),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_TYPE,
                HeaderValue::from_static(JSON_CONTENT_TYPE),
            ))
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
    )
}
