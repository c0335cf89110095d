use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::{from_fn_with_state, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::auth::SharedAuthenticator;
use crate::error::ApiError;

/// Authentication gate. Runs the configured strategy against the request
/// headers and short-circuits with 401 before the wrapped handler runs.
/// On success the [`crate::auth::Principal`] is placed in request extensions.
pub async fn require_auth(
    State(authenticator): State<SharedAuthenticator>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    tracing::debug!("{} authentication hit", authenticator.name());

    let principal = authenticator.authenticate(&headers).map_err(|e| {
        tracing::warn!(
            strategy = authenticator.name(),
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request: {}",
            e
        );
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Wrap a method router so every handler on it requires authentication.
pub fn protect<S>(route: MethodRouter<S>, authenticator: SharedAuthenticator) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(authenticator, require_auth))
}
