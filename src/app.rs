use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::auth::SharedAuthenticator;
use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::middleware::{protect, with_global_layers};
use crate::services::CommentService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub comments: Arc<CommentService>,
}

impl AppState {
    pub fn new(comments: CommentService) -> Self {
        Self {
            comments: Arc::new(comments),
        }
    }
}

/// Build the complete application router. The caller owns the result and
/// hands it to `axum::serve`.
pub fn app(state: AppState, authenticator: SharedAuthenticator, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .merge(health_routes())
        // Comments: reads public, mutations behind the auth layer
        .merge(comment_routes(authenticator))
        .fallback(public::not_found)
        .with_state(state);

    // Global middleware
    with_global_layers(router, config)
}

fn health_routes() -> Router<AppState> {
    Router::new().route(
        "/api/healthz",
        get(public::healthz).fallback(public::method_not_allowed),
    )
}

fn comment_routes(authenticator: SharedAuthenticator) -> Router<AppState> {
    Router::new()
        // Collection
        .route(
            "/api/comment",
            get(public::comment_list)
                .merge(protect(post(protected::comment_create), authenticator.clone()))
                .fallback(public::method_not_allowed),
        )
        // Individual
        .route(
            "/api/comment/:id",
            get(public::comment_show)
                .merge(protect(
                    put(protected::comment_update).delete(protected::comment_delete),
                    authenticator,
                ))
                .fallback(public::method_not_allowed),
        )
}
