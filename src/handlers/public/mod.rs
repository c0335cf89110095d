// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Liveness probe and read-only comment endpoints. Nothing here mutates state,
// so none of these routes are wrapped by the auth layer.

pub mod comments;
pub mod health;

pub use comments::list as comment_list;
pub use comments::show as comment_show;
pub use health::healthz;

use axum::http::{Method, Uri};

use crate::error::ApiError;

/// Fallback for paths no route matches
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("Route not found", format!("no route for {}", uri.path()))
}

/// Fallback for a routed path hit with a method it does not serve
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(
        "Method not allowed",
        format!("{} is not supported on {}", method, uri.path()),
    )
}
