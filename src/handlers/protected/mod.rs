// handlers/protected/mod.rs - Protected handlers (authentication required)
//
// Every route in this tier is wrapped with `middleware::protect` using the
// deployment's configured strategy (Basic credentials or JWT bearer token).

pub mod comments;

pub use comments::create as comment_create;
pub use comments::remove as comment_delete;
pub use comments::update as comment_update;
