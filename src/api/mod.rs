pub mod envelope;

pub use envelope::{ErrorResponse, MessageResponse};
