// handlers/public/health.rs - GET /api/healthz liveness probe

use crate::api::MessageResponse;
use crate::middleware::{ApiResponse, IntoApiResponse};

/// Always alive; never touches the service layer or storage.
pub async fn healthz() -> ApiResponse<MessageResponse> {
    MessageResponse::new("I am alive").into_api_response()
}
