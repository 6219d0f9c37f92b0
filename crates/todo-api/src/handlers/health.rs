use axum::Json;

use super::MessageResponse;

pub async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse::new("To-Do API is running"))
}
