//! `POST /chat` handler.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::Instrument;
use uuid::Uuid;

use super::types::{ChatRequest, ChatResponse, ErrorResponse};
use super::AppState;

/// Handle one chat message.
///
/// Every recovered loop outcome (answer, clarification, fallback) is a
/// 200 with a `response` body; only oracle-level failures become a 500
/// with an `error` body. Internal distinctions are deliberately not
/// differentiated on the wire.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    async move {
        match state.agent.handle(&request.message).await {
            Ok(response) => (StatusCode::OK, Json(ChatResponse { response })).into_response(),
            Err(e) => {
                tracing::error!("Oracle call failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "language model backend unavailable".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
    .instrument(span)
    .await
}
