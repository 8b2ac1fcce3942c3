//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's message
    #[serde(default)]
    pub message: String,
}

/// Successful chat reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// The single user-facing reply string
    pub response: String,
}

/// Error body for internal failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
