//! Session endpoint payloads

use serde::Serialize;

/// Response for session lifecycle operations
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Status of the operation
    pub status: String,

    /// Session identifier
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
