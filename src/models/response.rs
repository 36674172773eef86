use serde::Serialize;

use super::message::Message;

// ============================================================================
// Base Response Types
// ============================================================================

/// Wrapper for successful responses with data
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

// ============================================================================
// Queue Responses
// ============================================================================

/// Response for `status`
#[derive(Debug, Serialize)]
pub struct StatusData {
    pub count: usize,
    pub messages: Vec<Message>,
}

/// Response for `clear`
#[derive(Debug, Serialize)]
pub struct ClearData {
    pub cleared: usize,
}

/// Response for `send`
#[derive(Debug, Serialize)]
pub struct SendData {
    pub queued: Message,
    pub pending: usize,
}

/// Response for `init`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitData {
    pub settings_path: String,
    pub event: String,
    pub command: String,
    pub already_configured: bool,
}

// ============================================================================
// Log Responses
// ============================================================================

/// Single log entry
#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Response for reading logs
#[derive(Debug, Serialize)]
pub struct LogsData {
    pub entries: Vec<LogEntry>,
    pub count: usize,
}

/// Response for clearing logs
#[derive(Debug, Serialize)]
pub struct ClearLogsData {
    pub cleared: usize,
}

// ============================================================================
// Tests
// ============================================================================
