use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::model::task::Task;

/// Error type for a sync code that cannot be decoded. Decoding has no side
/// effects: on any failure the caller's state is untouched.
#[derive(Debug, thiserror::Error)]
pub enum SyncCodeError {
    #[error("malformed sync code: not valid base64: {0}")]
    Transport(#[from] base64::DecodeError),
    #[error("malformed sync code: payload is not UTF-8 text")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("malformed sync code: payload is not a task list: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Serialize a task list into a single opaque token safe for clipboard or
/// QR transport: UTF-8 JSON array, then base64. Order-preserving and the
/// exact inverse of [`decode`].
pub fn encode(tasks: &[Task]) -> Result<String, SyncCodeError> {
    let json = serde_json::to_string(tasks)?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Parse a sync code back into a candidate task list. Rejects tokens that
/// are not base64, not UTF-8, not a JSON array, or whose elements are
/// missing required task fields.
pub fn decode(code: &str) -> Result<Vec<Task>, SyncCodeError> {
    let bytes = STANDARD.decode(code.trim())?;
    let json = String::from_utf8(bytes)?;
    let tasks: Vec<Task> = serde_json::from_str(&json)?;
    Ok(tasks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
