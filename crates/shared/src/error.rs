use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Internal,
    #[serde(other)]
    Unknown,
}

/// Error body the encode service returns alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognised_code_still_parses() {
        let err: ApiError =
            serde_json::from_str(r#"{"code":"rate_limited","message":"slow down"}"#).expect("json");
        assert_eq!(err, ApiError::new(ErrorCode::Unknown, "slow down"));
    }

    #[test]
    fn known_code_round_trips_by_name() {
        let err: ApiError =
            serde_json::from_str(r#"{"code":"internal","message":"boom"}"#).expect("json");
        assert_eq!(err.code, ErrorCode::Internal);
    }
}
