//! Error handling module for the duty admin client.
//!
//! Server-reported failures are not errors here: they come back as an `ApiResponse`
//! with `ok == false`. `ClientError` covers everything that goes wrong on this side
//! of the wire, before a response could be obtained or trusted.

use serde::Serialize;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Client-side error type.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Network failure before a response was obtained
    Transport(String),
    /// Response or payload could not be decoded
    Decode(String),
    /// Input rejected before any request was issued
    Validation(String),
    /// Invalid configuration value
    Config(String),
}

impl ClientError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Transport(msg) => msg.clone(),
            ClientError::Decode(msg) => msg.clone(),
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Config(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Transport error: {:?}", err);
        if err.is_decode() {
            ClientError::Decode(format!("Response decode error: {}", err))
        } else {
            ClientError::Transport(format!("Transport error: {}", err))
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

/// Client error body shown in the response panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientErrorReport {
    pub operation: String,
    pub code: String,
    pub message: String,
}

impl ClientErrorReport {
    pub fn new(operation: &str, error: &ClientError) -> Self {
        Self {
            operation: operation.to_string(),
            code: error.error_code().to_string(),
            message: error.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_message() {
        let err = ClientError::Validation("배정 ID 값을 입력하세요.".to_string());
        assert_eq!(
            err.to_string(),
            "VALIDATION_ERROR: 배정 ID 값을 입력하세요."
        );
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: ClientError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.error_code(), codes::DECODE_ERROR);
    }

    #[test]
    fn test_report_carries_code() {
        let report =
            ClientErrorReport::new("교환 요청 생성", &ClientError::Transport("down".into()));
        assert_eq!(report.code, "TRANSPORT_ERROR");
        assert_eq!(report.operation, "교환 요청 생성");
    }
}
