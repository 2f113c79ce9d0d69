use reqwest::StatusCode;
use serde::Deserialize;

/// Failure of a single request against the REST API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Builds a status error, picking up the `message` field of a JSON error body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        ApiError::Status { status, message }
    }

    /// Text shown to the user in a notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status {
                status,
                message: None,
            } => match status.canonical_reason() {
                Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
                None => "Unknown error".to_string(),
            },
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_server_message() {
        let err = ApiError::from_status(
            StatusCode::CONFLICT,
            r#"{"message":"Category name already exists"}"#,
        );

        assert_eq!(err.user_message(), "Category name already exists");
    }

    #[test]
    fn falls_back_to_status_text() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");

        assert_eq!(err.user_message(), "HTTP 500 Internal Server Error");
    }

    #[test]
    fn unknown_status_is_unknown_error() {
        let status = StatusCode::from_u16(599).unwrap();
        let err = ApiError::from_status(status, "");

        assert_eq!(err.user_message(), "Unknown error");
    }
}
