//! Shared HTTP plumbing for the Google REST APIs

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use omnichat_core::prelude::*;

/// Upper bound on any single request. Generation can take tens of seconds.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the HTTP client shared by the adapters
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("omnichat/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(transport_error)
}

/// Convert a transport-level failure
pub fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::http(format!("request timed out after {}s", REQUEST_TIMEOUT.as_secs()))
    } else {
        // Strip the URL: it may carry an API key in its query string.
        Error::http(err.without_url().to_string())
    }
}

/// Standard Google API error envelope: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct Envelope {
    error: ApiError,
}

impl ApiError {
    /// Parse an error body, falling back to the raw text when it is not JSON
    pub fn from_body(status: StatusCode, body: &str) -> ApiError {
        match serde_json::from_str::<Envelope>(body) {
            Ok(env) => env.error,
            Err(_) => ApiError {
                code: status.as_u16(),
                message: if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body.trim().to_string()
                },
                ..Default::default()
            },
        }
    }

    /// `reason` values from `google.rpc.ErrorInfo` details
    pub fn reasons(&self) -> impl Iterator<Item = &str> {
        self.details
            .iter()
            .filter_map(|d| d.get("reason").and_then(|r| r.as_str()))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.status.is_empty() {
            write!(f, "{} ({})", self.message, self.code)
        } else {
            write!(f, "{} ({} {})", self.message, self.code, self.status)
        }
    }
}

/// Read a response body, returning the API error for non-success statuses
pub async fn read_body(response: reqwest::Response) -> std::result::Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| ApiError {
        code: status.as_u16(),
        message: transport_error(e).to_string(),
        ..Default::default()
    })?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ApiError::from_body(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_json_envelope() {
        let body = r#"{"error":{"code":400,"message":"INVALID_PASSWORD","status":"INVALID_ARGUMENT"}}"#;
        let err = ApiError::from_body(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.code, 400);
        assert_eq!(err.message, "INVALID_PASSWORD");
        assert_eq!(err.to_string(), "INVALID_PASSWORD (400 INVALID_ARGUMENT)");
    }

    #[test]
    fn test_api_error_from_plain_text() {
        let err = ApiError::from_body(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.code, 502);
        assert_eq!(err.message, "upstream down");
    }

    #[test]
    fn test_api_error_reasons() {
        let body = r#"{"error":{"code":403,"message":"Requests from referer <empty> are blocked.",
            "status":"PERMISSION_DENIED",
            "details":[{"@type":"type.googleapis.com/google.rpc.ErrorInfo","reason":"API_KEY_HTTP_REFERRER_BLOCKED"}]}}"#;
        let err = ApiError::from_body(StatusCode::FORBIDDEN, body);
        assert_eq!(
            err.reasons().collect::<Vec<_>>(),
            vec!["API_KEY_HTTP_REFERRER_BLOCKED"]
        );
    }
}
