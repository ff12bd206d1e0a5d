//! Error taxonomy and provider error classification
//!
//! Every upstream failure is folded into one `WeatherError` variant at the
//! point the response is deemed unusable, then propagated unchanged to the
//! boundary. The core performs no recovery beyond the transport session's
//! automatic retry of transient server errors.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::error;

/// Closed error taxonomy surfaced by the weather core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeatherError {
    /// The query or coordinates resolved to no data
    #[error("{message}")]
    NotFound { message: String },

    /// The API key was rejected by the provider
    #[error("{message}")]
    Auth { message: String },

    /// Provider request quota exhausted
    #[error("{message}")]
    RateLimited { message: String },

    /// The provider rejected one or more request parameters
    #[error("Invalid request parameters: {}", format_parameters(.parameters))]
    BadRequest { parameters: Vec<String> },

    /// A 200 response arrived without a required payload section
    #[error("Incomplete weather data received: missing {field}")]
    IncompleteData { field: String },

    /// The request exceeded the per-call timeout
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// The provider could not be reached
    #[error("Network error: unable to reach the weather service")]
    Network,

    /// Anything the taxonomy does not name; carries the provider's own
    /// message and, when known, the upstream status
    #[error("{message}")]
    Generic {
        message: String,
        http_code: Option<u16>,
    },
}

fn format_parameters(parameters: &[String]) -> String {
    if parameters.is_empty() {
        "unknown".to_string()
    } else {
        parameters.join(", ")
    }
}

impl WeatherError {
    /// Upstream HTTP status associated with this error, when one exists.
    #[must_use]
    pub fn http_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Auth { .. } => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::BadRequest { .. } => Some(400),
            Self::IncompleteData { .. } => Some(500),
            Self::Timeout | Self::Network => None,
            Self::Generic { http_code, .. } => *http_code,
        }
    }

    /// Get a user-friendly message for the presentation layer.
    #[must_use]
    pub fn user_message(&self, city: &str) -> String {
        match self {
            Self::NotFound { .. } => {
                format!("City '{city}' not found. Please check the spelling and try again.")
            }
            Self::Auth { .. } => {
                "Weather service authentication error. Please contact support.".to_string()
            }
            Self::RateLimited { .. } => {
                "Too many requests. Please try again in a few minutes.".to_string()
            }
            other => format!("Weather service error: {other}"),
        }
    }
}

/// Provider-embedded error body.
///
/// `cod` arrives as a JSON number on some endpoints and a string on others.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    cod: Option<ProviderCode>,
    message: Option<String>,
    #[serde(default)]
    parameters: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderCode {
    Number(u16),
    Text(String),
}

impl ProviderCode {
    fn as_u16(&self) -> Option<u16> {
        match self {
            Self::Number(code) => Some(*code),
            Self::Text(raw) => raw.parse().ok(),
        }
    }
}

/// Classify a known-bad provider response into the taxonomy.
///
/// The mapping is checked in order and the first match wins. A body that
/// does not parse as the provider's error structure falls back to a generic
/// server error carrying the raw HTTP status.
#[must_use]
pub fn classify_response(endpoint: &str, status: StatusCode, body: &str) -> WeatherError {
    let Ok(parsed) = serde_json::from_str::<ProviderErrorBody>(body) else {
        error!("Unparseable error body from {endpoint} (HTTP {status})");
        return WeatherError::Generic {
            message: format!("Server error: {}", status.as_u16()),
            http_code: Some(status.as_u16()),
        };
    };

    let code = parsed.cod.as_ref().and_then(ProviderCode::as_u16);
    let message = parsed
        .message
        .unwrap_or_else(|| "Unknown error".to_string());

    error!("API error on {endpoint}: code {code:?}, message: {message}");

    match code {
        Some(401) => WeatherError::Auth {
            message: "Invalid API key. Please check your OpenWeatherMap API key.".to_string(),
        },
        Some(404) => WeatherError::NotFound {
            message: "Weather data not found for the specified location.".to_string(),
        },
        Some(429) => WeatherError::RateLimited {
            message: "API rate limit exceeded. Please try again later.".to_string(),
        },
        Some(400) => WeatherError::BadRequest {
            parameters: parsed.parameters,
        },
        _ => WeatherError::Generic {
            message,
            http_code: code,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_classify_auth() {
        let body = r#"{"cod": 401, "message": "Invalid API key"}"#;
        let err = classify_response("Geocoding", StatusCode::UNAUTHORIZED, body);
        assert!(matches!(err, WeatherError::Auth { .. }));
        assert_eq!(err.http_code(), Some(401));
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[test]
    fn test_classify_not_found() {
        let body = r#"{"cod": 404, "message": "city not found"}"#;
        let err = classify_response("Forecast", StatusCode::NOT_FOUND, body);
        assert!(matches!(err, WeatherError::NotFound { .. }));
        assert!(
            err.to_string()
                .contains("not found for the specified location")
        );
    }

    #[test]
    fn test_classify_rate_limited() {
        let body = r#"{"cod": 429, "message": "Your account is temporarily blocked"}"#;
        let err = classify_response("Forecast", StatusCode::TOO_MANY_REQUESTS, body);
        assert!(matches!(err, WeatherError::RateLimited { .. }));
        assert_eq!(err.http_code(), Some(429));
    }

    #[test]
    fn test_classify_bad_request_lists_parameters() {
        let body = r#"{"cod": 400, "message": "Nothing to geocode", "parameters": ["q", "appid"]}"#;
        let err = classify_response("Geocoding", StatusCode::BAD_REQUEST, body);
        assert_eq!(err.to_string(), "Invalid request parameters: q, appid");
        assert_eq!(err.http_code(), Some(400));
    }

    #[test]
    fn test_classify_bad_request_without_parameters() {
        let body = r#"{"cod": 400, "message": "Nothing to geocode"}"#;
        let err = classify_response("Geocoding", StatusCode::BAD_REQUEST, body);
        assert_eq!(err.to_string(), "Invalid request parameters: unknown");
    }

    #[test]
    fn test_classify_passes_unknown_codes_through() {
        let body = r#"{"cod": 418, "message": "I'm a teapot"}"#;
        let err = classify_response("Forecast", StatusCode::IM_A_TEAPOT, body);
        assert_eq!(
            err,
            WeatherError::Generic {
                message: "I'm a teapot".to_string(),
                http_code: Some(418),
            }
        );
    }

    #[rstest]
    #[case(r#"{"cod": "404", "message": "not found"}"#)]
    #[case(r#"{"cod": 404, "message": "not found"}"#)]
    fn test_classify_accepts_string_and_numeric_codes(#[case] body: &str) {
        let err = classify_response("Geocoding", StatusCode::NOT_FOUND, body);
        assert!(matches!(err, WeatherError::NotFound { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("<html>bad gateway</html>")]
    #[case(r#"{"cod": [1, 2]}"#)]
    fn test_classify_falls_back_on_unparseable_body(#[case] body: &str) {
        let err = classify_response("Forecast", StatusCode::BAD_GATEWAY, body);
        assert_eq!(
            err,
            WeatherError::Generic {
                message: "Server error: 502".to_string(),
                http_code: Some(502),
            }
        );
    }

    #[test]
    fn test_http_codes_for_taxonomy() {
        assert_eq!(
            WeatherError::IncompleteData {
                field: "daily".to_string()
            }
            .http_code(),
            Some(500)
        );
        assert_eq!(WeatherError::Timeout.http_code(), None);
        assert_eq!(WeatherError::Network.http_code(), None);
    }

    #[test]
    fn test_user_messages() {
        let not_found = WeatherError::NotFound {
            message: "gone".to_string(),
        };
        assert!(
            not_found
                .user_message("Atlantis")
                .contains("'Atlantis' not found")
        );

        let auth = WeatherError::Auth {
            message: "bad key".to_string(),
        };
        assert!(auth.user_message("Austin").contains("authentication error"));

        let timeout = WeatherError::Timeout;
        assert!(
            timeout
                .user_message("Austin")
                .contains("Weather service error")
        );
    }
}
