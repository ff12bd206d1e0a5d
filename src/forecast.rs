//! Forecast fetcher: retrieves current + daily data for coordinates

use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, info, instrument, warn};

use crate::error::{WeatherError, classify_response};
use crate::models::OneCallResponse;

/// Client for the provider's One Call forecast endpoint.
pub struct ForecastClient {
    session: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

impl ForecastClient {
    #[must_use]
    pub fn new(session: ClientWithMiddleware, base_url: String, api_key: String) -> Self {
        Self {
            session,
            base_url,
            api_key,
        }
    }

    /// Fetch current conditions and the daily forecast in metric units.
    ///
    /// The minutely and alert sections are excluded; nothing downstream
    /// reads them and skipping them trims the payload.
    #[instrument(skip(self))]
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<OneCallResponse, WeatherError> {
        debug!("Fetching forecast for {latitude:.4}, {longitude:.4}");

        let url = format!(
            "{}/data/3.0/onecall?lat={latitude}&lon={longitude}&appid={}&units=metric&exclude=minutely,alerts",
            self.base_url, self.api_key
        );

        let response = self.session.get(&url).send().await.map_err(|e| {
            if is_timeout(&e) {
                warn!("Timeout while fetching weather data");
                WeatherError::Timeout
            } else {
                warn!("Network error during weather fetch: {e}");
                WeatherError::Network
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            // 401 here means the key itself is fine for geocoding but not
            // subscribed to the One Call 3.0 product; the generic
            // invalid-key wording would mislead.
            if status == StatusCode::UNAUTHORIZED {
                return Err(WeatherError::Auth {
                    message: "API key not authorized for One Call API 3.0. Please ensure you \
                              have subscribed to the One Call API 3.0 plan."
                        .to_string(),
                });
            }
            let body = response.text().await.unwrap_or_default();
            return Err(classify_response("Forecast", status, &body));
        }

        let payload: OneCallResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse forecast response: {e}");
            WeatherError::Generic {
                message: "Invalid weather data received from the weather service".to_string(),
                http_code: None,
            }
        })?;

        if payload.current.is_none() {
            return Err(WeatherError::IncompleteData {
                field: "current".to_string(),
            });
        }
        if payload.daily.is_none() {
            return Err(WeatherError::IncompleteData {
                field: "daily".to_string(),
            });
        }

        info!(
            "Retrieved forecast with {} daily entries",
            payload.daily.as_ref().map_or(0, Vec::len)
        );
        Ok(payload)
    }
}

fn is_timeout(err: &reqwest_middleware::Error) -> bool {
    matches!(err, reqwest_middleware::Error::Reqwest(e) if e.is_timeout())
}
