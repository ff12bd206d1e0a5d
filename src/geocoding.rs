//! Geocoding client: resolves a city query to coordinates

use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{WeatherError, classify_response};
use crate::models::Location;

/// Result limit requested from the geocoding endpoint. Only the first
/// candidate is used; the rest are disambiguation headroom.
const CANDIDATE_LIMIT: u8 = 3;

/// Client for the provider's direct geocoding endpoint.
pub struct GeocodingClient {
    session: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

/// A single geocoding candidate.
#[derive(Debug, Deserialize)]
struct GeocodingCandidate {
    name: Option<String>,
    lat: f64,
    lon: f64,
    state: Option<String>,
    country: Option<String>,
}

impl GeocodingClient {
    #[must_use]
    pub fn new(session: ClientWithMiddleware, base_url: String, api_key: String) -> Self {
        Self {
            session,
            base_url,
            api_key,
        }
    }

    /// Resolve a (normalized) city query to coordinates and a display name.
    ///
    /// The display name is the first candidate's name, suffixed with its
    /// state and country when the candidate carries them.
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &str) -> Result<Location, WeatherError> {
        debug!("Geocoding query: '{query}'");

        let url = format!(
            "{}/geo/1.0/direct?q={}&appid={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            self.api_key,
            CANDIDATE_LIMIT
        );

        let response = self.session.get(&url).send().await.map_err(|e| {
            warn!("Network error during geocoding: {e}");
            WeatherError::Network
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_response("Geocoding", status, &body));
        }

        let candidates: Vec<GeocodingCandidate> = response.json().await.map_err(|e| {
            warn!("Failed to parse geocoding response: {e}");
            WeatherError::Generic {
                message: "Invalid geocoding data received from the weather service".to_string(),
                http_code: None,
            }
        })?;

        let Some(first) = candidates.into_iter().next() else {
            return Err(WeatherError::NotFound {
                message: format!("City '{query}' not found. Please check the spelling."),
            });
        };

        let mut name = first.name.unwrap_or_else(|| query.to_string());
        if let Some(state) = &first.state {
            name.push_str(&format!(", {state}"));
        }
        if let Some(country) = &first.country {
            name.push_str(&format!(", {country}"));
        }

        let location = Location::new(first.lat, first.lon, name);
        info!(
            "Resolved '{query}' to {} ({})",
            location.name,
            location.format_coordinates()
        );
        Ok(location)
    }
}
