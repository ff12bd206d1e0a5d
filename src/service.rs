//! Request orchestration: query enhancement → geocoding → forecast → view

use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, instrument};

use crate::config::AppConfig;
use crate::error::WeatherError;
use crate::forecast::ForecastClient;
use crate::geocoding::GeocodingClient;
use crate::models::ForecastView;
use crate::query;

/// Facade over the full weather pipeline, shared by all request handlers.
///
/// Holds no mutable state: both clients carry a handle to the same
/// immutable session, so concurrent handler invocations need no
/// synchronization. The two upstream calls run sequentially because the
/// forecast fetch needs the geocoder's coordinates.
pub struct WeatherService {
    geocoding: GeocodingClient,
    forecast: ForecastClient,
}

impl WeatherService {
    #[must_use]
    pub fn new(session: ClientWithMiddleware, config: &AppConfig) -> Self {
        Self {
            geocoding: GeocodingClient::new(
                session.clone(),
                config.geocoding_url.clone(),
                config.api_key.clone(),
            ),
            forecast: ForecastClient::new(
                session,
                config.onecall_url.clone(),
                config.api_key.clone(),
            ),
        }
    }

    /// Complete workflow for one city search.
    ///
    /// Returns the flattened view plus the resolved display name, or the
    /// first taxonomy error a stage produced.
    #[instrument(skip(self))]
    pub async fn weather_for_city(
        &self,
        city: &str,
    ) -> Result<(ForecastView, String), WeatherError> {
        let search_query = query::qualify_us_city(city);
        if search_query != city {
            debug!("Qualified query to '{search_query}'");
        }

        let location = self.geocoding.resolve(&search_query).await?;
        let payload = self
            .forecast
            .fetch(location.latitude, location.longitude)
            .await?;
        let view = ForecastView::from_raw(&payload);

        Ok((view, location.name))
    }
}
