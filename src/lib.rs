//! `Weathercast` - city weather forecasts as a small web application
//!
//! This library resolves a free-text city name to coordinates via the
//! OpenWeatherMap Geocoding API, fetches a current + daily forecast from
//! the One Call API, and flattens the result into a display-ready view
//! model. Upstream failures surface as a closed error taxonomy.

pub mod config;
pub mod error;
pub mod forecast;
pub mod geocoding;
pub mod models;
pub mod query;
pub mod service;
pub mod session;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::WeatherError;
pub use forecast::ForecastClient;
pub use geocoding::GeocodingClient;
pub use models::{DayOutlook, ForecastView, Location};
pub use service::WeatherService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
