//! Raw One Call API payload structures

use serde::Deserialize;

/// Combined current + daily forecast response from the provider.
///
/// `current` and `daily` are the only sections requested. Both must be
/// present for the payload to be usable; the fetcher enforces that before
/// normalization. Deeper fields stay optional and default at view time.
#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    pub current: Option<CurrentConditions>,
    pub daily: Option<Vec<DailyEntry>>,
}

/// Current conditions section.
#[derive(Debug, Deserialize)]
pub struct CurrentConditions {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<u8>,
    pub wind_speed: Option<f64>,
    pub uvi: Option<f64>,
    /// Average visibility in metres; the provider caps it at 10 km and
    /// omits the field when uncapped
    pub visibility: Option<f64>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

/// One entry of the `daily` sequence (index 0 = today).
#[derive(Debug, Deserialize)]
pub struct DailyEntry {
    pub temp: Option<DailyTemperature>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    /// Narrative summary of the day (One Call 3.0 only)
    pub summary: Option<String>,
}

/// Day/min/max temperatures of a daily entry.
#[derive(Debug, Deserialize)]
pub struct DailyTemperature {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub day: Option<f64>,
}

/// Weather condition group ("Rain", "Clouds", ...).
#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub main: Option<String>,
}
