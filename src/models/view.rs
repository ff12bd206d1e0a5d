//! Flattened, display-ready forecast view model

use serde::Serialize;

use super::forecast::{OneCallResponse, WeatherCondition};

/// Visibility the provider assumes when it omits the field (metres).
const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

/// Number of daily entries shown in the outlook.
const OUTLOOK_DAYS: usize = 5;

/// One column of the multi-day outlook.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DayOutlook {
    /// Daytime temperature, rounded to whole degrees
    pub temp: i32,
    /// Condition group ("Rain", "Clouds", ...)
    pub condition: String,
}

/// Flattened forecast record consumed by the presentation layer.
///
/// Temperatures are whole degrees Celsius; `visibility_km` is the provider's
/// metre value divided by 1000.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ForecastView {
    pub current_temp: i32,
    pub current_condition: String,
    pub wind_speed: f64,
    pub humidity: u8,
    pub feels_like: i32,
    pub uvi: f64,
    pub visibility_km: f64,
    /// Today's minimum temperature
    pub min_temp: i32,
    /// Today's maximum temperature
    pub max_temp: i32,
    /// First `OUTLOOK_DAYS` daily entries, in provider order
    pub five_day: Vec<DayOutlook>,
    /// Narrative summary of today, present only when the provider sent one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ForecastView {
    /// Flatten a validated payload into display fields.
    ///
    /// Never fails: the `current`/`daily` presence check happens in the
    /// fetcher, and any deeper missing sub-field defaults to 0 or "Unknown"
    /// instead of sinking the whole request.
    #[must_use]
    pub fn from_raw(raw: &OneCallResponse) -> Self {
        let current = raw.current.as_ref();
        let daily = raw.daily.as_deref().unwrap_or_default();
        let today = daily.first();

        let five_day = daily
            .iter()
            .take(OUTLOOK_DAYS)
            .map(|day| DayOutlook {
                temp: round_whole(day.temp.as_ref().and_then(|t| t.day)),
                condition: condition_or_unknown(&day.weather),
            })
            .collect();

        Self {
            current_temp: round_whole(current.and_then(|c| c.temp)),
            current_condition: current
                .map(|c| condition_or_unknown(&c.weather))
                .unwrap_or_else(|| "Unknown".to_string()),
            wind_speed: current.and_then(|c| c.wind_speed).unwrap_or(0.0),
            humidity: current.and_then(|c| c.humidity).unwrap_or(0),
            feels_like: round_whole(current.and_then(|c| c.feels_like)),
            uvi: current.and_then(|c| c.uvi).unwrap_or(0.0),
            visibility_km: current
                .and_then(|c| c.visibility)
                .unwrap_or(DEFAULT_VISIBILITY_M)
                / 1000.0,
            min_temp: round_whole(today.and_then(|d| d.temp.as_ref()).and_then(|t| t.min)),
            max_temp: round_whole(today.and_then(|d| d.temp.as_ref()).and_then(|t| t.max)),
            five_day,
            summary: today.and_then(|d| d.summary.clone()),
        }
    }
}

fn round_whole(value: Option<f64>) -> i32 {
    value.unwrap_or(0.0).round() as i32
}

fn condition_or_unknown(weather: &[WeatherCondition]) -> String {
    weather
        .first()
        .and_then(|condition| condition.main.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}
