//! Data models: resolved locations, raw provider payloads, and the
//! flattened display view

pub mod forecast;
pub mod location;
pub mod view;

pub use forecast::OneCallResponse;
pub use location::Location;
pub use view::{DayOutlook, ForecastView};
