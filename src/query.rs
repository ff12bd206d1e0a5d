//! City query normalization
//!
//! Pure string transforms applied to the user's search input before it is
//! handed to the geocoder. No network access, no failure paths.

/// Two-letter U.S. state and territory abbreviations (including DC).
const US_STATE_ABBREVS: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY", "DC",
];

/// Full U.S. state names.
const US_STATE_NAMES: [&str; 50] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

/// Title-case each whitespace-separated word (first letter upper, rest
/// lower), collapsing runs of whitespace to single spaces.
#[must_use]
pub fn capitalize_words(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Qualify a `"City, Region"` search with a country code when the region is
/// a U.S. state, so the geocoder resolves to the U.S. location instead of a
/// foreign namesake.
///
/// Only inputs with exactly one comma are considered; the region part must
/// match a state abbreviation or full state name (both case-insensitive).
/// Everything else passes through unchanged.
#[must_use]
pub fn qualify_us_city(city: &str) -> String {
    if city.matches(',').count() != 1 {
        return city.to_string();
    }

    let Some((locality, region)) = city.split_once(',') else {
        return city.to_string();
    };

    let locality = locality.trim();
    let region = region.trim();

    let is_us_state = US_STATE_ABBREVS
        .iter()
        .any(|abbrev| abbrev.eq_ignore_ascii_case(region))
        || US_STATE_NAMES
            .iter()
            .any(|name| name.eq_ignore_ascii_case(region));

    if is_us_state {
        format!("{locality}, {region}, US")
    } else {
        city.to_string()
    }
}
