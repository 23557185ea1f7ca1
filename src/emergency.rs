//! Fixed outbound actions offered when an analysis is flagged as an
//! emergency: the ambulance number and a nearby-hospitals map search.

use std::sync::LazyLock;

use reqwest::Url;
use serde::Serialize;

/// National ambulance number.
pub const EMERGENCY_NUMBER: &str = "108";

static MAPS_SEARCH_BASE: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://www.google.com/maps/search/").expect("Invalid maps base URL")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContacts {
    pub call_uri: String,
    /// Present only when a location was given.
    pub hospitals_url: Option<String>,
}

impl EmergencyContacts {
    pub fn for_location(location: Option<&str>) -> Self {
        Self {
            call_uri: format!("tel:{EMERGENCY_NUMBER}"),
            hospitals_url: location
                .and_then(hospitals_search_url)
                .map(|u| u.to_string()),
        }
    }
}

/// Map search for hospitals near `location`. `None` for a blank location.
pub fn hospitals_search_url(location: &str) -> Option<Url> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }
    let mut url = MAPS_SEARCH_BASE.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(&format!("hospitals+near+{location}"));
    Some(url)
}
