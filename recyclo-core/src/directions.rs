//! Deep links that hand a destination to the platform's map application.

use reqwest::Url;

use crate::model::Coordinates;

const WEB_MAPS_URL: &str = "https://www.google.com/maps/search/";

#[derive(thiserror::Error, Debug)]
#[error("Invalid map link {link}: {reason}")]
/// A directions link could not be assembled.
pub struct LinkError {
    link: String,
    reason: String,
}

fn parse(link: &str) -> Result<Url, LinkError> {
    Url::parse(link).map_err(|err| LinkError {
        link: link.to_owned(),
        reason: err.to_string(),
    })
}

/// Platforms with a known map application URI scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Apple Maps via `maps:`.
    Apple,
    /// Any handler registered for `geo:` URIs.
    Geo,
    /// No native scheme, use the web fallback.
    Web,
}

impl Platform {
    /// Platform this binary was built for.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Platform::Apple
        } else if cfg!(any(target_os = "linux", target_os = "android")) {
            Platform::Geo
        } else {
            Platform::Web
        }
    }
}

/// Link that opens directions to `destination` on `platform`.
///
/// # Errors
///
/// Returns a [`LinkError`] if the base link is malformed.
pub fn directions_url(
    platform: Platform,
    destination: Coordinates,
    name: &str,
) -> Result<Url, LinkError> {
    let Coordinates {
        latitude,
        longitude,
    } = destination;

    let (base, query) = match platform {
        Platform::Apple => ("maps:0,0", format!("{name}@{latitude},{longitude}")),
        Platform::Geo => ("geo:0,0", format!("{latitude},{longitude}({name})")),
        Platform::Web => return web_url(destination),
    };

    let mut url = parse(base)?;
    url.query_pairs_mut().append_pair("q", &query);
    Ok(url)
}

/// Browser link used when no native map scheme is available.
///
/// # Errors
///
/// Returns a [`LinkError`] if the base link is malformed.
pub fn web_url(destination: Coordinates) -> Result<Url, LinkError> {
    let query = format!("{},{}", destination.latitude, destination.longitude);
    let mut url = parse(WEB_MAPS_URL)?;
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("query", &query);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depot() -> Coordinates {
        Coordinates::new(47.5, 8.25)
    }

    #[test]
    fn test_apple_link_carries_name_and_position() {
        let url = directions_url(Platform::Apple, depot(), "Eco Depot").map(String::from);
        assert_eq!(url.ok().as_deref(), Some("maps:0,0?q=Eco+Depot%4047.5%2C8.25"));
    }

    #[test]
    fn test_geo_link_carries_name_and_position() {
        let url = directions_url(Platform::Geo, depot(), "Depot").map(String::from);
        assert_eq!(url.ok().as_deref(), Some("geo:0,0?q=47.5%2C8.25%28Depot%29"));
    }

    #[test]
    fn test_web_fallback() {
        let url = directions_url(Platform::Web, depot(), "ignored").map(String::from);
        assert_eq!(
            url.ok().as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=47.5%2C8.25")
        );
    }
}
