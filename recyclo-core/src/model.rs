//! Domain data structures for places, coordinates, and the map region.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Address shown when the places backend does not report a vicinity.
pub const ADDRESS_PLACEHOLDER: &str = "Address not available";

/// Description shown when a place has no reviews.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available.";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier of a place as issued by the places backend.
pub struct PlaceId(pub String);

impl fmt::Display for PlaceId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(raw: &str) -> Self {
        PlaceId(raw.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// WGS84 position in decimal degrees.
pub struct Coordinates {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl Coordinates {
    /// Construct coordinates from latitude and longitude.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Map viewport: a center plus the visible span in degrees.
pub struct Region {
    /// Viewport center.
    pub center: Coordinates,
    /// Visible latitude span.
    pub latitude_delta: f64,
    /// Visible longitude span.
    pub longitude_delta: f64,
}

impl Region {
    /// Latitude span used for the initial viewport.
    pub const DEFAULT_LATITUDE_DELTA: f64 = 0.0922;
    /// Longitude span used for the initial viewport.
    pub const DEFAULT_LONGITUDE_DELTA: f64 = 0.0421;

    /// Region centered on `center` with the fixed default zoom.
    #[must_use]
    pub fn around(center: Coordinates) -> Self {
        Self {
            center,
            latitude_delta: Self::DEFAULT_LATITUDE_DELTA,
            longitude_delta: Self::DEFAULT_LONGITUDE_DELTA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Opening hours as reported by the details endpoint.
pub struct OpeningHours {
    /// Whether the place is open right now, if known.
    pub open_now: Option<bool>,
    /// One human readable line per weekday, Monday first.
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One entry of a nearby search response.
pub struct PlaceSummary {
    /// Backend identifier.
    pub id: PlaceId,
    /// Display name.
    pub name: String,
    /// Position of the place.
    pub location: Coordinates,
    /// Short address, if the backend has one.
    pub vicinity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Extra metadata returned by a details lookup.
pub struct PlaceDetails {
    /// Opening hours, if published.
    pub opening_hours: Option<OpeningHours>,
    /// Average rating, if any.
    pub rating: Option<f64>,
    /// Text of the first review, if any.
    pub first_review: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A recycling center shown on the map.
pub struct RecyclingCenter {
    /// Stable identifier, unique within a list.
    pub id: PlaceId,
    /// Display name.
    pub name: String,
    /// Marker position.
    pub location: Coordinates,
    /// Address line or [`ADDRESS_PLACEHOLDER`].
    pub address: String,
    /// Filled in by a details merge.
    pub opening_hours: Option<OpeningHours>,
    /// Filled in by a details merge.
    pub rating: Option<f64>,
    /// Filled in by a details merge.
    pub description: Option<String>,
}

impl From<PlaceSummary> for RecyclingCenter {
    fn from(summary: PlaceSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            location: summary.location,
            address: summary
                .vicinity
                .filter(|vicinity| !vicinity.trim().is_empty())
                .unwrap_or_else(|| ADDRESS_PLACEHOLDER.to_owned()),
            opening_hours: None,
            rating: None,
            description: None,
        }
    }
}

impl RecyclingCenter {
    /// Copy the optional fields of a details response onto this center.
    ///
    /// Only hours, rating and description are touched.
    pub fn enrich(&mut self, details: PlaceDetails) {
        self.opening_hours = details.opening_hours;
        self.rating = details.rating;
        self.description = Some(
            details
                .first_review
                .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_owned()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(vicinity: Option<&str>) -> PlaceSummary {
        PlaceSummary {
            id: PlaceId::from("abc"),
            name: "Eco Depot".to_owned(),
            location: Coordinates::new(52.52, 13.405),
            vicinity: vicinity.map(str::to_owned),
        }
    }

    #[test]
    fn test_center_from_summary_keeps_vicinity() {
        let center = RecyclingCenter::from(summary(Some("Main St 1")));
        assert_eq!(center.id, PlaceId::from("abc"));
        assert_eq!(center.address, "Main St 1");
        assert!(center.description.is_none());
    }

    #[test]
    fn test_center_from_summary_uses_placeholder() {
        assert_eq!(
            RecyclingCenter::from(summary(None)).address,
            ADDRESS_PLACEHOLDER
        );
        assert_eq!(
            RecyclingCenter::from(summary(Some("  "))).address,
            ADDRESS_PLACEHOLDER
        );
    }

    #[test]
    fn test_enrich_without_reviews_sets_placeholder() {
        let mut center = RecyclingCenter::from(summary(Some("Main St 1")));
        center.enrich(PlaceDetails {
            opening_hours: None,
            rating: Some(4.5),
            first_review: None,
        });
        assert_eq!(center.rating, Some(4.5));
        assert_eq!(center.description.as_deref(), Some(DESCRIPTION_PLACEHOLDER));
        assert_eq!(center.address, "Main St 1");
    }

    #[test]
    fn test_region_around_uses_default_deltas() {
        let region = Region::around(Coordinates::new(1.0, 2.0));
        assert_eq!(region.center, Coordinates::new(1.0, 2.0));
        assert!((region.latitude_delta - Region::DEFAULT_LATITUDE_DELTA).abs() < f64::EPSILON);
        assert!((region.longitude_delta - Region::DEFAULT_LONGITUDE_DELTA).abs() < f64::EPSILON);
    }
}
