//! Traits describing the places and location backends plus shared helper types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{Coordinates, PlaceDetails, PlaceId, PlaceSummary};

/// Radius of every nearby search, roughly 50 miles.
pub const SEARCH_RADIUS_METERS: u32 = 80_467;

/// Term appended to a user keyword so results stay on recycling facilities.
pub const KEYWORD_SUFFIX: &str = "recycling";

/// Query sent when the user has not entered a keyword.
pub const DEFAULT_QUERY: &str = "recycling center OR recycling facility OR recycling depot OR recycling drop-off OR scrap metal recycling";

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to places or location backends.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Backend answered, but with a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// Status code reported in the response body.
        status: String,
        /// Backend supplied explanation, possibly empty.
        message: String,
    },
    /// The user did not allow location access.
    #[error("Location permission denied")]
    PermissionDenied,
    /// No credential configured for the places backend.
    #[error("Missing API key")]
    MissingApiKey,
    /// Location backend could not produce a position.
    #[error("Location error: {0}")]
    Location(String),
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of a location permission request.
pub enum Permission {
    /// Position may be read.
    Granted,
    /// Position must not be read.
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Requested accuracy of a position fix.
pub enum Accuracy {
    /// Cheap, coarse fix.
    Balanced,
    /// Best fix the backend can offer.
    High,
}

#[derive(Debug, Clone, PartialEq)]
/// Parameters of a nearby search.
pub struct NearbyQuery {
    /// Search center.
    pub location: Coordinates,
    /// Search radius in meters.
    pub radius_meters: u32,
    /// Effective keyword sent to the backend.
    pub keyword: String,
}

impl NearbyQuery {
    /// Build the query for a user keyword around `location`.
    ///
    /// A blank keyword falls back to [`DEFAULT_QUERY`].
    #[must_use]
    pub fn for_keyword(location: Coordinates, keyword: &str) -> Self {
        Self {
            location,
            radius_meters: SEARCH_RADIUS_METERS,
            keyword: effective_keyword(keyword),
        }
    }
}

/// Turn a user keyword into the string sent to the backend.
#[must_use]
pub fn effective_keyword(keyword: &str) -> String {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        DEFAULT_QUERY.to_owned()
    } else {
        format!("{trimmed} {KEYWORD_SUFFIX}")
    }
}

#[async_trait]
/// Trait for places backends.
pub trait PlacesPort: Send + Sync {
    /// Find places near a location.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend request fails.
    async fn nearby_search(&self, query: &NearbyQuery) -> Result<Vec<PlaceSummary>, PortError>;

    /// Fetch extra metadata for one place.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend request fails.
    async fn details(&self, id: &PlaceId) -> Result<PlaceDetails, PortError>;
}

#[async_trait]
/// Trait for device location backends.
pub trait LocationPort: Send + Sync {
    /// Ask for foreground location access.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the permission state cannot be determined.
    async fn request_permission(&self) -> Result<Permission, PortError>;

    /// Read the current position.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when no position can be obtained.
    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinates, PortError>;
}
