//! High-level service facade combining the location and places backends.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::model::{Coordinates, PlaceDetails, PlaceId, PlaceSummary, Region};
use crate::ports::{Accuracy, LocationPort, NearbyQuery, Permission, PlacesPort, PortError};

/// Public entry point for locating the user and finding recycling centers.
pub struct RecyclingService {
    places: Arc<dyn PlacesPort>,
    location: Arc<dyn LocationPort>,
}

impl RecyclingService {
    /// Create a new service bound to the provided backends.
    #[must_use]
    pub fn new(places: Arc<dyn PlacesPort>, location: Arc<dyn LocationPort>) -> Self {
        Self { places, location }
    }

    /// Ask for location access and resolve the initial map region.
    ///
    /// Returns `Ok(None)` when permission was denied.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the permission state or the position cannot be read.
    #[instrument(skip(self))]
    pub async fn locate(&self) -> Result<Option<Region>, PortError> {
        if self.location.request_permission().await? == Permission::Denied {
            warn!("location permission denied, not searching");
            return Ok(None);
        }

        let position = self.location.current_position(Accuracy::High).await?;
        info!(
            latitude = position.latitude,
            longitude = position.longitude,
            "location acquired"
        );
        Ok(Some(Region::around(position)))
    }

    /// Search for recycling centers around a position.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the nearby search fails.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        latitude: f64,
        longitude: f64,
        keyword: &str,
    ) -> Result<Vec<PlaceSummary>, PortError> {
        let query = NearbyQuery::for_keyword(Coordinates::new(latitude, longitude), keyword);
        info!(query = %query.keyword, "searching nearby places");

        match self.places.nearby_search(&query).await {
            Ok(results) => {
                info!(count = results.len(), "nearby search finished");
                Ok(results)
            }
            Err(err) => {
                error!(error = %err, "nearby search failed");
                Err(err)
            }
        }
    }

    /// Load details for one place.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the details request fails.
    #[instrument(skip(self))]
    pub async fn fetch_details(&self, id: &PlaceId) -> Result<PlaceDetails, PortError> {
        self.places.details(id).await.inspect_err(|err| {
            warn!(error = %err, "details request failed");
        })
    }
}
