//! Places provider using the Google Places nearby search and details endpoints.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use recyclo_core::{
    model::{Coordinates, OpeningHours, PlaceDetails, PlaceId, PlaceSummary},
    ports::{NearbyQuery, PlacesPort, PortError},
};

/// Production endpoint of the places web service.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

// Only what the detail view shows, keeps the billing tier low.
const DETAIL_FIELDS: &str = "opening_hours,rating,reviews";

/// Response from /nearbysearch/json
#[derive(Debug, Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    results: Vec<NearbyResult>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

/// Single place inside a nearby search response
#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
    geometry: Geometry,
    #[serde(default)]
    vicinity: Option<String>,
    // types, icon, photos, ... are ignored
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Response from /details/json
#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    result: Option<DetailsResult>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    opening_hours: Option<Hours>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    reviews: Vec<Review>,
}

#[derive(Debug, Deserialize)]
struct Hours {
    #[serde(default)]
    open_now: Option<bool>,
    #[serde(default)]
    weekday_text: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Review {
    #[serde(default)]
    text: String,
}

/// Nearby search and details lookups against the Google Places API.
pub struct GooglePlacesPort {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GooglePlacesPort {
    /// Create a new places port bound to the given HTTP client and credential.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::MissingApiKey`] when `api_key` is blank.
    pub fn new(client: Client, api_key: impl Into<String>) -> Result<Self, PortError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PortError::MissingApiKey);
        }
        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
        })
    }

    /// Point the port at another deployment of the API, e.g. a local mock.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }
}

#[async_trait]
impl PlacesPort for GooglePlacesPort {
    #[instrument(skip(self), fields(keyword = %query.keyword))]
    async fn nearby_search(&self, query: &NearbyQuery) -> Result<Vec<PlaceSummary>, PortError> {
        let location = format!("{},{}", query.location.latitude, query.location.longitude);
        let radius = query.radius_meters.to_string();

        let req = self
            .client
            .get(format!("{}/nearbysearch/json", self.base_url))
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("keyword", query.keyword.as_str()),
                ("key", self.api_key.as_str()),
            ]);

        let resp = fetch_json::<NearbyResponse>(req).await?;
        check_status(&resp.status, resp.error_message)?;
        debug!(count = resp.results.len(), "nearby search response");

        Ok(resp.results.into_iter().map(into_summary).collect())
    }

    #[instrument(skip(self))]
    async fn details(&self, id: &PlaceId) -> Result<PlaceDetails, PortError> {
        let req = self
            .client
            .get(format!("{}/details/json", self.base_url))
            .query(&[
                ("place_id", id.0.as_str()),
                ("fields", DETAIL_FIELDS),
                ("key", self.api_key.as_str()),
            ]);

        let resp = fetch_json::<DetailsResponse>(req).await?;
        check_status(&resp.status, resp.error_message)?;

        Ok(resp.result.map(into_details).unwrap_or_default())
    }
}

fn into_summary(result: NearbyResult) -> PlaceSummary {
    PlaceSummary {
        id: PlaceId(result.place_id),
        name: result.name,
        location: Coordinates::new(result.geometry.location.lat, result.geometry.location.lng),
        vicinity: result.vicinity,
    }
}

fn into_details(result: DetailsResult) -> PlaceDetails {
    PlaceDetails {
        opening_hours: result.opening_hours.map(|hours| OpeningHours {
            open_now: hours.open_now,
            weekday_text: hours.weekday_text,
        }),
        rating: result.rating,
        first_review: result.reviews.into_iter().next().map(|review| review.text),
    }
}

/// Map the `status` field every response carries to a result.
fn check_status(status: &str, message: Option<String>) -> Result<(), PortError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(PortError::Api {
            status: other.to_owned(),
            message: message.unwrap_or_default(),
        }),
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
