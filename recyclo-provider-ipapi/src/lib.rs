//! Location providers: IP based geolocation via ip-api.com, and fixed coordinates.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use recyclo_core::{
    model::Coordinates,
    ports::{Accuracy, LocationPort, Permission, PortError},
};

const BASE_URL: &str = "http://ip-api.com/json";

/// Response from ip-api.com
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String, // "success" or "fail"
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Approximate position from the public IP address.
///
/// Terminals have no permission prompt, so consent is given up front through
/// configuration. Without it the port reports [`Permission::Denied`].
pub struct IpApiLocation {
    client: Client,
    consent: bool,
    base_url: String,
}

impl IpApiLocation {
    /// Create a new location port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, consent: bool) -> Self {
        Self {
            client,
            consent,
            base_url: BASE_URL.to_owned(),
        }
    }
}

#[async_trait]
impl LocationPort for IpApiLocation {
    async fn request_permission(&self) -> Result<Permission, PortError> {
        Ok(if self.consent {
            Permission::Granted
        } else {
            Permission::Denied
        })
    }

    #[instrument(skip(self))]
    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinates, PortError> {
        if !self.consent {
            return Err(PortError::PermissionDenied);
        }
        if accuracy == Accuracy::High {
            debug!("IP geolocation is city level at best");
        }

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await?
            .error_for_status()?
            .json::<IpApiResponse>()
            .await?;

        parse_position(resp)
    }
}

fn parse_position(resp: IpApiResponse) -> Result<Coordinates, PortError> {
    if resp.status != "success" {
        return Err(PortError::Location(
            resp.message.unwrap_or_else(|| format!("lookup returned {}", resp.status)),
        ));
    }
    match (resp.lat, resp.lon) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
        _ => Err(PortError::Location("response without coordinates".into())),
    }
}

/// Position given on the command line. Always granted.
pub struct FixedLocation {
    position: Coordinates,
}

impl FixedLocation {
    /// Create a port that always reports `position`.
    #[must_use]
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationPort for FixedLocation {
    async fn request_permission(&self) -> Result<Permission, PortError> {
        Ok(Permission::Granted)
    }

    async fn current_position(&self, _accuracy: Accuracy) -> Result<Coordinates, PortError> {
        Ok(self.position)
    }
}
