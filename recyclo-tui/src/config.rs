use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use recyclo_core::model::Coordinates;
use recyclo_provider_google::DEFAULT_BASE_URL;

/// Find recycling centers near you, right in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "recyclo", version, about)]
pub(crate) struct Config {
    /// Google Places API key.
    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Item to look for, e.g. "batteries". Seeds the search keyword.
    #[arg(long)]
    pub item: Option<String>,

    /// Latitude to search around instead of locating the device.
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude to search around instead of locating the device.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Allow locating this machine through its public IP address.
    #[arg(long, env = "RECYCLO_LOCATE")]
    pub locate: bool,

    /// Base URL of the places API.
    #[arg(long, env = "RECYCLO_PLACES_URL", default_value = DEFAULT_BASE_URL)]
    pub places_base_url: String,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,

    /// Where to write the log. Defaults to the user data directory.
    #[arg(long, env = "RECYCLO_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub(crate) fn fixed_position(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lat?, self.lng?))
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
