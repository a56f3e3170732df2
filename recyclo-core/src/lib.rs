//! Core types and service wiring for the recyclo recycling center finder.

/// The list of centers shown on the map and its search generations.
pub mod centers;
/// Deep links for turn-by-turn directions.
pub mod directions;
/// Domain models and identifiers shared by all providers.
pub mod model;
/// Traits describing the provider interfaces.
pub mod ports;
/// Keyword state behind the search dialog.
pub mod search;
/// High-level service facade used by clients.
pub mod service;
/// Registry of cancellable fetch tasks.
pub mod tasks;
/// Description shortening for the detail view.
pub mod text;

pub use centers::*;
pub use model::*;
pub use ports::*;
pub use search::*;
pub use service::*;
pub use tasks::*;
