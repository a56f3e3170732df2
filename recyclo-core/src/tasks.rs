//! Registry of in-flight fetch tasks so a new search can cancel the old ones.

use std::collections::HashMap;
use std::future::Future;

use tokio::task::AbortHandle;

use crate::centers::Generation;
use crate::model::PlaceId;

/// Spawned search and details tasks, keyed by generation.
///
/// Details tasks are keyed by `(generation, place id)`. Starting a new
/// generation aborts everything that is still registered.
#[derive(Debug, Default)]
pub struct FetchTasks {
    search: Option<(Generation, AbortHandle)>,
    details: HashMap<(Generation, PlaceId), AbortHandle>,
}

impl FetchTasks {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort every registered task. Returns how many were aborted.
    pub fn cancel_all(&mut self) -> usize {
        let mut cancelled = 0;
        if let Some((_, handle)) = self.search.take() {
            handle.abort();
            cancelled += 1;
        }
        for (_, handle) in self.details.drain() {
            handle.abort();
            cancelled += 1;
        }
        cancelled
    }

    /// Spawn the search task of `generation`, aborting all older tasks first.
    pub fn spawn_search<F>(&mut self, generation: Generation, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancelled = self.cancel_all();
        if cancelled > 0 {
            tracing::debug!(%generation, cancelled, "cancelled superseded fetches");
        }
        let handle = tokio::spawn(future).abort_handle();
        self.search = Some((generation, handle));
    }

    /// Spawn a details task for one place.
    pub fn spawn_details<F>(&mut self, generation: Generation, id: PlaceId, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future).abort_handle();
        if let Some(previous) = self.details.insert((generation, id), handle) {
            previous.abort();
        }
    }

    /// Forget the search task once it has reported back.
    pub fn finish_search(&mut self, generation: Generation) {
        if matches!(self.search, Some((current, _)) if current == generation) {
            self.search = None;
        }
    }

    /// Forget a details task once it has reported back.
    pub fn finish_details(&mut self, generation: Generation, id: &PlaceId) -> bool {
        self.details.remove(&(generation, id.clone())).is_some()
    }

    /// Number of details tasks still registered.
    #[must_use]
    pub fn pending_details(&self) -> usize {
        self.details.len()
    }

    /// Whether a search task is registered.
    #[must_use]
    pub fn search_pending(&self) -> bool {
        self.search.is_some()
    }
}
