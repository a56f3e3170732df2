//! The in-memory list of recycling centers and its search generations.

use std::fmt;

use crate::model::{PlaceDetails, PlaceId, PlaceSummary, RecyclingCenter};

/// Version counter of a search request.
///
/// Every search gets a fresh generation. Completions tagged with an older
/// generation are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(pub u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// Result of merging one details response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The matching entry was updated.
    Merged,
    /// Response belongs to a superseded search.
    Stale,
    /// No entry with that identifier is in the list.
    Missing,
}

/// Centers of the latest successful search plus the loading flag.
#[derive(Debug, Clone)]
pub struct CenterList {
    generation: Generation,
    centers: Vec<RecyclingCenter>,
    loading: bool,
}

impl Default for CenterList {
    fn default() -> Self {
        Self::new()
    }
}

impl CenterList {
    /// Empty list that starts out loading, as the screen does on mount.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: Generation::default(),
            centers: Vec::new(),
            loading: true,
        }
    }

    /// Current search generation.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Centers in response order.
    #[must_use]
    pub fn centers(&self) -> &[RecyclingCenter] {
        &self.centers
    }

    /// Look up a center by identifier.
    #[must_use]
    pub fn get(&self, id: &PlaceId) -> Option<&RecyclingCenter> {
        self.centers.iter().find(|center| &center.id == id)
    }

    /// Number of centers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Whether no centers are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Whether the current search is still running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start a new search and return its generation.
    ///
    /// The list keeps its entries until the new response arrives, but nothing
    /// from an older generation can touch it anymore.
    pub fn begin_search(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.loading = true;
        self.generation
    }

    /// Replace the list with a successful search response.
    ///
    /// Returns the identifiers that need a details lookup, or `None` when the
    /// response is stale.
    pub fn apply_results(
        &mut self,
        generation: Generation,
        results: Vec<PlaceSummary>,
    ) -> Option<Vec<PlaceId>> {
        if generation != self.generation {
            return None;
        }
        self.loading = false;
        self.centers = results.into_iter().map(RecyclingCenter::from).collect();
        Some(self.centers.iter().map(|center| center.id.clone()).collect())
    }

    /// Settle a failed search. The list keeps its prior contents.
    ///
    /// Returns `false` when the failure belongs to a superseded search.
    pub fn fail_search(&mut self, generation: Generation) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        true
    }

    /// Merge a details response into the entry with the same identifier.
    pub fn apply_details(
        &mut self,
        generation: Generation,
        id: &PlaceId,
        details: PlaceDetails,
    ) -> MergeOutcome {
        if generation != self.generation {
            return MergeOutcome::Stale;
        }
        match self.centers.iter_mut().find(|center| &center.id == id) {
            Some(center) => {
                center.enrich(details);
                MergeOutcome::Merged
            }
            None => MergeOutcome::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, DESCRIPTION_PLACEHOLDER, OpeningHours};

    fn summary(id: &str) -> PlaceSummary {
        PlaceSummary {
            id: PlaceId::from(id),
            name: format!("Center {id}"),
            location: Coordinates::new(40.0, -74.0),
            vicinity: Some(format!("{id} street")),
        }
    }

    fn details(review: &str) -> PlaceDetails {
        PlaceDetails {
            opening_hours: Some(OpeningHours {
                open_now: Some(true),
                weekday_text: vec!["Monday: 8 AM – 5 PM".to_owned()],
            }),
            rating: Some(4.2),
            first_review: Some(review.to_owned()),
        }
    }

    fn loaded(ids: &[&str]) -> (CenterList, Generation) {
        let mut list = CenterList::new();
        let generation = list.begin_search();
        list.apply_results(generation, ids.iter().map(|id| summary(id)).collect());
        (list, generation)
    }

    #[test]
    fn test_starts_loading_and_empty() {
        let list = CenterList::new();
        assert!(list.is_loading());
        assert!(list.is_empty());
    }

    #[test]
    fn test_results_replace_list_in_order() {
        let (mut list, _) = loaded(&["a", "b"]);
        let generation = list.begin_search();
        let pending = list.apply_results(generation, vec![summary("c"), summary("d"), summary("e")]);

        let ids: Vec<_> = list.centers().iter().map(|center| center.id.0.as_str()).collect();
        assert_eq!(ids, ["c", "d", "e"]);
        assert_eq!(pending.map(|ids| ids.len()), Some(3));
        assert!(!list.is_loading());
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut list = CenterList::new();
        let old = list.begin_search();
        let current = list.begin_search();
        assert!(list.apply_results(old, vec![summary("x")]).is_none());
        assert!(list.is_loading());
        assert!(list.apply_results(current, vec![summary("y")]).is_some());
        assert_eq!(list.centers().len(), 1);
    }

    #[test]
    fn test_failure_keeps_prior_list_and_clears_loading() {
        let (mut list, _) = loaded(&["a"]);
        let generation = list.begin_search();
        assert!(list.fail_search(generation));
        assert!(!list.is_loading());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_stale_failure_keeps_loading() {
        let mut list = CenterList::new();
        let old = list.begin_search();
        list.begin_search();
        assert!(!list.fail_search(old));
        assert!(list.is_loading());
    }

    #[test]
    fn test_details_merge_only_touches_matching_entry() {
        let (mut list, generation) = loaded(&["a", "b"]);
        let before_b = list.centers().get(1).cloned();

        let outcome = list.apply_details(generation, &PlaceId::from("a"), details("Great place"));
        assert_eq!(outcome, MergeOutcome::Merged);

        let center_a = list.get(&PlaceId::from("a")).cloned();
        assert_eq!(center_a.as_ref().and_then(|center| center.rating), Some(4.2));
        assert_eq!(
            center_a.as_ref().and_then(|center| center.description.as_deref()),
            Some("Great place")
        );
        assert_eq!(center_a.map(|center| center.address), Some("a street".to_owned()));
        assert_eq!(list.centers().get(1).cloned(), before_b);
    }

    #[test]
    fn test_details_for_missing_id_is_noop() {
        let (mut list, generation) = loaded(&["a"]);
        let before = list.centers().to_vec();
        let outcome = list.apply_details(generation, &PlaceId::from("zzz"), details("x"));
        assert_eq!(outcome, MergeOutcome::Missing);
        assert_eq!(list.centers(), before.as_slice());
    }

    #[test]
    fn test_details_from_old_generation_are_dropped() {
        let (mut list, old) = loaded(&["a"]);
        let current = list.begin_search();
        list.apply_results(current, vec![summary("a")]);

        let outcome = list.apply_details(old, &PlaceId::from("a"), details("stale"));
        assert_eq!(outcome, MergeOutcome::Stale);
        assert!(list.get(&PlaceId::from("a")).and_then(|center| center.description.clone()).is_none());
    }

    #[test]
    fn test_details_without_review_use_placeholder() {
        let (mut list, generation) = loaded(&["a"]);
        list.apply_details(generation, &PlaceId::from("a"), PlaceDetails::default());
        assert_eq!(
            list.get(&PlaceId::from("a")).and_then(|center| center.description.as_deref()),
            Some(DESCRIPTION_PLACEHOLDER)
        );
    }
}
