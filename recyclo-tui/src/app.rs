use recyclo_core::{
    centers::{CenterList, Generation, MergeOutcome},
    model::{PlaceDetails, PlaceId, PlaceSummary, RecyclingCenter, Region},
    ports::PortError,
    search::{DialogClose, SearchState},
    text::Expandable,
};
use tracing::{debug, error};

/// Dialogs that can sit on top of the map. The search dialog lives in [`SearchState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Modal {
    Filter,
    Detail(PlaceId),
}

/// A nearby search that has to be sent.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchRequest {
    pub generation: Generation,
    pub latitude: f64,
    pub longitude: f64,
    pub keyword: String,
}

/// Completion of a background task.
#[derive(Debug)]
pub(crate) enum AppEvent {
    Located(Result<Option<Region>, PortError>),
    SearchDone {
        generation: Generation,
        result: Result<Vec<PlaceSummary>, PortError>,
    },
    DetailsDone {
        generation: Generation,
        id: PlaceId,
        result: Result<PlaceDetails, PortError>,
    },
}

/// Follow-up work requested by state changes.
#[derive(Debug, PartialEq)]
pub(crate) enum Effect {
    None,
    Search(SearchRequest),
    FetchDetails {
        generation: Generation,
        ids: Vec<PlaceId>,
    },
}

pub(crate) struct App {
    /// Keyword handed in by navigation; `None` once cleared.
    pub route_item: Option<String>,
    pub search: SearchState,
    pub region: Option<Region>,
    pub centers: CenterList,
    pub list_index: usize,
    pub modal: Option<Modal>,
    pub expanded: Expandable,
}

impl App {
    pub(crate) fn new(route_item: Option<String>) -> Self {
        Self {
            route_item,
            search: SearchState::new(),
            region: None,
            centers: CenterList::new(),
            list_index: 0,
            modal: None,
            expanded: Expandable::default(),
        }
    }

    pub(crate) fn selected_center(&self) -> Option<&RecyclingCenter> {
        self.centers.centers().get(self.list_index)
    }

    pub(crate) fn detail_center(&self) -> Option<&RecyclingCenter> {
        match &self.modal {
            Some(Modal::Detail(id)) => self.centers.get(id),
            _ => None,
        }
    }

    /// Pull the navigation keyword into the search state, as done on every render.
    pub(crate) fn sync_route(&mut self) -> Option<SearchRequest> {
        if self.search.sync_external(self.route_item.as_deref()) {
            self.request_search()
        } else {
            None
        }
    }

    /// Start a new search generation with the committed keyword.
    ///
    /// Needs a region; before the location is known nothing is sent.
    pub(crate) fn request_search(&mut self) -> Option<SearchRequest> {
        let Some(region) = self.region else {
            debug!("no region yet, search deferred until location is known");
            return None;
        };
        let generation = self.centers.begin_search();
        Some(SearchRequest {
            generation,
            latitude: region.center.latitude,
            longitude: region.center.longitude,
            keyword: self.search.committed().to_owned(),
        })
    }

    pub(crate) fn open_search(&mut self) {
        self.modal = None;
        self.search.open_dialog();
    }

    pub(crate) fn submit_search(&mut self) -> Option<SearchRequest> {
        self.search.commit();
        self.request_search()
    }

    pub(crate) fn clear_search(&mut self) -> Option<SearchRequest> {
        self.route_item = None;
        self.search.clear();
        self.request_search()
    }

    pub(crate) fn close_search(&mut self) -> Option<SearchRequest> {
        match self.search.close_dialog() {
            DialogClose::Cleared => {
                self.route_item = None;
                self.request_search()
            }
            DialogClose::Dismissed => None,
        }
    }

    /// Marker tap: show the detail modal, description collapsed.
    pub(crate) fn open_selected(&mut self) {
        if let Some(id) = self.selected_center().map(|center| center.id.clone()) {
            self.expanded.reset();
            self.modal = Some(Modal::Detail(id));
        }
    }

    pub(crate) fn select_previous(&mut self) {
        self.list_index = self.list_index.saturating_sub(1);
    }

    pub(crate) fn select_next(&mut self) {
        if self.list_index + 1 < self.centers.len() {
            self.list_index += 1;
        }
    }

    pub(crate) fn handle_event(&mut self, event: AppEvent) -> Effect {
        match event {
            AppEvent::Located(Ok(Some(region))) => {
                self.region = Some(region);
                self.request_search().map_or(Effect::None, Effect::Search)
            }
            // denial is logged by the service; the loading indicator stays up
            AppEvent::Located(Ok(None)) => Effect::None,
            AppEvent::Located(Err(err)) => {
                error!(error = %err, "could not determine location");
                Effect::None
            }
            AppEvent::SearchDone {
                generation,
                result: Ok(results),
            } => match self.centers.apply_results(generation, results) {
                Some(ids) => {
                    self.list_index = 0;
                    if self.detail_center().is_none() && matches!(self.modal, Some(Modal::Detail(_))) {
                        self.modal = None;
                    }
                    Effect::FetchDetails { generation, ids }
                }
                None => {
                    debug!(%generation, "dropping stale search results");
                    Effect::None
                }
            },
            AppEvent::SearchDone {
                generation,
                result: Err(_),
            } => {
                if !self.centers.fail_search(generation) {
                    debug!(%generation, "dropping stale search failure");
                }
                Effect::None
            }
            AppEvent::DetailsDone {
                generation,
                id,
                result: Ok(details),
            } => {
                let outcome = self.centers.apply_details(generation, &id, details);
                if outcome != MergeOutcome::Merged {
                    debug!(%generation, %id, ?outcome, "details not merged");
                }
                Effect::None
            }
            // already logged by the service, the center keeps empty optional fields
            AppEvent::DetailsDone { result: Err(_), .. } => Effect::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use recyclo_core::model::Coordinates;

    use super::*;

    fn summary(id: &str) -> PlaceSummary {
        PlaceSummary {
            id: PlaceId::from(id),
            name: format!("Center {id}"),
            location: Coordinates::new(10.0, 20.0),
            vicinity: None,
        }
    }

    fn located(item: Option<&str>) -> (App, SearchRequest) {
        let mut app = App::new(item.map(str::to_owned));
        assert!(app.sync_route().is_none(), "no fetch before location is known");
        let effect = app.handle_event(AppEvent::Located(Ok(Some(Region::around(
            Coordinates::new(10.0, 20.0),
        )))));
        match effect {
            Effect::Search(request) => (app, request),
            other => panic!("location should trigger a search, got {other:?}"),
        }
    }

    fn loaded(ids: &[&str]) -> App {
        let (mut app, request) = located(None);
        app.handle_event(AppEvent::SearchDone {
            generation: request.generation,
            result: Ok(ids.iter().map(|id| summary(id)).collect()),
        });
        app
    }

    #[test]
    fn test_location_triggers_default_search() {
        let (app, request) = located(None);
        assert_eq!(request.keyword, "");
        assert!((request.latitude - 10.0).abs() < f64::EPSILON);
        assert!((request.longitude - 20.0).abs() < f64::EPSILON);
        assert!(app.centers.is_loading());
    }

    #[test]
    fn test_route_item_seeds_first_search() {
        let (app, request) = located(Some("batteries"));
        assert_eq!(request.keyword, "batteries");
        assert_eq!(app.search.draft(), "batteries");
    }

    #[test]
    fn test_denied_location_keeps_loading() {
        let mut app = App::new(None);
        assert_eq!(app.handle_event(AppEvent::Located(Ok(None))), Effect::None);
        assert!(app.centers.is_loading());
        assert!(app.region.is_none());
    }

    #[test]
    fn test_search_results_request_details_for_every_entry() {
        let (mut app, request) = located(None);
        let effect = app.handle_event(AppEvent::SearchDone {
            generation: request.generation,
            result: Ok(vec![summary("a"), summary("b")]),
        });
        assert_eq!(
            effect,
            Effect::FetchDetails {
                generation: request.generation,
                ids: vec![PlaceId::from("a"), PlaceId::from("b")],
            }
        );
        assert!(!app.centers.is_loading());
    }

    #[test]
    fn test_submit_sends_exactly_one_search_with_region_coordinates() {
        let mut app = loaded(&["a"]);
        app.open_search();
        "tires".chars().for_each(|character| app.search.push_char(character));

        let request = app.submit_search().expect("region is known");
        assert_eq!(request.keyword, "tires");
        assert!((request.latitude - 10.0).abs() < f64::EPSILON);
        assert_eq!(app.search.committed(), "tires");
        assert!(!app.search.is_dialog_open());
        assert!(app.sync_route().is_none());
    }

    #[test]
    fn test_closing_empty_search_dialog_clears_and_refetches() {
        let (mut app, first) = located(Some("glass"));
        app.open_search();
        "glass".chars().for_each(|_| app.search.pop_char());

        let request = app.close_search().expect("clear refetches");
        assert_eq!(request.keyword, "");
        assert!(request.generation > first.generation);
        assert_eq!(app.search.committed(), "");
        assert!(app.route_item.is_none());
    }

    #[test]
    fn test_closing_typed_search_dialog_does_not_fetch() {
        let mut app = loaded(&["a"]);
        app.open_search();
        app.search.push_char('x');
        assert!(app.close_search().is_none());
    }

    #[test]
    fn test_stale_search_results_are_ignored() {
        let (mut app, first) = located(None);
        let second = app.clear_search().expect("region is known");
        let effect = app.handle_event(AppEvent::SearchDone {
            generation: first.generation,
            result: Ok(vec![summary("old")]),
        });
        assert_eq!(effect, Effect::None);
        assert!(app.centers.is_empty());
        assert!(app.centers.is_loading());
        assert!(second.generation > first.generation);
    }

    #[test]
    fn test_failed_search_keeps_list_and_clears_loading() {
        let mut app = loaded(&["a", "b"]);
        let request = app.clear_search().expect("region is known");
        app.handle_event(AppEvent::SearchDone {
            generation: request.generation,
            result: Err(PortError::Internal("offline".into())),
        });
        assert_eq!(app.centers.len(), 2);
        assert!(!app.centers.is_loading());
    }

    #[test]
    fn test_details_merge_into_open_modal() {
        let mut app = loaded(&["a", "b"]);
        app.open_selected();
        app.handle_event(AppEvent::DetailsDone {
            generation: app.centers.generation(),
            id: PlaceId::from("a"),
            result: Ok(PlaceDetails {
                rating: Some(5.0),
                ..PlaceDetails::default()
            }),
        });
        assert_eq!(app.detail_center().and_then(|center| center.rating), Some(5.0));
    }

    #[test]
    fn test_opening_a_marker_collapses_description() {
        let mut app = loaded(&["a", "b"]);
        app.expanded.toggle();
        app.select_next();
        app.open_selected();
        assert!(!app.expanded.is_expanded());
        assert_eq!(app.modal, Some(Modal::Detail(PlaceId::from("b"))));
    }

    #[test]
    fn test_replaced_list_closes_orphaned_detail_modal() {
        let mut app = loaded(&["a"]);
        app.open_selected();
        let request = app.clear_search().expect("region is known");
        app.handle_event(AppEvent::SearchDone {
            generation: request.generation,
            result: Ok(vec![summary("z")]),
        });
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = loaded(&["a", "b"]);
        app.select_previous();
        assert_eq!(app.list_index, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.list_index, 1);
    }
}
