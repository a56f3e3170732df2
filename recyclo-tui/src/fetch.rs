//! Runs network calls in background tasks and reports back to the UI loop.

use std::sync::Arc;

use recyclo_core::{
    centers::Generation,
    model::PlaceId,
    service::RecyclingService,
    tasks::FetchTasks,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::app::{AppEvent, Effect, SearchRequest};

pub(crate) struct Fetcher {
    service: Arc<RecyclingService>,
    events: UnboundedSender<AppEvent>,
    tasks: FetchTasks,
}

impl Fetcher {
    pub(crate) fn new(service: Arc<RecyclingService>, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            service,
            events,
            tasks: FetchTasks::new(),
        }
    }

    /// Resolve the device location once, on startup.
    pub(crate) fn locate(&self) {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = service.locate().await;
            report(&events, AppEvent::Located(result));
        });
    }

    pub(crate) fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Search(request) => self.search(request),
            Effect::FetchDetails { generation, ids } => self.details(generation, ids),
        }
    }

    pub(crate) fn search(&mut self, request: SearchRequest) {
        info!(generation = %request.generation, keyword = %request.keyword, "starting search");
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let SearchRequest {
            generation,
            latitude,
            longitude,
            keyword,
        } = request;

        self.tasks.spawn_search(generation, async move {
            let result = service.search(latitude, longitude, &keyword).await;
            report(&events, AppEvent::SearchDone { generation, result });
        });
    }

    fn details(&mut self, generation: Generation, ids: Vec<PlaceId>) {
        debug!(%generation, count = ids.len(), "fetching details");
        for id in ids {
            let service = Arc::clone(&self.service);
            let events = self.events.clone();
            let task_id = id.clone();
            self.tasks.spawn_details(generation, task_id, async move {
                let result = service.fetch_details(&id).await;
                report(
                    &events,
                    AppEvent::DetailsDone {
                        generation,
                        id,
                        result,
                    },
                );
            });
        }
    }

    /// Drop bookkeeping for a task that has reported back.
    pub(crate) fn settle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Located(_) => {}
            AppEvent::SearchDone { generation, .. } => self.tasks.finish_search(*generation),
            AppEvent::DetailsDone { generation, id, .. } => {
                self.tasks.finish_details(*generation, id);
            }
        }
    }

    pub(crate) fn shutdown(&mut self) {
        let cancelled = self.tasks.cancel_all();
        debug!(cancelled, "cancelled pending fetches on exit");
    }
}

fn report(events: &UnboundedSender<AppEvent>, event: AppEvent) {
    if events.send(event).is_err() {
        debug!("ui loop is gone, dropping task result");
    }
}
