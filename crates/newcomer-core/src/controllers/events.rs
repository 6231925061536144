use futures::future::LocalBoxFuture;
use tracing::{info, warn};

use super::{PanelController, PanelView, RequestLifecycle, RequestTicket, RequestTracker};
use crate::api::{ApiError, AssistantApi, PersonalizedRequest, RecommendationsResponse};
use crate::filters::{event_categories, filter_events_by_category, filter_events_for_preferences};
use crate::models::{regional_catalog, sample_catalog, Event, UserPreferences};
use crate::store::PreferenceChange;

/// Where the current catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Sample,
    Regional,
    Recommended,
}

/// Events panel.
///
/// The catalog is the backend's recommendations when it has any, otherwise
/// the built-in sample catalog placed in the selected region. The view data
/// is that catalog filtered by preferences; the category selection is a
/// further display-only filter.
#[derive(Debug)]
pub struct EventsController {
    view: PanelView<Vec<Event>>,
    tracker: RequestTracker,
    catalog: Vec<Event>,
    source: CatalogSource,
    preferences: UserPreferences,
    selected_category: Option<String>,
}

impl EventsController {
    pub fn new() -> Self {
        let catalog = sample_catalog();
        Self {
            view: PanelView::new(catalog.clone()),
            tracker: RequestTracker::new(),
            catalog,
            source: CatalogSource::Sample,
            preferences: UserPreferences::default(),
            selected_category: None,
        }
    }

    pub fn current_view(&self) -> &PanelView<Vec<Event>> {
        &self.view
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    /// None shows every category
    pub fn select_category(&mut self, category: Option<String>) {
        self.selected_category = category.filter(|c| !c.is_empty());
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn visible_events(&self) -> Vec<Event> {
        filter_events_by_category(&self.view.data, self.selected_category.as_deref())
    }

    pub fn categories(&self) -> Vec<String> {
        event_categories(&self.view.data)
    }

    fn filtered(&self) -> Vec<Event> {
        filter_events_for_preferences(&self.catalog, &self.preferences)
    }

    fn use_regional_catalog(&mut self) {
        self.catalog = regional_catalog(&self.preferences.state);
        self.source = CatalogSource::Regional;
    }
}

impl Default for EventsController {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLifecycle for EventsController {
    type Request = PersonalizedRequest;
    type Response = RecommendationsResponse;

    const NAME: &'static str = "events";

    fn call(
        api: &dyn AssistantApi,
        request: PersonalizedRequest,
    ) -> LocalBoxFuture<'_, Result<RecommendationsResponse, ApiError>> {
        api.get_recommendations(request)
    }

    fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<RecommendationsResponse, ApiError>,
    ) -> bool {
        if !self.tracker.is_current(ticket) {
            return false;
        }

        match outcome {
            Ok(response) if !response.events.is_empty() => {
                info!(count = response.events.len(), "Received event recommendations");
                self.catalog = response.events.into_iter().map(Event::from).collect();
                self.source = CatalogSource::Recommended;
                let events = self.filtered();
                self.view.set_success(events);
            }
            Ok(_) => {
                self.use_regional_catalog();
                let events = self.filtered();
                self.view.set_success(events);
            }
            Err(err) => {
                warn!("Error fetching event recommendations: {}", err);
                self.use_regional_catalog();
                let events = self.filtered();
                self.view.set_error(events, err.to_string());
            }
        }
        true
    }
}

impl PanelController for EventsController {
    fn wants_refresh(&self, change: &PreferenceChange) -> bool {
        !change.changed.is_empty()
    }

    fn begin(&mut self, preferences: &UserPreferences) -> Option<(RequestTicket, PersonalizedRequest)> {
        // Re-derive from the catalog we already hold so the panel follows
        // the new preferences while recommendations load
        self.preferences = preferences.clone();
        if self.source == CatalogSource::Regional {
            // The regional catalog is placed in one state; move it with the user
            self.use_regional_catalog();
        }
        self.view.data = self.filtered();
        self.view.set_loading();
        Some((self.tracker.issue(), PersonalizedRequest::new(preferences)))
    }
}
