use futures::future::LocalBoxFuture;
use tracing::{debug, warn};

use super::{PanelController, PanelView, RequestLifecycle, RequestTicket, RequestTracker};
use crate::api::{ApiError, AssistantApi, FaqRequest, FaqResponse};
use crate::filters::{faq_categories, filter_faqs};
use crate::models::{assign_missing_ids, FaqItem, PreferenceField, UserPreferences};
use crate::store::PreferenceChange;

/// FAQ panel: fetched list plus local search and category selection.
#[derive(Debug, Default)]
pub struct FaqController {
    view: PanelView<Vec<FaqItem>>,
    tracker: RequestTracker,
    search_term: String,
    selected_category: String,
}

impl FaqController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_view(&self) -> &PanelView<Vec<FaqItem>> {
        &self.view
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Empty string selects every category
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// Fetched FAQs after search and category filtering
    pub fn visible_faqs(&self) -> Vec<FaqItem> {
        filter_faqs(&self.view.data, &self.search_term, &self.selected_category)
    }

    pub fn categories(&self) -> Vec<String> {
        faq_categories(&self.view.data)
    }
}

impl RequestLifecycle for FaqController {
    type Request = FaqRequest;
    type Response = FaqResponse;

    const NAME: &'static str = "faqs";

    fn call(
        api: &dyn AssistantApi,
        request: FaqRequest,
    ) -> LocalBoxFuture<'_, Result<FaqResponse, ApiError>> {
        api.get_faqs(request)
    }

    fn complete(&mut self, ticket: RequestTicket, outcome: Result<FaqResponse, ApiError>) -> bool {
        if !self.tracker.is_current(ticket) {
            return false;
        }

        match outcome {
            Ok(response) => {
                let mut faqs = response.faqs;
                assign_missing_ids(&mut faqs);
                self.view.set_success(faqs);
            }
            Err(err) => {
                warn!("Error fetching FAQs: {}", err);
                self.view.set_error(Vec::new(), err.to_string());
            }
        }
        true
    }
}

impl PanelController for FaqController {
    fn wants_refresh(&self, change: &PreferenceChange) -> bool {
        change
            .changed
            .contains_any(&[PreferenceField::VisaStatus, PreferenceField::LanguagePreference])
    }

    fn begin(&mut self, preferences: &UserPreferences) -> Option<(RequestTicket, FaqRequest)> {
        if !preferences.has_faq_inputs() {
            // Incomplete input never reaches the backend
            self.tracker.invalidate();
            self.view.set_success(Vec::new());
            debug!("FAQ inputs incomplete, showing empty list");
            return None;
        }

        self.view.set_loading();
        Some((self.tracker.issue(), FaqRequest::new(preferences)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::ViewStatus;

    fn ready_prefs() -> UserPreferences {
        UserPreferences::default()
            .with_visa_status("Student Visa")
            .with_language("English")
    }

    fn item(question: &str, answer: &str, category: Option<&str>) -> FaqItem {
        FaqItem {
            id: String::new(),
            question: question.into(),
            answer: answer.into(),
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_inputs_short_circuit_to_empty_success() {
        for prefs in [
            UserPreferences::default(),
            UserPreferences::default().with_visa_status("Work Visa"),
            UserPreferences::default().with_language("English"),
        ] {
            let mut controller = FaqController::new();
            assert!(controller.begin(&prefs).is_none());
            assert_eq!(controller.current_view().status, ViewStatus::Success);
            assert!(controller.current_view().data.is_empty());
        }
    }

    #[test]
    fn test_success_assigns_ids() {
        let mut controller = FaqController::new();
        let (ticket, request) = controller.begin(&ready_prefs()).unwrap();
        assert_eq!(request.status, "Student Visa");
        assert!(controller.current_view().is_loading());

        let applied = controller.complete(
            ticket,
            Ok(FaqResponse {
                faqs: vec![item("q1", "a1", None), item("q2", "a2", None)],
            }),
        );
        assert!(applied);
        let view = controller.current_view();
        assert_eq!(view.status, ViewStatus::Success);
        assert_eq!(view.data[0].id, "faq-1");
        assert_eq!(view.data[1].id, "faq-2");
    }

    #[test]
    fn test_failure_clears_list_and_sets_message() {
        let mut controller = FaqController::new();
        let (ticket, _) = controller.begin(&ready_prefs()).unwrap();
        controller.complete(ticket, Ok(FaqResponse { faqs: vec![item("q", "a", None)] }));

        let (ticket, _) = controller.begin(&ready_prefs()).unwrap();
        controller.complete(
            ticket,
            Err(ApiError::Status {
                status: 500,
                body: String::new(),
            }),
        );
        let view = controller.current_view();
        assert_eq!(view.status, ViewStatus::Error);
        assert!(view.data.is_empty());
        assert_eq!(view.error_message.as_deref(), Some("HTTP error! status: 500"));
    }

    #[test]
    fn test_stale_result_discarded() {
        let mut controller = FaqController::new();
        let (first, _) = controller.begin(&ready_prefs()).unwrap();
        let (second, _) = controller.begin(&ready_prefs().with_language("Spanish")).unwrap();

        assert!(controller.complete(second, Ok(FaqResponse { faqs: vec![item("nuevo", "sí", None)] })));
        assert!(!controller.complete(first, Ok(FaqResponse { faqs: vec![item("old", "stale", None)] })));
        assert_eq!(controller.current_view().data[0].question, "nuevo");
    }

    #[test]
    fn test_clearing_inputs_invalidates_in_flight_request() {
        let mut controller = FaqController::new();
        let (ticket, _) = controller.begin(&ready_prefs()).unwrap();
        assert!(controller.begin(&UserPreferences::default()).is_none());

        assert!(!controller.complete(ticket, Ok(FaqResponse { faqs: vec![item("q", "a", None)] })));
        assert_eq!(controller.current_view().status, ViewStatus::Success);
        assert!(controller.current_view().data.is_empty());
    }

    #[test]
    fn test_refresh_predicate() {
        let controller = FaqController::new();
        let before = ready_prefs();
        let change = |after: UserPreferences| PreferenceChange {
            changed: before.changed_fields(&after),
            previous: before.clone(),
            current: after,
        };
        assert!(controller.wants_refresh(&change(before.with_language("Hindi"))));
        assert!(controller.wants_refresh(&change(before.with_visa_status("Work Visa"))));
        assert!(!controller.wants_refresh(&change(before.with_state("Texas"))));
        assert!(!controller.wants_refresh(&change(before.with_interest_toggled("Housing"))));
    }

    #[test]
    fn test_visible_faqs_apply_search_and_category() {
        let mut controller = FaqController::new();
        let (ticket, _) = controller.begin(&ready_prefs()).unwrap();
        controller.complete(
            ticket,
            Ok(FaqResponse {
                faqs: vec![
                    item("Work permits", "Apply with I-765.", Some("Work")),
                    item("Travel", "Carry your visa.", Some("Travel")),
                    item("Study", "Enroll full time.", Some("Education")),
                ],
            }),
        );

        controller.set_search_term("visa");
        assert_eq!(controller.visible_faqs().len(), 1);
        controller.select_category("Work");
        assert!(controller.visible_faqs().is_empty());
        controller.set_search_term("");
        assert_eq!(controller.visible_faqs().len(), 1);
        assert_eq!(controller.categories(), vec!["Work", "Travel", "Education"]);
    }
}
