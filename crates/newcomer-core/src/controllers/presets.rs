use futures::future::LocalBoxFuture;
use tracing::warn;

use super::{PanelController, PanelView, RequestLifecycle, RequestTicket, RequestTracker};
use crate::api::{ApiError, AssistantApi, PersonalizedRequest, PresetQuestionsResponse};
use crate::constants::{FALLBACK_PRESET_QUESTION, INITIAL_PRESET_QUESTION};
use crate::models::UserPreferences;
use crate::store::PreferenceChange;

/// Suggested questions shown above the chat input.
///
/// The list is never empty: it starts with one built-in question and falls
/// back to a different one when the backend fails or suggests nothing.
#[derive(Debug)]
pub struct PresetController {
    view: PanelView<Vec<String>>,
    tracker: RequestTracker,
}

impl PresetController {
    pub fn new() -> Self {
        Self {
            view: PanelView::new(vec![INITIAL_PRESET_QUESTION.to_string()]),
            tracker: RequestTracker::new(),
        }
    }

    pub fn current_view(&self) -> &PanelView<Vec<String>> {
        &self.view
    }

    pub fn questions(&self) -> &[String] {
        &self.view.data
    }
}

impl Default for PresetController {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLifecycle for PresetController {
    type Request = PersonalizedRequest;
    type Response = PresetQuestionsResponse;

    const NAME: &'static str = "presets";

    fn call(
        api: &dyn AssistantApi,
        request: PersonalizedRequest,
    ) -> LocalBoxFuture<'_, Result<PresetQuestionsResponse, ApiError>> {
        api.get_preset_questions(request)
    }

    fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<PresetQuestionsResponse, ApiError>,
    ) -> bool {
        if !self.tracker.is_current(ticket) {
            return false;
        }

        let fallback = || vec![FALLBACK_PRESET_QUESTION.to_string()];
        match outcome {
            Ok(response) => {
                let queries: Vec<String> = response
                    .queries
                    .into_iter()
                    .map(|q| q.trim().to_string())
                    .filter(|q| !q.is_empty())
                    .collect();
                if queries.is_empty() {
                    self.view.set_success(fallback());
                } else {
                    self.view.set_success(queries);
                }
            }
            Err(err) => {
                warn!("Error fetching preset questions: {}", err);
                self.view.set_error(fallback(), err.to_string());
            }
        }
        true
    }
}

impl PanelController for PresetController {
    fn wants_refresh(&self, change: &PreferenceChange) -> bool {
        !change.changed.is_empty()
    }

    fn begin(&mut self, preferences: &UserPreferences) -> Option<(RequestTicket, PersonalizedRequest)> {
        self.view.set_loading();
        Some((self.tracker.issue(), PersonalizedRequest::new(preferences)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::ViewStatus;

    #[test]
    fn test_starts_with_initial_question() {
        let controller = PresetController::new();
        assert_eq!(controller.questions(), [INITIAL_PRESET_QUESTION.to_string()]);
        assert_eq!(controller.current_view().status, ViewStatus::Idle);
    }

    #[test]
    fn test_success_replaces_list() {
        let mut controller = PresetController::new();
        let (ticket, request) = controller
            .begin(&UserPreferences::default().with_state("Texas"))
            .unwrap();
        assert_eq!(request.state, "Texas");

        controller.complete(
            ticket,
            Ok(PresetQuestionsResponse {
                queries: vec!["How do I rent in Austin?".into(), "Where is the DMV?".into()],
            }),
        );
        assert_eq!(controller.questions().len(), 2);
        assert_eq!(controller.current_view().status, ViewStatus::Success);
    }

    #[test]
    fn test_failure_falls_back_to_different_question() {
        let mut controller = PresetController::new();
        let (ticket, _) = controller.begin(&UserPreferences::default()).unwrap();
        controller.complete(ticket, Err(ApiError::Transport("connection refused".into())));

        assert_eq!(controller.questions(), [FALLBACK_PRESET_QUESTION.to_string()]);
        assert_ne!(FALLBACK_PRESET_QUESTION, INITIAL_PRESET_QUESTION);
        assert_eq!(controller.current_view().status, ViewStatus::Error);
    }

    #[test]
    fn test_empty_answer_still_leaves_an_option() {
        let mut controller = PresetController::new();
        let (ticket, _) = controller.begin(&UserPreferences::default()).unwrap();
        controller.complete(
            ticket,
            Ok(PresetQuestionsResponse {
                queries: vec!["   ".into()],
            }),
        );
        assert_eq!(controller.questions(), [FALLBACK_PRESET_QUESTION.to_string()]);
    }

    #[test]
    fn test_late_failure_does_not_clobber_newer_success() {
        let mut controller = PresetController::new();
        let (first, _) = controller.begin(&UserPreferences::default()).unwrap();
        let (second, _) = controller.begin(&UserPreferences::default().with_country("Peru")).unwrap();

        controller.complete(
            second,
            Ok(PresetQuestionsResponse {
                queries: vec!["Can I bring family from Peru?".into()],
            }),
        );
        assert!(!controller.complete(first, Err(ApiError::Transport("timeout".into()))));
        assert_eq!(controller.questions(), ["Can I bring family from Peru?".to_string()]);
        assert_eq!(controller.current_view().status, ViewStatus::Success);
    }
}
