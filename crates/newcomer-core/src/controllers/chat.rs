use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use tokio::task::JoinHandle;
use tracing::warn;

use super::{spawn_request, PanelView, RequestLifecycle, RequestTicket, RequestTracker, ViewStatus};
use crate::api::{ApiError, AssistantApi, ChatRequest, ChatResponse};
use crate::models::{ChatRequestOutcome, UserPreferences};
use crate::transcript::{ChatTranscript, PendingSend};

/// Chat panel: sends questions with the current preferences and feeds the
/// outcome into the transcript.
#[derive(Debug, Default)]
pub struct ChatController {
    transcript: ChatTranscript,
    tracker: RequestTracker,
    outcome: ChatRequestOutcome,
    history: Vec<ChatResponse>,
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut ChatTranscript {
        &mut self.transcript
    }

    /// Outcome of the most recent send
    pub fn outcome(&self) -> &ChatRequestOutcome {
        &self.outcome
    }

    /// Every answer received this session, oldest first
    pub fn history(&self) -> &[ChatResponse] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Submit controls are disabled while a send is outstanding
    pub fn can_submit(&self) -> bool {
        !self.transcript.is_typing()
    }

    pub fn current_view(&self) -> PanelView<Option<String>> {
        match &self.outcome {
            ChatRequestOutcome::Idle => PanelView::new(None),
            ChatRequestOutcome::Pending => PanelView {
                status: ViewStatus::Loading,
                data: None,
                error_message: None,
            },
            ChatRequestOutcome::Success(answer) => PanelView {
                status: ViewStatus::Success,
                data: Some(answer.clone()),
                error_message: None,
            },
            ChatRequestOutcome::Failure(reason) => PanelView {
                status: ViewStatus::Error,
                data: None,
                error_message: Some(reason.clone()),
            },
        }
    }

    /// Append the user's message and build the request for it.
    /// Blank text, or a submit while sending, yields None.
    pub fn submit(
        &mut self,
        text: &str,
        preferences: &UserPreferences,
    ) -> Option<(RequestTicket, ChatRequest)> {
        let pending = self.transcript.submit(text)?;
        Some(self.issue(pending, preferences))
    }

    /// Submit whatever is in the transcript's input buffer
    pub fn submit_input(&mut self, preferences: &UserPreferences) -> Option<(RequestTicket, ChatRequest)> {
        let pending = self.transcript.submit_input()?;
        Some(self.issue(pending, preferences))
    }

    fn issue(&mut self, pending: PendingSend, preferences: &UserPreferences) -> (RequestTicket, ChatRequest) {
        self.outcome = ChatRequestOutcome::Pending;
        (self.tracker.issue(), ChatRequest::new(preferences, pending.text))
    }

    /// Submit `text` and spawn the send on the current `LocalSet`
    pub fn send(
        controller: &Rc<RefCell<Self>>,
        api: &Rc<dyn AssistantApi>,
        text: &str,
        preferences: &UserPreferences,
    ) -> Option<JoinHandle<bool>> {
        let (ticket, request) = controller.borrow_mut().submit(text, preferences)?;
        Some(spawn_request(controller, api, ticket, request))
    }

    /// Like `send`, taking the text from the input buffer
    pub fn send_input(
        controller: &Rc<RefCell<Self>>,
        api: &Rc<dyn AssistantApi>,
        preferences: &UserPreferences,
    ) -> Option<JoinHandle<bool>> {
        let (ticket, request) = controller.borrow_mut().submit_input(preferences)?;
        Some(spawn_request(controller, api, ticket, request))
    }
}

impl RequestLifecycle for ChatController {
    type Request = ChatRequest;
    type Response = ChatResponse;

    const NAME: &'static str = "chat";

    fn call(api: &dyn AssistantApi, request: ChatRequest) -> LocalBoxFuture<'_, Result<ChatResponse, ApiError>> {
        api.answer_question(request)
    }

    fn complete(&mut self, ticket: RequestTicket, outcome: Result<ChatResponse, ApiError>) -> bool {
        if !self.tracker.is_current(ticket) {
            return false;
        }

        match outcome {
            Ok(response) => {
                self.transcript.resolve_success(&response.answer);
                self.outcome = ChatRequestOutcome::Success(response.answer.clone());
                self.history.push(response);
            }
            Err(err) => {
                warn!("Error sending message: {}", err);
                let reason = err.to_string();
                self.transcript.resolve_failure(&reason);
                self.outcome = ChatRequestOutcome::Failure(reason);
            }
        }
        true
    }
}
