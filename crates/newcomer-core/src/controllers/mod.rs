//! Panel data controllers.
//!
//! Each controller owns one fetch lifecycle. A trigger calls `begin`, which
//! flips the view to loading and issues a sequence-numbered ticket; the
//! collaborator call runs without holding any borrow; `complete` applies the
//! outcome only if the ticket is still the latest one issued.

pub mod chat;
pub mod events;
pub mod faqs;
pub mod presets;

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{ApiError, AssistantApi};
use crate::models::UserPreferences;
use crate::store::PreferenceChange;

pub use chat::ChatController;
pub use events::EventsController;
pub use faqs::FaqController;
pub use presets::PresetController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What a panel renders from: status, current data and an optional message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelView<T> {
    pub status: ViewStatus,
    pub data: T,
    pub error_message: Option<String>,
}

impl<T> PanelView<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: ViewStatus::Idle,
            data,
            error_message: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    fn set_loading(&mut self) {
        self.status = ViewStatus::Loading;
        self.error_message = None;
    }

    fn set_success(&mut self, data: T) {
        self.status = ViewStatus::Success;
        self.data = data;
        self.error_message = None;
    }

    fn set_error(&mut self, data: T, message: String) {
        self.status = ViewStatus::Error;
        self.data = data;
        self.error_message = Some(message);
    }
}

/// Proof that a request was issued; carries its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Monotonic request numbering for one controller.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    /// Supersede outstanding requests without starting a new one
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// One request/response exchange a controller owns: how to call the
/// collaborator and how to apply the outcome.
pub trait RequestLifecycle: 'static {
    type Request: 'static;
    type Response: 'static;

    /// Short name used in logs
    const NAME: &'static str;

    fn call(
        api: &dyn AssistantApi,
        request: Self::Request,
    ) -> LocalBoxFuture<'_, Result<Self::Response, ApiError>>;

    /// Apply an outcome. Returns false when the ticket was stale and the
    /// outcome was discarded.
    fn complete(&mut self, ticket: RequestTicket, outcome: Result<Self::Response, ApiError>) -> bool;
}

/// A controller whose fetch is driven by preference changes.
pub trait PanelController: RequestLifecycle {
    /// Predicate deciding whether a preference change should refetch
    fn wants_refresh(&self, change: &PreferenceChange) -> bool;

    /// Enter loading and issue a ticket, or settle synchronously and
    /// return None when no request is needed.
    fn begin(&mut self, preferences: &UserPreferences) -> Option<(RequestTicket, Self::Request)>;
}

/// Await the collaborator and apply the outcome to the controller.
pub async fn drive<C: RequestLifecycle>(
    controller: Rc<RefCell<C>>,
    api: Rc<dyn AssistantApi>,
    ticket: RequestTicket,
    request: C::Request,
) -> bool {
    let outcome = C::call(api.as_ref(), request).await;
    let applied = controller.borrow_mut().complete(ticket, outcome);
    if !applied {
        debug!(
            controller = C::NAME,
            sequence = ticket.sequence(),
            "Discarded stale result"
        );
    }
    applied
}

/// Spawn the completion of an already issued request on the current
/// `LocalSet`.
pub fn spawn_request<C: RequestLifecycle>(
    controller: &Rc<RefCell<C>>,
    api: &Rc<dyn AssistantApi>,
    ticket: RequestTicket,
    request: C::Request,
) -> JoinHandle<bool> {
    debug!(
        controller = C::NAME,
        sequence = ticket.sequence(),
        "Request issued"
    );
    tokio::task::spawn_local(drive(controller.clone(), api.clone(), ticket, request))
}

/// Begin a request and spawn its completion.
/// Returns None when the controller settled without a request.
pub fn trigger<C: PanelController>(
    controller: &Rc<RefCell<C>>,
    api: &Rc<dyn AssistantApi>,
    preferences: &UserPreferences,
) -> Option<JoinHandle<bool>> {
    let (ticket, request) = controller.borrow_mut().begin(preferences)?;
    Some(spawn_request(controller, api, ticket, request))
}
