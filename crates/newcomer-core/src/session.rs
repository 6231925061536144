//! One user's session: the preference store, the panel controllers it
//! drives, and the community board.
//!
//! Everything here is single-threaded. Fetches are spawned with
//! `tokio::task::spawn_local`, so the methods that can issue requests must
//! run inside a `LocalSet`.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::api::AssistantApi;
use crate::community::CommunityBoard;
use crate::controllers::{
    trigger, ChatController, EventsController, FaqController, PanelController, PresetController,
};
use crate::models::UserPreferences;
use crate::store::{PreferenceStore, SubscriptionId};

pub struct AssistantSession {
    api: Rc<dyn AssistantApi>,
    store: PreferenceStore,
    chat: Rc<RefCell<ChatController>>,
    faqs: Rc<RefCell<FaqController>>,
    presets: Rc<RefCell<PresetController>>,
    events: Rc<RefCell<EventsController>>,
    community: CommunityBoard,
}

fn subscribe_panel<C: PanelController>(
    store: &mut PreferenceStore,
    controller: &Rc<RefCell<C>>,
    api: &Rc<dyn AssistantApi>,
) -> SubscriptionId {
    let controller = controller.clone();
    let api = api.clone();
    store.subscribe(move |change| {
        if controller.borrow().wants_refresh(change) {
            trigger(&controller, &api, &change.current);
        }
    })
}

impl AssistantSession {
    pub fn new(api: Rc<dyn AssistantApi>, initial: UserPreferences) -> Self {
        let mut store = PreferenceStore::new(initial);
        let faqs = Rc::new(RefCell::new(FaqController::new()));
        let presets = Rc::new(RefCell::new(PresetController::new()));
        let events = Rc::new(RefCell::new(EventsController::new()));

        subscribe_panel(&mut store, &faqs, &api);
        subscribe_panel(&mut store, &presets, &api);
        subscribe_panel(&mut store, &events, &api);

        Self {
            api,
            store,
            chat: Rc::new(RefCell::new(ChatController::new())),
            faqs,
            presets,
            events,
            community: CommunityBoard::with_seed_questions(),
        }
    }

    /// Initial fetch for every preference-driven panel.
    /// Returns the handles of the requests actually issued.
    pub fn start(&self) -> Vec<JoinHandle<bool>> {
        info!("Starting assistant session");
        [
            self.retry_faqs(),
            self.retry_presets(),
            self.retry_events(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn preferences(&self) -> &UserPreferences {
        self.store.get()
    }

    /// Replace the preferences; interested panels refetch
    pub fn set_preferences(&mut self, next: UserPreferences) {
        self.store.set(next);
    }

    pub fn update_preferences(&mut self, update: impl FnOnce(UserPreferences) -> UserPreferences) {
        let next = update(self.store.get().clone());
        self.store.set(next);
    }

    /// Send a chat message with the current preferences.
    /// None when the text is blank or a send is already outstanding.
    pub fn send_chat(&self, text: &str) -> Option<JoinHandle<bool>> {
        ChatController::send(&self.chat, &self.api, text, self.store.get())
    }

    /// Send whatever is in the chat input buffer
    pub fn send_chat_input(&self) -> Option<JoinHandle<bool>> {
        ChatController::send_input(&self.chat, &self.api, self.store.get())
    }

    /// Resend the most recent failed chat message
    pub fn retry_chat(&self) -> Option<JoinHandle<bool>> {
        let text = self.chat.borrow().transcript().last_failed()?.text.clone();
        self.send_chat(&text)
    }

    pub fn retry_faqs(&self) -> Option<JoinHandle<bool>> {
        trigger(&self.faqs, &self.api, self.store.get())
    }

    pub fn retry_presets(&self) -> Option<JoinHandle<bool>> {
        trigger(&self.presets, &self.api, self.store.get())
    }

    pub fn retry_events(&self) -> Option<JoinHandle<bool>> {
        trigger(&self.events, &self.api, self.store.get())
    }

    pub fn chat(&self) -> Ref<'_, ChatController> {
        self.chat.borrow()
    }

    pub fn chat_mut(&self) -> RefMut<'_, ChatController> {
        self.chat.borrow_mut()
    }

    pub fn faqs(&self) -> Ref<'_, FaqController> {
        self.faqs.borrow()
    }

    pub fn faqs_mut(&self) -> RefMut<'_, FaqController> {
        self.faqs.borrow_mut()
    }

    pub fn presets(&self) -> Ref<'_, PresetController> {
        self.presets.borrow()
    }

    pub fn events(&self) -> Ref<'_, EventsController> {
        self.events.borrow()
    }

    pub fn events_mut(&self) -> RefMut<'_, EventsController> {
        self.events.borrow_mut()
    }

    pub fn community(&self) -> &CommunityBoard {
        &self.community
    }

    pub fn community_mut(&mut self) -> &mut CommunityBoard {
        &mut self.community
    }
}
