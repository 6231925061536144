use tracing::debug;

use crate::models::{ChangedFields, UserPreferences};

/// Change notification delivered to subscribers on every effective `set`.
#[derive(Debug, Clone)]
pub struct PreferenceChange {
    pub previous: UserPreferences,
    pub current: UserPreferences,
    pub changed: ChangedFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&PreferenceChange)>;

/// Canonical, in-memory record of the user's preferences.
///
/// Every panel controller subscribes here. `set` replaces the whole record
/// and notifies subscribers synchronously, in subscription order.
pub struct PreferenceStore {
    current: UserPreferences,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl PreferenceStore {
    pub fn new(initial: UserPreferences) -> Self {
        Self {
            current: initial,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn get(&self) -> &UserPreferences {
        &self.current
    }

    /// Replace the whole record. Setting an identical record is a no-op.
    pub fn set(&mut self, next: UserPreferences) {
        let changed = self.current.changed_fields(&next);
        if changed.is_empty() {
            return;
        }

        let previous = std::mem::replace(&mut self.current, next);
        let change = PreferenceChange {
            previous,
            current: self.current.clone(),
            changed,
        };

        debug!(
            changed = ?change.changed,
            subscribers = self.subscribers.len(),
            "Preferences updated"
        );

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&change);
        }
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&PreferenceChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new(UserPreferences::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PreferenceField;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_replaces_whole_record() {
        let mut store = PreferenceStore::default();
        let next = UserPreferences::default()
            .with_visa_status("Work Visa")
            .with_state("Texas");
        store.set(next.clone());
        assert_eq!(store.get(), &next);

        store.set(UserPreferences::default().with_state("Ohio"));
        assert!(store.get().visa_status.is_empty());
        assert_eq!(store.get().state, "Ohio");
    }

    #[test]
    fn test_subscribers_notified_in_order() {
        let mut store = PreferenceStore::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = seen.clone();
        store.subscribe(move |change| {
            first.borrow_mut().push(("first", change.current.state.clone()));
        });
        let second = seen.clone();
        store.subscribe(move |change| {
            second.borrow_mut().push(("second", change.current.state.clone()));
        });

        store.set(UserPreferences::default().with_state("Texas"));

        assert_eq!(
            *seen.borrow(),
            vec![("first", "Texas".to_string()), ("second", "Texas".to_string())]
        );
    }

    #[test]
    fn test_change_carries_previous_and_fields() {
        let mut store = PreferenceStore::new(UserPreferences::default().with_language("English"));
        let captured = Rc::new(RefCell::new(None));
        let sink = captured.clone();
        store.subscribe(move |change| {
            *sink.borrow_mut() = Some(change.clone());
        });

        store.set(store.get().with_language("Spanish"));

        let change = captured.borrow().clone().unwrap();
        assert_eq!(change.previous.language_preference, "English");
        assert_eq!(change.current.language_preference, "Spanish");
        assert!(change.changed.contains(PreferenceField::LanguagePreference));
        assert!(!change.changed.contains(PreferenceField::State));
    }

    #[test]
    fn test_identical_set_does_not_notify() {
        let mut store = PreferenceStore::default();
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.set(UserPreferences::default());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = PreferenceStore::default();
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        assert_eq!(store.subscriber_count(), 0);

        store.set(UserPreferences::default().with_state("Texas"));
        assert_eq!(*count.borrow(), 0);
    }
}
