//! Pure derivations from fetched items plus preferences or search input.

pub mod events;
pub mod faqs;

pub use events::{event_categories, filter_events_by_category, filter_events_for_preferences};
pub use faqs::{faq_categories, filter_faqs};
