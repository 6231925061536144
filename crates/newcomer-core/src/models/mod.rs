pub mod community;
pub mod event;
pub mod faq;
pub mod message;
pub mod preferences;

pub use community::{Answer, Question, UserVote, VoteDirection, VoteTally};
pub use event::{regional_catalog, sample_catalog, Event};
pub use faq::{assign_missing_ids, faq_status_line, FaqItem};
pub use message::{ChatRequestOutcome, Delivery, Message, MessageIdGenerator, Sender};
pub use preferences::{ChangedFields, PreferenceField, UserPreferences};
