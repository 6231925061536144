pub mod api;
pub mod community;
pub mod config;
pub mod constants;
pub mod controllers;
pub mod filters;
pub mod models;
pub mod search;
pub mod session;
pub mod store;
pub mod tracing_setup;
pub mod transcript;

// Re-export the session surface at crate root for convenience
pub use api::{ApiError, AssistantApi, HttpAssistantClient};
pub use config::CoreConfig;
pub use session::AssistantSession;
