pub mod client;
pub mod types;

use futures::future::LocalBoxFuture;

pub use client::HttpAssistantClient;
pub use types::{
    ChatRequest, ChatResponse, FaqRequest, FaqResponse, PersonalizedRequest,
    PresetQuestionsResponse, RecommendationsResponse, RecommendedEvent,
};

/// Failure of a single backend call. Every variant takes the same failure
/// path in the controllers; the distinction is only for the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// The answer-and-content backend, as the controllers consume it.
///
/// Futures are local (not `Send`): the session drives them on a single
/// thread alongside the state they update.
pub trait AssistantApi {
    fn answer_question(
        &self,
        request: ChatRequest,
    ) -> LocalBoxFuture<'_, Result<ChatResponse, ApiError>>;

    fn get_faqs(&self, request: FaqRequest) -> LocalBoxFuture<'_, Result<FaqResponse, ApiError>>;

    fn get_preset_questions(
        &self,
        request: PersonalizedRequest,
    ) -> LocalBoxFuture<'_, Result<PresetQuestionsResponse, ApiError>>;

    fn get_recommendations(
        &self,
        request: PersonalizedRequest,
    ) -> LocalBoxFuture<'_, Result<RecommendationsResponse, ApiError>>;
}
