use anyhow::{Context, Result};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::types::*;
use super::{ApiError, AssistantApi};
use crate::config::CoreConfig;
use crate::constants::routes;

/// HTTP client for the answer-and-content backend
pub struct HttpAssistantClient {
    config: CoreConfig,
    client: reqwest::Client,
}

impl HttpAssistantClient {
    pub fn new(config: CoreConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { config, client })
    }

    async fn post<Req, Resp>(&self, route: &str, body: &Req) -> Result<Resp, ApiError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = self.config.endpoint(route);
        debug!(%url, "Sending backend request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(%url, %status, "Backend returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl AssistantApi for HttpAssistantClient {
    fn answer_question(
        &self,
        request: ChatRequest,
    ) -> LocalBoxFuture<'_, Result<ChatResponse, ApiError>> {
        async move { self.post(routes::CHAT, &request).await }.boxed_local()
    }

    fn get_faqs(&self, request: FaqRequest) -> LocalBoxFuture<'_, Result<FaqResponse, ApiError>> {
        async move { self.post(routes::FAQS, &request).await }.boxed_local()
    }

    fn get_preset_questions(
        &self,
        request: PersonalizedRequest,
    ) -> LocalBoxFuture<'_, Result<PresetQuestionsResponse, ApiError>> {
        async move { self.post(routes::PRESET_QUESTIONS, &request).await }.boxed_local()
    }

    fn get_recommendations(
        &self,
        request: PersonalizedRequest,
    ) -> LocalBoxFuture<'_, Result<RecommendationsResponse, ApiError>> {
        async move { self.post(routes::RECOMMENDATIONS, &request).await }.boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserPreferences;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpAssistantClient {
        HttpAssistantClient::new(CoreConfig::new(server.uri())).unwrap()
    }

    fn preferences() -> UserPreferences {
        UserPreferences::default()
            .with_visa_status("Work Visa")
            .with_language("English")
    }

    #[tokio::test]
    async fn test_answer_question_posts_chat_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_partial_json(serde_json::json!({
                "status": "Work Visa",
                "language_preferance": "English",
                "question": "Can I change employers?"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"answer": "Yes, with a transfer petition."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client
            .answer_question(ChatRequest::new(&preferences(), "Can I change employers?"))
            .await
            .unwrap();
        assert_eq!(response.answer, "Yes, with a transfer petition.");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/faqs"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get_faqs(FaqRequest::new(&preferences())).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 503,
                body: "overloaded".into()
            }
        );
        assert_eq!(err.to_string(), "HTTP error! status: 503");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/personalized-queries"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .get_preset_questions(PersonalizedRequest::new(&preferences()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Nothing listens on port 9 (discard) on test machines
        let client = HttpAssistantClient::new(CoreConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client
            .get_recommendations(PersonalizedRequest::new(&preferences()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
