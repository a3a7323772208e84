//! Thin HTTP client for the OpenAI API

use super::error::{OpenAiError, Result};
use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CreateMessageRequest,
    CreateRunRequest, MessageList, Run, Thread, ThreadMessage,
};
use duel_domain::Message;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the assistant-thread and chat-completion endpoints
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn assistants(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", "assistants=v2")
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        debug!("OpenAI HTTP status: {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Create an empty conversation thread
    pub async fn create_thread(&self) -> Result<Thread> {
        let request = self.assistants(self.http.post(self.url("threads")));
        let response = request.json(&serde_json::json!({})).send().await?;
        Self::decode(response).await
    }

    /// Append a user message to a thread
    pub async fn add_user_message(&self, thread_id: &str, content: &str) -> Result<()> {
        let url = self.url(&format!("threads/{}/messages", thread_id));
        let body = CreateMessageRequest {
            role: "user",
            content,
        };
        let response = self.assistants(self.http.post(url)).json(&body).send().await?;
        Self::decode::<serde_json::Value>(response).await.map(|_| ())
    }

    /// Start a run of `assistant_id` on a thread
    pub async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        let url = self.url(&format!("threads/{}/runs", thread_id));
        let body = CreateRunRequest { assistant_id };
        let response = self.assistants(self.http.post(url)).json(&body).send().await?;
        Self::decode(response).await
    }

    pub async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let url = self.url(&format!("threads/{}/runs/{}", thread_id, run_id));
        let response = self.assistants(self.http.get(url)).send().await?;
        Self::decode(response).await
    }

    /// Ask the service to stop an active run
    pub async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let url = self.url(&format!("threads/{}/runs/{}/cancel", thread_id, run_id));
        let response = self.assistants(self.http.post(url)).send().await?;
        Self::decode(response).await
    }

    /// Newest message on a thread
    pub async fn latest_message(&self, thread_id: &str) -> Result<ThreadMessage> {
        let url = self.url(&format!("threads/{}/messages", thread_id));
        let response = self
            .assistants(self.http.get(url))
            .query(&[("order", "desc"), ("limit", "1")])
            .send()
            .await?;
        let list: MessageList = Self::decode(response).await?;
        list.data
            .into_iter()
            .next()
            .ok_or_else(|| OpenAiError::UnexpectedResponse("thread has no messages".to_string()))
    }

    /// One chat completion; returns the first choice's content
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: &[Message],
        temperature: Option<f32>,
    ) -> Result<Option<String>> {
        let body = ChatCompletionRequest {
            model,
            messages: messages.iter().map(ChatMessage::from).collect(),
            temperature,
        };
        debug!(model, messages = messages.len(), "Chat completion request");
        let response = self
            .http
            .post(self.url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let completion: ChatCompletionResponse = Self::decode(response).await?;
        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_base_url_trailing_slash() {
        let client = OpenAiClient::new("sk-test").with_base_url("http://localhost:9/v1/");
        assert_eq!(client.url("threads"), "http://localhost:9/v1/threads");
    }

    #[tokio::test]
    async fn test_create_thread_sends_auth_and_beta_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/threads"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("openai-beta", "assistants=v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "thread_1", "object": "thread"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test").with_base_url(server.uri());
        let thread = client.create_thread().await.unwrap();
        assert_eq!(thread.id, "thread_1");
    }

    #[tokio::test]
    async fn test_latest_message_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/messages"))
            .and(query_param("order", "desc"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"role": "assistant", "content": [
                    {"type": "text", "text": {"value": "Yes.", "annotations": []}}
                ]}]
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test").with_base_url(server.uri());
        let message = client.latest_message("thread_1").await.unwrap();
        assert_eq!(message.text().as_deref(), Some("Yes."));
    }

    #[tokio::test]
    async fn test_chat_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "temperature": 0.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"A\":3,\"B\":1}"}}]
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test").with_base_url(server.uri());
        let content = client
            .chat_completion("gpt-4o-mini", &[Message::user("hi")], Some(0.0))
            .await
            .unwrap();
        assert_eq!(content.as_deref(), Some("{\"A\":3,\"B\":1}"));
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("bad").with_base_url(server.uri());
        let err = client.create_thread().await.unwrap_err();
        match err {
            OpenAiError::Api { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
