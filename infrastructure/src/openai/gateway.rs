//! OpenAI LLM Gateway implementation

use super::error::{map_http_error, map_transport_error};
use super::protocol::{ChatCompletionRequest, ChatCompletionResponse, to_chat_messages};
use crate::config::FileLlmConfig;
use crate::tools::tools_to_function_schemas;
use aida_application::{CompletionRequest, GatewayError, LlmGateway};
use aida_domain::LlmResponse;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// LLM Gateway for OpenAI-compatible Chat Completions APIs
#[derive(Clone)]
pub struct OpenAiGateway {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f64,
}

impl OpenAiGateway {
    /// Create a gateway for the default API endpoint
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_base: FileLlmConfig::default().api_base,
            model: model.into(),
            temperature: FileLlmConfig::default().temperature,
        })
    }

    /// Build from the `[llm]` config section, reading the key from its env variable
    pub fn from_config(config: &FileLlmConfig) -> Result<Self, GatewayError> {
        let api_key = config.api_key().ok_or_else(|| {
            GatewayError::Unauthorized(format!("{} is not set", config.api_key_env))
        })?;

        let gateway = Self::new(api_key, &config.model, config.timeout())?
            .with_api_base(&config.api_base)
            .with_temperature(config.temperature);

        info!(model = %gateway.model, api_base = %gateway.api_base, "OpenAiGateway initialized");
        Ok(gateway)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<LlmResponse, GatewayError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: to_chat_messages(request.system_prompt, request.messages),
            temperature: self.temperature,
            tools: tools_to_function_schemas(request.tools),
        };

        debug!(
            model = %self.model,
            messages = body.messages.len(),
            tools = body.tools.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        parsed.into_llm_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aida_domain::{AgentMessage, AgentStep, ToolDefinition};
    use axum::{
        Json, Router,
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::post,
    };
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured {
        requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    async fn spawn_api(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    async fn tool_then_text(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let mut requests = captured.requests.lock().unwrap();
        requests.push((auth, body));

        if requests.len() == 1 {
            Json(json!({
                "model": "gpt-3.5-turbo",
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {"name": "getProductList", "arguments": "{}"}
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            }))
        } else {
            Json(json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "We have 3 laptops."},
                    "finish_reason": "stop"
                }]
            }))
        }
    }

    fn gateway(base: &str) -> OpenAiGateway {
        OpenAiGateway::new("sk-test", "gpt-3.5-turbo", Some(Duration::from_secs(5)))
            .unwrap()
            .with_api_base(base)
    }

    #[tokio::test]
    async fn test_request_shape_and_tool_call_parsing() {
        let captured = Captured::default();
        let router = Router::new()
            .route("/v1/chat/completions", post(tool_then_text))
            .with_state(captured.clone());
        let base = spawn_api(router).await;
        let gateway = gateway(&base);

        let tool = ToolDefinition::new("getProductList", "List products");
        let tools = vec![&tool];
        let transcript = vec![AgentMessage::User("How many laptops?".to_string())];

        let response = gateway
            .complete(CompletionRequest {
                system_prompt: "You are AIda",
                messages: &transcript,
                tools: &tools,
            })
            .await
            .unwrap();
        assert!(matches!(response.step(), AgentStep::ToolRequest { .. }));

        let requests = captured.requests.lock().unwrap();
        let (auth, body) = &requests[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are AIda");
        assert_eq!(body["messages"][1]["content"], "How many laptops?");
        assert_eq!(body["tools"][0]["function"]["name"], "getProductList");
    }

    #[tokio::test]
    async fn test_no_tools_field_when_none_offered() {
        let captured = Captured::default();
        let router = Router::new()
            .route("/v1/chat/completions", post(tool_then_text))
            .with_state(captured.clone());
        let base = spawn_api(router).await;

        gateway(&base)
            .complete(CompletionRequest {
                system_prompt: "sys",
                messages: &[],
                tools: &[],
            })
            .await
            .unwrap();

        let requests = captured.requests.lock().unwrap();
        assert!(requests[0].1.get("tools").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "Invalid API key"}})),
                )
            }),
        );
        let base = spawn_api(router).await;

        let err = gateway(&base)
            .complete(CompletionRequest {
                system_prompt: "sys",
                messages: &[],
                tools: &[],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unauthorized(msg) if msg == "Invalid API key"));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = gateway(&format!("http://{}/v1", addr))
            .complete(CompletionRequest {
                system_prompt: "sys",
                messages: &[],
                tools: &[],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ConnectionError(_)));
    }

    #[test]
    fn test_from_config_requires_key() {
        figment::Jail::expect_with(|jail| {
            let config = FileLlmConfig {
                api_key_env: "AIDA_GATEWAY_TEST_KEY".to_string(),
                ..Default::default()
            };
            assert!(matches!(
                OpenAiGateway::from_config(&config),
                Err(GatewayError::Unauthorized(_))
            ));

            jail.set_env("AIDA_GATEWAY_TEST_KEY", "sk-test");
            let gateway = OpenAiGateway::from_config(&config).map_err(|e| e.to_string())?;
            assert_eq!(gateway.model_name(), "gpt-3.5-turbo");
            Ok(())
        });
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = gateway("http://localhost:9999/v1/");
        assert_eq!(gateway.endpoint(), "http://localhost:9999/v1/chat/completions");
    }
}
