//! Axum router construction and HTTP handlers.

use super::cors::cors_layer;
use super::state::AppState;
use super::ws::ws_chat;
use axum::{
    Json, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::error;

/// Reply on `POST /chat` when handling the message failed outright.
pub const HTTP_ERROR_MESSAGE: &str = "Lo siento, hubo un error al procesar tu mensaje.";

const DEFAULT_SESSION_ID: &str = "default";

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

/// Build the complete router: chat endpoints, health, the browser UI,
/// request tracing and CORS.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/ws/chat", get(ws_chat))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "sessions": state.relay.session_count().await,
        "connections": state.connections.len(),
    }))
}

/// Always answers 200; failures become the apology text.
async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let relay = state.relay.clone();
    let handled = tokio::spawn(async move {
        relay.handle_message(&session_id, &request.message).await
    })
    .await;

    let message = match handled {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "Error in chat endpoint");
            HTTP_ERROR_MESSAGE.to_string()
        }
    };
    Json(ChatResponse { message })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::echo_relay;
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn app() -> (Router, AppState) {
        let state = AppState::new(echo_relay());
        (build_router(state.clone(), &[]), state)
    }

    fn post_chat(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let (app, state) = app();
        let response = app
            .oneshot(post_chat(json!({"message": "hello", "session_id": "abc"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], "echo: hello");

        let history = state.relay.history("abc").await;
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_chat_without_session_uses_default() {
        let (app, state) = app();
        app.oneshot(post_chat(json!({"message": "hi"})))
            .await
            .unwrap();
        assert_eq!(state.relay.history("default").await.len(), 2);
    }

    #[tokio::test]
    async fn test_chat_failure_is_still_200() {
        let (app, _) = app();
        let response = app
            .oneshot(post_chat(json!({"message": "panic"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], HTTP_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, state) = app();
        state.relay.handle_message("s1", "hi").await;

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"], 1);
        assert_eq!(body["connections"], 0);
    }

    #[tokio::test]
    async fn test_index_page() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("AIda"));
        assert!(html.contains("/chat"));
    }
}
