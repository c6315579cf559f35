//! WebSocket chat endpoint.
//!
//! Every connection is its own session. Frames are `{"message": "..."}` in
//! both directions. The reader loop runs in the connection's task; replies
//! go through the registry to a writer task that owns the socket sink.

use super::state::AppState;
use axum::{
    extract::{
        State,
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{FutureExt, Sink, SinkExt, Stream, StreamExt};
use serde_json::{Value, json};
use std::fmt::Display;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Reply to a frame that is not a JSON object with a string `message`.
pub const INVALID_FORMAT_MESSAGE: &str =
    "Formato de mensaje inválido. Por favor envía un objeto JSON con un campo 'message'.";

pub async fn ws_chat(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket: WebSocket| async move {
        let (sink, stream) = socket.split();
        serve_connection(state, sink, stream).await;
    })
}

/// Drive one connection until the client closes it or the transport fails.
pub async fn serve_connection<S, R, E>(state: AppState, sink: S, mut stream: R)
where
    S: Sink<WsMessage> + Unpin + Send + 'static,
    S::Error: Display,
    R: Stream<Item = Result<WsMessage, E>> + Unpin,
    E: Display,
{
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    let session_id = state.connections.connect(tx);
    let writer = tokio::spawn(write_frames(sink, rx));

    while let Some(frame) = stream.next().await {
        let text = match frame {
            Ok(WsMessage::Text(text)) => text,
            Ok(WsMessage::Binary(_)) => {
                state
                    .connections
                    .send_to(&session_id, notice(INVALID_FORMAT_MESSAGE));
                continue;
            }
            Ok(WsMessage::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "WebSocket receive failed");
                break;
            }
        };

        let Some(message) = parse_frame(text.as_str()) else {
            debug!(session_id = %session_id, "Invalid frame");
            state
                .connections
                .send_to(&session_id, notice(INVALID_FORMAT_MESSAGE));
            continue;
        };

        let relay = state.relay.clone();
        let handled = AssertUnwindSafe(relay.handle_message(&session_id, &message))
            .catch_unwind()
            .await;
        match handled {
            Ok(reply) => {
                state.connections.send_to(&session_id, notice(&reply));
            }
            Err(_) => {
                error!(session_id = %session_id, "Relay panicked, closing connection");
                break;
            }
        }
    }

    state.connections.disconnect(&session_id);
    // The writer exits once every sender for this connection is gone.
    if let Err(e) = writer.await {
        warn!(session_id = %session_id, error = %e, "WebSocket writer task failed");
    }
}

async fn write_frames<S>(mut sink: S, mut rx: mpsc::UnboundedReceiver<String>)
where
    S: Sink<WsMessage> + Unpin,
    S::Error: Display,
{
    while let Some(text) = rx.recv().await {
        if let Err(e) = sink.send(WsMessage::Text(text.into())).await {
            warn!(error = %e, "WebSocket send failed");
            break;
        }
    }
    let _ = sink.close().await;
}

/// `{"message": "..."}` → the message; a missing field is an empty message.
fn parse_frame(text: &str) -> Option<String> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(map) => match map.get("message") {
            None => Some(String::new()),
            Some(Value::String(message)) => Some(message.clone()),
            Some(_) => None,
        },
        _ => None,
    }
}

fn notice(message: &str) -> String {
    json!({ "message": message }).to_string()
}
