//! HTTP and WebSocket transport
//!
//! ```text
//! POST /chat      ─┐
//! GET  /ws/chat   ─┼─▶ ConversationRelay::handle_message
//! GET  /health, GET /
//! ```

mod connections;
mod cors;
mod routes;
mod state;
mod ws;

#[cfg(test)]
mod test_support;

pub use connections::ConnectionRegistry;
pub use cors::cors_layer;
pub use routes::{HTTP_ERROR_MESSAGE, build_router};
pub use state::AppState;
pub use ws::INVALID_FORMAT_MESSAGE;
