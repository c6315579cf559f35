//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod catalog;
pub mod llm_gateway;
pub mod session_store;
pub mod tool_executor;
