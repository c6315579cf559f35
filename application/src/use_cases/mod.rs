pub mod relay;
pub mod run_agent;
