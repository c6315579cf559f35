//! Application-level configuration.
//!
//! - [`RelayParams`]: conversation window, tool loop bound, history retention

pub mod relay_params;

pub use relay_params::RelayParams;
