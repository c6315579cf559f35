//! Catalog domain.
//!
//! - [`entities::Product`]: a product record as served by the inventory backend
//! - [`format`]: rendering of product lists into the text the assistant reads

pub mod entities;
pub mod format;
