//! Inventory backend adapter

mod client;

pub use client::HttpCatalogClient;
