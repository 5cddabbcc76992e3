//! FabFierce - storefront catalog service with text and visual product search

pub mod api;
pub mod config;
pub mod core;
pub mod data;
pub mod imaging;
pub mod models;
pub mod stores;
