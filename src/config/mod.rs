//! Configuration module for the storefront service
//!
//! This module contains the application settings and path management.

mod app_config;
mod paths;

pub use app_config::AppConfig;
pub use paths::Paths;
