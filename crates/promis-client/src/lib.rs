//! promis-client — HTTP client for the PROMIS Assessment Center API.
//!
//! Wraps the three Assessment Center REST endpoints (form listing, form
//! details, and the stateless adaptive-assessment step) behind a typed
//! client with HTTP Basic auth and configuration loading.

pub mod client;
pub mod config;
pub mod error;

pub use client::{BodyEncoding, PromisClient};
pub use config::{load_config, load_config_from, PromisConfig};
pub use error::ApiError;
