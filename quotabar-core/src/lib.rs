// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `Quotabar` Core
//!
//! Core types, models, and errors for the `Quotabar` balance plugins.
//!
//! This crate provides the foundational abstractions used across the other
//! `Quotabar` crates, including:
//!
//! - The normalized balance contract every plugin produces
//! - Plugin metadata and configuration types
//! - The shared error taxonomy
//!
//! ## Key Types
//!
//! ### Balance Contract
//! - [`BalanceReport`] - Normalized result of one balance query
//! - [`LimitEntry`] - One quota/subscription line item
//! - [`DataType`] - Semantic category tag (`balance`)
//! - [`LimitStatus`] - Per-entry health flag
//!
//! ### Plugin Types
//! - [`PluginMetadata`] - Static descriptor consumed by the host
//! - [`PluginConfig`] - Host-supplied configuration object
//! - [`ConfigCheck`] - Result of a pre-flight configuration check
//!
//! ### Errors
//! - [`PluginError`] - Shared error taxonomy for all plugins

pub mod config;
pub mod error;
pub mod models;

// Re-export error types
pub use error::PluginError;

// Re-export configuration types
pub use config::PluginConfig;

// Re-export all model types
pub use models::{
    // Balance contract
    BalanceReport,
    DataType,
    LimitEntry,
    LimitStatus,
    // Plugin types
    ConfigCheck,
    PluginMetadata,
    PluginType,
};
