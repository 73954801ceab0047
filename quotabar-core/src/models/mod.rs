//! Domain models for `Quotabar`.
//!
//! This module contains the data structures shared by every balance plugin:
//! the normalized output contract and the plugin descriptor types.
//!
//! ## Submodules
//!
//! - [`balance`] - Normalized output contract (`BalanceReport`, `LimitEntry`)
//! - [`plugin`] - Plugin descriptor types (`PluginMetadata`, `ConfigCheck`)

mod balance;
mod plugin;

// Re-export everything at the models level
pub use balance::{BalanceReport, DataType, LimitEntry, LimitStatus};
pub use plugin::{ConfigCheck, PluginMetadata, PluginType};
