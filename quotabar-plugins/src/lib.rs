// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `Quotabar` Plugins
//!
//! Balance plugin implementations for the `Quotabar` host.
//!
//! Each plugin adapts one third-party billing/quota API into the shared
//! normalized contract from `quotabar-core`. Plugins are independent: they
//! share only the output shape and the [`BalancePlugin`] interface, not a
//! client abstraction. Each plugin module includes:
//!
//! - **`api`**: Wire types and the HTTP call against the fixed upstream URL
//! - **`parser`**: Pure normalization (filter, classify, map, aggregate)
//! - **Plugin type**: The [`BalancePlugin`] implementation and its metadata
//!
//! ## Plugins (4 total)
//!
//! | Plugin | Upstream | Balance semantics |
//! |--------|----------|-------------------|
//! | `88code-balance` | 88Code subscriptions | Summed remaining credits |
//! | `antigravity` | Cloud Code model quotas | Mean remaining fraction × 100 |
//! | `right-code` | Right.codes subscriptions | Count of valid subscriptions |
//! | `zhipu-balance` | Zhipu quota limits | Constant 0 (no aggregate) |
//!
//! `balance` values are NOT comparable across plugins.
//!
//! ## Usage
//!
//! ```ignore
//! use quotabar_plugins::{PluginContext, PluginRegistry};
//!
//! let plugin = PluginRegistry::get("zhipu-balance").unwrap();
//! let ctx = PluginContext::new();
//! let report = plugin.fetch_data(&config, &ctx).await?;
//! ```

pub mod context;
pub mod plugin;
pub mod registry;

mod util;

// Plugin modules (alphabetical)
pub mod antigravity;
pub mod code88;
pub mod rightcodes;
pub mod zhipu;

// Re-export key types
pub use context::{LogLevel, PluginContext};
pub use plugin::BalancePlugin;
pub use registry::PluginRegistry;

// Re-export plugin types
pub use antigravity::AntigravityPlugin;
pub use code88::Code88Plugin;
pub use rightcodes::RightCodesPlugin;
pub use zhipu::ZhipuPlugin;
