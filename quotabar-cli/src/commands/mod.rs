//! CLI command implementations.

pub mod fetch;
pub mod plugins;
pub mod validate;
