//! Plugin registry.
//!
//! The registry provides static access to all plugin instances and is the
//! central point for looking them up by id.

use std::sync::OnceLock;

use crate::antigravity::AntigravityPlugin;
use crate::code88::Code88Plugin;
use crate::plugin::BalancePlugin;
use crate::rightcodes::RightCodesPlugin;
use crate::zhipu::ZhipuPlugin;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all plugin instances.
static PLUGINS: OnceLock<Vec<Box<dyn BalancePlugin>>> = OnceLock::new();

/// Instantiates all plugins in their display order.
fn init_plugins() -> Vec<Box<dyn BalancePlugin>> {
    vec![
        Box::new(Code88Plugin::new()),
        Box::new(AntigravityPlugin::new()),
        Box::new(RightCodesPlugin::new()),
        Box::new(ZhipuPlugin::new()),
    ]
}

// ============================================================================
// Plugin Registry
// ============================================================================

/// Global registry of all balance plugins.
///
/// Plugins are stateless, so one shared instance per plugin serves
/// concurrent invocations.
pub struct PluginRegistry;

impl PluginRegistry {
    /// Returns all plugins.
    pub fn all() -> &'static [Box<dyn BalancePlugin>] {
        PLUGINS.get_or_init(init_plugins)
    }

    /// Gets a plugin by its metadata id.
    pub fn get(id: &str) -> Option<&'static dyn BalancePlugin> {
        Self::all()
            .iter()
            .find(|plugin| plugin.metadata().id == id)
            .map(Box::as_ref)
    }

    /// Returns all plugin ids in registry order.
    pub fn ids() -> Vec<&'static str> {
        Self::all()
            .iter()
            .map(|plugin| plugin.metadata().id.as_str())
            .collect()
    }

    /// Returns the number of registered plugins.
    pub fn count() -> usize {
        Self::all().len()
    }
}

// ============================================================================
// Tests
// ============================================================================
