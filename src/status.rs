//! Capability module introspection
//!
//! Both capability modules report the same status shape: the fixed set of
//! groups the module type supports, plus the flag values driving it at the
//! moment of the call. The flag part is a copy; mutating the configuration
//! record afterwards does not change an already-returned status.

use std::collections::BTreeMap;

use serde::Serialize;

/// Snapshot of a capability module's registry and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleStatus {
    /// Capability groups the module type supports, regardless of
    /// configuration.
    pub available: &'static [&'static str],
    /// Flag values at the moment of the call.
    pub config: BTreeMap<&'static str, bool>,
}

impl ModuleStatus {
    pub(crate) fn new(
        available: &'static [&'static str],
        flags: Vec<(&'static str, bool)>,
    ) -> Self {
        Self {
            available,
            config: flags.into_iter().collect(),
        }
    }

    /// Whether a group was enabled when the snapshot was taken.
    ///
    /// Useful for branching before a call purely for logging or efficiency;
    /// the operations themselves are always safe to call.
    pub fn enabled(&self, group: &str) -> bool {
        self.config.get(group).copied().unwrap_or(false)
    }
}
