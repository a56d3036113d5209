//! Capability configuration records
//!
//! Each capability module is driven by a record of boolean switches, one per
//! capability group. Records are plain data: any combination of flags is
//! valid, and a flag flipped at runtime takes effect on the next call of
//! every module sharing the record.
//!
//! Unknown group names are rejected at construction time, both through the
//! by-name accessors here and through serde (`deny_unknown_fields`). That is
//! the only error the configuration layer can produce.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Switches for the human-behavior capability groups.
///
/// Defaults to everything disabled; use a preset or enable groups
/// explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Timing jitter between actions
    pub wait: bool,
    /// Pointer-path synthesis and movement
    pub mouse: bool,
    /// Scroll synthesis
    pub scroll: bool,
    /// Keystroke pacing
    pub typing: bool,
    /// Element focus simulation
    pub focus: bool,
}

impl BehaviorConfig {
    /// Capability groups this record recognizes, in registry order.
    pub const GROUPS: &'static [&'static str] = &["wait", "mouse", "scroll", "typing", "focus"];

    /// Timing jitter only.
    pub fn minimal() -> Self {
        Self {
            wait: true,
            mouse: false,
            scroll: false,
            typing: false,
            focus: false,
        }
    }

    /// Timing jitter plus keystroke pacing.
    pub fn basic() -> Self {
        Self {
            wait: true,
            mouse: false,
            scroll: false,
            typing: true,
            focus: false,
        }
    }

    /// Every group enabled.
    pub fn full() -> Self {
        Self {
            wait: true,
            mouse: true,
            scroll: true,
            typing: true,
            focus: true,
        }
    }

    /// Look up a flag by group name.
    pub fn enabled(&self, group: &str) -> Result<bool> {
        match group {
            "wait" => Ok(self.wait),
            "mouse" => Ok(self.mouse),
            "scroll" => Ok(self.scroll),
            "typing" => Ok(self.typing),
            "focus" => Ok(self.focus),
            _ => Err(Error::invalid_configuration(group)),
        }
    }

    /// Set a flag by group name.
    pub fn set(&mut self, group: &str, enabled: bool) -> Result<()> {
        match group {
            "wait" => self.wait = enabled,
            "mouse" => self.mouse = enabled,
            "scroll" => self.scroll = enabled,
            "typing" => self.typing = enabled,
            "focus" => self.focus = enabled,
            _ => return Err(Error::invalid_configuration(group)),
        }
        Ok(())
    }

    /// Current flag values in registry order.
    pub fn flags(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("wait", self.wait),
            ("mouse", self.mouse),
            ("scroll", self.scroll),
            ("typing", self.typing),
            ("focus", self.focus),
        ]
    }
}

/// Switches for the fingerprint capability groups.
///
/// Defaults to everything disabled; use a preset or enable groups
/// explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FingerprintConfig {
    /// User-agent string generation
    pub user_agents: bool,
    /// Screen resolution attributes
    pub screen_sizes: bool,
    /// Timezone name and offset
    pub timezones: bool,
    /// Language preference lists
    pub languages: bool,
    /// WebGL vendor and renderer strings
    pub webgl: bool,
    /// Navigator plugin entries
    pub plugins: bool,
    /// Hardware concurrency and device memory
    pub hardware: bool,
    /// Installed-font lists
    pub fonts: bool,
}

impl FingerprintConfig {
    /// Capability groups this record recognizes, in registry order.
    pub const GROUPS: &'static [&'static str] = &[
        "user_agents",
        "screen_sizes",
        "timezones",
        "languages",
        "webgl",
        "plugins",
        "hardware",
        "fonts",
    ];

    /// User agent and screen size only.
    pub fn minimal() -> Self {
        Self {
            user_agents: true,
            screen_sizes: true,
            timezones: false,
            languages: false,
            webgl: false,
            plugins: false,
            hardware: false,
            fonts: false,
        }
    }

    /// Minimal plus timezone and language.
    pub fn basic() -> Self {
        Self {
            user_agents: true,
            screen_sizes: true,
            timezones: true,
            languages: true,
            webgl: false,
            plugins: false,
            hardware: false,
            fonts: false,
        }
    }

    /// Every group enabled.
    pub fn full() -> Self {
        Self {
            user_agents: true,
            screen_sizes: true,
            timezones: true,
            languages: true,
            webgl: true,
            plugins: true,
            hardware: true,
            fonts: true,
        }
    }

    /// Look up a flag by group name.
    pub fn enabled(&self, group: &str) -> Result<bool> {
        match group {
            "user_agents" => Ok(self.user_agents),
            "screen_sizes" => Ok(self.screen_sizes),
            "timezones" => Ok(self.timezones),
            "languages" => Ok(self.languages),
            "webgl" => Ok(self.webgl),
            "plugins" => Ok(self.plugins),
            "hardware" => Ok(self.hardware),
            "fonts" => Ok(self.fonts),
            _ => Err(Error::invalid_configuration(group)),
        }
    }

    /// Set a flag by group name.
    pub fn set(&mut self, group: &str, enabled: bool) -> Result<()> {
        match group {
            "user_agents" => self.user_agents = enabled,
            "screen_sizes" => self.screen_sizes = enabled,
            "timezones" => self.timezones = enabled,
            "languages" => self.languages = enabled,
            "webgl" => self.webgl = enabled,
            "plugins" => self.plugins = enabled,
            "hardware" => self.hardware = enabled,
            "fonts" => self.fonts = enabled,
            _ => return Err(Error::invalid_configuration(group)),
        }
        Ok(())
    }

    /// Current flag values in registry order.
    pub fn flags(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("user_agents", self.user_agents),
            ("screen_sizes", self.screen_sizes),
            ("timezones", self.timezones),
            ("languages", self.languages),
            ("webgl", self.webgl),
            ("plugins", self.plugins),
            ("hardware", self.hardware),
            ("fonts", self.fonts),
        ]
    }
}

/// Cloneable handle to a configuration record shared between modules.
///
/// All clones refer to the same record. A mutation through any clone is
/// visible to every module on its next call. Flags read separately within
/// one aggregate call are not atomic against a concurrent writer: the call
/// may observe a mix of pre- and post-mutation values.
#[derive(Debug, Default)]
pub struct Shared<C> {
    inner: Arc<RwLock<C>>,
}

impl<C> Clone for Shared<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clone> Shared<C> {
    /// Wrap a record in a shared handle.
    pub fn new(config: C) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Copy of the current record.
    pub fn snapshot(&self) -> C {
        self.read(C::clone)
    }

    /// Read a value out of the record.
    ///
    /// A poisoned lock still yields the stored record: configuration reads
    /// are infallible.
    pub fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Mutate the record in place.
    ///
    /// Takes effect on the next call of every module sharing this handle.
    pub fn update(&self, f: impl FnOnce(&mut C)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}
