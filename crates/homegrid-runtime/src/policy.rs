#![forbid(unsafe_code)]

//! Policy-as-data timing configuration.
//!
//! Captures every timer duration the engine schedules as a single
//! [`EnginePolicy`] that can be loaded from TOML at startup, removing the
//! need for compile-time constant changes.
//!
//! # Loading
//!
//! ```toml
//! # homegrid-policy.toml
//! [timing]
//! morph_ms = 450
//! mail_close_ms = 350
//! ```
//!
//! ```rust,ignore
//! let policy = EnginePolicy::from_toml_file("homegrid-policy.toml")?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the shipped animation timings, so
//! `EnginePolicy::default()` reproduces the reference behavior exactly.

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

/// Timer durations for every chained sequence, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct TimingPolicy {
    /// One animation frame: the paint-then-transition delay.
    pub frame_ms: u64,
    /// The main geometry morph (expand and collapse).
    pub morph_ms: u64,
    /// Blackout cover before the app view swaps in.
    pub blackout_cover_ms: u64,
    /// Blackout reveal after the app view swapped.
    pub blackout_reveal_ms: u64,
    /// Mail panel slide-out before unmounting.
    pub mail_close_ms: u64,
    /// Delay after mail reveal before content may take focus.
    pub mail_settle_ms: u64,
    /// Boot: disclaimer text fade.
    pub boot_text_fade_ms: u64,
    /// Boot: black hold between fades.
    pub boot_wait_ms: u64,
    /// Boot: overlay fade revealing the menu.
    pub boot_overlay_fade_ms: u64,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            morph_ms: 600,
            blackout_cover_ms: 1000,
            blackout_reveal_ms: 300,
            mail_close_ms: 500,
            mail_settle_ms: 600,
            boot_text_fade_ms: 1000,
            boot_wait_ms: 200,
            boot_overlay_fade_ms: 1500,
        }
    }
}

impl TimingPolicy {
    #[must_use]
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    #[must_use]
    pub fn morph(&self) -> Duration {
        Duration::from_millis(self.morph_ms)
    }

    #[must_use]
    pub fn blackout_cover(&self) -> Duration {
        Duration::from_millis(self.blackout_cover_ms)
    }

    #[must_use]
    pub fn blackout_reveal(&self) -> Duration {
        Duration::from_millis(self.blackout_reveal_ms)
    }

    #[must_use]
    pub fn mail_close(&self) -> Duration {
        Duration::from_millis(self.mail_close_ms)
    }

    #[must_use]
    pub fn mail_settle(&self) -> Duration {
        Duration::from_millis(self.mail_settle_ms)
    }

    #[must_use]
    pub fn boot_text_fade(&self) -> Duration {
        Duration::from_millis(self.boot_text_fade_ms)
    }

    #[must_use]
    pub fn boot_wait(&self) -> Duration {
        Duration::from_millis(self.boot_wait_ms)
    }

    #[must_use]
    pub fn boot_overlay_fade(&self) -> Duration {
        Duration::from_millis(self.boot_overlay_fade_ms)
    }
}

/// Top-level engine policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct EnginePolicy {
    /// Timer durations for every chained sequence.
    pub timing: TimingPolicy,
}

#[cfg(feature = "policy-config")]
impl EnginePolicy {
    /// Parse a policy from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyError> {
        toml::from_str(s).map_err(PolicyError::from)
    }

    /// Load a policy from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Serialize the policy to TOML.
    pub fn to_toml_string(&self) -> Result<String, PolicyError> {
        toml::to_string_pretty(self).map_err(PolicyError::from)
    }
}

/// Errors that can occur when loading an engine policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "policy-config")]
    #[error("failed to parse policy TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "policy-config")]
    #[error("failed to serialize policy TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),
}
