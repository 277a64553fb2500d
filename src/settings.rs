//! Game settings
//!
//! Field size, spawn cadence and cursor behaviour. Everything has a default
//! matching the classic game; a JSON file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Field;

/// How the cursor reacts to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CursorPolicy {
    /// Jump straight to the pointer
    #[default]
    Snap,
    /// Close half the gap every tick
    Smooth,
}

impl CursorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorPolicy::Snap => "snap",
            CursorPolicy::Smooth => "smooth",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "snap" | "instant" => Some(CursorPolicy::Snap),
            "smooth" | "lerp" => Some(CursorPolicy::Smooth),
            _ => None,
        }
    }
}

/// Settings could not be loaded
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("field {width}x{height} is too small to hold a target")]
    FieldTooSmall { width: f32, height: f32 },
    #[error("spawn interval for {0} targets must be non-zero")]
    ZeroInterval(&'static str),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play field width
    pub field_width: f32,
    /// Play field height
    pub field_height: f32,
    /// Milliseconds between safe target spawns
    pub safe_spawn_ms: u32,
    /// Milliseconds between hazard spawns
    pub hazard_spawn_ms: u32,
    pub cursor_policy: CursorPolicy,
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            safe_spawn_ms: SAFE_SPAWN_INTERVAL_MS,
            hazard_spawn_ms: HAZARD_SPAWN_INTERVAL_MS,
            cursor_policy: CursorPolicy::default(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn field(&self) -> Field {
        Field {
            width: self.field_width,
            height: self.field_height,
        }
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The cursor must fit inside the field and timers must tick
    pub fn validate(&self) -> Result<(), SettingsError> {
        let min = 2.0 * SAFE_RADIUS;
        // Written so NaN fails too
        if !(self.field_width >= min && self.field_height >= min) {
            return Err(SettingsError::FieldTooSmall {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.safe_spawn_ms == 0 {
            return Err(SettingsError::ZeroInterval("safe"));
        }
        if self.hazard_spawn_ms == 0 {
            return Err(SettingsError::ZeroInterval("hazard"));
        }
        Ok(())
    }
}
