//! Physics tuning
//!
//! Every field has a default, so a settings file only needs the values it
//! changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Physics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Broad phase grid cell size; keep it above twice the largest collider radius
    pub cell_size: f64,
    /// Edge length of a map tile
    pub tile_size: f64,
    /// Longest step a single tick may integrate, in seconds
    pub max_delta: f64,
    /// Length used when a ray is tested against a box
    pub ray_length: f64,
    /// Projectile lifetime in milliseconds
    pub projectile_ttl_ms: f64,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            tile_size: TILE_SIZE,
            max_delta: DEFAULT_MAX_DELTA,
            ray_length: RAY_LENGTH,
            projectile_ttl_ms: PROJECTILE_TTL_MS,
        }
    }
}

impl PhysicsSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded physics settings: {:?}", settings);
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::info!("Reading physics settings from {}", path.display());
        Self::from_json(&json)
    }

    /// Check every value is finite and in range
    ///
    /// Sizes and the ray length must be positive; the delta cap and the
    /// projectile lifetime may be zero.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("cell_size", self.cell_size, false),
            ("tile_size", self.tile_size, false),
            ("ray_length", self.ray_length, false),
            ("max_delta", self.max_delta, true),
            ("projectile_ttl_ms", self.projectile_ttl_ms, true),
        ];
        for (field, value, zero_ok) in checks {
            let in_range = if zero_ok { value >= 0.0 } else { value > 0.0 };
            if !value.is_finite() || !in_range {
                return Err(Error::InvalidSetting { field, value });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
