//! Configuration persistence for travel-planner settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::GeoPoint;
use crate::storage::file::APP_DIR;
use crate::store::{DEFAULT_KEY, EditPolicy};

const CONFIG_FILE: &str = "config.json";

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Key the pin collection is stored under
    pub storage_key: String,
    /// Where pins are stored (None = platform data directory)
    pub data_dir: Option<PathBuf>,
    /// Initial map center
    pub map_center: GeoPoint,
    /// Initial map zoom level
    pub map_zoom: u8,
    /// Tile source URL template
    pub tile_url: String,
    /// Attribution shown with the tiles
    pub tile_attribution: String,
    /// Reject pins outside the valid latitude/longitude range
    pub enforce_coordinate_range: bool,
    /// Accept negative costs (refunds, credits)
    pub allow_negative_cost: bool,
    /// Symbol printed in front of costs
    pub currency_symbol: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_KEY.to_string(),
            data_dir: None,
            // Central London
            map_center: GeoPoint::new(51.505, -0.09),
            map_zoom: 13,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "© OpenStreetMap contributors".to_string(),
            enforce_coordinate_range: true,
            allow_negative_cost: false,
            currency_symbol: "$".to_string(),
        }
    }
}

impl PlannerConfig {
    /// Default config file location, e.g. `~/.config/travel-planner/config.json`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("Error loading config, using defaults: {err:#}");
                Self::default()
            }
        }
    }

    /// Read a config file; `None` when it does not exist
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(Some(config))
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("No config directory available, settings not saved");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {err:#}");
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validation rules for the marker store
    pub fn edit_policy(&self) -> EditPolicy {
        EditPolicy {
            enforce_coordinate_range: self.enforce_coordinate_range,
            allow_negative_cost: self.allow_negative_cost,
        }
    }

    /// Format a cost with the configured currency symbol
    pub fn format_cost(&self, cost: f64) -> String {
        if cost < 0.0 {
            format!("-{}{:.2}", self.currency_symbol, -cost)
        } else {
            format!("{}{:.2}", self.currency_symbol, cost)
        }
    }
}
