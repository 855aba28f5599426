//! # Spawn Configuration
//!
//! Per-category spawn settings and the per-item allow list.
//!
//! The configuration is read at the start of a run and treated as stable for
//! the length of a population pass. Entries in the allow list only exist for
//! items that have been seen in the catalog at least once.

use crate::{SpawnCategory, SpawnError, SpawnResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default configuration values.
pub mod defaults {
    /// Percent chance that a tiny volume receives an upgrade item
    pub const UPGRADE_SPAWN_CHANCE: f32 = 2.5;

    /// Percent chance that a small volume receives a drone item
    pub const DRONE_SPAWN_CHANCE: f32 = 0.95;

    /// Lowest accepted spawn chance
    pub const MIN_SPAWN_CHANCE: f32 = 0.0;

    /// Highest accepted spawn chance
    pub const MAX_SPAWN_CHANCE: f32 = 100.0;

    /// Prefix of the host asset path items are instantiated from
    pub const ITEM_ASSET_PREFIX: &str = "Items/";
}

/// Settings for one spawn category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Whether items of this category spawn at all
    pub enabled: bool,
    /// Percent chance in [0, 100] that an eligible volume gets an item
    pub spawn_chance: f32,
    /// Cheaper items spawn more often when set, otherwise all are equally likely
    pub weight_by_value: bool,
    /// Hide map markers for items of this category
    pub hide_on_map: bool,
}

impl CategoryConfig {
    pub fn new(spawn_chance: f32) -> Self {
        Self {
            enabled: true,
            spawn_chance,
            weight_by_value: true,
            hide_on_map: true,
        }
    }
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self::new(defaults::UPGRADE_SPAWN_CHANCE)
    }
}

/// Process-wide spawner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Upgrade items, spawned in tiny volumes
    pub upgrades: CategoryConfig,
    /// Drone items, spawned in small volumes
    pub drones: CategoryConfig,
    /// Item name to whether it may spawn
    pub allowed_items: BTreeMap<String, bool>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            upgrades: CategoryConfig::new(defaults::UPGRADE_SPAWN_CHANCE),
            drones: CategoryConfig::new(defaults::DRONE_SPAWN_CHANCE),
            allowed_items: BTreeMap::new(),
        }
    }
}

impl SpawnConfig {
    /// Creates a configuration where every category spawns with the given chance.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopspawn::{SpawnCategory, SpawnConfig};
    ///
    /// let config = SpawnConfig::with_chance(100.0);
    /// assert_eq!(config.category(SpawnCategory::Drone).spawn_chance, 100.0);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn with_chance(spawn_chance: f32) -> Self {
        Self {
            upgrades: CategoryConfig::new(spawn_chance),
            drones: CategoryConfig::new(spawn_chance),
            allowed_items: BTreeMap::new(),
        }
    }

    pub fn category(&self, category: SpawnCategory) -> &CategoryConfig {
        match category {
            SpawnCategory::Upgrade => &self.upgrades,
            SpawnCategory::Drone => &self.drones,
        }
    }

    /// Returns the allow entry for `name`, creating it as allowed if missing.
    pub fn ensure_item_entry(&mut self, name: &str) -> bool {
        *self.allowed_items.entry(name.to_string()).or_insert(true)
    }

    pub fn set_item_allowed(&mut self, name: &str, allowed: bool) {
        self.allowed_items.insert(name.to_string(), allowed);
    }

    /// Whether `name` may spawn. Items without an entry are allowed.
    pub fn is_item_allowed(&self, name: &str) -> bool {
        self.allowed_items.get(name).copied().unwrap_or(true)
    }

    /// Checks that every spawn chance is a finite percentage.
    pub fn validate(&self) -> SpawnResult<()> {
        for category in SpawnCategory::all() {
            let chance = self.category(category).spawn_chance;
            if !chance.is_finite()
                || !(defaults::MIN_SPAWN_CHANCE..=defaults::MAX_SPAWN_CHANCE).contains(&chance)
            {
                return Err(SpawnError::InvalidConfig(format!(
                    "{} spawn chance {} is outside [{}, {}]",
                    category,
                    chance,
                    defaults::MIN_SPAWN_CHANCE,
                    defaults::MAX_SPAWN_CHANCE
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> SpawnResult<Self> {
        let config: SpawnConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SpawnResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> SpawnResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
