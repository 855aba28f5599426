//! # Map Visibility
//!
//! Whether the map marker of an item should be hidden.

use crate::{ItemType, SpawnConfig};

/// True when the item's category is configured to hide on the map.
/// Types outside the spawn categories are never hidden.
pub fn suppress_map_marker(config: &SpawnConfig, item_type: ItemType) -> bool {
    match item_type.spawn_category() {
        Some(category) => config.category(category).hide_on_map,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_suppression_follows_category_flag() {
        let mut config = SpawnConfig::default();
        config.drones.hide_on_map = false;

        assert!(suppress_map_marker(&config, ItemType::ItemUpgrade));
        assert!(!suppress_map_marker(&config, ItemType::Drone));
        assert!(!suppress_map_marker(&config, ItemType::HealthPack));
    }
}
