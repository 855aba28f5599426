//! # Catalog Filter
//!
//! Narrows the catalog to the items of one spawn category that are priced
//! and not blocked by the allow list.

use crate::{Catalog, ItemDefinition, SpawnCategory, SpawnConfig};
use std::collections::HashSet;

/// Item names the allow list excludes from spawning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisallowedSet {
    names: HashSet<String>,
}

impl DisallowedSet {
    /// Builds the set from the configuration's allow list.
    ///
    /// Every spawnable item in the catalog gets an allow entry in `config`
    /// (default allowed) if it does not have one yet. Items of other types are
    /// never given an entry.
    pub fn build(catalog: &Catalog, config: &mut SpawnConfig) -> Self {
        let mut names = HashSet::new();
        for item in catalog.iter() {
            if item.spawn_category().is_none() {
                continue;
            }
            if !config.ensure_item_entry(&item.name) {
                names.insert(item.name.clone());
            }
        }
        Self { names }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Returns the items of `category` that may spawn, in catalog order.
///
/// An item qualifies when its type maps to `category`, its minimum value is
/// finite and above zero, and its name is not disallowed.
///
/// # Examples
///
/// ```
/// use shopspawn::{eligible_items, Catalog, DisallowedSet, ItemDefinition, ItemType, SpawnCategory};
///
/// let catalog = Catalog::from_items(vec![
///     ItemDefinition::new("Item Drone Feather", ItemType::Drone, 20.0),
///     ItemDefinition::new("Item Drone Battery", ItemType::Drone, 0.0),
///     ItemDefinition::new("Item Upgrade Player Energy", ItemType::ItemUpgrade, 4.0),
/// ]).unwrap();
///
/// let drones = eligible_items(&catalog, SpawnCategory::Drone, &DisallowedSet::default());
/// assert_eq!(drones.len(), 1);
/// assert_eq!(drones[0].name, "Item Drone Feather");
/// ```
pub fn eligible_items<'a>(
    catalog: &'a Catalog,
    category: SpawnCategory,
    disallowed: &DisallowedSet,
) -> Vec<&'a ItemDefinition> {
    catalog
        .iter()
        .filter(|item| item.spawn_category() == Some(category))
        .filter(|item| item.has_valid_price())
        .filter(|item| !disallowed.contains(&item.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemType;

    fn catalog() -> Catalog {
        Catalog::from_items(vec![
            ItemDefinition::new("Item Upgrade Player Health", ItemType::ItemUpgrade, 5.0),
            ItemDefinition::new("Item Upgrade Player Sprint Speed", ItemType::ItemUpgrade, 6.0),
            ItemDefinition::unpriced("Item Upgrade Broken", ItemType::ItemUpgrade),
            ItemDefinition::new("Item Drone Indestructible", ItemType::Drone, 35.0),
            ItemDefinition::new("Item Power Crystal", ItemType::PowerCrystal, 8.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = catalog();
        let upgrades = eligible_items(&catalog, SpawnCategory::Upgrade, &DisallowedSet::default());
        let names: Vec<_> = upgrades.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Item Upgrade Player Health", "Item Upgrade Player Sprint Speed"]
        );
    }

    #[test]
    fn test_filter_respects_disallowed() {
        let catalog = catalog();
        let disallowed = DisallowedSet::from_names(["Item Upgrade Player Health"]);
        let upgrades = eligible_items(&catalog, SpawnCategory::Upgrade, &disallowed);
        assert_eq!(upgrades.len(), 1);
        assert_eq!(upgrades[0].name, "Item Upgrade Player Sprint Speed");
    }

    #[test]
    fn test_filter_empty_is_not_an_error() {
        let catalog = Catalog::new();
        assert!(eligible_items(&catalog, SpawnCategory::Drone, &DisallowedSet::default()).is_empty());
    }

    #[test]
    fn test_build_materializes_entries_for_spawnable_items_only() {
        let catalog = catalog();
        let mut config = SpawnConfig::default();
        config.set_item_allowed("Item Drone Indestructible", false);

        let disallowed = DisallowedSet::build(&catalog, &mut config);

        assert!(disallowed.contains("Item Drone Indestructible"));
        assert_eq!(disallowed.len(), 1);
        assert_eq!(config.allowed_items.get("Item Upgrade Player Health"), Some(&true));
        assert_eq!(config.allowed_items.get("Item Upgrade Broken"), Some(&true));
        assert!(!config.allowed_items.contains_key("Item Power Crystal"));
    }
}
