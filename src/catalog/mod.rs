//! # Catalog Module
//!
//! Item definitions as the host's item store describes them, and the two
//! read-only operations the engine performs over them:
//! - filtering a category down to the items that may spawn
//! - choosing one of those items, uniformly or weighted by shop value

pub mod filter;
pub mod selection;

pub use filter::*;
pub use selection::*;

use crate::{SpawnError, SpawnResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Every item class the host knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    ItemUpgrade,
    PlayerUpgrade,
    Drone,
    Orb,
    Cart,
    PowerCrystal,
    Grenade,
    Melee,
    HealthPack,
    Gun,
    Tracker,
    Mine,
}

impl ItemType {
    /// The spawn category this item type belongs to, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopspawn::{ItemType, SpawnCategory};
    ///
    /// assert_eq!(ItemType::ItemUpgrade.spawn_category(), Some(SpawnCategory::Upgrade));
    /// assert_eq!(ItemType::Cart.spawn_category(), None);
    /// ```
    pub fn spawn_category(self) -> Option<SpawnCategory> {
        match self {
            ItemType::ItemUpgrade => Some(SpawnCategory::Upgrade),
            ItemType::Drone => Some(SpawnCategory::Drone),
            ItemType::PlayerUpgrade
            | ItemType::Orb
            | ItemType::Cart
            | ItemType::PowerCrystal
            | ItemType::Grenade
            | ItemType::Melee
            | ItemType::HealthPack
            | ItemType::Gun
            | ItemType::Tracker
            | ItemType::Mine => None,
        }
    }
}

/// The categories of items this engine spawns, each configured independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnCategory {
    Upgrade,
    Drone,
}

impl SpawnCategory {
    /// Both categories, in configuration order.
    pub fn all() -> [SpawnCategory; 2] {
        [SpawnCategory::Upgrade, SpawnCategory::Drone]
    }

    /// Human-readable label used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            SpawnCategory::Upgrade => "upgrade",
            SpawnCategory::Drone => "drone",
        }
    }
}

impl std::fmt::Display for SpawnCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Shop value range of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique name, also the asset name the host instantiates
    pub name: String,
    /// Class of the item
    pub item_type: ItemType,
    /// Shop value, absent for items that cannot be bought
    pub value: Option<ValueRange>,
    /// Extra host data the engine does not look at
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl ItemDefinition {
    /// Creates an item with the given minimum value (max is set to the same).
    ///
    /// # Examples
    ///
    /// ```
    /// use shopspawn::{ItemDefinition, ItemType};
    ///
    /// let item = ItemDefinition::new("Item Drone Battery", ItemType::Drone, 40.0);
    /// assert_eq!(item.min_value(), Some(40.0));
    /// assert!(item.has_valid_price());
    /// ```
    pub fn new(name: impl Into<String>, item_type: ItemType, min_value: f32) -> Self {
        Self {
            name: name.into(),
            item_type,
            value: Some(ValueRange::new(min_value, min_value)),
            metadata: BTreeMap::new(),
        }
    }

    /// Creates an item without any shop value.
    pub fn unpriced(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            item_type,
            value: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn min_value(&self) -> Option<f32> {
        self.value.map(|v| v.min)
    }

    /// True when the minimum value is defined, finite and strictly positive.
    pub fn has_valid_price(&self) -> bool {
        matches!(self.min_value(), Some(min) if min.is_finite() && min > 0.0)
    }

    pub fn spawn_category(&self) -> Option<SpawnCategory> {
        self.item_type.spawn_category()
    }
}

/// Ordered set of item definitions keyed by name.
///
/// Insertion order is preserved; weighted selection walks items in this order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ItemDefinition>", into = "Vec<ItemDefinition>")]
pub struct Catalog {
    items: Vec<ItemDefinition>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate names.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopspawn::{Catalog, ItemDefinition, ItemType};
    ///
    /// let catalog = Catalog::from_items(vec![
    ///     ItemDefinition::new("Item Upgrade Player Health", ItemType::ItemUpgrade, 5.0),
    ///     ItemDefinition::new("Item Drone Zero Gravity", ItemType::Drone, 30.0),
    /// ]).unwrap();
    /// assert_eq!(catalog.len(), 2);
    /// ```
    pub fn from_items(items: impl IntoIterator<Item = ItemDefinition>) -> SpawnResult<Self> {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, item: ItemDefinition) -> SpawnResult<()> {
        if self.index.contains_key(&item.name) {
            return Err(SpawnError::DuplicateItem(item.name));
        }
        self.index.insert(item.name.clone(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ItemDefinition> {
        self.index.get(name).map(|&i| &self.items[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parses a catalog from a JSON array of item definitions.
    pub fn from_json_str(json: &str) -> SpawnResult<Self> {
        let items: Vec<ItemDefinition> = serde_json::from_str(json)?;
        Self::from_items(items)
    }
}

// Duplicates in deserialized input keep the first entry and are logged;
// `from_json_str` is the strict path.
impl From<Vec<ItemDefinition>> for Catalog {
    fn from(items: Vec<ItemDefinition>) -> Self {
        let mut catalog = Catalog::new();
        for item in items {
            if let Err(err) = catalog.insert(item) {
                log::warn!("Dropping catalog entry: {}", err);
            }
        }
        catalog
    }
}

impl From<Catalog> for Vec<ItemDefinition> {
    fn from(catalog: Catalog) -> Self {
        catalog.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping_is_closed() {
        assert_eq!(ItemType::ItemUpgrade.spawn_category(), Some(SpawnCategory::Upgrade));
        assert_eq!(ItemType::Drone.spawn_category(), Some(SpawnCategory::Drone));
        assert_eq!(ItemType::PlayerUpgrade.spawn_category(), None);
        assert_eq!(ItemType::Gun.spawn_category(), None);
    }

    #[test]
    fn test_price_validity() {
        assert!(ItemDefinition::new("a", ItemType::Drone, 1.0).has_valid_price());
        assert!(!ItemDefinition::new("b", ItemType::Drone, 0.0).has_valid_price());
        assert!(!ItemDefinition::new("c", ItemType::Drone, -3.0).has_valid_price());
        assert!(!ItemDefinition::new("d", ItemType::Drone, f32::NAN).has_valid_price());
        assert!(!ItemDefinition::unpriced("e", ItemType::Drone).has_valid_price());
    }

    #[test]
    fn test_catalog_preserves_order_and_rejects_duplicates() {
        let mut catalog = Catalog::new();
        catalog.insert(ItemDefinition::new("b", ItemType::Drone, 1.0)).unwrap();
        catalog.insert(ItemDefinition::new("a", ItemType::Drone, 1.0)).unwrap();

        let names: Vec<_> = catalog.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);

        let err = catalog.insert(ItemDefinition::new("a", ItemType::Orb, 2.0));
        assert!(matches!(err, Err(SpawnError::DuplicateItem(name)) if name == "a"));
        assert_eq!(catalog.get("a").unwrap().item_type, ItemType::Drone);
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"[
            {"name": "Item Upgrade Map Player Count", "item_type": "item_upgrade", "value": {"min": 4.0, "max": 6.0}},
            {"name": "Item Cart Medium", "item_type": "cart", "value": null}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Item Cart Medium").unwrap().value, None);
        assert!(catalog.get("Item Upgrade Map Player Count").unwrap().metadata.is_empty());
    }

    #[test]
    fn test_lenient_conversion_keeps_first_duplicate() {
        let catalog = Catalog::from(vec![
            ItemDefinition::new("Item Drone Feather", ItemType::Drone, 12.0),
            ItemDefinition::new("Item Drone Feather", ItemType::Orb, 99.0),
            ItemDefinition::new("Item Drone Torque", ItemType::Drone, 18.0),
        ]);

        assert_eq!(catalog.len(), 2);
        let kept = catalog.get("Item Drone Feather").unwrap();
        assert_eq!(kept.item_type, ItemType::Drone);
        assert_eq!(kept.min_value(), Some(12.0));
    }
}
