//! # Item Selection
//!
//! Random choice over a filtered item list. In value-weighted mode an item's
//! weight is the inverse of its minimum shop value, so cheap items show up
//! more often than expensive ones.

use crate::{ItemDefinition, SpawnError, SpawnResult};
use rand::Rng;

/// How an item is drawn from the eligible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Every item has the same chance
    Uniform,
    /// Chance proportional to `1 / min_value`
    ValueWeighted,
}

impl SelectionMode {
    pub fn from_weighting(weight_by_value: bool) -> Self {
        if weight_by_value {
            SelectionMode::ValueWeighted
        } else {
            SelectionMode::Uniform
        }
    }
}

/// A chosen item and the chance it had of being chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub item: &'a ItemDefinition,
    /// Percentage in (0, 100]
    pub chance_percent: f64,
    pub mode: SelectionMode,
}

/// Weight of an item in value-weighted mode.
///
/// Items without a price weigh NaN so that a bad entry poisons the total and
/// the draw is abandoned instead of silently skewed.
pub fn item_weight(item: &ItemDefinition) -> f64 {
    match item.min_value() {
        Some(min) => 1.0 / min as f64,
        None => f64::NAN,
    }
}

/// Picks one item from `items`.
///
/// Returns `Ok(None)` when a weighted draw cannot be made (total weight not
/// positive and finite, or the walk falls off the end through rounding).
/// Callers treat that the same as an empty catalog. Passing an empty slice is a
/// caller bug and yields [`SpawnError::EmptySelection`].
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use shopspawn::{select_item, ItemDefinition, ItemType, SelectionMode};
///
/// let only = ItemDefinition::new("Item Drone Torque", ItemType::Drone, 25.0);
/// let mut rng = StdRng::seed_from_u64(7);
/// let selection = select_item(&[&only], SelectionMode::ValueWeighted, &mut rng)
///     .unwrap()
///     .unwrap();
/// assert_eq!(selection.item.name, "Item Drone Torque");
/// assert!((selection.chance_percent - 100.0).abs() < 1e-9);
/// ```
pub fn select_item<'a, R: Rng + ?Sized>(
    items: &[&'a ItemDefinition],
    mode: SelectionMode,
    rng: &mut R,
) -> SpawnResult<Option<Selection<'a>>> {
    if items.is_empty() {
        return Err(SpawnError::EmptySelection);
    }

    match mode {
        SelectionMode::Uniform => {
            let index = rng.gen_range(0..items.len());
            Ok(Some(Selection {
                item: items[index],
                chance_percent: 100.0 / items.len() as f64,
                mode,
            }))
        }
        SelectionMode::ValueWeighted => Ok(select_weighted(items, rng)),
    }
}

fn select_weighted<'a, R: Rng + ?Sized>(
    items: &[&'a ItemDefinition],
    rng: &mut R,
) -> Option<Selection<'a>> {
    let total_weight: f64 = items.iter().map(|item| item_weight(item)).sum();

    if !total_weight.is_finite() || total_weight <= 0.0 {
        log::warn!("Invalid total selection weight {}", total_weight);
        return None;
    }

    let mut remaining = rng.gen_range(0.0..total_weight);
    for &item in items {
        let weight = item_weight(item);
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(Selection {
                item,
                chance_percent: weight / total_weight * 100.0,
                mode: SelectionMode::ValueWeighted,
            });
        }
    }

    log::warn!(
        "Weighted selection walked past {} items without a pick",
        items.len()
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn items() -> Vec<ItemDefinition> {
        vec![
            ItemDefinition::new("cheap", ItemType::ItemUpgrade, 10.0),
            ItemDefinition::new("pricey", ItemType::ItemUpgrade, 40.0),
        ]
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = select_item(&[], SelectionMode::Uniform, &mut rng);
        assert!(matches!(result, Err(SpawnError::EmptySelection)));
    }

    #[test]
    fn test_uniform_reports_equal_chance() {
        let items = items();
        let refs: Vec<_> = items.iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        let selection = select_item(&refs, SelectionMode::Uniform, &mut rng)
            .unwrap()
            .unwrap();
        assert!((selection.chance_percent - 50.0).abs() < 1e-9);
        assert_eq!(selection.mode, SelectionMode::Uniform);
    }

    #[test]
    fn test_weighted_reports_inverse_value_chance() {
        let items = items();
        let refs: Vec<_> = items.iter().collect();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let selection = select_item(&refs, SelectionMode::ValueWeighted, &mut rng)
                .unwrap()
                .unwrap();
            let expected = if selection.item.name == "cheap" { 80.0 } else { 20.0 };
            assert!((selection.chance_percent - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_weighted_degrades_on_invalid_total() {
        let broken = vec![
            ItemDefinition::new("zero", ItemType::Drone, 0.0),
            ItemDefinition::unpriced("none", ItemType::Drone),
        ];
        let mut rng = StdRng::seed_from_u64(9);

        let zero_only = [&broken[0]];
        assert_eq!(
            select_item(&zero_only, SelectionMode::ValueWeighted, &mut rng).unwrap(),
            None
        );

        let unpriced_only = [&broken[1]];
        assert_eq!(
            select_item(&unpriced_only, SelectionMode::ValueWeighted, &mut rng).unwrap(),
            None
        );

        let negative = ItemDefinition::new("negative", ItemType::Drone, -5.0);
        assert_eq!(
            select_item(&[&negative], SelectionMode::ValueWeighted, &mut rng).unwrap(),
            None
        );
    }

    #[test]
    fn test_uniform_ignores_prices() {
        let unpriced = ItemDefinition::unpriced("none", ItemType::Drone);
        let mut rng = StdRng::seed_from_u64(9);
        let selection = select_item(&[&unpriced], SelectionMode::Uniform, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(selection.item.name, "none");
    }
}
