//! # Eligibility Policy
//!
//! Decides, before any catalog work, whether a location gets a spawn attempt
//! and which category it would be.

use crate::{defaults, CandidateLocation, SpawnCategory, SpawnConfig};
use rand::Rng;

/// Why a location was passed over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ineligible {
    /// Volume sits under a valuable switch
    SwitchAttached,
    /// Volume size hosts no spawn category
    UnsupportedVolume,
    /// The category is switched off in the configuration
    CategoryDisabled(SpawnCategory),
    /// The chance roll missed
    RollFailed { category: SpawnCategory, roll: f32 },
}

/// Outcome of the eligibility check for one location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eligibility {
    Eligible(SpawnCategory),
    Ineligible(Ineligible),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible(_))
    }

    pub fn category(&self) -> Option<SpawnCategory> {
        match self {
            Eligibility::Eligible(category) => Some(*category),
            Eligibility::Ineligible(_) => None,
        }
    }
}

/// Evaluates a location against the configuration.
///
/// The roll is uniform in [0, 100) and succeeds when it does not exceed the
/// category's spawn chance. A chance of zero never succeeds.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use shopspawn::{evaluate_location, CandidateLocation, Eligibility, LocationId, Placement, SpawnCategory,
///     SpawnConfig, VolumeCategory};
///
/// let config = SpawnConfig::with_chance(100.0);
/// let location = CandidateLocation::new(LocationId(1), VolumeCategory::Tiny, Placement::default());
/// let mut rng = StdRng::seed_from_u64(1);
/// assert_eq!(evaluate_location(&location, &config, &mut rng), Eligibility::Eligible(SpawnCategory::Upgrade));
/// ```
pub fn evaluate_location<R: Rng + ?Sized>(
    location: &CandidateLocation,
    config: &SpawnConfig,
    rng: &mut R,
) -> Eligibility {
    if location.has_switch {
        return Eligibility::Ineligible(Ineligible::SwitchAttached);
    }

    let category = match location.volume.spawn_category() {
        Some(category) => category,
        None => return Eligibility::Ineligible(Ineligible::UnsupportedVolume),
    };

    let settings = config.category(category);
    if !settings.enabled {
        return Eligibility::Ineligible(Ineligible::CategoryDisabled(category));
    }

    let roll = rng.gen_range(defaults::MIN_SPAWN_CHANCE..defaults::MAX_SPAWN_CHANCE);
    if settings.spawn_chance > 0.0 && roll <= settings.spawn_chance {
        Eligibility::Eligible(category)
    } else {
        Eligibility::Ineligible(Ineligible::RollFailed { category, roll })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LocationId, Placement, VolumeCategory};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn location(volume: VolumeCategory) -> CandidateLocation {
        CandidateLocation::new(LocationId(1), volume, Placement::default())
    }

    #[test]
    fn test_switch_is_always_ineligible() {
        let config = SpawnConfig::with_chance(100.0);
        let mut rng = StdRng::seed_from_u64(5);
        for volume in VolumeCategory::all() {
            assert_eq!(
                evaluate_location(&location(volume).with_switch(), &config, &mut rng),
                Eligibility::Ineligible(Ineligible::SwitchAttached)
            );
        }
    }

    #[test]
    fn test_unsupported_volumes() {
        let config = SpawnConfig::with_chance(100.0);
        let mut rng = StdRng::seed_from_u64(5);
        for volume in [VolumeCategory::Medium, VolumeCategory::Big, VolumeCategory::VeryTall] {
            assert_eq!(
                evaluate_location(&location(volume), &config, &mut rng),
                Eligibility::Ineligible(Ineligible::UnsupportedVolume)
            );
        }
    }

    #[test]
    fn test_disabled_category() {
        let mut config = SpawnConfig::with_chance(100.0);
        config.drones.enabled = false;
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(
            evaluate_location(&location(VolumeCategory::Small), &config, &mut rng),
            Eligibility::Ineligible(Ineligible::CategoryDisabled(SpawnCategory::Drone))
        );
        assert!(evaluate_location(&location(VolumeCategory::Tiny), &config, &mut rng).is_eligible());
    }

    #[test]
    fn test_chance_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let always = SpawnConfig::with_chance(100.0);
        let never = SpawnConfig::with_chance(0.0);

        for _ in 0..1000 {
            assert_eq!(
                evaluate_location(&location(VolumeCategory::Small), &always, &mut rng).category(),
                Some(SpawnCategory::Drone)
            );
            assert!(!evaluate_location(&location(VolumeCategory::Small), &never, &mut rng).is_eligible());
        }
    }

    #[test]
    fn test_partial_chance_rate() {
        let mut rng = StdRng::seed_from_u64(17);
        let config = SpawnConfig::with_chance(25.0);
        let trials = 20_000;
        let hits = (0..trials)
            .filter(|_| evaluate_location(&location(VolumeCategory::Tiny), &config, &mut rng).is_eligible())
            .count();
        let rate = hits as f64 / trials as f64;
        assert!((rate - 0.25).abs() < 0.02, "rate was {}", rate);
    }
}
