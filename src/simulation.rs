//! # Simulated Host
//!
//! An in-memory stand-in for the game, used by the `shopspawn` binary and the
//! tests. It keeps entities in a map, puts every entity in the level region
//! until it is moved, and remembers every request it was given.

use crate::{
    defaults, new_entity_id, CandidateLocation, Catalog, EntityId, Host, ItemDefinition, ItemType,
    LocationId, ParticipantRole, Placement, PopulationReport, Quat, RegionId, SettlementReport,
    SpawnConfig, SpawnEngine, SpawnError, SpawnFailure, SpawnRequest, SpawnResult, Vec3,
    VolumeCategory,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

/// Region every entity starts in.
pub const LEVEL_REGION: RegionId = RegionId(1);

/// The extraction point's region.
pub const EXTRACTION_REGION: RegionId = RegionId(0);

/// Share of generated volumes placed under a valuable switch.
const SWITCH_CHANCE: f64 = 0.1;

/// Mixed into the seed so level layout and spawn rolls use separate streams.
const LEVEL_SEED_SALT: u64 = 0x5EED_1E7E;

/// An entity living in the simulated level.
#[derive(Debug, Clone, PartialEq)]
pub struct SimEntity {
    pub item_name: String,
    pub placement: Placement,
    pub regions: Vec<RegionId>,
}

/// In-memory [`Host`] implementation.
#[derive(Debug, Clone)]
pub struct SimulatedHost {
    catalog: Catalog,
    role: ParticipantRole,
    in_level: bool,
    locations: Vec<CandidateLocation>,
    entities: HashMap<EntityId, SimEntity>,
    extraction_regions: HashSet<RegionId>,
    missing_assets: HashSet<String>,
    requests: Vec<SpawnRequest>,
    destroyed: Vec<EntityId>,
}

impl SimulatedHost {
    /// Creates an empty level with the given catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopspawn::{sample_catalog, Host, ParticipantRole, SimulatedHost};
    ///
    /// let host = SimulatedHost::new(sample_catalog(), ParticipantRole::Singleplayer);
    /// assert!(host.is_level());
    /// assert!(host.candidate_locations().is_empty());
    /// ```
    pub fn new(catalog: Catalog, role: ParticipantRole) -> Self {
        Self {
            catalog,
            role,
            in_level: true,
            locations: Vec::new(),
            entities: HashMap::new(),
            extraction_regions: HashSet::from([EXTRACTION_REGION]),
            missing_assets: HashSet::new(),
            requests: Vec::new(),
            destroyed: Vec::new(),
        }
    }

    /// Switches between a gameplay level and a menu/lobby.
    pub fn set_in_level(&mut self, in_level: bool) {
        self.in_level = in_level;
    }

    pub fn add_location(&mut self, location: CandidateLocation) {
        self.locations.push(location);
    }

    /// Adds `count` random volumes to the level.
    pub fn generate_level<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) {
        let volumes = VolumeCategory::all();
        for _ in 0..count {
            let id = LocationId(self.locations.len() as u64);
            let volume = volumes[rng.gen_range(0..volumes.len())];
            let position = Vec3::new(
                rng.gen_range(-60.0..60.0),
                rng.gen_range(0.0..4.0),
                rng.gen_range(-60.0..60.0),
            );
            let rotation = Quat::from_yaw(rng.gen_range(0.0..std::f32::consts::TAU));

            let mut location = CandidateLocation::new(id, volume, Placement::new(position, rotation));
            location.has_switch = rng.gen_bool(SWITCH_CHANCE);
            self.locations.push(location);
        }
    }

    /// Makes creation of `item_name` fail as if its asset were missing.
    pub fn mark_asset_missing(&mut self, item_name: &str) {
        self.missing_assets
            .insert(format!("{}{}", defaults::ITEM_ASSET_PREFIX, item_name));
    }

    pub fn move_to_region(&mut self, entity: EntityId, region: RegionId) {
        if let Some(sim) = self.entities.get_mut(&entity) {
            sim.regions = vec![region];
        }
    }

    /// Carries an entity into the extraction point.
    pub fn move_to_extraction(&mut self, entity: EntityId) {
        self.move_to_region(entity, EXTRACTION_REGION);
    }

    pub fn entity(&self, id: EntityId) -> Option<&SimEntity> {
        self.entities.get(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn spawn_requests(&self) -> &[SpawnRequest] {
        &self.requests
    }

    pub fn destroyed(&self) -> &[EntityId] {
        &self.destroyed
    }
}

impl Host for SimulatedHost {
    fn is_level(&self) -> bool {
        self.in_level
    }

    fn role(&self) -> ParticipantRole {
        self.role
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn candidate_locations(&self) -> Vec<CandidateLocation> {
        self.locations.clone()
    }

    fn create_entity(&mut self, request: &SpawnRequest) -> Result<EntityId, SpawnFailure> {
        self.requests.push(request.clone());
        if self.missing_assets.contains(&request.asset_path) {
            return Err(SpawnFailure::MissingAsset(request.asset_path.clone()));
        }

        let id = new_entity_id();
        self.entities.insert(
            id,
            SimEntity {
                item_name: request.item_name.clone(),
                placement: request.placement,
                regions: vec![LEVEL_REGION],
            },
        );
        Ok(id)
    }

    fn destroy_entity(&mut self, entity: EntityId) {
        if self.entities.remove(&entity).is_some() {
            self.destroyed.push(entity);
        }
    }

    fn entity_regions(&self, entity: EntityId) -> Option<Vec<RegionId>> {
        self.entities.get(&entity).map(|sim| sim.regions.clone())
    }

    fn is_extraction_region(&self, region: RegionId) -> bool {
        self.extraction_regions.contains(&region)
    }
}

/// Parameters of one simulated level.
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Seeds the level layout, the spawn rolls and the haul
    pub seed: u64,
    pub volumes: usize,
    /// How many times level setup is signalled
    pub setup_passes: u32,
    /// Chance that each spawned item is carried to the extraction point
    pub extraction_share: f64,
    pub role: ParticipantRole,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            volumes: 400,
            setup_passes: 2,
            extraction_share: 0.5,
            role: ParticipantRole::Singleplayer,
        }
    }
}

/// Everything one simulated level produced.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub populations: Vec<PopulationReport>,
    pub settlement: SettlementReport,
    /// Item names in the order they were recorded
    pub purchases: Vec<String>,
}

/// Runs one level through the engine: catalog signal, population passes, a
/// random haul into the extraction point and settlement.
///
/// The outcome depends only on `config` and `options`.
///
/// # Examples
///
/// ```
/// use shopspawn::simulation::{simulate_level, SimulationOptions};
/// use shopspawn::SpawnConfig;
///
/// let options = SimulationOptions { seed: 3, ..SimulationOptions::default() };
/// let first = simulate_level(SpawnConfig::with_chance(20.0), &options).unwrap();
/// let second = simulate_level(SpawnConfig::with_chance(20.0), &options).unwrap();
/// assert_eq!(first.purchases, second.purchases);
/// ```
pub fn simulate_level(config: SpawnConfig, options: &SimulationOptions) -> SpawnResult<SimulationOutcome> {
    if !(0.0..=1.0).contains(&options.extraction_share) {
        return Err(SpawnError::InvalidConfig(format!(
            "extraction share {} is outside [0, 1]",
            options.extraction_share
        )));
    }

    let mut host = SimulatedHost::new(sample_catalog(), options.role);
    let mut level_rng = StdRng::seed_from_u64(options.seed ^ LEVEL_SEED_SALT);
    host.generate_level(&mut level_rng, options.volumes);

    let mut engine = SpawnEngine::new(config, options.seed)?;
    engine.on_catalog_available(host.catalog());
    engine.begin_run();

    let mut populations = Vec::new();
    for _ in 0..options.setup_passes {
        populations.push(engine.on_environment_ready(&mut host)?);
    }

    for id in engine.lifecycle_ledger().ids() {
        if level_rng.gen_bool(options.extraction_share) {
            host.move_to_extraction(id);
        }
    }

    let mut purchases: Vec<String> = Vec::new();
    let settlement = engine.on_extraction_completed(&mut host, &mut purchases)?;

    Ok(SimulationOutcome {
        populations,
        settlement,
        purchases,
    })
}

/// A small catalog shaped like the game's item list.
pub fn sample_catalog() -> Catalog {
    let items = vec![
        ItemDefinition::new("Item Upgrade Player Health", ItemType::ItemUpgrade, 4.0),
        ItemDefinition::new("Item Upgrade Player Energy", ItemType::ItemUpgrade, 4.0),
        ItemDefinition::new("Item Upgrade Player Sprint Speed", ItemType::ItemUpgrade, 5.0),
        ItemDefinition::new("Item Upgrade Player Grab Strength", ItemType::ItemUpgrade, 6.0),
        ItemDefinition::new("Item Upgrade Player Extra Jump", ItemType::ItemUpgrade, 7.0),
        ItemDefinition::new("Item Upgrade Map Player Count", ItemType::ItemUpgrade, 3.0),
        ItemDefinition::new("Item Drone Battery", ItemType::Drone, 8.0),
        ItemDefinition::new("Item Drone Feather", ItemType::Drone, 12.0),
        ItemDefinition::new("Item Drone Torque", ItemType::Drone, 18.0),
        ItemDefinition::new("Item Drone Zero Gravity", ItemType::Drone, 25.0),
        ItemDefinition::new("Item Drone Indestructible", ItemType::Drone, 30.0),
        ItemDefinition::new("Item Cart Medium", ItemType::Cart, 8.0),
        ItemDefinition::new("Item Health Pack Small", ItemType::HealthPack, 2.0),
        ItemDefinition::new("Item Gun Handgun", ItemType::Gun, 15.0),
        ItemDefinition::new("Item Orb Zero Gravity", ItemType::Orb, 20.0),
        ItemDefinition::new("Item Power Crystal", ItemType::PowerCrystal, 10.0),
    ];
    Catalog::from(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_level_assigns_unique_ids() {
        let mut host = SimulatedHost::new(sample_catalog(), ParticipantRole::Singleplayer);
        let mut rng = StdRng::seed_from_u64(4);
        host.generate_level(&mut rng, 50);
        host.generate_level(&mut rng, 25);

        let ids: HashSet<_> = host.candidate_locations().iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), 75);
    }

    #[test]
    fn test_entities_start_outside_extraction() {
        let mut host = SimulatedHost::new(sample_catalog(), ParticipantRole::Singleplayer);
        let request = SpawnRequest {
            item_name: "Item Drone Feather".to_string(),
            asset_path: "Items/Item Drone Feather".to_string(),
            placement: Placement::default(),
            mode: crate::SpawnMode::Local,
        };
        let id = host.create_entity(&request).unwrap();

        assert_eq!(host.entity_regions(id), Some(vec![LEVEL_REGION]));
        host.move_to_extraction(id);
        assert!(host.is_extraction_region(host.entity_regions(id).unwrap()[0]));

        host.destroy_entity(id);
        assert_eq!(host.entity_regions(id), None);
        assert_eq!(host.destroyed(), &[id]);
    }

    #[test]
    fn test_sample_catalog_has_both_categories() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 16);
        assert!(catalog.iter().any(|i| i.item_type == ItemType::ItemUpgrade));
        assert!(catalog.iter().any(|i| i.item_type == ItemType::Drone));
    }

    #[test]
    fn test_simulation_rejects_bad_extraction_share() {
        let options = SimulationOptions {
            extraction_share: 1.5,
            ..SimulationOptions::default()
        };
        assert!(matches!(
            simulate_level(SpawnConfig::default(), &options),
            Err(SpawnError::InvalidConfig(_))
        ));
    }
}
