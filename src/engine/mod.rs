//! # Engine Module
//!
//! The run context that owns the spawner's state and reacts to host signals.
//!
//! [`SpawnEngine`] holds the configuration, the once-built [`DisallowedSet`],
//! both ledgers, the random source and the run phase. The host calls it
//! synchronously:
//! - `on_catalog_available` once the item catalog is loaded
//! - `begin_run` when a new level starts
//! - `on_environment_ready` after level setup, to populate locations
//! - `on_extraction_completed` after an extraction haul is cleared

pub mod eligibility;
pub mod ledger;
pub mod settlement;
pub mod spawner;
pub mod visibility;

pub use eligibility::*;
pub use ledger::*;
pub use settlement::*;
pub use spawner::*;
pub use visibility::*;

use crate::{
    eligible_items, select_item, Catalog, DisallowedSet, EntityId, Host, ItemDefinition,
    ItemType, LocationId, PurchaseRecorder, SelectionMode, SpawnCategory, SpawnConfig,
    SpawnError, SpawnResult,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// Phase of the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Level is being set up; population passes are accepted
    Setup,
    /// An extraction has been settled; no further population this run
    Extraction,
}

/// Why a pass did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The host is in a menu, lobby or shop
    NotLevel,
    /// Another participant makes the decisions
    NotAuthoritative,
}

/// Per-category counters of a population pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    /// Unprocessed locations of the category's volume size
    pub volumes: usize,
    /// Locations that passed the eligibility roll
    pub attempted: usize,
    pub spawned: usize,
}

/// Aggregate outcome of one population pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationReport {
    pub skipped: Option<SkipReason>,
    /// Locations the host enumerated
    pub candidates: usize,
    /// Locations already processed earlier in the run
    pub already_seen: usize,
    /// Locations under a valuable switch
    pub switch_attached: usize,
    /// Locations that failed eligibility for any other reason
    pub ineligible: usize,
    /// Eligible locations where no item could be selected
    pub no_item: usize,
    /// Selected items the host failed to create
    pub spawn_failed: usize,
    /// Entities created in this pass
    pub spawned: Vec<EntityId>,
    pub per_category: BTreeMap<SpawnCategory, CategoryTally>,
}

impl PopulationReport {
    fn skipped(reason: SkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::default()
        }
    }

    pub fn attempted(&self) -> usize {
        self.per_category.values().map(|t| t.attempted).sum()
    }

    pub fn spawned_count(&self) -> usize {
        self.spawned.len()
    }

    pub fn tally(&self, category: SpawnCategory) -> CategoryTally {
        self.per_category.get(&category).copied().unwrap_or_default()
    }
}

/// Spawner state for one process, threaded through every pass.
#[derive(Debug)]
pub struct SpawnEngine {
    config: SpawnConfig,
    disallowed: Option<DisallowedSet>,
    volumes: VolumeLedger,
    lifecycle: LifecycleLedger,
    phase: RunPhase,
    rng: StdRng,
}

impl SpawnEngine {
    /// Creates an engine with a seeded random source.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopspawn::{RunPhase, SpawnConfig, SpawnEngine};
    ///
    /// let engine = SpawnEngine::new(SpawnConfig::default(), 12345).unwrap();
    /// assert_eq!(engine.phase(), RunPhase::Setup);
    /// assert!(engine.disallowed().is_none());
    /// ```
    pub fn new(config: SpawnConfig, seed: u64) -> SpawnResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            disallowed: None,
            volumes: VolumeLedger::new(),
            lifecycle: LifecycleLedger::new(),
            phase: RunPhase::Setup,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Mutable access between passes. Allow-list edits made after the catalog
    /// signal do not affect the already built [`DisallowedSet`].
    pub fn config_mut(&mut self) -> &mut SpawnConfig {
        &mut self.config
    }

    pub fn disallowed(&self) -> Option<&DisallowedSet> {
        self.disallowed.as_ref()
    }

    pub fn volume_ledger(&self) -> &VolumeLedger {
        &self.volumes
    }

    pub fn lifecycle_ledger(&self) -> &LifecycleLedger {
        &self.lifecycle
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Whether this participant may populate and settle.
    pub fn is_authoritative<H: Host + ?Sized>(&self, host: &H) -> bool {
        host.role().is_authoritative()
    }

    /// Builds the [`DisallowedSet`] the first time the catalog is available.
    ///
    /// Returns true if the set was built by this call. Later calls leave it as
    /// it is, even if the catalog has changed.
    pub fn on_catalog_available(&mut self, catalog: &Catalog) -> bool {
        if self.disallowed.is_some() {
            log::debug!("Disallowed items already initialized, ignoring catalog reload");
            return false;
        }

        log::info!("Initializing disallowed items list");
        let disallowed = DisallowedSet::build(catalog, &mut self.config);
        log::info!(
            "{} of {} catalog items are disallowed",
            disallowed.len(),
            catalog.len()
        );
        self.disallowed = Some(disallowed);
        true
    }

    /// Starts a new level: forgets processed locations and tracked entities.
    pub fn begin_run(&mut self) {
        if !self.lifecycle.is_empty() {
            log::debug!(
                "Dropping {} tracked items from the previous run",
                self.lifecycle.len()
            );
        }
        self.volumes.clear();
        self.lifecycle.clear();
        self.phase = RunPhase::Setup;
    }

    /// Records that the host placed something else in a location.
    pub fn on_location_used(&mut self, location: LocationId) -> bool {
        self.volumes.mark_seen(location)
    }

    /// Records that the host removed an entity outside of settlement.
    pub fn on_entity_removed(&mut self, entity: EntityId) -> Option<crate::TrackedEntity> {
        self.lifecycle.remove(entity)
    }

    /// Read-only view of the items a category could spawn right now.
    pub fn eligible_items<'a>(
        &self,
        catalog: &'a Catalog,
        category: SpawnCategory,
    ) -> SpawnResult<Vec<&'a ItemDefinition>> {
        let disallowed = self.disallowed.as_ref().ok_or(SpawnError::CatalogUnavailable)?;
        Ok(eligible_items(catalog, category, disallowed))
    }

    /// Population pass, run when the host finishes level setup.
    ///
    /// Every enumerated location is marked as processed before it is rolled,
    /// whatever the outcome. Failures at a single location are counted and
    /// logged; they never stop the pass.
    pub fn on_environment_ready<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> SpawnResult<PopulationReport> {
        if !host.is_level() {
            return Ok(PopulationReport::skipped(SkipReason::NotLevel));
        }
        if !self.is_authoritative(host) {
            log::debug!("Not authoritative, leaving population to the host");
            return Ok(PopulationReport::skipped(SkipReason::NotAuthoritative));
        }
        if self.phase == RunPhase::Extraction {
            return Err(SpawnError::PhaseViolation(
                "population requested after extraction started".to_string(),
            ));
        }
        let disallowed = self.disallowed.as_ref().ok_or(SpawnError::CatalogUnavailable)?;

        let locations = host.candidate_locations();
        let fresh: Vec<_> = locations
            .iter()
            .filter(|location| self.volumes.is_unseen(location.id))
            .collect();

        let mut report = PopulationReport {
            candidates: locations.len(),
            already_seen: locations.len() - fresh.len(),
            ..PopulationReport::default()
        };
        for category in SpawnCategory::all() {
            let volumes = fresh
                .iter()
                .filter(|l| !l.has_switch && l.volume.spawn_category() == Some(category))
                .count();
            report.per_category.insert(
                category,
                CategoryTally {
                    volumes,
                    ..CategoryTally::default()
                },
            );
        }

        log::info!("Found {} potential volumes to spawn items in", fresh.len());
        log::info!(
            "Upgrade item spawn chance: {}% on {} tiny volumes",
            self.config.upgrades.spawn_chance,
            report.tally(SpawnCategory::Upgrade).volumes
        );
        log::info!(
            "Drone item spawn chance: {}% on {} small volumes",
            self.config.drones.spawn_chance,
            report.tally(SpawnCategory::Drone).volumes
        );

        let mode = host.role().spawn_mode();
        for location in fresh {
            if !self.volumes.mark_seen(location.id) {
                // Host listed the same location twice in one batch
                report.already_seen += 1;
                continue;
            }

            let category = match evaluate_location(location, &self.config, &mut self.rng) {
                Eligibility::Eligible(category) => category,
                Eligibility::Ineligible(Ineligible::SwitchAttached) => {
                    report.switch_attached += 1;
                    continue;
                }
                Eligibility::Ineligible(_) => {
                    report.ineligible += 1;
                    continue;
                }
            };
            report.per_category.entry(category).or_default().attempted += 1;

            let item = choose_item(
                host.catalog(),
                category,
                &self.config,
                disallowed,
                &mut self.rng,
            )?;
            let item = match item {
                Some(item) => item,
                None => {
                    report.no_item += 1;
                    continue;
                }
            };

            match spawn_item(host, &mut self.lifecycle, &item, location, mode) {
                Ok(id) => {
                    report.spawned.push(id);
                    report.per_category.entry(category).or_default().spawned += 1;
                }
                Err(failure) => {
                    log::warn!("Could not spawn {}: {}", item.name, failure);
                    report.spawn_failed += 1;
                }
            }
        }

        log::info!(
            "Spawned {} items in total ({} attempted, {} without item, {} failed)",
            report.spawned_count(),
            report.attempted(),
            report.no_item,
            report.spawn_failed
        );
        Ok(report)
    }

    /// Settlement pass, run when an extraction haul has been cleared.
    ///
    /// Moves the run into [`RunPhase::Extraction`].
    pub fn on_extraction_completed<H, P>(
        &mut self,
        host: &mut H,
        purchases: &mut P,
    ) -> SpawnResult<SettlementReport>
    where
        H: Host + ?Sized,
        P: PurchaseRecorder + ?Sized,
    {
        if !self.is_authoritative(host) {
            log::debug!("Not authoritative, leaving settlement to the host");
            return Ok(SettlementReport::skipped(SkipReason::NotAuthoritative));
        }

        self.phase = RunPhase::Extraction;
        let report = settle_extracted(host, purchases, &mut self.lifecycle);
        log::info!(
            "Settled {} of {} spawned items ({} left in place, {} gone)",
            report.settled_count(),
            report.tracked,
            report.untouched,
            report.vanished
        );
        Ok(report)
    }

    /// Whether a map marker for an item of `item_type` should be hidden.
    pub fn suppress_map_marker<H: Host + ?Sized>(&self, host: &H, item_type: ItemType) -> bool {
        host.is_level() && suppress_map_marker(&self.config, item_type)
    }
}

/// Filters the catalog for `category` and draws one item from it.
fn choose_item<R: Rng + ?Sized>(
    catalog: &Catalog,
    category: SpawnCategory,
    config: &SpawnConfig,
    disallowed: &DisallowedSet,
    rng: &mut R,
) -> SpawnResult<Option<ItemDefinition>> {
    let candidates = eligible_items(catalog, category, disallowed);
    if candidates.is_empty() {
        log::warn!("No valid items found for {} after filtering", category);
        return Ok(None);
    }

    let mode = SelectionMode::from_weighting(config.category(category).weight_by_value);
    let selection = match select_item(&candidates, mode, rng)? {
        Some(selection) => selection,
        None => {
            log::warn!("Weighted selection failed for {}", category);
            return Ok(None);
        }
    };

    match mode {
        SelectionMode::ValueWeighted => log::info!(
            "Selected {} at {:.2}% chance (weighted by shop price)",
            selection.item.name,
            selection.chance_percent
        ),
        SelectionMode::Uniform => log::info!(
            "Selected {} at {:.2}% chance (equal probability)",
            selection.item.name,
            selection.chance_percent
        ),
    }
    Ok(Some(selection.item.clone()))
}
