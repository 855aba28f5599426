//! # Host Interface
//!
//! The seams through which the engine talks to the game: enumerating
//! locations, creating and destroying entities, asking where they are, and
//! recording purchases.

use crate::{Catalog, CandidateLocation, EntityId, Placement, RegionId};

/// Role of this participant in the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    /// Only player, owns all state
    Singleplayer,
    /// Multiplayer session owner, decides for everyone
    MultiplayerHost,
    /// Multiplayer guest, only observes replicated results
    MultiplayerClient,
}

impl ParticipantRole {
    /// Whether this participant may make world-mutating decisions.
    pub fn is_authoritative(self) -> bool {
        match self {
            ParticipantRole::Singleplayer | ParticipantRole::MultiplayerHost => true,
            ParticipantRole::MultiplayerClient => false,
        }
    }

    /// How entities created by this participant are instantiated.
    pub fn spawn_mode(self) -> SpawnMode {
        match self {
            ParticipantRole::Singleplayer | ParticipantRole::MultiplayerClient => SpawnMode::Local,
            ParticipantRole::MultiplayerHost => SpawnMode::Replicated,
        }
    }
}

/// Instantiation semantics requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnMode {
    /// Load the asset and instantiate it locally
    Local,
    /// Instantiate through the replication layer so every participant sees it
    Replicated,
}

/// A request to create one item entity.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub item_name: String,
    /// Host asset path, `Items/<name>`
    pub asset_path: String,
    pub placement: Placement,
    pub mode: SpawnMode,
}

/// Why the host could not create an entity.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpawnFailure {
    #[error("asset {0} could not be loaded")]
    MissingAsset(String),

    #[error("host rejected the spawn: {0}")]
    Rejected(String),
}

/// The game environment the engine runs inside.
pub trait Host {
    /// True for real gameplay levels, false for menus, lobbies and shops.
    fn is_level(&self) -> bool;

    fn role(&self) -> ParticipantRole;

    /// The item catalog as currently loaded.
    fn catalog(&self) -> &Catalog;

    /// Candidate locations of the current level.
    fn candidate_locations(&self) -> Vec<CandidateLocation>;

    fn create_entity(&mut self, request: &SpawnRequest) -> Result<EntityId, SpawnFailure>;

    /// Removes an entity immediately.
    fn destroy_entity(&mut self, entity: EntityId);

    /// Regions the entity is currently in, or `None` if it no longer exists.
    fn entity_regions(&self, entity: EntityId) -> Option<Vec<RegionId>>;

    fn is_extraction_region(&self, region: RegionId) -> bool;
}

/// The economy layer that turns a settled item into a purchase.
pub trait PurchaseRecorder {
    fn record_purchase(&mut self, item_name: &str);
}

impl PurchaseRecorder for Vec<String> {
    fn record_purchase(&mut self, item_name: &str) {
        self.push(item_name.to_string());
    }
}
