//! # Spawn Executor
//!
//! Turns a chosen item and a location into a host entity and starts tracking it.

use crate::{
    defaults, CandidateLocation, EntityId, Host, ItemDefinition, LifecycleLedger, Placement,
    SpawnFailure, SpawnMode, SpawnRequest, TrackedEntity,
};

/// Builds the host request for an item at a placement.
///
/// # Examples
///
/// ```
/// use shopspawn::{spawn_request, ItemDefinition, ItemType, Placement, SpawnMode};
///
/// let item = ItemDefinition::new("Item Drone Feather", ItemType::Drone, 20.0);
/// let request = spawn_request(&item, Placement::default(), SpawnMode::Local);
/// assert_eq!(request.asset_path, "Items/Item Drone Feather");
/// ```
pub fn spawn_request(item: &ItemDefinition, placement: Placement, mode: SpawnMode) -> SpawnRequest {
    SpawnRequest {
        item_name: item.name.clone(),
        asset_path: format!("{}{}", defaults::ITEM_ASSET_PREFIX, item.name),
        placement,
        mode,
    }
}

/// Asks the host to create `item` at `location` and registers the result.
///
/// Nothing is registered when the host fails to create the entity.
pub fn spawn_item<H: Host + ?Sized>(
    host: &mut H,
    lifecycle: &mut LifecycleLedger,
    item: &ItemDefinition,
    location: &CandidateLocation,
    mode: SpawnMode,
) -> Result<EntityId, SpawnFailure> {
    let request = spawn_request(item, location.placement, mode);
    let id = host.create_entity(&request)?;

    lifecycle.register(TrackedEntity {
        id,
        item_name: item.name.clone(),
        item_type: item.item_type,
        origin: location.id,
        placement: location.placement,
    });

    log::debug!(
        "Spawned {} as {} at location {:?} ({:?})",
        item.name,
        id,
        location.id,
        mode
    );
    Ok(id)
}
