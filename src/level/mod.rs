//! # Level Module
//!
//! What the engine knows about a generated level: candidate locations, where
//! they sit, and the identifiers the host hands out for entities and regions.

pub mod host;

pub use host::*;

use crate::SpawnCategory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for host entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

/// Identity of a candidate location, unique within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u64);

/// Identity of a room or zone the host tracks entities in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u32);

/// Size class of a valuable volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeCategory {
    Tiny,
    Small,
    Medium,
    Big,
    Wide,
    Tall,
    VeryTall,
}

impl VolumeCategory {
    /// The spawn category a volume of this size hosts, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopspawn::{SpawnCategory, VolumeCategory};
    ///
    /// assert_eq!(VolumeCategory::Tiny.spawn_category(), Some(SpawnCategory::Upgrade));
    /// assert_eq!(VolumeCategory::Small.spawn_category(), Some(SpawnCategory::Drone));
    /// assert_eq!(VolumeCategory::Big.spawn_category(), None);
    /// ```
    pub fn spawn_category(self) -> Option<SpawnCategory> {
        match self {
            VolumeCategory::Tiny => Some(SpawnCategory::Upgrade),
            VolumeCategory::Small => Some(SpawnCategory::Drone),
            VolumeCategory::Medium
            | VolumeCategory::Big
            | VolumeCategory::Wide
            | VolumeCategory::Tall
            | VolumeCategory::VeryTall => None,
        }
    }

    pub fn all() -> [VolumeCategory; 7] {
        [
            VolumeCategory::Tiny,
            VolumeCategory::Small,
            VolumeCategory::Medium,
            VolumeCategory::Big,
            VolumeCategory::Wide,
            VolumeCategory::Tall,
            VolumeCategory::VeryTall,
        ]
    }
}

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A rotation quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }

    /// Rotation of `radians` around the vertical axis.
    pub fn from_yaw(radians: f32) -> Self {
        let half = radians * 0.5;
        Self {
            x: 0.0,
            y: half.sin(),
            z: 0.0,
            w: half.cos(),
        }
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

/// Position and orientation of a location or entity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Placement {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::identity())
    }
}

/// A location where an item may be placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateLocation {
    pub id: LocationId,
    pub volume: VolumeCategory,
    pub placement: Placement,
    /// The volume sits under a valuable switch; such volumes are never used
    pub has_switch: bool,
}

impl CandidateLocation {
    pub fn new(id: LocationId, volume: VolumeCategory, placement: Placement) -> Self {
        Self {
            id,
            volume,
            placement,
            has_switch: false,
        }
    }

    pub fn with_switch(mut self) -> Self {
        self.has_switch = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_tiny_and_small_volumes_host_items() {
        let hosting: Vec<_> = VolumeCategory::all()
            .into_iter()
            .filter(|v| v.spawn_category().is_some())
            .collect();
        assert_eq!(hosting, vec![VolumeCategory::Tiny, VolumeCategory::Small]);
    }

    #[test]
    fn test_yaw_quaternion_is_normalized() {
        let q = Quat::from_yaw(1.3);
        let norm = q.x * q.x + q.y * q.y + q.z * q.z + q.w * q.w;
        assert!((norm - 1.0).abs() < 1e-6);
        assert_eq!(Quat::from_yaw(0.0), Quat::identity());
    }

    #[test]
    fn test_location_with_switch() {
        let location = CandidateLocation::new(
            LocationId(3),
            VolumeCategory::Tiny,
            Placement::at(Vec3::new(1.0, 0.5, -2.0)),
        );
        assert!(!location.has_switch);
        assert!(location.with_switch().has_switch);
    }

    #[test]
    fn test_entity_id_uniqueness() {
        assert_ne!(new_entity_id(), new_entity_id());
    }
}
