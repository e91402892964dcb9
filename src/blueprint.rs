//! Face blueprints: the canonical corner patterns that tile faces refer to.
//!
//! A blueprint owns four point IDs, one per corner. Two faces touch correctly
//! when their corner IDs agree, so IDs must never be shared between unrelated
//! blueprints. The registry hands out fresh ID ranges to keep it that way.

use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{TileError, TileResult};
use crate::face::{FacePoint, Transformation2D};

/// Identifier of one face corner.
pub type PointId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceBlueprint {
    pub name: String,
    /// Offset added to every entry of `point_ids`.
    pub start_i: PointId,
    /// Per-corner IDs relative to `start_i`, in [`FacePoint`] order.
    pub point_ids: [PointId; FacePoint::COUNT],
}

impl FaceBlueprint {
    /// The globally meaningful IDs: `point_ids` offset by `start_i`.
    pub fn absolute_ids(&self) -> [PointId; FacePoint::COUNT] {
        self.point_ids.map(|id| self.start_i + id)
    }

    /// One past the largest absolute ID this blueprint uses.
    fn end_id(&self) -> PointId {
        self.absolute_ids().into_iter().max().map_or(self.start_i, |id| id + 1)
    }
}

/// A tile face: a blueprint, read through a 2D transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaceRef {
    pub blueprint: usize,
    pub transform: Transformation2D,
}

impl FaceRef {
    pub const fn new(blueprint: usize, transform: Transformation2D) -> Self {
        Self {
            blueprint,
            transform,
        }
    }

    /// The same face with `next` applied after its own transform.
    pub fn then(self, next: Transformation2D) -> Self {
        Self {
            blueprint: self.blueprint,
            transform: self.transform.then(next),
        }
    }
}

/// The ordered list of blueprints a tileset owns.
///
/// Creating blueprints needs `&mut self`. Callers sharing a registry between
/// threads wrap it in a `Mutex`, which also serializes the ID allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceRegistry {
    blueprints: Vec<FaceBlueprint>,
}

impl FaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FaceBlueprint> {
        self.blueprints.iter()
    }

    /// One past the largest absolute point ID in use, or 0 when empty.
    ///
    /// Computed from the blueprints each time, so it stays correct after
    /// blueprints are edited or loaded from elsewhere.
    pub fn next_free_id(&self) -> PointId {
        self.blueprints.iter().map(FaceBlueprint::end_id).max().unwrap_or(0)
    }

    /// Adds a blueprint with four fresh, distinct point IDs and returns its index.
    pub fn create_blueprint(&mut self, name: impl Into<String>) -> usize {
        self.create_blueprint_with_pattern(name, [0, 1, 2, 3])
    }

    /// Adds a blueprint whose corners follow `pattern` (relative IDs, so
    /// `[0, 0, 0, 0]` is a face that looks the same from every side), placed
    /// after every ID in use. Returns its index.
    pub fn create_blueprint_with_pattern(
        &mut self,
        name: impl Into<String>,
        pattern: [PointId; FacePoint::COUNT],
    ) -> usize {
        let blueprint = FaceBlueprint {
            name: name.into(),
            start_i: self.next_free_id(),
            point_ids: pattern,
        };
        debug!(
            "created blueprint {} '{}' with points {:?}",
            self.blueprints.len(),
            blueprint.name,
            blueprint.absolute_ids()
        );
        self.blueprints.push(blueprint);
        self.blueprints.len() - 1
    }

    /// Copies a blueprint's pattern into a new blueprint with its own IDs.
    pub fn duplicate_blueprint(&mut self, index: usize) -> TileResult<usize> {
        let source = self.get(index)?;
        let name = format!("{} (copy)", source.name);
        let pattern = source.point_ids;
        Ok(self.create_blueprint_with_pattern(name, pattern))
    }

    pub fn get(&self, index: usize) -> TileResult<&FaceBlueprint> {
        self.blueprints
            .get(index)
            .ok_or(TileError::InvalidBlueprintIndex {
                index,
                count: self.blueprints.len(),
                slot: None,
            })
    }

    pub fn get_mut(&mut self, index: usize) -> TileResult<&mut FaceBlueprint> {
        let count = self.blueprints.len();
        self.blueprints
            .get_mut(index)
            .ok_or(TileError::InvalidBlueprintIndex {
                index,
                count,
                slot: None,
            })
    }

    /// The absolute corner IDs of a face, in [`FacePoint`] order.
    pub fn resolve(&self, face: FaceRef) -> TileResult<[PointId; FacePoint::COUNT]> {
        let blueprint = self.get(face.blueprint)?;
        Ok(face.transform.apply(blueprint.absolute_ids()))
    }

    /// Checks that no point ID is used by two different blueprints.
    pub fn check_unique_ids(&self) -> TileResult<()> {
        let mut owners: FxHashMap<PointId, usize> = FxHashMap::default();
        for (index, blueprint) in self.blueprints.iter().enumerate() {
            for point in blueprint.absolute_ids() {
                match owners.get(&point) {
                    Some(&first) if first != index => {
                        return Err(TileError::OverlappingPointIds {
                            first,
                            second: index,
                            point,
                        });
                    }
                    Some(_) => {}
                    None => {
                        owners.insert(point, index);
                    }
                }
            }
        }
        Ok(())
    }
}
