//! Tiles, their symmetry lists, and the tileset that owns them.

use log::{debug, trace, warn};

use crate::blueprint::{FaceRef, FaceRegistry, PointId};
use crate::error::{TileError, TileResult};
use crate::face::{face_twist, FacePoint};
use crate::geometry::{Direction3D, Rotation3D, Transform3D};
use crate::sets::{AllowedTransforms, RotationSet, TransformSet};

/// A cube tile prototype with one face per side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Name of the visual prototype placed for this tile.
    pub prototype: String,
    /// Indexed by [`Direction3D::index`].
    pub faces: [FaceRef; Direction3D::COUNT],
    /// Rotations under which the tile looks unchanged. Always has the identity.
    normal_symmetries: RotationSet,
    /// Rotations which, combined with inversion, leave the tile looking unchanged.
    inverted_symmetries: RotationSet,
    pub allowed: AllowedTransforms,
}

impl Tile {
    /// A tile with no symmetry beyond the identity, allowed only untransformed.
    pub fn new(prototype: impl Into<String>, faces: [FaceRef; Direction3D::COUNT]) -> Self {
        let mut normal_symmetries = RotationSet::EMPTY;
        normal_symmetries.insert(Rotation3D::Identity);
        Self {
            prototype: prototype.into(),
            faces,
            normal_symmetries,
            inverted_symmetries: RotationSet::EMPTY,
            allowed: AllowedTransforms::none(),
        }
    }

    /// A tile showing the same face on all six sides.
    pub fn uniform(prototype: impl Into<String>, face: FaceRef) -> Self {
        Self::new(prototype, [face; Direction3D::COUNT])
    }

    pub fn with_allowed(mut self, allowed: AllowedTransforms) -> Self {
        self.allowed = allowed;
        self
    }

    #[inline]
    pub fn face(&self, dir: Direction3D) -> FaceRef {
        self.faces[dir.index()]
    }

    pub fn is_symmetric(&self, rotation: Rotation3D, inverted: bool) -> bool {
        if inverted {
            self.inverted_symmetries.contains(rotation)
        } else {
            self.normal_symmetries.contains(rotation)
        }
    }

    pub fn normal_symmetries(&self) -> RotationSet {
        self.normal_symmetries
    }

    pub fn inverted_symmetries(&self) -> RotationSet {
        self.inverted_symmetries
    }

    /// Both symmetry lists as one set of transforms.
    pub fn symmetries(&self) -> TransformSet {
        TransformSet::from_rotation_sets(self.normal_symmetries, self.inverted_symmetries)
    }

    /// Replaces both symmetry lists. The identity is kept regardless of `set`.
    pub fn set_symmetries(&mut self, set: TransformSet) {
        self.normal_symmetries = set.normal();
        self.normal_symmetries.insert(Rotation3D::Identity);
        self.inverted_symmetries = set.inverted();
    }

    /// Returns false if the symmetry was already listed.
    pub fn add_symmetry(&mut self, transform: Transform3D) -> bool {
        let set = if transform.invert {
            &mut self.inverted_symmetries
        } else {
            &mut self.normal_symmetries
        };
        let added = set.insert(transform.rotation);
        if !added {
            trace!("'{}' already lists {transform} as a symmetry", self.prototype);
        }
        added
    }

    /// Returns false if the symmetry was not listed. The identity cannot be removed.
    pub fn remove_symmetry(&mut self, transform: Transform3D) -> bool {
        if transform.is_identity() {
            return false;
        }
        if transform.invert {
            self.inverted_symmetries.remove(transform.rotation)
        } else {
            self.normal_symmetries.remove(transform.rotation)
        }
    }

    /// Lists every normal symmetry as an inverted symmetry too.
    pub fn copy_normal_to_inverted(&mut self) {
        self.inverted_symmetries = self.normal_symmetries;
    }

    /// The face that ends up on side `dir` once the tile is placed with `transform`.
    ///
    /// The blueprint is the one on side `transform^-1(dir)`; its 2D transform
    /// picks up the turn or mirror the placement gives that face.
    pub fn effective_face(&self, dir: Direction3D, transform: Transform3D) -> FaceRef {
        let source = transform.inverse().apply_to_side(dir);
        self.face(source).then(face_twist(transform, source))
    }
}

/// The shared footprint every tile prototype occupies, in prototype space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl TileBounds {
    pub fn size(&self) -> [f32; 3] {
        [0usize, 1, 2].map(|axis| self.max[axis] - self.min[axis])
    }

    pub fn center(&self) -> [f32; 3] {
        [0usize, 1, 2].map(|axis| (self.max[axis] + self.min[axis]) * 0.5)
    }
}

impl Default for TileBounds {
    /// A unit cube around the origin.
    fn default() -> Self {
        Self {
            min: [-0.5; 3],
            max: [0.5; 3],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tileset {
    pub bounds: TileBounds,
    pub tiles: Vec<Tile>,
    pub faces: FaceRegistry,
}

impl Tileset {
    pub fn new(bounds: TileBounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Appends a tile and returns its index.
    pub fn add_tile(&mut self, tile: Tile) -> usize {
        debug!("added tile {} '{}'", self.tiles.len(), tile.prototype);
        self.tiles.push(tile);
        self.tiles.len() - 1
    }

    pub fn tile(&self, index: usize) -> TileResult<&Tile> {
        self.tiles.get(index).ok_or(TileError::InvalidTileIndex {
            index,
            count: self.tiles.len(),
        })
    }

    pub fn tile_mut(&mut self, index: usize) -> TileResult<&mut Tile> {
        let count = self.tiles.len();
        self.tiles
            .get_mut(index)
            .ok_or(TileError::InvalidTileIndex { index, count })
    }

    /// The corner IDs showing on side `dir` of a placed tile.
    pub fn face_points(
        &self,
        tile: usize,
        dir: Direction3D,
        transform: Transform3D,
    ) -> TileResult<[PointId; FacePoint::COUNT]> {
        let face = self.tile(tile)?.effective_face(dir, transform);
        let source = transform.inverse().apply_to_side(dir);
        self.faces
            .resolve(face)
            .map_err(|error| with_slot(error, tile, source))
    }

    /// Every transform that leaves all six resolved faces of a tile unchanged.
    ///
    /// Faces carry no more detail than their corner IDs, so this is an upper
    /// bound of what the tile's visual prototype allows.
    pub fn detect_face_symmetries(&self, tile: usize) -> TileResult<TransformSet> {
        let mut unchanged = [[0; FacePoint::COUNT]; Direction3D::COUNT];
        for dir in Direction3D::ALL {
            unchanged[dir.index()] = self.face_points(tile, dir, Transform3D::IDENTITY)?;
        }

        let mut found = TransformSet::EMPTY;
        for transform in Transform3D::ALL {
            let mut same = true;
            for dir in Direction3D::ALL {
                if self.face_points(tile, dir, transform)? != unchanged[dir.index()] {
                    same = false;
                    break;
                }
            }
            if same {
                found.insert(transform);
            }
        }
        debug!("tile {tile} has {} face symmetries", found.len());
        Ok(found)
    }

    /// Replaces a tile's symmetry lists with the detected face symmetries.
    pub fn apply_detected_symmetries(&mut self, tile: usize) -> TileResult<()> {
        let found = self.detect_face_symmetries(tile)?;
        self.tile_mut(tile)?.set_symmetries(found);
        Ok(())
    }

    /// Checks every face reference, the identity symmetry of every tile, and
    /// the global uniqueness of point IDs.
    pub fn validate(&self) -> TileResult<()> {
        for (index, tile) in self.tiles.iter().enumerate() {
            if !tile.is_symmetric(Rotation3D::Identity, false) {
                warn!("tile {index} '{}' lost its identity symmetry", tile.prototype);
                return Err(TileError::MissingIdentitySymmetry { tile: index });
            }
            for dir in Direction3D::ALL {
                let face = tile.face(dir);
                if let Err(error) = self.faces.get(face.blueprint) {
                    warn!("tile {index} '{}' has a dangling face on {dir}", tile.prototype);
                    return Err(with_slot(error, index, dir));
                }
            }
        }
        self.faces.check_unique_ids()
    }
}

/// Adds the tile and side to a blueprint lookup failure.
fn with_slot(error: TileError, tile: usize, dir: Direction3D) -> TileError {
    match error {
        TileError::InvalidBlueprintIndex { index, count, .. } => TileError::InvalidBlueprintIndex {
            index,
            count,
            slot: Some((tile, dir)),
        },
        other => other,
    }
}
