//! Tile Symmetry Library
//!
//! Models the symmetries of cube tiles for tiled 3D wave function collapse:
//! the 48 ways to place a cube, how each placement moves and twists the
//! tile's faces, and which placed tiles may touch across a shared face.

pub mod blueprint;
pub mod compat;
pub mod error;
pub mod face;
pub mod geometry;
pub mod presets;
pub mod report;
pub mod sets;
pub mod tile;
pub mod variants;

pub use blueprint::{FaceBlueprint, FaceRef, FaceRegistry, PointId};
pub use compat::{are_compatible, faces_match, CompatibilityIndex, Placement};
pub use error::{TileError, TileResult};
pub use face::{face_twist, FacePoint, Transformation2D};
pub use geometry::{Direction3D, EulerAngles, Pose, Rotation3D, Transform3D};
pub use sets::{AllowedTransforms, RotationSet, TransformSet};
pub use tile::{Tile, TileBounds, Tileset};
pub use variants::{TileVariant, TileVariants};
