//! Error type shared by every module of the crate.

use thiserror::Error;

use crate::blueprint::PointId;
use crate::geometry::Direction3D;

/// Data-integrity failures detected while reading a tileset.
///
/// These all indicate corrupted or stale authoring data, never a transient
/// condition, so nothing here is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    #[error("tile index {index} is out of range ({count} tiles)")]
    InvalidTileIndex { index: usize, count: usize },
    #[error("blueprint index {index} is out of range ({count} blueprints){}", describe_slot(.slot))]
    InvalidBlueprintIndex {
        index: usize,
        count: usize,
        /// The tile and face that held the reference, when known.
        slot: Option<(usize, Direction3D)>,
    },
    #[error("{kind} has no value with ordinal {ordinal}")]
    UnmappedEnumValue { kind: &'static str, ordinal: u8 },
    #[error("blueprints {first} and {second} both use point ID {point}")]
    OverlappingPointIds {
        first: usize,
        second: usize,
        point: PointId,
    },
    #[error("tile {tile} does not list the identity rotation as a normal symmetry")]
    MissingIdentitySymmetry { tile: usize },
}

fn describe_slot(slot: &Option<(usize, Direction3D)>) -> String {
    match *slot {
        Some((tile, direction)) => format!(" on tile {tile}, face {direction}"),
        None => String::new(),
    }
}

pub type TileResult<T> = Result<T, TileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blueprint_error_mentions_slot() {
        let error = TileError::InvalidBlueprintIndex {
            index: 7,
            count: 2,
            slot: Some((3, Direction3D::MaxY)),
        };
        assert_eq!(
            error.to_string(),
            "blueprint index 7 is out of range (2 blueprints) on tile 3, face +Y"
        );

        let bare = TileError::InvalidBlueprintIndex {
            index: 7,
            count: 2,
            slot: None,
        };
        assert_eq!(bare.to_string(), "blueprint index 7 is out of range (2 blueprints)");
    }
}
