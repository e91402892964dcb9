//! Small ready-made tilesets for the CLI, tests and benchmarks.

use crate::blueprint::FaceRef;
use crate::error::TileResult;
use crate::face::Transformation2D;
use crate::geometry::Direction3D;
use crate::sets::AllowedTransforms;
use crate::tile::{Tile, TileBounds, Tileset};

/// One cube with the same fully symmetric face on every side, allowed under
/// all 48 transforms.
pub fn uniform_cube() -> TileResult<Tileset> {
    let mut tileset = Tileset::new(TileBounds::default());
    let face = tileset.faces.create_blueprint_with_pattern("plain", [0, 0, 0, 0]);

    let cube = Tile::uniform("cube", FaceRef::new(face, Transformation2D::Identity))
        .with_allowed(AllowedTransforms::everything());
    let index = tileset.add_tile(cube);
    tileset.apply_detected_symmetries(index)?;
    Ok(tileset)
}

/// Pipe pieces: an empty block, a straight pipe along X and an elbow joining
/// +X and +Y, all allowed under every rotation.
pub fn pipes() -> TileResult<Tileset> {
    let mut tileset = Tileset::new(TileBounds::default());
    let solid = tileset.faces.create_blueprint_with_pattern("solid", [0, 0, 0, 0]);
    let open = tileset.faces.create_blueprint_with_pattern("open", [0, 0, 0, 0]);
    let solid = FaceRef::new(solid, Transformation2D::Identity);
    let open = FaceRef::new(open, Transformation2D::Identity);

    let pipe = |name: &str, openings: &[Direction3D]| {
        let mut tile = Tile::uniform(name, solid).with_allowed(AllowedTransforms::rotations());
        for dir in openings {
            tile.faces[dir.index()] = open;
        }
        tile
    };

    let tiles = [
        pipe("empty", &[]),
        pipe("straight", &[Direction3D::MinX, Direction3D::MaxX]),
        pipe("elbow", &[Direction3D::MaxX, Direction3D::MaxY]),
    ];
    for tile in tiles {
        let index = tileset.add_tile(tile);
        tileset.apply_detected_symmetries(index)?;
    }
    Ok(tileset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rotation3D, Transform3D};
    use crate::sets::TransformSet;
    use crate::variants::TileVariants;

    #[test]
    fn test_presets_validate() {
        uniform_cube().unwrap().validate().unwrap();
        pipes().unwrap().validate().unwrap();
    }

    #[test]
    fn test_pipe_symmetries() {
        let tileset = pipes().unwrap();
        let counts: Vec<_> = tileset.tiles.iter().map(|t| t.symmetries().len()).collect();
        assert_eq!(counts, vec![48, 16, 4]);

        let elbow: TransformSet = [
            Transform3D::IDENTITY,
            Transform3D::rotated(Rotation3D::EdgesZa),
            Transform3D::inverted(Rotation3D::AxisZ180),
            Transform3D::inverted(Rotation3D::EdgesZb),
        ]
        .into_iter()
        .collect();
        assert_eq!(tileset.tiles[2].symmetries(), elbow);
        for tile in &tileset.tiles {
            assert!(tile.symmetries().is_group(), "{} symmetries", tile.prototype);
        }
    }

    #[test]
    fn test_variant_counts() {
        let cube = uniform_cube().unwrap();
        assert_eq!(TileVariants::build(&cube).unwrap().len(), 1);

        let tileset = pipes().unwrap();
        let variants = TileVariants::build(&tileset).unwrap();
        let per_tile: Vec<_> = (0..3).map(|tile| variants.variants_of(tile).len()).collect();
        assert_eq!(per_tile, vec![1, 3, 12]);
    }
}
