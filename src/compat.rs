//! Face matching between placed tiles.
//!
//! Two faces pressed together see each other mirrored: walking one face's
//! corners in winding order visits the other face's corners backwards. So the
//! corner IDs of touching faces must agree once one side is reversed.

use log::debug;
use rustc_hash::FxHashMap;

use crate::blueprint::PointId;
use crate::error::TileResult;
use crate::face::FacePoint;
use crate::geometry::{Direction3D, Transform3D};
use crate::tile::Tileset;
use crate::variants::TileVariants;

type FacePoints = [PointId; FacePoint::COUNT];

/// A tile placed with a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub tile: usize,
    pub transform: Transform3D,
}

impl Placement {
    pub const fn new(tile: usize, transform: Transform3D) -> Self {
        Self { tile, transform }
    }
}

/// True if face `a` can touch face `b`, given both faces' corner IDs as seen
/// from outside their own tile.
#[inline]
pub fn faces_match(a: &FacePoints, b: &FacePoints) -> bool {
    a.iter().eq(b.iter().rev())
}

/// True if `b` can sit next to `a` on `a`'s side `dir`.
pub fn are_compatible(
    tileset: &Tileset,
    a: Placement,
    b: Placement,
    dir: Direction3D,
) -> TileResult<bool> {
    let face_a = tileset.face_points(a.tile, dir, a.transform)?;
    let face_b = tileset.face_points(b.tile, dir.opposite(), b.transform)?;
    Ok(faces_match(&face_a, &face_b))
}

/// Precomputed neighbor lists for every variant of a tileset.
pub struct CompatibilityIndex {
    /// Corner IDs of every variant on every side.
    faces: Vec<[FacePoints; Direction3D::COUNT]>,
    /// Variants showing the given corner IDs on the given side.
    by_face: FxHashMap<(Direction3D, FacePoints), Vec<usize>>,
}

impl CompatibilityIndex {
    pub fn build(tileset: &Tileset, variants: &TileVariants) -> TileResult<Self> {
        let mut faces = Vec::with_capacity(variants.len());
        let mut by_face: FxHashMap<(Direction3D, FacePoints), Vec<usize>> = FxHashMap::default();

        for (id, variant) in variants.iter().enumerate() {
            let mut sides = [[0; FacePoint::COUNT]; Direction3D::COUNT];
            for dir in Direction3D::ALL {
                let points = tileset.face_points(variant.tile, dir, variant.transform)?;
                sides[dir.index()] = points;
                by_face.entry((dir, points)).or_default().push(id);
            }
            faces.push(sides);
        }

        debug!(
            "indexed {} variants under {} distinct faces",
            faces.len(),
            by_face.len()
        );
        Ok(Self { faces, by_face })
    }

    /// Corner IDs variant `id` shows on side `dir`.
    pub fn face(&self, id: usize, dir: Direction3D) -> Option<&FacePoints> {
        self.faces.get(id).map(|sides| &sides[dir.index()])
    }

    /// Variants that may sit on side `dir` of variant `id`, in ascending order.
    pub fn neighbors(&self, id: usize, dir: Direction3D) -> &[usize] {
        let Some(points) = self.face(id, dir) else {
            return &[];
        };
        let mut wanted = *points;
        wanted.reverse();
        self.by_face
            .get(&(dir.opposite(), wanted))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of ordered variant pairs that may touch across side `dir`.
    pub fn pair_count(&self, dir: Direction3D) -> usize {
        (0..self.faces.len())
            .map(|id| self.neighbors(id, dir).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::FaceRef;
    use crate::face::Transformation2D;
    use crate::geometry::Rotation3D;
    use crate::sets::AllowedTransforms;
    use crate::tile::Tile;

    /// Every transform in the 24 x 24 x 6 grid of rotations and sides.
    fn rotation_grid() -> impl Iterator<Item = (Transform3D, Transform3D, Direction3D)> {
        Rotation3D::ALL.into_iter().flat_map(|a| {
            Rotation3D::ALL.into_iter().flat_map(move |b| {
                Direction3D::ALL
                    .into_iter()
                    .map(move |dir| (Transform3D::rotated(a), Transform3D::rotated(b), dir))
            })
        })
    }

    fn uniform_tileset(pattern: FacePoints) -> Tileset {
        let mut tileset = Tileset::default();
        let face = tileset.faces.create_blueprint_with_pattern("face", pattern);
        tileset.add_tile(Tile::uniform("cube", FaceRef::new(face, Transformation2D::Identity)));
        tileset
    }

    /// Blueprint 0 is `[1, 2, 3, 4]`; A shows it plainly on +X, B shows it
    /// through `b_transform` on -X. Every other face is a symmetric filler.
    fn flip_tileset(b_transform: Transformation2D) -> Tileset {
        let mut tileset = Tileset::default();
        let marked = tileset.faces.create_blueprint_with_pattern("marked", [1, 2, 3, 4]);
        let filler = tileset.faces.create_blueprint_with_pattern("filler", [0, 0, 0, 0]);
        assert_eq!(tileset.faces.get(filler).unwrap().start_i, 5);
        let filler = FaceRef::new(filler, Transformation2D::Identity);

        let mut a = Tile::uniform("a", filler);
        a.faces[Direction3D::MaxX.index()] = FaceRef::new(marked, Transformation2D::Identity);
        let mut b = Tile::uniform("b", filler);
        b.faces[Direction3D::MinX.index()] = FaceRef::new(marked, b_transform);
        tileset.add_tile(a);
        tileset.add_tile(b);
        tileset
    }

    fn matching_placements_of_b(tileset: &Tileset) -> Vec<Transform3D> {
        let a = Placement::new(0, Transform3D::IDENTITY);
        Transform3D::ALL
            .into_iter()
            .filter(|&t| are_compatible(tileset, a, Placement::new(1, t), Direction3D::MaxX).unwrap())
            .collect()
    }

    #[test]
    fn test_faces_match_reverses_one_side() {
        assert!(faces_match(&[1, 2, 3, 4], &[4, 3, 2, 1]));
        assert!(!faces_match(&[1, 2, 3, 4], &[1, 2, 3, 4]));
        assert!(faces_match(&[7, 7, 7, 7], &[7, 7, 7, 7]));
    }

    #[test]
    fn test_symmetric_cube_matches_itself_everywhere() {
        let tileset = uniform_tileset([0, 0, 0, 0]);
        for (ta, tb, dir) in rotation_grid() {
            assert!(
                are_compatible(&tileset, Placement::new(0, ta), Placement::new(0, tb), dir).unwrap(),
                "{ta} / {tb} across {dir}"
            );
        }
    }

    #[test]
    fn test_distinct_corners_never_match_unmirrored() {
        let tileset = uniform_tileset([0, 1, 2, 3]);
        for (ta, tb, dir) in rotation_grid() {
            assert!(
                !are_compatible(&tileset, Placement::new(0, ta), Placement::new(0, tb), dir).unwrap(),
                "{ta} / {tb} across {dir}"
            );
        }
    }

    #[test]
    fn test_flipped_face_matches_when_corners_line_up() {
        let tileset = flip_tileset(Transformation2D::FlipX);
        assert_eq!(
            matching_placements_of_b(&tileset),
            vec![Transform3D::rotated(Rotation3D::AxisX180)]
        );

        // unrotated, B shows [2, 1, 4, 3] against A's [1, 2, 3, 4]
        let plain = tileset.face_points(1, Direction3D::MinX, Transform3D::IDENTITY).unwrap();
        assert_eq!(plain, [2, 1, 4, 3]);
        // half a turn about X brings it to [4, 3, 2, 1], the mirror of A
        let turned = tileset
            .face_points(1, Direction3D::MinX, Transform3D::rotated(Rotation3D::AxisX180))
            .unwrap();
        assert_eq!(turned, [4, 3, 2, 1]);
        let facing = tileset.face_points(0, Direction3D::MaxX, Transform3D::IDENTITY).unwrap();
        assert!(faces_match(&facing, &turned));
    }

    #[test]
    fn test_flip_choice_decides_the_matching_placement() {
        let flipped_y = flip_tileset(Transformation2D::FlipY);
        assert_eq!(matching_placements_of_b(&flipped_y), vec![Transform3D::IDENTITY]);

        let unflipped = flip_tileset(Transformation2D::Identity);
        assert_eq!(
            matching_placements_of_b(&unflipped),
            vec![Transform3D::inverted(Rotation3D::AxisZ180)]
        );
    }

    #[test]
    fn test_compatibility_is_symmetric() {
        let tileset = flip_tileset(Transformation2D::FlipDiag2);
        for ta in Transform3D::ALL.into_iter().step_by(5) {
            for tb in Transform3D::ALL {
                for dir in Direction3D::ALL {
                    let a = Placement::new(0, ta);
                    let b = Placement::new(1, tb);
                    assert_eq!(
                        are_compatible(&tileset, a, b, dir).unwrap(),
                        are_compatible(&tileset, b, a, dir.opposite()).unwrap(),
                        "{ta} / {tb} across {dir}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_index_agrees_with_pairwise_checks() {
        let mut tileset = flip_tileset(Transformation2D::FlipX);
        for tile in &mut tileset.tiles {
            tile.allowed = AllowedTransforms::everything();
        }
        for index in 0..tileset.tiles.len() {
            tileset.apply_detected_symmetries(index).unwrap();
        }
        let variants = TileVariants::build(&tileset).unwrap();
        let index = CompatibilityIndex::build(&tileset, &variants).unwrap();

        for dir in Direction3D::ALL {
            for (id, a) in variants.iter().enumerate() {
                let expected: Vec<usize> = variants
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| {
                        are_compatible(
                            &tileset,
                            Placement::new(a.tile, a.transform),
                            Placement::new(b.tile, b.transform),
                            dir,
                        )
                        .unwrap()
                    })
                    .map(|(other, _)| other)
                    .collect();
                assert_eq!(index.neighbors(id, dir), expected.as_slice(), "variant {id} on {dir}");
            }
        }
        assert!(index.neighbors(variants.len(), Direction3D::MaxX).is_empty());
    }
}
