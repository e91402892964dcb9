//! The square face of a cube tile: its corners, the 8 transforms of the square,
//! and how a 3D transform twists a face within its own plane.

use std::fmt;

use crate::error::{TileError, TileResult};
use crate::geometry::{Coord, Direction3D, Transform3D, NUM_TRANSFORMS};

/// One corner of a face, as seen from outside the tile.
///
/// Declared in winding order, so `index()` addresses the 4-element point arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum FacePoint {
    BottomLeft,
    BottomRight,
    TopRight,
    TopLeft,
}

impl FacePoint {
    pub const COUNT: usize = 4;

    pub const ALL: [FacePoint; Self::COUNT] = [
        FacePoint::BottomLeft,
        FacePoint::BottomRight,
        FacePoint::TopRight,
        FacePoint::TopLeft,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position in the face frame, each component -1 or 1.
    pub const fn coords(self) -> (i32, i32) {
        match self {
            FacePoint::BottomLeft => (-1, -1),
            FacePoint::BottomRight => (1, -1),
            FacePoint::TopRight => (1, 1),
            FacePoint::TopLeft => (-1, 1),
        }
    }

    pub const fn from_coords(coords: (i32, i32)) -> Option<FacePoint> {
        match coords {
            (-1, -1) => Some(FacePoint::BottomLeft),
            (1, -1) => Some(FacePoint::BottomRight),
            (1, 1) => Some(FacePoint::TopRight),
            (-1, 1) => Some(FacePoint::TopLeft),
            _ => None,
        }
    }
}

impl TryFrom<u8> for FacePoint {
    type Error = TileError;

    fn try_from(ordinal: u8) -> TileResult<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(TileError::UnmappedEnumValue {
                kind: "FacePoint",
                ordinal,
            })
    }
}

/// The symmetries of a square (dihedral group of order 8).
///
/// Rotations are clockwise as seen from outside the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Transformation2D {
    #[default]
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    /// Mirror left/right.
    FlipX,
    /// Mirror top/bottom.
    FlipY,
    /// Mirror across the BottomLeft-TopRight diagonal.
    FlipDiag1,
    /// Mirror across the TopLeft-BottomRight diagonal.
    FlipDiag2,
}

pub const NUM_FACE_TRANSFORMS: usize = 8;

/// A 2x2 integer matrix, rows first.
pub type Matrix2 = [[i32; 2]; 2];

/// Matrix of each transform acting on face-frame column vectors `(u, v)`.
const MATRICES: [Matrix2; NUM_FACE_TRANSFORMS] = [
    [[1, 0], [0, 1]],   // Identity
    [[0, 1], [-1, 0]],  // Rotate90
    [[-1, 0], [0, -1]], // Rotate180
    [[0, -1], [1, 0]],  // Rotate270
    [[-1, 0], [0, 1]],  // FlipX
    [[1, 0], [0, -1]],  // FlipY
    [[0, 1], [1, 0]],   // FlipDiag1
    [[0, -1], [-1, 0]], // FlipDiag2
];

const fn mat2_mul(a: Matrix2, b: Matrix2) -> Matrix2 {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}

/// Cayley table: `table[first][second]` applies `first`, then `second`.
const fn build_then_table() -> [[Transformation2D; NUM_FACE_TRANSFORMS]; NUM_FACE_TRANSFORMS] {
    let mut table = [[Transformation2D::Identity; NUM_FACE_TRANSFORMS]; NUM_FACE_TRANSFORMS];

    let mut first = 0;
    while first < NUM_FACE_TRANSFORMS {
        let mut second = 0;
        while second < NUM_FACE_TRANSFORMS {
            let product = mat2_mul(MATRICES[second], MATRICES[first]);
            table[first][second] = match Transformation2D::from_matrix(product) {
                Some(t) => t,
                None => panic!("square transforms are not closed under composition"),
            };
            second += 1;
        }
        first += 1;
    }
    table
}

static THEN: [[Transformation2D; NUM_FACE_TRANSFORMS]; NUM_FACE_TRANSFORMS] = build_then_table();

impl Transformation2D {
    pub const ALL: [Transformation2D; NUM_FACE_TRANSFORMS] = [
        Transformation2D::Identity,
        Transformation2D::Rotate90,
        Transformation2D::Rotate180,
        Transformation2D::Rotate270,
        Transformation2D::FlipX,
        Transformation2D::FlipY,
        Transformation2D::FlipDiag1,
        Transformation2D::FlipDiag2,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn matrix(self) -> Matrix2 {
        MATRICES[self as usize]
    }

    pub const fn from_matrix(matrix: Matrix2) -> Option<Transformation2D> {
        let mut i = 0;
        while i < NUM_FACE_TRANSFORMS {
            let m = MATRICES[i];
            if m[0][0] == matrix[0][0]
                && m[0][1] == matrix[0][1]
                && m[1][0] == matrix[1][0]
                && m[1][1] == matrix[1][1]
            {
                return Some(Self::ALL[i]);
            }
            i += 1;
        }
        None
    }

    /// Where the corner `point` ends up after this transform.
    pub const fn apply_to_point(self, point: FacePoint) -> FacePoint {
        let m = self.matrix();
        let (u, v) = point.coords();
        match FacePoint::from_coords((m[0][0] * u + m[0][1] * v, m[1][0] * u + m[1][1] * v)) {
            Some(moved) => moved,
            None => panic!("square transform moved a corner off the square"),
        }
    }

    /// Moves per-corner values along with their corners.
    pub fn apply<T: Copy>(self, points: [T; 4]) -> [T; 4] {
        let mut out = points;
        for corner in FacePoint::ALL {
            out[self.apply_to_point(corner).index()] = points[corner.index()];
        }
        out
    }

    /// The transform equal to applying `self`, then `next`.
    #[inline]
    pub fn then(self, next: Transformation2D) -> Transformation2D {
        THEN[self.index()][next.index()]
    }

    pub const fn inverse(self) -> Transformation2D {
        match self {
            Transformation2D::Rotate90 => Transformation2D::Rotate270,
            Transformation2D::Rotate270 => Transformation2D::Rotate90,
            other => other,
        }
    }

    pub const fn is_reflection(self) -> bool {
        (self as u8) >= Transformation2D::FlipX as u8
    }

    /// True if the transform exchanges the horizontal and vertical directions.
    pub const fn swaps_axes(self) -> bool {
        self.matrix()[0][0] == 0
    }

    /// Short code used in tables.
    pub const fn code(self) -> &'static str {
        match self {
            Transformation2D::Identity => "I",
            Transformation2D::Rotate90 => "R90",
            Transformation2D::Rotate180 => "R180",
            Transformation2D::Rotate270 => "R270",
            Transformation2D::FlipX => "FX",
            Transformation2D::FlipY => "FY",
            Transformation2D::FlipDiag1 => "FD1",
            Transformation2D::FlipDiag2 => "FD2",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Transformation2D::Identity => "Identity",
            Transformation2D::Rotate90 => "Rotate90",
            Transformation2D::Rotate180 => "Rotate180",
            Transformation2D::Rotate270 => "Rotate270",
            Transformation2D::FlipX => "FlipX",
            Transformation2D::FlipY => "FlipY",
            Transformation2D::FlipDiag1 => "FlipDiag1",
            Transformation2D::FlipDiag2 => "FlipDiag2",
        }
    }
}

impl fmt::Display for Transformation2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Transformation2D {
    type Error = TileError;

    fn try_from(ordinal: u8) -> TileResult<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(TileError::UnmappedEnumValue {
                kind: "Transformation2D",
                ordinal,
            })
    }
}

/// The in-plane frame `(u, v)` of a face: looking at it from outside,
/// `u` points right and `v` points up, so `u x v` is the outward normal.
pub const fn face_axes(dir: Direction3D) -> (Coord, Coord) {
    match dir {
        Direction3D::MinX => ((0, 1, 0), (0, 0, -1)),
        Direction3D::MaxX => ((0, 1, 0), (0, 0, 1)),
        Direction3D::MinY => ((0, 0, 1), (-1, 0, 0)),
        Direction3D::MaxY => ((0, 0, 1), (1, 0, 0)),
        Direction3D::MinZ => ((1, 0, 0), (0, -1, 0)),
        Direction3D::MaxZ => ((1, 0, 0), (0, 1, 0)),
    }
}

const fn dot((ax, ay, az): Coord, (bx, by, bz): Coord) -> i32 {
    ax * bx + ay * by + az * bz
}

/// Builds the twist of every (transform, face) pair at compile time.
const fn build_twist_table() -> [[Transformation2D; Direction3D::COUNT]; NUM_TRANSFORMS] {
    let mut table = [[Transformation2D::Identity; Direction3D::COUNT]; NUM_TRANSFORMS];

    let mut t = 0;
    while t < NUM_TRANSFORMS {
        let transform = Transform3D::ALL[t];
        let mut s = 0;
        while s < Direction3D::COUNT {
            let source = Direction3D::ALL[s];
            let target = match Direction3D::from_vector(transform.apply(source.vector())) {
                Some(dir) => dir,
                None => panic!("a transform moved a face normal off the axes"),
            };
            let (us, vs) = face_axes(source);
            let (ut, vt) = face_axes(target);
            // express the moved source frame in the target frame
            let u = transform.apply(us);
            let v = transform.apply(vs);
            let matrix = [[dot(u, ut), dot(v, ut)], [dot(u, vt), dot(v, vt)]];
            table[t][s] = match Transformation2D::from_matrix(matrix) {
                Some(twist) => twist,
                None => panic!("a transform does not map a face onto a face"),
            };
            s += 1;
        }
        t += 1;
    }
    table
}

static TWISTS: [[Transformation2D; Direction3D::COUNT]; NUM_TRANSFORMS] = build_twist_table();

/// How the face on side `source` is turned or mirrored within its plane when
/// `transform` carries it to `transform.apply_to_side(source)`.
#[inline]
pub fn face_twist(transform: Transform3D, source: Direction3D) -> Transformation2D {
    TWISTS[transform.index()][source.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rotation3D;

    fn cross((ax, ay, az): Coord, (bx, by, bz): Coord) -> Coord {
        (ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    #[test]
    fn test_face_frames_are_right_handed() {
        for dir in Direction3D::ALL {
            let (u, v) = face_axes(dir);
            assert_eq!(cross(u, v), dir.vector(), "frame of {dir}");
        }
    }

    #[test]
    fn test_group_closure_and_associativity() {
        for a in Transformation2D::ALL {
            for b in Transformation2D::ALL {
                assert_eq!(a.then(b).matrix(), mat2_mul(b.matrix(), a.matrix()));
                for c in Transformation2D::ALL {
                    assert_eq!(a.then(b).then(c), a.then(b.then(c)), "({a} {b}) {c}");
                }
            }
        }
    }

    #[test]
    fn test_identity_and_inverse_laws() {
        for a in Transformation2D::ALL {
            assert_eq!(a.then(Transformation2D::Identity), a);
            assert_eq!(Transformation2D::Identity.then(a), a);
            assert_eq!(a.then(a.inverse()), Transformation2D::Identity, "{a}");
            if a.is_reflection() {
                assert_eq!(a.inverse(), a);
            }
        }
    }

    #[test]
    fn test_apply_moves_point_ids() {
        let ids = [1, 2, 3, 4];
        assert_eq!(Transformation2D::Identity.apply(ids), [1, 2, 3, 4]);
        assert_eq!(Transformation2D::Rotate90.apply(ids), [2, 3, 4, 1]);
        assert_eq!(Transformation2D::Rotate180.apply(ids), [3, 4, 1, 2]);
        assert_eq!(Transformation2D::FlipX.apply(ids), [2, 1, 4, 3]);
        assert_eq!(Transformation2D::FlipY.apply(ids), [4, 3, 2, 1]);
        // diagonal flips hold the corners on their diagonal
        assert_eq!(Transformation2D::FlipDiag1.apply(ids), [1, 4, 3, 2]);
        assert_eq!(Transformation2D::FlipDiag2.apply(ids), [3, 2, 1, 4]);
    }

    #[test]
    fn test_apply_respects_composition() {
        let ids = ['a', 'b', 'c', 'd'];
        for a in Transformation2D::ALL {
            for b in Transformation2D::ALL {
                assert_eq!(a.then(b).apply(ids), b.apply(a.apply(ids)), "{a} then {b}");
            }
        }
    }

    #[test]
    fn test_swaps_axes() {
        let swapping: Vec<_> = Transformation2D::ALL
            .into_iter()
            .filter(|t| t.swaps_axes())
            .collect();
        assert_eq!(
            swapping,
            vec![
                Transformation2D::Rotate90,
                Transformation2D::Rotate270,
                Transformation2D::FlipDiag1,
                Transformation2D::FlipDiag2
            ]
        );
    }

    #[test]
    fn test_inversion_mirrors_every_face() {
        let mirror = Transform3D::inverted(Rotation3D::Identity);
        for dir in Direction3D::ALL {
            assert_eq!(face_twist(mirror, dir), Transformation2D::FlipX, "face {dir}");
        }
        for dir in Direction3D::ALL {
            assert_eq!(face_twist(Transform3D::IDENTITY, dir), Transformation2D::Identity);
        }
    }

    #[test]
    fn test_axis_rotation_spins_its_own_faces() {
        let quarter = Transform3D::rotated(Rotation3D::AxisX90);
        assert_eq!(face_twist(quarter, Direction3D::MaxX), Transformation2D::Rotate270);
        assert_eq!(face_twist(quarter, Direction3D::MinX), Transformation2D::Rotate90);
    }

    #[test]
    fn test_twist_composes_along_the_face_path() {
        for a in Transform3D::ALL {
            for b in Transform3D::ALL {
                for side in Direction3D::ALL {
                    let step = face_twist(a, side).then(face_twist(b, a.apply_to_side(side)));
                    assert_eq!(face_twist(a.then(b), side), step, "{a} then {b} on {side}");
                }
            }
        }
    }

    #[test]
    fn test_twist_preserves_handedness() {
        for transform in Transform3D::ALL {
            for side in Direction3D::ALL {
                assert_eq!(
                    face_twist(transform, side).is_reflection(),
                    transform.invert,
                    "{transform} on {side}"
                );
            }
        }
    }
}
