//! Cube directions, rotations and transforms.
//!
//! A cube has 24 orientations (the rotation group of a cube). Adding a point
//! reflection gives the 48 transforms a tile can be placed with.
//!
//! Coordinates are right-handed. Every rotation is defined by a single signed
//! axis permutation in [`ROTATION_AXES`]; the composition, inverse and
//! direction tables are all derived from it at compile time, so they cannot
//! drift apart.

use std::fmt;

use crate::error::{TileError, TileResult};

/// An integer position or direction vector.
pub type Coord = (i32, i32, i32);

/// Number of distinct cube orientations.
pub const NUM_ROTATIONS: usize = 24;

/// Number of rotations, each with and without inversion.
pub const NUM_TRANSFORMS: usize = NUM_ROTATIONS * 2;

/// The six faces of a cube.
///
/// The declaration order is used to index per-face arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction3D {
    MinX,
    MaxX,
    MinY,
    MaxY,
    MinZ,
    MaxZ,
}

impl Direction3D {
    pub const COUNT: usize = 6;

    pub const ALL: [Direction3D; Self::COUNT] = [
        Direction3D::MinX,
        Direction3D::MaxX,
        Direction3D::MinY,
        Direction3D::MaxY,
        Direction3D::MinZ,
        Direction3D::MaxZ,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_min(self) -> bool {
        (self as u8) % 2 == 0
    }

    /// 0 for X, 1 for Y, 2 for Z.
    #[inline]
    pub const fn axis(self) -> usize {
        (self as usize) / 2
    }

    #[inline]
    pub const fn opposite(self) -> Direction3D {
        Self::ALL[(self as usize) ^ 1]
    }

    /// The outward unit normal of this face.
    pub const fn vector(self) -> Coord {
        match self {
            Direction3D::MinX => (-1, 0, 0),
            Direction3D::MaxX => (1, 0, 0),
            Direction3D::MinY => (0, -1, 0),
            Direction3D::MaxY => (0, 1, 0),
            Direction3D::MinZ => (0, 0, -1),
            Direction3D::MaxZ => (0, 0, 1),
        }
    }

    /// The face whose normal is `vector`, if it is an axis-aligned unit vector.
    pub const fn from_vector(vector: Coord) -> Option<Direction3D> {
        match vector {
            (-1, 0, 0) => Some(Direction3D::MinX),
            (1, 0, 0) => Some(Direction3D::MaxX),
            (0, -1, 0) => Some(Direction3D::MinY),
            (0, 1, 0) => Some(Direction3D::MaxY),
            (0, 0, -1) => Some(Direction3D::MinZ),
            (0, 0, 1) => Some(Direction3D::MaxZ),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction3D::MinX => "-X",
            Direction3D::MaxX => "+X",
            Direction3D::MinY => "-Y",
            Direction3D::MaxY => "+Y",
            Direction3D::MinZ => "-Z",
            Direction3D::MaxZ => "+Z",
        }
    }
}

impl fmt::Display for Direction3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Direction3D {
    type Error = TileError;

    fn try_from(ordinal: u8) -> TileResult<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(TileError::UnmappedEnumValue {
                kind: "Direction3D",
                ordinal,
            })
    }
}

/// The 24 proper rotations of a cube.
///
/// - `AxisK90/180/270`: right-handed quarter turns about axis K
///   (`AxisX90` takes +Y to +Z).
/// - `EdgesKa/Kb`: half turns about the line through the midpoints of two
///   opposite edges parallel to axis K. "a" grabs the edges in the major
///   diagonal plane, "b" the minor one.
/// - `CornerXYZ120/240`: turns about the body diagonal through corner XYZ,
///   where each letter is A for the min side and B for the max side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Rotation3D {
    #[default]
    Identity,
    AxisX90,
    AxisX180,
    AxisX270,
    AxisY90,
    AxisY180,
    AxisY270,
    AxisZ90,
    AxisZ180,
    AxisZ270,
    EdgesXa,
    EdgesXb,
    EdgesYa,
    EdgesYb,
    EdgesZa,
    EdgesZb,
    CornerAAA120,
    CornerAAA240,
    CornerABA120,
    CornerABA240,
    CornerBAA120,
    CornerBAA240,
    CornerBBA120,
    CornerBBA240,
}

/// Signed axis permutation for each rotation, in declaration order.
///
/// Entry `k` of a row says which input axis lands on output axis `k`:
/// `±1` for x, `±2` for y, `±3` for z. Equivalently, a row is the image of
/// the probe vector (1, 2, 3).
pub const ROTATION_AXES: [[i8; 3]; NUM_ROTATIONS] = [
    [1, 2, 3],    // Identity
    [1, -3, 2],   // AxisX90
    [1, -2, -3],  // AxisX180
    [1, 3, -2],   // AxisX270
    [3, 2, -1],   // AxisY90
    [-1, 2, -3],  // AxisY180
    [-3, 2, 1],   // AxisY270
    [-2, 1, 3],   // AxisZ90
    [-1, -2, 3],  // AxisZ180
    [2, -1, 3],   // AxisZ270
    [-1, 3, 2],   // EdgesXa
    [-1, -3, -2], // EdgesXb
    [3, -2, 1],   // EdgesYa
    [-3, -2, -1], // EdgesYb
    [2, 1, -3],   // EdgesZa
    [-2, -1, -3], // EdgesZb
    [2, 3, 1],    // CornerAAA120
    [3, 1, 2],    // CornerAAA240
    [3, -1, -2],  // CornerABA120
    [-2, -3, 1],  // CornerABA240
    [-3, -1, 2],  // CornerBAA120
    [-2, 3, -1],  // CornerBAA240
    [2, -3, -1],  // CornerBBA120
    [-3, 1, -2],  // CornerBBA240
];

/// Euler angles in quarter turns (x, y, z) for each rotation, in declaration order.
///
/// Each entry is the decomposition with the fewest non-zero angles.
const EULER_TURNS: [[u8; 3]; NUM_ROTATIONS] = [
    [0, 0, 0], // Identity
    [1, 0, 0], // AxisX90
    [2, 0, 0], // AxisX180
    [3, 0, 0], // AxisX270
    [0, 1, 0], // AxisY90
    [0, 2, 0], // AxisY180
    [0, 3, 0], // AxisY270
    [0, 0, 1], // AxisZ90
    [0, 0, 2], // AxisZ180
    [0, 0, 3], // AxisZ270
    [3, 0, 2], // EdgesXa
    [1, 0, 2], // EdgesXb
    [0, 1, 2], // EdgesYa
    [0, 3, 2], // EdgesYb
    [0, 2, 1], // EdgesZa
    [0, 2, 3], // EdgesZb
    [3, 0, 3], // CornerAAA120
    [0, 1, 1], // CornerAAA240
    [0, 1, 3], // CornerABA120
    [1, 0, 1], // CornerABA240
    [0, 3, 3], // CornerBAA120
    [3, 0, 1], // CornerBAA240
    [1, 0, 3], // CornerBBA120
    [0, 3, 1], // CornerBBA240
];

/// Picks the signed input component named by `axis` (see [`ROTATION_AXES`]).
#[inline(always)]
const fn signed_component(axis: i8, (x, y, z): Coord) -> i32 {
    let value = match axis.abs() {
        1 => x,
        2 => y,
        _ => z,
    };
    if axis < 0 {
        -value
    } else {
        value
    }
}

/// Builds the rotation composition table at compile time.
///
/// `table[first][second]` is the rotation equal to applying `first`, then `second`.
const fn build_composition_table() -> [[Rotation3D; NUM_ROTATIONS]; NUM_ROTATIONS] {
    let mut table = [[Rotation3D::Identity; NUM_ROTATIONS]; NUM_ROTATIONS];

    let mut first = 0;
    while first < NUM_ROTATIONS {
        let mut second = 0;
        while second < NUM_ROTATIONS {
            // the image of the probe vector identifies a rotation uniquely
            let probe = Rotation3D::ALL[second].apply(Rotation3D::ALL[first].apply((1, 2, 3)));
            table[first][second] =
                match Rotation3D::from_axes([probe.0 as i8, probe.1 as i8, probe.2 as i8]) {
                    Some(rotation) => rotation,
                    None => panic!("cube rotations are not closed under composition"),
                };
            second += 1;
        }
        first += 1;
    }
    table
}

/// Builds the inverse of every rotation: the one that takes the probe back home.
const fn build_inverse_table() -> [Rotation3D; NUM_ROTATIONS] {
    let mut table = [Rotation3D::Identity; NUM_ROTATIONS];

    let mut rot = 0;
    while rot < NUM_ROTATIONS {
        let moved = Rotation3D::ALL[rot].apply((1, 2, 3));
        let mut candidate = 0;
        let mut found = false;
        while candidate < NUM_ROTATIONS {
            let back = Rotation3D::ALL[candidate].apply(moved);
            if back.0 == 1 && back.1 == 2 && back.2 == 3 {
                table[rot] = Rotation3D::ALL[candidate];
                found = true;
            }
            candidate += 1;
        }
        assert!(found, "every rotation must have an inverse");
        rot += 1;
    }
    table
}

/// Builds the face permutation of every rotation.
///
/// `table[rot][dir]` is the direction the face `dir` points to after `rot`.
const fn build_direction_table() -> [[Direction3D; Direction3D::COUNT]; NUM_ROTATIONS] {
    let mut table = [[Direction3D::MinX; Direction3D::COUNT]; NUM_ROTATIONS];

    let mut rot = 0;
    while rot < NUM_ROTATIONS {
        let mut dir = 0;
        while dir < Direction3D::COUNT {
            let rotated = Rotation3D::ALL[rot].apply(Direction3D::ALL[dir].vector());
            table[rot][dir] = match Direction3D::from_vector(rotated) {
                Some(direction) => direction,
                None => panic!("a rotation moved a face normal off the axes"),
            };
            dir += 1;
        }
        rot += 1;
    }
    table
}

static COMPOSITION: [[Rotation3D; NUM_ROTATIONS]; NUM_ROTATIONS] = build_composition_table();
static INVERSES: [Rotation3D; NUM_ROTATIONS] = build_inverse_table();
static DIRECTIONS: [[Direction3D; Direction3D::COUNT]; NUM_ROTATIONS] = build_direction_table();

/// The kinds of rotation axis a cube has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationKind {
    Identity,
    /// Through the centers of two opposite faces.
    Face,
    /// Through the midpoints of two opposite edges.
    Edge,
    /// Through two opposite corners.
    Corner,
}

impl Rotation3D {
    pub const ALL: [Rotation3D; NUM_ROTATIONS] = [
        Rotation3D::Identity,
        Rotation3D::AxisX90,
        Rotation3D::AxisX180,
        Rotation3D::AxisX270,
        Rotation3D::AxisY90,
        Rotation3D::AxisY180,
        Rotation3D::AxisY270,
        Rotation3D::AxisZ90,
        Rotation3D::AxisZ180,
        Rotation3D::AxisZ270,
        Rotation3D::EdgesXa,
        Rotation3D::EdgesXb,
        Rotation3D::EdgesYa,
        Rotation3D::EdgesYb,
        Rotation3D::EdgesZa,
        Rotation3D::EdgesZb,
        Rotation3D::CornerAAA120,
        Rotation3D::CornerAAA240,
        Rotation3D::CornerABA120,
        Rotation3D::CornerABA240,
        Rotation3D::CornerBAA120,
        Rotation3D::CornerBAA240,
        Rotation3D::CornerBBA120,
        Rotation3D::CornerBBA240,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn axes(self) -> [i8; 3] {
        ROTATION_AXES[self as usize]
    }

    /// Finds the rotation with the given signed axis permutation.
    pub const fn from_axes(axes: [i8; 3]) -> Option<Rotation3D> {
        let mut rot = 0;
        while rot < NUM_ROTATIONS {
            let candidate = ROTATION_AXES[rot];
            if candidate[0] == axes[0] && candidate[1] == axes[1] && candidate[2] == axes[2] {
                return Some(Self::ALL[rot]);
            }
            rot += 1;
        }
        None
    }

    /// Rotates a vector (or a position centered on the origin).
    #[inline]
    pub const fn apply(self, coord: Coord) -> Coord {
        let axes = self.axes();
        (
            signed_component(axes[0], coord),
            signed_component(axes[1], coord),
            signed_component(axes[2], coord),
        )
    }

    /// Gets the direction the face `dir` points to after this rotation.
    #[inline]
    pub fn apply_to_direction(self, dir: Direction3D) -> Direction3D {
        DIRECTIONS[self.index()][dir.index()]
    }

    /// The rotation equal to applying `self`, then `next`.
    #[inline]
    pub fn then(self, next: Rotation3D) -> Rotation3D {
        COMPOSITION[self.index()][next.index()]
    }

    #[inline]
    pub fn inverse(self) -> Rotation3D {
        INVERSES[self.index()]
    }

    /// How many times the rotation must be applied to get back to identity.
    pub fn order(self) -> u8 {
        match self.kind() {
            RotationKind::Identity => 1,
            RotationKind::Face => match self {
                Rotation3D::AxisX180 | Rotation3D::AxisY180 | Rotation3D::AxisZ180 => 2,
                _ => 4,
            },
            RotationKind::Edge => 2,
            RotationKind::Corner => 3,
        }
    }

    pub fn kind(self) -> RotationKind {
        match self.index() {
            0 => RotationKind::Identity,
            1..=9 => RotationKind::Face,
            10..=15 => RotationKind::Edge,
            _ => RotationKind::Corner,
        }
    }

    /// The rotation matrix, acting on column vectors.
    pub fn matrix(self) -> [[i32; 3]; 3] {
        let mut matrix = [[0; 3]; 3];
        for (row, &axis) in self.axes().iter().enumerate() {
            let column = (axis.unsigned_abs() - 1) as usize;
            matrix[row][column] = axis.signum() as i32;
        }
        matrix
    }

    pub fn euler(self) -> EulerAngles {
        let [x, y, z] = EULER_TURNS[self.index()];
        EulerAngles { x, y, z }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Rotation3D::Identity => "Identity",
            Rotation3D::AxisX90 => "AxisX90",
            Rotation3D::AxisX180 => "AxisX180",
            Rotation3D::AxisX270 => "AxisX270",
            Rotation3D::AxisY90 => "AxisY90",
            Rotation3D::AxisY180 => "AxisY180",
            Rotation3D::AxisY270 => "AxisY270",
            Rotation3D::AxisZ90 => "AxisZ90",
            Rotation3D::AxisZ180 => "AxisZ180",
            Rotation3D::AxisZ270 => "AxisZ270",
            Rotation3D::EdgesXa => "EdgesXa",
            Rotation3D::EdgesXb => "EdgesXb",
            Rotation3D::EdgesYa => "EdgesYa",
            Rotation3D::EdgesYb => "EdgesYb",
            Rotation3D::EdgesZa => "EdgesZa",
            Rotation3D::EdgesZb => "EdgesZb",
            Rotation3D::CornerAAA120 => "CornerAAA120",
            Rotation3D::CornerAAA240 => "CornerAAA240",
            Rotation3D::CornerABA120 => "CornerABA120",
            Rotation3D::CornerABA240 => "CornerABA240",
            Rotation3D::CornerBAA120 => "CornerBAA120",
            Rotation3D::CornerBAA240 => "CornerBAA240",
            Rotation3D::CornerBBA120 => "CornerBBA120",
            Rotation3D::CornerBBA240 => "CornerBBA240",
        }
    }
}

impl fmt::Display for Rotation3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Rotation3D {
    type Error = TileError;

    fn try_from(ordinal: u8) -> TileResult<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(TileError::UnmappedEnumValue {
                kind: "Rotation3D",
                ordinal,
            })
    }
}

/// Rotation angles about the world axes, applied about Z first, then X, then Y
/// (`R = Ry * Rx * Rz`, all right-handed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EulerAngles {
    // quarter turns, 0..4
    x: u8,
    y: u8,
    z: u8,
}

impl EulerAngles {
    /// The angles in degrees, each one of 0, 90, 180 or 270.
    pub fn degrees(self) -> [i16; 3] {
        [self.x, self.y, self.z].map(|turns| turns as i16 * 90)
    }

    /// The rotation matrix these angles produce.
    pub fn matrix(self) -> [[i32; 3]; 3] {
        let (cx, sx) = quarter_turn(self.x);
        let (cy, sy) = quarter_turn(self.y);
        let (cz, sz) = quarter_turn(self.z);

        let rx = [[1, 0, 0], [0, cx, -sx], [0, sx, cx]];
        let ry = [[cy, 0, sy], [0, 1, 0], [-sy, 0, cy]];
        let rz = [[cz, -sz, 0], [sz, cz, 0], [0, 0, 1]];

        mat_mul(ry, mat_mul(rx, rz))
    }
}

/// Cosine and sine of a whole number of quarter turns.
fn quarter_turn(turns: u8) -> (i32, i32) {
    match turns % 4 {
        0 => (1, 0),
        1 => (0, 1),
        2 => (-1, 0),
        _ => (0, -1),
    }
}

fn mat_mul(a: [[i32; 3]; 3], b: [[i32; 3]; 3]) -> [[i32; 3]; 3] {
    let mut out = [[0; 3]; 3];
    for (row, out_row) in out.iter_mut().enumerate() {
        for (column, cell) in out_row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[row][k] * b[k][column]).sum();
        }
    }
    out
}

/// How to place a tile prototype in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pose {
    pub euler: EulerAngles,
    /// Uniform scale on all three axes: `-1` realizes the inversion.
    pub scale: i8,
}

/// A transform that keeps a cube axis-aligned: an optional point reflection
/// followed by a rotation.
///
/// The default value is the identity transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Transform3D {
    /// Mirror through the cube center (every axis flipped) before rotating.
    pub invert: bool,
    pub rotation: Rotation3D,
}

/// Builds all 48 transforms in index order: non-inverted rotations, then inverted.
const fn build_all_transforms() -> [Transform3D; NUM_TRANSFORMS] {
    let mut all = [Transform3D::IDENTITY; NUM_TRANSFORMS];
    let mut index = 0;
    while index < NUM_TRANSFORMS {
        all[index] = Transform3D {
            invert: index >= NUM_ROTATIONS,
            rotation: Rotation3D::ALL[index % NUM_ROTATIONS],
        };
        index += 1;
    }
    all
}

impl Transform3D {
    pub const IDENTITY: Transform3D = Transform3D {
        invert: false,
        rotation: Rotation3D::Identity,
    };

    pub const ALL: [Transform3D; NUM_TRANSFORMS] = build_all_transforms();

    pub const fn new(invert: bool, rotation: Rotation3D) -> Self {
        Self { invert, rotation }
    }

    pub const fn rotated(rotation: Rotation3D) -> Self {
        Self::new(false, rotation)
    }

    pub const fn inverted(rotation: Rotation3D) -> Self {
        Self::new(true, rotation)
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// A perfect index in `0..48`: the rotation ordinal, plus 24 if inverted.
    #[inline]
    pub const fn index(self) -> usize {
        self.rotation as usize + if self.invert { NUM_ROTATIONS } else { 0 }
    }

    pub const fn from_index(index: usize) -> Option<Transform3D> {
        if index < NUM_TRANSFORMS {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Transforms a vector (or a position centered on the origin).
    #[inline]
    pub const fn apply(self, (x, y, z): Coord) -> Coord {
        let coord = if self.invert { (-x, -y, -z) } else { (x, y, z) };
        self.rotation.apply(coord)
    }

    /// Transforms a cell position inside a cube spanning `0..=max_inclusive`
    /// on every axis.
    pub fn apply_within(self, (x, y, z): Coord, max_inclusive: i32) -> Coord {
        // doubled centered coordinates: avoids half-integer centers for odd spans
        let (cx, cy, cz) = self.apply((
            2 * x - max_inclusive,
            2 * y - max_inclusive,
            2 * z - max_inclusive,
        ));
        (
            (cx + max_inclusive) / 2,
            (cy + max_inclusive) / 2,
            (cz + max_inclusive) / 2,
        )
    }

    /// Gets the direction the face `side` points to after this transform.
    #[inline]
    pub fn apply_to_side(self, side: Direction3D) -> Direction3D {
        let side = if self.invert { side.opposite() } else { side };
        self.rotation.apply_to_direction(side)
    }

    /// The transform equal to applying `self`, then `next`.
    ///
    /// The point reflection commutes with every rotation, so the two parts
    /// compose independently.
    #[inline]
    pub fn then(self, next: Transform3D) -> Transform3D {
        Transform3D {
            invert: self.invert != next.invert,
            rotation: self.rotation.then(next.rotation),
        }
    }

    #[inline]
    pub fn inverse(self) -> Transform3D {
        Transform3D {
            invert: self.invert,
            rotation: self.rotation.inverse(),
        }
    }

    /// Converts this transform into world-space placement data.
    pub fn resolve(self) -> Pose {
        Pose {
            euler: self.rotation.euler(),
            scale: if self.invert { -1 } else { 1 },
        }
    }
}

impl fmt::Display for Transform3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invert {
            write!(f, "{} (inverted)", self.rotation)
        } else {
            write!(f, "{}", self.rotation)
        }
    }
}
