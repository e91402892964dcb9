//! Small bit sets over the rotation group and the full transform group.

use std::fmt;

use crate::geometry::{Rotation3D, RotationKind, Transform3D, NUM_ROTATIONS, NUM_TRANSFORMS};

/// A set of rotations, one bit per [`Rotation3D`] ordinal.
///
/// Insertion is idempotent; `insert` reports whether the set changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationSet(u32);

impl RotationSet {
    pub const EMPTY: RotationSet = RotationSet(0);
    pub const ALL: RotationSet = RotationSet((1 << NUM_ROTATIONS) - 1);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn contains(self, rotation: Rotation3D) -> bool {
        self.0 & (1 << rotation.index()) != 0
    }

    pub fn insert(&mut self, rotation: Rotation3D) -> bool {
        let had = self.contains(rotation);
        self.0 |= 1 << rotation.index();
        !had
    }

    pub fn remove(&mut self, rotation: Rotation3D) -> bool {
        let had = self.contains(rotation);
        self.0 &= !(1 << rotation.index());
        had
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Rotation3D> {
        Rotation3D::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl FromIterator<Rotation3D> for RotationSet {
    fn from_iter<I: IntoIterator<Item = Rotation3D>>(iter: I) -> Self {
        let mut set = RotationSet::EMPTY;
        for rotation in iter {
            set.insert(rotation);
        }
        set
    }
}

/// A set of transforms, one bit per [`Transform3D::index`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransformSet(u64);

impl TransformSet {
    pub const EMPTY: TransformSet = TransformSet(0);
    pub const ALL: TransformSet = TransformSet((1 << NUM_TRANSFORMS) - 1);
    const NORMAL_BITS: u64 = (1 << NUM_ROTATIONS) - 1;

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    pub fn single(transform: Transform3D) -> Self {
        TransformSet(1 << transform.index())
    }

    /// Combines a normal and an inverted rotation set.
    pub fn from_rotation_sets(normal: RotationSet, inverted: RotationSet) -> Self {
        TransformSet(normal.bits() as u64 | (inverted.bits() as u64) << NUM_ROTATIONS)
    }

    /// The non-inverted members, as rotations.
    pub fn normal(self) -> RotationSet {
        RotationSet((self.0 & Self::NORMAL_BITS) as u32)
    }

    /// The inverted members, as rotations.
    pub fn inverted(self) -> RotationSet {
        RotationSet((self.0 >> NUM_ROTATIONS) as u32)
    }

    #[inline]
    pub fn contains(self, transform: Transform3D) -> bool {
        self.0 & (1 << transform.index()) != 0
    }

    pub fn insert(&mut self, transform: Transform3D) -> bool {
        let had = self.contains(transform);
        self.0 |= 1 << transform.index();
        !had
    }

    pub fn remove(&mut self, transform: Transform3D) -> bool {
        let had = self.contains(transform);
        self.0 &= !(1 << transform.index());
        had
    }

    #[inline]
    pub fn union(self, other: TransformSet) -> TransformSet {
        TransformSet(self.0 | other.0)
    }

    #[inline]
    pub fn intersection(self, other: TransformSet) -> TransformSet {
        TransformSet(self.0 & other.0)
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Adds the inverted version of every member.
    pub fn add_inverted_versions(&mut self) {
        let normal = self.0 & Self::NORMAL_BITS;
        let inverted = self.0 >> NUM_ROTATIONS;
        let rotations = normal | inverted;
        self.0 = rotations | rotations << NUM_ROTATIONS;
    }

    /// The smallest set containing `self` and the identity that is closed
    /// under composition: the group the members generate.
    pub fn closure(self) -> TransformSet {
        let mut closed = self.union(TransformSet::single(Transform3D::IDENTITY));
        loop {
            let mut grown = closed;
            for a in closed.iter() {
                for b in closed.iter() {
                    grown.insert(a.then(b));
                }
            }
            if grown == closed {
                return closed;
            }
            closed = grown;
        }
    }

    /// True if the members compose only with each other and contain the identity.
    pub fn is_group(self) -> bool {
        self.closure() == self
    }

    /// Members in index order: every rotation, then every inverted rotation.
    pub fn iter(self) -> impl Iterator<Item = Transform3D> {
        Transform3D::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl FromIterator<Transform3D> for TransformSet {
    fn from_iter<I: IntoIterator<Item = Transform3D>>(iter: I) -> Self {
        let mut set = TransformSet::EMPTY;
        for transform in iter {
            set.insert(transform);
        }
        set
    }
}

impl fmt::Debug for TransformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|t| t.to_string())).finish()
    }
}

/// Which placements a tile may be used with, as a tile author expresses it.
///
/// The identity transform is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AllowedTransforms {
    /// Allow the mirrored version of every allowed rotation.
    pub invert: bool,
    pub all_rotations: bool,
    pub axis_x: bool,
    pub axis_y: bool,
    pub axis_z: bool,
    /// The six half turns about edge pairs.
    pub edges: bool,
    /// The eight turns about body diagonals.
    pub corners: bool,
    /// Allowed on top of what the flags produce.
    pub specific: TransformSet,
}

impl AllowedTransforms {
    /// Only the identity.
    pub fn none() -> Self {
        Self::default()
    }

    /// All 48 transforms.
    pub fn everything() -> Self {
        Self {
            invert: true,
            all_rotations: true,
            ..Self::default()
        }
    }

    /// All 24 rotations, no mirroring.
    pub fn rotations() -> Self {
        Self {
            all_rotations: true,
            ..Self::default()
        }
    }

    fn allows_rotation(&self, rotation: Rotation3D) -> bool {
        if self.all_rotations {
            return true;
        }
        match rotation.kind() {
            RotationKind::Identity => true,
            RotationKind::Face => match rotation {
                Rotation3D::AxisX90 | Rotation3D::AxisX180 | Rotation3D::AxisX270 => self.axis_x,
                Rotation3D::AxisY90 | Rotation3D::AxisY180 | Rotation3D::AxisY270 => self.axis_y,
                _ => self.axis_z,
            },
            RotationKind::Edge => self.edges,
            RotationKind::Corner => self.corners,
        }
    }

    /// Expands the flags into the explicit set of transforms.
    pub fn explicit(&self) -> TransformSet {
        let mut set: TransformSet = Rotation3D::ALL
            .into_iter()
            .filter(|r| self.allows_rotation(*r))
            .map(Transform3D::rotated)
            .collect();
        if self.invert {
            set.add_inverted_versions();
        }
        set.union(self.specific)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_set_insert_is_idempotent() {
        let mut set = RotationSet::EMPTY;
        assert!(set.insert(Rotation3D::EdgesYa));
        assert!(!set.insert(Rotation3D::EdgesYa));
        assert_eq!(set.len(), 1);
        assert!(set.remove(Rotation3D::EdgesYa));
        assert!(!set.remove(Rotation3D::EdgesYa));
        assert!(set.is_empty());
        assert_eq!(RotationSet::ALL.len(), 24);
    }

    #[test]
    fn test_transform_set_splits_into_rotation_sets() {
        let mut set = TransformSet::EMPTY;
        set.insert(Transform3D::rotated(Rotation3D::AxisZ90));
        set.insert(Transform3D::inverted(Rotation3D::CornerBBA240));

        assert_eq!(set.normal().iter().collect::<Vec<_>>(), vec![Rotation3D::AxisZ90]);
        assert_eq!(
            set.inverted().iter().collect::<Vec<_>>(),
            vec![Rotation3D::CornerBBA240]
        );
        assert_eq!(TransformSet::from_rotation_sets(set.normal(), set.inverted()), set);
    }

    #[test]
    fn test_add_inverted_versions() {
        let mut set: TransformSet = [
            Transform3D::rotated(Rotation3D::AxisX90),
            Transform3D::inverted(Rotation3D::EdgesXa),
        ]
        .into_iter()
        .collect();
        set.add_inverted_versions();

        assert_eq!(set.len(), 4);
        assert!(set.contains(Transform3D::inverted(Rotation3D::AxisX90)));
        assert!(set.contains(Transform3D::rotated(Rotation3D::EdgesXa)));
    }

    #[test]
    fn test_closure_of_generators() {
        let quarter_z = TransformSet::single(Transform3D::rotated(Rotation3D::AxisZ90));
        assert_eq!(quarter_z.closure().len(), 4);

        let quarter_xy: TransformSet = [
            Transform3D::rotated(Rotation3D::AxisX90),
            Transform3D::rotated(Rotation3D::AxisY90),
        ]
        .into_iter()
        .collect();
        assert_eq!(quarter_xy.closure(), TransformSet::from_rotation_sets(RotationSet::ALL, RotationSet::EMPTY));

        let mirror = TransformSet::single(Transform3D::inverted(Rotation3D::Identity));
        assert_eq!(mirror.closure().len(), 2);
        assert!(TransformSet::ALL.is_group());
        assert!(!quarter_z.is_group());
    }

    #[test]
    fn test_iter_is_in_index_order() {
        let indices: Vec<_> = TransformSet::ALL.iter().map(|t| t.index()).collect();
        assert_eq!(indices, (0..48).collect::<Vec<_>>());
    }

    #[test]
    fn test_allowed_transforms_expansion() {
        assert_eq!(AllowedTransforms::none().explicit().len(), 1);
        assert_eq!(AllowedTransforms::rotations().explicit().len(), 24);
        assert_eq!(AllowedTransforms::everything().explicit(), TransformSet::ALL);

        let spin_y = AllowedTransforms {
            axis_y: true,
            invert: true,
            ..AllowedTransforms::default()
        };
        let set = spin_y.explicit();
        assert_eq!(set.len(), 8);
        assert!(set.contains(Transform3D::inverted(Rotation3D::AxisY270)));
        assert!(!set.contains(Transform3D::rotated(Rotation3D::AxisX90)));

        let tilted = AllowedTransforms {
            edges: true,
            corners: true,
            specific: TransformSet::single(Transform3D::inverted(Rotation3D::AxisZ180)),
            ..AllowedTransforms::default()
        };
        assert_eq!(tilted.explicit().len(), 1 + 6 + 8 + 1);
    }
}
