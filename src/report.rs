//! Plain-text tables for the CLI.

use crate::compat::CompatibilityIndex;
use crate::face::Transformation2D;
use crate::geometry::{Direction3D, Rotation3D};
use crate::tile::Tileset;
use crate::variants::TileVariants;

/// Every rotation with its order, where it sends the +X, +Y and +Z faces, and
/// its Euler angles in degrees.
pub fn format_rotation_table() -> String {
    let mut output = format!(
        "{:<13}{:>5}{:>4}{:>4}{:>4} {:>4}{:>4}{:>4}\n",
        "rotation", "order", "+X", "+Y", "+Z", "x", "y", "z"
    );
    for rotation in Rotation3D::ALL {
        let [x, y, z] = rotation.euler().degrees();
        output.push_str(&format!(
            "{:<13}{:>5}{:>4}{:>4}{:>4} {:>4}{:>4}{:>4}\n",
            rotation.name(),
            rotation.order(),
            rotation.apply_to_direction(Direction3D::MaxX).name(),
            rotation.apply_to_direction(Direction3D::MaxY).name(),
            rotation.apply_to_direction(Direction3D::MaxZ).name(),
            x,
            y,
            z
        ));
    }
    output
}

/// Composition table of the square's transforms: row first, then column.
pub fn format_cayley_table() -> String {
    let mut output = format!("{:<5}", "then");
    for column in Transformation2D::ALL {
        output.push_str(&format!("{:>5}", column.code()));
    }
    output.push('\n');

    for row in Transformation2D::ALL {
        output.push_str(&format!("{:<5}", row.code()));
        for column in Transformation2D::ALL {
            output.push_str(&format!("{:>5}", row.then(column).code()));
        }
        output.push('\n');
    }
    output
}

/// One line per variant: its ID, its tile's prototype and its transform.
pub fn format_variants(tileset: &Tileset, variants: &TileVariants) -> String {
    let mut output = String::new();
    for (id, variant) in variants.iter().enumerate() {
        let prototype = tileset
            .tiles
            .get(variant.tile)
            .map_or("?", |tile| tile.prototype.as_str());
        output.push_str(&format!("{:<4}{:<10}{}\n", id, prototype, variant.transform));
    }
    output
}

/// Number of compatible ordered variant pairs across each side.
pub fn format_adjacency(index: &CompatibilityIndex) -> String {
    let mut output = String::new();
    for dir in Direction3D::ALL {
        output.push_str(&format!("{:<4}{:>6}\n", dir.name(), index.pair_count(dir)));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn test_rotation_table_snapshot() {
        insta::assert_snapshot!(format_rotation_table(), @r"
        rotation     order  +X  +Y  +Z    x   y   z
        Identity         1  +X  +Y  +Z    0   0   0
        AxisX90          4  +X  +Z  -Y   90   0   0
        AxisX180         2  +X  -Y  -Z  180   0   0
        AxisX270         4  +X  -Z  +Y  270   0   0
        AxisY90          4  -Z  +Y  +X    0  90   0
        AxisY180         2  -X  +Y  -Z    0 180   0
        AxisY270         4  +Z  +Y  -X    0 270   0
        AxisZ90          4  +Y  -X  +Z    0   0  90
        AxisZ180         2  -X  -Y  +Z    0   0 180
        AxisZ270         4  -Y  +X  +Z    0   0 270
        EdgesXa          2  -X  +Z  +Y  270   0 180
        EdgesXb          2  -X  -Z  -Y   90   0 180
        EdgesYa          2  +Z  -Y  +X    0  90 180
        EdgesYb          2  -Z  -Y  -X    0 270 180
        EdgesZa          2  +Y  +X  -Z    0 180  90
        EdgesZb          2  -Y  -X  -Z    0 180 270
        CornerAAA120     3  +Z  +X  +Y  270   0 270
        CornerAAA240     3  +Y  +Z  +X    0  90  90
        CornerABA120     3  -Y  -Z  +X    0  90 270
        CornerABA240     3  +Z  -X  -Y   90   0  90
        CornerBAA120     3  -Y  +Z  -X    0 270 270
        CornerBAA240     3  -Z  -X  +Y  270   0  90
        CornerBBA120     3  -Z  +X  -Y   90   0 270
        CornerBBA240     3  +Y  -Z  -X    0 270  90
        ");
    }

    #[test]
    fn test_cayley_table_snapshot() {
        insta::assert_snapshot!(format_cayley_table(), @r"
        then     I  R90 R180 R270   FX   FY  FD1  FD2
        I        I  R90 R180 R270   FX   FY  FD1  FD2
        R90    R90 R180 R270    I  FD2  FD1   FX   FY
        R180  R180 R270    I  R90   FY   FX  FD2  FD1
        R270  R270    I  R90 R180  FD1  FD2   FY   FX
        FX      FX  FD1   FY  FD2    I R180  R90 R270
        FY      FY  FD2   FX  FD1 R180    I R270  R90
        FD1    FD1   FY  FD2   FX R270  R90    I R180
        FD2    FD2   FX  FD1   FY  R90 R270 R180    I
        ");
    }

    #[test]
    fn test_adjacency_snapshot() {
        let tileset = presets::pipes().unwrap();
        let variants = TileVariants::build(&tileset).unwrap();
        let index = CompatibilityIndex::build(&tileset, &variants).unwrap();

        insta::assert_snapshot!(format_adjacency(&index), @r"
        -X     146
        +X     146
        -Y     146
        +Y     146
        -Z     146
        +Z     146
        ");
    }
}
