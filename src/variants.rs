//! Expands tiles into their distinct placements.
//!
//! A tile allowed under `n` transforms does not produce `n` variants: two
//! transforms that differ only by one of the tile's symmetries place the same
//! thing, so only the first of them (in transform index order) is kept.

use std::ops::Range;

use log::debug;

use crate::error::TileResult;
use crate::geometry::Transform3D;
use crate::tile::Tileset;

/// One distinct placement of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileVariant {
    pub tile: usize,
    pub transform: Transform3D,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileVariants {
    variants: Vec<TileVariant>,
    /// Variant ID range of each tile, indexed by tile.
    ranges: Vec<Range<usize>>,
}

impl TileVariants {
    pub fn build(tileset: &Tileset) -> TileResult<Self> {
        tileset.validate()?;

        let mut variants = Vec::new();
        let mut ranges = Vec::with_capacity(tileset.tiles.len());

        for (index, tile) in tileset.tiles.iter().enumerate() {
            let start = variants.len();
            let symmetries = tile.symmetries();
            let mut chosen: Vec<Transform3D> = Vec::new();
            for transform in tile.allowed.explicit().iter() {
                if symmetries.iter().any(|s| chosen.contains(&s.then(transform))) {
                    continue;
                }
                chosen.push(transform);
            }

            debug!(
                "tile {index} '{}' expands to {} variants ({} symmetries)",
                tile.prototype,
                chosen.len(),
                symmetries.len()
            );
            variants.extend(chosen.into_iter().map(|transform| TileVariant {
                tile: index,
                transform,
            }));
            ranges.push(start..variants.len());
        }

        Ok(Self { variants, ranges })
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&TileVariant> {
        self.variants.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileVariant> {
        self.variants.iter()
    }

    /// The variant IDs of one tile.
    pub fn ids_of(&self, tile: usize) -> Range<usize> {
        self.ranges.get(tile).cloned().unwrap_or(0..0)
    }

    pub fn variants_of(&self, tile: usize) -> &[TileVariant] {
        &self.variants[self.ids_of(tile)]
    }

    /// The variant that places `tile` the same way `transform` would, if the
    /// tile is allowed to be placed like that.
    pub fn find(&self, tileset: &Tileset, tile: usize, transform: Transform3D) -> Option<usize> {
        let symmetries = tileset.tile(tile).ok()?.symmetries();
        self.ids_of(tile).find(|&id| {
            let chosen = self.variants[id].transform;
            chosen == transform || symmetries.iter().any(|s| s.then(transform) == chosen)
        })
    }
}
