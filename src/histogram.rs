use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use rgb::RGB8;

use crate::distance::color_key;

/// One distinct color found in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEntry {
    /// The RGB value.
    pub color: RGB8,
    /// `(x, y)` of the first pixel carrying this color in row-major order.
    pub first_position: (usize, usize),
    /// Number of pixels carrying this color.
    pub count: u32,
}

/// Distinct colors of an image in first-discovery order, plus the color index
/// of every pixel.
#[derive(Debug, Clone)]
pub struct ColorHistogram {
    entries: Vec<ColorEntry>,
    pixel_indices: Vec<u32>,
}

impl ColorHistogram {
    /// Distinct colors; position in this slice is the color's index.
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    /// Distinct color values, in index order.
    pub fn colors(&self) -> Vec<RGB8> {
        self.entries.iter().map(|e| e.color).collect()
    }

    /// Distinct color index of every pixel, row-major.
    pub fn pixel_indices(&self) -> &[u32] {
        &self.pixel_indices
    }

    /// Number of distinct colors (D).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scan the pixels once in row-major order and index their distinct colors.
///
/// Indices are assigned in order of first appearance, so the same image always
/// yields the same numbering.
pub fn build_histogram(pixels: &[RGB8], width: usize) -> ColorHistogram {
    let width = width.max(1);
    let mut lookup: BTreeMap<u32, u32> = BTreeMap::new();
    let mut entries: Vec<ColorEntry> = Vec::new();
    let mut pixel_indices = Vec::with_capacity(pixels.len());

    for (i, &pixel) in pixels.iter().enumerate() {
        let index = match lookup.entry(color_key(pixel)) {
            Entry::Occupied(slot) => {
                let idx = *slot.get();
                entries[idx as usize].count += 1;
                idx
            }
            Entry::Vacant(slot) => {
                let idx = entries.len() as u32;
                entries.push(ColorEntry {
                    color: pixel,
                    first_position: (i % width, i / width),
                    count: 1,
                });
                slot.insert(idx);
                idx
            }
        };
        pixel_indices.push(index);
    }

    ColorHistogram {
        entries,
        pixel_indices,
    }
}
