use rgb::RGB8;

use crate::palette::ColorMapping;

/// Replace every pixel with its cluster representative.
///
/// `pixel_indices` holds the distinct color index of each pixel (as produced
/// by [`crate::histogram::build_histogram`]), so each lookup is a direct index
/// into the mapping.
#[cfg(not(feature = "rayon"))]
pub fn remap_pixels(pixel_indices: &[u32], mapping: &ColorMapping) -> Vec<RGB8> {
    let lut = mapping.as_slice();
    pixel_indices.iter().map(|&i| lut[i as usize]).collect()
}

#[cfg(feature = "rayon")]
pub fn remap_pixels(pixel_indices: &[u32], mapping: &ColorMapping) -> Vec<RGB8> {
    use rayon::prelude::*;

    let lut = mapping.as_slice();
    pixel_indices.par_iter().map(|&i| lut[i as usize]).collect()
}

/// Count pixels whose color differs between two equally sized buffers.
pub fn count_changed(original: &[RGB8], quantized: &[RGB8]) -> usize {
    original
        .iter()
        .zip(quantized.iter())
        .filter(|(a, b)| a != b)
        .count()
}
