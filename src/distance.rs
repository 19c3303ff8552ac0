//! Euclidean distance in linear RGB space.
//!
//! Distances are computed on demand. The color graph is complete, so a cached
//! matrix would cost D² entries; for tens of thousands of distinct colors that
//! is not an option.

use rgb::RGB8;

/// Squared Euclidean distance between two colors. Exact in integer arithmetic
/// (max 3 * 255² = 195075).
#[inline(always)]
pub fn distance_sq(a: RGB8, b: RGB8) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Euclidean distance between two colors: `sqrt(Δr² + Δg² + Δb²)`.
#[inline(always)]
pub fn distance(a: RGB8, b: RGB8) -> f64 {
    (distance_sq(a, b) as f64).sqrt()
}

/// Pack a color into the crate-wide integer key `(r << 16) | (g << 8) | b`.
#[inline(always)]
pub fn color_key(c: RGB8) -> u32 {
    (c.r as u32) << 16 | (c.g as u32) << 8 | c.b as u32
}

/// Inverse of [`color_key`].
#[inline(always)]
pub fn color_from_key(key: u32) -> RGB8 {
    RGB8 {
        r: (key >> 16) as u8,
        g: (key >> 8) as u8,
        b: key as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_iff_equal() {
        let a = RGB8 { r: 12, g: 34, b: 56 };
        assert_eq!(distance(a, a), 0.0);
        assert!(distance(a, RGB8 { r: 12, g: 34, b: 57 }) > 0.0);
    }

    #[test]
    fn symmetric() {
        let a = RGB8 { r: 0, g: 200, b: 17 };
        let b = RGB8 { r: 255, g: 3, b: 90 };
        assert_eq!(distance(a, b), distance(b, a));
        assert_eq!(distance_sq(a, b), distance_sq(b, a));
    }

    #[test]
    fn pythagorean_triple() {
        let a = RGB8 { r: 0, g: 0, b: 0 };
        let b = RGB8 { r: 3, g: 4, b: 0 };
        assert_eq!(distance_sq(a, b), 25);
        assert!((distance(a, b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn extreme_corners() {
        let black = RGB8 { r: 0, g: 0, b: 0 };
        let white = RGB8 {
            r: 255,
            g: 255,
            b: 255,
        };
        assert_eq!(distance_sq(black, white), 3 * 255 * 255);
    }

    #[test]
    fn key_layout() {
        let c = RGB8 {
            r: 0x12,
            g: 0x34,
            b: 0x56,
        };
        assert_eq!(color_key(c), 0x123456);
        assert_eq!(color_from_key(0x123456), c);
    }
}
