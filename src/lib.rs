//! Color quantization by minimum-spanning-tree clustering.
//!
//! The distinct colors of an image are treated as vertices of a complete graph
//! weighted by Euclidean RGB distance. A minimum spanning tree is built with
//! Prim's algorithm, its K-1 heaviest edges are cut, and every resulting
//! cluster of colors is replaced by its per-channel average.
//!
//! ```
//! use mstquant::QuantizeConfig;
//! use rgb::RGB8;
//!
//! let pixels = vec![
//!     RGB8 { r: 0, g: 0, b: 0 },
//!     RGB8 { r: 10, g: 0, b: 0 },
//!     RGB8 { r: 0, g: 0, b: 0 },
//!     RGB8 { r: 255, g: 255, b: 255 },
//! ];
//! let result = mstquant::quantize(&pixels, 2, 2, &QuantizeConfig::new().clusters(2)).unwrap();
//! assert_eq!(result.distinct_colors(), 3);
//! assert_eq!(result.pixels()[0], RGB8 { r: 5, g: 0, b: 0 });
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod distance;
pub mod error;
pub mod histogram;
pub mod mst;
pub mod palette;
pub mod remap;

pub use error::QuantizeError;
pub use imgref::{ImgRef, ImgVec};
pub use mst::MstStrategy;

use log::debug;
use rgb::RGB8;

use crate::cluster::Clusters;
use crate::histogram::ColorHistogram;
use crate::mst::SpanningTree;
use crate::palette::ColorMapping;

/// What to do when more clusters are requested than the image has colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterCountPolicy {
    /// Use D clusters; the output equals the input.
    #[default]
    Clamp,
    /// Fail with [`QuantizeError::ClusterCountExceedsColors`].
    Strict,
}

/// Configuration for MST quantization.
#[derive(Debug, Clone)]
pub struct QuantizeConfig {
    /// Requested number of clusters (K >= 1).
    pub clusters: u32,
    /// Frontier search used by Prim's algorithm.
    pub mst_strategy: MstStrategy,
    /// Handling of K > D.
    pub cluster_count_policy: ClusterCountPolicy,
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            clusters: 16,
            mst_strategy: MstStrategy::PriorityQueue,
            cluster_count_policy: ClusterCountPolicy::Clamp,
        }
    }
}

impl QuantizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clusters(mut self, k: u32) -> Self {
        self.clusters = k;
        self
    }

    pub fn mst_strategy(mut self, strategy: MstStrategy) -> Self {
        self.mst_strategy = strategy;
        self
    }

    pub fn cluster_count_policy(mut self, policy: ClusterCountPolicy) -> Self {
        self.cluster_count_policy = policy;
        self
    }
}

/// Quantization result.
#[derive(Debug)]
pub struct QuantizeResult {
    image: ImgVec<RGB8>,
    palette: Vec<RGB8>,
    distinct_colors: usize,
    mst_weight: f64,
}

impl QuantizeResult {
    /// The quantized image, same dimensions as the input.
    pub fn image(&self) -> ImgRef<'_, RGB8> {
        self.image.as_ref()
    }

    /// Take ownership of the quantized image.
    pub fn into_image(self) -> ImgVec<RGB8> {
        self.image
    }

    /// Quantized pixels, row-major.
    pub fn pixels(&self) -> &[RGB8] {
        self.image.buf()
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// One representative color per cluster.
    pub fn palette(&self) -> &[RGB8] {
        &self.palette
    }

    /// Number of clusters actually produced (min(K, D)).
    pub fn cluster_count(&self) -> usize {
        self.palette.len()
    }

    /// Number of distinct colors in the input (D).
    pub fn distinct_colors(&self) -> usize {
        self.distinct_colors
    }

    /// Total weight of the minimum spanning tree over the distinct colors.
    pub fn mst_weight(&self) -> f64 {
        self.mst_weight
    }
}

/// Per-call state. Every stage reads the previous stage's output from here;
/// nothing outlives the call.
struct Pipeline {
    histogram: ColorHistogram,
    colors: Vec<RGB8>,
    tree: SpanningTree,
    clusters: Clusters,
    mapping: ColorMapping,
}

impl Pipeline {
    fn run(pixels: &[RGB8], width: usize, config: &QuantizeConfig) -> Result<Self, QuantizeError> {
        let histogram = histogram::build_histogram(pixels, width);
        if histogram.is_empty() {
            return Err(QuantizeError::EmptyImage);
        }
        let colors = histogram.colors();
        debug!(
            "histogram: {} pixels, {} distinct colors",
            pixels.len(),
            colors.len()
        );

        let k = config.clusters as usize;
        if k > colors.len() && config.cluster_count_policy == ClusterCountPolicy::Strict {
            return Err(QuantizeError::ClusterCountExceedsColors {
                requested: config.clusters,
                distinct: colors.len(),
            });
        }

        let tree = mst::build_mst(&colors, config.mst_strategy);
        let clusters = cluster::extract_clusters(&tree, k);
        let mapping = ColorMapping::from_clusters(&colors, &clusters);

        Ok(Self {
            histogram,
            colors,
            tree,
            clusters,
            mapping,
        })
    }

    fn finish(self, width: usize, height: usize) -> QuantizeResult {
        debug_assert_eq!(self.mapping.len(), self.colors.len());
        debug_assert_eq!(self.clusters.len(), self.mapping.representatives().len());

        let buf = remap::remap_pixels(self.histogram.pixel_indices(), &self.mapping);
        QuantizeResult {
            image: ImgVec::new(buf, width, height),
            palette: self.mapping.representatives().to_vec(),
            distinct_colors: self.colors.len(),
            mst_weight: self.tree.total_weight(),
        }
    }
}

/// Quantize a row-major RGB image to at most `config.clusters` colors.
pub fn quantize(
    pixels: &[RGB8],
    width: usize,
    height: usize,
    config: &QuantizeConfig,
) -> Result<QuantizeResult, QuantizeError> {
    validate_inputs(pixels.len(), width, height, config)?;
    Ok(Pipeline::run(pixels, width, config)?.finish(width, height))
}

/// Quantize an [`ImgRef`]. Strided images are compacted first.
pub fn quantize_img(
    img: ImgRef<'_, RGB8>,
    config: &QuantizeConfig,
) -> Result<QuantizeResult, QuantizeError> {
    let (width, height) = (img.width(), img.height());
    let pixels: Vec<RGB8> = img.pixels().collect();
    quantize(&pixels, width, height, config)
}

fn validate_inputs(
    pixel_count: usize,
    width: usize,
    height: usize,
    config: &QuantizeConfig,
) -> Result<(), QuantizeError> {
    if config.clusters == 0 {
        return Err(QuantizeError::InvalidClusterCount(config.clusters));
    }
    if width.checked_mul(height) != Some(pixel_count) {
        return Err(QuantizeError::DimensionMismatch {
            len: pixel_count,
            width,
            height,
        });
    }
    if pixel_count == 0 {
        return Err(QuantizeError::EmptyImage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_order() {
        let config = QuantizeConfig::new().clusters(0);
        assert!(matches!(
            validate_inputs(4, 2, 2, &config),
            Err(QuantizeError::InvalidClusterCount(0))
        ));

        let config = QuantizeConfig::new();
        assert!(matches!(
            validate_inputs(5, 2, 2, &config),
            Err(QuantizeError::DimensionMismatch { len: 5, .. })
        ));
        assert!(matches!(
            validate_inputs(0, 0, 7, &config),
            Err(QuantizeError::EmptyImage)
        ));
        assert!(validate_inputs(4, 2, 2, &config).is_ok());
    }

    #[test]
    fn overflowing_dimensions_are_a_mismatch() {
        assert!(matches!(
            validate_inputs(4, usize::MAX, 2, &QuantizeConfig::new()),
            Err(QuantizeError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn pipeline_keeps_stage_sizes_consistent() {
        let pixels: Vec<RGB8> = (0..64u32)
            .map(|i| RGB8 {
                r: (i * 4) as u8,
                g: (i % 5) as u8,
                b: 0,
            })
            .collect();
        let pipeline = Pipeline::run(&pixels, 8, &QuantizeConfig::new().clusters(6)).unwrap();
        assert_eq!(pipeline.colors.len(), 64);
        assert_eq!(pipeline.tree.len(), 63);
        assert_eq!(pipeline.clusters.len(), 6);
        assert_eq!(pipeline.mapping.len(), 64);
    }
}
