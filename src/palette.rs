use rgb::RGB8;

use crate::cluster::Clusters;

/// Representative color of every cluster, and the color-index → representative
/// lookup used for remapping.
#[derive(Debug, Clone, Default)]
pub struct ColorMapping {
    /// One representative per cluster, in cluster order.
    representatives: Vec<RGB8>,
    /// Representative for each distinct color index.
    by_color: Vec<RGB8>,
}

impl ColorMapping {
    /// Average each cluster's member colors and assign the average to every
    /// member.
    ///
    /// The average is per channel, unweighted by pixel frequency, with floor
    /// division by the member count.
    pub fn from_clusters(colors: &[RGB8], clusters: &Clusters) -> Self {
        let representatives: Vec<RGB8> = clusters
            .members()
            .iter()
            .map(|members| cluster_average(colors, members))
            .collect();

        let by_color = clusters
            .assignment()
            .iter()
            .map(|&id| representatives[id])
            .collect();

        Self {
            representatives,
            by_color,
        }
    }

    /// Representatives in cluster order.
    pub fn representatives(&self) -> &[RGB8] {
        &self.representatives
    }

    /// Representative of a distinct color index.
    #[inline]
    pub fn get(&self, color: usize) -> RGB8 {
        self.by_color[color]
    }

    /// Representative of every distinct color, indexed by color index.
    pub fn as_slice(&self) -> &[RGB8] {
        &self.by_color
    }

    /// Number of distinct colors covered.
    pub fn len(&self) -> usize {
        self.by_color.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_color.is_empty()
    }
}

fn cluster_average(colors: &[RGB8], members: &[usize]) -> RGB8 {
    if members.is_empty() {
        return RGB8 { r: 0, g: 0, b: 0 };
    }

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for &m in members {
        let c = colors[m];
        r += c.r as u64;
        g += c.g as u64;
        b += c.b as u64;
    }

    let n = members.len() as u64;
    RGB8 {
        r: (r / n) as u8,
        g: (g / n) as u8,
        b: (b / n) as u8,
    }
}
