//! Input-side model: one detected blob plus its aggregate statistics.
//!
//! A [`FeatureData`] is produced upstream by blob detection and handed to the
//! splitter read-mostly: the only mutation this crate performs is the
//! `classified` flag on [`BlobStatistics`], set when the blob's estimated
//! length reaches the configured clustering limit.

use crate::stats::percentile_of;
use crate::types::{DefectId, PointXY};
use serde::{Deserialize, Serialize};

/// Low/mid/high intensity split points on the haze-relative scale.
///
/// `mid` is computed alongside the other two but classification only consumes
/// `low` and `high`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensitySplitPoints {
    pub low: i64,
    pub mid: i64,
    pub high: i64,
}

/// Peak and distribution data captured for one blob at detection time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Blob {
    peak_pixel: PointXY,
    peak_value_abs: f64,
    haze_value: u32,
    /// Raw measured value per blob pixel, in capture order.
    values: Vec<u32>,
}

impl Blob {
    pub fn new(peak_pixel: PointXY, peak_value_abs: f64, haze_value: u32, values: Vec<u32>) -> Self {
        Self {
            peak_pixel,
            peak_value_abs,
            haze_value,
            values,
        }
    }

    pub fn peak_pixel(&self) -> PointXY {
        self.peak_pixel
    }

    pub fn peak_value_abs(&self) -> f64 {
        self.peak_value_abs
    }

    /// Ambient background level subtracted from raw values.
    pub fn haze_value(&self) -> u32 {
        self.haze_value
    }

    /// Percentile split points of the blob's value distribution.
    ///
    /// Percentile bounds are given in percent (e.g. 40/50/60). Values are
    /// reduced to the haze-relative scale before ranking so the returned
    /// thresholds are directly comparable with scanned per-pixel values.
    pub fn intensity_split_points(&self, low: u8, mid: u8, high: u8) -> IntensitySplitPoints {
        if self.values.is_empty() {
            return IntensitySplitPoints::default();
        }
        let haze = self.haze_value as i64;
        let mut relative: Vec<i64> = self.values.iter().map(|&v| v as i64 - haze).collect();
        relative.sort_unstable();
        IntensitySplitPoints {
            low: percentile_of(&relative, low),
            mid: percentile_of(&relative, mid),
            high: percentile_of(&relative, high),
        }
    }
}

/// Aggregate statistics of one connected pixel region.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlobStatistics {
    pts: Vec<PointXY>,
    area: f64,
    classified: bool,
}

impl BlobStatistics {
    pub fn new(pts: Vec<PointXY>, area: f64) -> Self {
        Self {
            pts,
            area,
            classified: false,
        }
    }

    pub fn points(&self) -> &[PointXY] {
        &self.pts
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn pixel_count(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    /// Marks the blob as absorbed into a clustered defect.
    pub fn set_classified(&mut self, classified: bool) {
        self.classified = classified;
    }

    pub fn is_classified(&self) -> bool {
        self.classified
    }

    /// Pixel attaining the minimum x coordinate, if any. Ties keep the first
    /// pixel in capture order.
    pub fn min_x_point(&self) -> Option<PointXY> {
        self.pts
            .iter()
            .copied()
            .reduce(|best, p| if p.x < best.x { p } else { best })
    }

    pub fn max_x_point(&self) -> Option<PointXY> {
        self.pts
            .iter()
            .copied()
            .reduce(|best, p| if p.x > best.x { p } else { best })
    }

    pub fn min_y_point(&self) -> Option<PointXY> {
        self.pts
            .iter()
            .copied()
            .reduce(|best, p| if p.y < best.y { p } else { best })
    }

    pub fn max_y_point(&self) -> Option<PointXY> {
        self.pts
            .iter()
            .copied()
            .reduce(|best, p| if p.y > best.y { p } else { best })
    }
}

/// One feature as handed to the splitter: region statistics, blob peak data,
/// and the defect the feature was filed under.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureData {
    pub stats: BlobStatistics,
    pub blob: Blob,
    pub defect: DefectId,
}

impl FeatureData {
    pub fn new(stats: BlobStatistics, blob: Blob, defect: DefectId) -> Self {
        Self {
            stats,
            blob,
            defect,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
