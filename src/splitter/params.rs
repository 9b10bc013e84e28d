//! Parameter types for the intensity-based splitter.
//!
//! Every threshold that governs splitting lives here with a documented
//! default; `validate` rejects configurations the pipeline cannot interpret.

use serde::{Deserialize, Serialize};

/// Knobs of the split decision itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitParams {
    /// Percentile of the blob value distribution taken as the low split point.
    pub lower_bound_pct: u8,
    /// Percentile taken as the mid split point (computed, not classified on).
    pub medium_bound_pct: u8,
    /// Percentile taken as the high split point.
    pub upper_bound_pct: u8,
    /// Minimum fraction of the blob's total length a run must cover before a
    /// band transition is allowed to split. Runs at or below the fraction are
    /// absorbed into the ongoing segment.
    pub min_split_ratio: f64,
    /// Quantization scale for the angular/radial ordering of stored segment
    /// contours.
    pub center_sort_scale: f64,
    /// Lower percentile of the per-segment trimmed-mean intensity range.
    pub intensity_low_pct: u8,
    /// Upper percentile of the per-segment trimmed-mean intensity range.
    pub intensity_high_pct: u8,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            lower_bound_pct: 40,
            medium_bound_pct: 50,
            upper_bound_pct: 60,
            min_split_ratio: 0.2,
            center_sort_scale: 10000.0,
            intensity_low_pct: 50,
            intensity_high_pct: 90,
        }
    }
}

impl SplitParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.upper_bound_pct > 100 || self.intensity_high_pct > 100 {
            return Err("percentile bounds must not exceed 100".into());
        }
        if !(self.lower_bound_pct < self.medium_bound_pct
            && self.medium_bound_pct < self.upper_bound_pct)
        {
            return Err(format!(
                "split percentile bounds must be ascending, got {}/{}/{}",
                self.lower_bound_pct, self.medium_bound_pct, self.upper_bound_pct
            ));
        }
        if !(self.min_split_ratio > 0.0 && self.min_split_ratio < 1.0) {
            return Err(format!(
                "min_split_ratio must be in (0, 1), got {}",
                self.min_split_ratio
            ));
        }
        if !(self.center_sort_scale > 0.0) || !self.center_sort_scale.is_finite() {
            return Err(format!(
                "center_sort_scale must be positive and finite, got {}",
                self.center_sort_scale
            ));
        }
        if self.intensity_low_pct >= self.intensity_high_pct {
            return Err(format!(
                "intensity percentile range must be ascending, got {}..{}",
                self.intensity_low_pct, self.intensity_high_pct
            ));
        }
        Ok(())
    }
}

/// Surface-wide configuration shared with the rest of the inspection system.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    /// Scratches at or above this length are flagged for cluster
    /// classification regardless of whether they subsequently split.
    pub cluster_max_scratch_length: f64,
    /// Mirror stored contour x coordinates.
    pub flip_coord_x: bool,
    /// Mirror stored contour y coordinates.
    pub flip_coord_y: bool,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            cluster_max_scratch_length: 500.0,
            flip_coord_x: false,
            flip_coord_y: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(SplitParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_unordered_bounds() {
        let params = SplitParams {
            lower_bound_pct: 60,
            upper_bound_pct: 40,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_ratio() {
        for ratio in [0.0, 1.0, -0.5] {
            let params = SplitParams {
                min_split_ratio: ratio,
                ..Default::default()
            };
            assert!(params.validate().is_err(), "ratio {ratio} should fail");
        }
    }
}
