//! Splitter pipeline driving the four stages end-to-end.
//!
//! One [`ScratchSplitter::split`] call processes exactly one feature:
//! axis/length estimation, profile classification with run-length hysteresis,
//! then either per-range materialization or the single-feature fallback.
//! The call mutates only the feature's classified flag; consumed mask indices
//! come back in the [`SplitOutcome`] for the caller to apply.
//!
//! Typical usage:
//! ```no_run
//! use scratch_splitter::prelude::*;
//!
//! # fn example(mut feature: scratch_splitter::FeatureData,
//! #            transform: scratch_splitter::measure::RasterTrackTransform,
//! #            surface: scratch_splitter::measure::MeasuredSurface,
//! #            mask: &mut scratch_splitter::measure::SurfaceMask) {
//! let splitter = ScratchSplitter::new(SplitParams::default(), SurfaceParams::default());
//! let outcome = splitter.split(&mut feature, &transform, &surface);
//! outcome.apply_to_mask(mask);
//! # }
//! ```

use super::axis::{estimate_axis, AxisEstimate, SplitAxis};
use super::materialize::{materialize_segments, SegmentContext};
use super::params::{SplitParams, SurfaceParams};
use super::profile::detect_splits;
use crate::feature::FeatureData;
use crate::measure::{MeasurementSource, TrackTransform};
use crate::types::{PointXY, SplitOutcome};
use log::debug;

/// Intensity-based scratch splitter for one inspected surface.
pub struct ScratchSplitter {
    params: SplitParams,
    surface: SurfaceParams,
}

struct Prepared {
    estimate: AxisEstimate,
    sorted: Vec<PointXY>,
    relative: Vec<i64>,
}

impl ScratchSplitter {
    pub fn new(params: SplitParams, surface: SurfaceParams) -> Self {
        Self { params, surface }
    }

    pub fn params(&self) -> &SplitParams {
        &self.params
    }

    pub fn surface_params(&self) -> &SurfaceParams {
        &self.surface
    }

    /// Splits one feature into one or more scratches.
    ///
    /// Empty features yield an empty outcome with no side effects. When no
    /// band transition survives the length hysteresis, the result is the
    /// single-feature fallback, identical to calling [`Self::save_single`].
    pub fn split<T: TrackTransform, M: MeasurementSource>(
        &self,
        feature: &mut FeatureData,
        transform: &T,
        source: &M,
    ) -> SplitOutcome {
        let Some(prepared) = self.prepare(feature, transform, source) else {
            return SplitOutcome::default();
        };

        let split_points = feature.blob.intensity_split_points(
            self.params.lower_bound_pct,
            self.params.medium_bound_pct,
            self.params.upper_bound_pct,
        );
        let splits = detect_splits(
            &prepared.relative,
            &split_points,
            prepared.estimate.total_length,
            self.params.min_split_ratio,
        );
        if splits.is_empty() {
            debug!("no length-significant transition, saving as one scratch");
            return self.materialize(feature, transform, source, &prepared, &[]);
        }

        debug!(
            "splitting {} pixels into {} segments",
            prepared.sorted.len(),
            splits.len() + 1
        );
        self.materialize(feature, transform, source, &prepared, &splits)
    }

    /// Single-feature fallback: saves the whole blob as exactly one scratch.
    ///
    /// Applies the same length-based classified-flag side effect as
    /// [`Self::split`], so calling it directly on a uniform blob is
    /// indistinguishable from the full pipeline's fallback branch.
    pub fn save_single<T: TrackTransform, M: MeasurementSource>(
        &self,
        feature: &mut FeatureData,
        transform: &T,
        source: &M,
    ) -> SplitOutcome {
        let Some(prepared) = self.prepare(feature, transform, source) else {
            return SplitOutcome::default();
        };
        self.materialize(feature, transform, source, &prepared, &[])
    }

    /// Splits a batch of features. With the `parallel` feature enabled the
    /// blobs fan out over rayon; outcomes still come back in input order and
    /// mask application remains the caller's serial step.
    #[cfg(feature = "parallel")]
    pub fn split_batch<T, M>(
        &self,
        features: &mut [FeatureData],
        transform: &T,
        source: &M,
    ) -> Vec<SplitOutcome>
    where
        T: TrackTransform + Sync,
        M: MeasurementSource + Sync,
    {
        use rayon::prelude::*;

        features
            .par_iter_mut()
            .map(|feature| self.split(feature, transform, source))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    pub fn split_batch<T, M>(
        &self,
        features: &mut [FeatureData],
        transform: &T,
        source: &M,
    ) -> Vec<SplitOutcome>
    where
        T: TrackTransform + Sync,
        M: MeasurementSource + Sync,
    {
        features
            .iter_mut()
            .map(|feature| self.split(feature, transform, source))
            .collect()
    }

    /// Shared front half of both entry points: axis estimation, the
    /// classified-flag side effect, the stable axis sort, and the
    /// haze-relative value lookup.
    fn prepare<T: TrackTransform, M: MeasurementSource>(
        &self,
        feature: &mut FeatureData,
        transform: &T,
        source: &M,
    ) -> Option<Prepared> {
        if feature.is_empty() {
            return None;
        }
        let estimate = estimate_axis(&feature.stats)?;

        if estimate.total_length >= self.surface.cluster_max_scratch_length {
            feature.stats.set_classified(true);
        }
        debug!(
            "axis={:?} total_length={:.2} pixels={}",
            estimate.axis,
            estimate.total_length,
            feature.stats.pixel_count()
        );

        let mut sorted = feature.stats.points().to_vec();
        match estimate.axis {
            SplitAxis::X => sorted.sort_by(|a, b| a.x.total_cmp(&b.x)),
            SplitAxis::Y => sorted.sort_by(|a, b| a.y.total_cmp(&b.y)),
        }

        let haze = feature.blob.haze_value() as i64;
        let relative = sorted
            .iter()
            .map(|p| source.raw_value(transform.track_point(*p)) as i64 - haze)
            .collect();

        Some(Prepared {
            estimate,
            sorted,
            relative,
        })
    }

    fn materialize<T: TrackTransform, M: MeasurementSource>(
        &self,
        feature: &FeatureData,
        transform: &T,
        source: &M,
        prepared: &Prepared,
        splits: &[usize],
    ) -> SplitOutcome {
        let ctx = SegmentContext {
            feature,
            params: &self.params,
            surface: &self.surface,
            transform,
            source,
            total_length: prepared.estimate.total_length,
            total_area: feature.stats.area(),
        };
        materialize_segments(&ctx, &prepared.sorted, &prepared.relative, splits)
    }
}
