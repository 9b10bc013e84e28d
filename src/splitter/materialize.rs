use super::params::{SplitParams, SurfaceParams};
use crate::feature::FeatureData;
use crate::geom::{center_sort, centroid};
use crate::measure::{MeasurementSource, TrackTransform};
use crate::stats::mean_of_percentile_range;
use crate::types::{PointXY, Scratch, SplitOutcome};

/// Everything the materializer needs beyond the sorted pixel sequence.
pub(super) struct SegmentContext<'a, T, M> {
    pub feature: &'a FeatureData,
    pub params: &'a SplitParams,
    pub surface: &'a SurfaceParams,
    pub transform: &'a T,
    pub source: &'a M,
    /// Parent blob length as estimated by the axis stage.
    pub total_length: f64,
    /// Parent blob area.
    pub total_area: f64,
}

/// Partitions the sorted sequence at the split indices and builds one scratch
/// per contiguous sub-range, in scan order.
///
/// With an empty `splits` slice this produces exactly one scratch covering
/// the whole blob, which is also the single-feature fallback path.
pub(super) fn materialize_segments<T: TrackTransform, M: MeasurementSource>(
    ctx: &SegmentContext<'_, T, M>,
    sorted: &[PointXY],
    relative: &[i64],
    splits: &[usize],
) -> SplitOutcome {
    let total_pixels = sorted.len();
    let peak_pixel = ctx.feature.blob.peak_pixel();
    let peak_value_abs = ctx.feature.blob.peak_value_abs();
    let value_rel_apd = peak_value_abs - ctx.source.bias_noise();

    let mut outcome = SplitOutcome {
        scratches: Vec::with_capacity(splits.len() + 1),
        consumed: Vec::with_capacity(total_pixels),
    };

    for i in 0..=splits.len() {
        let start = if i == 0 { 0 } else { splits[i - 1] };
        let end = if i == splits.len() {
            total_pixels
        } else {
            splits[i]
        };
        let range_pts = &sorted[start..end];
        let range_vals = &relative[start..end];

        let center = centroid(range_pts);
        let mut contour = range_pts.to_vec();
        center_sort(&mut contour, center, ctx.params.center_sort_scale);
        if ctx.surface.flip_coord_x {
            for p in &mut contour {
                p.x = -p.x;
            }
        }
        if ctx.surface.flip_coord_y {
            for p in &mut contour {
                p.y = -p.y;
            }
        }

        for p in range_pts {
            let tp = ctx.transform.track_point(*p);
            outcome.consumed.push(ctx.source.mask_index(tp));
        }

        let intensity = mean_of_percentile_range(
            range_vals,
            ctx.params.intensity_low_pct,
            ctx.params.intensity_high_pct,
        );
        let ratio = range_pts.len() as f64 / total_pixels as f64;

        outcome.scratches.push(Scratch {
            area: ctx.total_area * ratio,
            length: ctx.total_length * ratio,
            intensity,
            track_point: ctx.transform.track_point(center),
            position: center,
            points: contour,
            pixel_count: range_pts.len(),
            value_rel_haze: intensity,
            value_rel_apd,
            value: peak_value_abs,
            peak_pixel,
            defect: ctx.feature.defect,
        });
    }

    outcome
}
