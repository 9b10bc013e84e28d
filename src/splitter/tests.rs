use super::*;
use crate::feature::{Blob, BlobStatistics, FeatureData, IntensitySplitPoints};
use crate::measure::{MeasuredSurface, RasterTrackTransform, SurfaceMask};
use crate::types::{DefectId, PointXY};

const BIAS_NOISE: f64 = 2.5;

/// Builds a horizontal one-track blob at y = 0 with the given raw values,
/// backed by a matching measured surface.
fn line_feature(values: &[u32], haze: u32) -> (FeatureData, MeasuredSurface) {
    let pts: Vec<PointXY> = (0..values.len())
        .map(|i| PointXY::new(i as f64, 0.0))
        .collect();
    let (peak_idx, &peak_value) = values
        .iter()
        .enumerate()
        .max_by_key(|(_, &v)| v)
        .expect("line feature needs at least one value");
    let stats = BlobStatistics::new(pts, values.len() as f64);
    let blob = Blob::new(
        PointXY::new(peak_idx as f64, 0.0),
        peak_value as f64,
        haze,
        values.to_vec(),
    );
    let surface = MeasuredSurface::new(1, values.len(), values.to_vec(), BIAS_NOISE);
    (FeatureData::new(stats, blob, DefectId(7)), surface)
}

fn splitter() -> ScratchSplitter {
    ScratchSplitter::new(SplitParams::default(), SurfaceParams::default())
}

// --- profile classification -----------------------------------------------

#[test]
fn boundary_classification_differs_between_first_and_later_pixels() {
    let sp = IntensitySplitPoints {
        low: 100,
        mid: 150,
        high: 200,
    };
    // Exactly at a split point: the first pixel lands in High, any later
    // pixel lands in Mid.
    assert_eq!(initial_band(100, &sp), IntensityBand::High);
    assert_eq!(scan_band(100, &sp), IntensityBand::Mid);
    assert_eq!(initial_band(200, &sp), IntensityBand::High);
    assert_eq!(scan_band(200, &sp), IntensityBand::Mid);
    // Away from the split points the rules agree.
    assert_eq!(initial_band(99, &sp), IntensityBand::Low);
    assert_eq!(scan_band(99, &sp), IntensityBand::Low);
    assert_eq!(initial_band(150, &sp), IntensityBand::Mid);
    assert_eq!(scan_band(150, &sp), IntensityBand::Mid);
    assert_eq!(initial_band(201, &sp), IntensityBand::High);
    assert_eq!(scan_band(201, &sp), IntensityBand::High);
}

fn sp_low_high(low: i64, high: i64) -> IntensitySplitPoints {
    IntensitySplitPoints {
        low,
        mid: (low + high) / 2,
        high,
    }
}

#[test]
fn short_excursion_is_absorbed() {
    // One high pixel at index 10 of 100: both the run before it (10%) and
    // the run it starts (1%) stay under the 20% hysteresis.
    let mut values = vec![50i64; 100];
    values[10] = 250;
    let splits = detect_splits(&values, &sp_low_high(100, 200), 99.0, 0.2);
    assert!(splits.is_empty(), "expected no splits, got {splits:?}");
}

#[test]
fn long_run_change_splits() {
    let mut values = vec![50i64; 100];
    for v in values.iter_mut().skip(50) {
        *v = 250;
    }
    let splits = detect_splits(&values, &sp_low_high(100, 200), 99.0, 0.2);
    assert_eq!(splits, vec![50]);
}

#[test]
fn exactly_twenty_percent_does_not_split() {
    // candidate length == 0.2 * total: the comparison is strictly greater,
    // so the boundary case is absorbed.
    let mut values = vec![250i64; 100];
    for v in values.iter_mut().skip(20) {
        *v = 50;
    }
    let splits = detect_splits(&values, &sp_low_high(100, 200), 99.0, 0.2);
    assert!(splits.is_empty(), "expected no splits, got {splits:?}");

    // One pixel past the boundary splits.
    let mut values = vec![250i64; 100];
    for v in values.iter_mut().skip(21) {
        *v = 50;
    }
    let splits = detect_splits(&values, &sp_low_high(100, 200), 99.0, 0.2);
    assert_eq!(splits, vec![21]);
}

#[test]
fn previous_band_advances_even_when_split_is_suppressed() {
    // A 10-pixel mid excursion at 15..25 is too short to split on entry, but
    // the band still advances, so the change back at 25 is detected and the
    // accumulated 25-pixel run splits there.
    let mut values = vec![50i64; 100];
    for v in values.iter_mut().take(25).skip(15) {
        *v = 150;
    }
    let splits = detect_splits(&values, &sp_low_high(100, 200), 99.0, 0.2);
    assert_eq!(splits, vec![25]);
}

#[test]
fn empty_and_single_pixel_sequences_never_split() {
    let sp = sp_low_high(100, 200);
    assert!(detect_splits(&[], &sp, 0.0, 0.2).is_empty());
    assert!(detect_splits(&[500], &sp, 0.0, 0.2).is_empty());
}

// --- full pipeline ---------------------------------------------------------

/// 30 low, 40 mid, 30 high raw values: the 40/50/60 percentiles collapse
/// onto the mid level, so the scan sees Low → Mid → High transitions at
/// indices 30 and 70, both over the hysteresis limit.
fn three_band_values() -> Vec<u32> {
    let mut values = vec![10u32; 30];
    values.extend(std::iter::repeat_n(50u32, 40));
    values.extend(std::iter::repeat_n(200u32, 30));
    values
}

#[test]
fn three_band_blob_splits_into_three_segments() {
    let (mut feature, surface) = line_feature(&three_band_values(), 0);
    let outcome = splitter().split(&mut feature, &RasterTrackTransform, &surface);

    assert_eq!(outcome.scratches.len(), 3);
    let counts: Vec<usize> = outcome.scratches.iter().map(|s| s.pixel_count).collect();
    assert_eq!(counts, vec![30, 40, 30]);

    // Segments appear in scan order along x.
    let positions: Vec<f64> = outcome.scratches.iter().map(|s| s.position.x).collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "segment centroids must advance along the dominant axis: {positions:?}"
    );
}

#[test]
fn pixel_counts_are_conserved() {
    let (mut feature, surface) = line_feature(&three_band_values(), 0);
    let total = feature.stats.pixel_count();
    let outcome = splitter().split(&mut feature, &RasterTrackTransform, &surface);
    assert_eq!(outcome.pixel_count(), total);
    assert_eq!(outcome.consumed.len(), total);
}

#[test]
fn area_and_length_are_apportioned_by_pixel_share() {
    let (mut feature, surface) = line_feature(&three_band_values(), 0);
    let total_pixels = feature.stats.pixel_count() as f64;
    let total_area = feature.stats.area();
    let total_length = 99.0; // x extent of 100 pixels, y extent zero

    let outcome = splitter().split(&mut feature, &RasterTrackTransform, &surface);
    let mut ratio_sum = 0.0;
    for s in &outcome.scratches {
        let ratio = s.pixel_count as f64 / total_pixels;
        ratio_sum += ratio;
        assert!((s.length - total_length * ratio).abs() < 1e-9);
        assert!((s.area - total_area * ratio).abs() < 1e-9);
    }
    assert!((ratio_sum - 1.0).abs() < 1e-12);
}

#[test]
fn segments_inherit_parent_peak_and_linkage() {
    let (mut feature, surface) = line_feature(&three_band_values(), 0);
    let peak_pixel = feature.blob.peak_pixel();
    let peak_value = feature.blob.peak_value_abs();
    let outcome = splitter().split(&mut feature, &RasterTrackTransform, &surface);

    for s in &outcome.scratches {
        assert_eq!(s.peak_pixel, peak_pixel);
        assert_eq!(s.value, peak_value);
        assert!((s.value_rel_apd - (peak_value - BIAS_NOISE)).abs() < 1e-12);
        assert_eq!(s.defect, DefectId(7));
        assert_eq!(s.value_rel_haze, s.intensity);
    }
}

#[test]
fn uniform_segment_intensity_is_relative_value() {
    // The middle segment is 40 pixels of raw 50 with haze 20: every relative
    // value is 30, so the trimmed mean must be exactly 30.
    let (mut feature, surface) = line_feature(&three_band_values(), 20);
    let outcome = splitter().split(&mut feature, &RasterTrackTransform, &surface);
    assert_eq!(outcome.scratches.len(), 3);
    assert!((outcome.scratches[1].intensity - 30.0).abs() < 1e-12);
}

#[test]
fn single_band_blob_falls_back_to_one_scratch() {
    let values = vec![50u32; 100];
    let (mut feature, surface) = line_feature(&values, 20);
    let outcome = splitter().split(&mut feature, &RasterTrackTransform, &surface);
    assert_eq!(outcome.scratches.len(), 1);
    assert_eq!(outcome.scratches[0].pixel_count, 100);
}

#[test]
fn fallback_matches_direct_single_save() {
    let values = vec![50u32; 100];
    let (mut via_split, surface) = line_feature(&values, 20);
    let (mut via_save, _) = line_feature(&values, 20);

    let splitter = splitter();
    let split_outcome = splitter.split(&mut via_split, &RasterTrackTransform, &surface);
    let save_outcome = splitter.save_single(&mut via_save, &RasterTrackTransform, &surface);

    assert_eq!(split_outcome.consumed, save_outcome.consumed);
    assert_eq!(split_outcome.scratches.len(), 1);
    assert_eq!(save_outcome.scratches.len(), 1);
    let (a, b) = (&split_outcome.scratches[0], &save_outcome.scratches[0]);
    assert_eq!(a.pixel_count, b.pixel_count);
    assert_eq!(a.points, b.points);
    assert_eq!(a.position, b.position);
    assert_eq!(a.intensity, b.intensity);
    assert_eq!(a.length, b.length);
    assert_eq!(a.area, b.area);
    assert_eq!(
        via_split.stats.is_classified(),
        via_save.stats.is_classified()
    );
}

#[test]
fn empty_feature_yields_empty_outcome() {
    let stats = BlobStatistics::new(Vec::new(), 0.0);
    let blob = Blob::new(PointXY::default(), 0.0, 0, Vec::new());
    let mut feature = FeatureData::new(stats, blob, DefectId(1));
    let surface = MeasuredSurface::new(1, 1, vec![0], 0.0);

    let outcome = splitter().split(&mut feature, &RasterTrackTransform, &surface);
    assert!(outcome.scratches.is_empty());
    assert!(outcome.consumed.is_empty());
    assert!(!feature.stats.is_classified());
}

#[test]
fn long_blob_is_flagged_for_clustering() {
    let (mut feature, surface) = line_feature(&vec![50u32; 100], 20);
    let params = SurfaceParams {
        cluster_max_scratch_length: 50.0,
        ..Default::default()
    };
    let splitter = ScratchSplitter::new(SplitParams::default(), params);
    splitter.split(&mut feature, &RasterTrackTransform, &surface);
    assert!(feature.stats.is_classified());

    let (mut feature, surface) = line_feature(&vec![50u32; 100], 20);
    let splitter = ScratchSplitter::new(
        SplitParams::default(),
        SurfaceParams {
            cluster_max_scratch_length: 1000.0,
            ..Default::default()
        },
    );
    splitter.split(&mut feature, &RasterTrackTransform, &surface);
    assert!(!feature.stats.is_classified());
}

#[test]
fn duplicate_axis_coordinates_keep_capture_order() {
    // Two columns of two pixels each; the blob is x-dominant, so pixels with
    // equal x must keep their capture order after the stable sort. The
    // consumed mask indices expose the scan order directly.
    let pts = vec![
        PointXY::new(0.0, 1.0),
        PointXY::new(0.0, 0.0),
        PointXY::new(5.0, 1.0),
        PointXY::new(5.0, 0.0),
    ];
    let values = vec![50u32; 4];
    let stats = BlobStatistics::new(pts, 4.0);
    let blob = Blob::new(PointXY::new(0.0, 1.0), 50.0, 0, values);
    let mut feature = FeatureData::new(stats, blob, DefectId(3));
    let surface = MeasuredSurface::new(2, 6, vec![50; 12], 0.0);

    let outcome = splitter().split(&mut feature, &RasterTrackTransform, &surface);
    // Row-major mask indices: (x=0,y=1) -> 6, (0,0) -> 0, (5,1) -> 11, (5,0) -> 5.
    assert_eq!(outcome.consumed, vec![6, 0, 11, 5]);
}

#[test]
fn mask_receives_every_segment_pixel_exactly_once() {
    let (mut feature, surface) = line_feature(&three_band_values(), 0);
    let outcome = splitter().split(&mut feature, &RasterTrackTransform, &surface);

    let mut seen = outcome.consumed.clone();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), outcome.consumed.len(), "duplicate mask indices");

    let mut mask = SurfaceMask::new(surface.cell_count());
    outcome.apply_to_mask(&mut mask);
    assert_eq!(mask.consumed_count(), feature.stats.pixel_count());
    for i in 0..100 {
        assert!(mask.is_consumed(i), "cell {i} not consumed");
    }
}

#[test]
fn split_batch_matches_individual_splits() {
    // Two features sharing one surface: a three-band blob on track 0 and a
    // uniform blob on track 1.
    let mut data = three_band_values();
    data.extend(std::iter::repeat_n(50u32, 100));
    let surface = MeasuredSurface::new(2, 100, data, BIAS_NOISE);

    let banded = {
        let values = three_band_values();
        let pts = (0..100).map(|i| PointXY::new(i as f64, 0.0)).collect();
        let stats = BlobStatistics::new(pts, 100.0);
        let blob = Blob::new(PointXY::new(70.0, 0.0), 200.0, 0, values);
        FeatureData::new(stats, blob, DefectId(1))
    };
    let uniform = {
        let pts = (0..100).map(|i| PointXY::new(i as f64, 1.0)).collect();
        let stats = BlobStatistics::new(pts, 100.0);
        let blob = Blob::new(PointXY::new(0.0, 1.0), 50.0, 20, vec![50u32; 100]);
        FeatureData::new(stats, blob, DefectId(2))
    };

    let mut batch = vec![banded, uniform];
    let splitter = splitter();
    let outcomes = splitter.split_batch(&mut batch, &RasterTrackTransform, &surface);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].scratches.len(), 3);
    assert_eq!(outcomes[1].scratches.len(), 1);
    assert_eq!(outcomes[0].scratches[0].defect, DefectId(1));
    assert_eq!(outcomes[1].scratches[0].defect, DefectId(2));
}

#[test]
fn flips_mirror_stored_contour_points() {
    let values = vec![50u32; 10];
    let (mut feature, surface) = line_feature(&values, 20);
    let params = SurfaceParams {
        flip_coord_x: true,
        ..Default::default()
    };
    let splitter = ScratchSplitter::new(SplitParams::default(), params);
    let outcome = splitter.split(&mut feature, &RasterTrackTransform, &surface);

    let xs: Vec<f64> = outcome.scratches[0].points.iter().map(|p| p.x).collect();
    assert!(xs.iter().all(|&x| x <= 0.0), "x flip not applied: {xs:?}");
    // Position stays in the unflipped pixel frame.
    assert!(outcome.scratches[0].position.x >= 0.0);
}
