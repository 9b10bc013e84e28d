use scratch_splitter::feature::{Blob, BlobStatistics, FeatureData};
use scratch_splitter::measure::MeasuredSurface;
use scratch_splitter::types::{DefectId, PointXY};

/// Device bias-noise used by all synthetic surfaces.
pub const BIAS_NOISE: f64 = 3.0;

/// Builds a three-track measured surface carrying one horizontal scratch on
/// the middle track, plus the feature describing that scratch.
///
/// `zones` gives the scratch profile as `(pixel_count, raw_value)` runs laid
/// out left to right; the rest of the surface holds `background`.
pub fn banded_scratch(
    zones: &[(usize, u32)],
    background: u32,
    haze: u32,
) -> (FeatureData, MeasuredSurface) {
    let scratch_len: usize = zones.iter().map(|&(n, _)| n).sum();
    assert!(scratch_len > 0, "scratch must cover at least one pixel");

    let mut values = Vec::with_capacity(scratch_len);
    for &(n, v) in zones {
        values.extend(std::iter::repeat_n(v, n));
    }

    let tracks = 3usize;
    let mut data = vec![background; tracks * scratch_len];
    data[scratch_len..2 * scratch_len].copy_from_slice(&values);
    let surface = MeasuredSurface::new(tracks, scratch_len, data, BIAS_NOISE);

    let pts: Vec<PointXY> = (0..scratch_len)
        .map(|x| PointXY::new(x as f64, 1.0))
        .collect();
    let (peak_idx, &peak_value) = values
        .iter()
        .enumerate()
        .max_by_key(|(_, &v)| v)
        .expect("non-empty scratch");

    let stats = BlobStatistics::new(pts, scratch_len as f64);
    let blob = Blob::new(
        PointXY::new(peak_idx as f64, 1.0),
        peak_value as f64,
        haze,
        values,
    );
    (FeatureData::new(stats, blob, DefectId(42)), surface)
}
