use crate::types::TrackPoint;
use std::path::Path;

/// Raw measurement lookup keyed by instrument coordinate, plus the
/// per-session device constants the splitter needs.
pub trait MeasurementSource {
    /// Measured intensity at the given track/phi cell.
    fn raw_value(&self, tp: TrackPoint) -> u32;

    /// Device bias-noise term, constant for one measurement session.
    fn bias_noise(&self) -> f64;

    /// Flat index of the track/phi cell in the surface mask.
    fn mask_index(&self, tp: TrackPoint) -> usize;
}

/// Owned track-major raster of acquired measurement values.
#[derive(Clone, Debug)]
pub struct MeasuredSurface {
    tracks: usize,
    phis: usize,
    data: Vec<u32>,
    bias_noise: f64,
}

impl MeasuredSurface {
    /// Construct from a track-major value buffer of `tracks * phis` cells.
    pub fn new(tracks: usize, phis: usize, data: Vec<u32>, bias_noise: f64) -> Self {
        assert_eq!(
            data.len(),
            tracks * phis,
            "value buffer must cover tracks * phis cells"
        );
        Self {
            tracks,
            phis,
            data,
            bias_noise,
        }
    }

    /// Load an image from disk, convert to 8-bit grayscale, and widen into a
    /// measured surface (row → track, column → phi).
    pub fn from_grayscale_image(path: &Path, bias_noise: f64) -> Result<Self, String> {
        let img = image::open(path)
            .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
            .into_luma8();
        let phis = img.width() as usize;
        let tracks = img.height() as usize;
        let data = img.into_raw().into_iter().map(u32::from).collect();
        Ok(Self::new(tracks, phis, data, bias_noise))
    }

    pub fn tracks(&self) -> usize {
        self.tracks
    }

    pub fn phis(&self) -> usize {
        self.phis
    }

    /// Number of mask cells covered by this surface.
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    // Out-of-range coordinates clamp to the border cell.
    fn idx(&self, tp: TrackPoint) -> usize {
        let track = (tp.track as usize).min(self.tracks.saturating_sub(1));
        let phi = (tp.phi as usize).min(self.phis.saturating_sub(1));
        track * self.phis + phi
    }
}

impl MeasurementSource for MeasuredSurface {
    fn raw_value(&self, tp: TrackPoint) -> u32 {
        self.data[self.idx(tp)]
    }

    fn bias_noise(&self) -> f64 {
        self.bias_noise
    }

    fn mask_index(&self, tp: TrackPoint) -> usize {
        self.idx(tp)
    }
}
