use crate::measure::SurfaceMask;
use serde::{Deserialize, Serialize};

/// Pixel-space coordinate on the inspected surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointXY {
    pub x: f64,
    pub y: f64,
}

impl PointXY {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Instrument-space coordinate used for raw measurement lookup.
///
/// `track` is the radial bin, `phi` the angular bin of the acquisition grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackPoint {
    pub track: u32,
    pub phi: u32,
}

impl TrackPoint {
    pub fn new(track: u32, phi: u32) -> Self {
        Self { track, phi }
    }
}

/// Identifier linking a scratch back to the defect it was detected under.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DefectId(pub u32);

/// One reported defect segment.
///
/// A single input blob yields one or more of these; area and length are
/// apportioned from the parent blob by pixel share, while the peak pixel and
/// peak absolute value are inherited unchanged.
#[derive(Clone, Debug, Serialize)]
pub struct Scratch {
    /// Apportioned blob area.
    pub area: f64,
    /// Apportioned blob length.
    pub length: f64,
    /// Trimmed-mean haze-relative intensity of this segment's pixels.
    pub intensity: f64,
    /// Instrument coordinate of the segment centroid.
    pub track_point: TrackPoint,
    /// Segment centroid in pixel space.
    pub position: PointXY,
    /// Segment pixels, center-sorted and coordinate-flipped for storage.
    pub points: Vec<PointXY>,
    /// Number of pixels in this segment.
    pub pixel_count: usize,
    /// Haze-relative value; equals `intensity`.
    pub value_rel_haze: f64,
    /// Peak absolute value minus the device bias-noise term.
    pub value_rel_apd: f64,
    /// Peak absolute value, inherited from the parent blob.
    pub value: f64,
    /// Peak pixel, inherited from the parent blob.
    pub peak_pixel: PointXY,
    /// Defect linkage copied from the parent feature.
    pub defect: DefectId,
}

/// Result of splitting one feature.
///
/// `consumed` lists the surface-mask indices covered by the produced
/// scratches, one entry per pixel in scan order. The core never writes the
/// shared mask itself; apply the indices with [`SplitOutcome::apply_to_mask`]
/// once the outcome is accepted.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SplitOutcome {
    pub scratches: Vec<Scratch>,
    pub consumed: Vec<usize>,
}

impl SplitOutcome {
    /// Total pixel count across all produced scratches.
    pub fn pixel_count(&self) -> usize {
        self.scratches.iter().map(|s| s.pixel_count).sum()
    }

    /// Mark every consumed index in `mask`.
    pub fn apply_to_mask(&self, mask: &mut SurfaceMask) {
        mask.apply(self.consumed.iter().copied());
    }
}
