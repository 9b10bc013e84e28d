use crate::types::{PointXY, TrackPoint};
use nalgebra::Vector2;

/// Pure mapping from pixel space to the instrument's track/phi grid.
pub trait TrackTransform {
    fn track_point(&self, p: PointXY) -> TrackPoint;
}

/// Identity-like transform for row-major raster captures: image row → track,
/// image column → phi.
#[derive(Clone, Copy, Debug, Default)]
pub struct RasterTrackTransform;

impl TrackTransform for RasterTrackTransform {
    fn track_point(&self, p: PointXY) -> TrackPoint {
        TrackPoint::new(p.y.round().max(0.0) as u32, p.x.round().max(0.0) as u32)
    }
}

/// Polar transform for disk scans: radial distance from the spindle center
/// selects the track, the angle selects the phi bin.
#[derive(Clone, Copy, Debug)]
pub struct PolarTrackTransform {
    center: PointXY,
    track_pitch: f64,
    phi_bins: u32,
}

impl PolarTrackTransform {
    /// `track_pitch` is the radial extent of one track in pixels; `phi_bins`
    /// is the angular resolution of one revolution. Both must be positive.
    pub fn new(center: PointXY, track_pitch: f64, phi_bins: u32) -> Self {
        assert!(track_pitch > 0.0, "track pitch must be positive");
        assert!(phi_bins > 0, "phi bin count must be positive");
        Self {
            center,
            track_pitch,
            phi_bins,
        }
    }
}

impl TrackTransform for PolarTrackTransform {
    fn track_point(&self, p: PointXY) -> TrackPoint {
        let d = Vector2::new(p.x - self.center.x, p.y - self.center.y);
        let track = (d.norm() / self.track_pitch) as u32;
        let turn = d.y.atan2(d.x).rem_euclid(std::f64::consts::TAU) / std::f64::consts::TAU;
        let phi = ((turn * self.phi_bins as f64) as u32).min(self.phi_bins - 1);
        TrackPoint::new(track, phi)
    }
}

/// Transform selected at runtime, e.g. from a config file.
#[derive(Clone, Copy, Debug)]
pub enum AnyTransform {
    Raster(RasterTrackTransform),
    Polar(PolarTrackTransform),
}

impl TrackTransform for AnyTransform {
    fn track_point(&self, p: PointXY) -> TrackPoint {
        match self {
            AnyTransform::Raster(t) => t.track_point(p),
            AnyTransform::Polar(t) => t.track_point(p),
        }
    }
}
