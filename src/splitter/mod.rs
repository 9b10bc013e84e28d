//! Intensity-based scratch splitter.
//!
//! Decides whether one connected blob of measured pixels should be reported
//! as a single scratch or broken into several, based on how the haze-relative
//! intensity varies along the blob's dominant spatial axis. The stages are:
//!
//! - Axis & length estimation: pick the dominant axis from the blob's
//!   per-axis extreme points; the length estimate combines the x and y
//!   extents (`axis::estimate_axis`).
//! - Profile classification: stably sort pixels along that axis, classify
//!   each haze-relative value into a low/mid/high band from percentile split
//!   points, and record a split wherever a band transition's run covers more
//!   than `min_split_ratio` of the total length. Shorter runs are absorbed —
//!   the hysteresis that keeps noise from over-segmenting (`profile`).
//! - Materialization: each surviving range becomes one scratch with a
//!   recomputed centroid, a center-sorted contour, a trimmed-mean intensity,
//!   and area/length apportioned by pixel share (`materialize`).
//! - Fallback: with no surviving transition the blob saves as one scratch.
//!
//! Notes
//! - Classification uses two deliberately different boundary rules for the
//!   first pixel versus the rest of the scan; see `profile::initial_band`.
//! - The splitter never touches the shared surface mask; consumed indices are
//!   returned in the outcome for the caller to apply.
//! - Sorting ties along the dominant axis preserve capture order, so the
//!   split decision is deterministic for a given input.

mod axis;
mod materialize;
mod params;
mod pipeline;
mod profile;

pub use axis::{estimate_axis, AxisEstimate, SplitAxis};
pub use params::{SplitParams, SurfaceParams};
pub use pipeline::ScratchSplitter;
pub use profile::{detect_splits, initial_band, scan_band, IntensityBand};

#[cfg(test)]
mod tests;
