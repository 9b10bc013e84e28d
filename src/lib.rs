#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod feature;
pub mod measure;
pub mod splitter;
pub mod types;

// Helper modules – still public, but considered unstable internals.
pub mod geom;
pub mod stats;

// --- High-level re-exports -------------------------------------------------

// Main entry points: splitter + results.
pub use crate::splitter::{ScratchSplitter, SplitParams, SurfaceParams};
pub use crate::types::{Scratch, SplitOutcome};

// Input-side model.
pub use crate::feature::{Blob, BlobStatistics, FeatureData};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use scratch_splitter::prelude::*;
///
/// # fn main() {
/// let splitter = ScratchSplitter::new(SplitParams::default(), SurfaceParams::default());
/// let _ = splitter.params();
/// # }
/// ```
pub mod prelude {
    pub use crate::feature::{Blob, BlobStatistics, FeatureData};
    pub use crate::measure::{MeasurementSource, SurfaceMask, TrackTransform};
    pub use crate::types::{PointXY, Scratch, SplitOutcome, TrackPoint};
    pub use crate::{ScratchSplitter, SplitParams, SurfaceParams};
}
