//! Instrument-side collaborators: the pixel→track/phi transform, raw-value
//! lookup, and the process-wide consumed-pixel mask.
//!
//! The splitter core only sees the [`TrackTransform`] and
//! [`MeasurementSource`] traits; concrete implementations here cover the two
//! acquisition geometries we care about (row-major raster captures and
//! polar disk scans). The [`SurfaceMask`] is owned by the caller — the core
//! reports consumed indices and never writes the mask itself.

mod mask;
mod surface;
mod transform;

pub use mask::SurfaceMask;
pub use surface::{MeasuredSurface, MeasurementSource};
pub use transform::{AnyTransform, PolarTrackTransform, RasterTrackTransform, TrackTransform};
