use crate::measure::{AnyTransform, PolarTrackTransform, RasterTrackTransform};
use crate::splitter::{SplitParams, SurfaceParams};
use crate::types::PointXY;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `split_demo` tool.
#[derive(Debug, Deserialize)]
pub struct SplitToolConfig {
    /// Grayscale measurement map to load as the measured surface.
    pub input: PathBuf,
    /// Haze baseline subtracted from raw values.
    pub haze_value: u32,
    /// Raw-value threshold above which pixels are lifted into the demo blob.
    pub blob_threshold: u32,
    /// Device bias-noise term for this session.
    #[serde(default)]
    pub bias_noise: f64,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub split: SplitParams,
    #[serde(default)]
    pub surface: SurfaceParams,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Pixel→track/phi mapping selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformConfig {
    #[default]
    Raster,
    Polar {
        center_x: f64,
        center_y: f64,
        track_pitch: f64,
        phi_bins: u32,
    },
}

impl TransformConfig {
    pub fn to_transform(&self) -> Result<AnyTransform, String> {
        match *self {
            TransformConfig::Raster => Ok(AnyTransform::Raster(RasterTrackTransform)),
            TransformConfig::Polar {
                center_x,
                center_y,
                track_pitch,
                phi_bins,
            } => {
                if !(track_pitch > 0.0) {
                    return Err(format!("track_pitch must be positive, got {track_pitch}"));
                }
                if phi_bins == 0 {
                    return Err("phi_bins must be positive".into());
                }
                Ok(AnyTransform::Polar(PolarTrackTransform::new(
                    PointXY::new(center_x, center_y),
                    track_pitch,
                    phi_bins,
                )))
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Optional JSON report destination.
    pub json_out: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<SplitToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: SplitToolConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    config
        .split
        .validate()
        .map_err(|e| format!("Invalid split params in {}: {e}", path.display()))?;
    config.transform.to_transform().map(|_| ())?;
    Ok(config)
}
