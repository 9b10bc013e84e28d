use scratch_splitter::config::split::{load_config, SplitToolConfig};
use scratch_splitter::feature::{Blob, BlobStatistics, FeatureData};
use scratch_splitter::measure::{MeasuredSurface, MeasurementSource, SurfaceMask};
use scratch_splitter::types::{DefectId, PointXY, SplitOutcome, TrackPoint};
use scratch_splitter::ScratchSplitter;
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let config_path = args
        .next()
        .ok_or_else(|| "usage: split_demo <config.json>".to_string())?;
    let config = load_config(Path::new(&config_path))?;

    let surface = MeasuredSurface::from_grayscale_image(&config.input, config.bias_noise)?;
    let transform = config.transform.to_transform()?;

    let Some(mut feature) = threshold_feature(&surface, &config) else {
        println!(
            "No pixels above threshold {} in {}",
            config.blob_threshold,
            config.input.display()
        );
        return Ok(());
    };

    let splitter = ScratchSplitter::new(config.split.clone(), config.surface);
    let outcome = splitter.split(&mut feature, &transform, &surface);

    let mut mask = SurfaceMask::new(surface.cell_count());
    outcome.apply_to_mask(&mut mask);

    print_summary(&outcome, &mask, &feature);

    if let Some(path) = &config.output.json_out {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| format!("Failed to serialize report: {e}"))?;
        fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}

/// Stand-in for the upstream blob detector: lifts every cell at or above the
/// configured threshold into one feature, in raster order. The demo treats
/// phi as the pixel x coordinate and track as y, matching the raster
/// transform; area is approximated by pixel count.
fn threshold_feature(surface: &MeasuredSurface, config: &SplitToolConfig) -> Option<FeatureData> {
    let mut pts = Vec::new();
    let mut values = Vec::new();
    let mut peak_pixel = PointXY::default();
    let mut peak_value = 0u32;

    for track in 0..surface.tracks() {
        for phi in 0..surface.phis() {
            let value = surface.raw_value(TrackPoint::new(track as u32, phi as u32));
            if value < config.blob_threshold {
                continue;
            }
            let p = PointXY::new(phi as f64, track as f64);
            if value > peak_value {
                peak_value = value;
                peak_pixel = p;
            }
            pts.push(p);
            values.push(value);
        }
    }
    if pts.is_empty() {
        return None;
    }

    let area = pts.len() as f64;
    let stats = BlobStatistics::new(pts, area);
    let blob = Blob::new(peak_pixel, peak_value as f64, config.haze_value, values);
    Some(FeatureData::new(stats, blob, DefectId(0)))
}

fn print_summary(outcome: &SplitOutcome, mask: &SurfaceMask, feature: &FeatureData) {
    println!(
        "scratches={} pixels={} classified={}",
        outcome.scratches.len(),
        outcome.pixel_count(),
        feature.stats.is_classified()
    );
    for (i, s) in outcome.scratches.iter().enumerate() {
        println!(
            "  [{i}] pixels={} length={:.2} area={:.2} intensity={:.2} pos=({:.1}, {:.1}) track={} phi={}",
            s.pixel_count,
            s.length,
            s.area,
            s.intensity,
            s.position.x,
            s.position.y,
            s.track_point.track,
            s.track_point.phi
        );
    }
    println!("mask cells consumed: {}", mask.consumed_count());
}
