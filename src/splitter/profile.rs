use crate::feature::IntensitySplitPoints;

/// Three-level intensity band of one pixel's haze-relative value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntensityBand {
    Low,
    Mid,
    High,
}

/// Band of the very first scanned pixel.
///
/// A value exactly equal to the low or high split point lands in `High`
/// here, unlike [`scan_band`]. The two rules disagree at exact threshold
/// equality and are kept separate on purpose; see the boundary-asymmetry
/// tests before touching either.
pub fn initial_band(value: i64, sp: &IntensitySplitPoints) -> IntensityBand {
    if value < sp.low {
        IntensityBand::Low
    } else if value > sp.low && value < sp.high {
        IntensityBand::Mid
    } else {
        IntensityBand::High
    }
}

/// Band of every pixel after the first.
///
/// A value exactly equal to the low or high split point lands in `Mid`.
pub fn scan_band(value: i64, sp: &IntensitySplitPoints) -> IntensityBand {
    if value > sp.high {
        IntensityBand::High
    } else if value >= sp.low && value <= sp.high {
        IntensityBand::Mid
    } else {
        IntensityBand::Low
    }
}

/// Scans the axis-sorted relative values and returns the indices where a
/// length-significant band transition occurs.
///
/// A transition splits only when the candidate run since the last split
/// covers strictly more than `min_split_ratio` of `total_length`; shorter
/// runs are absorbed and the scan continues. The previous band advances on
/// every pixel regardless of whether a split was recorded, so a short
/// excursion still resets what "transition" means for the pixels after it.
pub fn detect_splits(
    relative: &[i64],
    split_points: &IntensitySplitPoints,
    total_length: f64,
    min_split_ratio: f64,
) -> Vec<usize> {
    let mut splits = Vec::new();
    let Some((&first, rest)) = relative.split_first() else {
        return splits;
    };

    let total_pixels = relative.len();
    let split_limit = min_split_ratio * total_length;
    let mut previous = initial_band(first, split_points);
    let mut last_split = 0usize;

    for (offset, &value) in rest.iter().enumerate() {
        let index = offset + 1;
        let band = scan_band(value, split_points);
        if band != previous {
            let run = index - last_split;
            let candidate_length = run as f64 / total_pixels as f64 * total_length;
            if candidate_length > split_limit {
                splits.push(index);
                last_split = index;
            }
        }
        previous = band;
    }

    splits
}
