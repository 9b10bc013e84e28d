use crate::feature::BlobStatistics;
use crate::types::PointXY;

/// Dominant spatial axis of a blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitAxis {
    X,
    Y,
}

/// Axis-extreme points and the length estimate derived from them.
#[derive(Clone, Copy, Debug)]
pub struct AxisEstimate {
    pub axis: SplitAxis,
    pub total_length: f64,
    pub min_x: PointXY,
    pub max_x: PointXY,
    pub min_y: PointXY,
    pub max_y: PointXY,
}

/// Picks the dominant axis and estimates the blob's total length.
///
/// Returns `None` for an empty blob. The length combines the x extent and the
/// y extent from independently chosen extreme pairs; it is not the true
/// end-to-end distance along the dominant axis, and downstream apportionment
/// relies only on the ratio of segment to total length.
pub fn estimate_axis(stats: &BlobStatistics) -> Option<AxisEstimate> {
    let min_x = stats.min_x_point()?;
    let max_x = stats.max_x_point()?;
    let min_y = stats.min_y_point()?;
    let max_y = stats.max_y_point()?;

    let x_extent = max_x.x - min_x.x;
    let y_extent = max_y.y - min_y.y;
    let axis = if x_extent > y_extent {
        SplitAxis::X
    } else {
        SplitAxis::Y
    };

    Some(AxisEstimate {
        axis,
        total_length: x_extent.hypot(y_extent),
        min_x,
        max_x,
        min_y,
        max_y,
    })
}
