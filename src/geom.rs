//! Point-set helpers used when materializing scratch segments.

use crate::types::PointXY;
use nalgebra::Vector2;

/// Arithmetic centroid of a point set. Returns the origin for an empty set.
pub fn centroid(pts: &[PointXY]) -> PointXY {
    if pts.is_empty() {
        return PointXY::default();
    }
    let mut acc = Vector2::zeros();
    for p in pts {
        acc += Vector2::new(p.x, p.y);
    }
    acc /= pts.len() as f64;
    PointXY::new(acc.x, acc.y)
}

/// Sorts points by angle (then squared radius) around `center`.
///
/// Both keys are quantized by `scale` so the ordering is a total,
/// platform-stable one for downstream contour consumers; ties after
/// quantization keep their existing relative order.
pub fn center_sort(pts: &mut [PointXY], center: PointXY, scale: f64) {
    pts.sort_by_key(|p| {
        let d = Vector2::new(p.x - center.x, p.y - center.y);
        let angle = d.y.atan2(d.x);
        ((angle * scale) as i64, (d.norm_squared() * scale) as i64)
    });
}
