use std::f64::consts::{FRAC_PI_2, TAU};

use crate::foundation::core::{Point, Vec2};

/// Share of a region's half extents that ring placement may use, leaving
/// room for the label drawn around each point.
const FRAME_FILL: f64 = 0.85;

/// Area available to one region of a diagram: a centroid plus the half
/// width/height of the ellipse that fits inside the region around it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RegionFrame {
    pub(crate) center: Point,
    pub(crate) half_extent: Vec2,
}

/// Number of rings (beyond the center slot) needed to hold `n` labels when
/// ring `k` holds `6k`.
pub(crate) fn rings_needed(n: usize) -> usize {
    let mut rings = 0;
    let mut capacity = 1;
    while capacity < n {
        rings += 1;
        capacity += 6 * rings;
    }
    rings
}

/// Distributes `n` label positions on concentric elliptical rings around the
/// frame's centroid.
///
/// The first label sits at the centroid, ring `k` takes up to `6k` labels
/// spaced evenly by angle starting at the top. The ring step is the label
/// footprint `spacing`, compressed when the rings would leave the frame.
pub(crate) fn ring_positions(frame: RegionFrame, n: usize, spacing: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n);
    if n == 0 {
        return out;
    }
    out.push(frame.center);

    let rings = rings_needed(n);
    if rings == 0 {
        return out;
    }
    let step_x = (frame.half_extent.x * FRAME_FILL / rings as f64).min(spacing);
    let step_y = (frame.half_extent.y * FRAME_FILL / rings as f64).min(spacing);

    let mut remaining = n - 1;
    for k in 1..=rings {
        let on_ring = remaining.min(6 * k);
        for j in 0..on_ring {
            let theta = -FRAC_PI_2 + TAU * (j as f64) / (on_ring as f64);
            out.push(
                frame.center
                    + Vec2::new(
                        step_x * k as f64 * theta.cos(),
                        step_y * k as f64 * theta.sin(),
                    ),
            );
        }
        remaining -= on_ring;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/rings.rs"]
mod tests;
