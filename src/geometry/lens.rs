//! Two-circle intersection ("lens") geometry.
//!
//! All functions take radii and the center-to-center distance in the same
//! unit and reject negative or non-finite input.

use std::f64::consts::PI;

use crate::foundation::error::{CanvasfitError, CanvasfitResult};

const MAX_BISECTION_STEPS: usize = 100;
const AREA_TOLERANCE: f64 = 1e-6;

/// Width (along the center axis) and height (chord length) of a lens.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LensExtent {
    pub width: f64,
    pub height: f64,
}

/// Area of the intersection of two circles with radii `r1`, `r2` whose
/// centers are `d` apart.
///
/// Disjoint or touching circles give 0, a contained circle gives the area of
/// the smaller circle, and a zero radius always gives 0.
pub fn lens_area(r1: f64, r2: f64, d: f64) -> CanvasfitResult<f64> {
    check_non_negative(&[("r1", r1), ("r2", r2), ("d", d)])?;
    Ok(lens_area_unchecked(r1, r2, d))
}

pub(crate) fn lens_area_unchecked(r1: f64, r2: f64, d: f64) -> f64 {
    if r1 == 0.0 || r2 == 0.0 || d >= r1 + r2 {
        return 0.0;
    }
    let r_min = r1.min(r2);
    if d <= (r1 - r2).abs() {
        return PI * r_min * r_min;
    }

    let alpha = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1)).clamp(-1.0, 1.0);
    let beta = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2)).clamp(-1.0, 1.0);
    let kite = (-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2);
    let area = r1 * r1 * alpha.acos() + r2 * r2 * beta.acos() - 0.5 * kite.max(0.0).sqrt();
    area.clamp(0.0, PI * r_min * r_min)
}

/// Separation `d` at which two circles overlap by `target_area`.
///
/// Lens area decreases monotonically on `[|r1 - r2|, r1 + r2]`, so the
/// answer is found by bisection on that interval. Targets at or below zero
/// return `r1 + r2`; targets at or above the smaller circle's area return
/// `|r1 - r2|`.
pub fn solve_separation(r1: f64, r2: f64, target_area: f64) -> CanvasfitResult<f64> {
    check_non_negative(&[("r1", r1), ("r2", r2), ("target_area", target_area)])?;

    let r_min = r1.min(r2);
    let full = PI * r_min * r_min;
    let mut lo = (r1 - r2).abs();
    let mut hi = r1 + r2;
    if target_area <= 0.0 || r_min == 0.0 {
        return Ok(hi);
    }
    if target_area >= full {
        return Ok(lo);
    }

    let tolerance = AREA_TOLERANCE * target_area.max(1.0);
    let mut mid = 0.5 * (lo + hi);
    for step in 0..MAX_BISECTION_STEPS {
        mid = 0.5 * (lo + hi);
        let area = lens_area_unchecked(r1, r2, mid);
        if (area - target_area).abs() <= tolerance {
            tracing::trace!(step, d = mid, "separation converged");
            break;
        }
        if area > target_area {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(mid)
}

/// Extent of the lens formed by two circles `d` apart.
pub fn lens_extent(r1: f64, r2: f64, d: f64) -> CanvasfitResult<LensExtent> {
    check_non_negative(&[("r1", r1), ("r2", r2), ("d", d)])?;
    if r1 == 0.0 || r2 == 0.0 || d >= r1 + r2 {
        return Ok(LensExtent {
            width: 0.0,
            height: 0.0,
        });
    }
    if d <= (r1 - r2).abs() {
        let diameter = 2.0 * r1.min(r2);
        return Ok(LensExtent {
            width: diameter,
            height: diameter,
        });
    }

    // Radical line offset from the first center.
    let a = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let half_chord = (r1 * r1 - a * a).max(0.0).sqrt();
    Ok(LensExtent {
        width: r1 + r2 - d,
        height: 2.0 * half_chord,
    })
}

fn check_non_negative(values: &[(&str, f64)]) -> CanvasfitResult<()> {
    for &(name, v) in values {
        if !v.is_finite() || v < 0.0 {
            return Err(CanvasfitError::geometry(format!(
                "{name} must be finite and >= 0 (got {v})"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/lens.rs"]
mod tests;
