use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::PI;

use crate::config::canvas::CanvasConfig;
use crate::foundation::core::{Circle, Point, Rect, Vec2};
use crate::foundation::error::{CanvasfitError, CanvasfitResult};
use crate::geometry::lens::{LensExtent, lens_area, lens_extent, solve_separation};
use crate::layout::rings::{RegionFrame, ring_positions};
use crate::layout::tier::{COMFORTABLE_UNION_LIMIT, Tier, TierParams};

/// Fraction of a region's area that packed labels can actually cover.
const PACKING_EFFICIENCY: f64 = 0.75;
/// Headroom added on top of the packed label area.
const SAFETY_MARGIN: f64 = 1.15;
/// Label box side per point of font size.
const FONT_BOX: f64 = 1.2;
const MIN_RADIUS: f64 = 40.0;
const MIN_FONT_SIZE: u32 = 18;
/// Largest inner/outer radius ratio when one set contains the other.
const CONTAINED_RATIO: f64 = 0.6;
/// Bounds on the lens share of the smaller circle, so a tiny or huge
/// intersection still leaves a readable lens and crescents.
const MIN_LENS_FRACTION: f64 = 0.08;
const MAX_LENS_FRACTION: f64 = 0.85;

/// Element counts of a two-set diagram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VennCounts {
    pub a_only: usize,
    pub b_only: usize,
    pub intersection: usize,
}

impl VennCounts {
    pub fn new(a_only: usize, b_only: usize, intersection: usize) -> Self {
        Self {
            a_only,
            b_only,
            intersection,
        }
    }

    pub fn union_size(self) -> usize {
        self.a_only + self.b_only + self.intersection
    }

    pub fn count(self, region: Region) -> usize {
        match region {
            Region::AOnly => self.a_only,
            Region::Shared => self.intersection,
            Region::BOnly => self.b_only,
        }
    }
}

/// One of the three regions of a two-set diagram.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    AOnly,
    Shared,
    BOnly,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::AOnly, Region::Shared, Region::BOnly];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::AOnly => "a_only",
            Region::Shared => "shared",
            Region::BOnly => "b_only",
        }
    }
}

/// Identifies the `index`-th element of a region, in the order the caller
/// listed (or `layout_sets` sorted) that region's elements.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementKey {
    pub region: Region,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    pub key: ElementKey,
    pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionFonts {
    pub shared: u32,
    pub a_only: u32,
    pub b_only: u32,
}

impl RegionFonts {
    pub fn for_region(self, region: Region) -> u32 {
        match region {
            Region::AOnly => self.a_only,
            Region::Shared => self.shared,
            Region::BOnly => self.b_only,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LensGeometry {
    pub area: f64,
    pub extent: LensExtent,
}

/// Complete geometry of a two-set diagram. Read-only once computed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VennLayout {
    pub union_size: usize,
    pub intersection_size: usize,
    pub a_only: usize,
    pub b_only: usize,
    pub tier: Tier,
    pub radius_a: f64,
    pub radius_b: f64,
    /// The larger of the two radii.
    pub circle_radius: f64,
    pub separation: f64,
    pub center_a: Point,
    pub center_b: Point,
    pub lens: LensGeometry,
    pub fonts: RegionFonts,
    pub placements: Vec<Placement>,
    pub warnings: Vec<String>,
}

impl VennLayout {
    pub fn position_of(&self, key: ElementKey) -> Option<Point> {
        self.placements
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.position)
    }

    /// Both set outlines, first set first.
    pub fn circles(&self) -> [Circle; 2] {
        [
            Circle::new(self.center_a, self.radius_a),
            Circle::new(self.center_b, self.radius_b),
        ]
    }

    /// Half the side of a label box drawn in `region`.
    pub fn label_radius(&self, region: Region) -> f64 {
        0.5 * f64::from(self.fonts.for_region(region)) * FONT_BOX
    }
}

/// A [`VennLayout`] whose positions are keyed by the caller's elements.
#[derive(Clone, Debug, PartialEq)]
pub struct SetLayout<T: Ord> {
    pub layout: VennLayout,
    pub positions: BTreeMap<T, Point>,
}

/// Computes two-set layouts inside the safe area of a [`CanvasConfig`].
#[derive(Clone, Copy, Debug)]
pub struct LayoutCalculator<'a> {
    config: &'a CanvasConfig,
}

impl<'a> LayoutCalculator<'a> {
    pub fn new(config: &'a CanvasConfig) -> Self {
        Self { config }
    }

    /// Lays out `a_only`/`b_only`/`intersection` elements in the full-mode
    /// safe area.
    pub fn compute_layout(
        &self,
        a_only: usize,
        b_only: usize,
        intersection: usize,
    ) -> CanvasfitResult<VennLayout> {
        self.compute_layout_in(
            self.config.safe_area(),
            VennCounts::new(a_only, b_only, intersection),
        )
    }

    /// Lays out two collections, deriving the region counts from their set
    /// difference and intersection. Elements of each region are placed in
    /// ascending order.
    pub fn layout_sets<T, A, B>(&self, set_a: A, set_b: B) -> CanvasfitResult<SetLayout<T>>
    where
        T: Ord + Clone,
        A: IntoIterator<Item = T>,
        B: IntoIterator<Item = T>,
    {
        let a: BTreeSet<T> = set_a.into_iter().collect();
        let b: BTreeSet<T> = set_b.into_iter().collect();
        let a_only: Vec<T> = a.difference(&b).cloned().collect();
        let shared: Vec<T> = a.intersection(&b).cloned().collect();
        let b_only: Vec<T> = b.difference(&a).cloned().collect();

        let layout = self.compute_layout(a_only.len(), b_only.len(), shared.len())?;
        let mut positions = BTreeMap::new();
        for placement in &layout.placements {
            let members = match placement.key.region {
                Region::AOnly => &a_only,
                Region::Shared => &shared,
                Region::BOnly => &b_only,
            };
            if let Some(elem) = members.get(placement.key.index) {
                positions.insert(elem.clone(), placement.position);
            }
        }
        Ok(SetLayout { layout, positions })
    }

    #[tracing::instrument(level = "debug", skip(self), fields(union = counts.union_size()))]
    pub fn compute_layout_in(&self, area: Rect, counts: VennCounts) -> CanvasfitResult<VennLayout> {
        let union_size = counts.union_size();
        if union_size == 0 {
            return Err(CanvasfitError::validation(
                "nothing to lay out: both sets are empty",
            ));
        }

        let tier = Tier::for_union(union_size);
        let params = tier.params();
        let gap = params.padding;
        let max_radius = (area.height() * 0.5).min((area.width() - gap) * 0.25);
        if !max_radius.is_finite() || max_radius < MIN_RADIUS {
            return Err(CanvasfitError::validation(format!(
                "safe area {:.0}x{:.0} is too small for a two-set diagram",
                area.width(),
                area.height()
            )));
        }

        let mut warnings = Vec::new();
        if union_size > COMFORTABLE_UNION_LIMIT {
            warnings.push(format!(
                "union of {union_size} elements exceeds the comfortable limit of \
                 {COMFORTABLE_UNION_LIMIT}; labels will be crowded"
            ));
        }

        let base_radius = (params.radius_fraction * max_radius).max(MIN_RADIUS);
        let mut radius_a = circle_radius(
            "A",
            counts.a_only + counts.intersection,
            base_radius,
            max_radius,
            params,
            &mut warnings,
        );
        let mut radius_b = circle_radius(
            "B",
            counts.b_only + counts.intersection,
            base_radius,
            max_radius,
            params,
            &mut warnings,
        );

        let contained = counts.intersection > 0 && (counts.a_only == 0 || counts.b_only == 0);
        if contained {
            if counts.a_only == 0 && counts.b_only > 0 {
                radius_a = radius_a.min(radius_b * CONTAINED_RATIO);
            } else if counts.b_only == 0 && counts.a_only > 0 {
                radius_b = radius_b.min(radius_a * CONTAINED_RATIO);
            }
        }

        let separation = if counts.intersection == 0 {
            radius_a + radius_b + gap
        } else if contained {
            0.5 * (radius_a - radius_b).abs()
        } else {
            let fraction = (counts.intersection as f64 / union_size as f64)
                .clamp(MIN_LENS_FRACTION, MAX_LENS_FRACTION);
            let r_min = radius_a.min(radius_b);
            solve_separation(radius_a, radius_b, fraction * PI * r_min * r_min)?
        };

        // Center the bounding box of both circles in the area.
        let min_x = (-radius_a).min(separation - radius_b);
        let max_x = radius_a.max(separation + radius_b);
        let origin_x = area.center().x - 0.5 * (min_x + max_x);
        let cy = area.center().y;
        let center_a = Point::new(origin_x, cy);
        let center_b = Point::new(origin_x + separation, cy);

        let lens = LensGeometry {
            area: lens_area(radius_a, radius_b, separation)?,
            extent: lens_extent(radius_a, radius_b, separation)?,
        };

        let region_area = |region: Region| match region {
            Region::Shared => lens.area,
            Region::AOnly => (PI * radius_a * radius_a - lens.area).max(0.0),
            Region::BOnly => (PI * radius_b * radius_b - lens.area).max(0.0),
        };
        let font_for = |region: Region, warnings: &mut Vec<String>| {
            let font = region_font(counts.count(region), region_area(region), params);
            if font < params.font_size {
                warnings.push(format!(
                    "{} font reduced to {font}px (tier default {}px)",
                    region.as_str(),
                    params.font_size
                ));
            }
            font
        };
        let fonts = RegionFonts {
            shared: font_for(Region::Shared, &mut warnings),
            a_only: font_for(Region::AOnly, &mut warnings),
            b_only: font_for(Region::BOnly, &mut warnings),
        };

        let circles = [(center_a.x, radius_a), (center_b.x, radius_b)];
        let mut placements = Vec::with_capacity(union_size);
        for region in Region::ALL {
            let n = counts.count(region);
            if n == 0 {
                continue;
            }
            let frame = match region {
                Region::Shared => shared_frame(circles, cy, lens.extent),
                Region::AOnly => exclusive_frame(circles[0], circles[1], cy),
                Region::BOnly => exclusive_frame(circles[1], circles[0], cy),
            };
            let spacing = f64::from(fonts.for_region(region)) * FONT_BOX + params.padding;
            for (index, position) in ring_positions(frame, n, spacing).into_iter().enumerate() {
                placements.push(Placement {
                    key: ElementKey { region, index },
                    position,
                });
            }
        }

        tracing::debug!(
            %tier,
            radius_a,
            radius_b,
            separation,
            lens_area = lens.area,
            warnings = warnings.len(),
            "venn layout computed"
        );

        Ok(VennLayout {
            union_size,
            intersection_size: counts.intersection,
            a_only: counts.a_only,
            b_only: counts.b_only,
            tier,
            radius_a,
            radius_b,
            circle_radius: radius_a.max(radius_b),
            separation,
            center_a,
            center_b,
            lens,
            fonts,
            placements,
            warnings,
        })
    }
}

/// Radius that holds `n` labels at the tier's font, never below the tier
/// baseline, clamped to the area.
fn circle_radius(
    name: &str,
    n: usize,
    base_radius: f64,
    max_radius: f64,
    params: TierParams,
    warnings: &mut Vec<String>,
) -> f64 {
    let footprint = (f64::from(params.font_size) * FONT_BOX + params.padding).powi(2);
    let required_area = n as f64 * footprint / PACKING_EFFICIENCY * SAFETY_MARGIN;
    let wanted = (required_area / PI).sqrt().max(base_radius);
    if wanted > max_radius {
        warnings.push(format!(
            "circle {name} radius clamped to {max_radius:.1}px (requested {wanted:.1}px)"
        ));
    }
    wanted.clamp(MIN_RADIUS, max_radius)
}

fn region_font(n: usize, area: f64, params: TierParams) -> u32 {
    if n == 0 {
        return params.font_size;
    }
    let side = (area * PACKING_EFFICIENCY / n as f64).sqrt();
    let fitted = ((side - params.padding) / FONT_BOX).floor();
    if fitted >= f64::from(params.font_size) {
        params.font_size
    } else if fitted <= f64::from(MIN_FONT_SIZE) {
        MIN_FONT_SIZE
    } else {
        fitted as u32
    }
}

/// Frame of the lens: the overlap of both circles' spans on the axis.
fn shared_frame(circles: [(f64, f64); 2], cy: f64, extent: LensExtent) -> RegionFrame {
    let [(xa, ra), (xb, rb)] = circles;
    let left = (xa - ra).max(xb - rb);
    let right = (xa + ra).min(xb + rb);
    RegionFrame {
        center: Point::new(0.5 * (left + right), cy),
        half_extent: Vec2::new(0.5 * (right - left).max(0.0), 0.5 * extent.height),
    }
}

/// Frame of the part of `own` not covered by `other`: the longer piece of
/// `own`'s axis span left uncovered, with the chord height at its midpoint.
fn exclusive_frame(own: (f64, f64), other: (f64, f64), cy: f64) -> RegionFrame {
    let (x, r) = own;
    let (ox, or) = other;
    let (lo, hi) = (x - r, x + r);

    let left = (lo, hi.min(ox - or));
    let right = (lo.max(ox + or), hi);
    let len = |(a, b): (f64, f64)| (b - a).max(0.0);
    let (a, b) = if len(left) >= len(right) { left } else { right };
    if b <= a {
        return RegionFrame {
            center: Point::new(x, cy),
            half_extent: Vec2::ZERO,
        };
    }

    let mid = 0.5 * (a + b);
    let half_chord = (r * r - (mid - x) * (mid - x)).max(0.0).sqrt();
    RegionFrame {
        center: Point::new(mid, cy),
        half_extent: Vec2::new(0.5 * (b - a), half_chord),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/venn.rs"]
mod tests;
