//! canvasfit lays out, validates and repairs generated diagram data before it
//! is handed to a renderer.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: `VennCounts -> VennLayout` (circle radii, separation, fonts,
//!    one position per element) via [`LayoutCalculator`]
//! 2. **Validate**: `VisualizationData + RenderMode -> ValidationReport` via
//!    [`validate`]
//! 3. **Fix** (optional): `VisualizationData -> FixOutcome` via
//!    [`validate_and_fix`], which repairs what it can and validates again
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure**: every operation is a function of its inputs and the
//!   [`CanvasConfig`] passed in; there is no global state.
//! - **Collect, don't fail**: validation gathers every finding into a report
//!   rather than returning the first error.
#![forbid(unsafe_code)]

mod config;
mod fix;
mod foundation;
mod geometry;
mod layout;
mod model;
mod validate;

pub use config::canvas::{CanvasConfig, ModeLimits, ModeTable, RenderMode};
pub use fix::autofix::{FixOutcome, TRUNCATION_MARKER, truncate_label, validate_and_fix};
pub use foundation::core::{Canvas, Circle, Point, Rect, Vec2};
pub use foundation::error::{CanvasfitError, CanvasfitResult};
pub use geometry::lens::{LensExtent, lens_area, lens_extent, solve_separation};
pub use layout::tier::{COMFORTABLE_UNION_LIMIT, Tier, TierParams};
pub use layout::venn::{
    ElementKey, LayoutCalculator, LensGeometry, Placement, Region, RegionFonts, SetLayout,
    VennCounts, VennLayout,
};
pub use model::data::{
    ComparisonData, Link, NamedSet, NetworkData, Node, RegionMembers, Step, StepsData,
    VisualizationData,
};
pub use validate::checks::validate;
pub use validate::report::{Issue, IssueKind, PathElem, ValidationReport};
