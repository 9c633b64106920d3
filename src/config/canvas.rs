use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{CanvasfitError, CanvasfitResult};

/// Rendering mode a visualization is validated against.
///
/// Modes with more screen subdivisions get a smaller share of the canvas and
/// tighter limits.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// The visualization owns the whole content zone.
    #[default]
    Full,
    /// The visualization owns the right half of the content zone.
    Split,
    /// One vertical band per step; limits apply per step.
    StepByStep,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [RenderMode::Full, RenderMode::Split, RenderMode::StepByStep];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Full => "full",
            RenderMode::Split => "split",
            RenderMode::StepByStep => "stepByStep",
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-mode limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeLimits {
    /// Maximum nodes in a network, or per step.
    pub max_nodes: usize,
    /// Maximum label length in characters.
    pub max_label_chars: usize,
    /// Maximum union size of a two-set comparison.
    pub max_set_elements: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeTable {
    pub full: ModeLimits,
    pub split: ModeLimits,
    pub step_by_step: ModeLimits,
}

impl Default for ModeTable {
    fn default() -> Self {
        Self {
            full: ModeLimits {
                max_nodes: 10,
                max_label_chars: 30,
                max_set_elements: 40,
            },
            split: ModeLimits {
                max_nodes: 6,
                max_label_chars: 20,
                max_set_elements: 20,
            },
            step_by_step: ModeLimits {
                max_nodes: 5,
                max_label_chars: 25,
                max_set_elements: 16,
            },
        }
    }
}

/// Canvas geometry and mode limits shared by layout, validation and repair.
///
/// Constructed once by the caller and passed by reference; nothing in the
/// crate mutates it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    pub canvas: Canvas,
    /// Keeps content off the canvas edges (TV/mobile safe).
    pub outer_padding: f64,
    /// Reserved band below the top padding for the scene title.
    pub title_zone_height: f64,
    /// Gap between the two halves in split mode.
    pub split_gutter: f64,
    /// Extra clearance required between two positioned nodes.
    pub collision_margin: f64,
    pub min_node_size: f64,
    pub max_node_size: f64,
    pub modes: ModeTable,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            outer_padding: 50.0,
            title_zone_height: 120.0,
            split_gutter: 40.0,
            collision_margin: 20.0,
            min_node_size: 4.0,
            max_node_size: 120.0,
            modes: ModeTable::default(),
        }
    }
}

impl CanvasConfig {
    pub fn limits(&self, mode: RenderMode) -> ModeLimits {
        match mode {
            RenderMode::Full => self.modes.full,
            RenderMode::Split => self.modes.split,
            RenderMode::StepByStep => self.modes.step_by_step,
        }
    }

    /// Canvas minus outer padding minus the title zone.
    pub fn safe_area(&self) -> Rect {
        let c = self.canvas.rect();
        let p = self.outer_padding;
        let x1 = (c.x1 - p).max(p);
        let y0 = p + self.title_zone_height;
        let y1 = (c.y1 - p).max(y0);
        Rect::new(p, y0, x1, y1)
    }

    /// Safe area available to a visualization in `mode`.
    pub fn safe_area_for(&self, mode: RenderMode) -> Rect {
        let area = self.safe_area();
        match mode {
            RenderMode::Full | RenderMode::StepByStep => area,
            RenderMode::Split => {
                let mid = area.center().x;
                let x0 = (mid + self.split_gutter * 0.5).min(area.x1);
                Rect::new(x0, area.y0, area.x1, area.y1)
            }
        }
    }

    pub fn validate(&self) -> CanvasfitResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(CanvasfitError::config("canvas width/height must be > 0"));
        }
        for (name, value) in [
            ("outerPadding", self.outer_padding),
            ("titleZoneHeight", self.title_zone_height),
            ("splitGutter", self.split_gutter),
            ("collisionMargin", self.collision_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CanvasfitError::config(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        let area = self.safe_area();
        if area.width() <= 0.0 || area.height() <= 0.0 {
            return Err(CanvasfitError::config(
                "padding and title zone leave no safe area on the canvas",
            ));
        }
        if self.safe_area_for(RenderMode::Split).width() <= 0.0 {
            return Err(CanvasfitError::config(
                "splitGutter leaves no room for the split-mode half",
            ));
        }

        if !self.min_node_size.is_finite()
            || !self.max_node_size.is_finite()
            || self.min_node_size <= 0.0
            || self.min_node_size > self.max_node_size
        {
            return Err(CanvasfitError::config(
                "node size range must be finite with 0 < minNodeSize <= maxNodeSize",
            ));
        }

        for mode in RenderMode::ALL {
            let limits = self.limits(mode);
            if limits.max_nodes == 0 || limits.max_set_elements == 0 {
                return Err(CanvasfitError::config(format!(
                    "mode '{mode}' must allow at least one node and one set element"
                )));
            }
            // Truncation keeps one char plus the marker.
            if limits.max_label_chars < 2 {
                return Err(CanvasfitError::config(format!(
                    "mode '{mode}' maxLabelChars must be >= 2"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/canvas.rs"]
mod tests;
