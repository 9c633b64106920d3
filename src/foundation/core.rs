use crate::foundation::error::{CanvasfitError, CanvasfitResult};

pub use kurbo::{Circle, Point, Rect, Vec2};

/// Canvas size in pixels. Origin is the top-left corner, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> CanvasfitResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasfitError::config("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Closed containment test; `kurbo::Rect::contains` excludes the far edges.
pub(crate) fn rect_contains_closed(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

pub(crate) fn clamp_into(rect: Rect, p: Point) -> Point {
    Point::new(p.x.clamp(rect.x0, rect.x1), p.y.clamp(rect.y0, rect.y1))
}
