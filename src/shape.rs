use crate::brush::Brush;
use crate::raster::{Raster, RasterPoint};
use serde::{Deserialize, Serialize};

/// The drawing tools the canvas understands
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Freehand brush; strokes land on the raster as the pointer moves
    #[default]
    Freehand,
    Line,
    Rectangle,
    Oval,
    Triangle,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Freehand,
        Tool::Line,
        Tool::Rectangle,
        Tool::Oval,
        Tool::Triangle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Freehand => "Brush",
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
            Tool::Oval => "Oval",
            Tool::Triangle => "Triangle",
        }
    }

    /// Shape tools preview while dragging and only touch the raster on release
    pub fn is_shape(&self) -> bool {
        !matches!(self, Tool::Freehand)
    }
}

/// Axis-aligned box spanned by two gesture points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    /// Extents saturate at `i32::MAX` for corners at opposite ends of the range
    pub fn from_corners(a: RasterPoint, b: RasterPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: saturating_extent(a.x, b.x),
            height: saturating_extent(a.y, b.y),
        }
    }
}

fn saturating_extent(a: i32, b: i32) -> i32 {
    i32::try_from(a.abs_diff(b)).unwrap_or(i32::MAX)
}

/// A pending or committed geometric shape in raster coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Line { from: RasterPoint, to: RasterPoint },
    Rectangle(BoundingBox),
    Oval(BoundingBox),
    Triangle([RasterPoint; 3]),
}

impl Shape {
    /// Builds the shape a gesture from `start` to `current` describes.
    /// Returns `None` for the freehand tool.
    pub fn from_gesture(tool: Tool, start: RasterPoint, current: RasterPoint) -> Option<Self> {
        let bounds = BoundingBox::from_corners(start, current);
        match tool {
            Tool::Freehand => None,
            Tool::Line => Some(Shape::Line { from: start, to: current }),
            Tool::Rectangle => Some(Shape::Rectangle(bounds)),
            Tool::Oval => Some(Shape::Oval(bounds)),
            Tool::Triangle => Some(Shape::Triangle(triangle_vertices(bounds))),
        }
    }

    /// Strokes the shape outline onto `raster` with the brush width and color
    pub fn render(&self, raster: &mut Raster, brush: &Brush) {
        let (width, color) = (brush.size(), brush.color());
        match *self {
            Shape::Line { from, to } => raster.draw_segment(from, to, width, color),
            Shape::Rectangle(b) => raster.draw_rect_outline(b.x, b.y, b.width, b.height, width, color),
            Shape::Oval(b) => raster.draw_ellipse_outline(b.x, b.y, b.width, b.height, width, color),
            Shape::Triangle(vertices) => raster.draw_polyline(&vertices, true, width, color),
        }
    }
}

/// Apex at the middle of the top edge, base along the bottom edge
pub fn triangle_vertices(b: BoundingBox) -> [RasterPoint; 3] {
    let bottom = b.y.saturating_add(b.height);
    [
        RasterPoint::new(b.x.saturating_add(b.width / 2), b.y),
        RasterPoint::new(b.x, bottom),
        RasterPoint::new(b.x.saturating_add(b.width), bottom),
    ]
}
