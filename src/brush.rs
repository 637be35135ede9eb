use image::Rgba;
use serde::{Deserialize, Serialize};

pub const MIN_BRUSH_SIZE: u32 = 2;
pub const MAX_BRUSH_SIZE: u32 = 18;
pub const DEFAULT_BRUSH_SIZE: u32 = 5;
pub const DEFAULT_BRUSH_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Pen used for freehand dabs and shape outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    size: u32,
    color: [u8; 4],
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH_SIZE, DEFAULT_BRUSH_COLOR)
    }
}

impl Brush {
    /// Creates a brush, clamping `size` into the supported range
    pub fn new(size: u32, color: Rgba<u8>) -> Self {
        Self {
            size: clamp_brush_size(size),
            color: color.0,
        }
    }

    /// Stroke width (and dab diameter) in raster pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn color(&self) -> Rgba<u8> {
        Rgba(self.color)
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = clamp_brush_size(size);
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.color = color.0;
    }
}

pub fn clamp_brush_size(size: u32) -> u32 {
    size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}
