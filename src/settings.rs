use crate::brush::{DEFAULT_BRUSH_SIZE, clamp_brush_size};
use crate::history::{DEFAULT_HISTORY_CAPACITY, clamp_history_capacity};
use crate::shape::Tool;
use image::Rgba;
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.0;

pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        1.0
    }
}

/// User-adjustable drawing settings, persisted between runs.
///
/// We derive Deserialize/Serialize so the app can store these on shutdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintSettings {
    pub brush_size: u32,
    pub color: [u8; 4],
    pub zoom: f32,
    pub tool: Tool,
    pub history_capacity: usize,
    pub background: [u8; 4],
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            brush_size: DEFAULT_BRUSH_SIZE,
            color: [0, 0, 0, 255],
            zoom: 1.0,
            tool: Tool::Freehand,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            background: [255, 255, 255, 255],
        }
    }
}

impl PaintSettings {
    /// Copy with every field forced into its legal range
    pub fn sanitized(&self) -> Self {
        Self {
            brush_size: clamp_brush_size(self.brush_size),
            color: self.color,
            zoom: clamp_zoom(self.zoom),
            tool: self.tool,
            history_capacity: clamp_history_capacity(self.history_capacity),
            // The background must stay opaque so JPEG flattening is lossless on it
            background: [self.background[0], self.background[1], self.background[2], 255],
        }
    }

    pub fn color_rgba(&self) -> Rgba<u8> {
        Rgba(self.color)
    }

    pub fn background_rgba(&self) -> Rgba<u8> {
        Rgba(self.background)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(|settings| settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
