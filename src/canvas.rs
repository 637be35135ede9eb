//! The drawing surface: owns the raster, the gesture state machine and the
//! undo/redo history.
//!
//! ```text
//!            pointer-down             pointer-up (commit)
//!   ┌──────┐ ───────────► ┌─────────┐ ──────────────────► ┌──────┐
//!   │ Idle │              │ Drawing │                     │ Idle │
//!   └──────┘ ◄─────────── └─────────┘                     └──────┘
//!             pointer-cancel (restore last snapshot)
//! ```
//!
//! Freehand strokes land on the raster while the pointer moves. Shape tools leave the
//! raster untouched until release; [`Canvas::compose`] overlays the pending shape.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage, imageops};

use crate::brush::Brush;
use crate::codec::{self, ImageFormat};
use crate::error::{CanvasError, CanvasResult};
use crate::history::History;
use crate::raster::{Raster, RasterPoint};
use crate::settings::{PaintSettings, clamp_zoom};
use crate::shape::{Shape, Tool};

/// Pointer position in device (on-screen, zoomed) coordinates relative to the
/// canvas origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DevicePoint {
    pub x: f32,
    pub y: f32,
}

impl DevicePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Toolkit-independent pointer input for the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    PointerDown(DevicePoint),
    PointerMove(DevicePoint),
    PointerUp(DevicePoint),
    /// Abandons the current gesture without committing anything
    PointerCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum GestureState {
    #[default]
    Idle,
    Drawing {
        /// Tool latched at pointer-down
        tool: Tool,
        start: RasterPoint,
        current: RasterPoint,
    },
}

#[derive(Debug)]
pub struct Canvas {
    raster: Option<Raster>,
    history: History,
    brush: Brush,
    tool: Tool,
    zoom: f32,
    background: Rgba<u8>,
    gesture: GestureState,
    revision: u64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(&PaintSettings::default())
    }
}

impl Canvas {
    pub fn new(settings: &PaintSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            raster: None,
            history: History::new(settings.history_capacity),
            brush: Brush::new(settings.brush_size, settings.color_rgba()),
            tool: settings.tool,
            zoom: settings.zoom,
            background: settings.background_rgba(),
            gesture: GestureState::Idle,
            revision: 0,
        }
    }

    /// Current drawing settings, for persistence
    pub fn settings(&self) -> PaintSettings {
        PaintSettings {
            brush_size: self.brush.size(),
            color: self.brush.color().0,
            zoom: self.zoom,
            tool: self.tool,
            history_capacity: self.history.capacity(),
            background: self.background.0,
        }
    }

    /// Creates the raster on first use and keeps it matching the visible drawing area.
    /// Resizing keeps existing content; history is seeded only on creation.
    pub fn ensure_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let Some(raster) = &mut self.raster else {
            let raster = Raster::new(width, height, self.background);
            self.history.reset(raster.snapshot());
            self.raster = Some(raster);
            self.revision += 1;
            log::info!("Canvas initialised at {}x{}", width, height);
            return;
        };
        if raster.size() == (width, height) {
            return;
        }
        log::debug!("Canvas resized {:?} -> {}x{}", raster.size(), width, height);
        raster.resize(width, height);
        self.revision += 1;
    }

    pub fn is_initialized(&self) -> bool {
        self.raster.is_some()
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.raster.as_ref().map(Raster::size)
    }

    /// Clears to the background and starts a fresh history
    pub fn new_image(&mut self) {
        self.gesture = GestureState::Idle;
        if let Some(raster) = &mut self.raster {
            raster.fill(self.background);
            self.history.reset(raster.snapshot());
            self.revision += 1;
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Takes effect from the next gesture
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn brush_size(&self) -> u32 {
        self.brush.size()
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.brush.set_size(size);
    }

    pub fn color(&self) -> Rgba<u8> {
        self.brush.color()
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.brush.set_color(color);
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Bumped on every raster change so renderers can skip redundant uploads
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Maps an on-screen position to raster space by undoing the zoom.
    /// Out-of-range positions saturate at the `i32` limits and NaN maps to 0.
    pub fn to_raster_point(&self, point: DevicePoint) -> RasterPoint {
        RasterPoint::new(
            saturating_coord(point.x / self.zoom),
            saturating_coord(point.y / self.zoom),
        )
    }

    /// Advances the gesture state machine
    pub fn handle_event(&mut self, event: CanvasEvent) {
        match event {
            CanvasEvent::PointerDown(pos) => self.pointer_down(self.to_raster_point(pos)),
            CanvasEvent::PointerMove(pos) => self.pointer_move(self.to_raster_point(pos)),
            CanvasEvent::PointerUp(pos) => self.pointer_up(self.to_raster_point(pos)),
            CanvasEvent::PointerCancel => self.cancel_gesture(),
        }
    }

    fn pointer_down(&mut self, point: RasterPoint) {
        if self.is_drawing() {
            return;
        }
        let Some(raster) = &mut self.raster else {
            log::warn!("Pointer down before the canvas was sized; ignoring");
            return;
        };

        if self.tool == Tool::Freehand {
            raster.fill_disc(point, self.brush.size(), self.brush.color());
            self.revision += 1;
        }
        self.gesture = GestureState::Drawing {
            tool: self.tool,
            start: point,
            current: point,
        };
    }

    fn pointer_move(&mut self, point: RasterPoint) {
        let GestureState::Drawing { tool, current, .. } = &mut self.gesture else {
            return;
        };
        if *current == point {
            return;
        }

        if *tool == Tool::Freehand {
            if let Some(raster) = &mut self.raster {
                raster.draw_segment(*current, point, self.brush.size(), self.brush.color());
            }
        }
        *current = point;
        // Shape previews change the composed frame even though the raster does not
        self.revision += 1;
    }

    fn pointer_up(&mut self, point: RasterPoint) {
        let GestureState::Drawing { tool, start, .. } = self.gesture else {
            return;
        };
        self.gesture = GestureState::Idle;
        let Some(raster) = &mut self.raster else {
            return;
        };

        match Shape::from_gesture(tool, start, point) {
            Some(shape) => shape.render(raster, &self.brush),
            None => raster.fill_disc(point, self.brush.size(), self.brush.color()),
        }
        self.history.commit(raster.snapshot());
        self.revision += 1;
        log::debug!("Committed {} gesture from {:?} to {:?}", tool.name(), start, point);
    }

    /// Drops the gesture in progress and erases anything it already drew
    fn cancel_gesture(&mut self) {
        if !self.is_drawing() {
            return;
        }
        self.gesture = GestureState::Idle;
        if let (Some(raster), Some(snapshot)) = (&mut self.raster, self.history.current()) {
            raster.restore(snapshot);
        }
        self.revision += 1;
        log::debug!("Gesture cancelled");
    }

    /// Reverts the last committed change. Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        if let Some(raster) = &mut self.raster {
            raster.restore(&snapshot);
        }
        self.revision += 1;
        log::debug!(
            "Undo: {} made, {} reverted",
            self.history.changes_made(),
            self.history.changes_reverted()
        );
        true
    }

    /// Re-applies the last undone change. Returns `false` when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        if let Some(raster) = &mut self.raster {
            raster.restore(&snapshot);
        }
        self.revision += 1;
        log::debug!(
            "Redo: {} made, {} reverted",
            self.history.changes_made(),
            self.history.changes_reverted()
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn changes_made(&self) -> usize {
        self.history.changes_made()
    }

    pub fn changes_reverted(&self) -> usize {
        self.history.changes_reverted()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.gesture, GestureState::Drawing { .. })
    }

    /// The shape a release right now would commit, if a shape gesture is in progress
    pub fn pending_shape(&self) -> Option<Shape> {
        match self.gesture {
            GestureState::Drawing { tool, start, current } => Shape::from_gesture(tool, start, current),
            GestureState::Idle => None,
        }
    }

    /// The frame to display before zoom scaling: the committed raster, with the pending
    /// shape drawn over a copy while a shape gesture is in progress
    pub fn compose(&self) -> Option<Cow<'_, RgbaImage>> {
        let raster = self.raster.as_ref()?;
        match self.pending_shape() {
            Some(shape) => {
                let mut preview = raster.clone();
                shape.render(&mut preview, &self.brush);
                Some(Cow::Owned(preview.into_image()))
            }
            None => Some(Cow::Borrowed(raster.pixels())),
        }
    }

    /// Replaces the canvas contents with `image`, scaled to fit the current canvas size
    /// and anchored at the origin. History restarts from the new contents.
    pub fn replace_image(&mut self, image: &RgbaImage) -> CanvasResult<()> {
        let size = self.size().ok_or(CanvasError::NotInitialized)?;
        self.replace_image_within(image, size)
    }

    /// Like [`Canvas::replace_image`], fitting the image into `bounds` instead. Bounds
    /// larger than the raster are cut down to it; the raster keeps its size.
    pub fn replace_image_within(&mut self, image: &RgbaImage, bounds: (u32, u32)) -> CanvasResult<()> {
        let (width, height) = self.size().ok_or(CanvasError::NotInitialized)?;
        let bounds = (bounds.0.clamp(1, width), bounds.1.clamp(1, height));
        let fitted = codec::fit_image(image, bounds);

        let mut pixels = RgbaImage::from_pixel(width, height, self.background);
        imageops::replace(&mut pixels, &fitted, 0, 0);
        let raster = Raster::from_image(pixels, self.background);

        self.gesture = GestureState::Idle;
        self.history.reset(raster.snapshot());
        self.raster = Some(raster);
        self.revision += 1;
        Ok(())
    }

    /// Decodes `path` and replaces the canvas contents with it
    pub fn load_image(&mut self, path: &Path) -> CanvasResult<()> {
        let size = self.size().ok_or(CanvasError::NotInitialized)?;
        self.load_image_within(path, size)
    }

    /// Decodes `path` and replaces the canvas contents with it, fitted into `bounds`
    /// (normally the visible drawing area)
    pub fn load_image_within(&mut self, path: &Path, bounds: (u32, u32)) -> CanvasResult<()> {
        if !self.is_initialized() {
            return Err(CanvasError::NotInitialized);
        }
        let image = codec::load_image(path)?;
        self.replace_image_within(&image, bounds)?;
        log::info!("Loaded {} into {}x{}", path.display(), bounds.0, bounds.1);
        Ok(())
    }

    /// Writes the committed raster to `path`, returning the path actually written
    pub fn save_image(&self, path: &Path, format: ImageFormat) -> CanvasResult<PathBuf> {
        let raster = self.raster.as_ref().ok_or(CanvasError::NotInitialized)?;
        Ok(codec::save_image_on(raster.pixels(), path, format, self.background)?)
    }
}

fn saturating_coord(value: f32) -> i32 {
    // Float-to-int `as` casts saturate
    value.floor() as i32
}
