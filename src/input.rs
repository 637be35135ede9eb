use egui::{Context, Key, KeyboardShortcut, Modifiers, Pos2, Rect, Response};

use crate::canvas::{CanvasEvent, DevicePoint};

pub const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
pub const REDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// Keyboard actions handled outside the canvas gesture machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
}

/// Primary-button pointer state sampled for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSnapshot {
    /// Pointer position in screen coordinates, if known
    pub pos: Option<Pos2>,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    /// The canvas widget owns the pointer: no menu, popup or other layer covers it
    pub on_canvas: bool,
    /// Escape was pressed this frame
    pub cancel: bool,
}

/// Turns raw egui input into [`CanvasEvent`]s relative to the painted canvas
#[derive(Debug)]
pub struct InputHandler {
    /// Screen position of the raster origin
    origin: Pos2,
    /// Visible part of the canvas; gestures may only start inside it
    hit_rect: Rect,
    drawing: bool,
    last_pos: Option<Pos2>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            origin: canvas_rect.min,
            hit_rect: canvas_rect,
            drawing: false,
            last_pos: None,
        }
    }

    /// Update the canvas placement (e.g. after a resize or scroll)
    pub fn set_canvas_rect(&mut self, canvas_rect: Rect, visible: Rect) {
        self.origin = canvas_rect.min;
        self.hit_rect = canvas_rect.intersect(visible);
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    fn to_device(&self, pos: Pos2) -> DevicePoint {
        DevicePoint::new(pos.x - self.origin.x, pos.y - self.origin.y)
    }

    /// Samples this frame's pointer input for the canvas widget behind `response`
    pub fn process_input(&mut self, ctx: &Context, response: &Response) -> Vec<CanvasEvent> {
        let on_canvas = response.contains_pointer() || response.is_pointer_button_down_on();
        let snapshot = ctx.input(|input| PointerSnapshot {
            pos: input.pointer.interact_pos(),
            pressed: input.pointer.primary_pressed(),
            down: input.pointer.primary_down(),
            released: input.pointer.primary_released(),
            on_canvas,
            cancel: input.key_pressed(Key::Escape),
        });
        self.translate(snapshot)
    }

    /// Converts one frame of pointer state into canvas events
    pub fn translate(&mut self, snapshot: PointerSnapshot) -> Vec<CanvasEvent> {
        let mut events = Vec::new();

        if self.drawing && snapshot.cancel {
            self.drawing = false;
            self.last_pos = None;
            events.push(CanvasEvent::PointerCancel);
            return events;
        }

        if snapshot.pressed && !self.drawing {
            // Presses on menus or popups drawn over the canvas belong to them
            let owned = snapshot.pos.filter(|pos| snapshot.on_canvas && self.hit_rect.contains(*pos));
            if let Some(pos) = owned {
                events.push(CanvasEvent::PointerDown(self.to_device(pos)));
                self.drawing = true;
                self.last_pos = Some(pos);
            }
        } else if self.drawing {
            if let Some(pos) = snapshot.pos {
                if Some(pos) != self.last_pos {
                    events.push(CanvasEvent::PointerMove(self.to_device(pos)));
                    self.last_pos = Some(pos);
                }
            }
        }

        // A release (or losing the button outside the window) ends the gesture
        if self.drawing && (snapshot.released || !snapshot.down) {
            if let Some(pos) = snapshot.pos.or(self.last_pos) {
                events.push(CanvasEvent::PointerUp(self.to_device(pos)));
            }
            self.drawing = false;
            self.last_pos = None;
        }

        events
    }

    /// Consumes undo/redo shortcuts so they do not reach other widgets
    pub fn shortcuts(ctx: &Context) -> Vec<ShortcutAction> {
        ctx.input_mut(|input| {
            let mut actions = Vec::new();
            if input.consume_shortcut(&UNDO_SHORTCUT) {
                actions.push(ShortcutAction::Undo);
            }
            if input.consume_shortcut(&REDO_SHORTCUT) {
                actions.push(ShortcutAction::Redo);
            }
            actions
        })
    }
}
