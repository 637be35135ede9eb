use egui::Color32;
use egui::color_picker::{self, Alpha};
use image::Rgba;

use crate::PaintApp;
use crate::brush::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::settings::{MAX_ZOOM, MIN_ZOOM};
use crate::shape::Tool;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            // Undo/Redo section
            let can_undo = app.canvas().can_undo();
            let can_redo = app.canvas().can_redo();
            if ui
                .add_enabled(can_undo, egui::Button::new("Undo"))
                .on_hover_text("Ctrl+Z")
                .clicked()
            {
                app.undo();
            }
            if ui
                .add_enabled(can_redo, egui::Button::new("Redo"))
                .on_hover_text("Ctrl+Y")
                .clicked()
            {
                app.redo();
            }
            ui.separator();

            let canvas = app.canvas_mut();

            let mut zoom_percent = (canvas.zoom() * 100.0).round() as u32;
            let zoom_range = (MIN_ZOOM * 100.0) as u32..=(MAX_ZOOM * 100.0) as u32;
            if ui
                .add(egui::Slider::new(&mut zoom_percent, zoom_range).text("Zoom").suffix("%"))
                .changed()
            {
                canvas.set_zoom(zoom_percent as f32 / 100.0);
            }

            let mut brush_size = canvas.brush_size();
            if ui
                .add(egui::Slider::new(&mut brush_size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).text("Brush Size"))
                .changed()
            {
                canvas.set_brush_size(brush_size);
            }
            ui.separator();

            let [r, g, b, a] = canvas.color().0;
            let mut color = Color32::from_rgba_unmultiplied(r, g, b, a);
            ui.label("Color:");
            if color_picker::color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                canvas.set_color(Rgba(color.to_srgba_unmultiplied()));
            }
            ui.separator();

            let mut tool = canvas.tool();
            for candidate in Tool::ALL {
                ui.selectable_value(&mut tool, candidate, candidate.name());
            }
            if tool != canvas.tool() {
                log::info!("Tool selected from UI: {}", tool.name());
                canvas.set_tool(tool);
            }
        });
    });
}
