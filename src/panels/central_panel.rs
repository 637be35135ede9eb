use crate::PaintApp;
use crate::renderer::Renderer;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // The raster grows with the visible drawing area but never shrinks, so making the
        // window smaller does not crop the drawing. Zoom only scales the display.
        let available = ui.available_size();
        let (width, height) = (available.x.floor() as u32, available.y.floor() as u32);
        if width > 0 && height > 0 {
            // Loaded images are fitted to what is actually visible
            app.visible_size = Some((width, height));
        }
        let (width, height) = app
            .canvas
            .size()
            .map_or((width, height), |(w, h)| (w.max(width), h.max(height)));
        app.canvas.ensure_size(width, height);

        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let size = Renderer::display_size(&app.canvas);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());

                app.input.set_canvas_rect(response.rect, ui.clip_rect());
                for event in app.input.process_input(ctx, &response) {
                    app.canvas.handle_event(event);
                }

                app.renderer.render(ctx, &painter, response.rect.min, &app.canvas);
                response.on_hover_cursor(egui::CursorIcon::Crosshair);
            });
    });
}
