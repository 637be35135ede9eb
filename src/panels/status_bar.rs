use crate::PaintApp;
use crate::app::Status;

pub fn status_bar(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let canvas = app.canvas();
            if let Some((width, height)) = canvas.size() {
                ui.label(format!("{width}×{height}"));
            }
            ui.label(format!("{:.0}%", canvas.zoom() * 100.0));
            ui.label(format!(
                "Changes: {} made, {} reverted",
                canvas.changes_made(),
                canvas.changes_reverted()
            ));

            match app.status() {
                Some(Status::Info(text)) => {
                    ui.separator();
                    ui.label(text);
                }
                Some(Status::Error(text)) => {
                    ui.separator();
                    ui.colored_label(ui.visuals().error_fg_color, text);
                }
                None => {}
            }
        });
    });
}
