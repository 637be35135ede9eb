use crate::PaintApp;
use crate::codec::ImageFormat;

pub fn menu_bar(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    app.new_image();
                    ui.close_menu();
                }
                if ui.button("Load…").clicked() {
                    ui.close_menu();
                    app.load_dialog();
                }
                ui.separator();
                for format in ImageFormat::ALL {
                    if ui.button(format!("Save As {}…", format.label())).clicked() {
                        ui.close_menu();
                        app.save_dialog(format);
                    }
                }
            });
        });
    });
}
