use std::path::Path;

use crate::canvas::Canvas;
use crate::codec::ImageFormat;
use crate::input::{InputHandler, ShortcutAction};
use crate::panels;
use crate::renderer::Renderer;
use crate::settings::PaintSettings;

/// Outcome of the last file operation, shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Application state handed to every panel by `&mut`
pub struct PaintApp {
    pub(crate) canvas: Canvas,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    pub(crate) status: Option<Status>,
    /// Drawing area size last laid out by the central panel
    pub(crate) visible_size: Option<(u32, u32)>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_settings(&PaintSettings::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous drawing settings (if any).
        let settings: PaintSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_settings(&settings)
    }

    pub fn with_settings(settings: &PaintSettings) -> Self {
        Self {
            canvas: Canvas::new(settings),
            renderer: Renderer::new(),
            input: InputHandler::default(),
            status: None,
            visible_size: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn undo(&mut self) {
        if !self.canvas.undo() {
            log::debug!("Nothing to undo");
        }
    }

    pub fn redo(&mut self) {
        if !self.canvas.redo() {
            log::debug!("Nothing to redo");
        }
    }

    pub fn new_image(&mut self) {
        self.canvas.new_image();
        self.status = Some(Status::Info("New drawing".to_owned()));
    }

    pub fn load_from(&mut self, path: &Path) {
        let loaded = match self.visible_size {
            Some(bounds) => self.canvas.load_image_within(path, bounds),
            None => self.canvas.load_image(path),
        };
        self.status = Some(match loaded {
            Ok(()) => Status::Info(format!("Loaded {}", path.display())),
            Err(err) => {
                log::error!("Error loading the drawing: {}", err);
                Status::Error(err.to_string())
            }
        });
    }

    pub fn save_to(&mut self, path: &Path, format: ImageFormat) {
        self.status = Some(match self.canvas.save_image(path, format) {
            Ok(written) => Status::Info(format!("Saved {}", written.display())),
            Err(err) => {
                log::error!("Error saving the drawing: {}", err);
                Status::Error(err.to_string())
            }
        });
    }

    /// Asks for a PNG/JPEG file and loads it into the canvas
    pub fn load_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("PNG, JPG, JPEG", &["png", "jpg", "jpeg"])
            .pick_file();
        if let Some(path) = picked {
            self.load_from(&path);
        }
    }

    /// Asks for a destination and saves the canvas in `format`
    pub fn save_dialog(&mut self, format: ImageFormat) {
        let picked = rfd::FileDialog::new()
            .add_filter(format.label(), format.extensions())
            .set_file_name(format!("drawing.{}", format.default_extension()))
            .save_file();
        if let Some(path) = picked {
            self.save_to(&path, format);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        for action in InputHandler::shortcuts(ctx) {
            match action {
                ShortcutAction::Undo => self.undo(),
                ShortcutAction::Redo => self.redo(),
            }
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.canvas.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        panels::menu_bar(self, ctx);
        panels::tools_panel(self, ctx);
        panels::status_bar(self, ctx);
        panels::central_panel(self, ctx);
    }
}
