use eframe::egui::{self, Color32, ColorImage, Context, Painter, Pos2, Rect, TextureHandle, TextureOptions, Vec2};
use image::RgbaImage;

use crate::canvas::Canvas;

const CANVAS_TEXTURE_NAME: &str = "canvas";

/// Keeps the canvas texture in sync with the raster and paints it at the zoom factor
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    /// Canvas revision the texture was last uploaded from
    uploaded_revision: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_revision", &self.uploaded_revision)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// On-screen size of the canvas: raster size scaled by the zoom factor
    pub fn display_size(canvas: &Canvas) -> Vec2 {
        let (width, height) = canvas.size().unwrap_or((0, 0));
        egui::vec2(width as f32, height as f32) * canvas.zoom()
    }

    /// Uploads the composed frame if the canvas changed since the last upload.
    /// Returns `true` when a new upload happened.
    pub fn update_texture(&mut self, ctx: &Context, canvas: &Canvas) -> bool {
        if self.uploaded_revision == Some(canvas.revision()) && self.texture.is_some() {
            return false;
        }
        let Some(frame) = canvas.compose() else {
            return false;
        };

        let image = to_color_image(&frame);
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture(CANVAS_TEXTURE_NAME, image, TextureOptions::NEAREST));
            }
        }
        self.uploaded_revision = Some(canvas.revision());
        true
    }

    /// Paints the canvas with its top-left corner at `origin`
    pub fn render(&mut self, ctx: &Context, painter: &Painter, origin: Pos2, canvas: &Canvas) {
        self.update_texture(ctx, canvas);
        if let Some(texture) = &self.texture {
            let rect = Rect::from_min_size(origin, Self::display_size(canvas));
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }
}

fn to_color_image(pixels: &RgbaImage) -> ColorImage {
    let size = [pixels.width() as usize, pixels.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, pixels.as_raw())
}
