use image::{Rgba, RgbaImage, imageops};
use serde::{Deserialize, Serialize};
use tiny_skia::{ColorU8, FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

/// A pixel position in raster space (device position divided by zoom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RasterPoint {
    pub x: i32,
    pub y: i32,
}

impl RasterPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Centre of the pixel in path space
    fn center(self) -> (f32, f32) {
        (self.x as f32 + 0.5, self.y as f32 + 0.5)
    }
}

impl From<(i32, i32)> for RasterPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[derive(Debug, Clone, Copy)]
enum PathStyle {
    Fill,
    /// Round-capped, round-joined outline of the given width
    Stroke(f32),
}

/// The in-memory pixel buffer holding the canvas contents.
///
/// Drawing primitives are anti-aliased and rasterized with `tiny-skia`. Each one
/// composites source-over exactly once per pixel and clips silently at the raster edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: RgbaImage,
    background: Rgba<u8>,
}

impl Raster {
    /// Creates a raster of the given size filled with `background`
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, background),
            background,
        }
    }

    /// Wraps existing pixels; `background` is used for padding on later resizes
    pub fn from_image(pixels: RgbaImage, background: Rgba<u8>) -> Self {
        Self { pixels, background }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the raster
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if x < 0 || y < 0 {
            return None;
        }
        self.pixels.get_pixel_checked(x as u32, y as u32).copied()
    }

    /// Full copy of the current pixels, suitable for a history entry
    pub fn snapshot(&self) -> RgbaImage {
        self.pixels.clone()
    }

    /// Overwrites every pixel with `color`
    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
    }

    /// Changes the raster size. Existing content stays anchored at the origin, new area
    /// is padded with the background and anything outside the new bounds is cropped.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.size() == (width, height) {
            return;
        }
        let mut resized = RgbaImage::from_pixel(width, height, self.background);
        imageops::replace(&mut resized, &self.pixels, 0, 0);
        self.pixels = resized;
    }

    /// Copies `snapshot` into the raster. A snapshot of a different size is placed at the
    /// origin over a background fill, keeping the current raster size.
    pub fn restore(&mut self, snapshot: &RgbaImage) {
        if snapshot.dimensions() == self.size() {
            self.pixels.clone_from(snapshot);
            return;
        }
        self.fill(self.background);
        imageops::replace(&mut self.pixels, snapshot, 0, 0);
    }

    /// Filled round dab of the given diameter centred on `center`
    pub fn fill_disc(&mut self, center: RasterPoint, diameter: u32, color: Rgba<u8>) {
        let (cx, cy) = center.center();
        if let Some(path) = PathBuilder::from_circle(cx, cy, diameter.max(1) as f32 / 2.0) {
            self.paint_path(&path, PathStyle::Fill, color);
        }
    }

    /// Thick segment with round ends
    pub fn draw_segment(&mut self, from: RasterPoint, to: RasterPoint, width: u32, color: Rgba<u8>) {
        self.draw_polyline(&[from, to], false, width, color);
    }

    /// Outline through `points`; `closed` joins the last point back to the first
    pub fn draw_polyline(&mut self, points: &[RasterPoint], closed: bool, width: u32, color: Rgba<u8>) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.iter().all(|point| point == first) {
            // A zero-length outline still leaves a round dab
            self.fill_disc(*first, width, color);
            return;
        }

        let mut pb = PathBuilder::new();
        let (x, y) = first.center();
        pb.move_to(x, y);
        for point in rest {
            let (x, y) = point.center();
            pb.line_to(x, y);
        }
        if closed && points.len() > 2 {
            pb.close();
        }
        if let Some(path) = pb.finish() {
            self.paint_path(&path, PathStyle::Stroke(width.max(1) as f32), color);
        }
    }

    /// Rectangle outline with top-left `(x, y)` spanning `w` by `h` pixels
    pub fn draw_rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32, width: u32, color: Rgba<u8>) {
        let (right, bottom) = (x.saturating_add(w), y.saturating_add(h));
        let corners = [
            RasterPoint::new(x, y),
            RasterPoint::new(right, y),
            RasterPoint::new(right, bottom),
            RasterPoint::new(x, bottom),
        ];
        self.draw_polyline(&corners, true, width, color);
    }

    /// Ellipse outline inscribed in the box with top-left `(x, y)` spanning `w` by `h`
    pub fn draw_ellipse_outline(&mut self, x: i32, y: i32, w: i32, h: i32, width: u32, color: Rgba<u8>) {
        let top_left = RasterPoint::new(x, y);
        if w <= 0 || h <= 0 {
            // A flat box degenerates to a line along it
            let bottom_right = RasterPoint::new(x.saturating_add(w.max(0)), y.saturating_add(h.max(0)));
            self.draw_segment(top_left, bottom_right, width, color);
            return;
        }
        let (left, top) = top_left.center();
        let oval = Rect::from_xywh(left, top, w as f32, h as f32).and_then(PathBuilder::from_oval);
        if let Some(path) = oval {
            self.paint_path(&path, PathStyle::Stroke(width.max(1) as f32), color);
        }
    }

    /// Renders `path` over the pixels it can touch.
    ///
    /// Only the clipped bounding region is copied into a premultiplied `Pixmap`; pixels
    /// the path left untouched are not written back, so their exact values survive.
    fn paint_path(&mut self, path: &Path, style: PathStyle, color: Rgba<u8>) {
        if color[3] == 0 {
            return;
        }
        let pad = match style {
            PathStyle::Fill => 1.0,
            PathStyle::Stroke(width) => width / 2.0 + 1.0,
        };
        // Clip in float space; far-away coordinates never reach integer arithmetic
        let bounds = path.bounds();
        let left = (bounds.left() - pad).floor().max(0.0);
        let top = (bounds.top() - pad).floor().max(0.0);
        let right = (bounds.right() + pad).ceil().min(self.width() as f32);
        let bottom = (bounds.bottom() + pad).ceil().min(self.height() as f32);
        if !(left < right && top < bottom) {
            return;
        }

        let (x0, y0) = (left as u32, top as u32);
        let (region_w, region_h) = ((right - left) as u32, (bottom - top) as u32);
        let Some(mut pixmap) = Pixmap::new(region_w, region_h) else {
            return;
        };
        for (i, dst) in pixmap.pixels_mut().iter_mut().enumerate() {
            let (x, y) = region_xy(i, region_w);
            let [r, g, b, a] = self.pixels.get_pixel(x0 + x, y0 + y).0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        let before = pixmap.clone();

        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
        paint.anti_alias = true;
        let transform = Transform::from_translate(-left, -top);
        match style {
            PathStyle::Fill => {
                pixmap.fill_path(path, &paint, FillRule::Winding, transform, None);
            }
            PathStyle::Stroke(width) => {
                let stroke = Stroke {
                    width,
                    line_cap: LineCap::Round,
                    line_join: LineJoin::Round,
                    ..Default::default()
                };
                pixmap.stroke_path(path, &paint, &stroke, transform, None);
            }
        }

        for (i, (after, before)) in pixmap.pixels().iter().zip(before.pixels()).enumerate() {
            if after == before {
                continue;
            }
            let (x, y) = region_xy(i, region_w);
            let color = after.demultiply();
            self.pixels.put_pixel(
                x0 + x,
                y0 + y,
                Rgba([color.red(), color.green(), color.blue(), color.alpha()]),
            );
        }
    }
}

fn region_xy(index: usize, region_width: u32) -> (u32, u32) {
    let index = index as u32;
    (index % region_width, index / region_width)
}
