use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, ImageReader, RgbImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use crate::error::{ImageIoError, ImageIoResult};

/// Background JPEG output is flattened onto when none is given
pub const OPAQUE_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// File formats the canvas can be saved as
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

    /// Accepted file extensions, lowercase; the first one is appended when missing
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ImageFormat::Png => &["png"],
            ImageFormat::Jpeg => &["jpg", "jpeg"],
        }
    }

    pub fn default_extension(&self) -> &'static str {
        self.extensions()[0]
    }

    /// Human readable filter name for file dialogs
    pub fn label(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG (*.png)",
            ImageFormat::Jpeg => "JPEG (*.jpg, *.jpeg)",
        }
    }

    pub fn supports_alpha(&self) -> bool {
        matches!(self, ImageFormat::Png)
    }

    /// Infers the format from a file extension, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().iter().any(|candidate| *candidate == ext))
    }

    fn encoder_format(&self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Appends the format's default extension unless the file name already ends with
/// one of its extensions
pub fn normalize_path(path: &Path, format: ImageFormat) -> PathBuf {
    if ImageFormat::from_path(path) == Some(format) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(format.default_extension());
    PathBuf::from(name)
}

/// Composites every pixel over an opaque background and drops the alpha channel
pub fn flatten(pixels: &RgbaImage, background: Rgba<u8>) -> RgbImage {
    let background = Rgba([background[0], background[1], background[2], 255]);
    let mut flat = RgbaImage::from_pixel(pixels.width(), pixels.height(), background);
    imageops::overlay(&mut flat, pixels, 0, 0);
    DynamicImage::ImageRgba8(flat).to_rgb8()
}

/// Saves `pixels` to `path` in `format`, flattening onto white for formats without
/// alpha. Returns the path actually written.
pub fn save_image(pixels: &RgbaImage, path: &Path, format: ImageFormat) -> ImageIoResult<PathBuf> {
    save_image_on(pixels, path, format, OPAQUE_BACKGROUND)
}

/// Like [`save_image`], flattening onto `background` when the format lacks alpha
pub fn save_image_on(
    pixels: &RgbaImage,
    path: &Path,
    format: ImageFormat,
    background: Rgba<u8>,
) -> ImageIoResult<PathBuf> {
    let path = normalize_path(path, format);
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(ImageIoError::EmptyImage { path });
    }

    let result = if format.supports_alpha() {
        pixels.save_with_format(&path, format.encoder_format())
    } else {
        flatten(pixels, background).save_with_format(&path, format.encoder_format())
    };

    match result {
        Ok(()) => {
            log::info!("Drawing saved to {}", path.display());
            Ok(path)
        }
        Err(ImageError::IoError(source)) => Err(ImageIoError::Io { path, source }),
        Err(source) => Err(ImageIoError::Encode { path, source }),
    }
}

/// Decodes a PNG or JPEG file into RGBA pixels
pub fn load_image(path: &Path) -> ImageIoResult<RgbaImage> {
    let io_error = |source| ImageIoError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)?;

    match reader.format() {
        Some(image::ImageFormat::Png) | Some(image::ImageFormat::Jpeg) => {}
        Some(other) => return Err(ImageIoError::UnsupportedFormat(format!("{other:?}"))),
        None => {
            return Err(ImageIoError::UnsupportedFormat(path.display().to_string()));
        }
    }

    let decoded = reader.decode().map_err(|source| match source {
        ImageError::IoError(source) => io_error(source),
        source => ImageIoError::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(ImageIoError::EmptyImage {
            path: path.to_path_buf(),
        });
    }
    log::debug!("Decoded {}: {}x{}", path.display(), decoded.width(), decoded.height());
    Ok(decoded.to_rgba8())
}

/// Largest size with the aspect ratio of `size` that fits inside `bounds`.
/// Smaller images are scaled up; each side is at least one pixel.
pub fn fit_within(size: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (width, height) = size;
    let (max_width, max_height) = bounds;
    if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
        return (width.min(max_width), height.min(max_height));
    }

    let scale_x = max_width as f64 / width as f64;
    let scale_y = max_height as f64 / height as f64;
    let scale = scale_x.min(scale_y);

    let fitted_width = ((width as f64 * scale).floor() as u32).clamp(1, max_width);
    let fitted_height = ((height as f64 * scale).floor() as u32).clamp(1, max_height);
    (fitted_width, fitted_height)
}

/// Resamples `image` with bilinear filtering to the size [`fit_within`] picks
pub fn fit_image(image: &RgbaImage, bounds: (u32, u32)) -> RgbaImage {
    let (width, height) = fit_within(image.dimensions(), bounds);
    if (width, height) == image.dimensions() {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}
