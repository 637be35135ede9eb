#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod canvas;
pub mod codec;
pub mod error;
pub mod history;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod settings;
pub mod shape;

pub use app::PaintApp;
pub use brush::Brush;
pub use canvas::{Canvas, CanvasEvent, DevicePoint};
pub use codec::ImageFormat;
pub use error::{CanvasError, ImageIoError};
pub use history::History;
pub use raster::{Raster, RasterPoint};
pub use renderer::Renderer;
pub use settings::PaintSettings;
pub use shape::{BoundingBox, Shape, Tool};
