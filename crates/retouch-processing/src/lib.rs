//! Retouch Processing Library
//!
//! Upload intake, the raster model, pixel transforms, the ordered transform
//! pipeline and the response encoder.

pub mod color;
pub mod editor;
pub mod encoder;
pub mod error;
pub mod intake;
pub mod params;
pub mod pipeline;
pub mod raster;
pub mod transform;

pub use editor::{ImageEditor, PreviewImages};
pub use encoder::ResponseEncoder;
pub use error::ProcessingError;
pub use intake::{Upload, UploadValidator, ValidationError};
pub use params::TransformParams;
pub use pipeline::{TransformPipeline, TransformStage};
pub use raster::Raster;
pub use transform::RasterTransforms;
