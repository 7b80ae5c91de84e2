//! Pixel operations — decode, resample, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (DNG/TIFF/JPEG) | `image` crate decoders |
//! | **Budget math** | pure functions (unit testable) |
//! | **Resize** | Lanczos3 resampling |
//! | **Encode → JPEG** | quality 1-100, full-resolution chroma, optional EXIF |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math
//! - **Parameters**: Data structures describing operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, PixelBuffer};
pub use calculations::calculate_budget_dimensions;
pub use params::{EncodeParams, Quality};
pub use rust_backend::RustBackend;
