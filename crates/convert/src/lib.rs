//! Conversion of stored fragment data into related representations.
//!
//! A conversion is selected by the fragment's declared media type and a
//! requested file extension. The legal pairs form a fixed table (see
//! [`extensions_for`]); anything outside it is [`ConvertError::Unsupported`],
//! while malformed input for a legal pair is [`ConvertError::Conversion`].

mod dispatch;
pub mod error;
pub mod extension;
mod raster;
mod text;

pub use dispatch::{Converted, convert, extensions_for, formats_for};
pub use error::ConvertError;
pub use extension::Target;
