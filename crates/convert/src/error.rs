use thiserror::Error;

/// Errors returned by [`convert`](crate::convert).
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No conversion path exists from the source type to the extension.
    #[error("cannot convert {from} to .{extension}")]
    Unsupported {
        /// Base media type of the source.
        from: String,
        /// Requested extension, normalized.
        extension: String,
    },

    /// The conversion is legal but the input was malformed or rejected by
    /// the codec.
    #[error("conversion failed: {0}")]
    Conversion(String),
}
