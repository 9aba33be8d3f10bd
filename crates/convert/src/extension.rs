use image::ImageFormat;

/// A representation a fragment can be converted into, named by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Text,
    Markdown,
    Html,
    Csv,
    Json,
    Yaml,
    Png,
    Jpeg,
    WebP,
    Gif,
    Avif,
}

impl Target {
    /// Resolve a normalized extension (`jpg` and `yml` are aliases).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let target = match ext {
            "txt" => Self::Text,
            "md" => Self::Markdown,
            "html" => Self::Html,
            "csv" => Self::Csv,
            "json" => Self::Json,
            "yaml" | "yml" => Self::Yaml,
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "webp" => Self::WebP,
            "gif" => Self::Gif,
            "avif" => Self::Avif,
            _ => return None,
        };
        Some(target)
    }

    /// Content type of the converted output.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Markdown => "text/markdown",
            Self::Html => "text/html",
            Self::Csv => "text/csv",
            Self::Json => "application/json",
            Self::Yaml => "application/yaml",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
            Self::Avif => "image/avif",
        }
    }

    /// Codec for image targets; `None` for text targets.
    #[must_use]
    pub fn image_format(self) -> Option<ImageFormat> {
        match self {
            Self::Png => Some(ImageFormat::Png),
            Self::Jpeg => Some(ImageFormat::Jpeg),
            Self::WebP => Some(ImageFormat::WebP),
            Self::Gif => Some(ImageFormat::Gif),
            Self::Avif => Some(ImageFormat::Avif),
            _ => None,
        }
    }
}

/// Normalize a requested extension: trim, drop one leading dot, lowercase.
#[must_use]
pub fn normalize(ext: &str) -> String {
    let ext = ext.trim();
    ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase()
}
