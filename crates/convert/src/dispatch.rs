use bytes::Bytes;
use tracing::debug;

use fragments_core::MediaType;

use crate::error::ConvertError;
use crate::extension::{Target, normalize};
use crate::{raster, text};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "avif"];

/// Text conversions parse their input as UTF-8; a declared charset that
/// says otherwise is refused up front.
fn require_utf8(media: &MediaType) -> Result<(), ConvertError> {
    match media.charset() {
        Some(charset)
            if !["utf-8", "utf8", "us-ascii"]
                .iter()
                .any(|ok| charset.eq_ignore_ascii_case(ok)) =>
        {
            Err(ConvertError::Conversion(format!(
                "cannot convert {charset} text, only UTF-8 is supported"
            )))
        }
        _ => Ok(()),
    }
}

/// Output of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub data: Bytes,
    pub content_type: String,
}

/// Extensions a fragment of `source_type` may be requested as.
///
/// Empty when the type has no conversions at all.
#[must_use]
pub fn extensions_for(source_type: &str) -> &'static [&'static str] {
    let media = MediaType::parse(source_type);
    match media.base() {
        "text/plain" => &["txt"],
        "text/markdown" => &["md", "html", "txt"],
        "text/html" => &["html", "txt"],
        "text/csv" => &["csv", "txt", "json"],
        "application/json" => &["json", "yaml", "yml", "txt"],
        "application/yaml" => &["yaml", "yml", "txt"],
        _ if media.is_image() && media.is_supported() => IMAGE_EXTENSIONS,
        _ => &[],
    }
}

/// Content types a fragment of `source_type` can be served as, without
/// duplicates, in table order.
#[must_use]
pub fn formats_for(source_type: &str) -> Vec<&'static str> {
    let mut formats: Vec<&'static str> = Vec::new();
    for content_type in extensions_for(source_type)
        .iter()
        .filter_map(|ext| Target::from_extension(ext))
        .map(Target::content_type)
    {
        if !formats.contains(&content_type) {
            formats.push(content_type);
        }
    }
    formats
}

/// Convert `data`, declared as `source_type`, into the representation named
/// by `extension`.
///
/// Without an extension the data and declared type come back unchanged. When
/// the requested representation is the source's own base type, the declared
/// type string (parameters included) is kept.
pub fn convert(
    source_type: &str,
    data: Bytes,
    extension: Option<&str>,
) -> Result<Converted, ConvertError> {
    let Some(extension) = extension else {
        return Ok(Converted {
            data,
            content_type: source_type.to_owned(),
        });
    };

    let media = MediaType::parse(source_type);
    let ext = normalize(extension);

    let target = extensions_for(source_type)
        .contains(&ext.as_str())
        .then(|| Target::from_extension(&ext))
        .flatten()
        .ok_or_else(|| ConvertError::Unsupported {
            from: media.base().to_owned(),
            extension: ext.clone(),
        })?;

    debug!(from = %media.base(), extension = %ext, to = %target.content_type(), "converting fragment");

    if target.content_type() == media.base() {
        return Ok(Converted {
            data,
            content_type: source_type.to_owned(),
        });
    }

    let converted = match (media.base(), target) {
        ("text/markdown", Target::Html) => {
            require_utf8(&media)?;
            Bytes::from(text::markdown_to_html(&data)?)
        }
        ("text/csv", Target::Json) => {
            require_utf8(&media)?;
            Bytes::from(text::csv_to_json(&data)?)
        }
        ("application/json", Target::Yaml) => {
            require_utf8(&media)?;
            Bytes::from(text::json_to_yaml(&data)?)
        }
        (_, target) => match target.image_format() {
            Some(format) => Bytes::from(raster::transcode(&data, format)?),
            None => data,
        },
    };

    Ok(Converted {
        data: converted,
        content_type: target.content_type().to_owned(),
    })
}
