/// Base media types a fragment may be created with.
pub const SUPPORTED_TYPES: &[&str] = &[
    "text/plain",
    "text/markdown",
    "text/html",
    "text/csv",
    "application/json",
    "application/yaml",
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/gif",
    "image/avif",
];

/// A content-type string split into its base type and parameters.
///
/// `"Text/Plain; charset=UTF-8"` parses to base `text/plain` with the single
/// parameter `charset=UTF-8`. Parameter keys are lowercased, values keep their
/// case with surrounding quotes removed. Segments without `=` are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    base: String,
    params: Vec<(String, String)>,
}

impl MediaType {
    /// Parse a content-type string. Never fails; an empty or garbage string
    /// yields a base type that simply is not supported.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let mut parts = value.split(';');
        let base = parts.next().unwrap_or_default().trim().to_ascii_lowercase();

        let params = parts
            .filter_map(|segment| {
                let (key, val) = segment.split_once('=')?;
                let key = key.trim().to_ascii_lowercase();
                if key.is_empty() {
                    return None;
                }
                let val = val.trim().trim_matches('"').to_owned();
                Some((key, val))
            })
            .collect();

        Self { base, params }
    }

    /// The media type with all parameters stripped, e.g. `text/plain`.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Look up a parameter by (case-insensitive) name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `charset` parameter, if any.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.param("charset")
    }

    /// The top-level type, e.g. `image` for `image/png`.
    #[must_use]
    pub fn top_level(&self) -> &str {
        self.base.split('/').next().unwrap_or_default()
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.top_level() == "text"
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.top_level() == "image"
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        SUPPORTED_TYPES.contains(&self.base.as_str())
    }
}

/// Returns `true` if the base type of `value` is one a fragment may hold.
#[must_use]
pub fn is_supported_type(value: &str) -> bool {
    MediaType::parse(value).is_supported()
}
