use pulldown_cmark::{Options, Parser, html};
use serde_json::{Map, Value};

use crate::error::ConvertError;

fn utf8(data: &[u8]) -> Result<&str, ConvertError> {
    std::str::from_utf8(data)
        .map_err(|e| ConvertError::Conversion(format!("source is not valid UTF-8: {e}")))
}

/// Render Markdown to an HTML fragment.
pub(crate) fn markdown_to_html(data: &[u8]) -> Result<Vec<u8>, ConvertError> {
    let source = utf8(data)?;
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(source, options));
    Ok(out.into_bytes())
}

/// Turn CSV into a JSON array of objects keyed by the header row, keys in
/// header order.
///
/// Deliberately naive: fields are split on every `,`, quoting is not
/// understood, and values stay strings. Blank lines are skipped. Rows with
/// more fields than headers lose the extras; rows with fewer omit the
/// missing keys.
pub(crate) fn csv_to_json(data: &[u8]) -> Result<Vec<u8>, ConvertError> {
    let source = utf8(data)?;
    let mut lines = source.lines().filter(|line| !line.trim().is_empty());

    let headers: Vec<&str> = match lines.next() {
        Some(header) => header.split(',').collect(),
        None => return Err(ConvertError::Conversion("CSV source is empty".to_owned())),
    };

    let rows: Vec<Value> = lines
        .map(|line| {
            let object: Map<String, Value> = headers
                .iter()
                .zip(line.split(','))
                .map(|(header, value)| ((*header).to_owned(), Value::String(value.to_owned())))
                .collect();
            Value::Object(object)
        })
        .collect();

    if rows.is_empty() {
        return Err(ConvertError::Conversion(
            "CSV source needs a header row and at least one data row".to_owned(),
        ));
    }

    serde_json::to_vec(&Value::Array(rows)).map_err(|e| ConvertError::Conversion(e.to_string()))
}

/// Re-serialize a JSON document as YAML.
pub(crate) fn json_to_yaml(data: &[u8]) -> Result<Vec<u8>, ConvertError> {
    let value: Value = serde_json::from_slice(data)
        .map_err(|e| ConvertError::Conversion(format!("invalid JSON source: {e}")))?;
    serde_yaml_ng::to_string(&value)
        .map(String::into_bytes)
        .map_err(|e| ConvertError::Conversion(e.to_string()))
}
