use fragments_store::StoreError;

/// Classify an S3 SDK error message into a [`StoreError`].
///
/// Callers that can inspect a typed service error (e.g. `NoSuchKey`) should
/// do so first; this is the fallback for everything else.
pub fn classify_sdk_error(key: &str, error_str: &str) -> StoreError {
    let lower = error_str.to_lowercase();
    if lower.contains("nosuchkey") || lower.contains("not found") {
        StoreError::NotFound(key.to_owned())
    } else {
        StoreError::Io(error_str.to_owned())
    }
}
