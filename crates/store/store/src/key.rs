use crate::error::StoreError;

/// Key addressing one fragment's records: `(owner, id)`.
///
/// Both parts are validated on construction, so every `StoreKey` in
/// circulation is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    owner: String,
    id: String,
}

impl StoreKey {
    /// Build a key, rejecting empty or whitespace-only parts.
    pub fn new(owner: impl Into<String>, id: impl Into<String>) -> Result<Self, StoreError> {
        let owner = owner.into();
        let id = id.into();
        validate_part("owner", &owner)?;
        validate_part("id", &id)?;
        Ok(Self { owner, id })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Return a canonical string representation: `owner/id`
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}/{}", self.owner, self.id)
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Check a single key part. Shared by stores that take a bare owner.
pub fn validate_part(name: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidKey(format!("{name} must be a non-empty string")));
    }
    Ok(())
}
