mod data;
mod metadata;

pub use data::MemoryByteStore;
pub use metadata::MemoryMetadataStore;
