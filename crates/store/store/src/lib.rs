pub mod data;
pub mod error;
pub mod key;
pub mod metadata;
pub mod testing;

pub use data::ByteStore;
pub use error::StoreError;
pub use key::StoreKey;
pub use metadata::MetadataStore;
