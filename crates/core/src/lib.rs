pub mod media_type;
pub mod record;
pub mod types;

pub use media_type::{MediaType, SUPPORTED_TYPES, is_supported_type};
pub use record::FragmentRecord;
pub use types::{FragmentId, OwnerId};
