//! Amazon S3 backend for fragment data.
//!
//! Objects are written whole, one per fragment, under the key
//! `{prefix}{owner}/{id}`. Any S3-compatible endpoint (`MinIO`, `LocalStack`)
//! works through [`S3Config::endpoint_url`] and
//! [`S3Config::force_path_style`].

pub mod client;
pub mod config;
pub mod error;
pub mod store;

pub use config::S3Config;
pub use store::S3ByteStore;
