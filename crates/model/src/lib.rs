pub mod error;
pub mod fragment;
pub mod fragments;

pub use error::FragmentError;
pub use fragment::Fragment;
pub use fragments::{FragmentList, Fragments};
