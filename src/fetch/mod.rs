//! Artifact download and packaging

pub mod error;
pub mod packager;

pub use error::FetchError;
pub use packager::{package_crates, package_crates_in};
