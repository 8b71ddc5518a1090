//! Dependency fragment parsing

pub mod fragment;

pub use fragment::{ParseError, parse_fragment};
