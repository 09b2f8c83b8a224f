//! Shared utilities.

mod fmt;
pub mod path;

pub use fmt::count_noun;
