//! Deep merge helpers for plain JSON values.

mod merge;

pub use merge::fill_defaults;
