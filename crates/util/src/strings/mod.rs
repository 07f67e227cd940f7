//! String utilities.
//!
//! JSON string escaping used when values are written back into source text.

mod escape;

pub use escape::{escape, quote};
