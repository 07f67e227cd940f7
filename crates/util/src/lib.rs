//! jsonc-edit-util - value utilities shared by the jsonc-edit crates.
//!
//! Everything here operates on plain [`serde_json::Value`] trees and knows
//! nothing about source text.

pub mod json_equal;
pub mod json_merge;
pub mod kind;
pub mod strings;

// Re-exports for convenience
pub use json_equal::deep_equal;
pub use json_merge::fill_defaults;
pub use kind::ValueKind;
pub use strings::{escape, quote};
