//! String operations over NUL-terminated byte strings.
//!
//! Implements the `nc_str` family as safe Rust operating on slices.

pub mod count;
pub mod str;
pub mod substr;

// Re-export commonly used functions.
pub use count::count;
pub use str::{strlen, strncmp, strnstr};
pub use substr::substr;
