//! Core domain types, errors, and constants for the `lapse` cache.
//!
//! This crate establishes the foundational building blocks shared across
//! the workspace:
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`constants`**: Shared defaults such as the idle threshold after which
//!   an entry becomes demotable and the background sweep cadence.

pub mod constants;
pub mod errors;

pub use self::{
    constants::*,
    errors::{Error, Result},
};
