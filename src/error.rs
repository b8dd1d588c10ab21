//! Error handling for map codec operations
//!
//! This module re-exports the error types used throughout the crate.
//! The variants themselves live in [`crate::common`].

pub use crate::common::MapError;
pub use crate::common::Result;
pub use crate::common::Stage;
