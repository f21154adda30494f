//! Navigate module
//!
//! Resolves and validates candidate working roots.

mod operations;

pub use operations::resolve_root;
