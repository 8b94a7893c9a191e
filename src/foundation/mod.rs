//! Shared value types, error taxonomy, and cancellation primitives.

/// Cooperative cancellation token.
pub mod cancel;
/// Geometry and color value types.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
