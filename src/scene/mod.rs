//! Host-document boundary: node data model, host trait, in-memory reference
//! host, and the scoped visibility transaction.

/// Host trait and rasterization options.
pub mod host;
/// In-memory reference host.
pub mod memory;
/// Node data model (kinds, paints, effects, text).
pub mod node;
/// Scoped hide/restore visibility transaction.
pub mod visibility;
