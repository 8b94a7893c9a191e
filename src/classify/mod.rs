//! Safety classification: native-primitive vs rasterize decisions.

/// Classifier predicates and threshold constants.
pub mod safety;
