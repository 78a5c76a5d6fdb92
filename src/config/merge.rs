//! Merge layer: the order in which sources are stacked.

pub mod merge_policy;

pub use merge_policy::builder_with_defaults;
