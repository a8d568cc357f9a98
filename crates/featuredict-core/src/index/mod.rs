// crates/featuredict-core/src/index/mod.rs

//! # Feature Indexes
//!
//! Feature-level wrappers over the [`crate::tree`] structures:
//! - [`TagIndex`]: features whose tags are contained in a query tag map
//! - [`TermIndex`]: features owning a searchable string starting with a prefix

pub mod tags;
pub mod terms;

pub use tags::TagIndex;
pub use terms::TermIndex;
