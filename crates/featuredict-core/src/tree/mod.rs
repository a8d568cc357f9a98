// crates/featuredict-core/src/tree/mod.rs

//! # Tree Indexes
//!
//! Two immutable, bounded-depth trees:
//! - [`ContainmentTree`]: which stored maps are contained in a query map
//! - [`PrefixTree`]: which stored strings start with a query prefix
//!
//! Both are parameterised by [`TreeParams`]; recursion stops at `max_depth`
//! levels or once fewer than `min_bucket_size` items remain in a branch.

use crate::error::{DictionaryError, Result};
use serde::{Deserialize, Serialize};

pub mod contained;
pub mod prefix;

pub use contained::ContainmentTree;
pub use prefix::PrefixTree;

/// Recursion bounds of a tree index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_bucket_size: usize,
}

impl TreeParams {
    /// Defaults for [`ContainmentTree`]: depth 4, buckets of 4.
    pub const TAGS: TreeParams = TreeParams {
        max_depth: 4,
        min_bucket_size: 4,
    };

    /// Defaults for [`PrefixTree`]: depth 16, buckets of 16.
    pub const TERMS: TreeParams = TreeParams {
        max_depth: 16,
        min_bucket_size: 16,
    };

    pub fn new(max_depth: usize, min_bucket_size: usize) -> Result<Self> {
        TreeParams {
            max_depth,
            min_bucket_size,
        }
        .validated()
    }

    /// Reject zero depth or bucket size.
    pub fn validated(self) -> Result<Self> {
        if self.max_depth == 0 || self.min_bucket_size == 0 {
            return Err(DictionaryError::InvalidTreeParams {
                max_depth: self.max_depth,
                min_bucket_size: self.min_bucket_size,
            });
        }
        Ok(self)
    }

    /// Whether a node at `depth` holding `len` items stays a leaf.
    pub(crate) fn is_leaf(&self, depth: usize, len: usize) -> bool {
        depth >= self.max_depth || len < self.min_bucket_size
    }
}
