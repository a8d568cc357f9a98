// crates/featuredict-core/src/index/terms.rs
use crate::error::Result;
use crate::model::Feature;
use crate::tree::{PrefixTree, TreeParams};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Index that finds features by a prefix of one of their searchable strings.
///
/// Which strings are searchable is decided by the `extract` function given at
/// construction, e.g. the words of the canonical names or the canonical terms.
#[derive(Debug)]
pub struct TermIndex {
    tree: PrefixTree,
    features_by_string: HashMap<String, Vec<Arc<Feature>>>,
}

impl TermIndex {
    pub fn new<F>(features: impl IntoIterator<Item = Arc<Feature>>, params: TreeParams, extract: F) -> Result<Self>
    where
        F: Fn(&Feature) -> Vec<String>,
    {
        let mut strings: Vec<String> = Vec::new();
        let mut features_by_string: HashMap<String, Vec<Arc<Feature>>> = HashMap::new();

        for feature in features {
            for string in extract(feature.as_ref()) {
                let list = features_by_string.entry(string).or_insert_with_key(|s| {
                    strings.push(s.clone());
                    Vec::new()
                });
                // one feature may yield the same string more than once
                if !list.last().is_some_and(|last| Arc::ptr_eq(last, &feature)) {
                    list.push(Arc::clone(&feature));
                }
            }
        }

        let tree = PrefixTree::new(strings, params)?;
        Ok(TermIndex {
            tree,
            features_by_string,
        })
    }

    /// Number of distinct searchable strings.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Features owning at least one string that starts with `prefix`, each
    /// returned once.
    pub fn get_all(&self, prefix: &str) -> Vec<Arc<Feature>> {
        let mut seen: HashSet<*const Feature> = HashSet::new();
        self.tree
            .get_all(prefix)
            .into_iter()
            .filter_map(|s| self.features_by_string.get(s))
            .flatten()
            .filter(|f| seen.insert(Arc::as_ptr(f)))
            .cloned()
            .collect()
    }
}
