// crates/featuredict-core/src/index/tags.rs
use crate::error::Result;
use crate::model::{Feature, Tags};
use crate::tree::{ContainmentTree, TreeParams};
use std::collections::HashMap;
use std::sync::Arc;

/// Index that finds the features whose tags are all contained in a tag map.
///
/// Features sharing the exact same tags are stored in one group, so the
/// underlying tree only holds distinct tag maps. Features without tags
/// would match every query and are left out.
#[derive(Debug)]
pub struct TagIndex {
    tree: ContainmentTree<String, String>,
    groups: Vec<Vec<Arc<Feature>>>,
}

impl TagIndex {
    pub fn new(features: impl IntoIterator<Item = Arc<Feature>>, params: TreeParams) -> Result<Self> {
        let mut slots: HashMap<Tags, usize> = HashMap::new();
        let mut maps: Vec<Tags> = Vec::new();
        let mut groups: Vec<Vec<Arc<Feature>>> = Vec::new();

        for feature in features {
            if feature.tags().is_empty() {
                continue;
            }
            match slots.get(feature.tags()) {
                Some(&slot) => groups[slot].push(feature),
                None => {
                    slots.insert(feature.tags().clone(), maps.len());
                    maps.push(feature.tags().clone());
                    groups.push(vec![feature]);
                }
            }
        }

        let tree = ContainmentTree::new(maps, params)?;
        Ok(TagIndex { tree, groups })
    }

    /// Number of distinct tag maps.
    pub fn distinct_tag_maps(&self) -> usize {
        self.groups.len()
    }

    pub fn feature_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// All features whose tags are contained in `tags`.
    pub fn get_all(&self, tags: &Tags) -> Vec<Arc<Feature>> {
        self.tree
            .get_all_positions(tags)
            .into_iter()
            .flat_map(|slot| self.groups[slot].iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tags;

    fn feature(id: &str, pairs: &[(&str, &str)]) -> Arc<Feature> {
        Arc::new(Feature::builder(id, tags(pairs.iter().copied())).name(id).build())
    }

    fn ids(features: &[Arc<Feature>]) -> Vec<&str> {
        let mut ids: Vec<&str> = features.iter().map(|f| f.id()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn copes_with_empty_collection() {
        let index = TagIndex::new(Vec::new(), TreeParams::TAGS).unwrap();
        assert!(index.get_all(&tags([("a", "b")])).is_empty());
    }

    #[test]
    fn get_two_features_with_same_tags() {
        let f1 = feature("a", &[("a", "b")]);
        let f2 = feature("c", &[("a", "b")]);
        let index = TagIndex::new(vec![f1, f2], TreeParams::TAGS).unwrap();
        assert_eq!(index.distinct_tag_maps(), 1);
        assert_eq!(ids(&index.get_all(&tags([("a", "b"), ("c", "d")]))), vec!["a", "c"]);
    }

    #[test]
    fn get_two_features_with_different_tags() {
        let f1 = feature("a", &[("a", "b")]);
        let f2 = feature("c", &[("c", "d")]);
        let index = TagIndex::new(vec![f1, f2], TreeParams::TAGS).unwrap();
        assert_eq!(ids(&index.get_all(&tags([("a", "b"), ("c", "d")]))), vec!["a", "c"]);
        assert_eq!(ids(&index.get_all(&tags([("c", "d")]))), vec!["c"]);
    }

    #[test]
    fn features_without_tags_are_not_indexed() {
        let index = TagIndex::new(vec![feature("empty", &[])], TreeParams::TAGS).unwrap();
        assert_eq!(index.feature_count(), 0);
        assert!(index.get_all(&tags([("a", "b")])).is_empty());
    }
}
