// crates/featuredict-core/src/tree/contained.rs
use super::TreeParams;
use crate::error::Result;
use std::collections::{BTreeMap, HashSet};

/// Index that makes finding which maps are completely contained by a given
/// map efficient.
///
/// Maps are sorted into a tree keyed by their most frequent keys first, then
/// by the values of that key. For the maps
///
/// ```text
/// #1 {amenity: bicycle_parking}
/// #2 {amenity: bicycle_parking, bicycle_parking: shed}
/// #3 {amenity: bicycle_parking, bicycle_parking: lockers}
/// #4 {amenity: taxi}
/// #5 {shop: supermarket}
/// ```
///
/// the tree looks roughly like
///
/// ```text
/// amenity ->
///   bicycle_parking ->
///     #1
///     bicycle_parking ->
///       shed -> #2
///       lockers -> #3
///   taxi -> #4
/// shop ->
///   supermarket -> #5
/// ```
///
/// The tree is immutable and therefore safe to share between threads.
#[derive(Debug, Clone)]
pub struct ContainmentTree<K, V> {
    maps: Vec<BTreeMap<K, V>>,
    root: Node<K, V>,
}

#[derive(Debug, Clone)]
enum Node<K, V> {
    Leaf(Vec<usize>),
    Branch {
        /// key -> (value -> node)
        children: BTreeMap<K, BTreeMap<V, Node<K, V>>>,
        /// maps that could not be sorted further at this level
        items: Vec<usize>,
    },
}

impl<K: Ord + Clone, V: Ord + Clone> ContainmentTree<K, V> {
    /// Build the index over `maps` with the given recursion bounds.
    pub fn new(maps: Vec<BTreeMap<K, V>>, params: TreeParams) -> Result<Self> {
        let params = params.validated()?;
        Ok(Self::build(maps, params))
    }

    /// Build the index with [`TreeParams::TAGS`].
    pub fn with_defaults(maps: Vec<BTreeMap<K, V>>) -> Self {
        Self::build(maps, TreeParams::TAGS)
    }

    fn build(maps: Vec<BTreeMap<K, V>>, params: TreeParams) -> Self {
        let items = (0..maps.len()).collect();
        let root = build_node(&maps, items, &mut Vec::new(), params);
        ContainmentTree { maps, root }
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// The indexed maps in input order.
    pub fn maps(&self) -> &[BTreeMap<K, V>] {
        &self.maps
    }

    /// All indexed maps whose entries are all contained in `query`.
    pub fn get_all(&self, query: &BTreeMap<K, V>) -> Vec<&BTreeMap<K, V>> {
        self.get_all_positions(query)
            .into_iter()
            .map(|i| &self.maps[i])
            .collect()
    }

    /// Like [`ContainmentTree::get_all`] but returns input positions.
    pub fn get_all_positions(&self, query: &BTreeMap<K, V>) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect(&self.root, query, &mut out);
        out
    }

    fn collect(&self, node: &Node<K, V>, query: &BTreeMap<K, V>, out: &mut Vec<usize>) {
        let items = match node {
            Node::Leaf(items) => items,
            Node::Branch { children, items } => {
                for (key, by_value) in children {
                    let child = query.get(key).and_then(|value| by_value.get(value));
                    if let Some(child) = child {
                        self.collect(child, query, out);
                    }
                }
                items
            }
        };
        out.extend(
            items
                .iter()
                .copied()
                .filter(|&i| is_contained(&self.maps[i], query)),
        );
    }
}

/// `true` if every entry of `map` is present with an equal value in `query`.
pub fn is_contained<K: Ord, V: PartialEq>(map: &BTreeMap<K, V>, query: &BTreeMap<K, V>) -> bool {
    map.iter().all(|(k, v)| query.get(k) == Some(v))
}

fn build_node<K: Ord + Clone, V: Ord + Clone>(
    maps: &[BTreeMap<K, V>],
    items: Vec<usize>,
    previous_keys: &mut Vec<K>,
    params: TreeParams,
) -> Node<K, V> {
    if params.is_leaf(previous_keys.len(), items.len()) {
        return Node::Leaf(items);
    }

    // group by every key not branched on yet, in order of first occurrence
    let mut by_key: Vec<(&K, Vec<usize>)> = Vec::new();
    let mut key_slots: BTreeMap<&K, usize> = BTreeMap::new();
    for &i in &items {
        for key in maps[i].keys().filter(|k| !previous_keys.contains(k)) {
            match key_slots.get(key) {
                Some(&slot) => by_key[slot].1.push(i),
                None => {
                    key_slots.insert(key, by_key.len());
                    by_key.push((key, vec![i]));
                }
            }
        }
    }
    // most frequent keys first; stable, so ties keep first-occurrence order
    by_key.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut sorted: HashSet<usize> = HashSet::with_capacity(items.len());
    let mut children = BTreeMap::new();

    for (key, bucket) in by_key {
        // a map already sorted into one branch is not sorted into another
        let bucket: Vec<usize> = bucket.into_iter().filter(|i| !sorted.contains(i)).collect();
        if bucket.is_empty() {
            continue;
        }

        let mut by_value: BTreeMap<&V, Vec<usize>> = BTreeMap::new();
        for &i in &bucket {
            if let Some(value) = maps[i].get(key) {
                by_value.entry(value).or_default().push(i);
            }
        }

        previous_keys.push(key.clone());
        let value_nodes = by_value
            .into_iter()
            .map(|(value, group)| (value.clone(), build_node(maps, group, previous_keys, params)))
            .collect();
        previous_keys.pop();

        children.insert(key.clone(), value_nodes);
        sorted.extend(bucket);
    }

    let rest: Vec<usize> = items.into_iter().filter(|i| !sorted.contains(i)).collect();
    if children.is_empty() {
        Node::Leaf(rest)
    } else {
        Node::Branch {
            children,
            items: rest,
        }
    }
}
