// crates/featuredict-core/src/tree/prefix.rs
use super::TreeParams;
use crate::error::Result;
use std::collections::{BTreeMap, HashSet};

/// Index that makes finding strings that start with a given prefix efficient.
///
/// Strings are sorted into a tree by their n-th character, up to
/// `max_depth` levels. Strings shorter than the current depth stay at the
/// node where they run out of characters.
#[derive(Debug, Clone)]
pub struct PrefixTree {
    strings: Vec<String>,
    root: Node,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf(Vec<usize>),
    Branch {
        children: BTreeMap<char, Node>,
        /// strings that end at this depth
        items: Vec<usize>,
    },
}

impl PrefixTree {
    /// Build the index. Duplicate strings are stored once.
    pub fn new<S: Into<String>>(strings: impl IntoIterator<Item = S>, params: TreeParams) -> Result<Self> {
        let params = params.validated()?;
        Ok(Self::build(strings, params))
    }

    /// Build the index with [`TreeParams::TERMS`].
    pub fn with_defaults<S: Into<String>>(strings: impl IntoIterator<Item = S>) -> Self {
        Self::build(strings, TreeParams::TERMS)
    }

    fn build<S: Into<String>>(strings: impl IntoIterator<Item = S>, params: TreeParams) -> Self {
        let mut seen = HashSet::new();
        let strings: Vec<String> = strings
            .into_iter()
            .map(Into::into)
            .filter(|s| seen.insert(s.clone()))
            .collect();
        let chars: Vec<Vec<char>> = strings.iter().map(|s| s.chars().collect()).collect();
        let root = build_node(&chars, (0..strings.len()).collect(), 0, params);
        PrefixTree { strings, root }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// All stored strings that start with `prefix`.
    ///
    /// An empty prefix matches nothing.
    pub fn get_all(&self, prefix: &str) -> Vec<&str> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let prefix_chars: Vec<char> = prefix.chars().collect();
        let mut out = Vec::new();
        self.collect(&self.root, prefix, &prefix_chars, 0, &mut out);
        out
    }

    fn collect<'a>(&'a self, node: &Node, prefix: &str, prefix_chars: &[char], depth: usize, out: &mut Vec<&'a str>) {
        let items = match node {
            Node::Leaf(items) => items,
            Node::Branch { children, items } => {
                match prefix_chars.get(depth) {
                    Some(c) => {
                        if let Some(child) = children.get(c) {
                            self.collect(child, prefix, prefix_chars, depth + 1, out);
                        }
                    }
                    // the prefix is exhausted, everything below matches
                    None => {
                        for child in children.values() {
                            self.collect(child, prefix, prefix_chars, depth + 1, out);
                        }
                    }
                }
                items
            }
        };
        out.extend(
            items
                .iter()
                .map(|&i| self.strings[i].as_str())
                .filter(|s| s.starts_with(prefix)),
        );
    }
}

fn build_node(chars: &[Vec<char>], items: Vec<usize>, depth: usize, params: TreeParams) -> Node {
    if params.is_leaf(depth, items.len()) {
        return Node::Leaf(items);
    }

    let mut by_char: BTreeMap<char, Vec<usize>> = BTreeMap::new();
    let mut rest = Vec::new();
    for i in items {
        match chars[i].get(depth) {
            Some(&c) => by_char.entry(c).or_default().push(i),
            None => rest.push(i),
        }
    }

    let children: BTreeMap<char, Node> = by_char
        .into_iter()
        .map(|(c, group)| (c, build_node(chars, group, depth + 1, params)))
        .collect();

    if children.is_empty() {
        Node::Leaf(rest)
    } else {
        Node::Branch {
            children,
            items: rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tree(strings: &[&str]) -> PrefixTree {
        PrefixTree::new(strings.iter().copied(), TreeParams::new(16, 1).unwrap()).unwrap()
    }

    fn sorted(mut v: Vec<&str>) -> Vec<&str> {
        v.sort_unstable();
        v
    }

    #[test]
    fn copes_with_empty_collection() {
        assert!(tree(&[]).get_all("any").is_empty());
    }

    #[test]
    fn find_single_string() {
        assert_eq!(tree(&["anything"]).get_all("a"), vec!["anything"]);
    }

    #[test]
    fn find_several_strings() {
        let t = tree(&["anything", "more", "yes", "nothing", "another"]);
        assert_eq!(sorted(t.get_all("a")), vec!["another", "anything"]);
        assert_eq!(t.get_all("anot"), vec!["another"]);
        assert_eq!(t.get_all("anything"), vec!["anything"]);
        assert!(t.get_all("anythingg").is_empty());
    }

    #[test]
    fn empty_prefix_matches_nothing() {
        assert!(tree(&["a", "b"]).get_all("").is_empty());
    }

    #[test]
    fn short_strings_stay_at_their_node() {
        let t = tree(&["a", "ab", "abc", "b"]);
        assert_eq!(sorted(t.get_all("a")), vec!["a", "ab", "abc"]);
        assert_eq!(sorted(t.get_all("ab")), vec!["ab", "abc"]);
    }

    #[test]
    fn duplicates_stored_once() {
        let t = tree(&["bank", "bank"]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get_all("ba"), vec!["bank"]);
    }

    #[test]
    fn multi_byte_characters() {
        let t = tree(&["bänk", "bank"]);
        assert_eq!(t.get_all("bä"), vec!["bänk"]);
    }

    proptest! {
        #[test]
        fn matches_brute_force(
            strings in prop::collection::vec("[abcä]{0,6}", 0..50),
            prefix in "[abcä]{0,4}",
            max_depth in 1usize..8,
            min_bucket_size in 1usize..8,
        ) {
            let t = PrefixTree::new(strings.clone(), TreeParams::new(max_depth, min_bucket_size).unwrap()).unwrap();
            let mut found: Vec<String> = t.get_all(&prefix).into_iter().map(str::to_owned).collect();
            found.sort();
            let mut expected: Vec<String> = if prefix.is_empty() {
                Vec::new()
            } else {
                strings.iter().filter(|s| s.starts_with(&prefix)).cloned().collect()
            };
            expected.sort();
            expected.dedup();
            prop_assert_eq!(found, expected);
        }
    }
}
