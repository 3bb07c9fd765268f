//! Character trie for case-insensitive name prefix search
//!
//! Keys are lower-cased at the boundary; one node per `char`.
//! A node is terminal when it carries at least one contact id, independent of
//! whether it has children.

use std::collections::{BTreeSet, HashMap};

use crate::contact::ContactId;

/// Prefix index over a text key.
///
/// Implementations must treat keys case-insensitively and ignore blank keys.
pub trait SearchIndex {
    /// Attach `id` under `key`. Idempotent.
    fn insert(&mut self, key: &str, id: ContactId);

    /// Detach `id` from `key`. Unknown keys and ids are ignored.
    fn remove(&mut self, key: &str, id: ContactId);

    /// All ids attached to any key starting with `prefix`
    fn search_prefix(&self, prefix: &str) -> BTreeSet<ContactId>;

    /// Drop every key
    fn clear(&mut self);
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    ids: BTreeSet<ContactId>,
}

impl TrieNode {
    fn is_terminal(&self) -> bool {
        !self.ids.is_empty()
    }

    fn is_prunable(&self) -> bool {
        self.ids.is_empty() && self.children.is_empty()
    }
}

// Long keys make deep chains; free them without recursing per level
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<TrieNode> = self.children.drain().map(|(_, node)| node).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

/// Trie keyed by lower-cased characters of a contact name
#[derive(Debug, Default)]
pub struct NameTrie {
    root: TrieNode,
}

impl NameTrie {
    /// Creates an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no key is stored
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Number of nodes below the root
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&TrieNode> = vec![&self.root];
        while let Some(node) = stack.pop() {
            count += node.children.len();
            stack.extend(node.children.values());
        }
        count
    }

    fn normalize(key: &str) -> Option<Vec<char>> {
        if key.trim().is_empty() {
            return None;
        }
        Some(key.to_lowercase().chars().collect())
    }

    fn find(&self, path: &[char]) -> Option<&TrieNode> {
        let mut current = &self.root;
        for c in path {
            current = current.children.get(c)?;
        }
        Some(current)
    }

    fn find_mut(&mut self, path: &[char]) -> Option<&mut TrieNode> {
        let mut current = &mut self.root;
        for c in path {
            current = current.children.get_mut(c)?;
        }
        Some(current)
    }

    /// Removes `id` at the end of `path`, then prunes the emptied branch.
    ///
    /// The root is never pruned.
    fn remove_path(&mut self, path: &[char], id: ContactId) {
        let Some(node) = self.find_mut(path) else {
            return;
        };
        if !node.ids.remove(&id) || !node.is_prunable() {
            return;
        }

        // Deepest node on the path that must stay: the root, a terminal, or a fork
        let mut keep = 0;
        let mut current = &self.root;
        for (depth, c) in path.iter().enumerate() {
            if depth > 0 && (current.is_terminal() || current.children.len() > 1) {
                keep = depth;
            }
            match current.children.get(c) {
                Some(child) => current = child,
                None => return,
            }
        }

        // Everything below `keep` is a single chain ending at the emptied node
        if let Some(anchor) = self.find_mut(&path[..keep]) {
            anchor.children.remove(&path[keep]);
        }
    }
}

impl SearchIndex for NameTrie {
    fn insert(&mut self, key: &str, id: ContactId) {
        let Some(path) = Self::normalize(key) else {
            return;
        };

        let mut current = &mut self.root;
        for c in path {
            current = current.children.entry(c).or_default();
        }
        current.ids.insert(id);
    }

    fn remove(&mut self, key: &str, id: ContactId) {
        let Some(path) = Self::normalize(key) else {
            return;
        };

        self.remove_path(&path, id);
    }

    fn search_prefix(&self, prefix: &str) -> BTreeSet<ContactId> {
        let mut results = BTreeSet::new();

        let Some(path) = Self::normalize(prefix) else {
            return results;
        };
        let Some(start) = self.find(&path) else {
            return results;
        };

        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if node.is_terminal() {
                results.extend(node.ids.iter().copied());
            }
            stack.extend(node.children.values());
        }

        results
    }

    fn clear(&mut self) {
        self.root = TrieNode::default();
    }
}
