//! Prefix tree over a fixed set of words.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`].
//! Children are kept in a small sorted vector searched by binary search.

use smallvec::SmallVec;
use tracing::debug;

/// Index of a node in a [`Trie`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug, Default)]
struct Node {
    /// Outgoing edges, sorted by char.
    children: SmallVec<[(char, NodeId); 4]>,
    /// A registered word ends at this node.
    terminal: bool,
}

/// Prefix tree answering "which registered words prefix this text".
///
/// The empty word is never stored, so the root is never terminal and a
/// longest match always has at least one character.
///
/// ```
/// use lexrule_core::Trie;
///
/// let trie = Trie::new(["=", "==", "=>"]);
/// assert_eq!(trie.longest_match("==x"), Some(2));
/// assert_eq!(trie.longest_match("=x"), Some(1));
/// assert_eq!(trie.longest_match("x"), None);
/// ```
#[derive(Clone, Debug)]
pub struct Trie {
    nodes: Vec<Node>,
    words: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Trie {
            nodes: vec![Node::default()],
            words: 0,
        }
    }
}

impl Trie {
    /// The root node, where every walk starts.
    pub const ROOT: NodeId = NodeId(0);

    /// Build a trie from `words`. Duplicates and empty words are ignored.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::default();
        for word in words {
            trie.insert(word.as_ref());
        }
        debug!(
            words = trie.words,
            nodes = trie.nodes.len(),
            "built trie"
        );
        trie
    }

    /// Register `word`. Returns `false` if it was empty or already present.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = Self::ROOT;
        for ch in word.chars() {
            node = match self.child(node, ch) {
                Some(next) => next,
                None => self.push_child(node, ch),
            };
        }
        let terminal = &mut self.nodes[node.0].terminal;
        if *terminal {
            return false;
        }
        *terminal = true;
        self.words += 1;
        true
    }

    fn push_child(&mut self, parent: NodeId, ch: char) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::default());
        let children = &mut self.nodes[parent.0].children;
        let at = children.partition_point(|&(edge, _)| edge < ch);
        children.insert(at, (ch, id));
        id
    }

    /// Follow the edge labelled `ch` out of `node`.
    #[inline]
    pub fn child(&self, node: NodeId, ch: char) -> Option<NodeId> {
        let children = &self.nodes.get(node.0)?.children;
        children
            .binary_search_by_key(&ch, |&(edge, _)| edge)
            .ok()
            .map(|index| children[index].1)
    }

    /// Returns `true` if a registered word ends at `node`.
    #[inline]
    pub fn is_terminal(&self, node: NodeId) -> bool {
        self.nodes.get(node.0).is_some_and(|n| n.terminal)
    }

    /// Returns `true` if `word` was registered.
    pub fn contains(&self, word: &str) -> bool {
        let mut node = Self::ROOT;
        for ch in word.chars() {
            match self.child(node, ch) {
                Some(next) => node = next,
                None => return false,
            }
        }
        self.is_terminal(node)
    }

    /// Byte length of the longest registered word that prefixes `text`.
    pub fn longest_match(&self, text: &str) -> Option<usize> {
        let mut node = Self::ROOT;
        let mut best = None;
        for (offset, ch) in text.char_indices() {
            match self.child(node, ch) {
                Some(next) => node = next,
                None => break,
            }
            if self.is_terminal(node) {
                best = Some(offset + ch.len_utf8());
            }
        }
        best
    }

    /// Number of distinct registered words.
    pub fn len(&self) -> usize {
        self.words
    }

    /// Returns `true` if no word was registered.
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }
}
