//! # radix-tally
//!
//! A radix tree (compressed prefix tree) that ingests a stream of byte
//! strings and counts, for every prefix that emerges from shared structure
//! among them, how many inserted strings passed through it.
//!
//! The set of prefixes is discovered from the data: inserting `test` and
//! `team` produces the prefix `te` with a count of 2 without anyone asking
//! for it.
//!
//! ## Example
//!
//! ```rust
//! use radix_tally::RadixTree;
//!
//! let mut tree = RadixTree::new();
//! for line in ["test", "toaster", "toasting", "slow", "slowly"] {
//!     tree.insert(line);
//! }
//!
//! let mut prefixes = Vec::new();
//! tree.walk(|prefix, count| {
//!     prefixes.push((String::from_utf8_lossy(prefix).into_owned(), count));
//! });
//! assert_eq!(prefixes[0], ("t".to_string(), 3));
//! assert_eq!(prefixes[2], ("toast".to_string(), 2));
//! ```
//!
//! Matching is byte-wise: two strings sharing only the lead byte of a
//! multi-byte UTF-8 character will fork in the middle of that character.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod node;
mod prefix;
pub mod shared;
mod walk;

pub use shared::SharedRadixTree;
pub use walk::Iter;

use tracing::trace;

use node::{Edge, LabelArena, Node, NodeArena, NodeId};
use prefix::longest_common_prefix_len;

/// Capacity hints for a new tree.
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial capacity of the node arena
    pub node_capacity: usize,
    /// Initial capacity, in bytes, of the label arena
    pub label_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_capacity: 64,
            label_capacity: 1024,
        }
    }
}

/// Radix tree counting how many inserted values pass through each prefix.
///
/// Structure only grows: inserts add edges and nodes, bump counts and split
/// edges, and nothing is ever removed.
#[derive(Clone)]
pub struct RadixTree {
    nodes: NodeArena,
    labels: LabelArena,
}

impl RadixTree {
    /// Create an empty tree with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty tree with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: NodeArena::with_capacity(config.node_capacity),
            labels: LabelArena::with_capacity(config.label_capacity),
        }
    }

    /// Whether no edge exists yet. Inserting only empty values keeps a tree
    /// empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.get(NodeId::ROOT).edges.is_empty()
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, which is also the number of pairs [`walk`](Self::walk)
    /// visits.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        self.nodes.memory_usage() + self.labels.capacity()
    }

    /// Release spare capacity in both arenas.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        self.labels.shrink_to_fit();
    }

    /// Insert `value`, incrementing the count of every edge it passes through.
    ///
    /// Edges that `value` diverges from partway are split so the fork point
    /// gets its own node. Bytes left over once no edge matches become a new
    /// edge with a count of 1. An empty value changes nothing.
    pub fn insert(&mut self, value: impl AsRef<[u8]>) {
        let value = value.as_ref();
        let mut current = NodeId::ROOT;
        let mut consumed = 0;

        while let Some((idx, matched)) = self.find_edge(current, &value[consumed..]) {
            consumed += matched;

            let edge = &mut self.nodes.get_mut(current).edges[idx];
            edge.count += 1;
            if matched < edge.label.len() {
                self.split(current, idx, matched);
            }

            match self.nodes.get(current).edges[idx].target {
                Some(target) => current = target,
                None => {
                    // Consumed a leaf edge in full.
                    if consumed == value.len() {
                        return;
                    }
                    let leaf = self.nodes.alloc(Node::default());
                    self.nodes.get_mut(current).edges[idx].target = Some(leaf);
                    current = leaf;
                    break;
                }
            }
        }

        if consumed < value.len() {
            let rest = &value[consumed..];
            let label = self.labels.push(rest);
            trace!(
                node = current.index(),
                len = rest.len(),
                "appending leaf edge"
            );
            self.nodes
                .get_mut(current)
                .edges
                .push(Edge::new(label, 1, None));
        }
    }

    /// First edge of `node` sharing a non-empty prefix with `rest`, with the
    /// length of that prefix.
    ///
    /// Sibling labels never share a first byte, so the first match is the
    /// only one.
    fn find_edge(&self, node: NodeId, rest: &[u8]) -> Option<(usize, usize)> {
        if rest.is_empty() {
            return None;
        }
        self.nodes
            .get(node)
            .edges
            .iter()
            .enumerate()
            .find_map(|(idx, edge)| {
                let matched = longest_common_prefix_len(self.labels.get(edge.label), rest);
                (matched > 0).then_some((idx, matched))
            })
    }

    /// Split edge `idx` of `node` after `at` bytes of its label.
    ///
    /// The edge keeps the head of its label and gains a fresh fork node. The
    /// fork's single edge takes the tail, the original target, and the count
    /// the edge had before the insert that caused the split, i.e. one less
    /// than its current count.
    fn split(&mut self, node: NodeId, idx: usize, at: usize) {
        let edge = &self.nodes.get(node).edges[idx];
        debug_assert!(edge.count >= 2, "split edge must already count the new value");
        let (head, tail) = edge.label.split_at(at);
        let suffix = Edge::new(tail, edge.count - 1, edge.target);

        let fork = self.nodes.alloc(Node::with_edge(suffix));
        let edge = &mut self.nodes.get_mut(node).edges[idx];
        edge.label = head;
        edge.target = Some(fork);
        trace!(
            node = node.index(),
            fork = fork.index(),
            at,
            count = edge.count,
            "split edge"
        );
    }
}

impl Default for RadixTree {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: AsRef<[u8]>> Extend<T> for RadixTree {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: AsRef<[u8]>> FromIterator<T> for RadixTree {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl std::fmt::Debug for RadixTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|(prefix, count)| (String::from_utf8_lossy(&prefix).into_owned(), count)),
            )
            .finish()
    }
}


#[cfg(test)]
mod proptests;
