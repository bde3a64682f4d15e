//! Pre-order traversal.
//!
//! Uses an explicit frame stack and a single path buffer, so the depth of
//! the tree is bounded by heap memory rather than the call stack.

use std::convert::Infallible;
use std::iter::FusedIterator;

use crate::node::NodeId;
use crate::RadixTree;

#[derive(Clone, Copy)]
struct Frame {
    node: NodeId,
    /// Next edge of `node` to visit.
    next_edge: usize,
    /// Length of the path that leads into `node`.
    path_len: usize,
}

/// Walks edges in pre-order, keeping the path to the current edge in `path`.
struct Cursor<'a> {
    tree: &'a RadixTree,
    stack: Vec<Frame>,
    path: Vec<u8>,
}

impl<'a> Cursor<'a> {
    fn new(tree: &'a RadixTree) -> Self {
        Self {
            tree,
            stack: vec![Frame {
                node: NodeId::ROOT,
                next_edge: 0,
                path_len: 0,
            }],
            path: Vec::new(),
        }
    }

    /// Moves to the next edge and returns its count; `path()` then holds the
    /// full prefix ending at that edge.
    fn advance(&mut self) -> Option<u64> {
        let tree = self.tree;
        loop {
            let frame = self.stack.last_mut()?;
            let node = tree.nodes.get(frame.node);
            let Some(edge) = node.edges.get(frame.next_edge) else {
                self.stack.pop();
                continue;
            };
            frame.next_edge += 1;

            self.path.truncate(frame.path_len);
            self.path.extend_from_slice(tree.labels.get(edge.label));
            if let Some(target) = edge.target {
                self.stack.push(Frame {
                    node: target,
                    next_edge: 0,
                    path_len: self.path.len(),
                });
            }
            return Some(edge.count);
        }
    }

    #[inline]
    fn path(&self) -> &[u8] {
        &self.path
    }
}

impl RadixTree {
    /// Calls `visitor` once per edge, in pre-order and insertion order among
    /// siblings, with the full prefix ending at that edge and its count.
    ///
    /// The prefix slice is only valid for the duration of the call.
    /// Siblings are not sorted, so prefixes do not arrive in lexicographic
    /// order.
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(&[u8], u64),
    {
        let result = self.try_walk(|prefix, count| {
            visitor(prefix, count);
            Ok::<(), Infallible>(())
        });
        if let Err(never) = result {
            match never {}
        }
    }

    /// Like [`walk`](Self::walk), but stops at the first error returned by
    /// `visitor` and hands it back.
    pub fn try_walk<F, E>(&self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(&[u8], u64) -> Result<(), E>,
    {
        let mut cursor = Cursor::new(self);
        while let Some(count) = cursor.advance() {
            visitor(cursor.path(), count)?;
        }
        Ok(())
    }

    /// Owned `(prefix, count)` pairs in the same order as [`walk`](Self::walk).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            cursor: Cursor::new(self),
        }
    }
}

/// Iterator returned by [`RadixTree::iter`].
pub struct Iter<'a> {
    cursor: Cursor<'a>,
}

impl Iterator for Iter<'_> {
    type Item = (Vec<u8>, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let count = self.cursor.advance()?;
        Some((self.cursor.path().to_vec(), count))
    }
}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RadixTree {
    type Item = (Vec<u8>, u64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
