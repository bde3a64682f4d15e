//! Edge and node representation.
//!
//! Nodes live in an arena owned by the tree and are addressed by [`NodeId`].
//! Label bytes live in a separate append-only [`LabelArena`]; an edge only
//! holds an `(offset, len)` view into it, so splitting an edge never copies
//! label bytes.

use smallvec::SmallVec;

/// Index of a node in the tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// View into the label arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Label {
    offset: usize,
    len: usize,
}

impl Label {
    #[inline]
    pub(crate) fn len(self) -> usize {
        self.len
    }

    /// Splits the view at `at`, returning `(head, tail)`.
    #[inline]
    pub(crate) fn split_at(self, at: usize) -> (Label, Label) {
        debug_assert!(0 < at && at < self.len, "split index out of range");
        (
            Label {
                offset: self.offset,
                len: at,
            },
            Label {
                offset: self.offset + at,
                len: self.len - at,
            },
        )
    }
}

/// Contiguous storage for every label byte ever inserted.
#[derive(Clone, Default)]
pub(crate) struct LabelArena {
    data: Vec<u8>,
}

impl LabelArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, bytes: &[u8]) -> Label {
        let offset = self.data.len();
        self.data.extend_from_slice(bytes);
        Label {
            offset,
            len: bytes.len(),
        }
    }

    #[inline]
    pub(crate) fn get(&self, label: Label) -> &[u8] {
        &self.data[label.offset..label.offset + label.len]
    }

    pub(crate) fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }
}

/// A labeled connection to at most one child node.
#[derive(Clone, Debug)]
pub(crate) struct Edge {
    pub(crate) label: Label,
    /// Number of inserted values whose path covers this whole edge.
    pub(crate) count: u64,
    /// `None` when the edge ends at a leaf.
    pub(crate) target: Option<NodeId>,
}

impl Edge {
    pub(crate) fn new(label: Label, count: u64, target: Option<NodeId>) -> Self {
        debug_assert!(label.len() > 0, "edge label must not be empty");
        debug_assert!(count >= 1, "edge count must be at least 1");
        Self {
            label,
            count,
            target,
        }
    }
}

/// Outgoing edges in insertion order.
pub(crate) type Edges = SmallVec<[Edge; 2]>;

#[derive(Clone, Debug, Default)]
pub(crate) struct Node {
    pub(crate) edges: Edges,
}

impl Node {
    pub(crate) fn with_edge(edge: Edge) -> Self {
        let mut edges = Edges::new();
        edges.push(edge);
        Self { edges }
    }
}

/// Arena of nodes. Slot 0 is always the root.
#[derive(Clone)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::default());
        Self { nodes }
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Approximate heap bytes, including spilled edge vectors.
    pub(crate) fn memory_usage(&self) -> usize {
        let spilled: usize = self
            .nodes
            .iter()
            .filter(|n| n.edges.spilled())
            .map(|n| n.edges.capacity() * std::mem::size_of::<Edge>())
            .sum();
        self.nodes.capacity() * std::mem::size_of::<Node>() + spilled
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        for node in &mut self.nodes {
            node.edges.shrink_to_fit();
        }
    }
}
