//! Element tree for the Folio layout resolver.
//!
//! This crate provides an arena-based tree of layout participants: flex
//! containers and opaque leaves (text, tables, lists, images) whose payload
//! type `L` is chosen by the caller.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Nodes
//! are immutable once created: layout borrows the tree for one call and
//! writes nothing back, and partial layouts describe their remainder as an
//! owned [`OverflowNode`] that [`ElementTree::adopt`] turns into new nodes.

pub mod overflow;
pub mod style;

pub use overflow::{OverflowChild, OverflowContent, OverflowNode};
pub use style::{Fill, FlexStyle, Length, Placement, Rgba, Sides, Style};

use thiserror::Error;

/// A type-safe index into the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct NodeId(pub usize);

/// Errors raised while building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id does not belong to this tree.
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    /// Only containers can have children.
    #[error("node {0:?} is a leaf and cannot have children")]
    NotAContainer(NodeId),
    /// The child was already appended somewhere.
    #[error("node {0:?} already has a parent")]
    AlreadyAttached(NodeId),
    /// Appending would make a node its own ancestor.
    #[error("appending {child:?} to {parent:?} would create a cycle")]
    Cycle {
        /// The would-be parent.
        parent: NodeId,
        /// The would-be child.
        child: NodeId,
    },
}

/// What a node is, as far as layout is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<L> {
    /// A flex container: its children are resolved along the main axis.
    Container,
    /// Content laid out by an external leaf renderer.
    Leaf(L),
}

/// One layout participant.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode<L> {
    /// Container or leaf.
    pub kind: NodeKind<L>,
    /// Style snapshot.
    pub style: Style,
    /// The container this node was first appended to.
    ///
    /// Nodes referenced by an adopted remainder keep their original parent.
    pub parent: Option<NodeId>,
    /// Children in main-axis order.
    pub children: Vec<NodeId>,
}

impl<L> ElementNode<L> {
    /// Whether this node resolves its children as flex items.
    pub const fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container)
    }
}

/// Arena-based element tree with O(1) node access.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - No borrowing issues (indices instead of references)
/// - Cheap remainders: a split container only allocates its new node and
///   reuses the ids of the items it did not place
#[derive(Debug, Clone)]
pub struct ElementTree<L> {
    nodes: Vec<ElementNode<L>>,
}

impl<L> ElementTree<L> {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, kind: NodeKind<L>, style: Style) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ElementNode {
            kind,
            style,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a detached flex container.
    pub fn container(&mut self, style: Style) -> NodeId {
        self.alloc(NodeKind::Container, style)
    }

    /// Allocate a detached leaf.
    pub fn leaf(&mut self, style: Style, content: L) -> NodeId {
        self.alloc(NodeKind::Leaf(content), style)
    }

    /// Appends `child` as the last flex item of `parent`.
    ///
    /// # Errors
    ///
    /// Fails if either id is unknown, `parent` is a leaf, `child` is
    /// already attached, or `child` is an ancestor of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let parent_node = self.get(parent).ok_or(TreeError::UnknownNode(parent))?;
        if !parent_node.is_container() {
            return Err(TreeError::NotAContainer(parent));
        }
        let child_node = self.get(child).ok_or(TreeError::UnknownNode(child))?;
        if child_node.parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if child == parent || self.ancestors(parent).any(|id| id == child) {
            return Err(TreeError::Cycle { parent, child });
        }

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Get a node by its ID.
    pub fn get(&self, id: NodeId) -> Option<&ElementNode<L>> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_, L> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Materialize a remainder as new nodes and return the id of its root.
    ///
    /// Items the remainder references by id are shared, not copied; only
    /// split items get fresh nodes. The returned node is detached.
    pub fn adopt(&mut self, overflow: OverflowNode<L>) -> NodeId {
        let OverflowNode { style, content, .. } = overflow;
        match content {
            OverflowContent::Leaf(payload) => self.leaf(style, payload),
            OverflowContent::Container(children) => {
                let id = self.container(style);
                for child in children {
                    let child_id = match child {
                        OverflowChild::Existing(existing) => existing,
                        OverflowChild::Split(split) => {
                            let fresh = self.adopt(split);
                            self.nodes[fresh.0].parent = Some(id);
                            fresh
                        }
                    };
                    self.nodes[id.0].children.push(child_id);
                }
                id
            }
        }
    }
}

impl<L> Default for ElementTree<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a, L> {
    tree: &'a ElementTree<L>,
    current: Option<NodeId>,
}

impl<L> Iterator for AncestorIterator<'_, L> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
