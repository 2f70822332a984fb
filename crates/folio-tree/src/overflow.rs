//! Remainder nodes produced when content is split across areas.
//!
//! [CSS Fragmentation § 4 Breaking Rules](https://www.w3.org/TR/css-break-3/#breaking-rules)
//!
//! An [`OverflowNode`] is an owned description of "what is left" after a
//! partial layout. It is built from scratch by the resolver and never aliases
//! the original node, so retrying it in a new area cannot disturb the tree.
//! Untouched items are referenced by their existing [`NodeId`], since nodes
//! are immutable once built.

use crate::NodeId;
use crate::style::Style;

/// What is left of one node after a partial layout.
#[derive(Debug, Clone, PartialEq)]
pub struct OverflowNode<L> {
    /// The node this remainder was split from.
    pub source: NodeId,
    /// Style snapshot for the remainder (already adjusted for the split).
    pub style: Style,
    /// Remaining content.
    pub content: OverflowContent<L>,
}

/// Remaining content of an [`OverflowNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum OverflowContent<L> {
    /// Remaining flex items of a container, in main-axis order.
    Container(Vec<OverflowChild<L>>),
    /// Remaining payload of a leaf, as handed back by its renderer.
    Leaf(L),
}

/// One remaining flex item.
#[derive(Debug, Clone, PartialEq)]
pub enum OverflowChild<L> {
    /// An item that was not placed at all.
    Existing(NodeId),
    /// An item that was partially placed; this is its own remainder.
    Split(OverflowNode<L>),
}

impl<L> OverflowChild<L> {
    /// The original node this item stands for.
    pub const fn source(&self) -> NodeId {
        match self {
            Self::Existing(id) => *id,
            Self::Split(node) => node.source,
        }
    }
}

impl<L> OverflowNode<L> {
    /// Original ids of the remaining items, in order. Empty for leaves.
    #[must_use]
    pub fn item_sources(&self) -> Vec<NodeId> {
        match &self.content {
            OverflowContent::Container(children) => {
                children.iter().map(OverflowChild::source).collect()
            }
            OverflowContent::Leaf(_) => Vec::new(),
        }
    }

    /// Whether the remainder still carries any items or leaf content.
    #[must_use]
    pub fn has_content(&self) -> bool {
        match &self.content {
            OverflowContent::Container(children) => !children.is_empty(),
            OverflowContent::Leaf(_) => true,
        }
    }
}
