//! Inputs and outputs of a layout call.

use folio_tree::{NodeId, OverflowNode, Rgba};
use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

use crate::box_model::ResolvedBox;

/// Region a node is laid out into. The margin box starts at `(x, y)`.
///
/// `None` extents are indefinite.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AvailableArea {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Available width.
    pub width: Option<f32>,
    /// Available height.
    pub height: Option<f32>,
}

impl AvailableArea {
    /// Area at the given origin with optional extents.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: Option<f32>, height: Option<f32>) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A page-like area with both extents definite.
    #[must_use]
    pub const fn definite(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, Some(width), Some(height))
    }

    /// Unbounded area at the origin.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(0.0, 0.0, None, None)
    }

    /// Same area with another height.
    #[must_use]
    pub const fn with_height(self, height: Option<f32>) -> Self {
        Self { height, ..self }
    }
}

/// One laid-out box and its laid-out items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    /// Node this fragment was produced for.
    pub node: NodeId,
    /// Resolved geometry.
    pub boxes: ResolvedBox,
    /// Background colour, for the painter.
    pub background: Option<Rgba>,
    /// Content wider than the box, or the box wider than its area.
    pub overflows_horizontally: bool,
    /// Fragments of the placed items, in main-axis order.
    pub children: Vec<Fragment>,
}

impl Fragment {
    /// Nodes of the direct children, in order.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<NodeId> {
        self.children.iter().map(|child| child.node).collect()
    }

    /// Depth-first walk over this fragment and its descendants.
    pub fn walk(&self, visit: &mut impl FnMut(&Self)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Why a node could place nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum NothingReason {
    /// The area cannot even hold the node's vertical edges.
    NoSpace,
    /// The first item does not fit and cannot be split.
    FirstItemDoesNotFit,
    /// A rotated box does not fit; rotated boxes are never split.
    RotatedDoesNotFit,
    /// The leaf renderer placed no content.
    LeafDoesNotFit,
}

/// Result of laying out one node.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome<L> {
    /// Everything was placed.
    Complete(Fragment),
    /// A prefix was placed; the rest goes to a later area.
    Partial {
        /// Closed box holding what was placed.
        placed: Fragment,
        /// What is left, to be materialised with
        /// [`ElementTree::adopt`](folio_tree::ElementTree::adopt).
        remainder: OverflowNode<L>,
    },
    /// Nothing was placed.
    Nothing(NothingReason),
}

impl<L> LayoutOutcome<L> {
    /// The placed fragment, if any.
    #[must_use]
    pub const fn fragment(&self) -> Option<&Fragment> {
        match self {
            Self::Complete(fragment) | Self::Partial { placed: fragment, .. } => Some(fragment),
            Self::Nothing(_) => None,
        }
    }

    /// Whether everything was placed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Short name of the variant, for logs and errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Complete(_) => "complete",
            Self::Partial { .. } => "partial",
            Self::Nothing(_) => "nothing",
        }
    }
}
