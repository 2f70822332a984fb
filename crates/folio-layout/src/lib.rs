//! Paginated flex layout resolver for the Folio layout engine.
//!
//! # Scope
//!
//! This crate places a tree of containers and opaque leaves along a single
//! horizontal main axis inside a page-like area:
//!
//! - **Main axis** ([§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths))
//!   - flex-basis, grow and shrink distribution with min/max clamps
//!   - shrink-to-fit containers when no width is available
//! - **Cross axis** ([§ 9.4 Cross Size Determination](https://www.w3.org/TR/css-flexbox-1/#cross-sizing))
//!   - natural heights, explicit and fill-available heights, stretch
//! - **Pagination** ([CSS Fragmentation](https://www.w3.org/TR/css-break-3/))
//!   - partial placement with an owned remainder for the next area
//!   - forced placement, rotated boxes that are never sliced
//! - **Box model** ([CSS Box Model Level 3](https://www.w3.org/TR/css-box-3/))
//!   - margins, borders, padding, backgrounds and rotation
//!
//! # Not Yet Implemented
//!
//! - flex-wrap (every container is a single line)
//! - baseline alignment, column direction and writing modes
//!
//! # Example
//!
//! ```
//! use folio_common::RecordingSink;
//! use folio_layout::{AvailableArea, LayoutOutcome, StaticContent, StaticRenderer, layout};
//! use folio_tree::{ElementTree, Style};
//!
//! let mut tree = ElementTree::new();
//! let row = tree.container(Style::default());
//! for _ in 0..3 {
//!     let cell = tree.leaf(Style::default().with_grow(1.0), StaticContent::rigid(0.0, 20.0));
//!     tree.append_child(row, cell).unwrap();
//! }
//!
//! let mut sink = RecordingSink::default();
//! let area = AvailableArea::definite(0.0, 0.0, 300.0, 400.0);
//! let outcome = layout(&tree, row, area, &StaticRenderer, &mut sink).unwrap();
//! let LayoutOutcome::Complete(fragment) = outcome else { panic!("row fits") };
//! assert_eq!(fragment.children[1].boxes.content_box.width, 100.0);
//! ```

/// Rectangles and resolved box geometry per [CSS Box Model Level 3](https://www.w3.org/TR/css-box-3/).
pub mod box_model;
/// Fatal layout errors.
pub mod error;
/// Main-axis size resolution per [§ 9.7](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths).
pub mod flex;
/// Box composition and rotation per [CSS Transforms](https://www.w3.org/TR/css-transforms-1/).
pub mod geometry;
/// Leaf layout contract and a reference leaf renderer.
pub mod leaf;
/// Length and percentage resolution per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod length;
/// Layout inputs and outcomes.
pub mod outcome;

mod cache;
mod container;
mod context;
mod cross;
mod fit;
mod probe;

pub use box_model::{BoxDimensions, BoxEdges, EdgeSizes, Rect, ResolvedBox, Size};
pub use error::{Dimension, LayoutError};
pub use flex::{Distribution, FlexItem, MainResolution, resolve_main_sizes};
pub use leaf::{LeafLayout, LeafOutcome, LeafSpace, StaticContent, StaticRenderer};
pub use length::Bounds;
pub use outcome::{AvailableArea, Fragment, LayoutOutcome, NothingReason};

use folio_common::DiagnosticSink;
use folio_tree::{ElementTree, NodeId};
use log::debug;

use crate::context::{LayoutContext, Request};

/// Tolerance for fit and overflow comparisons, in points.
pub const EPSILON: f32 = 0.01;

/// Lay out `node` and its subtree into `area`.
///
/// Leaves are sized by `leaves`; horizontal overflow is reported to `sink`.
/// The tree is only read. A [`LayoutOutcome::Partial`] remainder can be
/// turned into nodes with [`ElementTree::adopt`] and laid out again in the
/// next area.
///
/// # Errors
///
/// Returns a [`LayoutError`] when the tree or a style is inconsistent
/// (unknown node, negative length, invalid flex factor, min above max) or
/// when the leaf renderer breaks its contract. Lack of space is never an
/// error.
pub fn layout<L, R>(
    tree: &ElementTree<L>,
    node: NodeId,
    area: AvailableArea,
    leaves: &R,
    sink: &mut dyn DiagnosticSink,
) -> Result<LayoutOutcome<L>, LayoutError>
where
    R: LeafLayout<L> + ?Sized,
{
    let mut cx = LayoutContext::new(tree, leaves, sink);
    let outcome = cx.layout_node(node, Request::root(area))?;
    debug!(
        target: "folio::layout",
        "node {} in {:?}x{:?}: {}",
        node.0,
        area.width,
        area.height,
        outcome.kind()
    );
    Ok(outcome)
}
