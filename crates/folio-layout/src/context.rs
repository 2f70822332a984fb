//! Per-call layout state and node dispatch.

use folio_common::{Diagnostic, DiagnosticId, DiagnosticSink};
use folio_tree::{ElementTree, NodeId, NodeKind, OverflowContent, OverflowNode, Style};
use log::debug;

use crate::EPSILON;
use crate::box_model::{BoxEdges, Rect, Size};
use crate::error::{Dimension, LayoutError};
use crate::fit::{fits, split_style};
use crate::geometry::compose;
use crate::leaf::{LeafLayout, LeafOutcome, LeafSpace};
use crate::length::{Bounds, non_negative, resolve, resolve_bounds, resolve_box_edges};
use crate::outcome::{AvailableArea, Fragment, LayoutOutcome, NothingReason};
use crate::cache::{LayoutCache, RequestKey};

/// Whether a layout result can end up in the returned fragment tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Pass {
    /// Probes and natural heights. Emits no diagnostics.
    Measure,
    /// The result may be kept.
    Final,
}

/// An optional width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Extent {
    pub(crate) width: Option<f32>,
    pub(crate) height: Option<f32>,
}

impl Extent {
    pub(crate) const fn new(width: Option<f32>, height: Option<f32>) -> Self {
        Self { width, height }
    }
}

/// Everything a node is told by whoever lays it out.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Request {
    /// Where the margin box goes and how much room there is.
    pub(crate) area: AvailableArea,
    /// Content-box sizes fixed by the parent flex line.
    pub(crate) imposed: Extent,
    /// Reference sizes for percentages.
    pub(crate) containing: Extent,
    /// Forced placement inherited from an ancestor.
    pub(crate) forced: bool,
    pub(crate) pass: Pass,
}

impl Request {
    pub(crate) const fn root(area: AvailableArea) -> Self {
        Self {
            area,
            imposed: Extent::new(None, None),
            containing: Extent::new(area.width, area.height),
            forced: false,
            pass: Pass::Final,
        }
    }

    /// Unbounded request used to measure preferred sizes.
    pub(crate) const fn probe() -> Self {
        Self {
            area: AvailableArea::unbounded(),
            imposed: Extent::new(None, None),
            containing: Extent::new(None, None),
            forced: false,
            pass: Pass::Measure,
        }
    }
}

/// Values a node resolves for its own box before sizing anything.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OwnBox {
    pub(crate) edges: BoxEdges,
    pub(crate) width_bounds: Bounds,
    pub(crate) height_bounds: Bounds,
    pub(crate) width: Option<f32>,
    pub(crate) height: Option<f32>,
    /// Forced on the node or inherited.
    pub(crate) forced: bool,
    pub(crate) rotated: bool,
}

impl OwnBox {
    pub(crate) fn resolve(id: NodeId, style: &Style, request: &Request) -> Result<Self, LayoutError> {
        let Extent { width, height } = request.containing;
        Ok(Self {
            edges: resolve_box_edges(style, width, id)?,
            width_bounds: resolve_bounds(
                style.min_width,
                style.max_width,
                width,
                id,
                Dimension::Width,
            )?,
            height_bounds: resolve_bounds(
                style.min_height,
                style.max_height,
                height,
                id,
                Dimension::Height,
            )?,
            width: non_negative(resolve(style.width, width), id, "width")?,
            height: non_negative(resolve(style.height, height), id, "height")?,
            forced: request.forced || style.is_forced(),
            rotated: style.rotation.is_some_and(|radians| radians != 0.0),
        })
    }

    /// Content width fixed before looking at content: imposed, explicit,
    /// or filling the area like a block.
    pub(crate) fn definite_width(&self, request: &Request) -> Option<f32> {
        request
            .imposed
            .width
            .or(self.width)
            .or_else(|| {
                request
                    .area
                    .width
                    .map(|w| (w - self.edges.horizontal()).max(0.0))
            })
            .map(|w| self.width_bounds.clamp(w))
    }

    /// Content height that content does not get to change.
    pub(crate) fn declared_height(&self, request: &Request) -> Option<f32> {
        request
            .imposed
            .height
            .or(self.height)
            .map(|h| self.height_bounds.clamp(h))
    }

    pub(crate) fn content_origin(&self, area: &AvailableArea) -> (f32, f32) {
        let (dx, dy) = self.edges.content_offset();
        (area.x + dx, area.y + dy)
    }

    /// Whether a box with this content width is wider than the area.
    pub(crate) fn exceeds_area(&self, content_width: f32, area: &AvailableArea) -> bool {
        area.width
            .is_some_and(|w| content_width + self.edges.horizontal() > w + EPSILON)
    }
}

/// Unwrap a result that cannot be partial because it had unbounded height.
pub(crate) fn into_complete<L>(
    outcome: LayoutOutcome<L>,
    node: NodeId,
) -> Result<Fragment, LayoutError> {
    match outcome {
        LayoutOutcome::Complete(fragment) => Ok(fragment),
        other => Err(LayoutError::LeafContract {
            node,
            outcome: other.kind(),
        }),
    }
}

/// State of one [`layout`](crate::layout) call.
pub(crate) struct LayoutContext<'a, L, R: ?Sized> {
    pub(crate) tree: &'a ElementTree<L>,
    leaves: &'a R,
    sink: &'a mut dyn DiagnosticSink,
    pub(crate) cache: LayoutCache,
}

impl<'a, L, R> LayoutContext<'a, L, R>
where
    R: LeafLayout<L> + ?Sized,
{
    pub(crate) fn new(
        tree: &'a ElementTree<L>,
        leaves: &'a R,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            tree,
            leaves,
            sink,
            cache: LayoutCache::default(),
        }
    }

    pub(crate) fn layout_node(
        &mut self,
        id: NodeId,
        request: Request,
    ) -> Result<LayoutOutcome<L>, LayoutError> {
        let tree = self.tree;
        let node = tree.get(id).ok_or(LayoutError::UnknownNode(id))?;
        let key = RequestKey::new(id, &request);
        if let Some(fragment) = self.cache.measured(&key) {
            return Ok(LayoutOutcome::Complete(fragment.clone()));
        }
        let outcome = match &node.kind {
            NodeKind::Container => self.layout_container(id, &node.style, request)?,
            NodeKind::Leaf(content) => self.layout_leaf(id, &node.style, content, request)?,
        };
        if let LayoutOutcome::Complete(fragment) = &outcome {
            self.cache.insert_measured(key, fragment);
        }
        Ok(outcome)
    }

    /// Emit the horizontal overflow diagnostic for `id`, unless this is a
    /// measuring pass or placement is forced.
    pub(crate) fn report_overflow(&mut self, id: NodeId, own: &OwnBox, request: &Request) {
        if request.pass == Pass::Final && !own.forced {
            debug!(target: "folio::fit", "node {} overflows its area horizontally", id.0);
            self.sink.emit(Diagnostic {
                id: DiagnosticId::ElementDoesNotFitArea,
                node: id.0,
            });
        }
    }

    fn layout_leaf(
        &mut self,
        id: NodeId,
        style: &Style,
        content: &L,
        request: Request,
    ) -> Result<LayoutOutcome<L>, LayoutError> {
        let own = OwnBox::resolve(id, style, &request)?;
        let width = own.definite_width(&request);
        let declared = own.declared_height(&request);

        // Rotated, forced and fixed-height boxes are sized whole.
        let budget = match request.area.height {
            Some(h) if !own.forced && !own.rotated && declared.is_none() => {
                let budget = h - own.edges.vertical();
                if budget < -EPSILON {
                    return Ok(LayoutOutcome::Nothing(NothingReason::NoSpace));
                }
                Some(budget.max(0.0))
            }
            _ => None,
        };

        let space = LeafSpace {
            width,
            height: budget,
        };
        match self.leaves.layout_leaf(content, space) {
            LeafOutcome::Complete(size) => {
                let content_size = Size::new(
                    width.unwrap_or_else(|| own.width_bounds.clamp(size.width)),
                    declared.unwrap_or_else(|| own.height_bounds.clamp(size.height)),
                );
                let fragment =
                    Self::leaf_fragment(id, style, &own, &request, content_size, size.width)?;
                if own.forced || fits(fragment.boxes.occupied.height, request.area.height) {
                    if own.exceeds_area(content_size.width, &request.area) {
                        self.report_overflow(id, &own, &request);
                    }
                    return Ok(LayoutOutcome::Complete(fragment));
                }
                let reason = if own.rotated {
                    NothingReason::RotatedDoesNotFit
                } else {
                    NothingReason::LeafDoesNotFit
                };
                debug!(target: "folio::fit", "leaf {} placed nothing: {reason}", id.0);
                Ok(LayoutOutcome::Nothing(reason))
            }
            LeafOutcome::Partial { placed, remainder } => {
                let Some(budget) = budget else {
                    return Err(LayoutError::LeafContract {
                        node: id,
                        outcome: "partial",
                    });
                };
                // min-height still applies to the placed part, within the budget.
                let placed_height = own.height_bounds.clamp(placed.height).min(budget);
                let content_size = Size::new(width.unwrap_or(placed.width), placed_height);
                let fragment =
                    Self::leaf_fragment(id, style, &own, &request, content_size, placed.width)?;
                if own.exceeds_area(content_size.width, &request.area) {
                    self.report_overflow(id, &own, &request);
                }
                debug!(
                    target: "folio::fit",
                    "leaf {} split after {placed_height} of {budget}",
                    id.0
                );
                Ok(LayoutOutcome::Partial {
                    placed: fragment,
                    remainder: OverflowNode {
                        source: id,
                        style: split_style(style, placed_height, request.containing.height),
                        content: OverflowContent::Leaf(remainder),
                    },
                })
            }
            LeafOutcome::Nothing => {
                if budget.is_none() {
                    return Err(LayoutError::LeafContract {
                        node: id,
                        outcome: "nothing",
                    });
                }
                debug!(target: "folio::fit", "leaf {} placed nothing in {:?}", id.0, budget);
                Ok(LayoutOutcome::Nothing(NothingReason::LeafDoesNotFit))
            }
        }
    }

    fn leaf_fragment(
        id: NodeId,
        style: &Style,
        own: &OwnBox,
        request: &Request,
        content: Size,
        natural_width: f32,
    ) -> Result<Fragment, LayoutError> {
        let (x, y) = own.content_origin(&request.area);
        let boxes = compose(
            id,
            Rect::new(x, y, content.width, content.height),
            &own.edges,
            style.rotation,
        )?;
        Ok(Fragment {
            node: id,
            boxes,
            background: style.background,
            overflows_horizontally: natural_width > content.width + EPSILON
                || own.exceeds_area(content.width, &request.area),
            children: Vec::new(),
        })
    }
}
