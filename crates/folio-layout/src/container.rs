//! Flex container layout.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! A container resolves its items along the main axis, measures their
//! natural heights, sizes itself on the cross axis and then either places
//! every item or hands over to the split controller.

use folio_tree::{Fill, Length, NodeId, Style};
use log::debug;

use crate::EPSILON;
use crate::box_model::{Rect, Size};
use crate::context::{Extent, LayoutContext, OwnBox, Pass, Request, into_complete};
use crate::cross::{BlockSize, container_block_size, item_cross_size};
use crate::error::{Dimension, LayoutError};
use crate::fit::fits;
use crate::flex::{FlexItem, resolve_container_main};
use crate::geometry::{compose, occupied_size};
use crate::leaf::LeafLayout;
use crate::length::{non_negative, resolve, resolve_bounds, resolve_box_edges};
use crate::outcome::{AvailableArea, Fragment, LayoutOutcome, NothingReason};

/// A flex item plus what the cross axis needs from its style.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineItem {
    pub(crate) flex: FlexItem,
    pub(crate) height: Length,
    /// Vertical margin+border+padding.
    pub(crate) outer_cross: f32,
}

/// The single flex line of a container, fully resolved on the main axis.
pub(crate) struct Line<'s> {
    pub(crate) id: NodeId,
    pub(crate) style: &'s Style,
    pub(crate) own: OwnBox,
    pub(crate) request: Request,
    /// Container content width.
    pub(crate) main: f32,
    /// Width items resolve percentages against. Unset while shrinking to
    /// fit, so item edges measured for the line match the item's own.
    pub(crate) reference_width: Option<f32>,
    /// Container height items resolve percentages against, if declared.
    pub(crate) reference_height: Option<f32>,
    pub(crate) items: Vec<LineItem>,
    /// Resolved content-box main size per item.
    pub(crate) sizes: Vec<f32>,
    /// Margin-box left edge per item.
    offsets: Vec<f32>,
    /// Natural margin-box height per item.
    pub(crate) natural: Vec<f32>,
    pub(crate) block: BlockSize,
    pub(crate) origin: (f32, f32),
}

impl Line<'_> {
    /// Σ(size + outer) over the line.
    pub(crate) fn line_size(&self) -> f32 {
        self.sizes
            .iter()
            .zip(&self.items)
            .map(|(size, item)| size + item.flex.outer)
            .sum()
    }

    /// Request for item `index` with its main size imposed.
    pub(crate) fn item_request(
        &self,
        index: usize,
        cross: Option<f32>,
        area_height: Option<f32>,
        pass: Pass,
    ) -> Request {
        let item = &self.items[index];
        Request {
            area: AvailableArea::new(
                self.offsets[index],
                self.origin.1,
                Some(self.sizes[index] + item.flex.outer),
                area_height,
            ),
            imposed: Extent::new(Some(self.sizes[index]), cross),
            containing: Extent::new(self.reference_width, self.reference_height),
            forced: self.own.forced,
            pass,
        }
    }
}

fn check_factor(node: NodeId, factor: &'static str, value: f32) -> Result<f32, LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidFlexFactor {
            node,
            factor,
            value,
        })
    }
}

impl<L, R> LayoutContext<'_, L, R>
where
    R: LeafLayout<L> + ?Sized,
{
    pub(crate) fn layout_container(
        &mut self,
        id: NodeId,
        style: &Style,
        request: Request,
    ) -> Result<LayoutOutcome<L>, LayoutError> {
        let own = OwnBox::resolve(id, style, &request)?;

        // STEP 1 (§ 9.2): Main sizes. Shrink-to-fit when nothing fixes the
        // container width.
        let definite_main = own.definite_width(&request);
        let items = self.collect_items(id, definite_main)?;
        let flex_items: Vec<FlexItem> = items.iter().map(|item| item.flex).collect();
        let (main, resolution) =
            resolve_container_main(&flex_items, definite_main, own.width_bounds);
        debug!(
            target: "folio::flex",
            "container {} main={main} used={} free={} {}",
            id.0,
            resolution.used,
            resolution.free,
            resolution.distribution
        );

        let origin = own.content_origin(&request.area);
        let mut cursor = origin.0;
        let mut offsets = Vec::with_capacity(items.len());
        for (item, size) in items.iter().zip(&resolution.sizes) {
            offsets.push(cursor);
            cursor += size + item.flex.outer;
        }

        let declared = own.declared_height(&request);
        let mut line = Line {
            id,
            style,
            own,
            request,
            main,
            reference_width: definite_main,
            reference_height: declared,
            items,
            sizes: resolution.sizes,
            offsets,
            natural: Vec::new(),
            block: BlockSize {
                content: 0.0,
                declared: false,
            },
            origin,
        };

        // STEP 2 (§ 9.4): Natural heights with unbounded block space.
        line.natural = self.natural_heights(&line)?;
        let line_cross = line.natural.iter().copied().fold(0.0_f32, f32::max);
        let fill = match style.fill {
            Fill::AvailableArea => request
                .area
                .height
                .map(|h| (h - own.edges.vertical()).max(0.0)),
            Fill::Content => None,
        };
        line.block = container_block_size(line_cross, declared, fill, own.height_bounds);

        // STEP 3: Fit or split.
        let margin_box = Size::new(
            main + own.edges.horizontal(),
            line.block.content + own.edges.vertical(),
        );
        let occupied = occupied_size(margin_box, style.rotation);
        match request.area.height {
            Some(available) if !own.forced && !fits(occupied.height, Some(available)) => {
                if own.rotated {
                    debug!(
                        target: "folio::fit",
                        "rotated container {} needs {} of {available}",
                        id.0,
                        occupied.height
                    );
                    return Ok(LayoutOutcome::Nothing(NothingReason::RotatedDoesNotFit));
                }
                self.split_container(&line, available)
            }
            _ => {
                let children = (0..line.items.len())
                    .map(|index| self.place_item(&line, index, line.block.content))
                    .collect::<Result<Vec<_>, _>>()?;
                let fragment = self.finish_container(&line, line.block.content, children)?;
                Ok(LayoutOutcome::Complete(fragment))
            }
        }
    }

    /// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    ///
    /// Determine flex base sizes:
    ///   A. If flex-basis is a definite length, use it.
    ///   B. If flex-basis is auto and the item has a definite width, use that.
    ///   C. Otherwise, probe the item's preferred width.
    fn collect_items(
        &mut self,
        id: NodeId,
        main: Option<f32>,
    ) -> Result<Vec<LineItem>, LayoutError> {
        let tree = self.tree;
        let children = tree.children(id);
        let mut items = Vec::with_capacity(children.len());
        for &child in children {
            let node = tree.get(child).ok_or(LayoutError::UnknownNode(child))?;
            let style = &node.style;
            let grow = check_factor(child, "grow", style.flex.grow)?;
            let shrink = check_factor(child, "shrink", style.flex.shrink)?;
            let edges = resolve_box_edges(style, main, child)?;
            let bounds = resolve_bounds(
                style.min_width,
                style.max_width,
                main,
                child,
                Dimension::Width,
            )?;
            let basis = non_negative(resolve(style.flex.basis, main), child, "flex-basis")?;
            let width = non_negative(resolve(style.width, main), child, "width")?;
            let base = match basis.or(width) {
                Some(base) => base,
                None => self.preferred_width(child)?,
            };
            items.push(LineItem {
                flex: FlexItem {
                    node: child,
                    base,
                    bounds,
                    grow,
                    shrink,
                    outer: edges.horizontal(),
                },
                height: style.height,
                outer_cross: edges.vertical(),
            });
        }
        Ok(items)
    }

    fn natural_heights(&mut self, line: &Line<'_>) -> Result<Vec<f32>, LayoutError> {
        let mut heights = Vec::with_capacity(line.items.len());
        for (index, item) in line.items.iter().enumerate() {
            let cross = resolve(item.height, line.reference_height);
            let request = line.item_request(index, cross, None, Pass::Measure);
            let outcome = self.layout_node(item.flex.node, request)?;
            let fragment = into_complete(outcome, item.flex.node)?;
            heights.push(fragment.boxes.margin_box.height);
        }
        Ok(heights)
    }

    /// Lay out item `index` for keeps, stretched to `content_height`.
    ///
    /// The block space was already checked by this container, so the item
    /// gets an unbounded height and always completes.
    pub(crate) fn place_item(
        &mut self,
        line: &Line<'_>,
        index: usize,
        content_height: f32,
    ) -> Result<Fragment, LayoutError> {
        let item = &line.items[index];
        let cross = item_cross_size(
            item.height,
            line.reference_height,
            Some(content_height),
            item.outer_cross,
        );
        let request = line.item_request(index, cross, None, line.request.pass);
        let outcome = self.layout_node(item.flex.node, request)?;
        into_complete(outcome, item.flex.node)
    }

    /// Compose the container box around its placed `children` and report
    /// horizontal overflow.
    pub(crate) fn finish_container(
        &mut self,
        line: &Line<'_>,
        content_height: f32,
        children: Vec<Fragment>,
    ) -> Result<Fragment, LayoutError> {
        let (x, y) = line.origin;
        let boxes = compose(
            line.id,
            Rect::new(x, y, line.main, content_height),
            &line.own.edges,
            line.style.rotation,
        )?;

        // Nested containers report their own overflow; leaves never do
        // inside a line, so their overflow is reported here.
        let tree = self.tree;
        let leaf_overflow = children.iter().any(|child| {
            child.overflows_horizontally
                && tree.get(child.node).is_some_and(|node| !node.is_container())
        });
        let overflows = line.line_size() > line.main + EPSILON
            || line.own.exceeds_area(line.main, &line.request.area)
            || leaf_overflow;
        if overflows {
            self.report_overflow(line.id, &line.own, &line.request);
        }

        Ok(Fragment {
            node: line.id,
            boxes,
            background: line.style.background,
            overflows_horizontally: overflows,
            children,
        })
    }
}
