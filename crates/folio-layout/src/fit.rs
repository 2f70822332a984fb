//! Area fitting and splitting.
//!
//! [CSS Fragmentation § 4](https://www.w3.org/TR/css-break-3/#breaking-rules)
//!
//! A container that does not fit the block space of its area is split
//! between items: the items that fit are placed as a closed box and the
//! rest becomes an [`OverflowNode`] for the next area. The first item that
//! does not fit is offered the remaining space itself, so nested containers
//! and splittable leaves can break inside.

use folio_tree::{Length, OverflowChild, OverflowContent, OverflowNode, Style};
use log::{debug, trace};

use crate::EPSILON;
use crate::container::Line;
use crate::context::{LayoutContext, Pass};
use crate::error::LayoutError;
use crate::leaf::LeafLayout;
use crate::length::resolve;
use crate::outcome::{Fragment, LayoutOutcome, NothingReason};

/// Whether something `occupied` tall fits in `available`. Indefinite space
/// always fits.
pub(crate) fn fits(occupied: f32, available: Option<f32>) -> bool {
    available.is_none_or(|available| occupied <= available + EPSILON)
}

/// Style of what is left after `consumed` of content height was placed.
///
/// The top margin stays with the placed part. Block sizes that resolve
/// against `reference` become absolute and shrink by what was consumed.
pub(crate) fn split_style(style: &Style, consumed: f32, reference: Option<f32>) -> Style {
    let reduce = |length: Length| match resolve(length, reference) {
        Some(px) => Length::Px((px - consumed).max(0.0)),
        None => length,
    };
    let mut rest = style.clone();
    rest.margin.top = Length::Px(0.0);
    rest.height = reduce(style.height);
    rest.min_height = reduce(style.min_height);
    rest.max_height = reduce(style.max_height);
    rest
}

impl<L, R> LayoutContext<'_, L, R>
where
    R: LeafLayout<L> + ?Sized,
{
    /// Split `line` against `available` block space.
    pub(crate) fn split_container(
        &mut self,
        line: &Line<'_>,
        available: f32,
    ) -> Result<LayoutOutcome<L>, LayoutError> {
        let id = line.id;
        let budget = available - line.own.edges.vertical();
        if budget < -EPSILON {
            debug!(target: "folio::fit", "container {} has no room for its edges", id.0);
            return Ok(LayoutOutcome::Nothing(NothingReason::NoSpace));
        }
        let budget = budget.max(0.0);

        // Items laid out while scanning keep their fragment; the others are
        // stretched once the placed height is known.
        let mut placed: Vec<(usize, Option<Fragment>)> = Vec::new();
        let mut rest: Vec<OverflowChild<L>> = Vec::new();
        for (index, item) in line.items.iter().enumerate() {
            let node = item.flex.node;
            if !rest.is_empty() {
                rest.push(OverflowChild::Existing(node));
                continue;
            }
            if line.natural[index] <= budget + EPSILON {
                placed.push((index, None));
                continue;
            }

            let cross = resolve(item.height, line.reference_height);
            let request = line.item_request(index, cross, Some(budget), Pass::Final);
            match self.layout_node(node, request)? {
                LayoutOutcome::Complete(fragment) => placed.push((index, Some(fragment))),
                LayoutOutcome::Partial {
                    placed: fragment,
                    remainder,
                } => {
                    trace!(target: "folio::fit", "item {} split inside {}", node.0, id.0);
                    placed.push((index, Some(fragment)));
                    rest.push(OverflowChild::Split(remainder));
                }
                LayoutOutcome::Nothing(reason) => {
                    trace!(target: "folio::fit", "item {} deferred: {reason}", node.0);
                    rest.push(OverflowChild::Existing(node));
                }
            }
        }

        if placed.is_empty() && !rest.is_empty() {
            debug!(target: "folio::fit", "container {}: first item does not fit", id.0);
            return Ok(LayoutOutcome::Nothing(NothingReason::FirstItemDoesNotFit));
        }
        // Only the declared height is left to split; it has to make progress.
        if placed.is_empty() && budget <= EPSILON {
            return Ok(LayoutOutcome::Nothing(NothingReason::NoSpace));
        }

        // Everything was placed and only a forced item overran the budget.
        let complete = rest.is_empty() && !line.block.declared;

        let tallest = placed
            .iter()
            .map(|(index, laid)| {
                laid.as_ref()
                    .map_or(line.natural[*index], |f| f.boxes.margin_box.height)
            })
            .fold(0.0_f32, f32::max);
        let content_height = if line.block.declared {
            budget
        } else if complete {
            line.own.height_bounds.clamp(tallest)
        } else {
            line.own
                .height_bounds
                .clamp(tallest)
                .min(budget.max(tallest))
        };

        let mut children = Vec::with_capacity(placed.len());
        for (index, laid) in placed {
            let fragment = match laid {
                Some(fragment) => fragment,
                None => self.place_item(line, index, content_height)?,
            };
            children.push(fragment);
        }
        let placed_count = children.len();
        let fragment = self.finish_container(line, content_height, children)?;
        if complete {
            debug!(
                target: "folio::fit",
                "container {} placed whole past {budget}: forced content",
                id.0
            );
            return Ok(LayoutOutcome::Complete(fragment));
        }

        debug!(
            target: "folio::fit",
            "container {} split: {placed_count} placed, {} deferred, {content_height} of {budget}",
            id.0,
            rest.len()
        );
        Ok(LayoutOutcome::Partial {
            placed: fragment,
            remainder: OverflowNode {
                source: id,
                style: split_style(
                    line.style,
                    content_height,
                    line.request.containing.height,
                ),
                content: OverflowContent::Container(rest),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use folio_tree::Sides;

    use super::*;

    #[test]
    fn test_fits_with_tolerance() {
        assert!(fits(250.0, Some(250.0)));
        assert!(fits(250.005, Some(250.0)));
        assert!(!fits(251.0, Some(250.0)));
        assert!(fits(1.0e9, None));
    }

    #[test]
    fn test_split_style_reduces_block_sizes() {
        let style = Style::default()
            .with_margin(Sides::uniform(Length::px(10.0)))
            .with_height(Length::px(600.0))
            .with_height_bounds(Length::px(100.0), Length::percent(90.0));
        let rest = split_style(&style, 400.0, None);
        assert_eq!(rest.margin.top, Length::Px(0.0));
        assert_eq!(rest.margin.bottom, Length::Px(10.0));
        assert_eq!(rest.height, Length::Px(200.0));
        assert_eq!(rest.min_height, Length::Px(0.0));
        assert_eq!(rest.max_height, Length::Percent(90.0));
    }

    #[test]
    fn test_split_style_makes_percentages_absolute() {
        let style = Style::default()
            .with_height(Length::percent(150.0))
            .with_height_bounds(Length::percent(10.0), Length::percent(200.0));
        let rest = split_style(&style, 250.0, Some(250.0));
        assert_eq!(rest.height, Length::Px(125.0));
        assert_eq!(rest.min_height, Length::Px(0.0));
        assert_eq!(rest.max_height, Length::Px(250.0));
        assert_eq!(split_style(&rest, 125.0, Some(250.0)).height, Length::Px(0.0));
    }
}
