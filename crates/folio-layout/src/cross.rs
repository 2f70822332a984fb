//! Cross-axis (block) sizing of a single-line container.
//!
//! [§ 9.4 Cross Size Determination](https://www.w3.org/TR/css-flexbox-1/#cross-sizing)

use folio_tree::Length;

use crate::EPSILON;
use crate::length::{Bounds, resolve};

/// Content height of a container and whether content decided it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BlockSize {
    pub(crate) content: f32,
    /// Set when the height does not come from the items alone (explicit,
    /// imposed, fill-available or raised by min-height). A split then
    /// consumes the whole budget.
    pub(crate) declared: bool,
}

/// [§ 9.9 step 15](https://www.w3.org/TR/css-flexbox-1/#algo-cross-container)
///
/// "If the cross size property is a definite size, use that, clamped by
/// the used min and max cross sizes of the flex container. Otherwise, use
/// the sum of the flex lines' cross sizes, clamped by the used min and max
/// cross sizes of the flex container."
///
/// `definite` is already clamped. `fill` is the block space left in the
/// area when the container fills it; it acts as a floor.
pub(crate) fn container_block_size(
    line: f32,
    definite: Option<f32>,
    fill: Option<f32>,
    bounds: Bounds,
) -> BlockSize {
    match (definite, fill) {
        (Some(content), _) => BlockSize {
            content,
            declared: true,
        },
        (None, Some(fill)) => BlockSize {
            content: bounds.clamp(line).max(bounds.clamp(fill)),
            declared: true,
        },
        (None, None) => {
            let content = bounds.clamp(line);
            BlockSize {
                content,
                declared: content > line + EPSILON,
            }
        }
    }
}

/// [§ 9.4 step 11](https://www.w3.org/TR/css-flexbox-1/#algo-stretch)
///
/// "If a flex item has align-self: stretch, its computed cross size property
/// is auto, and neither of its cross-axis margins are auto, the used outer
/// cross size is the used cross size of its flex line."
///
/// Returns the content height to impose on an item: its explicit height if
/// it resolves against `reference`, else the stretched height when `line` is
/// known.
pub(crate) fn item_cross_size(
    height: Length,
    reference: Option<f32>,
    line: Option<f32>,
    outer: f32,
) -> Option<f32> {
    resolve(height, reference).or_else(|| line.map(|line| (line - outer).max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_height_follows_line() {
        let block = container_block_size(120.0, None, None, Bounds::UNBOUNDED);
        assert_eq!(block.content, 120.0);
        assert!(!block.declared);
    }

    #[test]
    fn test_min_height_raises_and_declares() {
        let bounds = Bounds {
            min: 200.0,
            max: f32::INFINITY,
        };
        let block = container_block_size(120.0, None, None, bounds);
        assert_eq!(block.content, 200.0);
        assert!(block.declared);
    }

    #[test]
    fn test_explicit_height_wins_over_content() {
        let block = container_block_size(500.0, Some(80.0), Some(300.0), Bounds::UNBOUNDED);
        assert_eq!(block.content, 80.0);
        assert!(block.declared);
    }

    #[test]
    fn test_fill_is_a_floor() {
        let small = container_block_size(50.0, None, Some(300.0), Bounds::UNBOUNDED);
        assert_eq!(small.content, 300.0);
        let large = container_block_size(400.0, None, Some(300.0), Bounds::UNBOUNDED);
        assert_eq!(large.content, 400.0);
    }

    #[test]
    fn test_stretch_subtracts_edges() {
        assert_eq!(item_cross_size(Length::Auto, None, Some(100.0), 30.0), Some(70.0));
        assert_eq!(item_cross_size(Length::Auto, None, Some(10.0), 30.0), Some(0.0));
        assert_eq!(item_cross_size(Length::Auto, None, None, 30.0), None);
        assert_eq!(
            item_cross_size(Length::percent(50.0), Some(100.0), Some(100.0), 0.0),
            Some(50.0)
        );
        assert_eq!(
            item_cross_size(Length::px(40.0), None, Some(100.0), 0.0),
            Some(40.0)
        );
    }
}
