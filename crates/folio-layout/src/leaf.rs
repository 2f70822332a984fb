//! Leaf layout contract.
//!
//! Leaves (text, tables, lists, images) are opaque to the resolver. A
//! [`LeafLayout`] implementation sizes their content box; the resolver puts
//! margin, border and padding around the answer and decides placement.

use serde::Serialize;

use crate::EPSILON;
use crate::box_model::Size;

/// Content-box budget offered to a leaf. `None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LeafSpace {
    /// Available content width.
    pub width: Option<f32>,
    /// Available content height.
    pub height: Option<f32>,
}

/// What a leaf renderer made of the space it was given.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafOutcome<L> {
    /// All content placed with this content size.
    Complete(Size),
    /// Part of the content placed; `remainder` is what is left.
    Partial {
        /// Content size of the placed part.
        placed: Size,
        /// Content still to be placed.
        remainder: L,
    },
    /// Nothing could be placed.
    Nothing,
}

/// Lays out leaf content of type `L`.
///
/// Under an unbounded `space.height` an implementation must answer
/// [`LeafOutcome::Complete`].
pub trait LeafLayout<L> {
    /// Size `content` within `space`.
    fn layout_leaf(&self, content: &L, space: LeafSpace) -> LeafOutcome<L>;
}

/// Simple leaf payload for demos and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StaticContent {
    /// Image-like content of a fixed size that neither shrinks nor splits.
    Rigid {
        /// Intrinsic width.
        width: f32,
        /// Intrinsic height.
        height: f32,
    },
    /// Text-like content: `count` lines of `line_width` that rewrap to a
    /// narrower width and split between lines.
    Lines {
        /// Width of one unwrapped line.
        line_width: f32,
        /// Height of one line.
        line_height: f32,
        /// Number of lines at `line_width`.
        count: usize,
    },
}

impl StaticContent {
    /// A fixed-size block.
    #[must_use]
    pub const fn rigid(width: f32, height: f32) -> Self {
        Self::Rigid { width, height }
    }

    /// `count` lines of the given size.
    #[must_use]
    pub const fn lines(line_width: f32, line_height: f32, count: usize) -> Self {
        Self::Lines {
            line_width,
            line_height,
            count,
        }
    }
}

/// Renderer for [`StaticContent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRenderer;

impl StaticRenderer {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn layout_lines(
        line_width: f32,
        line_height: f32,
        count: usize,
        space: LeafSpace,
    ) -> LeafOutcome<StaticContent> {
        // Rewrap when narrower than one line: same amount of text, more lines.
        let (width, lines) = match space.width {
            Some(w) if w > EPSILON && w + EPSILON < line_width => {
                let total = line_width * count as f32;
                (w, (total / w).ceil() as usize)
            }
            _ => (line_width, count),
        };
        let height = line_height * lines as f32;

        let Some(budget) = space.height else {
            return LeafOutcome::Complete(Size::new(width, height));
        };
        if height <= budget + EPSILON {
            return LeafOutcome::Complete(Size::new(width, height));
        }
        let fitting = if line_height > 0.0 {
            ((budget + EPSILON) / line_height).floor() as usize
        } else {
            lines
        };
        if fitting == 0 {
            return LeafOutcome::Nothing;
        }
        LeafOutcome::Partial {
            placed: Size::new(width, line_height * fitting as f32),
            remainder: StaticContent::lines(width, line_height, lines - fitting),
        }
    }
}

impl LeafLayout<StaticContent> for StaticRenderer {
    fn layout_leaf(&self, content: &StaticContent, space: LeafSpace) -> LeafOutcome<StaticContent> {
        match *content {
            StaticContent::Rigid { width, height } => match space.height {
                Some(budget) if height > budget + EPSILON => LeafOutcome::Nothing,
                _ => LeafOutcome::Complete(Size::new(width, height)),
            },
            StaticContent::Lines {
                line_width,
                line_height,
                count,
            } => Self::layout_lines(line_width, line_height, count, space),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(width: Option<f32>, height: Option<f32>) -> LeafSpace {
        LeafSpace { width, height }
    }

    #[test]
    fn test_rigid_never_splits() {
        let image = StaticContent::rigid(80.0, 60.0);
        assert_eq!(
            StaticRenderer.layout_leaf(&image, space(Some(10.0), None)),
            LeafOutcome::Complete(Size::new(80.0, 60.0))
        );
        assert_eq!(
            StaticRenderer.layout_leaf(&image, space(None, Some(59.0))),
            LeafOutcome::Nothing
        );
    }

    #[test]
    fn test_lines_rewrap_to_narrower_width() {
        let text = StaticContent::lines(200.0, 10.0, 3);
        assert_eq!(
            StaticRenderer.layout_leaf(&text, space(Some(100.0), None)),
            LeafOutcome::Complete(Size::new(100.0, 60.0))
        );
        assert_eq!(
            StaticRenderer.layout_leaf(&text, space(Some(500.0), None)),
            LeafOutcome::Complete(Size::new(200.0, 30.0))
        );
    }

    #[test]
    fn test_lines_split_between_lines() {
        let text = StaticContent::lines(100.0, 10.0, 10);
        assert_eq!(
            StaticRenderer.layout_leaf(&text, space(Some(100.0), Some(35.0))),
            LeafOutcome::Partial {
                placed: Size::new(100.0, 30.0),
                remainder: StaticContent::lines(100.0, 10.0, 7),
            }
        );
        assert_eq!(
            StaticRenderer.layout_leaf(&text, space(Some(100.0), Some(5.0))),
            LeafOutcome::Nothing
        );
    }
}
