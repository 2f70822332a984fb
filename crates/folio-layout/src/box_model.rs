//! Box model types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use folio_tree::Sides;
use serde::Serialize;

/// Resolved per-side widths in points.
pub type EdgeSizes = Sides<f32>;

/// A rectangle positioned in 2D space, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Rectangle from its origin and extent.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `inner` lies inside `self`, allowing `tolerance` of rounding.
    #[must_use]
    pub fn contains(&self, inner: &Self, tolerance: f32) -> bool {
        inner.x + tolerance >= self.x
            && inner.y + tolerance >= self.y
            && inner.right() <= self.right() + tolerance
            && inner.bottom() <= self.bottom() + tolerance
    }

    /// Grow the rectangle outwards by `edges`.
    #[must_use]
    pub fn expanded(&self, edges: &EdgeSizes) -> Self {
        Self {
            x: self.x - edges.left,
            y: self.y - edges.top,
            width: self.width + edges.horizontal(),
            height: self.height + edges.vertical(),
        }
    }
}

/// A width and a height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Size from its two extents.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// "Each box has a content area and optional surrounding padding, border,
/// and margin areas."
///
/// The content rectangle plus the resolved edges around it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxDimensions {
    /// Content area.
    pub content: Rect,
    /// Padding widths (content to padding edge).
    pub padding: EdgeSizes,
    /// Border widths (padding edge to border edge).
    pub border: EdgeSizes,
    /// Margin widths (border edge to margin edge).
    pub margin: EdgeSizes,
}

impl BoxDimensions {
    /// [§ 3.2 Padding](https://www.w3.org/TR/css-box-3/#paddings)
    ///
    /// "The padding box contains both the content and padding areas."
    #[must_use]
    pub fn padding_box(&self) -> Rect {
        self.content.expanded(&self.padding)
    }

    /// [§ 3.3 Borders](https://www.w3.org/TR/css-box-3/#borders)
    ///
    /// "The border box contains content, padding, and border areas."
    #[must_use]
    pub fn border_box(&self) -> Rect {
        self.padding_box().expanded(&self.border)
    }

    /// [§ 3.1 Margins](https://www.w3.org/TR/css-box-3/#margins)
    ///
    /// "The margin box is the outermost box, and contains all four areas."
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        self.border_box().expanded(&self.margin)
    }
}

/// Margin, border and padding of one box, resolved to points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxEdges {
    /// Margin widths.
    pub margin: EdgeSizes,
    /// Border widths.
    pub border: EdgeSizes,
    /// Padding widths.
    pub padding: EdgeSizes,
}

impl BoxEdges {
    /// Everything outside the content box on the main (horizontal) axis.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.margin.horizontal() + self.border.horizontal() + self.padding.horizontal()
    }

    /// Everything outside the content box on the cross (vertical) axis.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.margin.vertical() + self.border.vertical() + self.padding.vertical()
    }

    /// Offset from the margin-box origin to the content-box origin.
    #[must_use]
    pub fn content_offset(&self) -> (f32, f32) {
        (
            self.margin.left + self.border.left + self.padding.left,
            self.margin.top + self.border.top + self.padding.top,
        )
    }
}

/// Output geometry of one laid-out box.
///
/// `content_box ⊆ padding_box ⊆ border_box ⊆ margin_box`. `occupied` is the
/// space the box takes in its parent: the margin box, or its rotated
/// bounding box when the element is rotated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ResolvedBox {
    /// Margin edge.
    pub margin_box: Rect,
    /// Border edge.
    pub border_box: Rect,
    /// Padding edge.
    pub padding_box: Rect,
    /// Content edge.
    pub content_box: Rect,
    /// Final occupied rectangle.
    pub occupied: Rect,
}
