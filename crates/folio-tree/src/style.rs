//! Typed style snapshot for element nodes.
//!
//! Every node carries an immutable [`Style`]. Layout reads it, resolves the
//! lengths it needs into a call-scoped side table and never writes anything
//! back.

use serde::Serialize;
use strum_macros::Display;

/// A style-specified length.
///
/// [CSS Values and Units § 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum Length {
    /// Computed by the layout algorithm (content-based sizing).
    #[default]
    Auto,
    /// An absolute length in points.
    Px(f32),
    /// A percentage of a reference size, e.g. `Percent(50.0)` is half.
    Percent(f32),
}

impl Length {
    /// Shorthand for [`Length::Px`].
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self::Px(value)
    }

    /// Shorthand for [`Length::Percent`].
    #[must_use]
    pub const fn percent(value: f32) -> Self {
        Self::Percent(value)
    }

    /// Check if the value is 'auto'.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Four per-side values, used for margins, borders and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Sides<T> {
    /// Top edge.
    pub top: T,
    /// Right edge.
    pub right: T,
    /// Bottom edge.
    pub bottom: T,
    /// Left edge.
    pub left: T,
}

impl<T: Copy> Sides<T> {
    /// Same value on all four sides.
    pub const fn uniform(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Sides in CSS shorthand order (top, right, bottom, left).
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Apply `f` to every side.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Sides<U> {
        Sides {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}

impl Sides<f32> {
    /// Left plus right.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Sides<Length> {
    /// All four sides set to `0`.
    #[must_use]
    pub const fn zero() -> Self {
        Self::uniform(Length::Px(0.0))
    }
}

/// An sRGB colour with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Rgba {
    /// Opaque colour from its three channels.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// What to do when a box does not fit the area offered to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
pub enum Placement {
    /// Split or defer content that does not fit.
    #[default]
    Flow,
    /// Place the box at its full computed size and accept the overflow.
    Forced,
}

/// How a container sizes itself along the block axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
pub enum Fill {
    /// Block size comes from the content (or an explicit height).
    #[default]
    Content,
    /// Consume all the block space the parent grants.
    AvailableArea,
}

/// Flex item attributes.
///
/// [CSS Flexbox § 7 Flexibility](https://www.w3.org/TR/css-flexbox-1/#flexibility)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlexStyle {
    /// Share of positive free space, non-negative.
    pub grow: f32,
    /// Share of negative free space, weighted by the base size, non-negative.
    pub shrink: f32,
    /// Starting main size before distribution.
    pub basis: Length,
}

impl Default for FlexStyle {
    /// "The initial values of flex-grow, flex-shrink and flex-basis are
    /// 0, 1 and auto."
    fn default() -> Self {
        Self {
            grow: 0.0,
            shrink: 1.0,
            basis: Length::Auto,
        }
    }
}

/// Immutable style bag of one element node.
///
/// Widths and heights size the content box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    /// Margins, outside the border.
    pub margin: Sides<Length>,
    /// Border widths in points.
    pub border: Sides<f32>,
    /// Padding, inside the border.
    pub padding: Sides<Length>,
    /// Explicit content width.
    pub width: Length,
    /// Explicit content height.
    pub height: Length,
    /// Lower bound of the content width.
    pub min_width: Length,
    /// Upper bound of the content width.
    pub max_width: Length,
    /// Lower bound of the content height.
    pub min_height: Length,
    /// Upper bound of the content height.
    pub max_height: Length,
    /// Background colour, carried through to fragments for painting.
    pub background: Option<Rgba>,
    /// Rotation angle in radians, applied after layout.
    pub rotation: Option<f32>,
    /// Overflow policy.
    pub placement: Placement,
    /// Block-axis sizing mode.
    pub fill: Fill,
    /// Flex item attributes.
    pub flex: FlexStyle,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            margin: Sides::zero(),
            border: Sides::uniform(0.0),
            padding: Sides::zero(),
            width: Length::Auto,
            height: Length::Auto,
            min_width: Length::Auto,
            max_width: Length::Auto,
            min_height: Length::Auto,
            max_height: Length::Auto,
            background: None,
            rotation: None,
            placement: Placement::Flow,
            fill: Fill::Content,
            flex: FlexStyle::default(),
        }
    }
}

impl Style {
    /// Set the margins.
    #[must_use]
    pub const fn with_margin(mut self, margin: Sides<Length>) -> Self {
        self.margin = margin;
        self
    }

    /// Set the border widths.
    #[must_use]
    pub const fn with_border(mut self, border: Sides<f32>) -> Self {
        self.border = border;
        self
    }

    /// Set the padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: Sides<Length>) -> Self {
        self.padding = padding;
        self
    }

    /// Set the explicit content width.
    #[must_use]
    pub const fn with_width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    /// Set the explicit content height.
    #[must_use]
    pub const fn with_height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    /// Set min-width and max-width.
    #[must_use]
    pub const fn with_width_bounds(mut self, min: Length, max: Length) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Set min-height and max-height.
    #[must_use]
    pub const fn with_height_bounds(mut self, min: Length, max: Length) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    /// Set the background colour.
    #[must_use]
    pub const fn with_background(mut self, color: Rgba) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the rotation angle, in radians.
    #[must_use]
    pub const fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = Some(radians);
        self
    }

    /// Set the overflow policy.
    #[must_use]
    pub const fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the block-axis sizing mode.
    #[must_use]
    pub const fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    /// Set the flex grow factor.
    #[must_use]
    pub const fn with_grow(mut self, grow: f32) -> Self {
        self.flex.grow = grow;
        self
    }

    /// Set the flex shrink factor.
    #[must_use]
    pub const fn with_shrink(mut self, shrink: f32) -> Self {
        self.flex.shrink = shrink;
        self
    }

    /// Set the flex basis.
    #[must_use]
    pub const fn with_basis(mut self, basis: Length) -> Self {
        self.flex.basis = basis;
        self
    }

    /// Whether overflow is accepted instead of splitting.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        matches!(self.placement, Placement::Forced)
    }
}
