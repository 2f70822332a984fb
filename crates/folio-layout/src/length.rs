//! Length resolution.
//!
//! [CSS Values and Units § 5.1.2](https://www.w3.org/TR/css-values-4/#percentages)
//!
//! "Percentages are always relative to another quantity." When that quantity
//! is indefinite the percentage behaves as `auto`.

use folio_tree::{Length, NodeId, Sides, Style};

use crate::box_model::{BoxEdges, EdgeSizes};
use crate::error::{Dimension, LayoutError};

/// Resolve `length` against `reference`.
///
/// `Px` always resolves, `Percent` only against a definite reference and
/// `Auto` never.
#[must_use]
pub fn resolve(length: Length, reference: Option<f32>) -> Option<f32> {
    match length {
        Length::Auto => None,
        Length::Px(px) => Some(px),
        Length::Percent(pct) => reference.map(|r| r * pct / 100.0),
    }
}

/// Like [`resolve`], with a fallback for unresolved lengths.
#[must_use]
pub fn resolve_or(length: Length, reference: Option<f32>, fallback: f32) -> f32 {
    resolve(length, reference).unwrap_or(fallback)
}

/// [CSS 2.1 § 8.3](https://www.w3.org/TR/CSS2/box.html#margin-properties)
///
/// Percentages on every side, vertical ones included, refer to the width of
/// the containing block. Unresolved sides become 0.
#[must_use]
pub fn resolve_edges(edges: &Sides<Length>, reference: Option<f32>) -> EdgeSizes {
    edges.map(|side| resolve_or(side, reference, 0.0))
}

/// Reject negative and non-finite values of a resolved length.
pub(crate) fn non_negative(
    value: Option<f32>,
    node: NodeId,
    property: &'static str,
) -> Result<Option<f32>, LayoutError> {
    match value {
        Some(v) if !(v.is_finite() && v >= 0.0) => Err(LayoutError::InvalidLength {
            node,
            property,
            value: v,
        }),
        other => Ok(other),
    }
}

fn check_sides(
    sides: &EdgeSizes,
    node: NodeId,
    property: &'static str,
) -> Result<(), LayoutError> {
    for value in [sides.top, sides.right, sides.bottom, sides.left] {
        let _ = non_negative(Some(value), node, property)?;
    }
    Ok(())
}

/// Resolve margin, border and padding of `style`.
///
/// Negative margins are kept; negative or non-finite border and padding are
/// rejected, as is a non-finite margin.
pub(crate) fn resolve_box_edges(
    style: &Style,
    reference: Option<f32>,
    node: NodeId,
) -> Result<BoxEdges, LayoutError> {
    let margin = resolve_edges(&style.margin, reference);
    for value in [margin.top, margin.right, margin.bottom, margin.left] {
        if !value.is_finite() {
            return Err(LayoutError::InvalidLength {
                node,
                property: "margin",
                value,
            });
        }
    }
    let padding = resolve_edges(&style.padding, reference);
    check_sides(&padding, node, "padding")?;
    check_sides(&style.border, node, "border")?;
    Ok(BoxEdges {
        margin,
        border: style.border,
        padding,
    })
}

/// A resolved `[min, max]` pair. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower bound, 0 when unset.
    pub min: f32,
    /// Upper bound, infinite when unset.
    pub max: f32,
}

impl Bounds {
    /// No constraint beyond non-negativity.
    pub const UNBOUNDED: Self = Self {
        min: 0.0,
        max: f32::INFINITY,
    };

    /// Clamp `value` into the bounds. Idempotent.
    #[must_use]
    pub fn clamp(self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }
}

/// Resolve a min/max pair against `reference`.
///
/// # Errors
///
/// [`LayoutError::InvalidLength`] for a negative bound and
/// [`LayoutError::MinExceedsMax`] when the resolved minimum is larger than
/// the resolved maximum.
pub(crate) fn resolve_bounds(
    min: Length,
    max: Length,
    reference: Option<f32>,
    node: NodeId,
    dimension: Dimension,
) -> Result<Bounds, LayoutError> {
    let (min_name, max_name) = match dimension {
        Dimension::Width => ("min-width", "max-width"),
        Dimension::Height => ("min-height", "max-height"),
    };
    let min = non_negative(resolve(min, reference), node, min_name)?.unwrap_or(0.0);
    let max = match resolve(max, reference) {
        // An infinite max is the same as none.
        Some(v) if v == f32::INFINITY => v,
        other => non_negative(other, node, max_name)?.unwrap_or(f32::INFINITY),
    };
    if min > max {
        return Err(LayoutError::MinExceedsMax {
            node,
            dimension,
            min,
            max,
        });
    }
    Ok(Bounds { min, max })
}
