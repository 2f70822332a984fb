//! Box geometry composition and rotation.
//!
//! [CSS Transforms § 6](https://www.w3.org/TR/css-transforms-1/#transform-rendering)
//!
//! Rotation is applied after sizing, about the centre of the margin box.
//! It never feeds back into flex resolution; only the occupied rectangle
//! (the axis-aligned bounding box of the rotated margin box) changes.

use folio_tree::NodeId;

use crate::EPSILON;
use crate::box_model::{BoxDimensions, BoxEdges, Rect, ResolvedBox, Size};
use crate::error::LayoutError;

/// Axis-aligned bounding box of `rect` rotated by `radians` about its centre.
#[must_use]
pub fn rotated_bounds(rect: Rect, radians: f32) -> Rect {
    let size = rotated_size(Size::new(rect.width, rect.height), radians);
    let (cx, cy) = rect.center();
    Rect::new(
        cx - size.width / 2.0,
        cy - size.height / 2.0,
        size.width,
        size.height,
    )
}

/// Extent of the bounding box of a `size` rectangle rotated by `radians`.
#[must_use]
pub fn rotated_size(size: Size, radians: f32) -> Size {
    let (sin, cos) = radians.sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Size::new(
        size.width.mul_add(cos, size.height * sin),
        size.width.mul_add(sin, size.height * cos),
    )
}

/// Size a margin box of `size` occupies once `rotation` is applied.
#[must_use]
pub fn occupied_size(size: Size, rotation: Option<f32>) -> Size {
    match rotation {
        Some(radians) if radians != 0.0 => rotated_size(size, radians),
        _ => size,
    }
}

fn check_extent(rect: &Rect, node: NodeId, name: &'static str) -> Result<(), LayoutError> {
    let valid = |v: f32| v.is_finite() && v >= -EPSILON;
    if valid(rect.width) && valid(rect.height) && rect.x.is_finite() && rect.y.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::NegativeExtent { node, rect: name })
    }
}

/// Build the nested rectangles of a box from its content rectangle.
///
/// # Errors
///
/// [`LayoutError::NegativeExtent`] when a rectangle comes out negative or
/// non-finite, e.g. a negative margin larger than the border box.
pub fn compose(
    node: NodeId,
    content: Rect,
    edges: &BoxEdges,
    rotation: Option<f32>,
) -> Result<ResolvedBox, LayoutError> {
    let dims = BoxDimensions {
        content,
        padding: edges.padding,
        border: edges.border,
        margin: edges.margin,
    };
    let resolved = ResolvedBox {
        margin_box: dims.margin_box(),
        border_box: dims.border_box(),
        padding_box: dims.padding_box(),
        content_box: content,
        occupied: dims.margin_box(),
    };
    check_extent(&resolved.content_box, node, "content box")?;
    check_extent(&resolved.padding_box, node, "padding box")?;
    check_extent(&resolved.border_box, node, "border box")?;
    check_extent(&resolved.margin_box, node, "margin box")?;

    let occupied = match rotation {
        Some(radians) if radians != 0.0 => rotated_bounds(resolved.margin_box, radians),
        _ => resolved.margin_box,
    };
    Ok(ResolvedBox {
        occupied,
        ..resolved
    })
}
