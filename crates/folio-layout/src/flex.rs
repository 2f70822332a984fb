//! Main-axis resolution for a single flex line.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! This module implements the paginated subset of CSS Flexbox:
//! - `flex-direction: row` (horizontal main axis), one line, no wrapping
//! - `flex-grow` / `flex-shrink` distribution (§ 9.7) with one clamp
//!   redistribution pass instead of the full freeze loop
//! - `flex-basis` (definite length or auto)
//! - min/max main-size clamps
//!
//! Everything here is pure arithmetic on [`FlexItem`]s. Collecting the items
//! (and probing content sizes) happens in the container layout.

use folio_tree::NodeId;
use log::trace;
use strum_macros::Display;

use crate::EPSILON;
use crate::length::Bounds;

/// Per-item input to the main-axis resolver.
///
/// [§ 9.2 Line Length Determination](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexItem {
    /// The item node.
    pub node: NodeId,
    /// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    /// The flex base size, content box.
    pub base: f32,
    /// Used min/max main size.
    pub bounds: Bounds,
    /// flex-grow factor.
    pub grow: f32,
    /// flex-shrink factor.
    pub shrink: f32,
    /// Sum of horizontal margin+border+padding.
    pub outer: f32,
}

impl FlexItem {
    /// [§ 9.2 step 3E](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    ///
    /// "The hypothetical main size is the item's flex base size clamped
    /// according to its used min and max main sizes."
    #[must_use]
    pub fn hypothetical(&self) -> f32 {
        self.bounds.clamp(self.base)
    }

    /// Scaled flex shrink factor (shrink × base).
    #[must_use]
    pub fn scaled_shrink(&self) -> f32 {
        self.shrink * self.base
    }
}

/// Which way free space was handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Distribution {
    /// Sizes stayed hypothetical.
    None,
    /// Positive free space went to growable items.
    Grow,
    /// A deficit was taken from shrinkable items.
    Shrink,
}

/// Result of resolving one line.
#[derive(Debug, Clone, PartialEq)]
pub struct MainResolution {
    /// Resolved content-box main size per item, in input order.
    pub sizes: Vec<f32>,
    /// Σ(hypothetical + outer), the line's size before any distribution.
    pub used: f32,
    /// `available − used` for a definite container, 0 otherwise.
    pub free: f32,
    /// Direction that was applied.
    pub distribution: Distribution,
}

impl MainResolution {
    /// Σ(resolved size + outer) for `items`.
    #[must_use]
    pub fn line_size(&self, items: &[FlexItem]) -> f32 {
        self.sizes
            .iter()
            .zip(items)
            .map(|(size, item)| size + item.outer)
            .sum()
    }
}

/// [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
///
/// Resolve item main sizes against `available`. An indefinite available
/// size leaves every item at its hypothetical size.
#[must_use]
pub fn resolve_main_sizes(items: &[FlexItem], available: Option<f32>) -> MainResolution {
    let mut sizes: Vec<f32> = items.iter().map(FlexItem::hypothetical).collect();
    let used: f32 = items
        .iter()
        .zip(&sizes)
        .map(|(item, size)| size + item.outer)
        .sum();

    let Some(available) = available else {
        return MainResolution {
            sizes,
            used,
            free: 0.0,
            distribution: Distribution::None,
        };
    };

    // STEP 1: "Determine the used flex factor."
    let free = available - used;
    let distribution = if free > EPSILON && items.iter().any(|item| item.grow > 0.0) {
        distribute(items, &mut sizes, free, |item| item.grow);
        Distribution::Grow
    } else if free < -EPSILON && items.iter().any(|item| item.scaled_shrink() > 0.0) {
        distribute(items, &mut sizes, free, FlexItem::scaled_shrink);
        Distribution::Shrink
    } else {
        Distribution::None
    };

    trace!(
        target: "folio::flex",
        "available={available} used={used} free={free} {distribution} -> {sizes:?}"
    );

    MainResolution {
        sizes,
        used,
        free,
        distribution,
    }
}

/// Hand out `free` (negative for a deficit) in proportion to `weight`.
///
/// Items that hit a bound are frozen there and the violation is shared once
/// among the items that did not, which are then clamped a final time.
fn distribute(
    items: &[FlexItem],
    sizes: &mut [f32],
    free: f32,
    weight: impl Fn(&FlexItem) -> f32,
) {
    let weights: Vec<f32> = items.iter().map(&weight).collect();
    let total: f32 = weights.iter().sum();
    if total <= 0.0 {
        return;
    }

    let mut frozen = vec![false; items.len()];
    let mut violation = 0.0_f32;
    for (i, item) in items.iter().enumerate() {
        if weights[i] <= 0.0 {
            frozen[i] = true;
            continue;
        }
        let target = free.mul_add(weights[i] / total, sizes[i]);
        let clamped = item.bounds.clamp(target);
        if (clamped - target).abs() > f32::EPSILON * target.abs().max(1.0) {
            frozen[i] = true;
            violation += target - clamped;
        }
        sizes[i] = clamped;
    }

    if violation.abs() <= EPSILON {
        return;
    }
    let remaining: f32 = weights
        .iter()
        .zip(&frozen)
        .filter(|&(_, &is_frozen)| !is_frozen)
        .map(|(w, _)| w)
        .sum();
    if remaining <= 0.0 {
        return;
    }
    for (i, item) in items.iter().enumerate() {
        if !frozen[i] {
            let target = violation.mul_add(weights[i] / remaining, sizes[i]);
            sizes[i] = item.bounds.clamp(target);
        }
    }
}

/// Resolve the container's own content width together with its items.
///
/// A definite `main` is used as is. Otherwise the container shrinks to fit
/// its line, clamped by its own `bounds`; if the clamp changes the size the
/// items are resolved again against the clamped size.
#[must_use]
pub fn resolve_container_main(
    items: &[FlexItem],
    main: Option<f32>,
    bounds: Bounds,
) -> (f32, MainResolution) {
    if let Some(main) = main {
        return (main, resolve_main_sizes(items, Some(main)));
    }
    let natural = resolve_main_sizes(items, None);
    let clamped = bounds.clamp(natural.used);
    if (clamped - natural.used).abs() > EPSILON {
        trace!(
            target: "folio::flex",
            "shrink-to-fit {} clamped to {clamped}",
            natural.used
        );
        (clamped, resolve_main_sizes(items, Some(clamped)))
    } else {
        (natural.used, natural)
    }
}
