//! Fatal layout errors.
//!
//! Lack of space is never an error: it is reported through
//! [`LayoutOutcome`](crate::LayoutOutcome) and diagnostics. The variants here
//! are contract violations by whoever built the tree or the leaf renderer,
//! and abort the single layout call that hit them.

use folio_tree::NodeId;
use strum_macros::Display;
use thiserror::Error;

/// Which dimension a min/max pair constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Dimension {
    /// Horizontal.
    Width,
    /// Vertical.
    Height,
}

/// Error returned by [`layout`](crate::layout).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The id does not belong to the tree.
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),

    /// A length that must be a finite non-negative number is not.
    #[error("{property} of node {node:?} must be finite and non-negative, got {value}")]
    InvalidLength {
        /// Offending node.
        node: NodeId,
        /// Style property name.
        property: &'static str,
        /// The resolved value.
        value: f32,
    },

    /// A grow or shrink factor that is negative or not finite.
    #[error("flex-{factor} of node {node:?} must be finite and non-negative, got {value}")]
    InvalidFlexFactor {
        /// Offending node.
        node: NodeId,
        /// `grow` or `shrink`.
        factor: &'static str,
        /// The factor.
        value: f32,
    },

    /// The resolved minimum is larger than the resolved maximum.
    #[error("min-{dimension} {min} exceeds max-{dimension} {max} on node {node:?}")]
    MinExceedsMax {
        /// Offending node.
        node: NodeId,
        /// Constrained dimension.
        dimension: Dimension,
        /// Resolved minimum.
        min: f32,
        /// Resolved maximum.
        max: f32,
    },

    /// A composed rectangle came out with a negative or non-finite extent.
    #[error("resolved {rect} of node {node:?} has an invalid extent")]
    NegativeExtent {
        /// Offending node.
        node: NodeId,
        /// Which rectangle.
        rect: &'static str,
    },

    /// The leaf renderer refused or split content although it was given
    /// unbounded block space.
    #[error("leaf renderer answered {outcome} for node {node:?} without a height limit")]
    LeafContract {
        /// Offending leaf.
        node: NodeId,
        /// What it answered.
        outcome: &'static str,
    },
}
