//! Call-scoped measurement cache.
//!
//! Every container measures its items before placing them, and the
//! measuring pass of a parent repeats the measuring pass of its children.
//! Measured fragments only depend on the node and the request, so they are
//! kept here for the rest of the [`layout`](crate::layout) call and nested
//! containers cost one measurement per distinct request instead of one per
//! ancestor pass.

use std::collections::HashMap;

use folio_tree::NodeId;

use crate::context::{Pass, Request};
use crate::outcome::Fragment;

fn bits(value: Option<f32>) -> Option<u32> {
    value.map(f32::to_bits)
}

/// Exact identity of a request, with floats compared bitwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RequestKey {
    node: NodeId,
    area: [Option<u32>; 4],
    imposed: [Option<u32>; 2],
    containing: [Option<u32>; 2],
    forced: bool,
    pass: Pass,
}

impl RequestKey {
    pub(crate) fn new(node: NodeId, request: &Request) -> Self {
        let area = request.area;
        Self {
            node,
            area: [
                Some(area.x.to_bits()),
                Some(area.y.to_bits()),
                bits(area.width),
                bits(area.height),
            ],
            imposed: [bits(request.imposed.width), bits(request.imposed.height)],
            containing: [
                bits(request.containing.width),
                bits(request.containing.height),
            ],
            forced: request.forced,
            pass: request.pass,
        }
    }
}

/// Preferred widths and measured fragments of one layout call.
#[derive(Debug, Default)]
pub(crate) struct LayoutCache {
    widths: HashMap<NodeId, f32>,
    measured: HashMap<RequestKey, Fragment>,
}

impl LayoutCache {
    pub(crate) fn width(&self, id: NodeId) -> Option<f32> {
        self.widths.get(&id).copied()
    }

    pub(crate) fn insert_width(&mut self, id: NodeId, width: f32) {
        let _ = self.widths.insert(id, width);
    }

    pub(crate) fn measured(&self, key: &RequestKey) -> Option<&Fragment> {
        self.measured.get(key)
    }

    /// Keep a fragment from a measuring pass. Final passes are not cached:
    /// they may emit diagnostics and each one is requested once.
    pub(crate) fn insert_measured(&mut self, key: RequestKey, fragment: &Fragment) {
        if key.pass == Pass::Measure {
            let _ = self.measured.insert(key, fragment.clone());
        }
    }
}
