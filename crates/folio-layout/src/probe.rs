//! Preferred-size probing.
//!
//! [§ 9.2 step 3E](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
//!
//! "Otherwise, size the item into the available space using its used flex
//! basis in place of its main size, treating a value of content as
//! max-content."
//!
//! An item with an `auto` basis and no resolvable width is laid out once
//! with unbounded space and its content width becomes the base size.

use folio_tree::NodeId;
use log::trace;

use crate::context::{LayoutContext, Request, into_complete};
use crate::error::LayoutError;
use crate::leaf::LeafLayout;

impl<L, R> LayoutContext<'_, L, R>
where
    R: LeafLayout<L> + ?Sized,
{
    /// Max-content width of `id`'s content box.
    pub(crate) fn preferred_width(&mut self, id: NodeId) -> Result<f32, LayoutError> {
        if let Some(width) = self.cache.width(id) {
            return Ok(width);
        }
        let outcome = self.layout_node(id, Request::probe())?;
        let width = into_complete(outcome, id)?.boxes.content_box.width;
        trace!(target: "folio::probe", "node {} prefers width {width}", id.0);
        self.cache.insert_width(id, width);
        Ok(width)
    }
}
