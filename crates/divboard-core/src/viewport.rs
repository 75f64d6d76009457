//! Viewport culling for virtualized rendering.

use crate::element::Element;
use kurbo::Rect;

/// Default margin (in world units) kept around the viewport so elements
/// entering the view during a scroll are already materialized.
pub const DEFAULT_CULL_MARGIN: f64 = 200.0;

/// Elements whose bounds, inflated by `margin`, touch the viewport.
///
/// Boundary contact counts as visible: an element exactly `margin` away
/// from a viewport edge is still returned. Snapshot order is preserved.
pub fn visible_elements<'a>(
    elements: &'a [Element],
    viewport: Rect,
    margin: f64,
) -> Vec<&'a Element> {
    elements
        .iter()
        .filter(|element| {
            let bounds = element.bounds();
            bounds.x1 + margin >= viewport.x0
                && bounds.x0 - margin <= viewport.x1
                && bounds.y1 + margin >= viewport.y0
                && bounds.y0 - margin <= viewport.y1
        })
        .collect()
}
