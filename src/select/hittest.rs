// Link membership: which page anchors fall inside the selection rectangle.

use crate::page::PageLink;

use super::rect::SelectionRect;

/// Compute the links that are members of the selection, in encounter order.
///
/// A link is a member iff its box strictly overlaps the rectangle and it is
/// not pinned (fixed/sticky chrome). Pure over its inputs, so recomputation
/// on every move/scroll is idempotent; callers treat the result as the sole
/// source of truth for highlighting and the status count.
pub fn links_in_rect(links: &[PageLink], rect: &SelectionRect) -> Vec<PageLink> {
    links
        .iter()
        .filter(|link| !link.pinned && rect.overlaps(&link.rect))
        .cloned()
        .collect()
}
