// Gesture lifecycle data: the three phases, the activation race constants,
// and trigger matching against the cached configuration list.

use std::time::{Duration, Instant};

use crate::config::types::{ActionConfig, ModifierSet, MouseButton};
use crate::page::{DocPoint, PageLink};
use crate::select::autoscroll::AutoScroll;
use crate::select::rect::SelectionRect;

/// Delay after which a stationary press activates on its own.
pub const GRACE_DELAY: Duration = Duration::from_millis(200);

/// Pointer displacement on either axis that activates immediately.
pub const MOVE_THRESHOLD_PX: f64 = 5.0;

/// Find the configuration bound to this button and exactly this modifier
/// set. Subset matches do not count: a trigger with no modifiers will not
/// fire while any modifier is held. First match in iteration order wins if
/// the list contains duplicates.
pub fn find_match(
    actions: &[ActionConfig],
    button: MouseButton,
    modifiers: ModifierSet,
) -> Option<&ActionConfig> {
    actions
        .iter()
        .find(|a| a.button == button && a.modifiers == modifiers)
}

/// A press that matched a trigger but has not yet become a selection.
#[derive(Debug)]
pub struct PendingGesture {
    pub config: ActionConfig,
    pub button: MouseButton,
    /// Pointer-down position, document coordinates.
    pub origin: DocPoint,
    /// Pointer-down position, viewport coordinates. Displacement is measured
    /// against the raw pointer, independent of page scroll.
    pub down_viewport: (f64, f64),
    pub grace_deadline: Instant,
    /// One-shot guard: the grace timer and the movement threshold race to
    /// activate, and whichever fires second must be a no-op.
    pub activated: bool,
}

/// A live selection rectangle with its current membership.
#[derive(Debug)]
pub struct ActiveGesture {
    pub config: ActionConfig,
    pub button: MouseButton,
    pub origin: DocPoint,
    pub cursor: DocPoint,
    /// Last pointer position in viewport coordinates, kept for edge-zone
    /// checks and for re-anchoring the cursor when the page scrolls.
    pub pointer_viewport: (f64, f64),
    /// Current members in encounter order. Sole source of truth for the
    /// highlight set and the status count.
    pub links: Vec<PageLink>,
    pub auto_scroll: AutoScroll,
}

impl ActiveGesture {
    pub fn rect(&self) -> SelectionRect {
        SelectionRect::from_points(self.origin, self.cursor)
    }
}

/// The gesture lifecycle. A page has exactly one of these at a time, so two
/// selections can never be live at once, and an active gesture always
/// carries its rectangle and link set together.
#[derive(Debug, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Pending(PendingGesture),
    Active(ActiveGesture),
}

impl GesturePhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}
