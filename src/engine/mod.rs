// The page-side selection engine: turns host-fed pointer/keyboard/scroll
// events into gesture state transitions and presentation effects, and hands
// completed gestures to the action pipeline.
//
// The host drives this from its event loop: forward events in, apply the
// returned effects, and call `on_tick` periodically (any frame-ish cadence
// works; timing thresholds are checked against the passed instant).

pub mod effects;
pub mod gesture;

use std::time::Instant;

use crate::config::types::{ActionConfig, ModifierSet, MouseButton};
use crate::page::{PageLink, PageMetrics};
use crate::select::autoscroll::AutoScroll;
use crate::select::hittest::links_in_rect;

use effects::{BoxStyle, Effect};
use gesture::{
    find_match, ActiveGesture, GesturePhase, PendingGesture, GRACE_DELAY, MOVE_THRESHOLD_PX,
};

/// What the host should do with the browser's default handling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The engine claimed the event; suppress the default action.
    Consumed,
    /// Not ours; let the page handle it normally.
    Ignored,
}

/// Pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub viewport_x: f64,
    pub viewport_y: f64,
}

/// A finished gesture, captured at pointer-up, ready for the action
/// pipeline. Visual teardown has already happened by the time this exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedGesture {
    pub config: ActionConfig,
    pub links: Vec<PageLink>,
}

/// Per-page selection engine. Holds the cached trigger list (replaced only
/// by settings-change notifications) and the single gesture slot.
pub struct SelectionEngine {
    actions: Vec<ActionConfig>,
    phase: GesturePhase,
}

impl SelectionEngine {
    pub fn new(actions: Vec<ActionConfig>) -> Self {
        Self {
            actions,
            phase: GesturePhase::Idle,
        }
    }

    /// Replace the cached trigger list. An in-flight gesture keeps the
    /// configuration it started with.
    pub fn set_actions(&mut self, actions: Vec<ActionConfig>) {
        self.actions = actions;
    }

    pub fn actions(&self) -> &[ActionConfig] {
        &self.actions
    }

    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    /// Pointer button pressed. A trigger match claims the event and enters
    /// the pending phase; anything else is left to the page.
    pub fn on_pointer_down(
        &mut self,
        button: MouseButton,
        modifiers: ModifierSet,
        pointer: PointerInput,
        metrics: &PageMetrics,
        now: Instant,
    ) -> (Disposition, Vec<Effect>) {
        if !self.phase.is_idle() {
            // A second button mid-gesture must not start a nested gesture or
            // reach the page.
            return (Disposition::Consumed, Vec::new());
        }
        let Some(config) = find_match(&self.actions, button, modifiers) else {
            return (Disposition::Ignored, Vec::new());
        };
        let config = config.clone();
        log::debug!(
            "press matched trigger {} ({} + {:?})",
            config.action.name(),
            button.name(),
            modifiers
        );
        self.phase = GesturePhase::Pending(PendingGesture {
            config,
            button,
            origin: metrics.to_document(pointer.viewport_x, pointer.viewport_y),
            down_viewport: (pointer.viewport_x, pointer.viewport_y),
            grace_deadline: now + GRACE_DELAY,
            activated: false,
        });
        (Disposition::Consumed, vec![Effect::BlockPageClicks])
    }

    /// Pointer moved. Drives the movement half of the activation race, and
    /// while active, rectangle growth plus membership recomputation.
    pub fn on_pointer_move(
        &mut self,
        pointer: PointerInput,
        links: &[PageLink],
        metrics: &PageMetrics,
    ) -> Vec<Effect> {
        if let GesturePhase::Pending(pending) = &self.phase {
            let dx = (pointer.viewport_x - pending.down_viewport.0).abs();
            let dy = (pointer.viewport_y - pending.down_viewport.1).abs();
            if dx > MOVE_THRESHOLD_PX || dy > MOVE_THRESHOLD_PX {
                return self.activate(
                    (pointer.viewport_x, pointer.viewport_y),
                    links,
                    metrics,
                );
            }
            return Vec::new();
        }
        if let GesturePhase::Active(active) = &mut self.phase {
            active.cursor = metrics.to_document(pointer.viewport_x, pointer.viewport_y);
            active.pointer_viewport = (pointer.viewport_x, pointer.viewport_y);
            active.auto_scroll.update_pointer(pointer.viewport_y, metrics);
            return refresh_membership(active, links);
        }
        Vec::new()
    }

    /// Page scrolled. The rectangle is document-anchored, but the cursor
    /// follows the pointer, whose document position just changed; membership
    /// is recomputed against the moved page.
    pub fn on_scroll(&mut self, links: &[PageLink], metrics: &PageMetrics) -> Vec<Effect> {
        let GesturePhase::Active(active) = &mut self.phase else {
            return Vec::new();
        };
        let (vx, vy) = active.pointer_viewport;
        active.cursor = metrics.to_document(vx, vy);
        active.auto_scroll.update_pointer(vy, metrics);
        refresh_membership(active, links)
    }

    /// Periodic host callback: drives the grace half of the activation race
    /// and the auto-scroll cadence.
    pub fn on_tick(
        &mut self,
        links: &[PageLink],
        metrics: &PageMetrics,
        now: Instant,
    ) -> Vec<Effect> {
        let grace_fired = match &self.phase {
            GesturePhase::Pending(p) => (now >= p.grace_deadline).then_some(p.down_viewport),
            _ => None,
        };
        if let Some(at) = grace_fired {
            return self.activate(at, links, metrics);
        }
        if let GesturePhase::Active(active) = &mut self.phase {
            if let Some(dy) = active.auto_scroll.tick(now, metrics) {
                return vec![Effect::ScrollBy { dy }];
            }
        }
        Vec::new()
    }

    /// Modifier keys changed. While active, the same button is re-matched
    /// against the new set; a different winning trigger is adopted in place,
    /// keeping rectangle geometry and membership untouched.
    pub fn on_modifiers_changed(&mut self, modifiers: ModifierSet) -> Vec<Effect> {
        let GesturePhase::Active(active) = &mut self.phase else {
            return Vec::new();
        };
        let Some(next) = find_match(&self.actions, active.button, modifiers) else {
            return Vec::new();
        };
        if *next == active.config {
            return Vec::new();
        }
        let next = next.clone();
        log::debug!(
            "live switch: {} -> {}",
            active.config.action.name(),
            next.action.name()
        );
        active.config = next;
        vec![
            Effect::ShowOverlay {
                rect: active.rect(),
                style: BoxStyle::from_config(&active.config),
                status: status_line(active),
            },
            Effect::SetHighlights {
                ids: member_ids(&active.links),
                color: active.config.color.clone(),
            },
        ]
    }

    /// Escape pressed. Cancels from either non-idle phase with full teardown
    /// and claims the key so the page never sees it mid-gesture.
    pub fn on_escape(&mut self) -> (Disposition, Vec<Effect>) {
        if self.phase.is_idle() {
            return (Disposition::Ignored, Vec::new());
        }
        log::debug!("gesture cancelled");
        // Dropping the phase also ends any auto-scroll nudging.
        self.phase = GesturePhase::Idle;
        (
            Disposition::Consumed,
            vec![Effect::ClearOverlay, Effect::UnblockPageClicks],
        )
    }

    /// Pointer released. While active, captures the (configuration, links)
    /// pair and tears the visuals down immediately; the caller then runs the
    /// action pipeline on the returned value.
    pub fn on_pointer_up(
        &mut self,
        button: MouseButton,
    ) -> (Vec<Effect>, Option<CompletedGesture>) {
        let gesture_button = match &self.phase {
            GesturePhase::Idle => return (Vec::new(), None),
            GesturePhase::Pending(p) => p.button,
            GesturePhase::Active(a) => a.button,
        };
        if button != gesture_button {
            return (Vec::new(), None);
        }
        let teardown = vec![Effect::ClearOverlay, Effect::UnblockPageClicks];
        match std::mem::take(&mut self.phase) {
            GesturePhase::Active(active) => {
                log::debug!(
                    "gesture completed: {} with {} link(s)",
                    active.config.action.name(),
                    active.links.len()
                );
                let completed = CompletedGesture {
                    config: active.config,
                    links: active.links,
                };
                (teardown, Some(completed))
            }
            // Released before activation: a plain click, nothing to do.
            _ => (teardown, None),
        }
    }

    /// One-shot transition from pending to active. Both the grace timer and
    /// the movement threshold funnel through here; the `activated` flag makes
    /// whichever fires second a no-op even if both land in the same frame.
    fn activate(
        &mut self,
        viewport: (f64, f64),
        links: &[PageLink],
        metrics: &PageMetrics,
    ) -> Vec<Effect> {
        let pending = match &mut self.phase {
            GesturePhase::Pending(p) if !p.activated => p,
            _ => return Vec::new(),
        };
        pending.activated = true;

        let mut active = ActiveGesture {
            config: pending.config.clone(),
            button: pending.button,
            origin: pending.origin,
            cursor: metrics.to_document(viewport.0, viewport.1),
            pointer_viewport: viewport,
            links: Vec::new(),
            auto_scroll: AutoScroll::new(),
        };
        active.links = links_in_rect(links, &active.rect());
        active.auto_scroll.update_pointer(viewport.1, metrics);
        log::debug!("selection active: {}", active.config.action.name());

        let shown = vec![
            Effect::ShowOverlay {
                rect: active.rect(),
                style: BoxStyle::from_config(&active.config),
                status: status_line(&active),
            },
            Effect::SetHighlights {
                ids: member_ids(&active.links),
                color: active.config.color.clone(),
            },
        ];
        self.phase = GesturePhase::Active(active);
        shown
    }
}

fn status_line(active: &ActiveGesture) -> String {
    let n = active.links.len();
    let noun = if n == 1 { "link" } else { "links" };
    format!("{n} {noun} · {}", active.config.action.label())
}

fn member_ids(links: &[PageLink]) -> Vec<u64> {
    links.iter().map(|l| l.id).collect()
}

/// Recompute members from scratch and re-emit the full overlay state; marks
/// are never patched incrementally.
fn refresh_membership(active: &mut ActiveGesture, links: &[PageLink]) -> Vec<Effect> {
    active.links = links_in_rect(links, &active.rect());
    vec![
        Effect::UpdateOverlay {
            rect: active.rect(),
            status: status_line(active),
        },
        Effect::SetHighlights {
            ids: member_ids(&active.links),
            color: active.config.color.clone(),
        },
    ]
}
