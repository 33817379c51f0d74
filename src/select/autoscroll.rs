// Edge-zone auto-scroll while a drag selection is active: parking the
// pointer near the top or bottom of the viewport nudges the page at a fixed
// rate until the pointer leaves the zone or the scroll boundary is reached.

use std::time::{Duration, Instant};

use crate::page::PageMetrics;

/// Height of the activation zones at the top and bottom of the viewport.
const EDGE_ZONE_PX: f64 = 40.0;

/// Pixels scrolled per nudge.
const STEP_PX: f64 = 20.0;

/// Minimum interval between nudges.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Auto-scroll state for a single gesture. At most one nudge sequence is
/// live at a time; `stop` always ends it.
#[derive(Debug, Default)]
pub struct AutoScroll {
    direction: Option<ScrollDirection>,
    last_nudge: Option<Instant>,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluate the pointer position against the edge zones. Entering a
    /// zone arms nudging (if scroll room remains in that direction); leaving
    /// it disarms.
    pub fn update_pointer(&mut self, viewport_y: f64, metrics: &PageMetrics) {
        let dir = direction_for(viewport_y, metrics);
        if dir != self.direction {
            self.direction = dir;
            // Restart the cadence so a freshly entered zone nudges on the
            // next tick instead of inheriting the previous zone's timing.
            self.last_nudge = None;
        }
    }

    /// Advance the cadence. Returns the signed vertical scroll delta to
    /// apply, or `None` when no nudge is due.
    pub fn tick(&mut self, now: Instant, metrics: &PageMetrics) -> Option<f64> {
        let dir = self.direction?;
        if let Some(last) = self.last_nudge {
            if now.duration_since(last) < TICK_INTERVAL {
                return None;
            }
        }
        let delta = match dir {
            ScrollDirection::Up => -(STEP_PX.min(metrics.scroll_room_up())),
            ScrollDirection::Down => STEP_PX.min(metrics.scroll_room_down()),
        };
        if delta == 0.0 {
            // Boundary reached; disarm until the pointer re-enters a zone.
            self.direction = None;
            return None;
        }
        self.last_nudge = Some(now);
        Some(delta)
    }

    /// True while the pointer is parked in a zone with room to scroll.
    pub fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    /// Disarm unconditionally (gesture completed or cancelled).
    pub fn stop(&mut self) {
        self.direction = None;
        self.last_nudge = None;
    }
}

fn direction_for(viewport_y: f64, metrics: &PageMetrics) -> Option<ScrollDirection> {
    if viewport_y < EDGE_ZONE_PX && metrics.scroll_room_up() > 0.0 {
        Some(ScrollDirection::Up)
    } else if viewport_y > metrics.viewport_height - EDGE_ZONE_PX && metrics.scroll_room_down() > 0.0 {
        Some(ScrollDirection::Down)
    } else {
        None
    }
}
