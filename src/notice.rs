// Transient on-page notification with auto-dismiss and fade-out. The host
// renders the message; this type owns the timing.

use std::time::{Duration, Instant};

/// How long a notification stays fully visible.
const DISPLAY_DURATION: Duration = Duration::from_secs(3);

/// Length of the fade-out transition once the display period ends.
const FADE_DURATION: Duration = Duration::from_millis(300);

/// A transient notification summarizing an action outcome. Every completed
/// (non-no-op) action produces exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    shown_at: Instant,
}

impl Notice {
    pub fn new(message: String) -> Self {
        Self {
            message,
            shown_at: Instant::now(),
        }
    }

    pub fn shown_at(&self) -> Instant {
        self.shown_at
    }

    /// Opacity at `now`: 1.0 while displayed, fading linearly to 0.0.
    pub fn alpha_at(&self, now: Instant) -> f32 {
        let elapsed = now.duration_since(self.shown_at);
        if elapsed < DISPLAY_DURATION {
            1.0
        } else if elapsed < DISPLAY_DURATION + FADE_DURATION {
            let fade = (elapsed - DISPLAY_DURATION).as_secs_f32() / FADE_DURATION.as_secs_f32();
            1.0 - fade
        } else {
            0.0
        }
    }

    /// True once the display period and fade have both elapsed; the host
    /// removes the element at this point.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= DISPLAY_DURATION + FADE_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice_at(shown_at: Instant) -> Notice {
        Notice {
            message: "Opened 3 tabs".to_string(),
            shown_at,
        }
    }

    #[test]
    fn fully_visible_while_displayed() {
        let start = Instant::now();
        let n = notice_at(start);
        assert_eq!(n.alpha_at(start), 1.0);
        assert_eq!(n.alpha_at(start + Duration::from_secs(2)), 1.0);
    }

    #[test]
    fn fades_after_display_period() {
        let start = Instant::now();
        let n = notice_at(start);
        // Halfway through the 300ms fade
        let alpha = n.alpha_at(start + Duration::from_millis(3150));
        assert!(alpha > 0.0 && alpha < 1.0, "expected mid-fade, got {alpha}");
    }

    #[test]
    fn gone_after_fade() {
        let start = Instant::now();
        let n = notice_at(start);
        assert_eq!(n.alpha_at(start + Duration::from_secs(4)), 0.0);
    }

    #[test]
    fn expiry_tracks_display_plus_fade() {
        let start = Instant::now();
        let n = notice_at(start);
        assert!(!n.is_expired(start + Duration::from_secs(3)));
        assert!(n.is_expired(start + Duration::from_millis(3300)));
    }
}
