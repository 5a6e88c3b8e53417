/// Minimum horizontal travel, in pixels, for a touch gesture to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// A navigation request, independent of the input channel it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    GoTo(isize),
    Last,
}

/// Keys the arbiter understands. Anything else never reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    PageDown,
    PageUp,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyResponse {
    pub intent: Intent,
    /// Whether the host should swallow the key's default scrolling behaviour.
    pub suppress_default: bool,
}

/// Clickable navigation affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Previous,
    Next,
    Indicator(usize),
}

pub fn key_response(key: Key) -> KeyResponse {
    let (intent, suppress_default) = match key {
        Key::ArrowRight | Key::PageDown => (Intent::Next, true),
        Key::ArrowLeft | Key::PageUp => (Intent::Previous, true),
        Key::Home => (Intent::GoTo(0), false),
        Key::End => (Intent::Last, false),
    };
    KeyResponse {
        intent,
        suppress_default,
    }
}

pub fn click_intent(target: Affordance) -> Intent {
    match target {
        Affordance::Previous => Intent::Previous,
        Affordance::Next => Intent::Next,
        Affordance::Indicator(i) => Intent::GoTo(i as isize),
    }
}

/// Turns touch start/end pairs into swipe intents.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the gesture. Horizontal travel beyond the threshold that also
    /// dominates vertical travel is a swipe: leftwards goes forward.
    /// Taps and vertical scrolls produce nothing. The start point is
    /// forgotten either way.
    pub fn end(&mut self, x: f32, y: f32) -> Option<Intent> {
        let (start_x, start_y) = self.start.take()?;
        let dx = x - start_x;
        let dy = y - start_y;

        if dx.abs() > SWIPE_THRESHOLD && dx.abs() > dy.abs() {
            if dx < 0.0 {
                Some(Intent::Next)
            } else {
                Some(Intent::Previous)
            }
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(dx: f32, dy: f32) -> Option<Intent> {
        let mut tracker = SwipeTracker::default();
        tracker.begin(200.0, 300.0);
        tracker.end(200.0 + dx, 300.0 + dy)
    }

    #[test]
    fn test_paging_keys_suppress_default() {
        for key in [Key::ArrowRight, Key::PageDown] {
            assert_eq!(
                key_response(key),
                KeyResponse {
                    intent: Intent::Next,
                    suppress_default: true
                }
            );
        }
        for key in [Key::ArrowLeft, Key::PageUp] {
            assert_eq!(
                key_response(key),
                KeyResponse {
                    intent: Intent::Previous,
                    suppress_default: true
                }
            );
        }
    }

    #[test]
    fn test_home_end_keep_default() {
        let home = key_response(Key::Home);
        assert_eq!(home.intent, Intent::GoTo(0));
        assert!(!home.suppress_default);

        let end = key_response(Key::End);
        assert_eq!(end.intent, Intent::Last);
        assert!(!end.suppress_default);
    }

    #[test]
    fn test_clicks() {
        assert_eq!(click_intent(Affordance::Previous), Intent::Previous);
        assert_eq!(click_intent(Affordance::Next), Intent::Next);
        assert_eq!(click_intent(Affordance::Indicator(3)), Intent::GoTo(3));
    }

    #[test]
    fn test_swipe_left_goes_forward() {
        assert_eq!(swipe(-60.0, 5.0), Some(Intent::Next));
    }

    #[test]
    fn test_swipe_right_goes_back() {
        assert_eq!(swipe(60.0, 5.0), Some(Intent::Previous));
    }

    #[test]
    fn test_short_or_vertical_gestures_are_ignored() {
        assert_eq!(swipe(30.0, 40.0), None);
        assert_eq!(swipe(50.0, 0.0), None);
        assert_eq!(swipe(-80.0, 120.0), None);
        assert_eq!(swipe(0.0, 0.0), None);
    }

    #[test]
    fn test_end_without_start_is_ignored() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.end(0.0, 0.0), None);
    }

    #[test]
    fn test_start_is_reset_after_every_gesture() {
        let mut tracker = SwipeTracker::default();
        tracker.begin(100.0, 100.0);
        assert_eq!(tracker.end(105.0, 100.0), None);
        assert_eq!(tracker.start, None);

        // A second end without a new start must not reuse the old origin.
        assert_eq!(tracker.end(-500.0, 100.0), None);
    }
}
