//! Pointer state and gesture classification.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Pointer travel under which a press still counts as stationary.
pub const TAP_SLOP: f64 = 8.0;

/// Hold time at which a stationary press becomes a long press.
pub const LONG_PRESS_DURATION: Duration = Duration::from_millis(500);

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// How a completed press is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    Tap,
    LongPress,
    Drag,
}

/// Classify a press from the farthest distance the pointer strayed from the
/// press point and how long it was held.
pub fn classify(travel: f64, held: Duration) -> Gesture {
    if travel >= TAP_SLOP {
        Gesture::Drag
    } else if held >= LONG_PRESS_DURATION {
        Gesture::LongPress
    } else {
        Gesture::Tap
    }
}

/// Tracks the pointer across a press.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position.
    pub pointer_position: Point,
    /// Where the current press started.
    pub press_start: Option<Point>,
    press_time: Option<Instant>,
    /// Farthest distance from `press_start` during the current press.
    max_travel: f64,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.press_start.is_some()
    }

    /// Process a pointer event stamped with the current time.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<Gesture> {
        self.handle_pointer_event_at(event, Instant::now())
    }

    /// Process a pointer event stamped with `now`.
    ///
    /// Returns the classified gesture when a press ends.
    pub fn handle_pointer_event_at(&mut self, event: PointerEvent, now: Instant) -> Option<Gesture> {
        self.pointer_position = event.position();

        match event {
            PointerEvent::Down { position } => {
                self.press_start = Some(position);
                self.press_time = Some(now);
                self.max_travel = 0.0;
                None
            }
            PointerEvent::Move { position } => {
                if let Some(start) = self.press_start {
                    self.max_travel = self.max_travel.max(start.distance(position));
                }
                None
            }
            PointerEvent::Up { position } => {
                let start = self.press_start.take()?;
                let travel = self.max_travel.max(start.distance(position));
                let held = self
                    .press_time
                    .take()
                    .map(|t| now.saturating_duration_since(t))
                    .unwrap_or_default();
                self.max_travel = 0.0;
                Some(classify(travel, held))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    fn moved(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_quick_press_is_tap() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        input.handle_pointer_event_at(down(100.0, 100.0), t0);
        assert!(input.is_pressed());
        let gesture = input.handle_pointer_event_at(up(103.0, 101.0), t0 + Duration::from_millis(120));
        assert_eq!(gesture, Some(Gesture::Tap));
        assert!(!input.is_pressed());
    }

    #[test]
    fn test_held_press_is_long_press() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        input.handle_pointer_event_at(down(0.0, 0.0), t0);
        let gesture = input.handle_pointer_event_at(up(1.0, 0.0), t0 + Duration::from_millis(500));
        assert_eq!(gesture, Some(Gesture::LongPress));
    }

    #[test]
    fn test_out_and_back_is_drag() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        input.handle_pointer_event_at(down(0.0, 0.0), t0);
        input.handle_pointer_event_at(moved(30.0, 0.0), t0);
        // Released where it started, but it travelled.
        let gesture = input.handle_pointer_event_at(up(0.0, 0.0), t0 + Duration::from_millis(50));
        assert_eq!(gesture, Some(Gesture::Drag));
    }

    #[test]
    fn test_up_without_down() {
        let mut input = InputState::new();
        assert_eq!(input.handle_pointer_event(up(5.0, 5.0)), None);
    }

    #[test]
    fn test_press_tracking() {
        let mut input = InputState::new();
        input.handle_pointer_event(down(100.0, 100.0));
        input.handle_pointer_event(moved(150.0, 120.0));
        assert_eq!(input.press_start, Some(Point::new(100.0, 100.0)));
        assert_eq!(input.pointer_position, Point::new(150.0, 120.0));
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(7.9, Duration::from_millis(499)), Gesture::Tap);
        assert_eq!(classify(8.0, Duration::from_millis(10)), Gesture::Drag);
        assert_eq!(classify(0.0, LONG_PRESS_DURATION), Gesture::LongPress);
    }
}
