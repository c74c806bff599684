// Swipe / tap / long-press / stateless pinch recognition
use std::cell::Cell;
use std::rc::Rc;
use yew::Callback;

use super::geometry;
use super::timer::{Clock, PendingTimer, Scheduler};
use super::touch::{PanOutcome, PanTracker};
use crate::model::{Gesture, Point, TouchEvent, TouchPhase, TouchPoint};

pub const SWIPE_DISTANCE_PX: f64 = 50.0;
pub const SWIPE_VELOCITY_PX_S: f64 = 300.0;
pub const DOUBLE_TAP_MS: f64 = 300.0;
pub const LONG_PRESS_MS: u32 = 800;
/// Finger distance that maps to a pinch scale of 1.0.
pub const PINCH_REFERENCE_PX: f64 = 100.0;
pub const PINCH_MIN_SCALE: f64 = 0.5;
pub const PINCH_MAX_SCALE: f64 = 3.0;

/// Optional consumers. A gesture with no consumer is never classified.
#[derive(Clone, Default, PartialEq)]
pub struct SwipeHandlers {
    pub on_swipe_left: Option<Callback<()>>,
    pub on_swipe_right: Option<Callback<()>>,
    pub on_pinch_zoom: Option<Callback<f64>>,
    pub on_double_tap: Option<Callback<()>>,
    pub on_long_press: Option<Callback<()>>,
}

impl SwipeHandlers {
    pub fn emit(&self, gesture: Gesture) {
        let unit = match gesture {
            Gesture::SwipeLeft => &self.on_swipe_left,
            Gesture::SwipeRight => &self.on_swipe_right,
            Gesture::DoubleTap => &self.on_double_tap,
            Gesture::LongPress => &self.on_long_press,
            Gesture::PinchZoom(scale) => {
                if let Some(cb) = &self.on_pinch_zoom {
                    cb.emit(scale);
                }
                return;
            }
        };
        if let Some(cb) = unit {
            cb.emit(());
        }
    }
}

/// Classifies a single view's touch stream into discrete gestures.
///
/// The `on_*` entry points mirror the pan/tap/touch lifecycle; [`handle`]
/// drives them from raw [`TouchEvent`]s. Classified gestures are returned
/// rather than emitted so the caller can release any borrow on the
/// recognizer first. Long-press is the exception: it fires from a timer and
/// emits [`Gesture::LongPress`] through the handlers captured when it was
/// armed.
///
/// [`handle`]: SwipeGestureRecognizer::handle
pub struct SwipeGestureRecognizer {
    handlers: SwipeHandlers,
    clock: Rc<dyn Clock>,
    scheduler: Rc<dyn Scheduler>,
    enabled: bool,
    last_tap_ms: Option<f64>,
    long_press: Option<PendingTimer>,
    long_press_active: Rc<Cell<bool>>,
    pan: PanTracker,
}

impl SwipeGestureRecognizer {
    pub fn new(clock: Rc<dyn Clock>, scheduler: Rc<dyn Scheduler>, handlers: SwipeHandlers) -> Self {
        Self {
            handlers,
            clock,
            scheduler,
            enabled: true,
            last_tap_ms: None,
            long_press: None,
            long_press_active: Rc::new(Cell::new(false)),
            pan: PanTracker::default(),
        }
    }

    pub fn handlers(&self) -> &SwipeHandlers {
        &self.handlers
    }

    pub fn set_handlers(&mut self, handlers: SwipeHandlers) {
        if handlers.on_long_press.is_none() {
            self.long_press = None;
        }
        self.handlers = handlers;
    }

    /// Capability flag; a disabled recognizer drops all in-flight state and
    /// ignores input until re-enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.long_press = None;
            self.long_press_active.set(false);
            self.last_tap_ms = None;
            self.pan.disarm();
        }
    }

    #[cfg(test)]
    pub fn is_long_press_active(&self) -> bool {
        self.long_press_active.get()
    }

    #[cfg(test)]
    pub fn has_pending_long_press(&self) -> bool {
        self.long_press.is_some()
    }

    pub fn on_pan_end(&mut self, offset: Point, velocity: Point) -> Option<Gesture> {
        if offset.x.abs() <= SWIPE_DISTANCE_PX && velocity.x.abs() <= SWIPE_VELOCITY_PX_S {
            return None;
        }
        let gesture = if offset.x > 0.0 && self.handlers.on_swipe_right.is_some() {
            Gesture::SwipeRight
        } else if offset.x < 0.0 && self.handlers.on_swipe_left.is_some() {
            Gesture::SwipeLeft
        } else {
            return None;
        };
        log::debug!("swipe: {:?} offset={:?} velocity={:?}", gesture, offset, velocity);
        Some(gesture)
    }

    pub fn on_tap(&mut self) -> Option<Gesture> {
        self.handlers.on_double_tap.as_ref()?;
        let now = self.clock.now_ms();
        let previous = self.last_tap_ms.replace(now);
        match previous {
            Some(last) if now - last < DOUBLE_TAP_MS => {
                log::debug!("double tap: {}ms apart", now - last);
                Some(Gesture::DoubleTap)
            }
            _ => None,
        }
    }

    pub fn on_touch_start(&mut self) {
        // Release any earlier timer before arming so only one can be pending.
        self.long_press = None;
        if self.handlers.on_long_press.is_none() {
            return;
        }
        let handlers = self.handlers.clone();
        let active = self.long_press_active.clone();
        self.long_press = PendingTimer::schedule(
            &self.scheduler,
            LONG_PRESS_MS,
            Box::new(move || {
                active.set(true);
                log::debug!("long press");
                handlers.emit(Gesture::LongPress);
            }),
        );
    }

    pub fn on_touch_end(&mut self) {
        self.long_press = None;
        self.long_press_active.set(false);
    }

    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) -> Option<Gesture> {
        self.handlers.on_pinch_zoom.as_ref()?;
        let (a, b) = geometry::pair(touches)?;
        let scale = (geometry::distance(a, b) / PINCH_REFERENCE_PX)
            .clamp(PINCH_MIN_SCALE, PINCH_MAX_SCALE);
        Some(Gesture::PinchZoom(scale))
    }

    /// Routes one typed touch event through the lifecycle entry points.
    pub fn handle(&mut self, event: &TouchEvent) -> Vec<Gesture> {
        let mut out = Vec::new();
        if !self.enabled {
            return out;
        }
        let touches = event.touches.as_slice();
        match event.phase {
            TouchPhase::Start => {
                self.on_touch_start();
                match touches {
                    [only] => self.pan.start(only, event.timestamp_ms),
                    _ => self.pan.disarm(),
                }
            }
            TouchPhase::Move => {
                out.extend(self.on_touch_move(touches));
                if let [only] = touches {
                    self.pan.update(only, event.timestamp_ms);
                }
            }
            TouchPhase::End => {
                self.on_touch_end();
                if touches.is_empty() {
                    match self.pan.finish(event.timestamp_ms) {
                        Some(PanOutcome::Tap) => out.extend(self.on_tap()),
                        Some(PanOutcome::Pan { offset, velocity }) => {
                            out.extend(self.on_pan_end(offset, velocity))
                        }
                        None => {}
                    }
                }
            }
            TouchPhase::Cancel => {
                self.on_touch_end();
                self.pan.disarm();
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::timer::manual::ManualScheduler;
    use std::cell::RefCell;

    fn all_handlers(log: &Rc<RefCell<Vec<String>>>) -> SwipeHandlers {
        let push = |name: &'static str| {
            let log = log.clone();
            Some(Callback::from(move |_: ()| log.borrow_mut().push(name.to_string())))
        };
        let pinch_log = log.clone();
        SwipeHandlers {
            on_swipe_left: push("left"),
            on_swipe_right: push("right"),
            on_pinch_zoom: Some(Callback::from(move |s: f64| {
                pinch_log.borrow_mut().push(format!("pinch {}", s))
            })),
            on_double_tap: push("double"),
            on_long_press: push("long"),
        }
    }

    fn recognizer(handlers: SwipeHandlers) -> (Rc<ManualScheduler>, SwipeGestureRecognizer) {
        let manual = ManualScheduler::new();
        let r = SwipeGestureRecognizer::new(manual.clone(), manual.clone(), handlers);
        (manual, r)
    }

    fn ev(phase: TouchPhase, t: f64, pts: &[(f64, f64)]) -> TouchEvent {
        let touches = pts
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| TouchPoint::new(i as i32, x, y))
            .collect();
        TouchEvent::new(phase, t, touches)
    }

    #[test]
    fn swipe_classification_by_offset_and_velocity() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (_, mut r) = recognizer(all_handlers(&log));
        let p = Point::new;
        assert_eq!(r.on_pan_end(p(-60.0, 0.0), p(0.0, 0.0)), Some(Gesture::SwipeLeft));
        assert_eq!(r.on_pan_end(p(60.0, 0.0), p(0.0, 0.0)), Some(Gesture::SwipeRight));
        assert_eq!(r.on_pan_end(p(10.0, 0.0), p(0.0, 0.0)), None);
        // Fast flick with small offset.
        assert_eq!(r.on_pan_end(p(10.0, 0.0), p(301.0, 0.0)), Some(Gesture::SwipeRight));
        assert_eq!(r.on_pan_end(p(-5.0, 0.0), p(-400.0, 0.0)), Some(Gesture::SwipeLeft));
        // Thresholds are strict.
        assert_eq!(r.on_pan_end(p(50.0, 0.0), p(300.0, 0.0)), None);
        assert_eq!(r.on_pan_end(p(-50.0, 0.0), p(-300.0, 0.0)), None);
        // Vertical movement never counts.
        assert_eq!(r.on_pan_end(p(0.0, 200.0), p(0.0, 900.0)), None);
        // Zero horizontal offset has no direction even when fast.
        assert_eq!(r.on_pan_end(p(0.0, 0.0), p(500.0, 0.0)), None);
    }

    #[test]
    fn swipe_without_consumer_is_not_classified() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut handlers = all_handlers(&log);
        handlers.on_swipe_left = None;
        let (_, mut r) = recognizer(handlers);
        assert_eq!(r.on_pan_end(Point::new(-80.0, 0.0), Point::ZERO), None);
        assert_eq!(r.on_pan_end(Point::new(80.0, 0.0), Point::ZERO), Some(Gesture::SwipeRight));
    }

    #[test]
    fn double_tap_window_is_exclusive() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (clock, mut r) = recognizer(all_handlers(&log));
        assert_eq!(r.on_tap(), None);
        clock.advance(299.0);
        assert_eq!(r.on_tap(), Some(Gesture::DoubleTap));
        clock.advance(300.0);
        assert_eq!(r.on_tap(), None);
    }

    #[test]
    fn third_rapid_tap_is_measured_against_second() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (clock, mut r) = recognizer(all_handlers(&log));
        assert_eq!(r.on_tap(), None);
        clock.advance(100.0);
        assert_eq!(r.on_tap(), Some(Gesture::DoubleTap));
        clock.advance(100.0);
        assert_eq!(r.on_tap(), Some(Gesture::DoubleTap));
    }

    #[test]
    fn long_press_fires_once_after_delay() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (clock, mut r) = recognizer(all_handlers(&log));
        r.on_touch_start();
        clock.advance(799.0);
        assert!(log.borrow().is_empty());
        assert!(!r.is_long_press_active());
        clock.advance(1.0);
        assert_eq!(*log.borrow(), vec!["long".to_string()]);
        assert!(r.is_long_press_active());
        clock.advance(5000.0);
        assert_eq!(log.borrow().len(), 1);
        r.on_touch_end();
        assert!(!r.is_long_press_active());
    }

    #[test]
    fn touch_end_cancels_long_press() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (clock, mut r) = recognizer(all_handlers(&log));
        r.on_touch_start();
        clock.advance(500.0);
        r.on_touch_end();
        assert_eq!(clock.pending(), 0);
        clock.advance(2000.0);
        assert!(log.borrow().is_empty());
        // Idempotent.
        r.on_touch_end();
        assert!(!r.is_long_press_active());
    }

    #[test]
    fn new_touch_start_replaces_pending_timer() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (clock, mut r) = recognizer(all_handlers(&log));
        r.on_touch_start();
        clock.advance(600.0);
        r.on_touch_start();
        assert_eq!(clock.pending(), 1);
        clock.advance(600.0);
        assert!(log.borrow().is_empty());
        clock.advance(200.0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn no_long_press_timer_without_handler() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut handlers = all_handlers(&log);
        handlers.on_long_press = None;
        let (clock, mut r) = recognizer(handlers);
        r.on_touch_start();
        assert_eq!(clock.pending(), 0);
        assert!(!r.has_pending_long_press());
    }

    #[test]
    fn dropping_recognizer_cancels_timer() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (clock, mut r) = recognizer(all_handlers(&log));
        r.on_touch_start();
        drop(r);
        assert_eq!(clock.pending(), 0);
        clock.advance(1000.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn stateless_pinch_scale_is_clamped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (_, mut r) = recognizer(all_handlers(&log));
        let two = |d: f64| [TouchPoint::new(0, 0.0, 0.0), TouchPoint::new(1, d, 0.0)];
        assert_eq!(r.on_touch_move(&two(400.0)), Some(Gesture::PinchZoom(3.0)));
        assert_eq!(r.on_touch_move(&two(10.0)), Some(Gesture::PinchZoom(0.5)));
        assert_eq!(r.on_touch_move(&two(150.0)), Some(Gesture::PinchZoom(1.5)));
        assert_eq!(r.on_touch_move(&two(400.0)[..1]), None);
    }

    #[test]
    fn handle_drives_swipe_from_touch_stream() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (_, mut r) = recognizer(all_handlers(&log));
        assert!(r.handle(&ev(TouchPhase::Start, 0.0, &[(300.0, 100.0)])).is_empty());
        r.handle(&ev(TouchPhase::Move, 40.0, &[(260.0, 102.0)]));
        r.handle(&ev(TouchPhase::Move, 80.0, &[(220.0, 104.0)]));
        let out = r.handle(&ev(TouchPhase::End, 120.0, &[]));
        assert_eq!(out, vec![Gesture::SwipeLeft]);
        assert!(!r.has_pending_long_press());
    }

    #[test]
    fn handle_turns_quick_touches_into_double_tap() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (clock, mut r) = recognizer(all_handlers(&log));
        r.handle(&ev(TouchPhase::Start, 0.0, &[(50.0, 50.0)]));
        assert!(r.handle(&ev(TouchPhase::End, 60.0, &[])).is_empty());
        clock.advance(150.0);
        r.handle(&ev(TouchPhase::Start, 150.0, &[(51.0, 50.0)]));
        let out = r.handle(&ev(TouchPhase::End, 200.0, &[]));
        assert_eq!(out, vec![Gesture::DoubleTap]);
    }

    #[test]
    fn cancel_never_yields_tap_or_swipe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (_, mut r) = recognizer(all_handlers(&log));
        r.handle(&ev(TouchPhase::Start, 0.0, &[(300.0, 100.0)]));
        r.handle(&ev(TouchPhase::Move, 40.0, &[(100.0, 100.0)]));
        assert!(r.handle(&ev(TouchPhase::Cancel, 50.0, &[])).is_empty());
        assert!(r.handle(&ev(TouchPhase::End, 60.0, &[])).is_empty());
    }

    #[test]
    fn disabled_recognizer_ignores_input() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (clock, mut r) = recognizer(all_handlers(&log));
        r.handle(&ev(TouchPhase::Start, 0.0, &[(0.0, 0.0)]));
        assert!(r.has_pending_long_press());
        r.set_enabled(false);
        assert_eq!(clock.pending(), 0);
        assert!(r.handle(&ev(TouchPhase::Start, 10.0, &[(0.0, 0.0)])).is_empty());
        assert!(!r.has_pending_long_press());
        clock.advance(1000.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn emit_routes_to_matching_handler() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handlers = all_handlers(&log);
        handlers.emit(Gesture::SwipeRight);
        handlers.emit(Gesture::PinchZoom(2.5));
        handlers.emit(Gesture::DoubleTap);
        handlers.emit(Gesture::LongPress);
        assert_eq!(
            *log.borrow(),
            vec![
                "right".to_string(),
                "pinch 2.5".to_string(),
                "double".to_string(),
                "long".to_string()
            ]
        );
    }

    #[test]
    fn stationary_release_after_short_drag_is_not_a_swipe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handlers = SwipeHandlers {
            on_swipe_left: all_handlers(&log).on_swipe_left,
            ..SwipeHandlers::default()
        };
        let (_, mut r) = recognizer(handlers);
        r.handle(&ev(TouchPhase::Start, 0.0, &[(100.0, 100.0)]));
        r.handle(&ev(TouchPhase::Move, 20.0, &[(60.0, 100.0)]));
        // Finger rests for almost two seconds before lifting.
        assert!(r.handle(&ev(TouchPhase::End, 2000.0, &[])).is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn quick_release_after_short_flick_is_a_swipe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (_, mut r) = recognizer(all_handlers(&log));
        r.handle(&ev(TouchPhase::Start, 0.0, &[(100.0, 100.0)]));
        r.handle(&ev(TouchPhase::Move, 20.0, &[(60.0, 100.0)]));
        assert_eq!(r.handle(&ev(TouchPhase::End, 30.0, &[])), vec![Gesture::SwipeLeft]);
    }

    #[test]
    fn long_press_uses_handlers_present_when_armed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (clock, mut r) = recognizer(all_handlers(&log));
        r.on_touch_start();
        let later = Rc::new(RefCell::new(Vec::new()));
        // Replacing handlers mid-press keeps the armed timer on the old set.
        r.set_handlers(all_handlers(&later));
        clock.advance(LONG_PRESS_MS as f64);
        assert_eq!(*log.borrow(), vec!["long".to_string()]);
        assert!(later.borrow().is_empty());
    }
}
