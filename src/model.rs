//! Core data models for touch gesture handling.
//! Touch input is converted into these types once, at the DOM boundary, and
//! everything downstream works on them instead of raw `web_sys` events.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One active contact within a single event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Platform-assigned identifier, stable across one contact sequence.
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub const fn new(id: i32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl TouchPhase {
    pub fn from_dom_type(kind: &str) -> Option<Self> {
        match kind {
            "touchstart" => Some(Self::Start),
            "touchmove" => Some(Self::Move),
            "touchend" => Some(Self::End),
            "touchcancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub timestamp_ms: f64,
    /// Contacts still on the surface after this change, in platform order.
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, timestamp_ms: f64, touches: Vec<TouchPoint>) -> Self {
        Self {
            phase,
            timestamp_ms,
            touches,
        }
    }

    /// Builds a typed event from a DOM touch event. Coordinates are made
    /// relative to `origin` (the listening element's top-left corner).
    /// Returns `None` for event types we do not handle.
    pub fn from_dom(e: &web_sys::TouchEvent, origin: Point) -> Option<Self> {
        let phase = TouchPhase::from_dom_type(&e.type_())?;
        let list = e.touches();
        let mut touches = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(t) = list.item(i) {
                touches.push(TouchPoint::new(
                    t.identifier(),
                    t.client_x() as f64 - origin.x,
                    t.client_y() as f64 - origin.y,
                ));
            }
        }
        Some(Self::new(phase, e.time_stamp(), touches))
    }
}

/// A discrete gesture produced by the swipe recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    SwipeLeft,
    SwipeRight,
    DoubleTap,
    LongPress,
    PinchZoom(f64),
}

/// Scale and translation applied to zoomable content.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: f64,
    pub translation: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translation: Point::ZERO,
        }
    }
}

impl Transform {
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translation.x, self.translation.y, self.scale
        )
    }
}
