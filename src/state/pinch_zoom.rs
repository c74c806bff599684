// Continuous pinch-zoom and pan-while-zoomed state
use serde::{Deserialize, Serialize};

use super::geometry;
use super::swipe::DOUBLE_TAP_MS;
use super::touch::PAN_THRESHOLD_PX;
use crate::model::{Point, TouchEvent, TouchPhase, TouchPoint, Transform};

pub const DEFAULT_MIN_ZOOM: f64 = 0.5;
pub const DEFAULT_MAX_ZOOM: f64 = 3.0;
/// Scale applied when double activation zooms in from 1.0.
pub const TOGGLE_ZOOM: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_ZOOM,
            max: DEFAULT_MAX_ZOOM,
        }
    }
}

impl ZoomBounds {
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

/// Tracks scale and translation across a multi-event gesture. Each move is
/// measured against the previous one, not against the gesture start.
///
/// Methods that change the scale return the new value; the owner forwards it
/// to its `on_zoom_change` consumer. Two single-finger taps less than
/// `DOUBLE_TAP_MS` apart in the touch stream count as a double activation.
#[derive(Debug, Clone)]
pub struct PinchZoomController {
    bounds: ZoomBounds,
    scale: f64,
    translation: Point,
    is_panning: bool,
    last_pinch_distance: f64,
    last_centroid: Point,
    /// Start of a single-finger touch that may still be a tap.
    tap_start: Option<Point>,
    last_tap_ms: Option<f64>,
}

impl Default for PinchZoomController {
    fn default() -> Self {
        Self::new(ZoomBounds::default())
    }
}

impl PinchZoomController {
    pub fn new(bounds: ZoomBounds) -> Self {
        Self {
            bounds,
            scale: bounds.clamp(1.0),
            translation: Point::ZERO,
            is_panning: false,
            last_pinch_distance: 0.0,
            last_centroid: Point::ZERO,
            tap_start: None,
            last_tap_ms: None,
        }
    }

    #[cfg(test)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[cfg(test)]
    pub fn translation(&self) -> Point {
        self.translation
    }

    #[cfg(test)]
    pub fn is_panning(&self) -> bool {
        self.is_panning
    }

    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    pub fn transform(&self) -> Transform {
        Transform {
            scale: self.scale,
            translation: self.translation,
        }
    }

    pub fn set_bounds(&mut self, bounds: ZoomBounds) {
        self.bounds = bounds;
        self.scale = bounds.clamp(self.scale);
    }

    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) {
        match touches {
            [only] => {
                self.is_panning = true;
                self.last_centroid = only.position();
            }
            [a, b] => {
                self.is_panning = false;
                self.last_pinch_distance = geometry::distance(a, b);
                self.last_centroid = geometry::midpoint(a, b);
            }
            _ => {}
        }
    }

    /// Returns the new scale when a pinch step changed it.
    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) -> Option<f64> {
        match touches {
            [a, b] => {
                let distance = geometry::distance(a, b);
                let centroid = geometry::midpoint(a, b);
                let mut changed = None;
                if self.last_pinch_distance > 0.0 {
                    let step = distance / self.last_pinch_distance;
                    self.scale = self.bounds.clamp(self.scale * step);
                    changed = Some(self.scale);
                }
                self.last_pinch_distance = distance;
                self.last_centroid = centroid;
                changed
            }
            [only] if self.is_panning && self.scale > 1.0 => {
                let p = only.position();
                self.translation += p - self.last_centroid;
                self.last_centroid = p;
                None
            }
            _ => None,
        }
    }

    pub fn on_touch_end(&mut self) {
        self.is_panning = false;
        self.last_pinch_distance = 0.0;
    }

    /// Double-tap / double-click: zoom to 2x from 1x, otherwise back to 1x.
    pub fn on_double_activate(&mut self) -> f64 {
        if self.scale == 1.0 {
            self.scale = self.bounds.clamp(TOGGLE_ZOOM);
        } else {
            self.scale = self.bounds.clamp(1.0);
            self.translation = Point::ZERO;
        }
        log::debug!("zoom toggled to {}", self.scale);
        self.scale
    }

    fn track_tap(&mut self, event: &TouchEvent) -> bool {
        match (event.phase, event.touches.as_slice()) {
            (TouchPhase::Start, [only]) => {
                self.tap_start = Some(only.position());
            }
            (TouchPhase::Start, _) | (TouchPhase::Cancel, _) => self.tap_start = None,
            (TouchPhase::Move, [only]) => {
                if let Some(start) = self.tap_start {
                    let d = only.position() - start;
                    if d.x.hypot(d.y) > PAN_THRESHOLD_PX {
                        self.tap_start = None;
                    }
                }
            }
            (TouchPhase::Move, _) => self.tap_start = None,
            (TouchPhase::End, []) => {
                if self.tap_start.take().is_none() {
                    return false;
                }
                let now = event.timestamp_ms;
                match self.last_tap_ms.replace(now) {
                    Some(last) if now - last < DOUBLE_TAP_MS => {
                        self.last_tap_ms = None;
                        return true;
                    }
                    _ => {}
                }
            }
            (TouchPhase::End, _) => self.tap_start = None,
        }
        false
    }

    /// Returns the new scale when the event changed it: a pinch step, or a
    /// completed double tap.
    pub fn handle(&mut self, event: &TouchEvent) -> Option<f64> {
        let double_tap = self.track_tap(event);
        match event.phase {
            TouchPhase::Start => {
                self.on_touch_start(&event.touches);
                None
            }
            TouchPhase::Move => self.on_touch_move(&event.touches),
            TouchPhase::End | TouchPhase::Cancel => {
                self.on_touch_end();
                double_tap.then(|| self.on_double_activate())
            }
        }
    }
}
