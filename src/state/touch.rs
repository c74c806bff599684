// Single-finger pan tracking: turns a raw touch stream into pan offset/velocity
use std::collections::VecDeque;

use crate::model::{Point, TouchPoint};

/// Movement (px) from the first contact before a sequence counts as a pan.
pub const PAN_THRESHOLD_PX: f64 = 3.0;
/// Samples older than this (relative to the newest, or to the release) are
/// ignored for velocity.
pub const VELOCITY_WINDOW_MS: f64 = 100.0;

/// How a finished single-finger sequence should be read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanOutcome {
    Tap,
    Pan { offset: Point, velocity: Point },
}

#[derive(Default, Debug, Clone)]
pub struct PanTracker {
    pub active: bool,
    pub panning: bool,
    start: Point,
    last: Point,
    samples: VecDeque<(f64, Point)>,
}

impl PanTracker {
    pub fn start(&mut self, touch: &TouchPoint, timestamp_ms: f64) {
        self.active = true;
        self.panning = false;
        self.start = touch.position();
        self.last = self.start;
        self.samples.clear();
        self.samples.push_back((timestamp_ms, self.start));
    }

    pub fn update(&mut self, touch: &TouchPoint, timestamp_ms: f64) {
        if !self.active {
            return;
        }
        let p = touch.position();
        self.last = p;
        if !self.panning {
            let d = p - self.start;
            if (d.x * d.x + d.y * d.y).sqrt() > PAN_THRESHOLD_PX {
                self.panning = true;
            }
        }
        self.samples.push_back((timestamp_ms, p));
        while let Some(&(t, _)) = self.samples.front() {
            if timestamp_ms - t > VELOCITY_WINDOW_MS && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn offset(&self) -> Point {
        self.last - self.start
    }

    /// Pixels per second over the samples inside the window ending at
    /// `now_ms`. A finger that has rested longer than the window reads as
    /// stopped.
    pub fn velocity_at(&self, now_ms: f64) -> Point {
        let mut recent = self
            .samples
            .iter()
            .filter(|&&(t, _)| now_ms - t <= VELOCITY_WINDOW_MS);
        let first = recent.next();
        let last = recent.last().or(first);
        match (first, last) {
            (Some(&(t0, p0)), Some(&(t1, p1))) if t1 > t0 => {
                let secs = (t1 - t0) / 1000.0;
                let d = p1 - p0;
                Point::new(d.x / secs, d.y / secs)
            }
            _ => Point::ZERO,
        }
    }

    /// Abandons the sequence without an outcome (second finger, cancel).
    pub fn disarm(&mut self) {
        self.active = false;
        self.panning = false;
        self.samples.clear();
    }

    /// Ends the sequence at the release time `timestamp_ms`.
    pub fn finish(&mut self, timestamp_ms: f64) -> Option<PanOutcome> {
        if !self.active {
            return None;
        }
        let outcome = if self.panning {
            PanOutcome::Pan {
                offset: self.offset(),
                velocity: self.velocity_at(timestamp_ms),
            }
        } else {
            PanOutcome::Tap
        };
        self.disarm();
        Some(outcome)
    }
}
