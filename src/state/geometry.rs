// Distance/midpoint helpers shared by both recognizers
use crate::model::{Point, TouchPoint};

pub fn distance(a: &TouchPoint, b: &TouchPoint) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

pub fn midpoint(a: &TouchPoint, b: &TouchPoint) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Returns the two contacts of a two-finger event, or `None` for any other count.
pub fn pair(touches: &[TouchPoint]) -> Option<(&TouchPoint, &TouchPoint)> {
    match touches {
        [a, b] => Some((a, b)),
        _ => None,
    }
}
