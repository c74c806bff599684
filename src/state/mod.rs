pub mod geometry;
pub mod pinch_zoom;
pub mod swipe;
pub mod timer;
pub mod touch;

pub use pinch_zoom::{PinchZoomController, ZoomBounds};
pub use swipe::{SwipeGestureRecognizer, SwipeHandlers};
pub use timer::{BrowserClock, BrowserScheduler, Clock, Scheduler};
