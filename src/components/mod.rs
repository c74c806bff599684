pub mod app;
pub mod pinch_zoom_view;
pub mod result_card;
pub mod swipe_area;
pub mod viewport;
