// Presentation layer - HTTP surface over widget snapshots
pub mod app_state;
pub mod handlers;
