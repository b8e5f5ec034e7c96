// Application layer - Refresh orchestration shared by every widget
pub mod controller;
pub mod fetcher;
pub mod scheduler;
