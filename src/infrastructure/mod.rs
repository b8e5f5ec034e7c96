// Infrastructure layer - External APIs, HTTP plumbing, configuration
pub mod catalog;
pub mod config;
pub mod crypto;
pub mod currency;
pub mod geolocate;
pub mod http;
pub mod location;
pub mod news;
pub mod weather;
pub mod world_clock;
