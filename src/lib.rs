pub mod app;
pub mod bot;
pub mod catalog;
pub mod config;
pub mod models;
pub mod orders;
pub mod storefront;
pub mod telemetry;
pub mod util;
