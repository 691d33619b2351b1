//! Process setup shared by askroom services: logging, health checks, metrics and the HTTP server.

mod infra;
mod logging;

pub mod app;
pub mod health;

pub use infra::*;
