pub mod config;
pub mod credentials;
pub mod error;
pub mod service;
pub mod telemetry;
