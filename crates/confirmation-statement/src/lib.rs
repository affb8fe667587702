pub mod config;
pub mod error;
pub mod filing;
pub mod services;
pub mod session;
pub mod telemetry;
pub mod web;
