pub mod config;
pub mod engine_adapter;

pub use config::{AppConfig, Settings};
pub use engine_adapter::CliEngine;
