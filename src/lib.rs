//! Library exports for the fraud-scoring form app and its tests.
/// Application directory resolution.
pub mod app_dirs;
/// TOML configuration.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Schema-driven form engine.
pub mod form;
pub(crate) mod http_client;
/// File and console logging.
pub mod logging;
/// Client for the scoring service.
pub mod scoring;
