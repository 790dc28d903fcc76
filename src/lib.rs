//! Library exports for reuse in integration tests.
/// Prediction service wire types and client.
pub mod api;
/// Application directory helpers.
pub mod app_dirs;
/// Stateful chart models and painting.
pub mod charts;
/// TOML configuration.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// HTTP agent construction and bounded reads.
mod http_client;
/// Questionnaire input collection.
pub mod inputs;
/// Logging setup.
pub mod logging;
/// Mapping of settled predictions onto the results surface.
pub mod presenter;
