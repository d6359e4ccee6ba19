//! Desktop client for a remote text-to-video generation service.
//!
//! * [`form`] — submission form buffers, options, example texts.
//! * [`orchestrator`] — UI state and the submit → request → settle cycle.
//! * [`client`] — HTTP/JSON client for the generation service.
//! * [`render`] — media locator resolution and playback description.
//! * [`config`] — TOML settings.
//! * [`app`] — the egui window.

pub mod app;
pub mod client;
pub mod config;
pub mod form;
pub mod orchestrator;
pub mod render;
