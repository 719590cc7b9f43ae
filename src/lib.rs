//! umplot: interactive 2D plot viewport engine.
//!
//! The crate maps an unbounded graph coordinate space onto a pixel client
//! rect, mutates that mapping from pointer input (pan, rectangle zoom, zoom
//! reset, resize) and plans adaptive grid ticks. Drawing and windowing are
//! delegated to a [`render::Renderer`] and an [`api::Platform`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{PlotData, PlotSession, Series, SessionStatus, Style, run_interactive_session};
pub use error::{PlotError, PlotResult};
