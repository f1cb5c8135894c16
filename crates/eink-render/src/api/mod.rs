//! Public API for the eink-render crate.
//!
//! This module provides the high-level API: [`PanelRenderer`] builder and
//! [`RenderError`] unified error type.

mod builder;
mod error;

pub use builder::PanelRenderer;
pub use error::RenderError;
