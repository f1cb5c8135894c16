//! Inkframe
//!
//! Weather-conditioned paintings on a seven-color e-paper panel.
//! This library exposes modules for integration testing.

pub mod display;
pub mod error;
pub mod models;
pub mod panel;
pub mod services;
