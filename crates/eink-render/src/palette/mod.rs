//! Panel colors and the fixed seven-color palette.
//!
//! The panel can only show seven inks. [`PanelColor`] names them and
//! [`Palette`] is an ordered, duplicate-free selection of them used for
//! nearest-color matching during dithering.

mod palette;

pub use palette::{PanelColor, Palette};
