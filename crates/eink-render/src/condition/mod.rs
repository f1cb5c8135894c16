//! Image conditioning for the panel.
//!
//! Turns an arbitrary decoded image into a [`ConditionedImage`]: exactly
//! panel-sized, RGB8, with the optional brightness compensation applied.
//!
//! 1. **Resize** ([`ResizeMethod::Fit`] or [`ResizeMethod::Pad`])
//! 2. **Normalize** to three 8-bit channels
//! 3. **Enhance** (contrast, then brightness) when `brightness > 1`
//!
//! Nothing here touches hardware. Decode failures are reported before any
//! pixel work starts.

mod conditioner;
mod enhance;
mod options;
mod resize;

pub use conditioner::{condition, decode, open, ConditionedImage};
pub use enhance::{adjust_brightness, brightness, contrast, mean_luma};
pub use options::{ConditionOptions, ResizeMethod};
pub use resize::{resize_to, PAD_COLOR};
