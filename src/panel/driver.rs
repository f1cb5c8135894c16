//! The panel driver contract.

use eink_render::QuantizedImage;
use thiserror::Error;

use super::Framebuffer;

/// A hardware fault while talking to the panel.
///
/// Faults are contained by the session: logged, never propagated as a
/// process failure.
#[derive(Debug, Error)]
pub enum DeviceFault {
    #[error("Device I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Device unreachable: {0}")]
    Unreachable(String),

    #[error("Framebuffer error: {0}")]
    Buffer(String),
}

/// Capability to drive one physical (or simulated) panel.
///
/// Implementations only need to move bytes; ordering, settle timing and
/// cancellation are the session's job.
pub trait PanelDriver {
    /// Power up and configure the controller.
    fn init(&mut self) -> Result<(), DeviceFault>;

    /// Wipe whatever the panel currently shows.
    fn clear(&mut self) -> Result<(), DeviceFault>;

    /// Encode a quantized image for this panel.
    ///
    /// The default is the 7.3" "F" layout, 4 bits per pixel.
    fn get_buffer(&self, image: &QuantizedImage) -> Result<Framebuffer, DeviceFault> {
        Framebuffer::pack(image)
    }

    /// Push a frame. The only call with a visible effect.
    fn display(&mut self, frame: &Framebuffer) -> Result<(), DeviceFault>;

    /// Put the panel into its low-power hold state.
    fn sleep(&mut self) -> Result<(), DeviceFault>;

    /// Out-of-band module exit, used on interruption.
    fn force_exit(&mut self, cleanup: bool) -> Result<(), DeviceFault>;
}
