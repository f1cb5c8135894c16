//! Panel driver contract, frame packing and the display session.

pub mod driver;
pub mod framebuffer;
pub mod preview;
pub mod session;

pub use driver::{DeviceFault, PanelDriver};
pub use framebuffer::{Framebuffer, FRAME_LEN};
pub use preview::PreviewPanel;
pub use session::{
    Operation, PanelSession, PanelState, SessionError, SessionOutcome, INTERRUPTED_EXIT_CODE,
    SETTLE_DELAY,
};
