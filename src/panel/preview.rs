//! A simulated panel that writes frames to disk.

use std::path::{Path, PathBuf};

use eink_render::PanelColor;

use super::{DeviceFault, Framebuffer, PanelDriver};

/// File name the current frame is written to.
pub const FRAME_FILE: &str = "frame.png";

/// Panel stand-in for machines without the display attached.
///
/// Every pushed frame is decoded back to inks and saved as a PNG in the
/// preview directory, so the output matches what the panel would show
/// (rotation included).
#[derive(Debug, Clone)]
pub struct PreviewPanel {
    dir: PathBuf,
    powered: bool,
}

impl PreviewPanel {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            powered: false,
        }
    }

    pub fn frame_path(&self) -> PathBuf {
        self.dir.join(FRAME_FILE)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_frame(&self, frame: &Framebuffer) -> Result<(), DeviceFault> {
        if !self.powered {
            return Err(DeviceFault::Unreachable("preview panel not initialized".into()));
        }

        let image = frame.unpack()?.to_rgb_image();
        image
            .save(self.frame_path())
            .map_err(|e| DeviceFault::Io(std::io::Error::other(e)))?;
        Ok(())
    }
}

impl PanelDriver for PreviewPanel {
    fn init(&mut self) -> Result<(), DeviceFault> {
        std::fs::create_dir_all(&self.dir)?;
        self.powered = true;
        tracing::info!(dir = %self.dir.display(), "Preview panel ready");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DeviceFault> {
        self.write_frame(&Framebuffer::filled(PanelColor::White))
    }

    fn display(&mut self, frame: &Framebuffer) -> Result<(), DeviceFault> {
        self.write_frame(frame)?;
        tracing::info!(path = %self.frame_path().display(), bytes = frame.len(), "Frame written");
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DeviceFault> {
        self.powered = false;
        tracing::debug!("Preview panel asleep");
        Ok(())
    }

    fn force_exit(&mut self, cleanup: bool) -> Result<(), DeviceFault> {
        self.powered = false;
        tracing::debug!(cleanup, "Preview panel module exit");
        Ok(())
    }
}
