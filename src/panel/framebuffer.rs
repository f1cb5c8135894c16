//! Packed frame data for the 7.3" "F" panel.
//!
//! Two pixels per byte, first pixel in the high nibble. Nibble codes:
//!
//! | code | ink    |
//! |------|--------|
//! | 0    | black  |
//! | 1    | white  |
//! | 2    | green  |
//! | 3    | blue   |
//! | 4    | red    |
//! | 5    | yellow |
//! | 6    | orange |

use eink_render::{PanelColor, QuantizedImage, PANEL_HEIGHT, PANEL_WIDTH};

use super::DeviceFault;

/// Byte length of a full-panel frame.
pub const FRAME_LEN: usize = (PANEL_WIDTH * PANEL_HEIGHT / 2) as usize;

/// Nibble code of an ink.
pub const fn color_code(color: PanelColor) -> u8 {
    match color {
        PanelColor::Black => 0,
        PanelColor::White => 1,
        PanelColor::Green => 2,
        PanelColor::Blue => 3,
        PanelColor::Red => 4,
        PanelColor::Yellow => 5,
        PanelColor::Orange => 6,
    }
}

/// Ink for a nibble code; `None` for codes the panel does not define.
pub const fn color_from_code(code: u8) -> Option<PanelColor> {
    match code {
        0 => Some(PanelColor::Black),
        1 => Some(PanelColor::White),
        2 => Some(PanelColor::Green),
        3 => Some(PanelColor::Blue),
        4 => Some(PanelColor::Red),
        5 => Some(PanelColor::Yellow),
        6 => Some(PanelColor::Orange),
        _ => None,
    }
}

/// Device-ready frame bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer(Vec<u8>);

impl Framebuffer {
    /// Pack a full-panel image.
    pub fn pack(image: &QuantizedImage) -> Result<Self, DeviceFault> {
        if (image.width(), image.height()) != (PANEL_WIDTH, PANEL_HEIGHT) {
            return Err(DeviceFault::Buffer(format!(
                "expected {}x{} image, got {}x{}",
                PANEL_WIDTH,
                PANEL_HEIGHT,
                image.width(),
                image.height()
            )));
        }

        let bytes = image
            .pixels()
            .chunks_exact(2)
            .map(|pair| (color_code(pair[0]) << 4) | color_code(pair[1]))
            .collect();
        Ok(Self(bytes))
    }

    /// A frame filled with one ink.
    pub fn filled(color: PanelColor) -> Self {
        let code = color_code(color);
        Self(vec![(code << 4) | code; FRAME_LEN])
    }

    /// Wrap raw bytes received from elsewhere.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DeviceFault> {
        if bytes.len() != FRAME_LEN {
            return Err(DeviceFault::Buffer(format!(
                "expected {} bytes, got {}",
                FRAME_LEN,
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode back to row-major inks.
    pub fn unpack(&self) -> Result<QuantizedImage, DeviceFault> {
        let mut pixels = Vec::with_capacity(self.0.len() * 2);
        for (i, &byte) in self.0.iter().enumerate() {
            for code in [byte >> 4, byte & 0x0f] {
                let color = color_from_code(code).ok_or_else(|| {
                    DeviceFault::Buffer(format!("invalid color code {code} at byte {i}"))
                })?;
                pixels.push(color);
            }
        }

        QuantizedImage::from_pixels(PANEL_WIDTH, PANEL_HEIGHT, pixels).ok_or_else(|| {
            DeviceFault::Buffer(format!("frame has {} bytes, expected {}", self.0.len(), FRAME_LEN))
        })
    }
}
