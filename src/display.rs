//! The display pipeline: decode, render, then hand the frame to a session.

use std::path::Path;

use eink_render::{PanelRenderer, QuantizedImage};
use image::DynamicImage;

use crate::error::DisplayError;
use crate::panel::{PanelDriver, PanelSession, SessionOutcome};

/// Render `image` and show it through `session`.
///
/// Rendering finishes before the session is started, so a bad image never
/// powers up the panel.
pub fn show_image<D: PanelDriver>(
    image: &DynamicImage,
    renderer: &PanelRenderer,
    session: PanelSession<D>,
) -> Result<SessionOutcome, DisplayError> {
    let frame = renderer.render(image)?;
    Ok(session.run(&frame)?)
}

/// Decode the image at `source` and show it through `session`.
pub fn show_file<D: PanelDriver>(
    source: &Path,
    renderer: &PanelRenderer,
    session: PanelSession<D>,
) -> Result<SessionOutcome, DisplayError> {
    tracing::info!(source = %source.display(), "Displaying image");
    let image = eink_render::open(source)?;
    show_image(&image, renderer, session)
}

/// Render the image at `source` and save the result as a PNG, no panel.
pub fn render_to_png(
    source: &Path,
    output: &Path,
    renderer: &PanelRenderer,
) -> Result<QuantizedImage, DisplayError> {
    let frame = renderer.render_path(source)?;
    frame
        .to_rgb_image()
        .save(output)
        .map_err(DisplayError::Write)?;
    tracing::info!(output = %output.display(), "Rendered frame written");
    Ok(frame)
}
