//! Assertion helpers for tests.

use eink_render::{PanelColor, QuantizedImage};
use pretty_assertions::assert_eq;

use super::fake_panel::{Call, PanelLog};

/// Assert the panel saw exactly `expected`, in order.
pub fn assert_calls(log: &PanelLog, expected: &[Call]) {
    assert_eq!(log.calls(), expected.to_vec());
}

/// Assert the panel was never put to sleep.
pub fn assert_never_slept(log: &PanelLog) {
    assert!(
        !log.saw(&Call::Sleep),
        "Expected no sleep call, got {:?}",
        log.calls()
    );
}

/// Assert the panel ended with a forced module exit with cleanup.
pub fn assert_force_exited(log: &PanelLog) {
    assert_eq!(
        log.calls().last(),
        Some(&Call::ForceExit { cleanup: true }),
        "Expected forced exit as last call"
    );
}

/// Assert every pixel of `frame` is `color`.
pub fn assert_solid(frame: &QuantizedImage, color: PanelColor) {
    let off = frame.pixels().iter().filter(|&&c| c != color).count();
    assert_eq!(off, 0, "{} pixels differ from {}", off, color);
}

/// Assert a file is a PNG of the panel's size.
pub fn assert_panel_png(path: &std::path::Path) {
    let image = image::open(path)
        .unwrap_or_else(|e| panic!("{} is not a readable image: {e}", path.display()));
    assert_eq!(
        (image.width(), image.height()),
        (eink_render::PANEL_WIDTH, eink_render::PANEL_HEIGHT)
    );
}

/// Assert sleep was called at most once and nothing followed it.
pub fn assert_never_slept_twice(log: &PanelLog) {
    let calls = log.calls();
    let sleeps = calls.iter().filter(|c| **c == Call::Sleep).count();
    assert!(sleeps <= 1, "Sleep called {} times", sleeps);
    if sleeps == 1 {
        assert_eq!(calls.last(), Some(&Call::Sleep), "Calls after sleep: {:?}", calls);
    }
}
