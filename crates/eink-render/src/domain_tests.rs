//! Domain-critical regression tests for eink-render.
//!
//! Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use image::{DynamicImage, Rgb, RgbImage};

    use crate::api::PanelRenderer;
    use crate::condition::{condition, ConditionOptions, ResizeMethod};
    use crate::dither::quantize;
    use crate::palette::{PanelColor, Palette};
    use crate::{PANEL_HEIGHT, PANEL_WIDTH};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) % 256) as u8,
            ])
        }))
    }

    // ========================================================================
    // Dimensions
    // ========================================================================

    /// If this breaks, it means: some source aspect ratio leaks through the
    /// resize stage and the panel would receive a short or long buffer.
    #[test]
    fn test_every_render_is_panel_sized() {
        let renderer_fit = PanelRenderer::new().method(ResizeMethod::Fit);
        let renderer_pad = PanelRenderer::new().method(ResizeMethod::Pad);
        for (w, h) in [(1920, 1080), (1024, 1024), (640, 960), (801, 481), (5, 3)] {
            let src = gradient(w, h);
            for renderer in [&renderer_fit, &renderer_pad] {
                let frame = renderer.render(&src).unwrap();
                assert_eq!(
                    (frame.width(), frame.height()),
                    (PANEL_WIDTH, PANEL_HEIGHT),
                    "source {}x{} with {}",
                    w,
                    h,
                    renderer.condition_options().method
                );
                assert_eq!(frame.pixels().len(), 800 * 480);
            }
        }
    }

    // ========================================================================
    // Solid colors
    // ========================================================================

    /// If this breaks, it means: a solid ink color no longer survives the
    /// whole pipeline, so resampling or error diffusion is adding noise to
    /// flat regions.
    #[test]
    fn test_full_hd_solid_red_fit_is_all_red() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(1920, 1080, Rgb([255, 0, 0])));
        let frame = PanelRenderer::new()
            .method(ResizeMethod::Fit)
            .render(&src)
            .unwrap();
        assert!(frame.pixels().iter().all(|&c| c == PanelColor::Red));
    }

    /// If this breaks, it means: nearest-color matching is no longer exact
    /// for palette colors, so a flat ink region would dither.
    #[test]
    fn test_every_ink_survives_unchanged() {
        for color in PanelColor::ALL {
            let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(80, 48, Rgb(color.rgb())));
            let frame = PanelRenderer::new().render(&src).unwrap();
            assert!(
                frame.pixels().iter().all(|&c| c == color),
                "{} did not survive",
                color
            );
        }
    }

    // ========================================================================
    // Padding
    // ========================================================================

    /// If this breaks, it means: pad mode is filling its borders with
    /// something other than white, or is not centering the content.
    #[test]
    fn test_pad_borders_are_white_after_dithering() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 480, Rgb([0, 0, 255])));
        let frame = PanelRenderer::new()
            .method(ResizeMethod::Pad)
            .rotate(false)
            .render(&src)
            .unwrap();

        for y in [0, 240, 479] {
            for x in [0, 100, 199, 600, 799] {
                assert_eq!(frame.get(x, y), PanelColor::White, "border at ({x}, {y})");
            }
            for x in [200, 400, 599] {
                assert_eq!(frame.get(x, y), PanelColor::Blue, "content at ({x}, {y})");
            }
        }
    }

    // ========================================================================
    // Palette membership
    // ========================================================================

    /// If this breaks, it means: the dither loop produced something outside
    /// the configured palette.
    #[test]
    fn test_output_only_uses_palette_entries() {
        let restricted =
            Palette::new(&[PanelColor::Black, PanelColor::White, PanelColor::Red]).unwrap();
        let conditioned = PanelRenderer::new().condition(&gradient(320, 200)).unwrap();
        let frame = crate::dither::quantize_with(
            &conditioned,
            &restricted,
            &crate::dither::DitherOptions::new(),
        );
        assert!(frame.pixels().iter().all(|&c| restricted.contains(c)));

        let rgb = frame.to_rgb_image();
        assert!(rgb.pixels().all(|p| PanelColor::from_rgb(p.0).is_some()));
    }

    /// If this breaks, it means: a gradient collapses to a single ink, so
    /// error diffusion stopped carrying error between pixels.
    #[test]
    fn test_gradient_uses_several_inks() {
        let frame = PanelRenderer::new().render(&gradient(800, 480)).unwrap();
        let used: std::collections::HashSet<_> = frame.pixels().iter().copied().collect();
        assert!(used.len() >= 4, "only {:?} used", used);
    }

    // ========================================================================
    // Rotation
    // ========================================================================

    /// If this breaks, it means: rotation is happening before dithering (or
    /// not at all), changing the error diffusion pattern the panel expects.
    #[test]
    fn test_rotation_is_applied_after_quantization() {
        let src = gradient(800, 480);
        let options = ConditionOptions::new();
        let conditioned = condition(&src, &options).unwrap();
        let upright = quantize(&conditioned, &Palette::SEVEN_COLOR);

        let rendered = PanelRenderer::new().render(&src).unwrap();
        assert_eq!(rendered, upright.clone().rotate_180());

        for (x, y) in [(0, 0), (17, 301), (799, 479), (400, 0)] {
            assert_eq!(
                rendered.get(799 - x, 479 - y),
                upright.get(x, y),
                "pixel ({x}, {y})"
            );
        }
    }

    /// If this breaks, it means: rotate_180 is not an involution.
    #[test]
    fn test_rotate_twice_is_identity() {
        let frame = PanelRenderer::new()
            .rotate(false)
            .render(&gradient(300, 300))
            .unwrap();
        assert_eq!(frame.clone().rotate_180().rotate_180(), frame);
    }

    // ========================================================================
    // Brightness
    // ========================================================================

    /// If this breaks, it means: brightness values at or below 1 are
    /// altering the image, when they must be a strict pass-through.
    #[test]
    fn test_brightness_at_or_below_one_is_noop() {
        let src = gradient(1000, 700);
        let baseline = condition(&src, &ConditionOptions::new()).unwrap();
        for b in [1.0, 0.99, 0.5, 0.0, -2.0] {
            let out = condition(&src, &ConditionOptions::new().brightness(b)).unwrap();
            assert_eq!(out, baseline, "brightness {}", b);
        }
    }

    /// If this breaks, it means: the brightness boost stopped lightening
    /// the image on average.
    #[test]
    fn test_brightness_above_one_lightens() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_fn(800, 480, |x, _| {
            let v = (x % 128) as u8;
            Rgb([v, v, v])
        }));
        let plain = condition(&src, &ConditionOptions::new()).unwrap();
        let bright = condition(&src, &ConditionOptions::new().brightness(1.5)).unwrap();

        let sum = |img: &RgbImage| img.pixels().map(|p| p.0[0] as u64).sum::<u64>();
        assert!(sum(bright.as_rgb()) > sum(plain.as_rgb()));
    }

    // ========================================================================
    // Determinism
    // ========================================================================

    /// If this breaks, it means: rendering depends on hidden state (random
    /// jitter, thread scheduling) and identical inputs produce different
    /// panel frames.
    #[test]
    fn test_render_is_deterministic() {
        let renderer = PanelRenderer::new().brightness(1.2);
        let src = gradient(1024, 1024);
        assert_eq!(renderer.render(&src).unwrap(), renderer.render(&src).unwrap());
    }
}
