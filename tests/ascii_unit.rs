//! Unit tests for the individual frame stages.

use ascii_lens::ascii::dither::{diffuse_error, floyd_steinberg, quantize};
use ascii_lens::ascii::edges::{detect, sobel_into, sobel_magnitude};
use ascii_lens::ascii::{
    grid_dimensions, luminance, resample, tone_map, tone_map_into, Charset, EdgeMask, EdgeMethod,
    EdgeParams, GlyphMapper, GlyphRamp, LuminanceField, PixelBuffer, RenderError, ToneCurve,
    BLANK, DETAILED_RAMP,
};

/// Helper to build an RGBA buffer from gray levels.
fn gray_frame(width: u32, height: u32, values: &[u8]) -> PixelBuffer {
    let data = values.iter().flat_map(|&v| [v, v, v, 255]).collect();
    PixelBuffer::new(width, height, data).unwrap()
}

/// Deterministic pseudo-random field without pulling in an RNG.
fn scrambled_field(width: usize, height: usize) -> LuminanceField {
    let values = (0..width * height)
        .map(|i| ((i * 7919 + 13) % 256) as f32)
        .collect();
    LuminanceField::from_values(width, height, values)
}

// ==================== Pixel Buffer Tests ====================

#[test]
fn test_buffer_rejects_wrong_length() {
    let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
    match err {
        RenderError::InvalidBuffer {
            expected, actual, ..
        } => {
            assert_eq!(expected, 16);
            assert_eq!(actual, 15);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_buffer_rejects_zero_area() {
    assert!(matches!(
        PixelBuffer::new(0, 3, vec![]),
        Err(RenderError::EmptyBuffer { .. })
    ));
}

#[test]
fn test_buffer_from_rgb_sets_alpha() {
    let buf = PixelBuffer::from_rgb(1, 2, &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(buf.pixel(0, 1), [4, 5, 6, 255]);
}

// ==================== Dimension Tests ====================

#[test]
fn test_dimensions_match_formula() {
    for (w, h, cols) in [(640, 480, 80), (1920, 1080, 150), (100, 300, 40), (7, 3, 5)] {
        let (gw, gh) = grid_dimensions(w, h, cols);
        let expected = (h as f64 / w as f64 * cols as f64 * 0.55).round().max(1.0) as usize;
        assert_eq!(gw, cols as usize);
        assert_eq!(gh, expected, "{w}x{h} at {cols}");
    }
}

#[test]
fn test_dimensions_minimum_one_row() {
    assert_eq!(grid_dimensions(1000, 1, 10), (10, 1));
}

// ==================== Grayscale Conversion Tests ====================

#[test]
fn test_grayscale_pure_red() {
    assert!((luminance(255, 0, 0) - 76.245).abs() < 1e-3);
}

#[test]
fn test_grayscale_luminance_order() {
    let r = luminance(255, 0, 0);
    let g = luminance(0, 255, 0);
    let b = luminance(0, 0, 255);
    assert!(g > r && r > b);
}

#[test]
fn test_grayscale_extremes_exact() {
    assert_eq!(luminance(0, 0, 0), 0.0);
    assert_eq!(luminance(255, 255, 255), 255.0);
}

#[test]
fn test_neutral_tone_is_plain_bt601() {
    let data: Vec<u8> = (0..6 * 4 * 4).map(|i| ((i * 37) % 256) as u8).collect();
    let frame = PixelBuffer::new(6, 4, data).unwrap();
    let field = tone_map(&frame, &ToneCurve::default());

    for y in 0..4 {
        for x in 0..6 {
            let [r, g, b, _] = frame.pixel(x, y);
            let expected = luminance(r, g, b).clamp(0.0, 255.0);
            assert!((field.get(x as usize, y as usize) - expected).abs() < 1e-3);
        }
    }
}

#[test]
fn test_tone_map_into_reuses_buffer() {
    let frame = gray_frame(2, 2, &[0, 64, 128, 255]);
    let mut field = LuminanceField::default();
    assert_eq!(tone_map_into(&frame, &ToneCurve::default(), &mut field), 4);
    let small = gray_frame(1, 1, &[9]);
    assert_eq!(tone_map_into(&small, &ToneCurve::default(), &mut field), 1);
    assert_eq!((field.width(), field.height()), (1, 1));
}

#[test]
fn test_invert_then_contrast() {
    let frame = gray_frame(1, 1, &[200]);
    let field = tone_map(&frame, &ToneCurve::new(0.0, 0.0, true));
    assert!((field.get(0, 0) - 55.0).abs() < 1e-3);
}

// ==================== Resampling Tests ====================

#[test]
fn test_resample_area_average() {
    let frame = gray_frame(4, 2, &[0, 40, 80, 120, 20, 60, 100, 140]);
    let cells = resample(&frame, 2, 1, 0.0);
    // (0 + 40 + 20 + 60) / 4 = 30, (80 + 120 + 100 + 140) / 4 = 110
    assert_eq!(cells.pixel(0, 0)[0], 30);
    assert_eq!(cells.pixel(1, 0)[0], 110);
}

// ==================== Edge Detection Tests ====================

#[test]
fn test_sobel_threshold_zero_marks_all_nonzero_gradients() {
    let field = scrambled_field(9, 7);
    let mut mask = EdgeMask::default();
    sobel_into(&field, 0.0, &mut mask);

    for y in 1..6 {
        for x in 1..8 {
            assert_eq!(mask.is_edge(x, y), sobel_magnitude(&field, x, y) > 0.0);
        }
    }
}

#[test]
fn test_sobel_threshold_infinite_marks_none() {
    let field = scrambled_field(9, 7);
    let mut mask = EdgeMask::default();
    sobel_into(&field, f32::INFINITY, &mut mask);
    assert_eq!(mask.count(), 0);
}

#[test]
fn test_sobel_flat_field_has_zero_magnitude() {
    let field = LuminanceField::filled(5, 5, 77.0);
    assert_eq!(sobel_magnitude(&field, 2, 2), 0.0);
}

#[test]
fn test_dog_differs_from_sobel() {
    // An isolated bright cell has zero Sobel gradient at its center
    let mut values = vec![0.0; 49];
    values[24] = 255.0;
    let field = LuminanceField::from_values(7, 7, values);

    let params = |method| EdgeParams {
        method,
        threshold: 10.0,
        ..EdgeParams::default()
    };
    let sobel = detect(&field, &params(EdgeMethod::Sobel)).unwrap();
    let dog = detect(&field, &params(EdgeMethod::Dog)).unwrap();

    assert!(!sobel.is_edge(3, 3));
    assert!(dog.is_edge(3, 3));
    assert_ne!(sobel, dog);
}

#[test]
fn test_dog_can_mark_border_cells() {
    // A bright corner pixel: DoG responds there, Sobel never marks borders
    let mut values = vec![0.0; 36];
    values[0] = 255.0;
    let field = LuminanceField::from_values(6, 6, values);
    let dog = detect(
        &field,
        &EdgeParams {
            method: EdgeMethod::Dog,
            threshold: 5.0,
            ..EdgeParams::default()
        },
    )
    .unwrap();
    assert!(dog.is_edge(0, 0));
}

// ==================== Dithering Tests ====================

#[test]
fn test_floyd_conserves_error() {
    for (w, h) in [(3, 2), (8, 5), (17, 11)] {
        let mut field = scrambled_field(w, h);
        let before: f64 = field.values().iter().map(|&v| v as f64).sum();
        let distributed = diffuse_error(field.values_mut(), w, h);

        // Every processed cell lost `old - new` and its neighbors gained the same
        let after: f64 = field.values().iter().map(|&v| v as f64).sum();
        assert!((before - after).abs() < 0.05, "{w}x{h}: {before} vs {after}");
        assert!(distributed.is_finite());
    }
}

#[test]
fn test_floyd_is_deterministic() {
    let mut a = scrambled_field(10, 6);
    let mut b = scrambled_field(10, 6);
    floyd_steinberg(&mut a);
    floyd_steinberg(&mut b);
    assert_eq!(a, b);
}

#[test]
fn test_floyd_tiny_fields_untouched() {
    let mut field = scrambled_field(2, 5);
    let original = field.clone();
    assert_eq!(floyd_steinberg(&mut field), 0.0);
    assert_eq!(field, original);
}

#[test]
fn test_quantize_eight_steps() {
    let levels: std::collections::BTreeSet<u32> =
        (0..=255).map(|v| quantize(v as f32) as u32).collect();
    assert_eq!(levels.len(), 9);
}

// ==================== Glyph Mapping Tests ====================

#[test]
fn test_detailed_ramp_is_default() {
    assert_eq!(Charset::default(), Charset::Detailed);
    assert_eq!(GlyphRamp::default().len(), DETAILED_RAMP.chars().count());
}

#[test]
fn test_cycling_ab_ignores_luminance() {
    let mapper = GlyphMapper::new(GlyphRamp::new("AB").unwrap(), false, true);
    let field = scrambled_field(7, 5);
    let glyphs = mapper.map(&field, None);
    for y in 0..5 {
        for x in 0..7 {
            let expected = ['A', 'B'][(x + y) % 2];
            assert_eq!(glyphs[y * 7 + x], expected);
        }
    }
}

#[test]
fn test_ignore_white_checked_before_edge_override() {
    let field = LuminanceField::filled(3, 3, 255.0);
    let mut mask = EdgeMask::new(3, 3);
    mask.set(1, 1, true);

    let ignoring = GlyphMapper::new(GlyphRamp::new("01").unwrap(), true, false);
    assert!(ignoring.map(&field, Some(&mask)).iter().all(|&g| g == BLANK));

    let keeping = GlyphMapper::new(GlyphRamp::new("01").unwrap(), false, false);
    let glyphs = keeping.map(&field, Some(&mask));
    assert_eq!(glyphs[4], '0');
    assert_eq!(glyphs.iter().filter(|&&g| g == '1').count(), 8);
}

#[test]
fn test_every_preset_maps_extremes() {
    for charset in Charset::ALL {
        let Some(glyphs) = charset.glyphs() else {
            continue;
        };
        let ramp = GlyphRamp::new(glyphs).unwrap();
        let mapper = GlyphMapper::new(ramp.clone(), false, false);
        assert_eq!(mapper.glyph_for(0.0), ramp.glyphs()[0]);
        assert_eq!(mapper.glyph_for(255.0), *ramp.glyphs().last().unwrap());
    }
}
