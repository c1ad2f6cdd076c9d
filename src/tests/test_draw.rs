// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{TestFace, TestFonts};
use crate::block::TextBlock;
use crate::draw::{GlyphPlacement, RenderContext};
use crate::font::FontDescriptor;
use crate::typeset::Typesetter;

#[derive(Default)]
struct RecordingContext {
    translations: Vec<(f64, f64)>,
    draws: Vec<(String, f32, Vec<GlyphPlacement>)>,
}

impl RenderContext for RecordingContext {
    fn translate(&mut self, dx: f64, dy: f64) {
        self.translations.push((dx, dy));
    }

    fn draw_glyphs(&mut self, font: &FontDescriptor, font_size: f32, glyphs: &[GlyphPlacement]) {
        self.draws
            .push((font.postscript_name().to_string(), font_size, glyphs.to_vec()));
    }
}

#[test]
fn draws_lines_top_down_with_cumulative_advances() {
    let mut fonts = TestFonts::new();
    let mut block = TextBlock::new(TestFace::new("Base-Regular").descriptor(), 13.0);
    block.set_text("abc\nde");

    let mut context = RecordingContext::default();
    Typesetter::new()
        .draw_to_context(&mut fonts, &block, 500.0, &mut context)
        .unwrap();

    // Two lines of (10, 3, 3) metrics: total height 32, final descent 3.
    assert_eq!(context.translations.len(), 3);
    assert!((context.translations[0].1 - 35.5).abs() < 1e-6);
    // First line: down by ascent + leading.
    assert!((context.translations[1].1 + 13.0).abs() < 1e-6);
    // Second line: down by previous descent + ascent + leading.
    assert!((context.translations[2].1 + 16.0).abs() < 1e-6);

    assert_eq!(context.draws.len(), 2);
    let (ref font, size, ref glyphs) = context.draws[0];
    assert_eq!(font, "Base-Regular");
    assert_eq!(size, 13.0);
    let xs: Vec<f64> = glyphs.iter().map(|g| g.x).collect();
    assert!((xs[0] - 0.0).abs() < 1e-4);
    assert!((xs[1] - 7.8).abs() < 1e-3);
    assert!((xs[2] - 15.6).abs() < 1e-3);
}
