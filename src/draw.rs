// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing typeset lines into a rendering surface.

use crate::block::TextBlock;
use crate::error::TypesetError;
use crate::font::{FontDescriptor, FontRegistry};
use crate::typeset::Typesetter;

/// A glyph ready for the renderer: id plus an absolute position within the
/// surface's current transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub id: u16,
    pub x: f64,
    pub y: f64,
}

/// The output renderer, as the typesetter sees it. Coordinates follow the
/// typographic convention of the original surface: y grows upwards and the
/// baseline moves down by translating negatively.
pub trait RenderContext {
    fn translate(&mut self, dx: f64, dy: f64);
    fn draw_glyphs(&mut self, font: &FontDescriptor, font_size: f32, glyphs: &[GlyphPlacement]);
}

impl Typesetter {
    /// Typesets `block` and emits every line to `context`.
    ///
    /// The origin is first translated to the top of the text (total height
    /// plus the final descent, plus half a pixel to land baselines between
    /// pixels), then each line translates down by the previous line's
    /// descent plus its own ascent and leading before its runs are emitted
    /// with cumulative advances starting at x = 0.
    pub fn draw_to_context<F: FontRegistry, R: RenderContext>(
        &mut self,
        fonts: &mut F,
        block: &TextBlock,
        available_width: f32,
        context: &mut R,
    ) -> Result<(), TypesetError> {
        let lines = self.position_glyphs(fonts, block, available_width)?;

        let total_height: f64 = lines.iter().map(|line| f64::from(line.height())).sum();
        let final_descent = lines.last().map(|line| f64::from(line.descent)).unwrap_or(0.0);
        context.translate(0.0, total_height + final_descent + 0.5);

        let mut placements = Vec::new();
        let mut previous_descent = 0.0_f64;
        for line in &lines {
            context.translate(
                0.0,
                -(previous_descent + f64::from(line.ascent) + f64::from(line.leading)),
            );
            let mut pen_x = 0.0_f64;
            let mut pen_y = 0.0_f64;
            for run in &line.runs {
                placements.clear();
                placements.reserve(run.glyphs.len());
                for glyph in &run.glyphs {
                    placements.push(GlyphPlacement {
                        id: glyph.id,
                        x: pen_x + f64::from(glyph.x_offset),
                        y: pen_y + f64::from(glyph.y_offset),
                    });
                    pen_x += f64::from(glyph.x_advance);
                    pen_y += f64::from(glyph.y_advance);
                }
                context.draw_glyphs(&run.font, run.font_size, &placements);
            }
            previous_descent = f64::from(line.descent);
        }
        Ok(())
    }
}
