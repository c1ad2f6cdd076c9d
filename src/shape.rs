// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaper adapter over HarfBuzz (via harfrust).
//!
//! Requests address the original UTF-16 text: code points are pushed with
//! their absolute code-unit offsets as cluster values, so every cluster in
//! the output is an offset into the text block. Advances and offsets are in
//! font units; conversion to pixels happens when runs are committed to a
//! line.

use core::ops::Range;
use core::str::FromStr as _;

use icu_properties::props::Script;
use icu_properties::{PropertyNamesShort, PropertyNamesShortBorrowed};

use crate::error::ShapeError;
use crate::language::Language;
use crate::utf::Codepoints;

/// Direction of a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// A single glyph as reported by the shaper, in font units.
///
/// An id of zero (`.notdef`) signals that the face has no coverage for the
/// cluster.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapedGlyph {
    pub id: u16,
    pub x_advance: i32,
    pub y_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
    /// Code-unit offset of the glyph's cluster in the original text.
    pub cluster: usize,
}

/// A shaping request for a sub-range of the text.
pub struct ShapeRequest<'a> {
    pub text: &'a [u16],
    pub range: Range<usize>,
    pub script: Script,
    pub language: Language,
    pub direction: Direction,
}

/// Reusable shaping buffer. Owned by one typesetter instance and threaded
/// through every shape call; not safe to share across threads.
#[derive(Default)]
pub struct ShapeScratch {
    buffer: Option<harfrust::UnicodeBuffer>,
}

fn script_short_names() -> PropertyNamesShortBorrowed<'static, Script> {
    PropertyNamesShort::<Script>::new()
}

fn script_to_harfrust(script: Script) -> harfrust::Script {
    let short_name: [u8; 4] = script_short_names()
        .get(script)
        .unwrap_or("Zzzz")
        .as_bytes()
        .try_into()
        .unwrap_or(*b"Zzzz");
    harfrust::Script::from_iso15924_tag(harfrust::Tag::new(&short_name))
        .unwrap_or(harfrust::script::UNKNOWN)
}

/// Shapes `request` against a font blob, replacing the contents of `output`
/// with the shaped glyphs in the shaper's visual order.
pub(crate) fn shape_with_harfrust(
    blob: &[u8],
    index: u32,
    request: &ShapeRequest<'_>,
    scratch: &mut ShapeScratch,
    output: &mut Vec<ShapedGlyph>,
) -> Result<(), ShapeError> {
    let font =
        harfrust::FontRef::from_index(blob, index).map_err(|_| ShapeError::InvalidFace)?;
    let shaper_data = harfrust::ShaperData::new(&font);
    let shaper = shaper_data.shaper(&font).build();

    let mut buffer = scratch
        .buffer
        .take()
        .unwrap_or_else(harfrust::UnicodeBuffer::new);
    for (c, range) in Codepoints::new(request.text, request.range.clone()) {
        buffer.add(c, range.start as u32);
    }
    buffer.set_direction(match request.direction {
        Direction::Ltr => harfrust::Direction::LeftToRight,
        Direction::Rtl => harfrust::Direction::RightToLeft,
    });
    buffer.set_script(script_to_harfrust(request.script));
    if !request.language.is_undefined() {
        let mut tag = [0_u8; 4];
        if let Ok(language) = harfrust::Language::from_str(request.language.code.write(&mut tag))
        {
            buffer.set_language(language);
        }
    }

    let glyphs = shaper.shape(buffer, &[]);
    output.clear();
    output.reserve(glyphs.glyph_infos().len());
    for (info, position) in glyphs.glyph_infos().iter().zip(glyphs.glyph_positions()) {
        output.push(ShapedGlyph {
            id: info.glyph_id as u16,
            x_advance: position.x_advance,
            y_advance: position.y_advance,
            x_offset: position.x_offset,
            y_offset: position.y_offset,
            cluster: info.cluster as usize,
        });
    }
    scratch.buffer = Some(glyphs.clear());
    Ok(())
}
