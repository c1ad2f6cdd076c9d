// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic faces and registries for exercising the typesetter without
//! platform fonts.

use std::fmt;
use std::sync::Arc;

use crate::error::ShapeError;
use crate::font::{Face, FaceMetrics, FamilyClass, FontDescriptor, FontRegistry};
use crate::language::Language;
use crate::shape::{Direction, ShapeRequest, ShapeScratch, ShapedGlyph};
use crate::utf::Codepoints;

pub(crate) const TEST_UPEM: u16 = 1000;
pub(crate) const TEST_ADVANCE: i32 = 600;
pub(crate) const TEST_ASCENDER: i32 = 760;
pub(crate) const TEST_DESCENDER: i32 = -240;
pub(crate) const TEST_HEIGHT: i32 = 1200;

/// Which code points a [`TestFace`] maps to real glyphs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Coverage {
    All,
    /// Everything below the CJK blocks (Latin, Greek, Cyrillic, Arabic, ...).
    NonCjk,
    /// The CJK blocks and above.
    CjkOnly,
}

impl Coverage {
    fn covers(self, c: char) -> bool {
        match self {
            Self::All => true,
            Self::NonCjk => (c as u32) < 0x2E80,
            Self::CjkOnly => (c as u32) >= 0x2E80,
        }
    }
}

/// A face with fixed per-character advances, configurable coverage, an
/// optional `ff…` ligature, and combining marks gathered into the preceding
/// cluster. RTL requests reverse the glyph order, like the real shaper.
pub(crate) struct TestFace {
    name: String,
    class: FamilyClass,
    coverage: Coverage,
    ligatures: bool,
}

impl TestFace {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            class: FamilyClass::SansSerif,
            coverage: Coverage::All,
            ligatures: false,
        }
    }

    pub(crate) fn coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = coverage;
        self
    }

    pub(crate) fn class(mut self, class: FamilyClass) -> Self {
        self.class = class;
        self
    }

    pub(crate) fn ligatures(mut self) -> Self {
        self.ligatures = true;
        self
    }

    pub(crate) fn descriptor(self) -> FontDescriptor {
        FontDescriptor::new(Arc::new(self))
    }
}

impl fmt::Debug for TestFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TestFace").field(&self.name).finish()
    }
}

fn glyph_id(c: char) -> u16 {
    (c as u32 % 0xFFF0 + 1) as u16
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

impl Face for TestFace {
    fn postscript_name(&self) -> &str {
        &self.name
    }

    fn family_class(&self) -> FamilyClass {
        self.class
    }

    fn units_per_em(&self) -> u16 {
        TEST_UPEM
    }

    fn metrics(&self) -> FaceMetrics {
        FaceMetrics {
            ascender: TEST_ASCENDER,
            descender: TEST_DESCENDER,
            height: TEST_HEIGHT,
        }
    }

    fn shape(
        &self,
        request: &ShapeRequest<'_>,
        _scratch: &mut ShapeScratch,
        output: &mut Vec<ShapedGlyph>,
    ) -> Result<(), ShapeError> {
        let points: Vec<(char, usize)> = Codepoints::new(request.text, request.range.clone())
            .map(|(c, range)| (c, range.start))
            .collect();
        let mut glyphs: Vec<ShapedGlyph> = Vec::new();
        let mut i = 0;
        while i < points.len() {
            let (c, cluster) = points[i];
            if self.ligatures && c == 'f' {
                let mut j = i + 1;
                while j < points.len() && points[j].0 == 'f' {
                    j += 1;
                }
                if j - i >= 2 {
                    glyphs.push(ShapedGlyph {
                        id: glyph_id('\u{FB00}'),
                        x_advance: TEST_ADVANCE * (j - i) as i32,
                        cluster,
                        ..Default::default()
                    });
                    i = j;
                    continue;
                }
            }
            if is_combining_mark(c) && !glyphs.is_empty() {
                let previous_cluster = glyphs.last().map(|g| g.cluster).unwrap_or(cluster);
                glyphs.push(ShapedGlyph {
                    id: if self.coverage.covers(c) { glyph_id(c) } else { 0 },
                    x_advance: 0,
                    cluster: previous_cluster,
                    ..Default::default()
                });
            } else {
                glyphs.push(ShapedGlyph {
                    id: if self.coverage.covers(c) { glyph_id(c) } else { 0 },
                    x_advance: TEST_ADVANCE,
                    cluster,
                    ..Default::default()
                });
            }
            i += 1;
        }
        if request.direction == Direction::Rtl {
            glyphs.reverse();
        }
        output.clear();
        output.append(&mut glyphs);
        Ok(())
    }
}

/// A registry with explicit chains: a default chain plus per-language
/// chains, like the production registry's language-keyed first entries.
#[derive(Default)]
pub(crate) struct TestFonts {
    pub(crate) default_chain: Vec<FontDescriptor>,
    pub(crate) language_chains: Vec<(Language, Vec<FontDescriptor>)>,
    pub(crate) preferred: Vec<Language>,
}

impl TestFonts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_preferred(mut self, languages: &[&str]) -> Self {
        self.preferred = languages.iter().map(|l| Language::parse(l)).collect();
        self
    }

    pub(crate) fn with_language_chain(
        mut self,
        language: &str,
        chain: Vec<FontDescriptor>,
    ) -> Self {
        self.language_chains
            .push((Language::parse(language), chain));
        self
    }
}

impl FontRegistry for TestFonts {
    fn fallback(
        &mut self,
        base: &FontDescriptor,
        index: usize,
        language: Language,
    ) -> Option<FontDescriptor> {
        if index == 0 {
            return Some(base.clone());
        }
        let chain = self
            .language_chains
            .iter()
            .find(|(chain_language, _)| *chain_language == language)
            .map(|(_, chain)| chain)
            .unwrap_or(&self.default_chain);
        chain.get(index - 1).cloned()
    }

    fn preferred_languages(&self) -> &[Language] {
        &self.preferred
    }
}

pub(crate) fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}
