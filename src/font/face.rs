// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font faces and descriptors.

use std::fmt;
use std::sync::{Arc, OnceLock};

use fontique::Blob;
use read_fonts::TableProvider as _;
use skrifa::instance::{LocationRef, Size};
use skrifa::MetadataProvider as _;

use crate::error::ShapeError;
use crate::shape::{self, ShapeRequest, ShapeScratch, ShapedGlyph};

/// Vertical face metrics in font units, following FreeType conventions:
/// positive ascender, negative descender, `height` the full baseline
/// distance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceMetrics {
    pub ascender: i32,
    pub descender: i32,
    pub height: i32,
}

impl FaceMetrics {
    /// The line gap implied by the metrics.
    pub fn leading(&self) -> i32 {
        self.height - self.ascender + self.descender
    }
}

/// Coarse stylistic classification of a family, used to key fallback chains.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FamilyClass {
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Fantasy,
    #[default]
    Unknown,
}

/// A face participating in typesetting: identity, metrics, and shaping.
///
/// The production implementation is [`SystemFace`]; tests substitute
/// deterministic faces.
pub trait Face: fmt::Debug + Send + Sync {
    fn postscript_name(&self) -> &str;
    fn family_class(&self) -> FamilyClass;
    fn units_per_em(&self) -> u16;
    fn metrics(&self) -> FaceMetrics;
    fn shape(
        &self,
        request: &ShapeRequest<'_>,
        scratch: &mut ShapeScratch,
        output: &mut Vec<ShapedGlyph>,
    ) -> Result<(), ShapeError>;
}

/// A shared, comparable handle to a face.
///
/// Equality is structural: the same face object, or the same PostScript
/// name.
#[derive(Clone)]
pub struct FontDescriptor {
    face: Arc<dyn Face>,
}

impl FontDescriptor {
    pub fn new(face: Arc<dyn Face>) -> Self {
        Self { face }
    }

    pub fn face(&self) -> &dyn Face {
        self.face.as_ref()
    }

    pub fn postscript_name(&self) -> &str {
        self.face.postscript_name()
    }

    pub fn family_class(&self) -> FamilyClass {
        self.face.family_class()
    }

    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    pub fn metrics(&self) -> FaceMetrics {
        self.face.metrics()
    }
}

impl fmt::Debug for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontDescriptor")
            .field(&self.postscript_name())
            .finish()
    }
}

impl PartialEq for FontDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.face, &other.face)
            || self.postscript_name() == other.postscript_name()
    }
}

impl Eq for FontDescriptor {}

/// Whether two font sizes typeset identically. Sizes closer than 1/64 of a
/// point do not split runs and allow merging.
pub(crate) fn is_font_size_similar(a: f32, b: f32) -> bool {
    (a - b).abs() < 1.0 / 64.0
}

/// A face backed by loaded font data.
///
/// The skrifa-derived metrics and classification are initialized lazily on
/// first use and retained for the face's lifetime.
pub struct SystemFace {
    blob: Blob<u8>,
    index: u32,
    postscript_name: String,
    metrics: OnceLock<(u16, FaceMetrics)>,
    class: OnceLock<FamilyClass>,
}

impl SystemFace {
    /// Wraps loaded font data, reading the face's PostScript name.
    /// Returns `None` if the data is not a usable face.
    pub fn new(blob: Blob<u8>, index: u32) -> Option<Self> {
        let font = skrifa::FontRef::from_index(blob.as_ref(), index).ok()?;
        let postscript_name = font
            .localized_strings(skrifa::string::StringId::POSTSCRIPT_NAME)
            .english_or_first()
            .map(|name| name.chars().collect::<String>())
            .or_else(|| {
                font.localized_strings(skrifa::string::StringId::FAMILY_NAME)
                    .english_or_first()
                    .map(|name| name.chars().collect::<String>())
            })?;
        Some(Self {
            blob,
            index,
            postscript_name,
            metrics: OnceLock::new(),
            class: OnceLock::new(),
        })
    }

    fn load_metrics(&self) -> (u16, FaceMetrics) {
        *self.metrics.get_or_init(|| {
            let Ok(font) = skrifa::FontRef::from_index(self.blob.as_ref(), self.index) else {
                return (1, FaceMetrics::default());
            };
            let metrics = font.metrics(Size::unscaled(), LocationRef::default());
            (
                metrics.units_per_em.max(1),
                FaceMetrics {
                    ascender: metrics.ascent.round() as i32,
                    descender: metrics.descent.round() as i32,
                    height: (metrics.ascent - metrics.descent + metrics.leading).round() as i32,
                },
            )
        })
    }

    fn classify(&self) -> FamilyClass {
        let Ok(font) = read_fonts::FontRef::from_index(self.blob.as_ref(), self.index) else {
            return FamilyClass::Unknown;
        };
        if font
            .post()
            .map(|post| post.is_fixed_pitch() != 0)
            .unwrap_or(false)
        {
            return FamilyClass::Monospace;
        }
        if let Ok(os2) = font.os2() {
            // IBM family class, high byte.
            match os2.s_family_class() >> 8 {
                1..=5 | 7 => return FamilyClass::Serif,
                8 => return FamilyClass::SansSerif,
                9 => return FamilyClass::Fantasy,
                10 => return FamilyClass::Cursive,
                _ => {}
            }
        }
        let name = self.postscript_name.to_ascii_lowercase();
        if name.contains("mono") {
            FamilyClass::Monospace
        } else if name.contains("sans") {
            FamilyClass::SansSerif
        } else if name.contains("serif") || name.contains("times") {
            FamilyClass::Serif
        } else {
            FamilyClass::Unknown
        }
    }
}

impl fmt::Debug for SystemFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemFace")
            .field("postscript_name", &self.postscript_name)
            .field("index", &self.index)
            .finish()
    }
}

impl Face for SystemFace {
    fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    fn family_class(&self) -> FamilyClass {
        *self.class.get_or_init(|| self.classify())
    }

    fn units_per_em(&self) -> u16 {
        self.load_metrics().0
    }

    fn metrics(&self) -> FaceMetrics {
        self.load_metrics().1
    }

    fn shape(
        &self,
        request: &ShapeRequest<'_>,
        scratch: &mut ShapeScratch,
        output: &mut Vec<ShapedGlyph>,
    ) -> Result<(), ShapeError> {
        shape::shape_with_harfrust(self.blob.as_ref(), self.index, request, scratch, output)
    }
}
