// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The attributed text block consumed by the typesetter.

use core::ops::{Bound, Range, RangeBounds};

use crate::font::FontDescriptor;
use crate::language::Language;

/// Attributes carried by a range of text.
#[derive(Clone, Debug, PartialEq)]
pub struct Attributes {
    pub font: FontDescriptor,
    pub font_size: f32,
    pub language: Language,
}

/// One interval of the attribute partition.
#[derive(Clone, Debug)]
pub struct AttributeRun {
    pub range: Range<usize>,
    pub attributes: Attributes,
}

/// Text plus an ordered, non-overlapping, gap-free partition of it into
/// attribute runs.
///
/// The text is stored as UTF-16 code units and all offsets address them.
/// Every mutation re-establishes canonical form: adjacent runs with
/// identical attributes are merged, the first run starts at 0 and the last
/// ends at the text length. The typesetter takes a read-only view.
pub struct TextBlock {
    text: Vec<u16>,
    runs: Vec<AttributeRun>,
    default_attributes: Attributes,
}

impl TextBlock {
    /// Creates an empty block whose text will carry the given font and size
    /// (and no declared language) until overridden.
    pub fn new(font: FontDescriptor, font_size: f32) -> Self {
        let default_attributes = Attributes {
            font,
            font_size,
            language: Language::UNDEFINED,
        };
        Self {
            text: Vec::new(),
            runs: vec![AttributeRun {
                range: 0..0,
                attributes: default_attributes.clone(),
            }],
            default_attributes,
        }
    }

    /// Replaces the text. Attribute overrides do not survive; the whole new
    /// text carries the block's default attributes.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.encode_utf16().collect();
        self.reset_runs();
    }

    /// Replaces the text from UTF-16 code units.
    pub fn set_text_utf16(&mut self, text: &[u16]) {
        self.text = text.to_vec();
        self.reset_runs();
    }

    fn reset_runs(&mut self) {
        self.runs.clear();
        self.runs.push(AttributeRun {
            range: 0..self.text.len(),
            attributes: self.default_attributes.clone(),
        });
    }

    pub fn text(&self) -> &[u16] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn attribute_runs(&self) -> &[AttributeRun] {
        &self.runs
    }

    pub fn set_font_size(&mut self, font_size: f32, range: impl RangeBounds<usize>) {
        self.apply(range, |attributes| attributes.font_size = font_size);
    }

    pub fn set_font(&mut self, font: FontDescriptor, range: impl RangeBounds<usize>) {
        self.apply(range, |attributes| attributes.font = font.clone());
    }

    pub fn set_language(&mut self, language: Language, range: impl RangeBounds<usize>) {
        self.apply(range, |attributes| attributes.language = language);
    }

    fn apply(&mut self, range: impl RangeBounds<usize>, set: impl Fn(&mut Attributes)) {
        let range = self.resolve_range(range);
        if range.start >= range.end {
            return;
        }
        self.split_at(range.start);
        self.split_at(range.end);
        for run in &mut self.runs {
            if run.range.start >= range.start && run.range.end <= range.end {
                set(&mut run.attributes);
            }
        }
        self.merge_adjacent();
    }

    fn resolve_range(&self, range: impl RangeBounds<usize>) -> Range<usize> {
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
        };
        let end = match range.end_bound() {
            Bound::Unbounded => self.text.len(),
            Bound::Included(&n) => n + 1,
            Bound::Excluded(&n) => n,
        };
        start.min(self.text.len())..end.min(self.text.len())
    }

    fn split_at(&mut self, offset: usize) {
        if let Some(index) = self
            .runs
            .iter()
            .position(|run| run.range.start < offset && offset < run.range.end)
        {
            let mut tail = self.runs[index].clone();
            self.runs[index].range.end = offset;
            tail.range.start = offset;
            self.runs.insert(index + 1, tail);
        }
    }

    fn merge_adjacent(&mut self) {
        self.runs.dedup_by(|later, earlier| {
            if earlier.attributes == later.attributes {
                earlier.range.end = later.range.end;
                true
            } else {
                false
            }
        });
    }
}

/// Index of the first attribute run whose end is at or past `index`.
pub(crate) fn first_run_after(runs: &[AttributeRun], index: usize) -> usize {
    runs.partition_point(|run| run.range.end < index)
}
