// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-paragraph break boundaries.
//!
//! The icu4x segmenters are forward-only, so each paragraph's UAX #14 line
//! break opportunities and UAX #29 grapheme cluster boundaries are computed
//! once up front into sorted offset tables. The tables answer the
//! `preceding`/`is_boundary` queries the line fitter needs, in absolute
//! text-block offsets.

use core::ops::Range;

use icu_properties::props::WhiteSpace;
use icu_properties::{CodePointSetData, CodePointSetDataBorrowed};
use icu_segmenter::options::LineBreakOptions;
use icu_segmenter::{GraphemeClusterSegmenter, LineSegmenter};

const WHITE_SPACE: CodePointSetDataBorrowed<'static> = CodePointSetData::new::<WhiteSpace>();

/// White space for line-fitting purposes. No-break spaces are excluded:
/// they must be handled as non-spacing characters at the end of a line.
pub(crate) fn is_breaking_whitespace(c: char) -> bool {
    !matches!(c, '\u{00A0}' | '\u{2007}' | '\u{202F}') && WHITE_SPACE.contains(c)
}

#[derive(Default)]
pub(crate) struct Boundaries {
    line: Vec<usize>,
    grapheme: Vec<usize>,
}

impl Boundaries {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Recomputes both tables for one paragraph.
    pub(crate) fn analyze(&mut self, text: &[u16], range: Range<usize>) {
        let slice = &text[range.clone()];

        self.line.clear();
        let line_segmenter = LineSegmenter::new_for_non_complex_scripts(LineBreakOptions::default());
        for boundary in line_segmenter.segment_utf16(slice) {
            self.line.push(range.start + boundary);
        }
        Self::canonicalize(&mut self.line, range.clone());

        self.grapheme.clear();
        let grapheme_segmenter = const { GraphemeClusterSegmenter::new() };
        for boundary in grapheme_segmenter.segment_utf16(slice) {
            self.grapheme.push(range.start + boundary);
        }
        Self::canonicalize(&mut self.grapheme, range);
    }

    // The segmenters report the interval edges, but guarantee it so the
    // fitter can rely on the paragraph start terminating preceding() walks.
    fn canonicalize(boundaries: &mut Vec<usize>, range: Range<usize>) {
        if boundaries.first() != Some(&range.start) {
            boundaries.insert(0, range.start);
        }
        if boundaries.last() != Some(&range.end) {
            boundaries.push(range.end);
        }
        boundaries.dedup();
    }

    fn preceding(boundaries: &[usize], offset: usize) -> Option<usize> {
        let index = boundaries.partition_point(|&b| b < offset);
        index.checked_sub(1).map(|i| boundaries[i])
    }

    fn following(boundaries: &[usize], offset: usize) -> Option<usize> {
        boundaries
            .get(boundaries.partition_point(|&b| b <= offset))
            .copied()
    }

    /// The closest line break opportunity strictly before `offset`.
    pub(crate) fn previous_line_break(&self, offset: usize) -> Option<usize> {
        Self::preceding(&self.line, offset)
    }

    pub(crate) fn is_line_boundary(&self, offset: usize) -> bool {
        self.line.binary_search(&offset).is_ok()
    }

    /// The closest grapheme cluster boundary strictly before `offset`.
    pub(crate) fn previous_grapheme(&self, offset: usize) -> Option<usize> {
        Self::preceding(&self.grapheme, offset)
    }

    /// The closest grapheme cluster boundary strictly after `offset`.
    pub(crate) fn next_grapheme(&self, offset: usize) -> Option<usize> {
        Self::following(&self.grapheme, offset)
    }

    pub(crate) fn is_grapheme_boundary(&self, offset: usize) -> bool {
        self.grapheme.binary_search(&offset).is_ok()
    }

    /// Number of grapheme clusters overlapping `range`.
    pub(crate) fn count_graphemes(&self, range: Range<usize>) -> usize {
        let mut count = 0;
        let mut offset = range.start;
        while offset < range.end {
            match Self::following(&self.grapheme, offset) {
                Some(next) => offset = next,
                None => break,
            }
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundaries(text: &str) -> (Boundaries, Vec<u16>) {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut b = Boundaries::new();
        b.analyze(&units, 0..units.len());
        (b, units)
    }

    #[test]
    fn line_breaks_after_spaces() {
        let (b, units) = boundaries("foo bar baz");
        assert!(b.is_line_boundary(4));
        assert!(b.is_line_boundary(8));
        assert!(!b.is_line_boundary(2));
        assert_eq!(b.previous_line_break(7), Some(4));
        assert_eq!(b.previous_line_break(4), Some(0));
        assert_eq!(b.previous_line_break(0), None);
        assert!(b.is_line_boundary(units.len()));
    }

    #[test]
    fn grapheme_boundaries_skip_combining_marks() {
        // "e" + COMBINING ACUTE ACCENT forms one grapheme cluster.
        let (b, units) = boundaries("ae\u{0301}b");
        assert!(b.is_grapheme_boundary(1));
        assert!(!b.is_grapheme_boundary(2));
        assert!(b.is_grapheme_boundary(3));
        assert_eq!(b.previous_grapheme(3), Some(1));
        assert_eq!(b.count_graphemes(0..units.len()), 3);
    }

    #[test]
    fn whitespace_classification_excludes_no_break_space() {
        assert!(is_breaking_whitespace(' '));
        assert!(is_breaking_whitespace('\t'));
        assert!(!is_breaking_whitespace('\u{00A0}'));
        assert!(!is_breaking_whitespace('a'));
    }
}
