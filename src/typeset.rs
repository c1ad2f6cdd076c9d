// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paragraph typesetter and its line fitter.
//!
//! Runs are processed in logical order. For each run a reshape loop shapes a
//! sub-range, scans for missing coverage (driving font fallback), measures
//! fit against the remaining line width, and either commits the shape or
//! reshapes with a restricted range. Line breaks prefer UAX #14
//! opportunities snapped to grapheme boundaries, backtrack to the latest
//! saved breakpoint on the line, and fall back to cutting at grapheme
//! clusters. Width arithmetic inside a run is done in font units (the
//! shaper's unit); pixels only appear when a shape is committed to a line.

use core::ops::Range;

use tracing::{debug, trace};

use crate::analysis::{is_breaking_whitespace, Boundaries};
use crate::block::TextBlock;
use crate::error::TypesetError;
use crate::font::{is_font_size_similar, FontDescriptor, FontRegistry};
use crate::layout::{Glyph, TypesetLine, TypesetRun};
use crate::newline::Paragraphs;
use crate::shape::{Direction, ShapeRequest, ShapeScratch, ShapedGlyph};
use crate::split::{split_runs, TextRun};
use crate::utf;

/// A paragraph typesetter.
///
/// Owns the shaping buffer and break tables reused across calls; one
/// instance must not be used concurrently.
#[derive(Default)]
pub struct Typesetter {
    scratch: ShapeScratch,
    glyphs: Vec<ShapedGlyph>,
    boundaries: Boundaries,
}

impl Typesetter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typesets `block` into lines no wider than `available_width` pixels
    /// (except where a single cluster cannot fit).
    ///
    /// A pure function of its inputs modulo font loads. On error nothing is
    /// committed.
    pub fn position_glyphs<F: FontRegistry>(
        &mut self,
        fonts: &mut F,
        block: &TextBlock,
        available_width: f32,
    ) -> Result<Vec<TypesetLine>, TypesetError> {
        let mut lines = Vec::new();
        for paragraph in Paragraphs::new(block.text()) {
            self.typeset_paragraph(fonts, block, paragraph, available_width, &mut lines)?;
        }
        Ok(lines)
    }

    fn typeset_paragraph<F: FontRegistry>(
        &mut self,
        fonts: &mut F,
        block: &TextBlock,
        paragraph: Range<usize>,
        available_width: f32,
        lines: &mut Vec<TypesetLine>,
    ) -> Result<(), TypesetError> {
        self.boundaries.analyze(block.text(), paragraph.clone());
        let runs = split_runs(block, paragraph.clone(), fonts.preferred_languages());
        trace!(
            paragraph = ?paragraph,
            runs = runs.len(),
            "typesetting paragraph"
        );

        let mut fitter = LineFitter {
            text: block.text(),
            boundaries: &self.boundaries,
            scratch: &mut self.scratch,
            glyphs: &mut self.glyphs,
            lines,
            available_width: f64::from(available_width),
            paragraph_start: paragraph.start,
            current_text_width: 0.0,
            broke_line: false,
            save: None,
        };
        fitter.lines.push(TypesetLine::default());

        let mut run_index = 0;
        let mut reshape = None;
        while run_index < runs.len() {
            match fitter.typeset_run(fonts, &runs, run_index, reshape.take())? {
                Step::Advance => run_index += 1,
                Step::Revisit {
                    run_index: revisit,
                    reshape: restricted,
                } => {
                    run_index = revisit;
                    reshape = restricted;
                }
            }
        }
        fitter.finish_line();
        Ok(())
    }
}

/// What the fitter should do after a run: move on, or re-enter an earlier
/// run (after rolling back to a saved breakpoint), optionally with a
/// restricted reshape range.
enum Step {
    Advance,
    Revisit {
        run_index: usize,
        reshape: Option<(usize, usize)>,
    },
}

#[derive(Copy, Clone, Debug)]
struct SavedBreak {
    run_index: usize,
    start: usize,
    break_offset: usize,
    line_runs_len: usize,
    text_width: f64,
    at_end_of_run: bool,
}

struct LineFitter<'a> {
    text: &'a [u16],
    boundaries: &'a Boundaries,
    scratch: &'a mut ShapeScratch,
    glyphs: &'a mut Vec<ShapedGlyph>,
    lines: &'a mut Vec<TypesetLine>,
    available_width: f64,
    paragraph_start: usize,
    current_text_width: f64,
    broke_line: bool,
    save: Option<SavedBreak>,
}

impl LineFitter<'_> {
    fn typeset_run<F: FontRegistry>(
        &mut self,
        fonts: &mut F,
        runs: &[TextRun],
        run_index: usize,
        reshape: Option<(usize, usize)>,
    ) -> Result<Step, TypesetError> {
        let run = &runs[run_index];
        let run_end = run.range.end;
        let (mut current_start, mut current_end) =
            reshape.unwrap_or((run.range.start, run_end));
        let mut fallback_index = 0_usize;
        let mut scan_fallback = true;
        let mut face = run.font.clone();
        let mut sub_index = 0_u32;
        // Snapshot of the line just before the most recent commit, for the
        // mid-run saved breakpoint.
        let mut runs_len_before_commit = self.line_runs_len();
        let mut width_before_commit = self.current_text_width;

        if current_start >= current_end {
            if run.end_of_line {
                self.start_new_line();
            }
            return Ok(Step::Advance);
        }

        'reshape: loop {
            if scan_fallback {
                match fonts.fallback(&run.font, fallback_index, run.language) {
                    Some(resolved) => face = resolved,
                    None => {
                        // Exhausted chain: keep the last face and tolerate
                        // its missing coverage.
                        debug!(
                            font = face.postscript_name(),
                            fallback_index, "font fallback chain exhausted"
                        );
                        scan_fallback = false;
                    }
                }
            }
            self.shape(&face, run, current_start..current_end)?;

            if scan_fallback {
                let count = self.glyphs.len();
                let logical = |i: usize| match run.direction {
                    Direction::Ltr => i,
                    Direction::Rtl => count - 1 - i,
                };
                let missing = (0..count).find(|&i| self.glyphs[logical(i)].id == 0);
                if let Some(missing) = missing {
                    let missing_cluster = self.glyphs[logical(missing)].cluster;
                    if missing_cluster == current_start {
                        // The run starts uncovered: bound the uncovered
                        // stretch and try the next font in the chain on it.
                        for i in missing + 1..count {
                            let glyph = self.glyphs[logical(i)];
                            if glyph.id != 0 {
                                current_end = glyph.cluster;
                                break;
                            }
                        }
                        fallback_index += 1;
                        continue 'reshape;
                    }
                    // Coverage ends mid-run: shape the covered head alone.
                    current_end = missing_cluster;
                    continue 'reshape;
                }
            }

            let upem = i64::from(face.units_per_em().max(1));
            let size = f64::from(run.font_size);
            let available_units = ((self.available_width - self.current_text_width)
                * upem as f64
                / size)
                .floor() as i64;
            let fitting = self.count_glyphs_that_fit(available_units);

            let break_offset;
            if fitting == self.glyphs.len() {
                break_offset = current_end;
            } else {
                let offset_after_fitting = self.glyphs[fitting].cluster;
                let offset_after_cluster =
                    self.offset_after_glyph_cluster(fitting, current_end);
                let candidate = self.previous_break(offset_after_cluster);
                self.broke_line = true;

                if candidate <= current_start {
                    if let Some(save) = self.save.take() {
                        // No break point in this sub-range: roll the line
                        // back to the saved breakpoint.
                        debug!(?save, "rolling back to saved breakpoint");
                        let line = self.current_line();
                        line.runs.truncate(save.line_runs_len);
                        self.current_text_width = save.text_width;
                        if save.at_end_of_run {
                            self.start_new_line();
                            return Ok(Step::Revisit {
                                run_index: save.run_index + 1,
                                reshape: None,
                            });
                        }
                        return Ok(Step::Revisit {
                            run_index: save.run_index,
                            reshape: Some((save.start, save.break_offset)),
                        });
                    }
                    // No line break boundary fits, so cut by grapheme
                    // cluster.
                    let graphemes = self
                        .boundaries
                        .count_graphemes(offset_after_fitting..offset_after_cluster);
                    let mut cut = offset_after_fitting;
                    if graphemes != 1 {
                        match self.boundaries.previous_grapheme(offset_after_cluster) {
                            Some(shrunk) if shrunk > current_start => {
                                // Part of the cluster might fit; retry
                                // shaping up to the previous grapheme
                                // boundary.
                                current_end = shrunk;
                                continue 'reshape;
                            }
                            _ => {}
                        }
                    }
                    if cut <= current_start {
                        if self.current_text_width == 0.0 {
                            // The line is empty and still nothing fits: a
                            // grapheme cluster is never split, so the first
                            // one overflows on this line.
                            cut = self
                                .boundaries
                                .next_grapheme(current_start)
                                .unwrap_or(current_end)
                                .min(current_end);
                        }
                        // Otherwise commit nothing and let the cluster
                        // retry on a fresh line.
                    }
                    self.shape(&face, run, current_start..cut)?;
                    break_offset = cut;
                } else {
                    if candidate > offset_after_fitting {
                        // Breaking inside a shaped cluster would require
                        // reshaping with a restricted end.
                        return Err(TypesetError::Invariant(
                            "line break opportunity inside a glyph cluster",
                        ));
                    }
                    self.shape(&face, run, current_start..candidate)?;
                    break_offset = candidate;
                }
            }

            runs_len_before_commit = self.line_runs_len();
            width_before_commit = self.current_text_width;
            self.output_shape(&face, run, sub_index);
            sub_index += 1;

            if break_offset < run_end {
                if self.broke_line {
                    self.start_new_line();
                }
                current_start = break_offset;
                current_end = run_end;
                fallback_index = 0;
                scan_fallback = true;
                face = run.font.clone();
                continue 'reshape;
            }
            break 'reshape;
        }

        if run.end_of_line {
            self.start_new_line();
        } else if self.boundaries.is_line_boundary(run_end)
            && self.boundaries.is_grapheme_boundary(run_end)
        {
            self.save = Some(SavedBreak {
                run_index,
                start: current_start,
                break_offset: run_end,
                line_runs_len: self.line_runs_len(),
                text_width: self.current_text_width,
                at_end_of_run: true,
            });
        } else {
            let candidate = self.previous_break(run_end);
            if candidate > current_start && candidate < run_end {
                self.save = Some(SavedBreak {
                    run_index,
                    start: current_start,
                    break_offset: candidate,
                    line_runs_len: runs_len_before_commit,
                    text_width: width_before_commit,
                    at_end_of_run: false,
                });
            }
        }
        Ok(Step::Advance)
    }

    fn shape(
        &mut self,
        face: &FontDescriptor,
        run: &TextRun,
        range: Range<usize>,
    ) -> Result<(), TypesetError> {
        let request = ShapeRequest {
            text: self.text,
            range,
            script: run.script,
            language: run.language,
            direction: run.direction,
        };
        face.face().shape(&request, self.scratch, self.glyphs)?;
        Ok(())
    }

    /// Number of leading glyphs (in visual order) whose cumulative advance
    /// stays within `available` font units.
    ///
    /// The first glyph on a line always fits, and a glyph forming a whole
    /// cluster of one breaking-whitespace code point never overflows
    /// (trailing spaces hang past the line end).
    fn count_glyphs_that_fit(&self, available: i64) -> usize {
        let at_line_start = self.current_text_width == 0.0;
        let mut x: i64 = 0;
        for (index, glyph) in self.glyphs.iter().enumerate() {
            if index > 0 || !at_line_start {
                let cluster = glyph.cluster;
                let at_cluster_start = index == 0 || self.glyphs[index - 1].cluster != cluster;
                let at_cluster_end = index == self.glyphs.len() - 1
                    || self.glyphs[index + 1].cluster != cluster;
                let width_ignored_at_line_end = at_cluster_start
                    && at_cluster_end
                    && is_breaking_whitespace(utf::codepoint_at(self.text, cluster));
                if !width_ignored_at_line_end && x + i64::from(glyph.x_advance) > available {
                    return index;
                }
            }
            x += i64::from(glyph.x_advance);
        }
        self.glyphs.len()
    }

    /// The text offset just past the cluster of `glyph_index`.
    fn offset_after_glyph_cluster(&self, glyph_index: usize, default_end: usize) -> usize {
        let cluster = self.glyphs[glyph_index].cluster;
        for glyph in &self.glyphs[glyph_index + 1..] {
            if glyph.cluster != cluster {
                return glyph.cluster;
            }
        }
        default_end
    }

    /// The closest line break opportunity before `offset` that is also a
    /// grapheme cluster boundary (break opportunities between a space and a
    /// combining mark are ignored).
    fn previous_break(&self, mut offset: usize) -> usize {
        loop {
            match self.boundaries.previous_line_break(offset) {
                Some(candidate) => {
                    offset = candidate;
                    if self.boundaries.is_grapheme_boundary(offset) {
                        return offset;
                    }
                }
                None => return self.paragraph_start,
            }
        }
    }

    fn line_runs_len(&self) -> usize {
        self.lines.last().map(|line| line.runs.len()).unwrap_or(0)
    }

    fn current_line(&mut self) -> &mut TypesetLine {
        self.lines.last_mut().expect("a current line always exists")
    }

    /// Commits the shaped glyphs to the current line as one typeset run,
    /// converting font units to pixels and updating the line metrics.
    fn output_shape(&mut self, face: &FontDescriptor, run: &TextRun, sub_index: u32) {
        let metrics = face.metrics();
        let upem = f64::from(face.units_per_em().max(1));
        let scale = f64::from(run.font_size) / upem;

        let mut advance_units: i64 = 0;
        let mut glyphs = Vec::with_capacity(self.glyphs.len());
        for glyph in self.glyphs.iter() {
            glyphs.push(Glyph {
                id: glyph.id,
                x_advance: (f64::from(glyph.x_advance) * scale) as f32,
                y_advance: (f64::from(glyph.y_advance) * scale) as f32,
                x_offset: (f64::from(glyph.x_offset) * scale) as f32,
                y_offset: (f64::from(glyph.y_offset) * scale) as f32,
                cluster: glyph.cluster,
            });
            advance_units += i64::from(glyph.x_advance);
        }

        let has_glyphs = !glyphs.is_empty();
        let ascent = (f64::from(metrics.ascender) * scale).round().max(0.0) as f32;
        let descent = (f64::from(-metrics.descender) * scale).round().max(0.0) as f32;
        let leading = (f64::from(metrics.leading()) * scale).round().max(0.0) as f32;

        let line = self.current_line();
        line.runs.push(TypesetRun {
            font: face.clone(),
            font_size: run.font_size,
            direction: run.direction,
            bidi_visual_index: run.bidi_visual_index,
            bidi_visual_sub_index: sub_index,
            glyphs,
        });
        if has_glyphs {
            line.ascent = line.ascent.max(ascent);
            line.descent = line.descent.max(descent);
            line.leading = line.leading.max(leading);
            self.current_text_width += advance_units as f64 * scale;
        }
    }

    fn start_new_line(&mut self) {
        self.finish_line();
        self.lines.push(TypesetLine::default());
        self.current_text_width = 0.0;
        self.save = None;
        self.broke_line = false;
    }

    /// Visual reorder and merge pass for the line being completed:
    /// stable-sort by (visual index, visual sub-index), erase empty runs,
    /// and concatenate adjacent runs sharing direction, font and a similar
    /// size.
    fn finish_line(&mut self) {
        let Some(line) = self.lines.last_mut() else {
            return;
        };
        line.runs
            .sort_by_key(|run| (run.bidi_visual_index, run.bidi_visual_sub_index));
        line.runs.retain(|run| !run.glyphs.is_empty());
        line.runs.dedup_by(|later, earlier| {
            if earlier.direction == later.direction
                && earlier.font == later.font
                && is_font_size_similar(earlier.font_size, later.font_size)
            {
                earlier.glyphs.append(&mut later.glyphs);
                true
            } else {
                false
            }
        });
    }
}
