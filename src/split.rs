// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run splitting.
//!
//! A paragraph starts as one run and is refined by four passes: language
//! (driven by script itemization), font, bidi direction, and forced line
//! breaks. Each pass walks a cursor over the run list, adding split points
//! or erasing runs; the line-break pass must come last so runs carrying
//! `end_of_line` are not split or thrown away afterwards.

use core::ops::Range;

use icu_properties::props::Script;

use crate::block::{first_run_after, TextBlock};
use crate::font::{is_font_size_similar, FontDescriptor};
use crate::language::{guess_language_for_script, is_script_used_for_language, Language};
use crate::newline::is_line_separator;
use crate::script::ScriptIterator;
use crate::shape::Direction;
use crate::utf::Codepoints;

/// A logically ordered slice of a paragraph, coherent in script, language,
/// font, direction and forced-line-break status.
#[derive(Clone, Debug)]
pub(crate) struct TextRun {
    pub(crate) range: Range<usize>,
    pub(crate) script: Script,
    pub(crate) language: Language,
    pub(crate) font: FontDescriptor,
    pub(crate) font_size: f32,
    pub(crate) direction: Direction,
    pub(crate) bidi_visual_index: u32,
    pub(crate) end_of_line: bool,
}

/// Cursor over the run list, preserving the splitting discipline: every run
/// is visited once per pass, and splits happen exactly at pass-supplied
/// indices.
struct RunCursor<'a> {
    runs: &'a mut Vec<TextRun>,
    index: usize,
}

impl<'a> RunCursor<'a> {
    fn new(runs: &'a mut Vec<TextRun>) -> Self {
        Self { runs, index: 0 }
    }

    /// Advances over every run ending at or before `index`, calling
    /// `visit` on each; a run straddling `index` is split there.
    fn run_goes_to(&mut self, index: usize, mut visit: impl FnMut(&mut TextRun)) {
        debug_assert!(self.index < self.runs.len());
        while self.runs[self.index].range.end < index {
            visit(&mut self.runs[self.index]);
            self.index += 1;
        }
        if self.runs[self.index].range.end == index {
            visit(&mut self.runs[self.index]);
            self.index += 1;
        } else {
            let mut head = self.runs[self.index].clone();
            head.range.end = index;
            visit(&mut head);
            self.runs[self.index].range.start = index;
            self.runs.insert(self.index, head);
            self.index += 1;
        }
    }

    /// Deletes or trims runs so that nothing before `index` remains at the
    /// cursor.
    fn throw_away_up_to(&mut self, index: usize) {
        debug_assert!(self.index < self.runs.len());
        while self.runs[self.index].range.end < index {
            self.index += 1;
        }
        if self.runs[self.index].range.end == index {
            self.runs.remove(self.index);
        } else {
            self.runs[self.index].range.start = index;
        }
    }

    fn previous_run(&mut self) -> &mut TextRun {
        debug_assert!(self.index > 0);
        &mut self.runs[self.index - 1]
    }
}

pub(crate) fn create_base_paragraph_runs(
    block: &TextBlock,
    paragraph: Range<usize>,
) -> Vec<TextRun> {
    let attributes = &block.attribute_runs()[first_run_after(block.attribute_runs(), paragraph.start)]
        .attributes;
    vec![TextRun {
        range: paragraph,
        script: Script::Common,
        language: Language::UNDEFINED,
        font: attributes.font.clone(),
        font_size: attributes.font_size,
        direction: Direction::Ltr,
        bidi_visual_index: 0,
        end_of_line: false,
    }]
}

pub(crate) fn split_runs(
    block: &TextBlock,
    paragraph: Range<usize>,
    preferred_languages: &[Language],
) -> Vec<TextRun> {
    let mut runs = create_base_paragraph_runs(block, paragraph.clone());
    if paragraph.is_empty() {
        return runs;
    }

    split_runs_by_language(&mut runs, block, paragraph.clone(), preferred_languages);
    split_runs_by_font(&mut runs, block, paragraph.clone());
    split_runs_by_direction(&mut runs, block, paragraph.clone());

    // Splitting in lines must be last to be sure runs with end_of_line set
    // are not split or thrown away.
    split_runs_in_lines(&mut runs, block, paragraph);

    runs
}

pub(crate) fn split_runs_by_language(
    runs: &mut Vec<TextRun>,
    block: &TextBlock,
    paragraph: Range<usize>,
    preferred_languages: &[Language],
) {
    let mut script_iterator = ScriptIterator::new(block.text(), paragraph.clone());
    let attribute_runs = block.attribute_runs();
    let mut attribute_index = first_run_after(attribute_runs, paragraph.start);

    let mut run_start = paragraph.start;
    let mut cursor = RunCursor::new(runs);

    let Some(mut script_run) = script_iterator.find_next_run() else {
        return;
    };
    let mut default_language = guess_language_for_script(script_run.script, preferred_languages);
    let mut previous_language = default_language;

    loop {
        while attribute_index < attribute_runs.len()
            && attribute_runs[attribute_index].range.end <= script_run.range.end
        {
            let mut language = attribute_runs[attribute_index].attributes.language;
            if !is_script_used_for_language(script_run.script, language) {
                language = default_language;
            }
            if language != previous_language {
                let run_end = attribute_runs[attribute_index]
                    .range
                    .start
                    .max(script_run.range.start);
                if run_start < run_end {
                    cursor.run_goes_to(run_end, |run| {
                        run.script = script_run.script;
                        run.language = previous_language;
                    });
                    run_start = run_end;
                }
                previous_language = language;
            }
            attribute_index += 1;
        }

        let run_end = script_run.range.end;
        if run_start < run_end {
            let language = if attribute_index == attribute_runs.len() {
                previous_language
            } else {
                let mut language = attribute_runs[attribute_index].attributes.language;
                if !is_script_used_for_language(script_run.script, language) {
                    language = default_language;
                }
                language
            };
            cursor.run_goes_to(run_end, |run| {
                run.script = script_run.script;
                run.language = language;
            });
            run_start = run_end;
        }

        match script_iterator.find_next_run() {
            Some(next) => {
                script_run = next;
                default_language =
                    guess_language_for_script(script_run.script, preferred_languages);
            }
            None => break,
        }
    }
}

pub(crate) fn split_runs_by_font(
    runs: &mut Vec<TextRun>,
    block: &TextBlock,
    paragraph: Range<usize>,
) {
    let mut cursor = RunCursor::new(runs);
    let attribute_runs = block.attribute_runs();
    let mut attribute_index = first_run_after(attribute_runs, paragraph.start);

    let mut font = attribute_runs[attribute_index].attributes.font.clone();
    let mut font_size = attribute_runs[attribute_index].attributes.font_size;

    attribute_index += 1;
    while attribute_index < attribute_runs.len()
        && attribute_runs[attribute_index].range.end <= paragraph.end
    {
        let attributes = &attribute_runs[attribute_index].attributes;
        if !is_font_size_similar(attributes.font_size, font_size) || attributes.font != font {
            let split_font = font.clone();
            cursor.run_goes_to(attribute_runs[attribute_index].range.start, |run| {
                run.font = split_font.clone();
                run.font_size = font_size;
            });
            font = attributes.font.clone();
            font_size = attributes.font_size;
        }
        attribute_index += 1;
    }
    let final_font = font;
    cursor.run_goes_to(paragraph.end, |run| {
        run.font = final_font.clone();
        run.font_size = font_size;
    });
}

pub(crate) fn split_runs_by_direction(
    runs: &mut Vec<TextRun>,
    block: &TextBlock,
    paragraph: Range<usize>,
) {
    let mut cursor = RunCursor::new(runs);
    let text = &block.text()[paragraph.clone()];
    let info = unicode_bidi::utf16::BidiInfo::new(text, None);
    let Some(paragraph_info) = info.paragraphs.first() else {
        return;
    };

    // All-even or all-odd levels mean a uniform paragraph direction.
    let any_rtl = info.levels.iter().any(|level| level.is_rtl());
    let all_rtl = !info.levels.is_empty() && info.levels.iter().all(|level| level.is_rtl());
    if !any_rtl || all_rtl {
        let direction = if all_rtl { Direction::Rtl } else { Direction::Ltr };
        for (visual_index, run) in cursor.runs.iter_mut().enumerate() {
            run.direction = direction;
            run.bidi_visual_index = visual_index as u32;
        }
    } else {
        let (levels, visual_runs) =
            info.visual_runs(paragraph_info, paragraph_info.range.clone());
        let mut ordered: Vec<(u32, Range<usize>, Direction)> = visual_runs
            .into_iter()
            .enumerate()
            .map(|(visual_index, run)| {
                let direction = if levels[run.start].is_rtl() {
                    Direction::Rtl
                } else {
                    Direction::Ltr
                };
                (
                    visual_index as u32,
                    paragraph.start + run.start..paragraph.start + run.end,
                    direction,
                )
            })
            .collect();
        ordered.sort_by_key(|(_, range, _)| range.start);

        let mut position = paragraph.start;
        for (visual_index, range, direction) in ordered {
            if range.start > position {
                // A logical region the analyzer does not cover.
                cursor.throw_away_up_to(range.start);
            }
            cursor.run_goes_to(range.end, |run| {
                run.direction = direction;
                run.bidi_visual_index = visual_index;
            });
            position = range.end;
        }
    }
}

pub(crate) fn split_runs_in_lines(
    runs: &mut Vec<TextRun>,
    block: &TextBlock,
    paragraph: Range<usize>,
) {
    let mut cursor = RunCursor::new(runs);
    for (c, range) in Codepoints::new(block.text(), paragraph) {
        if is_line_separator(c) {
            cursor.run_goes_to(range.start, |_| {});
            cursor.previous_run().end_of_line = true;
            cursor.throw_away_up_to(range.end);
        }
    }
}
