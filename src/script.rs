// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Script itemization.
//!
//! Assigns a fixed script to every code point of an interval, resolving
//! Common and Inherited through surrounding text, script extensions, and a
//! bounded stack of open bracket/quotation pairs (so that e.g. parentheses
//! opened in Latin text close as Latin even when CJK intervenes).

use core::ops::Range;

use icu_properties::props::Script;
use icu_properties::script::{ScriptWithExtensions, ScriptWithExtensionsBorrowed};
use icu_properties::{CodePointMapData, CodePointMapDataBorrowed};

use crate::script_data;
use crate::utf;

const SCRIPT_MAP: CodePointMapDataBorrowed<'static, Script> =
    CodePointMapData::<Script>::new();

fn script_extensions() -> ScriptWithExtensionsBorrowed<'static> {
    ScriptWithExtensions::new()
}

/// The script of a code point, with Hiragana collapsed into Katakana.
///
/// OpenType does not differentiate the two kana scripts, and collapsing them
/// keeps mixed kana text in a single run.
pub(crate) fn simplified_script(c: char) -> Script {
    let script = SCRIPT_MAP.get(c);
    if script == Script::Hiragana {
        Script::Katakana
    } else {
        script
    }
}

fn is_script_fixed(script: Script) -> bool {
    script != Script::Common && script != Script::Inherited
}

fn has_script(c: char, script: Script) -> bool {
    script_extensions().has_script(c, script)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ScriptRun {
    pub(crate) script: Script,
    pub(crate) range: Range<usize>,
}

#[derive(Copy, Clone)]
struct PairStart {
    codepoint: u32,
    script: Script,
}

const STACK_CAPACITY: usize = 128;

pub(crate) struct ScriptIterator<'a> {
    text: &'a [u16],
    end: usize,
    cursor: usize,
    run_start: usize,
    last_script: Script,
    stack: [PairStart; STACK_CAPACITY],
    stack_len: usize,
}

impl<'a> ScriptIterator<'a> {
    pub(crate) fn new(text: &'a [u16], range: Range<usize>) -> Self {
        let mut iterator = Self {
            text,
            end: range.end,
            cursor: range.start,
            run_start: range.start,
            last_script: Script::Common,
            stack: [PairStart {
                codepoint: 0,
                script: Script::Common,
            }; STACK_CAPACITY],
            stack_len: 0,
        };
        // Knowing the first fixed script from the start makes things much
        // easier.
        iterator.last_script = iterator.find_next_fixed_script();
        iterator
    }

    /// The next fixed script at or after the cursor, without moving it.
    /// Common if the rest of the interval has none.
    fn find_next_fixed_script(&self) -> Script {
        let mut index = self.cursor;
        while index < self.end {
            let (c, next) = utf::decode(self.text, index);
            index = next;
            let script = simplified_script(c);
            if is_script_fixed(script) {
                return script;
            }
        }
        Script::Common
    }

    pub(crate) fn find_next_run(&mut self) -> Option<ScriptRun> {
        if self.last_script == Script::Common && self.run_start < self.end {
            // The interval only contains Common/Inherited code points:
            // a single Common run covers all of it.
            let run = ScriptRun {
                script: Script::Common,
                range: self.run_start..self.end,
            };
            self.cursor = self.end;
            self.run_start = self.end;
            return Some(run);
        }

        while self.cursor < self.end {
            let codepoint_start = self.cursor;
            let (c, next) = utf::decode(self.text, self.cursor);
            self.cursor = next;
            let mut script = simplified_script(c);

            if script == Script::Inherited {
                script = self.last_script;
            } else if script == Script::Common {
                let codepoint = c as u32;
                let possible_pairs = script_data::possible_pair_ends(codepoint);
                if !possible_pairs.is_empty() {
                    for stack_index in (0..self.stack_len).rev() {
                        let stack_codepoint = self.stack[stack_index].codepoint;
                        if possible_pairs
                            .iter()
                            .any(|&(_, start)| start == stack_codepoint)
                        {
                            script = self.stack[stack_index].script;
                            self.stack_len = stack_index;
                            break;
                        }
                    }
                }

                if script == Script::Common {
                    if has_script(c, self.last_script) {
                        script = self.last_script;
                    } else {
                        let next_fixed = self.find_next_fixed_script();
                        if next_fixed != Script::Common && has_script(c, next_fixed) {
                            script = next_fixed;
                        } else {
                            script = self.last_script;
                        }
                    }

                    if script_data::is_pair_start(codepoint) {
                        if self.stack_len == STACK_CAPACITY {
                            // Overflow evicts the oldest entry.
                            self.stack.copy_within(1.., 0);
                        } else {
                            self.stack_len += 1;
                        }
                        self.stack[self.stack_len - 1] = PairStart { codepoint, script };
                    }
                }
            }

            if script != self.last_script {
                let run = ScriptRun {
                    script: self.last_script,
                    range: self.run_start..codepoint_start,
                };
                self.run_start = codepoint_start;
                self.last_script = script;
                return Some(run);
            }
        }

        if self.run_start == self.end {
            None
        } else {
            let run = ScriptRun {
                script: self.last_script,
                range: self.run_start..self.end,
            };
            self.run_start = self.end;
            Some(run)
        }
    }
}

impl Iterator for ScriptIterator<'_> {
    type Item = ScriptRun;

    fn next(&mut self) -> Option<Self::Item> {
        self.find_next_run()
    }
}
