// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use icu_properties::props::Script;

use super::utils::utf16;
use crate::script::{ScriptIterator, ScriptRun};

fn runs(text: &str) -> Vec<(Script, usize, usize)> {
    let units = utf16(text);
    ScriptIterator::new(&units, 0..units.len())
        .map(|ScriptRun { script, range }| (script, range.start, range.end))
        .collect()
}

#[test]
fn simple_text() {
    assert_eq!(runs("abcde"), vec![(Script::Latin, 0, 5)]);

    assert_eq!(
        runs("abアイウエオcde風"),
        vec![
            (Script::Latin, 0, 2),
            (Script::Katakana, 2, 7),
            (Script::Latin, 7, 10),
            (Script::Han, 10, 11),
        ]
    );

    assert_eq!(
        runs("bあアあ123あ亜亜亜亜あcd"),
        vec![
            (Script::Latin, 0, 1),
            (Script::Katakana, 1, 8),
            (Script::Han, 8, 12),
            (Script::Katakana, 12, 13),
            (Script::Latin, 13, 15),
        ]
    );
}

#[test]
fn simple_common_script_pairing() {
    assert_eq!(runs("ア(イウ)エオ"), vec![(Script::Katakana, 0, 7)]);

    // The parenthesis opened in Latin context closes as Latin even though
    // Katakana text intervenes.
    assert_eq!(
        runs("ab(アイウ)エオ"),
        vec![
            (Script::Latin, 0, 3),
            (Script::Katakana, 3, 6),
            (Script::Latin, 6, 7),
            (Script::Katakana, 7, 9),
        ]
    );
}

#[test]
fn script_extensions() {
    // Corner brackets have CJK script extensions; in pure Latin text they
    // stay with the surrounding run.
    assert_eq!(runs("ab「c」de"), vec![(Script::Latin, 0, 7)]);

    assert_eq!(
        runs("ア「ab」イウ"),
        vec![
            (Script::Katakana, 0, 2),
            (Script::Latin, 2, 4),
            (Script::Katakana, 4, 7),
        ]
    );

    // "「" and "」" have Katakana in their script extensions, making them
    // prefer Katakana to Latin.
    assert_eq!(
        runs("ab「ア」cd"),
        vec![
            (Script::Latin, 0, 2),
            (Script::Katakana, 2, 5),
            (Script::Latin, 5, 7),
        ]
    );
}

#[test]
fn katakana_and_hiragana_handled_the_same_way() {
    // Technically a lie (the text mixes Hiragana and Katakana), but
    // OpenType treats them as one script.
    assert_eq!(runs("あイうエお"), vec![(Script::Katakana, 0, 5)]);
}

#[test]
fn not_closed_pairs() {
    assert_eq!(
        runs("abcd(アイ[ウ>エ)オ"),
        vec![
            (Script::Latin, 0, 5),
            (Script::Katakana, 5, 11),
            (Script::Latin, 11, 12),
            (Script::Katakana, 12, 13),
        ]
    );
}

#[test]
fn pairs_working_both_ways() {
    assert_eq!(
        runs("abcd«アイ»オ"),
        vec![
            (Script::Latin, 0, 5),
            (Script::Katakana, 5, 7),
            (Script::Latin, 7, 8),
            (Script::Katakana, 8, 9),
        ]
    );

    assert_eq!(
        runs("abcd»アイ«オ"),
        vec![
            (Script::Latin, 0, 5),
            (Script::Katakana, 5, 7),
            (Script::Latin, 7, 8),
            (Script::Katakana, 8, 9),
        ]
    );

    // As a reference: an unmatched second "»" stays with the Katakana text.
    assert_eq!(
        runs("abcd»アイ»オ"),
        vec![
            (Script::Latin, 0, 5),
            (Script::Katakana, 5, 9),
        ]
    );
}

#[test]
fn common_only_text_is_one_common_run() {
    assert_eq!(runs("123 ()"), vec![(Script::Common, 0, 6)]);
    assert_eq!(runs(""), vec![]);
}

#[test]
fn supplementary_plane_offsets_are_code_units() {
    // U+20BB7 is Han and occupies two code units.
    assert_eq!(
        runs("a\u{20BB7}b"),
        vec![
            (Script::Latin, 0, 1),
            (Script::Han, 1, 3),
            (Script::Latin, 3, 4),
        ]
    );
}
