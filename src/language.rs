// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Language identification and OpenType language-system tags.

use icu_properties::props::Script;

use crate::language_data::{self, condition};
use crate::tag::Tag;

pub(crate) const OPENTYPE_DEFAULT_LANGUAGE: Tag = Tag::new("dflt");
pub(crate) const OPENTYPE_PHONETIC_TRANSCRIPTION: Tag = Tag::new("IPPH");

/// A language as the typesetter sees it: a packed language code tag plus the
/// OpenType language-system tag used to select language specific font
/// features.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Language {
    /// Lowercased BCP47 primary subtag, space padded.
    pub code: Tag,
    /// OpenType language-system tag; `dflt` when unspecific.
    pub opentype: Tag,
}

impl Language {
    pub const UNDEFINED: Self = Self {
        code: Tag::UNKNOWN,
        opentype: OPENTYPE_DEFAULT_LANGUAGE,
    };

    pub(crate) const fn from_tags(code: &str, opentype: &str) -> Self {
        Self {
            code: Tag::new(code),
            opentype: Tag::new(opentype),
        }
    }

    pub fn is_undefined(&self) -> bool {
        self.code.is_unknown()
    }

    /// Parses a BCP47-style language string into a language code and its
    /// OpenType tag.
    ///
    /// The primary subtag must be 2 or 3 ASCII letters (case-insensitive);
    /// anything else yields [`Self::UNDEFINED`]. Subtags may be separated by
    /// any non-letter. A single-letter subtag ends parsing, `fonipa` selects
    /// the IPA tag, and other subtags contribute condition flags consulted
    /// against the per-language tag table (so `zh-Hant-HK` resolves to ZHH).
    pub fn parse(language: &str) -> Self {
        let bytes = language.as_bytes();
        let mut index = 0;
        while index < bytes.len() && bytes[index].is_ascii_alphabetic() {
            index += 1;
        }
        let code = match index {
            2 | 3 => {
                let mut packed = [0_u8; 3];
                for (slot, b) in packed[..index].iter_mut().zip(bytes) {
                    *slot = b.to_ascii_lowercase();
                }
                let text = core::str::from_utf8(&packed[..index]).unwrap_or("");
                Tag::new(text)
            }
            // Language codes must be 2 or 3 letters long.
            _ => return Self::UNDEFINED,
        };

        let rows = language_data::OPENTYPE_TAG_PER_LANGUAGE;
        let default_row = rows.partition_point(|row| row.language < code);
        let has_default = rows
            .get(default_row)
            .is_some_and(|row| row.language == code);

        // Fast path: no subtags at all.
        if has_default && index == bytes.len() {
            return Self {
                code,
                opentype: rows[default_row].opentype_tag,
            };
        }

        let mut condition_flags = condition::DEFAULT;
        let mut subtag = [0_u8; 8];
        while index < bytes.len() {
            while index < bytes.len() && !bytes[index].is_ascii_alphabetic() {
                index += 1;
            }
            if index == bytes.len() {
                break;
            }
            let subtag_start = index;
            while index < bytes.len() && bytes[index].is_ascii_alphabetic() {
                index += 1;
            }
            let len = index - subtag_start;
            if len == 1 {
                // A singleton starts an extension or private-use sequence.
                break;
            } else if len == 6 {
                if bytes[subtag_start..index].eq_ignore_ascii_case(b"fonipa") {
                    return Self {
                        code,
                        opentype: OPENTYPE_PHONETIC_TRANSCRIPTION,
                    };
                }
            } else if len <= subtag.len() {
                for (slot, b) in subtag[..len].iter_mut().zip(&bytes[subtag_start..index]) {
                    *slot = b.to_ascii_lowercase();
                }
                condition_flags |= language_data::condition_flag(&subtag[..len]);
            }
        }

        // Checked only now so that unknown languages still combine with
        // -fonipa above.
        if !has_default {
            return Self {
                code,
                opentype: OPENTYPE_DEFAULT_LANGUAGE,
            };
        }

        for row in rows[default_row + 1..]
            .iter()
            .take_while(|row| row.language == code)
        {
            if row.condition & condition_flags != 0 {
                return Self {
                    code,
                    opentype: row.opentype_tag,
                };
            }
        }

        Self {
            code,
            opentype: rows[default_row].opentype_tag,
        }
    }
}

/// True if `language` is known to be written in `script`.
pub(crate) fn is_script_used_for_language(script: Script, language: Language) -> bool {
    if script == Script::Latin && language.opentype == OPENTYPE_PHONETIC_TRANSCRIPTION {
        // Phonetic transcription uses IPA, which is written in Latin script.
        return true;
    }
    language_data::languages_using_script(script)
        .binary_search(&language.code)
        .is_ok()
}

pub(crate) fn predominant_language_for_script(script: Script) -> Language {
    language_data::predominant_language(script)
}

/// The language to assume for text in `script` when none is declared:
/// the first user-preferred language written in the script, or the script's
/// predominant language.
pub(crate) fn guess_language_for_script(script: Script, preferred: &[Language]) -> Language {
    for &language in preferred {
        if is_script_used_for_language(script, language) {
            return language;
        }
    }
    predominant_language_for_script(script)
}
