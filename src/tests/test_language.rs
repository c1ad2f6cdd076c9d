// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use icu_properties::props::Script;

use crate::language::{
    guess_language_for_script, is_script_used_for_language, predominant_language_for_script,
    Language,
};
use crate::tag::Tag;

fn language(code: &str, opentype: &str) -> Language {
    Language {
        code: Tag::new(code),
        opentype: Tag::new(opentype),
    }
}

#[test]
fn script_coverage() {
    assert!(is_script_used_for_language(
        Script::Hiragana,
        language("ja", "JAN")
    ));
    assert!(!is_script_used_for_language(
        Script::Latin,
        language("ja", "JAN")
    ));
    // Phonetic transcription uses IPA, written in Latin script.
    assert!(is_script_used_for_language(
        Script::Latin,
        language("ja", "IPPH")
    ));
    assert!(!is_script_used_for_language(Script::Latin, Language::UNDEFINED));
}

#[test]
fn predominant_languages() {
    // Latin has no safe predominant language.
    assert_eq!(predominant_language_for_script(Script::Latin), Language::UNDEFINED);
    assert_eq!(
        predominant_language_for_script(Script::Hiragana),
        language("ja", "JAN")
    );
    assert_eq!(
        predominant_language_for_script(Script::Hebrew),
        language("he", "IWR")
    );
}

#[test]
fn guessing_consults_preferences_first() {
    let en = Language::parse("en");
    let ja = Language::parse("ja");
    assert_eq!(guess_language_for_script(Script::Latin, &[en, ja]), en);
    assert_eq!(guess_language_for_script(Script::Katakana, &[en, ja]), ja);
    // No preference covers Katakana: fall back to the predominant language.
    assert_eq!(guess_language_for_script(Script::Katakana, &[en]), ja);
    assert_eq!(
        guess_language_for_script(Script::Latin, &[]),
        Language::UNDEFINED
    );
}

// The expectations below come from the lang-ietf-opentype mapping.
#[test]
fn parse_finds_language_code_and_opentype_tag() {
    assert_eq!(Language::parse("en"), language("en", "ENG"));
    assert_eq!(Language::parse("EN"), language("en", "ENG"));
    assert_eq!(Language::parse("en-US"), language("en", "ENG"));
    // Arabic
    assert_eq!(Language::parse("ar"), language("ar", "ARA"));
    assert_eq!(Language::parse("arb"), language("arb", "ARA"));
    assert_eq!(Language::parse("ar-Syrc"), language("ar", "GAR"));
    assert_eq!(Language::parse("ar-arb-Syrc"), language("ar", "GAR"));
    assert_eq!(Language::parse("apc"), language("apc", "ARA"));
    assert_eq!(Language::parse("apc-Syrc"), language("apc", "ARA"));
    assert_eq!(Language::parse("ary"), language("ary", "MOR"));
    assert_eq!(Language::parse("ar-ary"), language("ar", "MOR"));
    // Chinese
    assert_eq!(Language::parse("zh-CN"), language("zh", "ZHS"));
    assert_eq!(Language::parse("zh-HK"), language("zh", "ZHH"));
    assert_eq!(Language::parse("ZH-hk"), language("zh", "ZHH"));
    assert_eq!(Language::parse("zh-Hant-x-HK"), language("zh", "ZHT"));
    assert_eq!(Language::parse("zh-MO"), language("zh", "ZHT"));
    assert_eq!(Language::parse("zh-SG"), language("zh", "ZHS"));
    assert_eq!(Language::parse("zh-TW"), language("zh", "ZHT"));
    assert_eq!(Language::parse("zh-Hans"), language("zh", "ZHS"));
    assert_eq!(Language::parse("zh-Hant"), language("zh", "ZHT"));
    assert_eq!(Language::parse("zh-Hant-HK"), language("zh", "ZHH"));
    assert_eq!(Language::parse("zh-yue-Hant-HK"), language("zh", "ZHH"));
    assert_eq!(Language::parse("yue-HK"), language("yue", "ZHH"));
    assert_eq!(Language::parse("yue-Hant-HK"), language("yue", "ZHH"));
    assert_eq!(Language::parse("yue-Hant"), language("yue", "ZHT"));
    assert_eq!(Language::parse("yue"), language("yue", "ZHS"));
    // Greek
    assert_eq!(Language::parse("el"), language("el", "ELL"));
    assert_eq!(Language::parse("el-polyton"), language("el", "PGR"));
    assert_eq!(
        Language::parse("el-Grek-GR-polyton-x-wow"),
        language("el", "PGR")
    );
    // Others
    assert_eq!(Language::parse("cwd"), language("cwd", "DCR"));
    assert_eq!(Language::parse("ijc"), language("ijc", "IJO"));
    // IPA
    assert_eq!(Language::parse("und-fonipa"), language("und", "IPPH"));
    assert_eq!(Language::parse("en-fonipa"), language("en", "IPPH"));
    assert_eq!(Language::parse("zh-fonipa"), language("zh", "IPPH"));
    assert_eq!(Language::parse("ary-fonipa"), language("ary", "IPPH"));
    assert_eq!(Language::parse("en-US-fonipa"), language("en", "IPPH"));
    assert_eq!(Language::parse("ijc-fonipa"), language("ijc", "IPPH"));

    assert_eq!(Language::parse("und"), language("und", "dflt"));
}

#[test]
fn parse_accepts_any_non_letter_separator() {
    assert_eq!(Language::parse("zh_HK"), language("zh", "ZHH"));
    assert_eq!(Language::parse("zh_Hans_TW"), language("zh", "ZHS"));
    assert_eq!(Language::parse("zh_ANYTHING"), language("zh", "ZHS"));
    assert_eq!(Language::parse("fr_FR"), language("fr", "FRA"));
    assert_eq!(Language::parse("ja"), language("ja", "JAN"));
}

#[test]
fn parse_rejects_malformed_primary_subtags() {
    assert_eq!(Language::parse(""), Language::UNDEFINED);
    assert_eq!(Language::parse("x"), Language::UNDEFINED);
    assert_eq!(Language::parse("toolong"), Language::UNDEFINED);
    assert_eq!(Language::parse("12"), Language::UNDEFINED);
}
