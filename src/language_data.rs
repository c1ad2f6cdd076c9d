// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static language tables.
//!
//! Three tables drive language resolution:
//! - the predominant language per script,
//! - the languages known to be written in each script,
//! - the OpenType language-system tag per language, with optional condition
//!   flags selecting region/script/variant specific tags (derived from the
//!   lang-ietf-opentype mapping).

use icu_properties::props::Script;

use crate::language::Language;
use crate::tag::Tag;

pub(crate) mod condition {
    pub(crate) const DEFAULT: u32 = 1;
    pub(crate) const HANS: u32 = 1 << 1;
    pub(crate) const HANT: u32 = 1 << 2;
    pub(crate) const HONG_KONG: u32 = 1 << 3;
    pub(crate) const MACAU: u32 = 1 << 4;
    pub(crate) const TAIWAN: u32 = 1 << 5;
    pub(crate) const SYRIAC: u32 = 1 << 6;
    pub(crate) const MOROCCAN: u32 = 1 << 7;
    pub(crate) const POLYTONIC: u32 = 1 << 8;
}

/// The condition flag contributed by a lowercased subtag, 0 if none.
pub(crate) fn condition_flag(subtag: &[u8]) -> u32 {
    match subtag {
        b"hans" => condition::HANS,
        b"hant" => condition::HANT,
        b"hk" => condition::HONG_KONG,
        b"mo" => condition::MACAU,
        b"tw" => condition::TAIWAN,
        b"syrc" => condition::SYRIAC,
        b"ary" => condition::MOROCCAN,
        b"polyton" => condition::POLYTONIC,
        _ => 0,
    }
}

pub(crate) struct OpenTypeTagRow {
    pub(crate) language: Tag,
    pub(crate) opentype_tag: Tag,
    pub(crate) condition: u32,
}

const fn row(language: &str, opentype_tag: &str, condition: u32) -> OpenTypeTagRow {
    OpenTypeTagRow {
        language: Tag::new(language),
        opentype_tag: Tag::new(opentype_tag),
        condition,
    }
}

/// Sorted by language tag; the first row of each language is its default
/// tag, condition rows follow in precedence order.
pub(crate) static OPENTYPE_TAG_PER_LANGUAGE: &[OpenTypeTagRow] = &[
    row("af", "AFK", condition::DEFAULT),
    row("am", "AMH", condition::DEFAULT),
    row("apc", "ARA", condition::DEFAULT),
    row("ar", "ARA", condition::DEFAULT),
    row("ar", "GAR", condition::SYRIAC),
    row("ar", "MOR", condition::MOROCCAN),
    row("arb", "ARA", condition::DEFAULT),
    row("ary", "MOR", condition::DEFAULT),
    row("as", "ASM", condition::DEFAULT),
    row("az", "AZE", condition::DEFAULT),
    row("be", "BEL", condition::DEFAULT),
    row("bg", "BGR", condition::DEFAULT),
    row("bn", "BEN", condition::DEFAULT),
    row("bo", "TIB", condition::DEFAULT),
    row("ca", "CAT", condition::DEFAULT),
    row("cs", "CSY", condition::DEFAULT),
    row("cwd", "DCR", condition::DEFAULT),
    row("cy", "WEL", condition::DEFAULT),
    row("da", "DAN", condition::DEFAULT),
    row("de", "DEU", condition::DEFAULT),
    row("dz", "DZN", condition::DEFAULT),
    row("el", "ELL", condition::DEFAULT),
    row("el", "PGR", condition::POLYTONIC),
    row("en", "ENG", condition::DEFAULT),
    row("eo", "NTO", condition::DEFAULT),
    row("es", "ESP", condition::DEFAULT),
    row("et", "ETI", condition::DEFAULT),
    row("eu", "EUQ", condition::DEFAULT),
    row("fa", "FAR", condition::DEFAULT),
    row("fi", "FIN", condition::DEFAULT),
    row("fil", "PIL", condition::DEFAULT),
    row("fr", "FRA", condition::DEFAULT),
    row("ga", "IRI", condition::DEFAULT),
    row("gu", "GUJ", condition::DEFAULT),
    row("he", "IWR", condition::DEFAULT),
    row("hi", "HIN", condition::DEFAULT),
    row("hr", "HRV", condition::DEFAULT),
    row("hu", "HUN", condition::DEFAULT),
    row("hy", "HYE", condition::DEFAULT),
    row("id", "IND", condition::DEFAULT),
    row("ijc", "IJO", condition::DEFAULT),
    row("is", "ISL", condition::DEFAULT),
    row("it", "ITA", condition::DEFAULT),
    row("ja", "JAN", condition::DEFAULT),
    row("ka", "KAT", condition::DEFAULT),
    row("kk", "KAZ", condition::DEFAULT),
    row("km", "KHM", condition::DEFAULT),
    row("kn", "KAN", condition::DEFAULT),
    row("ko", "KOR", condition::DEFAULT),
    row("ks", "KSH", condition::DEFAULT),
    row("ku", "KUR", condition::DEFAULT),
    row("ky", "KIR", condition::DEFAULT),
    row("lo", "LAO", condition::DEFAULT),
    row("lt", "LTH", condition::DEFAULT),
    row("lv", "LVI", condition::DEFAULT),
    row("mk", "MKD", condition::DEFAULT),
    row("ml", "MAL", condition::DEFAULT),
    row("mn", "MNG", condition::DEFAULT),
    row("mr", "MAR", condition::DEFAULT),
    row("ms", "MLY", condition::DEFAULT),
    row("my", "BRM", condition::DEFAULT),
    row("nb", "NOR", condition::DEFAULT),
    row("ne", "NEP", condition::DEFAULT),
    row("nl", "NLD", condition::DEFAULT),
    row("nn", "NYN", condition::DEFAULT),
    row("no", "NOR", condition::DEFAULT),
    row("or", "ORI", condition::DEFAULT),
    row("pa", "PAN", condition::DEFAULT),
    row("pl", "PLK", condition::DEFAULT),
    row("ps", "PAS", condition::DEFAULT),
    row("pt", "PTG", condition::DEFAULT),
    row("ro", "ROM", condition::DEFAULT),
    row("ru", "RUS", condition::DEFAULT),
    row("sa", "SAN", condition::DEFAULT),
    row("sd", "SND", condition::DEFAULT),
    row("si", "SNH", condition::DEFAULT),
    row("sk", "SKY", condition::DEFAULT),
    row("sl", "SLV", condition::DEFAULT),
    row("sq", "SQI", condition::DEFAULT),
    row("sr", "SRB", condition::DEFAULT),
    row("sv", "SVE", condition::DEFAULT),
    row("sw", "SWK", condition::DEFAULT),
    row("ta", "TAM", condition::DEFAULT),
    row("te", "TEL", condition::DEFAULT),
    row("th", "THA", condition::DEFAULT),
    row("tr", "TRK", condition::DEFAULT),
    row("ug", "UYG", condition::DEFAULT),
    row("uk", "UKR", condition::DEFAULT),
    row("ur", "URD", condition::DEFAULT),
    row("uz", "UZB", condition::DEFAULT),
    row("vi", "VIT", condition::DEFAULT),
    row("yi", "JII", condition::DEFAULT),
    row("yue", "ZHS", condition::DEFAULT),
    row("yue", "ZHH", condition::HONG_KONG),
    row("yue", "ZHT", condition::HANT),
    row("zh", "ZHS", condition::DEFAULT),
    // Order matters: an explicit Hans wins over any region, Hong Kong wins
    // over an explicit Hant.
    row("zh", "ZHS", condition::HANS),
    row("zh", "ZHH", condition::HONG_KONG),
    row("zh", "ZHT", condition::HANT | condition::TAIWAN | condition::MACAU),
];

macro_rules! tags {
    ($($code:literal),* $(,)?) => {
        const { &[$(Tag::new($code)),*] }
    };
}

/// The languages known to use `script`, sorted by language tag.
pub(crate) fn languages_using_script(script: Script) -> &'static [Tag] {
    match script {
        s if s == Script::Latin => tags![
            "af", "az", "ca", "cs", "cy", "da", "de", "en", "eo", "es", "et", "eu", "fi",
            "fil", "fr", "ga", "hr", "hu", "id", "is", "it", "lt", "lv", "ms", "nb", "nl",
            "nn", "no", "pl", "pt", "ro", "sk", "sl", "sq", "sv", "sw", "tr", "uz", "vi",
        ],
        s if s == Script::Cyrillic => tags![
            "be", "bg", "kk", "ky", "mk", "mn", "ru", "sr", "uk", "uz",
        ],
        s if s == Script::Greek => tags!["el"],
        s if s == Script::Han => tags!["ja", "ko", "yue", "zh"],
        s if s == Script::Katakana || s == Script::Hiragana => tags!["ja"],
        s if s == Script::Hangul => tags!["ko"],
        s if s == Script::Arabic => tags![
            "apc", "ar", "arb", "ary", "fa", "ks", "ku", "ps", "sd", "ug", "ur",
        ],
        s if s == Script::Hebrew => tags!["he", "yi"],
        s if s == Script::Thai => tags!["th"],
        s if s == Script::Devanagari => tags!["hi", "mr", "ne", "sa"],
        s if s == Script::Bengali => tags!["as", "bn"],
        s if s == Script::Tamil => tags!["ta"],
        s if s == Script::Telugu => tags!["te"],
        s if s == Script::Kannada => tags!["kn"],
        s if s == Script::Malayalam => tags!["ml"],
        s if s == Script::Gujarati => tags!["gu"],
        s if s == Script::Gurmukhi => tags!["pa"],
        s if s == Script::Oriya => tags!["or"],
        s if s == Script::Sinhala => tags!["si"],
        s if s == Script::Myanmar => tags!["my"],
        s if s == Script::Khmer => tags!["km"],
        s if s == Script::Lao => tags!["lo"],
        s if s == Script::Georgian => tags!["ka"],
        s if s == Script::Armenian => tags!["hy"],
        s if s == Script::Ethiopian => tags!["am"],
        s if s == Script::Tibetan => tags!["bo", "dz"],
        s if s == Script::Mongolian => tags!["mn"],
        _ => &[],
    }
}

/// The most likely language for text in `script`.
///
/// Latin deliberately maps to the undefined language: it is used by too many
/// languages for any one to be a safe guess.
pub(crate) fn predominant_language(script: Script) -> Language {
    match script {
        s if s == Script::Katakana || s == Script::Hiragana => Language::from_tags("ja", "JAN"),
        s if s == Script::Han => Language::from_tags("zh", "ZHS"),
        s if s == Script::Hangul => Language::from_tags("ko", "KOR"),
        s if s == Script::Cyrillic => Language::from_tags("ru", "RUS"),
        s if s == Script::Greek => Language::from_tags("el", "ELL"),
        s if s == Script::Arabic => Language::from_tags("ar", "ARA"),
        s if s == Script::Hebrew => Language::from_tags("he", "IWR"),
        s if s == Script::Thai => Language::from_tags("th", "THA"),
        s if s == Script::Devanagari => Language::from_tags("hi", "HIN"),
        s if s == Script::Bengali => Language::from_tags("bn", "BEN"),
        s if s == Script::Tamil => Language::from_tags("ta", "TAM"),
        s if s == Script::Telugu => Language::from_tags("te", "TEL"),
        s if s == Script::Kannada => Language::from_tags("kn", "KAN"),
        s if s == Script::Malayalam => Language::from_tags("ml", "MAL"),
        s if s == Script::Gujarati => Language::from_tags("gu", "GUJ"),
        s if s == Script::Gurmukhi => Language::from_tags("pa", "PAN"),
        s if s == Script::Oriya => Language::from_tags("or", "ORI"),
        s if s == Script::Sinhala => Language::from_tags("si", "SNH"),
        s if s == Script::Myanmar => Language::from_tags("my", "BRM"),
        s if s == Script::Khmer => Language::from_tags("km", "KHM"),
        s if s == Script::Lao => Language::from_tags("lo", "LAO"),
        s if s == Script::Georgian => Language::from_tags("ka", "KAT"),
        s if s == Script::Armenian => Language::from_tags("hy", "HYE"),
        s if s == Script::Ethiopian => Language::from_tags("am", "AMH"),
        s if s == Script::Tibetan => Language::from_tags("bo", "TIB"),
        s if s == Script::Mongolian => Language::from_tags("mn", "MNG"),
        _ => Language::UNDEFINED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opentype_rows_are_sorted_with_defaults_first() {
        for pair in OPENTYPE_TAG_PER_LANGUAGE.windows(2) {
            assert!(pair[0].language <= pair[1].language);
            if pair[0].language < pair[1].language {
                assert_ne!(pair[1].condition & condition::DEFAULT, 0);
            }
        }
        assert_ne!(OPENTYPE_TAG_PER_LANGUAGE[0].condition & condition::DEFAULT, 0);
    }

    #[test]
    fn language_pools_are_sorted() {
        for script in [Script::Latin, Script::Cyrillic, Script::Arabic, Script::Han] {
            let pool = languages_using_script(script);
            assert!(pool.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
