// Copyright 2026 the Letterpress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font registry: name resolution and fallback chains (a wrapper around
//! a Fontique [`Collection`] and [`SourceCache`]).

mod face;

pub use face::{Face, FaceMetrics, FamilyClass, FontDescriptor, SystemFace};

pub(crate) use face::is_font_size_similar;

use std::sync::Arc;

use fontique::{Collection, CollectionOptions, FallbackKey, FamilyInfo, SourceCache};
use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::language::Language;
use crate::tag::Tag;

/// Provider of font fallback chains and language preferences, as consumed by
/// the typesetter. Implemented by [`FontContext`]; tests substitute
/// deterministic registries.
pub trait FontRegistry {
    /// The `index`-th font to try for text in `language` whose attributes
    /// request `base`. Index 0 is `base` itself; `None` signals an exhausted
    /// chain (tolerated, not an error).
    fn fallback(
        &mut self,
        base: &FontDescriptor,
        index: usize,
        language: Language,
    ) -> Option<FontDescriptor>;

    /// User-preferred languages consulted when guessing a language for a
    /// script.
    fn preferred_languages(&self) -> &[Language] {
        &[]
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct ChainKey {
    class: FamilyClass,
    language: Language,
}

type Chain = SmallVec<[FontDescriptor; 4]>;

/// A font database and fallback cache.
///
/// This type is designed to be a global resource with only one per
/// application (or per thread); the backing system-font store is shared
/// process-wide and lazily initialized.
pub struct FontContext {
    pub collection: Collection,
    pub source_cache: SourceCache,
    preferred_languages: Vec<Language>,
    by_postscript_name: HashMap<String, Option<FontDescriptor>>,
    chains: HashMap<ChainKey, Chain>,
}

impl FontContext {
    /// Creates a new context, discovering system fonts if available.
    pub fn new() -> Self {
        Self {
            collection: Collection::new(CollectionOptions {
                shared: true,
                system_fonts: true,
            }),
            source_cache: SourceCache::new_shared(),
            preferred_languages: Vec::new(),
            by_postscript_name: HashMap::new(),
            chains: HashMap::new(),
        }
    }

    /// Sets the user-preferred language list consulted when no language is
    /// declared for a run.
    pub fn set_preferred_languages(&mut self, languages: Vec<Language>) {
        self.preferred_languages = languages;
        self.chains.clear();
    }

    /// Resolves a PostScript name to a descriptor. Returns `None` on a miss,
    /// never fails.
    pub fn descriptor_from_postscript_name(&mut self, name: &str) -> Option<FontDescriptor> {
        if let Some(cached) = self.by_postscript_name.get(name) {
            return cached.clone();
        }
        let resolved = self.load_by_postscript_name(name);
        self.by_postscript_name
            .insert(name.to_string(), resolved.clone());
        resolved
    }

    fn load_by_postscript_name(&mut self, name: &str) -> Option<FontDescriptor> {
        let prefix = name.split('-').next().unwrap_or(name);
        let candidates = [
            name.to_string(),
            prefix.to_string(),
            split_camel_case(prefix),
        ];
        let mut family_default = None;
        for candidate in &candidates {
            let Some(family) = self.collection.family_by_name(candidate) else {
                continue;
            };
            if let Some(descriptor) = self.descriptor_in_family(&family, Some(name)) {
                return Some(descriptor);
            }
            if family_default.is_none() {
                family_default = self.descriptor_in_family(&family, None);
            }
        }
        family_default
    }

    /// The first usable face of `family`, optionally required to match a
    /// PostScript name.
    fn descriptor_in_family(
        &mut self,
        family: &FamilyInfo,
        postscript_name: Option<&str>,
    ) -> Option<FontDescriptor> {
        for font in family.fonts() {
            let Some(blob) = font.load(Some(&mut self.source_cache)) else {
                continue;
            };
            let Some(face) = SystemFace::new(blob, font.index()) else {
                continue;
            };
            if let Some(wanted) = postscript_name {
                if !face.postscript_name().eq_ignore_ascii_case(wanted) {
                    continue;
                }
            }
            return Some(FontDescriptor::new(Arc::new(face)));
        }
        None
    }

    fn chain(&mut self, class: FamilyClass, language: Language) -> &[FontDescriptor] {
        let key = ChainKey { class, language };
        if !self.chains.contains_key(&key) {
            let chain = self.build_chain(class, language);
            debug!(
                class = ?class,
                language = ?language.code,
                length = chain.len(),
                "built font fallback chain"
            );
            self.chains.insert(key.clone(), chain);
        }
        self.chains
            .get(&key)
            .map(|chain| chain.as_slice())
            .unwrap_or(&[])
    }

    fn build_chain(&mut self, class: FamilyClass, language: Language) -> Chain {
        let mut chain = Chain::new();
        let push = |chain: &mut Chain, descriptor: FontDescriptor| {
            if !chain.contains(&descriptor) {
                chain.push(descriptor);
            }
        };

        if let Some(name) = language_specific_face(class, language) {
            if let Some(descriptor) = self.descriptor_from_postscript_name(name) {
                push(&mut chain, descriptor);
            }
        }
        for name in class_fallback_names(class) {
            if let Some(descriptor) = self.descriptor_from_postscript_name(name) {
                push(&mut chain, descriptor);
            }
        }
        // Families the system tracks for the language's script, so missing
        // static entries still leave a usable chain.
        if let Some((script, locale)) = fallback_script_for_language(language) {
            let families: Vec<_> = match locale {
                Some(locale) => self
                    .collection
                    .fallback_families(FallbackKey::from((script, locale)))
                    .collect(),
                None => self
                    .collection
                    .fallback_families(FallbackKey::from(script))
                    .collect(),
            };
            for id in families {
                if let Some(family) = self.collection.family(id) {
                    if let Some(descriptor) = self.descriptor_in_family(&family, None) {
                        push(&mut chain, descriptor);
                    }
                }
            }
        }
        if let Some(descriptor) = self.descriptor_from_postscript_name(".LastResort") {
            push(&mut chain, descriptor);
        }
        chain
    }
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry for FontContext {
    fn fallback(
        &mut self,
        base: &FontDescriptor,
        index: usize,
        language: Language,
    ) -> Option<FontDescriptor> {
        if index == 0 {
            return Some(base.clone());
        }
        self.chain(base.family_class(), language)
            .get(index - 1)
            .cloned()
    }

    fn preferred_languages(&self) -> &[Language] {
        &self.preferred_languages
    }
}

/// "SourceSansPro" -> "Source Sans Pro".
fn split_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// The language-keyed first fallback entry (index 1 of the chain).
fn language_specific_face(class: FamilyClass, language: Language) -> Option<&'static str> {
    let code = language.code;
    let opentype = language.opentype;
    if code == Tag::new("ja") {
        return Some(match class {
            FamilyClass::Serif => "HiraMinProN-W3",
            _ => "HiraKakuProN-W3",
        });
    }
    if code == Tag::new("zh") || code == Tag::new("yue") {
        let traditional =
            opentype == Tag::new("ZHT") || opentype == Tag::new("ZHH");
        return Some(match (class, traditional) {
            (FamilyClass::Serif, false) => "STSongti-SC-Regular",
            (FamilyClass::Serif, true) => "STSongti-TC-Regular",
            (FamilyClass::Cursive, false) => "STKaiti-SC-Regular",
            (FamilyClass::Cursive, true) => "DFKaiShu-SB-Estd-BF",
            (_, false) => "STHeitiSC-Light",
            (_, true) => "STHeitiTC-Light",
        });
    }
    if code == Tag::new("ko") {
        return Some(match class {
            FamilyClass::Serif => "AppleMyungjo",
            _ => "AppleSDGothicNeo-Regular",
        });
    }
    None
}

/// The static per-family-class chain, ending with the last-resort face.
fn class_fallback_names(class: FamilyClass) -> &'static [&'static str] {
    match class {
        FamilyClass::Serif => &[
            "TimesNewRomanPSMT",
            "Times-Roman",
            "Georgia",
            "DejaVuSerif",
            "LiberationSerif",
        ],
        FamilyClass::Monospace => &[
            "Menlo-Regular",
            "Courier",
            "DejaVuSansMono",
            "LiberationMono",
        ],
        FamilyClass::Cursive => &["SnellRoundhand", "ComicSansMS", "DejaVuSans"],
        FamilyClass::Fantasy => &["Papyrus", "Impact", "DejaVuSans"],
        FamilyClass::SansSerif | FamilyClass::Unknown => &[
            "HelveticaNeue",
            "Helvetica",
            "ArialMT",
            "DejaVuSans",
            "LiberationSans",
        ],
    }
}

/// Maps a language to the script key fontique tracks for fallback.
fn fallback_script_for_language(
    language: Language,
) -> Option<(fontique::Script, Option<&'static str>)> {
    let code = language.code;
    let opentype = language.opentype;
    if code == Tag::new("ja") {
        Some((fontique::Script(*b"Hani"), Some("ja")))
    } else if code == Tag::new("ko") {
        Some((fontique::Script(*b"Hani"), Some("ko")))
    } else if code == Tag::new("zh") || code == Tag::new("yue") {
        let locale = if opentype == Tag::new("ZHH") {
            "zh-HK"
        } else if opentype == Tag::new("ZHT") {
            "zh-TW"
        } else {
            "zh-CN"
        };
        Some((fontique::Script(*b"Hani"), Some(locale)))
    } else if code == Tag::new("ar") {
        Some((fontique::Script(*b"Arab"), Some("ar")))
    } else if code == Tag::new("he") {
        Some((fontique::Script(*b"Hebr"), Some("he")))
    } else if code == Tag::new("th") {
        Some((fontique::Script(*b"Thai"), None))
    } else if code == Tag::new("hi") {
        Some((fontique::Script(*b"Deva"), Some("hi")))
    } else if code == Tag::new("ru") {
        Some((fontique::Script(*b"Cyrl"), None))
    } else if code == Tag::new("el") {
        Some((fontique::Script(*b"Grek"), None))
    } else if code == Tag::new("bn") {
        Some((fontique::Script(*b"Beng"), Some("bn")))
    } else if code == Tag::new("bo") {
        Some((fontique::Script(*b"Tibt"), Some("bo")))
    } else {
        None
    }
}
