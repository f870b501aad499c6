// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Language catalog for per-language font configuration.

use core::fmt;

/// An ISO 15924 script identifier (four ASCII letters).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Script {
    raw: [u8; 4],
}

impl Script {
    /// Creates a `Script` from raw ISO 15924 bytes.
    ///
    /// The input must be four ASCII bytes in canonical form. This function
    /// does not validate.
    pub const fn from_bytes(raw: [u8; 4]) -> Self {
        Self { raw }
    }

    /// Returns the raw ISO 15924 bytes.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.raw
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script(")?;
        fmt::Display::fmt(self, f)?;
        write!(f, ")")
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.raw {
            write!(f, "{}", byte as char)?;
        }
        Ok(())
    }
}

/// Identifier for a language in the catalog.
///
/// Wraps the BCP 47 tag of a catalog entry. Identifiers are interned
/// statically, so the type is `Copy` and comparisons are cheap.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct LanguageId(&'static str);

impl LanguageId {
    /// Returns the BCP 47 tag, such as `"ja-JP"`.
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Base writing direction of a language.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Left to right.
    Ltr,
    /// Right to left.
    Rtl,
}

/// One entry of the language catalog.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Language {
    /// Catalog identifier, also the BCP 47 tag.
    pub id: LanguageId,
    /// English display name.
    pub name: &'static str,
    /// Base writing direction.
    pub direction: Direction,
    /// Dominant script of the language.
    pub script: Script,
    /// Short pangram or representative phrase in the language itself.
    pub sample: &'static str,
}

macro_rules! lang {
    ($tag:literal, $name:literal, $dir:ident, $script:literal, $sample:literal) => {
        Language {
            id: LanguageId($tag),
            name: $name,
            direction: Direction::$dir,
            script: Script::from_bytes(*$script),
            sample: $sample,
        }
    };
}

const CATALOG: &[Language] = &[
    lang!("ar", "Arabic", Rtl, b"Arab", "نص حكيم له سر قاطع وذو شأن عظيم"),
    lang!("de-DE", "German", Ltr, b"Latn", "Zwölf Boxkämpfer jagen Viktor quer über den Sylter Deich"),
    lang!("el", "Greek", Ltr, b"Grek", "Ξεσκεπάζω την ψυχοφθόρα βδελυγμία"),
    lang!("en-US", "English", Ltr, b"Latn", "The quick brown fox jumps over the lazy dog"),
    lang!("es-ES", "Spanish", Ltr, b"Latn", "El veloz murciélago hindú comía feliz cardillo y kiwi"),
    lang!("fa", "Persian", Rtl, b"Arab", "بر اثر چنین تلقین و شستشوی مغزی جامعی"),
    lang!("fr-FR", "French", Ltr, b"Latn", "Portez ce vieux whisky au juge blond qui fume"),
    lang!("he", "Hebrew", Rtl, b"Hebr", "דג סקרן שט בים מאוכזב ולפתע מצא חברה"),
    lang!("hi", "Hindi", Ltr, b"Deva", "ऋषियों को सताने वाले दुष्ट राक्षसों के राजा रावण का सर्वनाश"),
    lang!("it-IT", "Italian", Ltr, b"Latn", "Pranzo d'acqua fa volti sghembi"),
    lang!("ja-JP", "Japanese", Ltr, b"Jpan", "いろはにほへと ちりぬるを わかよたれそ つねならむ"),
    lang!("ko-KR", "Korean", Ltr, b"Kore", "다람쥐 헌 쳇바퀴에 타고파"),
    lang!("nl-NL", "Dutch", Ltr, b"Latn", "Pa's wijze lynx bezag vroom het fikse aquaduct"),
    lang!("pl-PL", "Polish", Ltr, b"Latn", "Pchnąć w tę łódź jeża lub ośm skrzyń fig"),
    lang!("pt-BR", "Portuguese", Ltr, b"Latn", "Luís argüia à Júlia que brações, fé, chá, óxido, pôr, zângão eram palavras do português"),
    lang!("ru-RU", "Russian", Ltr, b"Cyrl", "Съешь же ещё этих мягких французских булок да выпей чаю"),
    lang!("th", "Thai", Ltr, b"Thai", "เป็นมนุษย์สุดประเสริฐเลิศคุณค่า"),
    lang!("tr-TR", "Turkish", Ltr, b"Latn", "Pijamalı hasta yağız şoföre çabucak güvendi"),
    lang!("uk-UA", "Ukrainian", Ltr, b"Cyrl", "Чуєш їх, доцю, га? Кумедна ж ти, прощайся без ґольфів"),
    lang!("vi-VN", "Vietnamese", Ltr, b"Latn", "Tôi có thể ăn thủy tinh mà không hại gì"),
    lang!("zh-CN", "Chinese (Simplified)", Ltr, b"Hans", "视远惟明 听德惟聪"),
    lang!("zh-TW", "Chinese (Traditional)", Ltr, b"Hant", "視遠惟明 聽德惟聰"),
];

/// Returns every language available for configuration, ordered by tag.
pub fn catalog() -> &'static [Language] {
    CATALOG
}

/// Looks up a catalog entry by its BCP 47 tag.
///
/// Matching is exact and case-sensitive; unknown tags yield `None`.
pub fn language(tag: &str) -> Option<&'static Language> {
    CATALOG
        .binary_search_by(|entry| entry.id.as_str().cmp(tag))
        .ok()
        .map(|index| &CATALOG[index])
}
