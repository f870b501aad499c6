// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Abstraction over parsed font data.

/// Access to the metric and character-map tables of a parsed font.
///
/// The core never decodes font binaries itself; it consumes an object that
/// answers a small set of table queries. All queries are pure functions of
/// the underlying tables. A skrifa-backed implementation is provided by
/// [`ParsedFont`](crate::ParsedFont); tests supply lightweight fakes.
pub trait FontHandle {
    /// Size of the em square in font units.
    fn units_per_em(&self) -> u16;

    /// Ascender from the horizontal header table, in font units.
    fn hhea_ascender(&self) -> Option<f32>;

    /// Descender from the horizontal header table, in font units.
    fn hhea_descender(&self) -> Option<f32>;

    /// Line gap from the horizontal header table, in font units.
    fn hhea_line_gap(&self) -> Option<f32>;

    /// Typographic ascender from the OS/2 table, in font units.
    fn typo_ascender(&self) -> Option<f32>;

    /// Typographic descender from the OS/2 table, in font units.
    fn typo_descender(&self) -> Option<f32>;

    /// Typographic line gap from the OS/2 table, in font units.
    fn typo_line_gap(&self) -> Option<f32>;

    /// Explicit small x-height from the OS/2 table, in font units.
    ///
    /// Many fonts lack this field; callers fall back to measuring the
    /// lowercase `x` outline.
    fn x_height(&self) -> Option<f32>;

    /// Explicit cap height from the OS/2 table, in font units.
    fn cap_height(&self) -> Option<f32>;

    /// Highest point of the given glyph's outline, in font units.
    fn glyph_top(&self, glyph_id: u32) -> Option<f32>;

    /// Nominal glyph identifier for a character.
    ///
    /// Returns `Some(0)` when the character map has no entry for the
    /// character, and `None` when the lookup itself fails (malformed or
    /// incomplete tables). Callers treat both as "glyph absent".
    fn nominal_glyph(&self, ch: char) -> Option<u32>;
}
