// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Skrifa-backed implementation of the font handle.

use crate::handle::FontHandle;
use core::fmt;
use skrifa::instance::{LocationRef, Size};
use skrifa::raw::{FontRef, TableProvider as _};
use skrifa::{GlyphId, MetadataProvider as _};

/// Font handle backed by an in-memory font binary.
///
/// Holds the raw bytes of a font file (or one face of a collection) and
/// serves table queries through skrifa. Construction validates that the data
/// parses and has a usable `head` table; individual table queries degrade to
/// `None` for anything else that is missing or malformed.
#[derive(Clone)]
pub struct ParsedFont {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
}

impl ParsedFont {
    /// Creates a parsed font from raw font data.
    ///
    /// `index` selects a face within a collection and should be 0 for
    /// single-face files. Returns `None` if the data does not parse as a
    /// font or has a degenerate em square.
    pub fn new(data: Vec<u8>, index: u32) -> Option<Self> {
        let font = FontRef::from_index(&data, index).ok()?;
        let units_per_em = font.head().ok()?.units_per_em();
        if units_per_em == 0 {
            return None;
        }
        Some(Self {
            data,
            index,
            units_per_em,
        })
    }

    /// Returns the raw bytes this handle was created from.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn font(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index).ok()
    }
}

impl fmt::Debug for ParsedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedFont")
            .field("len", &self.data.len())
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .finish_non_exhaustive()
    }
}

impl FontHandle for ParsedFont {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn hhea_ascender(&self) -> Option<f32> {
        let hhea = self.font()?.hhea().ok()?;
        Some(hhea.ascender().to_i16().into())
    }

    fn hhea_descender(&self) -> Option<f32> {
        let hhea = self.font()?.hhea().ok()?;
        Some(hhea.descender().to_i16().into())
    }

    fn hhea_line_gap(&self) -> Option<f32> {
        let hhea = self.font()?.hhea().ok()?;
        Some(hhea.line_gap().to_i16().into())
    }

    fn typo_ascender(&self) -> Option<f32> {
        let os2 = self.font()?.os2().ok()?;
        Some(os2.s_typo_ascender().into())
    }

    fn typo_descender(&self) -> Option<f32> {
        let os2 = self.font()?.os2().ok()?;
        Some(os2.s_typo_descender().into())
    }

    fn typo_line_gap(&self) -> Option<f32> {
        let os2 = self.font()?.os2().ok()?;
        Some(os2.s_typo_line_gap().into())
    }

    fn x_height(&self) -> Option<f32> {
        // sxHeight is only present from OS/2 version 2 onward.
        let os2 = self.font()?.os2().ok()?;
        os2.sx_height().map(f32::from)
    }

    fn cap_height(&self) -> Option<f32> {
        let os2 = self.font()?.os2().ok()?;
        os2.s_cap_height().map(f32::from)
    }

    fn glyph_top(&self, glyph_id: u32) -> Option<f32> {
        let font = self.font()?;
        let metrics = font.glyph_metrics(Size::unscaled(), LocationRef::default());
        let bounds = metrics.bounds(GlyphId::new(glyph_id))?;
        Some(bounds.y_max)
    }

    fn nominal_glyph(&self, ch: char) -> Option<u32> {
        let font = self.font()?;
        // Absent characters map to glyph 0 (`.notdef`), matching the cmap
        // convention the coverage test relies on.
        Some(
            font.charmap()
                .map(ch)
                .map(|gid| gid.to_u32())
                .unwrap_or_default(),
        )
    }
}
