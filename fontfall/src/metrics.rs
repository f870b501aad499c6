// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized font metric records.

use crate::handle::FontHandle;

/// Vertical metrics of a font.
///
/// Raw values are in font units; [`normalized`](Self::normalized) carries
/// the same values as fractions of em. Both forms are retained because the
/// raw values are what a user inspects while the normalized form is what the
/// override math consumes.
///
/// `descent` is stored as a non-positive value regardless of how the source
/// table encodes it.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FontMetrics {
    /// Size of the em square in font units.
    pub units_per_em: u16,
    /// Ascent in font units.
    pub ascent: f32,
    /// Descent in font units, non-positive.
    pub descent: f32,
    /// Line gap in font units.
    pub line_gap: f32,
    /// x-height in font units.
    pub x_height: f32,
    /// The same metrics as fractions of em.
    pub normalized: NormalizedMetrics,
}

/// Font metrics expressed as unit-less fractions of em.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct NormalizedMetrics {
    /// Ascent as a fraction of em.
    pub ascent: f32,
    /// Descent as a fraction of em, non-positive.
    pub descent: f32,
    /// Line gap as a fraction of em.
    pub line_gap: f32,
    /// x-height as a fraction of em.
    pub x_height: f32,
}

/// Extracts a metric record from a parsed font handle.
///
/// Ascent, descent and line gap prefer the horizontal header table and fall
/// back to the OS/2 typographic fields; a missing line gap defaults to 0.
/// The x-height uses a three-tier fallback: the explicit OS/2 field, then
/// the measured top of the lowercase `x` outline, then half the em square.
///
/// Returns `None` when no handle is present or the em square is degenerate.
pub fn extract_font_metrics(handle: Option<&dyn FontHandle>) -> Option<FontMetrics> {
    let handle = handle?;
    let units_per_em = handle.units_per_em();
    if units_per_em == 0 {
        return None;
    }
    let ascent = handle
        .hhea_ascender()
        .or_else(|| handle.typo_ascender())
        .unwrap_or(0.0);
    let descent = -handle
        .hhea_descender()
        .or_else(|| handle.typo_descender())
        .unwrap_or(0.0)
        .abs();
    let line_gap = handle
        .hhea_line_gap()
        .or_else(|| handle.typo_line_gap())
        .unwrap_or(0.0);
    let x_height = handle
        .x_height()
        .filter(|v| *v > 0.0)
        .or_else(|| measured_x_height(handle))
        .unwrap_or(f32::from(units_per_em) * 0.5);
    let scale = 1.0 / f32::from(units_per_em);
    Some(FontMetrics {
        units_per_em,
        ascent,
        descent,
        line_gap,
        x_height,
        normalized: NormalizedMetrics {
            ascent: ascent * scale,
            descent: descent * scale,
            line_gap: line_gap * scale,
            x_height: x_height * scale,
        },
    })
}

/// Measures the x-height from the top of the lowercase `x` outline.
fn measured_x_height(handle: &dyn FontHandle) -> Option<f32> {
    let glyph_id = handle.nominal_glyph('x')?;
    if glyph_id == 0 {
        return None;
    }
    handle.glyph_top(glyph_id).filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeTables {
        units_per_em: u16,
        hhea: Option<(f32, f32, f32)>,
        typo: Option<(f32, f32, f32)>,
        x_height: Option<f32>,
        x_glyph_top: Option<f32>,
    }

    impl FontHandle for FakeTables {
        fn units_per_em(&self) -> u16 {
            self.units_per_em
        }
        fn hhea_ascender(&self) -> Option<f32> {
            self.hhea.map(|h| h.0)
        }
        fn hhea_descender(&self) -> Option<f32> {
            self.hhea.map(|h| h.1)
        }
        fn hhea_line_gap(&self) -> Option<f32> {
            self.hhea.map(|h| h.2)
        }
        fn typo_ascender(&self) -> Option<f32> {
            self.typo.map(|t| t.0)
        }
        fn typo_descender(&self) -> Option<f32> {
            self.typo.map(|t| t.1)
        }
        fn typo_line_gap(&self) -> Option<f32> {
            self.typo.map(|t| t.2)
        }
        fn x_height(&self) -> Option<f32> {
            self.x_height
        }
        fn cap_height(&self) -> Option<f32> {
            None
        }
        fn glyph_top(&self, glyph_id: u32) -> Option<f32> {
            (glyph_id == 7).then_some(self.x_glyph_top).flatten()
        }
        fn nominal_glyph(&self, ch: char) -> Option<u32> {
            Some(if ch == 'x' && self.x_glyph_top.is_some() {
                7
            } else {
                0
            })
        }
    }

    #[test]
    fn absent_handle_yields_none() {
        assert_eq!(extract_font_metrics(None), None);
    }

    #[test]
    fn prefers_hhea_over_typo() {
        let font = FakeTables {
            units_per_em: 1000,
            hhea: Some((800.0, -200.0, 100.0)),
            typo: Some((750.0, -250.0, 50.0)),
            x_height: Some(500.0),
            ..Default::default()
        };
        let metrics = extract_font_metrics(Some(&font)).unwrap();
        assert_eq!(metrics.ascent, 800.0);
        assert_eq!(metrics.descent, -200.0);
        assert_eq!(metrics.line_gap, 100.0);
        assert_eq!(metrics.normalized.ascent, 0.8);
        assert_eq!(metrics.normalized.x_height, 0.5);
    }

    #[test]
    fn falls_back_to_typo_metrics() {
        let font = FakeTables {
            units_per_em: 2048,
            typo: Some((1900.0, -500.0, 0.0)),
            x_height: Some(1024.0),
            ..Default::default()
        };
        let metrics = extract_font_metrics(Some(&font)).unwrap();
        assert_eq!(metrics.ascent, 1900.0);
        assert_eq!(metrics.descent, -500.0);
        assert_eq!(metrics.line_gap, 0.0);
    }

    #[test]
    fn descent_is_coerced_non_positive() {
        // Some tables store the descender as a positive magnitude.
        let font = FakeTables {
            units_per_em: 1000,
            hhea: Some((800.0, 200.0, 0.0)),
            x_height: Some(500.0),
            ..Default::default()
        };
        let metrics = extract_font_metrics(Some(&font)).unwrap();
        assert_eq!(metrics.descent, -200.0);
        assert_eq!(metrics.normalized.descent, -0.2);
    }

    #[test]
    fn x_height_measures_x_glyph_when_field_missing() {
        let font = FakeTables {
            units_per_em: 1000,
            hhea: Some((800.0, -200.0, 0.0)),
            x_glyph_top: Some(470.0),
            ..Default::default()
        };
        let metrics = extract_font_metrics(Some(&font)).unwrap();
        assert_eq!(metrics.x_height, 470.0);
    }

    #[test]
    fn x_height_defaults_to_half_em() {
        let font = FakeTables {
            units_per_em: 1000,
            hhea: Some((800.0, -200.0, 0.0)),
            ..Default::default()
        };
        let metrics = extract_font_metrics(Some(&font)).unwrap();
        assert_eq!(metrics.x_height, 500.0);
        assert_eq!(metrics.normalized.x_height, 0.5);
    }

    #[test]
    fn extraction_is_idempotent() {
        let font = FakeTables {
            units_per_em: 1000,
            hhea: Some((800.0, -200.0, 100.0)),
            x_height: Some(500.0),
            ..Default::default()
        };
        let first = extract_font_metrics(Some(&font)).unwrap();
        let second = extract_font_metrics(Some(&font)).unwrap();
        assert_eq!(first, second);
    }
}
