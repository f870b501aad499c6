// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests over a configured document: chain resolution, override
//! computation, and coverage attribution working together.

use fontfall::{
    format_percent, language, render_with_fallback, CharSource, Document, FallbackOverride,
    FontHandle, FontIdentity, FontOverrides, LineHeight, SystemFallback,
};

/// A font defined entirely by its metrics and covered characters.
struct FakeFont {
    units_per_em: u16,
    ascent: f32,
    descent: f32,
    line_gap: f32,
    x_height: f32,
    covered: &'static str,
}

impl FakeFont {
    fn latin() -> Self {
        Self {
            units_per_em: 1000,
            ascent: 800.0,
            descent: -200.0,
            line_gap: 100.0,
            x_height: 500.0,
            covered: "abcdefghijklmnopqrstuvwxyz ",
        }
    }

    fn wide_latin() -> Self {
        Self {
            units_per_em: 1000,
            ascent: 900.0,
            descent: -250.0,
            line_gap: 0.0,
            x_height: 600.0,
            covered: "abcdefghijklmnopqrstuvwxyz ",
        }
    }

    fn kana() -> Self {
        Self {
            units_per_em: 2048,
            ascent: 1900.0,
            descent: -500.0,
            line_gap: 0.0,
            x_height: 1024.0,
            covered: "こんにちは",
        }
    }
}

impl FontHandle for FakeFont {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }
    fn hhea_ascender(&self) -> Option<f32> {
        Some(self.ascent)
    }
    fn hhea_descender(&self) -> Option<f32> {
        Some(self.descent)
    }
    fn hhea_line_gap(&self) -> Option<f32> {
        Some(self.line_gap)
    }
    fn typo_ascender(&self) -> Option<f32> {
        None
    }
    fn typo_descender(&self) -> Option<f32> {
        None
    }
    fn typo_line_gap(&self) -> Option<f32> {
        None
    }
    fn x_height(&self) -> Option<f32> {
        Some(self.x_height)
    }
    fn cap_height(&self) -> Option<f32> {
        None
    }
    fn glyph_top(&self, _glyph_id: u32) -> Option<f32> {
        None
    }
    fn nominal_glyph(&self, ch: char) -> Option<u32> {
        Some(
            self.covered
                .chars()
                .position(|c| c == ch)
                .map_or(0, |index| index as u32 + 1),
        )
    }
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn japanese_falls_back_to_the_kana_font() {
    let mut document = Document::new();
    let style_id = document.add_style(
        "Body",
        "Inter",
        Some(("inter.woff2".into(), Box::new(FakeFont::latin()) as _)),
    );
    document
        .add_fallback_font(
            style_id,
            "Noto Sans JP",
            Some(("noto.woff2".into(), Box::new(FakeFont::kana()) as _)),
        )
        .unwrap();
    let style = document.style(style_id).unwrap();
    let chain = style.resolve_fallback_chain(None);
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].family, "Noto Sans JP");
    assert_eq!(chain[1].identity, FontIdentity::System);

    let attributed = render_with_fallback("abc こんにちは", style.primary_font().handle(), &chain);
    assert_eq!(attributed[0].source, CharSource::Primary);
    assert_eq!(attributed[4].source, CharSource::Fallback(0));
    // Not covered by the primary or the kana font, so the unverifiable
    // system entry claims it.
    let attributed = render_with_fallback("1", style.primary_font().handle(), &chain);
    assert_eq!(attributed[0].source, CharSource::Fallback(1));
}

#[test]
fn auto_overrides_match_the_primary_box() {
    let mut document = Document::new();
    let style_id = document.add_style(
        "Body",
        "Inter",
        Some(("inter.woff2".into(), Box::new(FakeFont::latin()) as _)),
    );
    let kana = document
        .add_fallback_font(
            style_id,
            "Noto Sans JP",
            Some(("noto.woff2".into(), Box::new(FakeFont::kana()) as _)),
        )
        .unwrap();
    let set = document.apply_auto_overrides(style_id, kana).unwrap();
    // Both x-heights normalize to 0.5 em.
    assert!(close(set.size_adjust, 1.0));
    assert!(close(set.ascent_override, 0.8));
    assert!(close(set.descent_override, -0.2));
    assert!(close(set.line_gap_override, 0.1));
    assert_eq!(format_percent(set.size_adjust), "100.00%");
    assert_eq!(format_percent(set.css_descent()), "20.00%");

    let style = document.style(style_id).unwrap();
    let settings = style.effective_font_settings(kana, None).unwrap();
    assert_eq!(settings.size_adjust, Some(set.size_adjust));
    assert!(settings.has_metric_overrides());
}

#[test]
fn size_adjust_shrinks_a_visually_larger_fallback() {
    let mut document = Document::new();
    let style_id = document.add_style(
        "Body",
        "Inter",
        Some(("inter.woff2".into(), Box::new(FakeFont::latin()) as _)),
    );
    let wide = document
        .add_fallback_font(
            style_id,
            "Verdana Like",
            Some(("verdana.woff2".into(), Box::new(FakeFont::wide_latin()) as _)),
        )
        .unwrap();
    let set = document.apply_auto_overrides(style_id, wide).unwrap();
    assert!(close(set.size_adjust, 0.5 / 0.6));
    assert_eq!(format_percent(set.size_adjust), "83.33%");
    assert!(close(set.ascent_override * set.size_adjust, 0.8));
}

#[test]
fn legacy_override_bypasses_configured_fallbacks() {
    let mut document = Document::new();
    let japanese = language("ja-JP").unwrap().id;
    document.configure_language(japanese);
    let style_id = document.add_style("Body", "Inter", None);
    document
        .add_fallback_font(style_id, "Georgia", None)
        .unwrap();
    let style = document.style_mut(style_id).unwrap();
    style.set_fallback_override(japanese, Some(FallbackOverride::Legacy));
    let chain = style.resolve_fallback_chain(Some(japanese));
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].identity, FontIdentity::System);
}

#[test]
fn font_override_collapses_the_chain_for_one_language() {
    let mut document = Document::new();
    let japanese = language("ja-JP").unwrap().id;
    document.configure_language(japanese);
    let style_id = document.add_style("Body", "Inter", None);
    document
        .add_fallback_font(style_id, "Georgia", None)
        .unwrap();
    let kana = document
        .add_fallback_font(
            style_id,
            "Noto Sans JP",
            Some(("noto.woff2".into(), Box::new(FakeFont::kana()) as _)),
        )
        .unwrap();
    let style = document.style_mut(style_id).unwrap();
    style.set_fallback_override(japanese, Some(FallbackOverride::Font(kana)));

    let localized = style.resolve_fallback_chain(Some(japanese));
    assert_eq!(localized.len(), 2);
    assert_eq!(localized[0].identity, FontIdentity::Configured(kana));
    assert_eq!(localized[1].identity, FontIdentity::System);

    // The override font doubles as the primary for metric purposes.
    assert_eq!(style.resolve_primary_font(Some(japanese)).id(), kana);

    // Other languages keep the regular chain, minus the override target.
    let default = style.resolve_fallback_chain(None);
    assert_eq!(default.len(), 2);
    assert_eq!(default[0].family, "Georgia");
    assert_eq!(default[1].identity, FontIdentity::System);
}

#[test]
fn system_replacement_carries_its_own_settings() {
    let mut document = Document::new();
    let japanese = language("ja-JP").unwrap().id;
    document.configure_language(japanese);
    let style_id = document.add_style("Body", "Inter", None);
    let style = document.style_mut(style_id).unwrap();
    style.set_system_override(
        japanese,
        Some(SystemFallback {
            family: "Hiragino Sans".into(),
            overrides: FontOverrides {
                line_height: Some(1.7),
                ..Default::default()
            },
        }),
    );
    let chain = style.resolve_fallback_chain(Some(japanese));
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].family, "Hiragino Sans");
    assert_eq!(chain[0].settings.line_height, LineHeight::Multiplier(1.7));
    let unlocalized = style.resolve_fallback_chain(None);
    assert_eq!(unlocalized[0].family, "sans-serif");
    assert_eq!(unlocalized[0].settings.line_height, LineHeight::Normal);
}

#[test]
fn removing_a_font_cascades_to_same_file_duplicates() {
    let mut document = Document::new();
    let style_id = document.add_style("Body", "Inter", None);
    let first = document
        .add_fallback_font(
            style_id,
            "Noto Sans JP",
            Some(("Noto.woff2".into(), Box::new(FakeFont::kana()) as _)),
        )
        .unwrap();
    let second = document
        .add_fallback_font(
            style_id,
            "Noto Sans JP Copy",
            Some(("noto.woff2".into(), Box::new(FakeFont::kana()) as _)),
        )
        .unwrap();
    let kept = document
        .add_fallback_font(style_id, "Georgia", None)
        .unwrap();
    let style = document.style_mut(style_id).unwrap();
    let removed = style.remove_font(first);
    assert!(removed.contains(&first));
    assert!(removed.contains(&second));
    assert!(style.font(kept).is_some());
    assert_eq!(style.fonts().len(), 2);
}

#[test]
fn uploaded_fallbacks_sort_ahead_of_named_ones() {
    let mut document = Document::new();
    let style_id = document.add_style("Body", "Inter", None);
    document
        .add_fallback_font(style_id, "Georgia", None)
        .unwrap();
    let uploaded = document
        .add_fallback_font(
            style_id,
            "Noto Sans JP",
            Some(("noto.woff2".into(), Box::new(FakeFont::kana()) as _)),
        )
        .unwrap();
    let style = document.style(style_id).unwrap();
    assert_eq!(style.fonts()[1].id(), uploaded);
    assert_eq!(style.fonts()[2].name(), "Georgia");
}

#[test]
fn reordering_promotes_a_fallback_to_primary() {
    let mut document = Document::new();
    let style_id = document.add_style(
        "Body",
        "Inter",
        Some(("inter.woff2".into(), Box::new(FakeFont::latin()) as _)),
    );
    let wide = document
        .add_fallback_font(
            style_id,
            "Verdana Like",
            Some(("verdana.woff2".into(), Box::new(FakeFont::wide_latin()) as _)),
        )
        .unwrap();
    let style = document.style_mut(style_id).unwrap();
    style.move_font(wide, 0);
    assert_eq!(style.primary_font().id(), wide);
    // Overrides recomputed after the swap compare against the new primary.
    let inter = style.fonts()[1].id();
    let set = document.apply_auto_overrides(style_id, inter).unwrap();
    assert!(close(set.size_adjust, 0.6 / 0.5));
}
