// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typography styles and the effective-settings cascade.

use crate::font::{name_key, Font, FontId, FontKind, FontOverrides};
use crate::language::LanguageId;
use core::sync::atomic::{AtomicU64, Ordering};
use hashbrown::HashMap;

/// Unique identifier for a style.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct StyleId(u64);

impl StyleId {
    /// Creates a new unique identifier.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        static ID_COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Line height of a run of text.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub enum LineHeight {
    /// The font's own default line height.
    #[default]
    Normal,
    /// A multiplier of the font size.
    Multiplier(f32),
}

/// Percentage scales applied per font role.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FontScales {
    /// Scale of the primary font, in percent.
    pub active: f32,
    /// Scale of fallback fonts, in percent.
    pub fallback: f32,
}

impl Default for FontScales {
    fn default() -> Self {
        Self {
            active: 100.0,
            fallback: 100.0,
        }
    }
}

/// Style-level typography settings.
///
/// These are the base layer of the settings cascade; per-font and
/// per-language overrides refine them.
#[derive(Clone, PartialEq, Debug)]
pub struct StyleSettings {
    /// Base font size in CSS pixels.
    pub base_font_size: f32,
    /// Line height applied to the primary font.
    pub line_height: LineHeight,
    /// Line height applied to fallback fonts.
    pub fallback_line_height: LineHeight,
    /// Letter spacing in CSS pixels.
    pub letter_spacing: f32,
    /// Font weight.
    pub weight: f32,
    /// Per-role percentage scales.
    pub font_scales: FontScales,
    /// Generic family terminating every fallback chain.
    pub system_fallback: String,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            base_font_size: 16.0,
            line_height: LineHeight::Normal,
            fallback_line_height: LineHeight::Normal,
            letter_spacing: 0.0,
            weight: 400.0,
            font_scales: FontScales::default(),
            system_fallback: String::from("sans-serif"),
        }
    }
}

/// Per-language replacement for the whole fallback chain.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FallbackOverride {
    /// Resolve to the given configured font followed by the system family.
    Font(FontId),
    /// Resolve to the system family alone, skipping every configured
    /// fallback.
    Legacy,
}

/// Per-language replacement for the system family at the end of a chain.
#[derive(Clone, PartialEq, Debug)]
pub struct SystemFallback {
    /// Family name passed through to the host environment.
    pub family: String,
    /// Setting overrides applied to the replacement family.
    pub overrides: FontOverrides,
}

/// A named typography style: one primary font, an ordered list of fallbacks,
/// settings, and per-language override maps.
///
/// The font at index 0 is always the primary; reordering re-derives roles
/// from position.
#[derive(Debug)]
pub struct Style {
    id: StyleId,
    name: String,
    fonts: Vec<Font>,
    /// Style-level settings, the base layer of the cascade.
    pub settings: StyleSettings,
    pub(crate) primary_overrides: HashMap<LanguageId, FontId>,
    pub(crate) fallback_overrides: HashMap<LanguageId, FallbackOverride>,
    pub(crate) system_overrides: HashMap<LanguageId, SystemFallback>,
    pub(crate) language_variants: HashMap<(FontId, LanguageId), FontOverrides>,
}

impl Style {
    /// Creates a style around a primary font.
    pub fn new(name: impl Into<String>, mut primary: Font) -> Self {
        primary.set_kind(FontKind::Primary);
        Self {
            id: StyleId::new(),
            name: name.into(),
            fonts: vec![primary],
            settings: StyleSettings::default(),
            primary_overrides: HashMap::new(),
            fallback_overrides: HashMap::new(),
            system_overrides: HashMap::new(),
            language_variants: HashMap::new(),
        }
    }

    /// Unique identifier of this style.
    pub fn id(&self) -> StyleId {
        self.id
    }

    /// Display name of this style.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All fonts in chain order, primary first.
    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    /// Looks up a font by identifier.
    pub fn font(&self, id: FontId) -> Option<&Font> {
        self.fonts.iter().find(|font| font.id() == id)
    }

    /// Looks up a font by identifier, mutably.
    pub fn font_mut(&mut self, id: FontId) -> Option<&mut Font> {
        self.fonts.iter_mut().find(|font| font.id() == id)
    }

    /// The style's primary font.
    pub fn primary_font(&self) -> &Font {
        // Invariant: fonts is never empty and index 0 is the primary.
        &self.fonts[0]
    }

    /// Adds a fallback font and returns its identifier.
    ///
    /// Fonts with file data are kept ahead of bare family names so that
    /// uploads take effect without manual reordering.
    pub fn add_font(&mut self, mut font: Font) -> FontId {
        font.set_kind(FontKind::Fallback);
        let id = font.id();
        let index = if font.has_file() {
            1 + self
                .fonts
                .iter()
                .skip(1)
                .take_while(|existing| existing.has_file())
                .count()
        } else {
            self.fonts.len()
        };
        self.fonts.insert(index, font);
        id
    }

    /// Removes a fallback font, cascading to duplicates of the same file.
    ///
    /// The primary font cannot be removed. Every per-language entry that
    /// referenced a removed font is dropped as well, so the maps never hold
    /// dangling identifiers. Returns the identifiers that were removed.
    pub fn remove_font(&mut self, id: FontId) -> Vec<FontId> {
        let Some(target) = self.font(id) else {
            return Vec::new();
        };
        if target.kind() == FontKind::Primary {
            return Vec::new();
        }
        let file_key = target.file_name().map(name_key);
        let mut removed = Vec::new();
        self.fonts.retain(|font| {
            let duplicate = match (&file_key, font.file_name()) {
                (Some(key), Some(other)) => *key == name_key(other),
                _ => false,
            };
            if font.kind() == FontKind::Fallback && (font.id() == id || duplicate) {
                removed.push(font.id());
                false
            } else {
                true
            }
        });
        self.primary_overrides
            .retain(|_, font_id| !removed.contains(font_id));
        self.fallback_overrides.retain(|_, entry| match entry {
            FallbackOverride::Font(font_id) => !removed.contains(font_id),
            FallbackOverride::Legacy => true,
        });
        self.language_variants
            .retain(|(font_id, _), _| !removed.contains(font_id));
        removed
    }

    /// Moves a font to a new position in the chain.
    ///
    /// Roles are re-derived from position afterwards: whatever font ends up
    /// at index 0 becomes the primary.
    pub fn move_font(&mut self, id: FontId, to_index: usize) {
        let Some(from_index) = self.fonts.iter().position(|font| font.id() == id) else {
            return;
        };
        let to_index = to_index.min(self.fonts.len() - 1);
        let font = self.fonts.remove(from_index);
        self.fonts.insert(to_index, font);
        for (index, font) in self.fonts.iter_mut().enumerate() {
            font.set_kind(if index == 0 {
                FontKind::Primary
            } else {
                FontKind::Fallback
            });
        }
    }

    /// Sets or clears the language-specific primary font.
    pub fn set_primary_override(&mut self, language: LanguageId, font: Option<FontId>) {
        match font {
            Some(id) => {
                self.primary_overrides.insert(language, id);
            }
            None => {
                self.primary_overrides.remove(&language);
            }
        }
    }

    /// The language-specific primary font, if one is configured.
    pub fn primary_override(&self, language: LanguageId) -> Option<FontId> {
        self.primary_overrides.get(&language).copied()
    }

    /// Sets or clears the language-specific fallback chain replacement.
    pub fn set_fallback_override(
        &mut self,
        language: LanguageId,
        entry: Option<FallbackOverride>,
    ) {
        match entry {
            Some(entry) => {
                self.fallback_overrides.insert(language, entry);
            }
            None => {
                self.fallback_overrides.remove(&language);
            }
        }
    }

    /// The language-specific fallback replacement, if one is configured.
    pub fn fallback_override(&self, language: LanguageId) -> Option<FallbackOverride> {
        self.fallback_overrides.get(&language).copied()
    }

    /// Sets or clears the language-specific system family.
    pub fn set_system_override(&mut self, language: LanguageId, entry: Option<SystemFallback>) {
        match entry {
            Some(entry) => {
                self.system_overrides.insert(language, entry);
            }
            None => {
                self.system_overrides.remove(&language);
            }
        }
    }

    /// The language-specific system family, if one is configured.
    pub fn system_override(&self, language: LanguageId) -> Option<&SystemFallback> {
        self.system_overrides.get(&language)
    }

    /// Sets the per-language setting overrides for a font.
    ///
    /// An empty override set clears the variant.
    pub fn set_language_variant(
        &mut self,
        font: FontId,
        language: LanguageId,
        overrides: FontOverrides,
    ) {
        if overrides.is_empty() {
            self.language_variants.remove(&(font, language));
        } else {
            self.language_variants.insert((font, language), overrides);
        }
    }

    /// The per-language setting overrides for a font, if any.
    pub fn language_variant(&self, font: FontId, language: LanguageId) -> Option<&FontOverrides> {
        self.language_variants.get(&(font, language))
    }

    /// Resolves the settings a font renders with in a language context.
    ///
    /// Each setting is taken from the most specific layer that defines it:
    /// the language variant, then the font's own overrides, then the
    /// style-level settings for the font's role. Returns `None` for an
    /// unknown font identifier.
    pub fn effective_font_settings(
        &self,
        font: FontId,
        language: Option<LanguageId>,
    ) -> Option<EffectiveSettings> {
        let target = self.font(font)?;
        let mut merged = target.overrides;
        if let Some(variant) = language.and_then(|lang| self.language_variant(font, lang)) {
            merged = variant.or(&merged);
        }
        Some(effective_settings(&self.settings, target.kind(), &merged))
    }
}

/// Settings a font renders with once every cascade layer is applied.
#[derive(Clone, PartialEq, Debug)]
pub struct EffectiveSettings {
    /// Base font size in CSS pixels.
    pub base_font_size: f32,
    /// Rendered size as a percentage of the base font size.
    pub scale: f32,
    /// Resolved line height.
    pub line_height: LineHeight,
    /// Letter spacing in CSS pixels.
    pub letter_spacing: f32,
    /// Font weight.
    pub weight: f32,
    /// `size-adjust`, if any layer sets it.
    pub size_adjust: Option<f32>,
    /// `ascent-override`, if any layer sets it.
    pub ascent_override: Option<f32>,
    /// `descent-override`, if any layer sets it.
    pub descent_override: Option<f32>,
    /// `line-gap-override`, if any layer sets it.
    pub line_gap_override: Option<f32>,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        effective_settings(
            &StyleSettings::default(),
            FontKind::Fallback,
            &FontOverrides::default(),
        )
    }
}

impl EffectiveSettings {
    /// Whether any `@font-face` metric descriptor is set.
    pub fn has_metric_overrides(&self) -> bool {
        self.size_adjust.is_some()
            || self.ascent_override.is_some()
            || self.descent_override.is_some()
            || self.line_gap_override.is_some()
    }
}

/// Applies a merged override layer over the role-appropriate style settings.
pub(crate) fn effective_settings(
    settings: &StyleSettings,
    kind: FontKind,
    merged: &FontOverrides,
) -> EffectiveSettings {
    let (role_line_height, role_scale) = match kind {
        FontKind::Primary => (settings.line_height, settings.font_scales.active),
        FontKind::Fallback => (settings.fallback_line_height, settings.font_scales.fallback),
    };
    EffectiveSettings {
        base_font_size: merged.font_size.unwrap_or(settings.base_font_size),
        scale: merged.scale.unwrap_or(role_scale),
        line_height: merged
            .line_height
            .map_or(role_line_height, LineHeight::Multiplier),
        letter_spacing: merged.letter_spacing.unwrap_or(settings.letter_spacing),
        weight: merged.weight.unwrap_or(settings.weight),
        size_adjust: merged.size_adjust,
        ascent_override: merged.ascent_override,
        descent_override: merged.descent_override,
        line_gap_override: merged.line_gap_override,
    }
}
