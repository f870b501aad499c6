// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The top-level configuration document.

use crate::font::{Font, FontId, FontKind, PALETTE};
use crate::handle::FontHandle;
use crate::language::LanguageId;
use crate::overrides::{calculate_overrides, OverrideSet};
use crate::resolve::ResolvedEntry;
use crate::style::{EffectiveSettings, Style, StyleId};

/// A complete configuration: styles with their fonts, plus the set of
/// languages the content is designed for.
///
/// The document is the unit of editing. Styles are independent of each
/// other; languages are shared across styles, and removing a language
/// discards every per-language entry that referenced it.
#[derive(Default, Debug)]
pub struct Document {
    styles: Vec<Style>,
    configured_languages: Vec<LanguageId>,
    primary_languages: Vec<LanguageId>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a style built around a primary font and returns its identifier.
    ///
    /// `handle` carries the parsed data of an uploaded primary; a bare
    /// family name is configured when it is absent.
    pub fn add_style(
        &mut self,
        name: impl Into<String>,
        primary_name: impl Into<String>,
        handle: Option<(String, Box<dyn FontHandle>)>,
    ) -> StyleId {
        let color = self.next_color();
        let primary = match handle {
            Some((file_name, handle)) => {
                Font::from_file(primary_name, file_name, handle, FontKind::Primary, color)
            }
            None => Font::named(primary_name, FontKind::Primary, color),
        };
        let style = Style::new(name, primary);
        let id = style.id();
        self.styles.push(style);
        id
    }

    /// Removes a style and everything configured within it.
    pub fn remove_style(&mut self, id: StyleId) {
        self.styles.retain(|style| style.id() != id);
    }

    /// All styles in creation order.
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Looks up a style by identifier.
    pub fn style(&self, id: StyleId) -> Option<&Style> {
        self.styles.iter().find(|style| style.id() == id)
    }

    /// Looks up a style by identifier, mutably.
    pub fn style_mut(&mut self, id: StyleId) -> Option<&mut Style> {
        self.styles.iter_mut().find(|style| style.id() == id)
    }

    /// Looks up a style by display name.
    pub fn style_by_name(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|style| style.name() == name)
    }

    /// Adds a fallback font to a style and returns its identifier.
    ///
    /// The font is assigned the least used palette color across the whole
    /// document, so attributions stay distinguishable as fonts accumulate.
    pub fn add_fallback_font(
        &mut self,
        style: StyleId,
        name: impl Into<String>,
        file: Option<(String, Box<dyn FontHandle>)>,
    ) -> Option<FontId> {
        let color = self.next_color();
        let style = self.style_mut(style)?;
        let font = match file {
            Some((file_name, handle)) => {
                Font::from_file(name, file_name, handle, FontKind::Fallback, color)
            }
            None => Font::named(name, FontKind::Fallback, color),
        };
        Some(style.add_font(font))
    }

    /// Resolves the fallback chain for a style and language context.
    ///
    /// An unknown style resolves to an empty chain.
    pub fn resolve_fallback_chain(
        &self,
        style: StyleId,
        language: Option<LanguageId>,
    ) -> Vec<ResolvedEntry<'_>> {
        self.style(style)
            .map(|style| style.resolve_fallback_chain(language))
            .unwrap_or_default()
    }

    /// Resolves the effective primary font for a style and language context.
    pub fn resolve_primary_font(
        &self,
        style: StyleId,
        language: Option<LanguageId>,
    ) -> Option<&Font> {
        Some(self.style(style)?.resolve_primary_font(language))
    }

    /// Resolves the settings a font renders with in a language context.
    pub fn effective_font_settings(
        &self,
        style: StyleId,
        font: FontId,
        language: Option<LanguageId>,
    ) -> Option<EffectiveSettings> {
        self.style(style)?.effective_font_settings(font, language)
    }

    /// Computes the override set aligning a fallback font to its style's
    /// primary.
    ///
    /// Returns `None` when either font lacks metrics.
    pub fn auto_overrides(&self, style: StyleId, font: FontId) -> Option<OverrideSet> {
        let style = self.style(style)?;
        let fallback = style.font(font)?;
        calculate_overrides(style.primary_font().metrics(), fallback.metrics())
    }

    /// Computes and applies the auto overrides to a fallback font.
    ///
    /// All four descriptor fields of the font's overrides are set together.
    /// Returns the applied set, or `None` when it cannot be computed.
    pub fn apply_auto_overrides(&mut self, style: StyleId, font: FontId) -> Option<OverrideSet> {
        let set = self.auto_overrides(style, font)?;
        let target = self.style_mut(style)?.font_mut(font)?;
        target.overrides.size_adjust = Some(set.size_adjust);
        target.overrides.ascent_override = Some(set.ascent_override);
        target.overrides.descent_override = Some(set.descent_override);
        target.overrides.line_gap_override = Some(set.line_gap_override);
        Some(set)
    }

    /// Adds a language to the configured set. Adding twice is a no-op.
    pub fn configure_language(&mut self, language: LanguageId) {
        if !self.configured_languages.contains(&language) {
            self.configured_languages.push(language);
        }
    }

    /// Removes a language, discarding every per-language entry in every
    /// style that referenced it.
    pub fn remove_language(&mut self, language: LanguageId) {
        self.configured_languages.retain(|lang| *lang != language);
        self.primary_languages.retain(|lang| *lang != language);
        for style in &mut self.styles {
            style.primary_overrides.remove(&language);
            style.fallback_overrides.remove(&language);
            style.system_overrides.remove(&language);
            style
                .language_variants
                .retain(|(_, lang), _| *lang != language);
        }
    }

    /// Languages configured on this document, in configuration order.
    pub fn configured_languages(&self) -> &[LanguageId] {
        &self.configured_languages
    }

    /// Marks or unmarks a configured language as primary content language.
    ///
    /// Unconfigured languages are ignored.
    pub fn set_primary_language(&mut self, language: LanguageId, primary: bool) {
        if !self.configured_languages.contains(&language) {
            return;
        }
        if primary {
            if !self.primary_languages.contains(&language) {
                self.primary_languages.push(language);
            }
        } else {
            self.primary_languages.retain(|lang| *lang != language);
        }
    }

    /// Languages marked as primary content languages.
    pub fn primary_languages(&self) -> &[LanguageId] {
        &self.primary_languages
    }

    /// Picks the least used palette color across all fonts in the document.
    fn next_color(&self) -> &'static str {
        let mut counts = [0_usize; PALETTE.len()];
        for style in &self.styles {
            for font in style.fonts() {
                if let Some(index) = PALETTE.iter().position(|color| *color == font.color()) {
                    counts[index] += 1;
                }
            }
        }
        let mut best = 0;
        for (index, count) in counts.iter().enumerate() {
            if *count < counts[best] {
                best = index;
            }
        }
        PALETTE[best]
    }
}
