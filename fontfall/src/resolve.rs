// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of primary fonts and fallback chains per language.

use crate::font::{name_key, Font, FontId, FontKind, FontOverrides};
use crate::handle::FontHandle;
use crate::language::LanguageId;
use crate::style::{effective_settings, EffectiveSettings, FallbackOverride, Style};
use core::fmt;
use smallvec::{smallvec, SmallVec};

/// Identity of a resolved chain entry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum FontIdentity {
    /// A font configured in the style.
    Configured(FontId),
    /// The system family terminating the chain, resolved by the host
    /// environment.
    System,
}

/// One entry of a resolved fallback chain.
///
/// Borrows from the style it was resolved against; the chain is a cheap
/// view, not a copy of the configuration.
#[derive(Clone)]
pub struct ResolvedEntry<'a> {
    /// What this entry is.
    pub identity: FontIdentity,
    /// Family name to render with.
    pub family: &'a str,
    /// Parsed font data, present only for uploaded fonts.
    pub handle: Option<&'a dyn FontHandle>,
    /// Settings the entry renders with.
    pub settings: EffectiveSettings,
}

impl fmt::Debug for ResolvedEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedEntry")
            .field("identity", &self.identity)
            .field("family", &self.family)
            .field("has_handle", &self.handle.is_some())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Style {
    /// Resolves the primary font for a language context.
    ///
    /// A language-specific fallback replacement that names an uploaded,
    /// visible font wins; then a language-specific primary override; then
    /// the style's primary font.
    pub fn resolve_primary_font(&self, language: Option<LanguageId>) -> &Font {
        if let Some(language) = language {
            if let Some(FallbackOverride::Font(id)) = self.fallback_override(language) {
                if let Some(font) = self.font(id) {
                    if !font.hidden && font.metrics().is_some() {
                        return font;
                    }
                }
            }
            if let Some(id) = self.primary_override(language) {
                if let Some(font) = self.font(id) {
                    if !font.hidden {
                        return font;
                    }
                }
            }
        }
        self.primary_font()
    }

    /// Resolves the ordered fallback chain for a language context.
    ///
    /// With no language, or no override for the language, this is the
    /// default chain: every visible configured fallback that is not serving
    /// as a primary substitute, deduplicated by family name, followed by the
    /// system family. A [`FallbackOverride::Font`] collapses the chain to
    /// that single font plus the system family; [`FallbackOverride::Legacy`]
    /// collapses it to the system family alone. An override naming a hidden
    /// or removed font degrades to the default chain.
    ///
    /// Entries matching the resolved primary are filtered out everywhere,
    /// including the system terminator, so a chain never falls back to the
    /// font it is a fallback for.
    pub fn resolve_fallback_chain(&self, language: Option<LanguageId>) -> Vec<ResolvedEntry<'_>> {
        let primary = self.resolve_primary_font(language);
        let primary_id = primary.id();
        let primary_key = name_key(primary.name());
        if let Some(language_id) = language {
            match self.fallback_override(language_id) {
                Some(FallbackOverride::Legacy) => {
                    return self
                        .system_entry(language)
                        .into_iter()
                        .collect();
                }
                Some(FallbackOverride::Font(id)) => {
                    if let Some(font) = self.font(id).filter(|font| !font.hidden) {
                        let mut chain = vec![self.configured_entry(font, language)];
                        if let Some(system) = self.system_entry(language) {
                            if name_key(font.name()) != name_key(system.family) {
                                chain.push(system);
                            }
                        }
                        return chain;
                    }
                }
                None => {}
            }
        }
        let mut chain: Vec<ResolvedEntry<'_>> = Vec::new();
        let mut seen: SmallVec<[String; 8]> = smallvec![primary_key];
        for font in self.fonts().iter().skip(1) {
            if font.kind() != FontKind::Fallback
                || font.hidden
                || font.primary_override
                || font.id() == primary_id
                || self.is_override_target(font.id())
            {
                continue;
            }
            let key = name_key(font.name());
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            chain.push(self.configured_entry(font, language));
        }
        if let Some(system) = self.system_entry(language) {
            if !seen.contains(&name_key(system.family)) {
                chain.push(system);
            }
        }
        chain
    }

    /// Whether any language's override maps reference this font.
    ///
    /// Override targets are excluded from the default chain, otherwise they
    /// would render twice for the languages that single them out.
    fn is_override_target(&self, id: FontId) -> bool {
        self.primary_overrides.values().any(|target| *target == id)
            || self
                .fallback_overrides
                .values()
                .any(|entry| matches!(entry, FallbackOverride::Font(target) if *target == id))
    }

    fn configured_entry<'a>(
        &'a self,
        font: &'a Font,
        language: Option<LanguageId>,
    ) -> ResolvedEntry<'a> {
        let mut merged = font.overrides;
        if let Some(variant) = language.and_then(|lang| self.language_variant(font.id(), lang)) {
            merged = variant.or(&merged);
        }
        ResolvedEntry {
            identity: FontIdentity::Configured(font.id()),
            family: font.name(),
            handle: font.handle(),
            settings: effective_settings(&self.settings, font.kind(), &merged),
        }
    }

    fn system_entry(&self, language: Option<LanguageId>) -> Option<ResolvedEntry<'_>> {
        let (family, overrides) = match language.and_then(|lang| self.system_override(lang)) {
            Some(replacement) => (replacement.family.as_str(), replacement.overrides),
            None => (self.settings.system_fallback.as_str(), FontOverrides::default()),
        };
        if family.is_empty() {
            return None;
        }
        Some(ResolvedEntry {
            identity: FontIdentity::System,
            family,
            handle: None,
            settings: effective_settings(&self.settings, FontKind::Fallback, &overrides),
        })
    }
}
