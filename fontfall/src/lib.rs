// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font fallback metric matching and per-language font resolution.
//!
//! Fontfall computes the CSS `@font-face` descriptor values (`size-adjust`,
//! `ascent-override`, `descent-override`, `line-gap-override`) that make a
//! substitute font occupy the same vertical box and x-height as a reference
//! font, and resolves which concrete font applies for any combination of
//! typography style, language, and character.
//!
//! The main pieces:
//!
//! - [`FontHandle`]: the seam to parsed font binaries. A production
//!   implementation backed by skrifa is provided by [`ParsedFont`].
//! - [`extract_font_metrics`]: produces a normalized [`FontMetrics`] record
//!   from a handle.
//! - [`calculate_overrides`]: computes an [`OverrideSet`] aligning a fallback
//!   font to a primary font.
//! - [`Document`] / [`Style`]: the configuration model, with per-language
//!   override maps and the chain resolution entry points.
//! - [`render_with_fallback`]: per-character glyph coverage over a resolved
//!   chain.

mod backend;
mod coverage;
mod document;
mod font;
mod handle;
mod language;
mod metrics;
mod overrides;
mod resolve;
mod style;

pub use backend::ParsedFont;
pub use coverage::{render_with_fallback, AttributedChar, CharSource, CoverageCache};
pub use document::Document;
pub use font::{Font, FontId, FontKind, FontOverrides, PALETTE};
pub use handle::FontHandle;
pub use language::{catalog, language, Direction, Language, LanguageId, Script};
pub use metrics::{extract_font_metrics, FontMetrics, NormalizedMetrics};
pub use overrides::{calculate_overrides, format_percent, OverrideSet};
pub use resolve::{FontIdentity, ResolvedEntry};
pub use style::{
    EffectiveSettings, FallbackOverride, FontScales, LineHeight, Style, StyleId, StyleSettings,
    SystemFallback,
};
