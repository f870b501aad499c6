// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configured fonts and their per-font setting overrides.

use crate::handle::FontHandle;
use crate::metrics::{extract_font_metrics, FontMetrics};
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a configured font.
///
/// Identifiers are allocated from a process-wide counter and are never
/// reused, so references held across removals cannot alias a later font.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct FontId(u64);

impl FontId {
    /// Creates a new unique identifier.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        static ID_COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the underlying integer value.
    pub fn to_u64(self) -> u64 {
        self.0
    }
}

/// Role of a font within a style.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FontKind {
    /// The reference font whose metrics fallbacks are aligned to.
    Primary,
    /// A substitute consulted when the primary lacks coverage.
    Fallback,
}

/// Per-font overrides of style-level settings.
///
/// Every field is optional; an unset field defers to the next layer in the
/// settings cascade. Layers merge with [`or`](Self::or).
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct FontOverrides {
    /// Base font size in CSS pixels.
    pub font_size: Option<f32>,
    /// Rendered size as a percentage of the base font size.
    pub scale: Option<f32>,
    /// Line height as a multiplier of the font size.
    pub line_height: Option<f32>,
    /// Letter spacing in CSS pixels.
    pub letter_spacing: Option<f32>,
    /// Font weight.
    pub weight: Option<f32>,
    /// `size-adjust` as a fraction (1.0 is 100%).
    pub size_adjust: Option<f32>,
    /// `ascent-override` as a fraction of em.
    pub ascent_override: Option<f32>,
    /// `descent-override` as a fraction of em, non-positive.
    pub descent_override: Option<f32>,
    /// `line-gap-override` as a fraction of em.
    pub line_gap_override: Option<f32>,
}

impl FontOverrides {
    /// Merges two override layers, preferring `self` field-wise.
    pub fn or(&self, base: &Self) -> Self {
        Self {
            font_size: self.font_size.or(base.font_size),
            scale: self.scale.or(base.scale),
            line_height: self.line_height.or(base.line_height),
            letter_spacing: self.letter_spacing.or(base.letter_spacing),
            weight: self.weight.or(base.weight),
            size_adjust: self.size_adjust.or(base.size_adjust),
            ascent_override: self.ascent_override.or(base.ascent_override),
            descent_override: self.descent_override.or(base.descent_override),
            line_gap_override: self.line_gap_override.or(base.line_gap_override),
        }
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Colors assigned to fallback fonts for visual attribution.
///
/// Picked for mutual contrast on a light background.
pub const PALETTE: &[&str] = &[
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe", "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000", "#aaffc3",
    "#808000", "#ffd8b1", "#000075", "#808080",
];

/// A font configured within a style.
///
/// A font may carry parsed binary data (an uploaded file) or be a bare
/// family name resolved by the host environment. Only fonts with data have
/// metrics and can participate in override computation and coverage tests.
pub struct Font {
    id: FontId,
    kind: FontKind,
    name: String,
    file_name: Option<String>,
    color: &'static str,
    handle: Option<Box<dyn FontHandle>>,
    metrics: Option<FontMetrics>,
    /// Per-font setting overrides, applied over the style-level settings.
    pub overrides: FontOverrides,
    /// Whether the underlying file is a variable font.
    pub variable: bool,
    /// Hidden fonts stay configured but drop out of every resolved chain.
    pub hidden: bool,
    /// Marks a fallback used as a primary substitute rather than a chain
    /// member; such fonts are excluded from the default chain.
    pub primary_override: bool,
}

impl Font {
    /// Creates a font from a family name, with no binary data.
    pub fn named(name: impl Into<String>, kind: FontKind, color: &'static str) -> Self {
        Self {
            id: FontId::new(),
            kind,
            name: name.into(),
            file_name: None,
            color,
            handle: None,
            metrics: None,
            overrides: FontOverrides::default(),
            variable: false,
            hidden: false,
            primary_override: false,
        }
    }

    /// Creates a font from an uploaded file.
    pub fn from_file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        handle: Box<dyn FontHandle>,
        kind: FontKind,
        color: &'static str,
    ) -> Self {
        let mut font = Self::named(name, kind, color);
        font.file_name = Some(file_name.into());
        font.set_handle(Some(handle));
        font
    }

    /// Unique identifier of this font.
    pub fn id(&self) -> FontId {
        self.id
    }

    /// Role of this font within its style.
    pub fn kind(&self) -> FontKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: FontKind) {
        self.kind = kind;
    }

    /// Family name shown to the user and emitted in generated CSS.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the uploaded file, if this font was created from one.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Whether this font carries parsed binary data.
    pub fn has_file(&self) -> bool {
        self.handle.is_some()
    }

    /// Attribution color assigned when the font was added.
    pub fn color(&self) -> &'static str {
        self.color
    }

    /// Parsed font data, when present.
    pub fn handle(&self) -> Option<&dyn FontHandle> {
        self.handle.as_deref()
    }

    /// Replaces the parsed font data and recomputes metrics.
    pub fn set_handle(&mut self, handle: Option<Box<dyn FontHandle>>) {
        self.handle = handle;
        self.metrics = extract_font_metrics(self.handle.as_deref());
    }

    /// Metric record extracted from the font data, when available.
    pub fn metrics(&self) -> Option<&FontMetrics> {
        self.metrics.as_ref()
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("has_file", &self.has_file())
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

/// Case-insensitive key for family and file name comparisons.
pub(crate) fn name_key(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}
