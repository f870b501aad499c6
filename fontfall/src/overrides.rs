// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computation of CSS `@font-face` metric overrides.

use crate::metrics::FontMetrics;

/// The four `@font-face` descriptor values that align a fallback font's
/// vertical box and x-height to a primary font.
///
/// The four values are always computed together from one (primary, fallback)
/// metric pair; applying a subset does not eliminate layout shift.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct OverrideSet {
    /// Multiplier applied to the fallback's effective em size.
    pub size_adjust: f32,
    /// Forced ascent as a fraction of em.
    pub ascent_override: f32,
    /// Forced descent as a fraction of em, non-positive.
    pub descent_override: f32,
    /// Forced line gap as a fraction of em.
    pub line_gap_override: f32,
}

impl OverrideSet {
    /// Descent magnitude for CSS serialization.
    ///
    /// The `descent-override` descriptor takes a non-negative percentage
    /// even though the metric itself is stored as a non-positive value.
    pub fn css_descent(&self) -> f32 {
        self.descent_override.abs()
    }
}

/// Computes the override set that makes `fallback` occupy the same vertical
/// box and x-height as `primary`.
///
/// `size-adjust` is the ratio of normalized x-heights: x-height is the
/// dominant visual-size cue when two typefaces render at the same declared
/// font size. Because `size-adjust` scales the fallback's metrics *before*
/// the vertical overrides apply, each override is pre-divided by the
/// size-adjust factor so the final rendered metric lands exactly on the
/// primary's normalized value.
///
/// Returns `None` when either metric record is missing or has a degenerate
/// x-height; callers treat that as "emit no overrides".
pub fn calculate_overrides(
    primary: Option<&FontMetrics>,
    fallback: Option<&FontMetrics>,
) -> Option<OverrideSet> {
    let primary = primary?.normalized;
    let fallback = fallback?.normalized;
    if !(primary.x_height > 0.0) || !(fallback.x_height > 0.0) {
        return None;
    }
    let size_adjust = primary.x_height / fallback.x_height;
    if !size_adjust.is_finite() {
        return None;
    }
    Some(OverrideSet {
        size_adjust,
        ascent_override: primary.ascent / size_adjust,
        descent_override: primary.descent / size_adjust,
        line_gap_override: primary.line_gap / size_adjust,
    })
}

/// Formats a fractional value as a CSS percentage with two decimals.
///
/// This is the serialization used for all four descriptors:
/// `0.957` becomes `"95.70%"`.
pub fn format_percent(value: f32) -> String {
    format!("{:.2}%", value * 100.0)
}
