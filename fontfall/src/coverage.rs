// Copyright 2025 the Fontfall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-character glyph coverage over a resolved fallback chain.

use crate::handle::FontHandle;
use crate::resolve::ResolvedEntry;
use std::hash::{DefaultHasher, Hash as _, Hasher as _};

/// Which font a character renders with.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CharSource {
    /// The primary font covers the character.
    Primary,
    /// The character falls through to the chain entry at this index.
    Fallback(usize),
}

/// A character attributed to the font that renders it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AttributedChar {
    /// The character.
    pub ch: char,
    /// The font it renders with.
    pub source: CharSource,
}

/// Attributes every character of `text` to the font that renders it.
///
/// A character belongs to the primary font when the primary's character map
/// has a real glyph for it. Otherwise the chain is walked in order: an entry
/// with font data claims the character if it covers it, and an entry without
/// font data (the system family, or a bare family name) claims it
/// unconditionally since its coverage cannot be inspected. A character no
/// entry claims is attributed to the last entry, and an empty chain
/// attributes everything to the primary.
pub fn render_with_fallback(
    text: &str,
    primary: Option<&dyn FontHandle>,
    chain: &[ResolvedEntry<'_>],
) -> Vec<AttributedChar> {
    text.chars()
        .map(|ch| AttributedChar {
            ch,
            source: attribute_char(ch, primary, chain),
        })
        .collect()
}

fn attribute_char(
    ch: char,
    primary: Option<&dyn FontHandle>,
    chain: &[ResolvedEntry<'_>],
) -> CharSource {
    if primary.is_some_and(|handle| has_glyph(handle, ch)) {
        return CharSource::Primary;
    }
    if chain.is_empty() {
        return CharSource::Primary;
    }
    for (index, entry) in chain.iter().enumerate() {
        match entry.handle {
            Some(handle) => {
                if has_glyph(handle, ch) {
                    return CharSource::Fallback(index);
                }
            }
            // Coverage of a handle-less entry cannot be inspected, so the
            // walk stops here.
            None => return CharSource::Fallback(index),
        }
    }
    CharSource::Fallback(chain.len() - 1)
}

/// Whether a font has a real glyph for a character.
///
/// Both a `.notdef` mapping and a failed character map lookup count as
/// absent.
fn has_glyph(handle: &dyn FontHandle, ch: char) -> bool {
    matches!(handle.nominal_glyph(ch), Some(glyph_id) if glyph_id != 0)
}

/// Cached per-character attribution.
///
/// Attribution queries the character map of every uploaded font in the
/// chain for every character, which adds up over repeated renders of the
/// same sample texts. The cache keys on the character plus a signature of
/// the chain shape, and evicts the least recently used entry once full. It
/// is a linear-scan structure sized for repeated renders of short samples;
/// keep one per primary font context, since the primary does not participate
/// in the signature.
#[derive(Debug)]
pub struct CoverageCache {
    entries: Vec<CacheEntry>,
    epoch: u64,
    max_entries: usize,
}

#[derive(Debug)]
struct CacheEntry {
    epoch: u64,
    key: (char, u64),
    source: CharSource,
}

impl CoverageCache {
    /// Creates a cache holding at most `max_entries` attributions.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            epoch: 0,
            max_entries,
        }
    }

    /// Like [`render_with_fallback`], but memoized.
    pub fn render(
        &mut self,
        text: &str,
        primary: Option<&dyn FontHandle>,
        chain: &[ResolvedEntry<'_>],
    ) -> Vec<AttributedChar> {
        let signature = chain_signature(chain);
        text.chars()
            .map(|ch| AttributedChar {
                ch,
                source: self.attribute(ch, signature, primary, chain),
            })
            .collect()
    }

    fn attribute(
        &mut self,
        ch: char,
        signature: u64,
        primary: Option<&dyn FontHandle>,
        chain: &[ResolvedEntry<'_>],
    ) -> CharSource {
        let key = (ch, signature);
        let mut lowest_epoch = self.epoch;
        let mut lowest_index = 0;
        let mut found = None;
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.key == key {
                found = Some(index);
                break;
            }
            if entry.epoch < lowest_epoch {
                lowest_epoch = entry.epoch;
                lowest_index = index;
            }
        }
        self.epoch += 1;
        if let Some(index) = found {
            let entry = &mut self.entries[index];
            entry.epoch = self.epoch;
            return entry.source;
        }
        let source = attribute_char(ch, primary, chain);
        let entry = CacheEntry {
            epoch: self.epoch,
            key,
            source,
        };
        if self.entries.len() < self.max_entries {
            self.entries.push(entry);
        } else if let Some(slot) = self.entries.get_mut(lowest_index) {
            *slot = entry;
        }
        source
    }
}

/// Hashes the aspects of a chain that attribution depends on.
fn chain_signature(chain: &[ResolvedEntry<'_>]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for entry in chain {
        entry.identity.hash(&mut hasher);
        entry.family.hash(&mut hasher);
        entry.handle.is_some().hash(&mut hasher);
    }
    hasher.finish()
}
