//! Merge-by-key aggregation.
//!
//! Every fetcher owns one `ResultMap` for the duration of a single fetch call.
//! The first sighting of a dedup key creates the entry; later sightings update
//! it in place, so an entry keeps the position of its first appearance.

use std::collections::HashMap;

use crate::results::{
    DjEvent, MatchedInputs, Playlist, PressArticle, RadioStation, ResearchResults, VerticalResult,
};

/// A result record that can be collapsed by dedup key.
pub trait Keyed {
    fn key(&self) -> &str;
    fn matched_inputs_mut(&mut self) -> &mut MatchedInputs;
}

macro_rules! impl_keyed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Keyed for $ty {
                fn key(&self) -> &str {
                    &self.id
                }

                fn matched_inputs_mut(&mut self) -> &mut MatchedInputs {
                    &mut self.matched_inputs
                }
            }
        )*
    };
}

impl_keyed!(Playlist, RadioStation, DjEvent, PressArticle);

/// Insertion-ordered map from dedup key to result.
#[derive(Debug, Clone)]
pub struct ResultMap<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for ResultMap<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }
}

impl<T: Keyed> ResultMap<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entry or merge into the existing one with the same key.
    ///
    /// On first sight `create` builds the entry and `input_index` becomes its
    /// only matched input. On repeat sight `update` runs against the existing
    /// entry and `input_index` is added to its matched inputs.
    /// Returns `true` when a new entry was created.
    pub fn upsert<C, U>(&mut self, key: &str, input_index: usize, create: C, update: U) -> bool
    where
        C: FnOnce() -> T,
        U: FnOnce(&mut T),
    {
        if let Some(&pos) = self.index.get(key) {
            if let Some(existing) = self.entries.get_mut(pos) {
                update(existing);
                existing.matched_inputs_mut().insert(input_index);
            }
            return false;
        }

        let mut entry = create();
        entry.matched_inputs_mut().insert(input_index);
        self.index.insert(key.to_owned(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Merge a fully built entry, widening matched inputs on collision.
    pub fn merge(&mut self, entry: T) {
        let key = entry.key().to_owned();
        if let Some(&pos) = self.index.get(&key) {
            if let Some(existing) = self.entries.get_mut(pos) {
                let incoming = entry_inputs(entry);
                existing.matched_inputs_mut().extend(incoming);
            }
            return;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).and_then(|&pos| self.entries.get(pos))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the map into its ordered entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.entries
    }
}

fn entry_inputs<T: Keyed>(mut entry: T) -> MatchedInputs {
    std::mem::take(entry.matched_inputs_mut())
}

/// Concatenate the four vertical lists for "show all" views.
///
/// Order is DSP, radio, DJ, press. No deduplication happens across
/// verticals: a playlist and an article about the same release stay separate.
#[must_use]
pub fn flatten(results: &ResearchResults) -> Vec<VerticalResult> {
    results
        .dsp_results
        .iter()
        .cloned()
        .map(VerticalResult::Dsp)
        .chain(results.radio_results.iter().cloned().map(VerticalResult::Radio))
        .chain(results.dj_results.iter().cloned().map(VerticalResult::Dj))
        .chain(results.press_results.iter().cloned().map(VerticalResult::Press))
        .collect()
}
