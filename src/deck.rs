// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;

use crate::error::DeckError;
use crate::error::Fallible;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub term: String,
    pub definition: String,
}

/// The deck: every card in insertion order, plus the per-term count of
/// wrong answers. Every card term has exactly one entry in `errors`.
#[derive(Default)]
pub struct Deck {
    cards: Vec<Card>,
    errors: HashMap<String, u32>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in insertion order. Quiz rounds and export both depend on
    /// this ordering.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn term_exists(&self, term: &str) -> bool {
        self.cards.iter().any(|card| card.term == term)
    }

    pub fn definition_exists(&self, definition: &str) -> bool {
        self.cards.iter().any(|card| card.definition == definition)
    }

    /// Reverse lookup: the term that owns a definition. Definitions are
    /// unique, so a linear scan finds at most one match.
    pub fn term_of(&self, definition: &str) -> Option<&str> {
        self.cards
            .iter()
            .find(|card| card.definition == definition)
            .map(|card| card.term.as_str())
    }

    /// Add a card and initialize its error count to zero. Rejects a
    /// duplicate term or a duplicate definition without mutating anything.
    pub fn create(&mut self, term: &str, definition: &str) -> Fallible<()> {
        if self.term_exists(term) {
            return Err(DeckError::DuplicateTerm(term.to_string()));
        }
        if self.definition_exists(definition) {
            return Err(DeckError::DuplicateDefinition(definition.to_string()));
        }
        self.cards.push(Card {
            term: term.to_string(),
            definition: definition.to_string(),
        });
        self.errors.insert(term.to_string(), 0);
        Ok(())
    }

    /// Remove a card and its error count together.
    pub fn remove(&mut self, term: &str) -> Fallible<()> {
        let position = self
            .cards
            .iter()
            .position(|card| card.term == term)
            .ok_or_else(|| DeckError::NotFound(term.to_string()))?;
        self.cards.remove(position);
        self.errors.remove(term);
        Ok(())
    }

    /// Count one wrong answer against a term. A no-op for an unknown
    /// term, which cannot happen while the deck invariant holds.
    pub fn record_error(&mut self, term: &str) {
        if let Some(count) = self.errors.get_mut(term) {
            *count += 1;
        }
    }

    pub fn error_count(&self, term: &str) -> u32 {
        self.errors.get(term).copied().unwrap_or(0)
    }

    /// The highest error count across the deck, or None when the deck
    /// has no cards.
    pub fn max_error_count(&self) -> Option<u32> {
        self.errors.values().copied().max()
    }

    /// All terms whose error count equals `count`, in insertion order.
    pub fn terms_with_count(&self, count: u32) -> Vec<&str> {
        self.cards
            .iter()
            .filter(|card| self.error_count(&card.term) == count)
            .map(|card| card.term.as_str())
            .collect()
    }

    pub fn reset_errors(&mut self) {
        for count in self.errors.values_mut() {
            *count = 0;
        }
    }

    /// Trusted insert for the decoder: replaces the definition in place
    /// when the term is already present, otherwise appends. The count is
    /// always overwritten.
    pub fn restore(&mut self, term: &str, definition: &str, count: u32) {
        match self.cards.iter_mut().find(|card| card.term == term) {
            Some(card) => card.definition = definition.to_string(),
            None => self.cards.push(Card {
                term: term.to_string(),
                definition: definition.to_string(),
            }),
        }
        self.errors.insert(term.to_string(), count);
    }
}
