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

use crate::deck::Deck;

/// Summary of the card(s) with the most wrong answers. Formatting is
/// left to the caller.
#[derive(Debug, PartialEq, Eq)]
pub enum HardestCards {
    /// No cards, or no card has any errors.
    None,
    Single { term: String, errors: u32 },
    /// Several cards tie for the highest count; `errors` is their sum.
    Multiple { terms: Vec<String>, errors: u32 },
}

/// Two-stage selection: first every term whose count equals the deck
/// maximum (even when that maximum is 0), then the subset of those with
/// a positive count. The second stage decides between none, single and
/// multiple.
pub fn hardest_cards(deck: &Deck) -> HardestCards {
    let max = match deck.max_error_count() {
        Some(max) => max,
        None => return HardestCards::None,
    };
    let holders = deck.terms_with_count(max);
    let with_errors: Vec<&str> = holders
        .into_iter()
        .filter(|term| deck.error_count(term) > 0)
        .collect();
    let errors: u32 = with_errors.iter().map(|term| deck.error_count(term)).sum();
    match with_errors.as_slice() {
        [] => HardestCards::None,
        [term] => HardestCards::Single {
            term: term.to_string(),
            errors,
        },
        terms => HardestCards::Multiple {
            terms: terms.iter().map(|term| term.to_string()).collect(),
            errors,
        },
    }
}

pub fn reset(deck: &mut Deck) {
    deck.reset_errors();
}
