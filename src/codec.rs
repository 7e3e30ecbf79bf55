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

use std::fs::read_to_string;
use std::fs::write;
use std::io::ErrorKind;
use std::path::Path;

use crate::deck::Deck;
use crate::error::DeckError;
use crate::error::Fallible;

/// Parse the flat card format: each card is exactly 3 consecutive lines,
/// `term`, `definition`, `errorCount`. Returns a fresh deck (an import
/// replaces the deck, it does not merge) and the number of cards read,
/// which is `lines / 3`. A trailing partial triple is silently dropped.
///
/// Terms and definitions containing a line break are not representable
/// in this format.
pub fn decode(text: &str) -> Fallible<(Deck, usize)> {
    let lines: Vec<&str> = text.lines().collect();
    let mut deck = Deck::new();
    for triple in lines.chunks_exact(3) {
        let count: u32 = triple[2]
            .parse()
            .map_err(|_| DeckError::MalformedCount(triple[2].to_string()))?;
        deck.restore(triple[0], triple[1], count);
    }
    Ok((deck, lines.len() / 3))
}

/// Render the deck in the same 3-lines-per-card format, in insertion
/// order. An empty deck renders as an empty string.
pub fn encode(deck: &Deck) -> String {
    let mut text = String::new();
    for card in deck.iter() {
        text.push_str(&card.term);
        text.push('\n');
        text.push_str(&card.definition);
        text.push('\n');
        text.push_str(&deck.error_count(&card.term).to_string());
        text.push('\n');
    }
    text
}

/// Read and decode a card file. A missing file is `FileNotFound`, which
/// the caller reports without touching the current deck.
pub fn read_deck(path: &Path) -> Fallible<(Deck, usize)> {
    let text = match read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(DeckError::FileNotFound),
        Err(e) => return Err(e.into()),
    };
    decode(&text)
}

/// Encode the deck and overwrite the file (truncates prior content; an
/// export is never an append). Returns the number of cards written.
pub fn write_deck(deck: &Deck, path: &Path) -> Fallible<usize> {
    write(path, encode(deck))?;
    Ok(deck.len())
}
