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

use std::io::BufRead;
use std::io::Write;

use crate::console::Console;
use crate::deck::Card;
use crate::deck::Deck;
use crate::error::Fallible;

/// How one answer compares against the deck.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The answer is this card's definition.
    Correct,
    /// The answer is the definition of a different card; carries the
    /// term the answer actually belongs to.
    WrongButKnown(String),
    /// The answer matches no definition in the deck.
    WrongEntirely,
}

pub fn classify(deck: &Deck, definition: &str, answer: &str) -> Outcome {
    if answer == definition {
        return Outcome::Correct;
    }
    match deck.term_of(answer) {
        Some(owner) => Outcome::WrongButKnown(owner.to_string()),
        None => Outcome::WrongEntirely,
    }
}

/// Run one quiz session: one question per card in insertion order, until
/// `requested` questions have been asked.
///
/// When `requested` reaches or exceeds the deck size the session plays
/// zero rounds and ends at once; a non-positive `requested` also yields
/// zero rounds. Every session ends with a blank separator line.
pub fn run_session<R: BufRead, W: Write>(
    deck: &mut Deck,
    requested: i64,
    console: &mut Console<R, W>,
) -> Fallible<()> {
    let total = deck.len() as i64;
    if requested >= total {
        console.say("")?;
        return Ok(());
    }

    // Snapshot so answers can update the counts mid-iteration. Cards
    // themselves do not change during a session.
    let cards: Vec<Card> = deck.iter().cloned().collect();
    let mut asked: i64 = 0;
    // Tallies rounds missed outright; nothing user-visible consumes it.
    let mut missed: u32 = 0;

    for card in &cards {
        if asked >= requested {
            break;
        }
        let answer = console.ask(&format!("Print the definition of \"{}\":", card.term))?;
        match classify(deck, &card.definition, &answer) {
            Outcome::Correct => {
                console.say("Correct!\n")?;
            }
            Outcome::WrongButKnown(owner) => {
                console.say(&format!(
                    "Wrong. The right answer is \"{}\", but your definition is correct for \"{owner}\".",
                    card.definition
                ))?;
                deck.record_error(&card.term);
            }
            Outcome::WrongEntirely => {
                console.say(&format!(
                    "Wrong. The right answer is \"{}\".",
                    card.definition
                ))?;
                deck.record_error(&card.term);
                missed += 1;
            }
        }
        asked += 1;
    }

    log::debug!("Session over: {asked} asked, {missed} missed outright.");
    console.say("")?;
    Ok(())
}
