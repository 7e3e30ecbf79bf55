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
use std::io::stdin;
use std::io::stdout;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;

use crate::codec;
use crate::console::Console;
use crate::deck::Deck;
use crate::error::DeckError;
use crate::error::Fallible;
use crate::quiz;
use crate::stats;
use crate::stats::HardestCards;

const MENU_PROMPT: &str =
    "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):";

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Load a card file before the first menu prompt.
    #[arg(long, value_name = "PATH")]
    import: Option<PathBuf>,
    /// Save the cards to this file when the session ends.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
}

pub fn entrypoint() -> Fallible<()> {
    let cli = Cli::parse();
    let mut console = Console::new(stdin().lock(), stdout());
    let mut deck = Deck::new();
    if let Some(path) = &cli.import {
        import_deck(&mut deck, path, &mut console)?;
    }
    run_menu(&mut deck, &mut console)?;
    if let Some(path) = &cli.export {
        export_deck(&deck, path, &mut console)?;
    }
    Ok(())
}

/// One menu cycle per line of input, until `exit`.
fn run_menu<R: BufRead, W: Write>(deck: &mut Deck, console: &mut Console<R, W>) -> Fallible<()> {
    loop {
        let action = console.ask(MENU_PROMPT)?;
        match action.as_str() {
            "add" => add_card(deck, console)?,
            "remove" => remove_card(deck, console)?,
            "import" => {
                let path = prompt_path(console)?;
                import_deck(deck, &path, console)?;
            }
            "export" => {
                let path = prompt_path(console)?;
                export_deck(deck, &path, console)?;
            }
            "ask" => ask_cards(deck, console)?,
            "hardest card" => report_hardest_card(deck, console)?,
            "reset stats" => reset_stats(deck, console)?,
            "log" => save_log(console)?,
            "exit" => {
                console.say("Bye bye!")?;
                break;
            }
            other => log::debug!("Ignoring unknown action {other:?}."),
        }
    }
    Ok(())
}

/// Two-phase prompting: the term is checked before the definition is
/// even asked for.
fn add_card<R: BufRead, W: Write>(deck: &mut Deck, console: &mut Console<R, W>) -> Fallible<()> {
    let term = console.ask("The card:")?;
    if deck.term_exists(&term) {
        console.say(&format!("The card \"{term}\" already exists.\n"))?;
        return Ok(());
    }
    let definition = console.ask("The definition of the card:")?;
    match deck.create(&term, &definition) {
        Ok(()) => {
            console.say(&format!("The pair (\"{term}\":\"{definition}\") has been added\n"))?;
        }
        Err(DeckError::DuplicateDefinition(_)) => {
            console.say(&format!("The definition \"{definition}\" already exists.\n"))?;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn remove_card<R: BufRead, W: Write>(deck: &mut Deck, console: &mut Console<R, W>) -> Fallible<()> {
    let term = console.ask("Which card?")?;
    match deck.remove(&term) {
        Ok(()) => console.say("The card has been removed.\n")?,
        Err(DeckError::NotFound(_)) => {
            console.say(&format!("Can't remove \"{term}\": there is no such card.\n"))?;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Replace the deck from a file. On any failure the current deck is left
/// untouched.
fn import_deck<R: BufRead, W: Write>(
    deck: &mut Deck,
    path: &Path,
    console: &mut Console<R, W>,
) -> Fallible<()> {
    match codec::read_deck(path) {
        Ok((loaded, count)) => {
            log::debug!("Imported {count} cards from {}.", path.display());
            *deck = loaded;
            console.say(&format!("{count} cards have been loaded.\n"))?;
        }
        Err(DeckError::FileNotFound) => console.say("File not found.\n")?,
        Err(e @ DeckError::MalformedCount(_)) => {
            console.say(&format!("Import failed: {e}.\n"))?;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn export_deck<R: BufRead, W: Write>(
    deck: &Deck,
    path: &Path,
    console: &mut Console<R, W>,
) -> Fallible<()> {
    let count = codec::write_deck(deck, path)?;
    console.say(&format!("{count} cards have been saved.\n"))?;
    Ok(())
}

fn ask_cards<R: BufRead, W: Write>(deck: &mut Deck, console: &mut Console<R, W>) -> Fallible<()> {
    let answer = console.ask("How many times to ask?")?;
    let requested: i64 = match answer.parse() {
        Ok(n) => n,
        Err(_) => {
            console.say(&format!("Invalid number: \"{answer}\".\n"))?;
            return Ok(());
        }
    };
    quiz::run_session(deck, requested, console)
}

fn report_hardest_card<R: BufRead, W: Write>(
    deck: &Deck,
    console: &mut Console<R, W>,
) -> Fallible<()> {
    match stats::hardest_cards(deck) {
        HardestCards::None => console.say("There are no cards with errors.\n")?,
        HardestCards::Single { term, errors } => {
            console.say(&format!(
                "The hardest card is \"{term}\". You have {errors} errors answering it.\n"
            ))?;
        }
        HardestCards::Multiple { terms, errors } => {
            let terms = terms
                .iter()
                .map(|term| format!("\"{term}\""))
                .collect::<Vec<_>>()
                .join(", ");
            console.say(&format!(
                "The hardest cards are {terms}. You have {errors} errors answering them.\n"
            ))?;
        }
    }
    Ok(())
}

fn reset_stats<R: BufRead, W: Write>(deck: &mut Deck, console: &mut Console<R, W>) -> Fallible<()> {
    stats::reset(deck);
    console.say("Card statistics have been reset.\n")?;
    Ok(())
}

/// The saved log does not include its own confirmation line: the
/// transcript is written first, the report comes after.
fn save_log<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Fallible<()> {
    let path = prompt_path(console)?;
    console.append_transcript(&path)?;
    console.say("The log has been saved.\n")?;
    Ok(())
}

fn prompt_path<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Fallible<PathBuf> {
    let filename = console.ask("File name:")?;
    Ok(PathBuf::from(filename))
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;
    use std::io::Cursor;

    use super::*;

    fn run_script(deck: &mut Deck, input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        run_menu(deck, &mut console).unwrap();
        console
    }

    #[test]
    fn test_add_then_exit() {
        let mut deck = Deck::new();
        let console = run_script(&mut deck, "add\nAstronaut\nSpace explorer\nexit\n");
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.term_of("Space explorer"), Some("Astronaut"));
        assert!(console.transcript().contains(
            &"The pair (\"Astronaut\":\"Space explorer\") has been added\n".to_string()
        ));
        assert_eq!(console.transcript().last().unwrap(), "Bye bye!");
    }

    #[test]
    fn test_add_duplicate_term_stops_before_definition_prompt() {
        let mut deck = Deck::new();
        deck.create("capital", "Paris").unwrap();
        let console = run_script(&mut deck, "add\ncapital\nexit\n");
        assert_eq!(deck.len(), 1);
        assert!(
            console
                .transcript()
                .contains(&"The card \"capital\" already exists.\n".to_string())
        );
        // The definition was never asked for.
        assert!(
            !console
                .transcript()
                .contains(&"The definition of the card:".to_string())
        );
    }

    #[test]
    fn test_add_duplicate_definition() {
        let mut deck = Deck::new();
        deck.create("capital", "Paris").unwrap();
        let console = run_script(&mut deck, "add\ncity\nParis\nexit\n");
        assert_eq!(deck.len(), 1);
        assert!(
            console
                .transcript()
                .contains(&"The definition \"Paris\" already exists.\n".to_string())
        );
    }

    #[test]
    fn test_remove_unknown_card() {
        let mut deck = Deck::new();
        let console = run_script(&mut deck, "remove\nplanet\nexit\n");
        assert!(
            console
                .transcript()
                .contains(&"Can't remove \"planet\": there is no such card.\n".to_string())
        );
    }

    #[test]
    fn test_unknown_action_keeps_the_loop_going() {
        let mut deck = Deck::new();
        let console = run_script(&mut deck, "dance\nexit\n");
        let prompts = console
            .transcript()
            .iter()
            .filter(|entry| entry.as_str() == MENU_PROMPT)
            .count();
        assert_eq!(prompts, 2);
    }

    #[test]
    fn test_quiz_session_updates_stats() {
        let mut deck = Deck::new();
        deck.create("capital", "Paris").unwrap();
        deck.create("currency", "Euro").unwrap();
        deck.create("mountain", "Alps").unwrap();
        let console = run_script(&mut deck, "ask\n1\nEuro\nhardest card\nexit\n");
        assert_eq!(deck.error_count("capital"), 1);
        assert!(console.transcript().contains(
            &"Wrong. The right answer is \"Paris\", but your definition is correct for \"currency\"."
                .to_string()
        ));
        assert!(console.transcript().contains(
            &"The hardest card is \"capital\". You have 1 errors answering it.\n".to_string()
        ));
    }

    #[test]
    fn test_invalid_round_count_is_reported() {
        let mut deck = Deck::new();
        deck.create("capital", "Paris").unwrap();
        let console = run_script(&mut deck, "ask\nmany\nexit\n");
        assert!(
            console
                .transcript()
                .contains(&"Invalid number: \"many\".\n".to_string())
        );
        assert_eq!(deck.error_count("capital"), 0);
    }

    #[test]
    fn test_hardest_card_reports_ties() {
        let mut deck = Deck::new();
        deck.create("a", "1").unwrap();
        deck.create("b", "2").unwrap();
        deck.record_error("a");
        deck.record_error("b");
        let console = run_script(&mut deck, "hardest card\nexit\n");
        assert!(console.transcript().contains(
            &"The hardest cards are \"a\", \"b\". You have 2 errors answering them.\n".to_string()
        ));
    }

    #[test]
    fn test_reset_stats() {
        let mut deck = Deck::new();
        deck.create("capital", "Paris").unwrap();
        deck.record_error("capital");
        let console = run_script(&mut deck, "reset stats\nhardest card\nexit\n");
        assert!(
            console
                .transcript()
                .contains(&"Card statistics have been reset.\n".to_string())
        );
        assert!(
            console
                .transcript()
                .contains(&"There are no cards with errors.\n".to_string())
        );
    }

    #[test]
    fn test_import_replaces_the_deck() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cards.txt");
        std::fs::write(&path, "currency\nEuro\n2\n")?;

        let mut deck = Deck::new();
        deck.create("capital", "Paris")?;
        let script = format!("import\n{}\nexit\n", path.display());
        let console = run_script(&mut deck, &script);

        // Full replace, not a merge.
        assert_eq!(deck.len(), 1);
        assert!(!deck.term_exists("capital"));
        assert_eq!(deck.error_count("currency"), 2);
        assert!(
            console
                .transcript()
                .contains(&"1 cards have been loaded.\n".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_import_missing_file() {
        let mut deck = Deck::new();
        deck.create("capital", "Paris").unwrap();
        let console = run_script(&mut deck, "import\nderpherp.txt\nexit\n");
        assert!(
            console
                .transcript()
                .contains(&"File not found.\n".to_string())
        );
        // Aborted import left the deck alone.
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_import_malformed_count_leaves_deck_untouched() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cards.txt");
        std::fs::write(&path, "currency\nEuro\nmany\n")?;

        let mut deck = Deck::new();
        deck.create("capital", "Paris")?;
        let script = format!("import\n{}\nexit\n", path.display());
        let console = run_script(&mut deck, &script);

        assert_eq!(deck.len(), 1);
        assert!(deck.term_exists("capital"));
        assert!(
            console
                .transcript()
                .iter()
                .any(|entry| entry.starts_with("Import failed:"))
        );
        Ok(())
    }

    #[test]
    fn test_export_writes_the_deck() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.txt");

        let mut deck = Deck::new();
        deck.create("capital", "Paris")?;
        deck.create("currency", "Euro")?;
        let script = format!("export\n{}\nexit\n", path.display());
        let console = run_script(&mut deck, &script);

        assert_eq!(
            read_to_string(&path)?,
            "capital\nParis\n0\ncurrency\nEuro\n0\n"
        );
        assert!(
            console
                .transcript()
                .contains(&"2 cards have been saved.\n".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_log_appends_transcript_so_far() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.log");

        let mut deck = Deck::new();
        let script = format!("log\n{}\nexit\n", path.display());
        run_script(&mut deck, &script);

        let contents = read_to_string(&path)?;
        // The log holds everything up to the save, not the confirmation.
        assert!(contents.starts_with(MENU_PROMPT));
        assert!(contents.contains("File name:"));
        assert!(!contents.contains("The log has been saved."));
        Ok(())
    }

    #[test]
    fn test_log_appends_to_an_existing_file() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.log");
        std::fs::write(&path, "previous run\n")?;

        let mut deck = Deck::new();
        let script = format!("log\n{}\nexit\n", path.display());
        run_script(&mut deck, &script);

        let contents = read_to_string(&path)?;
        assert!(contents.starts_with("previous run\n"));
        assert!(contents.contains(MENU_PROMPT));
        Ok(())
    }
}
