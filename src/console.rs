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

use std::fs::OpenOptions;
use std::io::BufRead;
use std::io::Write;
use std::path::Path;

use crate::error::DeckError;
use crate::error::Fallible;

/// The interactive surface of the program: one input source, one output
/// sink, and the transcript of everything that crossed either. The
/// transcript is append-only for the lifetime of the process.
///
/// Both ends are generic so tests can drive a session from a `Cursor`
/// and capture the output in a `Vec<u8>`.
pub struct Console<R, W> {
    input: R,
    output: W,
    transcript: Vec<String>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            transcript: Vec::new(),
        }
    }

    /// Print one line and record it. Messages that end a command cycle
    /// carry a trailing newline in `line` itself, which shows up as the
    /// blank separator line on screen and in the saved log.
    pub fn say(&mut self, line: &str) -> Fallible<()> {
        self.transcript.push(line.to_string());
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Block for one line of input, record it, and return it without
    /// the trailing newline.
    pub fn read_line(&mut self) -> Fallible<String> {
        let mut line = String::new();
        let bytes = self.input.read_line(&mut line)?;
        if bytes == 0 {
            return Err(DeckError::InputClosed);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        self.transcript.push(line.clone());
        Ok(line)
    }

    pub fn ask(&mut self, prompt: &str) -> Fallible<String> {
        self.say(prompt)?;
        self.read_line()
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Append every transcript entry to the file, one per `writeln!`.
    /// Append mode: an existing log file is extended, never truncated.
    pub fn append_transcript(&self, path: &Path) -> Fallible<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        for entry in &self.transcript {
            writeln!(file, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;
    use std::io::Cursor;

    use super::*;

    fn console_with_input(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_say_prints_and_records() -> Fallible<()> {
        let mut console = console_with_input("");
        console.say("hello")?;
        console.say("world\n")?;
        assert_eq!(console.transcript(), ["hello", "world\n"]);
        assert_eq!(console.output, b"hello\nworld\n\n");
        Ok(())
    }

    #[test]
    fn test_read_line_strips_newline_and_records() -> Fallible<()> {
        let mut console = console_with_input("first\r\nsecond\n");
        assert_eq!(console.read_line()?, "first");
        assert_eq!(console.read_line()?, "second");
        assert_eq!(console.transcript(), ["first", "second"]);
        Ok(())
    }

    #[test]
    fn test_read_line_at_end_of_input() {
        let mut console = console_with_input("");
        let result = console.read_line();
        assert!(matches!(result, Err(DeckError::InputClosed)));
    }

    #[test]
    fn test_ask_interleaves_prompt_and_answer() -> Fallible<()> {
        let mut console = console_with_input("Paris\n");
        let answer = console.ask("The definition of the card:")?;
        assert_eq!(answer, "Paris");
        assert_eq!(
            console.transcript(),
            ["The definition of the card:", "Paris"]
        );
        Ok(())
    }

    #[test]
    fn test_append_transcript_appends() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.log");
        std::fs::write(&path, "earlier\n")?;

        let mut console = console_with_input("pong\n");
        console.say("ping")?;
        console.read_line()?;
        console.append_transcript(&path)?;

        let contents = read_to_string(&path)?;
        assert_eq!(contents, "earlier\nping\npong\n");
        Ok(())
    }
}
