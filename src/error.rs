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

use thiserror::Error;

pub type Fallible<T> = Result<T, DeckError>;

/// Errors that can occur while managing or persisting the deck.
#[derive(Debug, Error)]
pub enum DeckError {
    /// A card with this term is already in the deck.
    #[error("the card \"{0}\" already exists")]
    DuplicateTerm(String),

    /// Another card already carries this definition.
    #[error("the definition \"{0}\" already exists")]
    DuplicateDefinition(String),

    /// No card with this term.
    #[error("there is no card \"{0}\"")]
    NotFound(String),

    /// The import path does not exist.
    #[error("file not found")]
    FileNotFound,

    /// An error-count line in an imported file is not a decimal integer.
    #[error("malformed error count \"{0}\"")]
    MalformedCount(String),

    /// The interactive input source reached end of input.
    #[error("input ended unexpectedly")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
