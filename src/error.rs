use thiserror::Error;

/// Errors surfaced by tree construction and by the query facade.
///
/// Configuration problems are reported before any construction work
/// begins; a failed build leaves nothing behind. Range errors leave the
/// tree untouched and reusable. Internal invariant violations during
/// construction are algorithm defects and abort via panic instead of
/// appearing here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The content and terminal alphabets share a symbol.
    #[error("content and terminal alphabets both contain '{0}'")]
    AlphabetOverlap(char),

    /// More words were supplied than there are terminal symbols.
    #[error("{words} words exceed the {terminals} available terminal symbols")]
    TooManyWords { words: usize, terminals: usize },

    /// An alphabet was given the same symbol more than once.
    #[error("alphabet contains '{0}' more than once")]
    DuplicateSymbol(char),

    /// A word contains a symbol outside the content alphabet.
    #[error("word {word} contains '{symbol}', which is not in the content alphabet")]
    InvalidSymbol { word: usize, symbol: char },

    /// A substring or array access landed outside the text.
    #[error("range {start}..={end} is out of bounds for text of length {len}")]
    OutOfRange { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
