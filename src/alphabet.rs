use lazy_static::lazy_static;

use crate::error::{Error, Result};

/// A fixed, ordered set of symbols with O(1) symbol -> rank lookup.
///
/// Rank order is the order symbols were given in, and every ordered
/// traversal in this crate (child tables, suffix array derivation)
/// follows it.
#[derive(Clone, Debug)]
pub struct Alphabet {
    symbols: Vec<u8>,
    ranks: [Option<u8>; 256],
}

impl Alphabet {
    /// Panics on a repeated symbol; use [`Alphabet::checked`] for
    /// symbol sets that come from user input.
    pub fn new(symbols: &[u8]) -> Alphabet {
        match Alphabet::checked(symbols) {
            Ok(alphabet) => alphabet,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn checked(symbols: &[u8]) -> Result<Alphabet> {
        let mut ranks = [None; 256];
        for (i, &symbol) in symbols.iter().enumerate() {
            if ranks[symbol as usize].is_some() {
                return Err(Error::DuplicateSymbol(symbol as char));
            }
            ranks[symbol as usize] = Some(i as u8);
        }

        Ok(Alphabet {
            symbols: symbols.to_vec(),
            ranks,
        })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.ranks[symbol as usize].is_some()
    }

    pub fn rank_of_symbol(&self, symbol: u8) -> Option<usize> {
        self.ranks[symbol as usize].map(|r| r as usize)
    }

    pub fn symbol_of_rank(&self, rank: usize) -> u8 {
        self.symbols[rank]
    }
}

lazy_static! {
    pub static ref ASCII_LOWERCASE: Alphabet = Alphabet::new(b"abcdefghijklmnopqrstuvwxyz");
    pub static ref ASCII_UPPERCASE: Alphabet = Alphabet::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ");
}

/// The pair of alphabets a tree is built over: content symbols usable in
/// input words and the ordered terminal symbols reserved as per-word
/// terminators. The two sets must be disjoint; word `i` of a build is
/// terminated with the `i`-th terminal symbol, so the terminal count
/// caps the number of words per tree.
#[derive(Clone, Debug)]
pub struct AlphabetConfig {
    content: Alphabet,
    terminals: Alphabet,
}

impl AlphabetConfig {
    pub fn new(content: Alphabet, terminals: Alphabet) -> Result<AlphabetConfig> {
        for &symbol in terminals.symbols() {
            if content.contains(symbol) {
                return Err(Error::AlphabetOverlap(symbol as char));
            }
        }

        Ok(AlphabetConfig { content, terminals })
    }

    pub fn content(&self) -> &Alphabet {
        &self.content
    }

    pub fn terminals(&self) -> &Alphabet {
        &self.terminals
    }

    /// Largest number of words a single tree can hold.
    pub fn max_words(&self) -> usize {
        self.terminals.len()
    }

    pub fn validate_word(&self, word: &[u8]) -> bool {
        word.iter().all(|&symbol| self.content.contains(symbol))
    }

    /// Concatenate `words`, appending the i-th terminal symbol to the
    /// i-th word, and return the backing text for construction.
    pub(crate) fn terminated_text(&self, words: &[Vec<u8>]) -> Result<Vec<u8>> {
        if words.len() > self.max_words() {
            return Err(Error::TooManyWords {
                words: words.len(),
                terminals: self.max_words(),
            });
        }

        let mut text = Vec::with_capacity(words.iter().map(|w| w.len() + 1).sum());
        for (i, word) in words.iter().enumerate() {
            if let Some(&symbol) = word.iter().find(|&&s| !self.content.contains(s)) {
                return Err(Error::InvalidSymbol {
                    word: i,
                    symbol: symbol as char,
                });
            }

            text.extend_from_slice(word);
            text.push(self.terminals.symbol_of_rank(i));
        }

        Ok(text)
    }

    /// The alphabet the tree itself is keyed by: terminal symbols first
    /// (in terminal order), then content symbols. Traversing child
    /// tables in this rank order is what makes the derived suffix array
    /// lexicographic.
    pub(crate) fn combined(&self) -> Alphabet {
        let mut symbols = self.terminals.symbols().to_vec();
        symbols.extend_from_slice(self.content.symbols());
        Alphabet::new(&symbols)
    }
}

impl Default for AlphabetConfig {
    fn default() -> AlphabetConfig {
        AlphabetConfig {
            content: ASCII_LOWERCASE.clone(),
            terminals: ASCII_UPPERCASE.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_symbol_order() {
        let alphabet = Alphabet::new(b"atgc");
        assert_eq!(alphabet.rank_of_symbol(b'a'), Some(0));
        assert_eq!(alphabet.rank_of_symbol(b'c'), Some(3));
        assert_eq!(alphabet.rank_of_symbol(b'x'), None);
        assert_eq!(alphabet.symbol_of_rank(1), b't');
    }

    #[test]
    fn repeated_symbols_are_a_checked_error() {
        assert_eq!(
            Alphabet::checked(b"abca").unwrap_err(),
            Error::DuplicateSymbol('a')
        );
        assert!(Alphabet::checked(b"abc").is_ok());
    }

    #[test]
    fn overlapping_alphabets_are_rejected() {
        let result = AlphabetConfig::new(Alphabet::new(b"abc"), Alphabet::new(b"xca"));
        assert_eq!(result.unwrap_err(), Error::AlphabetOverlap('c'));
    }

    #[test]
    fn terminals_are_assigned_per_word() {
        let config = AlphabetConfig::default();
        let text = config
            .terminated_text(&[b"ab".to_vec(), b"c".to_vec()])
            .unwrap();
        assert_eq!(text, b"abAcB");
    }

    #[test]
    fn word_count_is_capped_by_terminals() {
        let config =
            AlphabetConfig::new(Alphabet::new(b"ab"), Alphabet::new(b"XY")).unwrap();
        let words = vec![b"a".to_vec(), b"b".to_vec(), b"ab".to_vec()];
        assert_eq!(
            config.terminated_text(&words).unwrap_err(),
            Error::TooManyWords { words: 3, terminals: 2 }
        );
    }

    #[test]
    fn invalid_symbols_name_the_word() {
        let config = AlphabetConfig::default();
        assert!(config.validate_word(b"abc"));
        assert!(!config.validate_word(b"a1c"));
        assert_eq!(
            config.terminated_text(&[b"ok".to_vec(), b"a1c".to_vec()]).unwrap_err(),
            Error::InvalidSymbol { word: 1, symbol: '1' }
        );
    }

    #[test]
    fn combined_alphabet_puts_terminals_first() {
        let config =
            AlphabetConfig::new(Alphabet::new(b"ab"), Alphabet::new(b"XY")).unwrap();
        assert_eq!(config.combined().symbols(), b"XYab");
    }
}
