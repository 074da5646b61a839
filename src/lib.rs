//! Generalized suffix tree built online with Ukkonen's algorithm, plus
//! the arrays derived from it: suffix array, inverse suffix array and
//! LCP array (Kasai). Each input word gets its own terminal symbol, so
//! one tree indexes several words without their suffixes bleeding into
//! each other.

use std::fmt;

pub mod alphabet;
mod arrays;
mod build;
mod error;
mod node;

use crate::alphabet::{Alphabet, AlphabetConfig};
use crate::node::{NodeId, ROOT};

pub use crate::alphabet::{ASCII_LOWERCASE, ASCII_UPPERCASE};
pub use crate::error::{Error, Result};

/// Placeholder every terminal symbol is rendered as in textual output.
const TERMINAL_PLACEHOLDER: char = '$';

/// A generalized suffix tree over one or more words. Immutable once
/// built; all queries are read-only and the derived arrays are
/// recomputed from the tree on demand.
pub struct SuffixTree {
    text: Vec<u8>,
    alphabet: Alphabet,
    terminal_count: usize,
    nodes: Vec<node::Node>,
}

/// Accumulates words and an alphabet configuration, then runs the
/// construction pipeline: validation, terminator assignment, Ukkonen
/// construction, suffix indexing and the tidy pass.
pub struct SuffixTreeBuilder {
    config: AlphabetConfig,
    words: Vec<Vec<u8>>,
}

impl SuffixTreeBuilder {
    pub fn new() -> SuffixTreeBuilder {
        SuffixTreeBuilder::with_config(AlphabetConfig::default())
    }

    pub fn with_config(config: AlphabetConfig) -> SuffixTreeBuilder {
        SuffixTreeBuilder {
            config,
            words: Vec::new(),
        }
    }

    pub fn add_word(&mut self, word: &[u8]) {
        self.words.push(word.to_vec());
    }

    pub fn build(&self) -> Result<SuffixTree> {
        let text = self.config.terminated_text(&self.words)?;
        let alphabet = self.config.combined();
        let terminal_count = self.config.terminals().len();
        let nodes = build::build_tree(&text, &alphabet, terminal_count);

        Ok(SuffixTree {
            text,
            alphabet,
            terminal_count,
            nodes,
        })
    }
}

impl fmt::Debug for SuffixTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuffixTree")
            .field("text_len", &self.text.len())
            .field("terminal_count", &self.terminal_count)
            .field("node_count", &self.nodes.len())
            .finish()
    }
}

impl Default for SuffixTreeBuilder {
    fn default() -> SuffixTreeBuilder {
        SuffixTreeBuilder::new()
    }
}

impl SuffixTree {
    pub fn from_word(word: &[u8]) -> Result<SuffixTree> {
        SuffixTree::from_words(&[word])
    }

    pub fn from_words(words: &[&[u8]]) -> Result<SuffixTree> {
        let mut builder = SuffixTreeBuilder::new();
        for word in words {
            builder.add_word(word);
        }
        builder.build()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Length of the backing text, terminators included.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    fn is_terminal(&self, symbol: u8) -> bool {
        matches!(self.alphabet.rank_of_symbol(symbol), Some(rank) if rank < self.terminal_count)
    }

    fn display_symbol(&self, symbol: u8) -> char {
        if self.is_terminal(symbol) {
            TERMINAL_PLACEHOLDER
        } else {
            symbol as char
        }
    }

    /// The text over the inclusive range `start..=end`, terminal symbols
    /// rendered as `$`.
    pub fn substring(&self, start: usize, end: usize) -> Result<String> {
        if start > end || end >= self.text.len() {
            return Err(Error::OutOfRange {
                start,
                end,
                len: self.text.len(),
            });
        }
        Ok(self.text[start..=end]
            .iter()
            .map(|&symbol| self.display_symbol(symbol))
            .collect())
    }

    /// Suffix start offsets in lexicographic suffix order, terminals
    /// ordered before content symbols.
    pub fn suffix_array(&self) -> Vec<usize> {
        arrays::suffix_array(&self.nodes)
    }

    /// Text position -> suffix array rank. `None` for positions whose
    /// duplicate word-end leaves the tidy pass discarded.
    pub fn inverse_suffix_array(&self) -> Vec<Option<usize>> {
        arrays::inverse_suffix_array(&self.suffix_array(), self.text.len())
    }

    /// Longest-common-prefix lengths between lexicographically adjacent
    /// suffixes; entry 0 is 0 by convention.
    pub fn lcp_array(&self) -> Vec<usize> {
        let sa = self.suffix_array();
        let inverse = arrays::inverse_suffix_array(&sa, self.text.len());
        arrays::lcp_array(&self.text, &sa, &inverse)
    }

    /// The suffixes of the suffix array as strings, each truncated
    /// before its word's terminator. Suffixes that begin at a terminator
    /// come out empty.
    pub fn string_suffix_array(&self) -> Vec<String> {
        self.suffix_array()
            .into_iter()
            .map(|position| {
                let tail = &self.text[position..];
                let end = tail
                    .iter()
                    .position(|&symbol| self.is_terminal(symbol))
                    .unwrap_or(tail.len());
                tail[..end].iter().map(|&symbol| symbol as char).collect()
            })
            .collect()
    }

    fn render_node(&self, node: NodeId) -> Vec<String> {
        let text = if node == ROOT {
            format!("({})", node)
        } else {
            let label: String = self.text[self.nodes[node].start..self.nodes[node].end()]
                .iter()
                .map(|&symbol| self.display_symbol(symbol))
                .collect();
            format!("({}){}", node, label)
        };

        if self.nodes[node].leaf {
            return vec![text];
        }

        let children: Vec<NodeId> = self.nodes[node].children.iter().map(|(_, c)| c).collect();
        if children.is_empty() {
            return vec![text];
        }

        let mut lines = Vec::new();
        for (i, &child) in children.iter().enumerate() {
            for (j, line) in self.render_node(child).into_iter().enumerate() {
                let prefix = if i == 0 && j == 0 {
                    text.clone()
                } else {
                    " ".repeat(text.chars().count())
                };

                let line = if i == 0 && j == 0 {
                    format!("{}┳{}", prefix, line)
                } else if i < children.len() - 1 && j == 0 {
                    format!("{}┣{}", prefix, line)
                } else if j == 0 {
                    format!("{}┗{}", prefix, line)
                } else if i < children.len() - 1 {
                    format!("{}┃{}", prefix, line)
                } else {
                    format!("{} {}", prefix, line)
                };

                lines.push(line);
            }
        }

        lines
    }

    /// Text rendering of the tree: one DFS drawing in combined alphabet
    /// order, followed by the suffix links of the internal nodes.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.render_node(ROOT) {
            out.push_str(&line);
            out.push('\n');
        }

        for (id, node) in self.nodes.iter().enumerate() {
            if id != ROOT && !node.leaf {
                out.push_str(&format!("suffix link from {} to {}\n", id, node.suffix_link));
            }
        }

        out
    }
}
