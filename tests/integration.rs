use indoc::indoc;

use generalized_suffix_tree::alphabet::{Alphabet, AlphabetConfig};
use generalized_suffix_tree::{Error, SuffixTree, SuffixTreeBuilder};

/// The default alphabets order terminals (uppercase) before content
/// (lowercase), which coincides with byte order, so plain byte-wise
/// suffix sorting of the terminated text is the reference ordering.
fn terminated(words: &[&str]) -> Vec<u8> {
    let mut text = Vec::new();
    for (i, word) in words.iter().enumerate() {
        text.extend_from_slice(word.as_bytes());
        text.push(b'A' + i as u8);
    }
    text
}

fn brute_force_suffix_array(text: &[u8]) -> Vec<usize> {
    let mut sa: Vec<usize> = (0..text.len()).collect();
    sa.sort_by_key(|&i| &text[i..]);
    sa
}

fn common_prefix_length(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[test]
fn single_word_suffix_array_is_sorted() {
    for word in ["abbc", "banana", "mississippi", "abcabxabcd", "aaaa", "z"] {
        let tree = SuffixTree::from_word(word.as_bytes()).unwrap();
        let text = terminated(&[word]);
        assert_eq!(
            tree.suffix_array(),
            brute_force_suffix_array(&text),
            "suffix array mismatch for {:?}",
            word
        );
    }
}

#[test]
fn single_word_leaves_cover_every_position() {
    let tree = SuffixTree::from_word(b"mississippi").unwrap();
    let mut sa = tree.suffix_array();
    sa.sort_unstable();
    let all: Vec<usize> = (0..tree.text_len()).collect();
    assert_eq!(sa, all);
}

#[test]
fn lcp_matches_brute_force() {
    for words in [&["banana"][..], &["mississippi"], &["abab", "aabb"], &["gaakak", "gaakab"]] {
        let owned: Vec<&[u8]> = words.iter().map(|w| w.as_bytes()).collect();
        let tree = SuffixTree::from_words(&owned).unwrap();
        let text = terminated(words);

        let sa = tree.suffix_array();
        let lcp = tree.lcp_array();
        assert_eq!(lcp.len(), sa.len());
        assert_eq!(lcp[0], 0);
        for rank in 1..sa.len() {
            let expected = common_prefix_length(&text[sa[rank - 1]..], &text[sa[rank]..]);
            assert_eq!(lcp[rank], expected, "lcp mismatch at rank {} for {:?}", rank, words);
        }
    }
}

#[test]
fn inverse_suffix_array_inverts_ranks() {
    let tree = SuffixTree::from_words(&[b"abab", b"aabb"]).unwrap();
    let sa = tree.suffix_array();
    let inverse = tree.inverse_suffix_array();
    for (rank, &position) in sa.iter().enumerate() {
        assert_eq!(inverse[position], Some(rank));
    }
    let missing = inverse.iter().filter(|rank| rank.is_none()).count();
    assert_eq!(missing, tree.text_len() - sa.len());
}

#[test]
fn multi_word_suffix_strings_stay_inside_their_word() {
    for words in [&["abab", "aabb"][..], &["gaakak", "gaakab"]] {
        let owned: Vec<&[u8]> = words.iter().map(|w| w.as_bytes()).collect();
        let tree = SuffixTree::from_words(&owned).unwrap();

        let mut produced: Vec<String> = tree
            .string_suffix_array()
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        produced.sort();

        for suffix in &produced {
            assert!(
                suffix.bytes().all(|b| b.is_ascii_lowercase()),
                "terminator leaked into suffix string {:?}",
                suffix
            );
        }

        // A suffix shared by two words ends at the same node as a pair
        // of terminal-only leaves, and the tidy pass keeps only one of
        // them, so the reference is the deduplicated union.
        let expected: Vec<String> = words
            .iter()
            .flat_map(|word| (0..word.len()).map(move |i| word[i..].to_string()))
            .collect::<std::collections::BTreeSet<String>>()
            .into_iter()
            .collect();

        assert_eq!(produced, expected, "suffix strings mismatch for {:?}", words);
    }
}

#[test]
fn distinct_word_suffix_sets_stay_disjoint() {
    let tree = SuffixTree::from_words(&[b"gaakak", b"gaakab"]).unwrap();
    for suffix in tree.string_suffix_array() {
        if suffix.is_empty() {
            continue;
        }
        let in_first = "gaakak".ends_with(&suffix);
        let in_second = "gaakab".ends_with(&suffix);
        assert!(
            in_first != in_second,
            "{:?} should be a suffix of exactly one word",
            suffix
        );
    }
}

#[test]
fn rebuilding_is_deterministic() {
    let words: &[&[u8]] = &[b"abab", b"aabb", b"baba"];
    let first = SuffixTree::from_words(words).unwrap();
    let second = SuffixTree::from_words(words).unwrap();

    assert_eq!(first.node_count(), second.node_count());
    assert_eq!(first.render(), second.render());
    assert_eq!(first.suffix_array(), second.suffix_array());
}

#[test]
fn abbc_regression_fixture() {
    let tree = SuffixTree::from_word(b"abbc").unwrap();

    assert_eq!(tree.node_count(), 7);
    assert_eq!(tree.text_len(), 5);
    assert_eq!(tree.suffix_array(), vec![4, 0, 1, 2, 3]);
    assert_eq!(tree.lcp_array(), vec![0, 0, 0, 1, 0]);
    assert_eq!(
        tree.render(),
        indoc! {"
            (0)┳(6)$
               ┣(1)abbc$
               ┣(3)b┳(2)bc$
               ┃    ┗(4)c$
               ┗(5)c$
            suffix link from 3 to 0
        "}
    );
}

#[test]
fn debug_output_summarizes_the_tree() {
    let tree = SuffixTree::from_word(b"abbc").unwrap();
    let debug = format!("{:?}", tree);
    assert!(debug.contains("text_len: 5"), "unexpected debug output {:?}", debug);
    assert!(debug.contains("node_count: 7"), "unexpected debug output {:?}", debug);
}

#[test]
fn substring_renders_terminals_as_placeholder() {
    let tree = SuffixTree::from_words(&[b"ab", b"c"]).unwrap();
    // text is "ab$c$" once both terminators are masked
    assert_eq!(tree.substring(0, 4).unwrap(), "ab$c$");
    assert_eq!(tree.substring(2, 2).unwrap(), "$");
    assert_eq!(
        tree.substring(3, 7),
        Err(Error::OutOfRange { start: 3, end: 7, len: 5 })
    );
    assert_eq!(
        tree.substring(4, 3),
        Err(Error::OutOfRange { start: 4, end: 3, len: 5 })
    );
}

#[test]
fn word_capacity_is_bounded_by_terminal_alphabet() {
    let config = AlphabetConfig::new(Alphabet::new(b"ab"), Alphabet::new(b"XY")).unwrap();
    let mut builder = SuffixTreeBuilder::with_config(config);
    for _ in 0..3 {
        builder.add_word(b"ab");
    }
    assert_eq!(
        builder.build().unwrap_err(),
        Error::TooManyWords { words: 3, terminals: 2 }
    );
}

#[test]
fn invalid_words_fail_before_construction() {
    let mut builder = SuffixTreeBuilder::new();
    builder.add_word(b"good");
    builder.add_word(b"bad!");
    assert_eq!(
        builder.build().unwrap_err(),
        Error::InvalidSymbol { word: 1, symbol: '!' }
    );
}

#[test]
fn empty_builds_yield_an_empty_tree() {
    let tree = SuffixTreeBuilder::new().build().unwrap();
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.text_len(), 0);
    assert!(tree.suffix_array().is_empty());
    assert!(tree.lcp_array().is_empty());
    assert_eq!(tree.render(), "(0)\n");
}

#[test]
fn overlapping_alphabets_are_a_config_error() {
    assert_eq!(
        AlphabetConfig::new(Alphabet::new(b"abc"), Alphabet::new(b"cd")).unwrap_err(),
        Error::AlphabetOverlap('c')
    );
}
