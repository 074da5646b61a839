use std::process;

use structopt::StructOpt;

use generalized_suffix_tree::alphabet::{Alphabet, AlphabetConfig};
use generalized_suffix_tree::{SuffixTree, SuffixTreeBuilder};

/// Word used when no input words are given.
const PRESET_WORD: &str = "abbc";

#[derive(StructOpt)]
#[structopt(about = "Build a generalized suffix tree and print it or its derived arrays")]
struct Options {
    /// Content alphabet override.
    #[structopt(short = "a", long = "alphabet")]
    alphabet: Option<String>,
    /// Terminal alphabet override.
    #[structopt(short = "t", long = "terminals")]
    terminals: Option<String>,
    /// What to print: tree, sa, lcp or suffixes.
    #[structopt(short = "o", long = "output", default_value = "tree")]
    output: String,
    #[structopt(name = "WORDS")]
    words: Vec<String>,
}

fn config(options: &Options) -> Result<AlphabetConfig, generalized_suffix_tree::Error> {
    let default = AlphabetConfig::default();
    let content = match &options.alphabet {
        Some(symbols) => Alphabet::checked(symbols.as_bytes())?,
        None => default.content().clone(),
    };
    let terminals = match &options.terminals {
        Some(symbols) => Alphabet::checked(symbols.as_bytes())?,
        None => default.terminals().clone(),
    };
    AlphabetConfig::new(content, terminals)
}

fn print_output(tree: &SuffixTree, output: &str) {
    match output {
        "tree" => {
            print!("{}", tree.render());
            println!("{} nodes", tree.node_count());
        }
        "sa" => println!("{:?}", tree.suffix_array()),
        "lcp" => println!("{:?}", tree.lcp_array()),
        "suffixes" => {
            for (rank, suffix) in tree.string_suffix_array().into_iter().enumerate() {
                println!("{}: {}", rank, suffix);
            }
        }
        other => {
            eprintln!("unknown output '{}', expected tree, sa, lcp or suffixes", other);
            process::exit(2);
        }
    }
}

fn main() {
    let options = Options::from_args();

    let result = config(&options).and_then(|config| {
        let mut builder = SuffixTreeBuilder::with_config(config);
        if options.words.is_empty() {
            builder.add_word(PRESET_WORD.as_bytes());
        } else {
            for word in &options.words {
                builder.add_word(word.as_bytes());
            }
        }
        builder.build()
    });

    match result {
        Ok(tree) => print_output(&tree, &options.output),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
