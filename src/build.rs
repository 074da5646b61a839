use bit_vec::BitVec;

use crate::alphabet::Alphabet;
use crate::node::{Node, NodeEnd, NodeId, ROOT};

/// Build the normalized tree over `text`: run the construction engine,
/// freeze leaf ends, assign leaf suffix indices, then tidy the word
/// boundaries. `alphabet` is the combined alphabet with the first
/// `terminal_count` ranks reserved for terminal symbols.
pub(crate) fn build_tree(text: &[u8], alphabet: &Alphabet, terminal_count: usize) -> Vec<Node> {
    let mut nodes = construct(text, alphabet);
    tidy(&mut nodes, text, alphabet, terminal_count);
    nodes
}

/// Run Ukkonen's algorithm over the full text and return the raw,
/// indexed tree with every leaf end frozen at the text length.
pub(crate) fn construct(text: &[u8], alphabet: &Alphabet) -> Vec<Node> {
    let mut engine = Engine::new(text, alphabet);
    for pos in 0..text.len() {
        engine.extend(pos);
    }

    let mut nodes = engine.finish();
    assign_suffix_indices(&mut nodes, ROOT, 0, text.len());
    check_leaf_coverage(&nodes, text.len());
    nodes
}

/// Ukkonen construction state. The active point tracks where in the
/// tree the next extension resumes; `leaf_end` is the shared counter
/// every open leaf reads its end from, so advancing it once per phase
/// performs all Rule 1 extensions at no cost. All of this state is
/// discarded once construction finishes.
struct Engine<'a> {
    text: &'a [u8],
    alphabet: &'a Alphabet,
    nodes: Vec<Node>,

    active_node: NodeId,
    active_edge: usize,
    active_length: usize,
    remaining: usize,
    leaf_end: usize,
}

impl<'a> Engine<'a> {
    fn new(text: &'a [u8], alphabet: &'a Alphabet) -> Engine<'a> {
        // The root occupies slot 0 with an empty label; `Node` defaults
        // its suffix link to the root, so the root links to itself.
        Engine {
            text,
            alphabet,
            nodes: vec![Node::internal(0, 0, alphabet.len())],

            active_node: ROOT,
            active_edge: 0,
            active_length: 0,
            remaining: 0,
            leaf_end: 0,
        }
    }

    fn rank(&self, symbol: u8) -> usize {
        match self.alphabet.rank_of_symbol(symbol) {
            Some(rank) => rank,
            None => panic!("text symbol '{}' missing from the combined alphabet", symbol as char),
        }
    }

    fn child(&self, node: NodeId, symbol: u8) -> Option<NodeId> {
        self.nodes[node].children.get(self.rank(symbol))
    }

    fn set_child(&mut self, node: NodeId, symbol: u8, child: NodeId) {
        let rank = self.rank(symbol);
        self.nodes[node].children.set(rank, child);
    }

    fn new_leaf(&mut self, start: usize) -> NodeId {
        self.nodes.push(Node::leaf(start, self.alphabet.len()));
        self.nodes.len() - 1
    }

    fn new_internal(&mut self, start: usize, end: usize) -> NodeId {
        self.nodes.push(Node::internal(start, end, self.alphabet.len()));
        self.nodes.len() - 1
    }

    /// One phase: absorb `text[pos]` into every suffix of the prefix
    /// seen so far. Runs explicit extensions until the phase's suffixes
    /// are all placed or Rule 3 shows the remainder already implicit.
    fn extend(&mut self, pos: usize) {
        self.leaf_end = pos + 1;
        self.remaining += 1;

        // Internal node from an earlier extension of this phase whose
        // suffix link is still unresolved.
        let mut pending: Option<NodeId> = None;

        while self.remaining > 0 {
            if self.active_length == 0 {
                self.active_edge = pos;
            }
            assert!(self.active_edge < self.text.len(), "active edge escaped the text");
            let edge_symbol = self.text[self.active_edge];

            let next = match self.child(self.active_node, edge_symbol) {
                Some(next) => next,
                None => {
                    // Rule 2, no split: a fresh leaf below the active node.
                    let leaf = self.new_leaf(pos);
                    self.set_child(self.active_node, edge_symbol, leaf);
                    if let Some(node) = pending.take() {
                        self.nodes[node].suffix_link = self.active_node;
                    }
                    self.advance_active_point(pos);
                    continue;
                }
            };

            // Walk-down: if the active length covers this edge, hop over
            // the node instead of rescanning its label.
            let edge_length = self.nodes[next].edge_length(self.leaf_end);
            if self.active_length >= edge_length {
                self.active_edge += edge_length;
                self.active_length -= edge_length;
                self.active_node = next;
                continue;
            }

            if self.text[self.nodes[next].start + self.active_length] == self.text[pos] {
                // Rule 3: the suffix is already on the edge, and so is
                // every shorter suffix of this phase.
                if self.active_node != ROOT {
                    if let Some(node) = pending.take() {
                        self.nodes[node].suffix_link = self.active_node;
                    }
                }
                self.active_length += 1;
                break;
            }

            // Rule 2, split: the edge diverges mid-label.
            let split_start = self.nodes[next].start;
            let split = self.new_internal(split_start, split_start + self.active_length);
            self.set_child(self.active_node, edge_symbol, split);

            let leaf = self.new_leaf(pos);
            self.set_child(split, self.text[pos], leaf);

            self.nodes[next].start += self.active_length;
            let next_symbol = self.text[self.nodes[next].start];
            self.set_child(split, next_symbol, next);

            if let Some(node) = pending.replace(split) {
                self.nodes[node].suffix_link = split;
            }

            self.advance_active_point(pos);
        }
    }

    /// After an explicit insertion, move the active point to the next
    /// shorter suffix of the phase.
    fn advance_active_point(&mut self, pos: usize) {
        self.remaining -= 1;
        if self.active_node == ROOT && self.active_length > 0 {
            self.active_length -= 1;
            self.active_edge = pos - self.remaining + 1;
        } else if self.active_node != ROOT {
            self.active_node = self.nodes[self.active_node].suffix_link;
        }
    }

    /// Freeze every open leaf at the final text length and hand over the
    /// arena. The shared counter is gone after this; later passes only
    /// see concrete ends.
    fn finish(mut self) -> Vec<Node> {
        let end = self.text.len();
        for node in &mut self.nodes {
            if node.end == NodeEnd::Open {
                node.end = NodeEnd::Fixed(end);
            }
        }
        self.nodes
    }
}

/// Label every leaf with the starting offset of the suffix it spells:
/// the total length minus the accumulated label height at the leaf.
fn assign_suffix_indices(nodes: &mut Vec<Node>, node: NodeId, height: usize, total: usize) {
    let edge = if node == ROOT {
        0
    } else {
        nodes[node].end() - nodes[node].start
    };
    let height = height + edge;

    if nodes[node].leaf {
        nodes[node].suffix_index = Some(total - height);
        return;
    }

    let children: Vec<NodeId> = nodes[node].children.iter().map(|(_, child)| child).collect();
    for child in children {
        assign_suffix_indices(nodes, child, height, total);
    }
}

/// The raw tree must hold one leaf per text position, no duplicates and
/// no gaps. Anything else is a construction defect.
fn check_leaf_coverage(nodes: &[Node], total: usize) {
    let mut seen = BitVec::from_elem(total, false);
    for node in nodes {
        if let Some(index) = node.suffix_index {
            assert!(index < total, "leaf suffix index past the end of the text");
            assert!(seen.get(index) == Some(false), "two leaves claim the same suffix index");
            seen.set(index, true);
        }
    }
    assert!(seen.all(), "some text position has no leaf");
}

fn is_terminal(alphabet: &Alphabet, terminal_count: usize, symbol: u8) -> bool {
    matches!(alphabet.rank_of_symbol(symbol), Some(rank) if rank < terminal_count)
}

/// Word-boundary normalization for generalized trees. Leaf labels that
/// grew past their word's terminator are cut just after the first
/// terminal they contain, and where several words end at the same node,
/// only the first terminal-only leaf (in terminal order) is kept. Only
/// leaf ends and child slots change; internal structure stays intact.
pub(crate) fn tidy(nodes: &mut Vec<Node>, text: &[u8], alphabet: &Alphabet, terminal_count: usize) {
    for node in nodes.iter_mut() {
        if !node.leaf {
            continue;
        }
        let (start, end) = (node.start, node.end());
        if let Some(offset) = text[start..end]
            .iter()
            .position(|&symbol| is_terminal(alphabet, terminal_count, symbol))
        {
            if start + offset + 1 < end {
                node.end = NodeEnd::Fixed(start + offset + 1);
            }
        }
    }

    for id in 0..nodes.len() {
        if nodes[id].leaf {
            continue;
        }
        let mut kept = false;
        let mut drop_ranks = Vec::new();
        for rank in 0..terminal_count {
            let Some(child) = nodes[id].children.get(rank) else { continue };
            if !nodes[child].leaf || nodes[child].end() - nodes[child].start != 1 {
                continue;
            }
            if kept {
                drop_ranks.push(rank);
            } else {
                kept = true;
            }
        }
        for rank in drop_ranks {
            nodes[id].children.clear(rank);
        }
    }
}
