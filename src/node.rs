use smallvec::SmallVec;

pub(crate) type NodeId = usize;

/// The root always occupies arena slot 0 and suffix-links to itself.
pub(crate) const ROOT: NodeId = 0;

/// Edge end of a node. Leaves stay `Open` while the engine runs and are
/// extended implicitly by the shared phase counter; construction freezes
/// them to `Fixed`, and the tidy pass may shrink a frozen leaf end
/// further. Ends are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeEnd {
    Open,
    Fixed(usize),
}

/// Child slots keyed by the combined-alphabet rank of the first symbol
/// of each outgoing edge. A fixed-size table instead of a hash map keeps
/// lookup O(1) and iteration order deterministic, which the suffix array
/// derivation relies on.
#[derive(Clone, Debug)]
pub(crate) struct ChildTable {
    slots: SmallVec<[Option<NodeId>; 32]>,
}

impl ChildTable {
    pub fn new(alphabet_len: usize) -> ChildTable {
        ChildTable {
            slots: smallvec::smallvec![None; alphabet_len],
        }
    }

    pub fn get(&self, rank: usize) -> Option<NodeId> {
        self.slots[rank]
    }

    pub fn set(&mut self, rank: usize, child: NodeId) {
        self.slots[rank] = Some(child);
    }

    pub fn clear(&mut self, rank: usize) {
        self.slots[rank] = None;
    }

    /// Occupied slots in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(rank, slot)| slot.map(|child| (rank, child)))
    }

    #[cfg(test)]
    pub fn degree(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// One tree vertex in the arena. The edge label leading into the node is
/// `text[start..end]`; the root's range is empty and never read.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub start: usize,
    pub end: NodeEnd,
    pub children: ChildTable,
    pub suffix_link: NodeId,
    pub leaf: bool,
    pub suffix_index: Option<usize>,
}

impl Node {
    pub fn internal(start: usize, end: usize, alphabet_len: usize) -> Node {
        Node {
            start,
            end: NodeEnd::Fixed(end),
            children: ChildTable::new(alphabet_len),
            suffix_link: ROOT,
            leaf: false,
            suffix_index: None,
        }
    }

    pub fn leaf(start: usize, alphabet_len: usize) -> Node {
        Node {
            start,
            end: NodeEnd::Open,
            children: ChildTable::new(alphabet_len),
            suffix_link: ROOT,
            leaf: true,
            suffix_index: None,
        }
    }

    /// Exclusive edge end, with open leaf ends read through the engine's
    /// shared phase counter.
    pub fn end_at(&self, leaf_end: usize) -> usize {
        match self.end {
            NodeEnd::Open => leaf_end,
            NodeEnd::Fixed(end) => end,
        }
    }

    /// Edge end of a finished tree, where no end may still be open.
    pub fn end(&self) -> usize {
        match self.end {
            NodeEnd::Fixed(end) => end,
            NodeEnd::Open => panic!("leaf end still open after construction"),
        }
    }

    pub fn edge_length(&self, leaf_end: usize) -> usize {
        self.end_at(leaf_end) - self.start
    }
}
