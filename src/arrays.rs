use crate::node::{Node, NodeId, ROOT};

/// Leaf suffix indices in DFS order. Child tables iterate in combined
/// alphabet rank order and every edge label along a path is strictly
/// ordered the same way, so this traversal order is the lexicographic
/// order of the suffixes.
pub(crate) fn suffix_array(nodes: &[Node]) -> Vec<usize> {
    let mut order = Vec::new();
    collect(nodes, ROOT, &mut order);
    order
}

fn collect(nodes: &[Node], node: NodeId, order: &mut Vec<usize>) {
    if let Some(index) = nodes[node].suffix_index {
        order.push(index);
        return;
    }
    for (_, child) in nodes[node].children.iter() {
        collect(nodes, child, order);
    }
}

/// Text position -> rank. Positions whose leaves were discarded by the
/// tidy pass carry no rank.
pub(crate) fn inverse_suffix_array(sa: &[usize], text_len: usize) -> Vec<Option<usize>> {
    let mut inverse = vec![None; text_len];
    for (rank, &position) in sa.iter().enumerate() {
        inverse[position] = Some(rank);
    }
    inverse
}

/// Kasai's algorithm. `lcp[r]` is the longest common prefix length of
/// the suffixes at ranks `r - 1` and `r`; `lcp[0]` stays 0. Walking the
/// text positions in order lets each step reuse all but one matched
/// symbol from the previous one, which keeps the total linear.
pub(crate) fn lcp_array(text: &[u8], sa: &[usize], inverse: &[Option<usize>]) -> Vec<usize> {
    let mut lcp = vec![0; sa.len()];
    let mut length = 0;

    for i in 0..text.len() {
        let rank = match inverse[i] {
            Some(rank) if rank > 0 => rank,
            _ => {
                length = 0;
                continue;
            }
        };
        let j = sa[rank - 1];
        while i + length < text.len() && j + length < text.len() && text[i + length] == text[j + length]
        {
            length += 1;
        }
        lcp[rank] = length;
        length = length.saturating_sub(1);
    }

    lcp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_inverts_the_permutation() {
        let sa = vec![4, 0, 1, 2, 3];
        let inverse = inverse_suffix_array(&sa, 5);
        for (rank, &position) in sa.iter().enumerate() {
            assert_eq!(inverse[position], Some(rank));
        }
    }

    #[test]
    fn inverse_leaves_holes_for_missing_positions() {
        let inverse = inverse_suffix_array(&[2, 0], 4);
        assert_eq!(inverse, vec![Some(1), None, Some(0), None]);
    }

    #[test]
    fn kasai_matches_brute_force() {
        // "banana" with a unique smallest terminator appended.
        let text = b"banana$";
        let mut sa: Vec<usize> = (0..text.len()).collect();
        sa.sort_by_key(|&i| &text[i..]);

        let inverse = inverse_suffix_array(&sa, text.len());
        let lcp = lcp_array(text, &sa, &inverse);

        assert_eq!(lcp[0], 0);
        for rank in 1..sa.len() {
            let a = &text[sa[rank - 1]..];
            let b = &text[sa[rank]..];
            let expected = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
            assert_eq!(lcp[rank], expected, "lcp mismatch at rank {}", rank);
        }
    }
}
