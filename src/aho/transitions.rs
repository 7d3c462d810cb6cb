use super::automaton::NodeId;
use super::char_trait::AhoChar;

/// A compact representation of the outgoing transitions of a trie node that doesn't
/// allocate until there are at least three of them.
///
/// Edges are always kept sorted by symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transitions<C: AhoChar> {
    /// No transitions.
    None,
    /// Exactly one transition (symbol, node).
    One((C, NodeId)),
    /// Exactly two transitions (symbol1, node1, symbol2, node2), with symbol1 < symbol2.
    Two((C, NodeId, C, NodeId)),
    /// Three or more transitions stored in a sorted vector.
    Many(Vec<(C, NodeId)>),
}

impl<C: AhoChar> Transitions<C> {
    /// Returns the node that `symbol`'s edge leads to, or `None` if no such edge exists.
    #[inline]
    pub fn get(&self, symbol: C) -> Option<NodeId> {
        match self {
            Transitions::None => None,
            Transitions::One((c, node)) => (*c == symbol).then_some(*node),
            Transitions::Two((c1, n1, c2, n2)) => {
                if symbol == *c1 {
                    Some(*n1)
                } else if symbol == *c2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            // The alphabet is unbounded, so the root of a large pattern set can fan out widely.
            Transitions::Many(edges) => edges
                .binary_search_by(|&(c, _)| c.cmp(&symbol))
                .ok()
                .map(|index| edges[index].1),
        }
    }

    /// Gets the transition at the specified index, in ascending symbol order.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn nth(&self, index: usize) -> Option<(C, NodeId)> {
        match self {
            Transitions::None => None,
            Transitions::One(edge) => match index {
                0 => Some(*edge),
                _ => None,
            },
            Transitions::Two((c1, n1, c2, n2)) => match index {
                0 => Some((*c1, *n1)),
                1 => Some((*c2, *n2)),
                _ => None,
            },
            Transitions::Many(edges) => edges.get(index).copied(),
        }
    }

    /// Inserts an edge in sorted position.
    ///
    /// The symbol must not already have an edge.
    pub(crate) fn insert(&mut self, symbol: C, node: NodeId) {
        debug_assert!(self.get(symbol).is_none(), "insert: symbol already exists");
        *self = match std::mem::take(self) {
            Transitions::None => Transitions::One((symbol, node)),
            Transitions::One((c1, n1)) => {
                if symbol < c1 {
                    Transitions::Two((symbol, node, c1, n1))
                } else {
                    Transitions::Two((c1, n1, symbol, node))
                }
            }
            Transitions::Two((c1, n1, c2, n2)) => {
                let mut edges = vec![(c1, n1), (c2, n2), (symbol, node)];
                edges.sort_by_key(|&(c, _)| c);
                Transitions::Many(edges)
            }
            Transitions::Many(mut edges) => {
                let pos = edges.partition_point(|&(c, _)| c < symbol);
                edges.insert(pos, (symbol, node));
                Transitions::Many(edges)
            }
        };
    }

    /// Returns the number of transitions.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Transitions::None => 0,
            Transitions::One(_) => 1,
            Transitions::Two(_) => 2,
            Transitions::Many(edges) => edges.len(),
        }
    }

    /// True if there are no transitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Transitions::None)
    }

    /// Returns an iterator over all transitions in ascending symbol order.
    #[inline]
    pub fn iter(&self) -> TransitionIter<'_, C> {
        TransitionIter {
            transitions: self,
            index: 0,
        }
    }
}

impl<C: AhoChar> Default for Transitions<C> {
    fn default() -> Self {
        Transitions::None
    }
}

/// An iterator over the transitions of a node.
#[derive(Clone)]
pub struct TransitionIter<'a, C: AhoChar> {
    transitions: &'a Transitions<C>,
    index: usize,
}

impl<C: AhoChar> Iterator for TransitionIter<'_, C> {
    type Item = (C, NodeId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.transitions.nth(self.index)?;
        self.index += 1;
        Some(edge)
    }

    /// Since we know the exact size, we can do better than the default implementation.
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.transitions.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<C: AhoChar> ExactSizeIterator for TransitionIter<'_, C> {}
