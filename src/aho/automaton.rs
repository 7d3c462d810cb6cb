use std::fmt;

use smallvec::SmallVec;

use super::builder::{build_automaton, IntoSymbols};
use super::char_trait::AhoChar;
use super::error::AhoError;
use super::transitions::{TransitionIter, Transitions};

/// Identifies a pattern by its position in the list the automaton was built from.
pub type PatternId = usize;

/// A node identifier, an index into the automaton's node table.
///
/// Nodes reference each other (children, fail and terminal links) only through
/// these indices, so the linked structure needs no heap references.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node, always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Creates an identifier from a node table index.
    #[inline]
    pub fn new(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("node table exceeds u32::MAX entries"))
    }

    /// The index of this node in the node table.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One state of the automaton.
#[derive(Clone, Debug)]
pub(crate) struct Node<C: AhoChar> {
    pub(crate) transitions: Transitions<C>,
    /// `None` only for the root.
    pub(crate) fail: Option<NodeId>,
    /// The nearest node on the fail chain (excluding this node) with outputs.
    pub(crate) terminal: Option<NodeId>,
    pub(crate) outputs: SmallVec<[PatternId; 2]>,
    pub(crate) depth: usize,
}

impl<C: AhoChar> Node<C> {
    pub(crate) fn new(depth: usize) -> Self {
        Node {
            transitions: Transitions::None,
            fail: None,
            terminal: None,
            outputs: SmallVec::new(),
            depth,
        }
    }
}

/// Follows fail links from `state` until a transition on `symbol` exists and takes it,
/// or ends at the root when none of the states on the chain has one.
#[inline]
pub(crate) fn goto<C: AhoChar>(nodes: &[Node<C>], mut state: NodeId, symbol: C) -> NodeId {
    loop {
        let node = &nodes[state.index()];
        if let Some(next) = node.transitions.get(symbol) {
            return next;
        }
        match node.fail {
            Some(fail) => state = fail,
            None => return NodeId::ROOT,
        }
    }
}

/// An Aho-Corasick automaton: a trie over a list of patterns, augmented with
/// failure links and terminal (output shortcut) links.
///
/// The automaton is immutable once built, so a single instance can be shared
/// between any number of concurrent searches.
///
/// # Examples
///
/// ```
/// use libaho::aho::Automaton;
///
/// let automaton = Automaton::new(["he", "she", "his", "hers"]).unwrap();
/// let she = automaton.root().get('s').and_then(|n| n.get('h')).and_then(|n| n.get('e')).unwrap();
/// assert_eq!(she.outputs(), &[1]);
///
/// // The longest proper suffix of "she" that is a prefix of some pattern is "he".
/// let he = she.fail().unwrap();
/// assert_eq!(he.outputs(), &[0]);
/// assert_eq!(she.terminal(), Some(he));
/// ```
#[derive(Clone)]
pub struct Automaton<C: AhoChar> {
    pub(crate) nodes: Vec<Node<C>>,
    pub(crate) pattern_lens: Vec<usize>,
}

impl<C: AhoChar> Automaton<C> {
    /// Builds an automaton from an ordered list of patterns.
    ///
    /// Shorthand for [`build_automaton`].
    pub fn new<P>(patterns: impl IntoIterator<Item = P>) -> Result<Self, AhoError>
    where
        P: IntoSymbols<C>,
    {
        build_automaton(patterns)
    }

    /// Returns the root node.
    pub fn root(&self) -> NodeRef<'_, C> {
        self.node(NodeId::ROOT)
    }

    /// Returns a view of the node with the given identifier.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this automaton.
    pub fn node(&self, id: NodeId) -> NodeRef<'_, C> {
        assert!(id.index() < self.nodes.len(), "node {id} is out of bounds");
        NodeRef {
            automaton: self,
            id,
        }
    }

    /// Returns all nodes in creation order, starting at the root.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeRef<'_, C>> + '_ {
        (0..self.nodes.len()).map(move |index| NodeRef {
            automaton: self,
            id: NodeId::new(index),
        })
    }

    /// Returns the number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of patterns the automaton was built from.
    pub fn pattern_count(&self) -> usize {
        self.pattern_lens.len()
    }

    /// Returns the length in symbols of the given pattern, or `None` if there is no such pattern.
    pub fn pattern_len(&self, pattern: PatternId) -> Option<usize> {
        self.pattern_lens.get(pattern).copied()
    }

    /// Calls `f` for every pattern that ends in `state`: the outputs of `state` itself
    /// and then those of every node on its terminal chain.
    #[inline]
    pub(crate) fn for_each_output(&self, state: NodeId, mut f: impl FnMut(PatternId)) {
        let node = &self.nodes[state.index()];
        let mut cursor = if node.outputs.is_empty() {
            node.terminal
        } else {
            Some(state)
        };
        while let Some(current) = cursor {
            let node = &self.nodes[current.index()];
            debug_assert!(!node.outputs.is_empty(), "terminal links only point at output nodes");
            for &pattern in &node.outputs {
                f(pattern);
            }
            cursor = node.terminal;
        }
    }
}

impl<C: AhoChar> fmt::Debug for Automaton<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("node_count", &self.nodes.len())
            .field("pattern_count", &self.pattern_lens.len())
            .finish()
    }
}

/// A read-only view of a single automaton node.
///
/// This is the inspection interface used by diagnostic and visualization tools;
/// it cannot alter the automaton.
#[derive(Clone, Copy)]
pub struct NodeRef<'a, C: AhoChar> {
    automaton: &'a Automaton<C>,
    id: NodeId,
}

impl<'a, C: AhoChar> NodeRef<'a, C> {
    #[inline]
    fn raw(&self) -> &'a Node<C> {
        &self.automaton.nodes[self.id.index()]
    }

    #[inline]
    fn at(&self, id: NodeId) -> NodeRef<'a, C> {
        NodeRef {
            automaton: self.automaton,
            id,
        }
    }

    /// The identifier of this node.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// True if this is the root node.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    /// Returns the node that `symbol`'s transition leads to, or `None` if there is none.
    #[inline]
    pub fn get(&self, symbol: C) -> Option<NodeRef<'a, C>> {
        self.raw().transitions.get(symbol).map(|id| self.at(id))
    }

    /// Returns the outgoing transitions of this node in ascending symbol order.
    #[inline]
    pub fn transitions(&self) -> TransitionIter<'a, C> {
        self.raw().transitions.iter()
    }

    /// Returns the failure link target. `None` only for the root.
    #[inline]
    pub fn fail(&self) -> Option<NodeRef<'a, C>> {
        self.raw().fail.map(|id| self.at(id))
    }

    /// Returns the output shortcut: the nearest node along the fail chain that has outputs.
    #[inline]
    pub fn terminal(&self) -> Option<NodeRef<'a, C>> {
        self.raw().terminal.map(|id| self.at(id))
    }

    /// Returns the identifiers of the patterns that end exactly at this node.
    #[inline]
    pub fn outputs(&self) -> &'a [PatternId] {
        &self.raw().outputs
    }

    /// The length of the prefix this node represents.
    #[inline]
    pub fn depth(&self) -> usize {
        self.raw().depth
    }
}

impl<C: AhoChar> PartialEq for NodeRef<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.automaton, other.automaton) && self.id == other.id
    }
}

impl<C: AhoChar> Eq for NodeRef<'_, C> {}

impl<C: AhoChar> fmt::Debug for NodeRef<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.raw();
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("transitions", &node.transitions)
            .field("fail", &node.fail)
            .field("terminal", &node.terminal)
            .field("outputs", &node.outputs)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::aho::test_utility::{random_patterns, random_test};

    fn path<'a>(automaton: &'a Automaton<char>, prefix: &str) -> Option<NodeRef<'a, char>> {
        prefix.chars().try_fold(automaton.root(), |n, ch| n.get(ch))
    }

    #[test]
    fn root_invariants() {
        let automaton = Automaton::new(["ab", "b"]).unwrap();
        let root = automaton.root();
        assert!(root.is_root());
        assert_eq!(root.id(), NodeId::ROOT);
        assert_eq!(root.fail(), None);
        assert_eq!(root.terminal(), None);
        assert!(root.outputs().is_empty());
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn nodes_are_listed_in_creation_order() {
        let automaton = Automaton::new(["ab", "b"]).unwrap();
        let ids: Vec<NodeId> = automaton.nodes().map(|n| n.id()).collect();
        assert_eq!(ids, (0..4).map(NodeId::new).collect::<Vec<_>>());
        assert_eq!(automaton.node(NodeId::new(3)), path(&automaton, "b").unwrap());
    }

    #[test]
    fn pattern_lengths_count_symbols() {
        let automaton = Automaton::new(["åäö", "x"]).unwrap();
        assert_eq!(automaton.pattern_count(), 2);
        assert_eq!(automaton.pattern_len(0), Some(3));
        assert_eq!(automaton.pattern_len(1), Some(1));
        assert_eq!(automaton.pattern_len(2), None);
    }

    #[test]
    fn terminal_chain_collects_all_suffix_patterns() {
        let automaton = Automaton::new(["abcd", "bcd", "cd", "d", "bc"]).unwrap();
        let abcd = path(&automaton, "abcd").unwrap();
        let mut found = Vec::new();
        automaton.for_each_output(abcd.id(), |p| found.push(p));
        assert_eq!(found, vec![0, 1, 2, 3]);

        // "abc" has no outputs of its own but reaches "bc" through its terminal link.
        let abc = path(&automaton, "abc").unwrap();
        let mut found = Vec::new();
        automaton.for_each_output(abc.id(), |p| found.push(p));
        assert_eq!(found, vec![4]);
    }

    #[test]
    fn every_fail_chain_reaches_root_with_decreasing_depth() {
        random_test(100, |rng| {
            let patterns = random_patterns(rng, "abc", 6, 5);
            let automaton = Automaton::new(&patterns).unwrap();

            for node in automaton.nodes().filter(|n| !n.is_root()) {
                let mut steps = 0;
                let mut current = node;
                while let Some(fail) = current.fail() {
                    assert!(
                        fail.depth() < current.depth(),
                        "fail link of {:?} does not decrease depth",
                        current
                    );
                    current = fail;
                    steps += 1;
                }
                assert!(current.is_root());
                assert!(steps <= node.depth());
            }
        });
    }

    #[test]
    fn terminal_links_point_at_nearest_output_on_fail_chain() {
        random_test(100, |rng| {
            let patterns = random_patterns(rng, "ab", 5, 4);
            let automaton = Automaton::new(&patterns).unwrap();

            for node in automaton.nodes().filter(|n| !n.is_root()) {
                let mut expected = node.fail();
                while let Some(candidate) = expected {
                    if !candidate.outputs().is_empty() {
                        break;
                    }
                    expected = candidate.fail();
                }
                assert_eq!(node.terminal(), expected);
            }
        });
    }

    #[test]
    fn node_ref_equality_is_per_automaton() {
        let a = Automaton::new(["x"]).unwrap();
        let b = a.clone();
        assert_eq!(a.root(), a.root());
        assert_ne!(a.root(), b.root());
    }

    #[test]
    fn automaton_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Automaton<char>>();
        assert_send_sync::<Automaton<u8>>();
    }
}
