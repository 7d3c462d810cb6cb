use std::collections::VecDeque;

use log::debug;
use smallvec::SmallVec;

use super::automaton::{goto, Automaton, Node, NodeId, PatternId};
use super::char_trait::AhoChar;
use super::error::{AhoError, InvalidPattern};
use super::observer::{NoopObserver, Observer};

/// Trait for types that can be used as a pattern or a text.
///
/// Implemented for common string and sequence types so that [`Builder::add_pattern`],
/// [`build_automaton`] and the search functions accept them directly without manual
/// conversion.
pub trait IntoSymbols<C: AhoChar> {
    /// Collects this value into a symbol buffer.
    fn collect_symbols(self) -> SmallVec<[C; 32]>;
}

/// Text types read as a sequence of `char`.
macro_rules! impl_into_symbols_for_text {
    ($($ty:ty),*) => {$(
        impl IntoSymbols<char> for $ty {
            fn collect_symbols(self) -> SmallVec<[char; 32]> {
                self.chars().collect()
            }
        }
    )*};
}

impl_into_symbols_for_text!(&str, &&str, String, &String);

impl<C: AhoChar> IntoSymbols<C> for Vec<C> {
    fn collect_symbols(self) -> SmallVec<[C; 32]> {
        SmallVec::from_vec(self)
    }
}

impl<C: AhoChar, const N: usize> IntoSymbols<C> for [C; N] {
    fn collect_symbols(self) -> SmallVec<[C; 32]> {
        SmallVec::from_iter(self)
    }
}

impl<C: AhoChar, const N: usize> IntoSymbols<C> for &[C; N] {
    fn collect_symbols(self) -> SmallVec<[C; 32]> {
        SmallVec::from_slice(self)
    }
}

impl<C: AhoChar> IntoSymbols<C> for &[C] {
    fn collect_symbols(self) -> SmallVec<[C; 32]> {
        SmallVec::from_slice(self)
    }
}

impl<C: AhoChar> IntoSymbols<C> for &Vec<C> {
    fn collect_symbols(self) -> SmallVec<[C; 32]> {
        SmallVec::from_slice(self)
    }
}

/// A builder for constructing an [`Automaton`] one pattern at a time.
///
/// Patterns are inserted into a trie as they are added; the failure and terminal
/// links are computed in a single breadth-first pass by [`Builder::build`].
/// Each pattern is identified by the order in which it was added, starting at 0.
///
/// An optional [`Observer`] is told about every node created and every link resolved.
pub struct Builder<C: AhoChar, O: Observer<C> = NoopObserver> {
    nodes: Vec<Node<C>>,
    pattern_lens: Vec<usize>,
    observer: O,
}

impl<C: AhoChar> Builder<C> {
    /// Creates a builder containing only the root node.
    pub fn new() -> Self {
        Builder::with_observer(NoopObserver)
    }
}

impl<C: AhoChar> Default for Builder<C> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<C: AhoChar, O: Observer<C>> Builder<C, O> {
    /// Creates a builder that reports construction steps to `observer`.
    ///
    /// Pass `&mut observer` to keep ownership of it.
    pub fn with_observer(observer: O) -> Self {
        Builder {
            nodes: vec![Node::new(0)],
            pattern_lens: Vec::new(),
            observer,
        }
    }

    /// Returns the number of patterns added so far.
    pub fn pattern_count(&self) -> usize {
        self.pattern_lens.len()
    }

    /// Adds a pattern to the trie and returns its identifier.
    ///
    /// Patterns sharing a prefix share the corresponding trie path. The same pattern
    /// may be added more than once; each copy gets its own identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPattern::EmptyPattern`] if the pattern is empty. The builder
    /// is left untouched in that case.
    pub fn add_pattern(&mut self, pattern: impl IntoSymbols<C>) -> Result<PatternId, AhoError> {
        let pattern = pattern.collect_symbols();
        if pattern.is_empty() {
            return Err(InvalidPattern::EmptyPattern {
                index: self.pattern_count(),
            }
            .into());
        }
        Ok(self.insert(&pattern))
    }

    fn insert(&mut self, pattern: &[C]) -> PatternId {
        debug_assert!(!pattern.is_empty());
        let id = self.pattern_lens.len();

        let mut current = NodeId::ROOT;
        for &symbol in pattern {
            current = match self.nodes[current.index()].transitions.get(symbol) {
                Some(next) => next,
                None => self.add_node(current, symbol),
            };
        }

        self.nodes[current.index()].outputs.push(id);
        self.pattern_lens.push(pattern.len());
        self.observer.on_pattern_added(id, current);
        id
    }

    fn add_node(&mut self, parent: NodeId, symbol: C) -> NodeId {
        let child = NodeId::new(self.nodes.len());
        let depth = self.nodes[parent.index()].depth + 1;
        self.nodes.push(Node::new(depth));
        self.nodes[parent.index()].transitions.insert(symbol, child);
        self.observer.on_node_created(parent, symbol, child);
        child
    }

    /// Computes the failure and terminal links and returns the finished automaton.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPattern::EmptyList`] if no pattern was added.
    pub fn build(mut self) -> Result<Automaton<C>, AhoError> {
        if self.pattern_lens.is_empty() {
            return Err(InvalidPattern::EmptyList.into());
        }

        self.link();
        debug!(
            "Built automaton with {} nodes for {} patterns",
            self.nodes.len(),
            self.pattern_lens.len()
        );

        Ok(Automaton {
            nodes: self.nodes,
            pattern_lens: self.pattern_lens,
        })
    }

    /// Breadth-first pass that resolves `fail` and `terminal` for every non-root node.
    ///
    /// A node's links only depend on nodes of strictly smaller depth, which BFS order
    /// guarantees are resolved already.
    fn link(&mut self) {
        let mut queue = VecDeque::from([NodeId::ROOT]);

        while let Some(parent) = queue.pop_front() {
            let parent_fail = self.nodes[parent.index()].fail;

            let mut index = 0;
            while let Some((symbol, child)) = self.nodes[parent.index()].transitions.nth(index) {
                index += 1;

                let fail = match parent_fail {
                    // Children of the root fall back to the root.
                    None => NodeId::ROOT,
                    Some(parent_fail) => goto(&self.nodes, parent_fail, symbol),
                };
                debug_assert!(fail != child);

                let fail_node = &self.nodes[fail.index()];
                let terminal = if fail_node.outputs.is_empty() {
                    fail_node.terminal
                } else {
                    Some(fail)
                };

                let node = &mut self.nodes[child.index()];
                node.fail = Some(fail);
                node.terminal = terminal;
                self.observer.on_fail_resolved(child, fail, terminal);

                queue.push_back(child);
            }
        }
    }
}

/// Builds an automaton from an ordered list of patterns.
///
/// Each pattern must implement [`IntoSymbols`], allowing this function to accept
/// `&str`, `String`, slices, vectors, arrays, or any other supported type. Pattern
/// `i` of the input is reported as pattern id `i` by the searches.
///
/// The whole batch is validated before anything is inserted.
///
/// # Errors
///
/// Returns [`AhoError::InvalidPattern`] if the list is empty or contains an empty pattern.
///
/// # Examples
///
/// Building from strings:
///
/// ```
/// use libaho::aho::builder::build_automaton;
///
/// let automaton = build_automaton(["he", "she", "his", "hers"]).unwrap();
/// assert_eq!(automaton.node_count(), 10);
/// assert!(build_automaton(["he", ""]).is_err());
/// ```
///
/// Building from byte sequences:
///
/// ```
/// use libaho::aho::builder::build_automaton;
///
/// let patterns: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3, 4]];
/// let automaton = build_automaton(patterns).unwrap();
/// assert_eq!(automaton.pattern_count(), 3);
/// ```
pub fn build_automaton<C, P>(
    patterns: impl IntoIterator<Item = P>,
) -> Result<Automaton<C>, AhoError>
where
    C: AhoChar,
    P: IntoSymbols<C>,
{
    build_automaton_with_observer(patterns, NoopObserver)
}

/// Same as [`build_automaton`], reporting construction steps to `observer`.
pub fn build_automaton_with_observer<C, P, O>(
    patterns: impl IntoIterator<Item = P>,
    observer: O,
) -> Result<Automaton<C>, AhoError>
where
    C: AhoChar,
    P: IntoSymbols<C>,
    O: Observer<C>,
{
    let patterns: Vec<SmallVec<[C; 32]>> = patterns
        .into_iter()
        .map(|p| p.collect_symbols())
        .collect();
    if patterns.is_empty() {
        return Err(InvalidPattern::EmptyList.into());
    }
    if let Some(index) = patterns.iter().position(|p| p.is_empty()) {
        return Err(InvalidPattern::EmptyPattern { index }.into());
    }

    let mut builder = Builder::with_observer(observer);
    for pattern in &patterns {
        builder.insert(pattern);
    }
    builder.build()
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::aho::automaton::NodeRef;
    use crate::aho::test_utility::{random_patterns, random_test};

    fn path<'a, C: AhoChar>(
        automaton: &'a Automaton<C>,
        prefix: impl IntoIterator<Item = C>,
    ) -> Option<NodeRef<'a, C>> {
        prefix.into_iter().try_fold(automaton.root(), |n, ch| n.get(ch))
    }

    #[test]
    fn symbol_sources_agree() {
        let text = String::from("naïve");
        let expected: SmallVec<[char; 32]> = SmallVec::from_slice(&['n', 'a', 'ï', 'v', 'e']);
        assert_eq!("naïve".collect_symbols(), expected);
        assert_eq!((&"naïve").collect_symbols(), expected);
        assert_eq!((&text).collect_symbols(), expected);
        assert_eq!(text.collect_symbols(), expected);

        let bytes = vec![1u8, 2, 3];
        let expected: SmallVec<[u8; 32]> = SmallVec::from_slice(&[1, 2, 3]);
        assert_eq!((&bytes).collect_symbols(), expected);
        assert_eq!(bytes.as_slice().collect_symbols(), expected);
        assert_eq!((&[1u8, 2, 3]).collect_symbols(), expected);
        assert_eq!([1u8, 2, 3].collect_symbols(), expected);
        assert_eq!(bytes.collect_symbols(), expected);
    }

    #[test]
    fn add_pattern() {
        let mut builder = Builder::<char>::new();
        assert_eq!(builder.add_pattern("TEST"), Ok(0));
        assert_eq!(builder.add_pattern("TESTER"), Ok(1));
        assert_eq!(builder.add_pattern("WTEST"), Ok(2));
        assert_eq!(builder.pattern_count(), 3);
        let automaton = builder.build().unwrap();

        let root = automaton.root();
        let n = root.get('T').unwrap();
        assert!(n.outputs().is_empty());

        let n = n.get('E').unwrap().get('S').unwrap().get('T').unwrap();
        assert_eq!(n.outputs(), &[0]);
        assert_eq!(n.depth(), 4);

        let n = n.get('E').unwrap().get('R').unwrap();
        assert_eq!(n.outputs(), &[1]);
        assert_eq!(n.get('T'), None);

        let n = path(&automaton, "WTEST".chars()).unwrap();
        assert_eq!(n.outputs(), &[2]);
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let single = build_automaton(["ABCDEF"]).unwrap();
        assert_eq!(single.node_count(), "ABCDEF".len() + 1);

        let shared = build_automaton(["ABCDEF", "ABC", "A", "ABCDE"]).unwrap();
        assert_eq!(single.node_count(), shared.node_count());
    }

    #[test]
    fn classic_fail_and_terminal_links() {
        let automaton = build_automaton(["he", "she", "his", "hers"]).unwrap();
        let node = |prefix: &str| path(&automaton, prefix.chars()).unwrap();

        assert_eq!(node("h").fail(), Some(automaton.root()));
        assert_eq!(node("s").fail(), Some(automaton.root()));
        assert_eq!(node("sh").fail(), Some(node("h")));
        assert_eq!(node("she").fail(), Some(node("he")));
        assert_eq!(node("his").fail(), Some(node("s")));
        assert_eq!(node("hers").fail(), Some(node("s")));
        assert_eq!(node("her").fail(), Some(automaton.root()));

        assert_eq!(node("she").terminal(), Some(node("he")));
        assert_eq!(node("his").terminal(), None);
        assert_eq!(node("hers").terminal(), None);
        assert_eq!(node("he").terminal(), None);
    }

    #[test]
    fn every_pattern_is_a_path_ending_in_its_output() {
        random_test(100, |rng| {
            let patterns = random_patterns(rng, "abcd", 8, 6);
            let automaton = build_automaton(&patterns).unwrap();

            for (id, pattern) in patterns.iter().enumerate() {
                let node = path(&automaton, pattern.chars()).expect("every pattern is a trie path");
                assert!(node.outputs().contains(&id));
                assert_eq!(node.depth(), pattern.chars().count());
            }
        });
    }

    #[test]
    fn empty_pattern_list_gives_error() {
        let res = build_automaton::<char, &str>([]);
        assert_eq!(res.unwrap_err(), AhoError::InvalidPattern(InvalidPattern::EmptyList));

        let res = Builder::<char>::new().build();
        assert_eq!(res.unwrap_err(), AhoError::InvalidPattern(InvalidPattern::EmptyList));
    }

    #[test]
    fn empty_pattern_rejects_whole_batch() {
        let res = build_automaton(["ALFA", "BRAVO", "", "DELTA"]);
        assert_eq!(
            res.unwrap_err(),
            AhoError::InvalidPattern(InvalidPattern::EmptyPattern { index: 2 })
        );
    }

    #[test]
    fn empty_pattern_leaves_builder_untouched() {
        let mut builder = Builder::<char>::new();
        builder.add_pattern("AB").unwrap();
        assert_eq!(
            builder.add_pattern(""),
            Err(AhoError::InvalidPattern(InvalidPattern::EmptyPattern { index: 1 }))
        );
        builder.add_pattern("B").unwrap();

        let automaton = builder.build().unwrap();
        assert_eq!(automaton.pattern_count(), 2);
        assert_eq!(path(&automaton, "B".chars()).unwrap().outputs(), &[1]);
    }

    #[test]
    fn duplicate_patterns_share_a_node() {
        let automaton = build_automaton(["ABC", "ABC"]).unwrap();
        assert_eq!(automaton.node_count(), 4);
        assert_eq!(path(&automaton, "ABC".chars()).unwrap().outputs(), &[0, 1]);
    }

    #[test]
    fn generic_automaton_with_u8() {
        let mut builder = Builder::<u8>::new();
        builder.add_pattern([1, 2, 3]).unwrap();
        builder.add_pattern([1, 2, 4]).unwrap();
        builder.add_pattern([2, 3]).unwrap();
        let automaton = builder.build().unwrap();

        assert_eq!(path(&automaton, [1, 2, 3]).unwrap().outputs(), &[0]);
        assert_eq!(path(&automaton, [1, 2, 4]).unwrap().outputs(), &[1]);
        assert!(path(&automaton, [1, 2, 5]).is_none());
        assert!(path(&automaton, [1, 2]).unwrap().outputs().is_empty());

        // "123" falls back to "23" on failure, which is itself a pattern.
        let n = path(&automaton, [1, 2, 3]).unwrap();
        assert_eq!(n.terminal(), path(&automaton, [2, 3]));
    }

    #[test]
    fn unicode_patterns() {
        let automaton = build_automaton(["授人以鱼", "人以渔"]).unwrap();
        let n = path(&automaton, "授人以".chars()).unwrap();
        assert_eq!(n.fail(), path(&automaton, "人以".chars()));
    }
}
