/// The automaton: node table, node identifiers and the read-only inspection view.
pub mod automaton;
/// Automaton builder: trie insertion followed by breadth-first link resolution.
pub mod builder;
/// Trait for types that can serve as pattern and text symbols.
pub mod char_trait;
/// Graphviz rendering of an automaton.
pub mod dot;
/// Construction errors.
pub mod error;
/// Optional construction and search hooks.
pub mod observer;
/// Exact multi-pattern search.
pub mod search;
/// Sparse per-node transition map.
pub mod transitions;
/// Single-pattern search with a wildcard symbol.
pub mod wildcard;

#[cfg(test)]
pub(crate) mod test_utility;

pub use automaton::{Automaton, NodeId, NodeRef, PatternId};
pub use builder::{build_automaton, Builder, IntoSymbols};
pub use char_trait::AhoChar;
pub use error::{AhoError, InvalidPattern};
pub use observer::{LogObserver, NoopObserver, Observer};
pub use search::{search_exact, Occurrence};
pub use wildcard::{search_wildcard, AllWildcardPolicy, WildcardMatcher};
