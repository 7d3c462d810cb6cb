//! Optional hooks into automaton construction and search.
//!
//! The core never depends on what an observer does with the events; it only calls
//! the hooks. All hooks default to doing nothing.

use log::trace;

use super::automaton::{NodeId, PatternId};
use super::char_trait::AhoChar;
use super::search::Occurrence;

/// Receives construction and search events.
pub trait Observer<C: AhoChar> {
    /// A trie node `node` was created as the child of `parent` on `symbol`.
    fn on_node_created(&mut self, _parent: NodeId, _symbol: C, _node: NodeId) {}

    /// Pattern `pattern` was inserted and ends in `node`.
    fn on_pattern_added(&mut self, _pattern: PatternId, _node: NodeId) {}

    /// The failure and terminal links of `node` were computed.
    fn on_fail_resolved(&mut self, _node: NodeId, _fail: NodeId, _terminal: Option<NodeId>) {}

    /// A pattern occurrence was found during a search.
    fn on_match(&mut self, _occurrence: &Occurrence) {}
}

/// An observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<C: AhoChar> Observer<C> for NoopObserver {}

/// An observer that writes every event to the `log` facade at trace level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl<C: AhoChar> Observer<C> for LogObserver {
    fn on_node_created(&mut self, parent: NodeId, symbol: C, node: NodeId) {
        trace!("Created transition {parent} --[{symbol:?}]-> {node}");
    }

    fn on_pattern_added(&mut self, pattern: PatternId, node: NodeId) {
        trace!("Pattern {pattern} ends in node {node}");
    }

    fn on_fail_resolved(&mut self, node: NodeId, fail: NodeId, terminal: Option<NodeId>) {
        match terminal {
            Some(terminal) => trace!("Node {node}: fail = {fail}, terminal = {terminal}"),
            None => trace!("Node {node}: fail = {fail}, no terminal"),
        }
    }

    fn on_match(&mut self, occurrence: &Occurrence) {
        trace!("Found pattern {} at position {}", occurrence.pattern, occurrence.start);
    }
}

impl<C: AhoChar, O: Observer<C> + ?Sized> Observer<C> for &mut O {
    fn on_node_created(&mut self, parent: NodeId, symbol: C, node: NodeId) {
        (**self).on_node_created(parent, symbol, node)
    }

    fn on_pattern_added(&mut self, pattern: PatternId, node: NodeId) {
        (**self).on_pattern_added(pattern, node)
    }

    fn on_fail_resolved(&mut self, node: NodeId, fail: NodeId, terminal: Option<NodeId>) {
        (**self).on_fail_resolved(node, fail, terminal)
    }

    fn on_match(&mut self, occurrence: &Occurrence) {
        (**self).on_match(occurrence)
    }
}
