//! # libaho
//!
//! An [Aho-Corasick](https://en.wikipedia.org/wiki/Aho%E2%80%93Corasick_algorithm)
//! automaton for Rust, with two search modes built on top of it.
//!
//! The automaton is a trie over a set of patterns, augmented with failure links
//! (where to continue after a mismatch) and terminal links (a shortcut to the next
//! node on the failure chain that actually reports a pattern). It finds every
//! occurrence of every pattern in a single pass over the text.
//!
//! ## Features
//!
//! - **Generic over symbol type**: works with `char`, `u8`, `u16`, or any type implementing
//!   [`AhoChar`](aho::AhoChar)
//! - **Exact multi-pattern search**: all overlapping occurrences, in
//!   O(text + patterns + occurrences)
//! - **Wildcard search**: a single pattern in which one symbol matches anything,
//!   resolved by letting each literal segment vote for the alignment it implies
//! - **Inspectable**: every node's transitions, fail link, terminal link and outputs are
//!   exposed read-only, and [`write_dot`](aho::dot::write_dot) renders the whole automaton
//! - **Thread-safe**: a built [`Automaton`](aho::Automaton) is immutable and can be shared
//!   between concurrent searches
//!
//! ## Quick Start
//!
//! ```
//! use libaho::aho::{Automaton, Occurrence};
//!
//! let automaton = Automaton::new(["he", "she", "his", "hers"]).unwrap();
//! let found = automaton.find_all("ushers");
//!
//! // "she" at 1, "he" at 2 and "hers" at 2.
//! let found: Vec<(usize, usize)> = found.iter().map(|o| (o.start, o.pattern)).collect();
//! assert_eq!(found, vec![(1, 1), (2, 0), (2, 3)]);
//! ```
//!
//! ## Wildcard Search
//!
//! Positions returned by [`search_wildcard`](aho::search_wildcard) are 1-indexed:
//!
//! ```
//! use libaho::aho::search_wildcard;
//!
//! assert_eq!(search_wildcard("abcxaYc", "a?c", '?').unwrap(), vec![1, 5]);
//! ```
//!
//! [`WildcardMatcher`](aho::WildcardMatcher) compiles the pattern once and returns 0-based
//! starts, which is more convenient when searching several texts:
//!
//! ```
//! use libaho::aho::WildcardMatcher;
//!
//! let matcher = WildcardMatcher::new("a?c", '?').unwrap();
//! assert_eq!(matcher.find_starts("abcxaYc"), vec![0, 4]);
//! assert_eq!(matcher.find_starts("ac"), Vec::<usize>::new());
//! ```
//!
//! ## Generic Usage
//!
//! ```
//! use libaho::aho::build_automaton;
//!
//! let patterns: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![2, 3]];
//! let automaton = build_automaton(patterns).unwrap();
//!
//! let found = automaton.find_all([0u8, 1, 2, 3]);
//! assert_eq!(found.len(), 2);
//! ```

#![warn(missing_docs)]

/// Aho-Corasick automaton, builder, and the exact and wildcard searches.
pub mod aho;
