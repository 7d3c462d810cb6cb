//! Example: building a keyword highlighter on top of an Automaton.
//!
//! This shows how to create a convenient high-level API on top of the raw
//! automaton. The `Keywords` struct keeps the keyword strings next to the
//! automaton and provides lookup, highlighting and a walk over the links.
//!
//! Run with: cargo run --example keywords

use libaho::aho::{Automaton, NodeRef, Occurrence, WildcardMatcher};

/// A list of keywords compiled into a single automaton.
struct Keywords {
    words: Vec<String>,
    automaton: Automaton<char>,
}

impl Keywords {
    fn new(words: &[&str]) -> Self {
        let automaton = Automaton::new(words).unwrap();
        Keywords { words: words.iter().map(|w| w.to_string()).collect(), automaton }
    }

    /// Returns true if the exact word is one of the keywords.
    fn is_keyword(&self, word: &str) -> bool {
        self.node_for(word).is_some_and(|n| !n.outputs().is_empty())
    }

    /// Returns every keyword found in the text with its 0-based start.
    fn find<'a>(&'a self, text: &str) -> Vec<(usize, &'a str)> {
        self.automaton
            .find_all(text)
            .into_iter()
            .map(|Occurrence { start, pattern }| (start, self.words[pattern].as_str()))
            .collect()
    }

    /// Wraps every symbol covered by some keyword in brackets.
    fn highlight(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut covered = vec![false; chars.len()];
        for occurrence in self.automaton.find_all(text) {
            let end = self.automaton.occurrence_end(&occurrence);
            covered[occurrence.start..end].iter_mut().for_each(|c| *c = true);
        }

        let mut out = String::new();
        for (i, ch) in chars.iter().enumerate() {
            if covered[i] && (i == 0 || !covered[i - 1]) {
                out.push('[');
            }
            out.push(*ch);
            if covered[i] && (i + 1 == chars.len() || !covered[i + 1]) {
                out.push(']');
            }
        }
        out
    }

    /// Describes the fail and terminal links of the node reached by `prefix`.
    fn links(&self, prefix: &str) -> Option<String> {
        let node = self.node_for(prefix)?;
        let spell = |n: Option<NodeRef<'_, char>>| match n {
            Some(n) if !n.is_root() => format!("{} (depth {})", n.id(), n.depth()),
            Some(_) => "root".to_string(),
            None => "-".to_string(),
        };
        Some(format!("fail: {}, terminal: {}", spell(node.fail()), spell(node.terminal())))
    }

    fn node_for(&self, word: &str) -> Option<NodeRef<'_, char>> {
        word.chars().try_fold(self.automaton.root(), |node, ch| node.get(ch))
    }
}

fn main() {
    let keywords = Keywords::new(&["he", "she", "his", "hers"]);
    println!("Automaton has {} nodes", keywords.automaton.node_count());

    // Keyword lookup
    println!("\nKeyword lookup:");
    for word in ["he", "her", "hers", "she", "his", "hi"] {
        println!("  {word}: {}", if keywords.is_keyword(word) { "yes" } else { "no" });
    }

    // Search
    println!("\nOccurrences in \"ushers\":");
    for (start, word) in keywords.find("ushers") {
        println!("  {start}: {word}");
    }
    println!("\nHighlighted: {}", keywords.highlight("this is his sheriff"));

    // Links
    println!("\nLinks:");
    for prefix in ["she", "hers", "hi"] {
        if let Some(links) = keywords.links(prefix) {
            println!("  {prefix}: {links}");
        }
    }

    // Wildcard
    let matcher = WildcardMatcher::new("h?s", '?').unwrap();
    println!("\n\"h?s\" in \"his hers has\": {:?}", matcher.find_starts("his hers has"));
}
