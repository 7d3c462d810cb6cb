use super::automaton::{goto, Automaton, NodeId, PatternId};
use super::builder::IntoSymbols;
use super::char_trait::AhoChar;
use super::observer::{NoopObserver, Observer};

/// A single pattern occurrence in a text.
///
/// Ordered by start position first and pattern identifier second, which is the
/// order in which searches report them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    /// The 0-based position of the first symbol of the occurrence.
    pub start: usize,
    /// The pattern that occurs.
    pub pattern: PatternId,
}

impl<C: AhoChar> Automaton<C> {
    /// Finds every occurrence of every pattern in `text`, including overlapping ones.
    ///
    /// The text does not need to use the alphabet the automaton was built from;
    /// unknown symbols never match anything. Occurrences are sorted by start
    /// position, with ties broken by pattern identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use libaho::aho::{Automaton, Occurrence};
    ///
    /// let automaton = Automaton::new(["he", "she", "his", "hers"]).unwrap();
    /// let found = automaton.find_all("ushers");
    /// assert_eq!(
    ///     found,
    ///     vec![
    ///         Occurrence { start: 1, pattern: 1 },
    ///         Occurrence { start: 2, pattern: 0 },
    ///         Occurrence { start: 2, pattern: 3 },
    ///     ]
    /// );
    /// ```
    pub fn find_all(&self, text: impl IntoSymbols<C>) -> Vec<Occurrence> {
        self.find_all_with_observer(text, &mut NoopObserver)
    }

    /// Same as [`find_all`](Automaton::find_all), additionally reporting every occurrence to
    /// `observer` in the order it is discovered (by end position).
    pub fn find_all_with_observer<O>(
        &self,
        text: impl IntoSymbols<C>,
        observer: &mut O,
    ) -> Vec<Occurrence>
    where
        O: Observer<C> + ?Sized,
    {
        let text = text.collect_symbols();
        let mut occurrences = Vec::new();

        self.scan(&text, |end, pattern| {
            let occurrence = Occurrence {
                start: end + 1 - self.pattern_lens[pattern],
                pattern,
            };
            observer.on_match(&occurrence);
            occurrences.push(occurrence);
        });

        occurrences.sort_unstable();
        occurrences
    }

    /// Streams `text` through the automaton and calls `f(end, pattern)` for every
    /// pattern ending at 0-based text position `end`.
    pub(crate) fn scan(&self, text: &[C], mut f: impl FnMut(usize, PatternId)) {
        let mut state = NodeId::ROOT;
        for (end, &symbol) in text.iter().enumerate() {
            state = goto(&self.nodes, state, symbol);
            self.for_each_output(state, |pattern| f(end, pattern));
        }
    }

    /// Returns the exclusive end position of an occurrence found by this automaton.
    ///
    /// # Panics
    ///
    /// Panics if the occurrence refers to a pattern this automaton does not have.
    pub fn occurrence_end(&self, occurrence: &Occurrence) -> usize {
        occurrence.start + self.pattern_lens[occurrence.pattern]
    }
}

/// Finds every occurrence of the automaton's patterns in `text`.
///
/// Free-function form of [`Automaton::find_all`].
pub fn search_exact<C: AhoChar>(
    automaton: &Automaton<C>,
    text: impl IntoSymbols<C>,
) -> Vec<Occurrence> {
    automaton.find_all(text)
}
