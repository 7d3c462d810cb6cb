//! Single-pattern matching where one designated symbol stands for any symbol.
//!
//! The pattern is split into its literal segments, an automaton is built over the
//! segments, and a single pass over the text lets each segment hit cast a vote for
//! the pattern alignment it implies. An alignment is confirmed when every segment
//! voted for it.

use log::debug;
use smallvec::SmallVec;

use super::automaton::Automaton;
use super::builder::{build_automaton_with_observer, IntoSymbols};
use super::char_trait::AhoChar;
use super::error::{AhoError, InvalidPattern};
use super::observer::{NoopObserver, Observer};
use super::search::Occurrence;

/// A maximal run of literal symbols in a wildcard pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment<C: AhoChar> {
    symbols: Vec<C>,
    offset: usize,
}

impl<C: AhoChar> Segment<C> {
    /// The literal symbols of this segment.
    pub fn symbols(&self) -> &[C] {
        &self.symbols
    }

    /// The 0-based position of the segment within the pattern.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The number of symbols in the segment.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if the segment has no symbols, which [`split_pattern`] never produces.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Splits `pattern` on runs of `wildcard` into its maximal literal segments.
///
/// # Examples
///
/// ```
/// use libaho::aho::wildcard::split_pattern;
///
/// let pattern: Vec<char> = "??ab?c??".chars().collect();
/// let segments = split_pattern(&pattern, '?');
/// assert_eq!(segments.len(), 2);
/// assert_eq!((segments[0].symbols(), segments[0].offset()), (&['a', 'b'][..], 2));
/// assert_eq!((segments[1].symbols(), segments[1].offset()), (&['c'][..], 5));
/// ```
pub fn split_pattern<C: AhoChar>(pattern: &[C], wildcard: C) -> Vec<Segment<C>> {
    let mut segments = Vec::new();
    let mut start = None;

    for (i, &symbol) in pattern.iter().enumerate() {
        match (symbol == wildcard, start) {
            (false, None) => start = Some(i),
            (true, Some(offset)) => {
                segments.push(Segment {
                    symbols: pattern[offset..i].to_vec(),
                    offset,
                });
                start = None;
            }
            _ => {}
        }
    }

    if let Some(offset) = start {
        segments.push(Segment {
            symbols: pattern[offset..].to_vec(),
            offset,
        });
    }
    segments
}

/// What to do with a pattern that consists of wildcards only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AllWildcardPolicy {
    /// A pattern of `L` wildcards matches every text window of length `L`.
    #[default]
    MatchEveryWindow,
    /// Reject the pattern with [`AhoError::EmptyWildcardPattern`].
    Reject,
}

/// A compiled wildcard pattern.
///
/// # Examples
///
/// ```
/// use libaho::aho::WildcardMatcher;
///
/// let matcher = WildcardMatcher::new("a?c", '?').unwrap();
/// assert_eq!(matcher.find_starts("abcxaYc"), vec![0, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct WildcardMatcher<C: AhoChar> {
    segments: Vec<Segment<C>>,
    /// `None` when the pattern has no literal segments.
    automaton: Option<Automaton<C>>,
    pattern_len: usize,
    wildcard: C,
}

impl<C: AhoChar> WildcardMatcher<C> {
    /// Compiles `pattern`, in which `wildcard` matches any single symbol.
    ///
    /// # Errors
    ///
    /// Returns [`AhoError::InvalidPattern`] if the pattern is empty.
    pub fn new(pattern: impl IntoSymbols<C>, wildcard: C) -> Result<Self, AhoError> {
        Self::with_policy(pattern, wildcard, AllWildcardPolicy::default())
    }

    /// Compiles `pattern`, deciding with `policy` how a pattern without literal symbols is treated.
    ///
    /// # Errors
    ///
    /// Returns [`AhoError::InvalidPattern`] if the pattern is empty, and
    /// [`AhoError::EmptyWildcardPattern`] if it has only wildcards under
    /// [`AllWildcardPolicy::Reject`].
    pub fn with_policy(
        pattern: impl IntoSymbols<C>,
        wildcard: C,
        policy: AllWildcardPolicy,
    ) -> Result<Self, AhoError> {
        Self::build_with(pattern, wildcard, policy, NoopObserver)
    }

    /// Same as [`with_policy`](WildcardMatcher::with_policy), reporting the construction of
    /// the segment automaton to `observer`.
    pub fn build_with<O: Observer<C>>(
        pattern: impl IntoSymbols<C>,
        wildcard: C,
        policy: AllWildcardPolicy,
        observer: O,
    ) -> Result<Self, AhoError> {
        let pattern: SmallVec<[C; 32]> = pattern.collect_symbols();
        if pattern.is_empty() {
            return Err(InvalidPattern::EmptyPattern { index: 0 }.into());
        }

        let segments = split_pattern(&pattern, wildcard);
        debug!(
            "Wildcard pattern of length {} has {} literal segments",
            pattern.len(),
            segments.len()
        );

        let automaton = if segments.is_empty() {
            match policy {
                AllWildcardPolicy::MatchEveryWindow => None,
                AllWildcardPolicy::Reject => {
                    return Err(AhoError::EmptyWildcardPattern { len: pattern.len() });
                }
            }
        } else {
            Some(build_automaton_with_observer(
                segments.iter().map(Segment::symbols),
                observer,
            )?)
        };

        Ok(WildcardMatcher {
            segments,
            automaton,
            pattern_len: pattern.len(),
            wildcard,
        })
    }

    /// The literal segments of the pattern, in pattern order. Segment `k` is pattern
    /// id `k` of the segment automaton.
    pub fn segments(&self) -> &[Segment<C>] {
        &self.segments
    }

    /// The automaton built over the segments, or `None` for a pattern of wildcards only.
    pub fn automaton(&self) -> Option<&Automaton<C>> {
        self.automaton.as_ref()
    }

    /// The length of the full pattern, wildcards included.
    pub fn pattern_len(&self) -> usize {
        self.pattern_len
    }

    /// The wildcard symbol.
    pub fn wildcard(&self) -> C {
        self.wildcard
    }

    /// Returns the 0-based start positions at which the whole pattern matches `text`, ascending.
    pub fn find_starts(&self, text: impl IntoSymbols<C>) -> Vec<usize> {
        self.find_starts_with_observer(text, &mut NoopObserver)
    }

    /// Same as [`find_starts`](WildcardMatcher::find_starts), reporting every segment hit to
    /// `observer`. The reported occurrence carries the segment index as its pattern and
    /// the segment's own start in the text.
    pub fn find_starts_with_observer<O>(
        &self,
        text: impl IntoSymbols<C>,
        observer: &mut O,
    ) -> Vec<usize>
    where
        O: Observer<C> + ?Sized,
    {
        let text = text.collect_symbols();
        let Some(max_start) = text.len().checked_sub(self.pattern_len) else {
            return Vec::new();
        };

        let Some(automaton) = &self.automaton else {
            return (0..=max_start).collect();
        };

        let mut votes = vec![0u32; max_start + 1];
        automaton.scan(&text, |end, k| {
            let segment = &self.segments[k];
            let segment_start = end + 1 - segment.len();
            observer.on_match(&Occurrence {
                start: segment_start,
                pattern: k,
            });

            if let Some(candidate) = segment_start.checked_sub(segment.offset) {
                if candidate <= max_start {
                    votes[candidate] += 1;
                }
            }
        });

        let required = self.segments.len() as u32;
        votes
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == required)
            .map(|(start, _)| start)
            .collect()
    }
}

/// Finds every position where `pattern` matches `text`, with `wildcard` matching any
/// single symbol.
///
/// Returns 1-indexed positions in ascending order. A pattern made only of wildcards
/// matches every window of its length.
///
/// # Errors
///
/// Returns [`AhoError::InvalidPattern`] if the pattern is empty.
///
/// # Examples
///
/// ```
/// use libaho::aho::wildcard::search_wildcard;
///
/// assert_eq!(search_wildcard("abcxaYc", "a?c", '?').unwrap(), vec![1, 5]);
/// assert_eq!(search_wildcard("ab", "abc", '?').unwrap(), Vec::<usize>::new());
/// ```
pub fn search_wildcard<C: AhoChar>(
    text: impl IntoSymbols<C>,
    pattern: impl IntoSymbols<C>,
    wildcard: C,
) -> Result<Vec<usize>, AhoError> {
    let matcher = WildcardMatcher::new(pattern, wildcard)?;
    Ok(matcher.find_starts(text).into_iter().map(|start| start + 1).collect())
}
