use thiserror::Error;

/// The reason a batch of patterns was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPattern {
    /// No patterns were given.
    #[error("the pattern list is empty")]
    EmptyList,

    /// The pattern at `index` has no symbols.
    #[error("pattern {index} is empty")]
    EmptyPattern {
        /// Position of the offending pattern in the input.
        index: usize,
    },
}

/// Errors that can occur when constructing an automaton or a wildcard matcher.
///
/// Searching never fails; only construction does, and a failed construction
/// leaves nothing behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AhoError {
    /// The patterns were rejected as a whole before anything was built.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] InvalidPattern),

    /// Raised under [`AllWildcardPolicy::Reject`](super::wildcard::AllWildcardPolicy::Reject)
    /// when a pattern consists only of wildcard symbols.
    #[error("wildcard pattern of length {len} contains no literal symbols")]
    EmptyWildcardPattern {
        /// Length of the pattern, in symbols.
        len: usize,
    },
}
