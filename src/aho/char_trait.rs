use std::fmt::Debug;

/// Trait for types that can serve as the symbols of patterns and texts.
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`char`, `u8`, `u16`, `u32`, etc.).
///
/// - `Copy`: transitions store symbols by value
/// - `Eq + Ord`: looking up and ordering the transitions of a node
/// - `Debug`: debug printing, tracing, and graph labels
pub trait AhoChar: Copy + Eq + Ord + Debug {}

impl<T: Copy + Eq + Ord + Debug> AhoChar for T {}
