//! Helpers for randomized tests.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::search::Occurrence;

/// Runs `test` the given number of times, each with a freshly seeded random number
/// generator. The seed is printed first so that a failure can be reproduced.
pub fn random_test<F>(iterations: usize, mut test: F)
where
    F: FnMut(&mut StdRng),
{
    let seed: u64 = rand::random();
    println!("random_test seed: {seed}");
    let mut seeds = StdRng::seed_from_u64(seed);

    for _ in 0..iterations {
        let mut rng = StdRng::seed_from_u64(seeds.random());
        test(&mut rng);
    }
}

/// Returns a string of at most `max_len` symbols drawn from `alphabet`.
pub fn random_string(rng: &mut impl Rng, alphabet: &str, max_len: usize) -> String {
    let alphabet: Vec<char> = alphabet.chars().collect();
    let len = rng.random_range(0..=max_len);
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

/// Returns between one and `max_count` non-empty patterns of at most `max_len` symbols.
pub fn random_patterns(
    rng: &mut impl Rng,
    alphabet: &str,
    max_count: usize,
    max_len: usize,
) -> Vec<String> {
    let alphabet: Vec<char> = alphabet.chars().collect();
    let count = rng.random_range(1..=max_count);
    (0..count)
        .map(|_| {
            let len = rng.random_range(1..=max_len);
            (0..len)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect()
        })
        .collect()
}

/// Reference exact search: compares every pattern at every text position.
pub fn naive_find_all(patterns: &[String], text: &str) -> Vec<Occurrence> {
    let text: Vec<char> = text.chars().collect();
    let mut occurrences = Vec::new();
    for start in 0..text.len() {
        for (pattern, symbols) in patterns.iter().enumerate() {
            let symbols: Vec<char> = symbols.chars().collect();
            if text[start..].starts_with(&symbols) {
                occurrences.push(Occurrence { start, pattern });
            }
        }
    }
    occurrences
}

/// Reference wildcard search: compares the pattern at every text position, skipping wildcards.
pub fn naive_find_wildcard(text: &str, pattern: &str, wildcard: char) -> Vec<usize> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    if pattern.len() > text.len() {
        return Vec::new();
    }

    (0..=text.len() - pattern.len())
        .filter(|&start| {
            pattern
                .iter()
                .zip(&text[start..])
                .all(|(&p, &t)| p == wildcard || p == t)
        })
        .collect()
}
