//! Frequency counting over trip columns.
//!
//! Every "most common" statistic and label→count breakdown in the reports is
//! built on [`FrequencyCounter`]. Ties are broken by first appearance in the
//! input order, so results are deterministic for a given table.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

// ── ValueCount ────────────────────────────────────────────────────────────────

/// A distinct value and how many times it was observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount<K> {
    pub value: K,
    pub count: usize,
}

// ── FrequencyCounter ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Tally {
    count: usize,
    first_seen: usize,
}

/// Counts occurrences of distinct values, remembering when each was first seen.
#[derive(Debug, Clone)]
pub struct FrequencyCounter<K> {
    tallies: HashMap<K, Tally>,
    observed: usize,
}

impl<K> Default for FrequencyCounter<K> {
    fn default() -> Self {
        Self {
            tallies: HashMap::new(),
            observed: 0,
        }
    }
}

impl<K: Hash + Eq + Clone> FrequencyCounter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `value`.
    pub fn add(&mut self, value: K) {
        let position = self.observed;
        self.observed += 1;
        self.tallies
            .entry(value)
            .or_insert(Tally {
                count: 0,
                first_seen: position,
            })
            .count += 1;
    }

    /// Total number of observations recorded.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// The most frequent value; `None` when nothing was observed.
    pub fn mode(&self) -> Option<ValueCount<K>> {
        self.tallies
            .iter()
            .max_by(|a, b| rank(a.1, b.1))
            .map(|(value, tally)| ValueCount {
                value: value.clone(),
                count: tally.count,
            })
    }

    /// All distinct values, most frequent first.
    pub fn counts(&self) -> Vec<ValueCount<K>> {
        let mut entries: Vec<(&K, &Tally)> = self.tallies.iter().collect();
        entries.sort_by(|a, b| rank(b.1, a.1));
        entries
            .into_iter()
            .map(|(value, tally)| ValueCount {
                value: value.clone(),
                count: tally.count,
            })
            .collect()
    }
}

impl<K: Hash + Eq + Clone> FromIterator<K> for FrequencyCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::new();
        for value in iter {
            counter.add(value);
        }
        counter
    }
}

/// Orders tallies so that the "greater" one wins: higher count, then earlier
/// first appearance.
fn rank(a: &Tally, b: &Tally) -> Ordering {
    a.count
        .cmp(&b.count)
        .then_with(|| b.first_seen.cmp(&a.first_seen))
}

// ── Convenience wrappers ──────────────────────────────────────────────────────

/// Most frequent value of `values`, ties to the first seen.
pub fn mode<K, I>(values: I) -> Option<ValueCount<K>>
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = K>,
{
    values.into_iter().collect::<FrequencyCounter<K>>().mode()
}

/// Label→count breakdown of `values`, most frequent first.
pub fn value_counts<K, I>(values: I) -> Vec<ValueCount<K>>
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = K>,
{
    values.into_iter().collect::<FrequencyCounter<K>>().counts()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
