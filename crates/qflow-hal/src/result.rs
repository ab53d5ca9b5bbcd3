//! Execution results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Measurement outcome counts keyed by bitstring.
///
/// Bitstrings put classical bit 0 rightmost. Keys iterate in lexicographic
/// order so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of `bitstring` (zero if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Divide every count by `denominator`.
    ///
    /// A zero denominator yields an empty map.
    pub fn probabilities(&self, denominator: u64) -> BTreeMap<String, f64> {
        if denominator == 0 {
            return BTreeMap::new();
        }
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), *v as f64 / denominator as f64))
            .collect()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }
}

/// Result of a shot-based run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Outcome counts.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// One bitstring per shot, when the backend kept them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Vec<String>>,
    /// Wall-clock execution time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result from counts.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            memory: None,
            execution_time_ms: None,
        }
    }

    /// Attach the per-shot memory trace.
    pub fn with_memory(mut self, memory: Vec<String>) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Attach the execution time.
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}
