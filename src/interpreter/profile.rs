use std::collections::HashMap;

/// How many times each loop's `RJump` was evaluated during a run, keyed by
/// the index of the `RJump`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopProfile {
    visits: HashMap<usize, u64>,
}

impl LoopProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, index: usize) {
        *self.visits.entry(index).or_default() += 1;
    }

    pub fn visits(&self, index: usize) -> u64 {
        self.visits.get(&index).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// `(index, visits)` pairs, least visited first. Ties go by index so the
    /// order is stable between runs.
    pub fn sorted(&self) -> Vec<(usize, u64)> {
        let mut entries: Vec<_> = self.visits.iter().map(|(&i, &n)| (i, n)).collect();
        entries.sort_by_key(|&(index, visits)| (visits, index));
        entries
    }
}
