//! Hint reveal counter.

/// How many hints of the current word are shown.
///
/// Only ever grows, and never past the number of hints available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HintReveal {
    count: usize,
    total: usize,
}

impl HintReveal {
    /// Creates a counter for a word with `total` hints.
    pub fn new(total: usize) -> Self {
        Self { count: 0, total }
    }

    /// Shows one more hint, saturating at the total.
    pub fn reveal_next(&mut self) -> usize {
        self.count = (self.count + 1).min(self.total);
        self.count
    }

    /// Starts over for a new word.
    pub fn reset(&mut self, total: usize) {
        *self = Self::new(total);
    }

    /// Hints shown so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Hints available.
    pub fn total(&self) -> usize {
        self.total
    }

    /// True when every hint is shown.
    pub fn is_exhausted(&self) -> bool {
        self.count >= self.total
    }
}
