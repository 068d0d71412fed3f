use crate::error::Error;

/// Default probability of promoting a node one level up.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Default number of levels of the head tower.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Construction parameters of a [`SkipList`](crate::SkipList).
///
/// The values are only checked when the list is built, so an `Options` can be
/// assembled freely and handed to
/// [`SkipList::with_options`](crate::SkipList::with_options).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    probability: f64,
    max_level: usize,
    seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            probability: DEFAULT_PROBABILITY,
            max_level: DEFAULT_MAX_LEVEL,
            seed: None,
        }
    }
}

impl Options {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the probability `p` that a node reaching level `i` also reaches
    /// level `i + 1`. Must be within `[0, 1]`.
    pub fn with_probability(mut self, p: f64) -> Self {
        self.probability = p;
        self
    }

    /// Sets the number of levels of the head tower. Must be at least 1. Nodes
    /// are at most `max_level - 1` levels tall (or 1 when `max_level` is 1).
    ///
    /// The head tower and the search path kept by the list both hold one entry
    /// per level, allocated when the list is built.
    ///
    /// [`recommended_max_level`](crate::recommended_max_level) gives a good
    /// value for an expected number of elements.
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Seeds the level generator, making the shape of the list reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(Error::InvalidProbability(self.probability));
        }

        if self.max_level == 0 {
            return Err(Error::InvalidMaxLevel);
        }

        Ok(())
    }
}
