use rand::Rng;

/// Draws the height of new nodes.
///
/// A height starts at 1 and grows by one for every draw below `p`, capped at
/// `max_level - 1` so that the head tower always keeps a spare level. The
/// chance of a node reaching height `k` is therefore about `p^(k - 1)`.
pub(crate) struct LevelGenerator<R> {
    rng: R,
    p: f64,
    cap: usize,
}

impl<R: Rng> LevelGenerator<R> {
    pub(crate) fn new(rng: R, p: f64, max_level: usize) -> Self {
        LevelGenerator {
            rng,
            p,
            cap: max_level.saturating_sub(1),
        }
    }

    pub(crate) fn gen_height(&mut self) -> usize {
        let mut height = 1;

        while height < self.cap && self.rng.gen::<f64>() < self.p {
            height += 1;
        }

        height
    }
}

impl<R> LevelGenerator<R> {
    pub(crate) fn probability(&self) -> f64 {
        self.p
    }
}

/// Returns the max level that keeps searches around `O(log n)` for a list
/// expected to hold `n` elements, promoting nodes with probability `p`.
///
/// This is `floor(ln(n) / ln(1 / p))`, but never less than 1 so it can be
/// passed straight to [`Options::with_max_level`](crate::Options::with_max_level).
/// Returns `None` if `p` is not within `(0, 1)`: at `p = 1` the ratio divides
/// by zero, and at `p = 0` no node ever grows past one level.
///
/// ```
/// assert_eq!(rankskip::recommended_max_level(26, 0.5), Some(4));
/// assert_eq!(rankskip::recommended_max_level(1000, 0.25), Some(4));
/// assert_eq!(rankskip::recommended_max_level(100, 1.5), None);
/// ```
pub fn recommended_max_level(n: usize, p: f64) -> Option<usize> {
    if !(p > 0.0 && p < 1.0) {
        return None;
    }

    if n <= 1 {
        return Some(1);
    }

    let levels = ((n as f64).ln() / (1.0 / p).ln()).floor() as usize;

    Some(levels.max(1))
}
