use std::collections::TryReserveError;

mod arena;
mod node;

pub(crate) use arena::Arena;
pub(crate) use node::{Link, Node, NodeId, Tower};

/// The towers preceding a search key on every level, together with the rank
/// distance travelled on each level before reaching them.
///
/// A list allocates its splice once, with one entry per level of its head, and
/// reuses it for every insertion and removal.
pub(crate) struct Splice {
    pub(crate) prev: Vec<Tower>,
    pub(crate) dist: Vec<usize>,
}

impl Splice {
    pub(crate) fn try_new(height: usize) -> Result<Self, TryReserveError> {
        let mut prev = Vec::new();
        prev.try_reserve_exact(height)?;
        prev.resize(height, Tower::Head);

        let mut dist = Vec::new();
        dist.try_reserve_exact(height)?;
        dist.resize(height, 0);

        Ok(Splice { prev, dist })
    }
}

/// Allocates a head tower of `height` empty links.
pub(crate) fn try_head(height: usize) -> Result<Vec<Link>, TryReserveError> {
    let mut head = Vec::new();
    head.try_reserve_exact(height)?;
    head.resize(height, Link::END);

    Ok(head)
}
