use core::{cmp::Ordering, fmt, mem};
use std::collections::TryReserveError;

use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::{
    comparator::{Comparator, Natural},
    error::Error,
    internal::{try_head, Arena, Link, Node, NodeId, Splice, Tower},
    level::LevelGenerator,
    options::Options,
};

pub mod iter;


use iter::{IntoIter, Iter, Keys, Level, Values};

struct ListState {
    len: usize,
    /// Number of levels currently populated, never below 1.
    level: usize,
}

/// An ordered map backed by a skip list whose links know how many elements
/// they skip over.
///
/// Besides the usual search, insertion and removal by key, every element can
/// be reached by its position in key order in `O(log n)` expected time.
///
/// ```
/// use rankskip::SkipList;
///
/// let mut list = SkipList::new();
///
/// for (i, key) in ["a", "e", "w", "d", "q"].into_iter().enumerate() {
///     list.insert(key, i).unwrap();
/// }
///
/// assert_eq!(list.get(&"a"), Some(&0));
/// assert_eq!(list.get(&"z"), None);
/// assert_eq!(list.key_at(0), Some(&"a"));
///
/// assert_eq!(list.remove(&"a"), Some(0));
/// assert_eq!(list.key_at(0), Some(&"d"));
/// assert_eq!(list.len(), 4);
/// ```
pub struct SkipList<K, V, C = Natural, R = StdRng> {
    head: Vec<Link>,
    splice: Splice,
    nodes: Arena<K, V>,
    state: ListState,
    cmp: C,
    levels: LevelGenerator<R>,
}

impl<K: Ord, V> SkipList<K, V> {
    /// Instantiates a new, empty [SkipList](SkipList) ordered by [`Ord`], using
    /// the default [`Options`].
    pub fn new() -> Self {
        let options = Options::default();
        let max_level = options.max_level();
        let splice = Splice {
            prev: vec![Tower::Head; max_level],
            dist: vec![0; max_level],
        };

        Self::build(
            Natural,
            &options,
            Self::seeded(&options),
            vec![Link::END; max_level],
            splice,
        )
    }

    /// Instantiates a new, empty [SkipList](SkipList) ordered by [`Ord`].
    pub fn with_options(options: Options) -> Result<Self, Error> {
        Self::with_comparator(Natural, options)
    }
}

impl<K: Ord, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> SkipList<K, V, C>
where
    C: Comparator<K>,
{
    /// Instantiates a new, empty [SkipList](SkipList) ordered by `cmp`.
    ///
    /// Levels are drawn from a [`StdRng`] seeded with [`Options::seed`], or with
    /// a random seed if none was set.
    pub fn with_comparator(cmp: C, options: Options) -> Result<Self, Error> {
        Self::with_rng(cmp, options, Self::seeded(&options))
    }

    fn seeded(options: &Options) -> StdRng {
        StdRng::seed_from_u64(options.seed().unwrap_or_else(rand::random))
    }
}

impl<K, V, C, R> SkipList<K, V, C, R>
where
    C: Comparator<K>,
    R: RngCore,
{
    /// Instantiates a new, empty [SkipList](SkipList) ordered by `cmp` that
    /// draws node levels from `rng`. [`Options::seed`] is ignored.
    ///
    /// The head tower and the search path are allocated here, one entry per
    /// level, and fail with [`Error::OutOfMemory`] if `max_level` is too large
    /// to allocate.
    pub fn with_rng(cmp: C, options: Options, rng: R) -> Result<Self, Error> {
        options.validate()?;

        let head = try_head(options.max_level()).map_err(out_of_memory)?;
        let splice = Splice::try_new(options.max_level()).map_err(out_of_memory)?;

        Ok(Self::build(cmp, &options, rng, head, splice))
    }

    fn build(cmp: C, options: &Options, rng: R, head: Vec<Link>, splice: Splice) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            p = options.probability(),
            max_level = options.max_level(),
            "creating skip list"
        );

        SkipList {
            head,
            splice,
            nodes: Arena::new(),
            state: ListState { len: 0, level: 1 },
            cmp,
            levels: LevelGenerator::new(rng, options.probability(), options.max_level()),
        }
    }

    /// Returns a reference to the value of `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.seek(key).map(|(id, _)| &self.nodes[id].val)
    }

    /// Returns the stored key equal to `key` together with its value.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.seek(key).map(|(id, _)| {
            let node = &self.nodes[id];
            (&node.key, &node.val)
        })
    }

    /// Returns a mutable reference to the value of `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (id, _) = self.seek(key)?;
        Some(&mut self.nodes[id].val)
    }

    /// Returns `true` if the list holds a key equal to `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.seek(key).is_some()
    }

    /// Returns the 0-based position of `key` in key order.
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.seek(key).map(|(_, rank)| rank)
    }

    /// Inserts a value in the list given a key.
    ///
    /// If the key was already present its value is replaced and the previous
    /// one returned; the list keeps its shape. Otherwise `Ok(None)` is returned.
    ///
    /// Fails with [`Error::OutOfMemory`] if storage for the new node cannot be
    /// reserved, in which case the list is left untouched.
    pub fn insert(&mut self, key: K, val: V) -> Result<Option<V>, Error> {
        if let Some(id) = self.find(&key) {
            return Ok(Some(mem::replace(&mut self.nodes[id].val, val)));
        }

        // Nothing is linked until every allocation has succeeded.
        self.nodes.reserve().map_err(out_of_memory)?;
        let height = self.levels.gen_height();
        let node = Node::try_new(key, val, height).map_err(out_of_memory)?;

        if height > self.state.level {
            for level in self.state.level..height {
                self.splice.prev[level] = Tower::Head;
                self.splice.dist[level] = 0;
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(from = self.state.level, to = height, "raising active level");

            self.state.level = height;
        }

        let id = self.nodes.insert(node);
        self.link_node(id, height);

        // Spans passing over the new node now cover one more element. Once a
        // level ends before the new node, every level above does too.
        for level in height..self.state.level {
            let link = self.link_mut(self.splice.prev[level], level);
            if link.is_end() {
                break;
            }
            link.width += 1;
        }

        self.state.len += 1;

        Ok(None)
    }

    /// Splits the links recorded in the splice around the freshly allocated
    /// node.
    fn link_node(&mut self, id: NodeId, height: usize) {
        for level in 0..height {
            let prev = self.splice.prev[level];
            let old = self.links(prev)[level];

            let (link, prev_width) = if level == 0 {
                (old, 1)
            } else {
                // Rank distance from `prev` to the new node, read off the level
                // below which already points at it.
                let below = self.splice.prev[level - 1];
                let before = self.splice.dist[level - 1] + self.links(below)[level - 1].width;

                let width = if old.is_end() {
                    0
                } else {
                    old.width + 1 - before
                };

                (Link::new(old.next, width), before)
            };

            self.nodes[id].levels[level] = link;
            *self.link_mut(prev, level) = Link::new(Some(id), prev_width);
        }
    }

    /// Removes `key` from the list, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, val)| val)
    }

    /// Removes `key` from the list, returning the stored key and its value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.find(key)?;

        Some(self.unlink(id))
    }

    /// Descends from the active level to level 0, recording in the splice the
    /// last tower before `key` on each level and the rank distance travelled
    /// on that level. Returns the node holding `key`, if any.
    fn find(&mut self, key: &K) -> Option<NodeId> {
        let mut curr = Tower::Head;

        for level in (0..self.state.level).rev() {
            let mut dist = 0;

            while let Some(next) = self.links(curr)[level].next {
                if self.cmp.compare(&self.nodes[next].key, key) != Ordering::Less {
                    break;
                }

                dist += self.links(curr)[level].width;
                curr = Tower::Node(next);
            }

            self.splice.prev[level] = curr;
            self.splice.dist[level] = dist;
        }

        self.links(curr)[0]
            .next
            .filter(|&next| self.cmp.compare(&self.nodes[next].key, key) == Ordering::Equal)
    }

    /// Same descent as [`find`](Self::find) without recording the path.
    /// Returns the node holding `key` and its 0-based rank.
    fn seek(&self, key: &K) -> Option<(NodeId, usize)> {
        let mut curr = Tower::Head;
        let mut rank = 0;

        for level in (0..self.state.level).rev() {
            while let Some(next) = self.links(curr)[level].next {
                if self.cmp.compare(&self.nodes[next].key, key) != Ordering::Less {
                    break;
                }

                rank += self.links(curr)[level].width;
                curr = Tower::Node(next);
            }
        }

        let next = self.links(curr)[0].next?;

        match self.cmp.compare(&self.nodes[next].key, key) {
            Ordering::Equal => Some((next, rank)),
            _ => None,
        }
    }
}

impl<K, V, C, R> SkipList<K, V, C, R> {
    /// Gets the length of the [SkipList](SkipList).
    pub fn len(&self) -> usize {
        self.state.len
    }

    /// Returns `true` if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.state.len < 1
    }

    /// Number of levels currently in use.
    pub fn level(&self) -> usize {
        self.state.level
    }

    /// Number of levels of the head tower.
    pub fn max_level(&self) -> usize {
        self.head.len()
    }

    /// Probability of promoting a new node one level up.
    pub fn probability(&self) -> f64 {
        self.levels.probability()
    }

    /// Returns the element at position `index` in key order.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        let node = &self.nodes[self.node_at(index)?];
        Some((&node.key, &node.val))
    }

    /// Returns the element at position `index` in key order, with its value
    /// mutable.
    pub fn get_index_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        let id = self.node_at(index)?;
        let node = &mut self.nodes[id];
        Some((&node.key, &mut node.val))
    }

    /// Returns the key at position `index` in key order.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.get_index(index).map(|(key, _)| key)
    }

    /// Returns the value at position `index` in key order.
    pub fn value_at(&self, index: usize) -> Option<&V> {
        self.get_index(index).map(|(_, val)| val)
    }

    /// Removes the element at position `index` in key order.
    pub fn remove_index(&mut self, index: usize) -> Option<(K, V)> {
        let id = self.find_rank(index)?;

        Some(self.unlink(id))
    }

    /// Removes and returns the smallest element.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.remove_index(0)
    }

    /// Removes and returns the largest element.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.remove_index(self.state.len.checked_sub(1)?)
    }

    /// Takes node `id` out of every level and releases it. The splice must
    /// hold the last tower before the node on every active level.
    ///
    /// On a level the node does not reach, the preceding link either ends the
    /// level or jumps to a node past the removed one: levels are nested, so a
    /// link starting before the node and ending on it would mean the node is
    /// on that level. Such a span loses exactly one element.
    fn unlink(&mut self, id: NodeId) -> (K, V) {
        for level in 0..self.state.level {
            let prev = self.splice.prev[level];
            let link = self.links(prev)[level];

            if link.next == Some(id) {
                let removed = self.nodes[id].levels[level];
                let width = if removed.is_end() {
                    0
                } else {
                    link.width + removed.width - 1
                };

                *self.link_mut(prev, level) = Link::new(removed.next, width);
            } else if !link.is_end() {
                self.link_mut(prev, level).width -= 1;
            }
        }

        let node = self.nodes.remove(id);
        self.state.len -= 1;
        self.shrink();

        (node.key, node.val)
    }

    fn shrink(&mut self) {
        #[cfg(feature = "tracing")]
        let from = self.state.level;

        while self.state.level > 1 && self.head[self.state.level - 1].is_end() {
            self.state.level -= 1;
        }

        #[cfg(feature = "tracing")]
        {
            if from != self.state.level {
                tracing::trace!(from, to = self.state.level, "lowering active level");
            }
        }
    }

    /// Returns the smallest element.
    pub fn first(&self) -> Option<(&K, &V)> {
        let node = &self.nodes[self.head[0].next?];
        Some((&node.key, &node.val))
    }

    /// Returns the largest element, following each level to its end.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut curr = Tower::Head;

        for level in (0..self.state.level).rev() {
            while let Some(next) = self.links(curr)[level].next {
                curr = Tower::Node(next);
            }
        }

        match curr {
            Tower::Node(id) => {
                let node = &self.nodes[id];
                Some((&node.key, &node.val))
            }
            Tower::Head => None,
        }
    }

    /// Removes every element, keeping the allocated storage.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head.fill(Link::END);
        self.state = ListState { len: 0, level: 1 };
    }

    /// Consumes the list, handing every element to `visitor` in key order.
    pub fn destroy<F>(self, mut visitor: F)
    where
        F: FnMut(K, V),
    {
        self.into_iter().for_each(|(key, val)| visitor(key, val));
    }

    /// Iterates the elements in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, self.head[0].next, self.state.len)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Read-only walk over the links of one level, from the head to the end of
    /// the level. Meant for tools that draw the list.
    ///
    /// Returns `None` if `level` is not below [`max_level`](Self::max_level).
    pub fn level_links(&self, level: usize) -> Option<Level<'_, K, V>> {
        (level < self.head.len()).then(|| Level::new(&self.head, &self.nodes, level))
    }

    /// Like [`find`](Self::find), but the descent is steered by rank: on each
    /// level it stops at the last tower whose rank is at most `index`.
    fn find_rank(&mut self, index: usize) -> Option<NodeId> {
        if index >= self.state.len {
            return None;
        }

        let mut curr = Tower::Head;
        let mut rank = 0;

        for level in (0..self.state.level).rev() {
            loop {
                let link = self.links(curr)[level];
                match link.next {
                    Some(next) if rank + link.width <= index => {
                        rank += link.width;
                        curr = Tower::Node(next);
                    }
                    _ => break,
                }
            }

            self.splice.prev[level] = curr;
        }

        self.links(curr)[0].next
    }

    /// Walks the widths down to the element at position `index`.
    fn node_at(&self, index: usize) -> Option<NodeId> {
        if index >= self.state.len {
            return None;
        }

        // The head counts as position 0.
        let mut remaining = index + 1;
        let mut curr = Tower::Head;

        for level in (0..self.state.level).rev() {
            loop {
                let link = self.links(curr)[level];
                match link.next {
                    Some(next) if link.width <= remaining => {
                        remaining -= link.width;
                        curr = Tower::Node(next);

                        if remaining == 0 {
                            return Some(next);
                        }
                    }
                    _ => break,
                }
            }
        }

        None
    }

    fn links(&self, tower: Tower) -> &[Link] {
        match tower {
            Tower::Head => &self.head,
            Tower::Node(id) => &self.nodes[id].levels,
        }
    }

    fn link_mut(&mut self, tower: Tower, level: usize) -> &mut Link {
        match tower {
            Tower::Head => &mut self.head[level],
            Tower::Node(id) => &mut self.nodes[id].levels[level],
        }
    }
}

fn out_of_memory(err: TryReserveError) -> Error {
    #[cfg(feature = "tracing")]
    tracing::debug!(error = %err, "could not reserve a new node");

    Error::OutOfMemory(err)
}

impl<K, V, C, R> fmt::Debug for SkipList<K, V, C, R>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, R> IntoIterator for SkipList<K, V, C, R> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.nodes, self.head[0].next, self.state.len)
    }
}

impl<'a, K, V, C, R> IntoIterator for &'a SkipList<K, V, C, R> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
