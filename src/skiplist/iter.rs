use core::{fmt, iter::FusedIterator};

use crate::internal::{Arena, Link, NodeId, Tower};

/// Iterates the elements of a [SkipList](super::SkipList) in key order.
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<K, V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(nodes: &'a Arena<K, V>, first: Option<NodeId>, len: usize) -> Self {
        Iter {
            nodes,
            next: first,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.next?];

        self.next = node.levels[0].next;
        self.remaining -= 1;

        Some((&node.key, &node.val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Iterates the keys of a [SkipList](super::SkipList) in order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Keys { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Iterates the values of a [SkipList](super::SkipList) in key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Values { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, val)| val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Owning iterator over the elements of a [SkipList](super::SkipList), in key
/// order. Elements not yet yielded are dropped with the iterator.
pub struct IntoIter<K, V> {
    nodes: Arena<K, V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(nodes: Arena<K, V>, first: Option<NodeId>, len: usize) -> Self {
        IntoIter {
            nodes,
            next: first,
            remaining: len,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.remove(self.next?);

        self.next = node.levels[0].next;
        self.remaining -= 1;

        Some((node.key, node.val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rest = Iter::new(&self.nodes, self.next, self.remaining);
        f.debug_list().entries(rest).finish()
    }
}

/// One link of a level, as seen by [`Level`].
#[derive(Debug, PartialEq, Eq)]
pub struct Hop<'a, K> {
    /// Key of the node the link points at, `None` for the end of the level.
    pub target: Option<&'a K>,
    /// Number of elements the link moves forward by; 0 for the end of the level.
    pub width: usize,
}

impl<K> Clone for Hop<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Hop<'_, K> {}

/// Walks the links of one level, starting at the head and finishing with the
/// link that ends the level.
pub struct Level<'a, K, V> {
    head: &'a [Link],
    nodes: &'a Arena<K, V>,
    level: usize,
    // `None` once the link ending the level was yielded.
    curr: Option<Tower>,
}

impl<'a, K, V> Level<'a, K, V> {
    pub(crate) fn new(head: &'a [Link], nodes: &'a Arena<K, V>, level: usize) -> Self {
        Level {
            head,
            nodes,
            level,
            curr: Some(Tower::Head),
        }
    }
}

impl<'a, K, V> Iterator for Level<'a, K, V> {
    type Item = Hop<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let link = match self.curr? {
            Tower::Head => self.head[self.level],
            Tower::Node(id) => nodes[id].levels[self.level],
        };

        self.curr = link.next.map(Tower::Node);

        Some(Hop {
            target: link.next.map(|id| &nodes[id].key),
            width: link.width,
        })
    }
}

impl<K, V> FusedIterator for Level<'_, K, V> {}

impl<K, V> Clone for Level<'_, K, V> {
    fn clone(&self) -> Self {
        Level {
            head: self.head,
            nodes: self.nodes,
            level: self.level,
            curr: self.curr,
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Level<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
