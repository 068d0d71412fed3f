use core::ops::{Index, IndexMut};
use std::collections::TryReserveError;

use super::{Node, NodeId};

/// Owns every node of a list. Nodes are addressed by their slot index, which
/// stays stable for as long as the node is alive. Freed slots are recycled.
pub(crate) struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    /// Makes [`reserve`](Self::reserve) fail, to exercise allocation failures.
    #[cfg(test)]
    pub(crate) fail_reserve: bool,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
            #[cfg(test)]
            fail_reserve: false,
        }
    }

    /// Makes sure the next [`insert`](Self::insert) does not need to allocate.
    ///
    /// The free list is kept at least as large as the slot vector, so releasing
    /// a node never allocates either.
    pub(crate) fn reserve(&mut self) -> Result<(), TryReserveError> {
        #[cfg(test)]
        if self.fail_reserve {
            return Vec::<u8>::new().try_reserve(usize::MAX);
        }

        if !self.free.is_empty() {
            return Ok(());
        }

        self.slots.try_reserve(1)?;
        self.free.try_reserve(self.slots.len() + 1)?;

        Ok(())
    }

    pub(crate) fn insert(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Node<K, V> {
        match self.slots[id].take() {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => panic!("node {id} was already released"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Number of live nodes.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id] {
            Some(node) => node,
            None => panic!("node {id} is not alive"),
        }
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id] {
            Some(node) => node,
            None => panic!("node {id} is not alive"),
        }
    }
}
