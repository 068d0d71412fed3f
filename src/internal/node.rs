use core::fmt::{self, Debug};
use std::collections::TryReserveError;

/// Index of a node inside the [`Arena`](super::Arena).
pub(crate) type NodeId = usize;

/// A forward link on one level.
///
/// `width` is the rank distance covered by following the link: the number of
/// level 0 elements strictly between its origin and `next`, plus one for
/// `next` itself. A link to the end of a level always has width 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) next: Option<NodeId>,
    pub(crate) width: usize,
}

impl Link {
    pub(crate) const END: Link = Link {
        next: None,
        width: 0,
    };

    pub(crate) fn new(next: Option<NodeId>, width: usize) -> Self {
        Link { next, width }
    }

    pub(crate) fn is_end(&self) -> bool {
        self.next.is_none()
    }
}

/// A position a search may stop at: the head sentinel or a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tower {
    Head,
    Node(NodeId),
}

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) val: V,
    pub(crate) levels: Vec<Link>,
}

impl<K, V> Node<K, V> {
    /// Builds a node with `height` end links. Reserving the link storage is the
    /// only fallible step, so a failure here leaves nothing half built.
    pub(crate) fn try_new(key: K, val: V, height: usize) -> Result<Self, TryReserveError> {
        let mut levels = Vec::new();
        levels.try_reserve_exact(height)?;
        levels.resize(height, Link::END);

        Ok(Node { key, val, levels })
    }

    pub(crate) fn height(&self) -> usize {
        self.levels.len()
    }
}

impl<K, V> Debug for Node<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("val", &self.val)
            .field("height", &self.height())
            .field("levels", &self.levels)
            .finish()
    }
}
