//! Per-key storage for the cell index
//!
//! Most keys hold exactly one entry, stored inline. Only when two distinct
//! coordinates share a key does the bucket escalate to an owned singly linked
//! chain, and the chain collapses back to an inline entry once it is reduced
//! to a single node again.

use std::mem;

use crate::hash::HashVector;

/// A stored value and the exact coordinate it was stored under
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<V> {
    /// Horizontal coordinate as given to `set`
    pub x: f64,
    /// Vertical coordinate as given to `set`
    pub y: f64,
    /// Stored value
    pub value: V,
}

impl<V> Entry<V> {
    /// Create an entry
    pub const fn new(x: f64, y: f64, value: V) -> Self {
        Self { x, y, value }
    }

    /// Exact coordinate identity, compared by bit pattern
    pub const fn matches(&self, x: f64, y: f64) -> bool {
        self.x.to_bits() == x.to_bits() && self.y.to_bits() == y.to_bits()
    }

    /// Squared Euclidean distance to a point
    pub fn distance_squared(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx.mul_add(dx, dy * dy)
    }
}

impl<V> HashVector for Entry<V> {
    fn components(&self) -> impl Iterator<Item = f64> + '_ {
        [self.x, self.y].into_iter()
    }
}

/// One link of a collision chain
#[derive(Debug, Clone)]
pub struct ChainNode<V> {
    /// Entry held by this node
    pub entry: Entry<V>,
    /// Successor, exclusively owned
    pub next: Option<Box<ChainNode<V>>>,
}

impl<V> ChainNode<V> {
    const fn new(entry: Entry<V>) -> Self {
        Self { entry, next: None }
    }
}

/// Contents of one cell index slot
#[derive(Debug, Clone)]
pub enum Bucket<V> {
    /// The common case: one entry stored inline
    Single(Entry<V>),
    /// Two or more entries sharing a key, in insertion order
    Chain(Box<ChainNode<V>>),
}

/// Outcome of removing a coordinate from a bucket
#[derive(Debug, PartialEq, Eq)]
pub enum Removal<V> {
    /// No entry matched
    Missing,
    /// The entry was unlinked and the bucket still holds others
    Removed(V),
    /// The only entry matched; the caller must drop the whole slot
    Vacated,
}

impl<V> Bucket<V> {
    /// Find the entry stored at an exact coordinate
    pub fn get(&self, x: f64, y: f64) -> Option<&Entry<V>> {
        self.iter().find(|entry| entry.matches(x, y))
    }

    /// Find the entry stored at an exact coordinate for mutation
    pub fn get_mut(&mut self, x: f64, y: f64) -> Option<&mut Entry<V>> {
        match self {
            Self::Single(entry) => entry.matches(x, y).then_some(entry),
            Self::Chain(head) => {
                let mut node = Some(&mut **head);
                while let Some(current) = node {
                    if current.entry.matches(x, y) {
                        return Some(&mut current.entry);
                    }
                    node = current.next.as_deref_mut();
                }
                None
            }
        }
    }

    /// Store an entry, returning the value it displaced
    ///
    /// A new coordinate in an inline bucket promotes it to a chain holding
    /// the previous entry first; a new coordinate in a chain is appended.
    pub fn insert(&mut self, entry: Entry<V>) -> Option<V> {
        match self {
            Self::Single(existing) if existing.matches(entry.x, entry.y) => {
                Some(mem::replace(&mut existing.value, entry.value))
            }
            Self::Single(_) => {
                let chain = Self::Chain(Box::new(ChainNode::new(entry)));
                if let Self::Single(first) = mem::replace(self, chain)
                    && let Self::Chain(head) = self
                {
                    let second = mem::replace(head, Box::new(ChainNode::new(first)));
                    head.next = Some(second);
                }
                None
            }
            Self::Chain(head) => {
                if head.entry.matches(entry.x, entry.y) {
                    return Some(mem::replace(&mut head.entry.value, entry.value));
                }

                let mut slot = &mut head.next;
                while let Some(node) = slot {
                    if node.entry.matches(entry.x, entry.y) {
                        return Some(mem::replace(&mut node.entry.value, entry.value));
                    }
                    slot = &mut node.next;
                }
                *slot = Some(Box::new(ChainNode::new(entry)));
                None
            }
        }
    }

    /// Remove the entry stored at an exact coordinate
    ///
    /// A chain left with one node collapses into an inline entry.
    pub fn remove(&mut self, x: f64, y: f64) -> Removal<V> {
        match self {
            Self::Single(entry) => {
                if entry.matches(x, y) {
                    Removal::Vacated
                } else {
                    Removal::Missing
                }
            }
            Self::Chain(head) => {
                let Some(mut detached) = unlink(head, x, y) else {
                    return Removal::Missing;
                };

                if head.next.is_some() {
                    return Removal::Removed(detached.entry.value);
                }

                // Swap the survivor out of the head so the chain can be
                // replaced by an inline entry
                mem::swap(&mut head.entry, &mut detached.entry);
                let ChainNode {
                    entry: survivor, ..
                } = *detached;
                match mem::replace(self, Self::Single(survivor)) {
                    Self::Chain(removed) => Removal::Removed(removed.entry.value),
                    Self::Single(removed) => Removal::Removed(removed.value),
                }
            }
        }
    }

    /// Number of entries in the bucket
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Chain(_) => self.iter().count(),
        }
    }

    /// Buckets are never empty; vacated slots are removed from the index
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether the bucket has escalated to a collision chain
    pub const fn is_chain(&self) -> bool {
        matches!(self, Self::Chain(_))
    }

    /// Iterate over entries in storage order
    pub fn iter(&self) -> BucketIter<'_, V> {
        match self {
            Self::Single(entry) => BucketIter::Single(Some(entry)),
            Self::Chain(head) => BucketIter::Chain(Some(&**head)),
        }
    }

    /// Unwrap the bucket into its first entry, dropping any others
    pub fn into_head(self) -> Entry<V> {
        match self {
            Self::Single(entry) => entry,
            Self::Chain(head) => {
                let ChainNode { entry, .. } = *head;
                entry
            }
        }
    }
}

/// Detach the node matching a coordinate from a chain of at least two nodes
fn unlink<V>(head: &mut Box<ChainNode<V>>, x: f64, y: f64) -> Option<Box<ChainNode<V>>> {
    if head.entry.matches(x, y) {
        let successor = head.next.take()?;
        return Some(mem::replace(head, successor));
    }

    let mut slot = &mut head.next;
    loop {
        let found = slot.as_deref()?.entry.matches(x, y);
        if found {
            let mut detached = slot.take()?;
            *slot = detached.next.take();
            return Some(detached);
        }
        slot = &mut slot.as_mut()?.next;
    }
}

/// Borrowing iterator over the entries of one bucket
#[derive(Debug)]
pub enum BucketIter<'a, V> {
    /// Inline entry not yet yielded
    Single(Option<&'a Entry<V>>),
    /// Next chain node to yield
    Chain(Option<&'a ChainNode<V>>),
}

impl<'a, V> Iterator for BucketIter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Single(entry) => entry.take(),
            Self::Chain(node) => {
                let current = node.take()?;
                *node = current.next.as_deref();
                Some(&current.entry)
            }
        }
    }
}

impl<'a, V> IntoIterator for &'a Bucket<V> {
    type Item = &'a Entry<V>;
    type IntoIter = BucketIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
