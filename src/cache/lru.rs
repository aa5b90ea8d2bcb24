//! Recency List Module
//!
//! Doubly linked recency ordering stored in an arena, used for O(1) LRU eviction.

// == Sentinels ==
/// Slot of the head sentinel. Its successor is the most recently used node.
const HEAD: usize = 0;
/// Slot of the tail sentinel. Its predecessor is the least recently used node.
const TAIL: usize = 1;

#[derive(Debug)]
struct Node<T> {
    item: Option<T>,
    prev: usize,
    next: usize,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            item: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

// == Recency List ==
/// Orders items from most recently used (front) to least recently used (back).
///
/// Nodes live in a `Vec` and link to their neighbours by slot index. Slots 0 and 1
/// hold the head and tail sentinels, which never carry an item and are never
/// returned to callers. Slots freed by `remove` are recycled by `push_front`.
#[derive(Debug)]
pub struct RecencyList<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates an empty list: two sentinels pointing at each other.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` items before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node::sentinel());
        nodes.push(Node::sentinel());
        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an item as most recently used and returns its slot.
    pub fn push_front(&mut self, item: T) -> usize {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx].item = Some(item);
                idx
            }
            None => {
                self.nodes.push(Node {
                    item: Some(item),
                    prev: HEAD,
                    next: TAIL,
                });
                self.nodes.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks the item at `idx` as most recently used.
    pub fn move_to_front(&mut self, idx: usize) {
        if !self.is_occupied(idx) || self.nodes[HEAD].next == idx {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Unlinks the item at `idx`, frees its slot and returns the item.
    ///
    /// Returns None for sentinel or vacant slots.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if !self.is_occupied(idx) {
            return None;
        }
        let item = self.nodes[idx].item.take();
        self.unlink(idx);
        self.free.push(idx);
        self.len -= 1;
        item
    }

    // == Front / Back ==
    /// Slot of the most recently used item.
    pub fn front(&self) -> Option<usize> {
        let idx = self.nodes[HEAD].next;
        (idx != TAIL).then_some(idx)
    }

    /// Slot of the least recently used item, the next eviction candidate.
    pub fn back(&self) -> Option<usize> {
        let idx = self.nodes[TAIL].prev;
        (idx != HEAD).then_some(idx)
    }

    // == Access ==
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.nodes.get(idx).and_then(|node| node.item.as_ref())
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.nodes.get_mut(idx).and_then(|node| node.item.as_mut())
    }

    // == Length ==
    /// Returns the number of items, sentinels excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every item and resets the sentinels to point only at each other.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD].next = TAIL;
        self.nodes[TAIL].prev = HEAD;
        self.free.clear();
        self.len = 0;
    }

    // == Iterate ==
    /// Iterates items from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].next,
        }
    }

    fn is_occupied(&self, idx: usize) -> bool {
        idx > TAIL && self.nodes.get(idx).is_some_and(|node| node.item.is_some())
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    fn link_front(&mut self, idx: usize) {
        let first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = first;
        self.nodes[first].prev = idx;
        self.nodes[HEAD].next = idx;
    }

    /// Walks the links in both directions and checks they agree with `len`.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut forward = 0;
        let mut cursor = self.nodes[HEAD].next;
        while cursor != TAIL {
            let next = self.nodes[cursor].next;
            assert_eq!(self.nodes[next].prev, cursor, "broken back link at {}", next);
            assert!(self.nodes[cursor].item.is_some(), "vacant slot {} is linked", cursor);
            forward += 1;
            assert!(forward <= self.len, "cycle in recency list");
            cursor = next;
        }
        assert_eq!(forward, self.len, "forward walk disagrees with len");
        assert_eq!(self.nodes.len() - 2 - self.free.len(), self.len, "slot accounting");
    }
}

/// Iterator over a [`RecencyList`], most recently used first.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL {
            return None;
        }
        let node = &self.list.nodes[self.cursor];
        self.cursor = node.next;
        node.item.as_ref()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<&str> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.assert_consistent();
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = RecencyList::new();

        list.push_front("key1");
        list.push_front("key2");
        list.push_front("key3");

        assert_eq!(list.len(), 3);
        assert_eq!(order(&list), vec!["key3", "key2", "key1"]);
        assert_eq!(list.get(list.back().unwrap()), Some(&"key1"));
        list.assert_consistent();
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        list.move_to_front(a);

        assert_eq!(order(&list), vec!["a", "c", "b"]);
        assert_eq!(list.get(list.back().unwrap()), Some(&"b"));
        list.assert_consistent();
    }

    #[test]
    fn test_move_front_item_is_noop() {
        let mut list = RecencyList::new();

        list.push_front("a");
        let b = list.push_front("b");
        list.move_to_front(b);

        assert_eq!(order(&list), vec!["b", "a"]);
        list.assert_consistent();
    }

    #[test]
    fn test_remove_middle_and_ends() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(order(&list), vec!["c", "a"]);
        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.remove(c), Some("c"));
        assert!(list.is_empty());
        assert_eq!(list.back(), None);
        list.assert_consistent();
    }

    #[test]
    fn test_remove_sentinels_and_vacant_slots() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");

        assert_eq!(list.remove(HEAD), None);
        assert_eq!(list.remove(TAIL), None);
        assert_eq!(list.remove(99), None);

        list.remove(a);
        assert_eq!(list.remove(a), None, "double remove must be rejected");
        list.assert_consistent();
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        list.push_front("b");
        list.remove(a);

        let c = list.push_front("c");
        assert_eq!(c, a);
        assert_eq!(order(&list), vec!["c", "b"]);
        list.assert_consistent();
    }

    #[test]
    fn test_clear_resets_sentinels() {
        let mut list = RecencyList::new();

        list.push_front("a");
        list.push_front("b");
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        list.assert_consistent();

        list.push_front("c");
        assert_eq!(order(&list), vec!["c"]);
        list.assert_consistent();
    }

    #[test]
    fn test_eviction_order_after_multiple_touches() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        list.move_to_front(a);
        list.move_to_front(c);
        list.move_to_front(b);

        let mut evicted = Vec::new();
        while let Some(idx) = list.back() {
            evicted.push(list.remove(idx).unwrap());
        }
        assert_eq!(evicted, vec!["a", "c", "b"]);
    }
}
