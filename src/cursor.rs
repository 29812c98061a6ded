//! Cursor: bidirectional walker over an OrderedMap's order list.

use slotmap::DefaultKey;

use crate::ordered_map::{OrderNode, OrderedMap};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Status {
    Empty,
    BeforeFirst,
    Within,
    AfterLast,
}

/// A movable position over an [`OrderedMap`]'s insertion order.
///
/// Unlike an iterator, a cursor can seek back and forth, and it has explicit
/// sentinel positions one step before the first element and one step past
/// the last. Stepping off either end keeps the element the cursor was on, so
/// moving back re-enters the list at that same element:
///
/// ```
/// use seqmap::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("a", 1).unwrap();
/// map.insert("b", 2).unwrap();
///
/// let mut cursor = map.cursor();
/// cursor.retreat(); // off the front
/// assert!(!cursor.has_current());
/// cursor.advance(); // back on "a"
/// assert_eq!(cursor.key(), Some("a"));
/// ```
///
/// The cursor reads only the order list, never the hash index, and holds a
/// shared borrow of the map for its whole lifetime: the map cannot be
/// mutated while any cursor is alive, so a cursor can never observe a
/// removed element.
///
/// A cursor opened over an empty map is permanently exhausted; it reports no
/// current element and ignores movement.
#[derive(Debug)]
pub struct Cursor<'m, V> {
    map: &'m OrderedMap<V>,
    node: Option<DefaultKey>,
    status: Status,
}

impl<'m, V> Cursor<'m, V> {
    pub(crate) fn new(map: &'m OrderedMap<V>) -> Self {
        let node = map.head;
        let status = if node.is_some() {
            Status::Within
        } else {
            Status::Empty
        };
        Self { map, node, status }
    }

    /// True while the cursor is positioned on an element, as opposed to a
    /// sentinel position or an empty map.
    pub fn has_current(&self) -> bool {
        self.status == Status::Within
    }

    /// The key of the current element, if there is one.
    pub fn key(&self) -> Option<&'m str> {
        self.current().map(|n| n.key.as_str())
    }

    /// The value of the current element, if there is one.
    pub fn value(&self) -> Option<&'m V> {
        self.current().map(|n| &n.value)
    }

    fn current(&self) -> Option<&'m OrderNode<V>> {
        if self.status != Status::Within {
            return None;
        }
        self.node.map(|n| &self.map.nodes[n])
    }

    /// Step one position toward the newest element.
    ///
    /// From the before-first sentinel this re-enters the list at the element
    /// the cursor left it at; past the last element it parks on the
    /// after-last sentinel and further calls do nothing.
    pub fn advance(&mut self) {
        match self.status {
            Status::BeforeFirst => self.status = Status::Within,
            Status::Within => match self.current().and_then(|n| n.next) {
                Some(next) => self.node = Some(next),
                None => self.status = Status::AfterLast,
            },
            Status::Empty | Status::AfterLast => {}
        }
    }

    /// Step one position toward the oldest element; the exact mirror of
    /// [`advance`](Cursor::advance).
    pub fn retreat(&mut self) {
        match self.status {
            Status::AfterLast => self.status = Status::Within,
            Status::Within => match self.current().and_then(|n| n.prev) {
                Some(prev) => self.node = Some(prev),
                None => self.status = Status::BeforeFirst,
            },
            Status::Empty | Status::BeforeFirst => {}
        }
    }
}
