//! The intrusive link substrate.
//!
//! A [`Link`] is a bare pair of `next`/`prev` pointers. It carries no payload
//! and owns nothing: a structure that wants to live on a list embeds a `Link`
//! as its first field (see [`crate::queue`]) and recovers itself from the link
//! pointer by a cast.
//!
//! One distinguished link acts as the sentinel ("head") of a list. An empty
//! list is a head whose `next` and `prev` both point to itself:
//! ```text
//!      ┌──────────┐
//!      ↓          │
//!   ╔══════╗      │
//!   ║ next ║ ─────┘
//!   ╟──────╢
//!   ║ prev ║ ─────┐
//!   ╚══════╝      │
//!      ↑          │
//!      └──────────┘
//! ```
//!
//! Every function here is *O*(1) except the iterators, allocates nothing,
//! and is `unsafe`: the caller guarantees that every pointer passed in is
//! live and, where noted, linked into a well-formed ring.

use std::ptr::NonNull;

pub mod iterator;

pub use iterator::{Links, LinksSafe};

/// A node of a circular doubly-linked list.
#[repr(C)]
#[derive(Debug)]
pub struct Link {
    pub(crate) next: NonNull<Link>,
    pub(crate) prev: NonNull<Link>,
}

impl Link {
    /// A link whose pointers are dangling. It must be passed to [`init`] or
    /// linked by [`add`]/[`add_tail`] before anything reads it.
    pub const fn dangling() -> Self {
        Self {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
        }
    }

    #[inline]
    pub fn next(&self) -> NonNull<Link> {
        self.next
    }

    #[inline]
    pub fn prev(&self) -> NonNull<Link> {
        self.prev
    }
}

/// Make `node` a self-circular singleton, i.e. an empty list head.
///
/// # Safety
///
/// `node` must be valid for writes.
#[inline]
pub unsafe fn init(mut node: NonNull<Link>) {
    node.as_mut().next = node;
    node.as_mut().prev = node;
}

/// Link `prev -> next` and `prev <- next`.
///
/// # Safety
///
/// Both pointers must be valid for writes. Whatever used to sit between
/// them is cut out of the ring without being touched.
#[inline]
pub unsafe fn connect(mut prev: NonNull<Link>, mut next: NonNull<Link>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

/// Link `new` immediately after `head`.
///
/// # Safety
///
/// `head` must be linked into a well-formed ring and `new` must not be
/// linked into any ring.
#[inline]
pub unsafe fn add(new: NonNull<Link>, head: NonNull<Link>) {
    insert_between(new, head, head.as_ref().next);
}

/// Link `new` immediately before `head`. On a list head this appends at the
/// tail.
///
/// # Safety
///
/// Same as [`add`].
#[inline]
pub unsafe fn add_tail(new: NonNull<Link>, head: NonNull<Link>) {
    insert_between(new, head.as_ref().prev, head);
}

unsafe fn insert_between(new: NonNull<Link>, prev: NonNull<Link>, next: NonNull<Link>) {
    #[cfg(debug_assertions)]
    assert_adjacent(prev, next);
    connect(prev, new);
    connect(new, next);
    #[cfg(debug_assertions)]
    {
        assert_adjacent(prev, new);
        assert_adjacent(new, next);
    }
}

/// Splice `node` out of its ring.
///
/// The pointers of `node` itself are left stale: they must not be followed
/// until the node is linked again or reinitialized.
///
/// # Safety
///
/// `node` must be linked into a well-formed ring and must not be the head of
/// that ring.
#[inline]
pub unsafe fn del(node: NonNull<Link>) {
    let (prev, next) = (node.as_ref().prev, node.as_ref().next);
    #[cfg(debug_assertions)]
    {
        assert_adjacent(prev, node);
        assert_adjacent(node, next);
    }
    connect(prev, next);
}

/// Returns `true` if the ring headed by `head` has no other node.
///
/// # Safety
///
/// `head` must be valid for reads.
#[inline]
pub unsafe fn is_empty(head: NonNull<Link>) -> bool {
    head.as_ref().next == head
}

/// Returns `true` if the ring headed by `head` has exactly one other node.
///
/// # Safety
///
/// `head` must be valid for reads.
#[inline]
pub unsafe fn is_singular(head: NonNull<Link>) -> bool {
    !is_empty(head) && head.as_ref().next == head.as_ref().prev
}

/// Iterate every node of the ring headed by `head`, excluding `head`.
///
/// # Safety
///
/// The ring must stay well-formed and unmodified for `'a`.
#[inline]
pub unsafe fn links<'a>(head: NonNull<Link>) -> Links<'a> {
    Links::new(head)
}

/// Like [`links`], but the node just yielded may be unlinked (and freed)
/// before the next call to `next`.
///
/// # Safety
///
/// Apart from unlinking the node most recently yielded, the ring must stay
/// well-formed and unmodified for `'a`.
#[inline]
pub unsafe fn links_safe<'a>(head: NonNull<Link>) -> LinksSafe<'a> {
    LinksSafe::new(head)
}

/// Walk the whole ring and panic on the first node whose neighbours do not
/// point back at it.
///
/// # Safety
///
/// Every node reachable from `head` must be live.
pub unsafe fn assert_ring(head: NonNull<Link>) {
    let mut node = head;
    loop {
        let next = node.as_ref().next;
        assert_eq!(
            next.as_ref().prev,
            node,
            "broken ring: {:?}.next.prev != itself",
            node
        );
        node = next;
        if node == head {
            break;
        }
    }
}

#[cfg(debug_assertions)]
fn assert_adjacent(prev: NonNull<Link>, next: NonNull<Link>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ring {
        head: Box<Link>,
        nodes: Vec<Box<Link>>,
    }

    impl Ring {
        fn new(n: usize) -> Self {
            let mut head = Box::new(Link::dangling());
            unsafe { init(NonNull::from(head.as_mut())) };
            let mut nodes: Vec<_> = (0..n).map(|_| Box::new(Link::dangling())).collect();
            for node in nodes.iter_mut() {
                unsafe { add_tail(NonNull::from(node.as_mut()), NonNull::from(head.as_mut())) };
            }
            Self { head, nodes }
        }

        fn head(&mut self) -> NonNull<Link> {
            NonNull::from(self.head.as_mut())
        }

        fn node(&mut self, i: usize) -> NonNull<Link> {
            NonNull::from(self.nodes[i].as_mut())
        }

        /// Positions in `nodes` of the linked nodes, in ring order.
        fn order(&mut self) -> Vec<usize> {
            let head = self.head();
            let addrs: Vec<_> = (0..self.nodes.len()).map(|i| self.node(i)).collect();
            unsafe { links(head) }
                .map(|link| addrs.iter().position(|&a| a == link).unwrap())
                .collect()
        }
    }

    #[test]
    fn link_init_is_empty() {
        let mut ring = Ring::new(0);
        let head = ring.head();
        unsafe {
            assert!(is_empty(head));
            assert!(!is_singular(head));
            assert_eq!(links(head).count(), 0);
            assert_ring(head);
        }
    }

    #[test]
    fn link_add_and_add_tail() {
        let mut ring = Ring::new(3);
        assert_eq!(ring.order(), vec![0, 1, 2]);

        let mut extra = Box::new(Link::dangling());
        let extra = NonNull::from(extra.as_mut());
        let head = ring.head();
        unsafe {
            add(extra, head);
            assert_eq!(head.as_ref().next, extra);
            del(extra);
            add_tail(extra, head);
            assert_eq!(head.as_ref().prev, extra);
            del(extra);
            assert_ring(head);
        }
        assert_eq!(ring.order(), vec![0, 1, 2]);
    }

    #[test]
    fn link_del() {
        let mut ring = Ring::new(4);
        let (head, second) = (ring.head(), ring.node(1));
        unsafe {
            del(second);
            assert_ring(head);
        }
        assert_eq!(ring.order(), vec![0, 2, 3]);

        for i in [0, 2, 3] {
            let node = ring.node(i);
            unsafe { del(node) };
        }
        unsafe {
            assert!(is_empty(head));
            assert_ring(head);
        }
    }

    #[test]
    fn link_singular() {
        let mut ring = Ring::new(1);
        let head = ring.head();
        unsafe { assert!(is_singular(head)) };
    }

    #[test]
    fn link_iter_both_ends() {
        let mut ring = Ring::new(3);
        let head = ring.head();
        let forward: Vec<_> = unsafe { links(head) }.collect();
        let mut backward: Vec<_> = unsafe { links(head) }.rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 3);
    }

    #[test]
    fn link_iter_safe_unlinks_current() {
        let mut ring = Ring::new(5);
        let head = ring.head();
        let mut seen = 0;
        for (i, link) in unsafe { links_safe(head) }.enumerate() {
            seen += 1;
            if i % 2 == 0 {
                unsafe { del(link) };
            }
        }
        assert_eq!(seen, 5);
        assert_eq!(ring.order(), vec![1, 3]);
        unsafe { assert_ring(head) };
    }
}
