//! Nullable-handle interface.
//!
//! These functions mirror the queue interface of a C-style test driver: a
//! queue handle may be absent (`None`), and every operation reports failure
//! through its return value instead of an error type:
//!
//! - an absent handle is a no-op returning `false`, `None` or `0`;
//! - an empty queue makes removal and deletion report failure;
//! - a failed allocation makes insertion return `false` with the queue left
//!   unchanged.
//!
//! ```
//! use cyclic_queue::handle;
//!
//! let mut q = handle::new();
//! assert!(handle::insert_tail(q.as_mut(), "hello"));
//!
//! let mut buf = [0u8; 3];
//! let element = handle::remove_head(q.as_mut(), Some(&mut buf[..])).unwrap();
//! assert_eq!(&buf, b"he\0");
//! handle::release(element);
//!
//! assert_eq!(handle::size(q.as_ref()), 0);
//! handle::free(q);
//! assert!(!handle::insert_head(None, "x"));
//! ```

use crate::queue::{Element, Queue};

/// Create an empty queue, or `None` if the sentinel cannot be allocated.
pub fn new() -> Option<Queue> {
    Queue::try_new().ok()
}

/// Release every element of the queue and then the queue itself.
pub fn free(queue: Option<Queue>) {
    match queue {
        Some(queue) => drop(queue),
        None => tracing::debug!("free: no queue"),
    }
}

/// Insert a copy of `s` at the head. Returns `false` if there is no queue or
/// an allocation failed.
pub fn insert_head(queue: Option<&mut Queue>, s: &str) -> bool {
    match queue {
        Some(queue) => queue.insert_head(s).is_ok(),
        None => {
            tracing::debug!("insert_head: no queue");
            false
        }
    }
}

/// Insert a copy of `s` at the tail. Returns `false` if there is no queue or
/// an allocation failed.
pub fn insert_tail(queue: Option<&mut Queue>, s: &str) -> bool {
    match queue {
        Some(queue) => queue.insert_tail(s).is_ok(),
        None => {
            tracing::debug!("insert_tail: no queue");
            false
        }
    }
}

/// Unlink the head element and hand it over. See [`Queue::remove_head`] for
/// how `buf` is filled.
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    queue?.remove_head(buf)
}

/// Unlink the tail element and hand it over. See [`Queue::remove_head`] for
/// how `buf` is filled.
pub fn remove_tail(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    queue?.remove_tail(buf)
}

/// Free an element's string, then its node.
pub fn release(element: Element) {
    element.release()
}

/// Number of elements, `0` if there is no queue.
pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::size)
}

/// Delete the middle element. Returns `false` if there is no queue or it is
/// empty.
pub fn delete_middle(queue: Option<&mut Queue>) -> bool {
    queue.map_or(false, |queue| queue.delete_middle().is_ok())
}

/// Delete every run of adjacent equal strings from a sorted queue. Returns
/// `false` if there is no queue or it is empty.
pub fn delete_duplicates(queue: Option<&mut Queue>) -> bool {
    queue.map_or(false, |queue| queue.delete_duplicates().is_ok())
}

pub fn swap_pairs(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.swap_pairs();
    }
}

pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

pub fn sort(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.sort();
    }
}
