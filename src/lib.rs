//! This crate provides a queue of owned strings, implemented as an intrusive
//! circular doubly-linked list with a sentinel node.
//!
//! The [`Queue`] inserts and removes at both ends in constant time. On top
//! of that it offers a few whole-list transformations: deleting the middle
//! element, deleting runs of duplicates, swapping adjacent pairs, reversing
//! and a stable merge sort.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::new();
//! for s in ["dog", "cat", "cat", "ant", "emu"] {
//!     queue.insert_tail(s).unwrap();
//! }
//!
//! queue.sort(); // [ant cat cat dog emu]
//! queue.delete_duplicates().unwrap();
//! assert_eq!(queue.to_string(), "[ant dog emu]");
//!
//! queue.reverse();
//! let element = queue.remove_head(None).unwrap();
//! assert_eq!(element.value(), "emu");
//! element.release();
//!
//! assert_eq!(queue.size(), 2);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the queue is like the following graph:
//! ```text
//!          ┌──────────────────────────────────────────────────────────────────┐
//!          ↓                                                      Sentinel    │
//!    ╔═══════════╗           ╔═══════════╗                      ┌──────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ──────→ │   next   │ ─┘
//!    ╟───────────╢           ╟───────────╢     Entry 2, 3, ...  ├──────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←────── │   prev   │
//! │  ╟───────────╢           ╟───────────╢                      └──────────┘
//! │  ║  String   ║           ║  String   ║                          ↑   ↑
//! │  ╚═══════════╝           ╚═══════════╝                          │   │
//! │     Entry 0                 Entry 1                             │   │
//! └─────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                         │
//! ║   head    ║ ────────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     Queue
//! ```
//! The `Queue` holds nothing but a pointer to its sentinel link. The size is
//! counted by walking the ring, never cached.
//!
//! Each entry is a heap node whose first field is the [`Link`] (the `next` and
//! `prev` pointers), followed by the owned `String`. The link substrate in
//! [`list`] knows nothing about the payload; the queue recovers an entry from
//! its link by a cast.
//!
//! # Ownership
//!
//! - Inserting copies the caller's string into a new entry.
//! - Removing ([`Queue::remove_head`], [`Queue::remove_tail`]) unlinks an
//!   entry and hands it to the caller as an [`Element`].
//! - Releasing an [`Element`] (or dropping it) frees the string, then the
//!   node. Dropping the `Queue` releases everything still linked, then the
//!   sentinel.
//!
//! Insertion allocates fallibly: when the node or the string cannot be
//! allocated, [`QueueError::AllocFailed`] is returned and the queue is left
//! as it was.
//!
//! # Nullable Handles
//!
//! [`handle`] exposes the same operations over `Option` handles with
//! `bool`/`Option` results, for drivers that model an absent queue.
//!
//! # Features
//!
//! - `check-links`: after every mutating operation, walk the whole ring and
//!   assert that each link's neighbours point back at it.
//!
//! [`Queue`]: crate::Queue
//! [`Element`]: crate::Element
//! [`Link`]: crate::list::Link
//! [`QueueError::AllocFailed`]: crate::QueueError::AllocFailed

#[doc(inline)]
pub use error::{QueueError, Result};
#[doc(inline)]
pub use queue::{Element, Iter, Queue};

pub mod error;
pub mod handle;
pub mod list;
pub mod queue;
