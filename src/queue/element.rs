use crate::error::{QueueError, Result};
use crate::list::Link;
use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

/// A queue entry: the intrusive link followed by the owned string.
///
/// `link` must stay the first field so that a `NonNull<Link>` taken off the
/// ring can be cast back to the entry that embeds it.
#[repr(C)]
pub(crate) struct Entry {
    pub(crate) link: Link,
    pub(crate) value: String,
}

impl Entry {
    /// Allocate a detached entry holding a copy of `s`.
    ///
    /// The node is allocated first and the payload second. If either
    /// allocation fails nothing is leaked and nothing is linked.
    pub(crate) fn try_new(s: &str) -> Result<NonNull<Entry>> {
        let layout = Layout::new::<Entry>();
        // SAFETY: `Entry` is not zero-sized.
        let node = NonNull::new(unsafe { alloc::alloc(layout) }.cast::<Entry>()).ok_or_else(|| {
            tracing::debug!(bytes = layout.size(), "node allocation failed");
            QueueError::AllocFailed {
                what: "node",
                bytes: layout.size(),
            }
        })?;

        let mut value = String::new();
        if value.try_reserve_exact(s.len()).is_err() {
            // SAFETY: `node` came from `alloc` with the same layout and was
            // never initialized, so there is nothing to drop.
            unsafe { alloc::dealloc(node.as_ptr().cast(), layout) };
            tracing::debug!(bytes = s.len(), "payload allocation failed");
            return Err(QueueError::AllocFailed {
                what: "payload",
                bytes: s.len(),
            });
        }
        value.push_str(s);

        // SAFETY: `node` is valid for writes and properly aligned.
        unsafe {
            node.as_ptr().write(Entry {
                link: Link::dangling(),
                value,
            })
        };
        Ok(node)
    }

    #[inline]
    pub(crate) fn link(entry: NonNull<Entry>) -> NonNull<Link> {
        // SAFETY: `entry` is non-null, and so is the address of its first
        // field, which is the entry's own address.
        unsafe { NonNull::new_unchecked(ptr::addr_of_mut!((*entry.as_ptr()).link)) }
    }

    #[inline]
    pub(crate) fn from_link(link: NonNull<Link>) -> NonNull<Entry> {
        link.cast()
    }

    /// # Safety
    ///
    /// `link` must be embedded in a live `Entry` that outlives `'a`.
    #[inline]
    pub(crate) unsafe fn value<'a>(link: NonNull<Link>) -> &'a str {
        &(*Self::from_link(link).as_ptr()).value
    }

    /// # Safety
    ///
    /// Same as [`Entry::value`], and no other reference to the payload may
    /// be alive.
    #[inline]
    pub(crate) unsafe fn value_mut<'a>(link: NonNull<Link>) -> &'a mut String {
        &mut (*Self::from_link(link).as_ptr()).value
    }
}

/// An entry that has been removed from a queue.
///
/// Removing transfers ownership of the entry to the caller, who may read the
/// string and eventually releases it, either with [`Element::release`] or by
/// dropping it. Releasing frees the string first and the node second.
pub struct Element {
    entry: NonNull<Entry>,
    _marker: PhantomData<Box<Entry>>,
}

impl Element {
    /// Take ownership of the entry embedding `link`.
    ///
    /// # Safety
    ///
    /// `link` must belong to a live `Entry` that has already been unlinked
    /// and is owned by nobody else.
    pub(crate) unsafe fn from_link(link: NonNull<Link>) -> Self {
        Self {
            entry: Entry::from_link(link),
            _marker: PhantomData,
        }
    }

    /// The string carried by this element.
    #[inline]
    pub fn value(&self) -> &str {
        // SAFETY: the element owns its entry.
        unsafe { &self.entry.as_ref().value }
    }

    /// Free the node and keep the string.
    pub fn into_string(self) -> String {
        // SAFETY: the entry was allocated with `Layout::new::<Entry>()` by the
        // global allocator, which is what `Box<Entry>` uses.
        let entry = unsafe { Box::from_raw(self.entry.as_ptr()) };
        mem::forget(self);
        entry.value
    }

    /// Free the string, then the node.
    #[inline]
    pub fn release(self) {
        drop(self)
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        // SAFETY: see `into_string`.
        drop(unsafe { Box::from_raw(self.entry.as_ptr()) });
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.value()).finish()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl PartialEq<str> for Element {
    fn eq(&self, other: &str) -> bool {
        self.value() == other
    }
}

impl PartialEq<&str> for Element {
    fn eq(&self, other: &&str) -> bool {
        self.value() == *other
    }
}

unsafe impl Send for Element {}

unsafe impl Sync for Element {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_copies_the_string() {
        let mut source = String::from("payload");
        let entry = Entry::try_new(&source).unwrap();
        source.push_str(" changed");
        let element = unsafe { Element::from_link(Entry::link(entry)) };
        assert_eq!(element.value(), "payload");
        assert_eq!(element, "payload");
    }

    #[test]
    fn entry_empty_string() {
        let entry = Entry::try_new("").unwrap();
        let element = unsafe { Element::from_link(Entry::link(entry)) };
        assert_eq!(element.value(), "");
        element.release();
    }

    #[test]
    fn element_into_string() {
        let entry = Entry::try_new("kept").unwrap();
        let element = unsafe { Element::from_link(Entry::link(entry)) };
        assert_eq!(format!("{:?}", element), "Element(\"kept\")");
        assert_eq!(element.into_string(), "kept");
    }
}
