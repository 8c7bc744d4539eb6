use crate::list::Link;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A raw iterator over the links of a ring, excluding its head.
///
/// It uses a pair of links `start..end` to represent the half-open range
/// still to be yielded, where `start` is inclusive and `end` is not. Both
/// ends start out at the head, so the iterator is double-ended, fused and
/// non-cyclic.
#[derive(Clone)]
pub struct Links<'a> {
    start: NonNull<Link>,
    end: NonNull<Link>,
    _marker: PhantomData<&'a Link>,
}

impl<'a> Links<'a> {
    pub(crate) unsafe fn new(head: NonNull<Link>) -> Self {
        Self {
            start: head.as_ref().next,
            end: head,
            _marker: PhantomData,
        }
    }
}

impl fmt::Debug for Links<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Links")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl<'a> Iterator for Links<'a> {
    type Item = NonNull<Link>;

    /// Return `start` and reset the range to `(start.next)..end`, or return
    /// `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let current = self.start;
        // SAFETY: `start..end` is a non-empty range of a well-formed ring.
        self.start = unsafe { current.as_ref().next };
        Some(current)
    }
}

impl<'a> DoubleEndedIterator for Links<'a> {
    /// Reset the range to `start..(end.prev)` and return the new `end`, or
    /// return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is a non-empty range of a well-formed ring.
        self.end = unsafe { self.end.as_ref().prev };
        Some(self.end)
    }
}

impl<'a> FusedIterator for Links<'a> {}

/// A raw forward iterator that tolerates unlinking the link it just
/// yielded.
///
/// The successor is read *before* the current link is handed out, so the
/// caller may splice the yielded link out (or free it) before asking for the
/// next one. Unlinking any other link during iteration is not allowed.
pub struct LinksSafe<'a> {
    head: NonNull<Link>,
    next: NonNull<Link>,
    _marker: PhantomData<&'a Link>,
}

impl<'a> LinksSafe<'a> {
    pub(crate) unsafe fn new(head: NonNull<Link>) -> Self {
        Self {
            head,
            next: head.as_ref().next,
            _marker: PhantomData,
        }
    }
}

impl fmt::Debug for LinksSafe<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinksSafe")
            .field("head", &self.head)
            .field("next", &self.next)
            .finish()
    }
}

impl<'a> Iterator for LinksSafe<'a> {
    type Item = NonNull<Link>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.head {
            return None;
        }
        let current = self.next;
        // SAFETY: `current` is still linked, nothing has been done to it yet.
        self.next = unsafe { current.as_ref().next };
        Some(current)
    }
}

impl<'a> FusedIterator for LinksSafe<'a> {}
