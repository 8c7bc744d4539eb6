use std::alloc::{self, Layout};
use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{QueueError, Result};
use crate::list::{self, Link};

pub use element::Element;
pub use iterator::Iter;

pub(crate) use element::Entry;

mod algorithms;
mod element;
mod iterator;

/// A queue of owned strings, kept on a circular doubly-linked list headed by
/// a sentinel link.
///
/// Both ends are reachable from the sentinel, so inserting or removing at
/// either end is *O*(1). There is no length field: [`Queue::size`] walks the
/// list.
///
/// The queue exclusively owns every linked entry. [`Queue::remove_head`] and
/// [`Queue::remove_tail`] hand one entry over to the caller as an
/// [`Element`]; dropping the queue releases everything still linked, then
/// the sentinel.
pub struct Queue {
    head: NonNull<Link>,
    _marker: PhantomData<Box<Entry>>,
}

// private methods
impl Queue {
    #[inline]
    pub(crate) fn head(&self) -> NonNull<Link> {
        self.head
    }

    #[inline]
    pub(crate) fn front_link(&self) -> NonNull<Link> {
        // SAFETY: the sentinel is live for as long as the queue is.
        unsafe { self.head.as_ref().next }
    }

    #[inline]
    pub(crate) fn back_link(&self) -> NonNull<Link> {
        // SAFETY: the sentinel is live for as long as the queue is.
        unsafe { self.head.as_ref().prev }
    }

    /// Splice the entry embedding `link` out of the queue and hand it over.
    ///
    /// # Safety
    ///
    /// `link` must be an element link of this queue (not the sentinel).
    pub(crate) unsafe fn unlink(&mut self, link: NonNull<Link>) -> Element {
        list::del(link);
        Element::from_link(link)
    }

    /// Unlink the entry embedding `link` and release it.
    ///
    /// # Safety
    ///
    /// Same as [`Queue::unlink`].
    pub(crate) unsafe fn delete(&mut self, link: NonNull<Link>) {
        self.unlink(link).release();
    }

    #[inline]
    pub(crate) fn check_links(&self) {
        #[cfg(feature = "check-links")]
        self.assert_valid();
    }
}

impl Queue {
    /// Create an empty queue, reporting a failed sentinel allocation as an
    /// error.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let queue = Queue::try_new().unwrap();
    /// assert!(queue.is_empty());
    /// ```
    pub fn try_new() -> Result<Self> {
        let layout = Layout::new::<Link>();
        // SAFETY: `Link` is not zero-sized.
        let head = NonNull::new(unsafe { alloc::alloc(layout) }.cast::<Link>()).ok_or_else(|| {
            tracing::debug!(bytes = layout.size(), "sentinel allocation failed");
            QueueError::AllocFailed {
                what: "sentinel",
                bytes: layout.size(),
            }
        })?;
        // SAFETY: `head` is valid for writes and properly aligned.
        unsafe {
            head.as_ptr().write(Link::dangling());
            list::init(head);
        }
        Ok(Self::from_head(head))
    }

    /// Create an empty queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let queue = Queue::new();
    /// assert_eq!(queue.size(), 0);
    /// ```
    pub fn new() -> Self {
        let head = NonNull::from(Box::leak(Box::new(Link::dangling())));
        // SAFETY: `head` was just leaked from a box.
        unsafe { list::init(head) };
        Self::from_head(head)
    }

    fn from_head(head: NonNull<Link>) -> Self {
        Self {
            head,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the queue holds no element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        // SAFETY: the sentinel is live for as long as the queue is.
        unsafe { list::is_empty(self.head) }
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time: the size is counted,
    /// never cached.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("a").unwrap();
    /// queue.insert_tail("b").unwrap();
    /// assert_eq!(queue.size(), 2);
    /// ```
    pub fn size(&self) -> usize {
        // SAFETY: `&self` keeps the ring unmodified during the walk.
        unsafe { list::links(self.head) }.count()
    }

    /// Provides the string at the head, or `None` if the queue is empty.
    pub fn front(&self) -> Option<&str> {
        self.iter().next()
    }

    /// Provides the string at the tail, or `None` if the queue is empty.
    pub fn back(&self) -> Option<&str> {
        self.iter().next_back()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Insert a copy of `s` at the head.
    ///
    /// The string is copied; the queue never keeps a reference to `s`. If
    /// either the node or the string storage cannot be allocated, the error
    /// is returned and the queue is left untouched.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time, plus the copy of `s`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_head("b").unwrap();
    /// queue.insert_head("a").unwrap();
    /// assert_eq!(queue.front(), Some("a"));
    /// ```
    pub fn insert_head(&mut self, s: &str) -> Result<()> {
        let entry = Entry::try_new(s)?;
        // SAFETY: `entry` is fresh and the sentinel heads a well-formed ring.
        unsafe { list::add(Entry::link(entry), self.head) };
        tracing::trace!(len = s.len(), "insert_head");
        self.check_links();
        Ok(())
    }

    /// Insert a copy of `s` at the tail. See [`Queue::insert_head`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("a").unwrap();
    /// queue.insert_tail("b").unwrap();
    /// assert_eq!(queue.back(), Some("b"));
    /// ```
    pub fn insert_tail(&mut self, s: &str) -> Result<()> {
        let entry = Entry::try_new(s)?;
        // SAFETY: `entry` is fresh and the sentinel heads a well-formed ring.
        unsafe { list::add_tail(Entry::link(entry), self.head) };
        tracing::trace!(len = s.len(), "insert_tail");
        self.check_links();
        Ok(())
    }

    /// Unlink the head element and hand it over, or return `None` if the
    /// queue is empty.
    ///
    /// When `buf` is given it is zero-filled and then receives the first
    /// `buf.len() - 1` bytes of the string at most, so the copy is always
    /// NUL-terminated. An empty buffer receives nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("hello").unwrap();
    ///
    /// let mut buf = [0xff; 3];
    /// let element = queue.remove_head(Some(&mut buf[..])).unwrap();
    /// assert_eq!(&buf, b"he\0");
    /// assert_eq!(element.value(), "hello");
    /// element.release();
    /// ```
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the queue is not empty, so the front link is an element.
        let element = unsafe { self.unlink(self.front_link()) };
        tracing::trace!(len = element.value().len(), "remove_head");
        copy_out(element.value(), buf);
        self.check_links();
        Some(element)
    }

    /// Unlink the tail element and hand it over. See [`Queue::remove_head`].
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the queue is not empty, so the back link is an element.
        let element = unsafe { self.unlink(self.back_link()) };
        tracing::trace!(len = element.value().len(), "remove_tail");
        copy_out(element.value(), buf);
        self.check_links();
        Some(element)
    }

    /// Release every element, leaving the queue empty.
    pub fn clear(&mut self) {
        // SAFETY: each yielded link is deleted before the iterator moves on,
        // which `links_safe` allows.
        unsafe {
            for link in list::links_safe(self.head) {
                self.delete(link);
            }
            list::init(self.head);
        }
    }

    /// Walk the whole ring and panic unless every link's neighbours point
    /// back at it.
    pub fn assert_valid(&self) {
        // SAFETY: every linked entry is owned by the queue and live.
        unsafe { list::assert_ring(self.head) }
    }
}

/// Zero-fill `buf` and copy at most `buf.len() - 1` bytes of `value` into it.
fn copy_out(value: &str, buf: Option<&mut [u8]>) {
    if let Some(buf) = buf {
        for byte in buf.iter_mut() {
            *byte = 0;
        }
        let n = value.len().min(buf.len().saturating_sub(1));
        buf[..n].copy_from_slice(&value.as_bytes()[..n]);
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Display for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(value)?;
        }
        f.write_str("]")
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the sentinel was allocated by the global allocator with
        // `Layout::new::<Link>()` in either constructor and nothing links to
        // it any more.
        drop(unsafe { Box::from_raw(self.head.as_ptr()) });
    }
}

unsafe impl Send for Queue {}

unsafe impl Sync for Queue {}
