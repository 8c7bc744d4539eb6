use crate::list::{self, Links};
use crate::queue::{Entry, Queue};
use std::fmt;
use std::iter::FusedIterator;

/// An iterator over the strings of a `Queue`, head to tail.
///
/// Though the `Iter` does not hold a reference to the queue, it borrows it
/// immutably through its lifetime, so the queue cannot be modified while the
/// iterator is alive.
///
/// # Examples
///
/// ```compile_fail
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("a").unwrap();
/// let mut iter = queue.iter();
///
/// // Won't compile, because the queue is already borrowed immutably.
/// queue.insert_tail("b").unwrap();
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a> {
    links: Links<'a>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(queue: &'a Queue) -> Self {
        // SAFETY: the borrow of `queue` keeps the ring unmodified for `'a`.
        let links = unsafe { list::links(queue.head()) };
        Self { links }
    }
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.links).finish()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: every link but the sentinel is embedded in a live entry.
        self.links.next().map(|link| unsafe { Entry::value(link) })
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        // SAFETY: every link but the sentinel is embedded in a live entry.
        self.links.next_back().map(|link| unsafe { Entry::value(link) })
    }
}

impl<'a> FusedIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
