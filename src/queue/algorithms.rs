use crate::error::{QueueError, Result};
use crate::list::{self, Link};
use crate::queue::{Entry, Queue};
use std::mem;
use std::ptr::NonNull;

mod sort;

impl Queue {
    /// Delete the middle element.
    ///
    /// Two cursors walk inward from both ends; the one coming from the head
    /// is deleted once they meet or become adjacent. That is index
    /// ⌈*n* / 2⌉ - 1 from the head, i.e. the lower middle of an even-length
    /// queue and the exact middle of an odd-length one.
    ///
    /// Returns [`QueueError::Empty`] if there is nothing to delete.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for s in ["a", "b", "c", "d", "e", "f"] {
    ///     queue.insert_tail(s).unwrap();
    /// }
    /// queue.delete_middle().unwrap();
    /// assert_eq!(queue.to_string(), "[a b d e f]");
    /// ```
    pub fn delete_middle(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        // SAFETY: the queue is not empty, so the middle is an element link.
        unsafe {
            let mid = find_mid(self.head());
            self.delete(mid);
        }
        tracing::trace!("delete_middle");
        self.check_links();
        Ok(())
    }

    /// Delete every element whose string equals an adjacent one.
    ///
    /// The queue is expected to be sorted (see [`Queue::sort`]), which makes
    /// equal strings adjacent; this is not checked. Each maximal run of two
    /// or more equal neighbours is removed entirely. On an unsorted queue
    /// only runs of adjacent equal strings are removed, and equal strings
    /// that are not neighbours all survive.
    ///
    /// Returns [`QueueError::Empty`] on an empty queue, and `Ok` otherwise
    /// even when nothing was deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for s in ["a", "a", "b", "c", "c"] {
    ///     queue.insert_tail(s).unwrap();
    /// }
    /// queue.delete_duplicates().unwrap();
    /// assert_eq!(queue.to_string(), "[b]");
    /// ```
    pub fn delete_duplicates(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        let head = self.head();
        let mut in_run = false;
        let mut removed = 0_usize;
        // SAFETY: only the link just yielded is deleted, and its successor
        // is still linked when it is compared.
        unsafe {
            for link in list::links_safe(head) {
                let next = link.as_ref().next;
                if next != head && Entry::value(link) == Entry::value(next) {
                    in_run = true;
                    self.delete(link);
                    removed += 1;
                } else if in_run {
                    in_run = false;
                    self.delete(link);
                    removed += 1;
                }
            }
        }
        tracing::trace!(removed, "delete_duplicates");
        self.check_links();
        Ok(())
    }

    /// Swap every two adjacent elements, head first.
    ///
    /// Only links move; no string is copied and nothing is allocated. In an
    /// odd-length queue the last element stays where it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for s in ["a", "b", "c"] {
    ///     queue.insert_tail(s).unwrap();
    /// }
    /// queue.swap_pairs();
    /// assert_eq!(queue.to_string(), "[b a c]");
    /// ```
    pub fn swap_pairs(&mut self) {
        let head = self.head();
        // SAFETY: `cur` and its successor are element links of this queue
        // whenever the loop body runs.
        unsafe {
            let mut cur = head.as_ref().next;
            while cur != head && cur.as_ref().next != head {
                let next = cur.as_ref().next;
                list::del(cur);
                list::add(cur, next);
                cur = cur.as_ref().next;
            }
        }
        tracing::trace!("swap_pairs");
        self.check_links();
    }

    /// Reverse the order of the strings.
    ///
    /// The nodes keep their places in the ring; the cursors walk inward from
    /// both ends and exchange the strings they point at.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for s in ["a", "b", "c"] {
    ///     queue.insert_tail(s).unwrap();
    /// }
    /// queue.reverse();
    /// assert_eq!(queue.to_string(), "[c b a]");
    /// ```
    pub fn reverse(&mut self) {
        if self.is_empty() {
            return;
        }
        let (mut forward, mut backward) = (self.front_link(), self.back_link());
        // SAFETY: `forward != backward` inside the loop, so the two mutable
        // borrows are of distinct entries.
        unsafe {
            while forward != backward {
                mem::swap(Entry::value_mut(forward), Entry::value_mut(backward));
                forward = forward.as_ref().next;
                if forward == backward {
                    break;
                }
                backward = backward.as_ref().prev;
            }
        }
        tracing::trace!("reverse");
    }
}

/// Walk two cursors inward from both ends of a non-empty ring until they
/// meet or become adjacent, and return the one that started at the front.
unsafe fn find_mid(head: NonNull<Link>) -> NonNull<Link> {
    let (mut forward, mut backward) = (head.as_ref().next, head.as_ref().prev);
    while forward != backward && forward.as_ref().next != backward {
        forward = forward.as_ref().next;
        backward = backward.as_ref().prev;
    }
    forward
}

#[cfg(test)]
mod tests {
    use crate::error::QueueError;
    use crate::queue::tests::{queue_of, values};
    use crate::queue::Queue;

    #[test]
    fn delete_middle_even_and_odd() {
        let mut queue = queue_of(&["a", "b", "c", "d", "e", "f"]);
        queue.delete_middle().unwrap();
        assert_eq!(values(&queue), ["a", "b", "d", "e", "f"]);
        queue.delete_middle().unwrap();
        assert_eq!(values(&queue), ["a", "b", "e", "f"]);
        queue.delete_middle().unwrap();
        assert_eq!(values(&queue), ["a", "e", "f"]);
        queue.delete_middle().unwrap();
        assert_eq!(values(&queue), ["a", "f"]);
        queue.delete_middle().unwrap();
        assert_eq!(values(&queue), ["f"]);
        queue.delete_middle().unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.delete_middle(), Err(QueueError::Empty));
        queue.assert_valid();
    }

    #[test]
    fn delete_duplicates_removes_whole_runs() {
        fn check(input: &[&str], expected: &[&str]) {
            let mut queue = queue_of(input);
            queue.delete_duplicates().unwrap();
            assert_eq!(values(&queue), expected, "input {:?}", input);
            queue.assert_valid();
        }
        check(&["a", "a", "b", "c", "c"], &["b"]);
        check(&["a", "b", "c"], &["a", "b", "c"]);
        check(&["a", "a", "a"], &[]);
        check(&["a"], &["a"]);
        check(&["a", "b", "b", "b", "c", "d", "d"], &["a", "c"]);
        check(&["x", "x", "y", "y"], &[]);
    }

    #[test]
    fn delete_duplicates_unsorted_only_touches_neighbours() {
        let mut queue = queue_of(&["b", "a", "a", "b"]);
        queue.delete_duplicates().unwrap();
        assert_eq!(values(&queue), ["b", "b"]);
    }

    #[test]
    fn delete_duplicates_empty() {
        let mut queue = Queue::new();
        assert_eq!(queue.delete_duplicates(), Err(QueueError::Empty));
    }

    #[test]
    fn swap_pairs_even_odd_and_short() {
        let mut queue = queue_of(&["a", "b", "c", "d"]);
        queue.swap_pairs();
        assert_eq!(values(&queue), ["b", "a", "d", "c"]);

        let mut queue = queue_of(&["a", "b", "c"]);
        queue.swap_pairs();
        assert_eq!(values(&queue), ["b", "a", "c"]);
        queue.assert_valid();

        let mut queue = queue_of(&["a"]);
        queue.swap_pairs();
        assert_eq!(values(&queue), ["a"]);

        let mut queue = queue_of(&[]);
        queue.swap_pairs();
        assert!(queue.is_empty());
    }

    #[test]
    fn reverse_keeps_nodes_in_place() {
        let mut queue = queue_of(&["a", "b", "c", "d", "e"]);
        let before: Vec<_> = unsafe { crate::list::links(queue.head()) }.collect();
        queue.reverse();
        let after: Vec<_> = unsafe { crate::list::links(queue.head()) }.collect();
        assert_eq!(before, after);
        assert_eq!(values(&queue), ["e", "d", "c", "b", "a"]);

        queue.reverse();
        assert_eq!(values(&queue), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn reverse_short() {
        for n in 0..4 {
            let input: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            let input: Vec<&str> = input.iter().map(String::as_str).collect();
            let mut queue = queue_of(&input);
            queue.reverse();
            let mut expected = input.clone();
            expected.reverse();
            assert_eq!(values(&queue), expected);
        }
    }
}
