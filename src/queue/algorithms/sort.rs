use crate::list::{self, Link};
use crate::queue::{Entry, Queue};
use std::cmp::Ordering;
use std::ptr::{self, NonNull};

impl Queue {
    /// Sort the queue in ascending byte-wise order of its strings.
    ///
    /// This sort is stable (i.e., does not reorder equal strings).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time. Nothing
    /// is allocated; the recursion is *O*(log(*n*)) deep.
    ///
    /// # Current Implementation
    ///
    /// The ring is treated as a `next`-only chain ending at the sentinel,
    /// sorted by a top-down merge sort, and then walked once to restore the
    /// `prev` links.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for s in ["pear", "apple", "fig"] {
    ///     queue.insert_tail(s).unwrap();
    /// }
    /// queue.sort();
    /// assert_eq!(queue.to_string(), "[apple fig pear]");
    /// ```
    pub fn sort(&mut self) {
        self.sort_by(|a, b| a.cmp(b))
    }

    /// Sort the queue with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal strings). The
    /// comparator must define a total order, otherwise the resulting order
    /// is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for s in ["bb", "a", "ccc"] {
    ///     queue.insert_tail(s).unwrap();
    /// }
    /// queue.sort_by(|a, b| b.len().cmp(&a.len()));
    /// assert_eq!(queue.to_string(), "[ccc bb a]");
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        let head = self.head();
        // SAFETY: the sentinel heads a well-formed ring of live entries, and
        // `relink` restores it before anyone else can look at it.
        unsafe {
            if list::is_empty(head) || list::is_singular(head) {
                return;
            }
            let mut take_left = |a: &str, b: &str| compare(a, b) != Ordering::Greater;
            let first = merge_sort_chain(head.as_ref().next, head, &mut take_left);
            relink(head, first);
        }
        tracing::trace!("sort");
        self.check_links();
    }
}

/// Merge sort the chain `first..end` linked through `next` only, and return
/// the new first link. The last link of the returned chain points to `end`.
unsafe fn merge_sort_chain<F>(
    first: NonNull<Link>,
    end: NonNull<Link>,
    take_left: &mut F,
) -> NonNull<Link>
where
    F: FnMut(&str, &str) -> bool,
{
    if first == end || first.as_ref().next == end {
        return first;
    }

    // `slow` stops at the last link of the front half.
    let (mut slow, mut fast) = (first, first.as_ref().next);
    while fast != end && fast.as_ref().next != end {
        slow = slow.as_ref().next;
        fast = fast.as_ref().next.as_ref().next;
    }
    let second = slow.as_ref().next;
    slow.as_mut().next = end;

    let left = merge_sort_chain(first, end, take_left);
    let right = merge_sort_chain(second, end, take_left);
    merge(left, right, end, take_left)
}

/// Merge two non-empty sorted chains ending at `end`. On ties the link from
/// `left` goes first.
unsafe fn merge<F>(
    mut left: NonNull<Link>,
    mut right: NonNull<Link>,
    end: NonNull<Link>,
    take_left: &mut F,
) -> NonNull<Link>
where
    F: FnMut(&str, &str) -> bool,
{
    let mut first = end;
    let mut tail: *mut NonNull<Link> = &mut first;
    loop {
        if take_left(Entry::value(left), Entry::value(right)) {
            *tail = left;
            tail = ptr::addr_of_mut!((*left.as_ptr()).next);
            left = left.as_ref().next;
            if left == end {
                *tail = right;
                break;
            }
        } else {
            *tail = right;
            tail = ptr::addr_of_mut!((*right.as_ptr()).next);
            right = right.as_ref().next;
            if right == end {
                *tail = left;
                break;
            }
        }
    }
    first
}

/// Hang the chain starting at `first` back under `head` and rebuild every
/// `prev` link, closing the ring.
unsafe fn relink(mut head: NonNull<Link>, first: NonNull<Link>) {
    head.as_mut().next = first;
    let (mut prev, mut cur) = (head, first);
    while cur != head {
        cur.as_mut().prev = prev;
        prev = cur;
        cur = cur.as_ref().next;
    }
    head.as_mut().prev = prev;
}

#[cfg(test)]
mod tests {
    use crate::list;
    use crate::queue::tests::{queue_of, values};

    #[test]
    fn sort_small() {
        fn check(input: &[&str]) {
            let mut queue = queue_of(input);
            queue.sort();
            let mut expected = input.to_vec();
            expected.sort();
            assert_eq!(values(&queue), expected);
            queue.assert_valid();
        }
        check(&[]);
        check(&["a"]);
        check(&["b", "a"]);
        check(&["a", "b"]);
        check(&["c", "a", "b"]);
        check(&["d", "c", "b", "a", "d", "a"]);
        check(&["", "b", "", "ab", "a"]);
    }

    #[test]
    fn sort_bytewise() {
        let mut queue = queue_of(&["b", "B", "a", "A", "é", "z"]);
        queue.sort();
        assert_eq!(values(&queue), ["A", "B", "a", "b", "z", "é"]);
    }

    #[test]
    fn sort_large() {
        let mut state = 0x2545_f491_u32;
        let input: Vec<String> = (0..1000)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                format!("{:03}", (state >> 16) % 500)
            })
            .collect();
        let input: Vec<&str> = input.iter().map(String::as_str).collect();

        let mut queue = queue_of(&input);
        queue.sort();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(values(&queue), expected);
        queue.assert_valid();

        queue.sort();
        assert_eq!(values(&queue), expected);
    }

    #[test]
    fn sort_is_stable() {
        let mut queue = queue_of(&["b", "a", "b", "a", "b"]);
        let before: Vec<_> = unsafe { list::links(queue.head()) }.collect();
        queue.sort();
        let after: Vec<_> = unsafe { list::links(queue.head()) }.collect();
        assert_eq!(values(&queue), ["a", "a", "b", "b", "b"]);
        assert_eq!(after, [before[1], before[3], before[0], before[2], before[4]]);
    }

    #[test]
    fn sort_by_reverse() {
        let mut queue = queue_of(&["a", "c", "b"]);
        queue.sort_by(|a, b| b.cmp(a));
        assert_eq!(values(&queue), ["c", "b", "a"]);
        queue.assert_valid();
    }
}
