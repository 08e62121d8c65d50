//! Singly-linked sequence container backing the device's store list.
//!
//! Append is O(1) through a tail link; removal scans from the head. Iteration
//! is a plain [`Iterator`], so exhausting it yields `None` instead of
//! requiring an out-of-band "has more" check.

use core::fmt;
use core::marker::PhantomData;
use core::ptr;

struct Node<T> {
    value: T,
    next: *mut Node<T>,
}

/// Singly-linked list with O(1) tail append.
///
/// Values are owned by the list. Node links are raw pointers; every node is
/// allocated by `push_back` via `Box::into_raw` and freed exactly once, either
/// by a removal or by `clear`/`Drop`.
pub struct SList<T> {
    head: *mut Node<T>,
    tail: *mut Node<T>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

// Raw links make these impls non-derivable; the list owns its nodes outright,
// so it is as thread-compatible as T itself.
unsafe impl<T: Send> Send for SList<T> {}
unsafe impl<T: Sync> Sync for SList<T> {}

impl<T> SList<T> {
    pub fn new() -> Self {
        Self {
            head: ptr::null_mut(),
            tail: ptr::null_mut(),
            len: 0,
            marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` at the tail.
    pub fn push_back(&mut self, value: T) {
        let node = Box::into_raw(Box::new(Node {
            value,
            next: ptr::null_mut(),
        }));
        if self.tail.is_null() {
            self.head = node;
        } else {
            // SAFETY: tail is non-null, so it points at the current last node,
            // which is live until removed or dropped. We hold &mut self.
            unsafe { (*self.tail).next = node };
        }
        self.tail = node;
        self.len += 1;
    }

    /// Removes and returns the first element matching `pred`, scanning from
    /// the head. `None` when nothing matches (including the empty list).
    pub fn remove_first<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut prev: *mut Node<T> = ptr::null_mut();
        let mut cur = self.head;
        while !cur.is_null() {
            // SAFETY: cur was reached by following links from head, so it is a
            // live node owned by this list; &mut self excludes other access.
            unsafe {
                if pred(&(*cur).value) {
                    let node = Box::from_raw(cur);
                    if prev.is_null() {
                        self.head = node.next;
                    } else {
                        (*prev).next = node.next;
                    }
                    if self.tail == cur {
                        self.tail = prev;
                    }
                    self.len -= 1;
                    return Some(node.value);
                }
                prev = cur;
                cur = (*cur).next;
            }
        }
        None
    }

    /// Removes the first element equal to `value`.
    pub fn remove_value(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.remove_first(|v| v == value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cur: self.head,
            marker: PhantomData,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            cur: self.head,
            marker: PhantomData,
        }
    }

    /// Drops every element. Iterative so arbitrarily long lists cannot
    /// overflow the stack.
    pub fn clear(&mut self) {
        let mut cur = self.head;
        while !cur.is_null() {
            // SAFETY: each node in the chain came from Box::into_raw and is
            // freed exactly once here; links are not observed after the free.
            let node = unsafe { Box::from_raw(cur) };
            cur = node.next;
        }
        self.head = ptr::null_mut();
        self.tail = ptr::null_mut();
        self.len = 0;
    }
}

impl<T> Default for SList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for SList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub struct Iter<'a, T> {
    cur: *const Node<T>,
    marker: PhantomData<&'a SList<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cur.is_null() {
            return None;
        }
        // SAFETY: cur points into the list borrowed for 'a; the shared borrow
        // prevents mutation while this iterator is live.
        let node = unsafe { &*self.cur };
        self.cur = node.next;
        Some(&node.value)
    }
}

pub struct IterMut<'a, T> {
    cur: *mut Node<T>,
    marker: PhantomData<&'a mut SList<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.cur.is_null() {
            return None;
        }
        // SAFETY: the exclusive borrow on the list is held for 'a and each
        // node is visited exactly once, so the returned references never
        // alias.
        let node = unsafe { &mut *self.cur };
        self.cur = node.next;
        Some(&mut node.value)
    }
}

impl<'a, T> IntoIterator for &'a SList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
