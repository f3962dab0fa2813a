//! Generic algorithms over handle ranges
//!
//! Each function walks `[first, last)` one step at a time, the way the
//! classic forward-iterator algorithms do, and works for handles of either
//! container kind and either access level. A walk also stops at the end
//! sentinel, so a `last` that is never reached cannot loop forever.

use crate::handle::{Access, Handle, IterMut};

fn in_range<'a, T: 'a, A: Access, B: Access>(
    it: &Handle<'a, T, A>,
    last: &Handle<'a, T, B>,
) -> bool {
    it != last && !it.is_end()
}

/// First position in `[first, last)` whose element satisfies `pred`, or the
/// position where the walk stopped.
pub fn find_if<'a, T, A, B, P>(
    first: Handle<'a, T, A>,
    last: &Handle<'a, T, B>,
    mut pred: P,
) -> Handle<'a, T, A>
where
    T: 'a,
    A: Access,
    B: Access,
    P: FnMut(&T) -> bool,
{
    let mut it = first;
    while in_range(&it, last) {
        if pred(&*it.get()) {
            break;
        }
        it.advance();
    }
    it
}

/// Number of elements in `[first, last)` satisfying `pred`
pub fn count_if<'a, T, A, B, P>(
    first: Handle<'a, T, A>,
    last: &Handle<'a, T, B>,
    mut pred: P,
) -> usize
where
    T: 'a,
    A: Access,
    B: Access,
    P: FnMut(&T) -> bool,
{
    let mut it = first;
    let mut count = 0;
    while in_range(&it, last) {
        if pred(&*it.get()) {
            count += 1;
        }
        it.advance();
    }
    count
}

/// Overwrite every element in `[first, last)` satisfying `pred` with a clone
/// of `new_value`; returns how many were replaced.
pub fn replace_if<'a, T, B, P>(
    first: IterMut<'a, T>,
    last: &Handle<'a, T, B>,
    mut pred: P,
    new_value: &T,
) -> usize
where
    T: Clone + 'a,
    B: Access,
    P: FnMut(&T) -> bool,
{
    let mut it = first;
    let mut replaced = 0;
    while in_range(&it, last) {
        let hit = pred(&*it.get());
        if hit {
            it.set(new_value.clone());
            replaced += 1;
        }
        it.advance();
    }
    replaced
}

/// Apply `f` to every element in `[first, last)` in place
pub fn for_each<'a, T, B, F>(first: IterMut<'a, T>, last: &Handle<'a, T, B>, mut f: F)
where
    T: 'a,
    B: Access,
    F: FnMut(&mut T),
{
    let mut it = first;
    while in_range(&it, last) {
        f(&mut *it.get_mut());
        it.advance();
    }
}

/// Number of steps from `first` to `last` (or to the end sentinel)
pub fn distance<'a, T, A, B>(first: Handle<'a, T, A>, last: &Handle<'a, T, B>) -> usize
where
    T: 'a,
    A: Access,
    B: Access,
{
    count_if(first, last, |_| true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FwdContainer, Queue, Stack};

    #[test]
    fn test_find_if_stops_at_match() {
        let mut stack: Stack<i32> = (1..=5).collect();
        let end = stack.end();
        let it = find_if(stack.begin(), &end, |v| v % 2 == 0);
        assert_eq!(*it.get(), 4);

        let missing = find_if(stack.begin(), &end, |v| *v == 0);
        assert_eq!(missing, end);
    }

    #[test]
    fn test_partial_range() {
        let queue: Queue<i32> = (1..=6).collect();
        let mut last = queue.cbegin();
        last.advance().advance().advance();

        assert_eq!(distance(queue.cbegin(), &last), 3);
        assert_eq!(count_if(queue.cbegin(), &last, |v| v % 2 == 1), 2);
        assert_eq!(distance(queue.cbegin(), &queue.cend()), 6);
    }

    #[test]
    fn test_unreachable_last_stops_at_end() {
        let stack: Stack<i32> = (1..=3).collect();
        let queue: Queue<i32> = (1..=3).collect();
        assert_eq!(distance(stack.cbegin(), &queue.cend()), 3);
    }

    #[test]
    fn test_replace_and_for_each() {
        let mut queue: Queue<i32> = (1..=5).collect();
        let end = queue.end();

        let replaced = replace_if(queue.begin(), &end, |v| v % 2 == 0, &0);
        assert_eq!(replaced, 2);
        for_each(queue.begin(), &end, |v| *v += 1);

        assert_eq!(queue.to_string(), "2 1 4 1 6");
    }
}
