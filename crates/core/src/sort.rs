//! In-place heap sort
//!
//! Room listings are ordered with an explicit heap sort so the ordering
//! cost is O(n log n) regardless of how the registry's keys are laid out.

/// Sort `items` ascending in place
pub fn heap_sort<T: Ord>(items: &mut [T]) {
    let len = items.len();
    if len <= 1 {
        return;
    }

    // Build a max-heap
    for start in (0..len / 2).rev() {
        sift_down(items, start, len - 1);
    }

    // Move the current maximum behind the shrinking heap
    for end in (1..len).rev() {
        items.swap(0, end);
        sift_down(items, 0, end - 1);
    }
}

/// Restore the heap property for the subtree at `root`, considering
/// indices up to and including `end`
fn sift_down<T: Ord>(items: &mut [T], mut root: usize, end: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child > end {
            break;
        }
        if child < end && items[child] < items[child + 1] {
            child += 1;
        }
        if items[root] < items[child] {
            items.swap(root, child);
            root = child;
        } else {
            break;
        }
    }
}
