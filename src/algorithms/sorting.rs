//! The five sorting algorithms.
//!
//! Each follows the same rhythm: color what is being looked at, wait one
//! step, mutate or reset the color. The colors carry no meaning for the
//! algorithm itself.

use super::{Outcome, Tracer};
use crate::engine::Pause;
use crate::model::BarColor;

/// Adjacent compare-and-swap passes; the tail of each pass is final.
pub(super) fn bubble_sort(t: &mut Tracer) -> Outcome {
    let n = t.len();
    if n == 0 {
        return Outcome::Sorted;
    }
    for pass in 0..n - 1 {
        let last = n - pass - 1;
        for j in 0..last {
            t.mark(j, BarColor::Comparing);
            t.mark(j + 1, BarColor::Comparing);
            t.wait();

            if t.less(j + 1, j) {
                t.mark(j, BarColor::Swapping);
                t.mark(j + 1, BarColor::Swapping);
                t.swap(j, j + 1);
            }

            t.mark(j, BarColor::Default);
            t.mark(j + 1, BarColor::Default);
        }
        t.mark(last, BarColor::Sorted);
    }
    t.mark(0, BarColor::Sorted);
    Outcome::Sorted
}

/// Scan the unsorted suffix for its minimum and swap it into place.
pub(super) fn selection_sort(t: &mut Tracer) -> Outcome {
    let n = t.len();
    for i in 0..n {
        let mut min_idx = i;
        t.mark(i, BarColor::Comparing);
        for j in i + 1..n {
            t.mark(j, BarColor::Comparing);
            t.wait();

            if t.less(j, min_idx) {
                if min_idx != i {
                    t.mark(min_idx, BarColor::Default);
                }
                min_idx = j;
                t.mark(min_idx, BarColor::Swapping);
            } else {
                t.mark(j, BarColor::Default);
            }
        }
        t.swap(i, min_idx);
        t.mark(min_idx, BarColor::Default);
        t.mark(i, BarColor::Sorted);
    }
    Outcome::Sorted
}

/// Sink each element leftward past larger predecessors.
///
/// There is no incremental "sorted prefix" coloring: every bar turns sorted
/// in one fast ripple once the last element has been inserted.
pub(super) fn insertion_sort(t: &mut Tracer) -> Outcome {
    let n = t.len();
    for i in 1..n {
        let mut j = i;
        t.mark(i, BarColor::Comparing);
        while j > 0 && t.less(j, j - 1) {
            t.mark(j, BarColor::Swapping);
            t.mark(j - 1, BarColor::Swapping);
            t.swap(j, j - 1);
            t.mark(j, BarColor::Default);
            j -= 1;
        }
        t.mark(j, BarColor::Default);
        t.mark(i, BarColor::Default);
    }
    for k in 0..n {
        t.mark(k, BarColor::Sorted);
        t.pause(Pause::Ripple);
    }
    Outcome::Sorted
}

/// Quick sort with the first element of each range as pivot.
pub(super) fn quick_sort(t: &mut Tracer) -> Outcome {
    let n = t.len();
    quick_sort_range(t, 0, n);
    t.mark_all(BarColor::Sorted);
    Outcome::Sorted
}

/// Sort the half-open range `lo..hi`.
pub(super) fn quick_sort_range(t: &mut Tracer, lo: usize, hi: usize) {
    match hi.saturating_sub(lo) {
        0 => {}
        1 => t.mark(lo, BarColor::Sorted),
        _ => {
            let p = partition(t, lo, hi - 1);
            quick_sort_range(t, lo, p);
            quick_sort_range(t, p + 1, hi);
        }
    }
}

/// Partition the inclusive range `l..=r` around `values[l]` and return the
/// pivot's final index.
fn partition(t: &mut Tracer, l: usize, r: usize) -> usize {
    let pivot = t.value(l);
    t.mark(l, BarColor::Swapping);

    let mut i = l + 1;
    for j in l + 1..=r {
        t.mark(j, BarColor::Comparing);
        t.wait();

        if t.less_value(t.value(j), pivot) {
            t.mark(j, BarColor::Swapping);
            t.mark(i, BarColor::Swapping);
            if i != j {
                t.swap(i, j);
            }
            t.mark(i, BarColor::Default);
            i += 1;
        }
        t.mark(j, BarColor::Default);
    }

    let p = i - 1;
    t.swap(l, p);
    if p != l {
        t.mark(l, BarColor::Default);
    }
    t.mark(p, BarColor::Sorted);
    p
}

/// Top-down merge sort writing merged runs back element by element.
pub(super) fn merge_sort(t: &mut Tracer) -> Outcome {
    let n = t.len();
    if n > 1 {
        merge_sort_range(t, 0, n - 1);
    }
    t.mark_all(BarColor::Sorted);
    Outcome::Sorted
}

/// Sort the inclusive range `l..=r`.
fn merge_sort_range(t: &mut Tracer, l: usize, r: usize) {
    if l >= r {
        return;
    }
    let m = l + (r - l) / 2;
    merge_sort_range(t, l, m);
    merge_sort_range(t, m + 1, r);
    merge(t, l, m, r);
}

fn merge(t: &mut Tracer, l: usize, m: usize, r: usize) {
    let left: Vec<u32> = t.values()[l..=m].to_vec();
    let right: Vec<u32> = t.values()[m + 1..=r].to_vec();

    let (mut i, mut j, mut k) = (0, 0, l);

    while i < left.len() && j < right.len() {
        t.mark(k, BarColor::Comparing);
        t.wait();

        // Ties take from the left run, keeping the sort stable.
        if t.less_value(right[j], left[i]) {
            t.write(k, right[j]);
            j += 1;
        } else {
            t.write(k, left[i]);
            i += 1;
        }
        t.mark(k, BarColor::Default);
        k += 1;
    }

    for &value in left[i..].iter().chain(&right[j..]) {
        t.mark(k, BarColor::Swapping);
        t.wait();
        t.write(k, value);
        t.mark(k, BarColor::Default);
        k += 1;
    }
}
