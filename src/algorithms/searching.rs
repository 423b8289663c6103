//! Linear and binary search.

use super::{sorting, Announcement, Outcome, SearchTarget, Tracer};
use crate::engine::{Pause, VizRng};
use crate::model::{BarColor, Opacity};

fn resolve_target(t: &Tracer, target: SearchTarget, rng: &mut VizRng) -> Option<u32> {
    match target {
        SearchTarget::Value(v) => Some(v),
        SearchTarget::Random => rng.gen_index(t.len()).map(|i| t.value(i)),
    }
}

/// Scan left to right; dim every bar already checked.
pub(super) fn linear_search(t: &mut Tracer, target: SearchTarget, rng: &mut VizRng) -> Outcome {
    let Some(target) = resolve_target(t, target, rng) else {
        return Outcome::Empty;
    };
    t.announce(Announcement::SearchTarget { target });

    for i in 0..t.len() {
        t.mark(i, BarColor::Comparing);
        t.wait();

        if t.equals(i, target) {
            t.mark(i, BarColor::Found);
            t.announce(Announcement::Found { target, index: i });
            return Outcome::Found { target, index: i };
        }
        t.mark(i, BarColor::Default);
        t.fade(i, Opacity::Checked);
    }

    t.announce(Announcement::NotFound { target });
    Outcome::NotFound { target }
}

/// Sort with a visualized quick sort, then halve `[lo, hi)` until the target
/// is hit or the range is empty.
///
/// The target is chosen after the sort, from the sorted values.
pub(super) fn binary_search(t: &mut Tracer, target: SearchTarget, rng: &mut VizRng) -> Outcome {
    if t.is_empty() {
        return Outcome::Empty;
    }
    t.announce(Announcement::SortingFirst);
    sorting::quick_sort(t);
    t.pause(Pause::Settle);
    t.reset_colors();

    let Some(target) = resolve_target(t, target, rng) else {
        return Outcome::Empty;
    };
    t.announce(Announcement::SearchTarget { target });

    let (mut lo, mut hi) = (0, t.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        t.mark(mid, BarColor::Comparing);
        t.wait();

        if t.equals(mid, target) {
            t.mark(mid, BarColor::Found);
            t.announce(Announcement::Found { target, index: mid });
            return Outcome::Found { target, index: mid };
        }

        if t.less_value(t.value(mid), target) {
            for k in lo..=mid {
                t.fade(k, Opacity::Eliminated);
            }
            lo = mid + 1;
        } else {
            for k in mid..hi {
                t.fade(k, Opacity::Eliminated);
            }
            hi = mid;
        }
    }

    t.announce(Announcement::NotFound { target });
    Outcome::NotFound { target }
}
