//! Array model: the bars and their visual state.
//!
//! The model is the single source of truth for values. Height and label are
//! never stored; renderers derive them from `value`, so a swap or write can
//! never leave the display disagreeing with the data.

mod palette;

pub use palette::{BarColor, Opacity};

use serde::{Deserialize, Serialize};

use crate::engine::VizRng;

/// Smallest value a generated bar can hold.
pub const MIN_VALUE: u32 = 1;
/// Largest value a generated bar can hold.
pub const MAX_VALUE: u32 = 100;

/// Opaque handle identifying one bar for the lifetime of a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BarId(u64);

impl BarId {
    /// Raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Mutable visual state of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BarStyle {
    /// Fill color.
    pub color: BarColor,
    /// Opacity level.
    pub opacity: Opacity,
}

/// One element of the array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Visual handle, fixed for the bar's lifetime.
    pub id: BarId,
    /// Value in `[MIN_VALUE, MAX_VALUE]` for generated arrays.
    pub value: u32,
    /// Current color and opacity.
    pub style: BarStyle,
}

/// Bar geometry computed when the array is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarLayout {
    /// Width of each bar in display units.
    pub bar_width: u32,
    /// Gap between neighbouring bars.
    pub gap: u32,
    /// Whether numeric labels fit on the bars.
    pub show_labels: bool,
}

impl BarLayout {
    /// Fit `count` bars separated by `gap` into `available` display units.
    ///
    /// Labels are enabled only when the bar width exceeds `label_min_width`.
    /// The gap collapses to zero when `count` one-unit bars would not fit
    /// with it.
    #[must_use]
    pub fn fit(count: usize, available: u32, gap: u32, label_min_width: u32) -> Self {
        let count_u32 = u32::try_from(count.max(1)).unwrap_or(u32::MAX);
        let mut gap = gap;
        let mut total_gap = gap.saturating_mul(count_u32 - 1);
        if total_gap.saturating_add(count_u32) > available {
            gap = 0;
            total_gap = 0;
        }
        let bar_width = (available.saturating_sub(total_gap) / count_u32).max(1);
        Self {
            bar_width,
            gap,
            show_labels: bar_width > label_min_width,
        }
    }
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            bar_width: 1,
            gap: 0,
            show_labels: false,
        }
    }
}

/// Ordered sequence of bars.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArrayModel {
    bars: Vec<Bar>,
    layout: BarLayout,
    generation: u64,
    next_id: u64,
}

impl ArrayModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model holding exactly `values`, with default styling.
    #[must_use]
    pub fn from_values(values: &[u32], layout: BarLayout) -> Self {
        let mut model = Self::new();
        model.rebuild(values.iter().copied(), layout);
        model
    }

    /// Discard every bar and create `size` fresh bars with random values.
    ///
    /// Run-state checks belong to the caller; the model itself has no notion
    /// of a running algorithm.
    pub fn generate(&mut self, size: usize, layout: BarLayout, rng: &mut VizRng) {
        let values = rng.gen_values(size, MIN_VALUE, MAX_VALUE);
        self.rebuild(values, layout);
    }

    fn rebuild(&mut self, values: impl IntoIterator<Item = u32>, layout: BarLayout) {
        self.bars.clear();
        self.generation += 1;
        for value in values {
            let id = BarId(self.next_id);
            self.next_id += 1;
            self.bars.push(Bar {
                id,
                value,
                style: BarStyle::default(),
            });
        }
        self.layout = layout;
    }

    /// Replace the geometry, keeping bars, handles, styles and the
    /// generation counter.
    pub fn set_layout(&mut self, layout: BarLayout) {
        self.layout = layout;
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the model holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// All bars in order.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Bar at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Current values in order.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.bars.iter().map(|b| b.value).collect()
    }

    /// Layout computed at generation time.
    #[must_use]
    pub const fn layout(&self) -> BarLayout {
        self.layout
    }

    /// Number of times the bars have been rebuilt.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether values are non-decreasing.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.bars.windows(2).all(|w| w[0].value <= w[1].value)
    }

    /// Set the color of one bar. Out-of-bounds indices are ignored.
    pub fn set_color(&mut self, index: usize, color: BarColor) {
        if let Some(bar) = self.bars.get_mut(index) {
            bar.style.color = color;
        }
    }

    /// Set the opacity of one bar. Out-of-bounds indices are ignored.
    pub fn set_opacity(&mut self, index: usize, opacity: Opacity) {
        if let Some(bar) = self.bars.get_mut(index) {
            bar.style.opacity = opacity;
        }
    }

    /// Exchange the values of two bars. Ignored if either index is out of
    /// bounds. Bar identities and styles stay in place.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i >= self.bars.len() || j >= self.bars.len() || i == j {
            return;
        }
        let tmp = self.bars[i].value;
        self.bars[i].value = self.bars[j].value;
        self.bars[j].value = tmp;
    }

    /// Overwrite the value of one bar. Out-of-bounds indices are ignored.
    pub fn write(&mut self, index: usize, value: u32) {
        if let Some(bar) = self.bars.get_mut(index) {
            bar.value = value;
        }
    }

    /// Set every color to default and every opacity to opaque.
    pub fn reset_visuals(&mut self) {
        for bar in &mut self.bars {
            bar.style = BarStyle::default();
        }
    }

    /// Set every color to default, keeping opacity.
    pub fn reset_colors(&mut self) {
        for bar in &mut self.bars {
            bar.style.color = BarColor::Default;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BarLayout {
        BarLayout::fit(5, 100, 2, 25)
    }

    #[test]
    fn test_generate_size_and_range() {
        let mut rng = VizRng::new(42);
        let mut model = ArrayModel::new();
        model.generate(60, layout(), &mut rng);
        assert_eq!(model.len(), 60);
        assert!(model
            .values()
            .iter()
            .all(|v| (MIN_VALUE..=MAX_VALUE).contains(v)));
    }

    #[test]
    fn test_regenerate_replaces_all_bars() {
        let mut rng = VizRng::new(42);
        let mut model = ArrayModel::new();
        model.generate(20, layout(), &mut rng);
        let old_ids: Vec<BarId> = model.bars().iter().map(|b| b.id).collect();
        model.set_color(3, BarColor::Sorted);

        model.generate(10, layout(), &mut rng);
        assert_eq!(model.len(), 10);
        assert_eq!(model.generation(), 2);
        assert!(model.bars().iter().all(|b| !old_ids.contains(&b.id)));
        assert!(model.bars().iter().all(|b| b.style == BarStyle::default()));
    }

    #[test]
    fn test_swap_exchanges_values_only() {
        let mut model = ArrayModel::from_values(&[5, 3, 4], layout());
        let ids: Vec<BarId> = model.bars().iter().map(|b| b.id).collect();
        model.set_color(0, BarColor::Swapping);
        model.swap(0, 2);
        assert_eq!(model.values(), vec![4, 3, 5]);
        assert_eq!(model.bars()[0].id, ids[0]);
        assert_eq!(model.bars()[0].style.color, BarColor::Swapping);
    }

    #[test]
    fn test_out_of_bounds_is_noop() {
        let mut model = ArrayModel::from_values(&[1, 2], layout());
        model.set_color(9, BarColor::Found);
        model.set_opacity(9, Opacity::Checked);
        model.swap(0, 9);
        model.write(9, 50);
        assert_eq!(model.values(), vec![1, 2]);
        assert!(model.bars().iter().all(|b| b.style == BarStyle::default()));
    }

    #[test]
    fn test_write_and_reset() {
        let mut model = ArrayModel::from_values(&[1, 2, 3], layout());
        model.write(1, 77);
        model.set_color(1, BarColor::Comparing);
        model.set_opacity(2, Opacity::Eliminated);
        assert_eq!(model.values(), vec![1, 77, 3]);

        model.reset_colors();
        assert_eq!(model.bars()[1].style.color, BarColor::Default);
        assert_eq!(model.bars()[2].style.opacity, Opacity::Eliminated);

        model.reset_visuals();
        assert_eq!(model.bars()[2].style.opacity, Opacity::Opaque);
    }

    #[test]
    fn test_is_sorted() {
        assert!(ArrayModel::from_values(&[1, 1, 2], layout()).is_sorted());
        assert!(!ArrayModel::from_values(&[2, 1], layout()).is_sorted());
        assert!(ArrayModel::new().is_sorted());
    }

    #[test]
    fn test_layout_fit_web() {
        // 1000px container, 2px gaps.
        let wide = BarLayout::fit(10, 1000, 2, 25);
        assert_eq!(wide.bar_width, 98);
        assert!(wide.show_labels);

        let narrow = BarLayout::fit(100, 1000, 2, 25);
        assert_eq!(narrow.bar_width, 8);
        assert!(!narrow.show_labels);
    }

    #[test]
    fn test_layout_fit_never_zero() {
        let cramped = BarLayout::fit(100, 50, 2, 25);
        assert_eq!(cramped.bar_width, 1);
        let empty = BarLayout::fit(0, 50, 2, 25);
        assert_eq!(empty.bar_width, 50);
    }

    #[test]
    fn test_layout_fit_drops_gap_when_crowded() {
        // 40 bars with 1-column gaps need 79 columns.
        let layout = BarLayout::fit(40, 76, 1, 2);
        assert_eq!(layout.gap, 0);
        assert_eq!(layout.bar_width, 1);

        let roomy = BarLayout::fit(38, 76, 1, 2);
        assert_eq!(roomy.gap, 1);
        assert_eq!(38 * roomy.bar_width + 37 * roomy.gap, 75);
    }

    #[test]
    fn test_set_layout_keeps_bars() {
        let mut model = ArrayModel::from_values(&[3, 1, 2], BarLayout::default());
        model.set_color(1, BarColor::Sorted);
        let bars = model.bars().to_vec();
        let generation = model.generation();

        let layout = BarLayout::fit(3, 30, 1, 2);
        model.set_layout(layout);

        assert_eq!(model.layout(), layout);
        assert_eq!(model.bars(), bars.as_slice());
        assert_eq!(model.generation(), generation);
    }
}
