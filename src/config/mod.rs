//! Configuration with YAML loading and validation.
//!
//! Every field has a default, so an empty document is a valid configuration.
//! Values are checked twice: field ranges through `validator`, then the
//! cross-field rules in [`VizConfig::validate_semantic`].
//!
//! ```rust
//! use sortviz::config::VizConfig;
//!
//! let config = VizConfig::from_yaml("array: { size: 12 }\nseed: 7\n").unwrap();
//! assert_eq!(config.array.size, 12);
//! assert_eq!(config.seed, Some(7));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::clock::DEFAULT_DELAYS_MS;
use crate::engine::{SpeedLevel, Timing};
use crate::error::{VizError, VizResult};
use crate::model::BarLayout;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Array size and its bounds.
    #[validate(nested)]
    #[serde(default)]
    pub array: ArrayConfig,

    /// Speed level and delay table.
    #[validate(nested)]
    #[serde(default)]
    pub speed: SpeedConfig,

    /// Fixed animation delays.
    #[validate(nested)]
    #[serde(default)]
    pub timing: TimingConfig,

    /// Display geometry.
    #[validate(nested)]
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Seed for array generation and target sampling; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsing fails or validation
    /// fails.
    pub fn load<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> VizResult<String> {
        serde_yaml::to_string(self).map_err(|e| VizError::serialization(e.to_string()))
    }

    /// Run field and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub fn check(&self) -> VizResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Preset for a ~1000px web container: 2px gaps, labels above 25px.
    #[must_use]
    pub fn web() -> Self {
        Self::default()
    }

    /// Preset for an 80-column terminal: 1-column gaps, labels above 2 columns.
    #[must_use]
    pub fn terminal() -> Self {
        Self {
            array: ArrayConfig {
                size: 20,
                ..ArrayConfig::default()
            },
            layout: LayoutConfig {
                width: 80,
                gap: 1,
                label_min_width: 2,
                height_scale: 1.0,
            },
            ..Self::default()
        }
    }

    fn validate_semantic(&self) -> VizResult<()> {
        let a = &self.array;
        if a.min_size > a.max_size {
            return Err(VizError::config(format!(
                "array.min_size ({}) exceeds array.max_size ({})",
                a.min_size, a.max_size
            )));
        }
        if !(a.min_size..=a.max_size).contains(&a.size) {
            return Err(VizError::config(format!(
                "array.size {} outside [{}, {}]",
                a.size, a.min_size, a.max_size
            )));
        }
        let d = &self.speed.delays_ms;
        if !d.windows(2).all(|w| w[0] > w[1]) {
            return Err(VizError::config(format!(
                "speed.delays_ms must be strictly decreasing from level 1 to 5, got {d:?}"
            )));
        }
        Ok(())
    }

    /// Most bars that fit the display width with at least one unit each
    /// plus the configured gaps.
    #[must_use]
    pub fn max_fitting_size(&self) -> usize {
        let gap = self.layout.gap;
        let fitting = self.layout.width.saturating_add(gap) / gap.saturating_add(1);
        usize::try_from(fitting).unwrap_or(usize::MAX)
    }

    /// Clamp a requested array size into the configured bounds and the
    /// number of bars the display width can hold.
    ///
    /// `min_size` wins when the width cannot even hold that many bars.
    #[must_use]
    pub fn clamp_size(&self, size: usize) -> usize {
        let min = self.array.min_size;
        let max = self.array.max_size.min(self.max_fitting_size()).max(min);
        size.clamp(min, max)
    }

    /// Configured speed level.
    #[must_use]
    pub fn speed_level(&self) -> SpeedLevel {
        SpeedLevel::new(self.speed.level)
    }

    /// Delay table for the pacer.
    #[must_use]
    pub const fn timing(&self) -> Timing {
        Timing {
            delays_ms: self.speed.delays_ms,
            ripple_ms: self.timing.ripple_ms,
            settle_ms: self.timing.settle_ms,
        }
    }

    /// Bar layout for `size` bars in the configured width.
    #[must_use]
    pub fn layout_for(&self, size: usize) -> BarLayout {
        self.layout_for_width(size, self.layout.width)
    }

    /// Bar layout for `size` bars in an explicit width.
    #[must_use]
    pub fn layout_for_width(&self, size: usize, width: u32) -> BarLayout {
        BarLayout::fit(size, width, self.layout.gap, self.layout.label_min_width)
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            array: ArrayConfig::default(),
            speed: SpeedConfig::default(),
            timing: TimingConfig::default(),
            layout: LayoutConfig::default(),
            seed: None,
        }
    }
}

/// Array size settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields, default)]
pub struct ArrayConfig {
    /// Initial number of bars.
    pub size: usize,
    /// Smallest size the size control allows.
    #[validate(range(min = 1))]
    pub min_size: usize,
    /// Largest size the size control allows.
    #[validate(range(min = 1, max = 1000))]
    pub max_size: usize,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            size: 30,
            min_size: 5,
            max_size: 100,
        }
    }
}

/// Speed settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields, default)]
pub struct SpeedConfig {
    /// Initial speed level, 1 (slowest) to 5 (fastest).
    #[validate(range(min = 1, max = 5))]
    pub level: u8,
    /// Step delay per level in milliseconds, slowest first.
    pub delays_ms: [u64; 5],
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            level: 3,
            delays_ms: DEFAULT_DELAYS_MS,
        }
    }
}

/// Fixed delays independent of the speed level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields, default)]
pub struct TimingConfig {
    /// Delay between bars of the final insertion-sort sweep.
    #[validate(range(max = 1000))]
    pub ripple_ms: u64,
    /// Pause between the binary-search pre-sort and the search.
    #[validate(range(max = 10_000))]
    pub settle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ripple_ms: 10,
            settle_ms: 1000,
        }
    }
}

/// Display geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields, default)]
pub struct LayoutConfig {
    /// Available width in display units (pixels or columns).
    #[validate(range(min = 1))]
    pub width: u32,
    /// Gap between bars.
    pub gap: u32,
    /// Bars must be wider than this to carry a numeric label.
    pub label_min_width: u32,
    /// Display height per unit of value.
    #[validate(range(min = 0.1, max = 100.0))]
    pub height_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            gap: 2,
            label_min_width: 25,
            height_scale: 3.5,
        }
    }
}

/// Programmatic configuration builder.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    base: Option<VizConfig>,
    seed: Option<u64>,
    size: Option<usize>,
    speed: Option<u8>,
    width: Option<u32>,
}

impl VizConfigBuilder {
    /// Start from a preset instead of the default.
    #[must_use]
    pub fn preset(mut self, config: VizConfig) -> Self {
        self.base = Some(config);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the array size (clamped into the bounds on build).
    #[must_use]
    pub const fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the speed level (clamped into 1..=5 on build).
    #[must_use]
    pub const fn speed(mut self, level: u8) -> Self {
        self.speed = Some(level);
        self
    }

    /// Set the display width.
    #[must_use]
    pub const fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> VizConfig {
        let mut config = self.base.unwrap_or_default();
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.layout.width = width.max(1);
        }
        if let Some(size) = self.size {
            config.array.size = config.clamp_size(size);
        }
        if let Some(level) = self.speed {
            config.speed.level = SpeedLevel::new(level).get();
        }
        config
    }
}
