#![forbid(unsafe_code)]

//! Cumulative offset index over variable item heights.
//!
//! Maps item index to top-edge position (prefix sum of heights plus spacing)
//! and answers the inverse query, scroll position to first visible item, by
//! binary search.
//!
//! # Layout
//!
//! Two parallel `Vec<f32>` of length `n`: `heights[i]` is the current rendered
//! height and `offsets[i]` the derived top edge. Keeping offsets materialised
//! makes reads O(1) and the scroll lookup a plain binary search over
//! contiguous memory, which is what runs on every scroll tick. Height changes
//! pay instead: they walk forward from the dirty index only.
//!
//! # Operations
//!
//! | Operation | Time | Allocations |
//! |-----------|------|-------------|
//! | `initialize(heights)` | O(n) | 2 Vec |
//! | `set_height(i, h)` unchanged | O(1) | 0 |
//! | `set_height(i, h)` changed | O(n - i) | 0 |
//! | `find_first_visible(y)` | O(log n) | 0 |
//! | `offset(i)` / `height(i)` | O(1) | 0 |
//!
//! # Invariants
//!
//! 1. `offsets[0] == 0` and `offsets[i] == offsets[i-1] + heights[i-1] + spacing`.
//! 2. `offsets` is non-decreasing (heights are clamped to at least
//!    [`MIN_ITEM_HEIGHT`] and spacing is non-negative).
//! 3. `total_content_height == offsets[n-1] + heights[n-1] + padding`, or 0
//!    when `n == 0`.
//! 4. Both invariants hold again before any public method returns.

use crate::error::{Result, VirtualListError, check_index};

/// Smallest height an item may have. Degenerate inputs clamp to this.
pub const MIN_ITEM_HEIGHT: f32 = 1.0;

/// Height differences at or below this are treated as no change.
pub const HEIGHT_EPSILON: f32 = 1e-3;

/// Clamp a reported height into the valid range.
///
/// NaN and anything below [`MIN_ITEM_HEIGHT`] (including negative infinity)
/// become [`MIN_ITEM_HEIGHT`]; positive infinity saturates to `f32::MAX`.
#[inline]
pub fn sanitize_height(height: f32) -> f32 {
    if height.is_nan() || height < MIN_ITEM_HEIGHT {
        MIN_ITEM_HEIGHT
    } else {
        height.min(f32::MAX)
    }
}

#[inline]
fn sanitize_gap(gap: f32) -> f32 {
    if gap.is_finite() && gap > 0.0 { gap } else { 0.0 }
}

/// Prefix-sum table of item heights.
#[derive(Debug, Clone, Default)]
pub struct OffsetTable {
    heights: Vec<f32>,
    offsets: Vec<f32>,
    spacing: f32,
    padding: f32,
    total: f32,
    initialized: bool,
}

impl OffsetTable {
    /// Create an uninitialised, empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build offsets for `heights` in a single O(n) pass.
    ///
    /// # Errors
    /// [`VirtualListError::InvalidState`] if the table is already initialised
    /// and has not been torn down.
    pub fn initialize(&mut self, heights: &[f32], spacing: f32, padding: f32) -> Result<()> {
        if self.initialized {
            return Err(VirtualListError::InvalidState {
                operation: "initialize",
                state: "initialized",
            });
        }

        self.spacing = sanitize_gap(spacing);
        self.padding = sanitize_gap(padding);
        self.heights = heights.iter().map(|&h| sanitize_height(h)).collect();
        self.offsets = vec![0.0; heights.len()];
        self.recompute_from(0);
        self.initialized = true;
        Ok(())
    }

    /// Release both arrays and allow [`initialize`](Self::initialize) again.
    pub fn teardown(&mut self) {
        self.heights = Vec::new();
        self.offsets = Vec::new();
        self.total = 0.0;
        self.initialized = false;
    }

    /// Whether [`initialize`](Self::initialize) has run since the last teardown.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Whether the table holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Gap between consecutive items.
    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Trailing padding after the last item.
    #[inline]
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Height of the scrollable region.
    #[inline]
    pub fn total_content_height(&self) -> f32 {
        self.total
    }

    /// All item heights.
    #[inline]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// All item top offsets.
    #[inline]
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// Top offset of item `index`. O(1).
    pub fn offset(&self, index: usize) -> Result<f32> {
        check_index(index, self.len())?;
        Ok(self.offsets[index])
    }

    /// Height of item `index`. O(1).
    pub fn height(&self, index: usize) -> Result<f32> {
        check_index(index, self.len())?;
        Ok(self.heights[index])
    }

    /// `(top, bottom)` of item `index`, bottom exclusive.
    pub fn item_bounds(&self, index: usize) -> Result<(f32, f32)> {
        check_index(index, self.len())?;
        let top = self.offsets[index];
        Ok((top, top + self.heights[index]))
    }

    /// Update the height of one item and shift everything after it.
    ///
    /// Returns `Ok(false)` without touching anything when the sanitised height
    /// is within [`HEIGHT_EPSILON`] of the stored value, so animation frames
    /// that re-report a settled height stay O(1).
    pub fn set_height(&mut self, index: usize, height: f32) -> Result<bool> {
        check_index(index, self.len())?;

        let clamped = sanitize_height(height);
        if clamped != height {
            vlist_core::debug!(index, height, clamped, "clamped degenerate item height");
        }
        if (self.heights[index] - clamped).abs() <= HEIGHT_EPSILON {
            return Ok(false);
        }

        self.heights[index] = clamped;
        self.recompute_from(index + 1);
        Ok(true)
    }

    /// Smallest index `k` with `offset[k] + height[k] >= scroll_offset`.
    ///
    /// Returns 0 for an empty table and the last index when `scroll_offset`
    /// lies past the content. Ties resolve to the smaller index. O(log n).
    pub fn find_first_visible(&self, scroll_offset: f32) -> usize {
        let n = self.len();
        if n == 0 || scroll_offset.is_nan() || scroll_offset <= 0.0 {
            return 0;
        }

        let mut low = 0usize;
        let mut high = n - 1;
        while low < high {
            let mid = low + (high - low) / 2;
            let end = self.offsets[mid] + self.heights[mid];
            if end < scroll_offset {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        low
    }

    /// Rewrite `offsets[start..]` from `offsets[start - 1]` and refresh the total.
    fn recompute_from(&mut self, start: usize) {
        let n = self.len();
        if n == 0 {
            self.total = 0.0;
            return;
        }

        let mut current = if start == 0 {
            0.0
        } else {
            self.offsets[start - 1] + self.heights[start - 1] + self.spacing
        };
        for i in start..n {
            self.offsets[i] = current;
            current = current + self.heights[i] + self.spacing;
        }

        self.total = self.offsets[n - 1] + self.heights[n - 1] + self.padding;
    }
}
