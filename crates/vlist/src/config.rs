#![forbid(unsafe_code)]

//! List layout configuration.

use crate::error::{Result, VirtualListError};

/// Height substituted when the configured fallback is not a positive number.
pub const DEGENERATE_FALLBACK_HEIGHT: f32 = 100.0;

/// Upper bound on the slot count, whatever the viewport height.
pub const MAX_POOL_SIZE: usize = 4096;

/// Layout options recognised by the engine.
///
/// # Example
///
/// ```
/// use vlist::VirtualListConfig;
///
/// let config = VirtualListConfig::default()
///     .fallback_item_height(160.0)
///     .spacing(8.0)
///     .end_padding(0.0)
///     .pool_buffer(2);
/// assert_eq!(config.pool_size(800.0), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VirtualListConfig {
    /// Height assumed for every item before its first measurement.
    pub fallback_item_height: f32,
    /// Gap between consecutive items.
    pub spacing: f32,
    /// Trailing space after the last item.
    pub end_padding: f32,
    /// Extra slots beyond the minimum viewport coverage.
    pub pool_buffer: usize,
}

impl Default for VirtualListConfig {
    fn default() -> Self {
        Self {
            fallback_item_height: 160.0,
            spacing: 33.0,
            end_padding: 200.0,
            pool_buffer: 2,
        }
    }
}

impl VirtualListConfig {
    /// Set the fallback item height.
    #[must_use]
    pub fn fallback_item_height(mut self, height: f32) -> Self {
        self.fallback_item_height = height;
        self
    }

    /// Set the gap between items.
    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the trailing padding.
    #[must_use]
    pub fn end_padding(mut self, padding: f32) -> Self {
        self.end_padding = padding;
        self
    }

    /// Set the number of extra pooled slots.
    #[must_use]
    pub fn pool_buffer(mut self, buffer: usize) -> Self {
        self.pool_buffer = buffer;
        self
    }

    /// Reject configurations that would corrupt the offset table.
    pub fn validate(&self) -> Result<()> {
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(VirtualListError::InvalidConfig(
                "spacing must be finite and non-negative",
            ));
        }
        if !self.end_padding.is_finite() || self.end_padding < 0.0 {
            return Err(VirtualListError::InvalidConfig(
                "end padding must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// The fallback height actually used for unmeasured items.
    ///
    /// Non-positive, NaN and infinite values degrade to
    /// [`DEGENERATE_FALLBACK_HEIGHT`].
    pub fn effective_fallback_height(&self) -> f32 {
        let h = self.fallback_item_height;
        if h.is_finite() && h > 0.0 {
            h
        } else {
            DEGENERATE_FALLBACK_HEIGHT
        }
    }

    /// Slot count needed to cover `viewport_height`, plus the buffer.
    ///
    /// `ceil(viewport_height / max(1, fallback)) + pool_buffer`, clamped to
    /// `[1, MAX_POOL_SIZE]`.
    pub fn pool_size(&self, viewport_height: f32) -> usize {
        let row = self.effective_fallback_height().max(1.0);
        let viewport_height = if viewport_height.is_finite() {
            viewport_height.max(0.0)
        } else {
            0.0
        };
        let cover = (viewport_height / row).ceil();
        let cover = if cover < MAX_POOL_SIZE as f32 {
            cover as usize
        } else {
            MAX_POOL_SIZE
        };
        let wanted = cover.saturating_add(self.pool_buffer);
        if wanted > MAX_POOL_SIZE {
            vlist_core::warn!(
                viewport_height,
                pool_buffer = self.pool_buffer,
                max = MAX_POOL_SIZE,
                "slot pool size capped"
            );
        }
        wanted.clamp(1, MAX_POOL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_layout() {
        let config = VirtualListConfig::default();
        assert_eq!(config.fallback_item_height, 160.0);
        assert_eq!(config.spacing, 33.0);
        assert_eq!(config.end_padding, 200.0);
        assert_eq!(config.pool_buffer, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn pool_size_covers_viewport() {
        let config = VirtualListConfig::default().pool_buffer(0);
        assert_eq!(config.pool_size(800.0), 5);
        assert_eq!(config.pool_size(801.0), 6);
        assert_eq!(config.pool_buffer(3).pool_size(800.0), 8);
    }

    #[test]
    fn pool_size_is_capped_for_huge_viewports() {
        let config = VirtualListConfig::default();
        assert_eq!(config.pool_size(1.0e30), MAX_POOL_SIZE);
        assert_eq!(config.pool_size(f32::MAX), MAX_POOL_SIZE);
        assert_eq!(config.pool_buffer(usize::MAX).pool_size(800.0), MAX_POOL_SIZE);
    }

    #[test]
    fn pool_size_is_at_least_one() {
        let config = VirtualListConfig::default().pool_buffer(0);
        assert_eq!(config.pool_size(0.0), 1);
        assert_eq!(config.pool_size(-50.0), 1);
        assert_eq!(config.pool_size(f32::NAN), 1);
    }

    #[test]
    fn degenerate_fallback_is_replaced() {
        for h in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let config = VirtualListConfig::default().fallback_item_height(h);
            assert_eq!(config.effective_fallback_height(), DEGENERATE_FALLBACK_HEIGHT);
        }
    }

    #[test]
    fn tiny_fallback_uses_unit_rows() {
        let config = VirtualListConfig::default()
            .fallback_item_height(0.25)
            .pool_buffer(0);
        assert_eq!(config.pool_size(10.0), 10);
    }

    #[test]
    fn validate_rejects_bad_spacing_and_padding() {
        assert!(VirtualListConfig::default().spacing(-1.0).validate().is_err());
        assert!(
            VirtualListConfig::default()
                .spacing(f32::NAN)
                .validate()
                .is_err()
        );
        assert!(
            VirtualListConfig::default()
                .end_padding(f32::INFINITY)
                .validate()
                .is_err()
        );
    }
}
