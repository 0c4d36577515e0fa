#![forbid(unsafe_code)]

//! Expand/collapse height animation for list items.
//!
//! [`ExpandController`] flips an item's expanded flag and then drives a
//! [`HeightTween`] per animating item, feeding each intermediate height back
//! into the list via
//! [`ScrollVirtualizer::on_height_change`]. Every frame therefore takes the
//! same path a renderer's own height report would take.

use std::time::Duration;

use vlist_core::animation::{Animation, HeightTween};

use crate::error::Result;
use crate::source::{ItemRenderer, ItemSource};
use crate::virtualizer::ScrollVirtualizer;

/// Heights and timing for expand/collapse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandConfig {
    /// Height of a collapsed item.
    pub collapsed_height: f32,
    /// Height of an expanded item.
    pub expanded_height: f32,
    /// Tween length.
    pub duration: Duration,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            collapsed_height: 150.0,
            expanded_height: 600.0,
            duration: Duration::from_millis(350),
        }
    }
}

impl ExpandConfig {
    /// Set the collapsed height.
    #[must_use]
    pub fn collapsed_height(mut self, height: f32) -> Self {
        self.collapsed_height = height;
        self
    }

    /// Set the expanded height.
    #[must_use]
    pub fn expanded_height(mut self, height: f32) -> Self {
        self.expanded_height = height;
        self
    }

    /// Set the tween length.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Drives height tweens for items being expanded or collapsed.
#[derive(Debug, Clone, Default)]
pub struct ExpandController {
    config: ExpandConfig,
    active: Vec<(usize, HeightTween)>,
}

impl ExpandController {
    /// Create a controller.
    pub fn new(config: ExpandConfig) -> Self {
        Self {
            config,
            active: Vec::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &ExpandConfig {
        &self.config
    }

    /// Flip item `index` and start animating toward its new height.
    ///
    /// Toggling an item mid-animation retargets the running tween from its
    /// current height. Returns the new expanded flag.
    ///
    /// # Errors
    /// [`OutOfRange`](crate::VirtualListError::OutOfRange) for a bad index,
    /// including any index while the list is not ready.
    pub fn toggle<S, R>(&mut self, list: &mut ScrollVirtualizer<S, R>, index: usize) -> Result<bool>
    where
        S: ItemSource,
        R: ItemRenderer<Payload = S::Payload>,
    {
        let expanded = !list.is_expanded(index)?;
        list.set_expanded(index, expanded)?;

        let target = if expanded {
            self.config.expanded_height
        } else {
            self.config.collapsed_height
        };

        if let Some((_, tween)) = self.active.iter_mut().find(|(i, _)| *i == index) {
            tween.retarget(target);
        } else {
            let from = list.height(index)?;
            self.active
                .push((index, HeightTween::new(from, target, self.config.duration)));
        }
        vlist_core::debug!(index, expanded, target, "expand toggled");
        Ok(expanded)
    }

    /// Advance every running tween by `dt` and report the new heights.
    ///
    /// Finished tweens are dropped after reporting their final height. If the
    /// list is no longer ready, all tweens are discarded.
    pub fn tick<S, R>(&mut self, list: &mut ScrollVirtualizer<S, R>, dt: Duration) -> Result<()>
    where
        S: ItemSource,
        R: ItemRenderer<Payload = S::Payload>,
    {
        if !list.is_ready() {
            self.active.clear();
            return Ok(());
        }
        for (index, tween) in &mut self.active {
            tween.tick(dt);
            list.on_height_change(*index, tween.height())?;
        }
        self.active.retain(|(_, tween)| !tween.is_complete());
        Ok(())
    }

    /// Whether any item is animating.
    pub fn is_animating(&self) -> bool {
        !self.active.is_empty()
    }

    /// Whether item `index` is animating.
    pub fn is_animating_index(&self, index: usize) -> bool {
        self.active.iter().any(|(i, _)| *i == index)
    }
}
