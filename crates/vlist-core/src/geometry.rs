#![forbid(unsafe_code)]

//! Geometric primitives.

/// An axis-aligned rectangle in content coordinates.
///
/// The origin is the top-left corner of the scrollable content; `y` grows
/// downward. Edges follow half-open semantics: `left`/`top` are inclusive,
/// `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    /// Width in content units.
    pub width: f32,
    /// Height in content units.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Left edge (inclusive). Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge (inclusive). Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if the rectangle has zero (or negative, or NaN) extent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether the two rectangles overlap on both axes.
    ///
    /// Touching edges do not count as overlap.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Move the rectangle vertically by `dy`.
    #[inline]
    #[must_use]
    pub fn offset_y(self, dy: f32) -> Rect {
        Rect::new(self.x, self.y + dy, self.width, self.height)
    }
}

/// The externally owned scroll viewport.
///
/// The engine only reads this; the host updates it on every scroll tick or
/// resize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Distance from the content top to the viewport top.
    pub scroll_offset: f32,
    /// Visible height.
    pub height: f32,
    /// Visible width; slots are laid out at this width.
    pub width: f32,
}

impl Viewport {
    /// Create a new viewport.
    #[inline]
    pub const fn new(scroll_offset: f32, height: f32, width: f32) -> Self {
        Self {
            scroll_offset,
            height,
            width,
        }
    }

    /// Copy with a different scroll offset.
    #[inline]
    #[must_use]
    pub const fn with_scroll(self, scroll_offset: f32) -> Self {
        Self {
            scroll_offset,
            ..self
        }
    }

    /// The visible region in content coordinates.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0.0, self.scroll_offset, self.width, self.height)
    }

    /// Whether the viewport has been measured (positive height).
    #[inline]
    pub fn is_measured(&self) -> bool {
        self.height > 0.0 && self.height.is_finite()
    }
}
