//! Index state machine and geometry math for the skills carousel.
//!
//! Kept free of DOM types: the carousel measures the track and injects a
//! [`TrackGeometry`] snapshot, so every navigation rule can be exercised with
//! synthetic geometry and no rendering engine.

/// Layout snapshot of the carousel track, re-measured on setup and resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    /// Rendered width of one card, in pixels.
    pub card_width: f64,
    /// Computed inter-card gap of the track, in pixels.
    pub gap: f64,
}

impl TrackGeometry {
    /// Distance the track travels for a one-card shift.
    pub fn scroll_amount(&self) -> f64 {
        self.card_width + self.gap
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Move {
    /// Translate the track to this pixel offset (zero or negative).
    Apply { offset_px: f64 },
    /// Already at the requested index with a transform in place; skip the
    /// style write so an identical transition is not re-triggered.
    Unchanged,
}

/// Which card leads the viewport, and how far the track must shift to show it.
///
/// Invariant: `0 <= current_index <= max_scroll_index` after every operation;
/// out-of-range requests clamp rather than fail.
#[derive(Debug, Clone)]
pub struct Pager {
    total_items: usize,
    visible_items: usize,
    current_index: usize,
    geometry: TrackGeometry,
    transform_applied: bool,
}

impl Pager {
    pub fn new(total_items: usize, visible_items: usize, geometry: TrackGeometry) -> Self {
        Self {
            total_items,
            visible_items,
            current_index: 0,
            geometry,
            transform_applied: false,
        }
    }

    /// Highest index the track can scroll to; 0 when everything fits.
    pub fn max_scroll_index(&self) -> usize {
        self.total_items.saturating_sub(self.visible_items)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether there is anything to page through at all.
    pub fn can_scroll(&self) -> bool {
        self.max_scroll_index() > 0
    }

    pub fn at_start(&self) -> bool {
        self.current_index == 0
    }

    pub fn at_end(&self) -> bool {
        self.current_index >= self.max_scroll_index()
    }

    /// Clamps `target` into range and reports the transform to apply, if any.
    ///
    /// The very first placement always applies, even for index 0, so the
    /// track starts from a known transform. After that, re-requesting the
    /// current index is a no-op.
    pub fn scroll_to(&mut self, target: isize) -> Move {
        let clamped = target.clamp(0, self.max_scroll_index() as isize) as usize;
        if clamped == self.current_index && self.transform_applied {
            return Move::Unchanged;
        }
        self.current_index = clamped;
        self.apply_current()
    }

    /// Target index for one auto-advance tick, wrapping past the end.
    pub fn auto_advance_target(&self) -> isize {
        let next = self.current_index + 1;
        if next > self.max_scroll_index() {
            0
        } else {
            next as isize
        }
    }

    /// Re-projects the current index unconditionally. Used after a geometry
    /// change, where the index is unchanged but the pixel offset is not.
    pub fn reapply(&mut self) -> Move {
        self.apply_current()
    }

    pub fn set_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
    }

    fn apply_current(&mut self) -> Move {
        self.transform_applied = true;
        let magnitude = self.current_index as f64 * self.geometry.scroll_amount();
        // Keep index 0 as a plain 0.0 so it never renders as "-0px".
        let offset_px = if magnitude == 0.0 { 0.0 } else { -magnitude };
        Move::Apply { offset_px }
    }
}
