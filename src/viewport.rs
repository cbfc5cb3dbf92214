//! Viewport windowing.
//!
//! Maps a scroll offset over a view of uniformly sized rows to the contiguous index range
//! that has to be materialized, plus the pixel offsets the surface needs to position that
//! slice inside a full-height scroll area. Every computation is O(1) in the view length,
//! so it can run on each scroll event.

use crate::config::ViewerConfig;
use std::ops::Range;

/// Rows to materialize and where to place them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowRange {
    /// First materialized view index (inclusive)
    pub start: usize,
    /// Last materialized view index (exclusive)
    pub end: usize,
    /// Pixel offset of `start` from the top of the content
    pub top_offset: u64,
    /// Height of the full content in pixels
    pub total_height: u64,
}

impl WindowRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Compute the window for one viewport position.
///
/// `start = max(0, floor(scroll / row) - buffer)` and
/// `end = min(len, ceil((scroll + height) / row) + buffer)`, with `start` clamped to `end`
/// so offsets past the end of the content yield an empty range instead of an inverted one.
pub fn compute_range(
    view_len: usize,
    row_height: u64,
    container_height: u64,
    scroll_offset: u64,
    buffer_rows: usize,
) -> WindowRange {
    let row_height = row_height.max(1);
    let total_height = (view_len as u64).saturating_mul(row_height);

    let first_visible = to_index(scroll_offset / row_height);
    let last_visible = to_index(
        scroll_offset
            .saturating_add(container_height)
            .div_ceil(row_height),
    );

    let end = last_visible.saturating_add(buffer_rows).min(view_len);
    let start = first_visible.saturating_sub(buffer_rows).min(end);

    WindowRange {
        start,
        end,
        top_offset: start as u64 * row_height,
        total_height,
    }
}

/// Transient scroll position and measured height of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportState {
    /// Pixels scrolled from the top
    pub scroll_offset: u64,
    /// Measured container height, `None` until the surface reports one
    pub container_height: Option<u64>,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measured(container_height: u64) -> Self {
        Self {
            scroll_offset: 0,
            container_height: Some(container_height),
        }
    }
}

/// Windowing parameters shared by every computation for one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Windower {
    row_height: u64,
    buffer_rows: usize,
    default_container_height: u64,
}

impl Windower {
    pub fn new(row_height: u64, buffer_rows: usize, default_container_height: u64) -> Self {
        Self {
            row_height: row_height.max(1),
            buffer_rows,
            default_container_height,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(
            config.row_height,
            config.buffer_rows,
            config.default_container_height,
        )
    }

    pub fn row_height(&self) -> u64 {
        self.row_height
    }

    pub fn buffer_rows(&self) -> usize {
        self.buffer_rows
    }

    /// Measured height, or the configured default before the first measurement.
    pub fn container_height(&self, viewport: &ViewportState) -> u64 {
        viewport
            .container_height
            .unwrap_or(self.default_container_height)
    }

    pub fn compute(&self, view_len: usize, viewport: &ViewportState) -> WindowRange {
        compute_range(
            view_len,
            self.row_height,
            self.container_height(viewport),
            viewport.scroll_offset,
            self.buffer_rows,
        )
    }

    /// Rows that intersect the container, without buffer.
    pub fn visible_rows(&self, view_len: usize, viewport: &ViewportState) -> Range<usize> {
        let window = compute_range(
            view_len,
            self.row_height,
            self.container_height(viewport),
            viewport.scroll_offset,
            0,
        );
        window.range()
    }

    /// Whole rows that fit in the container, at least one.
    pub fn rows_per_page(&self, viewport: &ViewportState) -> usize {
        to_index(self.container_height(viewport) / self.row_height).max(1)
    }

    /// Largest offset that still fills the container (zero if everything fits).
    pub fn max_scroll_offset(&self, view_len: usize, viewport: &ViewportState) -> u64 {
        (view_len as u64)
            .saturating_mul(self.row_height)
            .saturating_sub(self.container_height(viewport))
    }

    pub fn clamp_scroll(&self, offset: u64, view_len: usize, viewport: &ViewportState) -> u64 {
        offset.min(self.max_scroll_offset(view_len, viewport))
    }

    pub fn offset_of(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.row_height)
    }

    /// Smallest scroll change that brings row `index` fully into view.
    pub fn reveal(&self, index: usize, viewport: &ViewportState) -> u64 {
        let top = self.offset_of(index);
        let bottom = top.saturating_add(self.row_height);
        let height = self.container_height(viewport);

        if top < viewport.scroll_offset {
            top
        } else if bottom > viewport.scroll_offset.saturating_add(height) {
            bottom.saturating_sub(height)
        } else {
            viewport.scroll_offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        let window = compute_range(1000, 60, 600, 1200, 10);
        assert_eq!(window.start, 10);
        assert_eq!(window.end, 40);
        assert_eq!(window.top_offset, 600);
        assert_eq!(window.total_height, 60_000);
        assert_eq!(window.len(), 30);
    }

    #[test]
    fn test_top_of_list_clamps_start() {
        let window = compute_range(1000, 60, 600, 0, 10);
        assert_eq!(window.range(), 0..20);
        assert_eq!(window.top_offset, 0);
    }

    #[test]
    fn test_bottom_of_list_clamps_end() {
        let window = compute_range(1000, 60, 600, 59_400, 10);
        assert_eq!(window.range(), 980..1000);
    }

    #[test]
    fn test_empty_view() {
        let window = compute_range(0, 60, 600, 0, 10);
        assert!(window.is_empty());
        assert_eq!(window.total_height, 0);
        assert_eq!(window.top_offset, 0);
    }

    #[test]
    fn test_offset_past_content_yields_empty_range() {
        let window = compute_range(5, 60, 600, 10_000, 2);
        assert!(window.start <= window.end);
        assert!(window.end <= 5);
    }

    #[test]
    fn test_partial_row_rounds_up() {
        // 630px reveals rows 0..11 (row 10 partially)
        let window = compute_range(100, 60, 630, 0, 0);
        assert_eq!(window.range(), 0..11);
    }

    #[test]
    fn test_default_container_height_before_measurement() {
        let windower = Windower::new(60, 10, 600);
        let window = windower.compute(1000, &ViewportState::new());
        assert_eq!(window.range(), 0..20);

        let measured = ViewportState::measured(120);
        assert_eq!(windower.compute(1000, &measured).range(), 0..12);
        assert_eq!(windower.visible_rows(1000, &measured), 0..2);
    }

    #[test]
    fn test_scroll_helpers() {
        let windower = Windower::new(60, 10, 600);
        let viewport = ViewportState::measured(600);

        assert_eq!(windower.rows_per_page(&viewport), 10);
        assert_eq!(windower.max_scroll_offset(1000, &viewport), 59_400);
        assert_eq!(windower.max_scroll_offset(3, &viewport), 0);
        assert_eq!(windower.clamp_scroll(99_999, 1000, &viewport), 59_400);

        // Row 12 sits below a 600px container scrolled to 0
        assert_eq!(windower.reveal(12, &viewport), 13 * 60 - 600);
        let scrolled = ViewportState {
            scroll_offset: 1200,
            container_height: Some(600),
        };
        assert_eq!(windower.reveal(5, &scrolled), 300);
        assert_eq!(windower.reveal(22, &scrolled), 1200);
    }

    #[test]
    fn test_zero_row_height_is_treated_as_one() {
        let window = compute_range(10, 0, 5, 0, 0);
        assert_eq!(window.range(), 0..5);
    }
}
