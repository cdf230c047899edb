//! Clickable line lists.
//!
//! Rendering and click registration live together: a line pushed with
//! [`ClickableList::push_clickable`] is registered at whatever row it ends
//! up on, so inserting lines above it never desyncs the hit area.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;
use ratzilla::ratatui::widgets::Block;

use crate::input::ClickState;

/// Lines paired with optional click action ids.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Queue"));
/// cl.push_clickable(Line::from("[P] Lock in"), LOCK_IN);
/// cl.register_targets_with_block(area, &block, &mut cs, 0, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line index, action id)`.
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every visual row of every clickable line.
    ///
    /// `top_offset`/`bottom_offset` are rows taken by borders, `scroll` is
    /// the vertical scroll in visual rows. With `inner_width == 0` every
    /// line is one row; otherwise lines wider than it are assumed to wrap.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let mut starts = Vec::with_capacity(self.lines.len());
        let mut heights = Vec::with_capacity(self.lines.len());
        let mut row: u16 = 0;
        for line in &self.lines {
            let h = match (inner_width as usize, line.width()) {
                (0, _) => 1,
                (w, lw) if lw <= w => 1,
                (w, lw) => lw.div_ceil(w) as u16,
            };
            starts.push(row);
            heights.push(h);
            row += h;
        }

        for &(index, action_id) in &self.actions {
            for visual in starts[index]..starts[index] + heights[index] {
                if visual < scroll {
                    continue;
                }
                let screen_row = content_y + (visual - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }

    /// [`register_targets`](Self::register_targets) with the offsets taken
    /// from the block the lines are rendered in.
    pub fn register_targets_with_block(
        &self,
        area: Rect,
        block: &Block,
        cs: &mut ClickState,
        scroll: u16,
        inner_width: u16,
    ) {
        let inner = block.inner(area);
        let top = inner.y - area.y;
        let bottom = (area.y + area.height).saturating_sub(inner.y + inner.height);
        self.register_targets(area, cs, top, bottom, scroll, inner_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratzilla::ratatui::widgets::Borders;

    #[test]
    fn rows_follow_line_positions() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Queue"));
        cl.push_clickable(Line::from("slot 0"), 30);
        cl.push_clickable(Line::from("slot 1"), 31);
        cl.push(Line::from(""));

        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 7), Some(30));
        assert_eq!(cs.hit_test(10, 8), Some(31));
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn scrolled_and_clipped_rows_are_skipped() {
        let mut cl = ClickableList::new();
        for i in 0..6 {
            cl.push_clickable(Line::from(format!("stage {i}")), 10 + i);
        }
        let area = Rect::new(0, 0, 80, 4);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 1, 2, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(3, 0), Some(12));
        assert_eq!(cs.hit_test(3, 2), Some(14));
        assert_eq!(cs.hit_test(3, 3), None);
    }

    #[test]
    fn wrapped_lines_cover_every_row() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("12345678901234567890"));
        cl.push_clickable(Line::from("123456789012345"), 42);

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 0, 10);

        assert_eq!(cs.hit_test(5, 1), None);
        assert_eq!(cs.hit_test(5, 2), Some(42));
        assert_eq!(cs.hit_test(5, 3), Some(42));
        assert_eq!(cs.hit_test(5, 4), None);
    }

    #[test]
    fn block_borders_set_offsets() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("[Enter] Begin"), 1);

        let area = Rect::new(0, 0, 40, 5);
        let block = Block::default().borders(Borders::ALL);
        let mut cs = ClickState::new();
        cl.register_targets_with_block(area, &block, &mut cs, 0, 0);

        assert_eq!(cs.hit_test(5, 0), None);
        assert_eq!(cs.hit_test(5, 1), Some(1));
    }

    #[test]
    fn empty_list_registers_nothing() {
        let cl = ClickableList::new();
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 80, 10), &mut cs, 1, 1, 0, 0);
        assert!(cs.targets.is_empty());
        assert!(cl.into_lines().is_empty());
    }
}
