//! Clickable UI building blocks.
//!
//! [`ClickableList`] pairs rendered lines with the click action of the row
//! they end up on, so rendering and hit regions cannot drift apart.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

/// A builder that pairs rendered [`Line`]s with click actions.
///
/// # Example
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("SHOP"));
/// cl.push_clickable(Line::from("Miner  BUY (15 COINS)"), BUY_ENTRY_BASE);
/// cl.register_targets(area, &mut cs, 1, 1, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that triggers `action_id` when tapped.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Rows each logical line occupies when wrapped to `inner_width`
    /// (`0` = no wrapping).
    fn visual_heights(&self, inner_width: u16) -> Vec<u16> {
        let w = inner_width as usize;
        self.lines
            .iter()
            .map(|line| {
                let lw = line.width();
                if w == 0 || lw <= w {
                    1
                } else {
                    lw.div_ceil(w) as u16
                }
            })
            .collect()
    }

    /// Total rows the content needs at `inner_width`, borders excluded.
    pub fn visual_height(&self, inner_width: u16) -> u16 {
        self.visual_heights(inner_width)
            .into_iter()
            .fold(0u16, |acc, h| acc.saturating_add(h))
    }

    /// Register click targets for all clickable lines.
    ///
    /// * `top_offset` / `bottom_offset`: rows taken by borders above/below content.
    /// * `inner_width`: content width for wrap calculation, or `0` when the
    ///   paragraph does not wrap (one logical line = one row).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let visual_heights = self.visual_heights(inner_width);
        let mut visual_starts: Vec<u16> = Vec::with_capacity(visual_heights.len());
        let mut cumulative: u16 = 0;
        for &h in &visual_heights {
            visual_starts.push(cumulative);
            cumulative = cumulative.saturating_add(h);
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            for r in 0..visual_heights[li] {
                let screen_row = content_y + visual_starts[li] + r;
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}

impl Default for ClickableList<'_> {
    fn default() -> Self {
        Self::new()
    }
}
