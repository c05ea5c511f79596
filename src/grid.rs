//! Grid layout engine: maps a screen's flat button list onto cell geometry.

use ratatui::layout::Rect;

use crate::{
    config::GridCfg,
    schema::{Button, COLUMNS, Screen},
};

/// Viewport orientation. Landscape splits the button list into two
/// side-by-side column groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Derive the orientation from cell dimensions. Terminal cells are
    /// roughly twice as tall as wide, so an area only reads as landscape
    /// once its width is at least twice its height.
    pub fn of(width: u16, height: u16) -> Self {
        if width >= height.saturating_mul(2) {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// The area a screen is laid out into, plus its orientation.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub area: Rect,
    pub orientation: Orientation,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            orientation: Orientation::of(area.width, area.height),
        }
    }

    #[cfg(test)]
    pub fn with_orientation(area: Rect, orientation: Orientation) -> Self {
        Self { area, orientation }
    }
}

/// What a positioned item renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacedKind {
    /// An actionable button with a visible label.
    Button,
    /// A full-width horizontal divider.
    Separator,
}

/// One renderable item. `index` is the item's position in `Screen::ui`, so
/// `(screen id, kind, index)` identifies it stably across re-renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub kind: PlacedKind,
    pub index: usize,
    pub rect: Rect,
}

/// Lay out a screen inside the viewport.
///
/// Pure function of its inputs; output order equals `Screen::ui` order.
/// Items past the bottom of the viewport are still emitted with their true
/// geometry and are clipped by the renderer.
pub fn layout_screen(screen: &Screen, viewport: &Viewport, cfg: &GridCfg) -> Vec<Placed> {
    let indexed: Vec<(usize, &Button)> = screen.ui.iter().enumerate().collect();

    match viewport.orientation {
        Orientation::Portrait => pack_column(&indexed, viewport.area, cfg),
        Orientation::Landscape => {
            // Positional bisection of the flat list, not a span-aware
            // balance: the left group gets the extra item on odd counts.
            let split = indexed.len().div_ceil(2);
            let gutter = cfg.gap.max(1);
            let half = viewport.area.width.saturating_sub(gutter) / 2;
            let left = Rect::new(viewport.area.x, viewport.area.y, half, viewport.area.height);
            let right = Rect::new(
                viewport.area.x + half + gutter,
                viewport.area.y,
                half,
                viewport.area.height,
            );
            let mut placed = pack_column(&indexed[..split], left, cfg);
            placed.extend(pack_column(&indexed[split..], right, cfg));
            placed
        }
    }
}

/// Pack one column group.
///
/// Items are placed left to right at the current span offset; the row
/// accumulator resets when it reaches the 6-unit budget. There is no
/// lookahead: an item whose span overflows the current row is not wrapped,
/// because configuration authors are expected to size spans to sum to 6 per
/// intended row.
fn pack_column(items: &[(usize, &Button)], area: Rect, cfg: &GridCfg) -> Vec<Placed> {
    // Width of one grid unit once the five inter-unit gaps are budgeted.
    let unit = area.width.saturating_sub(cfg.gap * (COLUMNS - 1)) / COLUMNS;

    let mut placed = Vec::new();
    let mut acc: u16 = 0;
    let mut y = area.y;
    let mut row_max: u16 = 0;

    for &(index, button) in items {
        let span = button.span.clamp(1, COLUMNS);
        let x = area.x + (unit + cfg.gap) * acc;
        let width = unit * span + cfg.gap * (span - 1);

        if button.label.is_empty() {
            // Full-row empty items are dividers; partial-width ones render
            // as nothing but still consume their span slot.
            if span == COLUMNS {
                placed.push(Placed {
                    kind: PlacedKind::Separator,
                    index,
                    rect: Rect::new(x, y, width, 1),
                });
                row_max = row_max.max(1);
            }
        } else {
            let height = cfg.base_height.saturating_mul(button.height.max(1));
            placed.push(Placed {
                kind: PlacedKind::Button,
                index,
                rect: Rect::new(x, y, width, height),
            });
            row_max = row_max.max(height);
        }

        acc += span;
        if acc >= COLUMNS {
            y = y.saturating_add(row_max + cfg.gap);
            acc = 0;
            row_max = 0;
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btn(label: &str, span: u16) -> Button {
        Button { label: label.into(), span, height: 1, url: String::new() }
    }

    fn screen(ui: Vec<Button>) -> Screen {
        Screen { id: "1700000000000-0".into(), title: "Test".into(), ui }
    }

    fn cfg() -> GridCfg {
        GridCfg { base_height: 3, gap: 1 }
    }

    fn portrait(width: u16, height: u16) -> Viewport {
        Viewport::with_orientation(Rect::new(0, 0, width, height), Orientation::Portrait)
    }

    #[test]
    fn test_two_half_row_buttons_share_one_row() {
        // The "Lights" scenario: spans 3 + 3 fill one row exactly.
        let s = screen(vec![btn("On", 3), btn("Off", 3)]);
        let placed = layout_screen(&s, &portrait(60, 24), &cfg());
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].rect.y, placed[1].rect.y);
        assert!(placed[1].rect.x > placed[0].rect.x + placed[0].rect.width - 1);
    }

    #[test]
    fn test_row_advances_after_budget_is_consumed() {
        let s = screen(vec![btn("A", 6), btn("B", 6)]);
        let placed = layout_screen(&s, &portrait(60, 24), &cfg());
        // Second row starts below the first button plus the row gap.
        assert_eq!(placed[1].rect.y, placed[0].rect.y + placed[0].rect.height + 1);
        assert_eq!(placed[1].rect.x, placed[0].rect.x);
    }

    #[test]
    fn test_no_lookahead_packing() {
        // 4 + 4 overflows the row; the second button still lands on row one
        // at offset 4, and only then does the row reset.
        let s = screen(vec![btn("A", 4), btn("B", 4), btn("C", 1)]);
        let placed = layout_screen(&s, &portrait(60, 24), &cfg());
        assert_eq!(placed[0].rect.y, placed[1].rect.y);
        assert!(placed[1].rect.x > placed[0].rect.x);
        assert!(placed[2].rect.y > placed[0].rect.y);
        assert_eq!(placed[2].rect.x, 0);
    }

    #[test]
    fn test_full_width_empty_label_is_a_separator() {
        let s = screen(vec![btn("", 6)]);
        let placed = layout_screen(&s, &portrait(60, 24), &cfg());
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].kind, PlacedKind::Separator);
        assert_eq!(placed[0].rect.height, 1);
    }

    #[test]
    fn test_partial_width_empty_label_renders_nothing() {
        // The spacer is invisible but its slot still offsets the next item.
        let s = screen(vec![btn("", 2), btn("A", 2)]);
        let placed = layout_screen(&s, &portrait(60, 24), &cfg());
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].kind, PlacedKind::Button);
        assert_eq!(placed[0].index, 1);
        assert!(placed[0].rect.x > 0);
    }

    #[test]
    fn test_height_multiplier_scales_button_height() {
        let mut tall = btn("Tall", 6);
        tall.height = 2;
        let s = screen(vec![tall, btn("Next", 6)]);
        let placed = layout_screen(&s, &portrait(60, 24), &cfg());
        assert_eq!(placed[0].rect.height, 6);
        // The tall button pushes the following row down by its full height.
        assert_eq!(placed[1].rect.y, placed[0].rect.y + 7);
    }

    #[test]
    fn test_landscape_bisects_the_item_list() {
        let s = screen(vec![btn("A", 6), btn("B", 6), btn("C", 6), btn("D", 6)]);
        let vp = Viewport::with_orientation(Rect::new(0, 0, 100, 20), Orientation::Landscape);
        let placed = layout_screen(&s, &vp, &cfg());
        assert_eq!(placed.len(), 4);
        // A/B in the left group, C/D in the right group at the same rows.
        assert_eq!(placed[0].rect.x, placed[1].rect.x);
        assert!(placed[2].rect.x > placed[0].rect.x + 40);
        assert_eq!(placed[0].rect.y, placed[2].rect.y);
        assert_eq!(placed[1].rect.y, placed[3].rect.y);
    }

    #[test]
    fn test_landscape_odd_count_favors_left_group() {
        let s = screen(vec![btn("A", 6), btn("B", 6), btn("C", 6)]);
        let vp = Viewport::with_orientation(Rect::new(0, 0, 100, 20), Orientation::Landscape);
        let placed = layout_screen(&s, &vp, &cfg());
        // ceil(3 / 2) = 2 items on the left.
        assert_eq!(placed[0].rect.x, placed[1].rect.x);
        assert!(placed[2].rect.x > placed[1].rect.x);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let s = screen(vec![btn("A", 2), btn("", 6), btn("B", 3), btn("C", 3)]);
        let vp = Viewport::new(Rect::new(0, 0, 80, 24));
        let first = layout_screen(&s, &vp, &cfg());
        let second = layout_screen(&s, &vp, &cfg());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_screen_is_an_empty_grid() {
        let s = screen(vec![]);
        assert!(layout_screen(&s, &portrait(60, 24), &cfg()).is_empty());
    }

    #[test]
    fn test_orientation_threshold() {
        assert_eq!(Orientation::of(80, 24), Orientation::Landscape);
        assert_eq!(Orientation::of(40, 24), Orientation::Portrait);
    }
}
