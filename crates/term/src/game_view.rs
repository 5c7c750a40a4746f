//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so layout is unit-testable.

use crate::core::{shape_of, GameSnapshot};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Cell, Status, Tint, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Board origin inside the viewport (top-left of the border).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

/// Widest board cell, in terminal columns.
pub const MAX_CELL_W: u16 = 4;

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell roughly squares typical terminal glyphs.
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// `cell_w` is clamped to `1..=MAX_CELL_W`.
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
        }
    }

    /// Where the bordered well lands for `viewport` (centered).
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 + 2;
        Layout {
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Render into an existing framebuffer (resized to `viewport`).
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let layout = self.layout(viewport);

        let border = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        draw_border(fb, layout, border);

        let grid = snap.composited();
        for (y, row) in grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.draw_cell(fb, layout, x as u16, y as u16, *cell);
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        let overlay = match snap.status {
            Status::Idle => Some("PRESS ENTER"),
            Status::Paused => Some("PAUSED"),
            Status::Over => Some("GAME OVER"),
            Status::Playing => None,
        };
        if let Some(text) = overlay {
            draw_overlay_text(fb, layout, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16, cell: Cell) {
        let (ch, style) = match cell {
            Some(tint) => ('█', Style::new(tint_rgb(tint), WELL_BG).bold()),
            None => ('·', Style::new(Rgb::new(90, 90, 100), WELL_BG).dim()),
        };
        let px = layout.frame_x + 1 + x * self.cell_w;
        let py = layout.frame_y + 1 + y;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout.frame_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.frame_y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        let (matrix, tint) = shape_of(snap.next);
        let style = Style::new(tint_rgb(tint), PANEL_BG).bold();
        for (dx, dy) in matrix.cells() {
            let px = panel_x + dx as u16 * self.cell_w;
            fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, layout: Layout, style: Style) {
    let Layout {
        frame_x: x,
        frame_y: y,
        frame_w: w,
        frame_h: h,
    } = layout;

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: Layout, text: &str) {
    let mid_y = layout.frame_y + layout.frame_h / 2;
    let text_w = text.chars().count() as u16;
    let x = layout.frame_x + layout.frame_w.saturating_sub(text_w) / 2;
    let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}

/// Terminal color for a cell tint.
pub fn tint_rgb(tint: Tint) -> Rgb {
    match tint {
        Tint::Cyan => Rgb::new(80, 220, 220),
        Tint::Yellow => Rgb::new(240, 220, 80),
        Tint::Purple => Rgb::new(200, 120, 220),
        Tint::Green => Rgb::new(100, 220, 120),
        Tint::Red => Rgb::new(220, 80, 80),
        Tint::Blue => Rgb::new(80, 120, 220),
        Tint::Orange => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::PieceKind;

    const VIEW: Viewport = Viewport {
        width: 60,
        height: 24,
    };

    fn screen(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn layout_centers_the_well() {
        let layout = GameView::default().layout(VIEW);
        assert_eq!(layout.frame_w, 22);
        assert_eq!(layout.frame_h, 22);
        assert_eq!(layout.frame_x, 19);
        assert_eq!(layout.frame_y, 1);
    }

    #[test]
    fn idle_shows_press_enter() {
        let fb = GameView::default().render(&GameSnapshot::default(), VIEW);
        assert!(screen(&fb).contains("PRESS ENTER"));
    }

    #[test]
    fn active_piece_is_drawn_in_its_tint() {
        let mut game = GameState::new(5);
        game.start();
        let snap = game.snapshot();
        let active = snap.active.unwrap();

        let view = GameView::default();
        let layout = view.layout(VIEW);
        let fb = view.render(&snap, VIEW);

        let (x, y) = active.cells().next().unwrap();
        let glyph = fb
            .get(layout.frame_x + 1 + x as u16 * 2, layout.frame_y + 1 + y as u16)
            .unwrap();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, tint_rgb(active.tint));
        assert!(!screen(&fb).contains("PRESS ENTER"));
    }

    #[test]
    fn panel_shows_counters_and_next() {
        let mut snap = GameSnapshot::default();
        snap.status = Status::Playing;
        snap.score = 2400;
        snap.level = 3;
        snap.next = PieceKind::O;

        let view = GameView::default();
        let layout = view.layout(VIEW);
        let fb = view.render(&snap, VIEW);
        let text = screen(&fb);
        assert!(text.contains("SCORE"));
        assert!(text.contains("2400"));
        assert!(text.contains("NEXT"));

        // O preview: 2x2 cells below the NEXT label.
        let panel_x = layout.frame_x + layout.frame_w + 2;
        let preview_y = layout.frame_y + 10;
        let glyph = fb.get(panel_x, preview_y).unwrap();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, tint_rgb(Tint::Yellow));
    }

    #[test]
    fn overlays_follow_status() {
        let view = GameView::default();
        let mut snap = GameSnapshot::default();

        snap.status = Status::Paused;
        assert!(screen(&view.render(&snap, VIEW)).contains("PAUSED"));

        snap.status = Status::Over;
        assert!(screen(&view.render(&snap, VIEW)).contains("GAME OVER"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let fb = GameView::default().render(&GameSnapshot::default(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }

    #[test]
    fn cell_width_is_clamped() {
        let wide = GameView::new(u16::MAX);
        assert_eq!(wide.layout(Viewport::new(120, 30)).frame_w, 42);
        let fb = wide.render(&GameSnapshot::default(), Viewport::new(120, 30));
        assert_eq!(fb.width(), 120);

        let narrow = GameView::new(0);
        assert_eq!(narrow.layout(Viewport::new(120, 30)).frame_w, 12);
    }
}
