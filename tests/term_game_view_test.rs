//! GameView rendering against real game snapshots

use blockfall::core::{GameState, ScriptedPieces};
use blockfall::term::{tint_rgb, FrameBuffer, GameView, Viewport};
use blockfall::types::{GameAction, PieceKind, Tint};

fn screen(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_render_reuses_framebuffer_across_sizes() {
    let view = GameView::default();
    let state = GameState::new(1);
    let snap = state.snapshot();

    let mut fb = FrameBuffer::new(0, 0);
    view.render_into(&snap, Viewport::new(80, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (80, 24));
    assert!(screen(&fb).contains("PRESS ENTER"));

    view.render_into(&snap, Viewport::new(40, 22), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 22));
}

#[test]
fn test_locked_cells_keep_piece_tint() {
    let mut state = GameState::with_source(ScriptedPieces::new(vec![PieceKind::I, PieceKind::T]));
    state.start();
    state.apply_action(GameAction::HardDrop);

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let layout = view.layout(vp);
    let fb = view.render(&state.snapshot(), vp);

    // The I bar landed on the bottom row, columns 3..=6.
    for x in 3..=6u16 {
        let glyph = fb
            .get(layout.frame_x + 1 + x * 2, layout.frame_y + 20)
            .unwrap();
        assert_eq!(glyph.style.fg, tint_rgb(Tint::Cyan));
    }
    let empty = fb.get(layout.frame_x + 1, layout.frame_y + 20).unwrap();
    assert_eq!(empty.ch, '·');
}

#[test]
fn test_game_over_overlay() {
    let mut state = GameState::with_source(ScriptedPieces::repeat(PieceKind::O));
    state.start();
    for _ in 0..10 {
        state.apply_action(GameAction::HardDrop);
    }
    let fb = GameView::default().render(&state.snapshot(), Viewport::new(80, 24));
    assert!(screen(&fb).contains("GAME OVER"));
}
