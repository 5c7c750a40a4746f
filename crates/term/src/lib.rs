//! Terminal "game renderer" module.
//!
//! A small game-oriented rendering layer: [`GameView`] draws a
//! [`core::GameSnapshot`] into a [`FrameBuffer`], and [`TerminalRenderer`]
//! flushes framebuffers to the terminal with crossterm, diffing against the
//! previous frame. No widget toolkit is involved.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{tint_rgb, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
