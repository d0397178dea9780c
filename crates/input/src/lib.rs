//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`], turns mouse
//! clicks into screen points for `Board::place`, and tracks the keyboard
//! placement cursor.

pub mod cursor;
pub mod map;

pub use tui_pipes_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, mouse_click, should_quit};
