//! TUI Pipes (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_pipes::{core,input,term,types}` so
//! the binary, integration tests and benches share one import path.

pub use tui_pipes_core as core;
pub use tui_pipes_input as input;
pub use tui_pipes_term as term;
pub use tui_pipes_types as types;
