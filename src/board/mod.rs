//! Board projection and the stateful board handle presentation layers drive.
//!
//! The board never updates incrementally: every command is followed by a
//! full reload from the store, and [`BoardState`] is rebuilt from scratch.

mod render;
mod session;
mod state;

pub use render::{CARD_TIME_FORMAT, render_board, render_card};
pub use session::{Board, BoardCommand, CommandOutcome};
pub use state::BoardState;
