//! Chess rules for Charisma Chess.
//!
//! A mailbox position with legal and pseudo-legal move generation, attack
//! queries, FEN and SAN/UCI notation, and terminal-state detection. It also
//! exposes [`Position::relocate`], a raw board edit that ignores movement
//! rules, which the morale layer uses for heroic moves.

pub mod board;
pub mod error;
pub mod movegen;
pub mod notation;
pub mod status;
pub mod types;

pub use board::*;
pub use error::*;
pub use movegen::*;
pub use notation::*;
pub use status::*;
pub use types::*;

#[cfg(test)]
mod movegen_tests;
