//! Tic-tac-toe on a pair of bitboards, with an exhaustive minimax opponent that never loses.

pub mod core;
pub mod error;
pub mod game;
pub mod player;
