//! The core abstractions for this application
//!

use std::fmt::Display;

use enum_iterator::Sequence;
use log::debug;

use crate::error::Result;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Sequence)]
pub enum PlayerMark {
    Cross,
    Naught,
}

impl PlayerMark {
    pub fn other(&self) -> Self {
        match *self {
            Self::Cross => Self::Naught,
            Self::Naught => Self::Cross,
        }
    }
}

impl Display for PlayerMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerMark::Cross => write!(f, "X"),
            PlayerMark::Naught => write!(f, "O"),
        }
    }
}

/// The Player trait is the struct that represents a player.
pub trait Player<B: Board> {
    /// The play function is the main mechanic for the AIs
    /// You observe the whole board through a reference and return the coordinate you want to play.
    /// The returned coordinate is validated by the game loop before it is applied.
    fn play(&mut self, b: &B) -> Result<B::Coordinate>;
}

/// A board is an immutable snapshot. Every move derives a new value, the old one is left untouched.
pub trait Board: Display + Default + Copy {
    type Coordinate: Display + Copy + PartialEq;
    /// The coordinates where you are allowed to place your marker in this turn, in a fixed order.
    fn valid_moves(&self) -> Vec<Self::Coordinate>;
    /// The board after `marker` was placed at `a`. Fails if `a` is not a legal move.
    fn place_mark(&self, a: Self::Coordinate, marker: PlayerMark) -> Result<Self>;
    /// Like `place_mark`, but for coordinates taken straight from `valid_moves`.
    /// Panics if the cell is taken, since that is a logic error in the caller.
    fn child(&self, a: Self::Coordinate, marker: PlayerMark) -> Self;
    /// Does `mark` hold a complete line? Both marks may, on boards that alternating play never produces.
    fn is_winner(&self, mark: PlayerMark) -> bool;
    fn game_status(&self) -> GameStatus;
    /// Whose turn it is, assuming crosses made the first move.
    fn current_player(&self) -> PlayerMark;
    fn game_is_over(&self) -> bool {
        !matches!(self.game_status(), GameStatus::Undecided)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Ord, PartialOrd)]
pub enum GameStatus {
    Undecided,
    Draw,
    Won(PlayerMark),
}

#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Ord, PartialOrd)]
pub enum GameEndStatus {
    Draw,
    Won(PlayerMark),
}

impl Display for GameEndStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEndStatus::Draw => write!(f, "draw"),
            GameEndStatus::Won(p) => write!(f, "{p} won"),
        }
    }
}

/// Where a game is between two moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingMove(PlayerMark),
    GameOver(GameEndStatus),
}

impl GamePhase {
    /// The phase that follows `mover` having just played on `board`.
    pub fn after_move<B: Board>(board: &B, mover: PlayerMark) -> Self {
        match board.game_status() {
            GameStatus::Undecided => GamePhase::AwaitingMove(mover.other()),
            GameStatus::Draw => GamePhase::GameOver(GameEndStatus::Draw),
            GameStatus::Won(p) => GamePhase::GameOver(GameEndStatus::Won(p)),
        }
    }
}

/// Play a full game from the empty board. `crosses` plays X and `naughts` plays O.
/// Returns the result together with the final board.
pub fn run_game<B: Board>(
    mut crosses: Box<dyn Player<B> + '_>,
    mut naughts: Box<dyn Player<B> + '_>,
    first: PlayerMark,
) -> Result<(GameEndStatus, B)> {
    let mut board = B::default();
    let mut phase = GamePhase::AwaitingMove(first);
    loop {
        match phase {
            GamePhase::GameOver(result) => {
                debug!("Game ended with {}", result);
                return Ok((result, board));
            }
            GamePhase::AwaitingMove(current_player) => {
                let action = match current_player {
                    PlayerMark::Cross => crosses.play(&board)?,
                    PlayerMark::Naught => naughts.play(&board)?,
                };
                board = board.place_mark(action, current_player)?;
                debug!("Player {} played {}", current_player, action);
                debug!("\n{}", board);
                phase = GamePhase::after_move(&board, current_player);
            }
        }
    }
}
