//! Exhaustive minimax over the whole remaining game tree.
//!
//! Scores are -1, 0 or 1 seen from the maximizer. The human is the maximizer and the
//! computer the minimizer, so the engine picks the move with the *lowest* score.

use log::debug;
use rayon::prelude::*;

use crate::core::{Board, Player, PlayerMark};
use crate::error::{Error, Result};

pub type Score = i8;

/// 1 if the maximizer holds a line, -1 if the minimizer does, 0 otherwise.
pub fn evaluate<B: Board>(board: &B, maximizer: PlayerMark) -> Score {
    if board.is_winner(maximizer) {
        1
    } else if board.is_winner(maximizer.other()) {
        -1
    } else {
        0
    }
}

/// Compute the score of a node by use of minimax.
/// `maximizing` tells whose mark goes on the board next: the maximizer's or the other one's.
pub fn minimax<B: Board>(
    node: &B,
    depth: usize,
    maximizing: bool,
    maximizer: PlayerMark,
) -> Score {
    Search::new(maximizer).minimax(node, depth, maximizing)
}

/// The move the computer should play. Ties go to the first coordinate in `valid_moves` order.
pub fn best_move<B: Board>(
    board: &B,
    computer: PlayerMark,
    human: PlayerMark,
) -> Result<B::Coordinate> {
    decide(board, computer, human).map(|d| d.coordinate)
}

/// Same answer as `best_move`, with the top level branches searched on the rayon pool.
pub fn best_move_parallel<B>(
    board: &B,
    computer: PlayerMark,
    human: PlayerMark,
) -> Result<B::Coordinate>
where
    B: Board + Send + Sync,
    B::Coordinate: Send + Sync,
{
    decide_parallel(board, computer, human).map(|d| d.coordinate)
}

/// The outcome of one root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<C> {
    pub coordinate: C,
    pub score: Score,
    pub n_leafs_evaluated: usize,
}

struct Search {
    maximizer: PlayerMark,
    /// A performance counter
    n_leafs_evaluated: usize,
}

impl Search {
    fn new(maximizer: PlayerMark) -> Self {
        Search {
            maximizer,
            n_leafs_evaluated: 0,
        }
    }

    fn evaluate<B: Board>(&mut self, b: &B) -> Score {
        self.n_leafs_evaluated += 1;
        evaluate(b, self.maximizer)
    }

    fn minimax<B: Board>(&mut self, node: &B, depth: usize, maximizing: bool) -> Score {
        let moves = node.valid_moves();
        if depth == 0 || moves.is_empty() || node.game_is_over() {
            return self.evaluate(node);
        }
        let mover = if maximizing {
            self.maximizer
        } else {
            self.maximizer.other()
        };
        let mut value = if maximizing { Score::MIN } else { Score::MAX };
        for addr in moves {
            let child = node.child(addr, mover);
            let newval = self.minimax(&child, depth - 1, !maximizing);
            value = if maximizing {
                value.max(newval)
            } else {
                value.min(newval)
            };
        }
        value
    }

    /// Score of the computer playing `addr`, with the human to reply.
    fn score_root_move<B: Board>(
        &mut self,
        board: &B,
        addr: B::Coordinate,
        computer: PlayerMark,
        depth: usize,
    ) -> Score {
        let child = board.child(addr, computer);
        self.minimax(&child, depth, true)
    }
}

fn check_preconditions<B: Board>(
    board: &B,
    computer: PlayerMark,
    human: PlayerMark,
) -> Result<Vec<B::Coordinate>> {
    if computer == human {
        return Err(Error::SamePlayer);
    }
    let moves = board.valid_moves();
    if board.game_is_over() || moves.is_empty() {
        return Err(Error::GameOver);
    }
    Ok(moves)
}

/// First minimum in enumeration order.
fn pick<C: Copy>(scored: &[(C, Score, usize)]) -> Result<Decision<C>> {
    let n_leafs_evaluated = scored.iter().map(|&(_, _, n)| n).sum();
    scored
        .iter()
        .min_by_key(|&&(_, score, _)| score)
        .map(|&(coordinate, score, _)| Decision {
            coordinate,
            score,
            n_leafs_evaluated,
        })
        .ok_or(Error::GameOver)
}

/// Score every legal move of the computer and pick the lowest.
pub fn decide<B: Board>(
    board: &B,
    computer: PlayerMark,
    human: PlayerMark,
) -> Result<Decision<B::Coordinate>> {
    let moves = check_preconditions(board, computer, human)?;
    let depth = moves.len();
    let scored: Vec<_> = moves
        .iter()
        .map(|&addr| {
            let mut search = Search::new(human);
            let score = search.score_root_move(board, addr, computer, depth);
            (addr, score, search.n_leafs_evaluated)
        })
        .collect();
    pick(&scored)
}

pub fn decide_parallel<B>(
    board: &B,
    computer: PlayerMark,
    human: PlayerMark,
) -> Result<Decision<B::Coordinate>>
where
    B: Board + Send + Sync,
    B::Coordinate: Send + Sync,
{
    let moves = check_preconditions(board, computer, human)?;
    let depth = moves.len();
    // collect keeps the order of `moves`, so ties resolve exactly as in `decide`
    let scored: Vec<_> = moves
        .par_iter()
        .map(|&addr| {
            let mut search = Search::new(human);
            let score = search.score_root_move(board, addr, computer, depth);
            (addr, score, search.n_leafs_evaluated)
        })
        .collect();
    pick(&scored)
}

/// A player that always plays the minimax move for its own mark, treating the opponent as the maximizer.
pub struct MinMaxAi {
    my_marker: PlayerMark,
    /// A performance counter, summed over all moves this player made
    n_leafs_evaluated: usize,
    parallel: bool,
}

impl MinMaxAi {
    pub fn new(mark: PlayerMark) -> Self {
        Self {
            my_marker: mark,
            n_leafs_evaluated: 0,
            parallel: false,
        }
    }

    /// Search the top level branches concurrently.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn n_leafs_evaluated(&self) -> usize {
        self.n_leafs_evaluated
    }
}

impl<B> Player<B> for MinMaxAi
where
    B: Board + Send + Sync,
    B::Coordinate: Send + Sync,
{
    fn play(&mut self, b: &B) -> Result<B::Coordinate> {
        let human = self.my_marker.other();
        let decision = if self.parallel {
            decide_parallel(b, self.my_marker, human)?
        } else {
            decide(b, self.my_marker, human)?
        };
        debug!(
            "minimax {} picks {} with score {} after {} evaluations",
            self.my_marker, decision.coordinate, decision.score, decision.n_leafs_evaluated
        );
        self.n_leafs_evaluated += decision.n_leafs_evaluated;
        Ok(decision.coordinate)
    }
}

impl Drop for MinMaxAi {
    fn drop(&mut self) {
        debug!("MinMaxAi evaluated {} leaf nodes", self.n_leafs_evaluated);
    }
}
