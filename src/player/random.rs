use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::core::{Board, Player};
use crate::error::{Error, Result};

/// Plays a uniformly random legal move
pub struct RandomAi<R> {
    rng: R,
}

impl<Rng, B> Player<B> for RandomAi<Rng>
where
    Rng: rand::Rng,
    B: Board,
{
    fn play(&mut self, b: &B) -> Result<B::Coordinate> {
        let moves: Vec<_> = b.valid_moves();
        let &choice = moves.choose(&mut self.rng).ok_or(Error::GameOver)?;
        debug!("Random AI plays {}", choice);
        Ok(choice)
    }
}

impl RandomAi<StdRng> {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: match seed {
                None => StdRng::from_entropy(),
                Some(seed) => StdRng::seed_from_u64(seed),
            },
        }
    }
}
