pub mod console;
pub mod min_max;
pub mod random;

pub use console::ConsolePlayer;
pub use min_max::{best_move, best_move_parallel, MinMaxAi};
pub use random::RandomAi;
