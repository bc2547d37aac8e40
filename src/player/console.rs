use std::io::{BufRead, StdinLock, Write};

use itertools::Itertools as _;

use crate::{
    core::{Player, PlayerMark},
    error::{Error, Result},
    game::tictactoe::{TTTAddr, TTTBoard},
};

/// Reads moves typed by a human. Bad input is reported and asked for again.
pub struct ConsolePlayer<R> {
    pub name: String,
    input: R,
}

impl ConsolePlayer<StdinLock<'static>> {
    pub fn new(mark: PlayerMark) -> Self {
        Self::with_input(mark, std::io::stdin().lock())
    }
}

impl<R: BufRead> ConsolePlayer<R> {
    pub fn with_input(mark: PlayerMark, input: R) -> Self {
        ConsolePlayer {
            name: mark.to_string(),
            input,
        }
    }
}

/// Turn a line of input into an empty cell of `board`.
pub fn parse_cell(line: &str, board: &TTTBoard) -> Result<TTTAddr> {
    let line = line.trim();
    let num: usize = line.parse().map_err(|_| Error::NotANumber {
        input: line.to_string(),
    })?;
    let addr = TTTAddr::try_from(num)?;
    if !board.is_cell_empty(addr) {
        return Err(Error::CellOccupied { position: num });
    }
    Ok(addr)
}

impl<R: BufRead> Player<TTTBoard> for ConsolePlayer<R> {
    fn play(&mut self, b: &TTTBoard) -> Result<TTTAddr> {
        println!("Time for {} to make a move", self.name);
        print!("{}", b);
        println!("Cells are numbered 0-8, 0 = top left, 8 = bottom right");
        println!("Open cells: {}", b.empty_cells().iter().join(" "));
        loop {
            print!("where to move? ");
            std::io::stdout().flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }
            match parse_cell(&line, b) {
                Ok(addr) => return Ok(addr),
                Err(e) => eprintln!("{e}"),
            }
        }
    }
}
