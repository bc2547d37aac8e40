use std::str::FromStr;

use enum_iterator::all;
use itertools::Itertools as _;
use lazy_static::lazy_static;

use crate::core::{Board, GameStatus, PlayerMark};
use crate::error::{Error, Result};

pub const N_CELLS: usize = 9;

/// All nine cells set.
const FULL_BOARD: u16 = 0b1_1111_1111;

/// The eight three-in-a-row lines: rows top to bottom, columns left to right, then the two diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

lazy_static! {
    /// Bit for each cell index.
    static ref CELL_MASKS: [u16; N_CELLS] = {
        let mut masks = [0; N_CELLS];
        for (i, m) in masks.iter_mut().enumerate() {
            *m = 1 << i;
        }
        masks
    };
    /// One mask per line in `LINES`.
    static ref WINNING_MASKS: [u16; 8] = LINES.map(|line| {
        line.iter().fold(0u16, |mask, &cell| mask | CELL_MASKS[cell])
    });
}

/// Represents a coordinate on the board
///
///  0 1 2
///  3 4 5
///  6 7 8
///
/// invariant: the number inside must be 0-8. Use `TryFrom<usize>` to build one from user input.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct TTTAddr(usize);

impl TTTAddr {
    pub fn index(&self) -> usize {
        self.0
    }

    fn mask(&self) -> u16 {
        CELL_MASKS[self.0]
    }
}

impl TryFrom<usize> for TTTAddr {
    type Error = Error;
    fn try_from(position: usize) -> Result<Self> {
        if position < N_CELLS {
            Ok(TTTAddr(position))
        } else {
            Err(Error::InvalidPosition { position })
        }
    }
}

impl std::fmt::Display for TTTAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two bit-sets over the nine cells, bit `i` standing for cell `i`.
/// The sets never overlap.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default)]
pub struct TTTBoard {
    crosses: u16,
    naughts: u16,
}

impl TTTBoard {
    /// The bit-set of cells held by `mark`.
    pub fn marks(&self, mark: PlayerMark) -> u16 {
        match mark {
            PlayerMark::Cross => self.crosses,
            PlayerMark::Naught => self.naughts,
        }
    }

    fn occupied(&self) -> u16 {
        self.crosses | self.naughts
    }

    pub fn is_cell_empty(&self, addr: TTTAddr) -> bool {
        self.occupied() & addr.mask() == 0
    }

    pub fn mark_at(&self, addr: TTTAddr) -> Option<PlayerMark> {
        all::<PlayerMark>().find(|&p| self.marks(p) & addr.mask() != 0)
    }

    /// Empty cells in ascending order
    pub fn empty_cells(&self) -> Vec<TTTAddr> {
        let occupied = self.occupied();
        (0..N_CELLS)
            .filter(|&i| occupied & CELL_MASKS[i] == 0)
            .map(TTTAddr)
            .collect()
    }

    /// A new board with `mark` placed at `addr`. `self` is left as it was.
    pub fn apply_move(&self, mark: PlayerMark, addr: TTTAddr) -> Result<Self> {
        if !self.is_cell_empty(addr) {
            return Err(Error::CellOccupied {
                position: addr.index(),
            });
        }
        Ok(self.with_mark(mark, addr))
    }

    fn with_mark(&self, mark: PlayerMark, addr: TTTAddr) -> Self {
        let mut b = *self;
        match mark {
            PlayerMark::Cross => b.crosses |= addr.mask(),
            PlayerMark::Naught => b.naughts |= addr.mask(),
        }
        b
    }

    pub fn is_winner(&self, mark: PlayerMark) -> bool {
        let set = self.marks(mark);
        WINNING_MASKS.iter().any(|&line| set & line == line)
    }

    pub fn is_full(&self) -> bool {
        self.occupied() == FULL_BOARD
    }

    /// Is there a winner? Crosses are checked first, which only matters on boards
    /// that cannot come out of alternating play.
    pub fn winner(&self) -> Option<PlayerMark> {
        all::<PlayerMark>().find(|&p| self.is_winner(p))
    }

    pub fn n_moves_made(&self) -> usize {
        self.occupied().count_ones() as usize
    }
}

impl Board for TTTBoard {
    type Coordinate = TTTAddr;

    fn valid_moves(&self) -> Vec<TTTAddr> {
        self.empty_cells()
    }

    fn place_mark(&self, a: TTTAddr, marker: PlayerMark) -> Result<Self> {
        if self.game_is_over() {
            return Err(Error::GameOver);
        }
        self.apply_move(marker, a)
    }

    fn child(&self, a: TTTAddr, marker: PlayerMark) -> Self {
        assert!(
            self.is_cell_empty(a),
            "There is already a marker at {a}! Invalid move generated"
        );
        self.with_mark(marker, a)
    }

    fn is_winner(&self, mark: PlayerMark) -> bool {
        TTTBoard::is_winner(self, mark)
    }

    fn game_status(&self) -> GameStatus {
        if let Some(p) = self.winner() {
            GameStatus::Won(p)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Undecided
        }
    }

    fn current_player(&self) -> PlayerMark {
        if self.n_moves_made() % 2 == 0 {
            PlayerMark::Cross
        } else {
            PlayerMark::Naught
        }
    }
}

/// Parses nine cells row wise. `x` and `o` (any case) are marks, blank or `.` is an empty cell.
impl FromStr for TTTBoard {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let n_chars = s.chars().count();
        if n_chars != N_CELLS {
            return Err(Error::InvalidBoardLength {
                expected: N_CELLS,
                got: n_chars,
            });
        }
        s.chars()
            .enumerate()
            .try_fold(TTTBoard::default(), |b, (position, c)| {
                let addr = TTTAddr(position);
                match c {
                    'x' | 'X' => Ok(b.with_mark(PlayerMark::Cross, addr)),
                    'o' | 'O' => Ok(b.with_mark(PlayerMark::Naught, addr)),
                    ' ' | '.' => Ok(b),
                    character => Err(Error::InvalidCellCharacter {
                        character,
                        position,
                    }),
                }
            })
    }
}

impl std::fmt::Display for TTTBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = |i| match self.mark_at(TTTAddr(i)) {
            None => "·".to_string(),
            Some(p) => p.to_string(),
        };
        let rows = (0..N_CELLS)
            .chunks(3)
            .into_iter()
            .map(|row| row.map(m).join(" | "))
            .join("\n---------\n");
        writeln!(f, "{rows}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn addr(i: usize) -> TTTAddr {
        TTTAddr::try_from(i).unwrap()
    }

    #[test]
    fn empty_board_has_all_cells_free() {
        let b = TTTBoard::default();
        let cells: Vec<usize> = b.empty_cells().iter().map(TTTAddr::index).collect();
        assert_eq!(cells, (0..9).collect::<Vec<_>>());
        assert_eq!(b.game_status(), GameStatus::Undecided);
        assert!(!b.game_is_over());
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert!(matches!(
            TTTAddr::try_from(9),
            Err(Error::InvalidPosition { position: 9 })
        ));
        assert!(TTTAddr::try_from(8).is_ok());
    }

    #[test]
    fn apply_move_only_touches_target_cell() {
        let b = TTTBoard::from_str("x   o    ").unwrap();
        for cell in b.empty_cells() {
            for mark in all::<PlayerMark>() {
                let child = b.apply_move(mark, cell).unwrap();
                assert_eq!(child.mark_at(cell), Some(mark));
                for other in (0..9).map(addr).filter(|&a| a != cell) {
                    assert_eq!(child.mark_at(other), b.mark_at(other));
                }
                assert_eq!(child.marks(PlayerMark::Cross) & child.marks(PlayerMark::Naught), 0);
            }
        }
        // the source board is untouched
        assert_eq!(b, TTTBoard::from_str("x   o    ").unwrap());
    }

    #[test]
    fn apply_move_rejects_occupied_cell() {
        let b = TTTBoard::from_str("x        ").unwrap();
        assert!(matches!(
            b.apply_move(PlayerMark::Naught, addr(0)),
            Err(Error::CellOccupied { position: 0 })
        ));
    }

    #[test]
    fn detects_every_line() {
        for line in LINES {
            let mut b = TTTBoard::default();
            for cell in line {
                assert!(!b.is_winner(PlayerMark::Naught));
                b = b.apply_move(PlayerMark::Naught, addr(cell)).unwrap();
            }
            assert!(b.is_winner(PlayerMark::Naught));
            assert!(!b.is_winner(PlayerMark::Cross));
            assert_eq!(b.game_status(), GameStatus::Won(PlayerMark::Naught));
        }
    }

    #[test]
    fn top_row_wins() {
        let b = TTTBoard::from_str("xxxoo    ").unwrap();
        assert!(b.is_winner(PlayerMark::Cross));
        assert_eq!(b.winner(), Some(PlayerMark::Cross));
        assert!(b.game_is_over());
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let b = TTTBoard::from_str("xoxxoooxx").unwrap();
        assert!(b.is_full());
        assert!(!b.is_winner(PlayerMark::Cross));
        assert!(!b.is_winner(PlayerMark::Naught));
        assert_eq!(b.game_status(), GameStatus::Draw);
        assert!(b.empty_cells().is_empty());
    }

    #[test]
    fn no_moves_on_finished_board() {
        let b = TTTBoard::from_str("xxxoo    ").unwrap();
        assert!(matches!(
            b.place_mark(addr(8), PlayerMark::Naught),
            Err(Error::GameOver)
        ));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            TTTBoard::from_str("xx"),
            Err(Error::InvalidBoardLength { expected: 9, got: 2 })
        ));
        assert!(matches!(
            TTTBoard::from_str("xx?      "),
            Err(Error::InvalidCellCharacter {
                character: '?',
                position: 2
            })
        ));
        assert_eq!(
            TTTBoard::from_str("X.O......").unwrap(),
            TTTBoard::from_str("x o      ").unwrap()
        );
    }

    #[test]
    fn renders_grid() {
        let b = TTTBoard::from_str("x   o    ").unwrap();
        assert_eq!(
            b.to_string(),
            "X | · | ·\n---------\n· | O | ·\n---------\n· | · | ·\n"
        );
        assert_eq!(b.n_moves_made(), 2);
    }

    #[test]
    fn crosses_move_on_even_counts() {
        let mut b = TTTBoard::default();
        assert_eq!(b.current_player(), PlayerMark::Cross);
        let moves = [
            (4, PlayerMark::Naught),
            (0, PlayerMark::Cross),
            (8, PlayerMark::Naught),
        ];
        for (cell, next) in moves {
            b = b.place_mark(addr(cell), b.current_player()).unwrap();
            assert_eq!(b.current_player(), next);
        }
        assert_eq!(b.marks(PlayerMark::Cross).count_ones(), 2);
    }
}
