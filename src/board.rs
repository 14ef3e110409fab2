//! Queen placements, the conflict heuristic and the single-move neighborhood.
//!
//! A [`Board`] stores one column index per row, so "one queen per row" holds
//! by construction. Column and diagonal clashes are what [`heuristic`] counts.

use crate::error::BoardError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

pub const BOARD_SIZE: usize = 5;

/// Placement the demo starts from and returns to on reset.
pub const INITIAL_QUEENS: [usize; BOARD_SIZE] = [4, 0, 4, 0, 4];

/// Whether the queens of rows `i` and `j` share a column or a diagonal.
fn attacks(queens: &[usize], i: usize, j: usize) -> bool {
    queens[i] == queens[j] || queens[i].abs_diff(queens[j]) == i.abs_diff(j)
}

/// Number of attacking queen pairs among all row pairs. Zero means solved.
pub fn heuristic(queens: &[usize]) -> usize {
    let n = queens.len();
    let mut threats = 0;
    for i in 0..n {
        for j in i + 1..n {
            if attacks(queens, i, j) {
                threats += 1;
            }
        }
    }
    threats
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    queens: Vec<usize>,
}

impl Board {
    /// Builds a board from per-row columns, rejecting columns outside `0..len`.
    pub fn new(queens: Vec<usize>) -> Result<Self, BoardError> {
        let size = queens.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }
        if let Some((row, &column)) = queens.iter().enumerate().find(|(_, &c)| c >= size) {
            return Err(BoardError::ColumnOutOfRange { row, column, size });
        }
        Ok(Self { queens })
    }

    pub fn initial() -> Self {
        Self {
            queens: INITIAL_QUEENS.to_vec(),
        }
    }

    pub fn size(&self) -> usize {
        self.queens.len()
    }

    pub fn queens(&self) -> &[usize] {
        &self.queens
    }

    pub fn column(&self, row: usize) -> usize {
        self.queens[row]
    }

    pub fn heuristic(&self) -> usize {
        heuristic(&self.queens)
    }

    pub fn is_solved(&self) -> bool {
        self.heuristic() == 0
    }

    /// Copy of this board with the queen of `row` moved to `column`.
    pub fn with_move(&self, row: usize, column: usize) -> Self {
        let mut queens = self.queens.clone();
        queens[row] = column;
        Self { queens }
    }

    /// Every board reachable by moving exactly one queen within its row.
    pub fn neighbors(&self) -> Neighbors<'_> {
        Neighbors {
            board: self,
            row: 0,
            column: 0,
        }
    }

    /// Permutes the rows' columns in place. The multiset of columns is kept.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.queens.shuffle(rng);
    }

    /// Row pairs `(i, j)` with `i < j` whose queens attack each other.
    pub fn attacking_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size();
        (0..n)
            .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
            .filter(move |&(i, j)| attacks(&self.queens, i, j))
    }

    /// Whether a queen from some other row attacks the square `(row, column)`.
    ///
    /// The queen of `row` itself is ignored, so for an occupied square this
    /// tells whether that queen is in conflict.
    pub fn is_threatened(&self, row: usize, column: usize) -> bool {
        self.queens.iter().enumerate().any(|(r, &c)| {
            r != row && (c == column || c.abs_diff(column) == r.abs_diff(row))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// Letter name of a column: `a`..`z`, then `aa`, `ab`, ... on wider boards.
pub fn file_label(column: usize) -> String {
    let mut letters = Vec::new();
    let mut n = column + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

impl fmt::Display for Board {
    /// Chess-style squares, e.g. `b1, d2, a3, c4, e5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, &column) in self.queens.iter().enumerate() {
            if row > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}{}", file_label(column), row + 1)?;
        }
        Ok(())
    }
}

/// Lazy single-move neighborhood of a [`Board`], row-major then by column.
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    board: &'a Board,
    row: usize,
    column: usize,
}

impl Iterator for Neighbors<'_> {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        let n = self.board.size();
        while self.row < n {
            let (row, column) = (self.row, self.column);
            self.column += 1;
            if self.column == n {
                self.column = 0;
                self.row += 1;
            }
            if self.board.column(row) != column {
                return Some(self.board.with_move(row, column));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.board.size();
        if self.row >= n {
            return (0, Some(0));
        }
        // Moves left in the current row, then all later rows.
        let own = self.board.column(self.row);
        let in_row = (n - self.column) - usize::from(own >= self.column);
        let remaining = in_row + (n - self.row - 1) * (n - 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Neighbors<'_> {}

/// Every assignment on an `n`-board, in lexicographic order.
#[cfg(test)]
pub(crate) fn all_boards(n: usize) -> Vec<Board> {
    let mut out = Vec::new();
    let mut queens = vec![0; n];
    loop {
        out.push(Board {
            queens: queens.clone(),
        });
        let mut i = n;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            queens[i] += 1;
            if queens[i] < n {
                break;
            }
            queens[i] = 0;
        }
    }
}
