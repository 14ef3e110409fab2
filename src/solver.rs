//! Steepest-descent hill climbing with a random shuffle on plateaus.

use crate::board::Board;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
    Solved,
}

/// Whether the driver should keep pumping [`HillClimber::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Moved to the first strictly better neighbor with the lowest score.
    Improved,
    /// No neighbor was strictly better; the columns were shuffled.
    Shuffled,
    /// Reached a board without attacking pairs.
    Solved,
}

impl StepKind {
    pub fn label(self) -> &'static str {
        match self {
            StepKind::Improved => "improved",
            StepKind::Shuffled => "shuffled",
            StepKind::Solved => "solved",
        }
    }
}

/// Outcome of one call to [`HillClimber::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub board: Board,
    pub score: usize,
    /// `None` when the solver was not searching and nothing moved.
    pub kind: Option<StepKind>,
    pub signal: Signal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub step: usize,
    pub board: Board,
    pub score: usize,
    pub kind: StepKind,
}

pub struct HillClimber {
    initial: Board,
    board: Board,
    state: SearchState,
    solutions: usize,
    trace: Vec<TraceEntry>,
    rng: StdRng,
}

impl HillClimber {
    pub fn new() -> Self {
        Self::with_rng(Board::initial(), StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Board::initial(), StdRng::seed_from_u64(seed))
    }

    /// Searches from `initial`, which also becomes the reset target.
    pub fn from_board(initial: Board, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(initial, rng)
    }

    fn with_rng(initial: Board, rng: StdRng) -> Self {
        Self {
            board: initial.clone(),
            initial,
            state: SearchState::Idle,
            solutions: 0,
            trace: Vec::new(),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn score(&self) -> usize {
        self.board.heuristic()
    }

    pub fn solutions(&self) -> usize {
        self.solutions
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn result_message(&self) -> String {
        format!("{} solution(s) found", self.solutions)
    }

    /// Begins stepping and zeroes the solution counter.
    ///
    /// Starting after a solve continues from the current board. A start while
    /// already searching changes nothing.
    pub fn start(&mut self) {
        if self.state != SearchState::Searching {
            log::info!("search started from [{}]", self.board);
            self.state = SearchState::Searching;
            self.solutions = 0;
        }
    }

    pub fn reset(&mut self) {
        log::info!("search reset after {} steps", self.trace.len());
        self.board = self.initial.clone();
        self.state = SearchState::Idle;
        self.solutions = 0;
        self.trace.clear();
    }

    /// One hill-climbing move.
    ///
    /// The best neighbor is the first one found with the lowest score strictly
    /// below the current one. With no such neighbor the current board is
    /// shuffled instead. Reaching score zero stops the search.
    pub fn step(&mut self) -> Step {
        if self.state != SearchState::Searching {
            return Step {
                board: self.board.clone(),
                score: self.score(),
                kind: None,
                signal: Signal::Stop,
            };
        }

        let current = self.board.heuristic();
        let kind = if current == 0 {
            StepKind::Solved
        } else {
            let mut best = current;
            let mut next = None;
            for neighbor in self.board.neighbors() {
                let h = neighbor.heuristic();
                if h < best {
                    best = h;
                    next = Some(neighbor);
                }
            }
            match next {
                Some(neighbor) => {
                    self.board = neighbor;
                    if best == 0 {
                        StepKind::Solved
                    } else {
                        StepKind::Improved
                    }
                }
                None => {
                    log::trace!("plateau at {} threats, shuffling", current);
                    self.board.shuffle(&mut self.rng);
                    StepKind::Shuffled
                }
            }
        };

        let score = self.board.heuristic();
        self.trace.push(TraceEntry {
            step: self.trace.len() + 1,
            board: self.board.clone(),
            score,
            kind,
        });
        log::debug!(
            "step {}: [{}] {} threats ({})",
            self.trace.len(),
            self.board,
            score,
            kind.label()
        );

        let signal = if kind == StepKind::Solved {
            self.solutions += 1;
            self.state = SearchState::Solved;
            log::info!("solved in {} steps: [{}]", self.trace.len(), self.board);
            Signal::Stop
        } else {
            Signal::Continue
        };

        Step {
            board: self.board.clone(),
            score,
            kind: Some(kind),
            signal,
        }
    }

    /// Starts if needed and steps until solved or `max_steps` is spent.
    ///
    /// Returns the number of steps taken when a solution was reached.
    pub fn run(&mut self, max_steps: usize) -> Option<usize> {
        self.start();
        for taken in 1..=max_steps {
            if self.step().signal == Signal::Stop {
                return Some(taken);
            }
        }
        log::info!("no solution within {} steps", max_steps);
        None
    }
}

impl Default for HillClimber {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{all_boards, BOARD_SIZE, INITIAL_QUEENS};

    fn board(queens: &[usize]) -> Board {
        Board::new(queens.to_vec()).unwrap()
    }

    #[test]
    fn starts_idle_on_initial_board() {
        let solver = HillClimber::with_seed(1);
        assert_eq!(solver.state(), SearchState::Idle);
        assert_eq!(solver.board().queens(), &INITIAL_QUEENS);
        assert_eq!(solver.score(), 4);
    }

    #[test]
    fn step_while_idle_is_a_no_op() {
        let mut solver = HillClimber::with_seed(1);
        let step = solver.step();
        assert_eq!(step.signal, Signal::Stop);
        assert_eq!(step.kind, None);
        assert_eq!(step.board, Board::initial());
        assert!(solver.trace().is_empty());
    }

    #[test]
    fn descends_from_initial_board_to_solution() {
        let mut solver = HillClimber::with_seed(1);
        solver.start();

        let expected = [
            ([4, 0, 3, 0, 4], 2, StepKind::Improved, Signal::Continue),
            ([2, 0, 3, 0, 4], 1, StepKind::Improved, Signal::Continue),
            ([2, 0, 3, 1, 4], 0, StepKind::Solved, Signal::Stop),
        ];
        for (queens, score, kind, signal) in expected {
            let step = solver.step();
            assert_eq!(step.board.queens(), &queens);
            assert_eq!(step.score, score);
            assert_eq!(step.kind, Some(kind));
            assert_eq!(step.signal, signal);
        }

        assert_eq!(solver.state(), SearchState::Solved);
        assert_eq!(solver.solutions(), 1);
        assert_eq!(solver.result_message(), "1 solution(s) found");
        assert_eq!(solver.trace().len(), 3);

        // Solved stops the search; further steps change nothing.
        let after = solver.step();
        assert_eq!(after.signal, Signal::Stop);
        assert_eq!(after.kind, None);
        assert_eq!(after.board.queens(), &[2, 0, 3, 1, 4]);
    }

    #[test]
    fn every_improving_step_strictly_lowers_the_score() {
        let mut solver = HillClimber::with_seed(3);
        solver.start();
        let mut previous = solver.score();
        let step = solver.step();
        assert!(step.score < previous);
        previous = step.score;
        let step = solver.step();
        assert!(step.score < previous);
    }

    #[test]
    fn picks_the_lowest_scoring_neighbor() {
        let mut solver = HillClimber::from_board(board(&[1, 3, 0, 2, 0]), Some(9));
        assert_eq!(solver.score(), 2);
        solver.start();
        let step = solver.step();
        assert_eq!(step.board.queens(), &[1, 3, 0, 2, 4]);
        assert_eq!(step.kind, Some(StepKind::Solved));
    }

    #[test]
    fn first_of_equal_neighbors_wins() {
        // From all-zero the best neighbors score 6; the first in
        // enumeration order moves row 1 to column 4.
        let mut solver = HillClimber::from_board(board(&[0, 0, 0, 0, 0]), Some(9));
        solver.start();
        let step = solver.step();
        assert_eq!(step.board.queens(), &[0, 4, 0, 0, 0]);
        assert_eq!(step.score, 6);
        assert_eq!(step.kind, Some(StepKind::Improved));
    }

    #[test]
    fn plateau_shuffles_the_columns() {
        let plateau = board(&[0, 2, 3, 1, 4]);
        assert_eq!(plateau.heuristic(), 2);
        assert!(plateau.neighbors().all(|nb| nb.heuristic() >= 2));

        let mut solver = HillClimber::from_board(plateau, Some(42));
        solver.start();
        let step = solver.step();
        assert_eq!(step.kind, Some(StepKind::Shuffled));
        assert_eq!(step.signal, Signal::Continue);
        let mut columns = step.board.queens().to_vec();
        columns.sort_unstable();
        assert_eq!(columns, vec![0, 1, 2, 3, 4]);
        assert_eq!(solver.state(), SearchState::Searching);
    }

    #[test]
    fn step_takes_first_best_neighbor_or_shuffles_on_every_board() {
        for start in all_boards(BOARD_SIZE) {
            let current = start.heuristic();
            let mut best: Option<Board> = None;
            for nb in start.neighbors() {
                let better = match &best {
                    Some(b) => nb.heuristic() < b.heuristic(),
                    None => nb.heuristic() < current,
                };
                if better {
                    best = Some(nb);
                }
            }

            let mut solver = HillClimber::from_board(start.clone(), Some(13));
            solver.start();
            let step = solver.step();

            if current == 0 {
                assert_eq!(step.kind, Some(StepKind::Solved), "[{}]", start);
                assert_eq!(step.board, start);
                assert_eq!(step.signal, Signal::Stop);
                continue;
            }
            match best {
                Some(best) => {
                    assert!(step.score < current, "[{}]", start);
                    assert_eq!(step.board, best, "[{}]", start);
                    let kind = if best.is_solved() {
                        StepKind::Solved
                    } else {
                        StepKind::Improved
                    };
                    assert_eq!(step.kind, Some(kind), "[{}]", start);
                    assert_eq!(step.signal == Signal::Stop, best.is_solved());
                }
                None => {
                    assert_eq!(step.kind, Some(StepKind::Shuffled), "[{}]", start);
                    assert_eq!(step.signal, Signal::Continue);
                    let mut before = start.queens().to_vec();
                    let mut after = step.board.queens().to_vec();
                    before.sort_unstable();
                    after.sort_unstable();
                    assert_eq!(before, after, "[{}]", start);
                }
            }
            assert_eq!(solver.solutions(), usize::from(step.signal == Signal::Stop));
        }
    }

    #[test]
    fn already_solved_board_stops_without_shuffling() {
        let mut solver = HillClimber::from_board(board(&[1, 3, 0, 2, 4]), Some(5));
        solver.start();
        let step = solver.step();
        assert_eq!(step.kind, Some(StepKind::Solved));
        assert_eq!(step.signal, Signal::Stop);
        assert_eq!(step.board.queens(), &[1, 3, 0, 2, 4]);
    }

    #[test]
    fn reset_restores_the_initial_board() {
        let mut solver = HillClimber::with_seed(11);
        for _ in 0..3 {
            solver.start();
            solver.step();
            solver.step();
            solver.reset();
            assert_eq!(solver.board().queens(), &INITIAL_QUEENS);
            assert_eq!(solver.state(), SearchState::Idle);
            assert_eq!(solver.solutions(), 0);
            assert!(solver.trace().is_empty());
        }
        solver.reset();
        solver.reset();
        assert_eq!(solver.board().queens(), &INITIAL_QUEENS);
    }

    #[test]
    fn restart_after_solve_does_not_count_the_same_board_twice() {
        let mut solver = HillClimber::with_seed(2);
        assert_eq!(solver.run(100), Some(3));
        let solved = solver.board().clone();
        assert_eq!(solver.solutions(), 1);

        solver.start();
        assert_eq!(solver.state(), SearchState::Searching);
        assert_eq!(solver.solutions(), 0);
        let step = solver.step();
        assert_eq!(step.kind, Some(StepKind::Solved));
        assert_eq!(step.board, solved);
        assert_eq!(solver.solutions(), 1);
        assert_eq!(solver.result_message(), "1 solution(s) found");

        // Starting again right away behaves the same.
        assert_eq!(solver.run(100), Some(1));
        assert_eq!(solver.solutions(), 1);
    }

    #[test]
    fn start_while_searching_keeps_progress() {
        let mut solver = HillClimber::with_seed(2);
        solver.start();
        solver.step();
        solver.start();
        assert_eq!(solver.trace().len(), 1);
        assert_eq!(solver.board().queens(), &[4, 0, 3, 0, 4]);
    }

    #[test]
    fn run_gives_up_at_the_step_limit() {
        let mut solver = HillClimber::with_seed(2);
        assert_eq!(solver.run(2), None);
        assert_eq!(solver.state(), SearchState::Searching);
        assert_eq!(solver.trace().len(), 2);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let start = board(&[0, 2, 3, 1, 4]);
        let mut a = HillClimber::from_board(start.clone(), Some(77));
        let mut b = HillClimber::from_board(start, Some(77));
        a.run(50);
        b.run(50);
        assert_eq!(a.trace(), b.trace());
    }
}
