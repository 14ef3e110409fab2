//! Hill-climbing search for five non-attacking queens, with an egui viewer.
//!
//! The search core lives in [`board`] and [`solver`] and has no UI
//! dependencies; [`app`] drives it from the egui frame loop.

pub mod app;
pub mod board;
pub mod error;
pub mod export;
pub mod settings;
pub mod solver;
pub mod theme;

pub use board::{heuristic, Board, Neighbors, BOARD_SIZE, INITIAL_QUEENS};
pub use error::{BoardError, ExportError};
pub use settings::Settings;
pub use solver::{HillClimber, SearchState, Signal, Step, StepKind, TraceEntry};
