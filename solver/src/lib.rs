pub mod board;
pub mod parity;
pub mod search;

pub use board::{Board, Cell, Direction, Move, Pos};
pub use search::{deadline, solve, solve_with_stop, SolveResult};
