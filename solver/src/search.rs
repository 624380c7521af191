use std::time::{Duration, Instant};

use bitvec::boxed::BitBox;
use rustc_hash::FxHashSet;

use crate::board::{Board, Cell, Direction, Move, Pos};
use crate::parity;

/// Outcome of a search.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SolveResult {
    /// The moves that reduce the board to a single peg on the target, in
    /// play order. The board is left in that solved state.
    Solved(Vec<Move>),
    /// The search space is exhausted, or the instance is provably out of
    /// reach. The board is back in its starting state.
    Unsolvable,
    /// The stop predicate fired. The board is back in its starting state.
    Stopped,
}

/// Search for a sequence of jumps that leaves a single peg on `target`.
///
/// The board is mutated in place: a successful search leaves it solved,
/// any other outcome restores it exactly.
pub fn solve(board: &mut Board, target: Pos) -> SolveResult {
    solve_with_stop(board, target, || false)
}

/// [`solve`] with a stop predicate, polled at every recursive step before
/// anything else. When it returns true the search unwinds, restores the
/// board and reports [`SolveResult::Stopped`].
pub fn solve_with_stop(
    board: &mut Board,
    target: Pos,
    stop: impl FnMut() -> bool,
) -> SolveResult {
    if board.get(target) == Cell::Absent {
        log::debug!("target {target} is not a hole");
        return SolveResult::Unsolvable;
    }

    if !parity::solvable(board, target) {
        log::debug!("parity rules out a lone peg on {target}");
        return SolveResult::Unsolvable;
    }

    let mut state = SearchState {
        visited: FxHashSet::default(),
        history: Vec::new(),
        explored: 0,
        pruned: 0,
        stop,
    };

    let verdict = search_inner(board, target, &mut state);

    log::debug!(
        "explored {} states, pruned {} revisits",
        state.explored,
        state.pruned
    );

    match verdict {
        Verdict::Solved => SolveResult::Solved(state.history),
        Verdict::Dead => SolveResult::Unsolvable,
        Verdict::Stopped => SolveResult::Stopped,
    }
}

/// Stop predicate for [`solve_with_stop`] that fires once the wall-clock
/// budget is spent. A budget too large to represent never fires.
pub fn deadline(budget: Duration) -> impl FnMut() -> bool {
    let end = Instant::now().checked_add(budget);
    move || end.is_some_and(|end| Instant::now() >= end)
}

enum Verdict {
    Solved,
    Dead,
    Stopped,
}

struct SearchState<F> {
    /// Every configuration entered so far, keyed by its occupancy bits.
    /// Owned by one `solve` call and thrown away with it.
    ///
    /// Invariant: the target is fixed for the whole call and the full
    /// configuration determines all future play, so a configuration seen
    /// once never needs to be expanded again.
    visited: FxHashSet<BitBox>,
    history: Vec<Move>,
    explored: u64,
    pruned: u64,
    stop: F,
}

fn search_inner<F: FnMut() -> bool>(
    board: &mut Board,
    target: Pos,
    state: &mut SearchState<F>,
) -> Verdict {
    if (state.stop)() {
        return Verdict::Stopped;
    }

    if !state.visited.insert(board.snapshot()) {
        state.pruned += 1;
        return Verdict::Dead;
    }
    state.explored += 1;

    if board.is_solved(target) {
        return Verdict::Solved;
    }

    for from in board.positions() {
        for dir in Direction::ALL {
            let mv = Move::new(from, dir);
            if !board.is_valid_move(mv) {
                continue;
            }

            board.apply_move(mv);
            state.history.push(mv);

            match search_inner(board, target, state) {
                Verdict::Solved => return Verdict::Solved,
                verdict => {
                    state.history.pop();
                    board.undo_move(mv);
                    if let Verdict::Stopped = verdict {
                        return Verdict::Stopped;
                    }
                }
            }
        }
    }

    Verdict::Dead
}
