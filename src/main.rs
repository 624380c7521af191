//! Terminal front-end for the peg solitaire solver.
//!
//! Picks a preset board, optionally relocates the empty hole and the
//! target hole, then searches for a full solution and replays it.

mod render;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::bail;
use clap::{Parser, ValueEnum};
use solver::{deadline, solve, solve_with_stop, Board, Cell, Pos, SolveResult};

use crate::render::{draw, draw_with_move};

#[derive(Parser)]
#[command(name = "pegsol")]
#[command(about = "Backtracking solver for peg solitaire boards")]
#[command(version)]
struct Cli {
    /// Board preset to solve
    #[arg(long, value_enum)]
    board: Option<Preset>,

    /// Relocate the empty hole before solving
    #[arg(long, value_name = "ROW,COL", value_parser = parse_pos)]
    empty: Option<Pos>,

    /// Hole the last peg must end on (default: the centre)
    #[arg(long, value_name = "ROW,COL", value_parser = parse_pos)]
    target: Option<Pos>,

    /// Abort the search after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Draw the board after every move of the solution
    #[arg(long)]
    steps: bool,

    /// Accept the defaults for every question not answered by a flag
    #[arg(short = 'y', long)]
    yes: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// 33-hole english cross
    Classic,
    /// 37-hole european board
    European,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let mut board = pick_board(&cli)?;
    relocate_empty(&mut board, &cli)?;
    let target = pick_target(&board, &cli)?;

    println!();
    println!("Initial board:");
    draw(&board);

    let initial = board.clone();
    log::info!("searching for a solution ending on {target}");
    let result = match cli.timeout {
        Some(secs) => solve_with_stop(&mut board, target, deadline(Duration::from_secs(secs))),
        None => solve(&mut board, target),
    };

    match result {
        SolveResult::Solved(moves) => {
            println!("Solution found with the following moves:");
            let mut replay = initial;
            for (i, &mv) in moves.iter().enumerate() {
                println!("{:2}. {mv}", i + 1);
                if cli.steps {
                    replay.apply_move(mv);
                    draw_with_move(&replay, mv);
                }
            }
            println!();
            println!("Final board:");
            draw(&board);
            Ok(ExitCode::SUCCESS)
        }
        SolveResult::Unsolvable => {
            println!("No solution found.");
            Ok(ExitCode::from(1))
        }
        SolveResult::Stopped => {
            println!("Search aborted before an answer was found.");
            Ok(ExitCode::from(2))
        }
    }
}

fn parse_pos(s: &str) -> Result<Pos, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;

    let parse = |part: &str| {
        part.trim()
            .parse::<i16>()
            .map_err(|_| format!("{part:?} is not a number"))
    };

    Ok(Pos::new(parse(row)?, parse(col)?))
}

fn make_board(preset: Preset) -> Board {
    match preset {
        Preset::Classic => Board::classic(),
        Preset::European => Board::european(),
    }
}

fn pick_board(cli: &Cli) -> anyhow::Result<Board> {
    if let Some(preset) = cli.board {
        return Ok(make_board(preset));
    }
    if cli.yes {
        return Ok(Board::classic());
    }

    println!("Choose a board:");
    println!("1 = classic (english cross)");
    println!("2 = european (rounded)");
    let choice = prompt("Your choice: ")?;

    if choice == "2" {
        Ok(Board::european())
    } else {
        Ok(Board::classic())
    }
}

fn relocate_empty(board: &mut Board, cli: &Cli) -> anyhow::Result<()> {
    if let Some(pos) = cli.empty {
        return set_empty(board, pos);
    }
    if cli.yes || !prompt_yes_no("Move the empty hole somewhere else?")? {
        return Ok(());
    }

    loop {
        println!();
        draw(board);
        let pos = prompt_pos("New empty hole")?;
        match set_empty(board, pos) {
            Ok(()) => return Ok(()),
            Err(err) => println!("{err}"),
        }
    }
}

/// Move the single empty hole of a fresh preset board to `pos`.
fn set_empty(board: &mut Board, pos: Pos) -> anyhow::Result<()> {
    let empties: Vec<Pos> = board
        .positions()
        .filter(|&p| board.get(p) == Cell::Empty)
        .collect();
    if empties.len() != 1 {
        bail!("the board does not have exactly one empty hole");
    }
    let current = empties[0];

    if pos == current {
        return Ok(());
    }
    if board.get(pos) != Cell::Occupied {
        bail!("{pos} is not a playable hole");
    }

    board.toggle_peg(current);
    board.toggle_peg(pos);
    Ok(())
}

fn pick_target(board: &Board, cli: &Cli) -> anyhow::Result<Pos> {
    let centre = Pos::new(board.rows() / 2, board.cols() / 2);

    if let Some(pos) = cli.target {
        check_target(board, pos)?;
        return Ok(pos);
    }
    if cli.yes || !prompt_yes_no("Pick a different hole for the last peg?")? {
        println!("Target hole: {centre}");
        return Ok(centre);
    }

    loop {
        let pos = prompt_pos("Target hole")?;
        match check_target(board, pos) {
            Ok(()) => return Ok(pos),
            Err(err) => println!("{err}"),
        }
    }
}

fn check_target(board: &Board, pos: Pos) -> anyhow::Result<()> {
    if board.get(pos) == Cell::Absent {
        bail!("{pos} is not a playable hole");
    }
    Ok(())
}

fn prompt(question: &str) -> anyhow::Result<String> {
    print!("{question}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("stdin closed");
    }
    Ok(line.trim().to_string())
}

fn prompt_yes_no(question: &str) -> anyhow::Result<bool> {
    loop {
        let answer = prompt(&format!("{question} (y/n): "))?;
        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer y or n."),
        }
    }
}

fn prompt_pos(question: &str) -> anyhow::Result<Pos> {
    loop {
        let line = prompt(&format!("{question} (row,col): "))?;
        match parse_pos(&line) {
            Ok(pos) => return Ok(pos),
            Err(err) => println!("{err}. Try again."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pos_accepts_row_col_pairs() {
        assert_eq!(parse_pos("3,3"), Ok(Pos::new(3, 3)));
        assert_eq!(parse_pos(" 0 , 6 "), Ok(Pos::new(0, 6)));

        assert!(parse_pos("3").is_err());
        assert!(parse_pos("a,b").is_err());
        assert!(parse_pos("3,").is_err());
    }

    #[test]
    fn set_empty_moves_the_hole() {
        let mut board = Board::classic();
        set_empty(&mut board, Pos::new(1, 3)).unwrap();

        assert_eq!(board.get(Pos::new(1, 3)), Cell::Empty);
        assert_eq!(board.get(Pos::new(3, 3)), Cell::Occupied);
        assert_eq!(board.peg_count(), 32);
    }

    #[test]
    fn set_empty_keeps_the_current_hole() {
        let mut board = Board::classic();
        set_empty(&mut board, Pos::new(3, 3)).unwrap();
        assert_eq!(board, Board::classic());
    }

    #[test]
    fn set_empty_rejects_unplayable_holes() {
        let mut board = Board::classic();
        assert!(set_empty(&mut board, Pos::new(0, 0)).is_err());
        assert!(set_empty(&mut board, Pos::new(9, 9)).is_err());
        assert_eq!(board, Board::classic());
    }

    #[test]
    fn targets_may_be_empty_but_not_absent() {
        let board = Board::classic();
        assert!(check_target(&board, Pos::new(3, 3)).is_ok());
        assert!(check_target(&board, Pos::new(2, 0)).is_ok());
        assert!(check_target(&board, Pos::new(0, 0)).is_err());
    }
}
