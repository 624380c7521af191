use colored::Colorize;

use solver::{Board, Cell, Move, Pos};

/// Draw the board inside a blue frame, pegs as bullets.
pub fn draw(board: &Board) {
    draw_inner(board, None);
}

/// Like [`draw`], with the three holes touched by `mv` highlighted: the
/// two vacated holes on blue, the landing peg on red.
pub fn draw_with_move(board: &Board, mv: Move) {
    draw_inner(board, Some(mv));
}

fn draw_inner(board: &Board, mv: Option<Move>) {
    let width = 2 * board.cols().max(1) as usize - 1;

    println!("{}", format!("┌{}┐", "─".repeat(width)).blue());
    for row in 0..board.rows() {
        print!("{}", "│".blue());
        for col in 0..board.cols() {
            if col > 0 {
                print!(" ");
            }

            let pos = Pos::new(row, col);
            let cell = board.get(pos);
            match mv {
                Some(mv) if cell == Cell::Occupied && mv.to() == pos => {
                    print!("{}", "•".on_red());
                }
                Some(mv) if cell == Cell::Empty && (mv.from == pos || mv.over() == pos) => {
                    print!("{}", ".".on_blue());
                }
                _ => match cell {
                    Cell::Occupied => print!("•"),
                    Cell::Empty => print!("."),
                    Cell::Absent => print!(" "),
                },
            }
        }
        println!("{}", "│".blue());
    }
    println!("{}", format!("└{}┘", "─".repeat(width)).blue());
    println!();
}
