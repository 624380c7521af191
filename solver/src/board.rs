use std::fmt;

use bitvec::{bitbox, boxed::BitBox};

/// State of a single grid cell.
///
/// `Absent` cells are not part of the board and never change. Only `Empty`
/// and `Occupied` holes take part in the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Absent,
    Empty,
    Occupied,
}

/// A hole coordinate on the board, row first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Pos {
    pub row: i16,
    pub col: i16,
}

impl Pos {
    pub const fn new(row: i16, col: i16) -> Self {
        Pos { row, col }
    }

    /// The neighbouring coordinate one hole over in the given direction.
    pub fn step(self, dir: Direction) -> Pos {
        let (dr, dc) = dir.delta();
        Pos {
            row: self.row.saturating_add(dr),
            col: self.col.saturating_add(dc),
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Scan order for move enumeration. Together with the row-major cell
    /// scan this fixes which solution the search finds first.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    pub const fn delta(self) -> (i16, i16) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }
}

/// A jump: the peg at `from` leaps over its direct neighbour in `dir` and
/// lands two holes away.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    pub from: Pos,
    pub dir: Direction,
}

impl Move {
    pub const fn new(from: Pos, dir: Direction) -> Self {
        Move { from, dir }
    }

    /// The hole that is jumped over.
    pub fn over(self) -> Pos {
        self.from.step(self.dir)
    }

    /// The hole the peg lands in.
    pub fn to(self) -> Pos {
        self.from.step(self.dir).step(self.dir)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to())
    }
}

/// A rectangular grid of holes, stored row-major.
///
/// Invariant: the set of `Absent` cells is fixed for the lifetime of the
/// board. Moves only ever toggle holes between `Empty` and `Occupied`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    rows: i16,
    cols: i16,
    cells: Vec<Cell>,
}

impl Board {
    /// Build a board from an ascii sketch: `#` occupied, `.` empty, space
    /// absent. Short rows are padded with absent cells.
    ///
    /// Panics on any other character, so only use this for board literals.
    pub fn from_ascii(lines: &[&str]) -> Self {
        let rows = lines.len();
        let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut cells = vec![Cell::Absent; rows * cols];

        for (r, line) in lines.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                cells[r * cols + c] = match ch {
                    '#' => Cell::Occupied,
                    '.' => Cell::Empty,
                    ' ' => Cell::Absent,
                    _ => panic!("invalid char in ascii board"),
                };
            }
        }

        Board {
            rows: rows as i16,
            cols: cols as i16,
            cells,
        }
    }

    /// The 33-hole english cross with the centre hole empty.
    pub fn classic() -> Self {
        Self::from_ascii(&[
            "  ###  ",
            "  ###  ",
            "#######",
            "###.###",
            "#######",
            "  ###  ",
            "  ###  ",
        ])
    }

    /// The 37-hole european board with the centre hole empty.
    pub fn european() -> Self {
        Self::from_ascii(&[
            "  ###  ",
            " ##### ",
            "#######",
            "###.###",
            "#######",
            " ##### ",
            "  ###  ",
        ])
    }

    pub fn rows(&self) -> i16 {
        self.rows
    }

    pub fn cols(&self) -> i16 {
        self.cols
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row < 0 || pos.row >= self.rows || pos.col < 0 || pos.col >= self.cols {
            return None;
        }
        Some(pos.row as usize * self.cols as usize + pos.col as usize)
    }

    /// Cell state at the given coordinate. Everything outside the grid
    /// reads as absent.
    pub fn get(&self, pos: Pos) -> Cell {
        match self.index(pos) {
            Some(i) => self.cells[i],
            None => Cell::Absent,
        }
    }

    fn set(&mut self, pos: Pos, cell: Cell) {
        let i = self.index(pos).expect("moves only touch in-bounds holes");
        self.cells[i] = cell;
    }

    /// Flip a playable hole between empty and occupied. Absent cells are
    /// left alone.
    pub fn toggle_peg(&mut self, pos: Pos) {
        match self.get(pos) {
            Cell::Occupied => self.set(pos, Cell::Empty),
            Cell::Empty => self.set(pos, Cell::Occupied),
            Cell::Absent => {}
        }
    }

    /// A move is legal when its origin and the jumped hole hold pegs and
    /// the landing hole is empty. Anything off the grid reads as absent
    /// and fails these checks.
    pub fn is_valid_move(&self, mv: Move) -> bool {
        self.get(mv.from) == Cell::Occupied
            && self.get(mv.over()) == Cell::Occupied
            && self.get(mv.to()) == Cell::Empty
    }

    /// Apply a legal move: the origin and jumped pegs are removed and a
    /// peg appears in the landing hole.
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(self.is_valid_move(mv));
        self.set(mv.from, Cell::Empty);
        self.set(mv.over(), Cell::Empty);
        self.set(mv.to(), Cell::Occupied);
    }

    /// Exact inverse of [`Board::apply_move`]. Only sound directly after
    /// applying `mv`, with no other mutation in between.
    pub fn undo_move(&mut self, mv: Move) {
        debug_assert_eq!(self.get(mv.from), Cell::Empty);
        debug_assert_eq!(self.get(mv.over()), Cell::Empty);
        debug_assert_eq!(self.get(mv.to()), Cell::Occupied);
        self.set(mv.from, Cell::Occupied);
        self.set(mv.over(), Cell::Occupied);
        self.set(mv.to(), Cell::Empty);
    }

    /// Number of pegs on the board.
    pub fn peg_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Occupied).count()
    }

    /// Won when exactly one peg remains and it sits on `target`.
    pub fn is_solved(&self, target: Pos) -> bool {
        self.peg_count() == 1 && self.get(target) == Cell::Occupied
    }

    /// All grid coordinates in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (rows, cols) = (self.rows, self.cols);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Pos::new(row, col)))
    }

    /// Legal moves in the fixed scan order: row-major over origins, then
    /// [`Direction::ALL`] per origin.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.positions()
            .flat_map(|pos| Direction::ALL.into_iter().map(move |dir| Move::new(pos, dir)))
            .filter(move |&mv| self.is_valid_move(mv))
    }

    /// Canonical snapshot of the occupancy, one bit per grid cell in
    /// row-major order, set when the hole holds a peg.
    ///
    /// The absent mask never changes while a board is being searched, so
    /// the occupancy bits alone identify the configuration.
    pub fn snapshot(&self) -> BitBox {
        let mut bits = bitbox![0; self.cells.len()];
        for (i, &cell) in self.cells.iter().enumerate() {
            if cell == Cell::Occupied {
                bits.set(i, true);
            }
        }
        bits
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = match self.get(Pos::new(row, col)) {
                    Cell::Occupied => '#',
                    Cell::Empty => '.',
                    Cell::Absent => ' ',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
