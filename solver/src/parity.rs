// N. G. de Bruijn. A Solitaire Game and Its Relation to a Finite Field, 1972

use std::ops::{Add, AddAssign, Mul};

use crate::board::{Board, Cell, Pos};

/// The field with four elements, in de Bruijn's notation: `P` satisfies
/// `P^2 = P + 1`, and `Q = P^2` completes the multiplicative group.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GF4 {
    #[default]
    Zero,
    One,
    P,
    Q,
}

impl GF4 {
    const fn bits(self) -> u8 {
        match self {
            GF4::Zero => 0b00,
            GF4::One => 0b01,
            GF4::P => 0b10,
            GF4::Q => 0b11,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits {
            0b00 => GF4::Zero,
            0b01 => GF4::One,
            0b10 => GF4::P,
            _ => GF4::Q,
        }
    }

    /// `P^exp` for any whole-number exponent. The multiplicative group has
    /// order 3, so only `exp mod 3` matters.
    pub fn p_pow(exp: i32) -> Self {
        match exp.rem_euclid(3) {
            0 => GF4::One,
            1 => GF4::P,
            _ => GF4::Q,
        }
    }
}

impl Add for GF4 {
    type Output = GF4;

    // Characteristic 2: addition is xor on the polynomial coefficients.
    fn add(self, rhs: GF4) -> GF4 {
        GF4::from_bits(self.bits() ^ rhs.bits())
    }
}

impl AddAssign for GF4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul for GF4 {
    type Output = GF4;

    fn mul(self, rhs: GF4) -> GF4 {
        match (self, rhs) {
            (GF4::Zero, _) | (_, GF4::Zero) => GF4::Zero,
            (GF4::One, other) | (other, GF4::One) => other,
            (GF4::P, GF4::P) => GF4::Q,
            (GF4::Q, GF4::Q) => GF4::P,
            (GF4::P, GF4::Q) | (GF4::Q, GF4::P) => GF4::One,
        }
    }
}

/// De Bruijn's pair of invariants: `A = Σ P^(r+c)` and `B = Σ P^(r-c)`
/// over the occupied holes. A jump replaces three consecutive exponents by
/// none (or the other way around), and `1 + P + P^2 = 0`, so both sums are
/// unchanged by every jump in the four axis directions.
pub fn class(board: &Board) -> (GF4, GF4) {
    let mut a = GF4::Zero;
    let mut b = GF4::Zero;

    for pos in board.positions() {
        if board.get(pos) != Cell::Occupied {
            continue;
        }

        a += GF4::p_pow(i32::from(pos.row) + i32::from(pos.col));
        b += GF4::p_pow(i32::from(pos.row) - i32::from(pos.col));
    }

    (a, b)
}

/// A necessary, but not sufficient, condition for reducing `board` to a
/// single peg on `target`: the class of the board must already equal the
/// class of that final one-peg state.
pub fn solvable(board: &Board, target: Pos) -> bool {
    let target_class = (
        GF4::p_pow(i32::from(target.row) + i32::from(target.col)),
        GF4::p_pow(i32::from(target.row) - i32::from(target.col)),
    );

    class(board) == target_class
}

#[cfg(test)]
mod tests {
    use super::*;

    // Check that equation (1) from the paper holds
    #[test]
    fn eq_one() {
        assert_eq!(GF4::One + GF4::P, GF4::P * GF4::P);
        assert_eq!(GF4::P + GF4::P * GF4::P, GF4::One);
        assert_eq!(GF4::P * GF4::P * GF4::P, GF4::One);
    }

    #[test]
    fn p_pow_wraps_mod_three() {
        assert_eq!(GF4::p_pow(0), GF4::One);
        assert_eq!(GF4::p_pow(4), GF4::P);
        assert_eq!(GF4::p_pow(-1), GF4::Q);
        assert_eq!(GF4::p_pow(-2), GF4::P);
    }

    #[test]
    fn empty_board() {
        let board = Board::from_ascii(&["...", "...", "..."]);
        assert_eq!(class(&board), (GF4::Zero, GF4::Zero));
    }

    #[test]
    fn three_in_line_have_no_effect() {
        assert_eq!(class(&Board::from_ascii(&["###"])), (GF4::Zero, GF4::Zero));

        let column = Board::from_ascii(&["#", "#", "#"]);
        assert_eq!(class(&column), (GF4::Zero, GF4::Zero));
    }

    #[test]
    fn classic_board_matches_the_centre_target() {
        assert_eq!(class(&Board::classic()), (GF4::One, GF4::One));
        assert!(solvable(&Board::classic(), Pos::new(3, 3)));
    }

    #[test]
    fn european_board_cannot_reach_the_centre() {
        assert!(!solvable(&Board::european(), Pos::new(3, 3)));
    }

    #[test]
    fn jumps_preserve_the_class() {
        let mut board = Board::classic();
        let before = class(&board);

        let moves: Vec<_> = board.legal_moves().collect();
        for mv in moves {
            board.apply_move(mv);
            assert_eq!(class(&board), before);
            board.undo_move(mv);
        }
    }
}
