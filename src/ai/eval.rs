use crate::board::Board;
use crate::types::{Cell, Position, Side};

const BOARD_CELLS: usize = 64;
const MOBILITY_WEIGHT: i32 = 8;

/// Classic square weights: corners good, squares next to corners bad.
/// Symmetric under rotation and reflection.
#[rustfmt::skip]
const SQUARE_WEIGHTS: [i32; BOARD_CELLS] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
     10,  -2,   1,   1,   1,   1,  -2,  10,
      5,  -2,   1,   0,   0,   1,  -2,   5,
      5,  -2,   1,   0,   0,   1,  -2,   5,
     10,  -2,   1,   1,   1,   1,  -2,  10,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

/// Static evaluation from the point of view of the side to move.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalEvaluator;

impl PositionalEvaluator {
    pub fn evaluate(&self, board: &Board, side: Side) -> i32 {
        let material: i32 = (0..BOARD_CELLS)
            .map(|idx| {
                let cell = board.cell(Position::from_index(idx));
                if cell == Cell::from(side) {
                    SQUARE_WEIGHTS[idx]
                } else if cell == Cell::from(side.opponent()) {
                    -SQUARE_WEIGHTS[idx]
                } else {
                    0
                }
            })
            .sum();

        let mobility = board.legal_moves(side).count_ones() as i32
            - board.legal_moves(side.opponent()).count_ones() as i32;

        material + MOBILITY_WEIGHT * mobility
    }
}
