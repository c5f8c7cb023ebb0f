use std::fmt;

use crate::controller::Controller;
use crate::types::{BOARD_WIDTH, Cell, Position};

/// Plain-text view of a [`Controller`]: the board with column letters and
/// row digits matching the keyboard mapping, then scores and status. `x` is
/// black, `o` white, `+` a legal move for black; the cursor cell is
/// bracketed.
pub struct TextView<'a>(pub &'a Controller);

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controller = self.0;
        let highlighted = controller.highlighted();
        let hints = controller.hints();

        write!(f, "   ")?;
        for file in "abcdefgh".chars() {
            write!(f, " {file} ")?;
        }
        writeln!(f)?;

        for (row, cells) in controller.board().iter().enumerate() {
            write!(f, "{row}  ")?;
            for (col, cell) in cells.iter().enumerate() {
                let pos = Position::from_index(row * BOARD_WIDTH + col);
                let ch = match cell {
                    Cell::Black => 'x',
                    Cell::White => 'o',
                    Cell::Empty if hints.contains(&pos) => '+',
                    Cell::Empty => '.',
                };
                if highlighted == Some(pos) {
                    write!(f, "[{ch}]")?;
                } else {
                    write!(f, " {ch} ")?;
                }
            }
            writeln!(f)?;
        }

        let (black, white) = controller.scores();
        writeln!(f, "Human (x) {black} - Computer (o) {white}")?;
        writeln!(f, "{}", controller.status())
    }
}

pub fn render(controller: &Controller) -> String {
    TextView(controller).to_string()
}
