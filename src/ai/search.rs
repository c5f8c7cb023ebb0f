use std::time::Duration;

use web_time::Instant;

use crate::ai::eval::PositionalEvaluator;
use crate::board::Board;
use crate::types::Side;

const MIN_SCORE: i32 = -1_000_000;
const MAX_SCORE: i32 = 1_000_000;
/// Final disk differences dominate any heuristic score.
const DISK_SCALE: i32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq)]
enum SearchResult {
    Complete(usize, i32),
    TimedOut,
}

impl SearchResult {
    fn negate(self) -> Self {
        match self {
            Self::Complete(mv, score) => Self::Complete(mv, -score),
            Self::TimedOut => Self::TimedOut,
        }
    }
}

/// How far a search line runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizon {
    /// Fixed depth. The clock is ignored while `root == 1` so that a
    /// depth-1 answer always exists.
    Plies { remaining: u8, root: u8 },
    /// Until the board is full or neither side can move.
    Exhaustive,
}

impl Horizon {
    fn deeper(self) -> Self {
        match self {
            Horizon::Plies { remaining, root } => Horizon::Plies {
                remaining: remaining.saturating_sub(1),
                root,
            },
            Horizon::Exhaustive => Horizon::Exhaustive,
        }
    }

    fn watches_clock(self) -> bool {
        !matches!(self, Horizon::Plies { root: 1, .. })
    }
}

pub struct Searcher {
    evaluator: PositionalEvaluator,
    start_time: Instant,
    timeout: Duration,
    max_depth: u8,
    timed_out: bool,
}

impl Searcher {
    pub fn new(max_depth: u8, timeout: Duration) -> Self {
        Self {
            evaluator: PositionalEvaluator,
            start_time: Instant::now(),
            timeout,
            max_depth,
            timed_out: false,
        }
    }

    /// Picks a move for `side` as a square index, or `None` when `side`
    /// has no legal move.
    pub fn search(&mut self, board: &Board, side: Side) -> Option<usize> {
        self.start_time = Instant::now();
        self.timed_out = false;

        let moves = ordered_moves(board, side, &self.evaluator);
        let mut best_move = *moves.first()?;
        if moves.len() == 1 {
            return Some(best_move);
        }

        for depth in 1..=self.max_depth {
            let horizon = Horizon::Plies {
                remaining: depth,
                root: depth,
            };
            match self.negaalpha(board, side, horizon, MIN_SCORE, MAX_SCORE) {
                SearchResult::Complete(mv, _) => best_move = mv,
                SearchResult::TimedOut => break,
            }
        }

        if self.should_exact_solve(board)
            && !self.timed_out
            && let SearchResult::Complete(mv, _) =
                self.negaalpha(board, side, Horizon::Exhaustive, MIN_SCORE, MAX_SCORE)
        {
            best_move = mv;
        }

        Some(best_move)
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    fn should_exact_solve(&self, board: &Board) -> bool {
        let empty = board.empty_count();
        match self.max_depth {
            3 => empty <= 10,
            4 => empty <= 12,
            5 => empty <= 14,
            6 => empty <= 16,
            _ => false,
        }
    }

    fn negaalpha(
        &mut self,
        board: &Board,
        side: Side,
        horizon: Horizon,
        alpha: i32,
        beta: i32,
    ) -> SearchResult {
        if horizon.watches_clock() && self.start_time.elapsed() >= self.timeout {
            self.timed_out = true;
            return SearchResult::TimedOut;
        }

        match horizon {
            Horizon::Plies { remaining: 0, .. } => {
                return SearchResult::Complete(0, self.evaluator.evaluate(board, side));
            }
            Horizon::Exhaustive if board.empty_count() == 0 => {
                return SearchResult::Complete(0, final_score(board, side));
            }
            _ => {}
        }

        let moves = ordered_moves(board, side, &self.evaluator);
        let Some(&first) = moves.first() else {
            if board.legal_moves(side.opponent()) == 0 {
                return SearchResult::Complete(0, final_score(board, side));
            }
            return self
                .negaalpha(board, side.opponent(), horizon, -beta, -alpha)
                .negate();
        };

        let mut best_move = first;
        let mut best_score = MIN_SCORE;
        let mut alpha = alpha;

        for mv in moves {
            let mut next = *board;
            next.place(mv, side);

            let score = match self.negaalpha(&next, side.opponent(), horizon.deeper(), -beta, -alpha) {
                SearchResult::TimedOut => return SearchResult::TimedOut,
                SearchResult::Complete(_, score) => -score,
            };

            if score > best_score || (score == best_score && mv < best_move) {
                best_score = score;
                best_move = mv;
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        SearchResult::Complete(best_move, best_score)
    }
}

fn final_score(board: &Board, side: Side) -> i32 {
    let mine = board.count_of(side) as i32;
    let theirs = board.count_of(side.opponent()) as i32;
    (mine - theirs) * DISK_SCALE
}

/// Legal moves, most promising first; equal scores keep square order.
fn ordered_moves(board: &Board, side: Side, evaluator: &PositionalEvaluator) -> Vec<usize> {
    let mut legal = board.legal_moves(side);
    let mut scored = Vec::with_capacity(legal.count_ones() as usize);

    while legal != 0 {
        let mv = legal.trailing_zeros() as usize;
        legal &= legal - 1;

        let mut next = *board;
        next.place(mv, side);
        scored.push((mv, -evaluator.evaluate(&next, side.opponent())));
    }

    scored.sort_by(|(left_mv, left), (right_mv, right)| {
        right.cmp(left).then_with(|| left_mv.cmp(right_mv))
    });
    scored.into_iter().map(|(mv, _)| mv).collect()
}
