pub mod eval;
pub mod search;

pub use eval::PositionalEvaluator;
pub use search::Searcher;
