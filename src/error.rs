/// Contract violations surfaced by the game and search layers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid move ({row}, {column}): not an open drop slot")]
    InvalidMove { row: usize, column: usize },

    #[error("no legal moves remain in this position")]
    NoMovesAvailable,
}
