/// Failures that abort an autoformat sweep.
///
/// A criterion that simply does not match is not an error; the matcher moves
/// on to the next criterion.
#[derive(Debug, thiserror::Error)]
pub enum AutoformatError {
    #[error("Invariant violated at block {block_index}: {expectation}")]
    InvariantViolated {
        block_index: usize,
        expectation: &'static str,
    },
    #[error("Autoformat sweep did not converge after {restarts} restarts")]
    DidNotConverge { restarts: usize },
    #[error("Rewrite failed at block {block_index}: {reason}")]
    Rewrite { block_index: usize, reason: String },
}

impl AutoformatError {
    pub(crate) fn rewrite(block_index: usize, reason: impl Into<String>) -> Self {
        AutoformatError::Rewrite {
            block_index,
            reason: reason.into(),
        }
    }
}
