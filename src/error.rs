use thiserror::Error;

/// A broken structural invariant, as reported by `check_invariants`.
///
/// Seeing one of these outside of a test means there is a bug in the
/// rebalancing or linking code, never bad input from the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("the sentinel node is not a keyless black leaf")]
    SentinelModified,

    #[error("the root node is red")]
    RedRoot,

    #[error("red node at slot {0} has a red child")]
    RedRedEdge(usize),

    #[error("black-height mismatch below slot {node}: left {left}, right {right}")]
    BlackHeightMismatch {
        node: usize,
        left: usize,
        right: usize,
    },

    #[error("slot {0} is linked into the tree but holds no key")]
    VacantSlot(usize),

    #[error("keys are out of order around slot {0}")]
    OrderViolation(usize),

    #[error("parent link of slot {0} does not point back to its parent")]
    BrokenParentLink(usize),

    #[error("level {level} is not sorted or contains duplicates")]
    LevelOrderViolation { level: usize },

    #[error("level {level} is not a subsequence of the level below it")]
    LevelNotSubsequence { level: usize },

    #[error("the head links a node at level {level}, above the active height")]
    StaleHeadLink { level: usize },

    #[error("node height {height} is outside 1..={limit}")]
    HeightOutOfBounds { height: usize, limit: usize },

    #[error("expected {expected} elements but found {found}")]
    LengthMismatch { expected: usize, found: usize },
}
