use thiserror::Error;

/// Fatal engine errors. Both variants indicate a grammar-authoring bug, not
/// a runtime condition the engine can recover from: the in-progress build is
/// aborted and no output is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LSystemError {
    /// A symbol appeared in the string with no registered rule.
    #[error("no rule registered for symbol {0:?}")]
    UnknownSymbol(char),

    /// Turtle stack popped with nothing saved — more `]` than `[`.
    #[error("turtle stack underflow: restore without a matching save")]
    EmptyStack,
}
