use thiserror::Error;

/// The single error kind of the predictor: a caller handed in something
/// outside the model's fixed configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    /// Symbol to predict or commit is outside the alphabet.
    #[error("symbol {symbol} is outside the alphabet [0, {alphabet_size})")]
    Symbol { symbol: u8, alphabet_size: usize },

    /// A context entry is outside the alphabet.
    #[error("context symbol {symbol} at position {position} is outside the alphabet [0, {alphabet_size})")]
    ContextSymbol {
        position: usize,
        symbol: u8,
        alphabet_size: usize,
    },

    /// Context does not hold exactly `max_depth` symbols.
    #[error("context has {actual} symbols, expected {expected}")]
    ContextLength { expected: usize, actual: usize },

    /// Alphabet too small to predict anything or too large for `u8` symbols.
    #[error("alphabet size must be in [2, 256], got {0}")]
    AlphabetSize(usize),

    /// Mixing weight is not strictly between 0 and 1.
    #[error("mixing weight must lie in the open interval (0, 1), got {0}")]
    MixingWeight(f64),

    /// Node index that doesn't belong to the tree.
    #[error("no node at index {0}")]
    Node(usize),

    /// Extending a node would go past the tree's maximum depth.
    #[error("node at depth {depth} can't have children, max depth is {max_depth}")]
    Depth { depth: usize, max_depth: usize },

    /// Node indices no longer fit the `u32` link slots.
    #[error("context tree is full at {0} nodes")]
    TreeFull(usize),
}

pub type Result<T> = std::result::Result<T, InvalidArgument>;
