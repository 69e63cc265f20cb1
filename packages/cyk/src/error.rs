use std::convert::Infallible;

use derive_more::{Display, Error};

/// Everything that can go wrong while building a grammar or querying it.
/// Mutating operations are atomic: on any of these the grammar is left
/// exactly as it was.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[display("invalid symbol '{symbol}': wrong classification or already declared")]
    InvalidSymbol { symbol: String },

    #[display("unknown non-terminal '{symbol}'")]
    UnknownSymbol { symbol: String },

    #[display("malformed production right-hand side '{rhs}'")]
    MalformedProduction { rhs: String },

    #[display("production {lhs}::={rhs} already declared")]
    DuplicateProduction { lhs: String, rhs: String },

    #[display("input word is empty")]
    EmptyInput,

    #[display("grammar has no non-terminals or no start symbol")]
    UninitializedGrammar,

    #[display("input contains undeclared terminal '{symbol}'")]
    UnknownTerminal { symbol: String },
}

// Lets already-typed values flow through the `impl TryInto<_>` mutator
// signatures, whose identity conversion can never fail.
impl From<Infallible> for GrammarError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
