pub mod cyk;
pub mod error;
pub mod grammar;
pub mod language;

pub use cyk::CykTable;
pub use error::GrammarError;
pub use grammar::{CnfGrammar, CnfWord, NonTerminal, Terminal};
pub use language::Symbol;
