use derive_more::Display;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::{error::GrammarError, language::Symbol};

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(pub Symbol);

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal(pub Symbol);

impl TryFrom<char> for Terminal {
    type Error = GrammarError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_lowercase() {
            Ok(Terminal(Symbol::from(c)))
        } else {
            Err(GrammarError::InvalidSymbol {
                symbol: c.to_string(),
            })
        }
    }
}

impl TryFrom<char> for NonTerminal {
    type Error = GrammarError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_uppercase() {
            Ok(NonTerminal(Symbol::from(c)))
        } else {
            Err(GrammarError::InvalidSymbol {
                symbol: c.to_string(),
            })
        }
    }
}

impl TryFrom<&str> for Terminal {
    type Error = GrammarError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.chars().next() {
            Some(first) if first.is_ascii_lowercase() => Ok(Terminal(Symbol::new(value))),
            _ => Err(GrammarError::InvalidSymbol {
                symbol: value.to_string(),
            }),
        }
    }
}

impl TryFrom<&str> for NonTerminal {
    type Error = GrammarError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.chars().next() {
            Some(first) if first.is_ascii_uppercase() => Ok(NonTerminal(Symbol::new(value))),
            _ => Err(GrammarError::InvalidSymbol {
                symbol: value.to_string(),
            }),
        }
    }
}

/// A Chomsky-Normal-Form right-hand side: a single terminal or a pair of
/// non-terminals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CnfWord {
    Terminal(Terminal),
    NonTerminals(NonTerminal, NonTerminal),
}

impl std::fmt::Display for CnfWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CnfWord::Terminal(t) => write!(f, "{t}"),
            CnfWord::NonTerminals(nt1, nt2) => write!(f, "{nt1}{nt2}"),
        }
    }
}

impl From<Terminal> for CnfWord {
    fn from(t: Terminal) -> Self {
        CnfWord::Terminal(t)
    }
}

impl From<(NonTerminal, NonTerminal)> for CnfWord {
    fn from((nt1, nt2): (NonTerminal, NonTerminal)) -> Self {
        CnfWord::NonTerminals(nt1, nt2)
    }
}

impl TryFrom<&str> for CnfWord {
    type Error = GrammarError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let chars = value.chars().collect::<Vec<_>>();

        match chars.as_slice() {
            [c] if c.is_ascii_lowercase() => Ok(CnfWord::Terminal(Terminal(Symbol::from(*c)))),
            [c1, c2] if c1.is_ascii_uppercase() && c2.is_ascii_uppercase() => {
                Ok(CnfWord::NonTerminals(
                    NonTerminal(Symbol::from(*c1)),
                    NonTerminal(Symbol::from(*c2)),
                ))
            }
            _ => Err(GrammarError::MalformedProduction {
                rhs: value.to_string(),
            }),
        }
    }
}

/// A context-free grammar in Chomsky Normal Form, built incrementally.
///
/// Symbols must be declared before anything references them; every mutator
/// either upholds all invariants or fails without touching the grammar.
#[derive(Debug, Clone, Default)]
pub struct CnfGrammar {
    non_terminals: IndexSet<NonTerminal>,
    terminals: IndexSet<Terminal>,
    start_symbol: Option<NonTerminal>,
    productions: IndexMap<NonTerminal, IndexSet<CnfWord>>,
}

impl CnfGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn non_terminals(&self) -> &IndexSet<NonTerminal> {
        &self.non_terminals
    }

    pub fn terminals(&self) -> &IndexSet<Terminal> {
        &self.terminals
    }

    pub fn start_symbol(&self) -> Option<&NonTerminal> {
        self.start_symbol.as_ref()
    }

    pub fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<CnfWord>> {
        &self.productions
    }

    pub fn add_non_terminal<S>(&mut self, symbol: S) -> Result<(), GrammarError>
    where
        S: TryInto<NonTerminal>,
        GrammarError: From<S::Error>,
    {
        let non_terminal = symbol.try_into()?;

        // The alphabets must stay disjoint even for names that bypass the
        // character-case notation.
        if self.terminals.iter().any(|t| t.0 == non_terminal.0) {
            return Err(GrammarError::InvalidSymbol {
                symbol: non_terminal.to_string(),
            });
        }

        if !self.non_terminals.insert(non_terminal.clone()) {
            return Err(GrammarError::InvalidSymbol {
                symbol: non_terminal.to_string(),
            });
        }

        Ok(())
    }

    pub fn add_terminal<S>(&mut self, symbol: S) -> Result<(), GrammarError>
    where
        S: TryInto<Terminal>,
        GrammarError: From<S::Error>,
    {
        let terminal = symbol.try_into()?;

        if self.non_terminals.iter().any(|nt| nt.0 == terminal.0) {
            return Err(GrammarError::InvalidSymbol {
                symbol: terminal.to_string(),
            });
        }

        if !self.terminals.insert(terminal.clone()) {
            return Err(GrammarError::InvalidSymbol {
                symbol: terminal.to_string(),
            });
        }

        Ok(())
    }

    pub fn set_start_symbol<S>(&mut self, symbol: S) -> Result<(), GrammarError>
    where
        S: TryInto<NonTerminal>,
        GrammarError: From<S::Error>,
    {
        let non_terminal = symbol.try_into()?;

        if !self.non_terminals.contains(&non_terminal) {
            return Err(GrammarError::UnknownSymbol {
                symbol: non_terminal.to_string(),
            });
        }

        self.start_symbol = Some(non_terminal);

        Ok(())
    }

    pub fn add_production<L, R>(&mut self, lhs: L, rhs: R) -> Result<(), GrammarError>
    where
        L: TryInto<NonTerminal>,
        R: TryInto<CnfWord>,
        GrammarError: From<L::Error> + From<R::Error>,
    {
        let lhs = lhs.try_into()?;

        if !self.non_terminals.contains(&lhs) {
            return Err(GrammarError::UnknownSymbol {
                symbol: lhs.to_string(),
            });
        }

        let rhs = rhs.try_into()?;

        match &rhs {
            CnfWord::Terminal(t) => {
                if !self.terminals.contains(t) {
                    return Err(GrammarError::MalformedProduction {
                        rhs: rhs.to_string(),
                    });
                }
            }
            CnfWord::NonTerminals(nt1, nt2) => {
                if !self.non_terminals.contains(nt1) || !self.non_terminals.contains(nt2) {
                    return Err(GrammarError::MalformedProduction {
                        rhs: rhs.to_string(),
                    });
                }

                // The left-hand side may not reappear in first position.
                if *nt1 == lhs {
                    return Err(GrammarError::MalformedProduction {
                        rhs: rhs.to_string(),
                    });
                }
            }
        }

        if self
            .productions
            .get(&lhs)
            .is_some_and(|words| words.contains(&rhs))
        {
            return Err(GrammarError::DuplicateProduction {
                lhs: lhs.to_string(),
                rhs: rhs.to_string(),
            });
        }

        self.productions.entry(lhs).or_default().insert(rhs);

        Ok(())
    }

    /// The non-terminals with a unit production rewriting to `terminal`.
    pub fn producers_of(&self, terminal: &Terminal) -> IndexSet<NonTerminal> {
        self.productions
            .iter()
            .filter(|(_, words)| words.contains(&CnfWord::Terminal(terminal.clone())))
            .map(|(lhs, _)| lhs.clone())
            .collect()
    }

    /// Canonical rendering of one non-terminal's productions:
    /// `"X::=R1|R2"` with the right-hand sides lexicographically sorted and
    /// no whitespace. Empty string when the non-terminal has none.
    pub fn productions_for(&self, non_terminal: &NonTerminal) -> String {
        let Some(words) = self.productions.get(non_terminal) else {
            return String::new();
        };

        format!(
            "{}::={}",
            non_terminal,
            words.iter().map(ToString::to_string).sorted().join("|")
        )
    }

    /// The whole production set: one `productions_for` line per declared
    /// non-terminal that has productions, in declaration order,
    /// newline-joined.
    pub fn definition(&self) -> String {
        self.non_terminals
            .iter()
            .map(|nt| self.productions_for(nt))
            .filter(|line| !line.is_empty())
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.non_terminals.is_empty()
            && self.terminals.is_empty()
            && self.start_symbol.is_none()
            && self.productions.is_empty()
    }

    /// Clears every symbol, production and the start symbol, leaving the
    /// grammar ready to be rebuilt from scratch.
    pub fn reset(&mut self) {
        self.non_terminals.clear();
        self.terminals.clear();
        self.start_symbol = None;
        self.productions.clear();
    }
}
