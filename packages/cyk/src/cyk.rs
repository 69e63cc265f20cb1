use indexmap::IndexSet;
use itertools::Itertools;
use log::debug;
use tabled::{builder::Builder, settings::Style};

use crate::{
    error::GrammarError,
    grammar::{CnfGrammar, CnfWord, NonTerminal, Terminal},
    language::Symbol,
};

const NOT_IN_LANGUAGE: &str = "The word is not a member of the language generated by the grammar.";

/// The CYK derivation table for one word: cell (i, j) holds the
/// non-terminals deriving the substring from position i through j.
///
/// Only the upper triangle (i <= j) exists; the cells live in one flat
/// allocation of n(n+1)/2 sets, indexed row-major.
#[derive(Debug)]
pub struct CykTable {
    size: usize,
    cells: Vec<IndexSet<NonTerminal>>,
    word: String,
    start_symbol: NonTerminal,
}

impl CykTable {
    fn new(size: usize, word: impl Into<String>, start_symbol: &NonTerminal) -> Self {
        CykTable {
            size,
            cells: vec![IndexSet::new(); size * (size + 1) / 2],
            word: word.into(),
            start_symbol: start_symbol.clone(),
        }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i <= j && j < self.size);
        i * self.size - i * (i + 1) / 2 + j
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn get(&self, i: usize, j: usize) -> &IndexSet<NonTerminal> {
        &self.cells[self.index(i, j)]
    }

    pub fn contains(&self, i: usize, j: usize, value: &NonTerminal) -> bool {
        self.get(i, j).contains(value)
    }

    fn insert(&mut self, i: usize, j: usize, value: NonTerminal) {
        let index = self.index(i, j);
        self.cells[index].insert(value);
    }

    pub fn is_word_in_language(&self) -> bool {
        self.contains(0, self.size - 1, &self.start_symbol)
    }
}

impl std::fmt::Display for CykTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CYK table for word \"{}\":", self.word)?;

        let mut builder = Builder::default();

        for i in 0..self.size {
            builder.push_record((0..self.size).map(|j| {
                if j < i {
                    return String::new();
                }

                let cell = self.get(i, j);
                if cell.is_empty() {
                    "∅".to_string()
                } else {
                    format!("{{{}}}", cell.iter().map(ToString::to_string).join(", "))
                }
            }));
        }

        builder.insert_record(0, (1..=self.size).map(|j| format!("j = {j}")));
        builder.insert_column(
            0,
            std::iter::once(String::new()).chain((1..=self.size).map(|i| format!("i = {i}"))),
        );

        let mut table = builder.build();
        table.with(Style::rounded());

        writeln!(f, "{table}")
    }
}

impl CnfGrammar {
    /// Builds the full CYK table for `word`.
    ///
    /// Fails with `EmptyInput` on a zero-length word, `UninitializedGrammar`
    /// when no non-terminals or no start symbol have been declared, and
    /// `UnknownTerminal` when the word uses an undeclared terminal.
    pub fn derivation_table(&self, word: &str) -> Result<CykTable, GrammarError> {
        if word.is_empty() {
            return Err(GrammarError::EmptyInput);
        }

        if self.non_terminals().is_empty() {
            return Err(GrammarError::UninitializedGrammar);
        }

        let Some(start_symbol) = self.start_symbol() else {
            return Err(GrammarError::UninitializedGrammar);
        };

        let terminals = word
            .chars()
            .map(|c| {
                let terminal = Terminal(Symbol::from(c));
                if self.terminals().contains(&terminal) {
                    Ok(terminal)
                } else {
                    Err(GrammarError::UnknownTerminal {
                        symbol: c.to_string(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let n = terminals.len();
        let mut table = CykTable::new(n, word, start_symbol);

        for (i, terminal) in terminals.iter().enumerate() {
            for lhs in self.producers_of(terminal) {
                table.insert(i, i, lhs);
            }
        }

        // Substrings by increasing length, so both halves of every split
        // are already resolved.
        for length in 2..=n {
            for i in 0..=n - length {
                let j = i + length - 1;

                for k in i..j {
                    for (lhs, words) in self.productions() {
                        for rhs in words {
                            if let CnfWord::NonTerminals(nt1, nt2) = rhs {
                                if table.contains(i, k, nt1) && table.contains(k + 1, j, nt2) {
                                    table.insert(i, j, lhs.clone());
                                }
                            }
                        }
                    }
                }
            }
        }

        debug!(
            "CYK table for {word:?} built; start symbol {start_symbol} {} in cell (0, {})",
            if table.is_word_in_language() {
                "is"
            } else {
                "is not"
            },
            n - 1
        );

        Ok(table)
    }

    /// Whether `word` can be derived from the start symbol.
    pub fn is_derived(&self, word: &str) -> Result<bool, GrammarError> {
        Ok(self.derivation_table(word)?.is_word_in_language())
    }

    /// The rendered CYK table when `word` belongs to the language, or a
    /// fixed rejection sentence when it does not.
    pub fn table_as_text(&self, word: &str) -> Result<String, GrammarError> {
        let table = self.derivation_table(word)?;

        if table.is_word_in_language() {
            Ok(table.to_string())
        } else {
            Ok(NOT_IN_LANGUAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangular_index_is_row_major_and_dense() {
        let start = NonTerminal(Symbol::from('S'));
        let table = CykTable::new(4, "abcd", &start);

        let mut seen = Vec::new();
        for i in 0..4 {
            for j in i..4 {
                seen.push(table.index(i, j));
            }
        }

        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(table.cells.len(), 10);
    }

    #[test]
    fn single_cell_table() {
        let start = NonTerminal(Symbol::from('S'));
        let mut table = CykTable::new(1, "a", &start);

        assert!(!table.is_word_in_language());
        table.insert(0, 0, start.clone());
        assert!(table.is_word_in_language());
    }
}
