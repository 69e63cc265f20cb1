use cyk::{CnfGrammar, GrammarError, NonTerminal, Symbol, Terminal};

fn sample_grammar() -> CnfGrammar {
    let mut grammar = CnfGrammar::new();

    for nt in ['S', 'A', 'B'] {
        grammar.add_non_terminal(nt).unwrap();
    }
    for t in ['a', 'b'] {
        grammar.add_terminal(t).unwrap();
    }
    grammar.set_start_symbol('S').unwrap();

    grammar.add_production('S', "AB").unwrap();
    grammar.add_production('A', "a").unwrap();
    grammar.add_production('B', "b").unwrap();

    grammar
}

#[test]
fn declares_symbols() {
    let grammar = sample_grammar();

    assert_eq!(grammar.non_terminals().len(), 3);
    assert_eq!(grammar.terminals().len(), 2);
    assert_eq!(grammar.start_symbol(), Some(&NonTerminal(Symbol::from('S'))));
}

#[test]
fn rejects_misclassified_symbols() {
    let mut grammar = CnfGrammar::new();

    assert!(matches!(
        grammar.add_non_terminal('s'),
        Err(GrammarError::InvalidSymbol { .. })
    ));
    assert!(matches!(
        grammar.add_terminal('A'),
        Err(GrammarError::InvalidSymbol { .. })
    ));
    assert!(grammar.is_empty());
}

#[test]
fn rejects_duplicate_symbols() {
    let mut grammar = CnfGrammar::new();
    grammar.add_non_terminal('S').unwrap();
    grammar.add_terminal('a').unwrap();

    assert!(matches!(
        grammar.add_non_terminal('S'),
        Err(GrammarError::InvalidSymbol { .. })
    ));
    assert!(matches!(
        grammar.add_terminal('a'),
        Err(GrammarError::InvalidSymbol { .. })
    ));
    assert_eq!(grammar.non_terminals().len(), 1);
    assert_eq!(grammar.terminals().len(), 1);
}

#[test]
fn keeps_alphabets_disjoint_for_named_symbols() {
    let mut grammar = CnfGrammar::new();

    // Typed construction sidesteps the character-case notation, so the
    // model itself has to refuse a name living in both alphabets.
    grammar
        .add_non_terminal(NonTerminal(Symbol::new("expr")))
        .unwrap();

    assert!(matches!(
        grammar.add_terminal(Terminal(Symbol::new("expr"))),
        Err(GrammarError::InvalidSymbol { .. })
    ));
    assert!(grammar.terminals().is_empty());
}

#[test]
fn start_symbol_must_be_declared() {
    let mut grammar = CnfGrammar::new();
    grammar.add_non_terminal('S').unwrap();

    assert!(matches!(
        grammar.set_start_symbol('X'),
        Err(GrammarError::UnknownSymbol { .. })
    ));
    assert_eq!(grammar.start_symbol(), None);

    grammar.set_start_symbol('S').unwrap();
    assert_eq!(grammar.start_symbol(), Some(&NonTerminal(Symbol::from('S'))));
}

#[test]
fn rejects_production_with_unknown_lhs() {
    let mut grammar = sample_grammar();

    assert!(matches!(
        grammar.add_production('X', "AB"),
        Err(GrammarError::UnknownSymbol { .. })
    ));
}

#[test]
fn rejects_malformed_right_hand_sides() {
    let mut grammar = sample_grammar();
    let before = grammar.definition();

    // Three symbols.
    assert!(matches!(
        grammar.add_production('S', "ABA"),
        Err(GrammarError::MalformedProduction { .. })
    ));
    // A single non-terminal.
    assert!(matches!(
        grammar.add_production('S', "A"),
        Err(GrammarError::MalformedProduction { .. })
    ));
    // Mixed pair.
    assert!(matches!(
        grammar.add_production('S', "Ab"),
        Err(GrammarError::MalformedProduction { .. })
    ));
    // A terminal that was never declared.
    assert!(matches!(
        grammar.add_production('S', "c"),
        Err(GrammarError::MalformedProduction { .. })
    ));
    // A pair referencing an undeclared non-terminal.
    assert!(matches!(
        grammar.add_production('S', "AX"),
        Err(GrammarError::MalformedProduction { .. })
    ));

    assert_eq!(grammar.definition(), before);
}

#[test]
fn rejects_lhs_in_first_position() {
    let mut grammar = sample_grammar();

    assert!(matches!(
        grammar.add_production('S', "SB"),
        Err(GrammarError::MalformedProduction { .. })
    ));
    // Second position is fine.
    grammar.add_production('S', "AS").unwrap();
}

#[test]
fn rejects_duplicate_productions() {
    let mut grammar = sample_grammar();

    assert_eq!(
        grammar.add_production('S', "AB"),
        Err(GrammarError::DuplicateProduction {
            lhs: "S".to_string(),
            rhs: "AB".to_string(),
        })
    );
    assert_eq!(grammar.productions_for(&NonTerminal(Symbol::from('S'))), "S::=AB");
}

#[test]
fn renders_productions_sorted() {
    let mut grammar = sample_grammar();
    let s = NonTerminal(Symbol::from('S'));

    assert_eq!(grammar.productions_for(&s), "S::=AB");

    grammar.add_production('S', "BA").unwrap();
    assert_eq!(grammar.productions_for(&s), "S::=AB|BA");

    assert_eq!(grammar.productions_for(&NonTerminal(Symbol::from('X'))), "");
}

#[test]
fn renders_whole_grammar() {
    let grammar = sample_grammar();

    assert_eq!(grammar.definition(), "S::=AB\nA::=a\nB::=b");
}

#[test]
fn finds_producers_of_terminal() {
    let mut grammar = sample_grammar();
    grammar.add_production('B', "a").unwrap();

    let producers = grammar.producers_of(&Terminal(Symbol::from('a')));
    assert!(producers.contains(&NonTerminal(Symbol::from('A'))));
    assert!(producers.contains(&NonTerminal(Symbol::from('B'))));
    assert_eq!(producers.len(), 2);

    assert!(grammar.producers_of(&Terminal(Symbol::from('b'))).len() == 1);
    assert!(grammar.producers_of(&Terminal(Symbol::from('z'))).is_empty());
}

#[test]
fn reset_clears_everything_and_is_idempotent() {
    let mut grammar = sample_grammar();
    assert!(!grammar.is_empty());

    grammar.reset();
    assert!(grammar.is_empty());
    assert_eq!(grammar.definition(), "");
    assert_eq!(grammar.start_symbol(), None);

    grammar.reset();
    assert!(grammar.is_empty());

    // Reusable after a reset.
    grammar.add_non_terminal('S').unwrap();
    grammar.add_terminal('a').unwrap();
    grammar.set_start_symbol('S').unwrap();
    grammar.add_production('S', "a").unwrap();
    assert_eq!(grammar.definition(), "S::=a");
}

#[test]
fn accepts_typed_symbols() {
    let mut grammar = CnfGrammar::new();

    let expr = NonTerminal(Symbol::new("Expr"));
    let term = NonTerminal(Symbol::new("Term"));
    let plus = Terminal(Symbol::new("x"));

    grammar.add_non_terminal(expr.clone()).unwrap();
    grammar.add_non_terminal(term.clone()).unwrap();
    grammar.add_terminal(plus.clone()).unwrap();
    grammar.set_start_symbol(expr.clone()).unwrap();

    grammar.add_production(expr.clone(), (term.clone(), term.clone())).unwrap();
    grammar.add_production(term.clone(), plus).unwrap();

    assert_eq!(grammar.productions_for(&expr), "Expr::=TermTerm");
}
