use cyk::{CnfGrammar, GrammarError};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn simple_grammar() -> Result<(), GrammarError> {
    let mut grammar = CnfGrammar::new();

    for nt in ['S', 'A', 'B'] {
        grammar.add_non_terminal(nt)?;
    }
    for t in ['a', 'b'] {
        grammar.add_terminal(t)?;
    }
    grammar.set_start_symbol('S')?;

    grammar.add_production('S', "AB")?;
    grammar.add_production('A', "a")?;
    grammar.add_production('B', "b")?;

    println!("Grammar:\n{}\n", grammar.definition());

    for word in ["ab", "ba"] {
        println!("is_derived({word:?}) = {}", grammar.is_derived(word)?);
    }

    println!("\n{}", grammar.table_as_text("ab")?);

    Ok(())
}

fn nested_grammar() -> Result<(), GrammarError> {
    // Generates a^n b^n for n >= 1.
    let mut grammar = CnfGrammar::new();

    for nt in ['S', 'X', 'A', 'B'] {
        grammar.add_non_terminal(nt)?;
    }
    for t in ['a', 'b'] {
        grammar.add_terminal(t)?;
    }
    grammar.set_start_symbol('S')?;

    grammar.add_production('S', "AB")?;
    grammar.add_production('S', "AX")?;
    grammar.add_production('X', "SB")?;
    grammar.add_production('A', "a")?;
    grammar.add_production('B', "b")?;

    println!("Grammar:\n{}\n", grammar.definition());

    for word in ["ab", "aabb", "aaabbb", "abab", "aab"] {
        println!("is_derived({word:?}) = {}", grammar.is_derived(word)?);
    }

    println!("\n{}", grammar.table_as_text("aabb")?);
    println!("{}", grammar.table_as_text("abab")?);

    Ok(())
}

fn main() -> Result<(), GrammarError> {
    let _ = TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    simple_grammar()?;
    nested_grammar()?;

    Ok(())
}
