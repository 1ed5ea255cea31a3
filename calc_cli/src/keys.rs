//! Typed input for the terminal client.
//!
//! A line is either a meta command (`:mode cooking`, `:modes`, `:help`, `:q`)
//! or whitespace separated keys. Keys are button labels; plain numbers such
//! as `120` or `2.5` expand into one press per character, and ASCII aliases
//! stand in for labels that are awkward to type (`sqrt` for `√`).

use calc_core::{CalcError, CalcResult, ContextMode};

/// One thing to do for a line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Press a button by label
    Press(String),
    SwitchMode(ContextMode),
    ListModes,
    Help,
    Quit,
}

/// Parse a line of input.
pub fn parse_line(line: &str) -> CalcResult<Vec<Command>> {
    let line = line.trim();
    if let Some(meta) = line.strip_prefix(':') {
        return parse_meta(meta).map(|command| vec![command]);
    }

    let mut commands = Vec::new();
    for token in line.split_whitespace() {
        if is_number(token) {
            commands.extend(token.chars().map(|c| Command::Press(c.to_string())));
        } else {
            commands.push(Command::Press(alias(token).to_string()));
        }
    }
    Ok(commands)
}

fn parse_meta(meta: &str) -> CalcResult<Command> {
    let mut parts = meta.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("mode"), Some(name)) => name.parse().map(Command::SwitchMode),
        (Some("modes"), None) => Ok(Command::ListModes),
        (Some("help" | "h" | "?"), None) => Ok(Command::Help),
        (Some("q" | "quit" | "exit"), None) => Ok(Command::Quit),
        _ => Err(CalcError::invalid_input(format!("Unknown command ':{}'", meta))),
    }
}

fn is_number(token: &str) -> bool {
    token.len() > 1 && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Map keyboard spellings onto button labels.
pub fn alias(token: &str) -> &str {
    match token.to_ascii_lowercase().as_str() {
        "c" | "clear" => "C",
        "del" | "bs" | "backspace" => "Del",
        "enter" => "=",
        "*" | "x" => "×",
        "sqrt" => "√",
        "sq" | "x2" | "x^2" => "x²",
        "pi" => "π",
        "half" => "½",
        "third" => "⅓",
        "quarter" => "¼",
        "double" | "2x" => "2×",
        "triple" | "3x" => "3×",
        "temp" | "c/f" => "°C/°F",
        _ => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presses(line: &str) -> Vec<String> {
        parse_line(line)
            .unwrap()
            .into_iter()
            .map(|command| match command {
                Command::Press(label) => label,
                other => panic!("unexpected {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_numbers_expand() {
        assert_eq!(presses("12.5 + 3 ="), ["1", "2", ".", "5", "+", "3", "="]);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(presses("16 sqrt"), ["1", "6", "√"]);
        assert_eq!(presses("6 * 7 enter"), ["6", "×", "7", "="]);
        assert_eq!(presses("c DEL Tip"), ["C", "Del", "Tip"]);
    }

    #[test]
    fn test_meta_commands() {
        assert_eq!(
            parse_line(":mode Cooking").unwrap(),
            vec![Command::SwitchMode(ContextMode::Cooking)]
        );
        assert_eq!(parse_line(":modes").unwrap(), vec![Command::ListModes]);
        assert_eq!(parse_line(":q").unwrap(), vec![Command::Quit]);
        assert!(parse_line(":mode Garden").is_err());
        assert!(parse_line(":frobnicate").is_err());
    }

    #[test]
    fn test_blank_line() {
        assert!(parse_line("   ").unwrap().is_empty());
    }
}
