use crate::ir::ast::{Statement, StatementKind, Token};

const SUBLINE_MARK: char = '\t';
const SEPARATOR: char = ' ';

/// Full declaration keywords, value kinds first.
pub const DECLARATION_KEYWORDS: [&str; 8] = [
    "number", "symbol", "bool", "line", "->number", "->symbol", "->bool", "->line",
];

/// Single-character declaration abbreviations.
const DECLARATION_ABBREVIATIONS: [&str; 5] = ["-", "n", "s", "b", "l"];

/// Splits a line on the space character. Runs of spaces never yield empty tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split(SEPARATOR)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turns one raw source line into a statement. Never fails: a malformed line
/// still produces a statement and is rejected later by the executor.
pub fn classify_line(text: &str, line: usize) -> Statement {
    match text.strip_prefix(SUBLINE_MARK) {
        Some(rest) => {
            // the character right after the tab is the subline indicator
            let mut chars = rest.chars();
            chars.next();
            let body = chars.as_str();
            Statement {
                subordinate: true,
                kind: classify_subordinate(body),
                tokens: tokenize(body),
                line,
            }
        }
        None => Statement {
            subordinate: false,
            kind: classify_top_level(text),
            tokens: tokenize(text),
            line,
        },
    }
}

fn classify_subordinate(body: &str) -> StatementKind {
    match body.chars().next() {
        Some('-' | 'n' | 's' | 'b' | 'l') => StatementKind::Declaration,
        Some('a') => StatementKind::Assignment,
        Some('r') => StatementKind::Read,
        Some('w') => StatementKind::Write,
        _ => StatementKind::Directive,
    }
}

fn classify_top_level(text: &str) -> StatementKind {
    // `as ` is reserved and must never be taken for an assignment
    if text.starts_with("as ") || text.starts_with("if ") {
        return StatementKind::Directive;
    }

    match text.split(SEPARATOR).find(|word| !word.is_empty()) {
        Some(word) if is_declaration_word(word) => StatementKind::Declaration,
        Some("assign") => StatementKind::Assignment,
        Some("read") => StatementKind::Read,
        Some("write") => StatementKind::Write,
        _ => StatementKind::Directive,
    }
}

fn is_declaration_word(word: &str) -> bool {
    DECLARATION_KEYWORDS.contains(&word) || DECLARATION_ABBREVIATIONS.contains(&word)
}
