pub mod blocks;
pub mod lexer;

use crate::ir::ast::{Block, Statement};

/// Classifies every non-blank line. Line numbers count blank lines too.
pub fn statements(source: &str) -> Vec<Statement> {
    source
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| lexer::classify_line(text, index + 1))
        .collect()
}

/// Source text to blocks, ready for the executor.
pub fn parse(source: &str) -> Vec<Block> {
    blocks::group_statements(statements(source))
}
