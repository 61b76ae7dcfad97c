use crate::ir::ast::{Block, BlockKind, Statement};

pub fn group_statements(statements: Vec<Statement>) -> Vec<Block> {
    let mut grouper = Grouper::new();
    for statement in statements {
        grouper.push(statement);
    }
    grouper.finish()
}

struct Grouper {
    blocks: Vec<Block>,
    current: Block,
}

impl Grouper {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            current: Block::new(BlockKind::Simple),
        }
    }

    fn push(&mut self, statement: Statement) {
        if statement.subordinate {
            self.current.statements.push(statement);
        } else if statement.is_header() {
            // an empty simple block is still emitted here
            let kind = header_block_kind(&statement);
            self.close(kind);
            self.current.statements.push(statement);
        } else {
            if self.current.kind != BlockKind::Simple {
                self.close(BlockKind::Simple);
            }
            self.current.statements.push(statement);
        }
    }

    fn close(&mut self, next: BlockKind) {
        let finished = std::mem::replace(&mut self.current, Block::new(next));
        self.blocks.push(finished);
    }

    fn finish(mut self) -> Vec<Block> {
        self.blocks.push(self.current);
        self.blocks
    }
}

fn header_block_kind(header: &Statement) -> BlockKind {
    match header.first_token() {
        Some(word) if word.starts_with('i') => BlockKind::Conditional,
        _ => BlockKind::Iteration,
    }
}
