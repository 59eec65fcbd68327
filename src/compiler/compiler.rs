use std::iter::Peekable;

use crate::{bytecode::Opcode, lexer::LexerTokenKind};

use super::CompileError;

/// Jump target of a bracket that hasn't been matched yet
const UNRESOLVED: usize = usize::MAX;

pub struct Compiler<'a> {
    tokens: Peekable<std::slice::Iter<'a, LexerTokenKind>>,
}

impl<'a> Compiler<'a> {
    pub fn new(tokens: &'a [LexerTokenKind]) -> Compiler<'a> {
        Compiler {
            tokens: tokens.iter().peekable(),
        }
    }

    /// How many more copies of `token` follow the one just consumed
    fn consume_run(&mut self, token: &LexerTokenKind) -> usize {
        let mut count = 1;
        while self.tokens.next_if_eq(&token).is_some() {
            count += 1;
        }
        count
    }

    /// Fuse the tokens into opcodes, jump targets are left unresolved
    pub fn compile_block(&mut self) -> Vec<Opcode> {
        let mut instructions = vec![];

        while let Some(token) = self.tokens.next() {
            instructions.push(match *token {
                LexerTokenKind::DerefIncrement => Opcode::Add(self.consume_run(token) as i64),
                LexerTokenKind::DerefDecrement => Opcode::Add(-(self.consume_run(token) as i64)),
                LexerTokenKind::Increment => Opcode::Move(self.consume_run(token) as isize),
                LexerTokenKind::Decrement => Opcode::Move(-(self.consume_run(token) as isize)),
                LexerTokenKind::Read => Opcode::Input,
                LexerTokenKind::Write => Opcode::Output,
                LexerTokenKind::JumpStart => Opcode::RJump(UNRESOLVED),
                LexerTokenKind::JumpEnd => Opcode::LJump(UNRESOLVED),
                LexerTokenKind::ClearCell => Opcode::Clear { step: false },
                LexerTokenKind::ClearCellAndStep => Opcode::Clear { step: true },
                LexerTokenKind::EOF => break,
            })
        }

        instructions
    }
}

/// Point every bracket at its partner.
///
/// All targets are reset first, so this can be rerun after any structural edit
/// and never trusts what was there before.
pub fn match_loops(ops: &mut [Opcode]) -> Result<(), CompileError> {
    for op in ops.iter_mut() {
        if let Opcode::RJump(target) | Opcode::LJump(target) = op {
            *target = UNRESOLVED;
        }
    }

    for i in 0..ops.len() {
        match ops[i] {
            Opcode::RJump(_) => {
                let target = find_matching_ljump(ops, i)?;
                ops[i] = Opcode::RJump(target);
                ops[target] = Opcode::LJump(i);
            }
            // every `]` should have been reached through its `[` already
            Opcode::LJump(UNRESOLVED) => {
                return Err(CompileError::UnmatchedBracket {
                    symbol: ']',
                    index: i,
                })
            }
            _ => {}
        }
    }

    Ok(())
}

fn find_matching_ljump(ops: &[Opcode], start: usize) -> Result<usize, CompileError> {
    let mut depth = 0usize;

    for (i, op) in ops.iter().enumerate().skip(start + 1) {
        match op {
            Opcode::RJump(_) => depth += 1,
            Opcode::LJump(_) if depth == 0 => return Ok(i),
            Opcode::LJump(_) => depth -= 1,
            _ => {}
        }
    }

    Err(CompileError::UnmatchedBracket {
        symbol: '[',
        index: start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lexer::Lexer;

    fn fuse(source: &str) -> Vec<Opcode> {
        let tokens = Lexer::new(source).collect();
        Compiler::new(&tokens).compile_block()
    }

    #[test]
    fn brackets_start_unresolved() {
        assert_eq!(
            fuse("[+]"),
            vec![
                Opcode::RJump(UNRESOLVED),
                Opcode::Add(1),
                Opcode::LJump(UNRESOLVED)
            ]
        );
    }

    #[test]
    fn nested_loops_match_innermost_first() {
        let mut ops = fuse("[[]+[]]");
        match_loops(&mut ops).unwrap();
        assert_eq!(
            ops,
            vec![
                Opcode::RJump(6),
                Opcode::RJump(2),
                Opcode::LJump(1),
                Opcode::Add(1),
                Opcode::RJump(5),
                Opcode::LJump(4),
                Opcode::LJump(0),
            ]
        );
    }

    #[test]
    fn stale_targets_are_recomputed() {
        let mut ops = vec![Opcode::RJump(40), Opcode::Output, Opcode::LJump(17)];
        match_loops(&mut ops).unwrap();
        assert_eq!(ops, vec![Opcode::RJump(2), Opcode::Output, Opcode::LJump(0)]);

        let mut ops = vec![Opcode::Output, Opcode::LJump(0)];
        assert_eq!(
            match_loops(&mut ops),
            Err(CompileError::UnmatchedBracket {
                symbol: ']',
                index: 1
            })
        );
    }

    #[test]
    fn unclosed_loop_reports_its_start() {
        let mut ops = fuse("+[[]");
        assert_eq!(
            match_loops(&mut ops),
            Err(CompileError::UnmatchedBracket {
                symbol: '[',
                index: 1
            })
        );
    }
}
