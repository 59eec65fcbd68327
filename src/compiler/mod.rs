use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::{
    bytecode::Program,
    lexer::lexer::Lexer,
    optimizer::{optimize, Optimizations},
};

use self::compiler::{match_loops, Compiler};

pub mod compiler;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Syntax error: unmatched square bracket ({symbol:}) at opcode {index:}")]
    UnmatchedBracket { symbol: char, index: usize },
}

/// Compile source with every peephole optimization enabled
pub fn compile(source: &str) -> Result<Program, CompileError> {
    compile_with(source, &Optimizations::all())
}

/// Compile source, only fusing the idioms in `options`.
///
/// Loops are matched twice, once on the fused opcodes so the optimizer can see
/// loop bodies and once after the optimizer has removed spans, since every
/// jump target is stale after that.
pub fn compile_with(
    source: &str,
    options: &HashSet<Optimizations>,
) -> Result<Program, CompileError> {
    let tokens = Lexer::new(source).collect();

    let mut ops = Compiler::new(&tokens).compile_block();
    debug!(tokens = tokens.len(), opcodes = ops.len(), "fused runs");
    match_loops(&mut ops)?;

    let mut optimized = optimize(&ops, options);
    debug!(before = ops.len(), after = optimized.len(), "optimized");
    match_loops(&mut optimized)?;

    Ok(Program::from_resolved(optimized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::Opcode;

    fn ops(source: &str) -> Vec<Opcode> {
        compile(source).unwrap().ops().to_vec()
    }

    #[test]
    fn runs_fuse_into_one_opcode() {
        assert_eq!(ops("+++"), vec![Opcode::Add(3)]);
        assert_eq!(ops("---"), vec![Opcode::Add(-3)]);
        assert_eq!(ops(">>>><"), vec![Opcode::Move(4), Opcode::Move(-1)]);
    }

    #[test]
    fn runs_do_not_fuse_across_characters() {
        assert_eq!(
            ops("+-+-"),
            vec![
                Opcode::Add(1),
                Opcode::Add(-1),
                Opcode::Add(1),
                Opcode::Add(-1)
            ]
        );
    }

    #[test]
    fn io_is_never_fused() {
        assert_eq!(
            ops(",,.."),
            vec![Opcode::Input, Opcode::Input, Opcode::Output, Opcode::Output]
        );
    }

    #[test]
    fn clear_leaves_no_jumps() {
        let program = ops("[-]");
        assert_eq!(program, vec![Opcode::Clear { step: false }]);
        assert!(!program.iter().any(Opcode::is_jump));
        assert_eq!(ops("[-]>"), vec![Opcode::Clear { step: true }]);
    }

    #[test]
    fn transfer_idiom() {
        assert_eq!(ops("[->+<]"), vec![Opcode::Transfer(1)]);
        assert_eq!(ops("[-<<+>>]"), vec![Opcode::Transfer(-2)]);
        // the amounts only need to cancel out
        assert_eq!(ops("[--->>>+++<<<]"), vec![Opcode::Transfer(3)]);
    }

    #[test]
    fn find_empty_idiom() {
        assert_eq!(ops("[>]"), vec![Opcode::FindEmpty(1)]);
        assert_eq!(ops("[>>]"), vec![Opcode::FindEmpty(2)]);
        assert_eq!(ops("[<<<]"), vec![Opcode::FindEmpty(-3)]);
    }

    #[test]
    fn unbalanced_moves_are_not_transfers() {
        assert_eq!(
            ops("[->+<<]"),
            vec![
                Opcode::RJump(5),
                Opcode::Add(-1),
                Opcode::Move(1),
                Opcode::Add(1),
                Opcode::Move(-2),
                Opcode::LJump(0),
            ]
        );
    }

    #[test]
    fn jumps_are_resolved_after_spans_are_removed() {
        // the inner transfer shrinks the outer loop from 8 opcodes to 3
        assert_eq!(
            ops("+[[->+<]>]"),
            vec![
                Opcode::Add(1),
                Opcode::RJump(4),
                Opcode::Transfer(1),
                Opcode::Move(1),
                Opcode::LJump(1),
            ]
        );
    }

    #[test]
    fn unmatched_brackets_fail() {
        for source in ["[", "]", "[[]", "[]]", "][", "+[>[-]"] {
            assert!(
                matches!(
                    compile(source),
                    Err(CompileError::UnmatchedBracket { .. })
                ),
                "{} should not compile",
                source
            );
        }
    }

    #[test]
    fn unmatched_close_reports_its_position() {
        assert_eq!(
            compile("+]"),
            Err(CompileError::UnmatchedBracket {
                symbol: ']',
                index: 1
            })
        );
    }

    #[test]
    fn disabled_idioms_stay_as_loops() {
        let program = compile_with("[>]", &HashSet::new()).unwrap();
        assert_eq!(
            program.ops(),
            &[Opcode::RJump(2), Opcode::Move(1), Opcode::LJump(0)]
        );
    }

    #[test]
    fn every_bracket_points_at_its_match() {
        let program = compile("++[>+[>++<-]<-[>>]>[-]>,.[<]]").unwrap();
        for (i, op) in program.iter().enumerate() {
            match *op {
                Opcode::RJump(target) => assert_eq!(program[target], Opcode::LJump(i)),
                Opcode::LJump(target) => assert_eq!(program[target], Opcode::RJump(i)),
                _ => {}
            }
        }
    }
}
