use std::fmt::Write;

use crate::{
    bytecode::{Opcode, Program},
    interpreter::profile::LoopProfile,
};

use super::ReportError;

/// One line per opcode: index, kind, payload
pub fn disassemble(program: &Program) -> Vec<String> {
    program
        .iter()
        .enumerate()
        .map(|(i, op)| format!("{:05}:\t{:<10}{}", i, op.kind(), op.payload()))
        .collect()
}

/// Render opcodes back into a terse, almost-brainfuck form, e.g. an unfused
/// `[->+<]` renders as `[-1+1>1+-1>]` and its fused transfer as `1T`.
pub fn render_compact(ops: &[Opcode]) -> String {
    let mut out = String::new();
    for op in ops {
        // writing into a String can't fail
        let _ = match op {
            Opcode::Add(amount) => write!(out, "{}+", amount),
            Opcode::Move(amount) => write!(out, "{}>", amount),
            Opcode::Input => write!(out, ","),
            Opcode::Output => write!(out, "."),
            Opcode::RJump(_) => write!(out, "["),
            Opcode::LJump(_) => write!(out, "]"),
            Opcode::Clear { step: false } => write!(out, "x"),
            Opcode::Clear { step: true } => write!(out, "X"),
            Opcode::Transfer(distance) => write!(out, "{}T", distance),
            Opcode::FindEmpty(step) => write!(out, "{}F", step),
        };
    }
    out
}

/// `visits: loop` lines for every profiled loop, least visited first
pub fn loop_report(program: &Program, profile: &LoopProfile) -> Result<Vec<String>, ReportError> {
    profile
        .sorted()
        .into_iter()
        .map(|(index, visits)| {
            let out_of_range = |index| ReportError::OutOfRange {
                index,
                len: program.len(),
            };

            let target = match program.get(index).ok_or_else(|| out_of_range(index))? {
                Opcode::RJump(target) => *target,
                op => {
                    return Err(ReportError::NotALoop {
                        index,
                        kind: op.kind(),
                    })
                }
            };

            let span = program
                .ops()
                .get(index..=target)
                .ok_or_else(|| out_of_range(target))?;
            Ok(format!("{}: {}", visits, render_compact(span)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{compile, compile_with};
    use std::collections::HashSet;

    #[test]
    fn compact_rendering() {
        let program = compile("++>-<,.[-][-]>[->+<][<<]").unwrap();
        assert_eq!(render_compact(program.ops()), "2+1>-1+-1>,.xX1T-2F");

        let program = compile_with("[>]", &HashSet::new()).unwrap();
        assert_eq!(render_compact(program.ops()), "[1>]");
    }

    #[test]
    fn dump_has_a_line_per_opcode() {
        let program = compile("+[>.]").unwrap();
        let lines = disassemble(&program);
        assert_eq!(lines.len(), program.len());
        assert_eq!(lines[0], "00000:\tAdd       1");
        assert_eq!(lines[1], "00001:\tRJump     -> 4");
        assert_eq!(lines[3], "00003:\tOutput    ");
    }

    #[test]
    fn report_is_sorted_and_rendered() {
        let program = compile("+[>+[-+-]<-]").unwrap();
        let mut profile = LoopProfile::new();
        for _ in 0..5 {
            profile.record(4);
        }
        profile.record(1);

        assert_eq!(
            loop_report(&program, &profile).unwrap(),
            vec!["1: [1>1+[-1+1+-1+]-1>-1+]", "5: [-1+1+-1+]"]
        );
    }

    #[test]
    fn report_rejects_non_loops() {
        let program = compile("+[-+-]").unwrap();
        let mut profile = LoopProfile::new();
        profile.record(0);
        assert_eq!(
            loop_report(&program, &profile),
            Err(ReportError::NotALoop {
                index: 0,
                kind: "Add"
            })
        );

        let mut profile = LoopProfile::new();
        profile.record(99);
        assert_eq!(
            loop_report(&program, &profile),
            Err(ReportError::OutOfRange { index: 99, len: 6 })
        );
    }
}
