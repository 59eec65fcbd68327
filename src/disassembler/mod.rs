use thiserror::Error;

pub mod disassembler;

pub use self::disassembler::{disassemble, loop_report, render_compact};

/// A profile that doesn't line up with the program it was recorded against
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Profiled opcode {index:} is out of range for a program of {len:} opcodes")]
    OutOfRange { index: usize, len: usize },

    #[error("Profiled opcode {index:} is {kind:}, not the start of a loop")]
    NotALoop { index: usize, kind: &'static str },
}
