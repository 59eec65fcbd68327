//! A brainfuck compiler and bytecode virtual machine.
//!
//! Source is lexed (comments dropped, clear idioms recognised), fused into
//! opcodes, jump resolved, peephole optimized and resolved again, then run
//! over a circular buffer.

pub mod bytecode;
pub mod compiler;
pub mod disassembler;
pub mod interpreter;
pub mod lexer;
pub mod optimizer;

pub use bytecode::{Opcode, Program};
pub use compiler::{compile, compile_with, CompileError};
pub use disassembler::{disassemble, loop_report, render_compact};
pub use interpreter::{profile::LoopProfile, run, CellMode, RuntimeError, VmConfig};
pub use optimizer::Optimizations;
