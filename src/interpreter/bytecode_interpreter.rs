use std::io::Write;

use crate::bytecode::{Opcode, Program};

use super::{profile::LoopProfile, Runtime, RuntimeError};

pub struct ByteCodeInterpreter<'d> {
    /// Where a line per dispatched opcode goes, if anywhere
    trace: Option<&'d mut dyn Write>,
}

impl<'d> ByteCodeInterpreter<'d> {
    pub fn new() -> Self {
        Self { trace: None }
    }

    pub fn with_trace(trace: &'d mut dyn Write) -> Self {
        Self { trace: Some(trace) }
    }

    pub fn run(
        &mut self,
        runtime: &mut Runtime,
        program: &Program,
        mut profile: Option<&mut LoopProfile>,
    ) -> Result<(), RuntimeError> {
        let mut pc = 0;
        while pc < program.len() {
            let op = program[pc];

            if let Some(trace) = self.trace.as_mut() {
                writeln!(
                    trace,
                    "{:05}: {}, {}: [{}]",
                    pc,
                    op,
                    runtime.data_pointer(),
                    runtime.value()
                )
                .map_err(RuntimeError::Diagnostics)?;
            }

            match op {
                Opcode::Add(by) => runtime.deref_and_add_value(by),
                Opcode::Move(by) => runtime.shift_data_pointer(by),
                Opcode::Input => runtime.read()?,
                Opcode::Output => runtime.write()?,
                Opcode::RJump(target) => {
                    // counted on every check, not just when the jump is taken
                    if let Some(profile) = profile.as_deref_mut() {
                        profile.record(pc);
                    }
                    if runtime.value_is_zero() {
                        pc = target;
                    }
                }
                Opcode::LJump(target) => {
                    if !runtime.value_is_zero() {
                        pc = target;
                    }
                }
                Opcode::Clear { step } => runtime.clear(step),
                Opcode::Transfer(distance) => runtime.transfer(distance),
                Opcode::FindEmpty(step) => runtime.find_empty(step),
            }
            // targets are the bracket itself, this steps past it
            pc += 1;
        }

        runtime.flush()
    }
}

impl Default for ByteCodeInterpreter<'_> {
    fn default() -> Self {
        Self::new()
    }
}
