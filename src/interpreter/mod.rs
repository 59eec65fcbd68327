pub mod bytecode_interpreter;
pub mod profile;

use std::io::{self, Read, Write};

use clap::ValueEnum;
use thiserror::Error;
use tracing::debug;

use crate::{
    bytecode::Program,
    disassembler::{loop_report, ReportError},
};

use self::{bytecode_interpreter::ByteCodeInterpreter, profile::LoopProfile};

pub const DEFAULT_BUFFER_SIZE: usize = 30_000;

/// How cell arithmetic overflows
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellMode {
    /// 64 bit signed cells, only wrapping at the limits of an i64
    #[default]
    Unbounded,
    /// Classic byte cells, every update wraps modulo 256
    Wrapping,
}

impl CellMode {
    fn normalize(self, value: i64) -> i64 {
        match self {
            CellMode::Unbounded => value,
            CellMode::Wrapping => value as u8 as i64,
        }
    }
}

/// Everything a single run needs to know, passed in per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// Number of cells in the circular buffer, must be positive
    pub buffer_size: usize,
    /// Write a line per dispatched opcode to the diagnostic stream
    pub debug_trace: bool,
    /// Count loop visits and report them at the end of the run
    pub profile_loops: bool,
    pub cell_mode: CellMode,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            debug_trace: false,
            profile_loops: false,
            cell_mode: CellMode::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Buffer size must be positive, got {0}")]
    InvalidBufferSize(usize),

    #[error("Failed to read input: {0}")]
    Input(#[source] io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),

    #[error("Failed to write diagnostics: {0}")]
    Diagnostics(#[source] io::Error),

    #[error(transparent)]
    Report(#[from] ReportError),
}

pub struct Runtime<'a> {
    /// Index into the heap, always in bounds
    data_pointer: usize,

    /// Our circular heap
    heap: Vec<i64>,

    cell_mode: CellMode,

    in_stream: &'a mut dyn Read,
    out_stream: &'a mut dyn Write,
}

impl<'a> Runtime<'a> {
    pub fn new(
        config: &VmConfig,
        in_stream: &'a mut dyn Read,
        out_stream: &'a mut dyn Write,
    ) -> Result<Self, RuntimeError> {
        if config.buffer_size == 0 {
            return Err(RuntimeError::InvalidBufferSize(config.buffer_size));
        }

        Ok(Self {
            data_pointer: 0,
            heap: vec![0; config.buffer_size],
            cell_mode: config.cell_mode,
            in_stream,
            out_stream,
        })
    }

    pub fn reset(&mut self) {
        self.heap.fill(0);
        self.data_pointer = 0;
    }

    /// Read exactly one byte from the input stream into the current cell.
    /// Running out of input is an error like any other read failure.
    pub fn read(&mut self) -> Result<(), RuntimeError> {
        let mut byte = [0u8; 1];
        self.in_stream
            .read_exact(&mut byte)
            .map_err(RuntimeError::Input)?;
        self.heap[self.data_pointer] = byte[0] as i64;
        Ok(())
    }

    /// Write the low byte of the current cell to the output stream
    pub fn write(&mut self) -> Result<(), RuntimeError> {
        let byte = self.heap[self.data_pointer] as u8;
        self.out_stream
            .write_all(&[byte])
            .map_err(RuntimeError::Output)
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.out_stream.flush().map_err(RuntimeError::Output)
    }

    pub fn deref_and_add_value(&mut self, by: i64) {
        let cell = &mut self.heap[self.data_pointer];
        *cell = self.cell_mode.normalize(cell.wrapping_add(by));
    }

    /// Index `by` cells away from the data pointer, wrapping in both directions
    fn offset(&self, by: isize) -> usize {
        let len = self.heap.len();
        let by = by.rem_euclid(len as isize) as usize;
        (self.data_pointer + by) % len
    }

    pub fn shift_data_pointer(&mut self, by: isize) {
        self.data_pointer = self.offset(by);
    }

    pub fn clear(&mut self, step: bool) {
        self.heap[self.data_pointer] = 0;
        if step {
            self.shift_data_pointer(1);
        }
    }

    /// Add the current cell into the one `distance` away, leaving the current cell empty
    pub fn transfer(&mut self, distance: isize) {
        let target = self.offset(distance);
        let value = self.heap[self.data_pointer];
        self.heap[target] = self.cell_mode.normalize(self.heap[target].wrapping_add(value));
        self.heap[self.data_pointer] = 0;
    }

    /// Step until an empty cell is found, never returns if there isn't one on the way
    pub fn find_empty(&mut self, step: isize) {
        while !self.value_is_zero() {
            self.shift_data_pointer(step);
        }
    }

    pub fn value(&self) -> i64 {
        self.heap[self.data_pointer]
    }

    /// is the value at the data pointer zero?
    pub fn value_is_zero(&self) -> bool {
        self.heap[self.data_pointer] == 0
    }

    pub fn data_pointer(&self) -> usize {
        self.data_pointer
    }

    pub fn cells(&self) -> &[i64] {
        &self.heap
    }
}

/// Run a program from a clean buffer.
///
/// Trace lines and the loop profile report (when enabled in `config`) go to
/// `diagnostics`, program output goes to `output`.
pub fn run(
    program: &Program,
    config: &VmConfig,
    input: &mut dyn Read,
    output: &mut dyn Write,
    diagnostics: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let mut runtime = Runtime::new(config, input, output)?;
    let mut profile = config.profile_loops.then(LoopProfile::new);

    debug!(
        opcodes = program.len(),
        buffer_size = config.buffer_size,
        cell_mode = ?config.cell_mode,
        "starting run"
    );

    let mut interpreter = if config.debug_trace {
        ByteCodeInterpreter::with_trace(diagnostics)
    } else {
        ByteCodeInterpreter::new()
    };
    interpreter.run(&mut runtime, program, profile.as_mut())?;

    debug!(data_pointer = runtime.data_pointer(), "finished run");

    if let Some(profile) = profile {
        for line in loop_report(program, &profile)? {
            writeln!(diagnostics, "{}", line).map_err(RuntimeError::Diagnostics)?;
        }
    }

    Ok(())
}
