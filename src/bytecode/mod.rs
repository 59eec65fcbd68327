pub mod program;

use std::fmt;

pub use program::Program;

/// The primitive operations the virtual machine understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Add the given amount to the cell under the data pointer
    Add(i64),

    /// Shift the data pointer by the given amount (wrapping around the buffer)
    Move(isize),

    /// Jump to the matching `LJump` if the current cell is zero
    RJump(usize),

    /// Jump back to the matching `RJump` if the current cell is non-zero
    LJump(usize),

    /// Read one byte of input into the current cell
    Input,

    /// Write the current cell as one byte of output
    Output,

    /// Zero the current cell, stepping the data pointer right by one if `step` is set
    Clear { step: bool },

    /// Add the current cell into the cell `distance` away and zero the current cell
    Transfer(isize),

    /// Move by `step` repeatedly until the current cell is zero
    FindEmpty(isize),
}

impl Opcode {
    pub fn kind(&self) -> &'static str {
        match self {
            Opcode::Add(_) => "Add",
            Opcode::Move(_) => "Move",
            Opcode::RJump(_) => "RJump",
            Opcode::LJump(_) => "LJump",
            Opcode::Input => "Input",
            Opcode::Output => "Output",
            Opcode::Clear { .. } => "Clear",
            Opcode::Transfer(_) => "Transfer",
            Opcode::FindEmpty(_) => "FindEmpty",
        }
    }

    /// The payload in a human readable form, empty for opcodes without one
    pub fn payload(&self) -> String {
        match self {
            Opcode::Add(amount) => amount.to_string(),
            Opcode::Move(amount) => amount.to_string(),
            Opcode::RJump(target) | Opcode::LJump(target) => format!("-> {}", target),
            Opcode::Input | Opcode::Output => String::new(),
            Opcode::Clear { step } => format!("step={}", step),
            Opcode::Transfer(distance) => distance.to_string(),
            Opcode::FindEmpty(step) => step.to_string(),
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Opcode::RJump(_) | Opcode::LJump(_))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let payload = self.payload();
        if payload.is_empty() {
            write!(f, "{}", self.kind())
        } else {
            write!(f, "{}({})", self.kind(), payload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_payload_when_present() {
        assert_eq!(Opcode::Add(-3).to_string(), "Add(-3)");
        assert_eq!(Opcode::RJump(7).to_string(), "RJump(-> 7)");
        assert_eq!(Opcode::Output.to_string(), "Output");
        assert_eq!(Opcode::Clear { step: true }.to_string(), "Clear(step=true)");
    }

    #[test]
    fn only_brackets_are_jumps() {
        assert!(Opcode::RJump(0).is_jump());
        assert!(Opcode::LJump(0).is_jump());
        assert!(!Opcode::FindEmpty(1).is_jump());
        assert!(!Opcode::Transfer(1).is_jump());
    }
}
