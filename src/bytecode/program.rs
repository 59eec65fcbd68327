use std::ops::Index;

use super::Opcode;

/// A compiled, jump-resolved sequence of opcodes.
///
/// Only the compiler builds these, every `RJump`/`LJump` target is the index
/// of its matching bracket by the time a `Program` exists.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Program {
    ops: Vec<Opcode>,
}

impl Program {
    pub(crate) fn from_resolved(ops: Vec<Opcode>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Opcode> {
        self.ops.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Opcode> {
        self.ops.iter()
    }
}

impl Index<usize> for Program {
    type Output = Opcode;

    fn index(&self, index: usize) -> &Self::Output {
        &self.ops[index]
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Opcode;
    type IntoIter = std::slice::Iter<'a, Opcode>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
