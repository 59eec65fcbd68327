use std::collections::HashSet;

use clap::ValueEnum;
use tracing::trace;

use crate::bytecode::Opcode;

use self::{find_empty::find_empty, transfer::transfer};

pub mod find_empty;
pub mod transfer;

#[derive(ValueEnum, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Optimizations {
    /// Fold `[-<+>]` style loops into a single transfer
    Transfer,
    /// Fold `[>]` style loops into a single scan for an empty cell
    FindEmpty,
}

impl Optimizations {
    pub fn all() -> HashSet<Optimizations> {
        HashSet::from([Optimizations::Transfer, Optimizations::FindEmpty])
    }
}

/// Replace recognised loops with single opcodes.
///
/// `ops` must have its jumps resolved. The result has stale jump targets and
/// has to be matched again before it can run.
pub fn optimize(ops: &[Opcode], options: &HashSet<Optimizations>) -> Vec<Opcode> {
    let mut result = Vec::with_capacity(ops.len());
    let mut pc = 0;

    while pc < ops.len() {
        let fused = match ops[pc] {
            Opcode::RJump(_) => {
                let transferred = if options.contains(&Optimizations::Transfer) {
                    transfer(ops, pc)
                } else {
                    None
                };

                transferred.or_else(|| {
                    if options.contains(&Optimizations::FindEmpty) {
                        find_empty(ops, pc)
                    } else {
                        None
                    }
                })
            }
            _ => None,
        };

        match fused {
            Some((op, replaced)) => {
                trace!(at = pc, replaced, %op, "fused loop");
                result.push(op);
                pc += replaced;
            }
            None => {
                result.push(ops[pc]);
                pc += 1;
            }
        }
    }

    result
}
