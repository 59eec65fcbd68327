use crate::bytecode::Opcode;

/// Recognise `[ Move(m) ]`, keep stepping by `m` until an empty cell.
///
/// Only the span length matters, `[>>>]` is as much of a match as `[>]`.
pub fn find_empty(ops: &[Opcode], start: usize) -> Option<(Opcode, usize)> {
    match ops[start] {
        Opcode::RJump(target) if target == start + 2 => {}
        _ => return None,
    }

    match ops[start + 1] {
        Opcode::Move(step) => Some((Opcode::FindEmpty(step), 3)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_single_move_loops() {
        let ops = [Opcode::RJump(2), Opcode::Move(-4), Opcode::LJump(0)];
        assert_eq!(find_empty(&ops, 0), Some((Opcode::FindEmpty(-4), 3)));
    }

    #[test]
    fn ignores_other_bodies() {
        let ops = [Opcode::RJump(2), Opcode::Add(1), Opcode::LJump(0)];
        assert_eq!(find_empty(&ops, 0), None);
    }
}
