use crate::bytecode::Opcode;

/// `[` plus four body opcodes plus `]`
const SPAN: usize = 6;

/// Recognise `[ Add(a) Move(m) Add(-a) Move(-m) ]`, which moves the current
/// cell into the one `m` away.
///
/// Returns the fused opcode and how many opcodes it replaces.
pub fn transfer(ops: &[Opcode], start: usize) -> Option<(Opcode, usize)> {
    match ops[start] {
        Opcode::RJump(target) if target == start + SPAN - 1 => {}
        _ => return None,
    }

    match ops[start + 1..start + SPAN - 1] {
        [Opcode::Add(sub), Opcode::Move(there), Opcode::Add(add), Opcode::Move(back)]
            if sub == -add && there == -back =>
        {
            Some((Opcode::Transfer(there), SPAN))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_the_idiom() {
        let ops = [
            Opcode::RJump(5),
            Opcode::Add(-1),
            Opcode::Move(2),
            Opcode::Add(1),
            Opcode::Move(-2),
            Opcode::LJump(0),
        ];
        assert_eq!(transfer(&ops, 0), Some((Opcode::Transfer(2), 6)));
    }

    #[test]
    fn amounts_must_cancel() {
        let ops = [
            Opcode::RJump(5),
            Opcode::Add(-1),
            Opcode::Move(2),
            Opcode::Add(2),
            Opcode::Move(-2),
            Opcode::LJump(0),
        ];
        assert_eq!(transfer(&ops, 0), None);
    }

    #[test]
    fn body_must_be_exactly_four_opcodes() {
        let ops = [
            Opcode::RJump(6),
            Opcode::Add(-1),
            Opcode::Move(2),
            Opcode::Add(1),
            Opcode::Move(-2),
            Opcode::Output,
            Opcode::LJump(0),
        ];
        assert_eq!(transfer(&ops, 0), None);
    }
}
