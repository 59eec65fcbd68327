use super::{is_instruction, LexerTokenKind};

const CLEAR_CELL: [char; 3] = ['[', '-', ']'];

/// Turns source text into tokens, dropping comments and recognising the clear idioms.
///
/// Comments are stripped before idioms are matched so `[ - ]` is a clear just like `[-]`.
#[derive(Debug, Clone)]
pub struct Lexer {
    /** Instruction characters only, comments have already been removed */
    chars: Vec<char>,
    /** offset within `chars` */
    offset: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            chars: source.chars().filter(|c| is_instruction(*c)).collect(),
            offset: 0,
        }
    }

    fn starts_with(&self, pattern: &[char]) -> bool {
        self.chars[self.offset..].starts_with(pattern)
    }

    /// Longest match wins, `[-]>` is checked before `[-]`
    fn match_idiom(&mut self) -> Option<LexerTokenKind> {
        if !self.starts_with(&CLEAR_CELL) {
            return None;
        }

        if self.chars.get(self.offset + CLEAR_CELL.len()) == Some(&'>') {
            self.offset += CLEAR_CELL.len() + 1;
            Some(LexerTokenKind::ClearCellAndStep)
        } else {
            self.offset += CLEAR_CELL.len();
            Some(LexerTokenKind::ClearCell)
        }
    }

    fn transform_to_type(c: char) -> LexerTokenKind {
        match c {
            '>' => LexerTokenKind::Increment,
            '<' => LexerTokenKind::Decrement,
            '+' => LexerTokenKind::DerefIncrement,
            '-' => LexerTokenKind::DerefDecrement,
            '.' => LexerTokenKind::Write,
            ',' => LexerTokenKind::Read,
            '[' => LexerTokenKind::JumpStart,
            ']' => LexerTokenKind::JumpEnd,
            // filtered out in `new`
            _ => unreachable!("non-instruction character {:?} survived filtering", c),
        }
    }

    pub fn next_token(&mut self) -> LexerTokenKind {
        if let Some(idiom) = self.match_idiom() {
            return idiom;
        }

        match self.chars.get(self.offset) {
            Some(&c) => {
                self.offset += 1;
                Self::transform_to_type(c)
            }
            None => LexerTokenKind::EOF,
        }
    }

    pub fn collect(&mut self) -> Vec<LexerTokenKind> {
        let mut v = vec![];
        loop {
            match self.next_token() {
                LexerTokenKind::EOF => break v,
                tok => v.push(tok),
            }
        }
    }
}
