pub mod lexer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerTokenKind {
    // `>`: Increment the `data pointer` by one
    Increment,
    // `<`: Decrement the `data pointer` by one
    Decrement,

    // `+`: Increment the cell at the `data pointer` by one
    DerefIncrement,
    // `-`: Decrement the cell at the `data pointer` by one
    DerefDecrement,

    // `.`: Write the cell at the `data pointer` to the `output device`
    Write,
    // `,`: Read the next byte from the `input device` into the `data pointer`
    Read,

    // `[`: If the cell at the `data pointer` is zero, jump forward to the matching `]`
    JumpStart,
    // `]`: If the cell at the `data pointer` is non-zero, jump back to the matching `[`
    JumpEnd,

    // `[-]`: Zero the cell at the `data pointer`
    ClearCell,
    // `[-]>`: Zero the cell at the `data pointer` then step right by one
    ClearCellAndStep,

    // End of file: no more tokens left
    EOF,
}

impl LexerTokenKind {
    /// The symbol this token is printed as, the clear markers use `x`/`X`
    pub fn symbol(&self) -> &'static str {
        match self {
            LexerTokenKind::Increment => ">",
            LexerTokenKind::Decrement => "<",
            LexerTokenKind::DerefIncrement => "+",
            LexerTokenKind::DerefDecrement => "-",
            LexerTokenKind::Write => ".",
            LexerTokenKind::Read => ",",
            LexerTokenKind::JumpStart => "[",
            LexerTokenKind::JumpEnd => "]",
            LexerTokenKind::ClearCell => "x",
            LexerTokenKind::ClearCellAndStep => "X",
            LexerTokenKind::EOF => "",
        }
    }
}

/// Is this one of the eight characters that carry meaning, everything else is a comment
pub fn is_instruction(c: char) -> bool {
    matches!(c, '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']')
}
