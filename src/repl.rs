use std::{
    collections::HashSet,
    io::{self, Write},
};

use bfvm::{compile_with, run, Optimizations, VmConfig};
use colored::Colorize;
use rustyline::{error::ReadlineError, DefaultEditor};

/// Compile and run one line at a time, each in a fresh buffer.
///
/// Errors in a line are printed and the REPL carries on, an empty line or
/// EOF ends it.
pub fn start(config: &VmConfig, optimizations: &HashSet<Optimizations>) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        let line = match editor.readline("bf> ") {
            Ok(line) => line,
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => return Ok(()),
            Err(e) => return Err(e),
        };

        if line.is_empty() {
            return Ok(());
        }
        let _ = editor.add_history_entry(line.as_str());

        let program = match compile_with(&line, optimizations) {
            Ok(program) => program,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        let stdin = io::stdin();
        let stdout = io::stdout();
        let stderr = io::stderr();
        let result = run(
            &program,
            config,
            &mut stdin.lock(),
            &mut stdout.lock(),
            &mut stderr.lock(),
        );
        println!();

        if let Err(e) = result {
            println!("{}", e.to_string().red());
        }
        let _ = io::stdout().flush();
    }
}
