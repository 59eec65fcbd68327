extern crate clap;

mod repl;

use std::{
    collections::HashSet,
    io::{self, Write},
    path::PathBuf,
    process,
    time::Instant,
};

use bfvm::{
    compile_with, disassemble,
    interpreter::{CellMode, VmConfig, DEFAULT_BUFFER_SIZE},
    lexer::lexer::Lexer,
    render_compact, run, Optimizations, Program,
};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Brainf**k compiler/optimizer/interpreter. Runs a REPL when no file is given.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to operate on
    #[arg()]
    file: Option<PathBuf>,

    /// What to do with the file, defaults to running it
    #[arg(value_enum)]
    commands: Vec<Commands>,

    /// Only apply these peephole optimizations
    #[arg(short, long, value_enum)]
    optimizations: Vec<Optimizations>,

    /// Apply every peephole optimization (the default when none are listed)
    #[arg(short, long)]
    all_optimizations: bool,

    /// Number of cells in the circular buffer
    #[arg(short, long, env = "BF_BUFFER_SIZE", default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Dump the program before running it and trace every opcode
    #[arg(long, env = "BF_DEBUG")]
    debug: bool,

    /// Report how often each loop was entered once the run finishes
    #[arg(short, long)]
    profile_loops: bool,

    #[arg(short, long, value_enum, default_value_t = CellMode::Unbounded)]
    cell_mode: CellMode,

    /// Print how long each stage took
    #[arg(short, long)]
    timings: bool,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the lexer tokens
    Tokens,
    /// Output the bytecode, one opcode per line
    Bytecode,
    /// Output the bytecode in compact form
    Compact,
    /// Run the bytecode
    Run,
}

impl Args {
    fn vm_config(&self) -> VmConfig {
        VmConfig {
            buffer_size: self.buffer_size,
            debug_trace: self.debug,
            profile_loops: self.profile_loops,
            cell_mode: self.cell_mode,
        }
    }

    fn optimizations(&self) -> HashSet<Optimizations> {
        if self.all_optimizations || self.optimizations.is_empty() {
            Optimizations::all()
        } else {
            self.optimizations.iter().copied().collect()
        }
    }
}

/// Status lines go to stderr so they never mix with program output
fn status(timings: bool, message: &str, now: Instant) {
    if timings {
        eprintln!("{} {:.2?}", message.green(), now.elapsed());
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", "Error".red(), message);
    process::exit(1);
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "bfvm=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = args.vm_config();
    let optimizations = args.optimizations();

    let Some(file) = &args.file else {
        if let Err(e) = repl::start(&config, &optimizations) {
            fail(e);
        }
        return;
    };

    let mut commands: HashSet<Commands> = HashSet::from_iter(args.commands.iter().cloned());
    if commands.is_empty() {
        commands.insert(Commands::Run);
    }

    let text = std::fs::read_to_string(file)
        .unwrap_or_else(|e| fail(format!("can't read {}: {}", file.display(), e)));

    if commands.contains(&Commands::Tokens) {
        let tokens: String = Lexer::new(&text)
            .collect()
            .iter()
            .map(|token| token.symbol())
            .collect();
        println!("{}", tokens);
    }

    let now = Instant::now();
    let program = compile_with(&text, &optimizations).unwrap_or_else(|e| fail(e));
    status(args.timings, "Finished compiling in", now);

    if commands.contains(&Commands::Bytecode) || (args.debug && commands.contains(&Commands::Run)) {
        print_lines(&mut io::stderr(), disassemble(&program));
    }

    if commands.contains(&Commands::Compact) {
        println!("{}", render_compact(program.ops()));
    }

    if commands.contains(&Commands::Run) {
        let now = Instant::now();
        run_program(&program, &config).unwrap_or_else(|e| fail(e));
        status(args.timings, "Finished running in", now);
    }
}

fn print_lines(out: &mut dyn Write, lines: Vec<String>) {
    for line in lines {
        let _ = writeln!(out, "{}", line);
    }
}

fn run_program(program: &Program, config: &VmConfig) -> Result<(), bfvm::RuntimeError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    run(
        program,
        config,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}
