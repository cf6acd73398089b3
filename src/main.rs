use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    thread,
};

use chonker::{error::Error, interpreter::evaluator::core::Interpreter};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

/// Words that begin a statement or declaration at the prompt; lines starting
/// with anything else are printed with `puts`.
const STATEMENT_WORDS: &[&str] = &["print", "puts", "number", "string", "bool", "list", "var",
                                   "function", "if", "while", "for", "switch", "return", "break"];

/// Stack reserved for the interpreter thread, deep enough for the call
/// depth limit of the evaluator.
const STACK_SIZE: usize = 512 * 1024 * 1024;

/// chonker is a small, statically typed scripting language.
///
/// Runs a source file, a one-line program given with `--source`, or an
/// interactive prompt when neither is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the program to run.
    path: Option<PathBuf>,

    /// Runs this text as the program instead of reading a file.
    #[arg(short, long, conflicts_with = "path")]
    source: Option<String>,

    /// Log filter for diagnostics on standard error, such as `debug` or
    /// `chonker=trace`.
    #[arg(long, default_value = "off")]
    log: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log);

    let worker = thread::Builder::new().name("interpreter".to_string())
                                       .stack_size(STACK_SIZE)
                                       .spawn(move || run(args));

    match worker {
        Ok(handle) => handle.join().unwrap_or(ExitCode::FAILURE),
        Err(e) => {
            println!("Failed to start the interpreter: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the program or prompt selected by `args`.
fn run(args: Args) -> ExitCode {
    let source = match (args.source, args.path) {
        (Some(source), _) => source,
        (None, Some(path)) => match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                println!("Failed to read the input file '{}': {e}", path.display());
                return ExitCode::FAILURE;
            },
        },
        (None, None) => return repl(),
    };

    let mut interpreter = Interpreter::new(io::stdout());
    match interpreter.run_source(&source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(errors) => {
            report(&errors);
            ExitCode::FAILURE
        },
    }
}

/// Installs the stderr log subscriber.
fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|e| {
                                                  eprintln!("Ignoring invalid log filter '{directive}': {e}");
                                                  EnvFilter::new("off")
                                              });

    fmt().with_env_filter(filter)
         .with_writer(io::stderr)
         .with_target(false)
         .init();
}

/// Runs the interactive prompt until end of input.
///
/// One interpreter serves the whole session, so declarations persist from
/// line to line. Errors are printed and the session goes on.
fn repl() -> ExitCode {
    let mut interpreter = Interpreter::new(io::stdout());
    let mut lines = io::stdin().lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                println!("Failed to read from standard input: {e}");
                return ExitCode::FAILURE;
            },
            None => {
                println!();
                return ExitCode::SUCCESS;
            },
        };

        let Some(source) = repl_source(&line) else {
            continue;
        };

        if let Err(errors) = interpreter.run_source(&source) {
            report(&errors);
        }
    }
}

/// Turns a prompt line into a program.
///
/// Empty lines are skipped. Expressions are wrapped in `puts`, and a missing
/// `;` is appended unless the line ends with a block.
fn repl_source(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let first_word = line.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                         .next()
                         .unwrap_or_default();
    let is_statement = line.starts_with('{') || STATEMENT_WORDS.contains(&first_word);

    let mut source = if is_statement { line.to_string() } else { format!("puts {line}") };
    if !source.ends_with(';') && !source.ends_with('}') {
        source.push(';');
    }

    Some(source)
}

fn report(errors: &[Error]) {
    for error in errors {
        println!("{error}");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::repl_source;

    #[test]
    fn expressions_are_printed() {
        assert_eq!(repl_source("1 + 2").as_deref(), Some("puts 1 + 2;"));
        assert_eq!(repl_source("count(xs);").as_deref(), Some("puts count(xs);"));
        assert_eq!(repl_source("numbers").as_deref(), Some("puts numbers;"));
    }

    #[test]
    fn statements_are_kept() {
        assert_eq!(repl_source("number x = 3").as_deref(), Some("number x = 3;"));
        assert_eq!(repl_source("puts x").as_deref(), Some("puts x;"));
        assert_eq!(repl_source("if (x) { puts 1; }").as_deref(), Some("if (x) { puts 1; }"));
        assert_eq!(repl_source("{ puts 2; }").as_deref(), Some("{ puts 2; }"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(repl_source(""), None);
        assert_eq!(repl_source("   \t"), None);
    }
}
