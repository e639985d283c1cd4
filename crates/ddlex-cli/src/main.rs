//! ddlex CLI - Command line interface for the MySQL DDL parser

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::thread;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};

use ddlex_ast::Statements;
use ddlex_parser::{parse, parse_named, ParseError};

#[derive(Parser)]
#[command(name = "ddlex")]
#[command(about = "MySQL DDL parser", long_about = None)]
struct Cli {
    /// Log parser decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and output the statements as JSON
    Parse {
        /// Input file, or `-` for stdin
        file: PathBuf,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print a file in canonical form
    Fmt {
        /// Input file, or `-` for stdin
        file: PathBuf,
    },
    /// Check that files parse
    Check {
        /// Input file(s)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Interactive REPL
    Repl,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
            .with_writer(io::stderr)
            .init();
    }

    match cli.command {
        Commands::Parse { file, pretty } => cmd_parse(&file, pretty),
        Commands::Fmt { file } => cmd_fmt(&file),
        Commands::Check { files } => cmd_check(&files),
        Commands::Repl => cmd_repl(),
    }
}

fn read_source(file: &Path) -> io::Result<String> {
    if file.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(file)
    }
}

fn display_name(file: &Path) -> String {
    if file.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        file.display().to_string()
    }
}

/// Read and parse `file`, reporting failures and exiting.
fn load(file: &Path) -> (String, Statements) {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", display_name(file), e);
            std::process::exit(1);
        }
    };

    match parse(&source) {
        Ok(statements) => (source, statements),
        Err(e) => {
            report_parse_error(&source, &display_name(file), &e);
            std::process::exit(1);
        }
    }
}

fn cmd_parse(file: &Path, pretty: bool) {
    let (_, statements) = load(file);

    let json = if pretty {
        serde_json::to_string_pretty(&statements)
    } else {
        serde_json::to_string(&statements)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing statements: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_fmt(file: &Path) {
    let (_, statements) = load(file);
    if !statements.is_empty() {
        println!("{}", statements);
    }
}

enum CheckOutcome {
    Parsed(Statements),
    Failed { source: String, error: ParseError },
    Unreadable(io::Error),
}

fn check_file(file: &Path) -> CheckOutcome {
    match read_source(file) {
        Ok(source) => match parse_named(&display_name(file), &source) {
            Ok(statements) => CheckOutcome::Parsed(statements),
            Err(error) => CheckOutcome::Failed { source, error },
        },
        Err(e) => CheckOutcome::Unreadable(e),
    }
}

fn cmd_check(files: &[PathBuf]) {
    // Each file is parsed independently; reports keep argument order
    let outcomes: Vec<CheckOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = files
            .iter()
            .map(|file| scope.spawn(move || check_file(file)))
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(outcome) => outcome,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut all_ok = true;
    for (file, outcome) in files.iter().zip(outcomes) {
        let name = display_name(file);
        match outcome {
            CheckOutcome::Parsed(statements) => {
                let tables = statements.tables().count();
                let columns: usize = statements.tables().map(|t| t.columns.len()).sum();
                println!("✓ {} - {} tables, {} columns", name, tables, columns);
            }
            CheckOutcome::Failed { source, error } => {
                eprintln!("✗ {}", name);
                report_parse_error(&source, &name, &error);
                all_ok = false;
            }
            CheckOutcome::Unreadable(e) => {
                eprintln!("✗ {} - {}", name, e);
                all_ok = false;
            }
        }
    }

    if !all_ok {
        std::process::exit(1);
    }
}

fn cmd_repl() {
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    println!("ddlex REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Statements run when terminated with ';'. Type :help for help, :quit to exit");
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Error starting REPL: {}", e);
            std::process::exit(1);
        }
    };
    let mut buffer = String::new();
    let mut schema = Statements::new();

    loop {
        let prompt = if buffer.is_empty() { "ddlex> " } else { "   ..> " };
        match rl.readline(prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                let trimmed = line.trim();

                if buffer.is_empty() && trimmed.starts_with(':') {
                    match trimmed {
                        ":quit" | ":q" => break,
                        ":help" | ":h" => {
                            println!("Commands:");
                            println!("  :load <file>  - Parse a file into the session");
                            println!("  :show         - Print the session schema");
                            println!("  :json         - Show the session schema as JSON");
                            println!("  :clear        - Forget all tables");
                            println!("  :quit         - Exit REPL");
                        }
                        cmd if cmd.starts_with(":load ") => {
                            let path = cmd[6..].trim();
                            match fs::read_to_string(path) {
                                Ok(source) => match parse_named(path, &source) {
                                    Ok(statements) => {
                                        println!("Loaded {} tables from {}", statements.tables().count(), path);
                                        schema.extend(statements);
                                    }
                                    Err(e) => eprintln!("{}", e),
                                },
                                Err(e) => eprintln!("Error: {}", e),
                            }
                        }
                        ":show" => println!("{}", schema),
                        ":json" => match serde_json::to_string_pretty(&schema) {
                            Ok(json) => println!("{}", json),
                            Err(e) => eprintln!("Error: {}", e),
                        },
                        ":clear" => {
                            schema = Statements::new();
                            println!("Cleared");
                        }
                        _ => println!("Unknown command. Type :help for help."),
                    }
                    continue;
                }

                buffer.push_str(&line);
                buffer.push('\n');
                if !trimmed.ends_with(';') {
                    continue;
                }

                match parse(&buffer) {
                    Ok(statements) if statements.is_empty() => println!("OK"),
                    Ok(statements) => {
                        for table in statements.tables() {
                            println!(
                                "table `{}`: {} columns, {} indexes, {} options",
                                table.name,
                                table.columns.len(),
                                table.indexes.len(),
                                table.options.len()
                            );
                        }
                        schema.extend(statements);
                    }
                    Err(e) => eprintln!("{}", e),
                }
                buffer.clear();
            }
            Err(ReadlineError::Interrupted) => buffer.clear(),
            Err(_) => break,
        }
    }

    println!("Goodbye!");
}

fn report_parse_error(source: &str, name: &str, error: &ParseError) {
    let span = error.span();
    let result = Report::build(ReportKind::Error, name.to_string(), span.start)
        .with_message(error.kind.to_string())
        .with_label(
            Label::new((name.to_string(), span.start..span.end))
                .with_message(format!("line {}, column {}", error.line, error.column))
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name.to_string(), Source::from(source)));

    if result.is_err() {
        eprintln!("{}", error);
    }
}
