use std::fs;

use clap::Parser;
use minijs::{RunOptions, RunReport, interpreter::parser::ParseOptions, run_with};
use tracing_subscriber::{EnvFilter, fmt};

/// minijs runs small JavaScript-flavoured scripts and shows what each phase of
/// the interpreter made of them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells minijs to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints the token stream.
    #[arg(short, long)]
    tokens: bool,

    /// Prints the syntax tree as JSON.
    #[arg(short, long)]
    ast: bool,

    /// Prints the variables left in scope after the run.
    #[arg(short, long)]
    env: bool,

    /// Prints the whole run report as JSON instead of text panels.
    #[arg(long)]
    json: bool,

    /// Deepest nesting of statements and expressions the parser accepts.
    #[arg(long, default_value_t = minijs::interpreter::parser::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Runs the statements that parsed even when others had syntax errors.
    #[arg(short, long)]
    keep_going: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    // RUST_LOG controls the log level; warnings and above by default.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter)
         .with_writer(std::io::stderr)
         .with_target(false)
         .init();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    let options = RunOptions { parse:                   ParseOptions { max_depth: args.max_depth },
                               execute_on_syntax_error: args.keep_going, };
    let report = run_with(&script, &options);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize the report: {e}"),
        }
    } else {
        print_panels(&args, &report);
    }

    if !report.succeeded() {
        std::process::exit(1);
    }
}

fn print_panels(args: &Args, report: &RunReport) {
    if args.tokens {
        println!("Tokens:");
        for (index, token) in report.tokens.iter().enumerate() {
            println!("[{index}] {}: \"{}\" (Line {})", token.kind, token.lexeme, token.line);
        }
        println!();
    }

    if args.ast {
        println!("AST:");
        match serde_json::to_string_pretty(&report.statements) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize the syntax tree: {e}"),
        }
        println!();
    }

    if args.env {
        println!("Environment:");
        match &report.execution {
            Some(execution) => print!("{}", execution.final_environment),
            None => println!("// No environment data available"),
        }
        println!();
    }

    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }

    match outcome_line(report) {
        Ok(line) => println!("{line}"),
        Err(line) => eprintln!("{line}"),
    }
}

/// The closing line of the panel output: `Ok` for stdout when the run
/// succeeded, `Err` for stderr otherwise, so the line agrees with the exit
/// status.
fn outcome_line(report: &RunReport) -> Result<&str, &str> {
    if report.execution.is_none() {
        Err("Program not executed because of syntax errors.")
    } else if report.succeeded() {
        Ok(report.output())
    } else {
        Err(report.output())
    }
}
