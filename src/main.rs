use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use csl::{
    errors::errors::Error, lexer::lexer::tokenize, render_error, session::session::Session,
};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "csl")]
#[command(about = "Parses csl sources and prints their syntax tree")]
struct Args {
    /// Source file to parse
    #[arg(required_unless_present = "expr")]
    file: Option<PathBuf>,

    /// Parse a single expression instead of a file
    #[arg(long, conflicts_with = "file")]
    expr: Option<String>,

    /// Print the token stream instead of the tree
    #[arg(long)]
    tokens: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Installs a stderr subscriber. `RUST_LOG` is honoured, `-v` overrides it.
fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let filter = match verbosity {
        0 => filter,
        1 => filter.add_directive(Level::DEBUG.into()),
        _ => filter.add_directive(Level::TRACE.into()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn dump_tokens(source: &str, file: &str) -> Result<String, Error> {
    let tokens = tokenize(source, Some(String::from(file)))?;

    Ok(tokens
        .iter()
        .map(|token| format!("{:>5}  {}", token.span.start.0, token.debug()))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Runs the requested mode and returns what to print, or the rendered diagnostic.
fn run(args: &Args, session: &mut Session) -> Result<String, String> {
    if let Some(text) = &args.expr {
        let result = if args.tokens {
            dump_tokens(text, "shell")
        } else {
            session.parse_line_expr(text).map(|expr| expr.to_string())
        };
        return result.map_err(|e| render_error(&e, text, "shell"));
    }

    let Some(path) = &args.file else {
        return Err(String::from("Error: no input"));
    };

    if args.tokens {
        let file = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|e| format!("Error: {}: {}", file, e))?;
        return dump_tokens(&source, &file).map_err(|e| render_error(&e, &source, &file));
    }

    session
        .parse_file(path)
        .map(|root| root.to_string())
        .map_err(|e| {
            let file = e.get_position().1.to_string();
            match session.source_of(&file) {
                Some(source) => render_error(&e, &source, &file),
                None => format!("Error: {}", e),
            }
        })
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut session = Session::new();

    match run(&args, &mut session) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(diagnostic) => {
            eprintln!("{}", diagnostic);
            ExitCode::FAILURE
        }
    }
}
