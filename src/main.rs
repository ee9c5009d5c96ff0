use std::fs;
use std::process;

use clap::Parser;
use numconst::{compile_with, Error, Options, Span};

/// Compile a numeric constant description into JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to compile.
    #[arg(short, long)]
    input: String,

    /// Where to write the resulting JSON.
    #[arg(short, long)]
    output: String,

    /// Reject duplicate struct keys and redeclared constants.
    #[arg(long)]
    strict: bool,

    /// Write compact JSON instead of 2-space indented.
    #[arg(long)]
    compact: bool,
}

fn main() {
    let args = Args::parse();

    let source = fs::read_to_string(&args.input).unwrap_or_else(|e| {
        eprintln!("Cannot read input file: {}", e);
        process::exit(1);
    });

    let options = Options {
        strict: args.strict,
    };
    let evaluation = compile_with(&source, options).unwrap_or_else(|err| {
        report(&source, &err);
        process::exit(1);
    });

    let mut json = if args.compact {
        evaluation.value.to_json()
    } else {
        evaluation.value.to_json_pretty()
    };
    json.push('\n');

    if let Err(e) = fs::write(&args.output, json) {
        eprintln!("Cannot write output file: {}", e);
        process::exit(1);
    }
}

fn report(source: &str, err: &Error) {
    match err {
        Error::Syntax(syntax) => {
            eprintln!("Syntax error:");
            excerpt(source, syntax.span());
            eprintln!("{}", syntax);
        }
        _ => {
            eprintln!("Semantic error: {}", err);
            if let Some(span) = err.span() {
                excerpt(source, span);
            }
        }
    }
}

/// Print the offending line with a caret underline beneath the span.
fn excerpt(source: &str, span: Span) {
    let line_num = span.begin.line;
    let line_text = source.lines().nth(line_num).unwrap_or("");

    eprintln!("  --> line {}:", line_num + 1);
    eprintln!("{}", line_text);

    let start_col = span.begin.column;
    let end_col = if span.begin.line == span.end.line && span.end.column > span.begin.column {
        span.end.column
    } else {
        start_col + 1
    };

    let mut underline = " ".repeat(start_col);
    underline.push('^');
    if end_col > start_col + 1 {
        underline.push_str(&"_".repeat(end_col - start_col - 1));
    }
    eprintln!("{}", underline);
}
