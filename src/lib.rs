pub mod ast;
pub mod builder;
pub mod cst;
pub mod error;
pub mod eval;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod value;

pub use error::{Error, Position, Span, SyntaxError};
pub use eval::{evaluate, evaluate_with, ConstTable, Evaluation, Options};
pub use value::Value;

// ── Core API ───────────────────────────────────────────────────────

/// Lex and parse source into a concrete parse tree.
pub fn parse(input: &str) -> Result<cst::Program<'_>, Error> {
    Ok(parser::parse(input)?)
}

/// Parse source and build its validated AST.
pub fn parse_program(input: &str) -> Result<ast::Program, Error> {
    let tree = parse(input)?;
    builder::build(&tree)
}

/// Run the whole pipeline with the default policy: parse, build, evaluate.
pub fn compile(input: &str) -> Result<Evaluation, Error> {
    compile_with(input, Options::default())
}

/// Run the whole pipeline with an explicit evaluation policy.
pub fn compile_with(input: &str, options: Options) -> Result<Evaluation, Error> {
    let program = parse_program(input)?;
    evaluate_with(&program, options)
}
