use crate::ast::{self, Item, Node};
use crate::cst;
use crate::error::Error;
use crate::lexer::{Token, TokenKind};

/// Transform a parse tree into a validated AST program.
pub fn build(program: &cst::Program<'_>) -> Result<ast::Program, Error> {
    let items = program
        .items
        .iter()
        .map(build_item)
        .collect::<Result<Vec<_>, _>>()?;
    validate_structure(items)
}

/// Check the top-level sequence: zero or more declarations, then one value.
pub fn validate_structure(mut items: Vec<Item>) -> Result<ast::Program, Error> {
    let main = match items.pop() {
        Some(Item::Value(node)) => node,
        Some(Item::ConstDecl(_)) | None => return Err(Error::EmptyProgram),
    };

    let declarations = items
        .into_iter()
        .map(|item| match item {
            Item::ConstDecl(decl) => Ok(decl),
            Item::Value(_) => Err(Error::structural("unexpected node before main value")),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ast::Program { declarations, main })
}

fn build_item(item: &cst::Item<'_>) -> Result<Item, Error> {
    match item {
        cst::Item::ConstDecl(decl) => Ok(Item::ConstDecl(ast::ConstDecl {
            name: name_of(&decl.name)?,
            span: decl.name.span,
            value: build_value(&decl.value)?,
        })),
        cst::Item::Value(value) => build_value(value).map(Item::Value),
    }
}

fn build_value(value: &cst::Value<'_>) -> Result<Node, Error> {
    match value {
        cst::Value::Number(token) => build_number(token),
        cst::Value::Array(array) => {
            if array.elements.is_empty() {
                return Err(Error::structural("array without elements"));
            }
            array
                .elements
                .iter()
                .map(build_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Node::Array)
        }
        cst::Value::Dict(dict) => dict
            .pairs
            .iter()
            .map(|pair| -> Result<ast::Pair, Error> {
                Ok(ast::Pair {
                    name: name_of(&pair.name)?,
                    span: pair.name.span,
                    value: build_value(&pair.value)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Node::Struct),
        cst::Value::ConstRef(const_ref) => Ok(Node::ConstRef {
            name: name_of(&const_ref.name)?,
            span: const_ref.name.span,
        }),
    }
}

fn build_number(token: &Token<'_>) -> Result<Node, Error> {
    if token.kind != TokenKind::Number {
        return Err(Error::structural(format!(
            "expected a number token, got {}",
            token.kind
        )));
    }
    token
        .text
        .parse::<f64>()
        .map(Node::Number)
        .map_err(|e| Error::structural(format!("bad number literal '{}': {}", token.text, e)))
}

fn name_of(token: &Token<'_>) -> Result<String, Error> {
    if token.kind != TokenKind::Name {
        return Err(Error::structural(format!(
            "expected a name token, got {}",
            token.kind
        )));
    }
    Ok(token.text.to_string())
}
