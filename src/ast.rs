//! Abstract syntax produced by the builder and consumed by the evaluator.
//! Owns its data; punctuation and keywords are gone, name spans remain
//! for error reporting.

use crate::error::Span;

/// A value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    Array(Vec<Node>),
    /// Pairs in source order; names may repeat.
    Struct(Vec<Pair>),
    ConstRef { name: String, span: Span },
}

/// `name = value` inside a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub name: String,
    pub span: Span,
    pub value: Node,
}

/// `name is value`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: String,
    pub span: Span,
    pub value: Node,
}

/// One entry of the top-level node sequence, before structure validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    ConstDecl(ConstDecl),
    Value(Node),
}

/// A validated program: declarations first, then exactly one main value.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<ConstDecl>,
    pub main: Node,
}
