//! Concrete parse tree: one node per grammar rule instance, tokens kept.
//!
//! ```text
//! program    := const_decl* value
//! const_decl := NAME "is" value
//! value      := number | array | dict | const_ref
//! array      := "[" value+ "]"
//! dict       := "struct" "{" [pair ("," pair)*] "}"
//! pair       := NAME "=" value
//! const_ref  := "!(" NAME ")"
//! ```

use crate::lexer::Token;

/// The top-level node sequence in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program<'a> {
    pub items: Vec<Item<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item<'a> {
    ConstDecl(ConstDecl<'a>),
    Value(Value<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl<'a> {
    pub name: Token<'a>,
    pub is_kw: Token<'a>,
    pub value: Value<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Number(Token<'a>),
    Array(Array<'a>),
    Dict(Dict<'a>),
    ConstRef(ConstRef<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Array<'a> {
    pub open: Token<'a>,
    pub elements: Vec<Value<'a>>,
    pub close: Token<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dict<'a> {
    pub struct_kw: Token<'a>,
    pub open: Token<'a>,
    pub pairs: Vec<Pair<'a>>,
    pub commas: Vec<Token<'a>>,
    pub close: Token<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pair<'a> {
    pub name: Token<'a>,
    pub eq: Token<'a>,
    pub value: Value<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstRef<'a> {
    pub open: Token<'a>,
    pub name: Token<'a>,
    pub close: Token<'a>,
}
