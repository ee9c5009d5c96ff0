use crate::ast::{ConstDecl, Node, Pair, Program};
use crate::error::Error;
use crate::value::Value;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Constant name to resolved value, in declaration order.
pub type ConstTable = IndexMap<String, Value>;

/// Evaluation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Reject duplicate struct keys and redeclared constants instead of
    /// letting the later one win.
    pub strict: bool,
}

impl Options {
    pub fn strict() -> Self {
        Options { strict: true }
    }
}

/// The result of evaluating a program.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: Value,
    pub constants: ConstTable,
}

/// Evaluate a program with the default (non-strict) policy.
pub fn evaluate(program: &Program) -> Result<Evaluation, Error> {
    evaluate_with(program, Options::default())
}

/// Resolve every declaration in order, then the main value.
///
/// A reference only sees constants declared strictly before it.
pub fn evaluate_with(program: &Program, options: Options) -> Result<Evaluation, Error> {
    let mut constants = ConstTable::new();
    for decl in &program.declarations {
        declare(decl, &mut constants, options)?;
    }
    let value = resolve(&program.main, &constants, options)?;
    Ok(Evaluation { value, constants })
}

fn declare(decl: &ConstDecl, constants: &mut ConstTable, options: Options) -> Result<(), Error> {
    let value = resolve(&decl.value, constants, options)?;
    match constants.entry(decl.name.clone()) {
        Entry::Occupied(_) if options.strict => Err(Error::RedeclaredConstant {
            name: decl.name.clone(),
            span: decl.span,
        }),
        Entry::Occupied(mut slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

/// Resolve a node against the constants declared so far.
pub fn resolve(node: &Node, constants: &ConstTable, options: Options) -> Result<Value, Error> {
    match node {
        Node::Number(n) => Ok(Value::Number(*n)),
        Node::Array(items) => items
            .iter()
            .map(|item| resolve(item, constants, options))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Node::Struct(pairs) => resolve_struct(pairs, constants, options),
        Node::ConstRef { name, span } => {
            constants
                .get(name)
                .cloned()
                .ok_or_else(|| Error::UndefinedConstant {
                    name: name.clone(),
                    span: *span,
                })
        }
    }
}

/// Later duplicates overwrite the value but keep the first key's position.
fn resolve_struct(pairs: &[Pair], constants: &ConstTable, options: Options) -> Result<Value, Error> {
    let mut fields: IndexMap<String, Value> = IndexMap::with_capacity(pairs.len());
    for pair in pairs {
        if options.strict && fields.contains_key(&pair.name) {
            return Err(Error::DuplicateKey {
                key: pair.name.clone(),
                span: pair.span,
            });
        }
        let value = resolve(&pair.value, constants, options)?;
        fields.insert(pair.name.clone(), value);
    }
    Ok(Value::Struct(fields))
}
