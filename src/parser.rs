use crate::cst::*;
use crate::error::SyntaxError;
use crate::lexer::{Lexer, Token, TokenKind};

/// Deepest allowed nesting of arrays and structs. Every later stage
/// recurses once per level, so this also bounds their stack use.
pub const MAX_DEPTH: usize = 256;

/// Parser state: the lexer plus one token of lookahead.
struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    /// Arrays and structs currently open.
    depth: usize,
}

/// Parse source text into a concrete parse tree rooted at `program`.
///
/// The top level is a run of constant declarations optionally followed by a
/// single value; input after that value is a syntax error. A missing value
/// is left for program-structure validation to report.
pub fn parse(input: &str) -> Result<Program<'_>, SyntaxError> {
    let mut lexer = Lexer::new(input);
    let current = lexer.next_token()?;
    let mut parser = Parser {
        lexer,
        current,
        depth: 0,
    };
    let mut items = Vec::new();

    loop {
        match parser.current.kind {
            TokenKind::Eof => break,
            TokenKind::Name => {
                let decl = parser.parse_const_decl()?;
                items.push(Item::ConstDecl(decl));
            }
            _ => {
                let value = parser.parse_value()?;
                items.push(Item::Value(value));
                parser.expect(TokenKind::Eof, "Expected end of input after the main value")?;
                break;
            }
        }
    }

    Ok(Program { items })
}

impl<'a> Parser<'a> {
    // ── Helpers ──────────────────────────────────────────────────────

    fn peek(&self) -> TokenKind {
        self.current.kind
    }

    /// Consume the current token and pull the next one.
    fn bump(&mut self) -> Result<Token<'a>, SyntaxError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token<'a>, SyntaxError> {
        if self.peek() == kind {
            self.bump()
        } else {
            Err(self.unexpected(message))
        }
    }

    fn unexpected(&self, message: &str) -> SyntaxError {
        let found = if self.current.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            format!("'{}'", self.current.text)
        };
        SyntaxError::new(
            format!("{}, found {}", message, found),
            self.current.text,
            self.current.span,
        )
    }

    /// Open one nesting level; fails at the opening token past `MAX_DEPTH`.
    fn enter(&mut self) -> Result<(), SyntaxError> {
        if self.depth >= MAX_DEPTH {
            return Err(SyntaxError::new(
                format!("Nesting too deep (limit {})", MAX_DEPTH),
                self.current.text,
                self.current.span,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    // ── Declarations ────────────────────────────────────────────────

    fn parse_const_decl(&mut self) -> Result<ConstDecl<'a>, SyntaxError> {
        let name = self.expect(TokenKind::Name, "Expected a constant name")?;
        let is_kw = self.expect(TokenKind::Is, "Expected 'is' after constant name")?;
        let value = self.parse_value()?;
        Ok(ConstDecl { name, is_kw, value })
    }

    // ── Values ──────────────────────────────────────────────────────

    fn parse_value(&mut self) -> Result<Value<'a>, SyntaxError> {
        match self.peek() {
            TokenKind::Number => self.bump().map(Value::Number),
            TokenKind::LBracket => self.parse_array().map(Value::Array),
            TokenKind::Struct => self.parse_dict().map(Value::Dict),
            TokenKind::BangParen => self.parse_const_ref().map(Value::ConstRef),
            _ => Err(self.unexpected("Expected a value")),
        }
    }

    fn parse_array(&mut self) -> Result<Array<'a>, SyntaxError> {
        self.enter()?;
        let open = self.expect(TokenKind::LBracket, "Expected '['")?;
        let mut elements = vec![self.parse_value()?];
        while self.peek() != TokenKind::RBracket {
            elements.push(self.parse_value()?);
        }
        let close = self.bump()?;
        self.depth -= 1;
        Ok(Array {
            open,
            elements,
            close,
        })
    }

    fn parse_dict(&mut self) -> Result<Dict<'a>, SyntaxError> {
        self.enter()?;
        let struct_kw = self.expect(TokenKind::Struct, "Expected 'struct'")?;
        let open = self.expect(TokenKind::LBrace, "Expected '{' after 'struct'")?;
        let mut pairs = Vec::new();
        let mut commas = Vec::new();

        if self.peek() != TokenKind::RBrace {
            pairs.push(self.parse_pair()?);
            while self.peek() == TokenKind::Comma {
                commas.push(self.bump()?);
                pairs.push(self.parse_pair()?);
            }
        }

        let close = self.expect(TokenKind::RBrace, "Expected ',' or '}' in struct")?;
        self.depth -= 1;
        Ok(Dict {
            struct_kw,
            open,
            pairs,
            commas,
            close,
        })
    }

    fn parse_pair(&mut self) -> Result<Pair<'a>, SyntaxError> {
        let name = self.expect(TokenKind::Name, "Expected a field name")?;
        let eq = self.expect(TokenKind::Equals, "Expected '=' after field name")?;
        let value = self.parse_value()?;
        Ok(Pair { name, eq, value })
    }

    fn parse_const_ref(&mut self) -> Result<ConstRef<'a>, SyntaxError> {
        let open = self.expect(TokenKind::BangParen, "Expected '!('")?;
        let name = self.expect(TokenKind::Name, "Expected a constant name after '!('")?;
        let close = self.expect(TokenKind::RParen, "Expected ')' after constant name")?;
        Ok(ConstRef { open, name, close })
    }
}
