use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Position, Span, SyntaxError};

static NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[_a-zA-Z]+").unwrap());
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]*\.[0-9]+").unwrap());
/// Integer-looking runs such as `1`, `1.` or `1e5`.
static MALFORMED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.?([eE][+-]?[0-9]*)?").unwrap());

/// Terminal classes of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Name,
    Number,
    /// `is`
    Is,
    /// `struct`
    Struct,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// `!(`
    BangParen,
    /// `)`
    RParen,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Name => "name",
            TokenKind::Number => "number",
            TokenKind::Is => "'is'",
            TokenKind::Struct => "'struct'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Equals => "'='",
            TokenKind::BangParen => "'!('",
            TokenKind::RParen => "')'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(s)
    }
}

/// A classified lexeme borrowed from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

/// On-demand tokenizer; the parser pulls one token at a time.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 0,
            line_start: 0,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.pos - self.line_start,
            offset: self.pos,
        }
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.remaining().chars().next() {
            match ch {
                ' ' | '\t' | '\r' => self.pos += 1,
                '\n' => {
                    self.pos += 1;
                    self.line += 1;
                    self.line_start = self.pos;
                }
                _ => break,
            }
        }
    }

    /// Produce the next token, or `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token<'a>, SyntaxError> {
        self.skip_ws();
        let begin = self.position();
        let rest = self.remaining();

        let Some(ch) = rest.chars().next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                text: "",
                span: Span::new(begin, begin),
            });
        };

        let (kind, len) = if let Some(m) = NAME.find(rest) {
            let kind = match m.as_str() {
                "is" => TokenKind::Is,
                "struct" => TokenKind::Struct,
                _ => TokenKind::Name,
            };
            (kind, m.end())
        } else if let Some(m) = NUMBER.find(rest) {
            (TokenKind::Number, m.end())
        } else if let Some(m) = MALFORMED_NUMBER.find(rest) {
            let end = Position {
                column: begin.column + m.end(),
                offset: begin.offset + m.end(),
                ..begin
            };
            return Err(SyntaxError::new(
                "Expected a number with a fractional part".to_string(),
                m.as_str(),
                Span::new(begin, end),
            ));
        } else if rest.starts_with("!(") {
            (TokenKind::BangParen, 2)
        } else {
            let kind = match ch {
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                ',' => TokenKind::Comma,
                '=' => TokenKind::Equals,
                ')' => TokenKind::RParen,
                _ => {
                    let end = Position {
                        column: begin.column + ch.len_utf8(),
                        offset: begin.offset + ch.len_utf8(),
                        ..begin
                    };
                    return Err(SyntaxError::new(
                        format!("Unexpected character '{}'", ch),
                        &rest[..ch.len_utf8()],
                        Span::new(begin, end),
                    ));
                }
            };
            (kind, 1)
        };

        // No terminal spans a newline, so the line is unchanged.
        self.pos += len;
        Ok(Token {
            kind,
            text: &rest[..len],
            span: Span::new(begin, self.position()),
        })
    }
}

/// Tokenize the whole input, including the trailing `Eof`.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, SyntaxError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords_and_names() {
        assert_eq!(
            kinds("pi is isa structure struct"),
            vec![
                TokenKind::Name,
                TokenKind::Is,
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Struct,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_numbers_need_fraction() {
        let tokens = tokenize("3.14 .5").unwrap();
        assert_eq!(tokens[0].text, "3.14");
        assert_eq!(tokens[1].text, ".5");
        assert!(tokenize("3").is_err());
    }

    #[test]
    fn test_bang_paren_is_one_token() {
        assert_eq!(
            kinds("!( x )"),
            vec![
                TokenKind::BangParen,
                TokenKind::Name,
                TokenKind::RParen,
                TokenKind::Eof
            ]
        );
        assert!(tokenize("! (x)").is_err());
    }

    #[test]
    fn test_positions_track_lines() {
        let tokens = tokenize("a is 1.0\n  !(a)").unwrap();
        let bang = tokens[3];
        assert_eq!(bang.kind, TokenKind::BangParen);
        assert_eq!(bang.span.begin.line, 1);
        assert_eq!(bang.span.begin.column, 2);
        assert_eq!(bang.span.begin.offset, 11);
        assert_eq!(bang.span.end.column, 4);
    }

    #[test]
    fn test_integer_literal_reports_whole_run() {
        let err = tokenize("[ 1e5 ]").unwrap_err();
        assert_eq!(err.token, "1e5");
        assert_eq!(err.message, "Expected a number with a fractional part");
        assert_eq!(err.begin.column, 2);
        assert_eq!(err.end.column, 5);

        let err = tokenize("42").unwrap_err();
        assert_eq!(err.token, "42");
        assert_eq!(err.end.offset, 2);
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("[ 1.0 ; ]").unwrap_err();
        assert_eq!(err.token, ";");
        assert_eq!(err.begin.column, 6);
        assert_eq!(err.end.column, 7);
    }
}
