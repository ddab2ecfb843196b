//! Lexer (tokenizer) for the teaching language
//!
//! Converts raw source text into [`Token`]s one at a time. Malformed input never
//! aborts the scan: it yields a [`TokenKind::Error`] token tagged with a
//! [`LexErrorKind`] and the parser decides how to report it.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Longest identifier the language accepts.
pub const MAX_LEXEME_LEN: usize = 99;

/// Lexical error tags carried by [`TokenKind::Error`] tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("invalid character")]
    InvalidChar,
    #[error("invalid number")]
    InvalidNumber,
    #[error("consecutive operators")]
    ConsecutiveOperators,
    #[error("invalid identifier")]
    InvalidIdentifier,
    #[error("unexpected token")]
    UnexpectedToken,
}

/// Token categories.
///
/// Operators share a single kind; the parser distinguishes them by lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Number,
    Operator,
    Identifier,
    Equals,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    If,
    Else,
    Int,
    Print,
    While,
    Repeat,
    Until,

    Error(LexErrorKind),
}

/// A single token with its lexeme and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Returns the lexical error tag, if this is an error token.
    pub fn lex_error(&self) -> Option<LexErrorKind> {
        match self.kind {
            TokenKind::Error(kind) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Number => write!(f, "number {}", self.lexeme),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Operator => write!(f, "operator '{}'", self.lexeme),
            TokenKind::Error(kind) => write!(f, "{} '{}'", kind, self.lexeme),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Lexer for teaching-language source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Cursor position as a character offset into the source.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Tokenize the entire input. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }

    /// Scan the next token, advancing past its lexeme.
    ///
    /// Returns `Eof` once the input is exhausted, and keeps returning it.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::Eof, "EOF", loc);
        };

        let token = match ch {
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch, loc),

            '+' | '-' | '*' | '/' => self.arithmetic_operator(ch, loc),
            '<' | '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Operator, format!("{ch}="), loc)
                } else {
                    Token::new(TokenKind::Operator, ch, loc)
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Operator, "==", loc)
                } else {
                    Token::new(TokenKind::Equals, "=", loc)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Operator, "!=", loc)
                } else {
                    Token::new(TokenKind::Error(LexErrorKind::UnexpectedToken), "!", loc)
                }
            }
            ';' => Token::new(TokenKind::Semicolon, ";", loc),
            '(' => Token::new(TokenKind::LParen, "(", loc),
            ')' => Token::new(TokenKind::RParen, ")", loc),
            '{' => Token::new(TokenKind::LBrace, "{", loc),
            '}' => Token::new(TokenKind::RBrace, "}", loc),

            _ => Token::new(TokenKind::Error(LexErrorKind::InvalidChar), ch, loc),
        };

        tracing::trace!(kind = ?token.kind, lexeme = %token.lexeme, line = loc.line, "token");
        token
    }

    /// Parse `+ - * /`, flagging a run such as `+*` as one error token.
    fn arithmetic_operator(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut lexeme = String::from(first);

        while let Some(ch) = self.peek() {
            // `x +// note` is an operator followed by a comment
            if !is_arithmetic(ch) || (ch == '/' && self.peek_ahead(1) == Some('/')) {
                break;
            }
            lexeme.push(ch);
            self.advance();
        }

        if lexeme.chars().count() > 1 {
            Token::new(TokenKind::Error(LexErrorKind::ConsecutiveOperators), lexeme, loc)
        } else {
            Token::new(TokenKind::Operator, lexeme, loc)
        }
    }

    /// Parse numeric literal (non-negative integers only)
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut num_str = String::from(first_digit);
        let mut malformed = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
            } else if ch.is_ascii_alphabetic() || ch == '_' {
                // `12ab` is one bad token, not a number then an identifier
                num_str.push(ch);
                malformed = true;
            } else {
                break;
            }
            self.advance();
        }

        if malformed || num_str.parse::<i64>().is_err() {
            Token::new(TokenKind::Error(LexErrorKind::InvalidNumber), num_str, loc)
        } else {
            Token::new(TokenKind::Number, num_str, loc)
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::from(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match ident.as_str() {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "int" => TokenKind::Int,
            "print" => TokenKind::Print,
            "while" => TokenKind::While,
            "repeat" => TokenKind::Repeat,
            "until" => TokenKind::Until,
            _ if ident.len() > MAX_LEXEME_LEN => TokenKind::Error(LexErrorKind::InvalidIdentifier),
            _ => TokenKind::Identifier,
        };

        Token::new(kind, ident, loc)
    }

    /// Skip whitespace and `//` comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

fn is_arithmetic(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Lexer::new("int x = 42;").tokenize();

        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[2].kind, TokenKind::Equals);
        assert_eq!(tokens[3].kind, TokenKind::Number);
        assert_eq!(tokens[3].lexeme, "42");
        assert_eq!(tokens[4].kind, TokenKind::Semicolon);
        assert_eq!(tokens[5].kind, TokenKind::Eof);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("if else while repeat until print int factorial"),
            vec![
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Repeat,
                TokenKind::Until,
                TokenKind::Print,
                TokenKind::Int,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        let tokens = Lexer::new("== != < > <= >= = + / ( ) { }").tokenize();
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();

        assert_eq!(
            lexemes,
            vec!["==", "!=", "<", ">", "<=", ">=", "=", "+", "/", "(", ")", "{", "}", "EOF"]
        );
        assert!(tokens[..6].iter().all(|t| t.is(TokenKind::Operator)));
        assert_eq!(tokens[6].kind, TokenKind::Equals);
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("int x;\n  print x;").tokenize();

        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[4].location, SourceLocation::new(2, 9));
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("int x; // trailing note\nprint x; //"),
            vec![
                TokenKind::Int,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Print,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexical_errors() {
        let tokens = Lexer::new("@ 12ab 3 +* !x").tokenize();

        assert_eq!(tokens[0].lex_error(), Some(LexErrorKind::InvalidChar));
        assert_eq!(tokens[1].lex_error(), Some(LexErrorKind::InvalidNumber));
        assert_eq!(tokens[1].lexeme, "12ab");
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[3].lex_error(), Some(LexErrorKind::ConsecutiveOperators));
        assert_eq!(tokens[3].lexeme, "+*");
        assert_eq!(tokens[4].lex_error(), Some(LexErrorKind::UnexpectedToken));
        assert_eq!(tokens[5].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_number_overflow() {
        let tokens = Lexer::new("99999999999999999999").tokenize();
        assert_eq!(tokens[0].lex_error(), Some(LexErrorKind::InvalidNumber));
    }

    #[test]
    fn test_long_identifier() {
        let name = "a".repeat(MAX_LEXEME_LEN + 1);
        let tokens = Lexer::new(&name).tokenize();
        assert_eq!(tokens[0].lex_error(), Some(LexErrorKind::InvalidIdentifier));

        let name = "b".repeat(MAX_LEXEME_LEN);
        let tokens = Lexer::new(&name).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        assert_eq!(lexer.position(), 1);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}
