use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::{Result, RuleError};
use crate::token_type::{Keyword, TokenKind, TokenType::{self, *}};

/// The `Scanner` loops through the rule text, identifying tokens and returning them as
/// Vec<Token>. Scanning stops at the first malformed token.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>, // iterator over chars of source
    tokens: Vec<Token>, // stores scanned tokens
    start: Option<(usize, char)>,  // start char of lexeme
    current: Option<(usize, char)>, // current char (byte index, char)
    next: Option<(usize, char)>, // next char  (byte index, char)
    line: usize,  // current line in source
    column: usize, // current column in source
    column_start: usize, // start column of lexeme
    line_start: usize, // line of lexeme start
}

impl<'a> Scanner<'a> {

    pub fn new(source: &'a str) -> Self {
        let mut chars = source.char_indices();
        let current = chars.next();
        let next = chars.clone().next();

        Scanner {
            source,
            chars,
            tokens: Vec::new(),
            start: current,
            current,
            next,
            line: 1,
            column: 1,
            column_start: 1,
            line_start: 1,
        }
    }

    pub fn scan(mut self) -> Result<Vec<Token>> {
        while !self.at_end() {
            self.start = self.current;
            self.column_start = self.column;
            self.line_start = self.line;
            self.scan_token()?;
        }
        self.start = None;
        self.column_start = self.column;
        self.line_start = self.line;
        self.add_token(EOF);
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = match self.advance() {
            Some(ch) => ch,
            None => return Ok(()),
        };

        match c {
            '(' => self.add_token(LeftParen),
            ')' => self.add_token(RightParen),
            '*' => self.add_token(Star),
            '/' => self.add_token(Slash),
            '+' => self.add_token(Plus),
            // unsigned literals only; '-' is always the binary operator
            '-' => self.add_token(Minus),
            '!' => self.match_and_add_token('=', BangEqual, Not),
            '=' => self.match_and_add_token('=', EqualEqual, Equal),
            '<' => self.match_and_add_token('=', LessEqual, Less),
            '>' => self.match_and_add_token('=', GreaterEqual, Greater),
            '&' => self.match_and_add_token('&', And, And),
            '|' => self.match_and_add_token('|', Or, Or),
            ' ' | '\r' | '\t' => {}, // ignore whitespace
            '\n' => { self.line += 1; self.column = 1; },
            _ if c.is_ascii_digit() => self.number(),
            _ if Self::is_alpha(c) => self.word(),
            _ => return Err(self.error("Unexpected character")),
        }
        Ok(())
    }

    fn number(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        self.add_token(Number)
    }

    /// Scans a keyword or an identifier. Whether an identifier names a known variable is
    /// decided later by the operand resolver.
    fn word(&mut self) {
        while matches!(self.peek(), Some(c) if Self::is_alphanumeric(c)) {
            self.advance();
        }

        let token_type = match Keyword::from_str(self.lexeme()) {
            Ok(keyword) => keyword.token_type(),
            Err(_) => Identifier,
        };
        self.add_token(token_type)
    }

    fn is_alpha(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }

    fn is_alphanumeric(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    fn match_and_add_token(&mut self, expected: char, type1: TokenType, type2: TokenType) {
        let token = if self.match_char(expected) { type1 } else { type2 };
        self.add_token(token)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance_iter();
            return true
        }
        false
    }

    fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Advance iterator and indices
    fn advance_iter(&mut self) {
        self.current = self.next;
        self.chars.next();
        self.next = self.chars.clone().next();
        self.column += 1;
    }

    /// Return current char and advance to next.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.advance_iter();
        c
    }

    /// Return current char without advancing.
    fn peek(&self) -> Option<char> {
        self.current.map(|(_, c)| c)
    }

    /// Byte range of the current lexeme, source[start..current].
    fn span(&self) -> Range<usize> {
        let end = self.current.map_or(self.source.len(), |(idx, _)| idx);
        let start = self.start.map_or(end, |(idx, _)| idx);
        start..end
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.span()]
    }

    fn add_token(&mut self, token_type: TokenType) {
        let span = self.span();
        let token = Token {
            variant: token_type,
            lexeme: self.source[span.clone()].to_string(),
            span,
            line: self.line_start,
            column: self.column_start,
        };
        self.tokens.push(token);
    }

    fn error(&self, message: &str) -> RuleError {
        let span = self.span();
        RuleError::Syntax {
            message: message.to_string(),
            fragment: self.source[span.clone()].to_string(),
            span,
            line: self.line_start,
            column: self.column_start,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub variant: TokenType,
    pub lexeme: String,
    pub span: Range<usize>,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        self.variant.kind()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.variant, self.lexeme)
    }
}
