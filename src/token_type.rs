#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TokenType {
    LeftParen, RightParen, // ()
    Star, Slash,
    Plus, Minus,
    Less, LessEqual,
    Greater, GreaterEqual,
    Equal, EqualEqual, BangEqual,
    And, Or, Not,
    Number,
    True, False,
    Identifier,
    EOF,
}

/// Coarse classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TokenKind {
    NumberLiteral,
    BooleanLiteral,
    Identifier,
    Operator,
    Punctuation,
}

impl TokenType {
    pub fn kind(self) -> TokenKind {
        use TokenType::*;
        match self {
            Number => TokenKind::NumberLiteral,
            True | False => TokenKind::BooleanLiteral,
            Identifier => TokenKind::Identifier,
            LeftParen | RightParen | EOF => TokenKind::Punctuation,
            Star | Slash | Plus | Minus | Less | LessEqual | Greater | GreaterEqual | Equal
            | EqualEqual | BangEqual | And | Or | Not => TokenKind::Operator,
        }
    }
}

/// Reserved words, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Keyword {
    And,
    Or,
    Not,
    True,
    False,
}

impl Keyword {
    pub fn token_type(self) -> TokenType {
        match self {
            Keyword::And => TokenType::And,
            Keyword::Or => TokenType::Or,
            Keyword::Not => TokenType::Not,
            Keyword::True => TokenType::True,
            Keyword::False => TokenType::False,
        }
    }
}
