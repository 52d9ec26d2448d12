/// A recursive descent parser for decision rules.
///
/// Grammar of rule syntax, loosest binding first:
///
/// or_group       -> and_group ( OR and_group )*
/// and_group      -> unary ( AND unary )*
/// unary          -> NOT unary | comparison
/// comparison     -> additive ( ( "<" | "<=" | ">" | ">=" | "==" | "=" | "!=" ) additive )*
/// additive       -> multiplicative ( ( "+" | "-" ) multiplicative )*
/// multiplicative -> primary ( ( "*" | "/" ) primary )*
/// primary        -> NUMBER | TRUE | FALSE | IDENTIFIER | "(" or_group ")"
///
/// where AND is `and`, `&&` or `&`, OR is `or`, `||` or `|` and NOT is `not` or `!`.
/// Each binary level collects its whole run of operators into a single node.
///
/// Examples: "(followers_count < 5) or (days < 180)", "1 < A < 3", "not (A + B) * 2 >= C"

use crate::error::{Result, RuleError};
use crate::expr::{ArithmeticOp, ComparisonOp, Expr, LogicalOp};
use crate::operand::Operand;
use crate::scanner::{Scanner, Token};
use crate::token_type::TokenType::{self, *};
use crate::vocabulary::Vocabulary;

/// Nesting of parentheses and `not` accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Scans and parses `source` into a syntax tree.
pub fn parse(source: &str, vocabulary: &Vocabulary, max_depth: usize) -> Result<Expr> {
    let tokens = Scanner::new(source).scan()?;
    Parser::new(&tokens, source, vocabulary, max_depth).parse()
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    source: &'a str,
    vocabulary: &'a Vocabulary,
    current: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {

    /// `tokens` must end with an `EOF` token, as produced by the scanner.
    pub fn new(tokens: &'a [Token], source: &'a str, vocabulary: &'a Vocabulary, max_depth: usize) -> Self {
        Parser {
            tokens,
            source,
            vocabulary,
            current: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Parses all tokens to return a syntax tree.
    pub fn parse(&mut self) -> Result<Expr> {
        let expr = self.or_group()?;
        if !self.at_end() {
            // Case: complete expression followed by more input. Ex.: 'days < 5 days'
            let start = self.peek().span.start;
            return Err(self.error_span("Unexpected trailing input", start..self.source.len()));
        }
        Ok(expr)
    }

    /// Matches production: or_group -> and_group ( OR and_group )*
    fn or_group(&mut self) -> Result<Expr> {
        let mut operands = vec![self.and_group()?];
        while self.match_token(&[Or]) {
            operands.push(self.and_group()?);
        }
        Ok(Self::logical(LogicalOp::Or, operands))
    }

    /// Matches production: and_group -> unary ( AND unary )*
    fn and_group(&mut self) -> Result<Expr> {
        let mut operands = vec![self.unary()?];
        while self.match_token(&[And]) {
            operands.push(self.unary()?);
        }
        Ok(Self::logical(LogicalOp::And, operands))
    }

    /// Matches production: unary -> NOT unary | comparison
    fn unary(&mut self) -> Result<Expr> {
        if self.match_token(&[Not]) {
            let start = self.previous().span.start;
            self.enter()?;
            let expr = self.unary();
            self.depth -= 1;
            let expr = expr?;
            let span = start..expr.span().end;
            return Ok(Expr::Not { expr: Box::new(expr), span })
        }
        self.comparison()
    }

    /// Matches production: comparison -> additive ( COMPARATOR additive )*
    /// Ex.: 'days < 180' or '1 <= A <= 3'
    fn comparison(&mut self) -> Result<Expr> {
        let mut operands = vec![self.additive()?];
        let mut operators = Vec::new();
        while let Some(operator) = comparison_op(self.peek().variant) {
            self.advance();
            operators.push(operator);
            operands.push(self.additive()?);
        }
        if operators.is_empty() {
            return Ok(Self::single(operands))
        }
        Ok(Expr::Comparison { operands, operators })
    }

    /// Matches production: additive -> multiplicative ( ( "+" | "-" ) multiplicative )*
    fn additive(&mut self) -> Result<Expr> {
        let mut operands = vec![self.multiplicative()?];
        let mut operators = Vec::new();
        while self.match_token(&[Plus, Minus]) {
            operators.push(if self.previous().variant == Plus { ArithmeticOp::Add } else { ArithmeticOp::Sub });
            operands.push(self.multiplicative()?);
        }
        Ok(Self::arithmetic(operands, operators))
    }

    /// Matches production: multiplicative -> primary ( ( "*" | "/" ) primary )*
    fn multiplicative(&mut self) -> Result<Expr> {
        let mut operands = vec![self.primary()?];
        let mut operators = Vec::new();
        while self.match_token(&[Star, Slash]) {
            operators.push(if self.previous().variant == Star { ArithmeticOp::Mul } else { ArithmeticOp::Div });
            operands.push(self.primary()?);
        }
        Ok(Self::arithmetic(operands, operators))
    }

    /// Matches production: primary -> NUMBER | TRUE | FALSE | IDENTIFIER | "(" or_group ")"
    fn primary(&mut self) -> Result<Expr> {
        if self.match_token(&[Number, True, False, Identifier]) {
            let token = self.previous();
            let operand = Operand::from_token(token, self.vocabulary)?;
            return Ok(Expr::Operand { operand, span: token.span.clone() })
        }

        if self.match_token(&[LeftParen]) {
            let start = self.previous().span.start;
            self.enter()?;
            let expr = self.or_group();
            self.depth -= 1;
            let expr = expr?;
            if self.match_token(&[RightParen]) {
                let span = start..self.previous().span.end;
                return Ok(Expr::Grouping { expr: Box::new(expr), span })
            }
            // Case: unmatched '('. Ex.: '(days < 5'
            let end = self.peek().span.start;
            return Err(self.error_span("Expected ')'", start..end))
        }

        let message = if self.at_end() { "Expected operand, found end of input" } else { "Expected operand" };
        Err(self.error_at_current(message))
    }

    fn logical(operator: LogicalOp, operands: Vec<Expr>) -> Expr {
        if operands.len() == 1 {
            Self::single(operands)
        } else {
            Expr::Logical { operator, operands }
        }
    }

    fn arithmetic(operands: Vec<Expr>, operators: Vec<ArithmeticOp>) -> Expr {
        if operators.is_empty() {
            Self::single(operands)
        } else {
            Expr::Arithmetic { operands, operators }
        }
    }

    /// Unwraps a run that collected a single operand.
    fn single(mut operands: Vec<Expr>) -> Expr {
        operands.swap_remove(0)
    }

    /// Enters one level of parentheses or `not`, failing once the nesting limit is passed.
    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            let span = self.previous().span.clone();
            return Err(self.error_span("Nesting too deep", span.start..self.source.len()))
        }
        self.depth += 1;
        Ok(())
    }

    fn match_token(&mut self, token_types: &[TokenType]) -> bool {
        for token_type in token_types {
            if self.check(token_type) {
                self.advance();
                return true
            }
        }
        false
    }

    fn check(&self, token_type: &TokenType) -> bool {
        if self.at_end() {
            false
        } else {
            self.peek().variant == *token_type
        }
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.current += 1;
        }
    }

    fn peek(&self) -> &'a Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &'a Token {
        &self.tokens[self.current - 1]
    }

    fn at_end(&self) -> bool {
        self.peek().variant == EOF
    }

    fn error_at_current(&self, message: &str) -> RuleError {
        let span = self.peek().span.clone();
        self.error_span(message, span)
    }

    /// Creates a syntax error carrying the offending part of the source.
    fn error_span(&self, message: &str, span: std::ops::Range<usize>) -> RuleError {
        let (line, column) = self.position(span.start);
        RuleError::Syntax {
            message: message.to_string(),
            fragment: self.source[span.clone()].trim_end().to_string(),
            span,
            line,
            column,
        }
    }

    /// Line and column of the token starting at `offset`.
    fn position(&self, offset: usize) -> (usize, usize) {
        self.tokens
            .iter()
            .find(|token| token.span.start == offset)
            .map_or((1, offset + 1), |token| (token.line, token.column))
    }
}

fn comparison_op(token_type: TokenType) -> Option<ComparisonOp> {
    match token_type {
        Less => Some(ComparisonOp::Lt),
        LessEqual => Some(ComparisonOp::Le),
        Greater => Some(ComparisonOp::Gt),
        GreaterEqual => Some(ComparisonOp::Ge),
        Equal | EqualEqual => Some(ComparisonOp::Eq),
        BangEqual => Some(ComparisonOp::Ne),
        _ => None,
    }
}
