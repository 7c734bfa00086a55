//! Formula parser
//!
//! A recursive descent parser for formula bodies (the text after `=`) with
//! the usual arithmetic precedence.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use gridcalc_core::Position;

/// Deepest expression tree, or parenthesis nesting, a formula may have
pub const MAX_NESTING_DEPTH: usize = 256;

/// An expression together with the depth of its tree
type Parsed = (FormulaExpr, usize);

/// Parse a formula body into an AST
///
/// Formulas nested deeper than [`MAX_NESTING_DEPTH`] are rejected.
///
/// # Example
/// ```rust
/// use gridcalc_formula::parse_formula;
///
/// let ast = parse_formula("1+2").unwrap();
/// let ast = parse_formula("(A1 + B2) / 2").unwrap();
/// assert!(parse_formula("1+").is_err());
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let mut parser = FormulaParser::new(formula)?;
    let (expr, _) = parser.parse_expression()?;

    // Make sure we consumed all input
    if !matches!(parser.current_token(), Token::Eof) {
        return Err(FormulaError::Parse(format!(
            "Unexpected {} after expression",
            parser.current_token().describe()
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    CellRef(String),

    Plus,
    Minus,
    Star,
    Slash,

    LeftParen,
    RightParen,

    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::CellRef(text) => format!("reference {}", text),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::Slash => "'/'".into(),
            Token::LeftParen => "'('".into(),
            Token::RightParen => "')'".into(),
            Token::Eof => "end of formula".into(),
        }
    }
}

/// Formula parser
struct FormulaParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Token,
    /// Open parentheses and unary operators around the current token
    nesting: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> FormulaResult<Self> {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: Token::Eof,
            nesting: 0,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> FormulaResult<()> {
        self.current_token = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        if c.is_ascii_uppercase() {
            return self.scan_cell_ref();
        }

        Err(FormulaError::Parse(format!(
            "Unexpected character '{}' at offset {}",
            c, self.pos
        )))
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        // Integer part
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent part
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek_char().map_or(false, |c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let num_str = &self.input[start..self.pos];
        let num: f64 = num_str
            .parse()
            .map_err(|_| FormulaError::Parse(format!("Invalid number '{}'", num_str)))?;
        if !num.is_finite() {
            return Err(FormulaError::Parse(format!(
                "Number '{}' is out of range",
                num_str
            )));
        }
        Ok(Token::Number(num))
    }

    fn scan_cell_ref(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        while self.peek_char().map_or(false, |c| c.is_ascii_uppercase()) {
            self.advance();
        }
        let digits_start = self.pos;
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        if self.pos == digits_start {
            return Err(FormulaError::Parse(format!(
                "Expected row number in reference '{}'",
                text
            )));
        }

        Ok(Token::CellRef(text.to_string()))
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> &Token {
        &self.current_token
    }

    fn consume(&mut self) -> FormulaResult<Token> {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token()?;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token() == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {}, got {}",
                expected.describe(),
                self.current_token().describe()
            )))
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Unary: +, -
    // 4. Primary: numbers, references, parentheses

    fn parse_expression(&mut self) -> FormulaResult<Parsed> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> FormulaResult<Parsed> {
        let (mut left, mut depth) = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume()?;
            let (right, right_depth) = self.parse_multiplicative()?;
            depth = Self::node_depth(depth.max(right_depth))?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok((left, depth))
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Parsed> {
        let (mut left, mut depth) = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume()?;
            let (right, right_depth) = self.parse_unary()?;
            depth = Self::node_depth(depth.max(right_depth))?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok((left, depth))
    }

    fn parse_unary(&mut self) -> FormulaResult<Parsed> {
        let op = match self.current_token() {
            Token::Plus => UnaryOperator::Plus,
            Token::Minus => UnaryOperator::Negate,
            _ => return self.parse_primary(),
        };

        self.consume()?;
        self.enter()?;
        let (operand, depth) = self.parse_unary()?;
        self.nesting -= 1;

        Ok((
            FormulaExpr::UnaryOp {
                op,
                operand: Box::new(operand),
            },
            Self::node_depth(depth)?,
        ))
    }

    fn parse_primary(&mut self) -> FormulaResult<Parsed> {
        match self.consume()? {
            Token::Number(n) => Ok((FormulaExpr::Number(n), 1)),

            Token::CellRef(text) => {
                let expr = match Position::from_a1(&text) {
                    Ok(pos) => FormulaExpr::CellRef(pos),
                    Err(_) => FormulaExpr::InvalidRef(text),
                };
                Ok((expr, 1))
            }

            Token::LeftParen => {
                self.enter()?;
                let parsed = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                self.nesting -= 1;
                Ok(parsed)
            }

            other => Err(FormulaError::Parse(format!(
                "Unexpected {}",
                other.describe()
            ))),
        }
    }

    // === Depth limits ===

    /// Step into a parenthesis or unary operand
    fn enter(&mut self) -> FormulaResult<()> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING_DEPTH {
            return Err(too_deep());
        }
        Ok(())
    }

    /// Depth of a node whose deepest child has depth `child`
    fn node_depth(child: usize) -> FormulaResult<usize> {
        let depth = child + 1;
        if depth > MAX_NESTING_DEPTH {
            return Err(too_deep());
        }
        Ok(depth)
    }
}

fn too_deep() -> FormulaError {
    FormulaError::Parse("formula nested too deeply".into())
}
