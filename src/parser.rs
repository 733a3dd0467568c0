use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast::{CompareOp, Expr, Token},
    convert,
    value::Value,
};

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());
static FUNCTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").unwrap());

/// Nesting limit for bracketed, grouped, argument and filter expressions;
/// deeper queries are rejected instead of exhausting the stack.
pub const MAX_DEPTH: usize = 64;

/// Errors raised for malformed query text.
///
/// `position` is the index of the offending token in the token sequence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected token {found} at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("Expected {expected} but found {found} at position {position}")]
    Expected {
        expected: String,
        found: String,
        position: usize,
    },

    #[error(
        "Expression nested deeper than {max} levels at position {position}",
        max = MAX_DEPTH
    )]
    TooDeep { position: usize },
}

fn describe(token: &Token) -> String {
    match token {
        Token::Eof => token.to_string(),
        _ => format!("'{}'", token),
    }
}

fn is_number(token: &Token) -> bool {
    matches!(token, Token::Word(w) if NUMBER.is_match(w))
}

/// Integer literals that overflow `i64` degrade to floats.
fn number_value(digits: &str, negative: bool) -> Value {
    match digits.parse::<i64>() {
        Ok(n) if negative => Value::Integer(-n),
        Ok(n) => Value::Integer(n),
        Err(_) => {
            let n = digits.parse::<f64>().unwrap_or(f64::NAN);
            Value::Float(if negative { -n } else { n })
        }
    }
}

/// Raw literal content is read as JSON; anything else is kept as text.
fn raw_literal_value(content: &str) -> Value {
    convert::parse_json(content).unwrap_or_else(|_| Value::String(content.to_string()))
}

/// Recursive-descent parser over a token sequence.
///
/// The cursor lives in the parser value, so every parse owns its own state
/// and parsers never share it.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn peek(&self, offset: usize) -> &Token {
        self.tokens.get(self.position + offset).unwrap_or(&Token::Eof)
    }

    fn current(&self) -> &Token {
        self.peek(0)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn check(&self, token: &Token) -> bool {
        self.current() == token
    }

    fn expected(&self, expected: &str) -> ParseError {
        ParseError::Expected {
            expected: expected.to_string(),
            found: describe(self.current()),
            position: self.position,
        }
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            found: describe(self.current()),
            position: self.position,
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.expected(&format!("'{}'", expected)));
        }
        self.advance();
        Ok(())
    }

    /// Between items of a bracketed list: a comma followed by another item,
    /// or the closing token (left for the caller to consume).
    fn expect_separator(&mut self, close: &Token) -> Result<(), ParseError> {
        if self.check(&Token::Comma) {
            self.advance();
            if self.check(close) {
                return Err(self.unexpected());
            }
            Ok(())
        } else if self.check(close) {
            Ok(())
        } else {
            Err(self.expected(&format!("',' or '{}'", close)))
        }
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                position: self.position,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parse a complete query; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if !self.check(&Token::Eof) {
            return Err(self.unexpected());
        }
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_pipe()
    }

    fn parse_pipe(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_or()?;

        while self.check(&Token::Pipe) {
            self.advance();
            let right = self.parse_or()?;

            left = Expr::Pipe {
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&Token::OrOr) {
            self.advance();
            let right = self.parse_and()?;

            left = Expr::Or {
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;

        while self.check(&Token::AndAnd) {
            self.advance();
            let right = self.parse_comparison()?;

            left = Expr::And {
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current() {
                Token::EqEq => CompareOp::Equal,
                Token::NotEq => CompareOp::NotEqual,
                Token::Lt => CompareOp::LessThan,
                Token::Gt => CompareOp::GreaterThan,
                Token::LtEq => CompareOp::LessEqual,
                Token::GtEq => CompareOp::GreaterEqual,
                _ => break,
            };

            self.advance();
            let right = self.parse_unary()?;

            left = Expr::Compare {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.check(&Token::Exclamation) {
            self.advance();
            let operand = self.parse_projection()?;
            return Ok(Expr::Not(Box::new(operand)));
        }
        self.parse_projection()
    }

    /// A primary followed by any number of `.x`, `.*`, `[*]`, `[?c]`, `[]`
    /// and `[n]` suffixes.
    fn parse_projection(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.check(&Token::Dot) {
                self.advance(); // consume '.'

                if self.check(&Token::Star) {
                    self.advance();
                    expr = Expr::ValueProjection(Box::new(expr));
                } else {
                    let right = self.parse_primary()?;
                    expr = Expr::SubExpression {
                        left: Box::new(expr),
                        right: Box::new(right),
                    };
                }
            } else if self.check(&Token::LBracket) {
                match self.peek(1) {
                    Token::Star => {
                        self.advance();
                        self.advance();
                        self.expect(Token::RBracket)?;
                        expr = Expr::Wildcard(Box::new(expr));
                    }
                    Token::Question => {
                        self.advance();
                        self.advance();
                        if self.check(&Token::Eof) {
                            return Err(self.expected("filter condition before ']'"));
                        }
                        let condition = self.nested(Self::parse_expression)?;
                        self.expect(Token::RBracket)?;
                        expr = Expr::Filter {
                            object: Box::new(expr),
                            condition: Box::new(condition),
                        };
                    }
                    Token::RBracket => {
                        self.advance();
                        self.advance();
                        expr = Expr::Flatten(Box::new(expr));
                    }
                    _ => {
                        self.advance(); // consume '['
                        let index = self.parse_index()?;
                        self.expect(Token::RBracket)?;
                        expr = Expr::Index {
                            object: Box::new(expr),
                            index,
                        };
                    }
                }
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_index(&mut self) -> Result<i64, ParseError> {
        let negative = self.check(&Token::Minus);
        if negative {
            self.advance();
        }

        let index = match self.current() {
            Token::Word(w) if NUMBER.is_match(w) => w.parse::<i64>().ok(),
            _ => None,
        };

        match index {
            Some(n) => {
                self.advance();
                Ok(if negative { -n } else { n })
            }
            None => Err(self.expected("array index")),
        }
    }

    /// `[n]`, `[-n]`, `[*]`, `[?c]` and `[]` read from the current value
    /// rather than building a list.
    fn is_bracket_suffix(&self) -> bool {
        match self.peek(1) {
            Token::Star | Token::Question | Token::RBracket => true,
            Token::Minus => is_number(self.peek(2)) && self.peek(3) == &Token::RBracket,
            token => is_number(token),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current() {
            Token::At | Token::Star => {
                self.advance();
                Ok(Expr::Current)
            }
            Token::RawLiteral(content) => {
                let value = raw_literal_value(content);
                self.advance();
                Ok(Expr::Literal(value))
            }
            Token::Quoted(s) => {
                let value = Value::String(s.clone());
                self.advance();
                Ok(Expr::Literal(value))
            }
            Token::QuotedIdentifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(Expr::Identifier(name))
            }
            Token::Minus if is_number(self.peek(1)) => {
                self.advance();
                match self.advance() {
                    Token::Word(digits) => Ok(Expr::Literal(number_value(&digits, true))),
                    _ => unreachable!("checked by is_number"),
                }
            }
            Token::Word(w) if NUMBER.is_match(w) => {
                let value = number_value(w, false);
                self.advance();
                Ok(Expr::Literal(value))
            }
            Token::Word(w) if FUNCTION_NAME.is_match(w) && self.peek(1) == &Token::LParen => {
                let name = w.clone();
                self.advance(); // name
                self.advance(); // '('
                self.parse_function_call(name)
            }
            Token::LBracket if self.is_bracket_suffix() => Ok(Expr::Current),
            Token::LBracket => {
                self.advance();
                self.parse_multi_select_list()
            }
            Token::LBrace => {
                self.advance();
                self.parse_multi_select_hash()
            }
            Token::Word(w) if IDENTIFIER.is_match(w) => {
                let name = w.clone();
                self.advance();
                Ok(Expr::Identifier(name))
            }
            Token::LParen => {
                self.advance();
                let expr = self.nested(Self::parse_expression)?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Token::Ampersand => {
                self.advance();
                let expr = self.nested(Self::parse_projection)?;
                Ok(Expr::ExpressionRef(Box::new(expr)))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_function_call(&mut self, name: String) -> Result<Expr, ParseError> {
        let mut args = vec![];

        while !self.check(&Token::RParen) {
            if self.check(&Token::Eof) {
                return Err(self.expected("')'"));
            }
            args.push(self.nested(Self::parse_expression)?);
            self.expect_separator(&Token::RParen)?;
        }

        self.expect(Token::RParen)?;
        Ok(Expr::FunctionCall { name, args })
    }

    fn parse_multi_select_list(&mut self) -> Result<Expr, ParseError> {
        let mut items = vec![];

        while !self.check(&Token::RBracket) {
            if self.check(&Token::Eof) {
                return Err(self.expected("']'"));
            }
            items.push(self.nested(Self::parse_expression)?);
            self.expect_separator(&Token::RBracket)?;
        }

        self.expect(Token::RBracket)?;
        Ok(Expr::MultiSelectList(items))
    }

    fn parse_multi_select_hash(&mut self) -> Result<Expr, ParseError> {
        let mut fields = vec![];

        while !self.check(&Token::RBrace) {
            let key = match self.current() {
                Token::Word(s) | Token::Quoted(s) | Token::QuotedIdentifier(s) => s.clone(),
                Token::Eof => return Err(self.expected("'}'")),
                _ => return Err(self.expected("key")),
            };
            self.advance();

            self.expect(Token::Colon)?;

            let value = self.nested(Self::parse_expression)?;
            fields.push((key, value));

            self.expect_separator(&Token::RBrace)?;
        }

        self.expect(Token::RBrace)?;
        Ok(Expr::MultiSelectHash(fields))
    }
}

/// Parses a token sequence into an expression tree.
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}
