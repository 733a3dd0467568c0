use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Backtick-delimited raw literal; holds the text between the backticks
    ///
    /// The parser reads the content as JSON and falls back to the raw text
    /// when it is not valid JSON.
    ///
    /// # Examples
    /// ```text
    /// `true`
    /// `[1, 2]`
    /// `plain text`
    /// ```
    RawLiteral(String),

    /// Single-quoted string literal
    ///
    /// # Examples
    /// ```text
    /// 'hello'
    /// ```
    Quoted(String),

    /// Double-quoted field name
    ///
    /// Lets a field be named with characters a bare identifier cannot hold.
    ///
    /// # Examples
    /// ```text
    /// "first name"
    /// ```
    QuotedIdentifier(String),

    /// A run of word characters: ASCII letters, digits, `_` and `$`
    ///
    /// Numbers and identifiers share this token; the parser tells them
    /// apart by their characters.
    ///
    /// # Examples
    /// ```text
    /// name
    /// 42
    /// $ref
    /// ```
    Word(String),

    // References
    /// Current value (`@`)
    At,

    /// Expression reference prefix (`&`)
    ///
    /// # Examples
    /// ```text
    /// sort_by(people, &age)
    /// ```
    Ampersand,

    /// Wildcard (`*`)
    Star,

    // Operators
    /// Pipe (`|`)
    Pipe,

    /// Logical OR (`||`)
    OrOr,

    /// Logical AND (`&&`)
    AndAnd,

    /// Logical NOT (`!`)
    Exclamation,

    /// Filter marker (`?`)
    Question,

    /// Sign of a negative number (`-`)
    Minus,

    // Comparison
    /// Equality operator
    EqEq,

    /// Inequality operator
    NotEq,

    /// Less than
    Lt,

    /// Greater than
    Gt,

    /// Less than or equal
    LtEq,

    /// Greater than or equal
    GtEq,

    // Delimiters
    /// Left bracket for indices, projections and multi-select lists
    LBracket,

    /// Right bracket
    RBracket,

    /// Left parenthesis for grouping or function calls
    LParen,

    /// Right parenthesis
    RParen,

    /// Left brace for multi-select hashes
    LBrace,

    /// Right brace
    RBrace,

    /// Dot for sub-expressions and value projections
    Dot,

    /// Comma for separating arguments or multi-select items
    Comma,

    /// Colon for multi-select hash key-value pairs
    Colon,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::RawLiteral(s) => write!(f, "`{}`", s),
            Token::Quoted(s) => write!(f, "'{}'", s),
            Token::QuotedIdentifier(s) => write!(f, "\"{}\"", s),
            Token::Word(s) => f.write_str(s),
            Token::At => f.write_str("@"),
            Token::Ampersand => f.write_str("&"),
            Token::Star => f.write_str("*"),
            Token::Pipe => f.write_str("|"),
            Token::OrOr => f.write_str("||"),
            Token::AndAnd => f.write_str("&&"),
            Token::Exclamation => f.write_str("!"),
            Token::Question => f.write_str("?"),
            Token::Minus => f.write_str("-"),
            Token::EqEq => f.write_str("=="),
            Token::NotEq => f.write_str("!="),
            Token::Lt => f.write_str("<"),
            Token::Gt => f.write_str(">"),
            Token::LtEq => f.write_str("<="),
            Token::GtEq => f.write_str(">="),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::LBrace => f.write_str("{"),
            Token::RBrace => f.write_str("}"),
            Token::Dot => f.write_str("."),
            Token::Comma => f.write_str(","),
            Token::Colon => f.write_str(":"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}
