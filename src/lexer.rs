use crate::ast::Token;

/// Splits query text into tokens.
///
/// Characters that start no token are skipped rather than rejected.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_word_char(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if Self::is_word_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads up to the matching delimiter. No escapes are processed; an
    /// unterminated token runs to the end of the input.
    fn read_delimited(&mut self, delimiter: char) -> String {
        let mut result = String::new();
        self.advance(); // opening delimiter

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == delimiter {
                break;
            }
            result.push(ch);
        }
        result
    }

    fn two_char_operator(&self) -> Option<Token> {
        let token = match (self.current_char()?, self.peek_char(1)?) {
            ('=', '=') => Token::EqEq,
            ('!', '=') => Token::NotEq,
            ('<', '=') => Token::LtEq,
            ('>', '=') => Token::GtEq,
            ('&', '&') => Token::AndAnd,
            ('|', '|') => Token::OrOr,
            _ => return None,
        };
        Some(token)
    }

    fn single_char_token(ch: char) -> Option<Token> {
        let token = match ch {
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '.' => Token::Dot,
            ',' => Token::Comma,
            '|' => Token::Pipe,
            '!' => Token::Exclamation,
            '<' => Token::Lt,
            '>' => Token::Gt,
            '&' => Token::Ampersand,
            '*' => Token::Star,
            '@' => Token::At,
            ':' => Token::Colon,
            '-' => Token::Minus,
            '?' => Token::Question,
            _ => return None,
        };
        Some(token)
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let Some(ch) = self.current_char() else {
                return Token::Eof;
            };

            match ch {
                '`' => return Token::RawLiteral(self.read_delimited('`')),
                '\'' => return Token::Quoted(self.read_delimited('\'')),
                '"' => return Token::QuotedIdentifier(self.read_delimited('"')),
                _ => {}
            }

            if let Some(token) = self.two_char_operator() {
                self.advance();
                self.advance();
                return token;
            }

            if let Some(token) = Self::single_char_token(ch) {
                self.advance();
                return token;
            }

            if Self::is_word_char(ch) {
                return Token::Word(self.read_word());
            }

            log::trace!("skipping unrecognized character {:?} at {}", ch, self.position);
            self.advance();
        }
    }

    /// Consumes the lexer, returning every token up to (not including) `Eof`.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            match self.next_token() {
                Token::Eof => return tokens,
                token => tokens.push(token),
            }
        }
    }
}

/// Tokenizes a complete query string.
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).tokenize()
}

#[test]
fn test_two_char_operators_win() {
    let mut lexer = Lexer::new("a==b||!c");
    assert_eq!(lexer.next_token(), Token::Word("a".to_string()));
    assert_eq!(lexer.next_token(), Token::EqEq);
    assert_eq!(lexer.next_token(), Token::Word("b".to_string()));
    assert_eq!(lexer.next_token(), Token::OrOr);
    assert_eq!(lexer.next_token(), Token::Exclamation);
    assert_eq!(lexer.next_token(), Token::Word("c".to_string()));
    assert_eq!(lexer.next_token(), Token::Eof);
}

#[test]
fn test_filter_expression() {
    let mut lexer = Lexer::new("[?age > `18`]");
    assert_eq!(lexer.next_token(), Token::LBracket);
    assert_eq!(lexer.next_token(), Token::Question);
    assert_eq!(lexer.next_token(), Token::Word("age".to_string()));
    assert_eq!(lexer.next_token(), Token::Gt);
    assert_eq!(lexer.next_token(), Token::RawLiteral("18".to_string()));
    assert_eq!(lexer.next_token(), Token::RBracket);
    assert_eq!(lexer.next_token(), Token::Eof);
}
