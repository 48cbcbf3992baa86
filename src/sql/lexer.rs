// SQL lexer - tokenizes SQL queries, keeping byte spans into the source

use super::error::{SqlError, SqlResult};
use super::token::{Span, SpannedToken, Token};

pub struct Lexer<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().collect(),
            position: 0,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> SqlResult<SpannedToken> {
        self.skip_whitespace_and_comments();

        let start = self.offset();
        let Some(ch) = self.current_char() else {
            return Ok(SpannedToken::new(Token::Eof, Span::new(start, start)));
        };

        let token = match ch {
            '+' => self.single(Token::Plus),
            '-' => self.single(Token::Minus),
            '*' => self.single(Token::Star),
            '/' => self.single(Token::Slash),
            '%' => self.single(Token::Percent),
            '=' => self.single(Token::Equal),
            '(' => self.single(Token::LeftParen),
            ')' => self.single(Token::RightParen),
            ',' => self.single(Token::Comma),
            ';' => self.single(Token::Semicolon),
            '.' => self.single(Token::Dot),
            '<' => {
                self.advance();
                match self.current_char() {
                    Some('=') => self.single(Token::LessEqual),
                    Some('>') => self.single(Token::NotEqual),
                    _ => Token::Less,
                }
            }
            '>' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.single(Token::GreaterEqual)
                } else {
                    Token::Greater
                }
            }
            '!' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.single(Token::NotEqual)
                } else {
                    return Err(SqlError::UnexpectedCharacter {
                        character: '!',
                        span: Span::new(start, self.offset()),
                    });
                }
            }
            '\'' => self.read_string(start)?,
            '"' | '`' => self.read_quoted_identifier(ch, start)?,
            c if c.is_alphabetic() || c == '_' || c == '@' => self.read_identifier(),
            c if c.is_ascii_digit() => self.read_number(),
            c => {
                self.advance();
                return Err(SqlError::UnexpectedCharacter {
                    character: c,
                    span: Span::new(start, self.offset()),
                });
            }
        };

        Ok(SpannedToken::new(token, Span::new(start, self.offset())))
    }

    /// Tokenize the entire input; the last token is always `Eof`
    pub fn tokenize(&mut self) -> SqlResult<Vec<SpannedToken>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.token == Token::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    fn current_char(&self) -> Option<char> {
        self.chars.get(self.position).map(|(_, c)| *c)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).map(|(_, c)| *c)
    }

    /// Byte offset of the current character
    fn offset(&self) -> usize {
        self.chars
            .get(self.position)
            .map(|(offset, _)| *offset)
            .unwrap_or(self.input.len())
    }

    fn advance(&mut self) {
        if self.position < self.chars.len() {
            self.position += 1;
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    /// Skip whitespace and `--` line comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.current_char() {
                Some(ch) if ch.is_whitespace() => self.advance(),
                Some('-') if self.peek() == Some('-') => {
                    while let Some(ch) = self.current_char() {
                        self.advance();
                        if ch == '\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '@' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::keyword_from_str(&identifier).unwrap_or(Token::Identifier(identifier))
    }

    /// Read an identifier enclosed in `quote`; a doubled quote is literal
    fn read_quoted_identifier(&mut self, quote: char, start: usize) -> SqlResult<Token> {
        self.advance(); // Skip opening quote
        let mut identifier = String::new();

        loop {
            match self.current_char() {
                Some(ch) if ch == quote => {
                    self.advance();
                    if self.current_char() == Some(quote) {
                        identifier.push(quote);
                        self.advance();
                    } else {
                        return Ok(Token::QuotedIdentifier(identifier));
                    }
                }
                Some(ch) => {
                    identifier.push(ch);
                    self.advance();
                }
                None => {
                    return Err(SqlError::Unterminated {
                        kind: "quoted identifier",
                        span: Span::new(start, self.offset()),
                    })
                }
            }
        }
    }

    /// Read a string literal
    fn read_string(&mut self, start: usize) -> SqlResult<Token> {
        self.advance(); // Skip opening quote
        let mut string = String::new();

        loop {
            match self.current_char() {
                Some('\'') => {
                    self.advance();
                    if self.current_char() == Some('\'') {
                        // Escaped single quote
                        string.push('\'');
                        self.advance();
                    } else {
                        return Ok(Token::String(string));
                    }
                }
                Some(ch) => {
                    string.push(ch);
                    self.advance();
                }
                None => {
                    return Err(SqlError::Unterminated {
                        kind: "string literal",
                        span: Span::new(start, self.offset()),
                    })
                }
            }
        }
    }

    /// Read a number (integer or decimal)
    fn read_number(&mut self) -> Token {
        let mut number = String::new();
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot && self.peek().is_some_and(|c| c.is_ascii_digit()) {
                has_dot = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Number(number)
    }
}
