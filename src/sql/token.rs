// SQL tokens for lexical analysis

use std::fmt;

/// Byte range in the query text, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// True when `other` begins exactly where this span ends
    pub fn touches(&self, other: &Span) -> bool {
        self.end == other.start
    }

    /// The covered text of `source`
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Identifier(String),
    /// Backtick or double quoted identifier, quotes removed
    QuotedIdentifier(String),
    Number(String),
    String(String),

    // Keywords
    Select,
    From,
    Where,
    As,
    And,
    Or,
    Xor,
    Not,
    Like,
    Null,
    True,
    False,
    Timestamp,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Dot,

    Eof,
}

impl Token {
    /// Convert a string to a keyword token if it matches
    pub fn keyword_from_str(s: &str) -> Option<Token> {
        match s.to_uppercase().as_str() {
            "SELECT" => Some(Token::Select),
            "FROM" => Some(Token::From),
            "WHERE" => Some(Token::Where),
            "AS" => Some(Token::As),
            "AND" => Some(Token::And),
            "OR" => Some(Token::Or),
            "XOR" => Some(Token::Xor),
            "NOT" => Some(Token::Not),
            "LIKE" => Some(Token::Like),
            "NULL" => Some(Token::Null),
            "TRUE" => Some(Token::True),
            "FALSE" => Some(Token::False),
            "TIMESTAMP" => Some(Token::Timestamp),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier {}", name),
            Token::QuotedIdentifier(name) => write!(f, "identifier `{}`", name),
            Token::Number(n) => write!(f, "number {}", n),
            Token::String(s) => write!(f, "string '{}'", s),
            Token::Select => f.write_str("SELECT"),
            Token::From => f.write_str("FROM"),
            Token::Where => f.write_str("WHERE"),
            Token::As => f.write_str("AS"),
            Token::And => f.write_str("AND"),
            Token::Or => f.write_str("OR"),
            Token::Xor => f.write_str("XOR"),
            Token::Not => f.write_str("NOT"),
            Token::Like => f.write_str("LIKE"),
            Token::Null => f.write_str("NULL"),
            Token::True => f.write_str("TRUE"),
            Token::False => f.write_str("FALSE"),
            Token::Timestamp => f.write_str("TIMESTAMP"),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::Slash => f.write_str("'/'"),
            Token::Percent => f.write_str("'%'"),
            Token::Equal => f.write_str("'='"),
            Token::NotEqual => f.write_str("'<>'"),
            Token::Less => f.write_str("'<'"),
            Token::Greater => f.write_str("'>'"),
            Token::LessEqual => f.write_str("'<='"),
            Token::GreaterEqual => f.write_str("'>='"),
            Token::LeftParen => f.write_str("'('"),
            Token::RightParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
            Token::Semicolon => f.write_str("';'"),
            Token::Dot => f.write_str("'.'"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

/// A token and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

impl SpannedToken {
    pub fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Token::keyword_from_str("select"), Some(Token::Select));
        assert_eq!(Token::keyword_from_str("Timestamp"), Some(Token::Timestamp));
        assert_eq!(Token::keyword_from_str("account"), None);
    }

    #[test]
    fn test_span() {
        let query = "SELECT a.b FROM t";
        let a = Span::new(7, 8);
        let b = Span::new(9, 10);
        assert_eq!(a.merge(b), Span::new(7, 10));
        assert_eq!(a.merge(b).text(query), "a.b");
        assert!(!a.touches(&b));
        assert!(a.touches(&Span::new(8, 9)));
        assert_eq!(Span::new(50, 60).text(query), "");
    }
}
