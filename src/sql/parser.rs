// SQL parser - converts tokens to a concrete parse tree

use super::error::{SqlError, SqlResult};
use super::lexer::Lexer;
use super::token::{Span, SpannedToken, Token};
use super::tree::*;

pub struct Parser<'a> {
    query: &'a str,
    tokens: Vec<SpannedToken>,
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(query: &'a str) -> SqlResult<Self> {
        let tokens = Lexer::new(query).tokenize()?;
        Ok(Parser {
            query,
            tokens,
            position: 0,
        })
    }

    /// Parse one statement, optionally followed by `;`
    pub fn parse(&mut self) -> SqlResult<RootContext> {
        let statement = self.parse_sql_statement()?;
        if self.match_token(&Token::Semicolon) {
            self.advance();
        }
        self.expect_token(Token::Eof, "end of input")?;
        Ok(RootContext {
            span: statement.span,
            statement,
        })
    }

    fn parse_sql_statement(&mut self) -> SqlResult<SqlStatementContext> {
        let select = self.parse_simple_select()?;
        Ok(SqlStatementContext {
            span: select.span,
            select,
        })
    }

    fn parse_simple_select(&mut self) -> SqlResult<SimpleSelectContext> {
        let query = self.parse_query_specification()?;
        Ok(SimpleSelectContext {
            span: query.span,
            query,
        })
    }

    fn parse_query_specification(&mut self) -> SqlResult<QuerySpecificationContext> {
        let select_clause = self.parse_select_clause()?;
        let from_clause = if self.match_token(&Token::From) {
            Some(self.parse_from_clause()?)
        } else {
            None
        };

        let span = match &from_clause {
            Some(from) => select_clause.span.merge(from.span),
            None => select_clause.span,
        };
        Ok(QuerySpecificationContext {
            select_clause,
            from_clause,
            span,
        })
    }

    /// Parse `SELECT` and its element list
    fn parse_select_clause(&mut self) -> SqlResult<SelectClauseContext> {
        let mut span = self.expect_token(Token::Select, "SELECT")?;

        let mut star = None;
        let mut elements = vec![];
        if self.match_token(&Token::Star) {
            let star_span = self.current_span();
            self.advance();
            span = span.merge(star_span);
            star = Some(star_span);
        } else {
            let element = self.parse_select_element()?;
            span = span.merge(element.span);
            elements.push(element);
        }

        while self.match_token(&Token::Comma) {
            self.advance();
            let element = self.parse_select_element()?;
            span = span.merge(element.span);
            elements.push(element);
        }

        Ok(SelectClauseContext {
            star,
            elements,
            span,
        })
    }

    fn parse_select_element(&mut self) -> SqlResult<SelectElementContext> {
        let expression = self.parse_expression()?;
        let alias = self.parse_alias()?;
        let span = match &alias {
            Some(alias) => expression.span.merge(alias.span),
            None => expression.span,
        };
        Ok(SelectElementContext {
            expression,
            alias,
            span,
        })
    }

    /// Parse `[AS] alias`
    fn parse_alias(&mut self) -> SqlResult<Option<IdentContext>> {
        if self.match_token(&Token::As) {
            self.advance();
            return self.expect_ident().map(Some);
        }
        if self.is_ident() {
            return self.expect_ident().map(Some);
        }
        Ok(None)
    }

    fn parse_from_clause(&mut self) -> SqlResult<FromClauseContext> {
        let mut span = self.expect_token(Token::From, "FROM")?;

        let table_name = self.parse_table_name()?;
        span = span.merge(table_name.span);

        let alias = self.parse_alias()?;
        if let Some(alias) = &alias {
            span = span.merge(alias.span);
        }

        let where_clause = if self.match_token(&Token::Where) {
            let where_clause = self.parse_where_clause()?;
            span = span.merge(where_clause.span);
            Some(where_clause)
        } else {
            None
        };

        Ok(FromClauseContext {
            table_name,
            alias,
            where_clause,
            span,
        })
    }

    /// Parse a table name. A part may be an index pattern such as
    /// `account*` or `logs-2020*`, written as adjacent tokens.
    fn parse_table_name(&mut self) -> SqlResult<TableNameContext> {
        let mut parts = vec![self.parse_table_name_part()?];
        while self.match_token(&Token::Dot) {
            self.advance();
            parts.push(self.parse_table_name_part()?);
        }
        let name = self.qualified_name(parts);
        Ok(TableNameContext {
            span: name.span,
            name,
        })
    }

    fn parse_table_name_part(&mut self) -> SqlResult<IdentContext> {
        if matches!(self.current_token(), Token::QuotedIdentifier(_)) {
            return self.expect_ident();
        }
        if !matches!(
            self.current_token(),
            Token::Identifier(_) | Token::Number(_) | Token::Star
        ) {
            return Err(self.unexpected("table name"));
        }

        let mut span = self.current_span();
        self.advance();
        while matches!(
            self.current_token(),
            Token::Identifier(_) | Token::Number(_) | Token::Star | Token::Minus
        ) && span.touches(&self.current_span())
        {
            span = span.merge(self.current_span());
            self.advance();
        }
        Ok(IdentContext {
            text: span.text(self.query).to_string(),
            span,
        })
    }

    fn parse_where_clause(&mut self) -> SqlResult<WhereClauseContext> {
        let span = self.expect_token(Token::Where, "WHERE")?;
        let expression = self.parse_expression()?;
        Ok(WhereClauseContext {
            span: span.merge(expression.span),
            expression,
        })
    }

    /// Parse expression (entry point)
    pub fn parse_expression(&mut self) -> SqlResult<ExpressionContext> {
        self.parse_or()
    }

    /// Parse OR expression
    fn parse_or(&mut self) -> SqlResult<ExpressionContext> {
        let mut left = self.parse_xor()?;

        while self.match_token(&Token::Or) {
            self.advance();
            let right = self.parse_xor()?;
            left = binary(BinaryOperator::Or, left, right);
        }

        Ok(left)
    }

    /// Parse XOR expression
    fn parse_xor(&mut self) -> SqlResult<ExpressionContext> {
        let mut left = self.parse_and()?;

        while self.match_token(&Token::Xor) {
            self.advance();
            let right = self.parse_and()?;
            left = binary(BinaryOperator::Xor, left, right);
        }

        Ok(left)
    }

    /// Parse AND expression
    fn parse_and(&mut self) -> SqlResult<ExpressionContext> {
        let mut left = self.parse_not()?;

        while self.match_token(&Token::And) {
            self.advance();
            let right = self.parse_not()?;
            left = binary(BinaryOperator::And, left, right);
        }

        Ok(left)
    }

    /// Parse NOT expression
    fn parse_not(&mut self) -> SqlResult<ExpressionContext> {
        if self.match_token(&Token::Not) {
            let span = self.current_span();
            self.advance();
            let operand = self.parse_not()?;
            Ok(unary(UnaryOperator::Not, span, operand))
        } else {
            self.parse_comparison()
        }
    }

    /// Parse comparison and LIKE
    fn parse_comparison(&mut self) -> SqlResult<ExpressionContext> {
        let left = self.parse_addition()?;

        let op = match self.current_token() {
            Token::Equal => BinaryOperator::Equal,
            Token::NotEqual => BinaryOperator::NotEqual,
            Token::Less => BinaryOperator::Less,
            Token::LessEqual => BinaryOperator::LessEqual,
            Token::Greater => BinaryOperator::Greater,
            Token::GreaterEqual => BinaryOperator::GreaterEqual,
            Token::Like => BinaryOperator::Like,
            Token::Not if self.peek_token() == Token::Like => {
                self.advance();
                BinaryOperator::NotLike
            }
            _ => return Ok(left),
        };
        self.advance();

        let right = self.parse_addition()?;
        Ok(binary(op, left, right))
    }

    /// Parse addition/subtraction expression
    fn parse_addition(&mut self) -> SqlResult<ExpressionContext> {
        let mut left = self.parse_multiplication()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Plus,
                Token::Minus => BinaryOperator::Minus,
                _ => break,
            };
            self.advance();

            let right = self.parse_multiplication()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse multiplication/division expression
    fn parse_multiplication(&mut self) -> SqlResult<ExpressionContext> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                Token::Percent => BinaryOperator::Modulo,
                _ => break,
            };
            self.advance();

            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse unary expression
    fn parse_unary(&mut self) -> SqlResult<ExpressionContext> {
        let op = match self.current_token() {
            Token::Plus => UnaryOperator::Plus,
            Token::Minus => UnaryOperator::Minus,
            _ => return self.parse_primary(),
        };
        let span = self.current_span();
        self.advance();
        let operand = self.parse_unary()?;
        Ok(unary(op, span, operand))
    }

    /// Parse primary expression
    fn parse_primary(&mut self) -> SqlResult<ExpressionContext> {
        let span = self.current_span();
        let kind = match self.current_token() {
            Token::Number(n) => {
                self.advance();
                if n.contains('.') {
                    ExpressionKind::Literal(LiteralContext::Decimal(n))
                } else {
                    ExpressionKind::Literal(LiteralContext::Integer(n))
                }
            }
            Token::String(s) => {
                self.advance();
                ExpressionKind::Literal(LiteralContext::String(s))
            }
            Token::True => {
                self.advance();
                ExpressionKind::Literal(LiteralContext::Boolean(true))
            }
            Token::False => {
                self.advance();
                ExpressionKind::Literal(LiteralContext::Boolean(false))
            }
            Token::Null => {
                self.advance();
                ExpressionKind::Literal(LiteralContext::Null)
            }
            Token::Timestamp => {
                self.advance();
                let Token::String(text) = self.current_token() else {
                    return Err(self.unexpected("timestamp string"));
                };
                let end = self.current_span();
                self.advance();
                return Ok(ExpressionContext {
                    kind: ExpressionKind::Literal(LiteralContext::Timestamp(text)),
                    span: span.merge(end),
                });
            }
            Token::Identifier(_) if self.peek_token() == Token::LeftParen => {
                return self.parse_function_call();
            }
            Token::Identifier(_) | Token::QuotedIdentifier(_) => {
                let name = self.parse_qualified_name()?;
                return Ok(ExpressionContext {
                    span: name.span,
                    kind: ExpressionKind::QualifiedName(name),
                });
            }
            Token::LeftParen => {
                self.advance();
                let inner = self.parse_expression()?;
                let end = self.expect_token(Token::RightParen, "')'")?;
                return Ok(ExpressionContext {
                    kind: ExpressionKind::Nested(Box::new(inner)),
                    span: span.merge(end),
                });
            }
            _ => return Err(self.unexpected("expression")),
        };

        Ok(ExpressionContext { kind, span })
    }

    /// Parse `name(args)` or `name(*)`
    fn parse_function_call(&mut self) -> SqlResult<ExpressionContext> {
        let name = self.expect_ident()?;
        self.expect_token(Token::LeftParen, "'('")?;

        let args = if self.match_token(&Token::Star) {
            let star = self.current_span();
            self.advance();
            FunctionArgs::Star(star)
        } else if self.match_token(&Token::RightParen) {
            FunctionArgs::List(vec![])
        } else {
            FunctionArgs::List(self.parse_expression_list()?)
        };

        let end = self.expect_token(Token::RightParen, "')'")?;
        Ok(ExpressionContext {
            span: name.span.merge(end),
            kind: ExpressionKind::FunctionCall { name, args },
        })
    }

    fn parse_qualified_name(&mut self) -> SqlResult<QualifiedNameContext> {
        let mut parts = vec![self.expect_ident()?];
        while self.match_token(&Token::Dot) {
            self.advance();
            parts.push(self.expect_ident()?);
        }
        Ok(self.qualified_name(parts))
    }

    /// Parse list of expressions
    fn parse_expression_list(&mut self) -> SqlResult<Vec<ExpressionContext>> {
        let mut expressions = vec![];

        loop {
            expressions.push(self.parse_expression()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
            self.advance();
        }

        Ok(expressions)
    }

    // Helper methods

    fn qualified_name(&self, parts: Vec<IdentContext>) -> QualifiedNameContext {
        let span = parts
            .iter()
            .map(|part| part.span)
            .reduce(Span::merge)
            .unwrap_or_else(|| self.current_span());
        QualifiedNameContext { parts, span }
    }

    /// Get current token
    fn current_token(&self) -> Token {
        self.tokens
            .get(self.position)
            .map(|t| t.token.clone())
            .unwrap_or(Token::Eof)
    }

    fn peek_token(&self) -> Token {
        self.tokens
            .get(self.position + 1)
            .map(|t| t.token.clone())
            .unwrap_or(Token::Eof)
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.position)
            .map(|t| t.span)
            .unwrap_or(Span::new(self.query.len(), self.query.len()))
    }

    /// Advance to next token
    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Check if current token matches
    fn match_token(&self, token: &Token) -> bool {
        self.current_token() == *token
    }

    fn is_ident(&self) -> bool {
        matches!(
            self.current_token(),
            Token::Identifier(_) | Token::QuotedIdentifier(_)
        )
    }

    /// Expect a specific token, returning its span
    fn expect_token(&mut self, token: Token, expected: &str) -> SqlResult<Span> {
        if self.current_token() == token {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Expect an identifier, keeping its source text
    fn expect_ident(&mut self) -> SqlResult<IdentContext> {
        if !self.is_ident() {
            return Err(self.unexpected("identifier"));
        }
        let span = self.current_span();
        self.advance();
        Ok(IdentContext {
            text: span.text(self.query).to_string(),
            span,
        })
    }

    fn unexpected(&self, expected: &str) -> SqlError {
        SqlError::Parse {
            expected: expected.to_string(),
            found: self.current_token().to_string(),
            span: self.current_span(),
        }
    }
}

fn binary(op: BinaryOperator, left: ExpressionContext, right: ExpressionContext) -> ExpressionContext {
    ExpressionContext {
        span: left.span.merge(right.span),
        kind: ExpressionKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
    }
}

fn unary(op: UnaryOperator, op_span: Span, operand: ExpressionContext) -> ExpressionContext {
    ExpressionContext {
        span: op_span.merge(operand.span),
        kind: ExpressionKind::Unary {
            op,
            operand: Box::new(operand),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> RootContext {
        Parser::new(query).unwrap().parse().unwrap()
    }

    fn parse_expression(query: &str) -> ExpressionContext {
        Parser::new(query).unwrap().parse_expression().unwrap()
    }

    #[test]
    fn test_parse_select_simple() {
        let root = parse("SELECT id, name FROM users");
        let query = &root.statement.select.query;
        assert!(query.select_clause.star.is_none());
        assert_eq!(query.select_clause.elements.len(), 2);

        let from = query.from_clause.as_ref().unwrap();
        assert_eq!(from.table_name.name.parts[0].text, "users");
        assert!(from.where_clause.is_none());
        assert_eq!(root.span, Span::new(0, 26));
    }

    #[test]
    fn test_parse_star_and_elements() {
        let root = parse("SELECT *, age FROM t;");
        let clause = &root.statement.select.query.select_clause;
        assert_eq!(clause.star, Some(Span::new(7, 8)));
        assert_eq!(clause.elements.len(), 1);
    }

    #[test]
    fn test_parse_without_from() {
        let root = parse("SELECT 1 + 1");
        assert!(root.statement.select.query.from_clause.is_none());
    }

    #[test]
    fn test_parse_index_pattern() {
        let root = parse("SELECT a FROM logs-2020* AS l WHERE a = 1");
        let from = root.statement.select.query.from_clause.unwrap();
        assert_eq!(from.table_name.name.parts.len(), 1);
        assert_eq!(from.table_name.name.parts[0].text, "logs-2020*");
        assert_eq!(from.alias.unwrap().text, "l");
        assert!(from.where_clause.is_some());
    }

    #[test]
    fn test_parse_alias() {
        let root = parse("SELECT age AS a, `name` n FROM t");
        let elements = &root.statement.select.query.select_clause.elements;
        assert_eq!(elements[0].alias.as_ref().unwrap().text, "a");
        assert_eq!(elements[1].alias.as_ref().unwrap().text, "n");
        assert_eq!(elements[1].expression.span, Span::new(17, 23));
    }

    #[test]
    fn test_parse_precedence() {
        let expr = parse_expression("a = 1 OR b = 2 AND NOT c");
        let ExpressionKind::Binary { op, right, .. } = expr.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOperator::Or);
        let ExpressionKind::Binary { op, right, .. } = right.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOperator::And);
        assert!(matches!(
            right.kind,
            ExpressionKind::Unary {
                op: UnaryOperator::Not,
                ..
            }
        ));

        let expr = parse_expression("1 + 2 * 3");
        let ExpressionKind::Binary { op, right, .. } = expr.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOperator::Plus);
        assert!(matches!(
            right.kind,
            ExpressionKind::Binary {
                op: BinaryOperator::Multiply,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_not_like() {
        let expr = parse_expression("name NOT LIKE 'a%'");
        assert!(matches!(
            expr.kind,
            ExpressionKind::Binary {
                op: BinaryOperator::NotLike,
                ..
            }
        ));
        assert_eq!(expr.span, Span::new(0, 18));
    }

    #[test]
    fn test_parse_function_calls() {
        let expr = parse_expression("COUNT(*)");
        assert!(matches!(
            expr.kind,
            ExpressionKind::FunctionCall {
                args: FunctionArgs::Star(_),
                ..
            }
        ));

        let expr = parse_expression("log(2, x)");
        let ExpressionKind::FunctionCall { name, args } = expr.kind else {
            panic!("expected function call");
        };
        assert_eq!(name.text, "log");
        assert!(matches!(args, FunctionArgs::List(ref list) if list.len() == 2));
    }

    #[test]
    fn test_parse_timestamp_literal() {
        let expr = parse_expression("TIMESTAMP '2020-01-01 00:00:00'");
        assert_eq!(
            expr.kind,
            ExpressionKind::Literal(LiteralContext::Timestamp("2020-01-01 00:00:00".to_string()))
        );
        assert!(Parser::new("TIMESTAMP 1").unwrap().parse_expression().is_err());
    }

    #[test]
    fn test_parse_errors() {
        let err = Parser::new("SELECT").unwrap().parse().unwrap_err();
        assert_eq!(
            err,
            SqlError::Parse {
                expected: "expression".to_string(),
                found: "end of input".to_string(),
                span: Span::new(6, 6),
            }
        );

        let err = Parser::new("SELECT 1 FROM").unwrap().parse().unwrap_err();
        assert!(matches!(err, SqlError::Parse { ref expected, .. } if expected == "table name"));

        let err = Parser::new("SELECT a FROM t extra junk").unwrap().parse().unwrap_err();
        assert!(matches!(err, SqlError::Parse { ref expected, .. } if expected == "end of input"));
    }
}
