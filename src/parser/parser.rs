//! Precedence-climbing parser for the Prolog-like surface syntax.

use thiserror::Error;

use super::ast::{Node, Statement};
use super::clauses::{build_rule, extract_clause_possibilities, extract_query};
use super::lexer::{tokenize, LexError, Token, TokenKind};
use super::operators::{self, InfixBuilder, InfixOp, MAX_PRECEDENCE};
use crate::syntax::{
    Clause, Cut, Functor, Span, Term, Variable, ARGUMENT_PRECEDENCE, PREFIX_PRECEDENCE,
};

/// Parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexError),
    #[error("Syntax Error: {message} at line {line} column {column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("Syntax Error: unexpected end of file at line {line} column {column}")]
    UnexpectedEof { line: usize, column: usize },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, at: Span) -> Self {
        ParseError::Syntax {
            message: message.into(),
            line: at.line,
            column: at.column,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::Lexical(e) => e.line,
            ParseError::Syntax { line, .. } | ParseError::UnexpectedEof { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ParseError::Lexical(e) => e.column,
            ParseError::Syntax { column, .. } | ParseError::UnexpectedEof { column, .. } => {
                *column
            }
        }
    }
}

/// A parsed operand together with the precedence it was written at.
struct Operand {
    node: Node,
    precedence: u16,
    span: Span,
}

/// Parser state.
struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let (line, column) = tokens.last().map_or((1, 1), |t| (t.line, t.column));
            tokens.push(Token::new(TokenKind::Eof, "", line, column));
        }
        Parser {
            tokens,
            position: 0,
        }
    }

    fn from_source(source: &str) -> Result<Self, ParseError> {
        Ok(Parser::new(tokenize(source)?))
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn at(&self) -> Span {
        let token = self.current();
        Span::new(token.line, token.column)
    }

    fn at_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn expect(&mut self, expected: TokenKind, spelling: &str) -> Result<Token, ParseError> {
        if self.current().kind == expected {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", spelling)))
        }
    }

    /// Error for the current token, which was not what the grammar allows here.
    fn unexpected(&self, wanted: &str) -> ParseError {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            ParseError::UnexpectedEof {
                line: token.line,
                column: token.column,
            }
        } else {
            ParseError::syntax(
                format!("expected {} but found {}", wanted, token.describe()),
                self.at(),
            )
        }
    }
}

/// Parse a program: a sequence of facts and rules, each terminated by `.`.
pub fn parse_clauses(source: &str) -> Result<Vec<Clause>, ParseError> {
    let mut parser = Parser::from_source(source)?;
    let mut clauses = Vec::new();
    while !parser.at_eof() {
        clauses.extend(parse_clause(&mut parser)?);
    }
    Ok(clauses)
}

/// Parse a source file that may mix clauses with `?- goal.` queries.
pub fn parse_file(source: &str) -> Result<Vec<Statement>, ParseError> {
    let mut parser = Parser::from_source(source)?;
    let mut statements = Vec::new();
    while !parser.at_eof() {
        if parser.current().kind == TokenKind::Query {
            parser.advance();
            statements.push(Statement::Query(parse_query_body(&mut parser)?));
        } else {
            statements.push(Statement::Clauses(parse_clause(&mut parser)?));
        }
    }
    Ok(statements)
}

/// Parse a query. The result holds one goal list per top-level alternative.
///
/// A leading `?-` is accepted.
pub fn parse_query(source: &str) -> Result<Vec<Vec<Term>>, ParseError> {
    let mut parser = Parser::from_source(source)?;
    if parser.current().kind == TokenKind::Query {
        parser.advance();
    }
    let goals = parse_query_body(&mut parser)?;
    if !parser.at_eof() {
        return Err(parser.unexpected("end of query"));
    }
    Ok(goals)
}

/// Parse a single term, with an optional terminating `.`.
pub fn parse_term(source: &str) -> Result<Term, ParseError> {
    let mut parser = Parser::from_source(source)?;
    let operand = parse_expression(&mut parser, MAX_PRECEDENCE)?;
    if parser.current().kind == TokenKind::Dot {
        parser.advance();
    }
    if !parser.at_eof() {
        return Err(parser.unexpected("end of input"));
    }
    into_term(operand.node, operand.span)
}

fn parse_clause(parser: &mut Parser) -> Result<Vec<Clause>, ParseError> {
    let operand = parse_expression(parser, MAX_PRECEDENCE)?;
    parser.expect(TokenKind::Dot, ".")?;
    extract_clause_possibilities(operand.node, operand.span)
}

fn parse_query_body(parser: &mut Parser) -> Result<Vec<Vec<Term>>, ParseError> {
    let operand = parse_expression(parser, MAX_PRECEDENCE)?;
    parser.expect(TokenKind::Dot, ".")?;
    extract_query(operand.node, operand.span)
}

/// Precedence climbing: parse a prefix operand, then absorb infix operators up to `max`.
fn parse_expression(parser: &mut Parser, max: u16) -> Result<Operand, ParseError> {
    let mut left = parse_prefix(parser, max)?;

    loop {
        let Some(op) = operators::infix(parser.current().kind) else {
            break;
        };
        if op.precedence > max {
            break;
        }
        let (left_bound, right_bound) = op.operand_bounds();
        if left.precedence > left_bound {
            return Err(ParseError::syntax(
                format!(
                    "operator priority clash: {} cannot be chained without parentheses",
                    parser.current().describe()
                ),
                parser.at(),
            ));
        }

        let token = parser.advance();
        let at = Span::new(token.line, token.column);
        let right = parse_expression(parser, right_bound)?;
        left = Operand {
            node: build_infix(op, left.node, right.node, at)?,
            precedence: op.precedence,
            span: left.span,
        };
    }

    Ok(left)
}

fn build_infix(op: InfixOp, left: Node, right: Node, at: Span) -> Result<Node, ParseError> {
    match op.builder {
        InfixBuilder::Rule => build_rule(left, right, at),
        InfixBuilder::BinOp(operator) => Ok(Node::Term(Term::binop(
            into_term(left, at)?,
            operator,
            into_term(right, at)?,
        ))),
        InfixBuilder::Relation(name) => Ok(Node::Term(Term::Functor(Functor::at(
            name,
            vec![into_term(left, at)?, into_term(right, at)?],
            at,
        )))),
    }
}

fn into_term(node: Node, at: Span) -> Result<Term, ParseError> {
    match node {
        Node::Term(term) => Ok(term),
        Node::Clauses(_) => Err(ParseError::syntax(
            "a clause cannot be used as a term",
            at,
        )),
    }
}

fn parse_prefix(parser: &mut Parser, max: u16) -> Result<Operand, ParseError> {
    let span = parser.at();
    let operand = |term: Term| Operand {
        node: Node::Term(term),
        precedence: 0,
        span,
    };

    if let Some((precedence, op)) = operators::prefix(parser.current().kind) {
        if precedence > max {
            return Err(parser.unexpected("an operand"));
        }
        parser.advance();
        let inner = parse_expression(parser, PREFIX_PRECEDENCE)?;
        return Ok(Operand {
            node: Node::Term(Term::unop(op, into_term(inner.node, span)?)),
            precedence,
            span,
        });
    }

    match parser.current().kind {
        TokenKind::Number => {
            let token = parser.advance();
            let value = token.text.parse::<f64>().map_err(|_| {
                ParseError::syntax(format!("invalid number '{}'", token.text), span)
            })?;
            Ok(operand(Term::Number(value)))
        }
        TokenKind::Str => Ok(operand(Term::Str(parser.advance().text))),
        TokenKind::Variable => Ok(operand(Term::Variable(Variable::at(
            parser.advance().text,
            span,
        )))),
        TokenKind::Anonymous => {
            parser.advance();
            Ok(operand(Term::Underscore))
        }
        TokenKind::Bang => {
            parser.advance();
            Ok(operand(Term::Cut(Cut::at(span))))
        }
        TokenKind::Constant => {
            let name = parser.advance().text;
            let args = if parser.current().kind == TokenKind::LParen {
                parser.advance();
                parse_arguments(parser)?
            } else {
                Vec::new()
            };
            Ok(operand(Term::Functor(Functor::at(name, args, span))))
        }
        TokenKind::LParen => {
            parser.advance();
            let inner = parse_expression(parser, MAX_PRECEDENCE)?;
            parser.expect(TokenKind::RParen, ")")?;
            Ok(Operand {
                node: inner.node,
                precedence: 0,
                span,
            })
        }
        TokenKind::LBracket => {
            parser.advance();
            Ok(operand(parse_list(parser)?))
        }
        _ => Err(parser.unexpected("a term")),
    }
}

fn parse_argument(parser: &mut Parser) -> Result<Term, ParseError> {
    let operand = parse_expression(parser, ARGUMENT_PRECEDENCE)?;
    into_term(operand.node, operand.span)
}

/// Arguments after `name(`, up to and including the closing parenthesis.
fn parse_arguments(parser: &mut Parser) -> Result<Vec<Term>, ParseError> {
    let mut args = vec![parse_argument(parser)?];
    loop {
        match parser.current().kind {
            TokenKind::Comma => {
                parser.advance();
                args.push(parse_argument(parser)?);
            }
            TokenKind::RParen => {
                parser.advance();
                return Ok(args);
            }
            _ => return Err(parser.unexpected("',' or ')'")),
        }
    }
}

/// List after `[`, up to and including the closing bracket.
fn parse_list(parser: &mut Parser) -> Result<Term, ParseError> {
    if parser.current().kind == TokenKind::RBracket {
        parser.advance();
        return Ok(Term::EmptyList);
    }

    let mut items = vec![parse_argument(parser)?];
    loop {
        match parser.current().kind {
            TokenKind::Comma => {
                parser.advance();
                items.push(parse_argument(parser)?);
            }
            TokenKind::Pipe => {
                parser.advance();
                let tail = parse_argument(parser)?;
                parser.expect(TokenKind::RBracket, "]")?;
                return Ok(Term::list_with_tail(items, tail));
            }
            TokenKind::RBracket => {
                parser.advance();
                return Ok(Term::list(items));
            }
            _ => return Err(parser.unexpected("',', '|' or ']'")),
        }
    }
}
