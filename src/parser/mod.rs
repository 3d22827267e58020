//! Parser for the Prolog-like surface syntax.

mod ast;
mod clauses;
mod directive;
mod lexer;
mod operators;
mod parser;

pub use ast::{Directive, Node, Setting, Statement};
pub use clauses::{extract_clause_possibilities, goal_possibilities};
pub use directive::parse_directive;
pub use lexer::{tokenize, LexError, Lexer, Token, TokenKind};
pub use operators::{Fixity, InfixOp, MAX_PRECEDENCE};
pub use parser::{parse_clauses, parse_file, parse_query, parse_term, ParseError};
