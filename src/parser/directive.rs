//! Parsing of interactive directives (`:load`, `:set`, ...).

use super::ast::{Directive, Setting};
use super::lexer::{tokenize, Token, TokenKind};
use super::parser::ParseError;
use crate::syntax::Span;

/// Parse a directive line such as `:set max_depth 50`. A trailing `.` is allowed.
pub fn parse_directive(source: &str) -> Result<Directive, ParseError> {
    let trimmed = source.trim_start();
    let Some(body) = trimmed.strip_prefix(':') else {
        return Err(ParseError::syntax(
            "expected ':' before directive name",
            Span::new(1, 1),
        ));
    };
    // Columns of tokens on the first line are shifted back to the full line.
    let shift = source.len() - body.len();
    let at = |token: &Token| {
        let column = if token.line == 1 {
            token.column + shift
        } else {
            token.column
        };
        Span::new(token.line, column)
    };

    let tokens: Vec<Token> = tokenize(body)?
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Eof | TokenKind::Dot))
        .collect();
    let Some((name, args)) = tokens.split_first() else {
        return Err(ParseError::syntax(
            "expected directive name after ':'",
            Span::new(1, shift + 1),
        ));
    };
    if name.kind != TokenKind::Constant {
        return Err(ParseError::syntax(
            format!("expected directive name, found {}", name.describe()),
            at(name),
        ));
    }

    match (name.text.as_str(), args) {
        ("load", [path]) if path.kind == TokenKind::Str => Ok(Directive::Load(path.text.clone())),
        ("load", _) => Err(ParseError::syntax(
            "expected string literal after :load",
            at(name),
        )),
        ("set", [key, value]) => Ok(Directive::Set(parse_setting(key, value, at(value))?)),
        ("set", _) => Err(ParseError::syntax(
            "expected setting name and value after :set",
            at(name),
        )),
        ("listing", []) => Ok(Directive::Listing),
        ("clear", []) => Ok(Directive::Clear),
        ("help", []) => Ok(Directive::Help),
        ("quit", []) | ("q", []) => Ok(Directive::Quit),
        (other, _) => Err(ParseError::syntax(
            format!("unknown directive: {}", other),
            at(name),
        )),
    }
}

fn parse_setting(key: &Token, value: &Token, at: Span) -> Result<Setting, ParseError> {
    match key.text.as_str() {
        "max_depth" => Ok(Setting::MaxDepth(parse_limit(value, at)?)),
        "max_solutions" => Ok(Setting::MaxSolutions(parse_limit(value, at)?)),
        "trees" => match value.text.as_str() {
            "on" | "true" => Ok(Setting::ShowTrees(true)),
            "off" | "false" => Ok(Setting::ShowTrees(false)),
            _ => Err(ParseError::syntax("expected on or off", at)),
        },
        other => Err(ParseError::syntax(format!("unknown setting: {}", other), at)),
    }
}

/// A non-negative integer, or `none` for no limit.
fn parse_limit(value: &Token, at: Span) -> Result<Option<usize>, ParseError> {
    match value.kind {
        TokenKind::Constant if value.text == "none" => Ok(None),
        TokenKind::Number => value.text.parse::<usize>().map(Some).map_err(|_| {
            ParseError::syntax(format!("invalid limit {}", value.describe()), at)
        }),
        _ => Err(ParseError::syntax(
            format!("expected a limit or none, found {}", value.describe()),
            at,
        )),
    }
}
