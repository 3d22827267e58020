//! Terms: the closed set of AST nodes that can appear as goals or arguments.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::LiteralValue;

/// Separates a variable's source name from the alias added when a clause is instantiated.
///
/// The separator cannot occur in a lexed identifier, so any name containing it belongs to a
/// clause-local copy rather than to the query.
pub const ALIAS_SEPARATOR: char = '#';

/// Source position (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Span { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Operators that build [`Term::BinOp`] and [`Term::UnOp`] nodes.
///
/// Comparison operators and `is` are not listed here: they build two-argument functors named
/// by their symbol so that builtin dispatch works by functor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Comma,
    Semicolon,
    Plus,
    Minus,
    Times,
    Divide,
    Power,
    And,
    Or,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Comma => ",",
            Operator::Semicolon => ";",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
            Operator::And => "/\\",
            Operator::Or => "\\/",
        }
    }

    /// Infix precedence.
    pub fn precedence(self) -> u16 {
        match self {
            Operator::Semicolon => 1100,
            Operator::Comma => 1000,
            Operator::Plus | Operator::Minus | Operator::And | Operator::Or => 500,
            Operator::Times | Operator::Divide => 400,
            Operator::Power => 200,
        }
    }

    /// Whether the operator nests to the right (`xfy`) instead of to the left (`yfx`).
    pub fn is_right_associative(self) -> bool {
        matches!(self, Operator::Power)
    }
}

/// Precedence of the prefix `+`/`-` operators.
pub const PREFIX_PRECEDENCE: u16 = 100;

/// Precedence of the comparison operators and `is`.
pub const COMPARISON_PRECEDENCE: u16 = 700;

/// Precedence ceiling for functor arguments and list elements.
pub const ARGUMENT_PRECEDENCE: u16 = 999;

/// Functor names that are written infix.
pub const COMPARISON_OPERATORS: [&str; 8] = ["is", ">", ">=", "<", "=<", "=", "=:=", "=="];

/// A named variable.
///
/// Equality and hashing only look at the name.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    span: Span,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            span: Span::default(),
        }
    }

    pub fn at(name: impl Into<String>, span: Span) -> Self {
        Variable {
            name: name.into(),
            span,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// True when the variable was produced by clause instantiation.
    pub fn is_aliased(&self) -> bool {
        is_aliased_name(&self.name)
    }

    fn aliased(&self, alias: u64) -> Variable {
        Variable {
            name: format!("{}{}{}", self.name, ALIAS_SEPARATOR, alias),
            span: self.span,
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub fn is_aliased_name(name: &str) -> bool {
    name.contains(ALIAS_SEPARATOR)
}

/// A named term with arguments. Atoms are functors with no arguments.
///
/// `origin` records the clause-invocation node that produced this copy; it is not part of
/// structural equality.
#[derive(Debug, Clone)]
pub struct Functor {
    pub name: String,
    pub args: Vec<Term>,
    pub origin: Option<u64>,
    pub span: Span,
}

impl Functor {
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Functor {
            name: name.into(),
            args,
            origin: None,
            span: Span::default(),
        }
    }

    pub fn at(name: impl Into<String>, args: Vec<Term>, span: Span) -> Self {
        Functor {
            name: name.into(),
            args,
            origin: None,
            span,
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_atom(&self) -> bool {
        self.args.is_empty()
    }

    /// Written infix (`X = Y`, `N is M + 1`).
    pub fn is_infix(&self) -> bool {
        self.args.len() == 2 && COMPARISON_OPERATORS.contains(&self.name.as_str())
    }

    pub(crate) fn instantiate(&self, invocation: u64) -> Functor {
        Functor {
            name: self.name.clone(),
            args: self.args.iter().map(|a| a.instantiate(invocation)).collect(),
            origin: Some(invocation),
            span: self.span,
        }
    }
}

impl PartialEq for Functor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.args == other.args
    }
}

impl fmt::Display for Functor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infix() {
            let p = COMPARISON_PRECEDENCE;
            write_operand(f, &self.args[0], p - 1)?;
            write!(f, " {} ", self.name)?;
            return write_operand(f, &self.args[1], p - 1);
        }
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_operand(f, arg, ARGUMENT_PRECEDENCE)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// The cut goal `!`.
#[derive(Debug, Clone, Default)]
pub struct Cut {
    pub origin: Option<u64>,
    pub span: Span,
}

impl Cut {
    pub fn at(span: Span) -> Self {
        Cut { origin: None, span }
    }
}

impl PartialEq for Cut {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// A term of the language.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    BinOp {
        left: Box<Term>,
        op: Operator,
        right: Box<Term>,
    },
    UnOp {
        op: Operator,
        operand: Box<Term>,
    },
    Functor(Functor),
    Variable(Variable),
    Number(f64),
    Str(String),
    /// A value computed by the evaluator and bound into a term.
    Value(LiteralValue),
    EmptyList,
    Cons {
        head: Box<Term>,
        tail: Box<Term>,
    },
    Cut(Cut),
    /// The anonymous variable `_`: unifies with anything and is never bound.
    Underscore,
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    pub fn atom(name: impl Into<String>) -> Self {
        Term::Functor(Functor::new(name, Vec::new()))
    }

    pub fn functor(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Functor(Functor::new(name, args))
    }

    pub fn number(value: f64) -> Self {
        Term::Number(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Term::Str(value.into())
    }

    pub fn binop(left: Term, op: Operator, right: Term) -> Self {
        Term::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn unop(op: Operator, operand: Term) -> Self {
        Term::UnOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn cons(head: Term, tail: Term) -> Self {
        Term::Cons {
            head: Box::new(head),
            tail: Box::new(tail),
        }
    }

    /// Closed list `[a, b, c]`.
    pub fn list(items: Vec<Term>) -> Self {
        Term::list_with_tail(items, Term::EmptyList)
    }

    /// Open list `[a, b | tail]`.
    pub fn list_with_tail(items: Vec<Term>, tail: Term) -> Self {
        items
            .into_iter()
            .rev()
            .fold(tail, |acc, item| Term::cons(item, acc))
    }

    /// Human-readable node kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Term::BinOp { .. } => "binary operation",
            Term::UnOp { .. } => "unary operation",
            Term::Functor(f) if f.is_atom() => "constant",
            Term::Functor(_) => "functor",
            Term::Variable(_) => "variable",
            Term::Number(_) => "number",
            Term::Str(_) => "string",
            Term::Value(_) => "value",
            Term::EmptyList | Term::Cons { .. } => "list",
            Term::Cut(_) => "cut",
            Term::Underscore => "anonymous variable",
        }
    }

    /// Source position, for nodes that keep one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Term::Functor(f) => Some(f.span),
            Term::Variable(v) => Some(v.span),
            Term::Cut(c) => Some(c.span),
            Term::BinOp { left, .. } => left.span(),
            Term::UnOp { operand, .. } => operand.span(),
            Term::Cons { head, .. } => head.span(),
            _ => None,
        }
    }

    /// The literal this term denotes, if it is a number, string or computed value.
    pub fn as_literal(&self) -> Option<LiteralValue> {
        match self {
            Term::Number(n) => Some(LiteralValue::Number(*n)),
            Term::Str(s) => Some(LiteralValue::Str(s.clone())),
            Term::Value(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Shapes allowed as the tail of a list cell.
    pub fn is_list_tail(&self) -> bool {
        matches!(
            self,
            Term::EmptyList | Term::Cons { .. } | Term::Variable(_) | Term::Underscore
        )
    }

    /// Copy the term for one clause invocation: variables get the invocation id as alias and
    /// every functor and cut is stamped with it.
    pub fn instantiate(&self, invocation: u64) -> Term {
        match self {
            Term::BinOp { left, op, right } => Term::BinOp {
                left: Box::new(left.instantiate(invocation)),
                op: *op,
                right: Box::new(right.instantiate(invocation)),
            },
            Term::UnOp { op, operand } => Term::UnOp {
                op: *op,
                operand: Box::new(operand.instantiate(invocation)),
            },
            Term::Functor(f) => Term::Functor(f.instantiate(invocation)),
            Term::Variable(v) => Term::Variable(v.aliased(invocation)),
            Term::Cons { head, tail } => Term::Cons {
                head: Box::new(head.instantiate(invocation)),
                tail: Box::new(tail.instantiate(invocation)),
            },
            Term::Cut(c) => Term::Cut(Cut {
                origin: Some(invocation),
                span: c.span,
            }),
            Term::Number(_)
            | Term::Str(_)
            | Term::Value(_)
            | Term::EmptyList
            | Term::Underscore => self.clone(),
        }
    }

    /// Append the names of named variables in this term to `out`, skipping names already present.
    pub fn collect_variables(&self, out: &mut Vec<String>) {
        match self {
            Term::Variable(v) => {
                if !out.iter().any(|n| n == v.name()) {
                    out.push(v.name().to_string());
                }
            }
            Term::BinOp { left, right, .. } => {
                left.collect_variables(out);
                right.collect_variables(out);
            }
            Term::UnOp { operand, .. } => operand.collect_variables(out),
            Term::Functor(f) => {
                for arg in &f.args {
                    arg.collect_variables(out);
                }
            }
            Term::Cons { head, tail } => {
                head.collect_variables(out);
                tail.collect_variables(out);
            }
            Term::Number(_)
            | Term::Str(_)
            | Term::Value(_)
            | Term::EmptyList
            | Term::Cut(_)
            | Term::Underscore => {}
        }
    }

    pub fn variables(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    /// Precedence of the term as written, for parenthesisation.
    fn precedence(&self) -> u16 {
        match self {
            Term::BinOp { op, .. } => op.precedence(),
            Term::UnOp { .. } => PREFIX_PRECEDENCE,
            Term::Functor(f) if f.is_infix() => COMPARISON_PRECEDENCE,
            _ => 0,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, term: &Term, bound: u16) -> fmt::Result {
    if term.precedence() > bound {
        write!(f, "({})", term)
    } else {
        write!(f, "{}", term)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::BinOp { left, op, right } => {
                let p = op.precedence();
                let (left_bound, right_bound) = if op.is_right_associative() {
                    (p - 1, p)
                } else {
                    (p, p - 1)
                };
                write_operand(f, left, left_bound)?;
                match op {
                    Operator::Comma => write!(f, ", ")?,
                    _ => write!(f, " {} ", op.symbol())?,
                }
                write_operand(f, right, right_bound)
            }
            Term::UnOp { op, operand } => {
                write!(f, "{}", op.symbol())?;
                write_operand(f, operand, PREFIX_PRECEDENCE)
            }
            Term::Functor(func) => write!(f, "{}", func),
            Term::Variable(v) => write!(f, "{}", v),
            Term::Number(n) => write!(f, "{}", n),
            Term::Str(s) => write!(f, "\"{}\"", s),
            Term::Value(v) => write!(f, "{}", v),
            Term::EmptyList => write!(f, "[]"),
            Term::Cons { head, tail } => {
                write!(f, "[")?;
                write_operand(f, head, ARGUMENT_PRECEDENCE)?;
                let mut rest: &Term = tail;
                loop {
                    match rest {
                        Term::Cons { head, tail } => {
                            write!(f, ", ")?;
                            write_operand(f, head, ARGUMENT_PRECEDENCE)?;
                            rest = tail;
                        }
                        Term::EmptyList => break,
                        other => {
                            write!(f, " | ")?;
                            write_operand(f, other, ARGUMENT_PRECEDENCE)?;
                            break;
                        }
                    }
                }
                write!(f, "]")
            }
            Term::Cut(_) => write!(f, "!"),
            Term::Underscore => write!(f, "_"),
        }
    }
}
