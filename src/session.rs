//! Session: end-to-end API for consulting programs and answering queries.

use std::fmt;
use std::fs;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::parser::{parse_file, parse_query, Directive, ParseError, Setting, Statement};
use crate::sld::{DerivationNode, Interpreter, SolveOptions};
use crate::syntax::Term;
use crate::theory::Theory;

/// Stage of a solve that an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    ProgramParse,
    QueryParse,
    Interpret,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::ProgramParse => "program-parse",
            Phase::QueryParse => "query-parse",
            Phase::Interpret => "interpret",
        };
        f.write_str(name)
    }
}

/// Messages raised during one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseErrors {
    pub phase: Phase,
    pub messages: Vec<String>,
}

/// Result of solving a query against a program.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveOutput {
    /// One map per solution, query variables in order of appearance.
    pub solutions: Vec<IndexMap<String, String>>,
    pub derivation_trees: Vec<DerivationNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<PhaseErrors>,
}

impl SolveOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Every error message, in phase order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .flat_map(|e| e.messages.iter().map(String::as_str))
    }

    fn push_error(&mut self, phase: Phase, message: String) {
        match self.errors.iter_mut().find(|e| e.phase == phase) {
            Some(bucket) => bucket.messages.push(message),
            None => self.errors.push(PhaseErrors {
                phase,
                messages: vec![message],
            }),
        }
    }
}

impl fmt::Display for SolveOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bucket in &self.errors {
            for message in &bucket.messages {
                writeln!(f, "{}", message)?;
            }
        }
        if self.solutions.is_empty() {
            if self.errors.is_empty() {
                writeln!(f, "false.")?;
            }
            return Ok(());
        }
        for solution in &self.solutions {
            if solution.is_empty() {
                writeln!(f, "true.")?;
                continue;
            }
            let shown: Vec<String> = solution
                .iter()
                .map(|(var, value)| format!("{} = {}", var, value))
                .collect();
            writeln!(f, "{}.", shown.join(", "))?;
        }
        Ok(())
    }
}

/// A solve request as read from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SolveRequest {
    pub program: String,
    pub query: String,
    pub options: SolveOptions,
}

impl SolveRequest {
    pub fn solve(&self) -> SolveOutput {
        solve(&self.program, &self.query, self.options)
    }
}

/// Parse `program` and `query`, then answer the query.
///
/// Program and query parse errors are reported independently; the interpreter only runs when
/// both parsed.
#[instrument(skip_all, fields(program_len = program.len(), query = %query.trim()))]
pub fn solve(program: &str, query: &str, options: SolveOptions) -> SolveOutput {
    let mut output = SolveOutput::default();
    let theory = Theory::from_source(program)
        .map_err(|e| output.push_error(Phase::ProgramParse, e.to_string()))
        .ok();
    let alternatives = parse_query(query)
        .map_err(|e| output.push_error(Phase::QueryParse, e.to_string()))
        .ok();

    if let (Some(theory), Some(alternatives)) = (theory, alternatives) {
        run_query(&theory, &alternatives, options, &mut output);
    }
    output
}

fn run_query(
    theory: &Theory,
    alternatives: &[Vec<Term>],
    options: SolveOptions,
    output: &mut SolveOutput,
) {
    match Interpreter::new(theory, options).run(alternatives) {
        Ok(answers) => {
            info!(
                solutions = answers.solutions.len(),
                trees = answers.trees.len(),
                "query finished"
            );
            output.solutions = answers.solutions;
            output.derivation_trees = answers.trees;
            for warning in answers.warnings {
                output.push_error(Phase::Interpret, warning);
            }
        }
        Err(e) => {
            info!(error = %e, "query aborted");
            output.push_error(Phase::Interpret, e.to_string());
        }
    }
}

/// Result of executing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecResult {
    ClausesAdded(usize),
    Query(SolveOutput),
    Directive(DirectiveResult),
}

/// Result of applying a directive.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveResult {
    Loaded {
        path: String,
        clauses: usize,
        /// Outputs of the queries the file contained.
        queries: Vec<SolveOutput>,
    },
    Set {
        key: String,
        value: String,
    },
    Listing(String),
    Cleared(usize),
    Help,
    Quit,
}

/// Session error.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A session holds the current theory and solver configuration.
#[derive(Debug, Clone, Default)]
pub struct Session {
    theory: Theory,
    options: SolveOptions,
    show_trees: bool,
}

impl Session {
    /// Create a new empty session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Create a session with the given limits.
    pub fn with_options(options: SolveOptions) -> Self {
        Session {
            options,
            ..Session::default()
        }
    }

    /// Execute a parsed statement.
    pub fn execute_statement(&mut self, stmt: Statement) -> ExecResult {
        match stmt {
            Statement::Clauses(clauses) => {
                let added = clauses.len();
                self.theory.extend(clauses);
                ExecResult::ClausesAdded(added)
            }
            Statement::Query(alternatives) => ExecResult::Query(self.execute_query(&alternatives)),
        }
    }

    /// Answer a parsed query against the current theory.
    pub fn execute_query(&self, alternatives: &[Vec<Term>]) -> SolveOutput {
        let mut output = SolveOutput::default();
        run_query(&self.theory, alternatives, self.options, &mut output);
        output
    }

    /// Parse and answer a query against the current theory.
    pub fn query(&self, source: &str) -> SolveOutput {
        match parse_query(source) {
            Ok(alternatives) => self.execute_query(&alternatives),
            Err(e) => {
                let mut output = SolveOutput::default();
                output.push_error(Phase::QueryParse, e.to_string());
                output
            }
        }
    }

    /// Add a program's clauses and run the queries it contains, in file order.
    ///
    /// Nothing is added when the source does not parse.
    pub fn consult(&mut self, source: &str) -> Result<Vec<ExecResult>, SessionError> {
        let statements = parse_file(source)?;
        Ok(statements
            .into_iter()
            .map(|stmt| self.execute_statement(stmt))
            .collect())
    }

    /// Load a file and add all its clauses to the theory.
    #[instrument(skip(self))]
    pub fn load_file(&mut self, path: &str) -> Result<DirectiveResult, SessionError> {
        let source = fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_string(),
            source,
        })?;
        let mut clauses = 0;
        let mut queries = Vec::new();
        for result in self.consult(&source)? {
            match result {
                ExecResult::ClausesAdded(n) => clauses += n,
                ExecResult::Query(output) => queries.push(output),
                ExecResult::Directive(_) => {}
            }
        }
        info!(clauses, queries = queries.len(), "loaded file");
        Ok(DirectiveResult::Loaded {
            path: path.to_string(),
            clauses,
            queries,
        })
    }

    /// Apply a directive.
    pub fn apply_directive(
        &mut self,
        directive: Directive,
    ) -> Result<DirectiveResult, SessionError> {
        match directive {
            Directive::Load(path) => self.load_file(&path),
            Directive::Set(setting) => Ok(self.set_option(setting)),
            Directive::Listing => Ok(DirectiveResult::Listing(self.theory.to_string())),
            Directive::Clear => {
                let removed = self.theory.len();
                self.theory.clear();
                Ok(DirectiveResult::Cleared(removed))
            }
            Directive::Help => Ok(DirectiveResult::Help),
            Directive::Quit => Ok(DirectiveResult::Quit),
        }
    }

    /// Update the configuration.
    pub fn set_option(&mut self, setting: Setting) -> DirectiveResult {
        let (key, value) = match setting {
            Setting::MaxDepth(limit) => {
                self.options.max_depth = limit;
                ("max_depth", show_limit(limit))
            }
            Setting::MaxSolutions(limit) => {
                self.options.max_solutions = limit;
                ("max_solutions", show_limit(limit))
            }
            Setting::ShowTrees(on) => {
                self.show_trees = on;
                ("trees", if on { "on" } else { "off" }.to_string())
            }
        };
        debug!(key, %value, "setting changed");
        DirectiveResult::Set {
            key: key.to_string(),
            value,
        }
    }

    /// Access the current theory.
    pub fn theory(&self) -> &Theory {
        &self.theory
    }

    /// Access the current limits.
    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    pub fn show_trees(&self) -> bool {
        self.show_trees
    }
}

fn show_limit(limit: Option<usize>) -> String {
    limit.map_or_else(|| "none".to_string(), |n| n.to_string())
}
