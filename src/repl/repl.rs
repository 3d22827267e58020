//! REPL implementation.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::parser::{parse_directive, ParseError};
use crate::session::{DirectiveResult, ExecResult, Session, SessionError, SolveOutput};

const HELP: &str = "\
Enter clauses ending with '.' to add them to the program.
Enter '?- goal.' to run a query.
Directives:
  :load \"file\"              consult a program file
  :set max_depth N|none      limit resolution depth
  :set max_solutions N|none  limit the number of solutions
  :set trees on|off          print derivation trees after queries
  :listing                   print the program
  :clear                     remove every clause
  :help                      show this message
  :quit                      leave the REPL";

/// REPL error.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Interactive REPL.
///
/// Input is buffered until a line ends with `.`, so clauses and queries may span lines.
/// Directives start with `:` and take a single line.
#[derive(Debug, Default)]
pub struct Repl {
    session: Session,
    pending: String,
    finished: bool,
}

impl Repl {
    /// Create a new REPL.
    pub fn new() -> Self {
        Repl::default()
    }

    pub fn with_session(session: Session) -> Self {
        Repl {
            session,
            ..Repl::default()
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// True while a statement has been started but not finished with `.`.
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// True once `:quit` has been entered.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Load a file into the REPL.
    pub fn load_file(&mut self, path: &str) -> Result<String, ReplError> {
        let result = self.session.load_file(path)?;
        Ok(self.render_directive(result))
    }

    /// Process a line of input, returning the text to show.
    pub fn process_line(&mut self, line: &str) -> Result<String, ReplError> {
        let trimmed = line.trim();
        if self.pending.is_empty() {
            if trimmed.is_empty() {
                return Ok(String::new());
            }
            if trimmed.starts_with(':') {
                let directive = parse_directive(trimmed)?;
                debug!(?directive, "applying directive");
                let result = self.session.apply_directive(directive)?;
                return Ok(self.render_directive(result));
            }
        }

        self.pending.push_str(line);
        self.pending.push('\n');
        if !trimmed.ends_with('.') {
            return Ok(String::new());
        }

        let statement = std::mem::take(&mut self.pending);
        let text = statement.trim();
        if text.starts_with("?-") {
            let output = self.session.query(text);
            return Ok(self.render_query(&output));
        }
        let results = self.session.consult(text)?;
        Ok(self.render_results(results))
    }

    /// Run the REPL on standard input and output.
    pub fn run(&mut self) -> Result<(), ReplError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the REPL until `:quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<(), ReplError> {
        let mut lines = input.lines();
        while !self.finished {
            write!(output, "{}", if self.is_pending() { "|    " } else { "?- " })?;
            output.flush()?;
            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };
            match self.process_line(&line?) {
                Ok(text) if text.is_empty() => {}
                Ok(text) => writeln!(output, "{}", text.trim_end())?,
                Err(e) => writeln!(output, "Error: {}", e)?,
            }
        }
        Ok(())
    }

    fn render_query(&self, output: &SolveOutput) -> String {
        let mut text = output.to_string();
        if self.session.show_trees() {
            for tree in &output.derivation_trees {
                text.push_str(&tree.render());
            }
        }
        text
    }

    fn render_results(&mut self, results: Vec<ExecResult>) -> String {
        let mut clauses = 0;
        let mut text = String::new();
        for result in results {
            match result {
                ExecResult::ClausesAdded(n) => clauses += n,
                ExecResult::Query(output) => text.push_str(&self.render_query(&output)),
                ExecResult::Directive(result) => text.push_str(&self.render_directive(result)),
            }
        }
        if clauses > 0 {
            text.insert_str(0, &format!("Added {}.\n", plural(clauses, "clause")));
        }
        text
    }

    fn render_directive(&mut self, result: DirectiveResult) -> String {
        match result {
            DirectiveResult::Loaded {
                path,
                clauses,
                queries,
            } => {
                let mut text = format!("Loaded {} from {}.\n", plural(clauses, "clause"), path);
                for output in &queries {
                    text.push_str(&self.render_query(output));
                }
                text
            }
            DirectiveResult::Set { key, value } => format!("{} = {}", key, value),
            DirectiveResult::Listing(listing) if listing.is_empty() => {
                "% no clauses".to_string()
            }
            DirectiveResult::Listing(listing) => listing,
            DirectiveResult::Cleared(n) => format!("Removed {}.", plural(n, "clause")),
            DirectiveResult::Help => HELP.to_string(),
            DirectiveResult::Quit => {
                self.finished = true;
                "Bye.".to_string()
            }
        }
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
