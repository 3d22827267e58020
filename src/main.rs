//! sldlog CLI - a Prolog-like language solved by SLD resolution.
//!
//! Usage: `sldlog [FILE] [--query GOAL] [--max-depth N] [--max-solutions N] [--json]`

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use sldlog::repl::Repl;
use sldlog::session::{solve, Session, SolveRequest};
use sldlog::sld::SolveOptions;

#[derive(Parser, Debug)]
#[command(name = "sldlog")]
#[command(about = "Run logic programs with SLD resolution and cut")]
struct Args {
    /// Program file to consult
    file: Option<PathBuf>,

    /// Answer this query against FILE and exit
    #[arg(long, short)]
    query: Option<String>,

    /// Limit resolution depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Stop after this many solutions
    #[arg(long)]
    max_solutions: Option<usize>,

    /// Print the full solve result as JSON
    #[arg(long, requires = "query")]
    json: bool,

    /// Read a JSON solve request from stdin and write the result as JSON
    #[arg(long, conflicts_with_all = ["file", "query"])]
    json_request: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let args = Args::parse();
    let options = SolveOptions {
        max_depth: args.max_depth,
        max_solutions: args.max_solutions,
    };

    if args.json_request {
        process::exit(answer_request());
    }

    if let Some(query) = &args.query {
        let program = match &args.file {
            Some(path) => read_program(path),
            None => String::new(),
        };
        let output = solve(&program, query, options);
        if args.json {
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize result: {}", e);
                    process::exit(2);
                }
            }
        } else {
            print!("{}", output);
        }
        process::exit(if output.has_errors() { 1 } else { 0 });
    }

    let mut repl = Repl::with_session(Session::with_options(options));
    if let Some(path) = &args.file {
        match repl.load_file(&path.to_string_lossy()) {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }

    println!("sldlog - logic programming with SLD resolution");
    println!("Type :help for help, :quit to exit.\n");
    if let Err(e) = repl.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn read_program(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(source) => {
            info!(path = %path.display(), bytes = source.len(), "read program");
            source
        }
        Err(e) => {
            eprintln!("Error: could not read {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

/// Exit code 2 when the request itself is unreadable; errors inside the solve are part of the
/// JSON result.
fn answer_request() -> i32 {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error: could not read request: {}", e);
        return 2;
    }
    let request: SolveRequest = match serde_json::from_str(&input) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: invalid request: {}", e);
            return 2;
        }
    };
    match serde_json::to_string(&request.solve()) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: could not serialize result: {}", e);
            2
        }
    }
}
