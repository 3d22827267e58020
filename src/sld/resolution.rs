//! SLD resolution with cut, recording a derivation tree per query alternative.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::builtins::Builtin;
use super::tree::DerivationNode;
use super::SolveError;
use crate::syntax::{Cut, Functor, Term};
use crate::theory::Theory;
use crate::unify::{unify, Bindings, ResolveError};

/// Limits for one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolveOptions {
    /// Deepest goal-list recursion explored (None for unlimited)
    pub max_depth: Option<usize>,
    /// Stop after this many solutions (None for unlimited)
    pub max_solutions: Option<usize>,
}

/// Everything one run of the interpreter produced.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    /// Query variable bindings, one map per success, in discovery order.
    pub solutions: Vec<IndexMap<String, String>>,
    /// One tree per query alternative.
    pub trees: Vec<DerivationNode>,
    /// Answers that could not be shown because a value refers to itself.
    pub warnings: Vec<String>,
}

/// What a subtree reports to its parent.
struct Outcome {
    nodes: Vec<DerivationNode>,
    /// Invocation whose remaining alternatives a cut has pruned.
    prune_to: Option<u64>,
}

impl Outcome {
    fn leaf(node: DerivationNode) -> Self {
        Outcome {
            nodes: vec![node],
            prune_to: None,
        }
    }

    fn empty() -> Self {
        Outcome {
            nodes: Vec::new(),
            prune_to: None,
        }
    }
}

/// Depth-first, left-to-right SLD interpreter over a [`Theory`].
pub struct Interpreter<'t> {
    theory: &'t Theory,
    options: SolveOptions,
    next_id: u64,
    query_variables: Vec<String>,
    /// Unifiers of the steps from the root to the current node.
    path: Vec<Bindings>,
    answers: Answers,
}

impl<'t> Interpreter<'t> {
    pub fn new(theory: &'t Theory, options: SolveOptions) -> Self {
        Interpreter {
            theory,
            options,
            next_id: 0,
            query_variables: Vec::new(),
            path: Vec::new(),
            answers: Answers::default(),
        }
    }

    /// Solve every alternative of a query in order.
    ///
    /// Each alternative is searched separately and contributes its own tree; solutions from all
    /// alternatives are concatenated.
    pub fn run(mut self, alternatives: &[Vec<Term>]) -> Result<Answers, SolveError> {
        for goals in alternatives {
            for goal in goals {
                goal.collect_variables(&mut self.query_variables);
            }
        }

        for goals in alternatives {
            if self.solutions_exhausted() {
                break;
            }
            let root = self.fresh_id();
            let goals: Vec<Term> = goals.iter().map(|g| stamp_cut(g, root)).collect();
            debug!(root, goals = goals.len(), "solving query alternative");
            let outcome = self.resolve_goals(&goals, root, 0)?;
            self.answers
                .trees
                .push(DerivationNode::root(root, &goals, outcome.nodes));
        }
        Ok(self.answers)
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn solutions_exhausted(&self) -> bool {
        self.options
            .max_solutions
            .is_some_and(|max| self.answers.solutions.len() >= max)
    }

    fn resolve_goals(
        &mut self,
        goals: &[Term],
        parent: u64,
        depth: usize,
    ) -> Result<Outcome, SolveError> {
        crate::grow_stack(|| self.select_goal(goals, parent, depth))
    }

    fn select_goal(
        &mut self,
        goals: &[Term],
        parent: u64,
        depth: usize,
    ) -> Result<Outcome, SolveError> {
        let Some((goal, rest)) = goals.split_first() else {
            return self.record_solution(parent);
        };
        if self.solutions_exhausted() {
            return Ok(Outcome::empty());
        }
        if self.options.max_depth.is_some_and(|max| depth > max) {
            debug!(depth, "depth limit reached");
            return Ok(Outcome::empty());
        }

        trace!(%goal, depth, "selecting goal");
        match goal {
            Term::Cut(cut) => self.resolve_cut(cut, rest, parent, depth),
            Term::Functor(f) => match Builtin::lookup(f) {
                Some(builtin) => self.resolve_builtin(builtin, f, goals, parent, depth),
                None => self.resolve_clauses(f, goals, parent, depth),
            },
            other => Err(SolveError::semantic(
                format!("{} '{}' is not a callable goal", other.kind_name(), other),
                other.span(),
            )),
        }
    }

    /// A cut succeeds once, then tells the invocation it belongs to to drop its remaining
    /// alternatives.
    fn resolve_cut(
        &mut self,
        cut: &Cut,
        rest: &[Term],
        parent: u64,
        depth: usize,
    ) -> Result<Outcome, SolveError> {
        let id = self.fresh_id();
        let child = self.resolve_goals(rest, id, depth + 1)?;
        let node = DerivationNode::interior(id, parent, "!", rest, IndexMap::new(), child.nodes);
        Ok(Outcome {
            nodes: vec![node],
            prune_to: child.prune_to.or(cut.origin),
        })
    }

    fn resolve_builtin(
        &mut self,
        builtin: Builtin,
        goal: &Functor,
        goals: &[Term],
        parent: u64,
        depth: usize,
    ) -> Result<Outcome, SolveError> {
        let id = self.fresh_id();
        match builtin.call(&goal.args)? {
            Some(bindings) => {
                self.descend(id, parent, builtin.name(), bindings, &goals[1..], depth)
            }
            None => Ok(Outcome::leaf(DerivationNode::failure(
                id,
                parent,
                Some(builtin.name().to_string()),
                goals,
            ))),
        }
    }

    fn resolve_clauses(
        &mut self,
        goal: &Functor,
        goals: &[Term],
        parent: u64,
        depth: usize,
    ) -> Result<Outcome, SolveError> {
        let theory = self.theory;
        let selected = Term::Functor(goal.clone());
        let mut nodes = Vec::new();
        let mut prune_to = None;
        let mut matched = false;

        for (index, clause) in theory.clauses_for(&goal.name, goal.arity()) {
            if self.solutions_exhausted() {
                break;
            }
            let id = self.fresh_id();
            let instance = clause.instantiate(id);
            let label = theory.label(index).unwrap_or(clause.name());
            let Some(bindings) = unify(&Term::Functor(instance.head), &selected)? else {
                trace!(clause = label, "head does not unify");
                continue;
            };
            matched = true;

            let mut next = instance.body;
            next.extend_from_slice(&goals[1..]);
            let outcome = self.descend(id, parent, label, bindings, &next, depth)?;
            nodes.extend(outcome.nodes);
            if let Some(target) = outcome.prune_to {
                if target != id {
                    prune_to = Some(target);
                }
                debug!(clause = label, invocation = id, "cut prunes remaining clauses");
                break;
            }
        }

        if !matched {
            nodes.push(DerivationNode::failure(self.fresh_id(), parent, None, goals));
        }
        Ok(Outcome { nodes, prune_to })
    }

    /// Apply a step's unifier to the remaining goals and continue below it.
    fn descend(
        &mut self,
        id: u64,
        parent: u64,
        applied: &str,
        bindings: Bindings,
        goals: &[Term],
        depth: usize,
    ) -> Result<Outcome, SolveError> {
        let next = match goals
            .iter()
            .map(|g| bindings.apply(g))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(next) => next,
            Err(ResolveError::RecursiveType { variable }) => {
                trace!(%variable, "branch fails on a recursive value");
                return Ok(Outcome::leaf(DerivationNode::failure(
                    id,
                    parent,
                    Some(applied.to_string()),
                    goals,
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let record = bindings.to_record();
        self.path.push(bindings);
        let child = self.resolve_goals(&next, id, depth + 1);
        self.path.pop();
        let child = child?;

        let node = DerivationNode::interior(id, parent, applied, &next, record, child.nodes);
        Ok(Outcome {
            nodes: vec![node],
            prune_to: child.prune_to,
        })
    }

    fn record_solution(&mut self, parent: u64) -> Result<Outcome, SolveError> {
        let id = self.fresh_id();
        let restricted = Bindings::restrict_steps(&self.path, &self.query_variables)?;
        for error in restricted.recursive {
            warn!(%error, "answer has a recursive value");
            self.answers.warnings.push(error.to_string());
        }
        debug!(solution = self.answers.solutions.len() + 1, "found solution");
        self.answers.solutions.push(restricted.bindings.clone());
        Ok(Outcome::leaf(DerivationNode::success(
            id,
            parent,
            restricted.bindings,
        )))
    }
}

/// Query-level cuts commit the query alternative itself.
fn stamp_cut(goal: &Term, root: u64) -> Term {
    match goal {
        Term::Cut(cut) => Term::Cut(Cut {
            origin: Some(root),
            span: cut.span,
        }),
        other => other.clone(),
    }
}
