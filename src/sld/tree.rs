//! Derivation trees recorded during resolution.

use std::fmt::{self, Write as _};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::syntax::Term;

/// Role of a node in the derivation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The query itself.
    Root,
    /// A resolution step: a clause, builtin or cut applied to the first goal.
    Interior,
    /// The goal list was emptied.
    Success,
    /// No clause matched the selected goal.
    Failure,
}

/// One node of a derivation tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivationNode {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    pub kind: NodeKind,
    /// Clause label (`name_k`), builtin name or `!`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_clause: Option<String>,
    /// Goals remaining at this node.
    pub objective: String,
    /// The step's unifier, or the answer at a success node.
    pub bindings: IndexMap<String, String>,
    #[serde(serialize_with = "serialize_children")]
    pub children: Vec<DerivationNode>,
}

impl DerivationNode {
    pub fn root(id: u64, goals: &[Term], children: Vec<DerivationNode>) -> Self {
        DerivationNode {
            id,
            parent_id: None,
            kind: NodeKind::Root,
            applied_clause: None,
            objective: objective_text(goals),
            bindings: IndexMap::new(),
            children,
        }
    }

    pub fn interior(
        id: u64,
        parent: u64,
        applied: impl Into<String>,
        goals: &[Term],
        bindings: IndexMap<String, String>,
        children: Vec<DerivationNode>,
    ) -> Self {
        DerivationNode {
            id,
            parent_id: Some(parent),
            kind: NodeKind::Interior,
            applied_clause: Some(applied.into()),
            objective: objective_text(goals),
            bindings,
            children,
        }
    }

    pub fn success(id: u64, parent: u64, answer: IndexMap<String, String>) -> Self {
        DerivationNode {
            id,
            parent_id: Some(parent),
            kind: NodeKind::Success,
            applied_clause: None,
            objective: objective_text(&[]),
            bindings: answer,
            children: Vec::new(),
        }
    }

    pub fn failure(id: u64, parent: u64, applied: Option<String>, goals: &[Term]) -> Self {
        DerivationNode {
            id,
            parent_id: Some(parent),
            kind: NodeKind::Failure,
            applied_clause: applied,
            objective: objective_text(goals),
            bindings: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Nodes of this subtree in depth-first order, starting with `self`.
    pub fn nodes(&self) -> Vec<&DerivationNode> {
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            out.push(node);
            pending.extend(node.children.iter().rev());
        }
        out
    }

    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        self.nodes().len()
    }

    /// Success leaves in this subtree.
    pub fn successes(&self) -> usize {
        self.nodes()
            .into_iter()
            .filter(|n| n.kind == NodeKind::Success)
            .count()
    }

    /// Indented, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![(self, 0)];
        while let Some((node, depth)) = pending.pop() {
            node.render_line(&mut out, depth);
            pending.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        }
        out
    }

    fn render_line(&self, out: &mut String, depth: usize) {
        let _ = write!(out, "{:indent$}", "", indent = depth * 2);
        match (&self.kind, &self.applied_clause) {
            (NodeKind::Root, _) => {
                let _ = write!(out, "?- {}", self.objective);
            }
            (NodeKind::Success, _) => {
                let _ = write!(out, "success");
            }
            (NodeKind::Failure, Some(applied)) => {
                let _ = write!(out, "[{}] fail: {}", applied, self.objective);
            }
            (NodeKind::Failure, None) => {
                let _ = write!(out, "fail: {}", self.objective);
            }
            (NodeKind::Interior, applied) => {
                let _ = write!(
                    out,
                    "[{}] {}",
                    applied.as_deref().unwrap_or("?"),
                    self.objective
                );
            }
        }
        if !self.bindings.is_empty() {
            let shown: Vec<String> = self
                .bindings
                .iter()
                .map(|(k, v)| format!("{} = {}", k, v))
                .collect();
            let _ = write!(out, "  {{{}}}", shown.join(", "));
        }
        out.push('\n');
    }
}

/// Trees are as deep as the derivation; tear them down without recursing.
impl Drop for DerivationNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

fn serialize_children<S: Serializer>(
    children: &[DerivationNode],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    crate::grow_stack(|| serializer.collect_seq(children))
}

impl fmt::Display for DerivationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A goal list as shown in a tree node: goals joined by `, ` and ended by `.`.
///
/// The empty list is shown as `true.`.
pub fn objective_text(goals: &[Term]) -> String {
    if goals.is_empty() {
        return "true.".to_string();
    }
    let shown: Vec<String> = goals.iter().map(Term::to_string).collect();
    format!("{}.", shown.join(", "))
}
