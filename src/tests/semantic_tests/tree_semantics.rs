use std::collections::HashSet;

use super::*;
use crate::sld::{DerivationNode, NodeKind};

// =============================================================================
// DERIVATION TREE PROPERTIES
// =============================================================================
//
// Every resolution step leaves a node: ids are unique within a solve, children point back at
// their parent, and success leaves line up with the reported solutions.

fn all_nodes(output: &SolveOutput) -> Vec<&DerivationNode> {
    output
        .derivation_trees
        .iter()
        .flat_map(DerivationNode::nodes)
        .collect()
}

#[test]
fn node_ids_are_unique_across_alternatives() {
    let output = run(
        "p(1). p(2). q(X) :- p(X).",
        "q(X) ; p(X) ; q(3).",
    );
    let nodes = all_nodes(&output);
    let ids: HashSet<u64> = nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids.len(), nodes.len());
}

#[test]
fn children_point_at_their_parent() {
    let output = run("a(X) :- b(X), c(X). b(1). b(2). c(2).", "a(X).");
    for node in all_nodes(&output) {
        for child in &node.children {
            assert_eq!(child.parent_id, Some(node.id));
        }
    }
    assert!(output
        .derivation_trees
        .iter()
        .all(|t| t.parent_id.is_none() && t.kind == NodeKind::Root));
}

#[test]
fn success_leaves_match_solutions() {
    let output = run(
        "n(1). n(2). n(3). odd(X) :- n(X), X =:= 2 * 1 + 1 ; n(X), X =:= 1.",
        "odd(X).",
    );
    let successes: Vec<&DerivationNode> = all_nodes(&output)
        .into_iter()
        .filter(|n| n.kind == NodeKind::Success)
        .collect();
    assert_eq!(successes.len(), output.solutions.len());
    for (leaf, solution) in successes.iter().zip(&output.solutions) {
        assert_eq!(&leaf.bindings, solution);
        assert!(leaf.children.is_empty());
    }
}

#[test]
fn steps_record_label_goals_and_unifier() {
    let output = run("a(X) :- b(X), c(X). b(1). b(2). c(2).", "a(Y).");
    let root = &output.derivation_trees[0];
    assert_eq!(root.objective, "a(Y).");

    let step = &root.children[0];
    assert_eq!(step.kind, NodeKind::Interior);
    assert_eq!(step.applied_clause.as_deref(), Some("a_1"));
    assert_eq!(step.objective, "b(Y), c(Y).");

    let labels: Vec<Option<&str>> = step
        .children
        .iter()
        .map(|n| n.applied_clause.as_deref())
        .collect();
    assert_eq!(labels, vec![Some("b_1"), Some("b_2")]);
    assert_eq!(step.children[0].objective, "c(1).");
    assert_eq!(
        step.children[0].bindings.get("Y").map(String::as_str),
        Some("1")
    );
    // c(1) has no clause: a failure leaf under b_1.
    assert_eq!(step.children[0].children[0].kind, NodeKind::Failure);
}

#[test]
fn builtin_and_cut_steps_are_labelled() {
    let output = run("m(X) :- X > 1, !.", "m(2).");
    let nodes = all_nodes(&output);
    let labels: Vec<&str> = nodes
        .iter()
        .filter_map(|n| n.applied_clause.as_deref())
        .collect();
    assert_eq!(labels, vec!["m_1", ">", "!"]);
}

#[test]
fn cut_removes_pruned_alternatives_from_the_tree() {
    let output = run("t(1). t(2). t(3). f(X) :- t(X), !.", "f(X).");
    let tried: Vec<&str> = all_nodes(&output)
        .iter()
        .filter_map(|n| n.applied_clause.as_deref())
        .filter(|l| l.starts_with("t_"))
        .collect();
    assert_eq!(tried, vec!["t_1"]);
}

#[test]
fn trees_serialize_with_camel_case_keys() {
    let output = run("a(1).", "a(X).");
    let json = serde_json::to_value(&output).expect("serialize");
    let root = &json["derivationTrees"][0];
    assert_eq!(root["kind"], "root");
    assert_eq!(root["objective"], "a(X).");
    let step = &root["children"][0];
    assert_eq!(step["appliedClause"], "a_1");
    assert_eq!(step["parentId"], root["id"]);
    assert_eq!(step["children"][0]["kind"], "success");
    assert_eq!(step["children"][0]["bindings"]["X"], "1");
}
