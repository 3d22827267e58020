//! Binding store: variable equivalence classes and their values.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{trace, warn};

use super::dsu::DisjointSets;
use super::resolve::{resolve, ResolveError};
use crate::syntax::{is_aliased_name, Term, Variable};

/// What the store knows about a variable name.
pub(crate) enum Lookup<'a> {
    /// Never seen by this store.
    Free,
    /// In a class without a value; carries the class's preferred name.
    Unbound(&'a str),
    /// In a class with a value; carries the class representative and the value.
    Bound(usize, &'a Term),
}

/// A binding store (unifier).
///
/// Variables that have been unified with each other share a class in a union-find structure.
/// Each class has at most one value and a preferred display name: query variables outrank
/// variables introduced by clause instantiation, otherwise the lexicographically smaller name
/// wins.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    classes: DisjointSets,
    /// Representative -> preferred name.
    preferred: HashMap<usize, String>,
    /// Representative -> value. Absent means unbound.
    values: HashMap<usize, Term>,
}

/// Solution rendering of a set of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restricted {
    pub bindings: IndexMap<String, String>,
    /// Variables whose value refers back to themselves.
    pub recursive: Vec<ResolveError>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no variable has a value and no two variables were merged.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.classes.components().iter().all(|c| c.len() == 1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    /// Variables known to the store, in the order they were first seen.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.classes.names()
    }

    pub(crate) fn lookup(&self, name: &str) -> Lookup<'_> {
        let Some(root) = self.classes.find_name(name) else {
            return Lookup::Free;
        };
        match self.values.get(&root) {
            Some(value) => Lookup::Bound(root, value),
            None => Lookup::Unbound(self.preferred_of(root)),
        }
    }

    /// The stored, unresolved value of a variable's class.
    pub fn value_of(&self, name: &str) -> Option<&Term> {
        let root = self.classes.find_name(name)?;
        self.values.get(&root)
    }

    /// Display name of the class containing `name`.
    pub fn preferred_name(&self, name: &str) -> Option<&str> {
        let root = self.classes.find_name(name)?;
        Some(self.preferred_of(root))
    }

    fn preferred_of(&self, root: usize) -> &str {
        self.preferred
            .get(&root)
            .map(String::as_str)
            .unwrap_or_else(|| self.classes.name(root))
    }

    /// Substitute the store's bindings into `term`.
    pub fn apply(&self, term: &Term) -> Result<Term, ResolveError> {
        resolve(term, self)
    }

    /// Bind `var` to `value`, unifying with whatever the class already holds.
    ///
    /// Returns `Ok(false)` when the binding clashes with an existing value or would need a
    /// self-referential value to be read. A malformed list is an error.
    pub fn try_assign(&mut self, var: &Variable, value: &Term) -> Result<bool, ResolveError> {
        match self.assign(var, value) {
            Err(ResolveError::RecursiveType { variable }) => {
                trace!(%variable, "binding fails on a recursive value");
                Ok(false)
            }
            other => other,
        }
    }

    fn assign(&mut self, var: &Variable, value: &Term) -> Result<bool, ResolveError> {
        match value {
            Term::Underscore => Ok(true),
            Term::Variable(other) => self.assign_variable(var, other),
            _ => self.assign_value(var, value),
        }
    }

    fn assign_variable(&mut self, a: &Variable, b: &Variable) -> Result<bool, ResolveError> {
        let ra = self.ensure(a.name());
        let rb = self.ensure(b.name());
        if ra == rb {
            return Ok(true);
        }

        let merged = match (self.values.get(&ra).cloned(), self.values.get(&rb).cloned()) {
            (Some(va), Some(vb)) => {
                let va = self.apply(&va)?;
                let vb = self.apply(&vb)?;
                if !self.unify_terms(&va, &vb)? {
                    return Ok(false);
                }
                Some(va)
            }
            (Some(v), None) | (None, Some(v)) => Some(v),
            (None, None) => None,
        };

        // Unifying the two values may already have merged the classes.
        let ra = self.ensure(a.name());
        let rb = self.ensure(b.name());
        self.join(ra, rb, merged);
        Ok(true)
    }

    fn assign_value(&mut self, var: &Variable, value: &Term) -> Result<bool, ResolveError> {
        let root = self.ensure(var.name());
        let resolved = self.apply(value)?;
        match self.values.get(&root).cloned() {
            Some(existing) => {
                let existing = self.apply(&existing)?;
                self.unify_terms(&existing, &resolved)
            }
            None => {
                self.values.insert(root, resolved);
                Ok(true)
            }
        }
    }

    /// Representative of `name`'s class, adding it as a singleton if new.
    fn ensure(&mut self, name: &str) -> usize {
        if let Some(root) = self.classes.find_name(name) {
            return root;
        }
        let i = self.classes.insert(name);
        self.preferred.insert(i, name.to_string());
        i
    }

    fn join(&mut self, ra: usize, rb: usize, value: Option<Term>) {
        if ra == rb {
            if let Some(value) = value {
                self.values.entry(ra).or_insert(value);
            }
            return;
        }
        let pa = self
            .preferred
            .remove(&ra)
            .unwrap_or_else(|| self.classes.name(ra).to_string());
        let pb = self
            .preferred
            .remove(&rb)
            .unwrap_or_else(|| self.classes.name(rb).to_string());
        self.values.remove(&ra);
        self.values.remove(&rb);

        let root = self.classes.union(ra, rb);
        self.preferred
            .insert(root, if outranks(&pa, &pb) { pa } else { pb });
        if let Some(value) = value {
            self.values.insert(root, value);
        }
    }

    /// Merge `later` into a new store.
    ///
    /// Every variable of `self` is resolved through `self` and then through `later`; variables
    /// only `later` knows are added after. A variable whose value is self-referential keeps its
    /// raw value so the cycle is reported when the result is read.
    pub fn compose(&self, later: &Bindings) -> Result<Bindings, ResolveError> {
        let mut merged = Bindings::new();
        for name in self.variables() {
            let value = match self.apply(&Term::var(name)).and_then(|t| later.apply(&t)) {
                Ok(t) => t,
                Err(ResolveError::RecursiveType { .. }) => self.raw_value(name),
                Err(e) => return Err(e),
            };
            merged.merge_binding(name, &value)?;
        }
        for name in later.variables().filter(|n| !self.contains(n)) {
            let value = match later.apply(&Term::var(name)) {
                Ok(t) => t,
                Err(ResolveError::RecursiveType { .. }) => later.raw_value(name),
                Err(e) => return Err(e),
            };
            merged.merge_binding(name, &value)?;
        }
        Ok(merged)
    }

    fn raw_value(&self, name: &str) -> Term {
        self.value_of(name)
            .cloned()
            .unwrap_or_else(|| Term::var(name))
    }

    fn merge_binding(&mut self, name: &str, value: &Term) -> Result<(), ResolveError> {
        self.ensure(name);
        if matches!(value, Term::Variable(v) if v.name() == name) {
            return Ok(());
        }
        if !self.try_assign(&Variable::new(name), value)? {
            warn!(variable = name, value = %value, "composed bindings disagree");
        }
        Ok(())
    }

    /// Every known variable with the display string of its value.
    ///
    /// Unbound variables that are their class's preferred name are left out. Values that
    /// cannot be resolved are shown unresolved.
    pub fn to_record(&self) -> IndexMap<String, String> {
        let mut record = IndexMap::new();
        for name in self.variables() {
            let shown = match self.apply(&Term::var(name)) {
                Ok(Term::Variable(v)) if v.name() == name => continue,
                Ok(term) => term.to_string(),
                Err(_) => self.raw_value(name).to_string(),
            };
            record.insert(name.to_string(), shown);
        }
        record
    }

    /// Display strings for the given variables, as reported in a solution.
    ///
    /// Variables that are unbound (or unknown) are omitted; a variable merged with another
    /// unbound variable shows that variable's name. Self-referential values are collected in
    /// [`Restricted::recursive`] instead of being shown.
    pub fn restrict(&self, names: &[String]) -> Result<Restricted, ResolveError> {
        Bindings::restrict_steps(std::slice::from_ref(self), names)
    }

    /// Like [`Bindings::restrict`], reading each variable through `steps` in order.
    ///
    /// Equivalent to restricting the composition of all the steps, without building it.
    pub fn restrict_steps(
        steps: &[Bindings],
        names: &[String],
    ) -> Result<Restricted, ResolveError> {
        let mut out = Restricted::default();
        'names: for name in names {
            let mut term = Term::var(name.as_str());
            for step in steps {
                term = match step.apply(&term) {
                    Ok(t) => t,
                    Err(e @ ResolveError::RecursiveType { .. }) => {
                        out.recursive.push(e);
                        continue 'names;
                    }
                    Err(e) => return Err(e),
                };
            }
            match term {
                Term::Variable(v) if v.name() == name => {}
                term => {
                    out.bindings.insert(name.clone(), term.to_string());
                }
            }
        }
        Ok(out)
    }
}

/// Variable precedence: query variables beat clause-local ones, then lexicographic order.
fn outranks(a: &str, b: &str) -> bool {
    match (is_aliased_name(a), is_aliased_name(b)) {
        (false, true) => true,
        (true, false) => false,
        _ => a < b,
    }
}
