//! Disjoint-set forest over variable names.

use std::collections::HashMap;

/// Union-find keyed by variable name.
///
/// Elements keep their insertion order, which is the order bindings are reported in.
/// `find` takes `&self`, so there is no path compression; union by rank keeps trees
/// logarithmic in height.
#[derive(Debug, Clone, Default)]
pub struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl DisjointSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Add `name` as a singleton set, or return its index if already present.
    pub fn insert(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.parent.push(i);
        self.rank.push(0);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        i
    }

    /// Representative of the set containing element `i`.
    pub fn find(&self, mut i: usize) -> usize {
        while self.parent[i] != i {
            i = self.parent[i];
        }
        i
    }

    /// Representative of the set containing `name`, if the name is known.
    pub fn find_name(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|&i| self.find(i))
    }

    /// Merge the sets containing `a` and `b`; returns the new representative.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return ra;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => {
                self.parent[ra] = rb;
                rb
            }
            std::cmp::Ordering::Greater => {
                self.parent[rb] = ra;
                ra
            }
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
                ra
            }
        }
    }

    pub fn name(&self, i: usize) -> &str {
        &self.names[i]
    }

    /// All names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The sets, each listed in insertion order, ordered by their first member.
    pub fn components(&self) -> Vec<Vec<&str>> {
        let mut slot: HashMap<usize, usize> = HashMap::new();
        let mut out: Vec<Vec<&str>> = Vec::new();
        for (i, name) in self.names.iter().enumerate() {
            let root = self.find(i);
            let k = *slot.entry(root).or_insert_with(|| {
                out.push(Vec::new());
                out.len() - 1
            });
            out[k].push(name);
        }
        out
    }
}
