//! Deduplicated value collections with a soft singleton marker.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::term::AxiomValue;

/// A deduplicated set of axiom values for one fact-aspect.
///
/// Members are kept in `Ord` order, so iteration, rendering and
/// [`single_value`](Self::single_value) are deterministic. The singleton flag
/// is advisory: nothing stops a singleton set from holding several values,
/// and equality and hashing ignore it.
///
/// All set-algebra operations are total and report whether the set changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxiomSet<T: Ord> {
    members: BTreeSet<T>,
    #[serde(default)]
    singleton: bool,
}

impl<T: Ord> AxiomSet<T> {
    pub fn new() -> Self {
        Self {
            members: BTreeSet::new(),
            singleton: false,
        }
    }

    /// An empty set flagged as expecting at most one value.
    pub fn new_singleton() -> Self {
        Self {
            members: BTreeSet::new(),
            singleton: true,
        }
    }

    /// Insert a value. Returns `true` if it was not already present.
    pub fn add(&mut self, value: T) -> bool {
        self.members.insert(value)
    }

    /// Remove a value. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.members.remove(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.members.contains(value)
    }

    pub fn contains_all(&self, other: &AxiomSet<T>) -> bool {
        other.members.is_subset(&self.members)
    }

    /// Remove every member that is also in `other`.
    pub fn difference(&mut self, other: &AxiomSet<T>) -> bool {
        let before = self.members.len();
        for value in &other.members {
            self.members.remove(value);
        }
        self.members.len() != before
    }

    /// Keep only members that are also in `other`.
    pub fn intersect(&mut self, other: &AxiomSet<T>) -> bool {
        let before = self.members.len();
        self.members.retain(|v| other.members.contains(v));
        self.members.len() != before
    }

    /// Members of `self` that are not in `other`, in order.
    pub fn missing_from<'a>(&'a self, other: &'a AxiomSet<T>) -> impl Iterator<Item = &'a T> + 'a {
        self.members.difference(&other.members)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.members.iter()
    }

    pub fn is_singleton(&self) -> bool {
        self.singleton
    }

    pub fn set_singleton(&mut self, singleton: bool) {
        self.singleton = singleton;
    }

    /// The first member in order, whatever the cardinality.
    ///
    /// Callers that care whether the set really holds one value must check
    /// [`len`](Self::len) first.
    pub fn single_value(&self) -> Option<&T> {
        self.members.first()
    }

    /// Render as `{a, b}` using a name-extraction hook, with a `(singleton)`
    /// suffix when flagged.
    pub fn render(&self, namer: impl Fn(&T) -> String) -> String {
        let names: Vec<String> = self.members.iter().map(namer).collect();
        let mut out = format!("{{{}}}", names.join(", "));
        if self.singleton {
            out.push_str("(singleton)");
        }
        out
    }
}

impl<T: Ord + Clone> AxiomSet<T> {
    /// Add every member of `other`.
    pub fn union(&mut self, other: &AxiomSet<T>) -> bool {
        let before = self.members.len();
        self.members.extend(other.members.iter().cloned());
        self.members.len() != before
    }
}

impl<T: Ord> Default for AxiomSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> PartialEq for AxiomSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl<T: Ord> Eq for AxiomSet<T> {}

impl<T: Ord + Hash> Hash for AxiomSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.members.hash(state);
    }
}

impl<T: Ord> FromIterator<T> for AxiomSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
            singleton: false,
        }
    }
}

impl<T: Ord> Extend<T> for AxiomSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<'a, T: Ord> IntoIterator for &'a AxiomSet<T> {
    type Item = &'a T;
    type IntoIter = std::collections::btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<T: Ord> IntoIterator for AxiomSet<T> {
    type Item = T;
    type IntoIter = std::collections::btree_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<T: AxiomValue> fmt::Display for AxiomSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|v| v.display_name()))
    }
}
