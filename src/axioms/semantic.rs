//! Predicate-keyed value sets: `isIn -> {Corridor1}`, `hasColor -> {Red}`.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::diagnostics::{CardinalityKind, CardinalityWarning, DiagnosticSink};
use crate::term::AxiomValue;

use super::AxiomSet;

/// One predicate together with the values a subject holds for it.
///
/// Two `SemanticAxiom`s are the same fact iff they share the predicate,
/// whatever their values: replacing the values for a predicate must never
/// split it into two entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticAxiom<P: Ord, V: Ord> {
    predicate: P,
    values: AxiomSet<V>,
}

impl<P: Ord, V: Ord> SemanticAxiom<P, V> {
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            values: AxiomSet::new(),
        }
    }

    pub fn with_values(predicate: P, values: AxiomSet<V>) -> Self {
        Self { predicate, values }
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    pub fn values(&self) -> &AxiomSet<V> {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut AxiomSet<V> {
        &mut self.values
    }

    pub fn into_values(self) -> AxiomSet<V> {
        self.values
    }
}

impl<P: Ord, V: Ord> PartialEq for SemanticAxiom<P, V> {
    fn eq(&self, other: &Self) -> bool {
        self.predicate == other.predicate
    }
}

impl<P: Ord, V: Ord> Eq for SemanticAxiom<P, V> {}

impl<P: Ord + Hash, V: Ord> Hash for SemanticAxiom<P, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.predicate.hash(state);
    }
}

impl<P: AxiomValue, V: AxiomValue> fmt::Display for SemanticAxiom<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.predicate.display_name(), self.values)
    }
}

/// A subject's predicate-keyed value sets, at most one entry per predicate.
///
/// Lookups scan linearly: a subject carries few distinct predicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticAxiomSet<P: Ord, V: Ord> {
    entries: Vec<SemanticAxiom<P, V>>,
}

impl<P: Ord + Clone, V: Ord + Clone> SemanticAxiomSet<P, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, predicate: &P) -> Option<usize> {
        self.entries.iter().position(|e| &e.predicate == predicate)
    }

    /// Insert an entry, replacing the values of an existing entry for the
    /// same predicate. Returns `true` if the predicate was new.
    pub fn insert(&mut self, axiom: SemanticAxiom<P, V>) -> bool {
        match self.position(&axiom.predicate) {
            Some(pos) => {
                self.entries[pos].values = axiom.values;
                false
            }
            None => {
                self.entries.push(axiom);
                true
            }
        }
    }

    /// Drop a predicate and all its values.
    pub fn remove(&mut self, predicate: &P) -> Option<SemanticAxiom<P, V>> {
        self.position(predicate).map(|pos| self.entries.remove(pos))
    }

    pub fn get(&self, predicate: &P) -> Option<&SemanticAxiom<P, V>> {
        self.entries.iter().find(|e| &e.predicate == predicate)
    }

    pub fn contains(&self, predicate: &P) -> bool {
        self.position(predicate).is_some()
    }

    /// A copy of the values held for `predicate`; empty if absent.
    ///
    /// The returned set is detached. Mutate through
    /// [`values_of_mut`](Self::values_of_mut).
    pub fn values_of(&self, predicate: &P) -> AxiomSet<V> {
        self.get(predicate)
            .map(|e| e.values.clone())
            .unwrap_or_default()
    }

    /// The live value set for `predicate`, created empty if absent.
    pub fn values_of_mut(&mut self, predicate: &P) -> &mut AxiomSet<V> {
        let pos = match self.position(predicate) {
            Some(pos) => pos,
            None => {
                self.entries.push(SemanticAxiom::new(predicate.clone()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].values
    }

    pub fn add_value(&mut self, predicate: &P, value: V) -> bool {
        self.values_of_mut(predicate).add(value)
    }

    /// Remove one value. An entry left empty is dropped.
    pub fn remove_value(&mut self, predicate: &P, value: &V) -> bool {
        let Some(pos) = self.position(predicate) else {
            return false;
        };
        let removed = self.entries[pos].values.remove(value);
        if self.entries[pos].values.is_empty() {
            self.entries.remove(pos);
        }
        removed
    }

    /// Predicates in order.
    pub fn predicates(&self) -> Vec<P> {
        let mut out: Vec<P> = self.entries.iter().map(|e| e.predicate.clone()).collect();
        out.sort();
        out
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SemanticAxiom<P, V>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<P: AxiomValue, V: AxiomValue> SemanticAxiomSet<P, V> {
    /// The one value held for `predicate`, if any.
    ///
    /// When the entry holds more than one value the first in order is
    /// returned and exactly one [`CardinalityWarning`] goes to `sink`.
    pub fn single_value_of(&self, predicate: &P, sink: &dyn DiagnosticSink) -> Option<V> {
        let entry = self.get(predicate)?;
        let chosen = entry.values.single_value()?.clone();
        if entry.values.len() > 1 {
            let kind = if entry.values.is_singleton() {
                CardinalityKind::SingletonViolated
            } else {
                CardinalityKind::AmbiguousSingleValue
            };
            sink.cardinality(&CardinalityWarning {
                kind,
                predicate: predicate.display_name(),
                values: entry.values.len(),
                chosen: chosen.display_name(),
            });
        }
        Some(chosen)
    }
}

impl<P: Ord + Clone, V: Ord + Clone> Default for SemanticAxiomSet<P, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry-wise equality: same predicates with equal value sets, in any order.
impl<P: Ord + Clone, V: Ord + Clone> PartialEq for SemanticAxiomSet<P, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|e| other.get(&e.predicate).is_some_and(|o| o.values == e.values))
    }
}

impl<P: Ord + Clone, V: Ord + Clone> Eq for SemanticAxiomSet<P, V> {}

impl<P: AxiomValue, V: AxiomValue> fmt::Display for SemanticAxiomSet<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.entries.iter().map(|e| e.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    use crate::diagnostics::CollectingSink;
    use crate::entity::{DataProperty, Iri, Literal};

    fn prop(name: &str) -> DataProperty {
        DataProperty::new(Iri::new(format!("http://example.org/home#{name}")).unwrap())
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut h = DefaultHasher::new();
        value.hash(&mut h);
        h.finish()
    }

    #[test]
    fn identity_is_the_predicate() {
        let a = SemanticAxiom::with_values(prop("hasColor"), [Literal::string("Red")].into_iter().collect());
        let b = SemanticAxiom::with_values(prop("hasColor"), [Literal::string("Blue")].into_iter().collect());
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, SemanticAxiom::new(prop("hasSize")));
    }

    #[test]
    fn insert_replaces_without_fragmenting() {
        let mut set = SemanticAxiomSet::new();
        assert!(set.insert(SemanticAxiom::with_values(
            prop("hasColor"),
            [Literal::string("Red")].into_iter().collect()
        )));
        assert!(!set.insert(SemanticAxiom::with_values(
            prop("hasColor"),
            [Literal::string("Blue")].into_iter().collect()
        )));
        assert_eq!(set.len(), 1);
        assert!(set.values_of(&prop("hasColor")).contains(&Literal::string("Blue")));
    }

    #[test]
    fn values_of_absent_predicate_is_detached() {
        let mut set: SemanticAxiomSet<DataProperty, Literal> = SemanticAxiomSet::new();
        let mut copy = set.values_of(&prop("hasColor"));
        copy.add(Literal::string("Red"));
        assert!(set.is_empty());
        set.values_of_mut(&prop("hasColor")).add(Literal::string("Red"));
        assert_eq!(set.values_of(&prop("hasColor")).len(), 1);
    }

    #[test]
    fn remove_value_drops_empty_entry() {
        let mut set = SemanticAxiomSet::new();
        set.add_value(&prop("hasColor"), Literal::string("Red"));
        assert!(set.remove_value(&prop("hasColor"), &Literal::string("Red")));
        assert!(!set.contains(&prop("hasColor")));
        assert!(!set.remove_value(&prop("hasColor"), &Literal::string("Red")));
    }

    #[test]
    fn singleton_violation_reports_once_per_call() {
        let sink = CollectingSink::new();
        let mut set = SemanticAxiomSet::new();
        let values = set.values_of_mut(&prop("hasColor"));
        values.set_singleton(true);
        values.add(Literal::string("Red"));
        values.add(Literal::string("Blue"));

        let first = set.single_value_of(&prop("hasColor"), &sink).unwrap();
        let second = set.single_value_of(&prop("hasColor"), &sink).unwrap();
        assert_eq!(first, second);
        assert!(first == Literal::string("Red") || first == Literal::string("Blue"));

        let warnings = sink.drain();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.kind == CardinalityKind::SingletonViolated));
        assert_eq!(warnings[0].predicate, "hasColor");
    }

    #[test]
    fn single_value_without_ambiguity_is_silent() {
        let sink = CollectingSink::new();
        let mut set = SemanticAxiomSet::new();
        set.add_value(&prop("hasSize"), Literal::integer(3));
        assert_eq!(set.single_value_of(&prop("hasSize"), &sink), Some(Literal::integer(3)));
        assert_eq!(set.single_value_of(&prop("missing"), &sink), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn multi_valued_non_singleton_is_ambiguous() {
        let sink = CollectingSink::new();
        let mut set = SemanticAxiomSet::new();
        set.add_value(&prop("hasSize"), Literal::integer(3));
        set.add_value(&prop("hasSize"), Literal::integer(4));
        set.single_value_of(&prop("hasSize"), &sink);
        assert_eq!(sink.drain()[0].kind, CardinalityKind::AmbiguousSingleValue);
    }

    #[test]
    fn set_equality_is_order_independent() {
        let mut a = SemanticAxiomSet::new();
        a.add_value(&prop("x"), Literal::integer(1));
        a.add_value(&prop("y"), Literal::integer(2));
        let mut b = SemanticAxiomSet::new();
        b.add_value(&prop("y"), Literal::integer(2));
        b.add_value(&prop("x"), Literal::integer(1));
        assert_eq!(a, b);
        b.add_value(&prop("x"), Literal::integer(5));
        assert_ne!(a, b);
    }
}
