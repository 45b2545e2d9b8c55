//! In-memory asserted-fact store backed by DashMap.
//!
//! Statements are kept in canonical orientation (see [`vocab::Shape`]) with a
//! reverse index on entity objects, so `Sub`/`Super` and symmetric relations
//! read from either side. All data is lost on process exit.

use std::collections::BTreeSet;

use dashmap::DashMap;

use crate::entity::{EntityKind, Iri, XSD};
use crate::error::{ReferenceError, StoreError, StoreResult};
use crate::restriction::{Filler, Restriction};
use crate::term::Term;

use super::vocab::{self, Orientation};
use super::{AxiomPredicate, LinkFamily, OntologyStore};

/// Concurrent in-memory ontology store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// subject → {(property, object)}
    forward: DashMap<Iri, BTreeSet<(String, Term)>>,
    /// entity object → {(property, subject)}
    reverse: DashMap<Iri, BTreeSet<(String, Iri)>>,
    declared: DashMap<Iri, EntityKind>,
    strict: bool,
}

impl MemoryStore {
    /// Create an empty store that accepts any IRI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects references to undeclared entities.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The declared kind of an entity, if any.
    pub fn declared_kind(&self, iri: &Iri) -> Option<EntityKind> {
        self.declared.get(iri).map(|k| *k.value())
    }

    fn insert(&self, subject: &Iri, property: &str, object: &Term) {
        self.forward
            .entry(subject.clone())
            .or_default()
            .insert((property.to_string(), object.clone()));
        if let Term::Entity(target) = object {
            self.reverse
                .entry(target.clone())
                .or_default()
                .insert((property.to_string(), subject.clone()));
        }
    }

    fn remove(&self, subject: &Iri, property: &str, object: &Term) {
        if let Some(mut stmts) = self.forward.get_mut(subject) {
            stmts.remove(&(property.to_string(), object.clone()));
        }
        self.forward.remove_if(subject, |_, stmts| stmts.is_empty());
        if let Term::Entity(target) = object {
            if let Some(mut back) = self.reverse.get_mut(target) {
                back.remove(&(property.to_string(), subject.clone()));
            }
            self.reverse.remove_if(target, |_, back| back.is_empty());
        }
    }

    fn contains(&self, subject: &Iri, property: &str, object: &Term) -> bool {
        self.forward
            .get(subject)
            .is_some_and(|stmts| stmts.contains(&(property.to_string(), object.clone())))
    }

    fn objects(&self, subject: &Iri, property: &str) -> Vec<Term> {
        self.forward
            .get(subject)
            .map(|stmts| {
                stmts
                    .iter()
                    .filter(|(p, _)| p == property)
                    .map(|(_, o)| o.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn subjects(&self, object: &Iri, property: &str) -> Vec<Term> {
        self.reverse
            .get(object)
            .map(|back| {
                back.iter()
                    .filter(|(p, _)| p == property)
                    .map(|(_, s)| Term::Entity(s.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn require_declared(&self, iri: &Iri, kind: &str) -> StoreResult<()> {
        if !self.strict || vocab::is_reserved(iri.as_str()) || iri.as_str().starts_with(XSD) {
            return Ok(());
        }
        if self.declared.contains_key(iri) {
            Ok(())
        } else {
            Err(ReferenceError::Undeclared {
                kind: kind.to_string(),
                iri: iri.to_string(),
            }
            .into())
        }
    }

    fn check_references(
        &self,
        subject: &Iri,
        predicate: &AxiomPredicate,
        value: &Term,
    ) -> StoreResult<()> {
        if !self.strict {
            return Ok(());
        }
        match predicate {
            AxiomPredicate::Aspect { entity, .. } => {
                self.require_declared(subject, &entity.to_string())?;
            }
            AxiomPredicate::ObjectLink(p) => {
                self.require_declared(subject, "individual")?;
                self.require_declared(p.iri(), "object property")?;
            }
            AxiomPredicate::DataLink(p) => {
                self.require_declared(subject, "individual")?;
                self.require_declared(p.iri(), "data property")?;
            }
        }
        match value {
            Term::Entity(iri) => self.require_declared(iri, "entity"),
            Term::Literal(_) => Ok(()),
            Term::Restriction(Restriction::Quantified {
                property, filler, ..
            }) => {
                self.require_declared(property.iri(), "property")?;
                match filler {
                    Filler::Class(c) => self.require_declared(c.iri(), "class"),
                    Filler::Datatype(_) => Ok(()),
                }
            }
            Term::Restriction(r) => match r.named() {
                Some(iri) => self.require_declared(iri, "class"),
                None => Ok(()),
            },
        }
    }
}

impl OntologyStore for MemoryStore {
    fn query(&self, subject: &Iri, predicate: &AxiomPredicate) -> StoreResult<Vec<Term>> {
        let shape = predicate.shape()?;
        let mut found: BTreeSet<Term> = BTreeSet::new();
        if matches!(shape.orientation, Orientation::Forward | Orientation::Symmetric) {
            found.extend(self.objects(subject, &shape.property));
        }
        if matches!(shape.orientation, Orientation::Reverse | Orientation::Symmetric) {
            found.extend(self.subjects(subject, &shape.property));
        }
        let type_query = shape.property == vocab::RDF_TYPE;
        Ok(found
            .into_iter()
            .filter(|t| shape.admits.accepts(t))
            .filter(|t| match t {
                Term::Entity(iri) if type_query => !vocab::is_declaration_type(iri.as_str()),
                _ => true,
            })
            .collect())
    }

    fn check(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()> {
        vocab::check_value(subject, predicate, value)?;
        self.check_references(subject, predicate, value)
    }

    fn assert(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()> {
        let shape = vocab::check_value(subject, predicate, value)?;
        self.check_references(subject, predicate, value)?;
        match (shape.orientation, value) {
            (Orientation::Forward, _) => self.insert(subject, &shape.property, value),
            (Orientation::Reverse, Term::Entity(other)) => {
                self.insert(other, &shape.property, &Term::Entity(subject.clone()));
            }
            (Orientation::Symmetric, Term::Entity(other)) => {
                let back = Term::Entity(subject.clone());
                if !self.contains(other, &shape.property, &back) {
                    self.insert(subject, &shape.property, value);
                }
            }
            _ => {
                return Err(StoreError::Unsupported {
                    subject: subject.to_string(),
                    predicate: predicate.to_string(),
                });
            }
        }
        tracing::trace!(subject = %subject, property = %shape.property, value = %value, "asserted");
        Ok(())
    }

    fn retract(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()> {
        let shape = predicate.shape()?;
        match (shape.orientation, value) {
            (Orientation::Forward, _) => self.remove(subject, &shape.property, value),
            (Orientation::Reverse, Term::Entity(other)) => {
                self.remove(other, &shape.property, &Term::Entity(subject.clone()));
            }
            (Orientation::Symmetric, Term::Entity(other)) => {
                self.remove(subject, &shape.property, value);
                self.remove(other, &shape.property, &Term::Entity(subject.clone()));
            }
            // Nothing of this shape can be stored, so there is nothing to retract.
            _ => return Ok(()),
        }
        tracing::trace!(subject = %subject, property = %shape.property, value = %value, "retracted");
        Ok(())
    }

    fn linked_properties(&self, subject: &Iri, family: LinkFamily) -> StoreResult<Vec<Iri>> {
        let Some(stmts) = self.forward.get(subject) else {
            return Ok(Vec::new());
        };
        let mut props: BTreeSet<Iri> = BTreeSet::new();
        for (property, object) in stmts.iter() {
            if vocab::is_reserved(property) {
                continue;
            }
            let matches_family = match family {
                LinkFamily::Object => matches!(object, Term::Entity(_)),
                LinkFamily::Data => matches!(object, Term::Literal(_)),
            };
            if matches_family {
                props.insert(Iri::new(property.as_str())?);
            }
        }
        Ok(props.into_iter().collect())
    }

    fn declare(&self, iri: &Iri, kind: EntityKind) -> StoreResult<()> {
        self.declared.insert(iri.clone(), kind);
        Ok(())
    }

    fn statement_count(&self) -> StoreResult<usize> {
        Ok(self.forward.iter().map(|entry| entry.value().len()).sum())
    }
}
