//! The identity of a descriptor: which entity, in which ontology.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::entity::{EntityKind, Iri};
use crate::ontology::OntologyRef;

/// A subject anchored in an ontology handle. Immutable.
///
/// Equality and hashing use the subject, its kind and the store identity;
/// two handles on distinct stores never compare equal even if they share a
/// namespace.
#[derive(Clone)]
pub struct Ground {
    subject: Iri,
    entity: EntityKind,
    ontology: OntologyRef,
}

impl Ground {
    pub fn new(subject: Iri, entity: EntityKind, ontology: OntologyRef) -> Self {
        Self {
            subject,
            entity,
            ontology,
        }
    }

    pub fn subject(&self) -> &Iri {
        &self.subject
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn ontology(&self) -> &OntologyRef {
        &self.ontology
    }

    /// A ground for another subject in the same ontology.
    pub fn sibling(&self, subject: Iri, entity: EntityKind) -> Ground {
        Ground::new(subject, entity, self.ontology.clone())
    }
}

impl PartialEq for Ground {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.entity == other.entity
            && self.ontology.same_handle(&other.ontology)
    }
}

impl Eq for Ground {}

impl Hash for Ground {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
        self.entity.hash(state);
        self.ontology.store_addr().hash(state);
    }
}

impl fmt::Debug for Ground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ground")
            .field("subject", &self.subject.as_str())
            .field("entity", &self.entity)
            .field("ontology", &self.ontology.name())
            .finish()
    }
}

impl fmt::Display for Ground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ontology.resolve_name(&self.subject), self.entity)
    }
}
