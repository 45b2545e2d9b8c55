//! Store-boundary values and the typed/untyped bridge.
//!
//! Stores speak [`Term`]s; descriptors hold typed values. [`AxiomValue`]
//! converts between the two. A term that a value type cannot represent
//! (a literal seen through a class aspect, an anonymous restriction seen
//! through a named-class aspect) converts to `None` and is ignored by
//! reconciliation.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::entity::{Concept, DataProperty, EntityKind, Individual, Iri, Literal, ObjectProperty};
use crate::restriction::Restriction;

/// An untyped value as seen by an ontology store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Entity(Iri),
    Literal(Literal),
    Restriction(Restriction),
}

impl Term {
    pub fn as_entity(&self) -> Option<&Iri> {
        match self {
            Term::Entity(iri) => Some(iri),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Entity(iri) => f.write_str(iri.local_name()),
            Term::Literal(lit) => write!(f, "{lit}"),
            Term::Restriction(r) => write!(f, "{r}"),
        }
    }
}

/// A typed value that can live in an [`AxiomSet`](crate::axioms::AxiomSet)
/// and cross the store boundary.
///
/// `Ord` gives sets a deterministic iteration order, which in turn fixes the
/// order of emitted intents and the choice made by single-value accessors.
pub trait AxiomValue: Clone + Eq + Ord + Hash + fmt::Debug {
    /// Lower to a store term.
    fn to_term(&self) -> Term;

    /// Lift from a store term, or `None` if the term has another shape.
    fn from_term(term: &Term) -> Option<Self>;

    /// Short human-readable name.
    fn display_name(&self) -> String;
}

/// Named entities can anchor a new descriptor.
pub trait NamedValue: AxiomValue {
    const KIND: EntityKind;

    fn iri(&self) -> &Iri;
}

macro_rules! entity_value {
    ($($name:ident),* $(,)?) => {
        $(
            impl AxiomValue for $name {
                fn to_term(&self) -> Term {
                    Term::Entity(self.iri().clone())
                }

                fn from_term(term: &Term) -> Option<Self> {
                    term.as_entity().cloned().map($name::new)
                }

                fn display_name(&self) -> String {
                    self.iri().local_name().to_string()
                }
            }

            impl NamedValue for $name {
                const KIND: EntityKind = EntityKind::$name;

                fn iri(&self) -> &Iri {
                    $name::iri(self)
                }
            }
        )*
    };
}

entity_value!(Individual, Concept, ObjectProperty, DataProperty);

impl AxiomValue for Literal {
    fn to_term(&self) -> Term {
        Term::Literal(self.clone())
    }

    fn from_term(term: &Term) -> Option<Self> {
        match term {
            Term::Literal(lit) => Some(lit.clone()),
            _ => None,
        }
    }

    fn display_name(&self) -> String {
        self.lexical().to_string()
    }
}

impl AxiomValue for Restriction {
    /// Named classes and datatypes lower to plain entity terms so they match
    /// what a store reports for `rdfs:domain Room`.
    fn to_term(&self) -> Term {
        match self.named() {
            Some(iri) => Term::Entity(iri.clone()),
            None => Term::Restriction(self.clone()),
        }
    }

    fn from_term(term: &Term) -> Option<Self> {
        match term {
            Term::Entity(iri) => Some(Restriction::from_named(iri.clone())),
            Term::Restriction(r) => Some(r.clone()),
            Term::Literal(_) => None,
        }
    }

    fn display_name(&self) -> String {
        self.to_string()
    }
}

impl AxiomValue for Term {
    fn to_term(&self) -> Term {
        self.clone()
    }

    fn from_term(term: &Term) -> Option<Self> {
        Some(term.clone())
    }

    fn display_name(&self) -> String {
        self.to_string()
    }
}
