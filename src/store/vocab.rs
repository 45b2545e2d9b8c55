//! RDF/OWL vocabulary and the mapping from axiom predicates onto it.
//!
//! Both backends store canonical statements `(s, p, o)`. A predicate's
//! [`Shape`] says which RDF property it uses, from which side the subject is
//! read, and which term shapes belong to it. Two aspects may share a property
//! (`Equivalent` and `Definition` both use `owl:equivalentClass`); their
//! shapes admit disjoint term kinds so they never see each other's values.

use crate::aspect::AspectKind;
use crate::entity::{EntityKind, Iri};
use crate::error::{StoreError, StoreResult};
use crate::term::Term;

use super::AxiomPredicate;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const RDFS_SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
pub const OWL_EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
pub const OWL_EQUIVALENT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#equivalentProperty";
pub const OWL_DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#disjointWith";
pub const OWL_PROPERTY_DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#propertyDisjointWith";
pub const OWL_INVERSE_OF: &str = "http://www.w3.org/2002/07/owl#inverseOf";
pub const OWL_SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";
pub const OWL_DIFFERENT_FROM: &str = "http://www.w3.org/2002/07/owl#differentFrom";

pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";

pub const OWL_RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
pub const OWL_ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
pub const OWL_SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
pub const OWL_ALL_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#allValuesFrom";
pub const OWL_MIN_QUALIFIED: &str = "http://www.w3.org/2002/07/owl#minQualifiedCardinality";
pub const OWL_MAX_QUALIFIED: &str = "http://www.w3.org/2002/07/owl#maxQualifiedCardinality";
pub const OWL_QUALIFIED: &str = "http://www.w3.org/2002/07/owl#qualifiedCardinality";
pub const OWL_ON_CLASS: &str = "http://www.w3.org/2002/07/owl#onClass";
pub const OWL_ON_DATA_RANGE: &str = "http://www.w3.org/2002/07/owl#onDataRange";

/// Which end of the canonical statement holds the queried subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `(subject, p, value)`
    Forward,
    /// `(value, p, subject)`
    Reverse,
    /// Either direction; asserted forward, retracted both ways.
    Symmetric,
}

/// Which term shapes a predicate accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admits {
    Entities,
    Literals,
    Restrictions,
    EntitiesAndRestrictions,
}

impl Admits {
    pub fn accepts(self, term: &Term) -> bool {
        matches!(
            (self, term),
            (Admits::Entities, Term::Entity(_))
                | (Admits::Literals, Term::Literal(_))
                | (Admits::Restrictions, Term::Restriction(_))
                | (Admits::EntitiesAndRestrictions, Term::Entity(_) | Term::Restriction(_))
        )
    }
}

/// How a predicate is laid out in RDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub property: String,
    pub orientation: Orientation,
    pub admits: Admits,
}

impl Shape {
    fn new(property: &str, orientation: Orientation, admits: Admits) -> Self {
        Self {
            property: property.to_string(),
            orientation,
            admits,
        }
    }
}

impl AxiomPredicate {
    /// The RDF layout of this predicate.
    pub fn shape(&self) -> StoreResult<Shape> {
        use AspectKind as A;
        use EntityKind as E;
        use Orientation::*;
        let (aspect, entity) = match self {
            AxiomPredicate::ObjectLink(p) => {
                return Ok(Shape::new(p.iri().as_str(), Forward, Admits::Entities));
            }
            AxiomPredicate::DataLink(p) => {
                return Ok(Shape::new(p.iri().as_str(), Forward, Admits::Literals));
            }
            AxiomPredicate::Aspect { aspect, entity } => (*aspect, *entity),
        };
        let property_like = matches!(entity, E::ObjectProperty | E::DataProperty);
        let shape = match (aspect, entity) {
            (A::Type, E::Individual) => Shape::new(RDF_TYPE, Forward, Admits::Entities),
            (A::Instance, E::Concept) => Shape::new(RDF_TYPE, Reverse, Admits::Entities),
            (A::SameAs, E::Individual) => Shape::new(OWL_SAME_AS, Symmetric, Admits::Entities),
            (A::DifferentFrom, E::Individual) => {
                Shape::new(OWL_DIFFERENT_FROM, Symmetric, Admits::Entities)
            }
            (A::Sub, E::Concept) => Shape::new(RDFS_SUB_CLASS_OF, Reverse, Admits::Entities),
            (A::Super, E::Concept) => Shape::new(RDFS_SUB_CLASS_OF, Forward, Admits::Entities),
            (A::Equivalent, E::Concept) => {
                Shape::new(OWL_EQUIVALENT_CLASS, Symmetric, Admits::Entities)
            }
            (A::Disjoint, E::Concept) => Shape::new(OWL_DISJOINT_WITH, Symmetric, Admits::Entities),
            (A::Definition, E::Concept) => {
                Shape::new(OWL_EQUIVALENT_CLASS, Forward, Admits::Restrictions)
            }
            (A::Sub, _) if property_like => {
                Shape::new(RDFS_SUB_PROPERTY_OF, Reverse, Admits::Entities)
            }
            (A::Super, _) if property_like => {
                Shape::new(RDFS_SUB_PROPERTY_OF, Forward, Admits::Entities)
            }
            (A::Equivalent, _) if property_like => {
                Shape::new(OWL_EQUIVALENT_PROPERTY, Symmetric, Admits::Entities)
            }
            (A::Disjoint, _) if property_like => {
                Shape::new(OWL_PROPERTY_DISJOINT_WITH, Symmetric, Admits::Entities)
            }
            (A::Inverse, E::ObjectProperty) => {
                Shape::new(OWL_INVERSE_OF, Symmetric, Admits::Entities)
            }
            (A::Domain, _) if property_like => {
                Shape::new(RDFS_DOMAIN, Forward, Admits::EntitiesAndRestrictions)
            }
            (A::Range, _) if property_like => {
                Shape::new(RDFS_RANGE, Forward, Admits::EntitiesAndRestrictions)
            }
            _ => {
                return Err(StoreError::Unsupported {
                    subject: entity.to_string(),
                    predicate: aspect.to_string(),
                });
            }
        };
        Ok(shape)
    }
}

/// The predicate's shape, if it can hold `value`.
pub fn check_value(subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<Shape> {
    let shape = predicate.shape()?;
    if !shape.admits.accepts(value) {
        return Err(StoreError::Unsupported {
            subject: subject.to_string(),
            predicate: format!("{predicate} = {value}"),
        });
    }
    Ok(shape)
}

/// Whether an IRI belongs to the RDF, RDFS or OWL vocabulary.
pub fn is_reserved(iri: &str) -> bool {
    iri.starts_with(RDF) || iri.starts_with(RDFS) || iri.starts_with(OWL)
}

/// Entity declarations (`rdf:type owl:Class` and friends) are bookkeeping,
/// not class membership; `Type` queries skip them.
pub fn is_declaration_type(iri: &str) -> bool {
    is_reserved(iri) && iri != OWL_THING
}

/// The `rdf:type` object that declares an entity of `kind`.
pub fn declaration_type(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Individual => OWL_NAMED_INDIVIDUAL,
        EntityKind::Concept => OWL_CLASS,
        EntityKind::ObjectProperty => OWL_OBJECT_PROPERTY,
        EntityKind::DataProperty => OWL_DATATYPE_PROPERTY,
    }
}
