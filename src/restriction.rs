//! Class expressions used by domain, range and class-definition aspects.
//!
//! A [`Restriction`] is either a plain named class or datatype, or a
//! quantified restriction over a property (`hasDoor some DOOR`,
//! `hasWheel min 2 WHEEL`, `hasName only xsd:string`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{Concept, DataProperty, Iri, ObjectProperty, XSD};

/// The property a quantified restriction constrains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RestrictedProperty {
    Object(ObjectProperty),
    Data(DataProperty),
}

impl RestrictedProperty {
    pub fn iri(&self) -> &Iri {
        match self {
            RestrictedProperty::Object(p) => p.iri(),
            RestrictedProperty::Data(p) => p.iri(),
        }
    }
}

/// What a quantified restriction ranges over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Filler {
    Class(Concept),
    Datatype(Iri),
}

impl Filler {
    pub fn iri(&self) -> &Iri {
        match self {
            Filler::Class(c) => c.iri(),
            Filler::Datatype(d) => d,
        }
    }

    /// Pick class or datatype by namespace: XSD and `rdfs:Literal` are datatypes.
    pub(crate) fn classify(iri: Iri) -> Self {
        if is_datatype(&iri) {
            Filler::Datatype(iri)
        } else {
            Filler::Class(Concept::new(iri))
        }
    }
}

/// Quantifier of a property restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quantifier {
    Some,
    Only,
    Min(u32),
    Max(u32),
    Exact(u32),
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Some => write!(f, "some"),
            Quantifier::Only => write!(f, "only"),
            Quantifier::Min(n) => write!(f, "min {n}"),
            Quantifier::Max(n) => write!(f, "max {n}"),
            Quantifier::Exact(n) => write!(f, "exactly {n}"),
        }
    }
}

/// A class expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Restriction {
    /// A named class.
    Class(Concept),
    /// A named datatype (data property ranges).
    Datatype(Iri),
    /// A quantified restriction over a property.
    Quantified {
        quantifier: Quantifier,
        property: RestrictedProperty,
        filler: Filler,
    },
}

impl Restriction {
    pub fn some(property: RestrictedProperty, filler: Filler) -> Self {
        Self::quantified(Quantifier::Some, property, filler)
    }

    pub fn only(property: RestrictedProperty, filler: Filler) -> Self {
        Self::quantified(Quantifier::Only, property, filler)
    }

    pub fn min(cardinality: u32, property: RestrictedProperty, filler: Filler) -> Self {
        Self::quantified(Quantifier::Min(cardinality), property, filler)
    }

    pub fn max(cardinality: u32, property: RestrictedProperty, filler: Filler) -> Self {
        Self::quantified(Quantifier::Max(cardinality), property, filler)
    }

    pub fn exact(cardinality: u32, property: RestrictedProperty, filler: Filler) -> Self {
        Self::quantified(Quantifier::Exact(cardinality), property, filler)
    }

    fn quantified(quantifier: Quantifier, property: RestrictedProperty, filler: Filler) -> Self {
        Restriction::Quantified {
            quantifier,
            property,
            filler,
        }
    }

    /// Whether this is an anonymous (quantified) expression rather than a name.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Restriction::Quantified { .. })
    }

    /// The named class or datatype, for non-anonymous restrictions.
    pub fn named(&self) -> Option<&Iri> {
        match self {
            Restriction::Class(c) => Some(c.iri()),
            Restriction::Datatype(d) => Some(d),
            Restriction::Quantified { .. } => None,
        }
    }

    pub(crate) fn from_named(iri: Iri) -> Self {
        match Filler::classify(iri) {
            Filler::Class(c) => Restriction::Class(c),
            Filler::Datatype(d) => Restriction::Datatype(d),
        }
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restriction::Class(c) => write!(f, "{c}"),
            Restriction::Datatype(d) => write!(f, "{}", d.local_name()),
            Restriction::Quantified {
                quantifier,
                property,
                filler,
            } => write!(
                f,
                "{} {quantifier} {}",
                property.iri().local_name(),
                filler.iri().local_name()
            ),
        }
    }
}

fn is_datatype(iri: &Iri) -> bool {
    iri.as_str().starts_with(XSD)
        || iri.as_str() == "http://www.w3.org/2000/01/rdf-schema#Literal"
}
