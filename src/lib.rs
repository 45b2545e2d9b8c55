// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # axiom-mirror
//!
//! A typed, in-memory mirror of ontology axioms, kept in step with an external
//! ontology store in both directions.
//!
//! ## Architecture
//!
//! - **Axiom sets** (`axioms`): deduplicated value sets and predicate-keyed link sets
//! - **Protocol** (`sync`): `read` makes the mirror match the store, `write` the reverse
//! - **Descriptors** (`descriptor`): aspects composed per entity through static layouts
//! - **Stores** (`store`): DashMap memory store, oxigraph RDF/OWL store, change buffering
//! - **Audit** (`intent`): every reconciliation returns the changes it made
//!
//! No reasoning happens here: classification is delegated to whatever sits
//! behind the store.
//!
//! ## Library usage
//!
//! ```no_run
//! use axiom_mirror::prelude::*;
//!
//! let onto = OntologyRef::in_memory("home", Iri::new("http://example.org/home#").unwrap());
//! let mut robot = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL).unwrap();
//! robot.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
//! for intent in robot.write_axioms().unwrap() {
//!     println!("{intent}");
//! }
//! ```

pub mod aspect;
pub mod axioms;
pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod entity;
pub mod error;
pub mod ground;
pub mod intent;
pub mod ontology;
pub mod restriction;
pub mod store;
pub mod sync;
pub mod term;

/// The types most callers need.
pub mod prelude {
    pub use crate::aspect::AspectKind;
    pub use crate::axioms::{AxiomSet, SemanticAxiom, SemanticAxiomSet};
    pub use crate::config::{Backend, MirrorConfig};
    pub use crate::descriptor::{
        DEFINITION_CONCEPT, DEFINITION_OBJECT_PROPERTY, DOMAIN_RANGE_OBJECT_PROPERTY, Descriptor,
        FULL_CONCEPT, FULL_DATA_PROPERTY, FULL_INDIVIDUAL, FULL_OBJECT_PROPERTY,
        HIERARCHICAL_CONCEPT, LINK_INDIVIDUAL, TYPE_INDIVIDUAL,
    };
    pub use crate::diagnostics::{CardinalityWarning, DiagnosticSink};
    pub use crate::entity::{Concept, DataProperty, EntityKind, Individual, Iri, Literal, ObjectProperty};
    pub use crate::error::{MirrorError, MirrorResult};
    pub use crate::ground::Ground;
    pub use crate::intent::{Action, Direction, MappingIntent};
    pub use crate::ontology::OntologyRef;
    pub use crate::restriction::{Filler, RestrictedProperty, Restriction};
    pub use crate::store::OntologyStore;
    pub use crate::term::{AxiomValue, Term};
}
