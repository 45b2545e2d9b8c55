//! Ontology store backends.
//!
//! Descriptors never talk to a concrete backend: they go through the
//! [`OntologyStore`] trait, which speaks subject/predicate/[`Term`] triples.
//!
//! - [`MemoryStore`]: asserted facts in concurrent hashmaps (DashMap)
//! - [`RdfStore`]: RDF/OWL statements in an oxigraph store, in memory or on disk
//! - [`BufferedStore`]: queues changes for another store until the reasoner
//!   is synchronized

pub mod buffered;
pub mod mem;
pub mod rdf;
pub mod vocab;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aspect::AspectKind;
use crate::entity::{DataProperty, EntityKind, Iri, ObjectProperty};
use crate::error::{StoreError, StoreResult};
use crate::term::Term;

pub use buffered::BufferedStore;
pub use mem::MemoryStore;
pub use rdf::RdfStore;

/// What a store query or mutation is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxiomPredicate {
    /// A set-valued aspect of an entity of the given kind.
    Aspect {
        aspect: AspectKind,
        entity: EntityKind,
    },
    /// An object property assertion `subject p individual`.
    ObjectLink(ObjectProperty),
    /// A data property assertion `subject p literal`.
    DataLink(DataProperty),
}

impl fmt::Display for AxiomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxiomPredicate::Aspect { aspect, entity } => write!(f, "{entity} {aspect}"),
            AxiomPredicate::ObjectLink(p) => write!(f, "{p}"),
            AxiomPredicate::DataLink(p) => write!(f, "{p}"),
        }
    }
}

/// RDF file syntaxes for import and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RdfSyntax {
    #[default]
    Turtle,
    RdfXml,
}

impl RdfSyntax {
    /// Guess the syntax from a file extension (`.ttl`, `.rdf`, `.owl`, `.xml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ttl" => Some(RdfSyntax::Turtle),
            "rdf" | "owl" | "xml" => Some(RdfSyntax::RdfXml),
            _ => None,
        }
    }
}

impl fmt::Display for RdfSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RdfSyntax::Turtle => "Turtle",
            RdfSyntax::RdfXml => "RDF/XML",
        })
    }
}

/// Which kind of property assertions [`OntologyStore::linked_properties`]
/// lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkFamily {
    Object,
    Data,
}

/// An external store of asserted ontology facts.
///
/// `query` has no side effects; `assert` and `retract` are idempotent.
/// Implementations are shared behind an `Arc` and must be `Send + Sync`;
/// callers serialize reconciliation per store.
pub trait OntologyStore: Send + Sync {
    /// The values currently asserted for `predicate` on `subject`.
    fn query(&self, subject: &Iri, predicate: &AxiomPredicate) -> StoreResult<Vec<Term>>;

    fn assert(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()>;

    /// Fail exactly when `assert` would reject the value, without storing it.
    fn check(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()> {
        vocab::check_value(subject, predicate, value).map(|_| ())
    }

    fn retract(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()>;

    /// Properties used in object or data assertions on `subject`.
    fn linked_properties(&self, subject: &Iri, family: LinkFamily) -> StoreResult<Vec<Iri>>;

    /// Record that `iri` names an entity of `kind`.
    fn declare(&self, _iri: &Iri, _kind: EntityKind) -> StoreResult<()> {
        Ok(())
    }

    /// Ask the reasoner behind the store to classify. No-op without one.
    fn classify(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Make pending changes visible to the reasoner.
    fn synchronize_reasoner(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Short name for rendering and diagnostics.
    fn resolve_name(&self, iri: &Iri) -> String {
        iri.local_name().to_string()
    }

    /// Number of stored statements.
    fn statement_count(&self) -> StoreResult<usize>;

    /// Add the statements of an RDF file. Returns how many were new.
    fn import_file(&self, _path: &Path, _syntax: RdfSyntax) -> StoreResult<usize> {
        Err(StoreError::NotRdf { operation: "import" })
    }

    /// Write every stored statement to an RDF file.
    fn export_file(&self, _path: &Path, _syntax: RdfSyntax) -> StoreResult<()> {
        Err(StoreError::NotRdf { operation: "export" })
    }
}
