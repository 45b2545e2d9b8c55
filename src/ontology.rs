//! Shared handles to an ontology store.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::config::{Backend, MirrorConfig};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::entity::{Concept, DataProperty, EntityKind, Individual, Iri, ObjectProperty};
use crate::error::{MirrorResult, ReferenceError, StoreResult};
use crate::ground::Ground;
use crate::store::{BufferedStore, MemoryStore, OntologyStore, RdfStore, RdfSyntax};

/// A cheap-to-clone handle on one ontology: its namespace, its store and
/// where cardinality diagnostics go.
///
/// Two handles are the same ontology iff they share the store allocation.
#[derive(Clone)]
pub struct OntologyRef {
    name: String,
    namespace: Iri,
    store: Arc<dyn OntologyStore>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl OntologyRef {
    /// Wrap a store. Diagnostics go to `tracing`.
    pub fn new(name: &str, namespace: Iri, store: Arc<dyn OntologyStore>) -> Self {
        Self {
            name: name.to_string(),
            namespace,
            store,
            diagnostics: Arc::new(TracingSink),
        }
    }

    /// A handle on a fresh [`MemoryStore`].
    pub fn in_memory(name: &str, namespace: Iri) -> Self {
        Self::new(name, namespace, Arc::new(MemoryStore::new()))
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Build the store a configuration describes.
    pub fn open(config: &MirrorConfig) -> MirrorResult<Self> {
        config.validate()?;
        let store: Arc<dyn OntologyStore> = match (config.backend, config.buffered) {
            (Backend::Memory, buffered) => {
                let mem = if config.strict {
                    MemoryStore::strict()
                } else {
                    MemoryStore::new()
                };
                if buffered {
                    Arc::new(BufferedStore::new(mem))
                } else {
                    Arc::new(mem)
                }
            }
            (Backend::Rdf, buffered) => {
                let rdf = match &config.data_dir {
                    Some(dir) => RdfStore::open(dir)?,
                    None => RdfStore::in_memory()?,
                };
                if buffered {
                    Arc::new(BufferedStore::new(rdf))
                } else {
                    Arc::new(rdf)
                }
            }
        };
        tracing::info!(
            name = %config.name,
            backend = ?config.backend,
            buffered = config.buffered,
            "opened ontology"
        );
        Ok(Self::new(&config.name, config.namespace.clone(), store))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &Iri {
        &self.namespace
    }

    pub fn store(&self) -> &dyn OntologyStore {
        self.store.as_ref()
    }

    pub fn diagnostics(&self) -> &dyn DiagnosticSink {
        self.diagnostics.as_ref()
    }

    /// Resolve a short name against the namespace.
    pub fn iri(&self, name: &str) -> Result<Iri, ReferenceError> {
        Iri::resolve(&self.namespace, name)
    }

    pub fn individual(&self, name: &str) -> Result<Individual, ReferenceError> {
        self.iri(name).map(Individual::new)
    }

    pub fn concept(&self, name: &str) -> Result<Concept, ReferenceError> {
        self.iri(name).map(Concept::new)
    }

    pub fn object_property(&self, name: &str) -> Result<ObjectProperty, ReferenceError> {
        self.iri(name).map(ObjectProperty::new)
    }

    pub fn data_property(&self, name: &str) -> Result<DataProperty, ReferenceError> {
        self.iri(name).map(DataProperty::new)
    }

    /// The ground of a named entity in this ontology.
    pub fn ground(&self, name: &str, kind: EntityKind) -> Result<Ground, ReferenceError> {
        Ok(Ground::new(self.iri(name)?, kind, self.clone()))
    }

    /// Resolve `name` and declare it in the store.
    pub fn declare(&self, name: &str, kind: EntityKind) -> MirrorResult<Iri> {
        let iri = self.iri(name)?;
        self.store.declare(&iri, kind)?;
        Ok(iri)
    }

    pub fn classify(&self) -> StoreResult<()> {
        self.store.classify()
    }

    pub fn synchronize_reasoner(&self) -> StoreResult<()> {
        self.store.synchronize_reasoner()
    }

    /// Load an RDF file into the store. Needs the RDF backend.
    pub fn import(&self, path: &Path, syntax: RdfSyntax) -> StoreResult<usize> {
        self.store.import_file(path, syntax)
    }

    /// Save the store as an RDF file. Needs the RDF backend.
    pub fn export(&self, path: &Path, syntax: RdfSyntax) -> StoreResult<()> {
        self.store.export_file(path, syntax)
    }

    /// Short name of an IRI, as the store renders it.
    pub fn resolve_name(&self, iri: &Iri) -> String {
        self.store.resolve_name(iri)
    }

    /// Whether both handles share one store.
    pub fn same_handle(&self, other: &OntologyRef) -> bool {
        self.store_addr() == other.store_addr()
    }

    /// Address of the shared store, for identity hashing.
    pub(crate) fn store_addr(&self) -> usize {
        Arc::as_ptr(&self.store) as *const () as usize
    }
}

impl fmt::Debug for OntologyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OntologyRef")
            .field("name", &self.name)
            .field("namespace", &self.namespace.as_str())
            .field("store", &format_args!("{:#x}", self.store_addr()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns() -> Iri {
        Iri::new("http://example.org/home#").unwrap()
    }

    #[test]
    fn clones_share_the_store() {
        let a = OntologyRef::in_memory("home", ns());
        let b = a.clone();
        let c = OntologyRef::in_memory("home", ns());
        assert!(a.same_handle(&b));
        assert!(!a.same_handle(&c));
    }

    #[test]
    fn short_names_resolve() {
        let onto = OntologyRef::in_memory("home", ns());
        assert_eq!(
            onto.individual("Robot1").unwrap().iri().as_str(),
            "http://example.org/home#Robot1"
        );
        assert!(onto.concept("two words").is_err());
    }

    #[test]
    fn open_memory_config() {
        let mut config = MirrorConfig::new("home", ns());
        config.strict = true;
        let onto = OntologyRef::open(&config).unwrap();
        assert_eq!(onto.name(), "home");
        onto.declare("Robot1", EntityKind::Individual).unwrap();
    }

    #[test]
    fn open_rdf_config() {
        let mut config = MirrorConfig::new("home", ns());
        config.backend = Backend::Rdf;
        config.buffered = true;
        let onto = OntologyRef::open(&config).unwrap();
        onto.declare("ROBOT", EntityKind::Concept).unwrap();
        onto.synchronize_reasoner().unwrap();
        assert_eq!(onto.store().statement_count().unwrap(), 1);
    }
}
