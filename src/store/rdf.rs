//! RDF/OWL ontology store backed by oxigraph.
//!
//! Aspects map onto the OWL 2 RDF vocabulary (see [`vocab`]); anonymous
//! restrictions become `owl:Restriction` blank nodes. The store lives in
//! memory or in a RocksDB directory that survives restarts.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use oxigraph::io::RdfFormat;

use oxigraph::model::{
    BlankNode, GraphName, GraphNameRef, Literal as RdfLiteral, NamedNode, NamedOrBlankNode, Quad,
    Term as RdfTerm,
};
use oxigraph::store::Store;

use crate::entity::{DataProperty, EntityKind, Iri, Literal, ObjectProperty};
use crate::error::{ReferenceError, StoreError, StoreResult};
use crate::restriction::{Filler, Quantifier, RestrictedProperty, Restriction};
use crate::term::Term;

use super::vocab::{self, Orientation};
use super::{AxiomPredicate, LinkFamily, OntologyStore, RdfSyntax};

/// oxigraph-backed ontology store.
pub struct RdfStore {
    store: Store,
}

fn backend(context: &str) -> impl FnOnce(oxigraph::store::StorageError) -> StoreError + '_ {
    move |e| StoreError::Backend {
        message: format!("{context}: {e}"),
    }
}

fn file_error(operation: &'static str, path: &Path, e: impl std::fmt::Display) -> StoreError {
    StoreError::File {
        operation,
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn rdf_format(syntax: RdfSyntax) -> RdfFormat {
    match syntax {
        RdfSyntax::Turtle => RdfFormat::Turtle,
        RdfSyntax::RdfXml => RdfFormat::RdfXml,
    }
}

fn node(iri: &str) -> NamedNode {
    NamedNode::new_unchecked(iri)
}

fn quad(subject: impl Into<NamedOrBlankNode>, property: &str, object: impl Into<RdfTerm>) -> Quad {
    Quad::new(subject, node(property), object, GraphName::DefaultGraph)
}

impl RdfStore {
    /// Create a new in-memory store (no persistence).
    pub fn in_memory() -> StoreResult<Self> {
        let store = Store::new().map_err(backend("failed to create oxigraph store"))?;
        Ok(Self { store })
    }

    /// Open or create a persistent store at the given directory.
    pub fn open(path: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(path).map_err(|e| StoreError::Backend {
            message: format!("failed to create oxigraph directory {}: {e}", path.display()),
        })?;
        let store = Store::open(path).map_err(|e| StoreError::Backend {
            message: format!("failed to open oxigraph store at {}: {e}", path.display()),
        })?;
        tracing::debug!(path = %path.display(), "opened RDF store");
        Ok(Self { store })
    }

    /// Load an RDF file into the default graph. Returns how many statements
    /// were new.
    pub fn load(&self, path: &Path, syntax: RdfSyntax) -> StoreResult<usize> {
        let file = File::open(path).map_err(|e| file_error("import", path, e))?;
        let before = self.statement_count()?;
        self.store
            .load_from_reader(rdf_format(syntax), BufReader::new(file))
            .map_err(|e| file_error("import", path, e))?;
        let added = self.statement_count()?.saturating_sub(before);
        tracing::info!(path = %path.display(), %syntax, added, "imported RDF file");
        Ok(added)
    }

    /// Write the default graph to an RDF file, replacing it.
    pub fn dump(&self, path: &Path, syntax: RdfSyntax) -> StoreResult<()> {
        let file = File::create(path).map_err(|e| file_error("export", path, e))?;
        let mut writer = self
            .store
            .dump_graph_to_writer(GraphNameRef::DefaultGraph, rdf_format(syntax), BufWriter::new(file))
            .map_err(|e| file_error("export", path, e))?;
        writer.flush().map_err(|e| file_error("export", path, e))?;
        tracing::info!(path = %path.display(), %syntax, "exported RDF file");
        Ok(())
    }

    /// Get internal store reference (for advanced oxigraph operations).
    pub fn store(&self) -> &Store {
        &self.store
    }

    fn pattern(
        &self,
        subject: Option<&NamedOrBlankNode>,
        property: Option<&NamedNode>,
        object: Option<&RdfTerm>,
    ) -> StoreResult<Vec<Quad>> {
        self.store
            .quads_for_pattern(
                subject.map(|s| s.as_ref()),
                property.map(|p| p.as_ref()),
                object.map(|o| o.as_ref()),
                Some(GraphNameRef::DefaultGraph),
            )
            .collect::<Result<Vec<_>, _>>()
            .map_err(backend("pattern query failed"))
    }

    fn objects(&self, subject: &NamedOrBlankNode, property: &str) -> StoreResult<Vec<RdfTerm>> {
        Ok(self
            .pattern(Some(subject), Some(&node(property)), None)?
            .into_iter()
            .map(|q| q.object)
            .collect())
    }

    fn insert(&self, q: &Quad) -> StoreResult<()> {
        self.store.insert(q).map_err(backend("insert failed"))?;
        Ok(())
    }

    fn delete(&self, q: &Quad) -> StoreResult<()> {
        self.store.remove(q).map_err(backend("remove failed"))?;
        Ok(())
    }

    fn lift(&self, term: &RdfTerm) -> StoreResult<Option<Term>> {
        match term {
            RdfTerm::NamedNode(n) => Ok(Some(Term::Entity(Iri::new(n.as_str())?))),
            RdfTerm::Literal(l) => Ok(Some(Term::Literal(lift_literal(l)?))),
            RdfTerm::BlankNode(b) => Ok(self.decode_restriction(b)?.map(Term::Restriction)),
            #[allow(unreachable_patterns)]
            _ => Ok(None),
        }
    }

    fn decode_restriction(&self, blank: &BlankNode) -> StoreResult<Option<Restriction>> {
        let subject = NamedOrBlankNode::from(blank.clone());
        let mut on_property = None;
        let mut quantifier = None;
        let mut filler: Option<Filler> = None;
        let mut is_restriction = false;

        for q in self.pattern(Some(&subject), None, None)? {
            let predicate = q.predicate.as_str();
            let named = match &q.object {
                RdfTerm::NamedNode(n) => Some(Iri::new(n.as_str())?),
                _ => None,
            };
            let count = match &q.object {
                RdfTerm::Literal(l) => l.value().parse::<u32>().ok(),
                _ => None,
            };
            match predicate {
                vocab::RDF_TYPE => {
                    is_restriction |= named.as_ref().is_some_and(|i| i.as_str() == vocab::OWL_RESTRICTION);
                }
                vocab::OWL_ON_PROPERTY => on_property = named,
                vocab::OWL_SOME_VALUES_FROM => {
                    quantifier = Some(Quantifier::Some);
                    filler = named.map(Filler::classify);
                }
                vocab::OWL_ALL_VALUES_FROM => {
                    quantifier = Some(Quantifier::Only);
                    filler = named.map(Filler::classify);
                }
                vocab::OWL_MIN_QUALIFIED => quantifier = count.map(Quantifier::Min),
                vocab::OWL_MAX_QUALIFIED => quantifier = count.map(Quantifier::Max),
                vocab::OWL_QUALIFIED => quantifier = count.map(Quantifier::Exact),
                vocab::OWL_ON_CLASS => filler = named.map(|i| Filler::Class(i.into())),
                vocab::OWL_ON_DATA_RANGE => filler = named.map(Filler::Datatype),
                _ => {}
            }
        }

        let (true, Some(property), Some(quantifier), Some(filler)) =
            (is_restriction, on_property, quantifier, filler)
        else {
            tracing::trace!(node = %blank, "skipping blank node that is not a supported restriction");
            return Ok(None);
        };
        let property = match filler {
            Filler::Datatype(_) => RestrictedProperty::Data(DataProperty::new(property)),
            Filler::Class(_) => RestrictedProperty::Object(ObjectProperty::new(property)),
        };
        Ok(Some(Restriction::Quantified {
            quantifier,
            property,
            filler,
        }))
    }

    fn encode_restriction(&self, restriction: &Restriction) -> StoreResult<BlankNode> {
        let Restriction::Quantified {
            quantifier,
            property,
            filler,
        } = restriction
        else {
            return Err(StoreError::Unsupported {
                subject: restriction.to_string(),
                predicate: "owl:Restriction".to_string(),
            });
        };
        let blank = BlankNode::default();
        let filler_node = node(filler.iri().as_str());
        let on_filler = match filler {
            Filler::Class(_) => vocab::OWL_ON_CLASS,
            Filler::Datatype(_) => vocab::OWL_ON_DATA_RANGE,
        };
        let mut quads = vec![
            quad(blank.clone(), vocab::RDF_TYPE, node(vocab::OWL_RESTRICTION)),
            quad(blank.clone(), vocab::OWL_ON_PROPERTY, node(property.iri().as_str())),
        ];
        let cardinality = |n: &u32| {
            RdfLiteral::new_typed_literal(
                n.to_string(),
                node("http://www.w3.org/2001/XMLSchema#nonNegativeInteger"),
            )
        };
        match quantifier {
            Quantifier::Some => quads.push(quad(blank.clone(), vocab::OWL_SOME_VALUES_FROM, filler_node)),
            Quantifier::Only => quads.push(quad(blank.clone(), vocab::OWL_ALL_VALUES_FROM, filler_node)),
            Quantifier::Min(n) | Quantifier::Max(n) | Quantifier::Exact(n) => {
                let card = match quantifier {
                    Quantifier::Min(_) => vocab::OWL_MIN_QUALIFIED,
                    Quantifier::Max(_) => vocab::OWL_MAX_QUALIFIED,
                    _ => vocab::OWL_QUALIFIED,
                };
                quads.push(quad(blank.clone(), card, cardinality(n)));
                quads.push(quad(blank.clone(), on_filler, filler_node));
            }
        }
        for q in &quads {
            self.insert(q)?;
        }
        Ok(blank)
    }

    /// Blank nodes under `(subject, property)` that decode to `restriction`.
    fn find_restriction(
        &self,
        subject: &NamedOrBlankNode,
        property: &str,
        restriction: &Restriction,
    ) -> StoreResult<Vec<BlankNode>> {
        let mut found = Vec::new();
        for object in self.objects(subject, property)? {
            if let RdfTerm::BlankNode(b) = object {
                if self.decode_restriction(&b)?.as_ref() == Some(restriction) {
                    found.push(b);
                }
            }
        }
        Ok(found)
    }

    fn drop_blank(&self, blank: &BlankNode) -> StoreResult<()> {
        let subject = NamedOrBlankNode::from(blank.clone());
        for q in self.pattern(Some(&subject), None, None)? {
            self.delete(&q)?;
        }
        Ok(())
    }
}

fn lower_literal(literal: &Literal) -> StoreResult<RdfLiteral> {
    match literal.language() {
        Some(lang) => RdfLiteral::new_language_tagged_literal(literal.lexical(), lang).map_err(|e| {
            StoreError::from(ReferenceError::InvalidLiteral {
                lexical: literal.lexical().to_string(),
                reason: e.to_string(),
            })
        }),
        None => Ok(RdfLiteral::new_typed_literal(
            literal.lexical(),
            node(literal.datatype().as_str()),
        )),
    }
}

fn lift_literal(literal: &RdfLiteral) -> StoreResult<Literal> {
    Ok(match literal.language() {
        Some(lang) => Literal::lang(literal.value(), lang),
        None => Literal::typed(literal.value(), Iri::new(literal.datatype().as_str())?),
    })
}

fn lower_plain(value: &Term) -> StoreResult<Option<RdfTerm>> {
    Ok(match value {
        Term::Entity(iri) => Some(node(iri.as_str()).into()),
        Term::Literal(lit) => Some(lower_literal(lit)?.into()),
        Term::Restriction(_) => None,
    })
}

impl OntologyStore for RdfStore {
    fn query(&self, subject: &Iri, predicate: &AxiomPredicate) -> StoreResult<Vec<Term>> {
        let shape = predicate.shape()?;
        let me = NamedOrBlankNode::from(node(subject.as_str()));
        let mut raw: Vec<RdfTerm> = Vec::new();
        if matches!(shape.orientation, Orientation::Forward | Orientation::Symmetric) {
            raw.extend(self.objects(&me, &shape.property)?);
        }
        if matches!(shape.orientation, Orientation::Reverse | Orientation::Symmetric) {
            let target = RdfTerm::from(node(subject.as_str()));
            for q in self.pattern(None, Some(&node(&shape.property)), Some(&target))? {
                raw.push(RdfTerm::from(q.subject));
            }
        }

        let type_query = shape.property == vocab::RDF_TYPE;
        let mut out = Vec::new();
        for term in &raw {
            let Some(value) = self.lift(term)? else {
                continue;
            };
            if !shape.admits.accepts(&value) {
                continue;
            }
            if type_query
                && value
                    .as_entity()
                    .is_some_and(|i| vocab::is_declaration_type(i.as_str()))
            {
                continue;
            }
            if !out.contains(&value) {
                out.push(value);
            }
        }
        out.sort();
        Ok(out)
    }

    fn check(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()> {
        vocab::check_value(subject, predicate, value)?;
        if let Term::Literal(lit) = value {
            lower_literal(lit)?;
        }
        Ok(())
    }

    fn assert(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()> {
        let shape = vocab::check_value(subject, predicate, value)?;
        let me = node(subject.as_str());
        if let Term::Restriction(r) = value {
            if r.is_anonymous() {
                let subject_node = NamedOrBlankNode::from(me.clone());
                if self.find_restriction(&subject_node, &shape.property, r)?.is_empty() {
                    let blank = self.encode_restriction(r)?;
                    self.insert(&quad(me, &shape.property, blank))?;
                }
                tracing::trace!(subject = %subject, property = %shape.property, value = %value, "asserted restriction");
                return Ok(());
            }
        }
        let Some(object) = lower_plain(&plain(value))? else {
            return Ok(());
        };
        match shape.orientation {
            Orientation::Forward => self.insert(&quad(me, &shape.property, object))?,
            Orientation::Reverse | Orientation::Symmetric => {
                let RdfTerm::NamedNode(other) = object else {
                    return Err(StoreError::Unsupported {
                        subject: subject.to_string(),
                        predicate: predicate.to_string(),
                    });
                };
                if shape.orientation == Orientation::Reverse {
                    self.insert(&quad(other, &shape.property, me))?;
                } else {
                    let back = quad(other.clone(), &shape.property, me.clone());
                    let exists = self.store.contains(&back).map_err(backend("lookup failed"))?;
                    if !exists {
                        self.insert(&quad(me, &shape.property, other))?;
                    }
                }
            }
        }
        tracing::trace!(subject = %subject, property = %shape.property, value = %value, "asserted");
        Ok(())
    }

    fn retract(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()> {
        let shape = predicate.shape()?;
        let me = node(subject.as_str());
        if let Term::Restriction(r) = value {
            if r.is_anonymous() {
                let subject_node = NamedOrBlankNode::from(me.clone());
                for blank in self.find_restriction(&subject_node, &shape.property, r)? {
                    self.delete(&quad(me.clone(), &shape.property, blank.clone()))?;
                    self.drop_blank(&blank)?;
                }
                return Ok(());
            }
        }
        let Some(object) = lower_plain(&plain(value))? else {
            return Ok(());
        };
        match (shape.orientation, object) {
            (Orientation::Forward, object) => self.delete(&quad(me, &shape.property, object))?,
            (Orientation::Reverse, RdfTerm::NamedNode(other)) => {
                self.delete(&quad(other, &shape.property, me))?;
            }
            (Orientation::Symmetric, RdfTerm::NamedNode(other)) => {
                self.delete(&quad(me.clone(), &shape.property, other.clone()))?;
                self.delete(&quad(other, &shape.property, me))?;
            }
            _ => return Ok(()),
        }
        tracing::trace!(subject = %subject, property = %shape.property, value = %value, "retracted");
        Ok(())
    }

    fn linked_properties(&self, subject: &Iri, family: LinkFamily) -> StoreResult<Vec<Iri>> {
        let me = NamedOrBlankNode::from(node(subject.as_str()));
        let mut props: Vec<Iri> = Vec::new();
        for q in self.pattern(Some(&me), None, None)? {
            if vocab::is_reserved(q.predicate.as_str()) {
                continue;
            }
            let matches_family = match family {
                LinkFamily::Object => matches!(q.object, RdfTerm::NamedNode(_)),
                LinkFamily::Data => matches!(q.object, RdfTerm::Literal(_)),
            };
            if matches_family {
                let iri = Iri::new(q.predicate.as_str())?;
                if !props.contains(&iri) {
                    props.push(iri);
                }
            }
        }
        props.sort();
        Ok(props)
    }

    fn declare(&self, iri: &Iri, kind: EntityKind) -> StoreResult<()> {
        self.insert(&quad(
            node(iri.as_str()),
            vocab::RDF_TYPE,
            node(vocab::declaration_type(kind)),
        ))
    }

    fn statement_count(&self) -> StoreResult<usize> {
        self.store.len().map_err(backend("count failed"))
    }

    fn import_file(&self, path: &Path, syntax: RdfSyntax) -> StoreResult<usize> {
        self.load(path, syntax)
    }

    fn export_file(&self, path: &Path, syntax: RdfSyntax) -> StoreResult<()> {
        self.dump(path, syntax)
    }
}

/// Named restrictions are stored as plain entities.
fn plain(value: &Term) -> Term {
    match value {
        Term::Restriction(r) => match r.named() {
            Some(iri) => Term::Entity(iri.clone()),
            None => value.clone(),
        },
        other => other.clone(),
    }
}

impl std::fmt::Debug for RdfStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdfStore").finish()
    }
}
