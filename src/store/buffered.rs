//! Change buffering in front of another store.
//!
//! Asserts and retracts are queued and only reach the wrapped store on
//! [`synchronize_reasoner`](OntologyStore::synchronize_reasoner). Queries see
//! the wrapped store with the queued changes for the same subject and
//! predicate replayed on top, so a second `write` of unchanged values
//! reports no change even before the flush.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::entity::{EntityKind, Iri};
use crate::error::{StoreError, StoreResult};
use crate::term::Term;

use super::{AxiomPredicate, LinkFamily, OntologyStore, RdfSyntax};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Change {
    Assert(Iri, AxiomPredicate, Term),
    Retract(Iri, AxiomPredicate, Term),
}

/// A store wrapper that defers mutations until the reasoner is synchronized.
#[derive(Debug)]
pub struct BufferedStore<S> {
    inner: S,
    pending: Mutex<Vec<Change>>,
}

impl<S: OntologyStore> BufferedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// The wrapped store, without pending changes.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of queued changes.
    pub fn pending_len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Drop all queued changes without applying them.
    pub fn discard(&self) -> StoreResult<usize> {
        let mut pending = self.lock()?;
        let dropped = pending.len();
        pending.clear();
        Ok(dropped)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Vec<Change>>> {
        self.pending.lock().map_err(|e| StoreError::Buffer {
            message: e.to_string(),
        })
    }
}

impl<S: OntologyStore> OntologyStore for BufferedStore<S> {
    fn query(&self, subject: &Iri, predicate: &AxiomPredicate) -> StoreResult<Vec<Term>> {
        let mut values = self.inner.query(subject, predicate)?;
        for change in self.lock()?.iter() {
            match change {
                Change::Assert(s, p, v) if s == subject && p == predicate => {
                    if !values.contains(v) {
                        values.push(v.clone());
                    }
                }
                Change::Retract(s, p, v) if s == subject && p == predicate => {
                    values.retain(|x| x != v);
                }
                _ => {}
            }
        }
        Ok(values)
    }

    fn assert(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()> {
        // Rejections surface here, not at flush.
        self.inner.check(subject, predicate, value)?;
        self.lock()?
            .push(Change::Assert(subject.clone(), predicate.clone(), value.clone()));
        tracing::trace!(subject = %subject, predicate = %predicate, value = %value, "queued assert");
        Ok(())
    }

    fn retract(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()> {
        predicate.shape()?;
        self.lock()?
            .push(Change::Retract(subject.clone(), predicate.clone(), value.clone()));
        tracing::trace!(subject = %subject, predicate = %predicate, value = %value, "queued retract");
        Ok(())
    }

    fn check(&self, subject: &Iri, predicate: &AxiomPredicate, value: &Term) -> StoreResult<()> {
        self.inner.check(subject, predicate, value)
    }

    fn linked_properties(&self, subject: &Iri, family: LinkFamily) -> StoreResult<Vec<Iri>> {
        let mut props = self.inner.linked_properties(subject, family)?;
        for change in self.lock()?.iter() {
            let Change::Assert(s, p, _) = change else {
                continue;
            };
            let iri = match (p, family) {
                (AxiomPredicate::ObjectLink(p), LinkFamily::Object) => p.iri(),
                (AxiomPredicate::DataLink(p), LinkFamily::Data) => p.iri(),
                _ => continue,
            };
            if s == subject && !props.contains(iri) {
                props.push(iri.clone());
            }
        }
        props.sort();
        Ok(props)
    }

    fn declare(&self, iri: &Iri, kind: EntityKind) -> StoreResult<()> {
        self.inner.declare(iri, kind)
    }

    fn classify(&self) -> StoreResult<()> {
        self.inner.classify()
    }

    /// Apply queued changes in order, then synchronize the wrapped store.
    ///
    /// On failure the changes not yet applied stay queued.
    fn synchronize_reasoner(&self) -> StoreResult<()> {
        let mut pending = self.lock()?;
        let total = pending.len();
        let mut applied = 0;
        let result = pending.iter().try_for_each(|change| {
            match change {
                Change::Assert(s, p, v) => self.inner.assert(s, p, v)?,
                Change::Retract(s, p, v) => self.inner.retract(s, p, v)?,
            }
            applied += 1;
            Ok::<(), StoreError>(())
        });
        pending.drain(..applied);
        drop(pending);
        result?;
        tracing::debug!(changes = total, "flushed buffered changes");
        self.inner.synchronize_reasoner()
    }

    fn resolve_name(&self, iri: &Iri) -> String {
        self.inner.resolve_name(iri)
    }

    fn statement_count(&self) -> StoreResult<usize> {
        self.inner.statement_count()
    }

    /// Imported statements bypass the queue.
    fn import_file(&self, path: &Path, syntax: RdfSyntax) -> StoreResult<usize> {
        self.inner.import_file(path, syntax)
    }

    /// Queued changes are not exported until synchronized.
    fn export_file(&self, path: &Path, syntax: RdfSyntax) -> StoreResult<()> {
        self.inner.export_file(path, syntax)
    }
}
