//! The read/write reconciliation protocol.
//!
//! Every aspect synchronizes the same way. For a local set `L` and the
//! store's values `S`:
//!
//! - **read** makes `L` equal `S`: adds `S − L`, removes `L − S`
//! - **write** makes `S` equal `L`: asserts `L − S`, retracts `S − L`
//!
//! Each emits one intent per changed value (adds first, both in value order)
//! or a single `NoChange` intent for the aspect. Both are idempotent while
//! nobody else touches the store. Store values the aspect's value type cannot
//! represent are ignored by both directions.
//!
//! Store errors propagate unchanged. A failed write may have applied a prefix
//! of its changes; nothing is rolled back.

use std::collections::BTreeSet;

use crate::aspect::AspectKind;
use crate::axioms::{AxiomSet, SemanticAxiomSet};
use crate::entity::{DataProperty, Individual, Iri, Literal, ObjectProperty};
use crate::error::{DescriptorError, MirrorResult};
use crate::ground::Ground;
use crate::intent::{Action, Direction, MappingIntent};
use crate::store::{AxiomPredicate, LinkFamily, OntologyStore};
use crate::term::{AxiomValue, Term};

/// A property that keys link sets.
pub trait LinkProperty: AxiomValue {
    const FAMILY: LinkFamily;

    fn from_iri(iri: Iri) -> Self;

    fn link_iri(&self) -> &Iri;

    fn link_predicate(&self) -> AxiomPredicate;
}

impl LinkProperty for ObjectProperty {
    const FAMILY: LinkFamily = LinkFamily::Object;

    fn from_iri(iri: Iri) -> Self {
        ObjectProperty::new(iri)
    }

    fn link_iri(&self) -> &Iri {
        self.iri()
    }

    fn link_predicate(&self) -> AxiomPredicate {
        AxiomPredicate::ObjectLink(self.clone())
    }
}

impl LinkProperty for DataProperty {
    const FAMILY: LinkFamily = LinkFamily::Data;

    fn from_iri(iri: Iri) -> Self {
        DataProperty::new(iri)
    }

    fn link_iri(&self) -> &Iri {
        self.iri()
    }

    fn link_predicate(&self) -> AxiomPredicate {
        AxiomPredicate::DataLink(self.clone())
    }
}

/// Values the store holds that `V` can represent.
fn observe<V: AxiomValue>(
    store: &dyn OntologyStore,
    subject: &Iri,
    predicate: &AxiomPredicate,
) -> MirrorResult<AxiomSet<V>> {
    Ok(store
        .query(subject, predicate)?
        .iter()
        .filter_map(V::from_term)
        .collect())
}

fn aspect_predicate(aspect: AspectKind, ground: &Ground) -> MirrorResult<AxiomPredicate> {
    aspect.predicate(ground.entity()).ok_or_else(|| {
        DescriptorError::UnsupportedAspect {
            aspect: aspect.to_string(),
            entity: ground.entity().to_string(),
        }
        .into()
    })
}

/// Fail if the aspect's store layout cannot hold `term`.
pub(crate) fn admit(aspect: AspectKind, predicate: &AxiomPredicate, term: &Term) -> MirrorResult<()> {
    if predicate.shape()?.admits.accepts(term) {
        return Ok(());
    }
    Err(DescriptorError::InvalidValue {
        aspect: aspect.to_string(),
        value: term.to_string(),
    }
    .into())
}

/// Make `local` equal the store's values for one aspect.
pub fn read<V: AxiomValue>(
    aspect: AspectKind,
    ground: &Ground,
    local: &mut AxiomSet<V>,
) -> MirrorResult<Vec<MappingIntent>> {
    let predicate = aspect_predicate(aspect, ground)?;
    let store = ground.ontology().store();
    let observed: AxiomSet<V> = observe(store, ground.subject(), &predicate)?;

    let mut intents = Vec::new();
    read_values(aspect, ground.subject(), None, &observed, local, &mut intents);
    finish(Direction::Read, aspect, ground, intents)
}

/// Make the store's values for one aspect equal `local`.
pub fn write<V: AxiomValue>(
    aspect: AspectKind,
    ground: &Ground,
    local: &AxiomSet<V>,
) -> MirrorResult<Vec<MappingIntent>> {
    let predicate = aspect_predicate(aspect, ground)?;
    let store = ground.ontology().store();
    let observed: AxiomSet<V> = observe(store, ground.subject(), &predicate)?;

    let mut intents = Vec::new();
    write_values(aspect, ground, &predicate, None, &observed, local, &mut intents)?;
    finish(Direction::Write, aspect, ground, intents)
}

/// Read every link predicate known locally or in the store.
///
/// Predicates whose value set ends up empty are dropped from `local`, and
/// their singleton marker goes with them: a predicate that comes back on a
/// later read is an ordinary multi-valued entry until `set_*_link` marks it
/// again. Entries that keep at least one value keep their marker.
pub fn read_links<P: LinkProperty, V: AxiomValue>(
    aspect: AspectKind,
    ground: &Ground,
    local: &mut SemanticAxiomSet<P, V>,
) -> MirrorResult<Vec<MappingIntent>> {
    let store = ground.ontology().store();
    let mut intents = Vec::new();
    for property in link_predicates::<P, V>(ground, local)? {
        let observed: AxiomSet<V> = observe(store, ground.subject(), &property.link_predicate())?;
        let values = local.values_of_mut(&property);
        read_values(
            aspect,
            ground.subject(),
            Some(property.link_iri()),
            &observed,
            values,
            &mut intents,
        );
        if values.is_empty() {
            local.remove(&property);
        }
    }
    finish(Direction::Read, aspect, ground, intents)
}

/// Write every link predicate known locally or in the store.
///
/// A predicate present in the store but absent locally has all its values
/// retracted.
pub fn write_links<P: LinkProperty, V: AxiomValue>(
    aspect: AspectKind,
    ground: &Ground,
    local: &SemanticAxiomSet<P, V>,
) -> MirrorResult<Vec<MappingIntent>> {
    let store = ground.ontology().store();
    let mut intents = Vec::new();
    for property in link_predicates::<P, V>(ground, local)? {
        let predicate = property.link_predicate();
        let observed: AxiomSet<V> = observe(store, ground.subject(), &predicate)?;
        let wanted = local.values_of(&property);
        write_values(
            aspect,
            ground,
            &predicate,
            Some(property.link_iri()),
            &observed,
            &wanted,
            &mut intents,
        )?;
    }
    finish(Direction::Write, aspect, ground, intents)
}

fn link_predicates<P: LinkProperty, V: AxiomValue>(
    ground: &Ground,
    local: &SemanticAxiomSet<P, V>,
) -> MirrorResult<BTreeSet<P>> {
    let mut predicates: BTreeSet<P> = local.predicates().into_iter().collect();
    let stored = ground
        .ontology()
        .store()
        .linked_properties(ground.subject(), P::FAMILY)?;
    predicates.extend(stored.into_iter().map(P::from_iri));
    Ok(predicates)
}

fn read_values<V: AxiomValue>(
    aspect: AspectKind,
    subject: &Iri,
    predicate: Option<&Iri>,
    observed: &AxiomSet<V>,
    local: &mut AxiomSet<V>,
    intents: &mut Vec<MappingIntent>,
) {
    let added: Vec<V> = observed.missing_from(local).cloned().collect();
    let removed: Vec<V> = local.missing_from(observed).cloned().collect();
    for value in added {
        intents.push(MappingIntent::change(
            Direction::Read,
            Action::Add,
            aspect,
            subject,
            predicate,
            value.to_term(),
        ));
        local.add(value);
    }
    for value in removed {
        local.remove(&value);
        intents.push(MappingIntent::change(
            Direction::Read,
            Action::Remove,
            aspect,
            subject,
            predicate,
            value.to_term(),
        ));
    }
}

fn write_values<V: AxiomValue>(
    aspect: AspectKind,
    ground: &Ground,
    store_predicate: &AxiomPredicate,
    predicate: Option<&Iri>,
    observed: &AxiomSet<V>,
    local: &AxiomSet<V>,
    intents: &mut Vec<MappingIntent>,
) -> MirrorResult<()> {
    let store = ground.ontology().store();
    let subject = ground.subject();
    // Nothing is applied unless every new value fits.
    for value in local.missing_from(observed) {
        admit(aspect, store_predicate, &value.to_term())?;
    }
    for value in local.missing_from(observed) {
        let term = value.to_term();
        store.assert(subject, store_predicate, &term)?;
        intents.push(MappingIntent::change(
            Direction::Write,
            Action::Add,
            aspect,
            subject,
            predicate,
            term,
        ));
    }
    for value in observed.missing_from(local) {
        let term = value.to_term();
        store.retract(subject, store_predicate, &term)?;
        intents.push(MappingIntent::change(
            Direction::Write,
            Action::Remove,
            aspect,
            subject,
            predicate,
            term,
        ));
    }
    Ok(())
}

fn finish(
    direction: Direction,
    aspect: AspectKind,
    ground: &Ground,
    mut intents: Vec<MappingIntent>,
) -> MirrorResult<Vec<MappingIntent>> {
    let changed = intents.len();
    if intents.is_empty() {
        intents.push(MappingIntent::no_change(direction, aspect, ground.subject()));
    }
    tracing::debug!(
        subject = %ground.subject(),
        aspect = %aspect,
        direction = ?direction,
        changed,
        "reconciled aspect"
    );
    Ok(intents)
}

/// An individual's data property assertions.
pub type DataLinks = SemanticAxiomSet<DataProperty, Literal>;

/// An individual's object property assertions.
pub type ObjectLinks = SemanticAxiomSet<ObjectProperty, Individual>;
