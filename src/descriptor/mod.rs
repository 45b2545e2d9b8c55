//! Descriptors: typed, composable mirrors of one entity.
//!
//! A [`Descriptor`] is anchored at a [`Ground`] and holds one local value set
//! per aspect of its [`DescriptorLayout`]. `read_axioms` and `write_axioms`
//! reconcile every aspect in layout order; `build` derives descriptors for
//! the entities one aspect refers to.
//!
//! ```no_run
//! # use axiom_mirror::prelude::*;
//! # fn demo() -> MirrorResult<()> {
//! let onto = OntologyRef::in_memory("home", Iri::new("http://example.org/home#")?);
//! let mut robot = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL)?;
//! robot.add_object_link(&onto.object_property("isIn")?, onto.individual("Corridor1")?)?;
//! robot.write_axioms()?;
//! # Ok(())
//! # }
//! ```

pub mod layout;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::aspect::{AspectKind, ValueDomain};
use crate::axioms::{AxiomSet, SemanticAxiomSet};
use crate::entity::{Concept, DataProperty, EntityKind, Individual, Iri, Literal, ObjectProperty};
use crate::error::{DescriptorError, MirrorResult};
use crate::ground::Ground;
use crate::intent::MappingIntent;
use crate::ontology::OntologyRef;
use crate::restriction::Restriction;
use crate::sync;
use crate::term::AxiomValue;

pub use layout::{
    DEFINITION_CONCEPT, DEFINITION_OBJECT_PROPERTY, DOMAIN_RANGE_OBJECT_PROPERTY, DescriptorLayout,
    FULL_CONCEPT, FULL_DATA_PROPERTY, FULL_INDIVIDUAL, FULL_OBJECT_PROPERTY, HIERARCHICAL_CONCEPT,
    LINK_INDIVIDUAL, TYPE_INDIVIDUAL, full_layout, layout_by_name,
};

/// Creates the descriptor for a value reached through [`Descriptor::build`].
pub type DescriptorFactory = Arc<dyn Fn(Ground) -> MirrorResult<Descriptor> + Send + Sync>;

/// The local values of one aspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AspectState {
    Concepts(AxiomSet<Concept>),
    Individuals(AxiomSet<Individual>),
    ObjectProperties(AxiomSet<ObjectProperty>),
    DataProperties(AxiomSet<DataProperty>),
    Restrictions(AxiomSet<Restriction>),
    ObjectLinks(SemanticAxiomSet<ObjectProperty, Individual>),
    DataLinks(SemanticAxiomSet<DataProperty, Literal>),
}

impl AspectState {
    /// An empty state of the given value domain.
    pub fn empty(domain: ValueDomain) -> Self {
        match domain {
            ValueDomain::Concepts => AspectState::Concepts(AxiomSet::new()),
            ValueDomain::Individuals => AspectState::Individuals(AxiomSet::new()),
            ValueDomain::ObjectProperties => AspectState::ObjectProperties(AxiomSet::new()),
            ValueDomain::DataProperties => AspectState::DataProperties(AxiomSet::new()),
            ValueDomain::Restrictions => AspectState::Restrictions(AxiomSet::new()),
            ValueDomain::ObjectLinks => AspectState::ObjectLinks(SemanticAxiomSet::new()),
            ValueDomain::DataLinks => AspectState::DataLinks(SemanticAxiomSet::new()),
        }
    }

    pub fn domain(&self) -> ValueDomain {
        match self {
            AspectState::Concepts(_) => ValueDomain::Concepts,
            AspectState::Individuals(_) => ValueDomain::Individuals,
            AspectState::ObjectProperties(_) => ValueDomain::ObjectProperties,
            AspectState::DataProperties(_) => ValueDomain::DataProperties,
            AspectState::Restrictions(_) => ValueDomain::Restrictions,
            AspectState::ObjectLinks(_) => ValueDomain::ObjectLinks,
            AspectState::DataLinks(_) => ValueDomain::DataLinks,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AspectState::Concepts(s) => s.is_empty(),
            AspectState::Individuals(s) => s.is_empty(),
            AspectState::ObjectProperties(s) => s.is_empty(),
            AspectState::DataProperties(s) => s.is_empty(),
            AspectState::Restrictions(s) => s.is_empty(),
            AspectState::ObjectLinks(s) => s.is_empty(),
            AspectState::DataLinks(s) => s.is_empty(),
        }
    }

    fn read(&mut self, aspect: AspectKind, ground: &Ground) -> MirrorResult<Vec<MappingIntent>> {
        match self {
            AspectState::Concepts(s) => sync::read(aspect, ground, s),
            AspectState::Individuals(s) => sync::read(aspect, ground, s),
            AspectState::ObjectProperties(s) => sync::read(aspect, ground, s),
            AspectState::DataProperties(s) => sync::read(aspect, ground, s),
            AspectState::Restrictions(s) => sync::read(aspect, ground, s),
            AspectState::ObjectLinks(s) => sync::read_links(aspect, ground, s),
            AspectState::DataLinks(s) => sync::read_links(aspect, ground, s),
        }
    }

    fn write(&self, aspect: AspectKind, ground: &Ground) -> MirrorResult<Vec<MappingIntent>> {
        match self {
            AspectState::Concepts(s) => sync::write(aspect, ground, s),
            AspectState::Individuals(s) => sync::write(aspect, ground, s),
            AspectState::ObjectProperties(s) => sync::write(aspect, ground, s),
            AspectState::DataProperties(s) => sync::write(aspect, ground, s),
            AspectState::Restrictions(s) => sync::write(aspect, ground, s),
            AspectState::ObjectLinks(s) => sync::write_links(aspect, ground, s),
            AspectState::DataLinks(s) => sync::write_links(aspect, ground, s),
        }
    }

    /// Entities the values name, with the kind a descriptor anchored there
    /// has. `None` for value domains that cannot anchor a descriptor.
    fn anchors(&self) -> Option<(EntityKind, Vec<Iri>)> {
        fn iris<V: AxiomValue>(set: &AxiomSet<V>, iri: impl Fn(&V) -> &Iri) -> Vec<Iri> {
            set.iter().map(|v| iri(v).clone()).collect()
        }
        match self {
            AspectState::Concepts(s) => Some((EntityKind::Concept, iris(s, Concept::iri))),
            AspectState::Individuals(s) => Some((EntityKind::Individual, iris(s, Individual::iri))),
            AspectState::ObjectProperties(s) => {
                Some((EntityKind::ObjectProperty, iris(s, ObjectProperty::iri)))
            }
            AspectState::DataProperties(s) => {
                Some((EntityKind::DataProperty, iris(s, DataProperty::iri)))
            }
            AspectState::ObjectLinks(links) => {
                let mut all: Vec<Iri> = links
                    .iter()
                    .flat_map(|entry| entry.values().iter().map(|i| i.iri().clone()))
                    .collect();
                all.sort();
                all.dedup();
                Some((EntityKind::Individual, all))
            }
            AspectState::Restrictions(_) | AspectState::DataLinks(_) => None,
        }
    }

    /// Render values with names resolved through the ontology.
    pub fn render(&self, ontology: &OntologyRef) -> String {
        let name = |iri: &Iri| ontology.resolve_name(iri);
        match self {
            AspectState::Concepts(s) => s.render(|v| name(v.iri())),
            AspectState::Individuals(s) => s.render(|v| name(v.iri())),
            AspectState::ObjectProperties(s) => s.render(|v| name(v.iri())),
            AspectState::DataProperties(s) => s.render(|v| name(v.iri())),
            AspectState::Restrictions(s) => s.to_string(),
            AspectState::ObjectLinks(links) => {
                let parts: Vec<String> = links
                    .iter()
                    .map(|e| format!("{}.{}", name(e.predicate().iri()), e.values().render(|v| name(v.iri()))))
                    .collect();
                format!("[{}]", parts.join(", "))
            }
            AspectState::DataLinks(links) => {
                let parts: Vec<String> = links
                    .iter()
                    .map(|e| format!("{}.{}", name(e.predicate().iri()), e.values()))
                    .collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }
}

/// Value types with a typed slot in [`AspectState`].
pub trait AspectValue: AxiomValue {
    const DOMAIN: ValueDomain;

    fn slot(state: &AspectState) -> Option<&AxiomSet<Self>>;

    fn slot_mut(state: &mut AspectState) -> Option<&mut AxiomSet<Self>>;
}

macro_rules! aspect_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AspectValue for $ty {
                const DOMAIN: ValueDomain = ValueDomain::$variant;

                fn slot(state: &AspectState) -> Option<&AxiomSet<Self>> {
                    match state {
                        AspectState::$variant(s) => Some(s),
                        _ => None,
                    }
                }

                fn slot_mut(state: &mut AspectState) -> Option<&mut AxiomSet<Self>> {
                    match state {
                        AspectState::$variant(s) => Some(s),
                        _ => None,
                    }
                }
            }
        )*
    };
}

aspect_value!(
    Concept => Concepts,
    Individual => Individuals,
    ObjectProperty => ObjectProperties,
    DataProperty => DataProperties,
    Restriction => Restrictions,
);

/// A typed mirror of one entity, composed of independent aspects.
///
/// Equality and hashing use the ground only.
#[derive(Clone)]
pub struct Descriptor {
    ground: Ground,
    layout: &'static DescriptorLayout,
    slots: Vec<(AspectKind, AspectState)>,
    factories: HashMap<AspectKind, DescriptorFactory>,
}

impl Descriptor {
    /// Create an empty descriptor. The layout must be valid and declared for
    /// the ground's entity kind.
    pub fn new(ground: Ground, layout: &'static DescriptorLayout) -> MirrorResult<Self> {
        if layout.entity != ground.entity() {
            return Err(DescriptorError::EntityMismatch {
                layout: layout.name.to_string(),
                expected: layout.entity.to_string(),
                actual: ground.entity().to_string(),
            }
            .into());
        }
        layout.validate()?;
        let mut slots = Vec::with_capacity(layout.aspects.len());
        for &aspect in layout.aspects {
            let domain = aspect.value_domain(layout.entity).ok_or_else(|| {
                DescriptorError::UnsupportedAspect {
                    aspect: aspect.to_string(),
                    entity: layout.entity.to_string(),
                }
            })?;
            slots.push((aspect, AspectState::empty(domain)));
        }
        Ok(Self {
            ground,
            layout,
            slots,
            factories: HashMap::new(),
        })
    }

    /// Create an empty descriptor for a short name in `ontology`.
    pub fn named(
        ontology: &OntologyRef,
        name: &str,
        layout: &'static DescriptorLayout,
    ) -> MirrorResult<Self> {
        Self::new(ontology.ground(name, layout.entity)?, layout)
    }

    /// Register how descriptors reached through `aspect` are built.
    pub fn with_factory<F>(mut self, aspect: AspectKind, factory: F) -> Self
    where
        F: Fn(Ground) -> MirrorResult<Descriptor> + Send + Sync + 'static,
    {
        self.factories.insert(aspect, Arc::new(factory));
        self
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn subject(&self) -> &Iri {
        self.ground.subject()
    }

    pub fn layout(&self) -> &'static DescriptorLayout {
        self.layout
    }

    pub fn ontology(&self) -> &OntologyRef {
        self.ground.ontology()
    }

    /// Aspects in layout order.
    pub fn aspects(&self) -> impl Iterator<Item = AspectKind> + '_ {
        self.slots.iter().map(|(a, _)| *a)
    }

    pub fn state(&self, aspect: AspectKind) -> Option<&AspectState> {
        self.slots.iter().find(|(a, _)| *a == aspect).map(|(_, s)| s)
    }

    fn slot(&self, aspect: AspectKind) -> MirrorResult<&AspectState> {
        self.state(aspect).ok_or_else(|| self.not_registered(aspect))
    }

    fn slot_mut(&mut self, aspect: AspectKind) -> MirrorResult<&mut AspectState> {
        let missing = self.not_registered(aspect);
        self.slots
            .iter_mut()
            .find(|(a, _)| *a == aspect)
            .map(|(_, s)| s)
            .ok_or(missing)
    }

    fn not_registered(&self, aspect: AspectKind) -> crate::error::MirrorError {
        DescriptorError::NotRegistered {
            aspect: aspect.to_string(),
            layout: self.layout.name.to_string(),
        }
        .into()
    }

    /// Update every aspect from the store, in layout order.
    pub fn read_axioms(&mut self) -> MirrorResult<Vec<MappingIntent>> {
        let mut intents = Vec::new();
        for (aspect, state) in &mut self.slots {
            intents.extend(state.read(*aspect, &self.ground)?);
        }
        Ok(intents)
    }

    /// Update the store from every aspect, in layout order.
    pub fn write_axioms(&self) -> MirrorResult<Vec<MappingIntent>> {
        let mut intents = Vec::new();
        for (aspect, state) in &self.slots {
            intents.extend(state.write(*aspect, &self.ground)?);
        }
        Ok(intents)
    }

    pub fn read_aspect(&mut self, aspect: AspectKind) -> MirrorResult<Vec<MappingIntent>> {
        let ground = self.ground.clone();
        self.slot_mut(aspect)?.read(aspect, &ground)
    }

    pub fn write_aspect(&self, aspect: AspectKind) -> MirrorResult<Vec<MappingIntent>> {
        self.slot(aspect)?.write(aspect, &self.ground)
    }

    /// One descriptor per entity named by `aspect`'s local values, made by
    /// the factory registered for it. Nothing is synchronized.
    pub fn build(&self, aspect: AspectKind) -> MirrorResult<HashSet<Descriptor>> {
        let state = self.slot(aspect)?;
        let factory = self
            .factories
            .get(&aspect)
            .ok_or_else(|| DescriptorError::NoFactory {
                aspect: aspect.to_string(),
            })?;
        let (kind, anchors) = state.anchors().ok_or_else(|| DescriptorError::NotExpandable {
            aspect: aspect.to_string(),
        })?;
        anchors
            .into_iter()
            .map(|iri| factory(self.ground.sibling(iri, kind)))
            .collect()
    }

    /// The local values of a set-valued aspect.
    pub fn axioms<V: AspectValue>(&self, aspect: AspectKind) -> MirrorResult<&AxiomSet<V>> {
        let state = self.slot(aspect)?;
        V::slot(state).ok_or_else(|| value_mismatch(aspect, V::DOMAIN))
    }

    pub fn axioms_mut<V: AspectValue>(
        &mut self,
        aspect: AspectKind,
    ) -> MirrorResult<&mut AxiomSet<V>> {
        let state = self.slot_mut(aspect)?;
        V::slot_mut(state).ok_or_else(|| value_mismatch(aspect, V::DOMAIN))
    }

    /// Add a value locally. Returns `true` if it was new.
    ///
    /// Values the aspect cannot store are rejected here rather than at write.
    pub fn add<V: AspectValue>(&mut self, aspect: AspectKind, value: V) -> MirrorResult<bool> {
        if let Some(predicate) = aspect.predicate(self.ground.entity()) {
            sync::admit(aspect, &predicate, &value.to_term())?;
        }
        Ok(self.axioms_mut::<V>(aspect)?.add(value))
    }

    /// Remove a value locally. Returns `true` if it was present.
    pub fn remove<V: AspectValue>(&mut self, aspect: AspectKind, value: &V) -> MirrorResult<bool> {
        Ok(self.axioms_mut::<V>(aspect)?.remove(value))
    }

    pub fn object_links(&self) -> MirrorResult<&SemanticAxiomSet<ObjectProperty, Individual>> {
        match self.slot(AspectKind::ObjectLinks)? {
            AspectState::ObjectLinks(links) => Ok(links),
            _ => Err(value_mismatch(AspectKind::ObjectLinks, ValueDomain::ObjectLinks)),
        }
    }

    pub fn object_links_mut(
        &mut self,
    ) -> MirrorResult<&mut SemanticAxiomSet<ObjectProperty, Individual>> {
        match self.slot_mut(AspectKind::ObjectLinks)? {
            AspectState::ObjectLinks(links) => Ok(links),
            _ => Err(value_mismatch(AspectKind::ObjectLinks, ValueDomain::ObjectLinks)),
        }
    }

    pub fn data_links(&self) -> MirrorResult<&SemanticAxiomSet<DataProperty, Literal>> {
        match self.slot(AspectKind::DataLinks)? {
            AspectState::DataLinks(links) => Ok(links),
            _ => Err(value_mismatch(AspectKind::DataLinks, ValueDomain::DataLinks)),
        }
    }

    pub fn data_links_mut(&mut self) -> MirrorResult<&mut SemanticAxiomSet<DataProperty, Literal>> {
        match self.slot_mut(AspectKind::DataLinks)? {
            AspectState::DataLinks(links) => Ok(links),
            _ => Err(value_mismatch(AspectKind::DataLinks, ValueDomain::DataLinks)),
        }
    }

    pub fn add_object_link(&mut self, property: &ObjectProperty, value: Individual) -> MirrorResult<bool> {
        Ok(self.object_links_mut()?.add_value(property, value))
    }

    pub fn remove_object_link(&mut self, property: &ObjectProperty, value: &Individual) -> MirrorResult<bool> {
        Ok(self.object_links_mut()?.remove_value(property, value))
    }

    /// Drop a property and all its values locally.
    pub fn remove_object_links(&mut self, property: &ObjectProperty) -> MirrorResult<bool> {
        Ok(self.object_links_mut()?.remove(property).is_some())
    }

    /// Replace every value of `property` with `value`, flagging the set as
    /// singleton.
    pub fn set_object_link(&mut self, property: &ObjectProperty, value: Individual) -> MirrorResult<()> {
        let values = self.object_links_mut()?.values_of_mut(property);
        values.clear();
        values.set_singleton(true);
        values.add(value);
        Ok(())
    }

    /// The one value of `property`. Multiple values are reported to the
    /// ontology's diagnostic sink.
    pub fn object_link(&self, property: &ObjectProperty) -> MirrorResult<Option<Individual>> {
        let sink = self.ontology().diagnostics();
        Ok(self.object_links()?.single_value_of(property, sink))
    }

    pub fn add_data_link(&mut self, property: &DataProperty, value: Literal) -> MirrorResult<bool> {
        Ok(self.data_links_mut()?.add_value(property, value))
    }

    pub fn remove_data_link(&mut self, property: &DataProperty, value: &Literal) -> MirrorResult<bool> {
        Ok(self.data_links_mut()?.remove_value(property, value))
    }

    pub fn remove_data_links(&mut self, property: &DataProperty) -> MirrorResult<bool> {
        Ok(self.data_links_mut()?.remove(property).is_some())
    }

    pub fn set_data_link(&mut self, property: &DataProperty, value: Literal) -> MirrorResult<()> {
        let values = self.data_links_mut()?.values_of_mut(property);
        values.clear();
        values.set_singleton(true);
        values.add(value);
        Ok(())
    }

    pub fn data_link(&self, property: &DataProperty) -> MirrorResult<Option<Literal>> {
        let sink = self.ontology().diagnostics();
        Ok(self.data_links()?.single_value_of(property, sink))
    }
}

fn value_mismatch(aspect: AspectKind, requested: ValueDomain) -> crate::error::MirrorError {
    DescriptorError::ValueMismatch {
        aspect: aspect.to_string(),
        requested: format!("{requested:?}"),
    }
    .into()
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.ground == other.ground
    }
}

impl Eq for Descriptor {}

impl Hash for Descriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ground.hash(state);
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("ground", &self.ground)
            .field("layout", &self.layout.name)
            .field("slots", &self.slots)
            .field("factories", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.ground, self.layout.name)?;
        let ontology = self.ground.ontology();
        for (aspect, state) in &self.slots {
            write!(f, "\n  {} {}", aspect.symbol(), state.render(ontology))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::error::MirrorError;
    use crate::intent::Action;

    fn onto() -> OntologyRef {
        OntologyRef::in_memory("home", Iri::new("http://example.org/home#").unwrap())
    }

    #[test]
    fn layout_must_match_ground() {
        let onto = onto();
        let ground = onto.ground("ROBOT", EntityKind::Concept).unwrap();
        let err = Descriptor::new(ground, &FULL_INDIVIDUAL).unwrap_err();
        assert!(matches!(
            err,
            MirrorError::Descriptor(DescriptorError::EntityMismatch { .. })
        ));
    }

    #[test]
    fn typed_access_checks_value_domain() {
        let onto = onto();
        let mut d = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL).unwrap();
        d.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
        assert_eq!(d.axioms::<Concept>(AspectKind::Type).unwrap().len(), 1);
        assert!(d.axioms::<Individual>(AspectKind::Type).is_err());
        assert!(matches!(
            d.axioms::<Concept>(AspectKind::Sub),
            Err(MirrorError::Descriptor(DescriptorError::NotRegistered { .. }))
        ));
    }

    #[test]
    fn composed_intents_follow_layout_order() {
        let onto = onto();
        let mut d = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL).unwrap();
        let intents = d.read_axioms().unwrap();
        let aspects: Vec<AspectKind> = intents.iter().map(|i| i.aspect()).collect();
        assert_eq!(aspects, FULL_INDIVIDUAL.aspects.to_vec());
        assert!(intents.iter().all(|i| i.action() == Action::NoChange));
    }

    #[test]
    fn singleton_link_warns_through_sink() {
        let sink = Arc::new(CollectingSink::new());
        let onto = onto().with_sink(sink.clone());
        let color = onto.data_property("hasColor").unwrap();
        let mut d = Descriptor::named(&onto, "Robot1", &LINK_INDIVIDUAL).unwrap();
        d.set_data_link(&color, Literal::string("Red")).unwrap();
        d.add_data_link(&color, Literal::string("Blue")).unwrap();

        let value = d.data_link(&color).unwrap().unwrap();
        assert_eq!(value, Literal::string("Blue"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn build_without_factory_fails() {
        let onto = onto();
        let d = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL).unwrap();
        assert!(matches!(
            d.build(AspectKind::Type),
            Err(MirrorError::Descriptor(DescriptorError::NoFactory { .. }))
        ));
    }

    #[test]
    fn build_creates_one_descriptor_per_value() {
        let onto = onto();
        let mut d = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL)
            .unwrap()
            .with_factory(AspectKind::Type, |ground| {
                Descriptor::new(ground, &HIERARCHICAL_CONCEPT)
            });
        d.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
        d.add(AspectKind::Type, onto.concept("AGENT").unwrap()).unwrap();

        let built = d.build(AspectKind::Type).unwrap();
        assert_eq!(built.len(), 2);
        assert!(built.iter().all(|b| b.layout().name == "HIERARCHICAL_CONCEPT"));
        assert!(built.iter().all(|b| b.ontology().same_handle(&onto)));
        assert_eq!(onto.store().statement_count().unwrap(), 0);
    }

    #[test]
    fn restrictions_are_not_expandable() {
        let onto = onto();
        let d = Descriptor::named(&onto, "CORRIDOR", &DEFINITION_CONCEPT)
            .unwrap()
            .with_factory(AspectKind::Definition, |ground| {
                Descriptor::new(ground, &DEFINITION_CONCEPT)
            });
        assert!(matches!(
            d.build(AspectKind::Definition),
            Err(MirrorError::Descriptor(DescriptorError::NotExpandable { .. }))
        ));
    }

    #[test]
    fn named_class_is_not_a_definition() {
        let onto = onto();
        let mut d = Descriptor::named(&onto, "ROOM", &DEFINITION_CONCEPT).unwrap();
        let named = Restriction::Class(onto.concept("LOCATION").unwrap());
        assert!(matches!(
            d.add(AspectKind::Definition, named.clone()),
            Err(MirrorError::Descriptor(DescriptorError::InvalidValue { .. }))
        ));
        assert!(d.axioms::<Restriction>(AspectKind::Definition).unwrap().is_empty());

        // Bypassing `add` is caught before anything is stored.
        d.axioms_mut::<Restriction>(AspectKind::Definition).unwrap().add(named);
        assert!(matches!(
            d.write_axioms(),
            Err(MirrorError::Descriptor(DescriptorError::InvalidValue { .. }))
        ));
        assert_eq!(onto.store().statement_count().unwrap(), 0);
    }

    #[test]
    fn display_lists_aspects() {
        let onto = onto();
        let mut d = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL).unwrap();
        d.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
        d.add_object_link(
            &onto.object_property("isIn").unwrap(),
            onto.individual("Corridor1").unwrap(),
        )
        .unwrap();
        let text = d.to_string();
        assert!(text.starts_with("Robot1 (individual) [FULL_INDIVIDUAL]"));
        assert!(text.contains("∈ {ROBOT}"));
        assert!(text.contains("→ [isIn.{Corridor1}]"));
    }

    #[test]
    fn equality_by_ground() {
        let onto = onto();
        let mut a = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL).unwrap();
        let b = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL).unwrap();
        a.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
