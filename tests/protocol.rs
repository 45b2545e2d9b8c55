//! End-to-end tests of the read/write protocol on the memory backend.
//!
//! Each test opens a fresh ontology handle, drives descriptors through
//! reads and writes, and checks both the emitted intents and what the store
//! ends up holding.

use std::sync::Arc;

use axiom_mirror::diagnostics::{CardinalityKind, CollectingSink};
use axiom_mirror::error::{DescriptorError, ReferenceError, StoreError};
use axiom_mirror::intent::IntentSummary;
use axiom_mirror::prelude::*;
use axiom_mirror::store::AxiomPredicate;

const NS: &str = "http://example.org/home#";

fn home() -> OntologyRef {
    OntologyRef::in_memory("home", Iri::new(NS).unwrap())
}

fn changes(intents: &[MappingIntent]) -> Vec<(Action, String)> {
    intents
        .iter()
        .filter(|i| i.is_change())
        .map(|i| (i.action(), i.value().map(|v| v.to_string()).unwrap_or_default()))
        .collect()
}

#[test]
fn link_written_by_one_descriptor_is_read_by_another() {
    let onto = home();
    let is_in = onto.object_property("isIn").unwrap();

    let mut robot = Descriptor::named(&onto, "Robot1", &LINK_INDIVIDUAL).unwrap();
    robot
        .add_object_link(&is_in, onto.individual("Corridor1").unwrap())
        .unwrap();
    let written = robot.write_axioms().unwrap();
    assert_eq!(changes(&written), vec![(Action::Add, "Corridor1".to_string())]);
    assert_eq!(written[0].direction(), Direction::Write);
    assert_eq!(written[0].predicate(), Some(is_in.iri()));

    let mut mirror = Descriptor::named(&onto, "Robot1", &LINK_INDIVIDUAL).unwrap();
    let read = mirror.read_axioms().unwrap();
    assert_eq!(changes(&read), vec![(Action::Add, "Corridor1".to_string())]);
    assert_eq!(read[0].direction(), Direction::Read);
    assert_eq!(
        mirror.object_link(&is_in).unwrap(),
        Some(onto.individual("Corridor1").unwrap())
    );
}

#[test]
fn removing_one_value_retracts_only_that_value() {
    let onto = home();
    let is_in = onto.object_property("isIn").unwrap();
    let room = |n: &str| onto.individual(n).unwrap();

    let mut robot = Descriptor::named(&onto, "Robot1", &LINK_INDIVIDUAL).unwrap();
    for name in ["Room1", "Room2", "Room3"] {
        robot.add_object_link(&is_in, room(name)).unwrap();
    }
    robot.write_axioms().unwrap();

    robot.remove_object_link(&is_in, &room("Room2")).unwrap();
    let intents = robot.write_axioms().unwrap();
    assert_eq!(changes(&intents), vec![(Action::Remove, "Room2".to_string())]);

    let stored = onto
        .store()
        .query(robot.subject(), &AxiomPredicate::ObjectLink(is_in.clone()))
        .unwrap();
    let names: Vec<String> = stored.iter().map(|t| t.to_string()).collect();
    assert_eq!(names, vec!["Room1", "Room3"]);
}

#[test]
fn dropping_a_property_retracts_all_its_values() {
    let onto = home();
    let is_in = onto.object_property("isIn").unwrap();

    let mut robot = Descriptor::named(&onto, "Robot1", &LINK_INDIVIDUAL).unwrap();
    robot.add_object_link(&is_in, onto.individual("Room1").unwrap()).unwrap();
    robot.add_object_link(&is_in, onto.individual("Room2").unwrap()).unwrap();
    robot.write_axioms().unwrap();

    robot.remove_object_links(&is_in).unwrap();
    let intents = robot.write_axioms().unwrap();
    assert_eq!(IntentSummary::of(&intents).removed, 2);
    assert_eq!(onto.store().statement_count().unwrap(), 0);
}

#[test]
fn ambiguous_single_value_reports_once_and_picks_first() {
    let sink = Arc::new(CollectingSink::new());
    let onto = home().with_sink(sink.clone());
    let has_color = onto.data_property("hasColor").unwrap();

    let mut writer = Descriptor::named(&onto, "Ball1", &LINK_INDIVIDUAL).unwrap();
    writer.add_data_link(&has_color, Literal::string("Red")).unwrap();
    writer.add_data_link(&has_color, Literal::string("Blue")).unwrap();
    writer.write_axioms().unwrap();

    let mut reader = Descriptor::named(&onto, "Ball1", &LINK_INDIVIDUAL).unwrap();
    reader.read_axioms().unwrap();
    let color = reader.data_link(&has_color).unwrap();
    assert_eq!(color, Some(Literal::string("Blue")));

    let warnings = sink.drain();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, CardinalityKind::AmbiguousSingleValue);
    assert_eq!(warnings[0].values, 2);
}

#[test]
fn set_link_replaces_previous_value() {
    let onto = home();
    let has_color = onto.data_property("hasColor").unwrap();

    let mut ball = Descriptor::named(&onto, "Ball1", &LINK_INDIVIDUAL).unwrap();
    ball.set_data_link(&has_color, Literal::string("Red")).unwrap();
    ball.write_axioms().unwrap();

    ball.set_data_link(&has_color, Literal::string("Green")).unwrap();
    let intents = ball.write_axioms().unwrap();
    assert_eq!(
        changes(&intents),
        vec![
            (Action::Add, "\"Green\"".to_string()),
            (Action::Remove, "\"Red\"".to_string())
        ]
    );
}

#[test]
fn repeated_write_is_a_no_op() {
    let onto = home();
    let mut robot = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL).unwrap();
    robot.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
    robot.add(AspectKind::SameAs, onto.individual("R1").unwrap()).unwrap();
    robot.write_axioms().unwrap();
    let count = onto.store().statement_count().unwrap();

    let again = robot.write_axioms().unwrap();
    assert!(again.iter().all(|i| i.action() == Action::NoChange));
    assert_eq!(again.len(), FULL_INDIVIDUAL.aspects.len());
    assert_eq!(onto.store().statement_count().unwrap(), count);
}

#[test]
fn write_then_read_converges() {
    let onto = home();
    let mut robot = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL).unwrap();
    robot.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
    robot.add(AspectKind::Type, onto.concept("AGENT").unwrap()).unwrap();
    robot
        .add(AspectKind::DifferentFrom, onto.individual("Robot2").unwrap())
        .unwrap();
    robot
        .add_data_link(&onto.data_property("hasName").unwrap(), Literal::string("R2"))
        .unwrap();
    robot.write_axioms().unwrap();

    let mut mirror = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL).unwrap();
    mirror.read_axioms().unwrap();
    for aspect in FULL_INDIVIDUAL.aspects {
        assert_eq!(robot.state(*aspect), mirror.state(*aspect), "aspect {aspect}");
    }

    let settled = mirror.read_axioms().unwrap();
    assert!(settled.iter().all(|i| !i.is_change()));
}

#[test]
fn read_discards_local_values_missing_from_store() {
    let onto = home();
    let mut robot = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL).unwrap();
    robot.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();

    let intents = robot.read_axioms().unwrap();
    assert_eq!(changes(&intents), vec![(Action::Remove, "ROBOT".to_string())]);
    assert!(robot.axioms::<Concept>(AspectKind::Type).unwrap().is_empty());
}

#[test]
fn composed_intents_follow_layout_order() {
    let onto = home();
    let mut robot = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL).unwrap();
    let intents = robot.read_axioms().unwrap();
    let aspects: Vec<AspectKind> = intents.iter().map(|i| i.aspect()).collect();
    assert_eq!(aspects, FULL_INDIVIDUAL.aspects.to_vec());
    assert!(intents.iter().all(|i| i.action() == Action::NoChange));
}

#[test]
fn symmetric_aspects_are_visible_from_both_sides() {
    let onto = home();
    let mut robot = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL).unwrap();
    robot.add(AspectKind::SameAs, onto.individual("R1").unwrap()).unwrap();
    robot.write_axioms().unwrap();

    let mut alias = Descriptor::named(&onto, "R1", &FULL_INDIVIDUAL).unwrap();
    alias.read_axioms().unwrap();
    assert!(
        alias
            .axioms::<Individual>(AspectKind::SameAs)
            .unwrap()
            .contains(&onto.individual("Robot1").unwrap())
    );
}

#[test]
fn class_hierarchy_reads_from_both_ends() {
    let onto = home();
    let mut robot = Descriptor::named(&onto, "ROBOT", &HIERARCHICAL_CONCEPT).unwrap();
    robot.add(AspectKind::Super, onto.concept("AGENT").unwrap()).unwrap();
    robot.write_axioms().unwrap();

    let mut agent = Descriptor::named(&onto, "AGENT", &HIERARCHICAL_CONCEPT).unwrap();
    agent.read_axioms().unwrap();
    let subs = agent.axioms::<Concept>(AspectKind::Sub).unwrap();
    assert!(subs.contains(&onto.concept("ROBOT").unwrap()));
    assert!(agent.axioms::<Concept>(AspectKind::Super).unwrap().is_empty());
}

#[test]
fn instances_mirror_individual_types() {
    let onto = home();
    let mut robot = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL).unwrap();
    robot.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
    robot.write_axioms().unwrap();

    let mut class = Descriptor::named(&onto, "ROBOT", &FULL_CONCEPT).unwrap();
    class.read_axioms().unwrap();
    let instances = class.axioms::<Individual>(AspectKind::Instance).unwrap();
    assert!(instances.contains(&onto.individual("Robot1").unwrap()));
}

#[test]
fn build_expands_links_into_descriptors() {
    let onto = home();
    let is_in = onto.object_property("isIn").unwrap();
    let near = onto.object_property("isNear").unwrap();

    let mut robot = Descriptor::named(&onto, "Robot1", &FULL_INDIVIDUAL)
        .unwrap()
        .with_factory(AspectKind::ObjectLinks, |g| Descriptor::new(g, &TYPE_INDIVIDUAL))
        .with_factory(AspectKind::Type, |g| Descriptor::new(g, &HIERARCHICAL_CONCEPT));
    robot.add_object_link(&is_in, onto.individual("Corridor1").unwrap()).unwrap();
    robot.add_object_link(&near, onto.individual("Corridor1").unwrap()).unwrap();
    robot.add_object_link(&near, onto.individual("Door1").unwrap()).unwrap();
    robot.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();

    let places = robot.build(AspectKind::ObjectLinks).unwrap();
    assert_eq!(places.len(), 2);
    let mut names: Vec<String> = places
        .iter()
        .map(|d| d.subject().local_name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Corridor1", "Door1"]);
    assert!(places.iter().all(|d| d.layout() == &TYPE_INDIVIDUAL));
    assert!(places.iter().all(|d| d.ontology().same_handle(&onto)));

    let classes = robot.build(AspectKind::Type).unwrap();
    assert_eq!(classes.len(), 1);
    assert!(classes.iter().all(|d| d.ground().entity() == EntityKind::Concept));

    // Nothing was synchronized.
    assert_eq!(onto.store().statement_count().unwrap(), 0);
}

#[test]
fn buffered_store_defers_changes_until_sync() {
    let mut config = MirrorConfig::new("home", Iri::new(NS).unwrap());
    config.buffered = true;
    let onto = OntologyRef::open(&config).unwrap();

    let mut robot = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL).unwrap();
    robot.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
    robot.write_axioms().unwrap();
    assert_eq!(onto.store().statement_count().unwrap(), 0);

    // Pending changes are visible to reads and keep writes idempotent.
    let again = robot.write_axioms().unwrap();
    assert!(again.iter().all(|i| !i.is_change()));
    let mut mirror = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL).unwrap();
    mirror.read_axioms().unwrap();
    assert_eq!(mirror.axioms::<Concept>(AspectKind::Type).unwrap().len(), 1);

    onto.synchronize_reasoner().unwrap();
    assert_eq!(onto.store().statement_count().unwrap(), 1);
}

#[test]
fn strict_store_requires_declarations() {
    let mut config = MirrorConfig::new("home", Iri::new(NS).unwrap());
    config.strict = true;
    let onto = OntologyRef::open(&config).unwrap();

    let mut robot = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL).unwrap();
    robot.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
    let err = robot.write_axioms().unwrap_err();
    assert!(matches!(
        err,
        MirrorError::Store(StoreError::Unresolved(ReferenceError::Undeclared { .. }))
    ));

    onto.declare("Robot1", EntityKind::Individual).unwrap();
    onto.declare("ROBOT", EntityKind::Concept).unwrap();
    let intents = robot.write_axioms().unwrap();
    assert_eq!(IntentSummary::of(&intents).added, 1);
}

#[test]
fn config_file_round_trip_opens_the_same_backend() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("mirror.toml");
    let mut config = MirrorConfig::new("home", Iri::new(NS).unwrap());
    config.buffered = true;
    config.save(&path).unwrap();

    let loaded = MirrorConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    let onto = OntologyRef::open(&loaded).unwrap();
    assert_eq!(onto.name(), "home");
    assert_eq!(onto.namespace().as_str(), NS);
}

#[test]
fn wrong_layout_for_entity_is_rejected() {
    let onto = home();
    let ground = onto.ground("ROBOT", EntityKind::Concept).unwrap();
    assert!(Descriptor::new(ground, &FULL_INDIVIDUAL).is_err());
}

#[test]
fn singleton_marker_lasts_while_the_predicate_has_values() {
    let sink = Arc::new(CollectingSink::new());
    let onto = home().with_sink(sink.clone());
    let has_color = onto.data_property("hasColor").unwrap();
    let mut ball = Descriptor::named(&onto, "Ball1", &LINK_INDIVIDUAL).unwrap();
    ball.set_data_link(&has_color, Literal::string("Red")).unwrap();
    ball.write_axioms().unwrap();

    let mut other = Descriptor::named(&onto, "Ball1", &LINK_INDIVIDUAL).unwrap();
    other.read_axioms().unwrap();
    other.add_data_link(&has_color, Literal::string("Blue")).unwrap();
    other.write_axioms().unwrap();

    // Still non-empty after the read: the marker survives.
    ball.read_axioms().unwrap();
    ball.data_link(&has_color).unwrap();
    assert_eq!(sink.drain()[0].kind, CardinalityKind::SingletonViolated);

    other.remove_data_links(&has_color).unwrap();
    other.write_axioms().unwrap();
    ball.read_axioms().unwrap();
    assert!(!ball.data_links().unwrap().contains(&has_color));

    // Values that come back land in a fresh, unmarked entry.
    other.add_data_link(&has_color, Literal::string("Red")).unwrap();
    other.add_data_link(&has_color, Literal::string("Blue")).unwrap();
    other.write_axioms().unwrap();
    ball.read_axioms().unwrap();
    ball.data_link(&has_color).unwrap();
    assert_eq!(sink.drain()[0].kind, CardinalityKind::AmbiguousSingleValue);
}

#[test]
fn write_retracts_store_values_dropped_locally() {
    let onto = home();
    let is_in = onto.object_property("isIn").unwrap();
    let room = |n: &str| onto.individual(n).unwrap();
    let link = AxiomPredicate::ObjectLink(is_in.clone());

    let mut robot = Descriptor::named(&onto, "Robot1", &LINK_INDIVIDUAL).unwrap();
    robot.add_object_link(&is_in, room("Room1")).unwrap();
    robot.add_object_link(&is_in, room("Room2")).unwrap();
    robot.write_axioms().unwrap();
    onto.store()
        .assert(robot.subject(), &link, &room("Room3").to_term())
        .unwrap();

    robot.remove_object_links(&is_in).unwrap();
    robot.add_object_link(&is_in, room("Room1")).unwrap();
    let intents = robot.write_axioms().unwrap();
    assert_eq!(
        changes(&intents),
        vec![
            (Action::Remove, "Room2".to_string()),
            (Action::Remove, "Room3".to_string())
        ]
    );

    let stored = onto.store().query(robot.subject(), &link).unwrap();
    assert_eq!(stored, vec![room("Room1").to_term()]);
}

#[test]
fn named_class_in_definition_is_rejected_before_storage() {
    let onto = home();
    let mut room = Descriptor::named(&onto, "ROOM", &FULL_CONCEPT).unwrap();
    let err = room
        .add(AspectKind::Definition, Restriction::Class(onto.concept("LOCATION").unwrap()))
        .unwrap_err();
    assert!(matches!(
        err,
        MirrorError::Descriptor(DescriptorError::InvalidValue { .. })
    ));

    // The named class belongs in Equivalent.
    room.add(AspectKind::Equivalent, onto.concept("LOCATION").unwrap()).unwrap();
    room.write_axioms().unwrap();
    assert_eq!(onto.store().statement_count().unwrap(), 1);
}

#[test]
fn buffered_strict_store_rejects_before_queueing() {
    let mut config = MirrorConfig::new("home", Iri::new(NS).unwrap());
    config.buffered = true;
    config.strict = true;
    let onto = OntologyRef::open(&config).unwrap();

    let mut robot = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL).unwrap();
    robot.add(AspectKind::Type, onto.concept("ROBOT").unwrap()).unwrap();
    let err = robot.write_axioms().unwrap_err();
    assert!(matches!(
        err,
        MirrorError::Store(StoreError::Unresolved(ReferenceError::Undeclared { .. }))
    ));
    // Nothing was queued, so the flush has nothing to trip over.
    onto.synchronize_reasoner().unwrap();
    let mut mirror = Descriptor::named(&onto, "Robot1", &TYPE_INDIVIDUAL).unwrap();
    mirror.read_axioms().unwrap();
    assert!(mirror.axioms::<Concept>(AspectKind::Type).unwrap().is_empty());

    onto.declare("Robot1", EntityKind::Individual).unwrap();
    onto.declare("ROBOT", EntityKind::Concept).unwrap();
    robot.write_axioms().unwrap();
    onto.synchronize_reasoner().unwrap();
    mirror.read_axioms().unwrap();
    assert_eq!(mirror.axioms::<Concept>(AspectKind::Type).unwrap().len(), 1);
}
