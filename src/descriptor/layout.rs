//! Static registration tables: which aspects a descriptor runs, in order.

use crate::aspect::AspectKind;
use crate::entity::EntityKind;
use crate::error::DescriptorError;

use AspectKind::*;

/// A named, ordered list of aspects for one kind of entity.
///
/// Reconciliation runs the aspects in exactly this order, so the intents of
/// a composed read or write are the per-aspect intents concatenated in
/// layout order.
#[derive(Debug, PartialEq, Eq)]
pub struct DescriptorLayout {
    pub name: &'static str,
    pub entity: EntityKind,
    pub aspects: &'static [AspectKind],
}

impl DescriptorLayout {
    pub fn contains(&self, aspect: AspectKind) -> bool {
        self.aspects.contains(&aspect)
    }

    /// Reject aspects that do not apply to the layout's entity kind, and
    /// duplicates.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        for (i, aspect) in self.aspects.iter().enumerate() {
            if !aspect.supports(self.entity) {
                return Err(DescriptorError::UnsupportedAspect {
                    aspect: aspect.to_string(),
                    entity: self.entity.to_string(),
                });
            }
            if self.aspects[..i].contains(aspect) {
                return Err(DescriptorError::UnsupportedAspect {
                    aspect: format!("{aspect} (listed twice in {})", self.name),
                    entity: self.entity.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub static TYPE_INDIVIDUAL: DescriptorLayout = DescriptorLayout {
    name: "TYPE_INDIVIDUAL",
    entity: EntityKind::Individual,
    aspects: &[Type],
};

pub static LINK_INDIVIDUAL: DescriptorLayout = DescriptorLayout {
    name: "LINK_INDIVIDUAL",
    entity: EntityKind::Individual,
    aspects: &[ObjectLinks, DataLinks],
};

pub static FULL_INDIVIDUAL: DescriptorLayout = DescriptorLayout {
    name: "FULL_INDIVIDUAL",
    entity: EntityKind::Individual,
    aspects: &[Type, SameAs, DifferentFrom, ObjectLinks, DataLinks],
};

pub static HIERARCHICAL_CONCEPT: DescriptorLayout = DescriptorLayout {
    name: "HIERARCHICAL_CONCEPT",
    entity: EntityKind::Concept,
    aspects: &[Sub, Super],
};

pub static DEFINITION_CONCEPT: DescriptorLayout = DescriptorLayout {
    name: "DEFINITION_CONCEPT",
    entity: EntityKind::Concept,
    aspects: &[Definition],
};

pub static FULL_CONCEPT: DescriptorLayout = DescriptorLayout {
    name: "FULL_CONCEPT",
    entity: EntityKind::Concept,
    aspects: &[Disjoint, Equivalent, Definition, Instance, Sub, Super],
};

pub static DEFINITION_OBJECT_PROPERTY: DescriptorLayout = DescriptorLayout {
    name: "DEFINITION_OBJECT_PROPERTY",
    entity: EntityKind::ObjectProperty,
    aspects: &[Disjoint, Equivalent, Inverse],
};

pub static DOMAIN_RANGE_OBJECT_PROPERTY: DescriptorLayout = DescriptorLayout {
    name: "DOMAIN_RANGE_OBJECT_PROPERTY",
    entity: EntityKind::ObjectProperty,
    aspects: &[Domain, Range],
};

pub static FULL_OBJECT_PROPERTY: DescriptorLayout = DescriptorLayout {
    name: "FULL_OBJECT_PROPERTY",
    entity: EntityKind::ObjectProperty,
    aspects: &[Disjoint, Equivalent, Inverse, Range, Domain, Sub, Super],
};

pub static FULL_DATA_PROPERTY: DescriptorLayout = DescriptorLayout {
    name: "FULL_DATA_PROPERTY",
    entity: EntityKind::DataProperty,
    aspects: &[Disjoint, Equivalent, Range, Domain, Sub, Super],
};

/// Every built-in layout.
pub static LAYOUTS: [&DescriptorLayout; 10] = [
    &TYPE_INDIVIDUAL,
    &LINK_INDIVIDUAL,
    &FULL_INDIVIDUAL,
    &HIERARCHICAL_CONCEPT,
    &DEFINITION_CONCEPT,
    &FULL_CONCEPT,
    &DEFINITION_OBJECT_PROPERTY,
    &DOMAIN_RANGE_OBJECT_PROPERTY,
    &FULL_OBJECT_PROPERTY,
    &FULL_DATA_PROPERTY,
];

/// Look up a built-in layout by name, case-insensitively.
pub fn layout_by_name(name: &str) -> Option<&'static DescriptorLayout> {
    LAYOUTS
        .iter()
        .copied()
        .find(|l| l.name.eq_ignore_ascii_case(name))
}

/// The most complete built-in layout for an entity kind.
pub fn full_layout(entity: EntityKind) -> &'static DescriptorLayout {
    match entity {
        EntityKind::Individual => &FULL_INDIVIDUAL,
        EntityKind::Concept => &FULL_CONCEPT,
        EntityKind::ObjectProperty => &FULL_OBJECT_PROPERTY,
        EntityKind::DataProperty => &FULL_DATA_PROPERTY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_layouts_are_valid() {
        for layout in LAYOUTS {
            layout.validate().unwrap();
        }
    }

    #[test]
    fn mismatched_layout_is_rejected() {
        static BAD: DescriptorLayout = DescriptorLayout {
            name: "BAD",
            entity: EntityKind::DataProperty,
            aspects: &[Inverse],
        };
        assert!(matches!(
            BAD.validate(),
            Err(DescriptorError::UnsupportedAspect { .. })
        ));
    }

    #[test]
    fn duplicate_aspect_is_rejected() {
        static TWICE: DescriptorLayout = DescriptorLayout {
            name: "TWICE",
            entity: EntityKind::Individual,
            aspects: &[Type, Type],
        };
        assert!(TWICE.validate().is_err());
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(layout_by_name("full_individual"), Some(&FULL_INDIVIDUAL));
        assert!(layout_by_name("nope").is_none());
        assert_eq!(full_layout(EntityKind::Concept).name, "FULL_CONCEPT");
    }
}
