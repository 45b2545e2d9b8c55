//! Aspects: the independently synchronizable fact-types of a descriptor.
//!
//! | aspect | individual | class | object prop | data prop |
//! |---|---|---|---|---|
//! | `Type` ∈ | classes | | | |
//! | `Instance` ∋ | | individuals | | |
//! | `SameAs` = / `DifferentFrom` ≠ | individuals | | | |
//! | `ObjectLinks` / `DataLinks` | link sets | | | |
//! | `Sub` ⊃ / `Super` ⊂ / `Equivalent` ≡ / `Disjoint` ≠ | | classes | object props | data props |
//! | `Inverse` ↔ | | | object props | |
//! | `Domain` / `Range` | | | restrictions | restrictions |
//! | `Definition` ⊑ | | restrictions | | |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::store::AxiomPredicate;

/// One fact-type a descriptor can mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Type,
    Instance,
    SameAs,
    DifferentFrom,
    ObjectLinks,
    DataLinks,
    Sub,
    Super,
    Equivalent,
    Disjoint,
    Inverse,
    Domain,
    Range,
    Definition,
}

/// Which value type an aspect holds for a given entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDomain {
    Concepts,
    Individuals,
    ObjectProperties,
    DataProperties,
    Restrictions,
    ObjectLinks,
    DataLinks,
}

impl AspectKind {
    pub const ALL: [AspectKind; 14] = [
        AspectKind::Type,
        AspectKind::Instance,
        AspectKind::SameAs,
        AspectKind::DifferentFrom,
        AspectKind::ObjectLinks,
        AspectKind::DataLinks,
        AspectKind::Sub,
        AspectKind::Super,
        AspectKind::Equivalent,
        AspectKind::Disjoint,
        AspectKind::Inverse,
        AspectKind::Domain,
        AspectKind::Range,
        AspectKind::Definition,
    ];

    /// The value type this aspect holds on `entity`, or `None` if the aspect
    /// does not apply to that kind of entity.
    pub fn value_domain(self, entity: EntityKind) -> Option<ValueDomain> {
        use AspectKind as A;
        use EntityKind as E;
        let domain = match (self, entity) {
            (A::Type, E::Individual) => ValueDomain::Concepts,
            (A::SameAs | A::DifferentFrom, E::Individual) => ValueDomain::Individuals,
            (A::ObjectLinks, E::Individual) => ValueDomain::ObjectLinks,
            (A::DataLinks, E::Individual) => ValueDomain::DataLinks,
            (A::Instance, E::Concept) => ValueDomain::Individuals,
            (A::Definition, E::Concept) => ValueDomain::Restrictions,
            (A::Sub | A::Super | A::Equivalent | A::Disjoint, E::Concept) => ValueDomain::Concepts,
            (A::Sub | A::Super | A::Equivalent | A::Disjoint | A::Inverse, E::ObjectProperty) => {
                ValueDomain::ObjectProperties
            }
            (A::Sub | A::Super | A::Equivalent | A::Disjoint, E::DataProperty) => {
                ValueDomain::DataProperties
            }
            (A::Domain | A::Range, E::ObjectProperty | E::DataProperty) => ValueDomain::Restrictions,
            _ => return None,
        };
        Some(domain)
    }

    pub fn supports(self, entity: EntityKind) -> bool {
        self.value_domain(entity).is_some()
    }

    /// Whether the aspect holds predicate-keyed link sets.
    pub fn is_link(self) -> bool {
        matches!(self, AspectKind::ObjectLinks | AspectKind::DataLinks)
    }

    /// The store predicate for a set-valued aspect on `entity`. Link aspects
    /// use one predicate per property instead.
    pub fn predicate(self, entity: EntityKind) -> Option<AxiomPredicate> {
        if self.is_link() || !self.supports(entity) {
            return None;
        }
        Some(AxiomPredicate::Aspect {
            aspect: self,
            entity,
        })
    }

    /// Symbol used when rendering descriptors.
    pub fn symbol(self) -> &'static str {
        match self {
            AspectKind::Type => "∈",
            AspectKind::Instance => "∋",
            AspectKind::SameAs => "=",
            AspectKind::DifferentFrom => "≠",
            AspectKind::ObjectLinks => "→",
            AspectKind::DataLinks => "≐",
            AspectKind::Sub => "⊃",
            AspectKind::Super => "⊂",
            AspectKind::Equivalent => "≡",
            AspectKind::Disjoint => "≠",
            AspectKind::Inverse => "↔",
            AspectKind::Domain => "[≐,--]",
            AspectKind::Range => "[--,≐]",
            AspectKind::Definition => "⊑",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AspectKind::Type => "type",
            AspectKind::Instance => "instance",
            AspectKind::SameAs => "same-as",
            AspectKind::DifferentFrom => "different-from",
            AspectKind::ObjectLinks => "object-links",
            AspectKind::DataLinks => "data-links",
            AspectKind::Sub => "sub",
            AspectKind::Super => "super",
            AspectKind::Equivalent => "equivalent",
            AspectKind::Disjoint => "disjoint",
            AspectKind::Inverse => "inverse",
            AspectKind::Domain => "domain",
            AspectKind::Range => "range",
            AspectKind::Definition => "definition",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_only_on_object_properties() {
        assert!(AspectKind::Inverse.supports(EntityKind::ObjectProperty));
        assert!(!AspectKind::Inverse.supports(EntityKind::DataProperty));
        assert!(!AspectKind::Inverse.supports(EntityKind::Concept));
    }

    #[test]
    fn link_aspects_have_no_single_predicate() {
        assert!(AspectKind::ObjectLinks.supports(EntityKind::Individual));
        assert!(AspectKind::ObjectLinks.predicate(EntityKind::Individual).is_none());
        assert!(AspectKind::Type.predicate(EntityKind::Individual).is_some());
    }

    #[test]
    fn every_entity_kind_has_aspects() {
        for entity in [
            EntityKind::Individual,
            EntityKind::Concept,
            EntityKind::ObjectProperty,
            EntityKind::DataProperty,
        ] {
            assert!(AspectKind::ALL.iter().any(|a| a.supports(entity)));
        }
    }

    #[test]
    fn value_domains() {
        assert_eq!(
            AspectKind::Sub.value_domain(EntityKind::DataProperty),
            Some(ValueDomain::DataProperties)
        );
        assert_eq!(
            AspectKind::Range.value_domain(EntityKind::ObjectProperty),
            Some(ValueDomain::Restrictions)
        );
        assert_eq!(AspectKind::Type.value_domain(EntityKind::Concept), None);
    }
}
