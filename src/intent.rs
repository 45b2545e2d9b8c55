//! Audit records of reconciliation.
//!
//! Every `read` and `write` returns the [`MappingIntent`]s describing what it
//! changed, in the order it changed them. Intents are created only by the
//! synchronization protocol and never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aspect::AspectKind;
use crate::entity::Iri;
use crate::term::Term;

/// Which side was brought in line with the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Local set updated from the store.
    Read,
    /// Store updated from the local set.
    Write,
}

/// What happened to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Add,
    Remove,
    /// Both sides already agreed.
    NoChange,
}

/// One reconciliation action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingIntent {
    direction: Direction,
    action: Action,
    aspect: AspectKind,
    subject: Iri,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    predicate: Option<Iri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Term>,
}

impl MappingIntent {
    pub(crate) fn change(
        direction: Direction,
        action: Action,
        aspect: AspectKind,
        subject: &Iri,
        predicate: Option<&Iri>,
        value: Term,
    ) -> Self {
        Self {
            direction,
            action,
            aspect,
            subject: subject.clone(),
            predicate: predicate.cloned(),
            value: Some(value),
        }
    }

    pub(crate) fn no_change(direction: Direction, aspect: AspectKind, subject: &Iri) -> Self {
        Self {
            direction,
            action: Action::NoChange,
            aspect,
            subject: subject.clone(),
            predicate: None,
            value: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn aspect(&self) -> AspectKind {
        self.aspect
    }

    pub fn subject(&self) -> &Iri {
        &self.subject
    }

    /// The link property, for object and data link aspects.
    pub fn predicate(&self) -> Option<&Iri> {
        self.predicate.as_ref()
    }

    /// The value added or removed; `None` for [`Action::NoChange`].
    pub fn value(&self) -> Option<&Term> {
        self.value.as_ref()
    }

    pub fn is_change(&self) -> bool {
        self.action != Action::NoChange
    }
}

impl fmt::Display for MappingIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Read => "read",
            Direction::Write => "write",
        };
        let action = match self.action {
            Action::Add => "+",
            Action::Remove => "-",
            Action::NoChange => "=",
        };
        write!(
            f,
            "{direction} {action} {} {} {}",
            self.subject.local_name(),
            self.aspect,
            self.aspect.symbol()
        )?;
        if let Some(p) = &self.predicate {
            write!(f, " {}", p.local_name())?;
        }
        if let Some(v) = &self.value {
            write!(f, " {v}")?;
        }
        Ok(())
    }
}

/// Counts of changes in a batch of intents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSummary {
    pub added: usize,
    pub removed: usize,
    pub unchanged_aspects: usize,
}

impl IntentSummary {
    pub fn of(intents: &[MappingIntent]) -> Self {
        let mut summary = Self::default();
        for intent in intents {
            match intent.action {
                Action::Add => summary.added += 1,
                Action::Remove => summary.removed += 1,
                Action::NoChange => summary.unchanged_aspects += 1,
            }
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

impl fmt::Display for IntentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} removed, {} aspects unchanged",
            self.added, self.removed, self.unchanged_aspects
        )
    }
}
