//! Non-fatal diagnostics raised while reading the mirror.
//!
//! Single-value accessors on multi-valued sets are not errors: they pick the
//! first value and report a [`CardinalityWarning`] through a
//! [`DiagnosticSink`]. The sink is injected per ontology handle, so tests can
//! collect warnings while applications route them to `tracing`.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Why a single-value access was ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardinalityKind {
    /// The set is flagged singleton but holds more than one value.
    SingletonViolated,
    /// The set is not flagged singleton and holds more than one value.
    AmbiguousSingleValue,
}

/// A single-value access found more than one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardinalityWarning {
    pub kind: CardinalityKind,
    /// Display name of the predicate that was accessed.
    pub predicate: String,
    /// How many values the predicate holds.
    pub values: usize,
    /// Display name of the value that was returned.
    pub chosen: String,
}

impl std::fmt::Display for CardinalityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.kind {
            CardinalityKind::SingletonViolated => "singleton",
            CardinalityKind::AmbiguousSingleValue => "non-singleton",
        };
        write!(
            f,
            "single value requested from {what} predicate {} holding {} values; returning {}",
            self.predicate, self.values, self.chosen
        )
    }
}

/// A destination for cardinality diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn cardinality(&self, warning: &CardinalityWarning);
}

/// Logs diagnostics at `warn` level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn cardinality(&self, warning: &CardinalityWarning) {
        tracing::warn!(
            predicate = %warning.predicate,
            values = warning.values,
            chosen = %warning.chosen,
            kind = ?warning.kind,
            "cardinality mismatch"
        );
    }
}

/// Collects diagnostics in memory (thread-safe).
#[derive(Debug, Default)]
pub struct CollectingSink {
    pending: Mutex<Vec<CardinalityWarning>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all collected warnings.
    pub fn drain(&self) -> Vec<CardinalityWarning> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn cardinality(&self, warning: &CardinalityWarning) {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(warning.clone());
    }
}
