//! The local side of the mirror: value sets a descriptor holds per aspect.
//!
//! - [`AxiomSet`]: one aspect's values for one subject
//! - [`SemanticAxiom`] / [`SemanticAxiomSet`]: predicate-keyed value sets,
//!   for subjects carrying many properties with their own values

pub mod semantic;
pub mod set;

pub use semantic::{SemanticAxiom, SemanticAxiomSet};
pub use set::AxiomSet;
