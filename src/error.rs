//! Rich diagnostic error types for axiom-mirror.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! so a failed reconciliation tells the caller which side failed and what to do
//! about it. Cardinality problems are not errors; they travel through
//! [`crate::diagnostics`].

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for axiom-mirror.
#[derive(Debug, Error, Diagnostic)]
pub enum MirrorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Unresolved(#[from] ReferenceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Reference errors
// ---------------------------------------------------------------------------

/// A name or value that cannot be mapped to a store-side identifier.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum ReferenceError {
    #[error("invalid IRI: {value}")]
    #[diagnostic(
        code(mirror::reference::invalid_iri),
        help(
            "Short names are resolved against the ontology namespace. \
             Check that the namespace is an absolute IRI and that the name \
             contains no whitespace or reserved characters."
        )
    )]
    InvalidIri { value: String },

    #[error("undeclared {kind}: {iri}")]
    #[diagnostic(
        code(mirror::reference::undeclared),
        help(
            "The store runs in strict mode and only accepts entities that were \
             declared first. Call `OntologyRef::declare()` for this entity, or \
             disable `strict` in the configuration."
        )
    )]
    Undeclared { kind: String, iri: String },

    #[error("invalid literal {lexical:?}: {reason}")]
    #[diagnostic(
        code(mirror::reference::invalid_literal),
        help("The literal could not be lowered to RDF. Check its language tag and datatype IRI.")
    )]
    InvalidLiteral { lexical: String, reason: String },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("RDF backend error: {message}")]
    #[diagnostic(
        code(mirror::store::backend),
        help(
            "The oxigraph store reported a failure. If the store is persistent, \
             check that the data directory is writable and not opened by another process."
        )
    )]
    Backend { message: String },

    #[error("predicate {predicate} is not supported for {subject}")]
    #[diagnostic(
        code(mirror::store::unsupported),
        help(
            "The aspect does not apply to this kind of entity, or the value shape \
             cannot be stored under this predicate (e.g. a literal as a class)."
        )
    )]
    Unsupported { subject: String, predicate: String },

    #[error("change buffer is unavailable: {message}")]
    #[diagnostic(
        code(mirror::store::buffer),
        help("A thread panicked while holding the change buffer. Reopen the store.")
    )]
    Buffer { message: String },

    #[error("cannot {operation} {path}: {message}")]
    #[diagnostic(
        code(mirror::store::file),
        help("Check that the file exists and that its syntax matches the chosen format.")
    )]
    File {
        operation: &'static str,
        path: String,
        message: String,
    },

    #[error("{operation} needs the RDF backend")]
    #[diagnostic(
        code(mirror::store::not_rdf),
        help("Set `backend = \"rdf\"` in the configuration.")
    )]
    NotRdf { operation: &'static str },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Unresolved(#[from] ReferenceError),
}

// ---------------------------------------------------------------------------
// Descriptor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum DescriptorError {
    #[error("aspect {aspect} does not apply to {entity} descriptors")]
    #[diagnostic(
        code(mirror::descriptor::unsupported_aspect),
        help("Check the layout's aspect list against the entity kind it is declared for.")
    )]
    UnsupportedAspect { aspect: String, entity: String },

    #[error("layout {layout} describes {expected}, but the ground is a {actual}")]
    #[diagnostic(
        code(mirror::descriptor::entity_mismatch),
        help("Pick a layout declared for the ground's entity kind.")
    )]
    EntityMismatch {
        layout: String,
        expected: String,
        actual: String,
    },

    #[error("aspect {aspect} is not registered in layout {layout}")]
    #[diagnostic(
        code(mirror::descriptor::not_registered),
        help("Use a layout that lists this aspect, e.g. one of the FULL_* layouts.")
    )]
    NotRegistered { aspect: String, layout: String },

    #[error("aspect {aspect} does not hold {requested} values")]
    #[diagnostic(
        code(mirror::descriptor::value_mismatch),
        help("Request the aspect's values with the value type listed for it in the aspect table.")
    )]
    ValueMismatch { aspect: String, requested: String },

    #[error("no descriptor factory registered for aspect {aspect}")]
    #[diagnostic(
        code(mirror::descriptor::no_factory),
        help("Register one with `Descriptor::with_factory()` before calling `build()`.")
    )]
    NoFactory { aspect: String },

    #[error("aspect {aspect} holds values that cannot anchor a descriptor")]
    #[diagnostic(
        code(mirror::descriptor::not_expandable),
        help("Only aspects over named entities can be expanded; restrictions and literals cannot.")
    )]
    NotExpandable { aspect: String },

    #[error("aspect {aspect} cannot hold {value}")]
    #[diagnostic(
        code(mirror::descriptor::invalid_value),
        help("Definitions take anonymous restrictions only; put named classes in the Equivalent or Super aspect.")
    )]
    InvalidValue { aspect: String, value: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot read configuration {path}")]
    #[diagnostic(
        code(mirror::config::io),
        help("Check that the configuration file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration {path}: {message}")]
    #[diagnostic(
        code(mirror::config::parse),
        help("The file must be TOML with at least `name` and `namespace` keys.")
    )]
    Parse { path: String, message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(mirror::config::invalid), help("{message}"))]
    Invalid { message: String },
}

/// Convenience alias for functions returning axiom-mirror results.
pub type MirrorResult<T> = std::result::Result<T, MirrorError>;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
