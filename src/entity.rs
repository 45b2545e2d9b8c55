//! Identifiers and value types for ontology entities.
//!
//! Every named thing in an ontology is identified by an [`Iri`]. The typed
//! newtypes ([`Individual`], [`Concept`], [`ObjectProperty`], [`DataProperty`])
//! keep an individual from being filed where a class is expected, and
//! [`Literal`] carries data values with their datatype.

use std::fmt;
use std::str::FromStr;

use oxigraph::model::NamedNode;
use oxsdatatypes::{
    Boolean, Date, DateTime, DayTimeDuration, Decimal, Double, Duration, Float, GDay, GMonth,
    GMonthDay, GYear, GYearMonth, Integer, Time, YearMonthDuration,
};
use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;

pub(crate) const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub(crate) const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// Validated absolute IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri(String);

impl Iri {
    /// Validate and wrap an absolute IRI.
    pub fn new(value: impl Into<String>) -> Result<Self, ReferenceError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| ReferenceError::InvalidIri {
            value: value.clone(),
        })?;
        Ok(Self(value))
    }

    /// Resolve a short name against a namespace.
    ///
    /// Names that already parse as absolute IRIs are taken as-is. A namespace
    /// without a trailing `#` or `/` gets a `#` separator.
    pub fn resolve(namespace: &Iri, name: &str) -> Result<Self, ReferenceError> {
        if name.contains(':') {
            if let Ok(iri) = Self::new(name) {
                return Ok(iri);
            }
        }
        let ns = namespace.as_str();
        if ns.ends_with('#') || ns.ends_with('/') {
            Self::new(format!("{ns}{name}"))
        } else {
            Self::new(format!("{ns}#{name}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the last `#` or `/`, used as a display name.
    pub fn local_name(&self) -> &str {
        let s = self.0.as_str();
        match s.rfind(['#', '/']) {
            Some(pos) if pos + 1 < s.len() => &s[pos + 1..],
            _ => s,
        }
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Iri {
    type Error = ReferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.0
    }
}

/// Classification of a named entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Individual,
    Concept,
    ObjectProperty,
    DataProperty,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Individual => write!(f, "individual"),
            EntityKind::Concept => write!(f, "class"),
            EntityKind::ObjectProperty => write!(f, "object property"),
            EntityKind::DataProperty => write!(f, "data property"),
        }
    }
}

macro_rules! named_entity {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Iri);

        impl $name {
            pub const KIND: EntityKind = $kind;

            pub fn new(iri: Iri) -> Self {
                Self(iri)
            }

            pub fn iri(&self) -> &Iri {
                &self.0
            }

            pub fn into_iri(self) -> Iri {
                self.0
            }
        }

        impl From<Iri> for $name {
            fn from(iri: Iri) -> Self {
                Self(iri)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.0.local_name())
            }
        }
    };
}

named_entity!(
    /// A named individual (ABox member).
    Individual => EntityKind::Individual
);
named_entity!(
    /// A named class.
    Concept => EntityKind::Concept
);
named_entity!(
    /// A property linking individuals to individuals.
    ObjectProperty => EntityKind::ObjectProperty
);
named_entity!(
    /// A property linking individuals to literals.
    DataProperty => EntityKind::DataProperty
);

/// A data value: lexical form, datatype and optional language tag.
///
/// Equality is lexical: `"1"^^xsd:integer` and `"01"^^xsd:integer` differ,
/// exactly as they would in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    datatype: Iri,
    language: Option<String>,
}

impl Literal {
    /// A literal with an explicit datatype.
    ///
    /// Values of the XSD numeric, boolean, date/time and duration types are
    /// normalized to their canonical lexical form (`"01"` becomes `"1"`,
    /// `inf` becomes `INF`), and integer subtypes to `xsd:integer`. That is
    /// the form the RDF store reports back, so equality with stored values
    /// holds. Values that do not parse are kept verbatim.
    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        let lexical = lexical.into();
        let (lexical, datatype) = match canonical_form(&lexical, datatype.as_str()) {
            Some((canonical, local)) => (canonical, xsd(local)),
            None => (lexical, datatype),
        };
        Self {
            lexical,
            datatype,
            language: None,
        }
    }

    /// A language-tagged string. The tag is normalized to lowercase.
    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Iri(RDF_LANG_STRING.to_string()),
            language: Some(language.into().to_lowercase()),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::typed(value, xsd("string"))
    }

    pub fn integer(value: i64) -> Self {
        Self::typed(value.to_string(), xsd("integer"))
    }

    pub fn double(value: f64) -> Self {
        Self::typed(value.to_string(), xsd("double"))
    }

    pub fn boolean(value: bool) -> Self {
        Self::typed(value.to_string(), xsd("boolean"))
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> &Iri {
        &self.datatype
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.lexical.parse().ok()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.lexical.parse().ok()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.lexical.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(lang) => write!(f, "\"{}\"@{lang}", self.lexical),
            None if self.datatype.as_str() == format!("{XSD}string") => {
                write!(f, "\"{}\"", self.lexical)
            }
            None => f.write_str(&self.lexical),
        }
    }
}

fn canonical_form(lexical: &str, datatype: &str) -> Option<(String, &'static str)> {
    fn parse<T: FromStr + fmt::Display>(
        lexical: &str,
        local: &'static str,
    ) -> Option<(String, &'static str)> {
        lexical.parse::<T>().ok().map(|v| (v.to_string(), local))
    }

    match datatype.strip_prefix(XSD)? {
        "boolean" => parse::<Boolean>(lexical, "boolean"),
        "float" => parse::<Float>(lexical, "float"),
        "double" => parse::<Double>(lexical, "double"),
        "decimal" => parse::<Decimal>(lexical, "decimal"),
        "integer" | "byte" | "short" | "int" | "long" | "unsignedByte" | "unsignedShort"
        | "unsignedInt" | "unsignedLong" | "positiveInteger" | "negativeInteger"
        | "nonPositiveInteger" | "nonNegativeInteger" => parse::<Integer>(lexical, "integer"),
        "dateTime" | "dateTimeStamp" => parse::<DateTime>(lexical, "dateTime"),
        "time" => parse::<Time>(lexical, "time"),
        "date" => parse::<Date>(lexical, "date"),
        "gYearMonth" => parse::<GYearMonth>(lexical, "gYearMonth"),
        "gYear" => parse::<GYear>(lexical, "gYear"),
        "gMonthDay" => parse::<GMonthDay>(lexical, "gMonthDay"),
        "gDay" => parse::<GDay>(lexical, "gDay"),
        "gMonth" => parse::<GMonth>(lexical, "gMonth"),
        "duration" => parse::<Duration>(lexical, "duration"),
        "yearMonthDuration" => parse::<YearMonthDuration>(lexical, "yearMonthDuration"),
        "dayTimeDuration" => parse::<DayTimeDuration>(lexical, "dayTimeDuration"),
        _ => None,
    }
}

/// An IRI in the XSD namespace.
pub(crate) fn xsd(local: &str) -> Iri {
    Iri(format!("{XSD}{local}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns() -> Iri {
        Iri::new("http://example.org/home#").unwrap()
    }

    #[test]
    fn iri_rejects_relative_names() {
        assert!(Iri::new("Robot1").is_err());
        assert!(Iri::new("not an iri").is_err());
        assert!(Iri::new("http://example.org/home#Robot1").is_ok());
    }

    #[test]
    fn resolve_short_name() {
        let iri = Iri::resolve(&ns(), "Robot1").unwrap();
        assert_eq!(iri.as_str(), "http://example.org/home#Robot1");
    }

    #[test]
    fn resolve_adds_separator() {
        let ns = Iri::new("http://example.org/home").unwrap();
        let iri = Iri::resolve(&ns, "Room1").unwrap();
        assert_eq!(iri.as_str(), "http://example.org/home#Room1");
    }

    #[test]
    fn resolve_keeps_absolute_names() {
        let iri = Iri::resolve(&ns(), "http://other.org/x/Door").unwrap();
        assert_eq!(iri.as_str(), "http://other.org/x/Door");
    }

    #[test]
    fn resolve_rejects_whitespace() {
        assert!(Iri::resolve(&ns(), "Living Room").is_err());
    }

    #[test]
    fn local_name() {
        assert_eq!(Iri::new("http://example.org/home#Robot1").unwrap().local_name(), "Robot1");
        assert_eq!(Iri::new("http://example.org/things/Door").unwrap().local_name(), "Door");
    }

    #[test]
    fn entity_display_uses_local_name() {
        let robot = Individual::new(Iri::resolve(&ns(), "Robot1").unwrap());
        assert_eq!(robot.to_string(), "Robot1");
        assert_eq!(Individual::KIND, EntityKind::Individual);
    }

    #[test]
    fn literal_constructors() {
        assert_eq!(Literal::integer(42).as_i64(), Some(42));
        assert_eq!(Literal::boolean(true).as_bool(), Some(true));
        assert_eq!(Literal::string("red").to_string(), "\"red\"");
        assert_eq!(Literal::lang("rouge", "FR").language(), Some("fr"));
        assert_eq!(Literal::integer(7).to_string(), "7");
    }

    #[test]
    fn typed_literals_are_canonical() {
        assert_eq!(Literal::typed("01", xsd("integer")).lexical(), "1");
        assert_eq!(Literal::double(f64::INFINITY).lexical(), "INF");
        assert_eq!(Literal::double(f64::NEG_INFINITY).lexical(), "-INF");
        assert_eq!(Literal::typed("1", xsd("boolean")).lexical(), "true");

        let byte = Literal::typed("+7", xsd("byte"));
        assert_eq!(byte.lexical(), "7");
        assert_eq!(byte.datatype(), &xsd("integer"));

        // Unparseable values and unknown datatypes stay as written.
        assert_eq!(Literal::typed("lots", xsd("integer")).lexical(), "lots");
        assert_eq!(Literal::typed("007", xsd("token")).lexical(), "007");
        assert_eq!(Literal::string(" 01 ").lexical(), " 01 ");
    }

    #[test]
    fn iri_serde_validates() {
        let ok: Result<Iri, _> = serde_json::from_str("\"http://example.org/a\"");
        assert!(ok.is_ok());
        let bad: Result<Iri, _> = serde_json::from_str("\"no scheme\"");
        assert!(bad.is_err());
    }
}
