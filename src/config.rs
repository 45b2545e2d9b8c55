//! Mirror configuration, stored as TOML.
//!
//! ```toml
//! name = "home"
//! namespace = "http://example.org/home#"
//! backend = "rdf"
//! data_dir = "/var/lib/home-ontology"
//! buffered = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entity::Iri;
use crate::error::ConfigError;

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Which store implementation backs an ontology handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Asserted facts in process memory.
    #[default]
    Memory,
    /// RDF/OWL statements in oxigraph.
    Rdf,
}

/// Configuration of one ontology handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Ontology name, used in logs.
    pub name: String,
    /// Namespace short names resolve against.
    pub namespace: Iri,
    #[serde(default)]
    pub backend: Backend,
    /// Directory for a persistent RDF store. `None` keeps it in memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Queue changes until the reasoner is synchronized.
    #[serde(default)]
    pub buffered: bool,
    /// Reject references to undeclared entities (memory backend only).
    #[serde(default)]
    pub strict: bool,
}

impl MirrorConfig {
    /// A memory-backed configuration with the given name and namespace.
    pub fn new(name: &str, namespace: Iri) -> Self {
        Self {
            name: name.to_string(),
            namespace,
            backend: Backend::Memory,
            data_dir: None,
            buffered: false,
            strict: false,
        }
    }

    /// Check option combinations that deserialize fine but make no sense.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "`name` must not be empty".into(),
            });
        }
        if self.data_dir.is_some() && self.backend != Backend::Rdf {
            return Err(ConfigError::Invalid {
                message: "`data_dir` requires `backend = \"rdf\"`".into(),
            });
        }
        if self.strict && self.backend != Backend::Memory {
            return Err(ConfigError::Invalid {
                message: "`strict` is only supported by `backend = \"memory\"`".into(),
            });
        }
        Ok(())
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn parse(content: &str, origin: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_defaults_to_memory() {
        let config = MirrorConfig::from_toml_str(
            r#"
            name = "home"
            namespace = "http://example.org/home#"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend, Backend::Memory);
        assert!(!config.buffered);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn invalid_namespace_is_a_parse_error() {
        let err = MirrorConfig::from_toml_str(
            r#"
            name = "home"
            namespace = "not an iri"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn data_dir_requires_rdf_backend() {
        let err = MirrorConfig::from_toml_str(
            r#"
            name = "home"
            namespace = "http://example.org/home#"
            data_dir = "/tmp/home"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn strict_rdf_is_rejected() {
        let mut config = MirrorConfig::new("home", Iri::new("http://example.org/home#").unwrap());
        config.backend = Backend::Rdf;
        config.strict = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("conf").join("mirror.toml");
        let mut config = MirrorConfig::new("home", Iri::new("http://example.org/home#").unwrap());
        config.backend = Backend::Rdf;
        config.data_dir = Some(dir.path().join("rdf"));
        config.buffered = true;
        config.save(&path).unwrap();
        assert_eq!(MirrorConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = MirrorConfig::load(Path::new("/nonexistent/mirror.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
