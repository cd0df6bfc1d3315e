//! CLI configuration, read from a KDL file.
//!
//! ```kdl
//! in-place true
//! log-level "debug"
//! ```

use std::path::{Path, PathBuf};

use kdl::KdlDocument;
use miette::{Diagnostic, SourceSpan};

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    #[diagnostic(code(tagcomment::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {message}")]
    #[diagnostic(code(tagcomment::config::parse))]
    Parse {
        message: String,
        #[source_code]
        input: String,
        #[label("here")]
        span: SourceSpan,
        #[help]
        help: Option<&'static str>,
    },

    #[error("config key `{key}` expects {expected}")]
    #[diagnostic(code(tagcomment::config::invalid_value))]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
    },
}

// kdl 4 reports through an older miette, so its span and help are carried
// over by hand to keep the fancy handler pointing at the bad token.
impl From<kdl::KdlError> for ConfigError {
    fn from(err: kdl::KdlError) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
            span: (err.span.offset(), err.span.len()).into(),
            help: err.help,
            input: err.input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Write the result back to the file instead of printing it.
    pub in_place: bool,
    /// Console filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            in_place: false,
            log_level: "warn".to_owned(),
        }
    }
}

impl Config {
    /// `<config_dir>/tagcomment/config.kdl`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tagcomment").join("config.kdl"))
    }

    /// Load from an explicit path. The file must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Load from the default location, falling back to defaults if there is no file.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let doc: KdlDocument = content.parse()?;
        let mut config = Self::default();

        if let Some(node) = doc.get("in-place") {
            config.in_place = node
                .entries()
                .first()
                .and_then(|entry| entry.value().as_bool())
                .ok_or(ConfigError::InvalidValue {
                    key: "in-place",
                    expected: "a boolean",
                })?;
        }

        if let Some(node) = doc.get("log-level") {
            config.log_level = node
                .entries()
                .first()
                .and_then(|entry| entry.value().as_string())
                .ok_or(ConfigError::InvalidValue {
                    key: "log-level",
                    expected: "a string",
                })?
                .to_owned();
        }

        Ok(config)
    }
}
