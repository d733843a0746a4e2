//! # Style Error Types
//!
//! Errors raised while building stylesheets. These are load-time failures:
//! they point at an authoring mistake in a stylesheet document or a config file.
//!
//! Problems found while *applying* styles (an unknown style name, no stylesheet
//! to resolve against) are never errors. They are reported as diagnostics by
//! the application engine in `swatch-core` so a typo can never take down a
//! running UI.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or building stylesheets.
#[derive(Error, Debug)]
pub enum StyleError {
    /// A property record could not be matched to any registered binding and value type.
    #[error(
        "Style class '{style_class}': property '{property_name}' of type '{property_type}' \
         could not be resolved by any registered property binding"
    )]
    UnresolvedProperty {
        /// The style class containing the property.
        style_class: String,
        /// The property name as written in the document.
        property_name: String,
        /// The declared property type as written in the document.
        property_type: String,
    },

    /// The stylesheet document is not valid JSON or does not have the expected shape.
    #[error("Invalid stylesheet document{}: {details}", display_path(.path))]
    InvalidDocument {
        /// The file the document was read from, if any.
        path: Option<PathBuf>,
        /// Details about what went wrong.
        details: String,
    },

    /// A configuration file could not be parsed.
    #[error("Failed to parse style config {path:?}: {details}")]
    ConfigParse {
        /// The config file.
        path: PathBuf,
        /// Details about the parse error.
        details: String,
    },

    /// A named stylesheet was requested but no source with that name exists.
    #[error("Stylesheet '{name}' not found")]
    StylesheetNotFound {
        /// The requested name.
        name: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for style operations.
pub type StyleResult<T> = Result<T, StyleError>;

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" {}", path.display()),
        None => String::new(),
    }
}

impl StyleError {
    /// Create an unresolved property error.
    pub fn unresolved_property(
        style_class: impl Into<String>,
        property_name: impl Into<String>,
        property_type: impl Into<String>,
    ) -> Self {
        Self::UnresolvedProperty {
            style_class: style_class.into(),
            property_name: property_name.into(),
            property_type: property_type.into(),
        }
    }

    /// Create an invalid document error.
    pub fn invalid_document(path: Option<PathBuf>, details: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path,
            details: details.into(),
        }
    }

    /// Create a config parse error.
    pub fn config_parse(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create a stylesheet not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::StylesheetNotFound { name: name.into() }
    }

    /// Attach a file path to an [StyleError::InvalidDocument] error that has none.
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            Self::InvalidDocument { path: None, details } => Self::InvalidDocument {
                path: Some(file.into()),
                details,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_property_names_class_and_property() {
        let message = StyleError::unresolved_property("Header", "textColor", "Color").to_string();
        assert!(message.contains("'Header'"));
        assert!(message.contains("'textColor'"));
        assert!(message.contains("'Color'"));
    }

    #[test]
    fn with_path_only_fills_missing_paths() {
        let error = StyleError::invalid_document(None, "bad").with_path("a.json");
        assert_eq!(error.to_string(), "Invalid stylesheet document a.json: bad");

        let error = StyleError::invalid_document(Some("b.json".into()), "bad").with_path("a.json");
        assert_eq!(error.to_string(), "Invalid stylesheet document b.json: bad");
    }
}
