#![warn(missing_docs)]

//! # Swatch Theme
//!
//! The style model of swatch: named, combinable styles, the registry that
//! turns stylesheet documents into typed property values, and the sources those
//! documents come from.
//!
//! ## Overview
//!
//! - **[style::Style]**: an ordered list of property assignments. Combining two
//!   styles concatenates them, later assignments win.
//! - **[stylesheet::Stylesheet]**: named styles, looked up with the tolerant
//!   matching of [name::is_variant].
//! - **[registry::PropertyRegistry]**: value types (how a raw value is parsed) and
//!   property bindings (which property a value is applied to).
//! - **[json::JsonStyleParser]**: builds stylesheets from JSON documents.
//! - **[source::JsonStylesheet]**: a JSON document kept in a bundled and a writable
//!   copy, memoized for a short window.
//! - **[config::StyleConfig]**: settings from code, environment or TOML.
//!
//! Applying styles to live components and re-theming a running UI is the job of
//! `swatch-core`.
//!
//! ## Example
//!
//! ```rust
//! use swatch_theme::json::JsonStyleParser;
//! use swatch_theme::registry::PropertyRegistry;
//! use swatch_theme::value::PropertyValue;
//!
//! let registry = PropertyRegistry::with_builtins();
//! let sheet = JsonStyleParser::new(&registry)
//!     .parse_str(r#"[{
//!         "styleClass": "Card",
//!         "properties": [
//!             { "propertyName": "cornerRadius", "propertyType": "CGFloat", "propertyValue": 12 }
//!         ]
//!     }]"#)
//!     .unwrap();
//!
//! let card = sheet.get("card").unwrap().properties();
//! assert_eq!(card.value("layer", "cornerRadius"), Some(&PropertyValue::Number(12.0)));
//! ```

/// Contains the built-in value types and property bindings.
pub mod builtin;
/// Contains the [config::StyleConfig] struct for style configuration.
pub mod config;
/// Contains the [error::StyleError] type.
pub mod error;
/// Contains the JSON stylesheet parser.
pub mod json;
/// Contains name matching.
pub mod name;
/// Contains the [registry::PropertyRegistry] and the [registry::StyleTarget] trait.
pub mod registry;
/// Contains stylesheet sources.
pub mod source;
/// Contains the [store::StylePropertyStore].
pub mod store;
/// Contains the [style::Style] struct.
pub mod style;
/// Contains the [stylesheet::Stylesheet] struct.
pub mod stylesheet;
/// Contains property values.
pub mod value;

pub use error::{StyleError, StyleResult};
