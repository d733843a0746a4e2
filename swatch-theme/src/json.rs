//! # JSON Stylesheets
//!
//! Parses stylesheet documents into [Stylesheet]s.
//!
//! ## Document Format
//!
//! ```json
//! [
//!   {
//!     "styleClass": "Header Text",
//!     "properties": [
//!       { "propertyName": "textColor", "propertyType": "Color", "propertyValue": "#1A1A1AFF" },
//!       { "propertySetName": "text", "propertyName": "font", "propertyType": "UIFont",
//!         "propertyValue": { "size": 22, "weight": "bold" } }
//!     ]
//!   }
//! ]
//! ```
//!
//! Each property record is resolved through
//! [PropertyRegistry::resolve_property]. A record nothing resolves is an authoring
//! mistake: under [UnresolvedPolicy::Fail] loading stops with
//! [StyleError::UnresolvedProperty], under [UnresolvedPolicy::Skip] the record is
//! dropped with a warning.
//!
//! A style class declared twice gets the properties of both records, the later
//! ones applied last.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{StyleError, StyleResult};
use crate::registry::PropertyRegistry;
use crate::style::Style;
use crate::stylesheet::Stylesheet;

/// What to do with a property record no binding can resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Stop loading with an error.
    #[default]
    Fail,
    /// Drop the record and log a warning.
    Skip,
}

/// One `{styleClass, properties}` record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleClassRecord {
    /// The style name.
    pub style_class: String,
    /// The property records.
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
}

/// One property record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// Optional property group the property must belong to.
    #[serde(default)]
    pub property_set_name: Option<String>,
    /// The property name.
    pub property_name: String,
    /// The declared value type.
    pub property_type: String,
    /// The raw value.
    #[serde(default)]
    pub property_value: Value,
}

/// Parses stylesheet documents against a [PropertyRegistry].
#[derive(Debug, Clone, Copy)]
pub struct JsonStyleParser<'a> {
    registry: &'a PropertyRegistry,
    policy: UnresolvedPolicy,
}

impl<'a> JsonStyleParser<'a> {
    /// Create a parser failing on unresolved properties.
    pub fn new(registry: &'a PropertyRegistry) -> Self {
        Self {
            registry,
            policy: UnresolvedPolicy::Fail,
        }
    }

    /// Set the unresolved property policy.
    pub fn with_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parse a document from a string.
    pub fn parse_str(&self, document: &str) -> StyleResult<Stylesheet> {
        let records: Vec<StyleClassRecord> = serde_json::from_str(document)
            .map_err(|e| StyleError::invalid_document(None, e.to_string()))?;
        self.build(records)
    }

    /// Parse a document from an already decoded JSON value.
    pub fn parse_value(&self, document: Value) -> StyleResult<Stylesheet> {
        let records: Vec<StyleClassRecord> = serde_json::from_value(document)
            .map_err(|e| StyleError::invalid_document(None, e.to_string()))?;
        self.build(records)
    }

    /// Build a stylesheet from decoded records.
    pub fn build(&self, records: Vec<StyleClassRecord>) -> StyleResult<Stylesheet> {
        let mut sheet = Stylesheet::new();
        for record in records {
            let style = self.build_style(&record)?;
            match sheet.get_mut(&record.style_class) {
                Some(existing) => {
                    log::debug!("Style class '{}' declared more than once", record.style_class);
                    existing.extend(&style);
                },
                None => {
                    sheet.insert(record.style_class, style);
                },
            }
        }
        Ok(sheet)
    }

    fn build_style(&self, record: &StyleClassRecord) -> StyleResult<Style> {
        let mut style = Style::new();
        for property in &record.properties {
            let resolved = self.registry.resolve_property(
                property.property_set_name.as_deref(),
                &property.property_name,
                &property.property_type,
                &property.property_value,
            );
            match (resolved, self.policy) {
                (Some(assignment), _) => style.push(assignment),
                (None, UnresolvedPolicy::Fail) => {
                    return Err(StyleError::unresolved_property(
                        &record.style_class,
                        &property.property_name,
                        &property.property_type,
                    ));
                },
                (None, UnresolvedPolicy::Skip) => {
                    log::warn!(
                        "Skipping property '{}' ({}) of style class '{}': no binding resolves it",
                        property.property_name,
                        property.property_type,
                        record.style_class
                    );
                },
            }
        }
        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PropertyValue;

    const DOCUMENT: &str = r##"[
        {
            "styleClass": "Header Text",
            "properties": [
                { "propertyName": "textColor", "propertyType": "Color", "propertyValue": "#FF0000" },
                { "propertySetName": "text", "propertyName": "font", "propertyType": "UIFont",
                  "propertyValue": { "size": 22, "weight": "bold" } }
            ]
        },
        {
            "styleClass": "Rounded",
            "properties": [
                { "propertyName": "corner radius", "propertyType": "CGFloat", "propertyValue": 8 }
            ]
        }
    ]"##;

    #[test]
    fn parses_style_classes_in_order() {
        let registry = PropertyRegistry::with_builtins();
        let sheet = JsonStyleParser::new(&registry).parse_str(DOCUMENT).unwrap();

        assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["Header Text", "Rounded"]);
        let header = sheet.get("headerText").unwrap().properties();
        let red = header.value("text", "textColor").and_then(PropertyValue::as_color).unwrap();
        let red = red.to_rgba8();
        assert_eq!((red.r, red.g, red.b, red.a), (255, 0, 0, 255));
        assert_eq!(
            sheet.get("rounded").unwrap().properties().value("layer", "cornerRadius"),
            Some(&PropertyValue::Number(8.0))
        );
    }

    #[test]
    fn unresolved_property_is_fatal_by_default() {
        let registry = PropertyRegistry::with_builtins();
        let document = r##"[{ "styleClass": "Broken", "properties": [
            { "propertyName": "textColor", "propertyType": "Color", "propertyValue": "not a color" }
        ]}]"##;

        match JsonStyleParser::new(&registry).parse_str(document) {
            Err(StyleError::UnresolvedProperty {
                style_class,
                property_name,
                ..
            }) => {
                assert_eq!(style_class, "Broken");
                assert_eq!(property_name, "textColor");
            },
            other => panic!("expected an unresolved property error, got {other:?}"),
        }
    }

    #[test]
    fn skip_policy_drops_only_the_bad_record() {
        let registry = PropertyRegistry::with_builtins();
        let document = r##"[{ "styleClass": "Mixed", "properties": [
            { "propertyName": "noSuchProperty", "propertyType": "Color", "propertyValue": "#FFFFFF" },
            { "propertyName": "alpha", "propertyType": "Number", "propertyValue": 0.5 }
        ]}]"##;

        let sheet = JsonStyleParser::new(&registry)
            .with_policy(UnresolvedPolicy::Skip)
            .parse_str(document)
            .unwrap();
        assert_eq!(sheet.get("Mixed").unwrap().len(), 1);
    }

    #[test]
    fn repeated_style_classes_are_concatenated() {
        let registry = PropertyRegistry::with_builtins();
        let document = r##"[
            { "styleClass": "Card", "properties": [
                { "propertyName": "alpha", "propertyType": "Number", "propertyValue": 0.5 },
                { "propertyName": "borderWidth", "propertyType": "Number", "propertyValue": 1 }
            ]},
            { "styleClass": "card", "properties": [
                { "propertyName": "alpha", "propertyType": "Number", "propertyValue": 0.9 }
            ]}
        ]"##;

        let sheet = JsonStyleParser::new(&registry).parse_str(document).unwrap();
        assert_eq!(sheet.len(), 1);
        let card = sheet.get("Card").unwrap().properties();
        assert_eq!(card.value("view", "alpha"), Some(&PropertyValue::Number(0.9)));
        assert_eq!(card.value("layer", "borderWidth"), Some(&PropertyValue::Number(1.0)));
    }

    #[test]
    fn malformed_documents_are_invalid() {
        let registry = PropertyRegistry::with_builtins();
        let parser = JsonStyleParser::new(&registry);

        assert!(matches!(parser.parse_str("{"), Err(StyleError::InvalidDocument { .. })));
        assert!(matches!(
            parser.parse_str(r#"{"styleClass": "NotAnArray"}"#),
            Err(StyleError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn empty_documents_give_empty_sheets() {
        let registry = PropertyRegistry::with_builtins();
        assert!(JsonStyleParser::new(&registry).parse_str("[]").unwrap().is_empty());
    }
}
