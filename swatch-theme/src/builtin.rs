//! Built-in value types and property bindings.
//!
//! Value types are listed in precedence order: structured kinds first, plain
//! text last, so a string that parses as a color is a color.

use serde_json::{Map, Value};

use crate::registry::{PropertyBinding, ValueType};
use crate::value::{
    parse_hex_color, ContentMode, EdgeInsets, Font, FontWeight, ImageSource, LineBreakMode,
    PropertyValue, Size, TextAlignment, TextStyle, ValueKind,
};

/// The built-in value types, in registration order.
pub fn value_types() -> Vec<ValueType> {
    vec![
        ValueType::new(ValueKind::Color, ["Color", "UIColor", "CGColor", "Colour"], |raw| {
            raw.as_str()
                .and_then(parse_hex_color)
                .map(PropertyValue::Color)
        }),
        ValueType::new(ValueKind::Font, ["Font", "UIFont"], |raw| {
            parse_font(raw).map(PropertyValue::Font)
        }),
        ValueType::new(
            ValueKind::Insets,
            ["Edge Insets", "UIEdgeInsets", "Insets", "Padding"],
            |raw| parse_insets(raw).map(PropertyValue::Insets),
        ),
        ValueType::new(ValueKind::Size, ["Size", "CGSize"], |raw| {
            parse_size(raw).map(PropertyValue::Size)
        }),
        ValueType::new(
            ValueKind::TextAlignment,
            ["Text Alignment", "NSTextAlignment", "Alignment"],
            |raw| {
                raw.as_str()
                    .and_then(TextAlignment::from_name)
                    .map(PropertyValue::TextAlignment)
            },
        ),
        ValueType::new(
            ValueKind::ContentMode,
            ["Content Mode", "UIViewContentMode", "UIView.ContentMode"],
            |raw| {
                raw.as_str()
                    .and_then(ContentMode::from_name)
                    .map(PropertyValue::ContentMode)
            },
        ),
        ValueType::new(
            ValueKind::LineBreakMode,
            ["Line Break Mode", "NSLineBreakMode"],
            |raw| {
                raw.as_str()
                    .and_then(LineBreakMode::from_name)
                    .map(PropertyValue::LineBreakMode)
            },
        ),
        ValueType::new(ValueKind::Image, ["Image", "UIImage"], |raw| {
            raw.as_str()
                .filter(|reference| !reference.trim().is_empty())
                .map(|reference| PropertyValue::Image(ImageSource::from_reference(reference)))
        }),
        ValueType::new(
            ValueKind::Number,
            ["Number", "CGFloat", "Float", "Double", "Int", "Integer"],
            |raw| raw.as_f64().map(PropertyValue::Number),
        ),
        ValueType::new(ValueKind::Bool, ["Bool", "Boolean"], |raw| {
            parse_bool(raw).map(PropertyValue::Bool)
        }),
        ValueType::new(ValueKind::Text, ["String", "Text"], |raw| {
            raw.as_str().map(|text| PropertyValue::Text(text.to_string()))
        }),
    ]
}

/// The built-in property bindings.
pub fn bindings() -> Vec<PropertyBinding> {
    vec![
        PropertyBinding::new("backgroundColor", "view", ValueKind::Color),
        PropertyBinding::new("tintColor", "view", ValueKind::Color),
        PropertyBinding::new("alpha", "view", ValueKind::Number),
        PropertyBinding::new("isHidden", "view", ValueKind::Bool),
        PropertyBinding::new("contentMode", "view", ValueKind::ContentMode),
        PropertyBinding::new("contentInsets", "view", ValueKind::Insets),
        PropertyBinding::new("cornerRadius", "layer", ValueKind::Number),
        PropertyBinding::new("borderWidth", "layer", ValueKind::Number),
        PropertyBinding::new("borderColor", "layer", ValueKind::Color),
        PropertyBinding::new("shadowColor", "layer", ValueKind::Color),
        PropertyBinding::new("shadowOffset", "layer", ValueKind::Size),
        PropertyBinding::new("shadowRadius", "layer", ValueKind::Number),
        PropertyBinding::new("shadowOpacity", "layer", ValueKind::Number),
        PropertyBinding::new("textColor", "text", ValueKind::Color),
        PropertyBinding::new("font", "text", ValueKind::Font),
        PropertyBinding::new("textAlignment", "text", ValueKind::TextAlignment),
        PropertyBinding::new("lineBreakMode", "text", ValueKind::LineBreakMode),
        PropertyBinding::new("numberOfLines", "text", ValueKind::Number),
        PropertyBinding::new("text", "text", ValueKind::Text),
        PropertyBinding::new("image", "image", ValueKind::Image),
    ]
}

fn number_field(object: &Map<String, Value>, field: &str) -> Option<f64> {
    object.get(field).and_then(Value::as_f64)
}

fn parse_font(raw: &Value) -> Option<Font> {
    if let Some(size) = raw.as_f64() {
        return Some(Font::system(size, FontWeight::Regular));
    }

    let object = raw.as_object()?;
    if let Some(style) = object.get("textStyle") {
        return style.as_str().and_then(TextStyle::from_name).map(Font::text_style);
    }

    let size = number_field(object, "size").unwrap_or(Font::DEFAULT_SIZE);
    if let Some(name) = object.get("name") {
        return name.as_str().map(|name| Font::named(name, size));
    }

    let weight = match object.get("weight") {
        Some(weight) => FontWeight::from_name(weight.as_str()?)?,
        None => FontWeight::Regular,
    };
    object
        .contains_key("size")
        .then(|| Font::system(size, weight))
}

fn parse_insets(raw: &Value) -> Option<EdgeInsets> {
    if let Some(value) = raw.as_f64() {
        return Some(EdgeInsets::uniform(value));
    }

    let object = raw.as_object()?;
    let edges = ["top", "left", "bottom", "right"];
    if !edges.iter().any(|edge| object.contains_key(*edge)) {
        return None;
    }
    let edge = |name: &str| number_field(object, name).unwrap_or(0.0);
    Some(EdgeInsets::new(edge("top"), edge("left"), edge("bottom"), edge("right")))
}

fn parse_size(raw: &Value) -> Option<Size> {
    let object = raw.as_object()?;
    Some(Size::new(
        number_field(object, "width")?,
        number_field(object, "height")?,
    ))
}

fn parse_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(value) => Some(*value),
        Value::String(text) => match text.trim().to_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
