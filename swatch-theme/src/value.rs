//! # Property Values
//!
//! The closed set of values a style can assign to a property.
//!
//! Every styleable property carries exactly one [ValueKind]; a [PropertyValue]
//! is the typed payload. Keeping the set closed means parsers and appliers
//! match on variants instead of downcasting boxed values.
//!
//! ```rust
//! use swatch_theme::value::{parse_hex_color, PropertyValue, ValueKind};
//!
//! let red = PropertyValue::Color(parse_hex_color("#FF0000").unwrap());
//! assert_eq!(red.kind(), ValueKind::Color);
//! ```

use std::fmt::{Display, Formatter};

use vello::peniko::Color;

use crate::name::is_variant;

/// The kind of a [PropertyValue], used to pair bindings with value parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// An RGBA color.
    Color,
    /// A font description.
    Font,
    /// Insets for each edge of a rectangle.
    Insets,
    /// A width and height.
    Size,
    /// A plain number.
    Number,
    /// A boolean flag.
    Bool,
    /// A string.
    Text,
    /// A horizontal text alignment.
    TextAlignment,
    /// How content is scaled inside its bounds.
    ContentMode,
    /// How text is wrapped or truncated.
    LineBreakMode,
    /// An image, bundled or remote.
    Image,
}

impl ValueKind {
    /// A human readable name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Color => "color",
            ValueKind::Font => "font",
            ValueKind::Insets => "insets",
            ValueKind::Size => "size",
            ValueKind::Number => "number",
            ValueKind::Bool => "bool",
            ValueKind::Text => "text",
            ValueKind::TextAlignment => "text alignment",
            ValueKind::ContentMode => "content mode",
            ValueKind::LineBreakMode => "line break mode",
            ValueKind::Image => "image",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed value for a styleable property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A color value.
    Color(Color),
    /// A font value.
    Font(Font),
    /// An edge insets value.
    Insets(EdgeInsets),
    /// A size value.
    Size(Size),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// A string value.
    Text(String),
    /// A text alignment value.
    TextAlignment(TextAlignment),
    /// A content mode value.
    ContentMode(ContentMode),
    /// A line break mode value.
    LineBreakMode(LineBreakMode),
    /// An image reference.
    Image(ImageSource),
}

impl PropertyValue {
    /// The [ValueKind] of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::Color(_) => ValueKind::Color,
            PropertyValue::Font(_) => ValueKind::Font,
            PropertyValue::Insets(_) => ValueKind::Insets,
            PropertyValue::Size(_) => ValueKind::Size,
            PropertyValue::Number(_) => ValueKind::Number,
            PropertyValue::Bool(_) => ValueKind::Bool,
            PropertyValue::Text(_) => ValueKind::Text,
            PropertyValue::TextAlignment(_) => ValueKind::TextAlignment,
            PropertyValue::ContentMode(_) => ValueKind::ContentMode,
            PropertyValue::LineBreakMode(_) => ValueKind::LineBreakMode,
            PropertyValue::Image(_) => ValueKind::Image,
        }
    }

    /// Get the color value, if this is a color.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            PropertyValue::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Get the number value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the string value, if this is a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Get the font value, if this is a font.
    pub fn as_font(&self) -> Option<&Font> {
        match self {
            PropertyValue::Font(font) => Some(font),
            _ => None,
        }
    }

    /// Get the insets value, if this is an insets value.
    pub fn as_insets(&self) -> Option<EdgeInsets> {
        match self {
            PropertyValue::Insets(insets) => Some(*insets),
            _ => None,
        }
    }

    /// Get the image source, if this is an image.
    pub fn as_image(&self) -> Option<&ImageSource> {
        match self {
            PropertyValue::Image(source) => Some(source),
            _ => None,
        }
    }
}

/// Parse a hex color string with optional alpha channel.
///
/// Accepts `#rrggbb` and `#rrggbbaa`, with or without the leading `#`.
/// Returns [None] for anything else.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Some(Color::from_rgba8(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => None,
    }
}

/// Insets for the four edges of a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeInsets {
    /// Inset from the top edge.
    pub top: f64,
    /// Inset from the left edge.
    pub left: f64,
    /// Inset from the bottom edge.
    pub bottom: f64,
    /// Inset from the right edge.
    pub right: f64,
}

impl EdgeInsets {
    /// Create insets from explicit edges.
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same inset on every edge.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// A width and a height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    /// The width.
    pub width: f64,
    /// The height.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A font description.
///
/// Fonts come in three shapes: a named family at a size, the system font at a
/// size and weight, or a dynamic text style resolved by the toolkit.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// The font family, or [None] for the system font.
    pub family: Option<String>,
    /// The point size.
    pub size: f64,
    /// The weight, used for the system font.
    pub weight: FontWeight,
    /// A dynamic text style, which takes precedence over size when set.
    pub text_style: Option<TextStyle>,
}

impl Font {
    /// Default point size used when a document does not name one.
    pub const DEFAULT_SIZE: f64 = 17.0;

    /// A named font at the given size.
    pub fn named(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: Some(family.into()),
            size,
            weight: FontWeight::Regular,
            text_style: None,
        }
    }

    /// The system font at the given size and weight.
    pub fn system(size: f64, weight: FontWeight) -> Self {
        Self {
            family: None,
            size,
            weight,
            text_style: None,
        }
    }

    /// A dynamic text style.
    pub fn text_style(style: TextStyle) -> Self {
        Self {
            family: None,
            size: style.default_size(),
            weight: FontWeight::Regular,
            text_style: Some(style),
        }
    }
}

/// Generates a name table for a fieldless enum: `ALL`, `name()` and a
/// [is_variant] based `from_name()`.
macro_rules! name_table {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// The canonical, space separated name of this variant.
            pub fn name(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }

            /// Look a variant up by any accepted spelling of its name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| is_variant(name.trim(), variant.name()))
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// Font weights, lightest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum FontWeight {
    UltraLight,
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

name_table!(FontWeight {
    UltraLight => "Ultra Light",
    Thin => "Thin",
    Light => "Light",
    Regular => "Regular",
    Medium => "Medium",
    Semibold => "Semibold",
    Bold => "Bold",
    Heavy => "Heavy",
    Black => "Black",
});

/// Dynamic text styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TextStyle {
    LargeTitle,
    Title1,
    Title2,
    Title3,
    Headline,
    Subheadline,
    Body,
    Callout,
    Footnote,
    Caption1,
    Caption2,
}

name_table!(TextStyle {
    LargeTitle => "Large Title",
    Title1 => "Title1",
    Title2 => "Title2",
    Title3 => "Title3",
    Headline => "Headline",
    Subheadline => "Subheadline",
    Body => "Body",
    Callout => "Callout",
    Footnote => "Footnote",
    Caption1 => "Caption1",
    Caption2 => "Caption2",
});

impl TextStyle {
    /// The point size the style maps to at the default content size.
    pub fn default_size(&self) -> f64 {
        match self {
            TextStyle::LargeTitle => 34.0,
            TextStyle::Title1 => 28.0,
            TextStyle::Title2 => 22.0,
            TextStyle::Title3 => 20.0,
            TextStyle::Headline | TextStyle::Body => 17.0,
            TextStyle::Callout => 16.0,
            TextStyle::Subheadline => 15.0,
            TextStyle::Footnote => 13.0,
            TextStyle::Caption1 => 12.0,
            TextStyle::Caption2 => 11.0,
        }
    }
}

/// Horizontal alignment of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justified,
    Natural,
}

name_table!(TextAlignment {
    Left => "Left",
    Center => "Center",
    Right => "Right",
    Justified => "Justified",
    Natural => "Natural",
});

/// How content is laid out inside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ContentMode {
    ScaleToFill,
    ScaleAspectFit,
    ScaleAspectFill,
    Redraw,
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

name_table!(ContentMode {
    ScaleToFill => "Scale To Fill",
    ScaleAspectFit => "Scale Aspect Fit",
    ScaleAspectFill => "Scale Aspect Fill",
    Redraw => "Redraw",
    Center => "Center",
    Top => "Top",
    Bottom => "Bottom",
    Left => "Left",
    Right => "Right",
    TopLeft => "Top Left",
    TopRight => "Top Right",
    BottomLeft => "Bottom Left",
    BottomRight => "Bottom Right",
});

/// How text that does not fit is wrapped or truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum LineBreakMode {
    WordWrapping,
    CharWrapping,
    Clipping,
    TruncatingHead,
    TruncatingTail,
    TruncatingMiddle,
}

name_table!(LineBreakMode {
    WordWrapping => "Word Wrapping",
    CharWrapping => "Char Wrapping",
    Clipping => "Clipping",
    TruncatingHead => "Truncating Head",
    TruncatingTail => "Truncating Tail",
    TruncatingMiddle => "Truncating Middle",
});

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// A resource bundled with the application, looked up by name.
    Named(String),
    /// An image fetched over the network.
    Remote(String),
}

impl ImageSource {
    /// Classify a string: `http://` and `https://` URLs are remote, anything else is a
    /// bundled resource name.
    pub fn from_reference(reference: &str) -> Self {
        let reference = reference.trim();
        if reference.starts_with("http://") || reference.starts_with("https://") {
            ImageSource::Remote(reference.to_string())
        } else {
            ImageSource::Named(reference.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors_with_and_without_alpha() {
        let red = parse_hex_color("#FF0000").unwrap().to_rgba8();
        assert_eq!((red.r, red.g, red.b, red.a), (255, 0, 0, 255));

        let translucent = parse_hex_color("00ff0080").unwrap().to_rgba8();
        assert_eq!((translucent.r, translucent.g, translucent.b, translucent.a), (0, 255, 0, 128));
    }

    #[test]
    fn rejects_malformed_hex_colors() {
        assert!(parse_hex_color("#FFF").is_none());
        assert!(parse_hex_color("#GG0000").is_none());
        assert!(parse_hex_color("red").is_none());
        assert!(parse_hex_color("#ÿÿÿ").is_none());
    }

    #[test]
    fn enum_tables_accept_loose_spellings() {
        assert_eq!(ContentMode::from_name("scaleAspectFit"), Some(ContentMode::ScaleAspectFit));
        assert_eq!(ContentMode::from_name("scale-aspect-fill"), Some(ContentMode::ScaleAspectFill));
        assert_eq!(TextAlignment::from_name("CENTER"), Some(TextAlignment::Center));
        assert_eq!(LineBreakMode::from_name("truncating_tail"), Some(LineBreakMode::TruncatingTail));
        assert_eq!(FontWeight::from_name("semibold"), Some(FontWeight::Semibold));
        assert_eq!(TextAlignment::from_name("diagonal"), None);
    }

    #[test]
    fn image_references_are_classified_by_scheme() {
        assert_eq!(
            ImageSource::from_reference("https://example.com/a.png"),
            ImageSource::Remote("https://example.com/a.png".to_string())
        );
        assert_eq!(ImageSource::from_reference("logo"), ImageSource::Named("logo".to_string()));
    }
}
