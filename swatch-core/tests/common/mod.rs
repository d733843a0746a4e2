#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use swatch_core::remote::FetchedImage;
use swatch_core::styleable::{ComponentId, Styleable};
use swatch_theme::registry::{PropertyRegistry, StyleTarget};
use swatch_theme::style::Style;
use swatch_theme::stylesheet::Stylesheet;
use swatch_theme::value::PropertyValue;

/// A minimal toolkit component recording everything assigned to it.
#[derive(Default)]
pub struct Label {
    pub id: Option<ComponentId>,
    pub styles: String,
    pub stylesheet: Option<Arc<Stylesheet>>,
    pub stylesheet_name: Option<String>,
    pub values: HashMap<String, PropertyValue>,
    pub writes: usize,
    pub flagged: Option<Vec<String>>,
    pub images: Vec<(String, FetchedImage)>,
    pub children: Vec<Label>,
}

impl Label {
    pub fn new(styles: &str) -> Self {
        Self {
            id: Some(ComponentId::next()),
            styles: styles.to_string(),
            ..Default::default()
        }
    }

    pub fn with_child(mut self, child: Label) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_stylesheet(mut self, sheet: Arc<Stylesheet>) -> Self {
        self.stylesheet = Some(sheet);
        self
    }

    pub fn with_stylesheet_name(mut self, name: &str) -> Self {
        self.stylesheet_name = Some(name.to_string());
        self
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(PropertyValue::as_number)
    }
}

impl StyleTarget for Label {
    fn assign(&mut self, key: &str, value: &PropertyValue) -> bool {
        self.writes += 1;
        self.values.insert(key.to_string(), value.clone());
        true
    }
}

impl Styleable for Label {
    fn component_id(&self) -> ComponentId {
        self.id.unwrap_or_else(|| panic!("labels are built with Label::new"))
    }

    fn style_names(&self) -> &str {
        &self.styles
    }

    fn stylesheet(&self) -> Option<Arc<Stylesheet>> {
        self.stylesheet.clone()
    }

    fn stylesheet_name(&self) -> Option<&str> {
        self.stylesheet_name.as_deref()
    }

    fn flag_invalid_styles(&mut self, names: &[String]) {
        self.flagged = Some(names.to_vec());
    }

    fn receive_image(&mut self, key: &str, image: &FetchedImage) -> bool {
        if key != "image" {
            return false;
        }
        self.images.push((key.to_string(), image.clone()));
        true
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut dyn Styleable)) {
        for child in &mut self.children {
            visit(child);
        }
    }
}

/// A style assigning `value` to the numeric property `key`.
pub fn number(key: &str, value: f64) -> Style {
    let binding = PropertyRegistry::global()
        .binding(key)
        .unwrap_or_else(|| panic!("no built-in binding '{key}'"));
    Style::new().with(binding, PropertyValue::Number(value))
}

/// A stylesheet with a single style "Tone" setting alpha to `alpha`.
pub fn tone(alpha: f64) -> Arc<Stylesheet> {
    Arc::new(Stylesheet::new().with("Tone", number("alpha", alpha)))
}
