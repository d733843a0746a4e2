mod common;

use std::rc::Rc;
use std::sync::Arc;

use common::{number, tone, Label};
use swatch_core::controller::ThemeController;
use swatch_core::engine::{StyleContext, StyleDiagnostic, StylesheetOrigin};
use swatch_theme::json::JsonStyleParser;
use swatch_theme::registry::{PropertyBinding, PropertyRegistry};
use swatch_theme::source::StaticStylesheet;
use swatch_theme::style::Style;
use swatch_theme::stylesheet::Stylesheet;
use swatch_theme::value::{PropertyValue, ValueKind};

fn themed(sheet: Arc<Stylesheet>) -> StyleContext {
    let controller = Rc::new(ThemeController::new());
    controller.set_active(Some(sheet));
    StyleContext::with_controller(controller)
}

#[test]
fn later_names_win() {
    let sheet = Stylesheet::new()
        .with("A", number("alpha", 1.0))
        .with("B", number("alpha", 2.0));
    let context = themed(Arc::new(sheet));

    let mut label = Label::new("A, B");
    let report = context.apply(&mut label);
    assert!(report.is_clean());
    assert_eq!(report.applied, vec!["A", "B"]);
    assert_eq!(label.number("alpha"), Some(2.0));

    let mut reversed = Label::new("B,A");
    context.apply(&mut reversed);
    assert_eq!(reversed.number("alpha"), Some(1.0));
}

#[test]
fn absent_values_do_not_overwrite() {
    let alpha = PropertyRegistry::global().binding("alpha").unwrap();
    let sheet = Stylesheet::new()
        .with("A", number("alpha", 1.0))
        .with("B", number("cornerRadius", 4.0).without(alpha));
    let context = themed(Arc::new(sheet));

    let mut label = Label::new("A, B");
    context.apply(&mut label);
    assert_eq!(label.number("alpha"), Some(1.0));
    assert_eq!(label.number("cornerRadius"), Some(4.0));
}

#[test]
fn unknown_names_are_skipped() {
    let context = themed(Arc::new(Stylesheet::new().with("A", number("alpha", 1.0))));

    let mut label = Label::new("A, NoSuchStyle");
    let report = context.apply(&mut label);
    assert_eq!(label.number("alpha"), Some(1.0));
    assert_eq!(
        report.diagnostics,
        vec![StyleDiagnostic::UnresolvedStyleName {
            name: "NoSuchStyle".to_string()
        }]
    );
    assert_eq!(label.flagged, None);
}

#[test]
fn diagnostics_flag_and_clear_components() {
    let context = themed(Arc::new(Stylesheet::new().with("A", number("alpha", 1.0)))).with_diagnostics(true);

    let mut label = Label::new("Hedaer, A");
    context.apply(&mut label);
    assert_eq!(label.flagged, Some(vec!["Hedaer".to_string()]));

    label.styles = "A".to_string();
    context.apply(&mut label);
    assert_eq!(label.flagged, Some(vec![]));
}

#[test]
fn names_match_in_any_spelling() {
    let context = themed(Arc::new(Stylesheet::new().with("Header Text", number("alpha", 0.5))));

    for names in ["headerText", "header-text", " header_text ", "HEADER TEXT"] {
        let mut label = Label::new(names);
        assert!(context.apply(&mut label).is_clean(), "{names}");
        assert_eq!(label.number("alpha"), Some(0.5));
    }
}

#[test]
fn applying_twice_changes_nothing() {
    let sheet = Stylesheet::new()
        .with("A", number("alpha", 1.0).combine(&number("borderWidth", 2.0)))
        .with("B", number("alpha", 0.5));
    let context = themed(Arc::new(sheet));

    let mut once = Label::new("A, B");
    context.apply(&mut once);
    let mut twice = Label::new("A, B");
    context.apply(&mut twice);
    context.apply(&mut twice);
    assert_eq!(once.values, twice.values);
}

#[test]
fn explicit_stylesheets_take_precedence() {
    let context = themed(tone(0.1));

    let mut label = Label::new("Tone").with_stylesheet(tone(0.9));
    let report = context.apply(&mut label);
    assert_eq!(report.origin, Some(StylesheetOrigin::Explicit));
    assert_eq!(label.number("alpha"), Some(0.9));
}

#[test]
fn named_stylesheets_come_before_the_theme() {
    let mut context = themed(tone(0.1));
    context.register_source(StaticStylesheet::shared("Brand", tone(0.7)));

    let mut label = Label::new("Tone").with_stylesheet_name("brand");
    context.apply(&mut label);
    assert_eq!(label.number("alpha"), Some(0.7));

    let mut unnamed = Label::new("Tone");
    context.apply(&mut unnamed);
    assert_eq!(unnamed.number("alpha"), Some(0.1));
}

#[test]
fn default_stylesheet_applies_without_a_theme() {
    let mut context =
        StyleContext::with_controller(Rc::new(ThemeController::new())).with_default_stylesheet("Base");
    context.register_source(StaticStylesheet::shared("Base", tone(0.3)));

    let mut label = Label::new("Tone");
    let report = context.apply(&mut label);
    assert_eq!(report.origin, Some(StylesheetOrigin::Default("Base".to_string())));
    assert_eq!(label.number("alpha"), Some(0.3));
}

#[test]
fn no_stylesheet_means_no_changes() {
    let context = StyleContext::with_controller(Rc::new(ThemeController::new()));

    let mut label = Label::new("Tone");
    let report = context.apply(&mut label);
    assert_eq!(report.diagnostics, vec![StyleDiagnostic::NoEffectiveStylesheet]);
    assert_eq!(label.writes, 0);
}

#[test]
fn json_colors_reach_the_component() {
    let registry = PropertyRegistry::with_builtins();
    let sheet = JsonStyleParser::new(&registry)
        .parse_str(
            r##"[{ "styleClass": "Alert", "properties": [
                { "propertyName": "textColor", "propertyType": "Color", "propertyValue": "#FF0000" }
            ]}]"##,
        )
        .unwrap();
    let context = themed(Arc::new(sheet));

    let mut label = Label::new("Alert");
    context.apply(&mut label);
    let red = label.values["textColor"].as_color().unwrap().to_rgba8();
    assert_eq!((red.r, red.g, red.b, red.a), (255, 0, 0, 255));
}

#[test]
fn custom_appliers_decide_where_values_go() {
    let glow = Arc::new(
        PropertyBinding::new("glow", "view", ValueKind::Number).with_applier(|target, value| {
            target.assign("glowRadius", value);
            target.assign("glowVisible", &PropertyValue::Bool(true));
        }),
    );
    let sheet = Stylesheet::new().with("Glowing", Style::new().with(glow, PropertyValue::Number(3.0)));
    let context = themed(Arc::new(sheet));

    let mut label = Label::new("Glowing");
    context.apply(&mut label);
    assert_eq!(label.number("glowRadius"), Some(3.0));
    assert_eq!(label.values.get("glowVisible"), Some(&PropertyValue::Bool(true)));
    assert!(!label.values.contains_key("glow"));
}

#[test]
fn plain_targets_can_be_styled_imperatively() {
    let context = StyleContext::with_controller(Rc::new(ThemeController::new()));

    let mut label = Label::new("");
    let report = context.apply_names("Tone", &mut label, Some(tone(0.4)));
    assert!(report.is_clean());
    assert_eq!(label.number("alpha"), Some(0.4));
}
