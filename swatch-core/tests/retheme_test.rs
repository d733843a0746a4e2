mod common;

use std::rc::Rc;
use std::sync::Arc;

use common::{tone, Label};
use swatch_core::controller::ThemeController;
use swatch_core::engine::StyleContext;
use swatch_core::tree::ViewTree;

fn tree_of_three() -> Label {
    Label::new("Tone")
        .with_child(Label::new("Tone").with_child(Label::new("Tone")))
        .with_child(Label::new(""))
}

fn alphas(root: &Label) -> Vec<Option<f64>> {
    vec![
        root.number("alpha"),
        root.children[0].number("alpha"),
        root.children[0].children[0].number("alpha"),
        root.children[1].number("alpha"),
    ]
}

#[test]
fn refresh_all_visits_every_component() {
    let controller = Rc::new(ThemeController::new());
    controller.set_active(Some(tone(0.5)));
    let mut tree = ViewTree::new(tree_of_three(), StyleContext::with_controller(controller));

    let report = tree.refresh_all();
    assert_eq!(report.components, 4);
    assert_eq!(report.with_diagnostics, 0);
    assert_eq!(alphas(tree.root()), vec![Some(0.5), Some(0.5), Some(0.5), None]);
}

#[test]
fn theme_changes_restyle_attached_trees() {
    let controller = Rc::new(ThemeController::new());
    controller.set_active(Some(tone(0.2)));
    let tree = ViewTree::new(tree_of_three(), StyleContext::with_controller(controller.clone())).attach();
    assert_eq!(alphas(tree.borrow().root())[..3], [Some(0.2); 3]);

    controller.set_active(Some(tone(0.8)));
    assert_eq!(alphas(tree.borrow().root())[..3], [Some(0.8); 3]);
}

#[test]
fn setting_the_same_sheet_again_does_nothing() {
    let controller = Rc::new(ThemeController::new());
    let sheet = tone(0.2);
    controller.set_active(Some(sheet.clone()));
    let tree = ViewTree::new(tree_of_three(), StyleContext::with_controller(controller.clone())).attach();
    let writes = tree.borrow().root().writes;

    assert!(!controller.set_active(Some(sheet)));
    assert_eq!(tree.borrow().root().writes, writes);

    assert!(controller.set_active(Some(tone(0.2))));
    assert_eq!(tree.borrow().root().writes, writes + 1);
}

#[test]
fn components_with_their_own_sheet_keep_it() {
    let controller = Rc::new(ThemeController::new());
    let root = Label::new("Tone").with_child(Label::new("Tone").with_stylesheet(tone(1.0)));
    let tree = ViewTree::new(root, StyleContext::with_controller(controller.clone())).attach();

    controller.set_active(Some(tone(0.3)));
    let tree = tree.borrow();
    assert_eq!(tree.root().number("alpha"), Some(0.3));
    assert_eq!(tree.root().children[0].number("alpha"), Some(1.0));
}

#[test]
fn clearing_the_theme_leaves_values_in_place() {
    let controller = Rc::new(ThemeController::new());
    controller.set_active(Some(tone(0.6)));
    let tree = ViewTree::new(Label::new("Tone"), StyleContext::with_controller(controller.clone())).attach();

    controller.set_active(None);
    assert_eq!(tree.borrow().root().number("alpha"), Some(0.6));
}

#[test]
fn detached_and_dropped_trees_stop_listening() {
    let controller = Rc::new(ThemeController::new());
    let first = ViewTree::new(Label::new("Tone"), StyleContext::with_controller(controller.clone())).attach();
    let second = ViewTree::new(Label::new("Tone"), StyleContext::with_controller(controller.clone())).attach();
    assert_eq!(controller.subscriber_count(), 2);

    first.borrow_mut().detach();
    assert!(!first.borrow().is_attached());
    controller.set_active(Some(tone(0.4)));
    assert_eq!(first.borrow().root().number("alpha"), None);
    assert_eq!(second.borrow().root().number("alpha"), Some(0.4));

    drop(second);
    assert_eq!(controller.subscriber_count(), 0);
}

#[test]
fn the_global_controller_drives_default_contexts() {
    let tree = ViewTree::new(Label::new("Tone"), StyleContext::new()).attach();
    let sheet = tone(0.25);

    ThemeController::global().set_active(Some(sheet.clone()));
    assert_eq!(tree.borrow().root().number("alpha"), Some(0.25));
    assert!(Arc::ptr_eq(&ThemeController::global().active().unwrap(), &sheet));
}
