//! # View Trees
//!
//! A [ViewTree] owns the root of a component hierarchy together with the
//! [StyleContext] it is styled with. [ViewTree::refresh_all] re-applies styles to
//! every component, depth first.
//!
//! Attached trees refresh themselves whenever the active theme of their
//! controller changes:
//!
//! ```rust,ignore
//! let tree = ViewTree::new(root, StyleContext::new()).attach();
//! ThemeController::global().set_active(Some(dark_sheet));
//! // every component of `tree` now shows the dark styles
//! ```
//!
//! A theme change that arrives while the tree is borrowed cannot restyle it. The
//! tree is marked stale instead; hosts call [ViewTree::refresh_if_stale] once the
//! borrow is released, for example at the start of the next frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::controller::SubscriptionId;
use crate::engine::{ApplyReport, StyleContext};
use crate::styleable::{walk, Styleable};

/// Summary of a [ViewTree::refresh_all] pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    /// Number of components styled.
    pub components: usize,
    /// Number of components with at least one diagnostic.
    pub with_diagnostics: usize,
    /// Number of remote images requested.
    pub image_requests: usize,
}

/// A component hierarchy and the context it is styled with.
pub struct ViewTree<R: Styleable> {
    root: R,
    context: StyleContext,
    subscription: Option<SubscriptionId>,
    stale: Rc<Cell<bool>>,
}

impl<R: Styleable + 'static> ViewTree<R> {
    /// Create a tree. Nothing is styled until [ViewTree::refresh_all] runs.
    pub fn new(root: R, context: StyleContext) -> Self {
        Self {
            root,
            context,
            subscription: None,
            stale: Rc::new(Cell::new(false)),
        }
    }

    /// Style the tree and subscribe it to theme changes of its controller.
    pub fn attach(self) -> Rc<RefCell<Self>> {
        let tree = Rc::new(RefCell::new(self));
        let weak = Rc::downgrade(&tree);
        let controller = tree.borrow().context.controller().clone();
        let stale = tree.borrow().stale.clone();

        let id = controller.subscribe(move |_| {
            let Some(tree) = weak.upgrade() else {
                return;
            };
            match tree.try_borrow_mut() {
                Ok(mut tree) => {
                    tree.refresh_all();
                },
                Err(_) => {
                    log::warn!("Theme changed while the view tree was in use, marking it stale");
                    stale.set(true);
                },
            };
        });

        {
            let mut tree = tree.borrow_mut();
            tree.subscription = Some(id);
            tree.refresh_all();
        }
        tree
    }

    /// Stop following theme changes.
    pub fn detach(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.context.controller().unsubscribe(id);
        }
    }

    /// Whether this tree follows theme changes.
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Re-apply styles to every component.
    pub fn refresh_all(&mut self) -> RefreshReport {
        self.stale.set(false);
        let context = &self.context;
        let mut summary = RefreshReport::default();
        walk(&mut self.root, &mut |component: &mut dyn Styleable| {
            let report = context.apply(component);
            summary.components += 1;
            summary.image_requests += report.image_requests;
            if !report.is_clean() {
                summary.with_diagnostics += 1;
            }
        });
        log::debug!(
            "Refreshed {} components ({} with diagnostics)",
            summary.components,
            summary.with_diagnostics
        );
        summary
    }

    /// Whether a theme change was missed because the tree was borrowed.
    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Run [ViewTree::refresh_all] if a theme change was missed.
    pub fn refresh_if_stale(&mut self) -> Option<RefreshReport> {
        self.is_stale().then(|| self.refresh_all())
    }

    /// Re-apply styles to the root only.
    pub fn refresh_root(&mut self) -> ApplyReport {
        self.context.apply(&mut self.root)
    }

    /// Deliver finished remote image fetches.
    pub fn deliver_images(&mut self) -> usize {
        match self.context.remote_images() {
            Some(remote) => remote.drain_into(&mut self.root),
            None => 0,
        }
    }

    /// The root component.
    pub fn root(&self) -> &R {
        &self.root
    }

    /// Mutable access to the root component.
    ///
    /// Call [ViewTree::refresh_all] after changing style names.
    pub fn root_mut(&mut self) -> &mut R {
        &mut self.root
    }

    /// The context the tree is styled with.
    pub fn context(&self) -> &StyleContext {
        &self.context
    }
}

impl<R: Styleable> Drop for ViewTree<R> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.context.controller().unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use swatch_theme::registry::{PropertyRegistry, StyleTarget};
    use swatch_theme::style::Style;
    use swatch_theme::stylesheet::Stylesheet;
    use swatch_theme::value::PropertyValue;

    use super::*;
    use crate::controller::ThemeController;
    use crate::styleable::ComponentId;

    struct Swatch {
        id: ComponentId,
        alpha: Option<f64>,
    }

    impl StyleTarget for Swatch {
        fn assign(&mut self, key: &str, value: &PropertyValue) -> bool {
            if key != "alpha" {
                return false;
            }
            self.alpha = value.as_number();
            true
        }
    }

    impl Styleable for Swatch {
        fn component_id(&self) -> ComponentId {
            self.id
        }

        fn style_names(&self) -> &str {
            "Faded"
        }
    }

    fn faded(alpha: f64) -> Arc<Stylesheet> {
        let binding = PropertyRegistry::global().binding("alpha").unwrap();
        let style = Style::new().with(binding, PropertyValue::Number(alpha));
        Arc::new(Stylesheet::new().with("Faded", style))
    }

    #[test]
    fn missed_theme_changes_are_caught_up() {
        let controller = Rc::new(ThemeController::new());
        let swatch = Swatch {
            id: ComponentId::next(),
            alpha: None,
        };
        let tree = ViewTree::new(swatch, StyleContext::with_controller(controller.clone())).attach();
        assert!(!tree.borrow().is_stale());

        {
            let _busy = tree.borrow_mut();
            controller.set_active(Some(faded(0.4)));
        }
        assert!(tree.borrow().is_stale());
        assert_eq!(tree.borrow().root().alpha, None);

        let report = tree.borrow_mut().refresh_if_stale();
        assert_eq!(report.map(|report| report.components), Some(1));
        assert_eq!(tree.borrow().root().alpha, Some(0.4));
        assert!(tree.borrow_mut().refresh_if_stale().is_none());
    }
}
