//! # Theme Controller
//!
//! Holds the active stylesheet and tells subscribers when it changes.
//!
//! The controller has two states: no theme (the initial state) and themed.
//! [ThemeController::set_active] moves between them and notifies every subscriber
//! when the identity of the active stylesheet changes. Setting the stylesheet that
//! is already active is a no-op, so re-theming with the same [Arc] costs nothing.
//!
//! A [ViewTree](crate::tree::ViewTree) subscribes to re-apply styles to all of its
//! components on every change:
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::sync::Arc;
//! use swatch_core::controller::ThemeController;
//! use swatch_theme::stylesheet::Stylesheet;
//!
//! let controller = ThemeController::new();
//! let changes = Rc::new(Cell::new(0));
//!
//! let counter = changes.clone();
//! controller.subscribe(move |_| counter.set(counter.get() + 1));
//!
//! let dark = Arc::new(Stylesheet::new());
//! controller.set_active(Some(dark.clone()));
//! controller.set_active(Some(dark));
//! assert_eq!(changes.get(), 1);
//! ```
//!
//! The controller lives on the UI thread. [ThemeController::global] hands out the
//! controller of the calling thread.

use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;
use std::sync::Arc;

use swatch_theme::stylesheet::Stylesheet;

/// Handle of a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(Option<&Arc<Stylesheet>>)>;

/// The active stylesheet and its subscribers.
pub struct ThemeController {
    active: RefCell<Option<Arc<Stylesheet>>>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

thread_local! {
    static GLOBAL: Rc<ThemeController> = Rc::new(ThemeController::new());
}

impl ThemeController {
    /// Create a controller without an active stylesheet.
    pub fn new() -> Self {
        Self {
            active: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// The controller of the current thread.
    pub fn global() -> Rc<ThemeController> {
        GLOBAL.with(Rc::clone)
    }

    /// The active stylesheet.
    pub fn active(&self) -> Option<Arc<Stylesheet>> {
        self.active.borrow().clone()
    }

    /// Whether a stylesheet is active.
    pub fn is_themed(&self) -> bool {
        self.active.borrow().is_some()
    }

    /// Replace the active stylesheet.
    ///
    /// Subscribers are notified only when `stylesheet` is a different instance than
    /// the active one. Returns whether they were.
    pub fn set_active(&self, stylesheet: Option<Arc<Stylesheet>>) -> bool {
        let unchanged = match (&*self.active.borrow(), &stylesheet) {
            (None, None) => true,
            (Some(current), Some(new)) => Arc::ptr_eq(current, new),
            _ => false,
        };
        if unchanged {
            return false;
        }

        log::info!(
            "Active stylesheet {}",
            match &stylesheet {
                Some(sheet) => format!("set ({} styles)", sheet.len()),
                None => "cleared".to_string(),
            }
        );
        self.active.replace(stylesheet.clone());

        // Listeners may subscribe, unsubscribe or set the theme again.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(stylesheet.as_ref());
        }
        true
    }

    /// Call `listener` with the new stylesheet on every change.
    pub fn subscribe(&self, listener: impl Fn(Option<&Arc<Stylesheet>>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Default for ThemeController {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ThemeController {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("active", &self.active.borrow().as_ref().map(|sheet| sheet.len()))
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
