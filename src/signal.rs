//! Outbound save-state channel.
//!
//! Single producer, single subscriber. Emissions are delivered synchronously
//! and in order; an invocation always runs to completion before the next
//! emission is handled. The `RefCell` borrow held across the call turns a
//! re-entrant emit into a hard error instead of an overlapping invocation.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::state::PersistedState;

type Handler = Box<dyn FnMut(&PersistedState)>;

/// The app's "save this state" channel.
#[derive(Clone, Default)]
pub struct SaveSignal {
    subscriber: Rc<RefCell<Option<Handler>>>,
}

impl fmt::Debug for SaveSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The handler itself is opaque; report whether one is installed
        f.debug_struct("SaveSignal")
            .field("subscribed", &self.subscriber.borrow().is_some())
            .finish()
    }
}

impl SaveSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the subscriber, replacing any previous one. The bootstrap
    /// installs exactly one for the page's lifetime; there is no unsubscribe.
    pub fn subscribe(&self, handler: Handler) {
        *self.subscriber.borrow_mut() = Some(handler);
    }

    /// Deliver one state emission. A no-op while nothing is subscribed.
    pub fn emit(&self, state: &PersistedState) {
        if let Some(handler) = self.subscriber.borrow_mut().as_mut() {
            handler(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn emit_without_subscriber_is_a_no_op() {
        let signal = SaveSignal::new();
        signal.emit(&PersistedState(json!({"uid": 1})));
    }

    #[test]
    fn emissions_arrive_in_order() {
        let signal = SaveSignal::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        signal.subscribe(Box::new(move |state| {
            sink.borrow_mut().push(state.clone());
        }));

        for uid in 0..4 {
            signal.emit(&PersistedState(json!({ "uid": uid })));
        }

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        for (uid, state) in seen.iter().enumerate() {
            assert_eq!(state.0["uid"], uid);
        }
    }

    #[test]
    fn debug_format_reports_subscription_state() {
        let signal = SaveSignal::new();
        assert_eq!(format!("{signal:?}"), "SaveSignal { subscribed: false }");
        signal.subscribe(Box::new(|_| {}));
        assert_eq!(format!("{signal:?}"), "SaveSignal { subscribed: true }");
    }

    #[test]
    fn resubscribe_replaces_the_handler() {
        let signal = SaveSignal::new();
        let first = Rc::new(RefCell::new(0u32));
        let second = Rc::new(RefCell::new(0u32));

        let count = first.clone();
        signal.subscribe(Box::new(move |_| *count.borrow_mut() += 1));
        signal.emit(&PersistedState(json!(null)));

        let count = second.clone();
        signal.subscribe(Box::new(move |_| *count.borrow_mut() += 1));
        signal.emit(&PersistedState(json!(null)));
        signal.emit(&PersistedState(json!(null)));

        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 2);
    }
}
