//! Observer registry for engine notifications.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::{CalendarEngine, ViewInfo};
use crate::payload::DatePayload;
use crate::prelude::*;

/// Names of the notifications the engine publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    #[display(fmt = "select")]
    Select,
    #[display(fmt = "rangeStart")]
    RangeStart,
    #[display(fmt = "rangeSelect")]
    RangeSelect,
    #[display(fmt = "clear")]
    Clear,
    #[display(fmt = "viewChange")]
    ViewChange,
}

/// A notification together with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum CalendarEvent {
    /// A single date was committed.
    Select(DatePayload),
    /// The first end of a range was picked.
    RangeStart(DatePayload),
    /// A range was committed, start never after end.
    RangeSelect { start: DatePayload, end: DatePayload },
    /// Selection was cleared.
    Clear,
    /// The displayed period or granularity changed.
    ViewChange(ViewInfo),
}

impl CalendarEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Select(_) => EventKind::Select,
            Self::RangeStart(_) => EventKind::RangeStart,
            Self::RangeSelect { .. } => EventKind::RangeSelect,
            Self::Clear => EventKind::Clear,
            Self::ViewChange(_) => EventKind::ViewChange,
        }
    }
}

/// Handle returned by [`CalendarEngine::on`]; pass it to
/// [`CalendarEngine::off`] or call [`Subscription::release`] to unregister.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping the handle makes the listener impossible to remove"]
pub struct Subscription {
    kind: EventKind,
    id:   u64,
}

impl Subscription {
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Unregisters the listener. Returns `false` if it was already gone.
    pub fn release(self, engine: &mut CalendarEngine) -> bool {
        engine.off(self)
    }
}

/// Listener callback. It receives the engine read-only, so it can query
/// state for re-rendering but cannot mutate it mid-dispatch.
pub(crate) type Handler = Box<dyn FnMut(&CalendarEvent, &CalendarEngine)>;

pub(crate) struct Listener {
    id:      u64,
    handler: Handler,
}

/// Handlers keyed by event kind, kept in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    by_kind: HashMap<EventKind, Vec<Listener>>,
}

impl Listeners {
    pub(crate) fn add(&mut self, kind: EventKind, handler: Handler) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.by_kind
            .entry(kind)
            .or_default()
            .push(Listener { id, handler });
        Subscription { kind, id }
    }

    pub(crate) fn remove(&mut self, subscription: &Subscription) -> bool {
        let Some(listeners) = self.by_kind.get_mut(&subscription.kind) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|l| l.id != subscription.id);
        listeners.len() != before
    }

    pub(crate) fn count(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Moves the handlers for `kind` out so they can run against a shared
    /// borrow of the engine.
    pub(crate) fn take(&mut self, kind: EventKind) -> Vec<Listener> {
        self.by_kind.remove(&kind).unwrap_or_default()
    }

    pub(crate) fn restore(&mut self, kind: EventKind, listeners: Vec<Listener>) {
        if !listeners.is_empty() {
            self.by_kind.insert(kind, listeners);
        }
    }
}

impl Listener {
    pub(crate) fn call(&mut self, event: &CalendarEvent, engine: &CalendarEngine) {
        (self.handler)(event, engine);
    }
}
