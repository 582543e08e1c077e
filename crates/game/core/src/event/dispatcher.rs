//! The per-encounter event hub.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use tracing::{debug, error, trace, warn};

use super::{Event, Payload};
use crate::config::CoreConfig;
use crate::error::{ErrorSeverity, RulesError};

/// Span bookkeeping errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    /// `end()` was called with no open span (reported in strict mode only).
    #[error("end() called with no open span")]
    Unbalanced,

    /// The dispatcher was finished while spans were still open.
    #[error("{open} span(s) still open at teardown")]
    Unclosed { open: usize },
}

impl RulesError for SpanError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unbalanced => ErrorSeverity::Recoverable,
            Self::Unclosed { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unbalanced => "SPAN_UNBALANCED",
            Self::Unclosed { .. } => "SPAN_UNCLOSED",
        }
    }
}

/// Identifies a subscription for [`Dispatcher::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<P> = Box<dyn FnMut(&Event<P>) + Send>;

/// Append-only event log, stack of open spans, and subscriber lists.
///
/// One dispatcher serves one encounter; it is not shared across threads and
/// has no internal locking. Subscribers run synchronously on the caller's
/// thread and cannot re-enter the dispatcher.
///
/// # Delivery order
///
/// For every event: all catch-all subscribers in registration order, then all
/// subscribers for the event's kind in registration order.
///
/// # Example
/// ```
/// # use skirmish_core::event::{Dispatcher, Message};
/// let mut hub = Dispatcher::<Message>::new();
/// hub.begin(Message::Note("attack".into()));
/// hub.add(Message::Note("roll".into()));
/// hub.end().unwrap();
///
/// let depths: Vec<_> = hub.events().iter().map(|e| (e.depth, e.is_end)).collect();
/// assert_eq!(depths, [(0, false), (1, false), (2, true), (1, true)]);
/// assert!(hub.finish().is_ok());
/// ```
pub struct Dispatcher<P: Payload> {
    config: CoreConfig,
    log: Vec<Event<P>>,
    stack: Vec<P>,
    catch_all: Vec<(SubscriptionId, Handler<P>)>,
    by_kind: HashMap<P::Kind, Vec<(SubscriptionId, Handler<P>)>>,
    next_subscription: u64,
    finished: bool,
}

impl<P: Payload> Dispatcher<P> {
    pub fn new() -> Self {
        Self::with_config(CoreConfig::default())
    }

    pub fn with_config(config: CoreConfig) -> Self {
        Self {
            config,
            log: Vec::new(),
            stack: Vec::new(),
            catch_all: Vec::new(),
            by_kind: HashMap::new(),
            next_subscription: 0,
            finished: false,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    // ========================================================================
    // Spans
    // ========================================================================

    /// Opens a span.
    pub fn begin(&mut self, payload: P) {
        let depth = self.stack.len();
        self.stack.push(payload.clone());
        self.record(Event {
            payload,
            depth,
            is_end: false,
        });
    }

    /// Closes the innermost open span.
    ///
    /// With no open span this records nothing and notifies nobody. In strict
    /// mode it also returns [`SpanError::Unbalanced`]; otherwise it succeeds.
    pub fn end(&mut self) -> Result<(), SpanError> {
        if self.close_top() {
            return Ok(());
        }
        if self.config.strict_spans {
            warn!(target: "skirmish::event", "end() called with no open span");
            return Err(SpanError::Unbalanced);
        }
        debug!(target: "skirmish::event", "ignoring end() with no open span");
        Ok(())
    }

    /// Records an atomic event: a begin immediately followed by its end.
    pub fn add(&mut self, payload: P) {
        self.begin(payload);
        self.close_top();
    }

    /// Opens a span that closes when the returned guard is dropped.
    ///
    /// The guard dereferences to the dispatcher, so nested spans are opened
    /// through it.
    pub fn span(&mut self, payload: P) -> SpanGuard<'_, P> {
        self.begin(payload);
        let height = self.stack.len();
        SpanGuard {
            dispatcher: self,
            height,
        }
    }

    fn close_top(&mut self) -> bool {
        let Some(payload) = self.stack.pop() else {
            return false;
        };
        let depth = self.stack.len() + 1;
        self.record(Event {
            payload,
            depth,
            is_end: true,
        });
        true
    }

    fn record(&mut self, event: Event<P>) {
        self.log.push(event);
        let event = &self.log[self.log.len() - 1];

        trace!(
            target: "skirmish::event",
            kind = ?event.kind(),
            depth = event.depth,
            is_end = event.is_end,
            "event recorded"
        );

        for (_, handler) in &mut self.catch_all {
            handler(event);
        }
        if let Some(handlers) = self.by_kind.get_mut(&event.kind()) {
            for (_, handler) in handlers {
                handler(event);
            }
        }
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Subscribes to every event.
    pub fn subscribe_all(
        &mut self,
        handler: impl FnMut(&Event<P>) + Send + 'static,
    ) -> SubscriptionId {
        let id = self.next_id();
        self.catch_all.push((id, Box::new(handler)));
        id
    }

    /// Subscribes to events of one kind.
    pub fn subscribe(
        &mut self,
        kind: P::Kind,
        handler: impl FnMut(&Event<P>) + Send + 'static,
    ) -> SubscriptionId {
        let id = self.next_id();
        self.by_kind
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Removes a subscription; returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if let Some(index) = self.catch_all.iter().position(|(s, _)| *s == id) {
            self.catch_all.remove(index);
            return true;
        }
        for handlers in self.by_kind.values_mut() {
            if let Some(index) = handlers.iter().position(|(s, _)| *s == id) {
                handlers.remove(index);
                return true;
            }
        }
        false
    }

    fn next_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        id
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// The full log in creation order.
    pub fn events(&self) -> &[Event<P>] {
        &self.log
    }

    /// Current nesting depth (number of open spans).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Payloads of the open spans, outermost first.
    pub fn open_spans(&self) -> &[P] {
        &self.stack
    }

    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty()
    }

    /// Ends the dispatcher's life and hands back the log.
    ///
    /// Fails with [`SpanError::Unclosed`] when spans are still open, which
    /// means some caller never closed its span.
    pub fn finish(mut self) -> Result<Vec<Event<P>>, SpanError> {
        self.finished = true;
        if !self.stack.is_empty() {
            let open = self.stack.len();
            error!(
                target: "skirmish::event",
                open,
                innermost = ?self.stack.last(),
                "dispatcher finished with open spans"
            );
            return Err(SpanError::Unclosed { open });
        }
        Ok(std::mem::take(&mut self.log))
    }
}

impl<P: Payload> Default for Dispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload> std::fmt::Debug for Dispatcher<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("events", &self.log.len())
            .field("open_spans", &self.stack)
            .field("catch_all", &self.catch_all.len())
            .field("by_kind", &self.by_kind.len())
            .finish()
    }
}

impl<P: Payload> Drop for Dispatcher<P> {
    fn drop(&mut self) {
        if self.finished || self.stack.is_empty() {
            return;
        }
        error!(
            target: "skirmish::event",
            open = self.stack.len(),
            innermost = ?self.stack.last(),
            "dispatcher dropped with open spans"
        );
        if self.config.strict_spans && !std::thread::panicking() {
            debug_assert!(
                self.stack.is_empty(),
                "dispatcher dropped with {} open span(s)",
                self.stack.len()
            );
        }
    }
}

/// Closes its span on drop. See [`Dispatcher::span`].
pub struct SpanGuard<'a, P: Payload> {
    dispatcher: &'a mut Dispatcher<P>,
    height: usize,
}

impl<P: Payload> SpanGuard<'_, P> {
    /// Closes the span now.
    pub fn close(self) {}
}

impl<P: Payload> Deref for SpanGuard<'_, P> {
    type Target = Dispatcher<P>;

    fn deref(&self) -> &Self::Target {
        &*self.dispatcher
    }
}

impl<P: Payload> DerefMut for SpanGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.dispatcher
    }
}

impl<P: Payload> Drop for SpanGuard<'_, P> {
    fn drop(&mut self) {
        let depth = self.dispatcher.depth();
        if depth < self.height {
            // Already closed through an explicit end().
            return;
        }
        if depth > self.height {
            warn!(
                target: "skirmish::event",
                leaked = depth - self.height,
                "closing nested spans left open inside a guarded span"
            );
        }
        while self.dispatcher.depth() >= self.height {
            self.dispatcher.close_top();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::event::{Message, MessageKind};

    fn note(text: &str) -> Message {
        Message::Note(text.to_owned())
    }

    fn shape(hub: &Dispatcher<Message>) -> Vec<(usize, bool)> {
        hub.events().iter().map(|e| (e.depth, e.is_end)).collect()
    }

    #[test]
    fn begin_end_depths_pair_up() {
        let mut hub = Dispatcher::<Message>::new();
        hub.begin(note("outer"));
        hub.begin(note("inner"));
        hub.end().unwrap();
        hub.end().unwrap();

        assert_eq!(shape(&hub), [(0, false), (1, false), (2, true), (1, true)]);
        assert_eq!(hub.events()[2].payload, note("inner"));
        assert_eq!(hub.events()[3].payload, note("outer"));
    }

    #[test]
    fn add_is_a_zero_width_span() {
        let mut hub = Dispatcher::<Message>::new();
        hub.add(note("tick"));
        assert_eq!(shape(&hub), [(0, false), (1, true)]);
        assert!(hub.is_balanced());
    }

    #[test]
    fn unmatched_end_is_silent_in_lenient_mode() {
        let mut hub = Dispatcher::<Message>::new();
        let seen = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&seen);
        hub.subscribe_all(move |_| *counter.lock().unwrap() += 1);

        assert_eq!(hub.end(), Ok(()));
        assert!(hub.events().is_empty());
        assert_eq!(*seen.lock().unwrap(), 0);
    }

    #[test]
    fn unmatched_end_is_reported_in_strict_mode() {
        let mut hub = Dispatcher::<Message>::with_config(CoreConfig::strict());
        assert_eq!(hub.end(), Err(SpanError::Unbalanced));
        assert!(hub.events().is_empty());
    }

    #[test]
    fn catch_all_runs_before_kind_subscribers() {
        let mut hub = Dispatcher::<Message>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&order);
        hub.subscribe(MessageKind::Note, move |_| log.lock().unwrap().push("note-1"));
        let log = Arc::clone(&order);
        hub.subscribe_all(move |_| log.lock().unwrap().push("all-1"));
        let log = Arc::clone(&order);
        hub.subscribe(MessageKind::Note, move |_| log.lock().unwrap().push("note-2"));
        let log = Arc::clone(&order);
        hub.subscribe_all(move |_| log.lock().unwrap().push("all-2"));
        let log = Arc::clone(&order);
        hub.subscribe(MessageKind::Action, move |_| log.lock().unwrap().push("action"));

        hub.begin(note("x"));
        assert_eq!(*order.lock().unwrap(), ["all-1", "all-2", "note-1", "note-2"]);
        hub.end().unwrap();
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut hub = Dispatcher::<Message>::new();
        let seen = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&seen);
        let id = hub.subscribe(MessageKind::Note, move |_| *counter.lock().unwrap() += 1);

        hub.add(note("a"));
        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.add(note("b"));
        assert_eq!(*seen.lock().unwrap(), 2);
    }

    #[test]
    fn guard_closes_on_drop() {
        let mut hub = Dispatcher::<Message>::new();
        {
            let mut attack = hub.span(note("attack"));
            attack.add(note("roll"));
            assert_eq!(attack.depth(), 1);
        }
        assert!(hub.is_balanced());
        assert_eq!(shape(&hub), [(0, false), (1, false), (2, true), (1, true)]);
    }

    #[test]
    fn guard_closes_leaked_inner_spans() {
        let mut hub = Dispatcher::<Message>::new();
        {
            let mut outer = hub.span(note("outer"));
            outer.begin(note("forgotten"));
        }
        assert!(hub.is_balanced());
        assert_eq!(shape(&hub), [(0, false), (1, false), (2, true), (1, true)]);
    }

    #[test]
    fn guard_tolerates_explicit_end() {
        let mut hub = Dispatcher::<Message>::new();
        hub.begin(note("outer"));
        {
            let mut inner = hub.span(note("inner"));
            inner.end().unwrap();
        }
        assert_eq!(hub.depth(), 1);
        hub.end().unwrap();
        assert!(hub.finish().is_ok());
    }

    #[test]
    fn finish_reports_open_spans() {
        let mut hub = Dispatcher::<Message>::new();
        hub.begin(note("never closed"));
        assert_eq!(hub.finish(), Err(SpanError::Unclosed { open: 1 }));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "open span")]
    fn strict_drop_with_open_spans_asserts() {
        let mut hub = Dispatcher::<Message>::with_config(CoreConfig::strict());
        hub.begin(note("never closed"));
        drop(hub);
    }

    #[test]
    fn lenient_drop_with_open_spans_only_logs() {
        let mut hub = Dispatcher::<Message>::new();
        hub.begin(note("never closed"));
        drop(hub);
    }

    #[test]
    fn strict_finish_reports_instead_of_asserting() {
        let mut hub = Dispatcher::<Message>::with_config(CoreConfig::strict());
        hub.begin(note("outer"));
        hub.begin(note("inner"));
        assert_eq!(hub.finish(), Err(SpanError::Unclosed { open: 2 }));
    }
}
