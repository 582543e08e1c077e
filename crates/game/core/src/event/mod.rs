//! Nested event log with synchronous pub/sub delivery.
//!
//! A host opens a span with [`Dispatcher::begin`], performs sub-actions
//! (which open and close their own spans), and closes it with
//! [`Dispatcher::end`]. Every begin and every end is appended to a flat log
//! as an [`Event`] stamped with the nesting depth at creation time:
//!
//! ```text
//! begin(attack)      depth 0   ─┐
//!   begin(roll)      depth 1    │ ─┐
//!   end              depth 2    │ ─┘
//!   add(damage)      depth 1/2  │
//! end                depth 1   ─┘
//! ```
//!
//! A span opened at depth `d` is closed by an end event at depth `d + 1`, so
//! consumers can rebuild the tree from `{depth, is_end}` alone
//! (see [`EventTree`]).

mod dispatcher;
mod message;
mod tree;

pub use dispatcher::{Dispatcher, SpanError, SpanGuard, SubscriptionId};
pub use message::{Message, MessageKind};
pub use tree::{EventTree, SpanNode, TreeError};

use std::fmt;
use std::hash::Hash;

/// A payload type carried by the event log.
///
/// Each payload reports an explicit kind tag, used to route events to
/// kind-specific subscribers. Distinct kinds need distinct tags; the kind
/// must depend only on which variant the payload is, never on field values.
pub trait Payload: Clone + fmt::Debug {
    type Kind: Copy + Eq + Hash + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

/// One entry in the event log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event<P> {
    pub payload: P,
    /// Stack height captured when the event was created.
    pub depth: usize,
    /// True for the closing half of a span.
    pub is_end: bool,
}

impl<P: Payload> Event<P> {
    pub fn kind(&self) -> P::Kind {
        self.payload.kind()
    }
}
