//! Rebuilding the span tree from a flat event log.

use std::fmt::{self, Write as _};

use super::Event;
use crate::error::{ErrorSeverity, RulesError};

/// The event stream does not describe a well-formed nesting.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("event {index}: expected depth {expected}, found {found}")]
    DepthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("event {index}: end without a matching begin")]
    UnmatchedEnd { index: usize },
}

impl RulesError for TreeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// One span and everything nested inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanNode<P> {
    pub payload: P,
    pub depth: usize,
    /// False when the stream ended before this span was closed.
    pub closed: bool,
    pub children: Vec<SpanNode<P>>,
}

/// A forest of spans reconstructed purely from `{depth, is_end}`.
///
/// # Example
/// ```
/// # use skirmish_core::event::{Dispatcher, EventTree, Message};
/// let mut hub = Dispatcher::<Message>::new();
/// hub.begin(Message::Note("attack".into()));
/// hub.add(Message::Note("roll".into()));
/// hub.end().unwrap();
///
/// let tree = EventTree::build(hub.events()).unwrap();
/// assert_eq!(tree.roots.len(), 1);
/// assert_eq!(tree.roots[0].children.len(), 1);
/// assert_eq!(tree.render(), "attack\n  roll\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventTree<P> {
    pub roots: Vec<SpanNode<P>>,
}

impl<P: Clone> EventTree<P> {
    /// Rebuilds the tree.
    ///
    /// A begin must sit at the current nesting height and an end one level
    /// below its begin. Spans still open when the stream ends are kept with
    /// `closed == false`.
    pub fn build(events: &[Event<P>]) -> Result<Self, TreeError> {
        let mut open: Vec<SpanNode<P>> = Vec::new();
        let mut roots = Vec::new();

        for (index, event) in events.iter().enumerate() {
            if event.is_end {
                if open.is_empty() {
                    return Err(TreeError::UnmatchedEnd { index });
                }
                if event.depth != open.len() {
                    return Err(TreeError::DepthMismatch {
                        index,
                        expected: open.len(),
                        found: event.depth,
                    });
                }
                let Some(mut node) = open.pop() else {
                    return Err(TreeError::UnmatchedEnd { index });
                };
                node.closed = true;
                attach(&mut open, &mut roots, node);
            } else {
                if event.depth != open.len() {
                    return Err(TreeError::DepthMismatch {
                        index,
                        expected: open.len(),
                        found: event.depth,
                    });
                }
                open.push(SpanNode {
                    payload: event.payload.clone(),
                    depth: event.depth,
                    closed: false,
                    children: Vec::new(),
                });
            }
        }

        while let Some(node) = open.pop() {
            attach(&mut open, &mut roots, node);
        }

        Ok(Self { roots })
    }

    /// Visits every node depth-first, parents before children.
    pub fn walk(&self, mut visit: impl FnMut(&SpanNode<P>)) {
        fn go<P>(node: &SpanNode<P>, visit: &mut impl FnMut(&SpanNode<P>)) {
            visit(node);
            for child in &node.children {
                go(child, visit);
            }
        }
        for root in &self.roots {
            go(root, &mut visit);
        }
    }

    /// Number of spans in the tree.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.walk(|_| count += 1);
        count
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl<P: Clone + fmt::Display> EventTree<P> {
    /// Renders one line per span, indented two spaces per level.
    /// Unclosed spans are marked `(open)`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.walk(|node| {
            let indent = "  ".repeat(node.depth);
            let marker = if node.closed { "" } else { " (open)" };
            let _ = writeln!(out, "{indent}{}{marker}", node.payload);
        });
        out
    }
}

fn attach<P>(open: &mut [SpanNode<P>], roots: &mut Vec<SpanNode<P>>, node: SpanNode<P>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Dispatcher, Message};

    fn note(text: &str) -> Message {
        Message::Note(text.to_owned())
    }

    fn raw(depth: usize, is_end: bool) -> Event<Message> {
        Event {
            payload: note("x"),
            depth,
            is_end,
        }
    }

    #[test]
    fn rebuilds_nested_spans() {
        let mut hub = Dispatcher::<Message>::new();
        hub.begin(note("turn"));
        hub.begin(note("attack"));
        hub.add(note("roll"));
        hub.add(note("damage"));
        hub.end().unwrap();
        hub.add(note("move"));
        hub.end().unwrap();
        hub.add(note("next turn"));

        let tree = EventTree::build(hub.events()).unwrap();
        assert_eq!(tree.roots.len(), 2);
        assert_eq!(tree.len(), 6);
        assert_eq!(
            tree.render(),
            "turn\n  attack\n    roll\n    damage\n  move\nnext turn\n"
        );
        tree.walk(|node| assert!(node.closed));
    }

    #[test]
    fn keeps_unclosed_spans() {
        let mut hub = Dispatcher::<Message>::new();
        hub.begin(note("turn"));
        hub.add(note("roll"));
        let tree = EventTree::build(hub.events()).unwrap();
        assert!(!tree.roots[0].closed);
        assert!(tree.roots[0].children[0].closed);
        assert_eq!(tree.render(), "turn (open)\n  roll\n");
        hub.end().unwrap();
    }

    #[test]
    fn rejects_malformed_streams() {
        assert_eq!(
            EventTree::build(&[raw(1, true)]),
            Err(TreeError::UnmatchedEnd { index: 0 })
        );
        assert_eq!(
            EventTree::build(&[raw(0, false), raw(2, false)]),
            Err(TreeError::DepthMismatch {
                index: 1,
                expected: 1,
                found: 2
            })
        );
        assert_eq!(
            EventTree::build(&[raw(0, false), raw(0, true)]),
            Err(TreeError::DepthMismatch {
                index: 1,
                expected: 1,
                found: 0
            })
        );
    }

    #[test]
    fn empty_log_is_empty_tree() {
        let tree = EventTree::<Message>::build(&[]).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.render(), "");
    }
}
