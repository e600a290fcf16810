//! Click listeners and dispatch

use std::rc::Rc;

use crate::{Document, DomError, DomResult, NodeId};

/// Listener invoked with mutable access to the document it is bound in
pub type ClickListener = Rc<dyn Fn(&mut Document, &ClickEvent) -> anyhow::Result<()>>;

/// A click as seen by one listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Node the click landed on
    pub target: NodeId,
    /// Node whose listener is running
    pub current_target: NodeId,
}

/// Result of dispatching one click
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    /// Number of listeners that ran
    pub invoked: usize,
    /// Errors returned by listeners, in invocation order
    pub errors: Vec<anyhow::Error>,
}

impl DispatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Document {
    /// Register a click listener on a node
    ///
    /// Listeners are not deduplicated; registering the same behavior twice
    /// makes it run twice per click.
    pub fn add_click_listener<F>(&mut self, node: NodeId, listener: F) -> DomResult<()>
    where
        F: Fn(&mut Document, &ClickEvent) -> anyhow::Result<()> + 'static,
    {
        if self.node(node).is_none() {
            return Err(DomError::UnknownNode { id: node });
        }
        self.listeners.entry(node).or_default().push(Rc::new(listener));
        Ok(())
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.get(&node).map(Vec::len).unwrap_or(0)
    }

    /// Dispatch a click on `target`, bubbling through its ancestors
    ///
    /// Every listener on the path runs to completion. A failing listener does
    /// not stop the others; its error is logged and kept in the outcome.
    pub fn click(&mut self, target: NodeId) -> DomResult<DispatchOutcome> {
        if self.node(target).is_none() {
            return Err(DomError::UnknownNode { id: target });
        }

        let mut path = vec![target];
        let mut current = self.parent(target);
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node);
        }

        let mut outcome = DispatchOutcome::default();
        for current_target in path {
            let listeners = match self.listeners.get(&current_target) {
                Some(listeners) => listeners.clone(),
                None => continue,
            };
            let event = ClickEvent {
                target,
                current_target,
            };
            for listener in listeners {
                outcome.invoked += 1;
                if let Err(e) = listener(self, &event) {
                    log::error!(
                        target: "bakeweb::dom",
                        "click listener on {} failed (target {}): {:#}",
                        current_target,
                        target,
                        e
                    );
                    outcome.errors.push(e);
                }
            }
        }

        log::trace!(target: "bakeweb::dom", "click on {} ran {} listener(s)", target, outcome.invoked);
        Ok(outcome)
    }
}

// ==================== Tests ====================
