//! Outbound engine events and listener registry
//!
//! Collaborators (renderer, persistence) register listeners on the engine
//! instead of the engine reaching into shared global state.

use crate::types::{HighScoreEntry, RunStats};

/// Notification emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Stats after a command or gravity step changed state
    StatsChanged(RunStats),
    /// The game ended; carries the final result to persist
    GameOver(HighScoreEntry),
}

/// Receiver of engine events
pub trait EngineListener {
    fn on_event(&mut self, event: &EngineEvent);
}

impl<F> EngineListener for F
where
    F: FnMut(&EngineEvent),
{
    fn on_event(&mut self, event: &EngineEvent) {
        self(event)
    }
}

/// Ordered set of registered listeners
#[derive(Default)]
pub struct Listeners {
    inner: Vec<Box<dyn EngineListener>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, listener: impl EngineListener + 'static) {
        self.inner.push(Box::new(listener));
    }

    /// Deliver an event to every listener in registration order
    pub fn emit(&mut self, event: &EngineEvent) {
        for listener in &mut self.inner {
            listener.on_event(event);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.inner.len())
            .finish()
    }
}
