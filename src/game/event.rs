//! Game events
//!
//! The simulation reports what happened during a frame by queueing events
//! instead of calling into the frontend. The main loop drains the queue
//! after each update (for logging today; sound would hook in here too).

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player left the ground by jumping
    Jumped { x: f32 },
    /// Player stomped one or more enemies
    Stomped { count: usize },
    /// Player took a hit
    Damaged { hp_left: i32 },
    /// The run started over
    Restarted { reason: RestartReason, distance: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartReason {
    /// Restart action
    Requested,
    /// Ran out of hit points
    Died,
    /// Fell below the bottom of the world
    Fell,
}

impl RestartReason {
    pub fn label(&self) -> &'static str {
        match self {
            RestartReason::Requested => "restart requested",
            RestartReason::Died => "out of hp",
            RestartReason::Fell => "fell out of the world",
        }
    }
}

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
