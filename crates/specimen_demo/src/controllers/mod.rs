//! Controllers attached to the live instance.
//!
//! Each controller is plain data plus a small lifecycle: it binds to the
//! live instance when one is created and resets to its empty state when
//! the host disconnects. Changes request a host update through the shared
//! [`UpdateScheduler`].

mod events;
mod slots;
mod styles;

pub use events::{EventLogEntry, EventsController};
pub use slots::SlotsController;
pub use styles::StylesController;

use std::cell::Cell;
use std::rc::Rc;

/// Lifecycle hooks shared by every controller.
pub trait Controller {
    /// Drop instance bindings and reset to the empty state.
    fn host_disconnected(&mut self);
}

#[derive(Debug, Default)]
struct SchedulerState {
    connected: Cell<bool>,
    requested: Cell<bool>,
    renders: Cell<u32>,
}

/// Coalescing update requests for one host.
///
/// Any number of requests between two host ticks produce one render.
/// Requests made while the host is disconnected are dropped.
#[derive(Debug, Clone, Default)]
pub struct UpdateScheduler {
    state: Rc<SchedulerState>,
}

impl UpdateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_update(&self) {
        if self.state.connected.get() {
            self.state.requested.set(true);
        }
    }

    #[inline]
    pub fn is_requested(&self) -> bool {
        self.state.requested.get()
    }

    /// Consume a pending request.
    pub(crate) fn take_request(&self) -> bool {
        self.state.requested.replace(false)
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.state.connected.get()
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.state.connected.set(connected);
        if !connected {
            self.state.requested.set(false);
        }
    }

    pub(crate) fn record_render(&self) {
        self.state.renders.set(self.state.renders.get() + 1);
    }

    /// Renders performed so far.
    #[inline]
    pub fn render_count(&self) -> u32 {
        self.state.renders.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_coalesce() {
        let scheduler = UpdateScheduler::new();
        scheduler.set_connected(true);
        scheduler.request_update();
        scheduler.request_update();

        assert!(scheduler.take_request());
        assert!(!scheduler.take_request());
    }

    #[test]
    fn test_disconnected_requests_dropped() {
        let scheduler = UpdateScheduler::new();
        scheduler.request_update();
        assert!(!scheduler.is_requested());

        scheduler.set_connected(true);
        scheduler.request_update();
        scheduler.set_connected(false);
        assert!(!scheduler.is_requested());
    }
}
