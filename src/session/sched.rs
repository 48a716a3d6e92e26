//! Outbound request scheduling.
//!
//! Queued requests carry a dependency predicate; the pump walks the queue
//! front to back each tick and sends every entry whose predicate is
//! satisfied, skipping (not blocking on) the rest. FIFO order is preserved
//! within a dependency class while unrelated requests keep moving.

use crate::dap::{Command, EventName};
use crate::error::Error;
use crate::session::connection::{Connection, Tick};

/// What a queued request waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// Send as soon as the queue reaches it.
    None,
    /// Send once the response to the request with this seq has been handled.
    AfterSeq(i64),
    /// Send once some response to this command has been handled.
    AfterResponse(Command),
    /// Send once this event has been handled.
    AfterEvent(EventName),
}

/// Narrows *when* the gating log entry must have been handled, relative to
/// the moment the dependent request was queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandledWhen {
    /// Strictly before the request was queued.
    BeforeQueueing,
    /// Strictly after the request was queued.
    AfterQueueing,
    /// At any time.
    Any,
}

/// A dependency predicate: what to wait for and when it must have happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependence {
    pub on: Dependency,
    pub when: HandledWhen,
}

impl Dependence {
    pub const NONE: Dependence = Dependence {
        on: Dependency::None,
        when: HandledWhen::Any,
    };

    pub fn on(on: Dependency) -> Dependence {
        Dependence {
            on,
            when: HandledWhen::Any,
        }
    }

    pub fn after_response(command: Command) -> Dependence {
        Dependence::on(Dependency::AfterResponse(command))
    }

    pub fn after_event(event: EventName) -> Dependence {
        Dependence::on(Dependency::AfterEvent(event))
    }

    pub fn after_seq(seq: i64) -> Dependence {
        Dependence::on(Dependency::AfterSeq(seq))
    }

    pub fn when(mut self, when: HandledWhen) -> Dependence {
        self.when = when;
        self
    }
}

fn timing_ok(gate: Tick, queued: Tick, when: HandledWhen) -> bool {
    match when {
        HandledWhen::BeforeQueueing => gate < queued,
        HandledWhen::AfterQueueing => gate > queued,
        HandledWhen::Any => true,
    }
}

/// Evaluate the dependency of the outbound entry at `index`.
pub fn dependency_satisfied(conn: &Connection, index: usize) -> bool {
    let entry = &conn.outbound()[index];
    let queued = entry.queued_at;
    let when = entry.dependence.when;
    match entry.dependence.on {
        Dependency::None => true,
        Dependency::AfterSeq(seq) => conn
            .handled_responses()
            .iter()
            .any(|h| h.request_seq == seq && timing_ok(h.handled_at, queued, when)),
        Dependency::AfterResponse(command) => conn
            .handled_responses()
            .iter()
            .any(|h| h.command == command && timing_ok(h.handled_at, queued, when)),
        Dependency::AfterEvent(event) => conn
            .handled_events()
            .iter()
            .any(|h| h.event == event && timing_ok(h.handled_at, queued, when)),
    }
}

/// Drive the outbound queue once. Satisfied entries are sent in place (the
/// walk resumes at the same index), unsatisfied entries are skipped, and
/// entries the adapter turns out not to support are dropped.
pub fn pump(conn: &mut Connection) {
    let mut i = 0;
    while i < conn.outbound().len() {
        match conn.send_request_at(i) {
            Ok(_) => {}
            Err(Error::DependencyNotSatisfied) => i += 1,
            Err(Error::AdapterDied) => {
                log::error!("adapter died while sending a queued request");
                break;
            }
            Err(Error::AdapterDoesNotSupportRequest(command)) => {
                log::warn!("dropping queued {command}: not supported by the adapter");
                conn.drop_outbound(i);
            }
            Err(err) => {
                log::warn!("queued request not sent: {err}");
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_modifiers_are_strict() {
        assert!(timing_ok(1, 5, HandledWhen::BeforeQueueing));
        assert!(!timing_ok(5, 5, HandledWhen::BeforeQueueing));
        assert!(!timing_ok(9, 5, HandledWhen::BeforeQueueing));

        assert!(timing_ok(9, 5, HandledWhen::AfterQueueing));
        assert!(!timing_ok(5, 5, HandledWhen::AfterQueueing));
        assert!(!timing_ok(1, 5, HandledWhen::AfterQueueing));

        assert!(timing_ok(1, 5, HandledWhen::Any));
        assert!(timing_ok(9, 5, HandledWhen::Any));
    }
}
