//! One-shot callbacks gated on handled responses.
//!
//! Higher layers attach a closure to "the next handled response matching a
//! predicate": acknowledge a user command once the adapter confirms it,
//! chain a custom follow-up, surface a failure. The registration stamp keeps
//! a callback from firing on responses that were handled before it existed.

use crate::dap::{Command, Value};
use crate::session::connection::{Connection, HandledResponse, ResponseStatus, Seq, Tick};

/// Which response outcome invokes the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallIf {
    Success,
    Fail,
    Always,
}

/// Which handled responses the callback is watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOn {
    /// The response to the request with this seq.
    Seq(Seq),
    /// Any response to this command.
    Response(Command),
    /// Any handled response at all.
    Any,
}

type CallbackFn = Box<dyn FnOnce(Option<Value>, &HandledResponse)>;

struct Entry {
    call_if: CallIf,
    on: CallOn,
    payload: Option<Value>,
    registered_at: Tick,
    func: Option<CallbackFn>,
}

#[derive(Default)]
pub struct CallbackRegistry {
    entries: Vec<Entry>,
}

impl CallbackRegistry {
    pub fn new() -> CallbackRegistry {
        CallbackRegistry::default()
    }

    /// Attach a one-shot closure. `payload` is handed to the closure when it
    /// fires; ownership transfers with the call.
    pub fn register(
        &mut self,
        conn: &Connection,
        call_if: CallIf,
        on: CallOn,
        payload: Option<Value>,
        func: impl FnOnce(Option<Value>, &HandledResponse) + 'static,
    ) {
        self.entries.push(Entry {
            call_if,
            on,
            payload,
            registered_at: conn.now(),
            func: Some(Box::new(func)),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fire every registered callback whose predicate matches a handled
    /// response no older than its registration, then drop it.
    pub fn run(&mut self, conn: &Connection) {
        if self.entries.is_empty() {
            return;
        }
        for response in conn.handled_responses() {
            for entry in &mut self.entries {
                if entry.func.is_none() || !entry.matches(response) {
                    continue;
                }
                let func = entry.func.take().expect("checked above");
                func(entry.payload.take(), response);
            }
        }
        self.entries.retain(|entry| entry.func.is_some());
    }
}

impl Entry {
    fn matches(&self, response: &HandledResponse) -> bool {
        if response.handled_at < self.registered_at {
            return false;
        }
        let outcome_ok = match self.call_if {
            CallIf::Success => response.status == ResponseStatus::Success,
            CallIf::Fail => response.status == ResponseStatus::Failure,
            CallIf::Always => true,
        };
        if !outcome_ok {
            return false;
        }
        match self.on {
            CallOn::Seq(seq) => response.request_seq == seq,
            CallOn::Response(command) => response.command == command,
            CallOn::Any => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dap::transport::MockTransport;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn connection() -> Connection {
        Connection::with_transport(Box::new(MockTransport::new()))
    }

    #[test]
    fn fires_once_on_matching_success() {
        let mut conn = connection();
        let mut registry = CallbackRegistry::new();
        let fired = Rc::new(RefCell::new(0));

        let probe = fired.clone();
        registry.register(
            &conn,
            CallIf::Success,
            CallOn::Response(Command::Threads),
            Some(Value::from("payload")),
            move |payload, response| {
                assert_eq!(payload, Some(Value::from("payload")));
                assert_eq!(response.command, Command::Threads);
                *probe.borrow_mut() += 1;
            },
        );

        conn.handled_response(Command::Threads, 4, ResponseStatus::Success, Value::Null);
        registry.run(&conn);
        registry.run(&conn);
        assert_eq!(*fired.borrow(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn does_not_fire_on_responses_handled_before_registration() {
        let mut conn = connection();
        let mut registry = CallbackRegistry::new();

        conn.handled_response(Command::Threads, 1, ResponseStatus::Success, Value::Null);

        let fired = Rc::new(RefCell::new(false));
        let probe = fired.clone();
        registry.register(
            &conn,
            CallIf::Always,
            CallOn::Response(Command::Threads),
            None,
            move |_, _| *probe.borrow_mut() = true,
        );
        registry.run(&conn);
        assert!(!*fired.borrow());
        assert_eq!(registry.len(), 1);

        conn.handled_response(Command::Threads, 2, ResponseStatus::Success, Value::Null);
        registry.run(&conn);
        assert!(*fired.borrow());
    }

    #[test]
    fn failure_callbacks_observe_failures_only() {
        let mut conn = connection();
        let mut registry = CallbackRegistry::new();
        let fired = Rc::new(RefCell::new(0));

        let probe = fired.clone();
        registry.register(
            &conn,
            CallIf::Fail,
            CallOn::Seq(9),
            None,
            move |_, response| {
                assert_eq!(response.status, ResponseStatus::Failure);
                *probe.borrow_mut() += 1;
            },
        );

        conn.handled_response(Command::Pause, 9, ResponseStatus::Success, Value::Null);
        registry.run(&conn);
        assert_eq!(*fired.borrow(), 0);

        conn.handled_response(Command::Pause, 9, ResponseStatus::Failure, Value::Null);
        registry.run(&conn);
        assert_eq!(*fired.borrow(), 1);
    }
}
