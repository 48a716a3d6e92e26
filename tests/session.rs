//! End-to-end scenarios against the scripted stub adapter, over real pipes.

use dapscope::dap::{Command, EventName, Value};
use dapscope::error::Error;
use dapscope::session::connection::ResponseStatus;
use dapscope::session::data::{SourceKey, ThreadStatus};
use dapscope::session::{
    handlers, request, AdapterSpec, AdapterState, CallbackRegistry, Connection, Drill,
    LaunchConfiguration, SessionData, SessionMode,
};
use serde_json::json;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const DEADLINE: Duration = Duration::from_secs(10);

struct Session {
    conn: Connection,
    data: SessionData,
    callbacks: CallbackRegistry,
}

fn start(scenario: &str) -> Session {
    let adapter = AdapterSpec {
        path: PathBuf::from(env!("CARGO_BIN_EXE_stubdap")),
        argv: vec![scenario.to_string()],
        cwd: None,
    };
    let config = LaunchConfiguration {
        mode: SessionMode::Launch,
        arguments: Value::from_json(json!({"program": "/bin/true"})),
    };

    let mut session = Session {
        conn: Connection::new(true),
        data: SessionData::new(),
        callbacks: CallbackRegistry::new(),
    };
    let queued = request::begin_session(
        &mut session.conn,
        &mut session.data,
        &adapter,
        Some(&config),
    )
    .expect("begin session");
    assert!(queued);
    session
}

impl Session {
    fn drive_until(&mut self, what: &str, mut pred: impl FnMut(&Connection, &SessionData) -> bool) {
        let deadline = Instant::now() + DEADLINE;
        while Instant::now() < deadline {
            handlers::process(&mut self.conn, &mut self.data, &mut self.callbacks);
            if pred(&self.conn, &self.data) {
                return;
            }
        }
        panic!("timed out waiting for: {what}");
    }

    fn wait_for_entry_stop(&mut self) {
        self.drive_until("stop on entry", |conn, data| {
            conn.state() == AdapterState::Launched
                && data.thread(1).map(|t| t.status.is_stopped()).unwrap_or(false)
                && data.thread(2).is_some()
        });
    }
}

#[test]
fn handshake_orders_initialize_launch_configuration_done() {
    let mut session = start("default");
    session.wait_for_entry_stop();

    let responses = session.conn.handled_responses();
    let seq_of = |command: Command| {
        responses
            .iter()
            .find(|h| h.command == command)
            .map(|h| h.request_seq)
            .unwrap_or_else(|| panic!("no handled response for {command}"))
    };
    assert_eq!(seq_of(Command::Initialize), 1);
    assert_eq!(seq_of(Command::Launch), 2);
    assert_eq!(seq_of(Command::ConfigurationDone), 3);
    assert!(session
        .conn
        .handled_events()
        .iter()
        .any(|e| e.event == EventName::Initialized));

    // The initialize response populated the capability set.
    assert!(session.conn.adapter_capabilities().known());

    // configurationDone was only sent after the initialized event.
    let init_event_at = session
        .conn
        .handled_events()
        .iter()
        .find(|e| e.event == EventName::Initialized)
        .unwrap()
        .handled_at;
    let config_done_at = responses
        .iter()
        .find(|h| h.command == Command::ConfigurationDone)
        .unwrap()
        .handled_at;
    assert!(config_done_at > init_event_at);
}

#[test]
fn stopped_cascade_fills_threads_stacks_scopes_and_variables() {
    let mut session = start("default");
    session.wait_for_entry_stop();

    assert_eq!(session.data.thread(1).unwrap().name, "main");
    assert_eq!(session.data.thread(2).unwrap().name, "worker");

    request::stack_trace(&mut session.conn, &mut session.data, 1, Drill::Variables)
        .expect("queue stackTrace");
    session.drive_until("full drill-down", |_, data| {
        let Some(thread) = data.thread(1) else {
            return false;
        };
        thread.stack_complete
            && thread.scopes.len() == thread.stack.len()
            && thread.variables.len() == 2 * thread.stack.len()
    });

    let thread = session.data.thread(1).unwrap();
    assert_eq!(thread.stack.len(), 2);
    for frame in &thread.stack {
        let scopes = session.data.scopes(1, frame.id).expect("scopes per frame");
        assert_eq!(scopes.len(), 2);
        for scope in scopes {
            let variables = session
                .data
                .variables(1, scope.variables_reference)
                .expect("variables per scope");
            assert!(!variables.is_empty());
            // Plain values sort before structured ones.
            assert_eq!(variables[0].variables_reference, 0);
        }
    }

    // Frame sources were interned under their path.
    assert!(session
        .data
        .source(&SourceKey::Path("/src/main.rs".to_string()))
        .is_some());
}

#[test]
fn stack_trace_pages_until_total_frames() {
    let mut session = start("paging");
    session.wait_for_entry_stop();

    request::stack_trace(&mut session.conn, &mut session.data, 1, Drill::None)
        .expect("queue stackTrace");
    session.drive_until("complete paged stack", |_, data| {
        data.thread(1).map(|t| t.stack_complete).unwrap_or(false)
    });

    let thread = session.data.thread(1).unwrap();
    assert_eq!(thread.stack.len(), 50);
    let pages = session
        .conn
        .handled_responses()
        .iter()
        .filter(|h| h.command == Command::StackTrace)
        .count();
    assert_eq!(pages, 3, "50 frames at 20 per page take 3 requests");
}

#[test]
fn set_breakpoints_updates_stored_lines_positionally() {
    let mut session = start("default");
    session.wait_for_entry_stop();

    let key = SourceKey::Path("/a.c".to_string());
    session.data.set_source_breakpoints(
        key.clone(),
        vec![
            dapscope::dap::types::SourceBreakpoint {
                line: 10,
                ..Default::default()
            },
            dapscope::dap::types::SourceBreakpoint {
                line: 20,
                ..Default::default()
            },
        ],
    );
    request::set_breakpoints(&mut session.conn, &session.data, &key).expect("queue setBreakpoints");
    session.drive_until("breakpoints echoed", |_, data| data.breakpoints().len() == 2);

    let lines: Vec<i64> = session
        .data
        .source_breakpoints(&key)
        .iter()
        .map(|b| b.line)
        .collect();
    assert_eq!(lines, [11, 20]);

    let tracked = session.data.breakpoints();
    assert!(tracked[0].breakpoint.verified);
    assert!(!tracked[1].breakpoint.verified);
    assert_eq!(tracked[1].breakpoint.message.as_deref(), Some("could not bind"));
}

#[test]
fn continue_invalidates_references_across_all_threads() {
    let mut session = start("default");
    session.wait_for_entry_stop();

    request::stack_trace(&mut session.conn, &mut session.data, 1, Drill::Variables)
        .expect("queue stackTrace");
    session.drive_until("drill-down before resume", |_, data| {
        data.thread(1)
            .map(|t| t.stack_complete && !t.variables.is_empty())
            .unwrap_or(false)
    });

    request::continue_thread(&mut session.conn, 1).expect("queue continue");
    session.drive_until("all threads resumed", |_, data| {
        data.thread(1)
            .map(|t| t.status == ThreadStatus::Continued)
            .unwrap_or(false)
    });

    for thread in session.data.threads() {
        assert_eq!(thread.status, ThreadStatus::Continued);
        assert!(thread.stack.is_empty());
        assert!(thread.scopes.is_empty());
        assert!(thread.variables.is_empty());
    }
}

#[test]
fn callbacks_fire_on_the_gating_response() {
    use dapscope::session::{CallIf, CallOn};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let mut session = start("default");
    session.wait_for_entry_stop();

    let fired = Arc::new(AtomicBool::new(false));
    let probe = fired.clone();
    let seq = request::pause(&mut session.conn, 2).expect("queue pause");
    session.callbacks.register(
        &session.conn,
        CallIf::Success,
        CallOn::Seq(seq),
        None,
        move |_, response| {
            assert_eq!(response.status, ResponseStatus::Success);
            probe.store(true, Ordering::SeqCst);
        },
    );
    session.drive_until("pause callback", |_, _| fired.load(Ordering::SeqCst));
}

#[test]
fn dead_adapter_pipe_transitions_to_died() {
    let mut session = start("mortal");
    session.drive_until("adapter death noticed", |conn, _| {
        conn.state() == AdapterState::Died
    });

    let err = session
        .conn
        .queue_request(
            Command::Threads,
            None,
            dapscope::session::sched::Dependence::NONE,
            dapscope::session::connection::RequestData::None,
        )
        .unwrap_err();
    assert!(matches!(err, Error::AdapterNotSpawned));

    let notes = session.data.drain_notifications();
    assert!(notes.iter().any(|n| n.contains("died")));
}

#[test]
fn end_session_reaches_ended_cleanly() {
    use dapscope::session::EndSession;

    let mut session = start("default");
    session.wait_for_entry_stop();

    request::end_session(&mut session.conn, EndSession::Disconnect).expect("queue disconnect");
    session.drive_until("session ended", |conn, data| {
        conn.state() == AdapterState::Ended && data.terminated()
    });
}
