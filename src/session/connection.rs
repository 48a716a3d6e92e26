//! Adapter connection: child process ownership, sequence allocation, the
//! outbound/inbound queues and the handled-message logs that dependency
//! predicates and callbacks are evaluated against.

use crate::dap::envelope::{self, Command, EventName};
use crate::dap::transport::{StdioTransport, Transport};
use crate::dap::value::Value;
use crate::error::Error;
use crate::session::capabilities::{
    required_capability, AdapterCapabilities, ClientCapability,
};
use crate::session::data::{DataBreakpointKey, SourceKey};
use crate::session::sched::{self, Dependence};
use std::collections::{HashSet, VecDeque};
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::process::{Child, Stdio};
use std::time::Duration;

/// Monotonic ordering stamp. Every queue or handle operation advances it, so
/// "handled before queued" questions reduce to integer comparison.
pub type Tick = u64;

pub type Seq = i64;

/// Lifecycle of the attached adapter process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    NotSpawned,
    Spawned,
    Initializing,
    PartiallyInitialized,
    Initialized,
    Launched,
    Attached,
    Died,
    Ended,
}

impl AdapterState {
    /// States in which only handshake traffic is permitted.
    fn handshake_only(self) -> bool {
        matches!(
            self,
            AdapterState::Spawned | AdapterState::Initializing | AdapterState::PartiallyInitialized
        )
    }
}

/// How deep a stack inspection request should cascade once its response
/// arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drill {
    /// Stop at the immediate response.
    None,
    /// Follow up with `scopes` per frame.
    Scopes,
    /// Follow up with `scopes` per frame and `variables` per scope.
    Variables,
}

/// Command-specific context retained from queueing until the response is
/// handled; it tells the response handler what to correlate and which
/// follow-up requests to schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestData {
    None,
    Continue {
        thread_id: i64,
    },
    StackTrace {
        thread_id: i64,
        page_start: i64,
        drill: Drill,
    },
    Scopes {
        thread_id: i64,
        frame_id: i64,
        drill: Drill,
    },
    Variables {
        thread_id: i64,
        reference: i64,
    },
    SetVariable {
        thread_id: i64,
        reference: i64,
        name: String,
    },
    SetExpression {
        thread_id: i64,
        reference: i64,
        name: String,
    },
    SetBreakpoints {
        source: SourceKey,
        count: usize,
    },
    SetFunctionBreakpoints {
        count: usize,
    },
    SetDataBreakpoints {
        count: usize,
    },
    DataBreakpointInfo {
        key: DataBreakpointKey,
        thread_id: Option<i64>,
    },
    Source {
        key: SourceKey,
    },
}

/// An outbound request waiting for its dependency.
#[derive(Debug, Clone)]
pub struct QueuedRequest {
    pub seq: Seq,
    pub command: Command,
    pub arguments: Option<Value>,
    pub dependence: Dependence,
    pub request_data: RequestData,
    pub queued_at: Tick,
}

/// A sent request whose response has not been handled yet.
#[derive(Debug, Clone)]
pub struct ExpectedResponse {
    pub seq: Seq,
    pub command: Command,
    pub request_data: RequestData,
    pub sent_at: Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    Failure,
}

/// Log entry for a consumed event; gates `AfterEvent` dependencies.
#[derive(Debug, Clone)]
pub struct HandledEvent {
    pub event: EventName,
    pub handled_at: Tick,
    /// Full message, retained only in debug-connection mode.
    pub message: Option<Value>,
}

/// Log entry for a matched response; gates `AfterResponse`/`AfterSeq`
/// dependencies and the callback registry.
#[derive(Debug, Clone)]
pub struct HandledResponse {
    pub command: Command,
    pub request_seq: Seq,
    pub status: ResponseStatus,
    pub handled_at: Tick,
    /// Full message, retained only in debug-connection mode.
    pub message: Option<Value>,
}

/// Owns the adapter child and everything needed to exchange typed requests
/// with it.
pub struct Connection {
    state: AdapterState,
    transport: Option<Box<dyn Transport>>,
    child: Option<Child>,
    next_seq: Seq,
    clock: Tick,
    outbound: Vec<QueuedRequest>,
    expected: Vec<ExpectedResponse>,
    messages: VecDeque<Value>,
    handled_events: Vec<HandledEvent>,
    handled_responses: Vec<HandledResponse>,
    pub client_capabilities: HashSet<ClientCapability>,
    adapter_capabilities: AdapterCapabilities,
    debug_connection: bool,
}

impl Connection {
    pub fn new(debug_connection: bool) -> Connection {
        Connection {
            state: AdapterState::NotSpawned,
            transport: None,
            child: None,
            next_seq: 1,
            clock: 0,
            outbound: Vec::new(),
            expected: Vec::new(),
            messages: VecDeque::new(),
            handled_events: Vec::new(),
            handled_responses: Vec::new(),
            client_capabilities: crate::session::capabilities::default_client_capabilities(),
            adapter_capabilities: AdapterCapabilities::default(),
            debug_connection,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_transport(transport: Box<dyn Transport>) -> Connection {
        let mut conn = Connection::new(true);
        conn.transport = Some(transport);
        conn.state = AdapterState::Spawned;
        conn
    }

    pub fn state(&self) -> AdapterState {
        self.state
    }

    pub(crate) fn transition(&mut self, state: AdapterState) {
        if self.state != state {
            log::debug!("adapter state: {:?} -> {state:?}", self.state);
            self.state = state;
        }
    }

    pub fn adapter_capabilities(&self) -> &AdapterCapabilities {
        &self.adapter_capabilities
    }

    pub(crate) fn merge_adapter_capabilities(&mut self, caps: &crate::dap::types::Capabilities) {
        self.adapter_capabilities.merge(caps);
    }

    pub fn debug_connection(&self) -> bool {
        self.debug_connection
    }

    /// Advance and return the ordering clock.
    pub(crate) fn tick(&mut self) -> Tick {
        self.clock += 1;
        self.clock
    }

    /// The current ordering stamp, without advancing it.
    pub fn now(&self) -> Tick {
        self.clock
    }

    /// Spawn the adapter with piped stdio. Stderr is drained on a detached
    /// thread and re-emitted as log lines; it carries no protocol traffic.
    pub fn spawn(
        &mut self,
        adapter: &Path,
        argv: &[String],
        cwd: Option<&Path>,
    ) -> Result<(), Error> {
        let mut command = std::process::Command::new(adapter);
        command
            .args(argv)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                self.transition(AdapterState::Died);
                return Err(err.into());
            }
        };

        let stdin = child.stdin.take().expect("stdin was piped");
        let stdout = child.stdout.take().expect("stdout was piped");
        let stderr = child.stderr.take().expect("stderr was piped");

        std::thread::spawn(move || {
            let mut stream = BufReader::new(stderr);
            loop {
                let mut line = String::new();
                let Ok(size) = stream.read_line(&mut line) else {
                    break;
                };
                if size == 0 {
                    break;
                }
                log::warn!(target: "adapter", "{}", line.trim_end());
            }
        });

        self.transport = Some(Box::new(StdioTransport::new(stdout, stdin)));
        self.child = Some(child);
        self.next_seq = 1;
        self.transition(AdapterState::Spawned);
        Ok(())
    }

    /// Register a request in the outbound queue and hand back its seq.
    ///
    /// Fails when the adapter is gone, when the session state does not
    /// permit the command yet, or when the adapter is known not to support
    /// it.
    pub fn queue_request(
        &mut self,
        command: Command,
        arguments: Option<Value>,
        dependence: Dependence,
        request_data: RequestData,
    ) -> Result<Seq, Error> {
        match self.state {
            AdapterState::NotSpawned | AdapterState::Died => {
                return Err(Error::AdapterNotSpawned)
            }
            AdapterState::Ended => return Err(Error::SessionNotStarted),
            state if state.handshake_only() && !is_handshake_command(command) => {
                return Err(Error::AdapterNotDoneInitializing(command))
            }
            _ => {}
        }
        self.check_capability(command)?;

        let seq = self.next_seq;
        self.next_seq += 1;
        let queued_at = self.tick();
        self.outbound.push(QueuedRequest {
            seq,
            command,
            arguments,
            dependence,
            request_data,
            queued_at,
        });
        log::debug!("queued {command} (seq {seq})");
        Ok(seq)
    }

    fn check_capability(&self, command: Command) -> Result<(), Error> {
        // Permissive until the initialize response: the handshake itself must
        // be queueable before the adapter has told us anything.
        if !self.adapter_capabilities.known() {
            return Ok(());
        }
        match required_capability(command) {
            Some(capability) if !self.adapter_capabilities.supports(capability) => {
                Err(Error::AdapterDoesNotSupportRequest(command))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn outbound(&self) -> &[QueuedRequest] {
        &self.outbound
    }

    pub(crate) fn drop_outbound(&mut self, index: usize) {
        let entry = self.outbound.remove(index);
        log::debug!("dropped queued {} (seq {})", entry.command, entry.seq);
    }

    /// Try to emit the outbound entry at `index`. `DependencyNotSatisfied`
    /// means "not yet", anything else is a real failure. On success the
    /// entry moves to the expected-responses set.
    pub(crate) fn send_request_at(&mut self, index: usize) -> Result<Seq, Error> {
        if matches!(self.state, AdapterState::Died | AdapterState::Ended) {
            return Err(Error::AdapterNotSpawned);
        }
        if !sched::dependency_satisfied(self, index) {
            return Err(Error::DependencyNotSatisfied);
        }
        let command = self.outbound[index].command;
        self.check_capability(command)?;

        let seq = self.outbound[index].seq;
        let message = envelope::encode_request(seq, command, self.outbound[index].arguments.as_ref());

        let transport = self.transport.as_mut().ok_or(Error::AdapterNotSpawned)?;
        match transport.write_message(&message) {
            Ok(()) => {}
            Err(Error::Io(err)) if err.kind() == ErrorKind::BrokenPipe => {
                self.transition(AdapterState::Died);
                return Err(Error::AdapterDied);
            }
            Err(err) => return Err(err),
        }

        let entry = self.outbound.remove(index);
        let sent_at = self.tick();
        self.expected.push(ExpectedResponse {
            seq: entry.seq,
            command: entry.command,
            request_data: entry.request_data,
            sent_at,
        });
        if command == Command::Initialize {
            self.transition(AdapterState::Initializing);
        }
        log::debug!("sent {command} (seq {seq})");
        Ok(seq)
    }

    /// Drain every frame the adapter has ready into the inbound queue,
    /// waiting at most `timeout` for the first one.
    pub(crate) fn receive_pending(&mut self, timeout: Duration) -> Result<(), Error> {
        let Some(mut transport) = self.transport.take() else {
            return Ok(());
        };
        let mut wait = timeout;
        let mut result = Ok(());
        loop {
            match transport.poll(wait) {
                Ok(false) => break,
                Ok(true) => {}
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
            match transport.read_message() {
                Ok(message) => self.messages.push_back(message),
                Err(Error::ConnectionClosed) => {
                    result = Err(Error::AdapterDied);
                    break;
                }
                Err(Error::Io(err)) => {
                    result = Err(Error::Io(err));
                    break;
                }
                Err(err) => {
                    // A malformed frame is logged and dropped; the stream
                    // stays up.
                    log::warn!("dropping malformed frame: {err}");
                }
            }
            wait = Duration::ZERO;
        }
        self.transport = Some(transport);
        if result.is_err() {
            self.transition(AdapterState::Died);
        }
        result
    }

    pub(crate) fn pop_message(&mut self) -> Option<Value> {
        self.messages.pop_front()
    }

    #[cfg(test)]
    pub(crate) fn push_message(&mut self, message: Value) {
        self.messages.push_back(message);
    }

    pub(crate) fn find_expected(&self, request_seq: Seq) -> Option<usize> {
        self.expected.iter().position(|e| e.seq == request_seq)
    }

    pub(crate) fn remove_expected(&mut self, index: usize) -> ExpectedResponse {
        self.expected.remove(index)
    }

    pub(crate) fn expected(&self) -> &[ExpectedResponse] {
        &self.expected
    }

    /// Record a fully processed event and release its message.
    pub(crate) fn handled_event(&mut self, event: EventName, message: Value) {
        let handled_at = self.tick();
        self.handled_events.push(HandledEvent {
            event,
            handled_at,
            message: self.debug_connection.then_some(message),
        });
    }

    /// Record a matched response and release its message.
    pub(crate) fn handled_response(
        &mut self,
        command: Command,
        request_seq: Seq,
        status: ResponseStatus,
        message: Value,
    ) {
        let handled_at = self.tick();
        self.handled_responses.push(HandledResponse {
            command,
            request_seq,
            status,
            handled_at,
            message: self.debug_connection.then_some(message),
        });
    }

    pub fn handled_events(&self) -> &[HandledEvent] {
        &self.handled_events
    }

    pub fn handled_responses(&self) -> &[HandledResponse] {
        &self.handled_responses
    }

    /// True when the command has been queued, sent or already answered in
    /// this session; used to make session orchestration idempotent.
    pub fn command_in_flight(&self, command: Command) -> bool {
        self.outbound.iter().any(|q| q.command == command)
            || self.expected.iter().any(|e| e.command == command)
            || self.handled_responses.iter().any(|h| h.command == command)
    }

    /// Reset the per-session queues and logs. The ordering clock keeps
    /// running so stamps stay comparable across sessions.
    pub(crate) fn reset_session_state(&mut self) {
        self.outbound.clear();
        self.expected.clear();
        self.messages.clear();
        self.handled_events.clear();
        self.handled_responses.clear();
        self.adapter_capabilities = AdapterCapabilities::default();
    }

    /// The retained messages, newest last, for `--debug_connection`
    /// inspection.
    pub fn debug_dump(&self) -> impl Iterator<Item = &Value> {
        self.handled_events
            .iter()
            .filter_map(|e| e.message.as_ref())
            .chain(
                self.handled_responses
                    .iter()
                    .filter_map(|r| r.message.as_ref()),
            )
    }
}

fn is_handshake_command(command: Command) -> bool {
    matches!(
        command,
        Command::Initialize | Command::Launch | Command::Attach | Command::ConfigurationDone
    )
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dap::transport::MockTransport;
    use crate::session::sched;

    fn connection() -> Connection {
        Connection::with_transport(Box::new(MockTransport::new()))
    }

    fn queue(conn: &mut Connection, command: Command, dependence: Dependence) -> Seq {
        conn.queue_request(command, None, dependence, RequestData::None)
            .unwrap()
    }

    #[test]
    fn seq_allocation_is_gap_free_from_one() {
        let mut conn = connection();
        let a = queue(&mut conn, Command::Initialize, Dependence::NONE);
        let b = queue(&mut conn, Command::Launch, Dependence::NONE);
        let c = queue(&mut conn, Command::ConfigurationDone, Dependence::NONE);
        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[test]
    fn handshake_only_states_reject_other_commands() {
        let mut conn = connection();
        let err = conn
            .queue_request(Command::Threads, None, Dependence::NONE, RequestData::None)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AdapterNotDoneInitializing(Command::Threads)
        ));

        conn.transition(AdapterState::Initialized);
        assert!(conn
            .queue_request(Command::Threads, None, Dependence::NONE, RequestData::None)
            .is_ok());
    }

    #[test]
    fn capability_gating_applies_once_capabilities_are_known() {
        let mut conn = connection();
        conn.transition(AdapterState::Initialized);

        // Nothing reported yet: permissive.
        assert!(conn
            .queue_request(
                Command::SetFunctionBreakpoints,
                None,
                Dependence::NONE,
                RequestData::SetFunctionBreakpoints { count: 0 },
            )
            .is_ok());

        conn.merge_adapter_capabilities(&crate::dap::types::Capabilities::default());
        let err = conn
            .queue_request(
                Command::SetFunctionBreakpoints,
                None,
                Dependence::NONE,
                RequestData::SetFunctionBreakpoints { count: 0 },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AdapterDoesNotSupportRequest(Command::SetFunctionBreakpoints)
        ));
    }

    #[test]
    fn dependency_blocks_until_logged() {
        let mut conn = connection();
        queue(&mut conn, Command::Initialize, Dependence::NONE);
        queue(
            &mut conn,
            Command::Launch,
            Dependence::after_response(Command::Initialize),
        );

        sched::pump(&mut conn);
        // initialize went out, launch is still waiting.
        assert_eq!(conn.outbound().len(), 1);
        assert_eq!(conn.expected().len(), 1);

        conn.handled_response(Command::Initialize, 1, ResponseStatus::Success, Value::Null);
        sched::pump(&mut conn);
        assert_eq!(conn.outbound().len(), 0);
        assert_eq!(conn.expected().len(), 2);
    }

    #[test]
    fn broken_pipe_marks_the_adapter_dead() {
        let mut transport = MockTransport::new();
        transport.broken = true;
        let mut conn = Connection::with_transport(Box::new(transport));
        queue(&mut conn, Command::Initialize, Dependence::NONE);

        sched::pump(&mut conn);
        assert_eq!(conn.state(), AdapterState::Died);
        assert!(matches!(
            conn.queue_request(Command::Initialize, None, Dependence::NONE, RequestData::None),
            Err(Error::AdapterNotSpawned)
        ));
    }
}
