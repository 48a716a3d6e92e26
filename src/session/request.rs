//! Typed request constructors and session orchestration.
//!
//! Thin composition layer over [`Connection::queue_request`]: builds the
//! argument payloads, picks the dependency predicate, and retains the
//! context the response handler will need. `begin_session`/`end_session`
//! compose the DAP handshake out of these.

use crate::dap::envelope::Command;
use crate::dap::types::{
    ContinueArguments, DataBreakpointInfoArguments, DisconnectArguments, GotoArguments,
    LaunchRequestArguments, NextArguments, PauseArguments, RestartArguments,
    RestartFrameArguments, ReverseContinueArguments, ScopesArguments, SetBreakpointsArguments,
    SetDataBreakpointsArguments, SetExpressionArguments, SetFunctionBreakpointsArguments,
    SetVariableArguments, Source, SourceArguments, StackTraceArguments, StepBackArguments,
    StepInArguments, StepOutArguments, TerminateArguments, TerminateThreadsArguments,
    VariablesArguments,
};
use crate::dap::value::Value;
use crate::dap::EventName;
use crate::error::Error;
use crate::session::capabilities::initialize_arguments;
use crate::session::connection::{AdapterState, Connection, Drill, RequestData, Seq};
use crate::session::data::{DataBreakpointKey, SessionData, SourceKey};
use crate::session::sched::Dependence;
use serde::Serialize;
use std::path::PathBuf;

/// Page size for `stackTrace` requests; further pages are fetched while the
/// adapter reports more frames than received.
pub const STACK_PAGE: i64 = 20;

/// How the adapter child is started, supplied by the front-end.
#[derive(Debug, Clone)]
pub struct AdapterSpec {
    pub path: PathBuf,
    pub argv: Vec<String>,
    pub cwd: Option<PathBuf>,
}

/// Whether a session launches a new debuggee or attaches to a running one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Launch,
    Attach,
}

/// A launch configuration selected by the configuration collaborator. The
/// payload is opaque to the core; it is merged verbatim into the
/// launch/attach arguments.
#[derive(Debug, Clone)]
pub struct LaunchConfiguration {
    pub mode: SessionMode,
    pub arguments: Value,
}

/// How to end a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndSession {
    Terminate,
    Disconnect,
}

fn args_value<T: Serialize>(args: &T) -> Result<Value, Error> {
    Ok(Value::from_json(serde_json::to_value(args)?))
}

pub fn initialize(conn: &mut Connection) -> Result<Seq, Error> {
    let arguments = args_value(&initialize_arguments(&conn.client_capabilities))?;
    conn.queue_request(
        Command::Initialize,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

/// Queue `launch` or `attach`, gated on the initialize response. The
/// selected configuration and the previous session's `restart` payload are
/// merged into the typed arguments.
pub fn launch_or_attach(
    conn: &mut Connection,
    config: &LaunchConfiguration,
    restart: Option<&serde_json::Value>,
) -> Result<Seq, Error> {
    let (command, mut arguments) = match config.mode {
        SessionMode::Launch => (
            Command::Launch,
            args_value(&LaunchRequestArguments {
                no_debug: None,
                restart: restart.cloned(),
            })?,
        ),
        SessionMode::Attach => (
            Command::Attach,
            args_value(&crate::dap::types::AttachRequestArguments {
                restart: restart.cloned(),
            })?,
        ),
    };
    arguments.merge_at(&[], &config.arguments);
    conn.queue_request(
        command,
        Some(arguments),
        Dependence::after_response(Command::Initialize),
        RequestData::None,
    )
}

/// Queue `configurationDone`, gated on the `initialized` event.
pub fn configuration_done(conn: &mut Connection) -> Result<Seq, Error> {
    conn.queue_request(
        Command::ConfigurationDone,
        None,
        Dependence::after_event(EventName::Initialized),
        RequestData::None,
    )
}

pub fn threads(conn: &mut Connection) -> Result<Seq, Error> {
    conn.queue_request(Command::Threads, None, Dependence::NONE, RequestData::None)
}

/// First `stackTrace` page for a thread, optionally cascading into scopes
/// and variables once the stack is complete.
pub fn stack_trace(
    conn: &mut Connection,
    data: &mut SessionData,
    thread_id: i64,
    drill: Drill,
) -> Result<Seq, Error> {
    let seq = stack_trace_page(conn, thread_id, 0, drill)?;
    data.stack_requested(thread_id);
    Ok(seq)
}

pub(crate) fn stack_trace_page(
    conn: &mut Connection,
    thread_id: i64,
    start_frame: i64,
    drill: Drill,
) -> Result<Seq, Error> {
    let arguments = args_value(&StackTraceArguments {
        thread_id,
        start_frame: Some(start_frame),
        levels: Some(STACK_PAGE),
    })?;
    conn.queue_request(
        Command::StackTrace,
        Some(arguments),
        Dependence::NONE,
        RequestData::StackTrace {
            thread_id,
            page_start: start_frame,
            drill,
        },
    )
}

pub fn scopes(
    conn: &mut Connection,
    thread_id: i64,
    frame_id: i64,
    drill: Drill,
) -> Result<Seq, Error> {
    let arguments = args_value(&ScopesArguments { frame_id })?;
    conn.queue_request(
        Command::Scopes,
        Some(arguments),
        Dependence::NONE,
        RequestData::Scopes {
            thread_id,
            frame_id,
            drill,
        },
    )
}

pub fn variables(conn: &mut Connection, thread_id: i64, reference: i64) -> Result<Seq, Error> {
    let arguments = args_value(&VariablesArguments {
        variables_reference: reference,
        filter: None,
        start: None,
        count: None,
    })?;
    conn.queue_request(
        Command::Variables,
        Some(arguments),
        Dependence::NONE,
        RequestData::Variables {
            thread_id,
            reference,
        },
    )
}

pub fn continue_thread(conn: &mut Connection, thread_id: i64) -> Result<Seq, Error> {
    let arguments = args_value(&ContinueArguments {
        thread_id,
        single_thread: None,
    })?;
    conn.queue_request(
        Command::Continue,
        Some(arguments),
        Dependence::NONE,
        RequestData::Continue { thread_id },
    )
}

pub fn pause(conn: &mut Connection, thread_id: i64) -> Result<Seq, Error> {
    let arguments = args_value(&PauseArguments { thread_id })?;
    conn.queue_request(
        Command::Pause,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

pub fn next(conn: &mut Connection, thread_id: i64) -> Result<Seq, Error> {
    let arguments = args_value(&NextArguments {
        thread_id,
        single_thread: None,
        granularity: None,
    })?;
    conn.queue_request(Command::Next, Some(arguments), Dependence::NONE, RequestData::None)
}

pub fn step_in(conn: &mut Connection, thread_id: i64) -> Result<Seq, Error> {
    let arguments = args_value(&StepInArguments {
        thread_id,
        single_thread: None,
        target_id: None,
        granularity: None,
    })?;
    conn.queue_request(
        Command::StepIn,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

pub fn step_out(conn: &mut Connection, thread_id: i64) -> Result<Seq, Error> {
    let arguments = args_value(&StepOutArguments {
        thread_id,
        single_thread: None,
        granularity: None,
    })?;
    conn.queue_request(
        Command::StepOut,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

pub fn step_back(conn: &mut Connection, thread_id: i64) -> Result<Seq, Error> {
    let arguments = args_value(&StepBackArguments {
        thread_id,
        single_thread: None,
        granularity: None,
    })?;
    conn.queue_request(
        Command::StepBack,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

pub fn reverse_continue(conn: &mut Connection, thread_id: i64) -> Result<Seq, Error> {
    let arguments = args_value(&ReverseContinueArguments {
        thread_id,
        single_thread: None,
    })?;
    conn.queue_request(
        Command::ReverseContinue,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

pub fn goto(conn: &mut Connection, thread_id: i64, target_id: i64) -> Result<Seq, Error> {
    let arguments = args_value(&GotoArguments {
        thread_id,
        target_id,
    })?;
    conn.queue_request(Command::Goto, Some(arguments), Dependence::NONE, RequestData::None)
}

pub fn restart_frame(conn: &mut Connection, frame_id: i64) -> Result<Seq, Error> {
    let arguments = args_value(&RestartFrameArguments { frame_id })?;
    conn.queue_request(
        Command::RestartFrame,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

pub fn terminate_threads(conn: &mut Connection, thread_ids: Vec<i64>) -> Result<Seq, Error> {
    let arguments = args_value(&TerminateThreadsArguments {
        thread_ids: Some(thread_ids),
    })?;
    conn.queue_request(
        Command::TerminateThreads,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

pub fn cancel(conn: &mut Connection, request_seq: Option<Seq>) -> Result<Seq, Error> {
    let arguments = args_value(&crate::dap::types::CancelArguments {
        request_id: request_seq,
        progress_id: None,
    })?;
    conn.queue_request(
        Command::Cancel,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

pub fn restart(conn: &mut Connection, config: Option<&Value>) -> Result<Seq, Error> {
    let arguments = args_value(&RestartArguments {
        arguments: config.map(Value::to_json),
    })?;
    conn.queue_request(
        Command::Restart,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

/// Push the user's stored source breakpoints for one source to the adapter.
pub fn set_breakpoints(
    conn: &mut Connection,
    data: &SessionData,
    key: &SourceKey,
) -> Result<Seq, Error> {
    let source = data.source(key).cloned().unwrap_or_else(|| match key {
        SourceKey::Path(path) => Source {
            path: Some(path.clone()),
            ..Default::default()
        },
        SourceKey::Reference(reference) => Source {
            source_reference: Some(*reference),
            ..Default::default()
        },
    });
    let breakpoints = data.source_breakpoints(key).to_vec();
    let count = breakpoints.len();
    let arguments = args_value(&SetBreakpointsArguments {
        source,
        breakpoints: Some(breakpoints),
        source_modified: None,
    })?;
    conn.queue_request(
        Command::SetBreakpoints,
        Some(arguments),
        Dependence::NONE,
        RequestData::SetBreakpoints {
            source: key.clone(),
            count,
        },
    )
}

pub fn set_function_breakpoints(conn: &mut Connection, data: &SessionData) -> Result<Seq, Error> {
    let breakpoints = data.function_breakpoints().to_vec();
    let count = breakpoints.len();
    let arguments = args_value(&SetFunctionBreakpointsArguments { breakpoints })?;
    conn.queue_request(
        Command::SetFunctionBreakpoints,
        Some(arguments),
        Dependence::NONE,
        RequestData::SetFunctionBreakpoints { count },
    )
}

pub fn set_data_breakpoints(conn: &mut Connection, data: &SessionData) -> Result<Seq, Error> {
    let breakpoints = data.data_breakpoints().to_vec();
    let count = breakpoints.len();
    let arguments = args_value(&SetDataBreakpointsArguments { breakpoints })?;
    conn.queue_request(
        Command::SetDataBreakpoints,
        Some(arguments),
        Dependence::NONE,
        RequestData::SetDataBreakpoints { count },
    )
}

/// Ask the adapter what data breakpoint can be set for a variable or an
/// expression. `thread_id` ties the stored answer's lifetime to that
/// thread's suspension when the key is thread-scoped.
pub fn data_breakpoint_info(
    conn: &mut Connection,
    key: DataBreakpointKey,
    thread_id: Option<i64>,
) -> Result<Seq, Error> {
    let arguments = match &key {
        DataBreakpointKey::Variable { reference, name } => DataBreakpointInfoArguments {
            variables_reference: Some(*reference),
            name: name.clone(),
            ..Default::default()
        },
        DataBreakpointKey::FrameExpression { frame_id, name } => DataBreakpointInfoArguments {
            name: name.clone(),
            frame_id: Some(*frame_id),
            ..Default::default()
        },
        DataBreakpointKey::GlobalExpression { name } => DataBreakpointInfoArguments {
            name: name.clone(),
            ..Default::default()
        },
    };
    let arguments = args_value(&arguments)?;
    conn.queue_request(
        Command::DataBreakpointInfo,
        Some(arguments),
        Dependence::NONE,
        RequestData::DataBreakpointInfo { key, thread_id },
    )
}

pub fn set_variable(
    conn: &mut Connection,
    thread_id: i64,
    reference: i64,
    name: &str,
    value: &str,
) -> Result<Seq, Error> {
    let arguments = args_value(&SetVariableArguments {
        variables_reference: reference,
        name: name.to_string(),
        value: value.to_string(),
    })?;
    conn.queue_request(
        Command::SetVariable,
        Some(arguments),
        Dependence::NONE,
        RequestData::SetVariable {
            thread_id,
            reference,
            name: name.to_string(),
        },
    )
}

#[allow(clippy::too_many_arguments)]
pub fn set_expression(
    conn: &mut Connection,
    thread_id: i64,
    reference: i64,
    name: &str,
    expression: &str,
    value: &str,
    frame_id: Option<i64>,
) -> Result<Seq, Error> {
    let arguments = args_value(&SetExpressionArguments {
        expression: expression.to_string(),
        value: value.to_string(),
        frame_id,
    })?;
    conn.queue_request(
        Command::SetExpression,
        Some(arguments),
        Dependence::NONE,
        RequestData::SetExpression {
            thread_id,
            reference,
            name: name.to_string(),
        },
    )
}

/// Fetch the content of a source that has no (readable) path.
pub fn source(conn: &mut Connection, key: &SourceKey) -> Result<Seq, Error> {
    let arguments = match key {
        SourceKey::Reference(reference) => SourceArguments {
            source: Some(Source {
                source_reference: Some(*reference),
                ..Default::default()
            }),
            source_reference: *reference,
        },
        SourceKey::Path(path) => SourceArguments {
            source: Some(Source {
                path: Some(path.clone()),
                ..Default::default()
            }),
            source_reference: 0,
        },
    };
    let arguments = args_value(&arguments)?;
    conn.queue_request(
        Command::Source,
        Some(arguments),
        Dependence::NONE,
        RequestData::Source { key: key.clone() },
    )
}

pub fn modules(conn: &mut Connection) -> Result<Seq, Error> {
    let arguments = args_value(&crate::dap::types::ModulesArguments::default())?;
    conn.queue_request(
        Command::Modules,
        Some(arguments),
        Dependence::NONE,
        RequestData::None,
    )
}

pub fn loaded_sources(conn: &mut Connection) -> Result<Seq, Error> {
    conn.queue_request(
        Command::LoadedSources,
        None,
        Dependence::NONE,
        RequestData::None,
    )
}

/// Compose a session start. Idempotent per state: every step checks whether
/// it already happened. Returns false (after notifying the front-end) when
/// no launch configuration has been selected yet.
pub fn begin_session(
    conn: &mut Connection,
    data: &mut SessionData,
    adapter: &AdapterSpec,
    config: Option<&LaunchConfiguration>,
) -> Result<bool, Error> {
    let Some(config) = config else {
        data.notify("no launch configuration selected");
        return Ok(false);
    };

    if matches!(
        conn.state(),
        AdapterState::NotSpawned | AdapterState::Died | AdapterState::Ended
    ) {
        conn.reset_session_state();
        data.clear_for_new_session();
        if let Err(err) = conn.spawn(&adapter.path, &adapter.argv, adapter.cwd.as_deref()) {
            data.notify(format!("failed to spawn the debug adapter: {err}"));
            return Err(err);
        }
    }

    if !conn.command_in_flight(Command::Initialize) {
        initialize(conn)?;
    }
    let session_command = match config.mode {
        SessionMode::Launch => Command::Launch,
        SessionMode::Attach => Command::Attach,
    };
    if !conn.command_in_flight(session_command) {
        let restart = data.restart_payload().cloned();
        launch_or_attach(conn, config, restart.as_ref())?;
    }
    if !conn.command_in_flight(Command::ConfigurationDone) {
        configuration_done(conn)?;
    }
    Ok(true)
}

/// Wind a running session down, either by terminating the debuggee or by
/// detaching from it.
pub fn end_session(conn: &mut Connection, how: EndSession) -> Result<Seq, Error> {
    if !matches!(
        conn.state(),
        AdapterState::Launched | AdapterState::Attached
    ) {
        return Err(Error::SessionNotStarted);
    }
    match how {
        EndSession::Terminate => {
            let arguments = args_value(&TerminateArguments { restart: None })?;
            conn.queue_request(
                Command::Terminate,
                Some(arguments),
                Dependence::NONE,
                RequestData::None,
            )
        }
        EndSession::Disconnect => {
            let arguments = args_value(&DisconnectArguments::default())?;
            conn.queue_request(
                Command::Disconnect,
                Some(arguments),
                Dependence::NONE,
                RequestData::None,
            )
        }
    }
}
