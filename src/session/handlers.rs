//! Per-tick driver and the typed event/response handlers.
//!
//! [`process`] is ticked by the front-end's loop: it pumps the inbound
//! frames, demultiplexes them into the handlers below (which mutate the
//! session data and schedule follow-up requests), drives the outbound
//! queue, then fires due callbacks. A handler error never kills the
//! session: the offending message is logged and released.

use crate::dap::envelope::{self, Command, EventName, MessageKind};
use crate::dap::types::{
    BreakpointEventBody, Capabilities, CapabilitiesEventBody, ContinueResponseBody,
    ContinuedEventBody, DataBreakpointInfoResponseBody, ExitedEventBody, InvalidatedEventBody,
    LoadedSourceEventBody, LoadedSourceEventReason, LoadedSourcesResponseBody, ModuleEventBody,
    ModuleEventReason, ModulesResponseBody, OutputCategory, OutputEventBody, ProcessEventBody,
    ScopesResponseBody, SetBreakpointsResponseBody, SetDataBreakpointsResponseBody,
    SetExpressionResponseBody, SetFunctionBreakpointsResponseBody, SetVariableResponseBody,
    SourceResponseBody, StackTraceResponseBody, StoppedEventBody, TerminatedEventBody,
    ThreadEventBody, ThreadEventReason, ThreadsResponseBody, VariablesResponseBody,
};
use crate::dap::value::Value;
use crate::error::Error;
use crate::session::callback::CallbackRegistry;
use crate::session::connection::{
    AdapterState, Connection, Drill, ExpectedResponse, RequestData, ResponseStatus,
};
use crate::session::data::{BreakpointOrigin, InfoLifetime, SessionData, SourceKey};
use crate::session::{request, sched};
use itertools::Itertools;
use std::str::FromStr;
use std::time::Duration;

/// I/O poll bound per tick; small enough to keep a UI loop responsive.
const POLL_TIMEOUT: Duration = Duration::from_millis(1);

/// One driver iteration: pump I/O, dispatch, schedule, fire callbacks.
pub fn process(conn: &mut Connection, data: &mut SessionData, callbacks: &mut CallbackRegistry) {
    let was_dead = conn.state() == AdapterState::Died;

    if let Err(err) = conn.receive_pending(POLL_TIMEOUT) {
        log::error!("adapter i/o failed: {err}");
    }

    while let Some(message) = conn.pop_message() {
        if let Err(err) = dispatch(conn, data, message) {
            if err.is_protocol_violation() {
                log::warn!("dropping message: {err}");
            } else {
                log::error!("handling failed: {err}");
            }
        }
    }

    sched::pump(conn);
    callbacks.run(conn);

    if conn.state() == AdapterState::Died && !was_dead {
        data.notify("the debug adapter process died");
    }
}

/// Route one inbound message. Ownership of the message transfers here; it
/// ends up in the handled logs or is dropped with the error.
fn dispatch(conn: &mut Connection, data: &mut SessionData, message: Value) -> Result<(), Error> {
    match envelope::message_kind(&message)? {
        MessageKind::Event => dispatch_event(conn, data, message),
        MessageKind::Response => dispatch_response(conn, data, message),
        MessageKind::Request => {
            // Reverse requests (runInTerminal, startDebugging) are deferred
            // surface: acknowledge nothing, log and drop.
            log::warn!(
                "ignoring reverse request {:?}",
                message.get("command").and_then(Value::as_str)
            );
            Ok(())
        }
    }
}

fn dispatch_event(
    conn: &mut Connection,
    data: &mut SessionData,
    message: Value,
) -> Result<(), Error> {
    let head = envelope::event_head(&message)?;
    let Ok(event) = EventName::from_str(&head.event) else {
        return Err(Error::UnknownEvent(head.event));
    };
    handle_event(conn, data, event, &message)?;
    conn.handled_event(event, message);
    Ok(())
}

fn handle_event(
    conn: &mut Connection,
    data: &mut SessionData,
    event: EventName,
    message: &Value,
) -> Result<(), Error> {
    match event {
        EventName::Initialized => {
            conn.transition(AdapterState::Initialized);
        }
        EventName::Stopped => {
            let body: StoppedEventBody = envelope::parse_event(message, event)?;
            data.mark_stopped(&body);
            // DAP requires a threads refresh after every stop.
            if let Err(err) = request::threads(conn) {
                log::warn!("cannot refresh threads after stop: {err}");
            }
        }
        EventName::Continued => {
            let body: ContinuedEventBody = envelope::parse_event(message, event)?;
            let all = body.all_threads_continued.unwrap_or(false);
            data.mark_continued(Some(body.thread_id), all);
        }
        EventName::Exited => {
            let body: ExitedEventBody = envelope::parse_event(message, event)?;
            data.set_exit_code(body.exit_code);
        }
        EventName::Terminated => {
            let body: Option<TerminatedEventBody> = envelope::parse_event_opt(message, event)?;
            data.set_terminated(body.and_then(|b| b.restart));
        }
        EventName::Thread => {
            let body: ThreadEventBody = envelope::parse_event(message, event)?;
            match body.reason {
                ThreadEventReason::Started => data.thread_started(body.thread_id),
                ThreadEventReason::Exited => data.thread_exited(body.thread_id),
                ThreadEventReason::Other(reason) => {
                    log::warn!("thread event with unknown reason {reason:?}");
                }
            }
        }
        EventName::Output => {
            let body: OutputEventBody = envelope::parse_event(message, event)?;
            if body.category == Some(OutputCategory::Important) {
                data.notify(body.output.trim_end().to_string());
            }
            data.push_output(body);
        }
        EventName::Breakpoint => {
            let body: BreakpointEventBody = envelope::parse_event(message, event)?;
            data.apply_breakpoint_event(&body.reason, body.breakpoint)?;
        }
        EventName::Module => {
            let body: ModuleEventBody = envelope::parse_event(message, event)?;
            match body.reason {
                ModuleEventReason::New | ModuleEventReason::Changed => {
                    data.upsert_module(body.module)
                }
                ModuleEventReason::Removed => data.remove_module(&body.module.id),
                ModuleEventReason::Other(reason) => {
                    log::warn!("module event with unknown reason {reason:?}");
                }
            }
        }
        EventName::LoadedSource => {
            let body: LoadedSourceEventBody = envelope::parse_event(message, event)?;
            match body.reason {
                LoadedSourceEventReason::New | LoadedSourceEventReason::Changed => {
                    data.upsert_source(body.source)?;
                }
                LoadedSourceEventReason::Removed => {
                    let key = SourceKey::of(&body.source)?;
                    data.remove_source(&key);
                }
                LoadedSourceEventReason::Other(reason) => {
                    log::warn!("loadedSource event with unknown reason {reason:?}");
                }
            }
        }
        EventName::Process => {
            let body: ProcessEventBody = envelope::parse_event(message, event)?;
            data.set_process(body);
        }
        EventName::Capabilities => {
            let body: CapabilitiesEventBody = envelope::parse_event(message, event)?;
            conn.merge_adapter_capabilities(&body.capabilities);
        }
        EventName::Invalidated => {
            let body: InvalidatedEventBody =
                envelope::parse_event_opt(message, event)?.unwrap_or_default();
            data.invalidate_cached_state(body.thread_id);
        }
        EventName::ProgressStart | EventName::ProgressUpdate | EventName::ProgressEnd => {
            log::debug!("progress event ignored (no progress UI)");
        }
        EventName::Memory => {
            log::debug!("memory event ignored (no memory view)");
        }
    }
    Ok(())
}

fn dispatch_response(
    conn: &mut Connection,
    data: &mut SessionData,
    message: Value,
) -> Result<(), Error> {
    let head = envelope::response_head(&message)?;
    let Some(index) = conn.find_expected(head.request_seq) else {
        return Err(Error::UnmatchedResponse {
            request_seq: head.request_seq,
        });
    };
    let command = conn.expected()[index].command;
    if head.command != command.to_string() {
        return Err(Error::WrongCommandForResponse {
            expected: command,
            got: head.command,
        });
    }
    let expected = conn.remove_expected(index);

    if !head.success {
        // Malformed failures (absent message and description) are tolerated:
        // the failure is still logged and recorded.
        let failure = Error::RequestFailed {
            command: expected.command,
            reason: head.message,
            description: envelope::failure_description(&message),
        };
        data.notify(failure.to_string());
        conn.handled_response(
            expected.command,
            expected.seq,
            ResponseStatus::Failure,
            message,
        );
        return Ok(());
    }

    match handle_response(conn, data, &expected, &message) {
        Ok(()) => {
            conn.handled_response(
                expected.command,
                expected.seq,
                ResponseStatus::Success,
                message,
            );
            Ok(())
        }
        Err(err) => {
            conn.handled_response(
                expected.command,
                expected.seq,
                ResponseStatus::Failure,
                message,
            );
            Err(err)
        }
    }
}

fn ack(message: &Value, seq: i64, command: Command) -> Result<(), Error> {
    envelope::parse_validate_response_opt::<serde_json::Value>(message, seq, command).map(|_| ())
}

fn handle_response(
    conn: &mut Connection,
    data: &mut SessionData,
    expected: &ExpectedResponse,
    message: &Value,
) -> Result<(), Error> {
    let seq = expected.seq;
    match expected.command {
        Command::Initialize => {
            let caps: Capabilities =
                envelope::parse_validate_response(message, seq, Command::Initialize)?;
            conn.merge_adapter_capabilities(&caps);
            conn.transition(AdapterState::PartiallyInitialized);
        }
        Command::Launch => {
            ack(message, seq, Command::Launch)?;
            conn.transition(AdapterState::Launched);
            data.mark_continued(None, true);
        }
        Command::Attach => {
            ack(message, seq, Command::Attach)?;
            conn.transition(AdapterState::Attached);
            data.mark_continued(None, true);
        }
        Command::Threads => {
            let body: ThreadsResponseBody =
                envelope::parse_validate_response(message, seq, Command::Threads)?;
            data.set_threads(body.threads);
        }
        Command::StackTrace => {
            let RequestData::StackTrace { thread_id, drill, .. } = expected.request_data.clone()
            else {
                return Err(Error::UnmatchedResponse { request_seq: seq });
            };
            let body: StackTraceResponseBody =
                envelope::parse_validate_response(message, seq, Command::StackTrace)?;
            let progress = data.append_frames(
                thread_id,
                body.stack_frames,
                body.total_frames,
                request::STACK_PAGE as usize,
            )?;
            if !progress.complete {
                if let Err(err) =
                    request::stack_trace_page(conn, thread_id, progress.received as i64, drill)
                {
                    log::warn!("cannot request next stack page: {err}");
                }
            } else if drill != Drill::None {
                let frame_ids = data
                    .frames(thread_id)
                    .map(|frames| frames.iter().map(|f| f.id).collect_vec())
                    .unwrap_or_default();
                for frame_id in frame_ids {
                    if let Err(err) = request::scopes(conn, thread_id, frame_id, drill) {
                        log::warn!("cannot request scopes for frame {frame_id}: {err}");
                    }
                }
            }
        }
        Command::Scopes => {
            let RequestData::Scopes { thread_id, frame_id, drill } =
                expected.request_data.clone()
            else {
                return Err(Error::UnmatchedResponse { request_seq: seq });
            };
            let body: ScopesResponseBody =
                envelope::parse_validate_response(message, seq, Command::Scopes)?;
            let references = body
                .scopes
                .iter()
                .filter(|s| s.variables_reference > 0)
                .map(|s| s.variables_reference)
                .collect_vec();
            data.set_scopes(thread_id, frame_id, body.scopes)?;
            if drill == Drill::Variables {
                for reference in references {
                    if let Err(err) = request::variables(conn, thread_id, reference) {
                        log::warn!("cannot request variables for {reference}: {err}");
                    }
                }
            }
        }
        Command::Variables => {
            let RequestData::Variables { thread_id, reference } = expected.request_data.clone()
            else {
                return Err(Error::UnmatchedResponse { request_seq: seq });
            };
            // A reference is only valid while its thread stays suspended; a
            // resume between request and response voids the result.
            if !data
                .thread(thread_id)
                .map(|t| t.status.is_stopped())
                .unwrap_or(false)
            {
                return Err(Error::StaleReference(reference));
            }
            let body: VariablesResponseBody =
                envelope::parse_validate_response(message, seq, Command::Variables)?;
            data.set_variables(thread_id, reference, body.variables)?;
        }
        Command::Continue => {
            let RequestData::Continue { thread_id } = expected.request_data.clone() else {
                return Err(Error::UnmatchedResponse { request_seq: seq });
            };
            let body: Option<ContinueResponseBody> =
                envelope::parse_validate_response_opt(message, seq, Command::Continue)?;
            // For the response (unlike the event) an absent flag means all
            // threads resumed.
            let all = body
                .and_then(|b| b.all_threads_continued)
                .unwrap_or(true);
            data.mark_continued(Some(thread_id), all);
        }
        Command::SetBreakpoints => {
            let RequestData::SetBreakpoints { source, count } = expected.request_data.clone()
            else {
                return Err(Error::UnmatchedResponse { request_seq: seq });
            };
            let body: SetBreakpointsResponseBody =
                envelope::parse_validate_response(message, seq, Command::SetBreakpoints)?;
            if body.breakpoints.len() != count {
                return Err(Error::InvalidBreakpointResponse {
                    sent: count,
                    got: body.breakpoints.len(),
                });
            }
            data.reconcile_source_breakpoints(&source, &body.breakpoints)?;
            data.replace_breakpoints(BreakpointOrigin::Source(source), body.breakpoints);
        }
        Command::SetFunctionBreakpoints => {
            let body: SetFunctionBreakpointsResponseBody =
                envelope::parse_validate_response(message, seq, Command::SetFunctionBreakpoints)?;
            data.replace_breakpoints(BreakpointOrigin::Function, body.breakpoints);
        }
        Command::SetDataBreakpoints => {
            let body: SetDataBreakpointsResponseBody =
                envelope::parse_validate_response(message, seq, Command::SetDataBreakpoints)?;
            data.replace_breakpoints(BreakpointOrigin::Data, body.breakpoints);
        }
        Command::DataBreakpointInfo => {
            let RequestData::DataBreakpointInfo { key, thread_id } =
                expected.request_data.clone()
            else {
                return Err(Error::UnmatchedResponse { request_seq: seq });
            };
            let body: DataBreakpointInfoResponseBody =
                envelope::parse_validate_response(message, seq, Command::DataBreakpointInfo)?;
            let lifetime = match thread_id {
                Some(id) => InfoLifetime::WhileThreadSuspended(id),
                None => InfoLifetime::Indefinite,
            };
            data.store_data_breakpoint_info(key, body, lifetime);
        }
        Command::Source => {
            let RequestData::Source { key } = expected.request_data.clone() else {
                return Err(Error::UnmatchedResponse { request_seq: seq });
            };
            let body: SourceResponseBody =
                envelope::parse_validate_response(message, seq, Command::Source)?;
            data.set_source_content(key, body.content, body.mime_type);
        }
        Command::SetVariable => {
            let RequestData::SetVariable { thread_id, reference, name } =
                expected.request_data.clone()
            else {
                return Err(Error::UnmatchedResponse { request_seq: seq });
            };
            let body: SetVariableResponseBody =
                envelope::parse_validate_response(message, seq, Command::SetVariable)?;
            data.update_variable(thread_id, reference, &name, &body)?;
        }
        Command::SetExpression => {
            let RequestData::SetExpression { thread_id, reference, name } =
                expected.request_data.clone()
            else {
                return Err(Error::UnmatchedResponse { request_seq: seq });
            };
            let body: SetExpressionResponseBody =
                envelope::parse_validate_response(message, seq, Command::SetExpression)?;
            let update = SetVariableResponseBody {
                value: body.value,
                variable_type: body.variable_type,
                variables_reference: body.variables_reference,
                named_variables: body.named_variables,
                indexed_variables: body.indexed_variables,
                memory_reference: body.memory_reference,
                value_location_reference: body.value_location_reference,
            };
            data.update_variable(thread_id, reference, &name, &update)?;
        }
        Command::Modules => {
            let body: ModulesResponseBody =
                envelope::parse_validate_response(message, seq, Command::Modules)?;
            data.set_modules(body.modules);
        }
        Command::LoadedSources => {
            let body: LoadedSourcesResponseBody =
                envelope::parse_validate_response(message, seq, Command::LoadedSources)?;
            for source in body.sources {
                if let Err(err) = data.upsert_source(source) {
                    log::warn!("skipping unidentifiable loaded source: {err}");
                }
            }
        }
        Command::Disconnect | Command::Terminate => {
            ack(message, seq, expected.command)?;
            conn.transition(AdapterState::Ended);
        }
        // Acknowledge-only: the real effects arrive as later events.
        other => {
            ack(message, seq, other)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dap::transport::MockTransport;
    use crate::session::data::ThreadStatus;
    use serde_json::json;

    fn setup() -> (Connection, SessionData, CallbackRegistry) {
        let mut conn = Connection::with_transport(Box::new(MockTransport::new()));
        conn.transition(AdapterState::Initialized);
        (conn, SessionData::new(), CallbackRegistry::new())
    }

    fn push(conn: &mut Connection, json: serde_json::Value) {
        conn.push_message(Value::from_json(json));
    }

    fn respond_to(conn: &Connection, command: Command) -> i64 {
        conn.expected()
            .iter()
            .find(|e| e.command == command)
            .map(|e| e.seq)
            .expect("request was sent")
    }

    #[test]
    fn stopped_event_marks_thread_and_queues_threads_request() {
        let (mut conn, mut data, mut callbacks) = setup();
        push(
            &mut conn,
            json!({
                "seq": 100,
                "type": "event",
                "event": "stopped",
                "body": {"reason": "pause", "threadId": 7}
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);

        assert!(data.thread(7).unwrap().status.is_stopped());
        assert!(data.thread(7).unwrap().selected);
        // The follow-up threads request is mandatory and already sent.
        assert!(conn.expected().iter().any(|e| e.command == Command::Threads));
        assert_eq!(conn.handled_events().len(), 1);
    }

    #[test]
    fn stopped_threads_stacktrace_cascade() {
        let (mut conn, mut data, mut callbacks) = setup();

        push(
            &mut conn,
            json!({
                "seq": 100,
                "type": "event",
                "event": "stopped",
                "body": {"reason": "pause", "threadId": 7}
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);

        let threads_seq = respond_to(&conn, Command::Threads);
        push(
            &mut conn,
            json!({
                "seq": 101,
                "type": "response",
                "request_seq": threads_seq,
                "success": true,
                "command": "threads",
                "body": {"threads": [{"id": 7, "name": "main"}]}
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);
        assert_eq!(data.thread(7).unwrap().name, "main");

        request::stack_trace(&mut conn, &mut data, 7, Drill::None).unwrap();
        process(&mut conn, &mut data, &mut callbacks);
        let stack_seq = respond_to(&conn, Command::StackTrace);
        push(
            &mut conn,
            json!({
                "seq": 102,
                "type": "response",
                "request_seq": stack_seq,
                "success": true,
                "command": "stackTrace",
                "body": {
                    "stackFrames": [
                        {"id": 1, "name": "main", "line": 3, "column": 1},
                        {"id": 2, "name": "start", "line": 9, "column": 1}
                    ],
                    "totalFrames": 2
                }
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);

        let thread = data.thread(7).unwrap();
        assert_eq!(thread.stack.len(), 2);
        assert!(thread.stack_complete);
        // No further stackTrace pages were scheduled.
        assert!(!conn.expected().iter().any(|e| e.command == Command::StackTrace));
        assert!(conn.outbound().is_empty());
    }

    #[test]
    fn short_of_total_pages_trigger_another_request() {
        let (mut conn, mut data, mut callbacks) = setup();
        data.set_threads(vec![crate::dap::types::Thread {
            id: 1,
            name: "main".to_string(),
        }]);

        request::stack_trace(&mut conn, &mut data, 1, Drill::None).unwrap();
        process(&mut conn, &mut data, &mut callbacks);
        let seq = respond_to(&conn, Command::StackTrace);

        let frames: Vec<serde_json::Value> = (0..20)
            .map(|i| json!({"id": i, "name": format!("f{i}"), "line": 1, "column": 1}))
            .collect();
        push(
            &mut conn,
            json!({
                "seq": 300,
                "type": "response",
                "request_seq": seq,
                "success": true,
                "command": "stackTrace",
                "body": {"stackFrames": frames, "totalFrames": 120}
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);

        assert!(!data.thread(1).unwrap().stack_complete);
        let next_page = conn
            .expected()
            .iter()
            .find(|e| e.command == Command::StackTrace)
            .expect("next page requested");
        assert!(matches!(
            next_page.request_data,
            RequestData::StackTrace { thread_id: 1, page_start: 20, .. }
        ));
    }

    #[test]
    fn scopes_cascade_requests_variables_per_scope() {
        let (mut conn, mut data, mut callbacks) = setup();
        data.set_threads(vec![crate::dap::types::Thread {
            id: 1,
            name: "main".to_string(),
        }]);
        data.mark_stopped(&crate::dap::types::StoppedEventBody {
            reason: crate::dap::types::StoppedReason::Pause,
            description: None,
            thread_id: Some(1),
            preserve_focus_hint: None,
            text: None,
            all_threads_stopped: None,
            hit_breakpoint_ids: None,
        });

        request::scopes(&mut conn, 1, 11, Drill::Variables).unwrap();
        process(&mut conn, &mut data, &mut callbacks);
        let seq = respond_to(&conn, Command::Scopes);
        push(
            &mut conn,
            json!({
                "seq": 301,
                "type": "response",
                "request_seq": seq,
                "success": true,
                "command": "scopes",
                "body": {"scopes": [
                    {"name": "Locals", "variablesReference": 23, "expensive": false},
                    {"name": "Registers", "variablesReference": 24, "expensive": true}
                ]}
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);

        assert_eq!(data.scopes(1, 11).unwrap().len(), 2);
        let references: Vec<i64> = conn
            .expected()
            .iter()
            .filter_map(|e| match &e.request_data {
                RequestData::Variables { reference, .. } => Some(*reference),
                _ => None,
            })
            .collect();
        assert_eq!(references, [23, 24]);
    }

    #[test]
    fn continue_response_invalidates_and_stale_variables_are_rejected() {
        let (mut conn, mut data, mut callbacks) = setup();
        data.set_threads(vec![
            crate::dap::types::Thread {
                id: 3,
                name: "main".to_string(),
            },
            crate::dap::types::Thread {
                id: 4,
                name: "worker".to_string(),
            },
        ]);
        data.mark_stopped(&crate::dap::types::StoppedEventBody {
            reason: crate::dap::types::StoppedReason::Pause,
            description: None,
            thread_id: Some(3),
            preserve_focus_hint: None,
            text: None,
            all_threads_stopped: Some(true),
            hit_breakpoint_ids: None,
        });

        // A variables request in flight when the resume lands.
        request::variables(&mut conn, 3, 99).unwrap();
        request::continue_thread(&mut conn, 3).unwrap();
        process(&mut conn, &mut data, &mut callbacks);
        let variables_seq = respond_to(&conn, Command::Variables);
        let continue_seq = respond_to(&conn, Command::Continue);

        push(
            &mut conn,
            json!({
                "seq": 400,
                "type": "response",
                "request_seq": continue_seq,
                "success": true,
                "command": "continue",
                "body": {"allThreadsContinued": true}
            }),
        );
        push(
            &mut conn,
            json!({
                "seq": 401,
                "type": "response",
                "request_seq": variables_seq,
                "success": true,
                "command": "variables",
                "body": {"variables": [{"name": "x", "value": "1", "variablesReference": 0}]}
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);

        for id in [3, 4] {
            let thread = data.thread(id).unwrap();
            assert_eq!(thread.status, ThreadStatus::Continued);
            assert!(thread.scopes.is_empty());
            assert!(thread.variables.is_empty());
        }
        // The stale variables response was rejected, recorded as a failure.
        let stale = conn
            .handled_responses()
            .iter()
            .find(|h| h.command == Command::Variables)
            .unwrap();
        assert_eq!(stale.status, ResponseStatus::Failure);
        assert!(data.variables(3, 99).is_none());
    }

    #[test]
    fn unmatched_and_mismatched_responses_are_dropped() {
        let (mut conn, mut data, mut callbacks) = setup();

        push(
            &mut conn,
            json!({
                "seq": 1,
                "type": "response",
                "request_seq": 777,
                "success": true,
                "command": "threads",
                "body": {"threads": []}
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);
        assert!(conn.handled_responses().is_empty());

        request::threads(&mut conn).unwrap();
        process(&mut conn, &mut data, &mut callbacks);
        let seq = respond_to(&conn, Command::Threads);
        push(
            &mut conn,
            json!({
                "seq": 2,
                "type": "response",
                "request_seq": seq,
                "success": true,
                "command": "pause"
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);
        // Wrong command: the response is dropped and the request stays
        // expected.
        assert!(conn.handled_responses().is_empty());
        assert_eq!(conn.expected().len(), 1);
    }

    #[test]
    fn failed_response_is_recorded_and_surfaced() {
        let (mut conn, mut data, mut callbacks) = setup();
        request::pause(&mut conn, 1).unwrap();
        process(&mut conn, &mut data, &mut callbacks);
        let seq = respond_to(&conn, Command::Pause);

        push(
            &mut conn,
            json!({
                "seq": 5,
                "type": "response",
                "request_seq": seq,
                "success": false,
                "command": "pause",
                "message": "notStopped"
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);

        let handled = &conn.handled_responses()[0];
        assert_eq!(handled.status, ResponseStatus::Failure);
        assert_eq!(handled.command, Command::Pause);
        let notifications = data.drain_notifications();
        assert!(notifications[0].contains("notStopped"));
    }

    #[test]
    fn terminated_event_preserves_restart_payload() {
        let (mut conn, mut data, mut callbacks) = setup();
        push(
            &mut conn,
            json!({
                "seq": 9,
                "type": "event",
                "event": "terminated",
                "body": {"restart": {"port": 9229}}
            }),
        );
        process(&mut conn, &mut data, &mut callbacks);
        assert!(data.terminated());
        assert_eq!(
            data.restart_payload(),
            Some(&json!({"port": 9229}))
        );
    }
}
