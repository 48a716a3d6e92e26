//! Message envelopes.
//!
//! Every framed DAP message is a request, a response or an event, tagged by
//! its `type` field. This module classifies raw [`Value`] messages, encodes
//! outbound requests and decodes inbound payloads into typed bodies while
//! checking the envelope contract (command match, request_seq match, success
//! flag).

use crate::dap::value::Value;
use crate::error::Error;
use serde::de::DeserializeOwned;
use std::str::FromStr;

/// Request commands the client can reference, camelCase on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum Command {
    Attach,
    BreakpointLocations,
    Cancel,
    Completions,
    ConfigurationDone,
    Continue,
    DataBreakpointInfo,
    Disassemble,
    Disconnect,
    Evaluate,
    ExceptionInfo,
    Goto,
    GotoTargets,
    Initialize,
    Launch,
    LoadedSources,
    Modules,
    Next,
    Pause,
    ReadMemory,
    Restart,
    RestartFrame,
    ReverseContinue,
    RunInTerminal,
    Scopes,
    SetBreakpoints,
    SetDataBreakpoints,
    SetExceptionBreakpoints,
    SetExpression,
    SetFunctionBreakpoints,
    SetInstructionBreakpoints,
    SetVariable,
    Source,
    StackTrace,
    StartDebugging,
    StepBack,
    StepIn,
    StepInTargets,
    StepOut,
    Terminate,
    TerminateThreads,
    Threads,
    Variables,
    WriteMemory,
}

/// Event names the client recognizes, camelCase on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum EventName {
    Breakpoint,
    Capabilities,
    Continued,
    Exited,
    Initialized,
    Invalidated,
    LoadedSource,
    Memory,
    Module,
    Output,
    Process,
    ProgressEnd,
    ProgressStart,
    ProgressUpdate,
    Stopped,
    Terminated,
    Thread,
}

/// The three DAP message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Response,
    Event,
}

/// Classify a raw message by its `type` field.
pub fn message_kind(msg: &Value) -> Result<MessageKind, Error> {
    match msg.get("type").and_then(Value::as_str) {
        Some("request") => Ok(MessageKind::Request),
        Some("response") => Ok(MessageKind::Response),
        Some("event") => Ok(MessageKind::Event),
        Some(other) => Err(Error::UnknownMessageType(other.to_string())),
        None => Err(Error::MissingField("type")),
    }
}

/// The envelope fields of a response, before any body decoding.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub seq: i64,
    pub request_seq: i64,
    pub command: String,
    pub success: bool,
    /// Raw `message` field; `"cancelled"` and `"notStopped"` have contractual
    /// meaning, anything else is free-form.
    pub message: Option<String>,
}

pub fn response_head(msg: &Value) -> Result<ResponseHead, Error> {
    Ok(ResponseHead {
        seq: field_i64(msg, "seq")?,
        request_seq: field_i64(msg, "request_seq")?,
        command: field_str(msg, "command")?.to_string(),
        success: msg
            .get("success")
            .and_then(Value::as_bool)
            .ok_or(Error::MissingField("success"))?,
        message: msg
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// The envelope fields of an event.
#[derive(Debug, Clone)]
pub struct EventHead {
    pub seq: i64,
    pub event: String,
}

pub fn event_head(msg: &Value) -> Result<EventHead, Error> {
    Ok(EventHead {
        seq: field_i64(msg, "seq")?,
        event: field_str(msg, "event")?.to_string(),
    })
}

/// Compose an outbound request envelope.
pub fn encode_request(seq: i64, command: Command, arguments: Option<&Value>) -> Value {
    let mut msg = Value::object();
    msg.insert("seq", Value::Int(seq));
    msg.insert("type", Value::from("request"));
    msg.insert("command", Value::from(command.to_string()));
    if let Some(arguments) = arguments {
        msg.insert("arguments", arguments.clone());
    }
    msg
}

/// Decode an event body, requiring the `event` tag to match.
pub fn parse_event<T: DeserializeOwned>(msg: &Value, tag: EventName) -> Result<T, Error> {
    parse_event_opt(msg, tag)?.ok_or(Error::MissingField("body"))
}

/// Same as [`parse_event`] for events whose body is optional.
pub fn parse_event_opt<T: DeserializeOwned>(
    msg: &Value,
    tag: EventName,
) -> Result<Option<T>, Error> {
    if message_kind(msg)? != MessageKind::Event {
        return Err(Error::InvalidField {
            field: "type",
            expected: "an event",
        });
    }
    let head = event_head(msg)?;
    if EventName::from_str(&head.event) != Ok(tag) {
        return Err(Error::UnknownEvent(head.event));
    }
    decode_body(msg, tag.into())
}

/// Validate a response envelope against the originating request and decode
/// its body. A DAP-level failure (`success == false`) becomes
/// [`Error::RequestFailed`] carrying the classification `message` and the
/// optional human-readable description from the error body.
pub fn parse_validate_response<T: DeserializeOwned>(
    msg: &Value,
    request_seq: i64,
    command: Command,
) -> Result<T, Error> {
    parse_validate_response_opt(msg, request_seq, command)?.ok_or(Error::MissingField("body"))
}

/// Same as [`parse_validate_response`] for acknowledge-style responses whose
/// body is optional.
pub fn parse_validate_response_opt<T: DeserializeOwned>(
    msg: &Value,
    request_seq: i64,
    command: Command,
) -> Result<Option<T>, Error> {
    if message_kind(msg)? != MessageKind::Response {
        return Err(Error::InvalidField {
            field: "type",
            expected: "a response",
        });
    }
    let head = response_head(msg)?;
    if head.command != command.to_string() {
        return Err(Error::WrongCommandForResponse {
            expected: command,
            got: head.command,
        });
    }
    if head.request_seq != request_seq {
        return Err(Error::MismatchedRequestSeq {
            expected: request_seq,
            got: head.request_seq,
        });
    }
    if !head.success {
        return Err(Error::RequestFailed {
            command,
            reason: head.message,
            description: failure_description(msg),
        });
    }
    decode_body(msg, command.into())
}

/// The human-readable description of a failed response, when the adapter
/// sent a well-formed error body.
pub fn failure_description(msg: &Value) -> Option<String> {
    msg.get_path("body.error.format")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn decode_body<T: DeserializeOwned>(msg: &Value, what: &'static str) -> Result<Option<T>, Error> {
    match msg.get("body") {
        None | Some(Value::Null) => Ok(None),
        Some(body) => serde_json::from_value(body.to_json())
            .map(Some)
            .map_err(|source| Error::PayloadDecode { what, source }),
    }
}

fn field_i64(msg: &Value, field: &'static str) -> Result<i64, Error> {
    match msg.get(field) {
        Some(value) => value.as_i64().ok_or(Error::InvalidField {
            field,
            expected: "an integer",
        }),
        None => Err(Error::MissingField(field)),
    }
}

fn field_str<'m>(msg: &'m Value, field: &'static str) -> Result<&'m str, Error> {
    match msg.get(field) {
        Some(value) => value.as_str().ok_or(Error::InvalidField {
            field,
            expected: "a string",
        }),
        None => Err(Error::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dap::types::StoppedEventBody;
    use serde_json::json;

    #[test]
    fn command_tags_match_the_wire() {
        assert_eq!(Command::SetBreakpoints.to_string(), "setBreakpoints");
        assert_eq!(Command::ConfigurationDone.to_string(), "configurationDone");
        assert_eq!(
            Command::from_str("dataBreakpointInfo"),
            Ok(Command::DataBreakpointInfo)
        );
        assert_eq!(EventName::LoadedSource.to_string(), "loadedSource");
    }

    #[test]
    fn classification_by_type_field() {
        let event = Value::from_json(json!({"seq": 1, "type": "event", "event": "initialized"}));
        assert_eq!(message_kind(&event).unwrap(), MessageKind::Event);

        let odd = Value::from_json(json!({"seq": 1, "type": "telemetry"}));
        assert!(matches!(
            message_kind(&odd),
            Err(Error::UnknownMessageType(_))
        ));
    }

    #[test]
    fn typed_event_decoding() {
        let msg = Value::from_json(json!({
            "seq": 100,
            "type": "event",
            "event": "stopped",
            "body": {"reason": "pause", "threadId": 7}
        }));
        let body: StoppedEventBody = parse_event(&msg, EventName::Stopped).unwrap();
        assert_eq!(body.thread_id, Some(7));
    }

    #[test]
    fn response_envelope_checks() {
        let msg = Value::from_json(json!({
            "seq": 5,
            "type": "response",
            "request_seq": 2,
            "success": true,
            "command": "continue",
            "body": {"allThreadsContinued": true}
        }));

        assert!(matches!(
            parse_validate_response_opt::<serde_json::Value>(&msg, 2, Command::Next),
            Err(Error::WrongCommandForResponse { .. })
        ));
        assert!(matches!(
            parse_validate_response_opt::<serde_json::Value>(&msg, 3, Command::Continue),
            Err(Error::MismatchedRequestSeq {
                expected: 3,
                got: 2
            })
        ));
        assert!(
            parse_validate_response_opt::<serde_json::Value>(&msg, 2, Command::Continue)
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn failed_response_surfaces_reason_and_description() {
        let msg = Value::from_json(json!({
            "seq": 5,
            "type": "response",
            "request_seq": 4,
            "success": false,
            "command": "pause",
            "message": "notStopped",
            "body": {"error": {"id": 1, "format": "thread is already running"}}
        }));
        let err = parse_validate_response_opt::<serde_json::Value>(&msg, 4, Command::Pause)
            .unwrap_err();
        match err {
            Error::RequestFailed {
                command,
                reason,
                description,
            } => {
                assert_eq!(command, Command::Pause);
                assert_eq!(reason.as_deref(), Some("notStopped"));
                assert_eq!(description.as_deref(), Some("thread is already running"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
