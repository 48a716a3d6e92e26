use crate::dap::Command;

/// Everything that can go wrong between the client core and a debug adapter.
///
/// Protocol violations never kill a session: the offending message is logged
/// and dropped by the driver. Lifecycle errors are surfaced to the caller,
/// and `DependencyNotSatisfied` is a scheduler signal rather than a failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --------------------------------- generic errors --------------------------------------------
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    // --------------------------------- framing errors --------------------------------------------
    #[error("no Content-Length header precedes the body separator")]
    NoContentLength,
    #[error("message body ended after {got} of {expected} bytes")]
    TruncatedBody { expected: usize, got: usize },
    #[error("message is not a JSON object")]
    NotAnObject,
    #[error("adapter closed its output stream")]
    ConnectionClosed,

    // --------------------------------- protocol errors -------------------------------------------
    #[error("unknown message type {0:?}")]
    UnknownMessageType(String),
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    #[error("field `{field}` is not {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("unknown event {0:?}")]
    UnknownEvent(String),
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("response for command {got:?} arrived where {expected} was expected")]
    WrongCommandForResponse { expected: Command, got: String },
    #[error("response request_seq {got} does not match request seq {expected}")]
    MismatchedRequestSeq { expected: i64, got: i64 },
    #[error("setBreakpoints answered {got} breakpoints for {sent} requested")]
    InvalidBreakpointResponse { sent: usize, got: usize },
    #[error("no request with seq {request_seq} is awaiting a response")]
    UnmatchedResponse { request_seq: i64 },
    #[error("malformed {what} payload: {source}")]
    PayloadDecode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // --------------------------------- lifecycle errors ------------------------------------------
    #[error("no debug session is running")]
    SessionNotStarted,
    #[error("the adapter process is not spawned")]
    AdapterNotSpawned,
    #[error("the adapter has not finished initializing, {0} is not permitted yet")]
    AdapterNotDoneInitializing(Command),
    #[error("the adapter does not support {0}")]
    AdapterDoesNotSupportRequest(Command),
    #[error("request dependency not satisfied")]
    DependencyNotSatisfied,
    #[error("the adapter process died")]
    AdapterDied,

    // --------------------------------- request failures ------------------------------------------
    #[error("{command} failed{}", failure_suffix(.reason, .description))]
    RequestFailed {
        command: Command,
        reason: Option<String>,
        description: Option<String>,
    },

    // --------------------------------- referenced state errors -----------------------------------
    #[error("source carries neither a path nor a sourceReference")]
    SourceWithoutId,
    #[error("breakpoint event carries no breakpoint id")]
    NoBreakpointIdGiven,
    #[error("no breakpoint with id {0}")]
    BreakpointDoesNotExist(i64),
    #[error("no thread with id {0}")]
    UnknownThread(i64),
    #[error("variables reference {0} is no longer valid")]
    StaleReference(i64),
}

impl Error {
    /// Errors that mean the peer broke the protocol. The driver drops the
    /// offending message and keeps the session alive.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Error::NoContentLength
                | Error::TruncatedBody { .. }
                | Error::NotAnObject
                | Error::UnknownMessageType(_)
                | Error::MissingField(_)
                | Error::InvalidField { .. }
                | Error::UnknownEvent(_)
                | Error::UnknownCommand(_)
                | Error::WrongCommandForResponse { .. }
                | Error::MismatchedRequestSeq { .. }
                | Error::InvalidBreakpointResponse { .. }
                | Error::UnmatchedResponse { .. }
                | Error::PayloadDecode { .. }
                | Error::Json(_)
        )
    }
}

fn failure_suffix(reason: &Option<String>, description: &Option<String>) -> String {
    match (reason, description) {
        (Some(reason), Some(description)) => format!(" ({reason}): {description}"),
        (Some(reason), None) => format!(" ({reason})"),
        (None, Some(description)) => format!(": {description}"),
        (None, None) => String::new(),
    }
}
