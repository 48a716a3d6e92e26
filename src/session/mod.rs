//! The process-attached debug session: connection, scheduling, handlers,
//! data model and callbacks.

pub mod callback;
pub mod capabilities;
pub mod connection;
pub mod data;
pub mod handlers;
pub mod request;
pub mod sched;

pub use callback::{CallIf, CallOn, CallbackRegistry};
pub use connection::{AdapterState, Connection, Drill};
pub use data::SessionData;
pub use request::{AdapterSpec, EndSession, LaunchConfiguration, SessionMode};

/// Condensed session state for the front-end's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotRunning,
    Running,
    Stopped,
    Terminated,
}

/// Derive the status the UI shows from the adapter state and the thread
/// table.
pub fn session_status(conn: &Connection, data: &SessionData) -> SessionStatus {
    if data.terminated() || matches!(conn.state(), AdapterState::Died | AdapterState::Ended) {
        return SessionStatus::Terminated;
    }
    match conn.state() {
        AdapterState::Launched | AdapterState::Attached => {
            if data.threads().any(|t| t.status.is_stopped()) {
                SessionStatus::Stopped
            } else {
                SessionStatus::Running
            }
        }
        _ => SessionStatus::NotRunning,
    }
}
