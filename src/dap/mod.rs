//! Wire-level DAP: protocol values, message framing, envelopes and the
//! payload type declarations.

pub mod envelope;
pub mod transport;
pub mod types;
pub mod value;

pub use envelope::{Command, EventName};
pub use value::Value;
