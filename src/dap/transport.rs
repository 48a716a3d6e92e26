//! DAP message transport over the adapter's stdio.
//!
//! Frames are `Content-Length: <n>\r\n\r\n<utf-8 json>`; additional header
//! fields are allowed and ignored. Reads are bounded so a stalled adapter
//! can never wedge the single-threaded driver.

use crate::dap::value::Value;
use crate::error::Error;
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::process::{ChildStdin, ChildStdout};
use std::time::{Duration, Instant};
use timeout_readwrite::TimeoutReader;

/// Upper bound for one blocking frame read once its header has begun.
const FRAME_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for the framed DAP byte stream.
///
/// The production implementation sits on the adapter child's pipes; tests
/// substitute an in-memory queue.
pub trait Transport {
    /// Return true if at least one byte is readable within `timeout`.
    fn poll(&mut self, timeout: Duration) -> Result<bool, Error>;

    /// Read exactly one framed message. Blocking (bounded) once the header
    /// has begun.
    fn read_message(&mut self) -> Result<Value, Error>;

    /// Write a single framed message.
    fn write_message(&mut self, message: &Value) -> Result<(), Error>;
}

/// Parse one frame from a buffered stream.
pub fn read_frame<R: BufRead>(reader: &mut R) -> Result<Value, Error> {
    let mut content_length: Option<usize> = None;
    loop {
        let mut line = String::new();
        let read_n = reader.read_line(&mut line)?;
        if read_n == 0 {
            return Err(Error::ConnectionClosed);
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }
        if let Some(v) = line.strip_prefix("Content-Length:") {
            content_length = Some(
                v.trim()
                    .parse()
                    .map_err(|_| Error::InvalidField {
                        field: "Content-Length",
                        expected: "a decimal byte count",
                    })?,
            );
        }
    }

    let expected = content_length.ok_or(Error::NoContentLength)?;
    let mut buf = vec![0u8; expected];
    let mut got = 0;
    while got < expected {
        match reader.read(&mut buf[got..]) {
            Ok(0) => return Err(Error::TruncatedBody { expected, got }),
            Ok(n) => got += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }

    let json: serde_json::Value = serde_json::from_slice(&buf)?;
    if !json.is_object() {
        return Err(Error::NotAnObject);
    }
    Ok(Value::from_json(json))
}

/// Emit one frame: header, blank line, body, no trailing whitespace.
pub fn write_frame<W: Write>(writer: &mut W, message: &Value) -> Result<(), Error> {
    let payload = serde_json::to_vec(&message.to_json())?;
    write!(writer, "Content-Length: {}\r\n\r\n", payload.len())?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

/// Reader adapter that retries short pipe timeouts until a deadline, so one
/// logical read blocks for a bounded, caller-chosen window while the
/// underlying [`TimeoutReader`] keeps waking up every millisecond.
struct DeadlineReader {
    inner: TimeoutReader<ChildStdout>,
    deadline: Option<Instant>,
}

impl Read for DeadlineReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        loop {
            match self.inner.read(buf) {
                Err(err)
                    if err.kind() == ErrorKind::TimedOut
                        || err.kind() == ErrorKind::WouldBlock =>
                {
                    let expired = self
                        .deadline
                        .map(|deadline| Instant::now() >= deadline)
                        .unwrap_or(true);
                    if expired {
                        return Err(err);
                    }
                }
                other => return other,
            }
        }
    }
}

/// Transport over a spawned adapter's stdin/stdout pipes.
pub struct StdioTransport {
    reader: BufReader<DeadlineReader>,
    writer: ChildStdin,
}

impl StdioTransport {
    pub fn new(stdout: ChildStdout, stdin: ChildStdin) -> StdioTransport {
        StdioTransport {
            reader: BufReader::new(DeadlineReader {
                inner: TimeoutReader::new(stdout, Duration::from_millis(1)),
                deadline: None,
            }),
            writer: stdin,
        }
    }

    fn set_deadline(&mut self, from_now: Duration) {
        self.reader.get_mut().deadline = Some(Instant::now() + from_now);
    }
}

impl Transport for StdioTransport {
    fn poll(&mut self, timeout: Duration) -> Result<bool, Error> {
        self.set_deadline(timeout);
        match self.reader.fill_buf() {
            // An empty buffer is end-of-stream; report readable and let
            // read_message surface ConnectionClosed.
            Ok(_) => Ok(true),
            Err(err)
                if err.kind() == ErrorKind::TimedOut || err.kind() == ErrorKind::WouldBlock =>
            {
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn read_message(&mut self) -> Result<Value, Error> {
        self.set_deadline(FRAME_READ_TIMEOUT);
        read_frame(&mut self.reader)
    }

    fn write_message(&mut self, message: &Value) -> Result<(), Error> {
        write_frame(&mut self.writer, message)
    }
}

/// In-memory transport for unit tests: scripted inbound frames, captured
/// outbound frames, optional broken pipe injection.
#[cfg(test)]
pub(crate) struct MockTransport {
    pub inbound: std::collections::VecDeque<Value>,
    pub outbound: Vec<Value>,
    pub broken: bool,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> MockTransport {
        MockTransport {
            inbound: std::collections::VecDeque::new(),
            outbound: Vec::new(),
            broken: false,
        }
    }

    pub fn push_json(&mut self, json: serde_json::Value) {
        self.inbound.push_back(Value::from_json(json));
    }
}

#[cfg(test)]
impl Transport for MockTransport {
    fn poll(&mut self, _timeout: Duration) -> Result<bool, Error> {
        Ok(!self.inbound.is_empty())
    }

    fn read_message(&mut self) -> Result<Value, Error> {
        self.inbound.pop_front().ok_or(Error::ConnectionClosed)
    }

    fn write_message(&mut self, message: &Value) -> Result<(), Error> {
        if self.broken {
            return Err(std::io::Error::new(ErrorKind::BrokenPipe, "stdin gone").into());
        }
        self.outbound.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    fn frame(body: &str) -> Vec<u8> {
        format!("Content-Length: {}\r\n\r\n{}", body.len(), body).into_bytes()
    }

    #[test]
    fn reads_a_well_formed_frame() {
        let mut input = Cursor::new(frame(r#"{"seq":1,"type":"request","command":"threads"}"#));
        let value = read_frame(&mut input).unwrap();
        assert_eq!(value.get("command").and_then(Value::as_str), Some("threads"));
    }

    #[test]
    fn extra_header_fields_are_ignored() {
        let body = r#"{"seq":1,"type":"event","event":"initialized"}"#;
        let raw = format!(
            "Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let mut input = Cursor::new(raw.into_bytes());
        let value = read_frame(&mut input).unwrap();
        assert_eq!(
            value.get("event").and_then(Value::as_str),
            Some("initialized")
        );
    }

    #[test]
    fn missing_content_length_is_a_framing_error() {
        let mut input = Cursor::new(b"Content-Type: application/json\r\n\r\n{}".to_vec());
        assert!(matches!(
            read_frame(&mut input),
            Err(Error::NoContentLength)
        ));
    }

    #[test]
    fn short_body_is_a_framing_error() {
        let mut input = Cursor::new(b"Content-Length: 50\r\n\r\n{\"seq\":1}".to_vec());
        assert!(matches!(
            read_frame(&mut input),
            Err(Error::TruncatedBody {
                expected: 50,
                got: 9
            })
        ));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let mut input = Cursor::new(frame("[1,2,3]"));
        assert!(matches!(read_frame(&mut input), Err(Error::NotAnObject)));
    }

    #[test]
    fn write_then_read_round_trips() {
        let message = Value::from_json(json!({
            "seq": 42,
            "type": "request",
            "command": "stackTrace",
            "arguments": {"threadId": 7, "startFrame": 0, "levels": 20}
        }));
        let mut sink = Vec::new();
        write_frame(&mut sink, &message).unwrap();
        let mut input = Cursor::new(sink);
        assert_eq!(read_frame(&mut input).unwrap(), message);
    }
}
