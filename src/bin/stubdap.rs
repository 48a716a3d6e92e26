//! Scripted stub debug adapter used by the integration tests.
//!
//! Speaks just enough server-side DAP over stdio to exercise the client:
//! handshake, stop-on-entry, canned threads/stacks/scopes/variables,
//! positional breakpoint echoes and resume bookkeeping. The first CLI
//! argument selects a scenario:
//!
//! - `default`: two threads, two stack frames, stop on entry.
//! - `paging`: a 50-frame stack so the client has to page.
//! - `mortal`: exits right after answering `launch`, leaving broken pipes.

use anyhow::Context;
use dapscope::dap::transport::{read_frame, write_frame};
use dapscope::dap::Value;
use dapscope::error::Error;
use serde_json::json;

struct Stub {
    seq: i64,
    scenario: String,
    breakpoint_id: i64,
}

impl Stub {
    fn next_seq(&mut self) -> i64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    fn send(&mut self, mut message: serde_json::Value) -> anyhow::Result<()> {
        message["seq"] = json!(self.next_seq());
        let mut stdout = std::io::stdout().lock();
        write_frame(&mut stdout, &Value::from_json(message)).context("write frame")?;
        Ok(())
    }

    fn respond(
        &mut self,
        request: &Value,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<()> {
        let mut message = json!({
            "type": "response",
            "request_seq": request.get("seq").and_then(Value::as_i64).unwrap_or(0),
            "success": true,
            "command": request.get("command").and_then(Value::as_str).unwrap_or(""),
        });
        if let Some(body) = body {
            message["body"] = body;
        }
        self.send(message)
    }

    fn event(&mut self, name: &str, body: Option<serde_json::Value>) -> anyhow::Result<()> {
        let mut message = json!({"type": "event", "event": name});
        if let Some(body) = body {
            message["body"] = body;
        }
        self.send(message)
    }
}

fn main() -> anyhow::Result<()> {
    let scenario = std::env::args().nth(1).unwrap_or_else(|| "default".to_string());
    let mut stub = Stub {
        seq: 1,
        scenario,
        breakpoint_id: 0,
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    loop {
        let request = match read_frame(&mut input) {
            Ok(request) => request,
            Err(Error::ConnectionClosed) => break,
            Err(err) => return Err(err).context("read frame"),
        };
        let command = request
            .get("command")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let args = |path: &str| request.get_path(&format!("arguments.{path}")).cloned();
        let arg_i64 = |path: &str| args(path).as_ref().and_then(Value::as_i64);

        match command.as_str() {
            "initialize" => {
                stub.respond(
                    &request,
                    Some(json!({
                        "supportsConfigurationDoneRequest": true,
                        "supportsFunctionBreakpoints": true,
                        "supportsDataBreakpoints": true,
                        "supportsTerminateRequest": true,
                        "supportsLoadedSourcesRequest": true,
                        "supportsModulesRequest": true,
                        "supportsDelayedStackTraceLoading": true,
                    })),
                )?;
                stub.event("initialized", None)?;
            }
            "launch" | "attach" => {
                stub.respond(&request, None)?;
                stub.event(
                    "output",
                    Some(json!({"category": "console", "output": "stub adapter ready\n"})),
                )?;
                if stub.scenario == "mortal" {
                    // Die with the handshake half done; the client's next
                    // write or read lands on a closed pipe.
                    return Ok(());
                }
            }
            "configurationDone" => {
                stub.respond(&request, None)?;
                stub.event(
                    "stopped",
                    Some(json!({
                        "reason": "entry",
                        "threadId": 1,
                        "allThreadsStopped": true,
                    })),
                )?;
            }
            "threads" => {
                stub.respond(
                    &request,
                    Some(json!({"threads": [
                        {"id": 1, "name": "main"},
                        {"id": 2, "name": "worker"},
                    ]})),
                )?;
            }
            "stackTrace" => {
                let thread_id = arg_i64("threadId").unwrap_or(1);
                let start = arg_i64("startFrame").unwrap_or(0);
                let levels = arg_i64("levels").unwrap_or(0);
                let total: i64 = if stub.scenario == "paging" { 50 } else { 2 };
                let end = if levels > 0 {
                    (start + levels).min(total)
                } else {
                    total
                };
                let frames: Vec<serde_json::Value> = (start..end)
                    .map(|i| {
                        json!({
                            "id": thread_id * 1000 + i,
                            "name": format!("frame_{i}"),
                            "line": i + 1,
                            "column": 1,
                            "source": {"path": "/src/main.rs"},
                        })
                    })
                    .collect();
                stub.respond(
                    &request,
                    Some(json!({"stackFrames": frames, "totalFrames": total})),
                )?;
            }
            "scopes" => {
                let frame_id = arg_i64("frameId").unwrap_or(0);
                stub.respond(
                    &request,
                    Some(json!({"scopes": [
                        {
                            "name": "Arguments",
                            "presentationHint": "arguments",
                            "variablesReference": frame_id * 2 + 1,
                            "expensive": false,
                        },
                        {
                            "name": "Locals",
                            "presentationHint": "locals",
                            "variablesReference": frame_id * 2 + 2,
                            "expensive": false,
                        },
                    ]})),
                )?;
            }
            "variables" => {
                let reference = arg_i64("variablesReference").unwrap_or(0);
                let mut variables = vec![json!({
                    "name": "x",
                    "value": "42",
                    "type": "i64",
                    "variablesReference": 0,
                })];
                if reference < 100_000 {
                    variables.push(json!({
                        "name": "items",
                        "value": "Vec<u8>(len: 3)",
                        "type": "Vec<u8>",
                        "variablesReference": reference * 100 + 1,
                    }));
                }
                stub.respond(&request, Some(json!({"variables": variables})))?;
            }
            "setBreakpoints" => {
                let breakpoints = args("breakpoints")
                    .as_ref()
                    .and_then(Value::as_array)
                    .map(<[Value]>::to_vec)
                    .unwrap_or_default();
                let echoed: Vec<serde_json::Value> = breakpoints
                    .iter()
                    .enumerate()
                    .map(|(index, bp)| {
                        stub.breakpoint_id += 1;
                        let line = bp.get("line").and_then(Value::as_i64).unwrap_or(0);
                        if index == 0 {
                            json!({
                                "id": stub.breakpoint_id,
                                "verified": true,
                                "line": line + 1,
                            })
                        } else {
                            json!({
                                "id": stub.breakpoint_id,
                                "verified": false,
                                "line": line,
                                "message": "could not bind",
                            })
                        }
                    })
                    .collect();
                stub.respond(&request, Some(json!({"breakpoints": echoed})))?;
            }
            "setFunctionBreakpoints" => {
                let count = args("breakpoints")
                    .as_ref()
                    .and_then(Value::as_array)
                    .map(<[Value]>::len)
                    .unwrap_or(0);
                let echoed: Vec<serde_json::Value> = (0..count)
                    .map(|_| {
                        stub.breakpoint_id += 1;
                        json!({"id": stub.breakpoint_id, "verified": true})
                    })
                    .collect();
                stub.respond(&request, Some(json!({"breakpoints": echoed})))?;
            }
            "continue" => {
                stub.respond(&request, Some(json!({"allThreadsContinued": true})))?;
            }
            "pause" => {
                let thread_id = arg_i64("threadId").unwrap_or(1);
                stub.respond(&request, None)?;
                stub.event(
                    "stopped",
                    Some(json!({"reason": "pause", "threadId": thread_id})),
                )?;
            }
            "next" | "stepIn" | "stepOut" => {
                let thread_id = arg_i64("threadId").unwrap_or(1);
                stub.respond(&request, None)?;
                stub.event(
                    "stopped",
                    Some(json!({
                        "reason": "step",
                        "threadId": thread_id,
                        "allThreadsStopped": true,
                    })),
                )?;
            }
            "source" => {
                stub.respond(
                    &request,
                    Some(json!({"content": "fn main() {}\n", "mimeType": "text/x-rust"})),
                )?;
            }
            "loadedSources" => {
                stub.respond(
                    &request,
                    Some(json!({"sources": [
                        {"name": "main.rs", "path": "/src/main.rs"},
                    ]})),
                )?;
            }
            "modules" => {
                stub.respond(
                    &request,
                    Some(json!({"modules": [
                        {"id": 1, "name": "debuggee"},
                    ]})),
                )?;
            }
            "disconnect" | "terminate" => {
                stub.event("terminated", None)?;
                stub.respond(&request, None)?;
                break;
            }
            _ => {
                stub.respond(&request, None)?;
            }
        }
    }

    Ok(())
}
