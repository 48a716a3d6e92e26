//! Console front-end: spawn an adapter, run the session driver, print the
//! debuggee's output.

use anyhow::Context;
use clap::Parser;
use dapscope::dap::Value;
use dapscope::session::{
    handlers, request, session_status, AdapterSpec, AdapterState, CallbackRegistry, Connection,
    EndSession, LaunchConfiguration, SessionData, SessionMode, SessionStatus,
};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the debug adapter executable
    #[arg(long)]
    adapter: PathBuf,

    /// Initial working directory for the adapter process
    #[arg(long)]
    cwd: Option<PathBuf>,

    /// Retain handled messages for inspection
    #[arg(long = "debug_connection")]
    debug_connection: bool,

    /// Path to a JSON launch configuration merged into the launch request
    #[arg(long)]
    launch: Option<PathBuf>,

    /// Arguments passed to the adapter
    #[arg(raw(true))]
    args: Vec<String>,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    let logger = env_logger::Builder::from_default_env().build();
    let filter = logger.filter();
    dapscope::log::LOGGER.route(logger, filter);

    if let Err(err) = run(args) {
        log::error!("{err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn load_launch_configuration(path: Option<&PathBuf>) -> anyhow::Result<LaunchConfiguration> {
    let Some(path) = path else {
        return Ok(LaunchConfiguration {
            mode: SessionMode::Launch,
            arguments: Value::object(),
        });
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read launch configuration {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse launch configuration {}", path.display()))?;
    let mode = match json.get("request").and_then(|r| r.as_str()) {
        Some("attach") => SessionMode::Attach,
        _ => SessionMode::Launch,
    };
    Ok(LaunchConfiguration {
        mode,
        arguments: Value::from_json(json),
    })
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_launch_configuration(args.launch.as_ref())?;
    let adapter = AdapterSpec {
        path: args.adapter.clone(),
        argv: args.args.clone(),
        cwd: args.cwd.clone(),
    };

    let mut conn = Connection::new(args.debug_connection);
    let mut data = SessionData::new();
    let mut callbacks = CallbackRegistry::new();

    request::begin_session(&mut conn, &mut data, &adapter, Some(&config))
        .context("begin debug session")?;

    let mut printed = 0;
    let mut ending = false;
    loop {
        handlers::process(&mut conn, &mut data, &mut callbacks);

        for note in data.drain_notifications() {
            eprintln!("* {note}");
        }
        let outputs = data.outputs();
        while printed < outputs.len() {
            print!("{}", outputs[printed].output);
            printed += 1;
        }

        if session_status(&conn, &data) == SessionStatus::Terminated && !ending {
            ending = true;
            if matches!(
                conn.state(),
                AdapterState::Launched | AdapterState::Attached
            ) {
                if let Err(err) = request::end_session(&mut conn, EndSession::Disconnect) {
                    log::warn!("cannot disconnect cleanly: {err}");
                }
            }
        }

        match conn.state() {
            AdapterState::Died => anyhow::bail!("the debug adapter process died"),
            AdapterState::Ended => break,
            _ => {}
        }
    }

    if args.debug_connection {
        for message in conn.debug_dump() {
            log::debug!(target: "connection", "{message}");
        }
    }
    if let Some(code) = data.exit_code() {
        log::info!("debuggee exited with code {code}");
    }
    Ok(())
}
