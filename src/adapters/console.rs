//! Line-oriented console front-end.
//!
//! A reader thread blocks on stdin and pushes raw lines into a bounded
//! `embassy-sync` channel; the control loop drains it between scheduler
//! polls, so parameter access never overlaps a task tick.
//!
//! ```text
//! ┌──────────────┐  ConsoleLine  ┌──────────────┐
//! │ stdin thread │─────────────▶│ Control Loop  │──▶ stdout (JSON)
//! │  (blocking)  │               │  (sync)       │
//! └──────────────┘               └──────────────┘
//! ```
//!
//! Commands:
//!
//! | line                 | reply                         |
//! |----------------------|-------------------------------|
//! | `get [path]`         | value or subtree              |
//! | `set <path> <json>`  | value at `path` after writing |
//! | `quit`               | -                             |
//!
//! Failures reply `{"error": "<message>"}`.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{debug, warn};
use serde_json::{Value, json};

use crate::app::ports::{OutputPort, TemperaturePort, TimePort};
use crate::app::service::AppService;
use crate::error::{Error, Result};

/// Longest accepted console line, in bytes.
pub const LINE_CAPACITY: usize = 256;

/// Lines buffered between the reader thread and the control loop.
const CONSOLE_DEPTH: usize = 8;

pub type ConsoleLine = heapless::String<LINE_CAPACITY>;

/// Inbound console lines: stdin thread → control loop.
pub static CONSOLE_CHANNEL: Channel<CriticalSectionRawMutex, ConsoleLine, CONSOLE_DEPTH> =
    Channel::new();

/// Spawn the stdin reader.  The thread ends at EOF.
pub fn spawn_stdin_reader() -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("console".into())
        .spawn(|| {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("console read failed: {e}");
                        break;
                    }
                };
                submit_line(&line);
            }
            debug!("console input closed");
        })
}

/// Queue one raw line for the control loop.  Returns `false` if it was
/// dropped (too long, or the loop is not keeping up).
pub fn submit_line(line: &str) -> bool {
    let Ok(line) = ConsoleLine::try_from(line.trim_end()) else {
        warn!("console line longer than {LINE_CAPACITY} bytes dropped");
        return false;
    };
    if CONSOLE_CHANNEL.try_send(line).is_err() {
        warn!("console queue full, line dropped");
        return false;
    }
    true
}

// ───────────────────────────────────────────────────────────────
// Command parsing
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand<'a> {
    /// Empty path reads the whole tree.
    Get(&'a str),
    Set { path: &'a str, value: Value },
    Quit,
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand<'_>> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    match verb {
        "get" => Ok(ConsoleCommand::Get(rest)),
        "set" => {
            let (path, body) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| Error::MalformedInput("usage: set <path> <json>".into()))?;
            let value = serde_json::from_str(body.trim())
                .map_err(|e| Error::MalformedInput(e.to_string()))?;
            Ok(ConsoleCommand::Set { path, value })
        }
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        "" => Err(Error::MalformedInput("empty command".into())),
        other => Err(Error::MalformedInput(format!("unknown command '{other}'"))),
    }
}

// ───────────────────────────────────────────────────────────────
// Dispatch
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Reply(String),
    Quit,
}

/// Run one console line against the service.
pub fn dispatch<H, T>(service: &mut AppService<H, T>, line: &str) -> Dispatch
where
    H: OutputPort + TemperaturePort,
    T: TimePort,
{
    let outcome = match parse_command(line) {
        Ok(ConsoleCommand::Get(path)) => service.get(path),
        Ok(ConsoleCommand::Set { path, value }) => {
            service.set(path, &value).and_then(|()| service.get(path))
        }
        Ok(ConsoleCommand::Quit) => return Dispatch::Quit,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(value) => Dispatch::Reply(value.to_string()),
        Err(e) => {
            debug!("console command '{}' failed: {}", line.trim(), e);
            Dispatch::Reply(error_reply(&e))
        }
    }
}

pub fn error_reply(e: &Error) -> String {
    json!({ "error": e.to_string() }).to_string()
}
