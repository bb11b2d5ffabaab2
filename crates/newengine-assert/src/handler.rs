use parking_lot::RwLock;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::action::Action;
use crate::config;
use crate::level::Level;

pub const PROMPT_TEXT: &str = "Press (I)gnore / Ignore (F)orever / Ignore (A)ll / (D)ebug / A(b)ort: ";

/// What a handler gets to see about a failed check.
///
/// `file` is already reduced to its last path component and `message` is the rendered text,
/// `None` when the check had no message.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub file: &'a str,
    pub line: u32,
    pub function: &'a str,
    pub expression: &'a str,
    pub level: Level,
    pub message: Option<&'a str>,
}

/// Decides what happens to a failed check.
///
/// Implemented for every `Fn(&Report<'_>) -> Action + Send + Sync`, so plain functions and
/// closures can be registered directly.
pub trait AssertHandler: Send + Sync {
    fn handle(&self, report: &Report<'_>) -> Action;
}

impl<F> AssertHandler for F
where
    F: Fn(&Report<'_>) -> Action + Send + Sync,
{
    #[inline]
    fn handle(&self, report: &Report<'_>) -> Action {
        self(report)
    }
}

pub type HandlerRef = Arc<dyn AssertHandler>;

static HANDLER: RwLock<Option<HandlerRef>> = parking_lot::const_rwlock(None);

/// Installs `handler` process-wide and returns the one it replaces.
///
/// `None` (in or out) stands for the built-in [`DefaultHandler`], so the returned value can
/// be passed back to restore the previous state.
pub fn set_handler(handler: Option<HandlerRef>) -> Option<HandlerRef> {
    let restoring_default = handler.is_none();
    let previous = std::mem::replace(&mut *HANDLER.write(), handler);

    if restoring_default {
        log::debug!("assert handler reset to default");
    } else {
        log::info!("custom assert handler installed");
    }
    previous
}

/// The registered handler, `None` while the default one is active.
pub fn current_handler() -> Option<HandlerRef> {
    HANDLER.read().clone()
}

/// Runs the active handler. The lock is released before the call so a handler may replace
/// itself.
pub(crate) fn invoke(report: &Report<'_>) -> Action {
    match current_handler() {
        Some(handler) => handler.handle(report),
        None => DefaultHandler.handle(report),
    }
}

/// Prints the failure to stderr, then applies [`default_policy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHandler;

impl AssertHandler for DefaultHandler {
    fn handle(&self, report: &Report<'_>) -> Action {
        {
            let mut err = io::stderr().lock();
            let _ = write_report(&mut err, report);
            let _ = err.flush();
        }

        default_policy(report.level, || {
            if config::prompt_enabled() {
                prompt(&mut io::stdin().lock(), &mut io::stderr())
            } else {
                Action::Break
            }
        })
    }
}

/// Standard escalation ladder. `ask` is only consulted for the debug range.
pub fn default_policy(level: Level, ask: impl FnOnce() -> Action) -> Action {
    if level < Level::DEBUG {
        Action::None
    } else if level < Level::ERROR {
        ask()
    } else if level < Level::FATAL {
        Action::Throw
    } else {
        Action::Abort
    }
}

pub fn write_report<W: Write>(out: &mut W, report: &Report<'_>) -> io::Result<()> {
    write!(
        out,
        "Assertion '{}' failed ({})\n  in file {}, line {}\n  function: {}\n",
        report.expression, report.level, report.file, report.line, report.function
    )?;
    if let Some(message) = report.message {
        writeln!(out, "  with message: {}", message)?;
    }
    Ok(())
}

/// Asks for a decision until a valid answer arrives.
///
/// A closed or failing input counts as "no one is there to answer" and yields `Break`.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Action {
    let mut line = Vec::new();
    loop {
        let _ = output.write_all(PROMPT_TEXT.as_bytes());
        let _ = output.flush();

        // Raw bytes: a line that is not UTF-8 is bad input, not a dead stream.
        line.clear();
        match input.read_until(b'\n', &mut line) {
            Ok(0) | Err(_) => return Action::Break,
            Ok(_) => {}
        }

        if let Some(action) = parse_choice(&line) {
            return action;
        }
    }
}

/// First non-blank character of the answer, if it is one of the offered keys.
pub fn parse_choice(line: &[u8]) -> Option<Action> {
    line.iter()
        .copied()
        .find(|b| !b.is_ascii_whitespace())
        .filter(u8::is_ascii_alphabetic)
        .and_then(|b| Action::from_key(char::from(b)))
}
