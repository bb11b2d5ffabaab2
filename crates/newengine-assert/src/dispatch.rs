use parking_lot::RwLock;
use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use crate::action::Action;
use crate::config;
use crate::handler::{self, Report};
use crate::level::Level;
use crate::message::truncate;
use crate::violation::Violation;

static IGNORE_ALL: AtomicBool = AtomicBool::new(false);

/// Identity of one check in the source, with its "ignore forever" flag.
///
/// The check macros put one of these in a `static` per expansion, so the flag belongs to the
/// lexical site and not to its text: two checks of the same expression are still distinct.
#[derive(Debug)]
pub struct CallSite {
    file: &'static str,
    line: u32,
    expression: &'static str,
    ignored: AtomicBool,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, expression: &'static str) -> Self {
        Self {
            file,
            line,
            expression,
            ignored: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn file(&self) -> &'static str {
        self.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn expression(&self) -> &'static str {
        self.expression
    }

    #[inline]
    pub fn is_ignored(&self) -> bool {
        self.ignored.load(Ordering::Relaxed)
    }

    /// Silences this site for the rest of the process.
    #[inline]
    pub fn ignore(&self) {
        self.ignored.store(true, Ordering::Relaxed);
    }

    /// True when a failure here would not reach the handler.
    #[inline]
    pub fn is_silenced(&self) -> bool {
        self.is_ignored() || is_ignoring_all()
    }
}

pub fn ignore_all(value: bool) {
    let previous = IGNORE_ALL.swap(value, Ordering::Relaxed);
    if previous != value {
        log::debug!("ignore-all asserts {}", if value { "enabled" } else { "disabled" });
    }
}

#[inline]
pub fn is_ignoring_all() -> bool {
    IGNORE_ALL.load(Ordering::Relaxed)
}

/// Entry point for a failed check.
///
/// Renders the message, hands a [`Report`] to the active handler and carries out its
/// decision. `Abort` and `Throw` do not return; `IgnoreLine` and `IgnoreAll` are recorded and
/// come back as `None`; everything else is returned for the call site to act on.
pub fn handle(
    site: &CallSite,
    function: &'static str,
    level: Level,
    message: Option<fmt::Arguments<'_>>,
) -> Action {
    let rendered = message.map(render_message);
    let file = file_name(site.file());

    let report = Report {
        file,
        line: site.line(),
        function,
        expression: site.expression(),
        level,
        message: rendered.as_deref(),
    };

    match handler::invoke(&report) {
        Action::Abort => std::process::abort(),
        Action::IgnoreLine => {
            site.ignore();
            log::debug!("assert at {}:{} ignored from now on", file, site.line());
            Action::None
        }
        Action::IgnoreAll => {
            ignore_all(true);
            Action::None
        }
        Action::Throw => raise(Violation::new(
            file,
            site.line(),
            function,
            site.expression(),
            rendered.as_deref(),
        )),
        action @ (Action::None | Action::Ignore | Action::Break) => action,
    }
}

/// Renders `args`, cutting output past `capacity - 1` bytes.
///
/// The capacity is only a limit. The buffer grows with the text, so a generous setting costs
/// nothing for short messages.
pub fn render_message(args: fmt::Arguments<'_>) -> String {
    let limit = config::message_capacity().saturating_sub(1);
    let mut out = Truncating {
        buf: String::with_capacity(limit.min(config::DEFAULT_MESSAGE_CAPACITY)),
        limit,
        full: false,
    };
    let _ = out.write_fmt(args);
    out.buf
}

struct Truncating {
    buf: String,
    limit: usize,
    full: bool,
}

impl fmt::Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.full {
            return Ok(());
        }
        let room = self.limit - self.buf.len();
        if s.len() <= room {
            self.buf.push_str(s);
        } else {
            self.buf.push_str(truncate(s, room));
            self.full = true;
        }
        Ok(())
    }
}

/// Last path component of `path`.
pub fn file_name(path: &'static str) -> &'static str {
    #[cfg(windows)]
    let tail = path.rsplit(['\\', '/']).next();
    #[cfg(not(windows))]
    let tail = path.rsplit('/').next();

    tail.unwrap_or(path)
}

/// Replacement for unwinding when a violation has to be raised.
pub type RaiseHook = fn(Violation) -> !;

static RAISE_HOOK: RwLock<Option<RaiseHook>> = parking_lot::const_rwlock(None);

/// Routes raised violations to `hook` instead of `panic_any`. Needed with `panic = "abort"`.
pub fn set_raise_hook(hook: Option<RaiseHook>) -> Option<RaiseHook> {
    std::mem::replace(&mut *RAISE_HOOK.write(), hook)
}

pub fn raise(violation: Violation) -> ! {
    let hook = *RAISE_HOOK.read();
    match hook {
        Some(hook) => hook(violation),
        None => panic::panic_any(violation),
    }
}

/// Runs `f`, turning a raised [`Violation`] into `Err`. Other panics keep unwinding.
pub fn catch_violation<R>(f: impl FnOnce() -> R) -> Result<R, Violation> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<Violation>() {
            Ok(violation) => Err(*violation),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

/// Keeps the panic hook quiet for violations; the handler already reported them.
pub fn silence_violation_panics() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if info.payload().is::<Violation>() {
                return;
            }
            previous(info);
        }));
    });
}
