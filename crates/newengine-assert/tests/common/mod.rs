#![allow(dead_code)]

use std::sync::Arc;

use newengine_assert::{
    ignore_all, set_handler, silence_violation_panics, Action, HandlerRef, Level, Report,
};
use parking_lot::{Mutex, MutexGuard};

/// Serializes every test that touches the process-wide handler or flags.
static GLOBAL: Mutex<()> = parking_lot::const_mutex(());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub file: String,
    pub line: u32,
    pub function: String,
    pub expression: String,
    pub level: Level,
    pub message: Option<String>,
}

/// Test handler: remembers every report, raises for `ERROR` and answers `action` otherwise.
pub struct Recorder {
    reports: Mutex<Vec<Recorded>>,
    action: Mutex<Action>,
}

impl Recorder {
    fn handle(&self, report: &Report<'_>) -> Action {
        self.reports.lock().push(Recorded {
            file: report.file.to_owned(),
            line: report.line,
            function: report.function.to_owned(),
            expression: report.expression.to_owned(),
            level: report.level,
            message: report.message.map(str::to_owned),
        });

        if report.level == Level::ERROR {
            return Action::Throw;
        }
        *self.action.lock()
    }
}

pub struct Harness {
    _guard: MutexGuard<'static, ()>,
    recorder: Arc<Recorder>,
}

impl Harness {
    pub fn install() -> Self {
        let guard = GLOBAL.lock();
        silence_violation_panics();
        ignore_all(false);

        let recorder = Arc::new(Recorder {
            reports: Mutex::new(Vec::new()),
            action: Mutex::new(Action::None),
        });
        let for_handler = Arc::clone(&recorder);
        let handler: HandlerRef = Arc::new(move |report: &Report<'_>| for_handler.handle(report));
        set_handler(Some(handler));

        Self {
            _guard: guard,
            recorder,
        }
    }

    pub fn set_action(&self, action: Action) {
        *self.recorder.action.lock() = action;
    }

    pub fn count(&self) -> usize {
        self.recorder.reports.lock().len()
    }

    pub fn last(&self) -> Recorded {
        self.recorder
            .reports
            .lock()
            .last()
            .cloned()
            .expect("no report recorded")
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        set_handler(None);
        ignore_all(false);
    }
}
