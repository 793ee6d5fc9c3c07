use crate::config::Settings;
use crate::core::data_loading::DataLoadingCheck;
use crate::core::imports::ImportCheck;
use crate::core::modeling::ModelingCheck;
use crate::domain::model::{CheckOutcome, CheckReport, RunSummary};
use crate::domain::ports::Check;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;
use std::any::Any;
use std::cell::Cell;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::Instant;

const RULE_WIDTH: usize = 50;

thread_local! {
    static PANICS_SILENCED: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wraps the current panic hook once: panics raised while a check runs are
/// logged at debug level instead of printed. Other panics reach the old hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if PANICS_SILENCED.with(Cell::get) {
                tracing::debug!("check panicked: {}", info);
            } else {
                previous(info);
            }
        }));
    });
}

fn panics_silenced() -> bool {
    PANICS_SILENCED.with(Cell::get)
}

/// Marks the current thread as running a check body until dropped.
struct SilencedPanics {
    previous: bool,
}

impl SilencedPanics {
    fn enter() -> Self {
        install_quiet_hook();
        let previous = PANICS_SILENCED.with(|flag| flag.replace(true));
        Self { previous }
    }
}

impl Drop for SilencedPanics {
    fn drop(&mut self) {
        PANICS_SILENCED.with(|flag| flag.set(self.previous));
    }
}

/// Import, data loading and modeling, in that order.
pub fn default_checks(settings: &Settings) -> Vec<Box<dyn Check>> {
    vec![
        Box::new(ImportCheck::default()),
        Box::new(DataLoadingCheck::new(
            settings.data_dir.clone(),
            settings.tables.clone(),
        )),
        Box::new(ModelingCheck::new(settings.modeling.clone())),
    ]
}

/// Runs a check body, turning an error or a panic into a failed outcome and
/// the single `❌` line reported for it.
pub fn guard(check: &dyn Check) -> (CheckOutcome, Vec<String>) {
    let result = {
        let _silenced = SilencedPanics::enter();
        panic::catch_unwind(AssertUnwindSafe(|| check.run()))
    };
    match result {
        Ok(Ok(lines)) => (CheckOutcome::Passed, lines),
        Ok(Err(e)) => failed(check, e.to_string()),
        Err(payload) => failed(check, panic_message(payload.as_ref())),
    }
}

fn failed(check: &dyn Check, message: String) -> (CheckOutcome, Vec<String>) {
    let line = format!("❌ {}: {}", check.failure_label(), message);
    (CheckOutcome::Failed(message), vec![line])
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "check panicked".to_string()
    }
}

pub struct CheckRunner {
    checks: Vec<Box<dyn Check>>,
    monitor: SystemMonitor,
}

impl CheckRunner {
    pub fn new(checks: Vec<Box<dyn Check>>) -> Self {
        Self {
            checks,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(checks: Vec<Box<dyn Check>>, monitor_enabled: bool) -> Self {
        Self {
            checks,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs every check in order and writes the status lines to `out`.
    ///
    /// A failed check never stops the run. Only a failing writer is an error.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary> {
        let started_at = Utc::now();
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(out, "🧪 Testing setup...")?;
        writeln!(out, "{}", rule)?;

        let mut reports = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            writeln!(out, "\n🔍 Running {}...", check.name())?;
            tracing::debug!("Starting {}", check.name());

            let start = Instant::now();
            let (outcome, lines) = guard(check.as_ref());
            let elapsed = start.elapsed();

            for line in &lines {
                writeln!(out, "{}", line)?;
            }
            out.flush()?;

            match &outcome {
                CheckOutcome::Passed => tracing::info!("{} passed in {:?}", check.name(), elapsed),
                CheckOutcome::Failed(message) => {
                    tracing::warn!("{} failed in {:?}: {}", check.name(), elapsed, message)
                }
            }
            self.monitor.log_stats(check.name());

            reports.push(CheckReport {
                name: check.name().to_string(),
                outcome,
                lines,
                elapsed,
            });
        }

        let summary = RunSummary::new(started_at, reports);

        writeln!(out, "\n{}", rule)?;
        if summary.all_passed {
            writeln!(out, "🎉 All tests passed! Ready to proceed with modeling.")?;
        } else {
            writeln!(out, "⚠️  Some tests failed. Please check the errors above.")?;
        }
        out.flush()?;

        self.monitor.log_final_stats();
        Ok(summary)
    }
}
