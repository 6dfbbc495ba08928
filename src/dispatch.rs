//! Process dispatch: turning evaluated values into running commands.
//!
//! A scalar runs as a single zero-argument command (never word-split); a
//! row is one command with its fields as the argument vector; a table is a
//! parallel batch, one process per row, all spawned before any is waited
//! on.  A batch is reaped completely before a failure inside it is
//! reported, so no child is ever left running or unreaped behind an error.

use std::process::{Child, Command, ExitStatus};

use crate::script::error::ErrorKind;
use crate::script::value::{Scalar, Value};

/// The interpreter's side-effect seam.  Production code uses
/// [`ProcessDispatcher`]; tests substitute a recorder.
pub trait Dispatcher {
    fn dispatch(&mut self, value: &Value) -> Result<(), ErrorKind>;
}

/// Spawns real OS processes and waits for them.
#[derive(Debug, Default)]
pub struct ProcessDispatcher;

impl ProcessDispatcher {
    pub fn new() -> Self {
        ProcessDispatcher
    }

    fn spawn(argv: &[Scalar]) -> Result<Child, ErrorKind> {
        let mut cmd = Command::new(&argv[0].text);
        for arg in &argv[1..] {
            cmd.arg(&arg.text);
        }
        cmd.spawn()
            .map_err(|e| ErrorKind::Spawn(format!("{}: {e}", argv[0].text)))
    }

    fn wait(child: &mut Child) -> Result<ExitStatus, ErrorKind> {
        child
            .wait()
            .map_err(|e| ErrorKind::Io(format!("wait: {e}")))
    }

    /// Run one command to completion.  Death by signal counts as failure.
    fn run_one(argv: &[Scalar]) -> Result<(), ErrorKind> {
        let mut child = Self::spawn(argv)?;
        let status = Self::wait(&mut child)?;
        if status.success() {
            Ok(())
        } else {
            Err(ErrorKind::CommandFailed)
        }
    }

    /// Spawn every non-empty row, then reap them all.  A spawn failure
    /// waits out the children already started before reporting.
    fn run_batch(rows: &[Vec<Scalar>]) -> Result<(), ErrorKind> {
        let mut children = Vec::with_capacity(rows.len());
        for row in rows {
            if row.is_empty() {
                continue;
            }
            match Self::spawn(row) {
                Ok(child) => children.push(child),
                Err(e) => {
                    for mut child in children {
                        let _ = child.wait();
                    }
                    return Err(e);
                }
            }
        }
        let mut failed = false;
        let mut wait_err = None;
        for mut child in children {
            match Self::wait(&mut child) {
                Ok(status) => failed |= !status.success(),
                Err(e) => wait_err = Some(e),
            }
        }
        if let Some(e) = wait_err {
            return Err(e);
        }
        if failed {
            return Err(ErrorKind::CommandFailed);
        }
        Ok(())
    }
}

impl Dispatcher for ProcessDispatcher {
    fn dispatch(&mut self, value: &Value) -> Result<(), ErrorKind> {
        match value {
            Value::Scalar(s) => {
                if s.text.is_empty() {
                    return Ok(());
                }
                Self::run_one(std::slice::from_ref(s))
            }
            Value::Row(fields) => {
                if fields.is_empty() {
                    return Ok(());
                }
                Self::run_one(fields)
            }
            Value::Table(rows) => Self::run_batch(rows),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Scalar {
        Scalar::new(text)
    }

    #[test]
    fn scalar_runs_one_command() {
        let mut d = ProcessDispatcher::new();
        assert!(d.dispatch(&Value::Scalar(s("true"))).is_ok());
    }

    #[test]
    fn empty_scalar_spawns_nothing() {
        let mut d = ProcessDispatcher::new();
        assert!(d.dispatch(&Value::Scalar(s(""))).is_ok());
    }

    #[test]
    fn row_passes_fields_as_argv() {
        let mut d = ProcessDispatcher::new();
        let v = Value::Row(vec![s("sh"), s("-c"), s("exit 0")]);
        assert!(d.dispatch(&v).is_ok());
    }

    #[test]
    fn empty_row_spawns_nothing() {
        let mut d = ProcessDispatcher::new();
        assert!(d.dispatch(&Value::Row(vec![])).is_ok());
    }

    #[test]
    fn failing_command_is_fatal() {
        let mut d = ProcessDispatcher::new();
        let e = d.dispatch(&Value::Scalar(s("false"))).unwrap_err();
        assert_eq!(e, ErrorKind::CommandFailed);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut d = ProcessDispatcher::new();
        let e = d
            .dispatch(&Value::Scalar(s("no-such-program-here")))
            .unwrap_err();
        assert!(matches!(e, ErrorKind::Spawn(_)));
    }

    #[test]
    fn table_runs_every_row() {
        let mut d = ProcessDispatcher::new();
        let v = Value::Table(vec![vec![s("true")], vec![s("true")], vec![s("true")]]);
        assert!(d.dispatch(&v).is_ok());
    }

    #[test]
    fn table_skips_zero_field_rows() {
        let mut d = ProcessDispatcher::new();
        let v = Value::Table(vec![vec![], vec![s("true")], vec![]]);
        assert!(d.dispatch(&v).is_ok());
    }

    #[test]
    fn batch_failure_reported_after_all_rows_reaped() {
        let mut d = ProcessDispatcher::new();
        let v = Value::Table(vec![vec![s("false")], vec![s("true")]]);
        assert_eq!(d.dispatch(&v).unwrap_err(), ErrorKind::CommandFailed);
    }

    #[test]
    fn empty_table_is_a_no_op() {
        let mut d = ProcessDispatcher::new();
        assert!(d.dispatch(&Value::Table(vec![])).is_ok());
    }
}
