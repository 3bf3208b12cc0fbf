//! Completion hooks.
//!
//! A report fires its `on_done` hooks once the table and every side file have
//! been written. Hooks observe the outcome; they cannot fail the report.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use covtable::{Hooks, ReportDone};
//!
//! let count = Rc::new(Cell::new(0));
//! let seen = count.clone();
//! let hooks = Hooks::new().on_done(move |_done: &ReportDone| seen.set(seen.get() + 1));
//!
//! hooks.run_done(&ReportDone::new("text"));
//! assert_eq!(count.get(), 1);
//! ```

use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

/// Emitted after a report has finished writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDone {
    /// Type name of the report, e.g. `"text-folders"`.
    pub report_type: &'static str,
    /// The table went to standard output.
    pub console: bool,
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
}

impl ReportDone {
    pub fn new(report_type: &'static str) -> Self {
        Self {
            report_type,
            console: false,
            written: Vec::new(),
        }
    }
}

/// Type alias for completion hook functions.
pub type DoneFn = Rc<dyn Fn(&ReportDone)>;

/// Hooks registered on a report, executed in order.
#[derive(Clone, Default)]
pub struct Hooks {
    on_done: Vec<DoneFn>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.on_done.is_empty()
    }

    /// Adds a completion hook.
    pub fn on_done<F>(mut self, f: F) -> Self
    where
        F: Fn(&ReportDone) + 'static,
    {
        self.on_done.push(Rc::new(f));
        self
    }

    pub fn run_done(&self, done: &ReportDone) {
        for hook in &self.on_done {
            hook(done);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_done_count", &self.on_done.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_hooks_empty() {
        let hooks = Hooks::new();
        assert!(hooks.is_empty());
        hooks.run_done(&ReportDone::new("text"));
    }

    #[test]
    fn test_hooks_run_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let first = calls.clone();
        let second = calls.clone();
        let hooks = Hooks::new()
            .on_done(move |done| first.borrow_mut().push(format!("1:{}", done.report_type)))
            .on_done(move |done| second.borrow_mut().push(format!("2:{}", done.report_type)));

        hooks.run_done(&ReportDone::new("text-folders"));

        assert_eq!(*calls.borrow(), ["1:text-folders", "2:text-folders"]);
    }

    #[test]
    fn test_debug_shows_count() {
        let hooks = Hooks::new().on_done(|_| {});
        assert_eq!(format!("{:?}", hooks), "Hooks { on_done_count: 1 }");
    }

    #[test]
    fn test_report_done_starts_empty() {
        let done = ReportDone::new("text");
        assert!(!done.console);
        assert!(done.written.is_empty());
    }
}
